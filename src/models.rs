use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Candidate,
    Interviewer,
    Both,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "CANDIDATE",
            Role::Interviewer => "INTERVIEWER",
            Role::Both => "BOTH",
            Role::Admin => "ADMIN",
        }
    }

    pub fn from_str(value: &str) -> Option<Role> {
        match value {
            "CANDIDATE" => Some(Role::Candidate),
            "INTERVIEWER" => Some(Role::Interviewer),
            "BOTH" => Some(Role::Both),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Roles permitted to carry an interviewer profile.
    pub fn can_interview(&self) -> bool {
        matches!(self, Role::Interviewer | Role::Both)
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub linkedin_url: Option<String>,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbUser {
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub linkedin_url: Option<String>,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            name: user.name.unwrap_or_default(),
            role: user
                .role
                .as_deref()
                .and_then(Role::from_str)
                .unwrap_or(Role::Candidate),
            linkedin_url: user.linkedin_url,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct InterviewerProfile {
    pub id: String,
    pub user_id: String,
    pub bio: String,
    pub expertise_tags: Vec<String>,
    pub years_exp: i64,
    pub verified: bool,
    pub rate_cents: i64,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbInterviewerProfile {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub bio: Option<String>,
    pub expertise_tags: Option<String>,
    pub years_exp: Option<i64>,
    pub verified: Option<bool>,
    pub rate_cents: Option<i64>,
}

impl From<DbInterviewerProfile> for InterviewerProfile {
    fn from(profile: DbInterviewerProfile) -> Self {
        Self {
            id: profile.id.unwrap_or_default(),
            user_id: profile.user_id.unwrap_or_default(),
            bio: profile.bio.unwrap_or_default(),
            // Tags are stored as a JSON array; stored order is preserved.
            // The write path only stores valid JSON, so a decode failure
            // means the row is corrupt.
            expertise_tags: match profile.expertise_tags.as_deref() {
                Some(tags) => serde_json::from_str(tags).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Malformed expertise_tags JSON, returning no tags");
                    Vec::new()
                }),
                None => Vec::new(),
            },
            years_exp: profile.years_exp.unwrap_or_default(),
            verified: profile.verified.unwrap_or_default(),
            rate_cents: profile.rate_cents.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct AvailabilitySlot {
    pub id: String,
    pub profile_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_recurring: bool,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbAvailabilitySlot {
    pub id: Option<String>,
    pub profile_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_recurring: Option<bool>,
}

impl From<DbAvailabilitySlot> for AvailabilitySlot {
    fn from(slot: DbAvailabilitySlot) -> Self {
        Self {
            id: slot.id.unwrap_or_default(),
            profile_id: slot.profile_id.unwrap_or_default(),
            start_time: slot.start_time.unwrap_or_else(Utc::now),
            end_time: slot.end_time.unwrap_or_else(Utc::now),
            is_recurring: slot.is_recurring.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct VideoAnalysis {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub segment_index: i64,
    pub analysis: String,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbVideoAnalysis {
    pub id: Option<String>,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub segment_index: Option<i64>,
    pub analysis: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<DbVideoAnalysis> for VideoAnalysis {
    fn from(db: DbVideoAnalysis) -> Self {
        Self {
            id: db.id.unwrap_or_default(),
            session_id: db.session_id.unwrap_or_default(),
            user_id: db.user_id.unwrap_or_default(),
            segment_index: db.segment_index.unwrap_or_default(),
            analysis: db.analysis.unwrap_or_default(),
            created_at: db
                .created_at
                .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct VisionAnalysisFrame {
    pub id: String,
    pub session_id: String,
    pub timestamp_ms: i64,
    pub joy: i64,
    pub sorrow: i64,
    pub anger: i64,
    pub surprise: i64,
    pub eye_contact: bool,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbVisionAnalysisFrame {
    pub id: Option<String>,
    pub session_id: Option<String>,
    pub timestamp_ms: Option<i64>,
    pub joy: Option<i64>,
    pub sorrow: Option<i64>,
    pub anger: Option<i64>,
    pub surprise: Option<i64>,
    pub eye_contact: Option<bool>,
    pub confidence: Option<f64>,
    pub created_at: Option<NaiveDateTime>,
}

impl From<DbVisionAnalysisFrame> for VisionAnalysisFrame {
    fn from(db: DbVisionAnalysisFrame) -> Self {
        Self {
            id: db.id.unwrap_or_default(),
            session_id: db.session_id.unwrap_or_default(),
            timestamp_ms: db.timestamp_ms.unwrap_or_default(),
            joy: db.joy.unwrap_or_default(),
            sorrow: db.sorrow.unwrap_or_default(),
            anger: db.anger.unwrap_or_default(),
            surprise: db.surprise.unwrap_or_default(),
            eye_contact: db.eye_contact.unwrap_or_default(),
            confidence: db.confidence.unwrap_or_default(),
            created_at: db
                .created_at
                .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
