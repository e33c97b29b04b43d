use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    AvailabilitySlot, DbAvailabilitySlot, DbInterviewerProfile, DbUser, DbVideoAnalysis,
    DbVisionAnalysisFrame, InterviewerProfile, Role, User, VideoAnalysis, VisionAnalysisFrame,
};

#[instrument(skip(pool))]
pub async fn find_interviewer(pool: &Pool<Sqlite>, id: &str) -> Result<Option<User>, AppError> {
    info!("Fetching interviewer by ID");
    let row = sqlx::query_as::<_, DbUser>(
        "SELECT id, name, role, linkedin_url FROM users
         WHERE id = ? AND role IN ('INTERVIEWER', 'BOTH')",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

#[instrument(skip(pool))]
pub async fn get_user(pool: &Pool<Sqlite>, id: &str) -> Result<User, AppError> {
    info!("Fetching user by ID");
    let row = sqlx::query_as::<_, DbUser>(
        "SELECT id, name, role, linkedin_url FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(user) => Ok(User::from(user)),
        _ => Err(AppError::NotFound(format!(
            "User with id {} not found in database",
            id
        ))),
    }
}

#[instrument(skip(pool))]
pub async fn get_interviewer_profile(
    pool: &Pool<Sqlite>,
    user_id: &str,
) -> Result<Option<InterviewerProfile>, AppError> {
    info!("Fetching interviewer profile");
    let row = sqlx::query_as::<_, DbInterviewerProfile>(
        "SELECT id, user_id, bio, expertise_tags, years_exp, verified, rate_cents
         FROM interviewer_profiles WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(InterviewerProfile::from))
}

/// Future-dated slots only, ascending by start time.
#[instrument(skip(pool, now))]
pub async fn get_future_availability(
    pool: &Pool<Sqlite>,
    profile_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<AvailabilitySlot>, AppError> {
    info!("Fetching future availability slots");
    let rows = sqlx::query_as::<_, DbAvailabilitySlot>(
        "SELECT id, profile_id, start_time, end_time, is_recurring
         FROM availability_slots
         WHERE profile_id = ? AND start_time >= ?
         ORDER BY start_time ASC",
    )
    .bind(profile_id)
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(AvailabilitySlot::from).collect())
}

#[instrument(skip_all, fields(name, role))]
pub async fn create_user(
    pool: &Pool<Sqlite>,
    name: &str,
    role: Role,
    linkedin_url: Option<&str>,
) -> Result<String, AppError> {
    info!("Creating new user");
    let id = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO users (id, name, role, linkedin_url) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(role.as_str())
        .bind(linkedin_url)
        .execute(pool)
        .await?;

    Ok(id)
}

#[instrument(skip_all, fields(user_id))]
pub async fn create_interviewer_profile(
    pool: &Pool<Sqlite>,
    user_id: &str,
    bio: &str,
    expertise_tags: &[String],
    years_exp: i64,
    verified: bool,
    rate_cents: i64,
) -> Result<String, AppError> {
    info!("Creating interviewer profile");

    // Profiles only exist for users whose role permits interviewing.
    let user = get_user(pool, user_id).await?;
    if !user.role.can_interview() {
        return Err(AppError::Validation(format!(
            "User {} has role {} and cannot hold an interviewer profile",
            user_id,
            user.role.as_str()
        )));
    }

    let id = Uuid::new_v4().to_string();
    let tags_json = serde_json::to_string(expertise_tags)
        .map_err(|e| AppError::Internal(format!("Failed to encode expertise tags: {}", e)))?;

    sqlx::query(
        "INSERT INTO interviewer_profiles
         (id, user_id, bio, expertise_tags, years_exp, verified, rate_cents)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(user_id)
    .bind(bio)
    .bind(&tags_json)
    .bind(years_exp)
    .bind(verified)
    .bind(rate_cents)
    .execute(pool)
    .await?;

    Ok(id)
}

#[instrument(skip_all, fields(profile_id))]
pub async fn create_availability_slot(
    pool: &Pool<Sqlite>,
    profile_id: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    is_recurring: bool,
) -> Result<String, AppError> {
    info!("Creating availability slot");

    if end_time <= start_time {
        return Err(AppError::Validation(
            "Slot end time must be after start time".to_string(),
        ));
    }

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO availability_slots (id, profile_id, start_time, end_time, is_recurring)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(profile_id)
    .bind(start_time)
    .bind(end_time)
    .bind(is_recurring)
    .execute(pool)
    .await?;

    Ok(id)
}

#[instrument(skip_all, fields(interviewer_id, candidate_id))]
pub async fn create_interview_session(
    pool: &Pool<Sqlite>,
    interviewer_id: &str,
    candidate_id: &str,
    scheduled_at: Option<DateTime<Utc>>,
) -> Result<String, AppError> {
    info!("Creating interview session");
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO interview_sessions (id, interviewer_id, candidate_id, scheduled_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(interviewer_id)
    .bind(candidate_id)
    .bind(scheduled_at)
    .execute(pool)
    .await?;

    Ok(id)
}

#[instrument(skip(pool))]
pub async fn delete_interview_session(pool: &Pool<Sqlite>, id: &str) -> Result<u64, AppError> {
    info!("Deleting interview session");
    let result = sqlx::query("DELETE FROM interview_sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[instrument(skip_all, fields(session_id, segment_index))]
pub async fn insert_video_analysis(
    pool: &Pool<Sqlite>,
    session_id: &str,
    user_id: &str,
    segment_index: i64,
    analysis: &str,
) -> Result<String, AppError> {
    info!("Inserting video analysis segment");
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO video_analysis (id, session_id, user_id, segment_index, analysis)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(session_id)
    .bind(user_id)
    .bind(segment_index)
    .bind(analysis)
    .execute(pool)
    .await?;

    Ok(id)
}

#[instrument(skip(pool))]
pub async fn get_video_analyses(
    pool: &Pool<Sqlite>,
    session_id: &str,
) -> Result<Vec<VideoAnalysis>, AppError> {
    info!("Fetching video analyses for session");
    let rows = sqlx::query_as::<_, DbVideoAnalysis>(
        "SELECT id, session_id, user_id, segment_index, analysis, created_at
         FROM video_analysis
         WHERE session_id = ?
         ORDER BY segment_index ASC",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(VideoAnalysis::from).collect())
}

#[allow(clippy::too_many_arguments)]
#[instrument(skip_all, fields(session_id, timestamp_ms))]
pub async fn insert_vision_frame(
    pool: &Pool<Sqlite>,
    session_id: &str,
    timestamp_ms: i64,
    joy: i64,
    sorrow: i64,
    anger: i64,
    surprise: i64,
    eye_contact: bool,
    confidence: f64,
) -> Result<String, AppError> {
    info!("Inserting vision analysis frame");
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO vision_analysis_frames
         (id, session_id, timestamp_ms, joy, sorrow, anger, surprise, eye_contact, confidence)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(session_id)
    .bind(timestamp_ms)
    .bind(joy)
    .bind(sorrow)
    .bind(anger)
    .bind(surprise)
    .bind(eye_contact)
    .bind(confidence)
    .execute(pool)
    .await?;

    Ok(id)
}

#[instrument(skip(pool))]
pub async fn get_session_frames(
    pool: &Pool<Sqlite>,
    session_id: &str,
) -> Result<Vec<VisionAnalysisFrame>, AppError> {
    info!("Fetching vision frames for session");
    let rows = sqlx::query_as::<_, DbVisionAnalysisFrame>(
        "SELECT id, session_id, timestamp_ms, joy, sorrow, anger, surprise,
                eye_contact, confidence, created_at
         FROM vision_analysis_frames
         WHERE session_id = ?
         ORDER BY timestamp_ms ASC",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(VisionAnalysisFrame::from).collect())
}
