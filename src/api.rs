use chrono::{DateTime, Utc};
use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::{Deserialize, Serialize, json::Json};
use sqlx::{Pool, Sqlite};

use crate::db::{find_interviewer, get_future_availability, get_interviewer_profile};
use crate::error::AppError;
use crate::models::AvailabilitySlot;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExpertResponse {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub expertise_tags: Vec<String>,
    pub years_exp: i64,
    pub verified: bool,
    pub rate_cents: i64,
    pub linkedin_url: Option<String>,
    pub availability: Vec<SlotResponse>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub id: String,
    pub start: String,
    pub end: String,
    pub is_recurring: bool,
}

impl From<AvailabilitySlot> for SlotResponse {
    fn from(slot: AvailabilitySlot) -> Self {
        Self {
            id: slot.id,
            start: slot.start_time.to_rfc3339(),
            end: slot.end_time.to_rfc3339(),
            is_recurring: slot.is_recurring,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    fn new(message: &str) -> Json<ErrorBody> {
        Json(ErrorBody {
            error: message.to_string(),
        })
    }
}

/// Composes the role-filtered user lookup, the 1:1 profile fetch and the
/// future-only slot query. `None` covers both a missing/ineligible user and
/// an eligible user without a profile row.
async fn lookup_expert(
    pool: &Pool<Sqlite>,
    id: &str,
    now: DateTime<Utc>,
) -> Result<Option<ExpertResponse>, AppError> {
    let user = match find_interviewer(pool, id).await? {
        Some(user) => user,
        None => return Ok(None),
    };

    let profile = match get_interviewer_profile(pool, &user.id).await? {
        Some(profile) => profile,
        None => return Ok(None),
    };

    let slots = get_future_availability(pool, &profile.id, now).await?;

    Ok(Some(ExpertResponse {
        id: user.id,
        name: user.name,
        bio: profile.bio,
        expertise_tags: profile.expertise_tags,
        years_exp: profile.years_exp,
        verified: profile.verified,
        rate_cents: profile.rate_cents,
        linkedin_url: user.linkedin_url,
        availability: slots.into_iter().map(SlotResponse::from).collect(),
    }))
}

#[get("/experts/<id>")]
pub async fn api_get_expert(
    id: &str,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<ExpertResponse>, Custom<Json<ErrorBody>>> {
    match lookup_expert(db, id, Utc::now()).await {
        Ok(Some(expert)) => Ok(Json(expert)),
        Ok(None) => Err(Custom(
            Status::NotFound,
            ErrorBody::new("Interviewer not found"),
        )),
        Err(e) => {
            // Internal detail stays in the logs; the caller gets the
            // generic body regardless of what failed.
            e.log_and_record("GET /experts/<id>");
            Err(Custom(
                Status::InternalServerError,
                ErrorBody::new("Internal server error"),
            ))
        }
    }
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}
