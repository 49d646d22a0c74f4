use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

/// Formatted record shape returned by the API; never the raw row.
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub birthdate: NaiveDate,
}

#[derive(Debug, Clone, FromRow)]
pub struct ActorRow {
    pub id: i64,
    pub name: String,
    pub birthdate: NaiveDate,
}

impl From<ActorRow> for Actor {
    fn from(value: ActorRow) -> Self {
        Actor {
            id: value.id,
            name: value.name,
            birthdate: value.birthdate,
        }
    }
}

/// Fields are optional so that missing ones surface as an explicit 400
/// instead of a body-deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ActorCreateRequest {
    pub name: Option<String>,
    pub birthdate: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActorUpdateRequest {
    pub name: Option<String>,
    pub birthdate: Option<String>,
}

pub fn parse_birthdate(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::unprocessable(format!("birthdate {raw:?} is not a valid YYYY-MM-DD date")))
}
