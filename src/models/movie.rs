use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl From<MovieRow> for Movie {
    fn from(value: MovieRow) -> Self {
        Movie {
            id: value.id,
            title: value.title,
            description: value.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MovieCreateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}
