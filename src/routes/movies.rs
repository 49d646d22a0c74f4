use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::app::AppState;
use crate::auth::{permissions, BearerClaims};
use crate::errors::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::movie::{Movie, MovieCreateRequest, MovieRow, MovieUpdateRequest};

/// Handles GET requests for all available movies.
pub async fn list_movies(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
) -> AppResult<Json<Value>> {
    claims.require(permissions::GET_MOVIES)?;

    let rows = sqlx::query_as::<_, MovieRow>("SELECT id, title, description FROM movies ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let movies: Vec<Movie> = rows.into_iter().map(Movie::from).collect();

    Ok(Json(json!({ "success": true, "movies": movies })))
}

pub async fn get_movie(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    claims.require(permissions::GET_MOVIES)?;

    let movie: Movie = fetch_movie(&state.pool, id).await?.into();

    Ok(Json(json!({ "success": true, "movie": movie })))
}

pub async fn create_movie(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
    body: Result<AppJson<MovieCreateRequest>, AppError>,
) -> AppResult<Json<Value>> {
    // Permission first: an unauthorized caller never learns whether the
    // body was decodable.
    claims.require(permissions::POST_MOVIES)?;
    let AppJson(payload) = body?;

    let title = payload.title.ok_or_else(|| AppError::bad_request("title is required"))?;
    let description = payload
        .description
        .ok_or_else(|| AppError::bad_request("description is required"))?;

    let result = sqlx::query("INSERT INTO movies (title, description) VALUES (?, ?)")
        .bind(&title)
        .bind(&description)
        .execute(&state.pool)
        .await?;

    let movie: Movie = fetch_movie(&state.pool, result.last_insert_rowid()).await?.into();
    tracing::info!(movie_id = movie.id, "movie created");

    Ok(Json(json!({ "success": true, "movie": movie })))
}

/// Partial update: only the fields present in the body change.
pub async fn update_movie(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
    Path(id): Path<i64>,
    body: Result<AppJson<MovieUpdateRequest>, AppError>,
) -> AppResult<Json<Value>> {
    claims.require(permissions::PATCH_MOVIES)?;
    let AppJson(payload) = body?;

    let mut movie = fetch_movie(&state.pool, id).await?;

    if let Some(title) = payload.title {
        movie.title = title;
    }
    if let Some(description) = payload.description {
        movie.description = description;
    }

    sqlx::query("UPDATE movies SET title = ?, description = ? WHERE id = ?")
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "success": true, "movie": Movie::from(movie) })))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    claims.require(permissions::DELETE_MOVIES)?;

    let affected = sqlx::query("DELETE FROM movies WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if affected.rows_affected() == 0 {
        return Err(AppError::not_found(format!("movie {id} not found")));
    }

    tracing::info!(movie_id = id, "movie deleted");

    Ok(Json(json!({ "success": true, "removed": id })))
}

async fn fetch_movie(pool: &SqlitePool, id: i64) -> AppResult<MovieRow> {
    sqlx::query_as::<_, MovieRow>("SELECT id, title, description FROM movies WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movie {id} not found")))
}
