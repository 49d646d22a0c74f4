use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::app::AppState;
use crate::auth::{permissions, BearerClaims};
use crate::errors::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::actor::{parse_birthdate, Actor, ActorCreateRequest, ActorRow, ActorUpdateRequest};

/// Handles GET requests for all available actors.
pub async fn list_actors(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
) -> AppResult<Json<Value>> {
    claims.require(permissions::GET_ACTORS)?;

    let rows = sqlx::query_as::<_, ActorRow>("SELECT id, name, birthdate FROM actors ORDER BY id")
        .fetch_all(&state.pool)
        .await?;

    let actors: Vec<Actor> = rows.into_iter().map(Actor::from).collect();

    Ok(Json(json!({ "success": true, "actors": actors })))
}

pub async fn get_actor(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    claims.require(permissions::GET_ACTORS)?;

    let actor: Actor = fetch_actor(&state.pool, id).await?.into();

    Ok(Json(json!({ "success": true, "actor": actor })))
}

pub async fn create_actor(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
    body: Result<AppJson<ActorCreateRequest>, AppError>,
) -> AppResult<Json<Value>> {
    // Permission first: an unauthorized caller never learns whether the
    // body was decodable.
    claims.require(permissions::POST_ACTORS)?;
    let AppJson(payload) = body?;

    let name = payload.name.ok_or_else(|| AppError::bad_request("name is required"))?;
    let birthdate_raw = payload
        .birthdate
        .ok_or_else(|| AppError::bad_request("birthdate is required"))?;
    let birthdate = parse_birthdate(&birthdate_raw)?;

    let result = sqlx::query("INSERT INTO actors (name, birthdate) VALUES (?, ?)")
        .bind(&name)
        .bind(birthdate)
        .execute(&state.pool)
        .await?;

    let actor: Actor = fetch_actor(&state.pool, result.last_insert_rowid()).await?.into();
    tracing::info!(actor_id = actor.id, "actor created");

    Ok(Json(json!({ "success": true, "actor": actor })))
}

/// Partial update: only the fields present in the body change.
pub async fn update_actor(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
    Path(id): Path<i64>,
    body: Result<AppJson<ActorUpdateRequest>, AppError>,
) -> AppResult<Json<Value>> {
    claims.require(permissions::PATCH_ACTORS)?;
    let AppJson(payload) = body?;

    let mut actor = fetch_actor(&state.pool, id).await?;

    if let Some(name) = payload.name {
        actor.name = name;
    }
    if let Some(raw) = payload.birthdate.as_deref() {
        actor.birthdate = parse_birthdate(raw)?;
    }

    sqlx::query("UPDATE actors SET name = ?, birthdate = ? WHERE id = ?")
        .bind(&actor.name)
        .bind(actor.birthdate)
        .bind(actor.id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "success": true, "actor": Actor::from(actor) })))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    BearerClaims(claims): BearerClaims,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    claims.require(permissions::DELETE_ACTORS)?;

    let affected = sqlx::query("DELETE FROM actors WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if affected.rows_affected() == 0 {
        return Err(AppError::not_found(format!("actor {id} not found")));
    }

    tracing::info!(actor_id = id, "actor deleted");

    Ok(Json(json!({ "success": true, "removed": id })))
}

async fn fetch_actor(pool: &SqlitePool, id: i64) -> AppResult<ActorRow> {
    sqlx::query_as::<_, ActorRow>("SELECT id, name, birthdate FROM actors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found(format!("actor {id} not found")))
}
