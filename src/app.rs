use std::sync::Arc;

use axum::http::Method;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::errors::AppError;
use crate::routes::{actors, health, movies};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: AuthConfig) -> Self {
        Self {
            pool,
            auth: Arc::new(auth),
        }
    }
}

pub async fn create_app(pool: SqlitePool) -> Result<Router, AppError> {
    let auth_config = AuthConfig::from_env()?;
    let state = AppState::new(pool, auth_config);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let actor_routes = Router::new()
        .route("/", get(actors::list_actors))
        .route("/", post(actors::create_actor))
        .route("/:id", get(actors::get_actor))
        .route("/:id", patch(actors::update_actor))
        .route("/:id", delete(actors::delete_actor));

    let movie_routes = Router::new()
        .route("/", get(movies::list_movies))
        .route("/", post(movies::create_movie))
        .route("/:id", get(movies::get_movie))
        .route("/:id", patch(movies::update_movie))
        .route("/:id", delete(movies::delete_movie));

    let router = Router::new()
        .route("/health", get(health::health))
        .nest("/actors", actor_routes)
        .nest("/movies", movie_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
