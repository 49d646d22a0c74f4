pub mod app;
pub mod auth;
pub mod db;
pub mod errors;
pub mod extract;
pub mod models;
pub mod routes;

pub use app::create_app;
