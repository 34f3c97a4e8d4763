//! HTTP API handlers for ihub-api

pub mod analysis;
pub mod auth;
pub mod campaigns;
pub mod health;
pub mod payments;
pub mod ui;
pub mod users;

pub use auth::auth_middleware;
pub use health::health_routes;
