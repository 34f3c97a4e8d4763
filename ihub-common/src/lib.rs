//! # InfluencerHub Common Library
//!
//! Shared code for the InfluencerHub backend:
//! - Configuration loading and data folder resolution
//! - Database initialization, schema, and migrations
//! - Data models shared between handlers and queries
//! - Access token decoding for the external identity provider

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
