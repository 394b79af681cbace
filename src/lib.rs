//! Oil Shop POS - backend for a small edible-oil shop.
//!
//! Bilingual (English/Myanmar) oil catalogue, weight-based mix pricing,
//! transactional sale recording, and daily/monthly revenue reports
//! bucketed in shop-local time (Asia/Yangon, UTC+06:30).
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: `serve`, `migrate`, `seed`
//! - **config**: environment configuration and constants
//! - **domain**: oils, sales, mix pricing, report periods and shapes
//! - **services**: use cases over a Unit of Work
//! - **infra**: SeaORM entities, migrations, repositories
//! - **api**: axum handlers, JWT middleware, OpenAPI
//! - **types**: response envelopes
//! - **errors**: `AppError` and its HTTP mapping

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
