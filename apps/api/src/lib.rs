//! Recipe API Library
//!
//! Per-user recipes, tags and ingredients behind bearer-token
//! authentication: domain logic, PostgreSQL repositories and the HTTP layer.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
