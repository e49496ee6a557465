// Request extractors shared by protected handlers

pub mod auth;

pub use auth::AuthUser;
