// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of transport concerns

pub mod errors;
pub mod recipe;
pub mod repositories;
pub mod user;
