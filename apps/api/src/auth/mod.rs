// Credential handling
// Password hashing and bearer token issuing, independent of HTTP

pub mod jwt;
pub mod password;
