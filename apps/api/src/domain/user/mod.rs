// User domain module
// Email identity and account provisioning

pub mod manager;
pub mod value_objects;

pub use manager::{AccountError, NewUser, UserManager};
pub use value_objects::{validate_password_size, validate_user_name, Email};
