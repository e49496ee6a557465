use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::password::MAX_PASSWORD_BYTES;
use crate::domain::errors::ValidationError;

/// Longest accepted email address, in characters
pub const MAX_EMAIL_LEN: usize = 255;

/// Longest accepted display name, in characters
pub const MAX_USER_NAME_LEN: usize = 255;

/// Email value object holding a normalized address
///
/// # Invariants
/// - Never empty
/// - At most `MAX_EMAIL_LEN` characters
/// - Domain part (after the last '@') is lowercase
/// - Local part keeps the case it was given with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object, normalizing the domain
    ///
    /// # Returns
    /// * `Ok(Email)` - If the address is non-empty
    /// * `Err(ValidationError)` - If the address is blank or too long
    ///
    /// # Example
    /// ```
    /// use recipe_api::domain::user::value_objects::Email;
    ///
    /// let email = Email::new("Test2@Example.com").expect("valid email");
    /// assert_eq!(email.as_str(), "Test2@example.com");
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, ValidationError> {
        let email = email.as_ref();
        if email.trim().is_empty() {
            return Err(ValidationError::new(
                "email",
                "Users must have an email address",
            ));
        }
        let normalized = Self::normalize(email);
        if normalized.chars().count() > MAX_EMAIL_LEN {
            return Err(ValidationError::new(
                "email",
                format!("Email cannot exceed {} characters", MAX_EMAIL_LEN),
            ));
        }
        Ok(Email(normalized))
    }

    /// Lowercases the domain part of an address
    ///
    /// The split happens at the last '@'. Input without '@' is returned as is.
    pub fn normalize(email: &str) -> String {
        match email.trim().rsplit_once('@') {
            Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
            None => email.to_string(),
        }
    }

    /// Whether the address has a non-empty local part and domain
    pub fn is_well_formed(&self) -> bool {
        match self.0.rsplit_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
            None => false,
        }
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wraps an address read back from storage, which is already normalized
    pub(crate) fn from_persistence(email: String) -> Self {
        Email(email)
    }
}

/// Validates an account display name; empty is allowed
pub fn validate_user_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() > MAX_USER_NAME_LEN {
        return Err(ValidationError::new(
            "name",
            format!("Name cannot exceed {} characters", MAX_USER_NAME_LEN),
        ));
    }
    Ok(())
}

/// Rejects passwords bcrypt would silently truncate
pub fn validate_password_size(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new(
            "password",
            format!("Password cannot exceed {} bytes", MAX_PASSWORD_BYTES),
        ));
    }
    Ok(())
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
