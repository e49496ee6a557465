use std::fmt;
use uuid::Uuid;

use crate::domain::errors::ValidationError;

/// Longest accepted label name
pub const MAX_NAME_LEN: usize = 255;

/// A named, user-owned item that can be attached to recipes
///
/// Tags and ingredients share this shape. Each lives in its own table and
/// displays as its name.
pub trait Label: fmt::Display + fmt::Debug + Clone + Send + Sync + 'static {
    /// Table holding rows of this kind
    const TABLE: &'static str;
    /// Singular name used in messages
    const KIND: &'static str;

    fn from_parts(id: i64, user_id: Uuid, name: String) -> Self;

    fn id(&self) -> i64;

    fn user_id(&self) -> Uuid;

    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);
}

/// Checks a label name before it is written
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name", "Name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            "name",
            format!("Name cannot exceed {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(())
}

/// Tag for categorizing recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: i64,
    user_id: Uuid,
    name: String,
}

impl Label for Tag {
    const TABLE: &'static str = "tags";
    const KIND: &'static str = "tag";

    fn from_parts(id: i64, user_id: Uuid, name: String) -> Self {
        Self { id, user_id, name }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ingredient used in recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    id: i64,
    user_id: Uuid,
    name: String,
}

impl Label for Ingredient {
    const TABLE: &'static str = "ingredients";
    const KIND: &'static str = "ingredient";

    fn from_parts(id: i64, user_id: Uuid, name: String) -> Self {
        Self { id, user_id, name }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
