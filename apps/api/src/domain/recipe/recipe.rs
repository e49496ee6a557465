use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

use crate::domain::errors::ValidationError;

/// Longest accepted title
pub const MAX_TITLE_LEN: usize = 255;

/// Prices are stored as NUMERIC(5, 2)
const PRICE_SCALE: u32 = 2;
const PRICE_MAX_DIGITS: u32 = 5;

/// A recipe owned by exactly one user
///
/// Displays as its title.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
    pub image: Option<String>,
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Writable fields of a new recipe
///
/// The owner is not part of the draft; repositories take it from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
}

impl RecipeDraft {
    /// Checks every field
    ///
    /// # Example
    /// ```
    /// use recipe_api::domain::recipe::RecipeDraft;
    /// use rust_decimal::Decimal;
    ///
    /// let draft = RecipeDraft {
    ///     title: "Sample recipe".to_string(),
    ///     time_minutes: 5,
    ///     price: Decimal::new(550, 2),
    ///     description: String::new(),
    /// };
    /// assert!(draft.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_time_minutes(self.time_minutes)?;
        validate_price(self.price)
    }
}

/// Partial update of a recipe; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

impl RecipeChanges {
    /// Checks the fields that are present
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(minutes) = self.time_minutes {
            validate_time_minutes(minutes)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Applies the present fields to a recipe in place
    pub fn apply_to(&self, recipe: &mut Recipe) {
        if let Some(title) = &self.title {
            recipe.title = title.clone();
        }
        if let Some(minutes) = self.time_minutes {
            recipe.time_minutes = minutes;
        }
        if let Some(price) = self.price {
            recipe.price = price;
        }
        if let Some(description) = &self.description {
            recipe.description = description.clone();
        }
    }
}

impl From<RecipeDraft> for RecipeChanges {
    fn from(draft: RecipeDraft) -> Self {
        Self {
            title: Some(draft.title),
            time_minutes: Some(draft.time_minutes),
            price: Some(draft.price),
            description: Some(draft.description),
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", "Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::new(
            "title",
            format!("Title cannot exceed {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(())
}

fn validate_time_minutes(minutes: i32) -> Result<(), ValidationError> {
    if minutes < 0 {
        return Err(ValidationError::new(
            "time_minutes",
            "Time cannot be negative",
        ));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price", "Price cannot be negative"));
    }

    let normalized = price.normalize();
    if normalized.scale() > PRICE_SCALE {
        return Err(ValidationError::new(
            "price",
            format!("Price cannot have more than {} decimal places", PRICE_SCALE),
        ));
    }

    let limit = Decimal::from(10_i64.pow(PRICE_MAX_DIGITS - PRICE_SCALE));
    if price >= limit {
        return Err(ValidationError::new(
            "price",
            format!("Price must be less than {}", limit),
        ));
    }
    Ok(())
}
