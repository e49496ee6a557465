// Recipe domain module
// Recipes and the per-user labels (tags, ingredients) attached to them

#![allow(clippy::module_inception)]

pub mod label;
pub mod recipe;

pub use label::{Ingredient, Label, Tag};
pub use recipe::{Recipe, RecipeChanges, RecipeDraft};
