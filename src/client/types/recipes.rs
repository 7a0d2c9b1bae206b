use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, require, MealComponentType, ValidIngredient, ValidPreparation, Validate};

/// A recipe with its ordered steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub source: String,
    pub description: String,
    #[serde(rename = "inspiredByRecipeID")]
    pub inspired_by_recipe_id: Option<String>,
    pub minimum_estimated_portions: f32,
    pub maximum_estimated_portions: Option<f32>,
    pub portion_name: String,
    pub plural_portion_name: String,
    /// Set by service admins on recipes that are known to work
    pub seal_of_approval: bool,
    pub eligible_for_meals: bool,
    pub yields_component_type: MealComponentType,
    #[serde(deserialize_with = "null_as_default")]
    pub steps: Vec<RecipeStep>,
    pub created_by_user: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: String,
    pub index: u32,
    pub preparation: ValidPreparation,
    pub notes: String,
    pub explicit_instructions: String,
    pub minimum_estimated_time_in_seconds: Option<u32>,
    pub maximum_estimated_time_in_seconds: Option<u32>,
    pub optional: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub ingredients: Vec<RecipeStepIngredient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeStepIngredient {
    pub id: String,
    pub name: String,
    /// Absent when the ingredient is the product of an earlier step
    pub ingredient: Option<ValidIngredient>,
    pub minimum_quantity: f32,
    pub maximum_quantity: Option<f32>,
    pub quantity_notes: String,
    pub optional: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepIngredientCreationRequestInput {
    #[serde(rename = "ingredientID", skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<String>,
    pub name: String,
    pub minimum_quantity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_quantity: Option<f32>,
    pub quantity_notes: String,
    pub optional: bool,
}

impl Validate for RecipeStepIngredientCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        ensure!(self.minimum_quantity > 0.0, "minimumQuantity must be positive");
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepCreationRequestInput {
    pub index: u32,
    #[serde(rename = "preparationID")]
    pub preparation_id: String,
    pub notes: String,
    pub explicit_instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_estimated_time_in_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_estimated_time_in_seconds: Option<u32>,
    pub optional: bool,
    pub ingredients: Vec<RecipeStepIngredientCreationRequestInput>,
}

impl Validate for RecipeStepCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("preparationID", &self.preparation_id)?;
        if let (Some(min), Some(max)) = (
            self.minimum_estimated_time_in_seconds,
            self.maximum_estimated_time_in_seconds,
        ) {
            ensure!(max >= min, "maximumEstimatedTimeInSeconds must not be below the minimum");
        }
        self.ingredients.iter().try_for_each(Validate::validate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreationRequestInput {
    pub name: String,
    pub slug: String,
    pub source: String,
    pub description: String,
    #[serde(rename = "inspiredByRecipeID", skip_serializing_if = "Option::is_none")]
    pub inspired_by_recipe_id: Option<String>,
    pub minimum_estimated_portions: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_estimated_portions: Option<f32>,
    pub portion_name: String,
    pub plural_portion_name: String,
    pub seal_of_approval: bool,
    pub eligible_for_meals: bool,
    pub yields_component_type: MealComponentType,
    pub steps: Vec<RecipeStepCreationRequestInput>,
}

impl Validate for RecipeCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        ensure!(
            self.minimum_estimated_portions > 0.0,
            "minimumEstimatedPortions must be positive"
        );
        ensure!(!self.steps.is_empty(), "a recipe needs at least one step");

        let mut indices: Vec<u32> = self.steps.iter().map(|s| s.index).collect();
        indices.sort_unstable();
        indices.dedup();
        ensure!(indices.len() == self.steps.len(), "step indices must be unique");

        self.steps.iter().try_for_each(Validate::validate)
    }
}

/// Partial update. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_estimated_portions: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_estimated_portions: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portion_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_portion_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal_of_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_for_meals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yields_component_type: Option<MealComponentType>,
}

impl Validate for RecipeUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require("name", name)?;
        }
        if let Some(min) = self.minimum_estimated_portions {
            ensure!(min > 0.0, "minimumEstimatedPortions must be positive");
        }
        Ok(())
    }
}

/// One user's rating of a recipe. Scores range from 0 to 5.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeRating {
    pub id: String,
    #[serde(rename = "recipeID")]
    pub recipe_id: String,
    pub by_user: String,
    pub taste: f32,
    pub difficulty: f32,
    pub cleanup: f32,
    pub instructions: f32,
    pub overall: f32,
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

pub const MAX_RATING: f32 = 5.0;

fn rating(field: &str, value: f32) -> Result<()> {
    ensure!(
        (0.0..=MAX_RATING).contains(&value),
        "{field} must be between 0 and {MAX_RATING}"
    );
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRatingCreationRequestInput {
    #[serde(rename = "recipeID")]
    pub recipe_id: String,
    pub taste: f32,
    pub difficulty: f32,
    pub cleanup: f32,
    pub instructions: f32,
    pub overall: f32,
    pub notes: String,
}

impl Validate for RecipeRatingCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("recipeID", &self.recipe_id)?;
        rating("taste", self.taste)?;
        rating("difficulty", self.difficulty)?;
        rating("cleanup", self.cleanup)?;
        rating("instructions", self.instructions)?;
        rating("overall", self.overall)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRatingUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taste: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for RecipeRatingUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        let scores = [
            ("taste", self.taste),
            ("difficulty", self.difficulty),
            ("cleanup", self.cleanup),
            ("instructions", self.instructions),
            ("overall", self.overall),
        ];
        for (field, score) in scores {
            if let Some(score) = score {
                rating(field, score)?;
            }
        }
        Ok(())
    }
}
