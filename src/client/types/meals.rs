use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, require, Recipe, Validate};

/// Role a recipe plays within a meal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealComponentType {
    Amuse,
    Appetizer,
    Soup,
    Main,
    Salad,
    Beverage,
    Side,
    Dessert,
    #[default]
    #[serde(other)]
    Unspecified,
}

/// A recipe slotted into a meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealComponent {
    pub recipe: Recipe,
    pub recipe_scale: f32,
    pub component_type: MealComponentType,
}

/// A named combination of recipes that can be scheduled in a meal plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub description: String,
    pub minimum_estimated_portions: f32,
    pub maximum_estimated_portions: Option<f32>,
    pub eligible_for_meal_plans: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<MealComponent>,
    pub created_by_user: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealComponentCreationRequestInput {
    #[serde(rename = "recipeID")]
    pub recipe_id: String,
    pub recipe_scale: f32,
    pub component_type: MealComponentType,
}

impl Validate for MealComponentCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("recipeID", &self.recipe_id)?;
        ensure!(self.recipe_scale > 0.0, "recipeScale must be positive");
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealCreationRequestInput {
    pub name: String,
    pub description: String,
    pub minimum_estimated_portions: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_estimated_portions: Option<f32>,
    pub eligible_for_meal_plans: bool,
    pub components: Vec<MealComponentCreationRequestInput>,
}

impl Validate for MealCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        ensure!(
            self.minimum_estimated_portions > 0.0,
            "minimumEstimatedPortions must be positive"
        );
        if let Some(max) = self.maximum_estimated_portions {
            ensure!(
                max >= self.minimum_estimated_portions,
                "maximumEstimatedPortions must not be below minimumEstimatedPortions"
            );
        }
        ensure!(!self.components.is_empty(), "a meal needs at least one component");
        self.components.iter().try_for_each(Validate::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MealCreationRequestInput {
        MealCreationRequestInput {
            name: "Soup night".to_string(),
            minimum_estimated_portions: 2.0,
            components: vec![MealComponentCreationRequestInput {
                recipe_id: "r_1".to_string(),
                recipe_scale: 1.0,
                component_type: MealComponentType::Main,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn null_components_decode_as_empty() {
        let meal: Meal = serde_json::from_str(r#"{"id":"m_1","name":"Soup","components":null}"#).unwrap();
        assert_eq!(meal.id, "m_1");
        assert!(meal.components.is_empty());
    }

    #[test]
    fn valid_meal_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn meal_without_components_fails() {
        let mut meal = input();
        meal.components.clear();
        assert!(meal.validate().is_err());
    }

    #[test]
    fn inverted_portion_range_fails() {
        let mut meal = input();
        meal.maximum_estimated_portions = Some(1.0);
        assert!(meal.validate().is_err());
    }

    #[test]
    fn unknown_component_types_decode_as_unspecified() {
        let component: MealComponent =
            serde_json::from_str(r#"{"componentType":"palate_cleanser","recipeScale":1}"#).unwrap();
        assert_eq!(component.component_type, MealComponentType::Unspecified);
    }
}
