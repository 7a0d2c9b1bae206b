use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, require, Meal, ValidIngredient, Validate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealPlanOption {
    pub id: String,
    pub meal: Meal,
    pub meal_scale: f32,
    pub notes: String,
    pub chosen: bool,
    pub tie_broken: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealPlanEvent {
    pub id: String,
    pub meal_name: String,
    pub notes: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub options: Vec<MealPlanOption>,
}

/// A household's schedule of meals, voted on by its members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub notes: String,
    pub status: String,
    pub election_method: String,
    pub voting_deadline: Option<DateTime<Utc>>,
    pub belongs_to_household: String,
    pub created_by_user: String,
    pub tasks_created: bool,
    pub grocery_list_initialized: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<MealPlanEvent>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanOptionCreationRequestInput {
    #[serde(rename = "mealID")]
    pub meal_id: String,
    pub meal_scale: f32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEventCreationRequestInput {
    pub meal_name: String,
    pub notes: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub options: Vec<MealPlanOptionCreationRequestInput>,
}

impl Validate for MealPlanEventCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("mealName", &self.meal_name)?;
        ensure!(self.ends_at > self.starts_at, "endsAt must be after startsAt");
        for option in &self.options {
            require("mealID", &option.meal_id)?;
            ensure!(option.meal_scale > 0.0, "mealScale must be positive");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanCreationRequestInput {
    pub notes: String,
    pub election_method: String,
    pub voting_deadline: DateTime<Utc>,
    pub events: Vec<MealPlanEventCreationRequestInput>,
}

impl Validate for MealPlanCreationRequestInput {
    fn validate(&self) -> Result<()> {
        ensure!(!self.events.is_empty(), "a meal plan needs at least one event");
        for event in &self.events {
            event.validate()?;
            ensure!(
                event.starts_at >= self.voting_deadline,
                "events must start after the voting deadline"
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub election_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_deadline: Option<DateTime<Utc>>,
}

impl Validate for MealPlanUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        if let Some(method) = &self.election_method {
            require("electionMethod", method)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealPlanTaskStatus {
    #[default]
    Unfinished,
    Postponed,
    Ignored,
    Canceled,
    Finished,
}

/// A preparation step the household has to do ahead of a planned meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealPlanTask {
    pub id: String,
    #[serde(rename = "mealPlanOptionID")]
    pub meal_plan_option_id: String,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: String,
    pub assigned_to_user: Option<String>,
    pub status: MealPlanTaskStatus,
    pub status_explanation: String,
    pub creation_explanation: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanTaskCreationRequestInput {
    #[serde(rename = "mealPlanOptionID")]
    pub meal_plan_option_id: String,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_user: Option<String>,
    pub status: MealPlanTaskStatus,
    pub status_explanation: String,
    pub creation_explanation: String,
}

impl Validate for MealPlanTaskCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("mealPlanOptionID", &self.meal_plan_option_id)?;
        require("recipeStepID", &self.recipe_step_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanTaskStatusChangeRequestInput {
    pub status: Option<MealPlanTaskStatus>,
    pub status_explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_user: Option<String>,
}

impl Validate for MealPlanTaskStatusChangeRequestInput {
    fn validate(&self) -> Result<()> {
        ensure!(self.status.is_some(), "status is required");
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealPlanGroceryListItem {
    pub id: String,
    pub belongs_to_meal_plan: String,
    pub ingredient: ValidIngredient,
    pub minimum_quantity_needed: f32,
    pub maximum_quantity_needed: Option<f32>,
    pub quantity_purchased: Option<f32>,
    pub purchased_upc: Option<String>,
    pub purchase_price: Option<f32>,
    pub status: String,
    pub status_explanation: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanGroceryListItemCreationRequestInput {
    pub belongs_to_meal_plan: String,
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: String,
    #[serde(rename = "validMeasurementUnitID")]
    pub valid_measurement_unit_id: String,
    pub minimum_quantity_needed: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_quantity_needed: Option<f32>,
    pub status: String,
    pub status_explanation: String,
}

impl Validate for MealPlanGroceryListItemCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("belongsToMealPlan", &self.belongs_to_meal_plan)?;
        require("validIngredientID", &self.valid_ingredient_id)?;
        require("validMeasurementUnitID", &self.valid_measurement_unit_id)?;
        ensure!(
            self.minimum_quantity_needed > 0.0,
            "minimumQuantityNeeded must be positive"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanGroceryListItemUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_quantity_needed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_quantity_needed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_purchased: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_upc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_explanation: Option<String>,
}

impl Validate for MealPlanGroceryListItemUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        if let Some(price) = self.purchase_price {
            ensure!(price >= 0.0, "purchasePrice must not be negative");
        }
        Ok(())
    }
}

// Worker triggers

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeMealPlansRequest {
    pub return_count: bool,
}

impl Validate for FinalizeMealPlansRequest {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizeMealPlansResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeMealPlanGroceryListRequest {
    #[serde(rename = "householdID", skip_serializing_if = "Option::is_none")]
    pub household_id: Option<String>,
}

impl Validate for InitializeMealPlanGroceryListRequest {
    fn validate(&self) -> Result<()> {
        if let Some(id) = &self.household_id {
            require("householdID", id)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitializeMealPlanGroceryListResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMealPlanTasksRequest {
    #[serde(rename = "householdID", skip_serializing_if = "Option::is_none")]
    pub household_id: Option<String>,
}

impl Validate for CreateMealPlanTasksRequest {
    fn validate(&self) -> Result<()> {
        if let Some(id) = &self.household_id {
            require("householdID", id)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateMealPlanTasksResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(starts_at: DateTime<Utc>) -> MealPlanEventCreationRequestInput {
        MealPlanEventCreationRequestInput {
            meal_name: "dinner".to_string(),
            notes: String::new(),
            starts_at,
            ends_at: starts_at + Duration::hours(2),
            options: vec![MealPlanOptionCreationRequestInput {
                meal_id: "m_1".to_string(),
                meal_scale: 1.0,
                notes: String::new(),
            }],
        }
    }

    #[test]
    fn events_must_follow_the_voting_deadline() {
        let deadline = Utc::now();
        let mut plan = MealPlanCreationRequestInput {
            notes: String::new(),
            election_method: "schulze".to_string(),
            voting_deadline: deadline,
            events: vec![event(deadline + Duration::days(1))],
        };
        assert!(plan.validate().is_ok());

        plan.events = vec![event(deadline - Duration::days(1))];
        assert!(plan.validate().is_err());
    }

    #[test]
    fn status_change_requires_a_status() {
        let mut input = MealPlanTaskStatusChangeRequestInput::default();
        assert!(input.validate().is_err());

        input.status = Some(MealPlanTaskStatus::Finished);
        assert!(input.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&input).unwrap()["status"],
            serde_json::json!("finished")
        );
    }
}
