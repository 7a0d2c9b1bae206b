//! The curated catalogue: ingredients, ingredient groups, preparations and vessels.

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, require, Validate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidIngredient {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub slug: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub storage_instructions: String,
    pub shopping_suggestions: String,
    pub minimum_ideal_storage_temperature_in_celsius: Option<f32>,
    pub maximum_ideal_storage_temperature_in_celsius: Option<f32>,
    pub contains_dairy: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_egg: bool,
    pub contains_wheat: bool,
    pub contains_shellfish: bool,
    pub contains_sesame: bool,
    pub contains_fish: bool,
    pub contains_gluten: bool,
    pub contains_soy: bool,
    pub contains_alcohol: bool,
    pub animal_flesh: bool,
    pub animal_derived: bool,
    pub is_measured_volumetrically: bool,
    pub is_liquid: bool,
    pub restrict_to_preparations: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub slug: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub storage_instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_ideal_storage_temperature_in_celsius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_ideal_storage_temperature_in_celsius: Option<f32>,
    pub contains_dairy: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_egg: bool,
    pub contains_wheat: bool,
    pub contains_shellfish: bool,
    pub contains_sesame: bool,
    pub contains_fish: bool,
    pub contains_gluten: bool,
    pub contains_soy: bool,
    pub contains_alcohol: bool,
    pub animal_flesh: bool,
    pub animal_derived: bool,
    pub is_measured_volumetrically: bool,
    pub is_liquid: bool,
    pub restrict_to_preparations: bool,
}

fn storage_range(min: Option<f32>, max: Option<f32>) -> Result<()> {
    if let (Some(min), Some(max)) = (min, max) {
        ensure!(
            max >= min,
            "maximumIdealStorageTemperatureInCelsius must not be below the minimum"
        );
    }
    Ok(())
}

impl Validate for ValidIngredientCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        storage_range(
            self.minimum_ideal_storage_temperature_in_celsius,
            self.maximum_ideal_storage_temperature_in_celsius,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_ideal_storage_temperature_in_celsius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_ideal_storage_temperature_in_celsius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liquid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_derived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrict_to_preparations: Option<bool>,
}

impl Validate for ValidIngredientUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require("name", name)?;
        }
        storage_range(
            self.minimum_ideal_storage_temperature_in_celsius,
            self.maximum_ideal_storage_temperature_in_celsius,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidIngredientGroupMember {
    pub id: String,
    pub belongs_to_group: String,
    pub valid_ingredient: ValidIngredient,
}

/// A named set of interchangeable ingredients, e.g. "onions".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidIngredientGroup {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub members: Vec<ValidIngredientGroupMember>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidIngredientGroupMemberCreationRequestInput {
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientGroupCreationRequestInput {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub members: Vec<ValidIngredientGroupMemberCreationRequestInput>,
}

impl Validate for ValidIngredientGroupCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("slug", &self.slug)?;
        ensure!(!self.members.is_empty(), "a group needs at least one member");
        for member in &self.members {
            require("validIngredientID", &member.valid_ingredient_id)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientGroupUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for ValidIngredientGroupUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.name.is_some() || self.slug.is_some() || self.description.is_some(),
            "update changes nothing"
        );
        Ok(())
    }
}

/// Something done to ingredients: chopping, roasting, resting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidPreparation {
    pub id: String,
    pub name: String,
    pub past_tense: String,
    pub slug: String,
    pub description: String,
    pub icon_path: String,
    pub yields_nothing: bool,
    pub restrict_to_ingredients: bool,
    pub minimum_ingredient_count: u32,
    pub maximum_ingredient_count: Option<u32>,
    pub minimum_instrument_count: u32,
    pub maximum_instrument_count: Option<u32>,
    pub minimum_vessel_count: u32,
    pub maximum_vessel_count: Option<u32>,
    pub temperature_required: bool,
    pub time_estimate_required: bool,
    pub consumes_vessel: bool,
    pub only_for_vessels: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPreparationCreationRequestInput {
    pub name: String,
    pub past_tense: String,
    pub slug: String,
    pub description: String,
    pub icon_path: String,
    pub yields_nothing: bool,
    pub restrict_to_ingredients: bool,
    pub minimum_ingredient_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_ingredient_count: Option<u32>,
    pub minimum_instrument_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_instrument_count: Option<u32>,
    pub minimum_vessel_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_vessel_count: Option<u32>,
    pub temperature_required: bool,
    pub time_estimate_required: bool,
    pub consumes_vessel: bool,
    pub only_for_vessels: bool,
}

fn count_range(field: &str, min: u32, max: Option<u32>) -> Result<()> {
    if let Some(max) = max {
        ensure!(max >= min, "maximum{field}Count must not be below the minimum");
    }
    Ok(())
}

impl Validate for ValidPreparationCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("pastTense", &self.past_tense)?;
        count_range("Ingredient", self.minimum_ingredient_count, self.maximum_ingredient_count)?;
        count_range("Instrument", self.minimum_instrument_count, self.maximum_instrument_count)?;
        count_range("Vessel", self.minimum_vessel_count, self.maximum_vessel_count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPreparationUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_tense: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yields_nothing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate_required: Option<bool>,
}

impl Validate for ValidPreparationUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require("name", name)?;
        }
        Ok(())
    }
}

/// Something food is cooked or served in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidVessel {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub slug: String,
    pub description: String,
    pub icon_path: String,
    pub shape: String,
    pub capacity: f32,
    pub width_in_millimeters: Option<f32>,
    pub length_in_millimeters: Option<f32>,
    pub height_in_millimeters: Option<f32>,
    pub usable_for_storage: bool,
    pub display_in_summary_lists: bool,
    pub include_in_generated_instructions: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidVesselCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub slug: String,
    pub description: String,
    pub icon_path: String,
    pub shape: String,
    pub capacity: f32,
    #[serde(rename = "capacityUnitID", skip_serializing_if = "Option::is_none")]
    pub capacity_unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_in_millimeters: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_in_millimeters: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_in_millimeters: Option<f32>,
    pub usable_for_storage: bool,
    pub display_in_summary_lists: bool,
    pub include_in_generated_instructions: bool,
}

impl Validate for ValidVesselCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        ensure!(self.capacity >= 0.0, "capacity must not be negative");
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidVesselUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usable_for_storage: Option<bool>,
}

impl Validate for ValidVesselUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require("name", name)?;
        }
        if let Some(capacity) = self.capacity {
            ensure!(capacity >= 0.0, "capacity must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_temperatures_must_be_ordered() {
        let input = ValidIngredientCreationRequestInput {
            name: "butter".to_string(),
            minimum_ideal_storage_temperature_in_celsius: Some(4.0),
            maximum_ideal_storage_temperature_in_celsius: Some(1.0),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn empty_group_update_is_rejected() {
        assert!(ValidIngredientGroupUpdateRequestInput::default().validate().is_err());
    }

    #[test]
    fn preparation_count_bounds_are_checked() {
        let input = ValidPreparationCreationRequestInput {
            name: "dice".to_string(),
            past_tense: "diced".to_string(),
            minimum_ingredient_count: 2,
            maximum_ingredient_count: Some(1),
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "maximumIngredientCount must not be below the minimum");
    }

    #[test]
    fn ingredients_decode_with_missing_fields() {
        let ingredient: ValidIngredient =
            serde_json::from_str(r#"{"id":"vi_1","name":"onion","isLiquid":false,"newField":1}"#).unwrap();
        assert_eq!(ingredient.name, "onion");
        assert_eq!(ingredient.archived_at, None);
    }
}
