use std::collections::HashMap;

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, email_address, require, User, Validate};

/// A user's membership in a household.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseholdUserMembership {
    pub id: String,
    pub belongs_to_user: Option<User>,
    pub belongs_to_household: String,
    pub household_role: String,
    pub default_household: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Household {
    pub id: String,
    pub name: String,
    pub contact_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub belongs_to_user: String,
    #[serde(deserialize_with = "null_as_default")]
    pub members: Vec<HouseholdUserMembership>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdCreationRequestInput {
    pub name: String,
    pub contact_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Validate for HouseholdCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        coordinates(self.latitude, self.longitude)
    }
}

fn coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<()> {
    if let Some(lat) = latitude {
        ensure!((-90.0..=90.0).contains(&lat), "latitude out of range");
    }
    if let Some(lon) = longitude {
        ensure!((-180.0..=180.0).contains(&lon), "longitude out of range");
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Validate for HouseholdUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require("name", name)?;
        }
        coordinates(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdOwnershipTransferInput {
    pub reason: String,
    pub current_owner: String,
    pub new_owner: String,
}

impl Validate for HouseholdOwnershipTransferInput {
    fn validate(&self) -> Result<()> {
        require("reason", &self.reason)?;
        require("currentOwner", &self.current_owner)?;
        require("newOwner", &self.new_owner)?;
        ensure!(
            self.current_owner != self.new_owner,
            "newOwner must differ from currentOwner"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyUserPermissionsInput {
    pub reason: String,
    pub new_role: String,
}

impl Validate for ModifyUserPermissionsInput {
    fn validate(&self) -> Result<()> {
        require("reason", &self.reason)?;
        require("newRole", &self.new_role)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPermissionsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub permissions: HashMap<String, bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseholdInvitationStatus {
    #[default]
    Pending,
    Cancelled,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseholdInvitation {
    pub id: String,
    pub from_user: User,
    pub to_user: Option<String>,
    pub to_email: String,
    pub to_name: String,
    pub note: String,
    pub status_note: String,
    pub token: String,
    pub status: HouseholdInvitationStatus,
    pub destination_household: Household,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInvitationCreationRequestInput {
    pub to_email: String,
    pub to_name: String,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Validate for HouseholdInvitationCreationRequestInput {
    fn validate(&self) -> Result<()> {
        email_address("toEmail", &self.to_email)
    }
}

/// Body for accepting, cancelling, or rejecting an invitation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdInvitationUpdateRequestInput {
    pub token: String,
    pub note: String,
}

impl Validate for HouseholdInvitationUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        require("token", &self.token)
    }
}
