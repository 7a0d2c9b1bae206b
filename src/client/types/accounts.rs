//! Users, authentication inputs, and account administration.

use std::collections::HashMap;

use anyhow::{ensure, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, email_address, require, require_len, totp_token, Household, Validate};

pub const MIN_USERNAME_LENGTH: usize = 4;
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub email_address_verified_at: Option<DateTime<Utc>>,
    #[serde(rename = "avatar")]
    pub avatar_src: Option<String>,
    pub birthday: Option<DateTime<Utc>>,
    pub account_status: String,
    pub account_status_explanation: String,
    #[serde(rename = "serviceRoles")]
    pub service_role: String,
    pub requires_password_change: bool,
    pub password_last_changed_at: Option<DateTime<Utc>>,
    pub two_factor_secret_verified_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastAcceptedTOS")]
    pub last_accepted_terms_of_service: Option<DateTime<Utc>>,
    pub last_accepted_privacy_policy: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_banned(&self) -> bool {
        self.account_status == "banned"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistrationInput {
    pub username: String,
    pub password: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub household_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub invitation_token: String,
    #[serde(rename = "invitationID", skip_serializing_if = "String::is_empty")]
    pub invitation_id: String,
    #[serde(rename = "acceptedTOS")]
    pub accepted_tos: bool,
    pub accepted_privacy_policy: bool,
}

impl Validate for UserRegistrationInput {
    fn validate(&self) -> Result<()> {
        email_address("emailAddress", &self.email_address)?;
        require_len("username", &self.username, MIN_USERNAME_LENGTH)?;
        require_len("password", &self.password, MIN_PASSWORD_LENGTH)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserCreationResponse {
    #[serde(rename = "createdUserID")]
    pub created_user_id: String,
    pub username: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub account_status: String,
    pub is_admin: bool,
    #[serde(rename = "qrCode")]
    pub two_factor_qr_code: String,
    pub two_factor_secret: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginInput {
    pub username: String,
    pub password: String,
    pub totp_token: String,
}

impl Validate for UserLoginInput {
    fn validate(&self) -> Result<()> {
        require_len("username", &self.username, MIN_USERNAME_LENGTH)?;
        require_len("password", &self.password, MIN_PASSWORD_LENGTH)?;
        totp_token(&self.totp_token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtResponse {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "householdID")]
    pub household_id: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStatusResponse {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub account_status: String,
    pub account_status_explanation: String,
    pub active_household: String,
    pub user_is_authenticated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetTokenCreationRequestInput {
    pub email_address: String,
}

impl Validate for PasswordResetTokenCreationRequestInput {
    fn validate(&self) -> Result<()> {
        email_address("emailAddress", &self.email_address)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PasswordResetToken {
    pub id: String,
    pub belongs_to_user: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetTokenRedemptionRequestInput {
    pub token: String,
    pub new_password: String,
}

impl Validate for PasswordResetTokenRedemptionRequestInput {
    fn validate(&self) -> Result<()> {
        require("token", &self.token)?;
        require_len("newPassword", &self.new_password, MIN_PASSWORD_LENGTH)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameReminderRequestInput {
    pub email_address: String,
}

impl Validate for UsernameReminderRequestInput {
    fn validate(&self) -> Result<()> {
        email_address("emailAddress", &self.email_address)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressVerificationRequestInput {
    #[serde(rename = "emailVerificationToken")]
    pub token: String,
}

impl Validate for EmailAddressVerificationRequestInput {
    fn validate(&self) -> Result<()> {
        require("emailVerificationToken", &self.token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpSecretVerificationInput {
    pub totp_token: String,
    #[serde(rename = "userID")]
    pub user_id: String,
}

impl Validate for TotpSecretVerificationInput {
    fn validate(&self) -> Result<()> {
        require("userID", &self.user_id)?;
        require("totpToken", &self.totp_token)?;
        totp_token(&self.totp_token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpSecretRefreshInput {
    pub current_password: String,
    pub totp_token: String,
}

impl Validate for TotpSecretRefreshInput {
    fn validate(&self) -> Result<()> {
        require("currentPassword", &self.current_password)?;
        totp_token(&self.totp_token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TotpSecretRefreshResponse {
    #[serde(rename = "qrCode")]
    pub two_factor_qr_code: String,
    pub two_factor_secret: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdateInput {
    pub new_password: String,
    pub current_password: String,
    pub totp_token: String,
}

impl Validate for PasswordUpdateInput {
    fn validate(&self) -> Result<()> {
        require("currentPassword", &self.current_password)?;
        require_len("newPassword", &self.new_password, MIN_PASSWORD_LENGTH)?;
        ensure!(
            self.new_password != self.current_password,
            "newPassword must differ from currentPassword"
        );
        totp_token(&self.totp_token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordResetResponse {
    pub successful: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermissionsRequestInput {
    pub permissions: Vec<String>,
}

impl Validate for UserPermissionsRequestInput {
    fn validate(&self) -> Result<()> {
        ensure!(!self.permissions.is_empty(), "at least one permission is required");
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameUpdateInput {
    pub new_username: String,
    pub current_password: String,
    pub totp_token: String,
}

impl Validate for UsernameUpdateInput {
    fn validate(&self) -> Result<()> {
        require_len("newUsername", &self.new_username, MIN_USERNAME_LENGTH)?;
        require("currentPassword", &self.current_password)?;
        totp_token(&self.totp_token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEmailAddressUpdateInput {
    pub new_email_address: String,
    pub current_password: String,
    pub totp_token: String,
}

impl Validate for UserEmailAddressUpdateInput {
    fn validate(&self) -> Result<()> {
        email_address("newEmailAddress", &self.new_email_address)?;
        require("currentPassword", &self.current_password)?;
        totp_token(&self.totp_token)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsUpdateRequestInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
    pub current_password: String,
    pub totp_token: String,
}

impl Validate for UserDetailsUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        require("currentPassword", &self.current_password)?;
        totp_token(&self.totp_token)
    }
}

/// Admin-only change of another user's account status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountStatusUpdateInput {
    pub new_status: String,
    pub reason: String,
    #[serde(rename = "targetUserID")]
    pub target_user_id: String,
}

impl Validate for UserAccountStatusUpdateInput {
    fn validate(&self) -> Result<()> {
        require("newStatus", &self.new_status)?;
        require("reason", &self.reason)?;
        require("targetUserID", &self.target_user_id)
    }
}

// Data privacy

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDataCollectionResponse {
    #[serde(rename = "reportID")]
    pub report_id: String,
}

/// Everything the service holds about a user. Sections without a dedicated
/// type are kept as raw JSON under `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDataCollection {
    #[serde(rename = "reportID")]
    pub report_id: String,
    pub user: User,
    #[serde(deserialize_with = "null_as_default")]
    pub households: Vec<Household>,
    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataDeletionResponse {
    pub successful: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn login_input_rules() {
        let mut input = UserLoginInput {
            username: "cook".to_string(),
            password: "hunter2hunter2".to_string(),
            totp_token: String::new(),
        };
        assert!(input.validate().is_ok());

        input.totp_token = "12ab56".to_string();
        assert!(input.validate().is_err());

        input.totp_token = "123456".to_string();
        input.password = "short".to_string();
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "password must be at least 8 characters");
    }

    #[test]
    fn registration_requires_an_email() {
        let input = UserRegistrationInput {
            username: "cook".to_string(),
            password: "hunter2hunter2".to_string(),
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err().to_string(), "emailAddress is required");
    }

    #[test]
    fn unknown_report_sections_are_kept() {
        let report: UserDataCollection = serde_json::from_str(
            r#"{"reportID":"r_1","user":{"id":"u_1"},"households":[],"webhooks":{"h_1":[]}}"#,
        )
        .unwrap();
        assert_eq!(report.user.id, "u_1");
        assert_eq!(report.other.get("webhooks"), Some(&serde_json::json!({"h_1": []})));
    }
}
