//! OAuth2 clients, webhooks, notifications and service settings.

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{null_as_default, require, Validate};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OAuth2Client {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
    /// Only populated when the client is first created
    pub client_secret: String,
    pub created_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2ClientCreationRequestInput {
    pub name: String,
    pub description: String,
}

impl Validate for OAuth2ClientCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OAuth2ClientCreationResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookTriggerEvent {
    pub id: String,
    pub trigger_event: String,
    pub belongs_to_webhook: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
    pub name: String,
    pub url: String,
    pub method: String,
    pub content_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<WebhookTriggerEvent>,
    pub belongs_to_household: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

const WEBHOOK_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];
const WEBHOOK_CONTENT_TYPES: [&str; 2] = ["application/json", "application/xml"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreationRequestInput {
    pub name: String,
    pub url: String,
    pub method: String,
    pub content_type: String,
    pub events: Vec<String>,
}

impl Validate for WebhookCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        let url = Url::parse(&self.url).map_err(|e| anyhow::anyhow!("url is invalid: {e}"))?;
        ensure!(
            matches!(url.scheme(), "http" | "https"),
            "url must use http or https"
        );
        ensure!(
            WEBHOOK_METHODS.contains(&self.method.as_str()),
            "method must be one of {}",
            WEBHOOK_METHODS.join(", ")
        );
        ensure!(
            WEBHOOK_CONTENT_TYPES.contains(&self.content_type.as_str()),
            "contentType must be one of {}",
            WEBHOOK_CONTENT_TYPES.join(", ")
        );
        ensure!(!self.events.is_empty(), "at least one trigger event is required");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserNotificationStatus {
    #[default]
    Unread,
    Read,
    Dismissed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserNotification {
    pub id: String,
    pub content: String,
    pub status: UserNotificationStatus,
    pub belongs_to_user: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotificationCreationRequestInput {
    pub content: String,
    pub status: UserNotificationStatus,
    pub belongs_to_user: String,
}

impl Validate for UserNotificationCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("content", &self.content)?;
        require("belongsToUser", &self.belongs_to_user)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNotificationUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserNotificationStatus>,
}

impl Validate for UserNotificationUpdateRequestInput {
    fn validate(&self) -> Result<()> {
        ensure!(self.status.is_some(), "status is required");
        Ok(())
    }
}

/// A configurable service setting and the values it may take.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceSetting {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub default_value: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub enumeration: Vec<String>,
    pub admins_only: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSettingCreationRequestInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub enumeration: Vec<String>,
    pub admins_only: bool,
}

impl Validate for ServiceSettingCreationRequestInput {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("type", &self.kind)?;
        if let Some(default) = &self.default_value {
            ensure!(
                self.enumeration.is_empty() || self.enumeration.contains(default),
                "defaultValue must be one of the enumerated values"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn webhook() -> WebhookCreationRequestInput {
        WebhookCreationRequestInput {
            name: "notify".to_string(),
            url: "https://hooks.example.com/ddb".to_string(),
            method: "POST".to_string(),
            content_type: "application/json".to_string(),
            events: vec!["webhook_created".to_string()],
        }
    }

    #[test]
    fn webhook_rules() {
        assert!(webhook().validate().is_ok());

        let mut bad = webhook();
        bad.url = "ftp://hooks.example.com".to_string();
        assert!(bad.validate().is_err());

        let mut bad = webhook();
        bad.method = "TRACE".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn setting_default_must_be_enumerated() {
        let input = ServiceSettingCreationRequestInput {
            name: "theme".to_string(),
            kind: "user".to_string(),
            default_value: Some("neon".to_string()),
            enumeration: vec!["light".to_string(), "dark".to_string()],
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn setting_kind_uses_the_type_key() {
        let setting: ServiceSetting = serde_json::from_str(r#"{"id":"s_1","type":"household"}"#).unwrap();
        assert_eq!(setting.kind, "household");
    }
}
