//! Wire records and request inputs.
//!
//! Records decode leniently: unknown fields are ignored and most fields fall
//! back to their defaults when absent, so newer servers stay readable. Request
//! inputs implement [`Validate`], which every operation runs before anything
//! is sent.
//!
//! ## Key Types
//!
//! - [`Meal`], [`Recipe`] and [`MealPlan`] - the planning core
//! - [`Household`] and [`HouseholdInvitation`] - sharing between users
//! - [`ValidIngredient`], [`ValidPreparation`], [`ValidVessel`] - the curated catalogue
//! - [`User`] and the authentication inputs

use anyhow::{ensure, Result};

mod accounts;
mod catalog;
mod households;
mod integrations;
mod meal_plans;
mod meals;
mod recipes;

pub use accounts::*;
pub use catalog::*;
pub use households::*;
pub use integrations::*;
pub use meal_plans::*;
pub use meals::*;
pub use recipes::*;

/// Self-validation for request inputs.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for () {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    ensure!(!value.trim().is_empty(), "{field} is required");
    Ok(())
}

pub(crate) fn require_len(field: &str, value: &str, min: usize) -> Result<()> {
    require(field, value)?;
    ensure!(
        value.chars().count() >= min,
        "{field} must be at least {min} characters"
    );
    Ok(())
}

/// Six ASCII digits, when present.
pub(crate) fn totp_token(value: &str) -> Result<()> {
    ensure!(
        value.is_empty() || (value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit())),
        "totpToken must be six digits"
    );
    Ok(())
}

pub(crate) fn email_address(field: &str, value: &str) -> Result<()> {
    require(field, value)?;
    let well_formed = value
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.ends_with('.'))
        .unwrap_or(false);
    ensure!(well_formed, "{field} must be an email address");
    Ok(())
}

/// Reads an explicit `null` as the field's default, so collections the
/// server leaves unset decode as empty.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Ok(<Option<T> as serde::Deserialize>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_reject_blank_and_short_values() {
        assert!(require("name", "  ").is_err());
        assert!(require_len("username", "abc", 4).is_err());
        assert!(require_len("username", "abcd", 4).is_ok());
    }

    #[test]
    fn totp_tokens_must_be_six_digits_when_given() {
        assert!(totp_token("").is_ok());
        assert!(totp_token("123456").is_ok());
        assert!(totp_token("12345a").is_err());
        assert!(totp_token("1234567").is_err());
    }

    #[test]
    fn email_addresses_need_a_domain() {
        assert!(email_address("emailAddress", "cook@example.com").is_ok());
        assert!(email_address("emailAddress", "cook@localhost").is_err());
        assert!(email_address("emailAddress", "@example.com").is_err());
    }
}
