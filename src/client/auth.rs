//! Credentials and the authentication endpoints.
//!
//! The client itself is stateless: it never stores a token or a session.
//! Credentials are turned into a [`RequestModifier`] and passed per call
//! through [`RequestOptions`](crate::client::request::RequestOptions).
//!
//! The login, registration, and recovery endpoints live outside the
//! `/api/v1` prefix because they are reachable without credentials.

use std::fmt;

use base64::Engine;
use reqwest::header::{AUTHORIZATION, COOKIE};

use crate::client::client::Client;
use crate::client::error::ClientError;
use crate::client::operations::endpoints;
use crate::client::request::{parse_header, RequestModifier};
use crate::client::types::{
    EmailAddressVerificationRequestInput, JwtResponse, PasswordResetResponse, PasswordResetToken,
    PasswordResetTokenCreationRequestInput, PasswordResetTokenRedemptionRequestInput,
    PasswordUpdateInput, TotpSecretRefreshInput, TotpSecretRefreshResponse,
    TotpSecretVerificationInput, User, UserCreationResponse, UserLoginInput,
    UserPermissionsRequestInput, UserPermissionsResponse, UserRegistrationInput,
    UserStatusResponse, UsernameReminderRequestInput,
};

/// How a call proves who it is.
///
/// ## Token Format
///
/// JWTs from [`Client::login_for_jwt`] go out as `Authorization: Bearer <token>`.
/// Session cookies are sent verbatim in the `Cookie` header. OAuth2 client
/// credentials use HTTP Basic with `client_id:client_secret`.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Cookie(String),
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(token.into())
    }

    pub fn cookie(cookie: impl Into<String>) -> Self {
        Credentials::Cookie(cookie.into())
    }

    pub fn client_credentials(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Credentials::ClientCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// The header these credentials are sent in, and its value.
    fn header(&self) -> (&'static str, String) {
        match self {
            Credentials::Bearer(token) => (AUTHORIZATION.as_str(), format!("Bearer {token}")),
            Credentials::Cookie(cookie) => (COOKIE.as_str(), cookie.clone()),
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{client_id}:{client_secret}").as_bytes());
                (AUTHORIZATION.as_str(), format!("Basic {encoded}"))
            }
        }
    }

    /// Builds a modifier that attaches these credentials to a request.
    ///
    /// The header value is marked sensitive so it is redacted from
    /// reqwest's debug output.
    pub fn into_modifier(self) -> Result<RequestModifier, ClientError> {
        let (name, value) = self.header();
        let (name, mut value) = parse_header(name, &value)?;
        value.set_sensitive(true);
        Ok(RequestModifier::new(move |request| {
            request.headers_mut().insert(name.clone(), value.clone());
        }))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Bearer(_) => f.write_str("Bearer(..)"),
            Credentials::Cookie(_) => f.write_str("Cookie(..)"),
            Credentials::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

impl JwtResponse {
    /// Bearer credentials for the issued token.
    pub fn credentials(&self) -> Credentials {
        Credentials::bearer(self.token.clone())
    }
}

impl Client {
    endpoints! {
        /// Exchanges a username and password (and TOTP code, once enrolled)
        /// for a JWT.
        ///
        /// A user with two-factor enabled who leaves out the code gets a
        /// remote error for which [`ClientError::is_totp_required`] is true.
        write POST login_for_jwt[](UserLoginInput) -> JwtResponse = "/users/login/jwt";

        /// Like [`Client::login_for_jwt`], but refuses anyone who is not a
        /// service admin.
        write POST admin_login_for_jwt[](UserLoginInput) -> JwtResponse = "/users/login/jwt/admin";

        write POST create_user[](UserRegistrationInput) -> UserCreationResponse = "/users";

        write POST request_password_reset_token[](PasswordResetTokenCreationRequestInput) -> PasswordResetToken =
            "/users/password/reset";
        write POST redeem_password_reset_token[](PasswordResetTokenRedemptionRequestInput) -> User =
            "/users/password/reset/redeem";
        write POST request_username_reminder[](UsernameReminderRequestInput) -> User = "/users/username/reminder";
        write POST verify_email_address[](EmailAddressVerificationRequestInput) -> User =
            "/users/email_address/verify";

        /// Confirms a freshly generated TOTP secret, enabling two-factor login.
        write POST verify_totp_secret[](TotpSecretVerificationInput) -> User = "/users/totp_secret/verify";

        read GET get_auth_status[] -> UserStatusResponse = "/auth/status";
    }

    // These need an authenticated caller.
    endpoints! {
        write PUT update_password[](PasswordUpdateInput) -> PasswordResetResponse = "/api/v1/users/password/new";
        write POST refresh_totp_secret[](TotpSecretRefreshInput) -> TotpSecretRefreshResponse =
            "/api/v1/users/totp_secret/new";
        read POST request_email_verification_email[] -> User = "/api/v1/users/email_address_verification";
        write POST check_permissions[](UserPermissionsRequestInput) -> UserPermissionsResponse =
            "/api/v1/users/permissions/check";
    }
}
