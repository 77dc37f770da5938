//! Sign-in, registration, SAML and admin bootstrap.
//!
//! [`WalkyApi::sign_in`] and [`WalkyApi::sign_out`] also update the shared
//! [`AuthContext`](walky_core::AuthContext), so later secure calls pick up or
//! drop the token.

use serde::{Deserialize, Serialize};
use walky_core::{ContentType, ResponseFormat, Route, SecurityData};

use crate::api_client::Call;
use crate::models::{MessageEnvelope, User};
use crate::{HttpClient, Result, WalkyApi};

/// `POST /auth/login`
pub const LOGIN: Route = Route::post("authLogin", "/auth/login").public();
/// `POST /auth/register`
pub const REGISTER: Route = Route::post("authRegister", "/auth/register").public();
/// `POST /auth/logout`
pub const LOGOUT: Route = Route::post("authLogout", "/auth/logout").secure();
/// `POST /auth/refresh`
pub const REFRESH: Route = Route::post("authRefresh", "/auth/refresh")
    .public()
    .content(ContentType::UrlEncoded);
/// `POST /auth/saml/mobile`
pub const SAML_MOBILE: Route = Route::post("authSamlMobile", "/auth/saml/mobile").public();
/// `GET /auth/saml/metadata`
pub const SAML_METADATA: Route = Route::get("authSamlMetadata", "/auth/saml/metadata")
    .public()
    .format(ResponseFormat::Text);
/// `POST /auth/password/forgot`
pub const FORGOT_PASSWORD: Route =
    Route::post("authForgotPassword", "/auth/password/forgot").public();
/// Creates the first super admin; only answers while no admin exists.
pub const BOOTSTRAP_ADMIN: Route = Route::post("adminBootstrap", "/admin/bootstrap").public();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[
    LOGIN,
    REGISTER,
    LOGOUT,
    REFRESH,
    SAML_MOBILE,
    SAML_METADATA,
    FORGOT_PASSWORD,
    BOOTSTRAP_ADMIN,
];

/// Email and password login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Plain-text password, sent over TLS only.
    pub password: String,
}

impl Credentials {
    /// Credentials for `email`.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// New account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plain-text password, sent over TLS only.
    pub password: String,
    /// Campus id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
}

/// Url-encoded refresh form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshForm {
    /// Token exchanged for a new session.
    pub refresh_token: String,
}

/// Assertion handed over by the mobile app after campus SSO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlMobileLogin {
    /// Base64 SAML response.
    pub saml_response: String,
    /// Relay state echoed by the identity provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay_state: Option<String>,
}

/// Password reset request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPassword {
    /// Email address.
    pub email: String,
}

/// First super admin of a fresh deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapAdmin {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plain-text password, sent over TLS only.
    pub password: String,
    /// Deployment secret that unlocks bootstrapping.
    pub bootstrap_secret: String,
}

/// Token pair plus the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token for later calls.
    pub token: String,
    /// Token exchanged for a new session.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Signed-in account.
    pub user: User,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `POST /auth/login`
    pub async fn auth_login(&self, credentials: &Credentials) -> Result<AuthSession> {
        self.execute(Call::new(LOGIN).json(credentials)?).await
    }

    /// `POST /auth/register`
    pub async fn auth_register(&self, registration: &Registration) -> Result<AuthSession> {
        self.execute(Call::new(REGISTER).json(registration)?).await
    }

    /// `POST /auth/logout`
    pub async fn auth_logout(&self) -> Result<MessageEnvelope> {
        self.execute(Call::new(LOGOUT)).await
    }

    /// `POST /auth/refresh` (url-encoded)
    pub async fn auth_refresh(&self, form: &RefreshForm) -> Result<AuthSession> {
        self.execute(Call::new(REFRESH).json(form)?).await
    }

    /// `POST /auth/saml/mobile`
    pub async fn auth_saml_mobile(&self, login: &SamlMobileLogin) -> Result<AuthSession> {
        self.execute(Call::new(SAML_MOBILE).json(login)?).await
    }

    /// `GET /auth/saml/metadata` (XML as text)
    pub async fn auth_saml_metadata(&self) -> Result<String> {
        self.execute(Call::new(SAML_METADATA)).await
    }

    /// `POST /auth/password/forgot`
    pub async fn auth_forgot_password(&self, body: &ForgotPassword) -> Result<MessageEnvelope> {
        self.execute(Call::new(FORGOT_PASSWORD).json(body)?).await
    }

    /// `POST /admin/bootstrap`
    pub async fn admin_bootstrap(&self, body: &BootstrapAdmin) -> Result<MessageEnvelope<User>> {
        self.execute(Call::new(BOOTSTRAP_ADMIN).json(body)?).await
    }

    /// Log in and store the token for later secure calls.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession> {
        let session = self.auth_login(credentials).await?;
        self.auth().set(SecurityData::new(session.token.clone()));
        tracing::info!(user = %session.user.id, "signed in");
        Ok(session)
    }

    /// Log out and forget the token, even when the backend call fails.
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.auth_logout().await;
        self.auth().clear();
        result.map(|_| ())
    }
}
