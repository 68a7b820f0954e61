//! Session lifecycle: resolve from the stored token, log in, refresh and
//! log out.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use retailops_auth::{Access, Page, Route, Session, SessionState, User, page_permissions};
use retailops_core::validate::require_non_empty;
use retailops_core::{DomainResult, Validate};

use crate::api::NO_QUERY;
use crate::client::RetailClient;
use crate::error::{ClientError, ClientResult};
use crate::notify::Notification;
use crate::query::{KeyPrefix, Operation, QueryKey, Resource};
use crate::storage::keys;

pub const PROFILE_PATH: &str = "/auth/profile";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Validate for Credentials {
    fn validate(&self) -> DomainResult<()> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

pub struct AuthService<'a> {
    client: &'a RetailClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(client: &'a RetailClient) -> Self {
        Self { client }
    }

    fn profile_key() -> QueryKey {
        QueryKey::from_value(Resource::Profile, Operation::Detail, &serde_json::Value::Null)
    }

    /// Resolve the session from the stored token.
    ///
    /// Never fails: any problem yields an anonymous session.
    pub async fn load_session(&self) -> SessionState {
        let token = match self.client.storage().get(keys::TOKEN).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "could not read auth token");
                None
            }
        };

        let session = match token {
            None => {
                self.client.navigator().navigate(Route::Login);
                Session::anonymous()
            }
            Some(_) => {
                let api = self.client.api();
                let profile = self
                    .client
                    .cache()
                    .fetch(&Self::profile_key(), self.client.config().stale_time, || {
                        api.get_data::<User>(PROFILE_PATH, NO_QUERY)
                    })
                    .await;
                match profile {
                    Ok(user) => Session::authenticated(user),
                    Err(err) => {
                        tracing::warn!(error = %err, "profile fetch failed, continuing anonymously");
                        Session::anonymous()
                    }
                }
            }
        };

        let state = SessionState::Resolved(session);
        self.client.set_session(state.clone());
        state
    }

    pub fn session(&self) -> SessionState {
        self.client.session()
    }

    pub async fn login(&self, credentials: &Credentials) -> ClientResult<Session> {
        let result = async {
            credentials.validate()?;
            let resp: LoginResponse = self
                .client
                .api()
                .send_json(Method::POST, LOGIN_PATH, credentials)
                .await?;
            self.store_tokens(&resp).await
        }
        .await;

        if let Err(err) = result {
            tracing::warn!(username = %credentials.username, error = %err, "login failed");
            self.client.notifier().notify(Notification::error(err.user_message()));
            return Err(err);
        }

        self.client
            .cache()
            .invalidate(&KeyPrefix::detail(Resource::Profile))
            .await;
        let state = self.load_session().await;
        let session = state.session().cloned().unwrap_or_else(Session::anonymous);
        tracing::info!(
            username = %credentials.username,
            authenticated = session.is_authenticated,
            "logged in"
        );
        Ok(session)
    }

    /// Exchange the stored refresh token for a new token pair.
    pub async fn refresh(&self) -> ClientResult<()> {
        let storage = self.client.storage();
        let Some(refresh_token) = storage.get(keys::REFRESH_TOKEN).await? else {
            return Err(ClientError::Unauthorized {
                message: Some("no refresh token stored".to_string()),
            });
        };
        let resp: LoginResponse = self
            .client
            .api()
            .send_json(
                Method::POST,
                REFRESH_PATH,
                &RefreshRequest {
                    refresh_token: &refresh_token,
                },
            )
            .await?;
        self.store_tokens(&resp).await?;
        tracing::info!("session tokens refreshed");
        Ok(())
    }

    async fn store_tokens(&self, resp: &LoginResponse) -> ClientResult<()> {
        let storage = self.client.storage();
        storage.set(keys::TOKEN, &resp.token).await?;
        match &resp.refresh_token {
            Some(refresh) => storage.set(keys::REFRESH_TOKEN, refresh).await,
            None => storage.remove(keys::REFRESH_TOKEN).await,
        }
    }

    /// Forget the session. Every step runs even when an earlier one fails.
    pub async fn logout(&self) {
        let storage = self.client.storage();
        for key in [keys::TOKEN, keys::REFRESH_TOKEN, keys::SELECTED_BRANCH] {
            if let Err(err) = storage.remove(key).await {
                tracing::error!(key, error = %err, "failed to remove stored value on logout");
            }
        }
        self.client.cache().clear().await;
        self.client.branch().reset();
        self.client.set_session(SessionState::Resolved(Session::anonymous()));
        self.client.navigator().navigate(Route::Login);
        tracing::info!("logged out");
    }

    /// Whether a token is stored. Sends the user to login when not.
    pub async fn require_token(&self) -> bool {
        let present = matches!(self.client.storage().get(keys::TOKEN).await, Ok(Some(_)));
        if !present {
            self.client.navigator().navigate(Route::Login);
        }
        present
    }

    /// Gate a dashboard page against the current session.
    pub fn check_page(&self, page: Page, redirect_if_denied: bool) -> Access {
        self.client.gate().check_access(
            &self.client.session(),
            page_permissions(page),
            redirect_if_denied,
            self.client.navigator(),
        )
    }
}
