//! Account endpoints: login, logout, current user, profile update.
//!
//! These are the only calls that write to the session store directly.

use serde_json::Value;
use tracing::{error, info, warn};

use super::{ApiClient, ApiError, Envelope, RequestOptions};
use crate::models::{LoginRequest, LoginResponse, UpdateProfile, UserInfo};

const LOGIN_PATH: &str = "/api/auth/login";
const CURRENT_USER_PATH: &str = "/api/auth/current-user";
const LOGOUT_PATH: &str = "/api/auth/logout";
const UPDATE_INFO_PATH: &str = "/api/auth/update/info";

impl ApiClient {
    /// Log in. A success envelope stores the returned token and caches the user.
    pub async fn login(&self, dto: &LoginRequest) -> Result<Envelope<LoginResponse>, ApiError> {
        let envelope: Envelope<LoginResponse> = self.post(LOGIN_PATH, dto).await?;

        if envelope.is_success() {
            match &envelope.data {
                Some(login) => {
                    self.session.set_token(&login.token)?;
                    if let Err(e) = self.session.set_current_user(&login.user_info) {
                        // Token and cached user must agree; drop both
                        if let Err(clear_err) = self.session.clear() {
                            error!(error = %clear_err, "Failed to roll back session after login");
                        }
                        return Err(e.into());
                    }
                    info!(username = %login.user_info.username, "Login successful");
                }
                None => warn!("Login succeeded without a token payload"),
            }
        }

        Ok(envelope)
    }

    /// Fetch the logged-in user and refresh the cached record
    pub async fn current_user(&self) -> Result<Envelope<UserInfo>, ApiError> {
        let envelope: Envelope<UserInfo> = self.get(CURRENT_USER_PATH).await?;
        self.cache_user(&envelope)?;
        Ok(envelope)
    }

    /// Log out on the server, then clear the local session whatever happened.
    pub async fn logout(&self) -> Result<Envelope<Value>, ApiError> {
        let result = self.send(LOGOUT_PATH, RequestOptions::post()).await;
        self.session.clear()?;
        info!("Logged out");
        result
    }

    pub async fn update_profile(
        &self,
        update: &UpdateProfile,
    ) -> Result<Envelope<UserInfo>, ApiError> {
        let envelope: Envelope<UserInfo> = self.put(UPDATE_INFO_PATH, update).await?;
        self.cache_user(&envelope)?;
        Ok(envelope)
    }

    fn cache_user(&self, envelope: &Envelope<UserInfo>) -> Result<(), ApiError> {
        if let (true, Some(user)) = (envelope.is_success(), &envelope.data) {
            self.session.set_current_user(user)?;
        }
        Ok(())
    }
}
