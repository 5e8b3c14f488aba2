use reqwest::{Client as HttpClient, StatusCode};

use super::{AuthUser, SessionVerifier};
use crate::error::{AppError, AppResult};

/// Session lookup through the platform's `/auth/v1/user` endpoint
#[derive(Clone)]
pub struct SupabaseAuth {
    http_client: HttpClient,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }
}

#[async_trait::async_trait]
impl SessionVerifier for SupabaseAuth {
    async fn lookup(&self, token: &str) -> AppResult<Option<AuthUser>> {
        let response = self
            .http_client
            .get(self.user_url())
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: AuthUser = response.json().await?;
                Ok(Some(user))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AppError::ExternalApi(format!(
                    "Auth service returned status {}: {}",
                    status, body
                )))
            }
        }
    }
}
