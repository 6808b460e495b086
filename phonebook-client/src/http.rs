//! HTTP client for the phonebook-server API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{AdminInfo, DirectoryParams, LoginRequest, LoginResponse, MutationResponse};
use shared::directory::ViewModel;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::EmployeeDraft;
use shared::session::{AuthError, IdentityProvider};
use shared::store::{EmployeeStore, RecordSet, StoreResult};
use tokio::sync::RwLock;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making network requests to phonebook-server
///
/// Clones share the bearer token, so a login through one clone
/// authenticates all of them.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    /// Get the current token
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Replace the authentication token
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&DirectoryParams>,
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }

        tracing::debug!(method = %method, path = %path, "Sending request");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Success bodies are the plain payload; failures carry the error envelope.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = decode_error(status, &bytes);
            tracing::debug!(status = %status.as_u16(), code = %err.code, "Request failed");
            return Err(ClientError::Api(err));
        }

        decode_body(&bytes)
    }

    // ========== Auth API ==========

    /// Login with email and password; the returned token is kept for later calls
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .request(Method::POST, "/api/auth/login", None, Some(&request))
            .await?;
        self.set_token(Some(response.token.clone())).await;
        Ok(response)
    }

    /// Get current admin information
    pub async fn me(&self) -> ClientResult<AdminInfo> {
        self.request::<_, ()>(Method::GET, "/api/auth/me", None, None)
            .await
    }

    /// Logout; the local token is dropped even if the server call fails
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self
            .request::<ApiResponse<()>, ()>(Method::POST, "/api/auth/logout", None, None)
            .await;
        self.set_token(None).await;
        result.map(|_| ())
    }

    // ========== Directory API ==========

    /// Full record set with its revision
    pub async fn employees(&self) -> ClientResult<RecordSet> {
        self.request::<_, ()>(Method::GET, "/api/employees", None, None)
            .await
    }

    /// Server-composed directory page
    pub async fn directory(&self, params: &DirectoryParams) -> ClientResult<ViewModel> {
        self.request::<_, ()>(Method::GET, "/api/directory", Some(params), None)
            .await
    }

    // ========== Admin API ==========

    /// Server-composed admin table page
    pub async fn admin_employees(&self, params: &DirectoryParams) -> ClientResult<ViewModel> {
        self.request::<_, ()>(Method::GET, "/api/admin/employees", Some(params), None)
            .await
    }

    pub async fn create_employee(&self, draft: &EmployeeDraft) -> ClientResult<MutationResponse> {
        self.request(Method::POST, "/api/admin/employees", None, Some(draft))
            .await
    }

    pub async fn update_employee(
        &self,
        id: &str,
        draft: &EmployeeDraft,
    ) -> ClientResult<MutationResponse> {
        self.request(
            Method::PUT,
            &format!("/api/admin/employees/{id}"),
            None,
            Some(draft),
        )
        .await
    }

    pub async fn delete_employee(&self, id: &str) -> ClientResult<MutationResponse> {
        self.request::<_, ()>(
            Method::DELETE,
            &format!("/api/admin/employees/{id}"),
            None,
            None,
        )
        .await
    }
}

/// Parse a successful response body
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, len = body.len(), "Unexpected response body");
        ClientError::InvalidResponse(e.to_string())
    })
}

/// Rebuild the server error from a failed response body
///
/// Bodies that are not an error envelope (proxies, timeouts) are classified
/// by status code alone.
pub fn decode_error(status: StatusCode, body: &[u8]) -> AppError {
    if let Ok(envelope) = serde_json::from_slice::<ApiResponse<serde_json::Value>>(body)
        && let Some(err) = envelope.to_error()
    {
        return err;
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    let message = if text.is_empty() {
        status.to_string()
    } else {
        text
    };
    let code = match status {
        StatusCode::UNAUTHORIZED => ErrorCode::NotAuthenticated,
        StatusCode::FORBIDDEN => ErrorCode::PermissionDenied,
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::InvalidRequest,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ErrorCode::TimeoutError,
        _ => ErrorCode::StoreUnavailable,
    };
    AppError::with_message(code, message)
}

#[async_trait]
impl EmployeeStore for HttpClient {
    async fn list(&self) -> StoreResult<RecordSet> {
        Ok(self.employees().await?)
    }

    async fn create(&self, draft: EmployeeDraft) -> StoreResult<String> {
        Ok(self.create_employee(&draft).await?.id)
    }

    async fn update(&self, id: &str, draft: EmployeeDraft) -> StoreResult<()> {
        self.update_employee(id, &draft).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.delete_employee(id).await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for HttpClient {
    async fn login(&self, email: &str, password: &str) -> Result<AdminInfo, AuthError> {
        Ok(HttpClient::login(self, email, password).await?.user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        Ok(HttpClient::logout(self).await?)
    }
}
