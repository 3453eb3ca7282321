// HTTP client wrapper for the meal-planning backend
// JSON in, JSON out. Non-2xx replies are decoded like any other: the server
// reports failures in the payload (`success: false` / `error`), and callers
// read that. Only `fetch_checked` looks at the status code.

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

pub use reqwest::Method;

use crate::config::ClientConfig;
use crate::models::{
    ActionResponse, Credentials, MealPlanResponse, NewIngredient, PantryListing, ParseRequest,
    ParsedIngredient, Registration, StatsResponse, SuggestionFilters, SuggestionsResponse,
    UserResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// A response arrived but its body is not JSON at all
    #[error("invalid JSON response: {0}")]
    Parse(#[source] serde_json::Error),

    /// Valid JSON that doesn't have the shape the route promises
    #[error("unexpected response: {0}")]
    Schema(#[source] serde_json::Error),

    /// Non-2xx status on a fetch that checks it
    #[error("{context}")]
    Status { status: u16, context: String },

    /// Local input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    #[error("failed to create HTTP client: {0}")]
    Setup(#[source] reqwest::Error),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() {
            ClientError::Schema(e)
        } else {
            ClientError::Parse(e)
        }
    }
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

/// Shared client: one connection pool and one cookie jar, so the session
/// set by `/login` rides along on every later call.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::Setup)?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `body` (if any) as JSON and decode the reply, whatever its status.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (_, bytes) = self.send(method, path, body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET that fails with `context` as its message on a non-2xx status.
    pub async fn fetch_checked<T>(&self, path: &str, context: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let (status, bytes) = self.send::<()>(Method::GET, path, None).await?;

        if !status.is_success() {
            warn!(path, status = status.as_u16(), "{context}");
            return Err(ClientError::Status {
                status: status.as_u16(),
                context: context.to_string(),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(StatusCode, Vec<u8>), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.url(path);
        debug!(%method, %url, "Sending request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "Request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::Transport)?;
        debug!(%method, %url, status = status.as_u16(), len = bytes.len(), "Response received");

        Ok((status, bytes.to_vec()))
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    /// POST /login
    pub async fn login(&self, credentials: &Credentials) -> Result<ActionResponse, ClientError> {
        self.request(Method::POST, "/login", Some(credentials)).await
    }

    /// POST /register
    pub async fn register(
        &self,
        registration: &Registration,
    ) -> Result<ActionResponse, ClientError> {
        self.request(Method::POST, "/register", Some(registration))
            .await
    }

    /// GET /api/pantry/ingredients, checked
    pub async fn list_ingredients(&self) -> Result<PantryListing, ClientError> {
        let path = self.config.api_path("/pantry/ingredients");
        self.fetch_checked(&path, "Failed to fetch pantry items")
            .await
    }

    /// GET /api/pantry/ingredients, status ignored
    pub async fn list_ingredients_unchecked(&self) -> Result<PantryListing, ClientError> {
        let path = self.config.api_path("/pantry/ingredients");
        self.request::<_, ()>(Method::GET, &path, None).await
    }

    /// POST /api/pantry/ingredients
    pub async fn add_ingredient(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<ActionResponse, ClientError> {
        let path = self.config.api_path("/pantry/ingredients");
        self.request(Method::POST, &path, Some(ingredient)).await
    }

    /// DELETE /api/pantry/ingredients?id=<id>
    pub async fn delete_ingredient(&self, id: &str) -> Result<ActionResponse, ClientError> {
        let path = format!(
            "{}?id={}",
            self.config.api_path("/pantry/ingredients"),
            urlencoding::encode(id)
        );
        self.request::<_, ()>(Method::DELETE, &path, None).await
    }

    /// POST /api/parse-ingredient
    pub async fn parse_ingredient(&self, input: &str) -> Result<ParsedIngredient, ClientError> {
        let path = self.config.api_path("/parse-ingredient");
        let body = ParseRequest {
            input: input.to_string(),
        };
        self.request(Method::POST, &path, Some(&body)).await
    }

    /// POST /api/suggestions
    pub async fn suggestions(
        &self,
        filters: &SuggestionFilters,
    ) -> Result<SuggestionsResponse, ClientError> {
        let path = self.config.api_path("/suggestions");
        self.request(Method::POST, &path, Some(filters)).await
    }

    /// POST /api/mealplan with an empty JSON object
    pub async fn meal_plan(&self) -> Result<MealPlanResponse, ClientError> {
        let path = self.config.api_path("/mealplan");
        let body = serde_json::json!({});
        self.request(Method::POST, &path, Some(&body)).await
    }

    /// GET /api/user, checked
    pub async fn user(&self) -> Result<UserResponse, ClientError> {
        let path = self.config.api_path("/user");
        self.fetch_checked(&path, "Failed to fetch user data").await
    }

    /// GET /api/dashboard/stats, checked
    pub async fn dashboard_stats(&self) -> Result<StatsResponse, ClientError> {
        let path = self.config.api_path("/dashboard/stats");
        self.fetch_checked(&path, "Failed to fetch dashboard stats")
            .await
    }
}
