use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};
use feedcard_types::*;

/// Base URL used when neither the CLI, the environment nor the config file
/// names a server
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// The three remote operations a post card needs.
///
/// Every call is scoped to one post and authenticated as the current viewer.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Toggle the viewer's like on a post
    async fn like_post(&self, post_id: &str) -> ApiResult<()>;

    /// Add a comment and return the post's full, updated comment list
    async fn comment_on_post(&self, post_id: &str, text: &str) -> ApiResult<Vec<Comment>>;

    /// Delete a post
    async fn delete_post(&self, post_id: &str) -> ApiResult<()>;
}

/// HTTP client for the post service
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Create a new API client authenticated with a bearer token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post_url(&self, path: &str, post_id: &str) -> String {
        format!("{}{}{}", self.base_url, path, urlencoding::encode(post_id))
    }

    /// Map a response to an error unless its status is a success
    async fn check_status(&self, response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        // Clean up HTML error pages from proxies and JSON error envelopes
        let clean_error = if error_text.contains("<html>") || error_text.contains("<!DOCTYPE") {
            format!("Server returned {} error. Please check the server URL.", status.as_u16())
        } else if let Ok(body) = serde_json::from_str::<ErrorResponse>(&error_text) {
            body.error
        } else if error_text.is_empty() {
            status.to_string()
        } else {
            error_text
        };

        match status.as_u16() {
            404 => Err(ApiError::NotFound(clean_error)),
            401 => Err(ApiError::Unauthorized(clean_error)),
            403 => Err(ApiError::Forbidden(clean_error)),
            400 => Err(ApiError::BadRequest(clean_error)),
            _ => Err(ApiError::Api(clean_error)),
        }
    }

    /// Helper to handle API responses with a JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let response = self.check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl PostService for ApiClient {
    async fn like_post(&self, post_id: &str) -> ApiResult<()> {
        let url = self.post_url("/posts/like/", post_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        self.check_status(response).await?;
        Ok(())
    }

    async fn comment_on_post(&self, post_id: &str, text: &str) -> ApiResult<Vec<Comment>> {
        let url = self.post_url("/posts/comment/", post_id);
        let request = CommentRequest {
            text: text.to_string(),
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;
        let body: CommentResponse = self.handle_response(response).await?;
        Ok(body.comments)
    }

    async fn delete_post(&self, post_id: &str) -> ApiResult<()> {
        let url = self.post_url("/posts/", post_id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        self.check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/api/", "token");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn test_post_id_is_percent_encoded_into_path() {
        let client = ApiClient::new(DEFAULT_BASE_URL, "token");
        assert_eq!(
            client.post_url("/posts/like/", "a b/c"),
            "http://localhost:3000/api/posts/like/a%20b%2Fc"
        );
    }
}
