//! Remote API transport for Transifex
//!
//! This module defines the `TransifexApi` trait so the workflow logic can be
//! exercised against different backends (live HTTP, mock) without coupling it
//! to any specific transport. The transport's only job is "send request,
//! receive status + body": every HTTP status comes back as a normal
//! [`RemoteResponse`] for the workflow to classify, and only connection-level
//! failures surface as errors.
//!
//! # Example
//!
//! ```ignore
//! use transifex_sync::{Credentials, HttpTransifexApi, TransifexApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let api = HttpTransifexApi::new(creds)?;
//!
//!     let response = api.language_stats("inin-my-project", "inin-abc123", "fr").await?;
//!     println!("{} {}", response.status, response.body);
//!     Ok(())
//! }
//! ```

use crate::creds::Credentials;
use crate::error::{TransifexError, TransifexResult};
use async_trait::async_trait;
use std::path::Path;

/// Normalized shape every remote call reduces to before the workflow
/// inspects it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body text
    pub body: String,
}

impl RemoteResponse {
    /// Transifex reports success as 200 or 201; every other code is a failure
    pub fn is_success(&self) -> bool {
        self.status == 200 || self.status == 201
    }

    /// 404 is distinguished where the workflow branches on
    /// "resource/language not found"
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Generic trait for Transifex API transports
///
/// Implementations handle the actual remote calls, whether over HTTP
/// ([`HttpTransifexApi`]) or with canned responses (`MockTransifexApi`).
///
/// All methods are async to support network I/O. A returned `Err` always
/// means a transport (connection-level) failure; remote rejections arrive as
/// `Ok(RemoteResponse)` with a non-success status.
#[async_trait]
pub trait TransifexApi: Send + Sync {
    /// Upload a source resource file (PUT, multipart file body) to
    /// `project/{pslug}/resource/{rslug}/content/`
    async fn upload_content(
        &self,
        project_slug: &str,
        resource_slug: &str,
        file_path: &Path,
    ) -> TransifexResult<RemoteResponse>;

    /// Fetch per-language review statistics from
    /// `project/{pslug}/resource/{rslug}/stats/{lang}/`
    async fn language_stats(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> TransifexResult<RemoteResponse>;

    /// Fetch the reviewed translation content from
    /// `project/{pslug}/resource/{rslug}/translation/{lang}/?mode=reviewed`
    async fn reviewed_translation(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> TransifexResult<RemoteResponse>;

    /// Fetch project details from `project/{pslug}/`
    async fn project_details(&self, project_slug: &str) -> TransifexResult<RemoteResponse>;

    /// Name of this transport, for logging and diagnostics
    fn api_name(&self) -> &str;
}

/// Production transport using reqwest with HTTP basic auth
///
/// Credentials are injected at construction and immutable afterwards; there
/// is no lazy credential resolution on first use.
#[derive(Clone)]
pub struct HttpTransifexApi {
    creds: Credentials,
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransifexApi {
    const DEFAULT_BASE_URL: &'static str = "https://www.transifex.com/api/2";

    /// Create a new HTTP transport with the given credentials
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New transport instance
    /// * `Err(TransifexError)` - If the HTTP client cannot be created
    pub fn new(creds: Credentials) -> TransifexResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TransifexError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            creds,
            client,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the API base URL (used by tests against a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn project_url(&self, project_slug: &str) -> String {
        format!("{}/project/{}/", self.base_url, project_slug)
    }

    fn resource_url(&self, project_slug: &str, resource_slug: &str, tail: &str) -> String {
        format!(
            "{}/project/{}/resource/{}/{}",
            self.base_url, project_slug, resource_slug, tail
        )
    }

    async fn into_response(response: reqwest::Response) -> TransifexResult<RemoteResponse> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            TransifexError::Transport(format!("Failed to read response body: {}", e))
        })?;
        Ok(RemoteResponse { status, body })
    }
}

impl std::fmt::Debug for HttpTransifexApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransifexApi")
            .field("creds", &self.creds)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TransifexApi for HttpTransifexApi {
    async fn upload_content(
        &self,
        project_slug: &str,
        resource_slug: &str,
        file_path: &Path,
    ) -> TransifexResult<RemoteResponse> {
        let bytes = std::fs::read(file_path).map_err(|e| {
            TransifexError::Io(format!(
                "Failed to read upload file '{}': {}",
                file_path.display(),
                e
            ))
        })?;

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resource".to_string());
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.resource_url(project_slug, resource_slug, "content/");
        let response = self
            .client
            .put(&url)
            .basic_auth(self.creds.username(), Some(self.creds.password()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransifexError::Transport(format!("PUT {} failed: {}", url, e)))?;

        Self::into_response(response).await
    }

    async fn language_stats(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> TransifexResult<RemoteResponse> {
        let url = self.resource_url(
            project_slug,
            resource_slug,
            &format!("stats/{}/", language_code),
        );
        let response = self
            .client
            .get(&url)
            .basic_auth(self.creds.username(), Some(self.creds.password()))
            .send()
            .await
            .map_err(|e| TransifexError::Transport(format!("GET {} failed: {}", url, e)))?;

        Self::into_response(response).await
    }

    async fn reviewed_translation(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> TransifexResult<RemoteResponse> {
        let url = self.resource_url(
            project_slug,
            resource_slug,
            &format!("translation/{}/?mode=reviewed", language_code),
        );
        let response = self
            .client
            .get(&url)
            .basic_auth(self.creds.username(), Some(self.creds.password()))
            .send()
            .await
            .map_err(|e| TransifexError::Transport(format!("GET {} failed: {}", url, e)))?;

        Self::into_response(response).await
    }

    async fn project_details(&self, project_slug: &str) -> TransifexResult<RemoteResponse> {
        let url = self.project_url(project_slug);
        let response = self
            .client
            .get(&url)
            .basic_auth(self.creds.username(), Some(self.creds.password()))
            .send()
            .await
            .map_err(|e| TransifexError::Transport(format!("GET {} failed: {}", url, e)))?;

        Self::into_response(response).await
    }

    fn api_name(&self) -> &str {
        "Transifex HTTP API"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_creds() -> Credentials {
        Credentials::new("user".to_string(), "secret".to_string()).unwrap()
    }

    // ========== RemoteResponse Tests ==========

    #[test]
    fn test_is_success_accepts_200_and_201() {
        for status in [200, 201] {
            let response = RemoteResponse {
                status,
                body: String::new(),
            };
            assert!(response.is_success());
        }
    }

    #[test]
    fn test_is_success_rejects_other_codes() {
        for status in [204, 301, 400, 401, 404, 500] {
            let response = RemoteResponse {
                status,
                body: String::new(),
            };
            assert!(!response.is_success());
        }
    }

    #[test]
    fn test_is_not_found() {
        let response = RemoteResponse {
            status: 404,
            body: String::new(),
        };
        assert!(response.is_not_found());
        assert!(!response.is_success());
    }

    // ========== HttpTransifexApi Tests ==========

    #[test]
    fn test_new_builds_client() {
        let api = HttpTransifexApi::new(test_creds()).unwrap();
        assert_eq!(api.base_url, HttpTransifexApi::DEFAULT_BASE_URL);
        assert_eq!(api.api_name(), "Transifex HTTP API");
    }

    #[test]
    fn test_with_base_url_override() {
        let api = HttpTransifexApi::new(test_creds())
            .unwrap()
            .with_base_url("http://localhost:8080/api/2");
        assert_eq!(api.base_url, "http://localhost:8080/api/2");
    }

    #[test]
    fn test_resource_url_layout() {
        let api = HttpTransifexApi::new(test_creds()).unwrap();
        assert_eq!(
            api.resource_url("inin-proj", "inin-res", "stats/fr/"),
            "https://www.transifex.com/api/2/project/inin-proj/resource/inin-res/stats/fr/"
        );
        assert_eq!(
            api.resource_url("inin-proj", "inin-res", "translation/fr/?mode=reviewed"),
            "https://www.transifex.com/api/2/project/inin-proj/resource/inin-res/translation/fr/?mode=reviewed"
        );
    }

    #[test]
    fn test_project_url_layout() {
        let api = HttpTransifexApi::new(test_creds()).unwrap();
        assert_eq!(
            api.project_url("inin-proj"),
            "https://www.transifex.com/api/2/project/inin-proj/"
        );
    }

    #[test]
    fn test_debug_masks_credentials() {
        let api = HttpTransifexApi::new(test_creds()).unwrap();
        let debug_str = format!("{:?}", api);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("secret"));
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let api = HttpTransifexApi::new(test_creds()).unwrap();
        let result = api
            .upload_content("inin-proj", "inin-res", Path::new("/nonexistent/file.json"))
            .await;
        match result {
            Err(TransifexError::Io(msg)) => assert!(msg.contains("nonexistent")),
            _ => panic!("Expected Io error"),
        }
    }
}
