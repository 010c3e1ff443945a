//! Mock Transifex API for testing
//!
//! This module provides a deterministic, network-free transport for testing
//! the sync workflow without credentials or a live Transifex project. Each
//! endpoint is given a canned behavior, and every call is recorded so tests
//! can assert which remote operations were (or were not) issued.
//!
//! # Example
//!
//! ```ignore
//! use transifex_sync::{CannedCall, MockTransifexApi, TransifexApi};
//!
//! #[tokio::test]
//! async fn test_stats() {
//!     let api = MockTransifexApi::new()
//!         .with_stats(CannedCall::respond(200, r#"{"reviewed_percentage": "100%"}"#));
//!     let response = api.language_stats("p", "r", "fr").await.unwrap();
//!     assert!(response.is_success());
//! }
//! ```

use crate::api::{RemoteResponse, TransifexApi};
use crate::error::{TransifexError, TransifexResult};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

/// Canned behavior for one mock endpoint
#[derive(Debug, Clone)]
pub enum CannedCall {
    /// Return this status and body
    Respond { status: u16, body: String },
    /// Simulate a connection-level failure
    Fail(String),
}

impl CannedCall {
    /// Shorthand for `CannedCall::Respond`
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        CannedCall::Respond {
            status,
            body: body.into(),
        }
    }

    /// Shorthand for `CannedCall::Fail`
    pub fn fail(message: impl Into<String>) -> Self {
        CannedCall::Fail(message.into())
    }

    fn resolve(&self) -> TransifexResult<RemoteResponse> {
        match self {
            CannedCall::Respond { status, body } => Ok(RemoteResponse {
                status: *status,
                body: body.clone(),
            }),
            CannedCall::Fail(msg) => Err(TransifexError::Transport(msg.clone())),
        }
    }
}

/// Mock transport that serves canned responses and records calls
///
/// Defaults simulate a fully happy path: upload accepted with string counts,
/// review complete, and a downloadable reviewed translation.
#[derive(Debug)]
pub struct MockTransifexApi {
    upload: CannedCall,
    stats: CannedCall,
    translation: CannedCall,
    details: CannedCall,
    calls: Mutex<Vec<String>>,
}

impl MockTransifexApi {
    /// Create a mock with happy-path defaults
    pub fn new() -> Self {
        Self {
            upload: CannedCall::respond(
                200,
                r#"{"strings_added": 1, "strings_updated": 0, "strings_delete": 0}"#,
            ),
            stats: CannedCall::respond(
                200,
                r#"{"reviewed_percentage": "100%", "completed": "100%"}"#,
            ),
            translation: CannedCall::respond(200, r#"{"content": "translated text"}"#),
            details: CannedCall::respond(
                200,
                r#"{"slug": "inin-my-project", "name": "My Project", "source_language_code": "en"}"#,
            ),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the canned behavior of the upload endpoint
    pub fn with_upload(mut self, call: CannedCall) -> Self {
        self.upload = call;
        self
    }

    /// Set the canned behavior of the language-stats endpoint
    pub fn with_stats(mut self, call: CannedCall) -> Self {
        self.stats = call;
        self
    }

    /// Set the canned behavior of the reviewed-translation endpoint
    pub fn with_translation(mut self, call: CannedCall) -> Self {
        self.translation = call;
        self
    }

    /// Set the canned behavior of the project-details endpoint
    pub fn with_details(mut self, call: CannedCall) -> Self {
        self.details = call;
        self
    }

    /// Calls issued so far, in order, as `"operation:pslug[/rslug[/lang]]"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockTransifexApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransifexApi for MockTransifexApi {
    async fn upload_content(
        &self,
        project_slug: &str,
        resource_slug: &str,
        _file_path: &Path,
    ) -> TransifexResult<RemoteResponse> {
        self.record(format!("upload:{}/{}", project_slug, resource_slug));
        self.upload.resolve()
    }

    async fn language_stats(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> TransifexResult<RemoteResponse> {
        self.record(format!(
            "stats:{}/{}/{}",
            project_slug, resource_slug, language_code
        ));
        self.stats.resolve()
    }

    async fn reviewed_translation(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> TransifexResult<RemoteResponse> {
        self.record(format!(
            "translation:{}/{}/{}",
            project_slug, resource_slug, language_code
        ));
        self.translation.resolve()
    }

    async fn project_details(&self, project_slug: &str) -> TransifexResult<RemoteResponse> {
        self.record(format!("details:{}", project_slug));
        self.details.resolve()
    }

    fn api_name(&self) -> &str {
        "Mock Transifex API"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Canned Behavior Tests ==========

    #[tokio::test]
    async fn test_defaults_are_happy_path() {
        let api = MockTransifexApi::new();

        let upload = api
            .upload_content("p", "r", Path::new("file.json"))
            .await
            .unwrap();
        assert!(upload.is_success());

        let stats = api.language_stats("p", "r", "fr").await.unwrap();
        assert!(stats.body.contains("100%"));

        let translation = api.reviewed_translation("p", "r", "fr").await.unwrap();
        assert!(translation.body.contains("content"));

        let details = api.project_details("p").await.unwrap();
        assert!(details.is_success());
        assert!(details.body.contains("slug"));
    }

    #[tokio::test]
    async fn test_canned_rejection() {
        let api = MockTransifexApi::new().with_stats(CannedCall::respond(404, "not found"));
        let response = api.language_stats("p", "r", "xx").await.unwrap();
        assert!(response.is_not_found());
    }

    #[tokio::test]
    async fn test_canned_transport_failure() {
        let api = MockTransifexApi::new().with_upload(CannedCall::fail("connection refused"));
        let result = api.upload_content("p", "r", Path::new("file.json")).await;
        match result {
            Err(TransifexError::Transport(msg)) => assert!(msg.contains("refused")),
            _ => panic!("Expected Transport error"),
        }
    }

    // ========== Call Recording Tests ==========

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let api = MockTransifexApi::new();
        api.language_stats("p", "r", "fr").await.unwrap();
        api.reviewed_translation("p", "r", "fr").await.unwrap();
        api.project_details("p").await.unwrap();

        assert_eq!(
            api.calls(),
            vec!["stats:p/r/fr", "translation:p/r/fr", "details:p"]
        );
    }
}
