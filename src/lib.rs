//! Transifex upload/review-status/download workflow client
//!
//! This crate is the integration layer between an internal
//! translation-management workflow and the Transifex REST API. It uploads
//! source resource files for translation, polls per-language review
//! completion, downloads reviewed translations to disk, and emits
//! machine-parsable `ExecStats=` / `LanguageStats=` status lines for an
//! outer automation pipeline.
//!
//! # Workflow Example
//!
//! ```ignore
//! use transifex_sync::{
//!     Credentials, DownloadOutcome, HttpTransifexApi, RepositoryClient,
//!     RepositoryConfig,
//! };
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Resolve credentials once, before constructing the client
//!     let creds = Credentials::from_env()?;
//!     let api = HttpTransifexApi::new(creds)?;
//!     let config = RepositoryConfig::new("My Project", "work/translations");
//!     let client = RepositoryClient::new(config, api);
//!
//!     // 2. Upload a source file for translation
//!     let uploaded = client
//!         .import_resource("my-repo", "i18n/en.json", Path::new("work/en.json"))
//!         .await;
//!     println!("uploaded: {}", uploaded);
//!
//!     // 3. Later: download the reviewed translation once review hits 100%
//!     match client.download_translation("my-repo", "i18n/en.json", "fr").await {
//!         DownloadOutcome::Downloaded { path } => println!("wrote {}", path.display()),
//!         DownloadOutcome::ReviewPending { reason } => println!("waiting: {}", reason),
//!         DownloadOutcome::Failed { detail, .. } => eprintln!("failed: {}", detail),
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod creds;
pub mod error;
pub mod mock;
pub mod report;
pub mod repository;
pub mod slug;

// Re-export main types for convenient access
pub use api::{HttpTransifexApi, RemoteResponse, TransifexApi};
pub use creds::Credentials;
pub use error::{TransifexError, TransifexResult};
pub use mock::{CannedCall, MockTransifexApi};
pub use repository::{DownloadOutcome, FailureKind, RepositoryClient, RepositoryConfig};
