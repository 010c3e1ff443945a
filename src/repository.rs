//! Resource upload / review-status / download workflow
//!
//! `RepositoryClient` drives the full lifecycle of one resource's translation
//! round-trip against Transifex: upload the source file for translation, poll
//! per-language review completion, and download the reviewed translation to
//! the output directory once review reaches 100%.
//!
//! Every upload attempt and every stats fetch also emits a machine-parsable
//! status line (see [`crate::report`]) for the outer automation pipeline.
//!
//! # Example
//!
//! ```ignore
//! use transifex_sync::{
//!     Credentials, HttpTransifexApi, RepositoryClient, RepositoryConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let api = HttpTransifexApi::new(creds)?;
//!     let config = RepositoryConfig::new("My Project", "work/translations");
//!     let client = RepositoryClient::new(config, api);
//!
//!     let outcome = client
//!         .download_translation("my-repo", "i18n/en.json", "fr")
//!         .await;
//!     println!("{}", outcome.status());
//!     Ok(())
//! }
//! ```

use crate::api::TransifexApi;
use crate::error::{TransifexError, TransifexResult};
use crate::report;
use crate::slug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one repository's sync workflow
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Human-readable project name the project slug derives from
    pub project_name: String,
    /// Prefix for generated project slugs
    pub project_slug_prefix: String,
    /// Prefix for generated resource slugs
    pub resource_slug_prefix: String,
    /// Directory receiving download artifacts and import-outcome markers
    pub output_dir: PathBuf,
}

impl RepositoryConfig {
    /// Default slug prefix used by the internal workflow
    pub const DEFAULT_SLUG_PREFIX: &'static str = "inin";

    pub fn new(project_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            project_slug_prefix: Self::DEFAULT_SLUG_PREFIX.to_string(),
            resource_slug_prefix: Self::DEFAULT_SLUG_PREFIX.to_string(),
            output_dir: output_dir.into(),
        }
    }

    /// Override both slug prefixes
    pub fn with_slug_prefixes(
        mut self,
        project_prefix: impl Into<String>,
        resource_prefix: impl Into<String>,
    ) -> Self {
        self.project_slug_prefix = project_prefix.into();
        self.resource_slug_prefix = resource_prefix.into();
        self
    }
}

/// What kind of failure terminated a download attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A slug failed its sanity check; no remote call was made
    SlugGeneration,
    /// Connection-level failure
    Transport,
    /// Remote answered with a non-success status code
    RemoteRejection,
    /// The stats endpoint does not recognize this language (404)
    LanguageNotFound,
    /// Malformed JSON, or a JSON body without the expected content field
    ResponseParse,
    /// Local filesystem write failed
    Io,
}

/// Outcome of one `download_translation` attempt
///
/// A failed attempt never carries a path; a downloaded translation always
/// does. Review still in progress is an expected wait state, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Reviewed translation extracted and written to disk
    Downloaded {
        /// Absolute path of the written translation file
        path: PathBuf,
    },
    /// The language has not reached 100% reviewed yet
    ReviewPending { reason: String },
    /// The attempt terminated without producing a translation file
    Failed { kind: FailureKind, detail: String },
}

impl DownloadOutcome {
    /// Number of errors this attempt produced (0 or 1; the workflow exits at
    /// the first failure)
    pub fn error_count(&self) -> u32 {
        match self {
            DownloadOutcome::Failed { .. } => 1,
            _ => 0,
        }
    }

    /// Path of the downloaded translation, if the full pipeline completed
    pub fn path(&self) -> Option<&Path> {
        match self {
            DownloadOutcome::Downloaded { path } => Some(path),
            _ => None,
        }
    }

    /// Human-readable status of the attempt
    pub fn status(&self) -> String {
        match self {
            DownloadOutcome::Downloaded { path } => format!("Downloaded: {}", path.display()),
            DownloadOutcome::ReviewPending { reason } => reason.clone(),
            DownloadOutcome::Failed { detail, .. } => detail.clone(),
        }
    }
}

/// Client orchestrating the upload/status/download workflow for one project
///
/// Generic over the transport so the workflow runs unchanged against the
/// live HTTP API or a mock. Single-threaded and sequential: every remote
/// call completes before the next one is issued.
pub struct RepositoryClient<A: TransifexApi> {
    config: RepositoryConfig,
    api: A,
}

impl<A: TransifexApi> RepositoryClient<A> {
    /// Create a client from resolved configuration and transport
    ///
    /// Credentials live inside the transport and were resolved before this
    /// point; the client never resolves them lazily.
    pub fn new(config: RepositoryConfig, api: A) -> Self {
        Self { config, api }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    fn project_slug(&self) -> TransifexResult<String> {
        let slug = slug::project_slug(&self.config.project_slug_prefix, &self.config.project_name);
        if !slug::is_valid_slug(&slug, &self.config.project_slug_prefix) {
            return Err(TransifexError::SlugGeneration(format!(
                "Invalid project slug '{}' generated from project name '{}'",
                slug, self.config.project_name
            )));
        }
        Ok(slug)
    }

    fn resource_slug(&self, repository_name: &str, resource_path: &str) -> TransifexResult<String> {
        let slug = slug::resource_slug(
            &self.config.resource_slug_prefix,
            &[repository_name, resource_path],
        );
        if !slug::is_valid_slug(&slug, &self.config.resource_slug_prefix) {
            return Err(TransifexError::SlugGeneration(format!(
                "Invalid resource slug '{}' generated from '{}' + '{}'",
                slug, repository_name, resource_path
            )));
        }
        Ok(slug)
    }

    /// Upload one source resource file for translation
    ///
    /// Derives the project and resource slugs, PUTs the file to the content
    /// endpoint, emits an `ExecStats=` line for the attempt, and renames the
    /// local file to an import-outcome marker. Returns `true` only when the
    /// remote accepted the upload (200/201).
    pub async fn import_resource(
        &self,
        repository_name: &str,
        resource_path: &str,
        local_file: &Path,
    ) -> bool {
        let pslug = match self.project_slug() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                return false;
            }
        };
        println!("Destination project: {} ({})", pslug, self.config.project_name);

        let rslug = match self.resource_slug(repository_name, resource_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                return false;
            }
        };
        println!("Destination resource: {}", rslug);

        let resource_full_path = format!("{}/{}", repository_name, resource_path);
        match self.api.upload_content(&pslug, &rslug, local_file).await {
            Ok(response) if response.is_success() => {
                println!(
                    "{}",
                    report::exec_stats_line(
                        Some(response.status),
                        &response.body,
                        &pslug,
                        &rslug,
                        &resource_full_path,
                    )
                );
                self.mark_import_outcome(local_file, &rslug, true);
                true
            }
            Ok(response) => {
                eprintln!(
                    "Failed to upload. Status code: {}, pslug: '{}', rslug: '{}'",
                    response.status, pslug, rslug
                );
                eprintln!("{}", response.body);
                println!(
                    "{}",
                    report::exec_stats_line(
                        Some(response.status),
                        &response.body,
                        &pslug,
                        &rslug,
                        &resource_full_path,
                    )
                );
                self.mark_import_outcome(local_file, &rslug, false);
                false
            }
            Err(e) => {
                eprintln!("{}", e);
                println!(
                    "{}",
                    report::exec_stats_line(None, "", &pslug, &rslug, &resource_full_path)
                );
                self.mark_import_outcome(local_file, &rslug, false);
                false
            }
        }
    }

    /// Rename an uploaded source file to its import-outcome marker
    ///
    /// The rename signals the outcome to the operator: `_transifex_imported`
    /// for an accepted upload, `_import_failed` otherwise. The original
    /// filename never stays in place after an attempt.
    fn mark_import_outcome(&self, local_file: &Path, resource_slug: &str, succeeded: bool) {
        let marker = if succeeded {
            format!("{}_transifex_imported", resource_slug)
        } else {
            format!("{}_import_failed", resource_slug)
        };
        let target = self.config.output_dir.join(marker);
        if let Err(e) = fs::rename(local_file, &target) {
            eprintln!(
                "Failed to rename '{}' to '{}': {}",
                local_file.display(),
                target.display(),
                e
            );
        }
    }

    /// Download the reviewed translation of one resource for one language
    ///
    /// Linear state machine with early exits: slug generation, stats fetch,
    /// review gate, content fetch, raw persistence, content extraction,
    /// final persistence. Every stats fetch emits a `LanguageStats=` line,
    /// successful or not.
    pub async fn download_translation(
        &self,
        repository_name: &str,
        resource_path: &str,
        language_code: &str,
    ) -> DownloadOutcome {
        let pslug = match self.project_slug() {
            Ok(s) => s,
            Err(_) => {
                let detail = "Failed to generate project slug.".to_string();
                println!(
                    "{}",
                    report::language_failure_line(
                        repository_name,
                        resource_path,
                        language_code,
                        &detail,
                    )
                );
                return DownloadOutcome::Failed {
                    kind: FailureKind::SlugGeneration,
                    detail,
                };
            }
        };

        let rslug = match self.resource_slug(repository_name, resource_path) {
            Ok(s) => s,
            Err(_) => {
                let detail = "Failed to generate resource slug.".to_string();
                println!(
                    "{}",
                    report::language_failure_line(
                        repository_name,
                        resource_path,
                        language_code,
                        &detail,
                    )
                );
                return DownloadOutcome::Failed {
                    kind: FailureKind::SlugGeneration,
                    detail,
                };
            }
        };

        let stats = match self
            .api
            .language_stats(&pslug, &rslug, language_code)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                eprintln!("{}", e);
                let detail = format!(
                    "Failed to obtain language stats: {}, pslug: '{}', rslug: '{}'.",
                    language_code, pslug, rslug
                );
                println!(
                    "{}",
                    report::language_failure_line(
                        repository_name,
                        resource_path,
                        language_code,
                        &detail,
                    )
                );
                return DownloadOutcome::Failed {
                    kind: FailureKind::Transport,
                    detail,
                };
            }
        };

        if stats.is_not_found() {
            // TODO: notify the translation owner so the language can be
            // added to the Transifex project
            let detail = format!(
                "Language not found: {}, pslug: '{}', rslug: '{}'",
                language_code, pslug, rslug
            );
            println!(
                "{}",
                report::language_failure_line(
                    repository_name,
                    resource_path,
                    language_code,
                    &detail,
                )
            );
            return DownloadOutcome::Failed {
                kind: FailureKind::LanguageNotFound,
                detail,
            };
        }

        if !stats.is_success() {
            let detail = format!(
                "Failed to obtain language stats: {}. Code: {}, pslug: '{}', rslug: '{}'",
                language_code, stats.status, pslug, rslug
            );
            println!(
                "{}",
                report::language_failure_line(
                    repository_name,
                    resource_path,
                    language_code,
                    &detail,
                )
            );
            return DownloadOutcome::Failed {
                kind: FailureKind::RemoteRejection,
                detail,
            };
        }

        let parsed: Value = match serde_json::from_str(&stats.body) {
            Ok(value) => value,
            Err(e) => {
                let detail = format!("Failed to read language stats as json. Reason: '{}'.", e);
                println!(
                    "{}",
                    report::language_failure_line(
                        repository_name,
                        resource_path,
                        language_code,
                        &detail,
                    )
                );
                return DownloadOutcome::Failed {
                    kind: FailureKind::ResponseParse,
                    detail,
                };
            }
        };

        println!(
            "{}",
            report::language_stats_line(
                repository_name,
                resource_path,
                language_code,
                &pslug,
                &rslug,
                &parsed,
            )
        );

        if !review_completed(&parsed) {
            return DownloadOutcome::ReviewPending {
                reason: format!(
                    "Review not completed: {}, pslug: '{}', rslug: '{}'",
                    language_code, pslug, rslug
                ),
            };
        }

        self.fetch_reviewed_content(&pslug, &rslug, language_code)
            .await
    }

    /// Fetch the remote project details for this client's project
    ///
    /// Used by the outer tooling to map project names to slugs and inspect
    /// project metadata. Returns the raw response body on success, `None`
    /// when the slug cannot be derived or the remote call does not succeed.
    pub async fn project_details(&self) -> Option<String> {
        let pslug = self.project_slug().ok()?;
        match self.api.project_details(&pslug).await {
            Ok(response) if response.is_success() => Some(response.body),
            Ok(response) => {
                eprintln!(
                    "Failed to obtain project details. Status code: {}, pslug: '{}'",
                    response.status, pslug
                );
                None
            }
            Err(e) => {
                eprintln!("{}", e);
                None
            }
        }
    }

    /// Fetch the reviewed content and persist the raw and extracted files
    async fn fetch_reviewed_content(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> DownloadOutcome {
        let response = match self
            .api
            .reviewed_translation(project_slug, resource_slug, language_code)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                eprintln!("{}", e);
                return DownloadOutcome::Failed {
                    kind: FailureKind::Transport,
                    detail: "Failed to download translation.".to_string(),
                };
            }
        };

        if !response.is_success() {
            return DownloadOutcome::Failed {
                kind: FailureKind::RemoteRejection,
                detail: format!(
                    "Failed to download translation. Status: {}",
                    response.status
                ),
            };
        }

        // The raw body is kept verbatim even when extraction below fails,
        // so a broken download can be diagnosed from disk.
        let raw_path = self
            .config
            .output_dir
            .join(format!("{}_{}_raw", resource_slug, language_code));
        if let Err(e) = store_file(&raw_path, &response.body) {
            return DownloadOutcome::Failed {
                kind: FailureKind::Io,
                detail: format!("Failed to store raw download '{}': {}", raw_path.display(), e),
            };
        }

        let content = match extract_translation_content(&response.body) {
            Some(content) => content,
            None => {
                return DownloadOutcome::Failed {
                    kind: FailureKind::ResponseParse,
                    detail: "Failed to read raw download.".to_string(),
                };
            }
        };

        let download_path = self
            .config
            .output_dir
            .join(format!("{}_{}", resource_slug, language_code));
        if let Err(e) = store_file(&download_path, &content) {
            return DownloadOutcome::Failed {
                kind: FailureKind::Io,
                detail: format!(
                    "Failed to store translation '{}': {}",
                    download_path.display(),
                    e
                ),
            };
        }

        let path = std::path::absolute(&download_path).unwrap_or(download_path);
        DownloadOutcome::Downloaded { path }
    }
}

/// Whether the remote's review-completion indicator reports 100%
///
/// A missing or non-string `reviewed_percentage` counts as not complete,
/// keeping the attempt in the wait state rather than failing it.
fn review_completed(stats: &Value) -> bool {
    stats.get("reviewed_percentage").and_then(Value::as_str) == Some("100%")
}

/// Pull the translation text out of a reviewed-translation response body
fn extract_translation_content(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed.get("content")?.as_str().map(|s| s.to_string())
}

/// Write a file, explicitly removing any prior file at the path first to
/// avoid silent merges with stale content
fn store_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if path.is_file() {
        fs::remove_file(path)?;
    }
    fs::write(path, contents)
}
