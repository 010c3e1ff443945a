//! Deterministic slug derivation for remote lookup keys
//!
//! Transifex addresses projects and resources by slug. Both slug kinds are
//! derived deterministically from human-readable names, so the same resource
//! resolves to the same remote identifier across runs without any persisted
//! mapping table.
//!
//! # Example
//!
//! ```ignore
//! use transifex_sync::slug;
//!
//! let pslug = slug::project_slug("inin", "My Project! v2");
//! assert_eq!(pslug, "inin-my-project--v2");
//!
//! let rslug = slug::resource_slug("inin", &["repo-name", "path/to/resource.json"]);
//! // "inin-" followed by the SHA-1 hex of "repo-namepath/to/resource.json"
//! ```

use regex::Regex;
use sha1::{Digest, Sha1};
use std::fmt::Write as _;

/// Derive a project slug from a human-readable project name
///
/// The name is trimmed and lower-cased, every character outside `[a-z0-9]`
/// is replaced with `-`, and the prefix is prepended with a separating dash.
///
/// Pure and total: any input produces a string. An empty name yields just
/// `"{prefix}-"`, which [`is_valid_slug`] rejects; callers treat that as a
/// generation failure and abort the enclosing operation.
///
/// # Example
///
/// ```ignore
/// assert_eq!(project_slug("inin", "My Project! v2"), "inin-my-project--v2");
/// ```
pub fn project_slug(prefix: &str, project_name: &str) -> String {
    let normalized = project_name.trim().to_lowercase();
    let re = Regex::new(r"[^a-z0-9]").unwrap();
    format!("{}-{}", prefix, re.replace_all(&normalized, "-"))
}

/// Derive a resource slug from disambiguating seed strings
///
/// The seeds are concatenated without a separator (callers pre-disambiguate,
/// e.g. repository name + resource path), hashed with SHA-1 over the UTF-8
/// bytes, and rendered as lowercase hex behind the prefix.
///
/// Deterministic: the same seeds always produce the same slug, so "the same
/// resource" re-resolves idempotently across runs.
pub fn resource_slug(prefix: &str, seeds: &[&str]) -> String {
    let text: String = seeds.concat();
    let digest = Sha1::digest(text.as_bytes());

    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        // write! to a String cannot fail
        let _ = write!(hex, "{:02x}", byte);
    }

    format!("{}-{}", prefix, hex)
}

/// Sanity-check a derived slug
///
/// A valid slug is `"{prefix}-"` followed by a non-empty body drawn from
/// `[a-z0-9-]`. Anything else means slug generation failed and the caller
/// must abort before issuing any remote call.
pub fn is_valid_slug(slug: &str, prefix: &str) -> bool {
    match slug.strip_prefix(prefix).and_then(|s| s.strip_prefix('-')) {
        Some(body) => {
            !body.is_empty()
                && body
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Project Slug Tests ==========

    #[test]
    fn test_project_slug_replaces_disallowed_characters() {
        // Each disallowed character is replaced individually
        assert_eq!(project_slug("inin", "My Project! v2"), "inin-my-project--v2");
    }

    #[test]
    fn test_project_slug_trims_and_lowercases() {
        assert_eq!(project_slug("inin", "  Hello  "), "inin-hello");
        assert_eq!(project_slug("inin", "UPPER"), "inin-upper");
    }

    #[test]
    fn test_project_slug_passes_through_allowed_characters() {
        assert_eq!(project_slug("inin", "abc123"), "inin-abc123");
    }

    #[test]
    fn test_project_slug_replaces_unicode_and_punctuation() {
        assert_eq!(project_slug("inin", "café"), "inin-caf-");
        assert_eq!(project_slug("inin", "a.b/c"), "inin-a-b-c");
    }

    #[test]
    fn test_project_slug_is_deterministic() {
        let a = project_slug("inin", "Some Project");
        let b = project_slug("inin", "Some Project");
        assert_eq!(a, b);
    }

    #[test]
    fn test_project_slug_charset() {
        let slug = project_slug("inin", "Wild! Name? With $ymbols & Ünïcode");
        let body = slug.strip_prefix("inin-").unwrap();
        assert!(
            body.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        );
    }

    #[test]
    fn test_project_slug_empty_name_fails_validation() {
        let slug = project_slug("inin", "");
        assert_eq!(slug, "inin-");
        assert!(!is_valid_slug(&slug, "inin"));
    }

    // ========== Resource Slug Tests ==========

    #[test]
    fn test_resource_slug_fixed_sha1_vector() {
        // SHA-1("abc") = a9993e364706816aba3e25717850c26c9cd0d89d
        assert_eq!(
            resource_slug("inin", &["a", "bc"]),
            "inin-a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_resource_slug_empty_seeds_vector() {
        // SHA-1("") = da39a3ee5e6b4b0d3255bfef95601890afd80709
        assert_eq!(
            resource_slug("inin", &[]),
            "inin-da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn test_resource_slug_is_deterministic() {
        let a = resource_slug("inin", &["repo", "path/to/file.json"]);
        let b = resource_slug("inin", &["repo", "path/to/file.json"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_resource_slug_seeds_are_concatenated_without_separator() {
        // Seed boundaries do not affect the hash, only the concatenation does
        assert_eq!(
            resource_slug("inin", &["ab", "c"]),
            resource_slug("inin", &["a", "bc"])
        );
    }

    #[test]
    fn test_resource_slug_different_seeds_differ() {
        assert_ne!(
            resource_slug("inin", &["repo-a", "file.json"]),
            resource_slug("inin", &["repo-b", "file.json"])
        );
    }

    // ========== Validation Tests ==========

    #[test]
    fn test_is_valid_slug_accepts_generated_slugs() {
        assert!(is_valid_slug(&project_slug("inin", "My Project! v2"), "inin"));
        assert!(is_valid_slug(&resource_slug("inin", &["repo", "path"]), "inin"));
    }

    #[test]
    fn test_is_valid_slug_rejects_empty_body() {
        assert!(!is_valid_slug("inin-", "inin"));
    }

    #[test]
    fn test_is_valid_slug_rejects_wrong_prefix() {
        assert!(!is_valid_slug("other-abc", "inin"));
        assert!(!is_valid_slug("abc", "inin"));
    }

    #[test]
    fn test_is_valid_slug_rejects_bad_charset() {
        assert!(!is_valid_slug("inin-Hello", "inin"));
        assert!(!is_valid_slug("inin-a_b", "inin"));
    }
}
