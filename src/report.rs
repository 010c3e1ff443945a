//! Machine-parsable status lines
//!
//! The outer automation pipeline scrapes stdout for newline-terminated
//! `<Tag>=<JSON object>` records, where `Tag` is `ExecStats` (one per upload
//! attempt) or `LanguageStats` (one per stats fetch, successful or not).
//! Emitting these lines is a required observable side effect of the
//! workflow, not optional logging.

use serde::Deserialize;
use serde_json::{Value, json};

/// String counts reported by the upload endpoint
///
/// Each field falls back to `"n/a"` individually when the remote omits it;
/// the inconsistent `strings_delete` key is part of the remote contract.
#[derive(Debug, Default, Deserialize)]
struct UploadCounts {
    #[serde(default)]
    strings_added: Option<Value>,
    #[serde(default)]
    strings_updated: Option<Value>,
    #[serde(default)]
    strings_delete: Option<Value>,
}

/// Build the `ExecStats=` line for one upload attempt
///
/// `status_code` is `None` when the call never reached the remote (transport
/// failure). String counts are pulled from the response body's
/// `strings_added` / `strings_updated` / `strings_delete` keys; a body that
/// fails to parse as JSON downgrades the counts to `"n/a"` without turning
/// the upload into a failure.
pub fn exec_stats_line(
    status_code: Option<u16>,
    response_body: &str,
    project_slug: &str,
    resource_slug: &str,
    resource_full_path: &str,
) -> String {
    let succeeded = matches!(status_code, Some(200) | Some(201));

    let counts = if succeeded {
        match serde_json::from_str::<UploadCounts>(response_body) {
            Ok(counts) => counts,
            Err(e) => {
                eprintln!("Failed to read upload response as json. Reason: '{}'.", e);
                UploadCounts::default()
            }
        }
    } else {
        UploadCounts::default()
    };
    let num_new = counts.strings_added.unwrap_or_else(|| Value::from("n/a"));
    let num_mod = counts.strings_updated.unwrap_or_else(|| Value::from("n/a"));
    let num_del = counts.strings_delete.unwrap_or_else(|| Value::from("n/a"));

    let record = json!({
        "operation": "ResourceUpload",
        "results": (if succeeded { "SUCCESS" } else { "FAILURE" }),
        "resource_full_path": resource_full_path,
        "status_code": status_code.map_or(Value::from("n/a"), Value::from),
        "project_slug": project_slug,
        "resource_slug": resource_slug,
        "new_strings": num_new,
        "mod_strings": num_mod,
        "del_strings": num_del,
    });

    format!("ExecStats={}", record)
}

/// Build the `LanguageStats=` line for a successful stats fetch
///
/// The remote stats object is passed through with the workflow's own
/// identification fields merged in.
pub fn language_stats_line(
    repository_name: &str,
    resource_path: &str,
    language_code: &str,
    project_slug: &str,
    resource_slug: &str,
    stats: &Value,
) -> String {
    let mut record = match stats {
        Value::Object(map) => map.clone(),
        other => {
            let mut map = serde_json::Map::new();
            map.insert("stats".to_string(), other.clone());
            map
        }
    };
    record.insert("repository_name".to_string(), json!(repository_name));
    record.insert("resource_path".to_string(), json!(resource_path));
    record.insert("language_code".to_string(), json!(language_code));
    record.insert("project_slug".to_string(), json!(project_slug));
    record.insert("resource_slug".to_string(), json!(resource_slug));
    record.insert("operation".to_string(), json!("GetLanguageStats"));

    format!("LanguageStats={}", Value::Object(record))
}

/// Build the `LanguageStats=` line for a failed stats fetch
pub fn language_failure_line(
    repository_name: &str,
    resource_path: &str,
    language_code: &str,
    message: &str,
) -> String {
    let record = json!({
        "repository_name": repository_name,
        "resource_path": resource_path,
        "language_code": language_code,
        "message": message,
    });

    format!("LanguageStats={}", record)
}
