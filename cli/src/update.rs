#![deny(missing_docs)]

//! # Update Command
//!
//! Fetches the configured OpenAPI documents over HTTP and stores them
//! next to the config file, so generation runs offline afterwards.
//! JSON documents are pretty-printed before writing to keep local
//! diffs readable.

use crate::error::{CliError, CliResult};
use std::fs;
use std::path::Path;
use tsgen_core::ConfigFile;

/// Fetches every configured document, or only the named namespaces.
pub fn execute(config: &ConfigFile, config_dir: &Path, namespaces: &[String]) -> CliResult<()> {
    for document in &config.documents {
        if !namespaces.is_empty() && !namespaces.contains(&document.namespace) {
            continue;
        }

        println!("Fetching '{}' from {}...", document.namespace, document.url);
        let body = fetch(&document.url)?;
        let contents = if document.path.ends_with(".json") {
            pretty_json(&document.namespace, &body)?
        } else {
            body
        };

        let target = config_dir.join(&document.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, contents)?;
        println!("Wrote {}", target.display());
    }

    Ok(())
}

fn fetch(url: &str) -> CliResult<String> {
    let mut response = ureq::get(url).call()?;
    Ok(response.body_mut().read_to_string()?)
}

/// Reformats a fetched JSON document with stable two-space indentation.
fn pretty_json(namespace: &str, body: &str) -> CliResult<String> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        CliError::General(format!(
            "Document '{}' is not valid JSON: {}",
            namespace, e
        ))
    })?;
    let mut text = serde_json::to_string_pretty(&value).map_err(|e| {
        CliError::General(format!(
            "Failed to serialize document '{}': {}",
            namespace, e
        ))
    })?;
    text.push('\n');
    Ok(text)
}
