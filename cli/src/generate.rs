#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads the locally stored OpenAPI documents, compiles them into one
//! TypeScript module and writes it to the configured target file.
//! Warnings go to stderr; the output file is written regardless.

use crate::error::{CliError, CliResult};
use std::fs;
use std::path::Path;
use tsgen_core::{generate_all_api, parse_document, ApiDocumentWithObject, ConfigFile};

/// Compiles all configured documents into the target TypeScript file.
pub fn execute(config: &ConfigFile, config_dir: &Path) -> CliResult<()> {
    let mut documents = Vec::with_capacity(config.documents.len());
    for entry in &config.documents {
        let path = config_dir.join(&entry.path);
        let content = fs::read_to_string(&path).map_err(|e| {
            CliError::General(format!(
                "Failed to read document '{}' at {}: {}",
                entry.namespace,
                path.display(),
                e
            ))
        })?;
        documents.push(ApiDocumentWithObject {
            document: entry.clone(),
            open_api_object: parse_document(&content)?,
        });
    }

    let generated = generate_all_api(&documents)?;
    for warning in &generated.warnings {
        eprintln!("Warning: {}", warning);
    }

    let target = config_dir.join(&config.target_file);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, generated.text.as_bytes())?;
    println!("Wrote {}", target.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tsgen_core::ApiDocument;

    const DOCUMENT: &str = r#"
paths:
  /pets:
    get:
      operationId: listPets
      responses: {}
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id: { type: number }
"#;

    #[test]
    fn test_execute_writes_target_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("api")).unwrap();
        fs::write(dir.path().join("api/petStore.yaml"), DOCUMENT).unwrap();

        let config = ConfigFile {
            documents: vec![ApiDocument {
                namespace: "petStore".to_string(),
                url: "https://example.com/openapi.yaml".to_string(),
                path: "api/petStore.yaml".to_string(),
                operations: None,
            }],
            target_file: "src/api.ts".to_string(),
        };

        execute(&config, dir.path()).unwrap();

        let output = fs::read_to_string(dir.path().join("src/api.ts")).unwrap();
        assert!(output.contains("export interface OpenApiOperationsDictionary {"));
        assert!(output.contains("export namespace petStore {"));
        assert!(output.contains("export interface Pet {"));
    }

    #[test]
    fn test_execute_fails_on_missing_document() {
        let dir = tempdir().unwrap();
        let config = ConfigFile {
            documents: vec![ApiDocument {
                namespace: "petStore".to_string(),
                url: "https://example.com/openapi.yaml".to_string(),
                path: "api/missing.yaml".to_string(),
                operations: None,
            }],
            target_file: "src/api.ts".to_string(),
        };

        let err = execute(&config, dir.path()).unwrap_err();
        assert!(format!("{}", err).contains("petStore"));
    }
}
