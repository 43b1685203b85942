#![deny(missing_docs)]

//! # openapi-tsgen CLI
//!
//! Fetches OpenAPI documents and compiles them into TypeScript
//! declarations.
//!
//! Supported flags:
//! - `--update [NAMESPACE...]`: re-fetch the configured documents.
//! - `--generate`: compile the stored documents into the target file.

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tsgen_core::ConfigFile;

use crate::error::{CliError, CliResult};

mod error;
mod generate;
mod update;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI to TypeScript declaration generator")]
struct Cli {
    /// Path to the generator config file.
    #[clap(long, default_value = "./openapi-tsgen.config.json")]
    config: PathBuf,

    /// Re-fetch the configured documents. With namespaces given, only
    /// those documents are fetched.
    #[clap(long, num_args = 0.., value_name = "NAMESPACE")]
    update: Option<Vec<String>>,

    /// Compile the stored documents into the configured target file.
    #[clap(long)]
    generate: bool,
}

fn load_config(path: &Path) -> CliResult<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::General(format!("Failed to read config {}: {}", path.display(), e))
    })?;
    serde_yaml::from_str(&content).map_err(|e| {
        CliError::General(format!("Failed to parse config {}: {}", path.display(), e))
    })
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    if cli.update.is_none() && !cli.generate {
        return Err(CliError::General(
            "nothing to do; pass --update and/or --generate".to_string(),
        ));
    }

    let config = load_config(&cli.config)?;
    let config_dir = cli
        .config
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if let Some(namespaces) = &cli.update {
        update::execute(&config, &config_dir, namespaces)?;
    }
    if cli.generate {
        generate::execute(&config, &config_dir)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_update_accepts_zero_or_more_namespaces() {
        let cli = Cli::parse_from(["openapi-tsgen", "--update"]);
        assert_eq!(cli.update, Some(vec![]));

        let cli = Cli::parse_from(["openapi-tsgen", "--update", "petStore", "status"]);
        assert_eq!(
            cli.update,
            Some(vec!["petStore".to_string(), "status".to_string()])
        );

        let cli = Cli::parse_from(["openapi-tsgen", "--generate"]);
        assert_eq!(cli.update, None);
        assert!(cli.generate);
    }

    #[test]
    fn test_load_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
  "documents": [
    {{ "namespace": "petStore", "url": "https://example.com/openapi.json", "path": "api/petStore.json" }}
  ],
  "targetFile": "src/api.ts"
}}"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.target_file, "src/api.ts");
        assert_eq!(config.documents.len(), 1);
    }
}
