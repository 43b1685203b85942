#![deny(missing_docs)]

//! # Document Assembly
//!
//! Wraps the schema and path generators for one parsed document, and
//! merges multiple named documents into the cross-document dictionary
//! consumed by request-wrapping clients. Also defines the config-file
//! model naming the documents to generate.

use crate::diagnostics::{Generated, Warning};
use crate::emit::{add_indent_level, format_entries, Entry, EntryOptions};
use crate::error::{AppError, AppResult};
use crate::ident::identifier;
use crate::oas::{HttpMethod, OpenApiObject, SchemaDictionary};
use crate::paths::generate_paths_definition;
use crate::schemas::generate_schemas_definition;
use serde::{Deserialize, Serialize};

/// One configured API document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDocument {
    /// Namespace the generated declarations are scoped under.
    pub namespace: String,
    /// Source URL of the document (kept as a doc link in the output).
    pub url: String,
    /// Local file path of the fetched document, relative to the config.
    pub path: String,
    /// Optional allowlist of operation identifiers to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<String>>,
}

/// A configured document together with its parsed OpenAPI object.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocumentWithObject {
    /// The config-file entry.
    pub document: ApiDocument,
    /// The parsed document.
    pub open_api_object: OpenApiObject,
}

/// The generator config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Documents to fetch and generate.
    pub documents: Vec<ApiDocument>,
    /// Path of the generated TypeScript file, relative to the config.
    pub target_file: String,
}

/// Parses an OpenAPI document from YAML or JSON text.
pub fn parse_document(content: &str) -> AppResult<OpenApiObject> {
    serde_yaml::from_str(content)
        .map_err(|e| AppError::General(format!("Failed to parse OpenAPI document: {}", e)))
}

/// Generates the `paths` and `schemas` namespaces for one document.
pub fn generate_openapi_definition(
    document: &OpenApiObject,
    operations: Option<&[String]>,
) -> AppResult<Generated> {
    let empty = SchemaDictionary::new();
    let schemas = document.component_schemas().unwrap_or(&empty);

    let paths = generate_paths_definition(&document.paths, operations)?;
    let schemas = generate_schemas_definition(schemas)?;

    let text = format!(
        "\nexport namespace paths {{\n{}\n}}\nexport namespace schemas {{\n{}\n}}\n",
        add_indent_level(&paths.text),
        add_indent_level(&schemas.text)
    );
    let mut warnings = paths.warnings;
    warnings.extend(schemas.warnings);
    Ok(Generated::new(text, warnings))
}

/// Operation identifiers selected for one document, in path order.
fn selected_operation_ids(doc: &ApiDocumentWithObject) -> Vec<String> {
    doc.open_api_object
        .paths
        .values()
        .flat_map(|path_item| {
            HttpMethod::ALL
                .iter()
                .filter_map(|method| path_item.operation(*method))
                .filter_map(|operation| operation.operation_id.as_deref())
                .collect::<Vec<_>>()
        })
        .filter(|operation_id| match &doc.document.operations {
            Some(allowlist) => allowlist.iter().any(|allowed| allowed == operation_id),
            None => true,
        })
        .map(identifier)
        .collect()
}

/// Merges every configured document into one generated module: the
/// `OpenApiOperationsDictionary` index plus one namespace per document.
///
/// Selection is independent per document; identifiers are not
/// deduplicated or validated across documents.
pub fn generate_all_api(documents: &[ApiDocumentWithObject]) -> AppResult<Generated> {
    let mut warnings: Vec<Warning> = Vec::new();

    let dictionary_entries: Vec<Entry> = documents
        .iter()
        .map(|doc| {
            let namespace = &doc.document.namespace;
            let operation_entries: Vec<Entry> = selected_operation_ids(doc)
                .into_iter()
                .map(|operation_id| Entry {
                    value: format!(
                        "{{ readonly Parameter: {ns}.paths.{id}.Parameter, readonly Response: {ns}.paths.{id}.Response, readonly RequestBody: {ns}.paths.{id}.RequestBody, readonly requestBody: typeof {ns}.paths.{id}.requestBody }}",
                        ns = namespace,
                        id = operation_id
                    ),
                    key: operation_id,
                    modifiers: vec!["readonly"],
                    ..Default::default()
                })
                .collect();
            Entry {
                key: namespace.clone(),
                value: format!(
                    "{{\n{}\n}}",
                    format_entries(&operation_entries, &EntryOptions::default())
                ),
                modifiers: vec!["readonly"],
                ..Default::default()
            }
        })
        .collect();

    let mut namespace_blocks: Vec<String> = Vec::with_capacity(documents.len());
    for doc in documents {
        let definition = generate_openapi_definition(
            &doc.open_api_object,
            doc.document.operations.as_deref(),
        )?;
        warnings.extend(definition.warnings);
        namespace_blocks.push(format!(
            "\n/**\n* {{@link {}}}\n*/\nexport namespace {} {{\n{}\n}}\n",
            doc.document.url,
            doc.document.namespace,
            add_indent_level(&definition.text)
        ));
    }

    let text = format!(
        "\nexport interface OpenApiOperationsDictionary {{\n{}\n}}\n{}  ",
        format_entries(&dictionary_entries, &EntryOptions::default()),
        namespace_blocks.join("\n")
    );
    Ok(Generated::new(text, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PETSTORE: &str = r#"
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        "200":
          content:
            application/json:
              schema:
                type: array
                items: { $ref: '#/components/schemas/Pet' }
    post:
      operationId: createPet
      responses: {}
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id: { type: number }
        name: { type: string }
"#;

    fn doc(namespace: &str, operations: Option<Vec<String>>) -> ApiDocumentWithObject {
        ApiDocumentWithObject {
            document: ApiDocument {
                namespace: namespace.to_string(),
                url: format!("https://example.com/{}.yaml", namespace),
                path: format!("api/{}.yaml", namespace),
                operations,
            },
            open_api_object: parse_document(PETSTORE).unwrap(),
        }
    }

    #[test]
    fn test_openapi_definition_wraps_paths_and_schemas() {
        let document = parse_document(PETSTORE).unwrap();
        let generated = generate_openapi_definition(&document, None).unwrap();
        assert!(generated.text.contains("export namespace paths {"));
        assert!(generated.text.contains("export namespace schemas {"));
        assert!(generated.text.contains("export namespace listPets {"));
        assert!(generated.text.contains("export interface Pet {"));
    }

    #[test]
    fn test_all_api_dictionary_lists_selected_operations() {
        let generated = generate_all_api(&[doc("petStore", None)]).unwrap();
        let text = &generated.text;
        assert!(text.starts_with("\nexport interface OpenApiOperationsDictionary {"));
        assert!(text.contains("readonly petStore: {"));
        assert!(text.contains(
            "readonly listPets: { readonly Parameter: petStore.paths.listPets.Parameter, readonly Response: petStore.paths.listPets.Response, readonly RequestBody: petStore.paths.listPets.RequestBody, readonly requestBody: typeof petStore.paths.listPets.requestBody }"
        ));
        assert!(text.contains("* {@link https://example.com/petStore.yaml}"));
        assert!(text.contains("export namespace petStore {"));
        assert!(text.ends_with("  "));
    }

    #[test]
    fn test_all_api_respects_allowlist() {
        let generated =
            generate_all_api(&[doc("petStore", Some(vec!["listPets".to_string()]))]).unwrap();
        assert!(generated.text.contains("readonly listPets:"));
        assert!(!generated.text.contains("readonly createPet:"));
        assert!(!generated.text.contains("export namespace createPet"));
    }

    #[test]
    fn test_all_api_is_deterministic() {
        let documents = [doc("a", None), doc("b", None)];
        let first = generate_all_api(&documents).unwrap();
        let second = generate_all_api(&documents).unwrap();
        assert_eq!(first, second);
        // Namespaces are emitted in configuration order.
        let a = first.text.find("export namespace a {").unwrap();
        let b = first.text.find("export namespace b {").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_config_file_model() {
        let config: ConfigFile = serde_yaml::from_str(
            r#"
{
  "documents": [
    { "namespace": "petStore", "url": "https://example.com/openapi.json", "path": "api/petStore.json" }
  ],
  "targetFile": "src/api.ts"
}
"#,
        )
        .unwrap();
        assert_eq!(config.target_file, "src/api.ts");
        assert_eq!(config.documents[0].namespace, "petStore");
        assert_eq!(config.documents[0].operations, None);
    }
}
