#![deny(missing_docs)]

//! # Operation Generation
//!
//! Per path + method: partitions declared parameters by location, parses
//! the URL template, detects naming conflicts and unbound path variables,
//! and derives the `Parameter`, `Response` and `RequestBody` shapes. Each
//! operation is emitted as one `export namespace <operationId>` block
//! carrying `method`, `url`, `getUrl`, `parameterNames`, the per-location
//! parameter interfaces, and the raw `requestBody` descriptor.

use crate::diagnostics::{Generated, Warning};
use crate::emit::{add_indent_level, format_entries, Entry, EntryOptions};
use crate::error::{AppError, AppResult};
use crate::ident::identifier;
use crate::oas::{
    HttpMethod, OperationObject, ParameterLocation, ParameterObject, PathItemObject, RefOr,
    RequestBodyObject, SchemaObject,
};
use crate::resolver::{get_object, get_object_body};
use crate::url_template::parse_url_template;
use indexmap::IndexMap;

/// Builds the synthetic object schema describing a parameter list.
fn parameter_object_schema(parameters: &[&ParameterObject]) -> SchemaObject {
    SchemaObject {
        schema_type: Some("object".to_string()),
        required: Some(
            parameters
                .iter()
                .filter(|parameter| parameter.required)
                .map(|parameter| parameter.name.clone())
                .collect(),
        ),
        properties: Some(
            parameters
                .iter()
                .map(|parameter| {
                    (
                        parameter.name.clone(),
                        parameter
                            .schema
                            .clone()
                            .unwrap_or(RefOr::Item(SchemaObject::default())),
                    )
                })
                .collect(),
        ),
        ..Default::default()
    }
}

/// Emits one per-location parameter interface, or nothing when the
/// location has no parameters.
fn format_content(interface_name: &str, parameters: &[&ParameterObject]) -> AppResult<String> {
    if parameters.is_empty() {
        return Ok(String::new());
    }
    Ok(format!(
        "export interface {} {}",
        interface_name,
        get_object(&parameter_object_schema(parameters))?
    ))
}

/// Builds the `Response` record: status code to per-media-type payloads.
fn response_interface_body(operation: &OperationObject) -> AppResult<String> {
    let mut properties: IndexMap<String, RefOr<SchemaObject>> = IndexMap::new();
    for (status_code, response) in &operation.responses {
        let shape = match &response.content {
            None => SchemaObject {
                schema_type: Some("object".to_string()),
                ..Default::default()
            },
            Some(content) => SchemaObject {
                schema_type: Some("object".to_string()),
                required: Some(content.keys().cloned().collect()),
                properties: Some(
                    content
                        .iter()
                        .map(|(media_type, media)| {
                            (
                                media_type.clone(),
                                media
                                    .schema
                                    .clone()
                                    .unwrap_or(RefOr::Item(SchemaObject::default())),
                            )
                        })
                        .collect(),
                ),
                ..Default::default()
            },
        };
        properties.insert(status_code.clone(), RefOr::Item(shape));
    }

    get_object(&SchemaObject {
        schema_type: Some("object".to_string()),
        required: Some(operation.responses.keys().cloned().collect()),
        properties: Some(properties),
        ..Default::default()
    })
}

/// Builds the `RequestBody` record keyed by media type.
fn request_body_interface_body(request_body: Option<&RequestBodyObject>) -> AppResult<String> {
    let content = request_body
        .and_then(|body| body.content.clone())
        .unwrap_or_default();
    get_object(&SchemaObject {
        schema_type: Some("object".to_string()),
        required: Some(content.keys().cloned().collect()),
        properties: Some(
            content
                .iter()
                .map(|(media_type, media)| {
                    (
                        media_type.clone(),
                        media
                            .schema
                            .clone()
                            .unwrap_or(RefOr::Item(SchemaObject::default())),
                    )
                })
                .collect(),
        ),
        ..Default::default()
    })
}

fn generate_operation(
    url: &str,
    method: HttpMethod,
    operation: &OperationObject,
    warnings: &mut Vec<Warning>,
) -> AppResult<String> {
    let operation_id = operation.operation_id.as_deref().ok_or_else(|| {
        AppError::General(format!(
            "operation {} {} has no operationId",
            method.as_str(),
            url
        ))
    })?;

    let parameters: Vec<&ParameterObject> = operation
        .parameters
        .iter()
        .filter_map(|parameter| match parameter {
            RefOr::Item(inline) => Some(inline),
            RefOr::Ref(reference) => {
                warnings.push(Warning::ReferenceParameterDropped {
                    operation_id: operation_id.to_string(),
                    reference: reference.ref_path.clone(),
                });
                None
            }
        })
        .collect();

    let by_location = |location: ParameterLocation| -> Vec<&ParameterObject> {
        parameters
            .iter()
            .copied()
            .filter(|parameter| parameter.location == location)
            .collect()
    };
    let path_parameters = by_location(ParameterLocation::Path);
    let query_parameters = by_location(ParameterLocation::Query);
    let cookie_parameters = by_location(ParameterLocation::Cookie);
    let header_parameters = by_location(ParameterLocation::Header);
    let parsed_url = parse_url_template(url);

    let conflict_parameters: Vec<String> = path_parameters
        .iter()
        .filter(|parameter| !parsed_url.path_params.contains(&parameter.name))
        .map(|parameter| parameter.name.clone())
        .collect();
    if !conflict_parameters.is_empty() {
        warnings.push(Warning::ConflictingPathParameters {
            operation_id: operation_id.to_string(),
            url: url.to_string(),
            names: conflict_parameters.clone(),
        });
    }

    let free_path_variables: Vec<String> = parsed_url
        .path_params
        .iter()
        .filter(|name| !path_parameters.iter().any(|parameter| &parameter.name == *name))
        .cloned()
        .collect();
    if !free_path_variables.is_empty() {
        warnings.push(Warning::FreePathVariables {
            operation_id: operation_id.to_string(),
            url: url.to_string(),
            names: free_path_variables.clone(),
        });
    }

    let interface_path_parameter =
        if path_parameters.is_empty() && parsed_url.path_params.is_empty() {
            String::new()
        } else {
            let declared = if path_parameters.is_empty() {
                String::new()
            } else {
                format!(
                    "{}\n",
                    get_object_body(&parameter_object_schema(&path_parameters))?
                )
            };
            let free_entries: Vec<Entry> = free_path_variables
                .iter()
                .map(|key| Entry {
                    key: key.clone(),
                    value: "string | number, // FIXME: free variable here".to_string(),
                    modifiers: vec!["readonly"],
                    ..Default::default()
                })
                .collect();
            format!(
                "export interface PathParameter {{\n{}{}\n}}\n",
                declared,
                format_entries(
                    &free_entries,
                    &EntryOptions {
                        end_separator: "",
                        ..Default::default()
                    }
                )
            )
        };

    let interface_query_parameter = format_content("QueryParameter", &query_parameters)?;
    let interface_header_parameter = format_content("HeaderParameter", &header_parameters)?;
    let interface_cookie_parameter = format_content("CookieParameter", &cookie_parameters)?;
    let interface_all_parameters = format!(
        "{}{}{}{}",
        interface_path_parameter,
        interface_query_parameter,
        interface_header_parameter,
        interface_cookie_parameter
    );

    let get_url_function = if parsed_url.path_params.is_empty() {
        format!("({{}} : {{}}) => '{}'", parsed_url.url_js_template)
    } else {
        format!(
            "({{ {} }}: PathParameter) => `{}`",
            parsed_url.path_params.join(", "),
            parsed_url.url_js_template
        )
    };

    let names_of = |parameters: &[&ParameterObject]| -> Vec<String> {
        parameters.iter().map(|p| p.name.clone()).collect()
    };
    let parameter_names = serde_json::to_string(&serde_json::json!({
        "path": names_of(&path_parameters),
        "query": names_of(&query_parameters),
        "header": names_of(&header_parameters),
        "cookie": names_of(&cookie_parameters),
    }))
    .map_err(|e| AppError::General(format!("Failed to serialize parameterNames: {}", e)))?;

    let parameter_type = if interface_all_parameters.is_empty() {
        "{}".to_string()
    } else {
        [
            ("PathParameter", interface_path_parameter.as_str()),
            ("QueryParameter", interface_query_parameter.as_str()),
            ("HeaderParameter", interface_header_parameter.as_str()),
            ("CookieParameter", interface_cookie_parameter.as_str()),
        ]
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(" & ")
    };
    let conflict_marker = if conflict_parameters.is_empty() {
        ""
    } else {
        " // FIXME: Conflict Parameters"
    };

    let request_body = match &operation.request_body {
        Some(RefOr::Item(body)) if body.content.is_some() => Some(body),
        _ => None,
    };
    let request_body_const = match request_body {
        Some(body) => {
            let json = serde_json::to_string(body)
                .map_err(|e| AppError::General(format!("Failed to serialize requestBody: {}", e)))?;
            format!("{} as const", json)
        }
        None => "undefined".to_string(),
    };

    let content = format!(
        "\nexport const method = '{}';\nexport const url = '{}';\nexport const getUrl = {};\nexport const parameterNames = {} as const\n{}\nexport type Parameter = {};{}\nexport interface Response {}\nexport const requestBody = {};\nexport interface RequestBody {}\n",
        method.as_str(),
        url,
        get_url_function,
        parameter_names,
        interface_all_parameters,
        parameter_type,
        conflict_marker,
        response_interface_body(operation)?,
        request_body_const,
        request_body_interface_body(request_body)?,
    );

    Ok(format!(
        "\nexport namespace {} {{\n{}\n}}",
        identifier(operation_id),
        add_indent_level(&content)
    ))
}

/// Generates one namespace block per path + method.
///
/// When `operations` is given, only operations whose `operationId` is in
/// the allowlist are generated.
pub fn generate_paths_definition(
    paths: &IndexMap<String, PathItemObject>,
    operations: Option<&[String]>,
) -> AppResult<Generated> {
    let mut warnings: Vec<Warning> = Vec::new();
    let mut blocks: Vec<String> = Vec::new();

    for (url, path_item) in paths {
        for method in HttpMethod::ALL {
            let Some(operation) = path_item.operation(method) else {
                continue;
            };
            if let Some(allowlist) = operations {
                match &operation.operation_id {
                    Some(id) if allowlist.iter().any(|allowed| allowed == id) => {}
                    _ => continue,
                }
            }
            blocks.push(generate_operation(url, method, operation, &mut warnings)?);
        }
    }

    Ok(Generated::new(blocks.join(""), warnings))
}
