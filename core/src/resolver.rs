#![deny(missing_docs)]

//! # Type Expression Resolver
//!
//! Recursively maps a schema node (scalar, array, object, enum,
//! reference, union, intersection, nullable) to a TypeScript type
//! expression string. This is the central reusable primitive: every
//! other generator funnels through [`resolve_value`].
//!
//! The resolver is a pure function of its input: no side effects, no
//! caching, identical text for identical nodes, property ordering taken
//! from the document.

use crate::emit::{format_entries, format_schema_jsdoc, Entry, EntryOptions};
use crate::error::{AppError, AppResult};
use crate::ident::{format_key, format_string, identifier};
use crate::oas::{AdditionalProperties, RefOr, ReferenceObject, SchemaObject};
use serde_json::Value;

/// Joins resolved members into a union expression.
pub fn union_type(members: &[String]) -> String {
    members.join(" | ")
}

/// Joins resolved members into an intersection expression.
pub fn intersection_type(members: &[String]) -> String {
    members.join(" & ")
}

/// Widens a type expression with `| null`.
pub fn union_null(ty: String) -> String {
    format!("{} | null", ty)
}

/// Resolves a `$ref` into a dotted path inside the `schemas` namespace.
///
/// Only `#/components/schemas/` targets are supported; anything else is
/// a fatal [`AppError::UnsupportedReference`].
pub fn get_ref(reference: &ReferenceObject) -> AppResult<String> {
    match reference.schema_name() {
        Some(name) => Ok(format!("schemas.{}", identifier(name))),
        None => Err(AppError::UnsupportedReference(reference.ref_path.clone())),
    }
}

/// Resolves a schema node (inline or `$ref`) to a type expression.
pub fn resolve_value(schema: &RefOr<SchemaObject>) -> AppResult<String> {
    match schema {
        RefOr::Ref(reference) => get_ref(reference),
        RefOr::Item(item) => get_scalar(item),
    }
}

fn enum_member_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolves an inline schema node to a type expression.
///
/// `anyOf`/`oneOf` and `allOf` take precedence over a concrete `type`;
/// an unrecognized or absent `type` is fatal.
pub fn get_scalar(item: &SchemaObject) -> AppResult<String> {
    if let Some(members) = item.any_of.as_ref().or(item.one_of.as_ref()) {
        let resolved = members
            .iter()
            .map(resolve_value)
            .collect::<AppResult<Vec<_>>>()?;
        return Ok(union_type(&resolved));
    }

    if let Some(members) = &item.all_of {
        let resolved = members
            .iter()
            .map(resolve_value)
            .collect::<AppResult<Vec<_>>>()?;
        return Ok(intersection_type(&resolved));
    }

    let handling_null = |ty: String| {
        if item.is_nullable() {
            union_null(ty)
        } else {
            ty
        }
    };

    match item.schema_type.as_deref() {
        Some("number") | Some("integer") => Ok(handling_null(match &item.enum_values {
            Some(values) => {
                union_type(&values.iter().map(enum_member_text).collect::<Vec<_>>())
            }
            None => "number".to_string(),
        })),

        Some("boolean") => Ok(handling_null("boolean".to_string())),

        Some("array") => Ok(handling_null(get_array(item)?)),

        Some("string") => Ok(handling_null(match &item.enum_values {
            Some(values) => union_type(
                &values
                    .iter()
                    .map(|value| format_string(&enum_member_text(value)))
                    .collect::<Vec<_>>(),
            ),
            None => "string".to_string(),
        })),

        Some("object") => Ok(handling_null(get_object(item)?)),

        other => Err(AppError::UnknownSchemaType {
            type_name: other.unwrap_or("<none>").to_string(),
            node: serde_json::to_string(item).unwrap_or_default(),
        }),
    }
}

/// Resolves an object schema's member list into an indented entry block.
///
/// Fatal when the schema declares neither `properties` nor a truthy
/// `additionalProperties`.
pub fn get_object_body(item: &SchemaObject) -> AppResult<String> {
    if !item.has_members() {
        return Err(AppError::MissingProperties);
    }

    let required = item.required.as_deref().unwrap_or(&[]);
    let mut entries: Vec<Entry> = Vec::new();

    if let Some(properties) = &item.properties {
        for (key, prop) in properties {
            let is_required = required.iter().any(|name| name == key);
            let resolved = resolve_value(prop)?;
            entries.push(Entry {
                key: format_key(key),
                value: if is_required {
                    resolved
                } else {
                    union_null(resolved)
                },
                middle_sep: Some(if is_required { ": " } else { "?: " }),
                doc: match prop {
                    RefOr::Item(schema) => format_schema_jsdoc(schema),
                    RefOr::Ref(_) => None,
                },
                modifiers: vec!["readonly"],
            });
        }
    }

    if item.has_additional_properties() {
        let value = match &item.additional_properties {
            Some(AdditionalProperties::Schema(schema)) => resolve_value(schema)?,
            _ => "any".to_string(),
        };
        entries.push(Entry {
            key: "[key: string]".to_string(),
            value,
            middle_sep: Some(": "),
            doc: None,
            modifiers: vec!["readonly"],
        });
    }

    Ok(format_entries(
        &entries,
        &EntryOptions {
            trailing_end_separator: true,
            ..Default::default()
        },
    ))
}

/// Resolves an object schema to a structural record expression.
///
/// An object with no member list collapses to an unconstrained record
/// when `type: object`, or `any` otherwise.
pub fn get_object(item: &SchemaObject) -> AppResult<String> {
    if item.has_members() {
        Ok(format!("{{\n{}\n}}", get_object_body(item)?))
    } else if item.schema_type.as_deref() == Some("object") {
        Ok("{ readonly [key: string]: any}".to_string())
    } else {
        Ok("any".to_string())
    }
}

/// Resolves an array schema to a read-only sequence expression.
pub fn get_array(item: &SchemaObject) -> AppResult<String> {
    match &item.items {
        Some(items) => Ok(format!("ReadonlyArray<{}>", resolve_value(items)?)),
        None => Err(AppError::MissingItems),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema(yaml: &str) -> SchemaObject {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn node(yaml: &str) -> RefOr<SchemaObject> {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_scalar_primitives() {
        assert_eq!(get_scalar(&schema("{ type: string }")).unwrap(), "string");
        assert_eq!(get_scalar(&schema("{ type: integer }")).unwrap(), "number");
        assert_eq!(get_scalar(&schema("{ type: number }")).unwrap(), "number");
        assert_eq!(get_scalar(&schema("{ type: boolean }")).unwrap(), "boolean");
    }

    #[test]
    fn test_string_enum_literal_union() {
        assert_eq!(
            get_scalar(&schema("{ type: string, enum: [a, b] }")).unwrap(),
            "\"a\" | \"b\""
        );
    }

    #[test]
    fn test_numeric_enum_literal_union() {
        assert_eq!(
            get_scalar(&schema("{ type: integer, enum: [1, 2] }")).unwrap(),
            "1 | 2"
        );
    }

    #[test]
    fn test_reference_resolution() {
        assert_eq!(
            resolve_value(&node("$ref: '#/components/schemas/Pet'")).unwrap(),
            "schemas.Pet"
        );
        assert_eq!(
            resolve_value(&node("$ref: '#/components/schemas/user-v2'")).unwrap(),
            "schemas.user_v2"
        );
    }

    #[test]
    fn test_unsupported_reference_is_fatal() {
        let err = resolve_value(&node("$ref: '#/components/responses/NotFound'")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedReference(_)));
    }

    #[test]
    fn test_array_requires_items() {
        let err = get_scalar(&schema("{ type: array }")).unwrap_err();
        assert!(matches!(err, AppError::MissingItems));
    }

    #[test]
    fn test_array_nullable_composition() {
        assert_eq!(
            get_scalar(&schema(
                "{ type: array, items: { type: string }, nullable: true }"
            ))
            .unwrap(),
            "ReadonlyArray<string> | null"
        );
    }

    #[test]
    fn test_required_optional_fidelity() {
        let resolved = get_scalar(&schema(
            r#"
type: object
required: [id]
properties:
  id: { type: number }
  name: { type: string }
"#,
        ))
        .unwrap();
        assert_eq!(
            resolved,
            "{\n  readonly id: number,\n  readonly name?: string | null,\n}"
        );
    }

    #[test]
    fn test_union_takes_precedence_over_type() {
        let resolved = get_scalar(&schema(
            "{ type: object, oneOf: [{ type: string }, { type: number }] }",
        ))
        .unwrap();
        assert_eq!(resolved, "string | number");
    }

    #[test]
    fn test_all_of_intersection() {
        let resolved = get_scalar(&schema(
            "{ allOf: [{ $ref: '#/components/schemas/A' }, { $ref: '#/components/schemas/B' }] }",
        ))
        .unwrap();
        assert_eq!(resolved, "schemas.A & schemas.B");
    }

    #[test]
    fn test_additional_properties_index_signature() {
        let resolved = get_scalar(&schema(
            "{ type: object, additionalProperties: { type: number } }",
        ))
        .unwrap();
        assert_eq!(resolved, "{\n  readonly [key: string]: number,\n}");

        let resolved = get_scalar(&schema("{ type: object, additionalProperties: true }")).unwrap();
        assert_eq!(resolved, "{\n  readonly [key: string]: any,\n}");
    }

    #[test]
    fn test_bare_object_is_unconstrained_record() {
        assert_eq!(
            get_scalar(&schema("{ type: object }")).unwrap(),
            "{ readonly [key: string]: any}"
        );
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let err = get_scalar(&schema("{ type: file }")).unwrap_err();
        let AppError::UnknownSchemaType { type_name, node } = err else {
            panic!("expected UnknownSchemaType")
        };
        assert_eq!(type_name, "file");
        assert!(node.contains("file"));
    }

    #[test]
    fn test_property_doc_comment() {
        let resolved = get_scalar(&schema(
            r#"
type: object
required: [id]
properties:
  id: { type: string, format: uuid }
"#,
        ))
        .unwrap();
        assert_eq!(
            resolved,
            "{\n  /**\n   * @format uuid\n   */\n  readonly id: string,\n}"
        );
    }
}
