#![deny(missing_docs)]

//! # Schema Dictionary Generation
//!
//! Iterates all component schemas, dispatching each entry to enum,
//! interface, or type-alias generation. Discriminator parents are
//! synthesized first (in the `_parent_schema_definition` namespace);
//! mapped children are declared through the discriminator resolver.

use crate::diagnostics::{Generated, Warning};
use crate::discriminator::{
    generate_child_expression, generate_parent_schema_definition, DiscriminatorIndex,
};
use crate::emit::{format_entries, format_schema_jsdoc, Entry, EntryOptions};
use crate::error::AppResult;
use crate::ident::{format_key, format_string, identifier};
use crate::oas::{RefOr, SchemaDictionary, SchemaObject};
use crate::resolver::resolve_value;
use serde_json::Value;

/// Emits an enumerated-constant declaration for a schema with an `enum`
/// facet. String enums keep their literal values as members; other enums
/// get a `num_` prefix so members stay valid identifiers.
fn generate_enum_schema(name: &str, schema: &SchemaObject) -> String {
    let values = schema.enum_values.as_deref().unwrap_or(&[]);
    let entries: Vec<Entry> = values
        .iter()
        .map(|value| {
            let literal = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if schema.schema_type.as_deref() == Some("string") {
                Entry {
                    key: format_key(&literal),
                    value: format_string(&literal),
                    ..Default::default()
                }
            } else {
                Entry {
                    key: format!("num_{}", literal),
                    value: literal,
                    ..Default::default()
                }
            }
        })
        .collect();

    format!(
        "{}export enum {} {{\n{}\n}}",
        format_schema_jsdoc(schema).unwrap_or_default(),
        identifier(name),
        format_entries(
            &entries,
            &EntryOptions {
                middle_separator: " = ",
                trailing_end_separator: true,
                ..Default::default()
            }
        )
    )
}

/// Emits a structural interface declaration for a plain object schema.
fn generate_interface_schema(name: &str, schema: &RefOr<SchemaObject>) -> AppResult<String> {
    Ok(format!(
        "export interface {} {}",
        identifier(name),
        resolve_value(schema)?
    ))
}

fn is_plain_object(schema: &SchemaObject) -> bool {
    schema.schema_type.as_deref() == Some("object")
        && !schema.is_nullable()
        && schema.all_of.is_none()
        && schema.any_of.is_none()
        && schema.one_of.is_none()
}

/// Generates declarations for every component schema.
///
/// Output order: the synthesized parent-shape namespace first, then every
/// dictionary entry in its original key order.
pub fn generate_schemas_definition(schemas: &SchemaDictionary) -> AppResult<Generated> {
    let mut warnings: Vec<Warning> = Vec::new();
    let index = DiscriminatorIndex::build(schemas, &mut warnings)?;

    let mut declarations = Vec::with_capacity(schemas.len());
    for (name, entry) in schemas {
        let declaration = match entry {
            RefOr::Item(schema) if schema.enum_values.is_some() => {
                generate_enum_schema(name, schema)
            }
            RefOr::Item(schema) if is_plain_object(schema) => {
                generate_interface_schema(name, entry)?
            }
            RefOr::Item(schema) => {
                let expression = match index.child_of(name) {
                    Some(child) => generate_child_expression(schema, child)?,
                    None => resolve_value(entry)?,
                };
                format!("export type {} = {};", identifier(name), expression)
            }
            RefOr::Ref(_) => {
                format!("export type {} = {};", identifier(name), resolve_value(entry)?)
            }
        };
        declarations.push(declaration);
    }

    let text = format!(
        "{}{}\n",
        generate_parent_schema_definition(&index.parents)?,
        declarations.join("\n\n")
    );
    Ok(Generated::new(text, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dictionary(yaml: &str) -> SchemaDictionary {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_string_enum_round_trip() {
        let generated = generate_schemas_definition(&dictionary(
            "Color: { type: string, enum: [A, B] }",
        ))
        .unwrap();
        assert!(generated
            .text
            .contains("export enum Color {\n  A = \"A\",\n  B = \"B\",\n}"));
        assert!(generated.warnings.is_empty());
    }

    #[test]
    fn test_numeric_enum_members_are_prefixed() {
        let generated =
            generate_schemas_definition(&dictionary("Code: { type: integer, enum: [1, 2] }"))
                .unwrap();
        assert!(generated
            .text
            .contains("export enum Code {\n  num_1 = 1,\n  num_2 = 2,\n}"));
    }

    #[test]
    fn test_plain_object_becomes_interface() {
        let generated = generate_schemas_definition(&dictionary(
            r#"
User:
  type: object
  required: [id]
  properties:
    id: { type: number }
    name: { type: string }
"#,
        ))
        .unwrap();
        assert!(generated.text.contains(
            "export interface User {\n  readonly id: number,\n  readonly name?: string | null,\n}"
        ));
    }

    #[test]
    fn test_nullable_object_becomes_type_alias() {
        let generated = generate_schemas_definition(&dictionary(
            "Maybe: { type: object, nullable: true, properties: { a: { type: string } } }",
        ))
        .unwrap();
        assert!(generated
            .text
            .contains("export type Maybe = {\n  readonly a?: string | null,\n} | null;"));
    }

    #[test]
    fn test_union_schema_becomes_type_alias() {
        let generated = generate_schemas_definition(&dictionary(
            r#"
Either:
  oneOf:
    - $ref: '#/components/schemas/A'
    - $ref: '#/components/schemas/B'
"#,
        ))
        .unwrap();
        assert!(generated
            .text
            .contains("export type Either = schemas.A | schemas.B;"));
    }

    #[test]
    fn test_discriminated_union_declarations() {
        let generated = generate_schemas_definition(&dictionary(
            r#"
Pet:
  type: object
  required: [kind]
  properties:
    kind: { type: string }
  discriminator:
    propertyName: kind
    mapping:
      a: '#/components/schemas/A'
      b: '#/components/schemas/B'
  oneOf:
    - $ref: '#/components/schemas/A'
    - $ref: '#/components/schemas/B'
A:
  allOf:
    - $ref: '#/components/schemas/Pet'
    - type: object
      properties:
        meow: { type: boolean }
B:
  allOf:
    - $ref: '#/components/schemas/Pet'
    - type: object
      properties:
        bark: { type: boolean }
"#,
        ))
        .unwrap();

        // Parent namespace narrows the discriminant to the mapping keys.
        assert!(generated
            .text
            .starts_with("namespace _parent_schema_definition {"));
        assert!(generated.text.contains("readonly kind: \"a\" | \"b\","));
        // Each child pins its own literal discriminant.
        assert!(generated.text.contains(
            "export type A = \n{ readonly kind: \"a\" } & _parent_schema_definition.Pet & {"
        ));
        assert!(generated.text.contains(
            "export type B = \n{ readonly kind: \"b\" } & _parent_schema_definition.Pet & {"
        ));
    }

    #[test]
    fn test_inherited_required_fields_are_merged() {
        let generated = generate_schemas_definition(&dictionary(
            r#"
Pet:
  type: object
  required: [kind]
  properties:
    kind: { type: string }
  discriminator:
    propertyName: kind
    mapping:
      a: '#/components/schemas/A'
  oneOf:
    - $ref: '#/components/schemas/A'
A:
  required: [meow]
  allOf:
    - $ref: '#/components/schemas/Pet'
    - type: object
      properties:
        meow: { type: boolean }
"#,
        ))
        .unwrap();
        // `meow` comes from A's own required list, merged into the arm.
        assert!(generated.text.contains("readonly meow: boolean,"));
    }

    #[test]
    fn test_determinism() {
        let schemas = dictionary(
            r#"
Zebra: { type: string, enum: [x, y] }
Apple:
  type: object
  properties:
    seeds: { type: number }
"#,
        );
        let first = generate_schemas_definition(&schemas).unwrap();
        let second = generate_schemas_definition(&schemas).unwrap();
        assert_eq!(first, second);
        // Dictionary order is preserved: Zebra before Apple.
        let zebra = first.text.find("export enum Zebra").unwrap();
        let apple = first.text.find("export interface Apple").unwrap();
        assert!(zebra < apple);
    }
}
