#![deny(missing_docs)]

//! # Discriminator Resolution
//!
//! Detects polymorphic schemas (`discriminator` + `oneOf`/`anyOf`),
//! validates their mappings, and restructures parent/child declarations:
//! the parent's shape is re-emitted with its discriminator property
//! narrowed to the literal union of discriminant values, and every mapped
//! child becomes the intersection of a literal-discriminant field and its
//! own resolved shape.
//!
//! The parent ↔ child relation is acyclic and resolved once per
//! document: [`DiscriminatorIndex::build`] walks the schema dictionary a
//! single time before any child is generated.

use crate::diagnostics::Warning;
use crate::emit::add_indent_level;
use crate::error::{AppError, AppResult};
use crate::ident::{format_key, format_string, identifier};
use crate::oas::models::SCHEMAS_REF_PREFIX;
use crate::oas::{RefOr, SchemaDictionary, SchemaObject};
use crate::resolver::{get_object, get_scalar, intersection_type, resolve_value};
use indexmap::IndexMap;

/// A parent schema carrying a discriminator with a complete mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscriminatorParent<'a> {
    /// Name of the parent schema in the dictionary.
    pub name: &'a str,
    /// The parent schema itself.
    pub schema: &'a SchemaObject,
    /// The discriminant property name.
    pub property_name: &'a str,
    /// Discriminant value to child `$ref`, in document order.
    pub mapping: &'a IndexMap<String, String>,
}

/// Where a mapped child sits inside a discriminated union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorChild {
    /// The child `$ref` target.
    pub reference: String,
    /// The discriminant value selecting this child.
    pub discriminant: String,
    /// The discriminant property name (from the parent).
    pub property_name: String,
    /// Name of the parent schema.
    pub parent_name: String,
}

/// Precomputed parent/child mapping for one schema dictionary.
#[derive(Debug, Clone, Default)]
pub struct DiscriminatorIndex<'a> {
    /// Every complete discriminator parent, in dictionary order.
    pub parents: Vec<DiscriminatorParent<'a>>,
    children: IndexMap<String, DiscriminatorChild>,
}

impl<'a> DiscriminatorIndex<'a> {
    /// Walks `schemas` once, collecting parents and their mapped children.
    ///
    /// A `discriminator` without `mapping` or without `oneOf`/`anyOf` is
    /// reported and skipped. A mapping whose entry count differs from the
    /// child count, or a child mapped from two parents, aborts the
    /// document.
    pub fn build(
        schemas: &'a SchemaDictionary,
        warnings: &mut Vec<Warning>,
    ) -> AppResult<Self> {
        let mut index = Self::default();

        for (name, entry) in schemas {
            let RefOr::Item(schema) = entry else { continue };
            let Some(discriminator) = &schema.discriminator else {
                continue;
            };
            let children = schema.one_of.as_ref().or(schema.any_of.as_ref());
            let (Some(mapping), Some(children)) = (&discriminator.mapping, children) else {
                warnings.push(Warning::IncompleteDiscriminator {
                    schema: name.clone(),
                });
                continue;
            };
            if mapping.len() != children.len() {
                return Err(AppError::DiscriminatorMappingMismatch {
                    schema: name.clone(),
                    mapping_len: mapping.len(),
                    children_len: children.len(),
                });
            }

            for (discriminant, reference) in mapping {
                if let Some(existing) = index.children.get(reference) {
                    return Err(AppError::DuplicateDiscriminatorChild {
                        reference: reference.clone(),
                        first_parent: existing.parent_name.clone(),
                        second_parent: name.clone(),
                    });
                }
                index.children.insert(
                    reference.clone(),
                    DiscriminatorChild {
                        reference: reference.clone(),
                        discriminant: discriminant.clone(),
                        property_name: discriminator.property_name.clone(),
                        parent_name: name.clone(),
                    },
                );
            }

            index.parents.push(DiscriminatorParent {
                name,
                schema,
                property_name: &discriminator.property_name,
                mapping,
            });
        }

        Ok(index)
    }

    /// Returns the child record for a dictionary entry, when the entry is
    /// the target of some parent's mapping.
    pub fn child_of(&self, name: &str) -> Option<&DiscriminatorChild> {
        self.children
            .get(&format!("{}{}", SCHEMAS_REF_PREFIX, name))
    }
}

/// Dotted path to a synthesized parent shape.
pub fn parent_schema_ref(name: &str) -> String {
    format!("_parent_schema_definition.{}", identifier(name))
}

/// Emits the `_parent_schema_definition` namespace.
///
/// Each parent interface is the parent's object shape with its
/// discriminator property narrowed to the literal union of the mapping
/// keys, followed by the remaining declared properties.
pub fn generate_parent_schema_definition(parents: &[DiscriminatorParent<'_>]) -> AppResult<String> {
    let mut interfaces = Vec::with_capacity(parents.len());
    for parent in parents {
        let narrowed = SchemaObject {
            schema_type: Some("string".to_string()),
            enum_values: Some(
                parent
                    .mapping
                    .keys()
                    .map(|key| serde_json::Value::String(key.clone()))
                    .collect(),
            ),
            ..Default::default()
        };

        let mut properties: IndexMap<String, RefOr<SchemaObject>> = IndexMap::new();
        properties.insert(parent.property_name.to_string(), RefOr::Item(narrowed));
        if let Some(declared) = &parent.schema.properties {
            for (key, prop) in declared {
                if key != parent.property_name {
                    properties.insert(key.clone(), prop.clone());
                }
            }
        }

        let shape = SchemaObject {
            properties: Some(properties),
            ..parent.schema.clone()
        };
        interfaces.push(format!(
            "export interface {} {}",
            identifier(parent.name),
            get_object(&shape)?
        ));
    }

    Ok(format!(
        "namespace _parent_schema_definition {{\n{}\n}}\n\n",
        add_indent_level(&interfaces.join("\n"))
    ))
}

/// Resolves a discriminator child into its intersection expression.
///
/// The first member pins the discriminant field to its literal value.
/// An `allOf` arm referencing the parent resolves to the synthesized
/// parent shape; inline arms have the child's `required` list merged in
/// so inherited required fields survive.
pub fn generate_child_expression(
    schema: &SchemaObject,
    child: &DiscriminatorChild,
) -> AppResult<String> {
    let mut members = vec![format!(
        "\n{{ readonly {}: {} }}",
        format_key(&child.property_name),
        format_string(&child.discriminant)
    )];

    match &schema.all_of {
        None => members.push(get_scalar(schema)?),
        Some(arms) => {
            let parent_ref_path = format!("{}{}", SCHEMAS_REF_PREFIX, child.parent_name);
            for arm in arms {
                members.push(match arm {
                    RefOr::Ref(reference) if reference.ref_path == parent_ref_path => {
                        parent_schema_ref(&child.parent_name)
                    }
                    RefOr::Ref(_) => resolve_value(arm)?,
                    RefOr::Item(inline) => {
                        let mut required =
                            inline.required.clone().unwrap_or_default();
                        required.extend(schema.required.clone().unwrap_or_default());
                        get_scalar(&SchemaObject {
                            required: Some(required),
                            ..inline.clone()
                        })?
                    }
                });
            }
        }
    }

    Ok(intersection_type(&members))
}
