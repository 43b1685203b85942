#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Every variant except `Io` and `General` is a fatal compilation error:
//! it aborts generation for the offending document and is surfaced to the
//! caller with enough context to locate the schema or operation at fault.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A `$ref` pointing anywhere but `#/components/schemas/`.
    #[from(ignore)]
    #[display("unsupported reference '{_0}': only '#/components/schemas/' targets are resolvable")]
    UnsupportedReference(String),

    /// An array schema without an `items` sub-schema.
    #[display("array schemas must declare an `items` sub-schema")]
    MissingItems,

    /// An object schema queried for its member list while declaring
    /// neither `properties` nor `additionalProperties`.
    #[display("object schema declares neither `properties` nor `additionalProperties`")]
    MissingProperties,

    /// A schema whose `type` keyword is missing or not one of the
    /// recognized scalar/composite values.
    #[from(ignore)]
    #[display("unknown schema type '{type_name}' in {node}")]
    UnknownSchemaType {
        /// The offending `type` value, or `<none>` when absent.
        type_name: String,
        /// JSON rendition of the offending schema node, for diagnostics.
        node: String,
    },

    /// A discriminator whose `mapping` entry count differs from its
    /// `oneOf`/`anyOf` child count. A silent mismatch would produce a
    /// type-unsafe discriminated union, so this is never recoverable.
    #[from(ignore)]
    #[display(
        "schema '{schema}': discriminator mapping has {mapping_len} entries but {children_len} children"
    )]
    DiscriminatorMappingMismatch {
        /// Name of the parent schema.
        schema: String,
        /// Number of `mapping` entries.
        mapping_len: usize,
        /// Number of `oneOf`/`anyOf` children.
        children_len: usize,
    },

    /// A schema referenced as a discriminator child from two parents.
    #[from(ignore)]
    #[display(
        "schema '{reference}' is a discriminator child of both '{first_parent}' and '{second_parent}'"
    )]
    DuplicateDiscriminatorChild {
        /// The child `$ref` target.
        reference: String,
        /// The parent that mapped it first.
        first_parent: String,
        /// The parent that mapped it again.
        second_parent: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversion() {
        let app_err: AppError = String::from("something wrong").into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_unsupported_reference_display() {
        let err = AppError::UnsupportedReference("#/components/parameters/Limit".into());
        assert!(format!("{}", err).contains("#/components/parameters/Limit"));
    }

    #[test]
    fn test_mapping_mismatch_display() {
        let err = AppError::DiscriminatorMappingMismatch {
            schema: "Pet".into(),
            mapping_len: 1,
            children_len: 2,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Pet"));
        assert!(msg.contains("1 entries"));
        assert!(msg.contains("2 children"));
    }
}
