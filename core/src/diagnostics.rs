#![deny(missing_docs)]

//! # Diagnostics
//!
//! Non-fatal issues found during generation.
//!
//! Generators return structured warnings alongside their output text
//! instead of logging them, so callers decide how to surface them. The
//! CLI prints them to stderr; library consumers can inspect them.

use derive_more::Display;

/// A non-fatal issue encountered while generating declarations.
///
/// Warnings never stop generation: the affected operation or schema is
/// still emitted with a best-effort shape.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Warning {
    /// A declared path-location parameter whose name never appears in the
    /// URL template. The parameter is still emitted, and the operation's
    /// `Parameter` alias carries a FIXME marker.
    #[display(
        "operation '{operation_id}' ({url}): path parameters [{}] never appear in the URL template",
        names.join(", ")
    )]
    ConflictingPathParameters {
        /// The operation's `operationId`.
        operation_id: String,
        /// The raw URL template.
        url: String,
        /// Names of the conflicting parameters.
        names: Vec<String>,
    },

    /// A URL template placeholder with no matching declared path
    /// parameter. A fallback `string | number` field is synthesized.
    #[display(
        "operation '{operation_id}' ({url}): URL template variables [{}] have no declared parameter",
        names.join(", ")
    )]
    FreePathVariables {
        /// The operation's `operationId`.
        operation_id: String,
        /// The raw URL template.
        url: String,
        /// Names of the unbound placeholders.
        names: Vec<String>,
    },

    /// A `$ref` parameter object, which this compiler does not resolve.
    /// The parameter is dropped from the generated declarations.
    #[display("operation '{operation_id}': parameter reference '{reference}' was dropped")]
    ReferenceParameterDropped {
        /// The operation's `operationId`.
        operation_id: String,
        /// The unresolved `$ref` target.
        reference: String,
    },

    /// A schema carrying `discriminator` without a `mapping` or without
    /// `oneOf`/`anyOf` children. It is treated as a plain schema.
    #[display(
        "schema '#/components/schemas/{schema}' is discriminator, but lacks discriminator.mapping or oneOf"
    )]
    IncompleteDiscriminator {
        /// Name of the schema.
        schema: String,
    },
}

/// Output of one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Generated {
    /// The generated TypeScript declaration text.
    pub text: String,
    /// Non-fatal issues encountered while generating `text`.
    pub warnings: Vec<Warning>,
}

impl Generated {
    /// Builds a `Generated` from its parts.
    pub fn new(text: String, warnings: Vec<Warning>) -> Self {
        Self { text, warnings }
    }
}
