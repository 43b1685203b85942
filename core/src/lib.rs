#![deny(missing_docs)]

//! # tsgen-core
//!
//! Compiles OpenAPI 3.x documents into TypeScript declaration text:
//! one `schemas` namespace of type declarations per document, one
//! `paths` namespace of per-operation request metadata, and a
//! cross-document `OpenApiOperationsDictionary` tying them together.
//!
//! The output is plain declaration text. Consumers format it and feed
//! it to their own toolchain; nothing here touches the filesystem.
//!
//! Entry points: [`document::parse_document`],
//! [`document::generate_openapi_definition`] and
//! [`document::generate_all_api`]. The lower-level generators in
//! [`schemas`], [`paths`] and [`resolver`] are exported for callers
//! that need a single fragment.

pub mod diagnostics;
pub mod discriminator;
pub mod document;
pub mod emit;
pub mod error;
pub mod ident;
pub mod oas;
pub mod paths;
pub mod resolver;
pub mod schemas;
pub mod url_template;

pub use diagnostics::{Generated, Warning};
pub use document::{
    generate_all_api, generate_openapi_definition, parse_document, ApiDocument,
    ApiDocumentWithObject, ConfigFile,
};
pub use error::{AppError, AppResult};
pub use oas::OpenApiObject;
