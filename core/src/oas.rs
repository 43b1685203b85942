#![deny(missing_docs)]

//! # OpenAPI Object Model
//!
//! Serde "shim" structures for the OpenAPI 3.x subset this compiler
//! consumes. We deliberately model the document ourselves instead of
//! pulling a full OpenAPI crate: the compiler reads a small slice of the
//! object model, must preserve document ordering everywhere, and needs to
//! keep some objects as raw JSON for verbatim re-emission.

pub mod models;

pub use models::{
    AdditionalProperties, ComponentsObject, DiscriminatorObject, HttpMethod, MediaTypeObject,
    OpenApiObject, OperationObject, ParameterLocation, ParameterObject, PathItemObject, RefOr,
    ReferenceObject, RequestBodyObject, ResponseObject, SchemaDictionary, SchemaObject,
};
