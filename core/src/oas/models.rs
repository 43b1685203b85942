#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Shim definitions of the OpenAPI objects the generator reads.
//!
//! All mappings are `IndexMap` so iteration follows document order; the
//! output must be byte-identical across runs for identical input. Unknown
//! keys are ignored on deserialization, so documents richer than this
//! subset still parse.

use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The reference prefix this compiler can resolve.
pub const SCHEMAS_REF_PREFIX: &str = "#/components/schemas/";

/// A `$ref` pointer object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceObject {
    /// The reference target, e.g. `#/components/schemas/Pet`.
    #[serde(rename = "$ref")]
    pub ref_path: String,
}

impl ReferenceObject {
    /// Returns the schema name when the reference targets
    /// `#/components/schemas/`.
    pub fn schema_name(&self) -> Option<&str> {
        self.ref_path.strip_prefix(SCHEMAS_REF_PREFIX)
    }
}

/// Either a `$ref` pointer or an inline object.
///
/// The `Ref` arm is listed first so an object carrying `$ref` always
/// deserializes as a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A `$ref` pointer.
    Ref(ReferenceObject),
    /// An inline object.
    Item(T),
}

/// The `additionalProperties` keyword: a boolean flag or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `additionalProperties: true` / `additionalProperties: false`.
    Flag(bool),
    /// A schema constraining the extra properties.
    Schema(Box<RefOr<SchemaObject>>),
}

/// An OpenAPI `Discriminator Object`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscriminatorObject {
    /// The property holding the discriminant value.
    pub property_name: String,
    /// Discriminant value to child `$ref`, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<IndexMap<String, String>>,
}

/// An OpenAPI `Schema Object` (the subset this compiler resolves).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaObject {
    /// The `type` keyword (`string`, `number`, `object`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// The `format` facet, emitted into JSDoc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Free-form description, emitted into JSDoc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Single example value, emitted into JSDoc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// `nullable: true` widens the resolved type with `| null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// The `enum` facet; values keep their document order.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Names of required properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Declared properties, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, RefOr<SchemaObject>>>,
    /// The `additionalProperties` keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
    /// Item schema for arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RefOr<SchemaObject>>>,
    /// `oneOf` union members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<RefOr<SchemaObject>>>,
    /// `anyOf` union members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<RefOr<SchemaObject>>>,
    /// `allOf` intersection members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<RefOr<SchemaObject>>>,
    /// Polymorphism discriminator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<DiscriminatorObject>,
}

impl SchemaObject {
    /// Whether this schema has a declarable member list.
    ///
    /// Mirrors the truthiness of `properties ?? additionalProperties`:
    /// a declared (even empty) `properties` map counts, and so does
    /// `additionalProperties` unless it is the literal `false`.
    pub fn has_members(&self) -> bool {
        self.properties.is_some() || self.has_additional_properties()
    }

    /// Whether `additionalProperties` contributes an index signature.
    pub fn has_additional_properties(&self) -> bool {
        matches!(
            self.additional_properties,
            Some(AdditionalProperties::Flag(true)) | Some(AdditionalProperties::Schema(_))
        )
    }

    /// Whether `nullable: true` is set.
    pub fn is_nullable(&self) -> bool {
        self.nullable == Some(true)
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// A `{placeholder}` in the URL path.
    Path,
    /// A query-string parameter.
    Query,
    /// A request header.
    Header,
    /// A cookie value.
    Cookie,
}

/// An OpenAPI `Parameter Object`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterObject {
    /// Name of the parameter.
    pub name: String,
    /// Location of the parameter.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Schema definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<SchemaObject>>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An OpenAPI `Media Type Object` (the schema slot only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaTypeObject {
    /// Schema of the payload for this media type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<SchemaObject>>,
}

/// An OpenAPI `Request Body Object`, keeping the raw JSON alongside the
/// typed view.
///
/// The raw value is re-emitted verbatim as the `requestBody` const so
/// consumers can distinguish a required body from an optional one (and
/// read any field we do not model). Serialization always round-trips the
/// raw form.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodyObject {
    /// Raw JSON representation, as parsed from the document.
    pub raw: Value,
    /// Whether the body is required.
    pub required: bool,
    /// Payload schemas keyed by media type, in document order.
    pub content: Option<IndexMap<String, MediaTypeObject>>,
}

/// Typed fields extracted from a request body, used by the custom
/// `Deserialize` below.
#[derive(Deserialize)]
struct RequestBodyFields {
    #[serde(default)]
    required: bool,
    content: Option<IndexMap<String, MediaTypeObject>>,
}

impl<'de> Deserialize<'de> for RequestBodyObject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let fields: RequestBodyFields = serde_json::from_value(raw.clone())
            .map_err(|e| DeError::custom(format!("Failed to parse request body: {}", e)))?;
        Ok(Self {
            raw,
            required: fields.required,
            content: fields.content,
        })
    }
}

impl Serialize for RequestBodyObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

/// An OpenAPI `Response Object`.
///
/// A `$ref` response deserializes with every modeled field absent and is
/// treated as a response without content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Payload schemas keyed by media type, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaTypeObject>>,
}

/// An OpenAPI `Operation Object`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationObject {
    /// Unique operation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Declared parameters (inline or `$ref`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<ParameterObject>>,
    /// Request body (inline or `$ref`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RefOr<RequestBodyObject>>,
    /// Responses keyed by status code, in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseObject>,
}

/// The fixed HTTP verb set an operation can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `get`
    Get,
    /// `put`
    Put,
    /// `post`
    Post,
    /// `delete`
    Delete,
    /// `options`
    Options,
    /// `head`
    Head,
    /// `patch`
    Patch,
    /// `trace`
    Trace,
}

impl HttpMethod {
    /// Every verb, in the order operations are flattened.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// The lowercase wire name of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

/// A Path Item containing operations for one URL template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItemObject {
    /// GET operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<OperationObject>,
    /// PUT operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<OperationObject>,
    /// POST operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<OperationObject>,
    /// DELETE operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<OperationObject>,
    /// OPTIONS operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OperationObject>,
    /// HEAD operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<OperationObject>,
    /// PATCH operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<OperationObject>,
    /// TRACE operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<OperationObject>,
}

impl PathItemObject {
    /// Returns the operation bound to `method`, when declared.
    pub fn operation(&self, method: HttpMethod) -> Option<&OperationObject> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }
}

/// The `components` object (only `schemas` is read).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentsObject {
    /// Component schemas keyed by name, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<SchemaDictionary>,
}

/// The component schema dictionary.
pub type SchemaDictionary = IndexMap<String, RefOr<SchemaObject>>;

/// A parsed OpenAPI document (the slice this compiler reads).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiObject {
    /// Path items keyed by URL template, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItemObject>,
    /// Reusable components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentsObject>,
}

impl OpenApiObject {
    /// Returns the component schema dictionary, when declared.
    pub fn component_schemas(&self) -> Option<&SchemaDictionary> {
        self.components.as_ref().and_then(|c| c.schemas.as_ref())
    }
}
