//! Declarative argument schemas and validation.
//!
//! Every tool declares the shape of its arguments as a [`ToolSchema`]: an
//! ordered set of field descriptors with a kind, a required flag, an optional
//! default, and an optional nested schema for object and array-of-object
//! fields. [`validate`] checks a raw JSON payload against the schema and
//! produces a [`ValidatedArgs`] bag or a [`ValidationError`] pointing at the
//! offending field with a dotted path (`address.zipcode`, `people[1]`).
//!
//! Validation is a pure function of its inputs; defaults declared on the
//! schema are the only values it ever adds.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Primitive kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Array,
    Object,
}

impl FieldKind {
    /// JSON Schema / error-message name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

/// Descriptor for a single schema field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub description: Option<String>,
    /// Substituted when an optional field is absent.
    pub default: Option<Value>,
    /// Element/field schema for object and array-of-object fields.
    pub nested: Option<ToolSchema>,
    /// Element kind for arrays of primitives.
    pub items: Option<FieldKind>,
}

impl FieldSpec {
    /// Create a required field.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(name, kind, true)
    }

    /// Create an optional field.
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self::new(name, kind, false)
    }

    fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
            description: None,
            default: None,
            nested: None,
            items: None,
        }
    }

    /// Attach a human-readable description, surfaced in `tools/list`.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Declare a default value for an absent optional field.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Declare the nested schema of an object or array-of-object field.
    pub fn nested(mut self, schema: ToolSchema) -> Self {
        self.nested = Some(schema);
        self
    }

    /// Declare the element kind of an array-of-primitives field.
    pub fn items(mut self, kind: FieldKind) -> Self {
        self.items = Some(kind);
        self
    }
}

/// Ordered set of field descriptors declared by a tool.
#[derive(Debug, Clone, Default)]
pub struct ToolSchema {
    fields: Vec<FieldSpec>,
}

impl ToolSchema {
    /// Create an empty schema (a tool taking no arguments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field descriptor.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Iterate the declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Return the first duplicated field name, recursing into nested
    /// schemas. Registration rejects schemas where this is `Some`.
    pub fn duplicate_field(&self) -> Option<String> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Some(field.name.clone());
            }
            if let Some(nested) = &field.nested {
                if let Some(dup) = nested.duplicate_field() {
                    return Some(format!("{}.{}", field.name, dup));
                }
            }
        }
        None
    }

    /// Render this schema as a JSON Schema object for `tools/list`.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut prop = Map::new();
            prop.insert("type".to_string(), Value::String(field.kind.name().into()));
            if let Some(desc) = &field.description {
                prop.insert("description".to_string(), Value::String(desc.clone()));
            }
            if let Some(default) = &field.default {
                prop.insert("default".to_string(), default.clone());
            }
            match field.kind {
                FieldKind::Object => {
                    if let Some(nested) = &field.nested {
                        let nested_schema = nested.to_json_schema();
                        if let Value::Object(nested_obj) = nested_schema {
                            for (k, v) in nested_obj {
                                if k != "type" {
                                    prop.insert(k, v);
                                }
                            }
                        }
                    }
                }
                FieldKind::Array => {
                    if let Some(nested) = &field.nested {
                        prop.insert("items".to_string(), nested.to_json_schema());
                    } else if let Some(items) = field.items {
                        prop.insert(
                            "items".to_string(),
                            serde_json::json!({"type": items.name()}),
                        );
                    }
                }
                _ => {}
            }
            properties.insert(field.name.clone(), Value::Object(prop));
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": Value::Object(properties),
            "required": Value::Array(required),
        })
    }
}

/// A validation failure, pointing at the offending field.
///
/// Nested failures carry a dotted path (`address.zipcode`); array element
/// failures carry an index (`people[1]`).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },
}

impl ValidationError {
    fn missing(path: &str, name: &str) -> Self {
        Self::MissingField {
            field: join_path(path, name),
        }
    }

    fn mismatch(field: impl Into<String>, expected: &str, actual: &Value) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.to_string(),
            actual: json_type_name(actual).to_string(),
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed argument bag produced by a successful validation.
///
/// Contains every declared field that was present (or defaulted); undeclared
/// keys are dropped, absent optionals without a default are omitted.
#[derive(Debug, Clone, Default)]
pub struct ValidatedArgs {
    values: Map<String, Value>,
}

impl ValidatedArgs {
    /// Look up a validated field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Deserialize the whole bag into a typed parameter struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.values.clone()))
    }

    /// Consume the bag as a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// Validate a raw argument payload against a schema.
///
/// Pure: no side effects, same output for the same inputs.
pub fn validate(schema: &ToolSchema, raw: &Value) -> Result<ValidatedArgs, ValidationError> {
    let empty = Map::new();
    let object = match raw {
        Value::Object(map) => map,
        // Absent params arrive as null; treat as an empty bag.
        Value::Null => &empty,
        other => return Err(ValidationError::mismatch("arguments", "object", other)),
    };
    let values = validate_object(schema, object, "")?;
    Ok(ValidatedArgs { values })
}

fn validate_object(
    schema: &ToolSchema,
    object: &Map<String, Value>,
    path: &str,
) -> Result<Map<String, Value>, ValidationError> {
    let mut out = Map::new();

    for field in schema.fields() {
        let field_path = join_path(path, &field.name);
        match object.get(&field.name) {
            Some(value) => {
                let checked = validate_field(field, value, &field_path)?;
                out.insert(field.name.clone(), checked);
            }
            None if field.required => {
                return Err(ValidationError::missing(path, &field.name));
            }
            None => {
                if let Some(default) = &field.default {
                    out.insert(field.name.clone(), default.clone());
                }
            }
        }
    }

    Ok(out)
}

fn validate_field(
    field: &FieldSpec,
    value: &Value,
    path: &str,
) -> Result<Value, ValidationError> {
    if !field.kind.matches(value) {
        return Err(ValidationError::mismatch(path, field.kind.name(), value));
    }

    match field.kind {
        FieldKind::Object => {
            match (&field.nested, value) {
                (Some(nested), Value::Object(object)) => {
                    let checked = validate_object(nested, object, path)?;
                    Ok(Value::Object(checked))
                }
                _ => Ok(value.clone()),
            }
        }
        FieldKind::Array => {
            let elements = value.as_array().cloned().unwrap_or_default();
            let mut out = Vec::with_capacity(elements.len());
            for (index, element) in elements.iter().enumerate() {
                let element_path = format!("{}[{}]", path, index);
                if let Some(nested) = &field.nested {
                    let object = match element {
                        Value::Object(map) => map.clone(),
                        other => {
                            return Err(ValidationError::mismatch(element_path, "object", other))
                        }
                    };
                    let checked = validate_object(nested, &object, &element_path)?;
                    out.push(Value::Object(checked));
                } else if let Some(items) = field.items {
                    if !items.matches(element) {
                        return Err(ValidationError::mismatch(
                            element_path,
                            items.name(),
                            element,
                        ));
                    }
                    out.push(element.clone());
                } else {
                    out.push(element.clone());
                }
            }
            Ok(Value::Array(out))
        }
        _ => Ok(value.clone()),
    }
}
