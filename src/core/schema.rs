//! Response-shape descriptors.
//!
//! A [`SchemaDescriptor`] plays two roles: it is forwarded to the provider as a
//! response-format constraint, and it is used to validate whatever JSON comes
//! back before the gateway hands it to the caller.

use schemars::{JsonSchema, schema_for};
use serde_json::{Map, Value, json};

use super::error::GatewayError;

/// Guards `$ref` resolution against self-referential schemas.
const MAX_REF_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
}

impl SchemaKind {
    /// Name used by the provider's `responseSchema.type` field.
    pub fn provider_name(&self) -> &'static str {
        match self {
            SchemaKind::Object => "OBJECT",
            SchemaKind::Array => "ARRAY",
            SchemaKind::String => "STRING",
            SchemaKind::Integer => "INTEGER",
            SchemaKind::Number => "NUMBER",
            SchemaKind::Boolean => "BOOLEAN",
        }
    }

    fn from_json_type(name: &str) -> Option<Self> {
        match name {
            "object" => Some(SchemaKind::Object),
            "array" => Some(SchemaKind::Array),
            "string" => Some(SchemaKind::String),
            "integer" => Some(SchemaKind::Integer),
            "number" => Some(SchemaKind::Number),
            "boolean" => Some(SchemaKind::Boolean),
            _ => None,
        }
    }

    fn is_scalar(&self) -> bool {
        !matches!(self, SchemaKind::Object | SchemaKind::Array)
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
        };
        write!(f, "{name}")
    }
}

/// Recursive description of an expected JSON shape.
///
/// Object properties keep their declaration order, which is also the order
/// the provider is asked to emit them in.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    kind: SchemaKind,
    description: Option<String>,
    properties: Vec<(String, SchemaDescriptor)>,
    required: Vec<String>,
    items: Option<Box<SchemaDescriptor>>,
}

impl SchemaDescriptor {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            properties: Vec::new(),
            required: Vec::new(),
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn object() -> Self {
        Self::new(SchemaKind::Object)
    }

    pub fn array(items: SchemaDescriptor) -> Self {
        Self::new(SchemaKind::Array).with_items(items)
    }

    pub fn with_items(mut self, items: SchemaDescriptor) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare an optional property. Redeclaring a name replaces its schema.
    pub fn property(mut self, name: impl Into<String>, schema: SchemaDescriptor) -> Self {
        let name = name.into();
        match self.properties.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = schema,
            None => self.properties.push((name, schema)),
        }
        self
    }

    pub fn required_property(self, name: impl Into<String>, schema: SchemaDescriptor) -> Self {
        let name = name.into();
        let mut this = self.property(name.clone(), schema);
        this.mark_required(name);
        this
    }

    /// Mark a name as required without declaring it. `validate_definition`
    /// rejects names that never get a matching property.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.mark_required(name.into());
        self
    }

    fn mark_required(&mut self, name: String) {
        if !self.required.contains(&name) {
            self.required.push(name);
        }
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &SchemaDescriptor)> {
        self.properties
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn property_schema(&self, name: &str) -> Option<&SchemaDescriptor> {
        self.properties
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, schema)| schema)
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }

    pub fn items(&self) -> Option<&SchemaDescriptor> {
        self.items.as_deref()
    }

    /// Check that the descriptor itself is usable: objects declare at least
    /// one property and only require declared ones, arrays describe their items.
    pub fn validate_definition(&self) -> Result<(), GatewayError> {
        self.check_definition("$")
    }

    fn check_definition(&self, path: &str) -> Result<(), GatewayError> {
        match self.kind {
            SchemaKind::Object => {
                if self.properties.is_empty() {
                    return Err(GatewayError::invalid_schema(
                        path,
                        "object schema declares no properties",
                    ));
                }
                if let Some(unknown) = self
                    .required
                    .iter()
                    .find(|name| self.property_schema(name).is_none())
                {
                    return Err(GatewayError::invalid_schema(
                        path,
                        format!("required field '{unknown}' is not a declared property"),
                    ));
                }
                for (name, schema) in &self.properties {
                    schema.check_definition(&format!("{path}.{name}"))?;
                }
                Ok(())
            }
            SchemaKind::Array => match &self.items {
                Some(items) => items.check_definition(&format!("{path}[]")),
                None => Err(GatewayError::invalid_schema(
                    path,
                    "array schema has no items descriptor",
                )),
            },
            _ => {
                if !self.properties.is_empty() || self.items.is_some() {
                    return Err(GatewayError::invalid_schema(
                        path,
                        format!("{} schema cannot carry properties or items", self.kind),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Check a parsed response against this descriptor.
    ///
    /// Optional properties may be absent or `null`; properties the descriptor
    /// does not mention are ignored.
    pub fn validate_value(&self, value: &Value) -> Result<(), GatewayError> {
        self.check_value(value, "$")
    }

    fn check_value(&self, value: &Value, path: &str) -> Result<(), GatewayError> {
        let matches_kind = match self.kind {
            SchemaKind::Object => value.is_object(),
            SchemaKind::Array => value.is_array(),
            SchemaKind::String => value.is_string(),
            SchemaKind::Integer => value.is_i64() || value.is_u64(),
            SchemaKind::Number => value.is_number(),
            SchemaKind::Boolean => value.is_boolean(),
        };
        if !matches_kind {
            return Err(GatewayError::malformed(format!(
                "expected {} at {path}, found {}",
                self.kind,
                json_kind(value)
            )));
        }

        if let Value::Object(fields) = value {
            for (name, schema) in &self.properties {
                let field_path = format!("{path}.{name}");
                match fields.get(name) {
                    None | Some(Value::Null) => {
                        if self.is_required(name) {
                            return Err(GatewayError::malformed(format!(
                                "missing required field {field_path}"
                            )));
                        }
                    }
                    Some(field) => schema.check_value(field, &field_path)?,
                }
            }
        }

        if let (Value::Array(elements), Some(items)) = (value, &self.items) {
            for (index, element) in elements.iter().enumerate() {
                items.check_value(element, &format!("{path}[{index}]"))?;
            }
        }

        Ok(())
    }

    /// Render the descriptor in the provider's `responseSchema` dialect.
    pub fn to_provider_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!(self.kind.provider_name()));

        if let Some(description) = &self.description {
            schema.insert("description".to_string(), json!(description));
        }

        if self.kind == SchemaKind::Object {
            let properties: Map<String, Value> = self
                .properties
                .iter()
                .map(|(name, property)| (name.clone(), property.to_provider_schema()))
                .collect();
            let ordering: Vec<&str> = self.properties.iter().map(|(name, _)| name.as_str()).collect();

            schema.insert("properties".to_string(), Value::Object(properties));
            schema.insert("propertyOrdering".to_string(), json!(ordering));
            if !self.required.is_empty() {
                schema.insert("required".to_string(), json!(self.required));
            }
        }

        if let Some(items) = &self.items {
            schema.insert("items".to_string(), items.to_provider_schema());
        }

        Value::Object(schema)
    }

    /// Derive a descriptor from the JSON Schema `schemars` generates for `T`.
    pub fn for_type<T: JsonSchema>() -> Result<Self, GatewayError> {
        let schema = schema_for!(T);
        Self::from_json_schema(schema.as_value())
    }

    /// Convert a JSON Schema document into a descriptor.
    ///
    /// Supports local `$ref`s into `$defs`/`definitions`, `type` arrays and
    /// `anyOf`/`oneOf` unions that only add `null`, and string enums. The
    /// result must pass [`validate_definition`](Self::validate_definition).
    pub fn from_json_schema(document: &Value) -> Result<Self, GatewayError> {
        let descriptor = convert_json_schema(document, document, "$", 0)?;
        descriptor.validate_definition()?;
        Ok(descriptor)
    }
}

fn convert_json_schema(
    node: &Value,
    root: &Value,
    path: &str,
    depth: usize,
) -> Result<SchemaDescriptor, GatewayError> {
    if depth > MAX_REF_DEPTH {
        return Err(GatewayError::invalid_schema(
            path,
            "schema references nest too deeply (recursive type?)",
        ));
    }

    let node_map = node
        .as_object()
        .ok_or_else(|| GatewayError::invalid_schema(path, "schema node is not an object"))?;
    let description = node_map
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut descriptor = if let Some(reference) = node_map.get("$ref").and_then(Value::as_str) {
        let target = resolve_reference(reference, root, path)?;
        convert_json_schema(target, root, path, depth + 1)?
    } else if let Some(branches) = node_map
        .get("anyOf")
        .or_else(|| node_map.get("oneOf"))
        .and_then(Value::as_array)
    {
        convert_union(branches, root, path, depth)?
    } else {
        let kind = declared_kind(node_map, path)?;
        convert_typed(kind, node_map, root, path, depth)?
    };

    if description.is_some() {
        descriptor.description = description;
    }
    Ok(descriptor)
}

fn resolve_reference<'a>(
    reference: &str,
    root: &'a Value,
    path: &str,
) -> Result<&'a Value, GatewayError> {
    reference
        .strip_prefix('#')
        .and_then(|pointer| root.pointer(pointer))
        .ok_or_else(|| {
            GatewayError::invalid_schema(path, format!("cannot resolve reference '{reference}'"))
        })
}

fn convert_union(
    branches: &[Value],
    root: &Value,
    path: &str,
    depth: usize,
) -> Result<SchemaDescriptor, GatewayError> {
    let mut converted = branches
        .iter()
        .filter(|branch| !is_null_schema(branch))
        .map(|branch| convert_json_schema(branch, root, path, depth + 1))
        .collect::<Result<Vec<_>, _>>()?;

    match converted.len() {
        0 => Err(GatewayError::invalid_schema(path, "union has no non-null branch")),
        1 => Ok(converted.remove(0)),
        _ => {
            // Documented enum variants come out as one `const` branch each.
            let kind = converted[0].kind;
            if kind.is_scalar() && converted.iter().all(|branch| branch.kind == kind) {
                Ok(SchemaDescriptor::new(kind))
            } else {
                Err(GatewayError::invalid_schema(
                    path,
                    "unions of different shapes are not supported",
                ))
            }
        }
    }
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

fn declared_kind(node: &Map<String, Value>, path: &str) -> Result<SchemaKind, GatewayError> {
    let type_name = match node.get("type") {
        Some(Value::String(name)) => name.as_str(),
        Some(Value::Array(names)) => {
            let mut non_null = names
                .iter()
                .filter_map(Value::as_str)
                .filter(|name| *name != "null");
            match (non_null.next(), non_null.next()) {
                (Some(name), None) => name,
                _ => {
                    return Err(GatewayError::invalid_schema(
                        path,
                        "type lists must name exactly one non-null type",
                    ));
                }
            }
        }
        Some(_) => return Err(GatewayError::invalid_schema(path, "malformed 'type' keyword")),
        None if node.contains_key("properties") => "object",
        None if node.contains_key("items") => "array",
        None => return Err(GatewayError::invalid_schema(path, "schema has no 'type'")),
    };

    SchemaKind::from_json_type(type_name).ok_or_else(|| {
        GatewayError::invalid_schema(path, format!("unsupported type '{type_name}'"))
    })
}

fn convert_typed(
    kind: SchemaKind,
    node: &Map<String, Value>,
    root: &Value,
    path: &str,
    depth: usize,
) -> Result<SchemaDescriptor, GatewayError> {
    let mut descriptor = SchemaDescriptor::new(kind);

    match kind {
        SchemaKind::Object => {
            if let Some(properties) = node.get("properties").and_then(Value::as_object) {
                for (name, property) in properties {
                    let property_path = format!("{path}.{name}");
                    let schema = convert_json_schema(property, root, &property_path, depth + 1)?;
                    descriptor = descriptor.property(name.clone(), schema);
                }
            }
            if let Some(required) = node.get("required").and_then(Value::as_array) {
                for name in required.iter().filter_map(Value::as_str) {
                    descriptor.mark_required(name.to_string());
                }
            }
        }
        SchemaKind::Array => {
            let items = node.get("items").ok_or_else(|| {
                GatewayError::invalid_schema(path, "array schema has no 'items'")
            })?;
            descriptor.items = Some(Box::new(convert_json_schema(
                items,
                root,
                &format!("{path}[]"),
                depth + 1,
            )?));
        }
        _ => {}
    }

    Ok(descriptor)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
