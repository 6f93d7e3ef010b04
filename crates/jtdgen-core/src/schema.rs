//! In-memory JSON Type Definition schema model.
//!
//! The model is what the generator consumes: a set of named [`Definition`]s
//! stored in an arena indexed by [`DefId`], plus an optional root schema.
//!
//! # Loading
//!
//! [`SchemaModel::from_json`] lowers a JTD document into the model through
//! serde. It rejects documents that mix forms or misuse keywords, but it does
//! not resolve refs: a dangling ref surfaces from the type mapper as
//! [`CodegenError::UnresolvedReference`] so the error names the definition it
//! was found in.
//!
//! ```
//! use jtdgen_core::schema::{Form, SchemaModel};
//!
//! let model = SchemaModel::from_json(r#"{
//!     "definitions": {
//!         "Bar": { "properties": {} },
//!         "Foo": { "ref": "Bar" }
//!     }
//! }"#).unwrap();
//!
//! let foo = model.definition("Foo").unwrap();
//! assert_eq!(model.get(foo).schema.form, Form::Ref("Bar".to_string()));
//! ```

use crate::error::{CodegenError, CodegenResult};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Arena index of a definition within a [`SchemaModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefId(usize);

impl DefId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// JTD primitive `type` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    String,
    Timestamp,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl Primitive {
    /// Parse a JTD `type` keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let primitive = match keyword {
            "boolean" => Primitive::Boolean,
            "string" => Primitive::String,
            "timestamp" => Primitive::Timestamp,
            "int8" => Primitive::Int8,
            "uint8" => Primitive::Uint8,
            "int16" => Primitive::Int16,
            "uint16" => Primitive::Uint16,
            "int32" => Primitive::Int32,
            "uint32" => Primitive::Uint32,
            "float32" => Primitive::Float32,
            "float64" => Primitive::Float64,
            _ => return None,
        };
        Some(primitive)
    }

    /// The JTD keyword for this primitive.
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::String => "string",
            Primitive::Timestamp => "timestamp",
            Primitive::Int8 => "int8",
            Primitive::Uint8 => "uint8",
            Primitive::Int16 => "int16",
            Primitive::Uint16 => "uint16",
            Primitive::Int32 => "int32",
            Primitive::Uint32 => "uint32",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
        }
    }
}

/// The eight JTD schema forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    /// `{}`: accepts any JSON value.
    Empty,

    /// `{"type": ...}`
    Type(Primitive),

    /// `{"enum": [...]}`, values in declaration order.
    Enum(Vec<String>),

    /// `{"elements": ...}`
    Elements(Box<Schema>),

    /// `{"values": ...}`
    Values(Box<Schema>),

    /// `{"properties": ..., "optionalProperties": ...}`
    Properties {
        required: BTreeMap<String, Schema>,
        optional: BTreeMap<String, Schema>,
        additional: bool,
    },

    /// `{"discriminator": ..., "mapping": ...}`; every mapping entry is a
    /// properties-form schema.
    Discriminator {
        tag: String,
        mapping: BTreeMap<String, Schema>,
    },

    /// `{"ref": ...}`
    Ref(String),
}

/// A schema node: a form plus the keywords every form shares.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub form: Form,
    pub nullable: bool,
    pub description: Option<String>,
}

impl Schema {
    pub fn new(form: Form) -> Self {
        Self {
            form,
            nullable: false,
            description: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Form::Empty)
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(Form::Type(primitive))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(Form::Ref(name.into()))
    }

    pub fn elements(inner: Schema) -> Self {
        Self::new(Form::Elements(Box::new(inner)))
    }

    pub fn values(inner: Schema) -> Self {
        Self::new(Form::Values(Box::new(inner)))
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Form::Enum(values.into_iter().map(Into::into).collect()))
    }

    /// A properties-form schema with only required properties.
    pub fn properties<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = (S, Schema)>,
        S: Into<String>,
    {
        Self::new(Form::Properties {
            required: required.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            optional: BTreeMap::new(),
            additional: false,
        })
    }

    pub fn discriminator<I, S>(tag: impl Into<String>, mapping: I) -> Self
    where
        I: IntoIterator<Item = (S, Schema)>,
        S: Into<String>,
    {
        Self::new(Form::Discriminator {
            tag: tag.into(),
            mapping: mapping.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty_form(&self) -> bool {
        matches!(self.form, Form::Empty)
    }
}

/// A named schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub schema: Schema,
}

/// A loaded JTD document.
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    root: Option<Schema>,
    definitions: Vec<Definition>,
    index: BTreeMap<String, DefId>,
}

impl SchemaModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and lower a JTD document.
    pub fn from_json(source: &str) -> CodegenResult<Self> {
        let value: serde_json::Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Lower an already-parsed JTD document.
    pub fn from_value(value: serde_json::Value) -> CodegenResult<Self> {
        let mut raw: RawSchema =
            serde_json::from_value(value).map_err(|e| CodegenError::InvalidSchema(e.to_string()))?;

        let mut model = Self::new();
        for (name, definition) in raw.definitions.take().unwrap_or_default() {
            let schema = lower(definition, &name)?;
            model.add_definition(name, schema)?;
        }
        model.root = Some(lower(raw, "<root>")?);

        Ok(model)
    }

    /// Set the root schema.
    pub fn with_root(mut self, root: Schema) -> Self {
        self.root = Some(root);
        self
    }

    /// Add a definition, returning its arena index.
    pub fn add_definition(&mut self, name: impl Into<String>, schema: Schema) -> CodegenResult<DefId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(CodegenError::InvalidSchema(format!(
                "duplicate definition `{name}`"
            )));
        }

        let id = DefId(self.definitions.len());
        self.index.insert(name.clone(), id);
        self.definitions.push(Definition { name, schema });
        Ok(id)
    }

    /// Look up a definition by its schema-level name.
    pub fn definition(&self, name: &str) -> Option<DefId> {
        self.index.get(name).copied()
    }

    /// Access a definition by index.
    ///
    /// `DefId`s are only minted by this model, so indexing cannot miss.
    pub fn get(&self, id: DefId) -> &Definition {
        &self.definitions[id.0]
    }

    /// Definitions in traversal order.
    pub fn definitions(&self) -> impl Iterator<Item = (DefId, &Definition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (DefId(i), d))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn root(&self) -> Option<&Schema> {
        self.root.as_ref()
    }
}

/// Wire shape of a JTD schema object.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSchema {
    definitions: Option<BTreeMap<String, RawSchema>>,
    nullable: Option<bool>,
    metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(rename = "ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
    #[serde(rename = "enum")]
    enum_values: Option<Vec<String>>,
    elements: Option<Box<RawSchema>>,
    properties: Option<BTreeMap<String, RawSchema>>,
    optional_properties: Option<BTreeMap<String, RawSchema>>,
    additional_properties: Option<bool>,
    values: Option<Box<RawSchema>>,
    discriminator: Option<String>,
    mapping: Option<BTreeMap<String, RawSchema>>,
}

fn invalid(context: &str, message: impl std::fmt::Display) -> CodegenError {
    CodegenError::InvalidSchema(format!("{context}: {message}"))
}

/// Lower a raw schema into the model, checking form exclusivity.
fn lower(raw: RawSchema, context: &str) -> CodegenResult<Schema> {
    if raw.definitions.is_some() {
        return Err(invalid(context, "definitions are only allowed at the root"));
    }

    let forms = [
        raw.reference.is_some(),
        raw.type_name.is_some(),
        raw.enum_values.is_some(),
        raw.elements.is_some(),
        raw.properties.is_some() || raw.optional_properties.is_some(),
        raw.values.is_some(),
        raw.discriminator.is_some(),
    ];
    if forms.iter().filter(|present| **present).count() > 1 {
        return Err(invalid(context, "schema mixes more than one form"));
    }
    if raw.additional_properties.is_some()
        && raw.properties.is_none()
        && raw.optional_properties.is_none()
    {
        return Err(invalid(context, "additionalProperties requires properties"));
    }
    if raw.mapping.is_some() != raw.discriminator.is_some() {
        return Err(invalid(context, "discriminator and mapping must appear together"));
    }

    let description = raw
        .metadata
        .as_ref()
        .and_then(|m| m.get("description"))
        .and_then(|d| d.as_str())
        .map(str::to_string);
    let nullable = raw.nullable.unwrap_or(false);

    let form = if let Some(name) = raw.reference {
        Form::Ref(name)
    } else if let Some(keyword) = raw.type_name {
        let primitive = Primitive::from_keyword(&keyword)
            .ok_or_else(|| invalid(context, format!("unknown type `{keyword}`")))?;
        Form::Type(primitive)
    } else if let Some(values) = raw.enum_values {
        lower_enum(values, context)?
    } else if let Some(inner) = raw.elements {
        Form::Elements(Box::new(lower(*inner, context)?))
    } else if let Some(inner) = raw.values {
        Form::Values(Box::new(lower(*inner, context)?))
    } else if raw.properties.is_some() || raw.optional_properties.is_some() {
        lower_properties(
            raw.properties.unwrap_or_default(),
            raw.optional_properties.unwrap_or_default(),
            raw.additional_properties.unwrap_or(false),
            context,
        )?
    } else if let (Some(tag), Some(mapping)) = (raw.discriminator, raw.mapping) {
        lower_discriminator(tag, mapping, context)?
    } else {
        Form::Empty
    };

    Ok(Schema {
        form,
        nullable,
        description,
    })
}

fn lower_enum(values: Vec<String>, context: &str) -> CodegenResult<Form> {
    if values.is_empty() {
        return Err(invalid(context, "enum must not be empty"));
    }
    let mut seen = std::collections::BTreeSet::new();
    for value in &values {
        if !seen.insert(value.as_str()) {
            return Err(invalid(context, format!("duplicate enum value `{value}`")));
        }
    }
    Ok(Form::Enum(values))
}

fn lower_properties(
    required: BTreeMap<String, RawSchema>,
    optional: BTreeMap<String, RawSchema>,
    additional: bool,
    context: &str,
) -> CodegenResult<Form> {
    if let Some(shared) = required.keys().find(|k| optional.contains_key(*k)) {
        return Err(invalid(
            context,
            format!("property `{shared}` is both required and optional"),
        ));
    }

    let required = required
        .into_iter()
        .map(|(k, v)| lower(v, context).map(|s| (k, s)))
        .collect::<CodegenResult<BTreeMap<_, _>>>()?;
    let optional = optional
        .into_iter()
        .map(|(k, v)| lower(v, context).map(|s| (k, s)))
        .collect::<CodegenResult<BTreeMap<_, _>>>()?;

    Ok(Form::Properties {
        required,
        optional,
        additional,
    })
}

fn lower_discriminator(
    tag: String,
    mapping: BTreeMap<String, RawSchema>,
    context: &str,
) -> CodegenResult<Form> {
    let mut lowered = BTreeMap::new();
    for (value, raw) in mapping {
        let schema = lower(raw, context)?;
        match &schema.form {
            Form::Properties {
                required, optional, ..
            } => {
                if schema.nullable {
                    return Err(invalid(context, format!("mapping `{value}` must not be nullable")));
                }
                if required.contains_key(&tag) || optional.contains_key(&tag) {
                    return Err(invalid(
                        context,
                        format!("mapping `{value}` redefines discriminator `{tag}`"),
                    ));
                }
            }
            _ => {
                return Err(invalid(
                    context,
                    format!("mapping `{value}` must be a properties schema"),
                ));
            }
        }
        lowered.insert(value, schema);
    }

    Ok(Form::Discriminator {
        tag,
        mapping: lowered,
    })
}
