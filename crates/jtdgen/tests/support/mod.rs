//! Reference interpreter for generated read/write logic.
//!
//! Evaluates the converter logic recorded in a [`GenerationPlan`] over
//! `serde_json::Value`s, the way the emitted code would run it: types with a
//! converter follow their `ReadLogic`/`WriteLogic`, everything else is
//! serialized member-wise.

#![allow(dead_code)]

use jtdgen::{
    CSharpTarget, GeneratedType, GenerationPlan, Generator, GeneratorConfig, ReadLogic, SchemaModel,
    TypeId, TypeKind, TypeRef, WriteLogic,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A value of a generated type, as a program using the generated code holds it.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    Json(Value),
    Null,
    List(Vec<Instance>),
    Dict(BTreeMap<String, Instance>),
    Enum { ty: TypeId, member: String },
    /// Fields keyed by member identifier
    Object {
        ty: TypeId,
        fields: BTreeMap<String, Instance>,
    },
}

impl Instance {
    pub fn object<I, S>(ty: TypeId, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Instance)>,
        S: Into<String>,
    {
        Instance::Object {
            ty,
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

pub fn plan(schema: &str) -> GenerationPlan {
    let model = SchemaModel::from_json(schema).unwrap();
    Generator::new(CSharpTarget::new(), GeneratorConfig::default())
        .plan(&model)
        .unwrap()
}

pub struct Runtime<'p> {
    plan: &'p GenerationPlan,
}

impl<'p> Runtime<'p> {
    pub fn new(plan: &'p GenerationPlan) -> Self {
        Self { plan }
    }

    pub fn id(&self, identifier: &str) -> TypeId {
        self.plan.type_named(identifier).unwrap().id
    }

    fn ty(&self, id: TypeId) -> &'p GeneratedType {
        self.plan.types().get(id).unwrap()
    }

    pub fn serialize(&self, ty: &TypeRef, value: &Instance) -> Value {
        match (ty, value) {
            (_, Instance::Null) => Value::Null,
            (TypeRef::Nullable(inner), v) => self.serialize(inner, v),
            (TypeRef::Any | TypeRef::Primitive(_), Instance::Json(v)) => v.clone(),
            (TypeRef::List(inner), Instance::List(items)) => {
                Value::Array(items.iter().map(|i| self.serialize(inner, i)).collect())
            }
            (TypeRef::Dict(inner), Instance::Dict(entries)) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), self.serialize(inner, v)))
                    .collect(),
            ),
            (TypeRef::Named(id), v) => self.serialize_named(*id, v),
            (ty, v) => panic!("cannot serialize {v:?} as {ty:?}"),
        }
    }

    fn serialize_named(&self, id: TypeId, value: &Instance) -> Value {
        let Some(converter) = &self.ty(id).converter else {
            return self.serialize_structural(id, value);
        };

        match &converter.write {
            WriteLogic::DelegateToInner { inner, member } => {
                let Instance::Object { fields, .. } = value else {
                    panic!("wrapper value must be an object: {value:?}");
                };
                self.serialize(inner, &fields[member])
            }
            WriteLogic::DispatchOnRuntimeType => {
                let Instance::Object { ty: runtime, .. } = value else {
                    panic!("union value must be an object: {value:?}");
                };
                self.serialize_structural(*runtime, value)
            }
        }
    }

    /// Member-wise serialization, ignoring any converter.
    pub fn serialize_structural(&self, id: TypeId, value: &Instance) -> Value {
        let ty = self.ty(id);
        match (&ty.kind, value) {
            (TypeKind::Enum { members }, Instance::Enum { member, .. }) => {
                let found = members.iter().find(|m| &m.identifier == member).unwrap();
                Value::String(found.json_value.clone())
            }
            (kind, Instance::Object { fields, .. }) => {
                let mut out = Map::new();
                if let TypeKind::Record {
                    variant_of: Some(variant),
                    ..
                } = kind
                {
                    out.insert(variant.tag_json.clone(), Value::String(variant.tag_value.clone()));
                }
                for member in kind.members() {
                    match fields.get(&member.identifier) {
                        Some(field) => {
                            out.insert(member.json_name.clone(), self.serialize(&member.ty, field));
                        }
                        None if member.optional => {}
                        None => panic!("missing required member {}", member.identifier),
                    }
                }
                Value::Object(out)
            }
            (kind, v) => panic!("cannot serialize {v:?} as {}", kind.label()),
        }
    }

    pub fn deserialize(&self, ty: &TypeRef, json: &Value) -> Instance {
        if json.is_null() {
            return Instance::Null;
        }
        match ty {
            TypeRef::Nullable(inner) => self.deserialize(inner, json),
            TypeRef::Any | TypeRef::Primitive(_) => Instance::Json(json.clone()),
            TypeRef::List(inner) => Instance::List(
                json.as_array()
                    .unwrap()
                    .iter()
                    .map(|v| self.deserialize(inner, v))
                    .collect(),
            ),
            TypeRef::Dict(inner) => Instance::Dict(
                json.as_object()
                    .unwrap()
                    .iter()
                    .map(|(k, v)| (k.clone(), self.deserialize(inner, v)))
                    .collect(),
            ),
            TypeRef::Named(id) => self.deserialize_named(*id, json),
        }
    }

    fn deserialize_named(&self, id: TypeId, json: &Value) -> Instance {
        let Some(converter) = &self.ty(id).converter else {
            return self.deserialize_structural(id, json);
        };

        match &converter.read {
            ReadLogic::UnwrapInner { inner, member } => {
                Instance::object(id, [(member.clone(), self.deserialize(inner, json))])
            }
            ReadLogic::DispatchOnTag { tag_json, variants } => {
                let tag = json[tag_json.as_str()].as_str().unwrap();
                let variant = variants.iter().find(|v| v.tag_value == tag).unwrap();
                self.deserialize_structural(variant.ty, json)
            }
        }
    }

    fn deserialize_structural(&self, id: TypeId, json: &Value) -> Instance {
        let ty = self.ty(id);
        if let TypeKind::Enum { members } = &ty.kind {
            let value = json.as_str().unwrap();
            let member = members.iter().find(|m| m.json_value == value).unwrap();
            return Instance::Enum {
                ty: id,
                member: member.identifier.clone(),
            };
        }

        let fields = ty
            .kind
            .members()
            .iter()
            .filter_map(|m| {
                json.get(&m.json_name)
                    .map(|v| (m.identifier.clone(), self.deserialize(&m.ty, v)))
            })
            .collect();
        Instance::Object { ty: id, fields }
    }
}
