//! Type mapping from schema definitions to generated types.
//!
//! The mapper walks the definitions of a [`SchemaModel`] in order and drives
//! each one through Mapping → StrategySelected → NameReserved. Refs are
//! memoized by [`DefId`]: the first ref to a definition allocates its type
//! slot and queues the body, so a definition reached again through a cycle
//! resolves to the slot it already owns instead of being mapped twice. Queued
//! bodies are mapped from a worklist, which keeps ref chains of any length
//! off the call stack; only inline nesting counts against `max_depth`.
//!
//! Inline schemas (property-level enums, structs and unions) become anonymous
//! types named from their path, e.g. `User` + `address` → `UserAddress`.

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, CodegenResult};
use crate::ir::{
    EnumMember, GeneratedType, Member, TypeId, TypeKind, TypeOrigin, TypeRef, UnionVariant,
    VariantOf,
};
use crate::naming::NamingConvention;
use crate::registry::{NameKey, NameRegistry};
use crate::schema::{DefId, Form, Schema, SchemaModel};
use crate::state::DefinitionState;
use crate::strategy::{SerializationStrategy, StrategySelector};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, Default)]
struct Slot {
    state: DefinitionState,
    ty: Option<GeneratedType>,
}

/// Arena of generated types, indexed by [`TypeId`].
#[derive(Debug, Clone, Default)]
pub struct TypeArena {
    slots: Vec<Slot>,
}

impl TypeArena {
    pub fn get(&self, id: TypeId) -> Option<&GeneratedType> {
        self.slots.get(id.index()).and_then(|s| s.ty.as_ref())
    }

    pub fn state(&self, id: TypeId) -> Option<DefinitionState> {
        self.slots.get(id.index()).map(|s| s.state)
    }

    /// Generated types in `TypeId` order.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedType> {
        self.slots.iter().filter_map(|s| s.ty.as_ref())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Find the type generated for a definition.
    pub fn for_definition(&self, def: DefId) -> Option<&GeneratedType> {
        self.iter()
            .find(|t| t.origin == TypeOrigin::Definition(def))
    }

    pub(crate) fn advance(&mut self, id: TypeId, target: DefinitionState) -> CodegenResult<()> {
        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or_else(|| CodegenError::invariant("<arena>", format!("unknown type {}", id.index())))?;
        let name = slot
            .ty
            .as_ref()
            .map(|t| t.schema_name.clone())
            .unwrap_or_else(|| format!("<type {}>", id.index()));
        slot.state.advance(target, &name)
    }

    fn allocate(&mut self) -> TypeId {
        let id = TypeId::new(self.slots.len());
        self.slots.push(Slot::default());
        id
    }

    fn slot_mut(&mut self, id: TypeId) -> CodegenResult<&mut Slot> {
        self.slots
            .get_mut(id.index())
            .ok_or_else(|| CodegenError::invariant("<arena>", format!("unknown type {}", id.index())))
    }
}

/// Maps every definition of a schema to generated types.
pub struct TypeMapper<'a> {
    model: &'a SchemaModel,
    config: &'a GeneratorConfig,
    naming: &'a NamingConvention,
    selector: StrategySelector,
    registry: NameRegistry,
    arena: TypeArena,
    memo: BTreeMap<DefId, TypeId>,
    pending: VecDeque<(DefId, TypeId)>,
    wrapper_member: String,
    depth: usize,
}

impl<'a> TypeMapper<'a> {
    pub fn new(model: &'a SchemaModel, config: &'a GeneratorConfig, naming: &'a NamingConvention) -> Self {
        Self {
            model,
            config,
            naming,
            selector: StrategySelector::new(naming.type_name(&[config.converter_name.as_str()])),
            registry: NameRegistry::new().with_max_suffix(config.max_name_suffix),
            arena: TypeArena::default(),
            memo: BTreeMap::new(),
            pending: VecDeque::new(),
            wrapper_member: naming.member_name(&config.wrapper_member_name),
            depth: 0,
        }
    }

    /// Map all definitions in model order, then the root schema.
    pub fn map_all(mut self) -> CodegenResult<(TypeArena, NameRegistry)> {
        let model = self.model;
        for (id, _) in model.definitions() {
            self.map_definition(id)?;
        }

        if let Some(root) = model.root().filter(|r| !r.is_empty_form()) {
            let name = self.config.root_name.clone();
            self.build_type(TypeOrigin::Root, &name, vec![name.clone()], root)?;
            self.drain_pending()?;
        }

        Ok((self.arena, self.registry))
    }

    /// Map one definition, reusing its type if it was already visited.
    ///
    /// Every definition it reaches through refs is mapped before this returns.
    pub fn map_definition(&mut self, def: DefId) -> CodegenResult<TypeId> {
        let id = self.reference(def);
        self.drain_pending()?;
        Ok(id)
    }

    /// The type slot owned by `def`, queueing its body on first sight.
    fn reference(&mut self, def: DefId) -> TypeId {
        if let Some(existing) = self.memo.get(&def) {
            return *existing;
        }
        let id = self.arena.allocate();
        self.memo.insert(def, id);
        self.pending.push_back((def, id));
        id
    }

    fn drain_pending(&mut self) -> CodegenResult<()> {
        let model = self.model;
        while let Some((def, id)) = self.pending.pop_front() {
            let definition = model.get(def);
            self.build_into(
                id,
                TypeOrigin::Definition(def),
                &definition.name,
                vec![definition.name.clone()],
                &definition.schema,
            )?;
        }
        Ok(())
    }

    fn build_type(
        &mut self,
        origin: TypeOrigin,
        schema_name: &str,
        parts: Vec<String>,
        schema: &Schema,
    ) -> CodegenResult<TypeId> {
        let id = self.arena.allocate();
        self.build_into(id, origin, schema_name, parts, schema)
    }

    /// Drive one allocated type through Mapping, StrategySelected and NameReserved.
    fn build_into(
        &mut self,
        id: TypeId,
        origin: TypeOrigin,
        schema_name: &str,
        parts: Vec<String>,
        schema: &Schema,
    ) -> CodegenResult<TypeId> {
        self.arena.advance(id, DefinitionState::Mapping)?;
        tracing::debug!(definition = schema_name, id = id.index(), "Mapping type");

        let kind = self.shape(id, schema_name, &parts, schema)?;
        self.finish_type(id, origin, schema_name, parts, kind, schema.description.clone())
    }

    /// Strategy selection and name reservation for a mapped type.
    fn finish_type(
        &mut self,
        id: TypeId,
        origin: TypeOrigin,
        schema_name: &str,
        parts: Vec<String>,
        mut kind: TypeKind,
        description: Option<String>,
    ) -> CodegenResult<TypeId> {
        let selection = self.selector.select(id, &kind);
        let mut converter = selection.converter;
        self.slot_placeholder(id, &origin, schema_name, &kind, selection.strategy, &description)?;
        self.arena.advance(id, DefinitionState::StrategySelected)?;

        let global = self.registry.global();
        let identifier =
            self.registry
                .reserve(global, NameKey::Type(id), &self.naming.type_name(&parts))?;
        let scope = self.registry.child_scope(global, &identifier)?;

        match &mut kind {
            TypeKind::Wrapper { member } => {
                member.identifier = self.registry.reserve(
                    scope,
                    NameKey::Member(id, member.json_name.clone()),
                    &member.identifier,
                )?;
                if let Some(converter) = converter.as_mut() {
                    converter.rename_member(&member.identifier);
                }
            }
            TypeKind::Record {
                members,
                variant_of,
            } => {
                if let Some(variant) = variant_of {
                    variant.tag_identifier = self.registry.reserve(
                        scope,
                        NameKey::Member(id, variant.tag_json.clone()),
                        &variant.tag_identifier,
                    )?;
                }
                for member in members.iter_mut() {
                    member.identifier = self.registry.reserve(
                        scope,
                        NameKey::Member(id, member.json_name.clone()),
                        &member.identifier,
                    )?;
                }
            }
            TypeKind::Enum { members } => {
                for member in members.iter_mut() {
                    member.identifier = self.registry.reserve(
                        scope,
                        NameKey::EnumMember(id, member.json_value.clone()),
                        &member.identifier,
                    )?;
                }
            }
            TypeKind::Union { .. } => {}
        }

        if let Some(converter) = converter.as_mut() {
            converter.identifier =
                self.registry
                    .reserve(scope, NameKey::Converter(id), &converter.identifier)?;
        }

        let strategy = selection.strategy;
        if (strategy == SerializationStrategy::Custom) != converter.is_some() {
            return Err(CodegenError::invariant(
                schema_name,
                "converter presence disagrees with strategy",
            ));
        }

        let slot = self.arena.slot_mut(id)?;
        slot.ty = Some(GeneratedType {
            id,
            origin,
            schema_name: schema_name.to_string(),
            identifier: identifier.clone(),
            kind,
            strategy,
            converter,
            scope: Some(scope),
            description,
        });
        self.arena.advance(id, DefinitionState::NameReserved)?;

        tracing::debug!(
            definition = schema_name,
            identifier = %identifier,
            strategy = %strategy,
            "Reserved type names"
        );
        Ok(id)
    }

    /// Record what is known about a type before its names are reserved, so
    /// diagnostics and state transitions can name it.
    fn slot_placeholder(
        &mut self,
        id: TypeId,
        origin: &TypeOrigin,
        schema_name: &str,
        kind: &TypeKind,
        strategy: SerializationStrategy,
        description: &Option<String>,
    ) -> CodegenResult<()> {
        let slot = self.arena.slot_mut(id)?;
        slot.ty = Some(GeneratedType {
            id,
            origin: origin.clone(),
            schema_name: schema_name.to_string(),
            identifier: String::new(),
            kind: kind.clone(),
            strategy,
            converter: None,
            scope: None,
            description: description.clone(),
        });
        Ok(())
    }

    /// Resolve the structure of a type-producing schema.
    fn shape(
        &mut self,
        id: TypeId,
        schema_name: &str,
        parts: &[String],
        schema: &Schema,
    ) -> CodegenResult<TypeKind> {
        match &schema.form {
            Form::Properties {
                required, optional, ..
            } => Ok(TypeKind::Record {
                members: self.members(schema_name, parts, required, optional)?,
                variant_of: None,
            }),
            Form::Enum(values) => Ok(TypeKind::Enum {
                members: values
                    .iter()
                    .map(|v| EnumMember {
                        identifier: self.naming.enum_member_name(v),
                        json_value: v.clone(),
                    })
                    .collect(),
            }),
            Form::Discriminator { tag, mapping } => {
                let mut variants = Vec::with_capacity(mapping.len());
                for (tag_value, variant) in mapping {
                    let ty = self.build_variant(id, schema_name, parts, tag, tag_value, variant)?;
                    variants.push(UnionVariant {
                        tag_value: tag_value.clone(),
                        ty,
                    });
                }
                Ok(TypeKind::Union {
                    tag_json: tag.clone(),
                    variants,
                })
            }
            Form::Empty | Form::Type(_) | Form::Elements(_) | Form::Values(_) | Form::Ref(_) => {
                Ok(TypeKind::Wrapper {
                    member: Member {
                        identifier: self.wrapper_member.clone(),
                        json_name: self.config.wrapper_member_name.clone(),
                        ty: self.type_ref(schema_name, parts, schema)?,
                        optional: false,
                        description: None,
                    },
                })
            }
        }
    }

    fn build_variant(
        &mut self,
        parent: TypeId,
        schema_name: &str,
        parts: &[String],
        tag: &str,
        tag_value: &str,
        schema: &Schema,
    ) -> CodegenResult<TypeId> {
        let Form::Properties {
            required, optional, ..
        } = &schema.form
        else {
            return Err(CodegenError::InvalidSchema(format!(
                "{schema_name}: mapping `{tag_value}` must be a properties schema"
            )));
        };

        let mut path = parts.to_vec();
        path.push(tag_value.to_string());
        let variant_name = format!("{schema_name}.{tag_value}");

        let id = self.arena.allocate();
        self.arena.advance(id, DefinitionState::Mapping)?;
        let members = self.members(&variant_name, &path, required, optional)?;
        let kind = TypeKind::Record {
            members,
            variant_of: Some(VariantOf {
                parent,
                tag_json: tag.to_string(),
                tag_value: tag_value.to_string(),
                tag_identifier: self.naming.member_name(tag),
            }),
        };

        self.finish_type(
            id,
            TypeOrigin::Inline { path: path.clone() },
            &variant_name,
            path,
            kind,
            schema.description.clone(),
        )
    }

    fn members(
        &mut self,
        schema_name: &str,
        parts: &[String],
        required: &BTreeMap<String, Schema>,
        optional: &BTreeMap<String, Schema>,
    ) -> CodegenResult<Vec<Member>> {
        let entries = required
            .iter()
            .map(|(k, v)| (k, v, false))
            .chain(optional.iter().map(|(k, v)| (k, v, true)));

        let mut members = Vec::with_capacity(required.len() + optional.len());
        for (json_name, schema, is_optional) in entries {
            let mut path = parts.to_vec();
            path.push(json_name.clone());
            members.push(Member {
                identifier: self.naming.member_name(json_name),
                json_name: json_name.clone(),
                ty: self.type_ref(schema_name, &path, schema)?,
                optional: is_optional,
                description: schema.description.clone(),
            });
        }
        Ok(members)
    }

    /// Map a schema used in member position to a type reference.
    fn type_ref(&mut self, schema_name: &str, parts: &[String], schema: &Schema) -> CodegenResult<TypeRef> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(CodegenError::SchemaCycleDepthExceeded {
                definition: schema_name.to_string(),
                depth: self.depth,
                limit: self.config.max_depth,
            });
        }

        let result = self.type_ref_inner(schema_name, parts, schema);
        self.depth -= 1;
        result
    }

    fn type_ref_inner(&mut self, schema_name: &str, parts: &[String], schema: &Schema) -> CodegenResult<TypeRef> {
        let ty = match &schema.form {
            Form::Empty => TypeRef::Any,
            Form::Type(primitive) => TypeRef::Primitive(*primitive),
            Form::Elements(inner) => {
                let path = extend(parts, "element");
                TypeRef::List(Box::new(self.type_ref(schema_name, &path, inner)?))
            }
            Form::Values(inner) => {
                let path = extend(parts, "value");
                TypeRef::Dict(Box::new(self.type_ref(schema_name, &path, inner)?))
            }
            Form::Ref(name) => {
                let model = self.model;
                let def = model
                    .definition(name)
                    .ok_or_else(|| CodegenError::UnresolvedReference {
                        name: name.clone(),
                        from: schema_name.to_string(),
                    })?;
                let target_nullable = model.get(def).schema.nullable;
                let id = self.reference(def);
                return Ok(TypeRef::Named(id).nullable_if(schema.nullable || target_nullable));
            }
            Form::Enum(_) | Form::Properties { .. } | Form::Discriminator { .. } => {
                let id = self.build_type(
                    TypeOrigin::Inline {
                        path: parts.to_vec(),
                    },
                    &parts.join("."),
                    parts.to_vec(),
                    schema,
                )?;
                TypeRef::Named(id)
            }
        };

        Ok(ty.nullable_if(schema.nullable))
    }
}

fn extend(parts: &[String], part: &str) -> Vec<String> {
    let mut path = parts.to_vec();
    path.push(part.to_string());
    path
}
