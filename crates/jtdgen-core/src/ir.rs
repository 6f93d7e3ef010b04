//! Generated type model shared by the mapper, the strategy selector and targets.
//!
//! # Structure
//!
//! - [`GeneratedType`]: the target-language counterpart of a definition or an
//!   inline schema
//! - [`TypeKind`]: wrapper, record, enum or discriminated union
//! - [`TypeRef`]: a target-independent type reference (primitive, container
//!   or another generated type)
//! - [`ConverterUnit`]: the custom (de)serialization logic nested in a type
//!   whose strategy is [`SerializationStrategy::Custom`]

use crate::registry::ScopeId;
use crate::schema::{DefId, Primitive};
use crate::strategy::SerializationStrategy;

/// Arena index of a generated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(usize);

impl TypeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Where a generated type came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOrigin {
    /// A named definition
    Definition(DefId),
    /// The document's root schema
    Root,
    /// An anonymous schema nested in a definition; `path` holds the name
    /// parts it was named from
    Inline { path: Vec<String> },
}

/// A reference to a type, independent of any target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Any JSON value (the empty form)
    Any,
    Primitive(Primitive),
    List(Box<TypeRef>),
    /// Object with string keys
    Dict(Box<TypeRef>),
    Nullable(Box<TypeRef>),
    Named(TypeId),
}

impl TypeRef {
    /// Wrap in `Nullable` when `nullable` is set.
    pub fn nullable_if(self, nullable: bool) -> Self {
        if nullable && !matches!(self, TypeRef::Nullable(_)) {
            TypeRef::Nullable(Box::new(self))
        } else {
            self
        }
    }

    /// The generated type this reference points at, through containers.
    pub fn named(&self) -> Option<TypeId> {
        match self {
            TypeRef::Named(id) => Some(*id),
            TypeRef::List(inner) | TypeRef::Dict(inner) | TypeRef::Nullable(inner) => inner.named(),
            TypeRef::Any | TypeRef::Primitive(_) => None,
        }
    }

    /// Whether a list or dictionary appears anywhere in the reference.
    pub fn uses_collections(&self) -> bool {
        match self {
            TypeRef::List(_) | TypeRef::Dict(_) => true,
            TypeRef::Nullable(inner) => inner.uses_collections(),
            _ => false,
        }
    }
}

/// A property of a record or the single member of a wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Resolved identifier (the candidate until names are reserved)
    pub identifier: String,
    /// Name in the JSON representation
    pub json_name: String,
    pub ty: TypeRef,
    pub optional: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub identifier: String,
    pub json_value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionVariant {
    pub tag_value: String,
    pub ty: TypeId,
}

/// Ties a record to the discriminated union it is a variant of.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantOf {
    pub parent: TypeId,
    pub tag_json: String,
    pub tag_value: String,
    /// Identifier of the read-only tag property
    pub tag_identifier: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Holds exactly one value of another type; serialized transparently
    Wrapper { member: Member },
    /// Plain struct with member-wise serialization
    Record {
        members: Vec<Member>,
        variant_of: Option<VariantOf>,
    },
    Enum { members: Vec<EnumMember> },
    /// Discriminated union, dispatched on `tag_json`
    Union {
        tag_json: String,
        variants: Vec<UnionVariant>,
    },
}

impl TypeKind {
    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Wrapper { .. } => "wrapper",
            TypeKind::Record { .. } => "record",
            TypeKind::Enum { .. } => "enum",
            TypeKind::Union { .. } => "union",
        }
    }

    /// Members that carry values, in declaration order.
    pub fn members(&self) -> &[Member] {
        match self {
            TypeKind::Wrapper { member } => std::slice::from_ref(member),
            TypeKind::Record { members, .. } => members,
            TypeKind::Enum { .. } | TypeKind::Union { .. } => &[],
        }
    }
}

/// How a converter reads its owner from JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadLogic {
    /// Deserialize `inner` directly from the input and store it in `member`
    UnwrapInner { inner: TypeRef, member: String },
    /// Peek at `tag_json`, then deserialize the variant whose tag matches
    DispatchOnTag {
        tag_json: String,
        variants: Vec<UnionVariant>,
    },
}

/// How a converter writes its owner to JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteLogic {
    /// Serialize the value held in `member` as an `inner`
    DelegateToInner { inner: TypeRef, member: String },
    /// Serialize as the value's concrete variant type
    DispatchOnRuntimeType,
}

/// Custom (de)serialization logic nested in its owner type.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterUnit {
    pub owner: TypeId,
    /// Resolved identifier within the owner's scope
    pub identifier: String,
    pub read: ReadLogic,
    pub write: WriteLogic,
}

impl ConverterUnit {
    /// Point wrapper logic at the member's resolved identifier.
    pub(crate) fn rename_member(&mut self, identifier: &str) {
        if let ReadLogic::UnwrapInner { member, .. } = &mut self.read {
            *member = identifier.to_string();
        }
        if let WriteLogic::DelegateToInner { member, .. } = &mut self.write {
            *member = identifier.to_string();
        }
    }
}

/// The target-language counterpart of a definition or inline schema.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedType {
    pub id: TypeId,
    pub origin: TypeOrigin,
    /// Schema-level name the type is reported under in diagnostics
    pub schema_name: String,
    /// Resolved identifier in the global scope
    pub identifier: String,
    pub kind: TypeKind,
    pub strategy: SerializationStrategy,
    pub converter: Option<ConverterUnit>,
    /// Scope holding the type's members and converter
    pub scope: Option<ScopeId>,
    pub description: Option<String>,
}

impl GeneratedType {
    pub fn is_custom(&self) -> bool {
        self.strategy == SerializationStrategy::Custom
    }

    pub fn uses_collections(&self) -> bool {
        self.kind.members().iter().any(|m| m.ty.uses_collections())
    }
}
