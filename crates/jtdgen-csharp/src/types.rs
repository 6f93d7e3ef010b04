//! C# type mappings for System.Text.Json code generation.
//!
//! # Type Mappings
//!
//! | JTD | C# | C# (nullable) |
//! |-----|----|---------------|
//! | `{}` | `object` | `object` |
//! | `boolean` | `bool` | `bool?` |
//! | `string` | `string` | `string` |
//! | `timestamp` | `DateTimeOffset` | `DateTimeOffset?` |
//! | `int8` / `uint8` | `sbyte` / `byte` | `sbyte?` / `byte?` |
//! | `int16` / `uint16` | `short` / `ushort` | `short?` / `ushort?` |
//! | `int32` / `uint32` | `int` / `uint` | `int?` / `uint?` |
//! | `float32` / `float64` | `float` / `double` | `float?` / `double?` |
//! | `elements` | `IList<T>` | `IList<T>` |
//! | `values` | `IDictionary<string, T>` | `IDictionary<string, T>` |
//! | enum definition | `Name` | `Name?` |
//! | other definition | `Name` | `Name` |

use jtdgen_core::{CodegenResult, GeneratedType, Primitive, RenderContext, TypeKind, TypeRef};

/// A C# type as written in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct CSharpType {
    pub name: String,
    /// Value types need `?` to hold null
    pub is_value_type: bool,
}

impl CSharpType {
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_value_type: false,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_value_type: true,
        }
    }

    /// The type able to hold null.
    ///
    /// Reference types are left alone; the generated files do not enable
    /// nullable reference annotations.
    pub fn nullable(self) -> Self {
        if self.is_value_type && !self.name.ends_with('?') {
            Self {
                name: format!("{}?", self.name),
                is_value_type: true,
            }
        } else {
            self
        }
    }
}

/// Map a JTD primitive to its C# type.
pub fn map_primitive(primitive: Primitive) -> CSharpType {
    match primitive {
        Primitive::Boolean => CSharpType::value("bool"),
        Primitive::String => CSharpType::reference("string"),
        Primitive::Timestamp => CSharpType::value("DateTimeOffset"),
        Primitive::Int8 => CSharpType::value("sbyte"),
        Primitive::Uint8 => CSharpType::value("byte"),
        Primitive::Int16 => CSharpType::value("short"),
        Primitive::Uint16 => CSharpType::value("ushort"),
        Primitive::Int32 => CSharpType::value("int"),
        Primitive::Uint32 => CSharpType::value("uint"),
        Primitive::Float32 => CSharpType::value("float"),
        Primitive::Float64 => CSharpType::value("double"),
    }
}

/// Resolves type references from inside one generated type.
///
/// Names in `shadowed` are nested types visible in the owner's body; a
/// top-level type with one of those names is written fully qualified.
pub struct TypeResolver<'c, 'a> {
    ctx: &'c RenderContext<'a>,
    owner: &'c GeneratedType,
    shadowed: Vec<String>,
}

impl<'c, 'a> TypeResolver<'c, 'a> {
    pub fn new(ctx: &'c RenderContext<'a>, owner: &'c GeneratedType, shadowed: Vec<String>) -> Self {
        Self {
            ctx,
            owner,
            shadowed,
        }
    }

    pub fn resolve(&self, ty: &TypeRef) -> CodegenResult<CSharpType> {
        Ok(match ty {
            TypeRef::Any => CSharpType::reference("object"),
            TypeRef::Primitive(p) => map_primitive(*p),
            TypeRef::List(inner) => CSharpType::reference(format!("IList<{}>", self.resolve(inner)?.name)),
            TypeRef::Dict(inner) => {
                CSharpType::reference(format!("IDictionary<string, {}>", self.resolve(inner)?.name))
            }
            TypeRef::Nullable(inner) => self.resolve(inner)?.nullable(),
            TypeRef::Named(id) => {
                let target = self.ctx.get(*id, self.owner)?;
                let name = if self.shadowed.contains(&target.identifier) {
                    format!("global::{}.{}", self.ctx.config().namespace, target.identifier)
                } else {
                    target.identifier.clone()
                };
                if matches!(target.kind, TypeKind::Enum { .. }) {
                    CSharpType::value(name)
                } else {
                    CSharpType::reference(name)
                }
            }
        })
    }
}
