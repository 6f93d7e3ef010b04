#![allow(non_snake_case)]

use super::*;
use crate::ir::{TypeKind, TypeRef};
use crate::naming::NamingConvention;

/// Renders each type as `kind identifier: member types`.
struct OutlineTarget {
    naming: NamingConvention,
}

impl OutlineTarget {
    fn new() -> Self {
        Self {
            naming: NamingConvention::default(),
        }
    }

    fn type_ref(ctx: &RenderContext<'_>, ty: &GeneratedType, r: &TypeRef) -> CodegenResult<String> {
        Ok(match r {
            TypeRef::Any => "any".into(),
            TypeRef::Primitive(p) => p.keyword().into(),
            TypeRef::List(inner) => format!("[{}]", Self::type_ref(ctx, ty, inner)?),
            TypeRef::Dict(inner) => format!("{{{}}}", Self::type_ref(ctx, ty, inner)?),
            TypeRef::Nullable(inner) => format!("{}?", Self::type_ref(ctx, ty, inner)?),
            TypeRef::Named(id) => ctx.identifier(*id, ty)?.to_string(),
        })
    }
}

impl Target for OutlineTarget {
    fn name(&self) -> &str {
        "outline"
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn file_name(&self, ty: &GeneratedType) -> String {
        format!("{}.txt", ty.identifier)
    }

    fn render(&self, ctx: &RenderContext<'_>, ty: &GeneratedType) -> CodegenResult<String> {
        let members = ty
            .kind
            .members()
            .iter()
            .map(|m| Self::type_ref(ctx, ty, &m.ty))
            .collect::<CodegenResult<Vec<_>>>()?;
        Ok(format!(
            "{} {} ({}): {}",
            ty.kind.label(),
            ty.identifier,
            ty.strategy,
            members.join(", ")
        ))
    }
}

/// Fails on the first union it is asked to render.
struct FailingTarget {
    naming: NamingConvention,
}

impl Target for FailingTarget {
    fn name(&self) -> &str {
        "failing"
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn file_name(&self, ty: &GeneratedType) -> String {
        ty.identifier.clone()
    }

    fn render(&self, _ctx: &RenderContext<'_>, ty: &GeneratedType) -> CodegenResult<String> {
        match ty.kind {
            TypeKind::Union { .. } => Err(CodegenError::invariant(&ty.schema_name, "unsupported")),
            _ => Ok(String::new()),
        }
    }
}

const FOO_BAR: &str = r#"{"definitions": {"Bar": {"properties": {}}, "Foo": {"ref": "Bar"}}}"#;

fn model(json: &str) -> SchemaModel {
    SchemaModel::from_json(json).unwrap()
}

#[test]
fn Generator___foo_bar___renders_one_file_per_type_in_type_order() {
    let generator = Generator::new(OutlineTarget::new(), GeneratorConfig::default());

    let output = generator.generate(&model(FOO_BAR)).unwrap();

    assert_eq!(output.len(), 2);
    assert_eq!(output.files[0].path, "Bar.txt");
    assert_eq!(output.files[0].contents, "record Bar (default): ");
    assert_eq!(output.files[1].path, "Foo.txt");
    assert_eq!(output.files[1].contents, "wrapper Foo (custom): Bar");
}

#[test]
fn Generator___plan___exposes_types_before_rendering() {
    let generator = Generator::new(OutlineTarget::new(), GeneratorConfig::default());

    let plan = generator.plan(&model(FOO_BAR)).unwrap();

    let foo = plan.type_named("Foo").unwrap();
    assert!(foo.is_custom());
    assert_eq!(plan.types().state(foo.id), Some(DefinitionState::NameReserved));
    assert!(plan.type_named("Baz").is_none());
}

#[test]
fn Generator___same_schema_twice___produces_identical_output() {
    let schema = r#"{"definitions": {
        "Foo": {"ref": "foo"},
        "foo": {"properties": {"foo": {"ref": "Foo"}}},
        "Shape": {"discriminator": "type", "mapping": {"a": {"properties": {}}}}
    }}"#;
    let generator = Generator::new(OutlineTarget::new(), GeneratorConfig::default());

    let first = generator.generate(&model(schema)).unwrap();
    let second = generator.generate(&model(schema)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn Generator___invalid_config___fails_before_mapping() {
    let config = GeneratorConfig::default().with_namespace("");
    let generator = Generator::new(OutlineTarget::new(), config);

    let err = generator.generate(&model(FOO_BAR)).unwrap_err();

    assert!(matches!(err, CodegenError::ConfigError(_)));
}

#[test]
fn Generator___mapping_error___returns_no_output() {
    let generator = Generator::new(OutlineTarget::new(), GeneratorConfig::default());

    let result = generator.generate(&model(r#"{"definitions": {"Foo": {"ref": "Nope"}}}"#));

    assert!(matches!(
        result,
        Err(CodegenError::UnresolvedReference { .. })
    ));
}

#[test]
fn Generator___render_error___returns_no_partial_output() {
    let target = FailingTarget {
        naming: NamingConvention::default(),
    };
    let generator = Generator::new(target, GeneratorConfig::default());
    let schema = r#"{"definitions": {
        "A": {"properties": {}},
        "Shape": {"discriminator": "type", "mapping": {"a": {"properties": {}}}}
    }}"#;

    let err = generator.generate(&model(schema)).unwrap_err();

    assert!(err.is_internal());
    assert_eq!(err.definition(), Some("Shape"));
}

#[test]
fn Generator___empty_schema___produces_no_files() {
    let generator = Generator::new(OutlineTarget::new(), GeneratorConfig::default());

    let output = generator.generate(&model("{}")).unwrap();

    assert!(output.is_empty());
}

#[test]
fn GeneratedOutput___file___finds_by_path() {
    let generator = Generator::new(OutlineTarget::new(), GeneratorConfig::default());

    let output = generator.generate(&model(FOO_BAR)).unwrap();

    assert!(output.file("Foo.txt").is_some());
    assert!(output.file("Missing.txt").is_none());
}
