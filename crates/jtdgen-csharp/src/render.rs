//! C# source rendering for generated types.
//!
//! Each type becomes one file: the `using` block, the namespace, and the
//! declaration. Custom-strategy types carry their converter as a nested class
//! and are bound to it with `[JsonConverter(typeof(Owner.Converter))]`.

use crate::types::TypeResolver;
use jtdgen_core::{
    CodegenError, CodegenResult, ConverterUnit, EnumMember, GeneratedType, Member, ReadLogic,
    RenderContext, TypeKind, TypeRef, VariantOf, WriteLogic,
};

const INDENT: &str = "    ";

/// Line-oriented source buffer with brace-driven indentation.
#[derive(Debug, Default)]
pub(crate) struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        self.write_at(self.depth, text.as_ref());
    }

    /// Write one level deeper than the current block, without opening one.
    pub(crate) fn indented(&mut self, text: impl AsRef<str>) {
        self.write_at(self.depth + 1, text.as_ref());
    }

    pub(crate) fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn write_at(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}

/// Render a generated type as a complete C# file.
pub fn render_type(ctx: &RenderContext<'_>, ty: &GeneratedType) -> CodegenResult<String> {
    let mut w = CodeWriter::default();

    w.line("using System;");
    if ty.uses_collections() {
        w.line("using System.Collections.Generic;");
    }
    w.line("using System.Text.Json;");
    w.line("using System.Text.Json.Serialization;");
    w.line(format!("namespace {}", ctx.config().namespace));
    w.open();

    doc_comment(&mut w, ty.description.as_deref());
    match &ty.kind {
        TypeKind::Wrapper { member } => render_wrapper(ctx, ty, member, &mut w)?,
        TypeKind::Record {
            members,
            variant_of,
        } => render_record(ctx, ty, members, variant_of.as_ref(), &mut w)?,
        TypeKind::Enum { members } => render_enum(ctx, ty, members, &mut w),
        TypeKind::Union { .. } => render_union(ctx, ty, &mut w)?,
    }

    w.close();

    tracing::debug!(
        identifier = %ty.identifier,
        kind = ty.kind.label(),
        strategy = %ty.strategy,
        "Rendered C# type"
    );
    Ok(w.finish())
}

fn render_wrapper(
    ctx: &RenderContext<'_>,
    ty: &GeneratedType,
    member: &Member,
    w: &mut CodeWriter,
) -> CodegenResult<()> {
    let converter = require_converter(ty)?;
    let (inner, member_name) = match (&converter.read, &converter.write) {
        (ReadLogic::UnwrapInner { inner, member }, WriteLogic::DelegateToInner { .. }) => (inner, member),
        _ => {
            return Err(CodegenError::invariant(
                &ty.schema_name,
                "wrapper converter must unwrap on read and delegate on write",
            ));
        }
    };

    let resolver = TypeResolver::new(ctx, ty, vec![converter.identifier.clone()]);
    let inner_ty = resolver.resolve(inner)?.name;
    let owner = &ty.identifier;
    let conv = &converter.identifier;

    w.line(converter_attribute(ctx, &format!("{owner}.{conv}")));
    w.line(format!("public class {owner}"));
    w.open();
    doc_comment(w, member.description.as_deref());
    w.line(format!("public {inner_ty} {member_name} {{ get; set; }}"));
    w.line(format!("public class {conv} : JsonConverter<{owner}>"));
    w.open();
    w.line(read_signature(owner));
    w.open();
    w.line(format!(
        "return new {owner} {{ {member_name} = JsonSerializer.Deserialize<{inner_ty}>(ref reader, options) }};"
    ));
    w.close();
    w.line(write_signature(owner));
    w.open();
    w.line(format!(
        "JsonSerializer.Serialize<{inner_ty}>(writer, value.{member_name}, options);"
    ));
    w.close();
    w.close();
    w.close();
    Ok(())
}

fn render_record(
    ctx: &RenderContext<'_>,
    ty: &GeneratedType,
    members: &[Member],
    variant_of: Option<&VariantOf>,
    w: &mut CodeWriter,
) -> CodegenResult<()> {
    let mut shadowed = Vec::new();
    match variant_of {
        Some(variant) => {
            // Nested types of the base class are in scope in the variant body
            let parent = ctx.get(variant.parent, ty)?;
            if let Some(converter) = &parent.converter {
                shadowed.push(converter.identifier.clone());
            }
            w.line(format!("public class {} : {}", ty.identifier, parent.identifier));
        }
        None => w.line(format!("public class {}", ty.identifier)),
    }
    let resolver = TypeResolver::new(ctx, ty, shadowed);

    w.open();
    if let Some(variant) = variant_of {
        w.line(format!("[JsonPropertyName({})]", string_literal(&variant.tag_json)));
        w.line(format!(
            "public string {} {{ get => {}; }}",
            variant.tag_identifier,
            string_literal(&variant.tag_value)
        ));
    }
    for member in members {
        let mut member_ty = resolver.resolve(&member.ty)?;
        doc_comment(w, member.description.as_deref());
        w.line(format!("[JsonPropertyName({})]", string_literal(&member.json_name)));
        if member.optional {
            member_ty = member_ty.nullable();
            w.line("[JsonIgnore(Condition = JsonIgnoreCondition.WhenWritingDefault)]");
        }
        w.line(format!(
            "public {} {} {{ get; set; }}",
            member_ty.name, member.identifier
        ));
    }
    w.close();
    Ok(())
}

fn render_enum(ctx: &RenderContext<'_>, ty: &GeneratedType, members: &[EnumMember], w: &mut CodeWriter) {
    let owner = &ty.identifier;
    w.line(converter_attribute(ctx, &format!("JsonStringEnumConverter<{owner}>")));
    w.line(format!("public enum {owner}"));
    w.open();
    for member in members {
        w.line(format!(
            "[JsonStringEnumMemberName({})]",
            string_literal(&member.json_value)
        ));
        w.line(format!("{},", member.identifier));
    }
    w.close();
}

fn render_union(ctx: &RenderContext<'_>, ty: &GeneratedType, w: &mut CodeWriter) -> CodegenResult<()> {
    let converter = require_converter(ty)?;
    let (ReadLogic::DispatchOnTag { tag_json, variants }, WriteLogic::DispatchOnRuntimeType) =
        (&converter.read, &converter.write)
    else {
        return Err(CodegenError::invariant(
            &ty.schema_name,
            "union converter must dispatch on the tag and the runtime type",
        ));
    };

    let resolver = TypeResolver::new(ctx, ty, vec![converter.identifier.clone()]);
    let owner = &ty.identifier;
    let conv = &converter.identifier;

    w.line(converter_attribute(ctx, &format!("{owner}.{conv}")));
    w.line(format!("public abstract class {owner}"));
    w.open();
    w.line(format!("public class {conv} : JsonConverter<{owner}>"));
    w.open();
    w.line(read_signature(owner));
    w.open();
    w.line("var readerCopy = reader;");
    w.line(format!(
        "var tagValue = JsonDocument.ParseValue(ref readerCopy).RootElement.GetProperty({}).GetString();",
        string_literal(tag_json)
    ));
    w.line("switch (tagValue)");
    w.open();
    for variant in variants {
        let variant_ty = resolver.resolve(&TypeRef::Named(variant.ty))?.name;
        w.line(format!("case {}:", string_literal(&variant.tag_value)));
        w.indented(format!(
            "return JsonSerializer.Deserialize<{variant_ty}>(ref reader, options);"
        ));
    }
    w.line("default:");
    let message = format!("Bad {} value: {{0}}", tag_json.replace('{', "{{").replace('}', "}}"));
    w.indented(format!(
        "throw new ArgumentException(String.Format({}, tagValue));",
        string_literal(&message)
    ));
    w.close();
    w.close();
    w.line(write_signature(owner));
    w.open();
    w.line("JsonSerializer.Serialize(writer, value, value.GetType(), options);");
    w.close();
    w.close();
    w.close();
    Ok(())
}

fn require_converter(ty: &GeneratedType) -> CodegenResult<&ConverterUnit> {
    ty.converter.as_ref().ok_or_else(|| {
        CodegenError::invariant(
            &ty.schema_name,
            format!("{} type has no converter", ty.kind.label()),
        )
    })
}

/// The `[JsonConverter]` binding, qualified when a generated type named
/// `JsonConverter` would capture the attribute lookup.
fn converter_attribute(ctx: &RenderContext<'_>, converter_type: &str) -> String {
    let registry = ctx.registry();
    if registry.is_taken(registry.global(), "JsonConverter") {
        format!("[global::System.Text.Json.Serialization.JsonConverter(typeof({converter_type}))]")
    } else {
        format!("[JsonConverter(typeof({converter_type}))]")
    }
}

fn read_signature(owner: &str) -> String {
    format!(
        "public override {owner} Read(ref Utf8JsonReader reader, Type typeToConvert, JsonSerializerOptions options)"
    )
}

fn write_signature(owner: &str) -> String {
    format!("public override void Write(Utf8JsonWriter writer, {owner} value, JsonSerializerOptions options)")
}

fn doc_comment(w: &mut CodeWriter, description: Option<&str>) {
    let Some(text) = description.filter(|d| !d.trim().is_empty()) else {
        return;
    };
    w.line("/// <summary>");
    for line in text.lines() {
        let escaped = xml_escape(line);
        w.line(format!("/// {escaped}").trim_end());
    }
    w.line("/// </summary>");
}

/// Quote a value as a C# regular string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
