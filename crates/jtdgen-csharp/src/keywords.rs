//! C# reserved words and the library type names generated code uses unqualified.

use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// C# keywords (reserved and contextual ones that break declarations).
pub static KEYWORDS: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
        "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
        "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
        "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
        "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
        "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed",
        "short", "sizeof", "stackalloc", "static", "string", "struct", "switch", "this",
        "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort",
        "using", "virtual", "void", "volatile", "while", "value", "var", "dynamic", "record",
    ]
    .into_iter()
    .collect()
});

/// Types referenced by simple name in generated files. A generated type with
/// one of these names would shadow the library type inside the namespace.
///
/// `JsonConverter` is not listed; when a definition takes that name the
/// emitter qualifies the attribute.
pub static RESERVED_TYPE_NAMES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "ArgumentException",
        "DateTimeOffset",
        "IDictionary",
        "IList",
        "JsonConverterAttribute",
        "JsonDocument",
        "JsonIgnore",
        "JsonIgnoreCondition",
        "JsonPropertyName",
        "JsonSerializer",
        "JsonSerializerOptions",
        "JsonStringEnumConverter",
        "JsonStringEnumMemberName",
        "String",
        "System",
        "Type",
        "Utf8JsonReader",
        "Utf8JsonWriter",
    ]
    .into_iter()
    .collect()
});

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(name)
}
