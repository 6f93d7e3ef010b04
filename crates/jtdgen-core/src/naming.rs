//! Naming convention utilities for code generation.
//!
//! Schema names are arbitrary JSON strings (`first_name`, `firstName`,
//! `content-type`, `3d`). This module splits them into words and re-joins the
//! words in a target language's case, then steers clear of that language's
//! reserved words.
//!
//! # Supported Conversions
//!
//! | Input | Case | Output |
//! |-------|------|--------|
//! | `first_name` | [`Case::Pascal`] | `FirstName` |
//! | `first_name` | [`Case::Camel`] | `firstName` |
//! | `firstName` | [`Case::Snake`] | `first_name` |
//! | `3d` | [`Case::Pascal`] | `_3d` |

use std::collections::BTreeSet;

/// Identifier casing styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Pascal,
    Camel,
    Snake,
}

impl Case {
    /// Render a sequence of name parts as one identifier in this case.
    ///
    /// # Examples
    ///
    /// ```
    /// use jtdgen_core::naming::Case;
    ///
    /// assert_eq!(Case::Pascal.render(&["shape", "circle"]), "ShapeCircle");
    /// assert_eq!(Case::Camel.render(&["display_name"]), "displayName");
    /// assert_eq!(Case::Snake.render(&["HTTPServer"]), "http_server");
    /// ```
    pub fn render<S: AsRef<str>>(self, parts: &[S]) -> String {
        let words: Vec<String> = parts.iter().flat_map(|p| split_words(p.as_ref())).collect();

        let joined = match self {
            Case::Pascal => words.iter().map(|w| capitalize(&w.to_lowercase())).collect(),
            Case::Camel => words
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let lower = w.to_lowercase();
                    if i == 0 { lower } else { capitalize(&lower) }
                })
                .collect(),
            Case::Snake => words
                .iter()
                .map(|w| w.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
        };

        sanitize(joined)
    }
}

/// A target language's naming rules.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    pub type_case: Case,
    pub member_case: Case,
    pub enum_member_case: Case,
    keywords: BTreeSet<String>,
    /// Names only type identifiers must avoid (library types the generated
    /// code refers to unqualified)
    reserved_types: BTreeSet<String>,
}

impl NamingConvention {
    pub fn new<I, S>(type_case: Case, member_case: Case, enum_member_case: Case, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_case,
            member_case,
            enum_member_case,
            keywords: keywords.into_iter().map(Into::into).collect(),
            reserved_types: BTreeSet::new(),
        }
    }

    pub fn with_reserved_type_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_types = names.into_iter().map(Into::into).collect();
        self
    }

    /// Type name from a path of name parts (all parts contribute).
    pub fn type_name<S: AsRef<str>>(&self, parts: &[S]) -> String {
        let name = self.avoid_keyword(self.type_case.render(parts));
        if self.reserved_types.contains(&name) {
            format!("{name}_")
        } else {
            name
        }
    }

    /// Member name from its schema-level name.
    pub fn member_name(&self, name: &str) -> String {
        self.avoid_keyword(self.member_case.render(&[name]))
    }

    /// Enum member name from its JSON value.
    pub fn enum_member_name(&self, value: &str) -> String {
        self.avoid_keyword(self.enum_member_case.render(&[value]))
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        self.keywords.contains(name)
    }

    fn avoid_keyword(&self, name: String) -> String {
        if self.is_keyword(&name) {
            format!("{name}_")
        } else {
            name
        }
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new(Case::Pascal, Case::Pascal, Case::Pascal, Vec::<String>::new())
    }
}

/// Split a name into words on separators, case humps and letter/digit edges.
///
/// Runs of capitals stay together (`HTTPServer` splits as `HTTP`, `Server`).
///
/// # Examples
///
/// ```
/// use jtdgen_core::naming::split_words;
///
/// assert_eq!(split_words("display_name"), vec!["display", "name"]);
/// assert_eq!(split_words("contentType"), vec!["content", "Type"]);
/// assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
/// ```
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let hump = prev.is_lowercase() && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(|n| n.is_lowercase());
            let digit_edge = prev.is_ascii_digit() != c.is_ascii_digit()
                && !(prev.is_ascii_digit() && c.is_lowercase());
            if hump || acronym_end || digit_edge {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use jtdgen_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Make a joined name a legal identifier start.
fn sanitize(name: String) -> String {
    match name.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        Some(_) => name,
    }
}
