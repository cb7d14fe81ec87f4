//! C identifiers derived from file names.
use std::fmt;

/// Replaces every character outside `[0-9A-Za-z_]` with `_` and prefixes
/// `_` when the result would start with a digit.
///
/// The replacement is one-for-one per character, so `"2-col.page"` becomes
/// `"_2_col_page"`.
#[must_use]
pub fn sanitize(name: &str) -> String {
    let mut ident = String::with_capacity(name.len() + 1);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        ident.push('_');
    }
    ident.extend(name.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            '_'
        }
    }));
    ident
}

/// A valid C identifier derived from a page's base name.
///
/// Always matches `[_A-Za-z][_A-Za-z0-9]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Sanitizes `name` into an identifier.
    ///
    /// Returns `None` for an empty name, which has no meaningful symbol.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.is_empty() {
            None
        } else {
            Some(Self(sanitize(name)))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the byte array, `page_<identifier>`.
    #[must_use]
    pub fn array_symbol(&self) -> String {
        format!("page_{}", self.0)
    }

    /// Name of the length constant, `page_<identifier>_len`.
    #[must_use]
    pub fn len_symbol(&self) -> String {
        format!("page_{}_len", self.0)
    }

    /// Include-guard token, `PAGE_<IDENTIFIER>_H`.
    #[must_use]
    pub fn guard(&self) -> String {
        format!("PAGE_{}_H", self.0.to_ascii_uppercase())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
