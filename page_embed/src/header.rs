//! Rendering of the C header that embeds a compressed page.
use std::fmt::{self, Write};

use crate::Identifier;

/// Bytes per line in the array literal, as `xxd -i` lays them out.
const BYTES_PER_LINE: usize = 16;

const GENERATOR: &str = concat!("page_embed ", env!("CARGO_PKG_VERSION"));

/// A C header declaring `page_<id>[]` and `page_<id>_len`.
///
/// Rendered through [`fmt::Display`]:
///
/// ```text
/// #ifndef PAGE_INDEX_H
/// #define PAGE_INDEX_H
///
/// // This file was generated by page_embed 0.1.0 (gzip -> C array)
/// // Gzip generated on: 2024-05-01 12:00:00
///
/// unsigned char page_index[] = {
///   0x1F, 0x8B, 0x08, ...
///   ...
/// };
///
/// unsigned int page_index_len = 34;
///
/// #endif // PAGE_INDEX_H
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HeaderDocument<'a> {
    identifier: &'a Identifier,
    payload: &'a [u8],
    timestamp: &'a str,
}

impl<'a> HeaderDocument<'a> {
    #[must_use]
    pub const fn new(identifier: &'a Identifier, payload: &'a [u8], timestamp: &'a str) -> Self {
        Self {
            identifier,
            payload,
            timestamp,
        }
    }

    fn write_array(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "unsigned char {}[] = {{", self.identifier.array_symbol())?;
        for (row, chunk) in self.payload.chunks(BYTES_PER_LINE).enumerate() {
            if row > 0 {
                f.write_str(",\n")?;
            }
            f.write_str("  ")?;
            for (i, byte) in chunk.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "0x{byte:02X}")?;
            }
        }
        if !self.payload.is_empty() {
            f.write_char('\n')?;
        }
        writeln!(f, "}};")
    }
}

impl fmt::Display for HeaderDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.identifier.guard();

        writeln!(f, "#ifndef {guard}")?;
        writeln!(f, "#define {guard}")?;
        writeln!(f)?;

        writeln!(f, "// This file was generated by {GENERATOR} (gzip -> C array)")?;
        f.write_str("// Gzip generated on: ")?;
        // Keep the comment on a single line whatever the caller passed.
        for c in self.timestamp.chars() {
            f.write_char(if c.is_control() { ' ' } else { c })?;
        }
        f.write_str("\n\n")?;

        self.write_array(f)?;
        writeln!(f)?;

        writeln!(
            f,
            "unsigned int {} = {};",
            self.identifier.len_symbol(),
            self.payload.len()
        )?;
        writeln!(f)?;

        writeln!(f, "#endif // {guard}")
    }
}

/// Renders the header text for `payload` under `identifier`.
#[must_use]
pub fn emit(identifier: &Identifier, payload: &[u8], timestamp: &str) -> String {
    HeaderDocument::new(identifier, payload, timestamp).to_string()
}
