//! Turn a static file into a gzip-compressed C header.
//!
//! This crate converts a file (usually an HTML page) into a C-family header
//! that embeds the file's gzip-compressed bytes as an `unsigned char` array
//! plus its length. A firmware web server can then include the header and
//! serve the page straight from flash with `Content-Encoding: gzip`, without
//! any filesystem.
//!
//! ## How It Works
//!
//! 1.  **Sanitize:** The input's base name (`index` for `index.html`) is turned
//!     into a valid C identifier, see [`Identifier`].
//! 2.  **Compress:** The file is gzip-compressed at the highest level, see
//!     [`compress`]. The gzip timestamp field is zeroed so output is
//!     reproducible.
//! 3.  **Emit:** The payload is rendered as a guarded header with a byte array
//!     (`page_<name>`) and a length constant (`page_<name>_len`), see
//!     [`emit`].
//!
//! The [`Config`] builder runs the whole pipeline and writes the header
//! atomically into a `pages` directory.
//!
//! ## Usage
//!
//! From the command line:
//!
//! ```text
//! page_embed index.html
//! Generated: /path/to/tool/pages/page_index.h
//! ```
//!
//! From a build script:
//!
//! ```no_run
//! // build.rs
//! page_embed::Config::new("web/index.html")
//!     .out_dir("firmware/include/pages")
//!     .build()
//!     .expect("Failed to generate page header");
//! ```
//!
//! The generated header is consumed from C like this:
//!
//! ```c
//! #include "page_index.h"
//!
//! server.send_P(200, "text/html", page_index, page_index_len, "gzip");
//! ```

mod compress;
mod generate;
mod header;
mod ident;

pub use compress::{BEST_LEVEL, compress, compress_with_level};
pub use generate::{Config, Error, Generated, Result, TIMESTAMP_FORMAT};
pub use header::{HeaderDocument, emit};
pub use ident::{Identifier, sanitize};
