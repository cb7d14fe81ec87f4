//! Compile-time page embedding for Rust firmware.
//!
//! The Rust-side counterpart of the headers written by `page_embed`: the same
//! gzip payload, embedded straight into the binary.
use std::{env, fs, path::PathBuf};

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Embeds a file gzip-compressed at the highest level.
///
/// This macro takes a single string literal which must be a path to the file,
/// relative to the crate root (`CARGO_MANIFEST_DIR`). Absolute paths are used
/// as given.
///
/// It expands to an expression of type `&'static [u8]` holding the gzip
/// stream, ready to be served with `Content-Encoding: gzip`.
///
/// ```ignore
/// use page_embed_macros::include_page;
///
/// static INDEX: &[u8] = include_page!("web/index.html");
/// ```
///
/// # Compile errors
///
/// Expansion fails if the file cannot be read or compressed.
#[proc_macro]
pub fn include_page(input: TokenStream) -> TokenStream {
    let lit_str = parse_macro_input!(input as LitStr);
    get_tokens(&lit_str).into()
}

fn get_tokens(lit_str: &LitStr) -> TokenStream2 {
    let path = match resolve_path(env::var("CARGO_MANIFEST_DIR").ok().as_deref(), &lit_str.value()) {
        Ok(path) => path,
        Err(msg) => return syn::Error::new(lit_str.span(), msg).to_compile_error(),
    };

    let content = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            let msg = format!("include_page: could not read '{}': {err}", path.display());
            return syn::Error::new(lit_str.span(), msg).to_compile_error();
        }
    };

    let compressed = match page_embed::compress(&content) {
        Ok(bytes) => bytes,
        Err(err) => {
            let msg = format!("include_page: could not compress '{}': {err}", path.display());
            return syn::Error::new(lit_str.span(), msg).to_compile_error();
        }
    };
    let compressed_len = compressed.len();
    let path_lit = path.display().to_string();

    quote! {
        {
            // Rebuild when the page changes.
            const _: &[u8] = include_bytes!(#path_lit);
            const PAGE: &[u8; #compressed_len] = &[#(#compressed),*];
            PAGE as &'static [u8]
        }
    }
}

/// Joins `path` onto the crate root; absolute paths are kept as given.
fn resolve_path(manifest_dir: Option<&str>, path: &str) -> Result<PathBuf, &'static str> {
    let manifest_dir = manifest_dir
        .ok_or("include_page: CARGO_MANIFEST_DIR is not set; this macro must be run by Cargo")?;
    Ok(PathBuf::from(manifest_dir).join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn relative_path_joins_manifest_dir() {
        let path = resolve_path(Some("/work/firmware"), "web/index.html").unwrap();
        assert_eq!(path, Path::new("/work/firmware/web/index.html"));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_path_is_kept() {
        let path = resolve_path(Some("/work/firmware"), "/srv/index.html").unwrap();
        assert_eq!(path, Path::new("/srv/index.html"));
    }

    #[test]
    fn missing_manifest_dir_is_an_error() {
        let err = resolve_path(None, "web/index.html").unwrap_err();
        assert!(err.contains("CARGO_MANIFEST_DIR"));
    }
}
