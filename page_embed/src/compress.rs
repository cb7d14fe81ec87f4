use std::io::{self, Write};

use flate2::{Compression, GzBuilder};

/// The gzip level used unless configured otherwise.
pub const BEST_LEVEL: u32 = 9;

/// Gzip-compresses `bytes` at [`BEST_LEVEL`].
///
/// # Errors
/// Propagates encoder errors. Writing into memory does not fail in practice.
pub fn compress(bytes: &[u8]) -> io::Result<Vec<u8>> {
    compress_with_level(bytes, BEST_LEVEL)
}

/// Gzip-compresses `bytes` at `level` (0-9).
///
/// The gzip header carries an MTIME of zero and no file name, so identical
/// input always produces identical output.
///
/// # Errors
/// Returns [`io::ErrorKind::InvalidInput`] for a level above [`BEST_LEVEL`].
/// Otherwise propagates encoder errors, which do not occur when writing into
/// memory.
pub fn compress_with_level(bytes: &[u8], level: u32) -> io::Result<Vec<u8>> {
    if level > BEST_LEVEL {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("gzip level {level} is out of range (0-9)"),
        ));
    }
    let mut encoder = GzBuilder::new()
        .mtime(0)
        .write(Vec::with_capacity(bytes.len() / 2 + 32), Compression::new(level));
    encoder.write_all(bytes)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use proptest::prelude::*;
    use std::io::Read;

    fn gunzip(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn gzip_magic_and_zero_mtime() {
        let data = compress(b"<html></html>\n").unwrap();
        assert_eq!(&data[..3], &[0x1F, 0x8B, 0x08]);
        assert_eq!(&data[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn reproducible() {
        let page = b"<!doctype html><title>setup</title>".repeat(40);
        assert_eq!(compress(&page).unwrap(), compress(&page).unwrap());
    }

    #[test]
    fn best_level_is_not_larger_than_fast() {
        let page = b"<li>network</li>".repeat(200);
        let best = compress(&page).unwrap();
        let fast = compress_with_level(&page, 1).unwrap();
        assert!(best.len() <= fast.len());
        assert_eq!(gunzip(&fast), page);
    }

    #[test]
    fn level_above_best_is_rejected() {
        let err = compress_with_level(b"page", 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(compress_with_level(b"page", 0).is_ok());
    }

    proptest! {
        #[test]
        fn round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..4096)) {
            prop_assert_eq!(gunzip(&compress(&bytes).unwrap()), bytes);
        }
    }
}
