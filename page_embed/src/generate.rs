//! The end-to-end pipeline: read, compress, render, write.
use std::{
    env,
    ffi::OsString,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{BEST_LEVEL, Identifier, compress_with_level, emit};

/// Name of the directory headers are written into by default.
const PAGES_DIR: &str = "pages";

/// `strftime` format of the default generation timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

//
// ==================== PUBLIC BUILDER API ====================
//

/// A builder for generating one page header.
///
/// # Example
/// ```no_run
/// let generated = page_embed::Config::new("web/index.html")
///     .out_dir("include/pages")
///     .timestamp("release")
///     .build()
///     .expect("Failed to generate page header");
/// println!("wrote {}", generated.path.display());
/// ```
#[derive(Debug)]
pub struct Config {
    input: PathBuf,
    out_dir: Option<PathBuf>,
    level: u32,
    timestamp: Option<String>,
}

impl Config {
    /// Creates a new configuration for the file at `input`.
    pub fn new(input: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            out_dir: None,
            level: BEST_LEVEL,
            timestamp: None,
        }
    }

    /// Sets the directory the header is written into.
    ///
    /// Defaults to a `pages` directory next to the running executable. The
    /// directory is created if it does not exist.
    #[must_use]
    pub fn out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets the gzip compression level (0-9).
    ///
    /// If not set, the maximum level `9` is used.
    #[must_use]
    pub const fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Sets the text recorded in the header's "generated on" comment.
    ///
    /// Defaults to the current local time formatted with [`TIMESTAMP_FORMAT`].
    /// Pinning it makes the whole header reproducible.
    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Runs the pipeline and writes `page_<base>.h`.
    ///
    /// Every check on the input happens before the output directory is
    /// touched, so a failed run has no side effects. The header is written to
    /// a temporary file and renamed into place, replacing any previous one.
    ///
    /// # Errors
    /// Returns an [`Error`] if the input is missing or unreadable, the level is
    /// out of range, or the header cannot be written.
    pub fn build(self) -> Result<Generated> {
        if self.level > BEST_LEVEL {
            return Err(Error::InvalidLevel(self.level));
        }

        let metadata = fs::metadata(&self.input).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::NotFound(self.input.clone())
            } else {
                Error::Read {
                    path: self.input.clone(),
                    source: e,
                }
            }
        })?;
        if !metadata.is_file() {
            return Err(Error::UnsupportedFileType(self.input));
        }

        let base = base_name(&self.input).ok_or_else(|| Error::EmptyBaseName(self.input.clone()))?;
        let identifier = Identifier::from_name(&base.to_string_lossy())
            .ok_or_else(|| Error::EmptyBaseName(self.input.clone()))?;

        let out_dir = match self.out_dir {
            Some(dir) => dir,
            None => default_out_dir()?,
        };
        let mut file_name = OsString::from("page_");
        file_name.push(&base);
        file_name.push(".h");
        let path = out_dir.join(file_name);

        let raw = fs::read(&self.input).map_err(|source| Error::Read {
            path: self.input.clone(),
            source,
        })?;
        let payload = compress_with_level(&raw, self.level).map_err(Error::Compress)?;
        debug!(
            "compressed {} from {} to {} bytes at level {}",
            self.input.display(),
            raw.len(),
            payload.len(),
            self.level
        );

        let timestamp = self
            .timestamp
            .unwrap_or_else(|| chrono::Local::now().format(TIMESTAMP_FORMAT).to_string());
        let text = emit(&identifier, &payload, &timestamp);

        fs::create_dir_all(&out_dir).map_err(|source| Error::CreateDir {
            path: out_dir.clone(),
            source,
        })?;
        write_atomic(&out_dir, &path, text.as_bytes())?;

        let path = std::path::absolute(&path).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        info!("wrote {} as `{}`", path.display(), identifier.array_symbol());

        Ok(Generated {
            path,
            identifier,
            original_len: raw.len(),
            compressed_len: payload.len(),
        })
    }
}

/// The outcome of a successful [`Config::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Absolute path of the written header.
    pub path: PathBuf,
    /// Identifier behind `page_<identifier>` and `page_<identifier>_len`.
    pub identifier: Identifier,
    /// Size of the input file in bytes.
    pub original_len: usize,
    /// Size of the embedded gzip payload in bytes.
    pub compressed_len: usize,
}

/// A specialized `Result` type for page generation.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while generating a page header.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("'{}' is not a regular file", .0.display())]
    UnsupportedFileType(PathBuf),
    #[error("'{}' has no base name to derive a symbol from", .0.display())]
    EmptyBaseName(PathBuf),
    #[error("compression level {0} is out of range (0-9)")]
    InvalidLevel(u32),
    #[error("could not locate the executable to place the pages directory next to")]
    ToolDir(#[source] io::Error),
    #[error("could not read '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("gzip compression failed")]
    Compress(#[source] io::Error),
    #[error("could not create directory '{}'", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

//
// ==================== INTERNALS ====================
//

/// File name without its last extension, like Python's `splitext`.
fn base_name(path: &Path) -> Option<OsString> {
    path.file_stem()
        .filter(|stem| !stem.is_empty())
        .map(ToOwned::to_owned)
}

/// `<directory of the running executable>/pages`.
fn default_out_dir() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(Error::ToolDir)?;
    let dir = exe.parent().ok_or_else(|| {
        Error::ToolDir(io::Error::new(
            io::ErrorKind::NotFound,
            "executable path has no parent directory",
        ))
    })?;
    Ok(dir.join(PAGES_DIR))
}

fn write_atomic(dir: &Path, path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let previous = fs::metadata(path).ok().map(|meta| meta.permissions());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Requested like `fs::write` does, so the umask applies on creation.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    if let Some(permissions) = previous {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
