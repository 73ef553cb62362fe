//! Error types for the build pipeline.

use std::path::PathBuf;

/// Errors surfaced by the build pipeline.
///
/// Validation errors (`SourceNotFound`, `TemplateNotFound`, `MissingPath`)
/// are raised before any output directory is created. `Conversion` is fatal
/// to the PDF artifact only; artifacts already written stay on disk.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed config file or an option that cannot be resolved.
    #[error("config error: {0}")]
    Config(String),

    /// No YAML data files found for the requested source.
    #[error("no YAML source files for \"{name}\" in {}", dir.display())]
    SourceNotFound { name: String, dir: PathBuf },

    /// The selected template file does not exist.
    #[error("template \"{name}\" not found in {}", dir.display())]
    TemplateNotFound { name: String, dir: PathBuf },

    /// A required path is missing (source dir, templates dir).
    #[error("path does not exist: {}", .0.display())]
    MissingPath(PathBuf),

    /// Overwrite-mode cleanup could not remove a file, e.g. it is held open
    /// by another process.
    #[error("cannot remove {}: {message}. Please close the file and retry", path.display())]
    PermissionDenied { path: PathBuf, message: String },

    /// A YAML data file could not be parsed.
    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The external HTML-to-PDF converter failed.
    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    /// Template rendering failed.
    #[error("failed to render template \"{name}\": {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// I/O failure with the offending path attached.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
