use std::fmt;

/// Errors raised while looking up or registering themes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("Unknown theme '{0}'")]
    Unknown(String),

    #[error("Theme '{0}' is registered more than once")]
    Duplicate(String),
}

/// The transformation stage a `BuildError` originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Parse,
    Transform,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Parse => "parse",
            BuildStage::Transform => "transform",
        };
        f.write_str(name)
    }
}

/// The transformer could not produce any markup for the given source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Build failed in {stage} stage: {message}")]
pub struct BuildError {
    pub stage: BuildStage,
    pub message: String,
}

/// Packaging or save handoff failed. Nothing was handed to the save target.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[cfg(feature = "archive")]
    #[error("Failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error while bundling: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bundle already contains an entry named '{0}'")]
    DuplicateEntry(String),

    #[error("Failed to save '{name}': {message}")]
    Save { name: String, message: String },

    #[error("Archive task did not complete: {0}")]
    Join(String),
}

/// Top-level failure of a `build` request.
#[derive(Debug, thiserror::Error)]
pub enum BuildFailure {
    #[error("Another build is already in progress")]
    Busy,

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Bundle(#[from] BundleError),
}
