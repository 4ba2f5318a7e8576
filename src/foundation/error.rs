/// Convenience result type used across Troop.
pub type TroopResult<T> = Result<T, TroopError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum TroopError {
    /// Malformed or unreadable wardrobe catalog data.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Invalid selection operations (e.g. unknown catalog entries).
    #[error("selection error: {0}")]
    Selection(String),

    /// Failures while fetching or decoding a layer image. The message names
    /// the offending source path.
    #[error("layer load error: {0}")]
    Load(String),

    /// Failures while encoding or writing the exported composite.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TroopError {
    /// Build a [`TroopError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`TroopError::Selection`] value.
    pub fn selection(msg: impl Into<String>) -> Self {
        Self::Selection(msg.into())
    }

    /// Build a [`TroopError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`TroopError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
