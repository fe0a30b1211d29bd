/// Errors raised while opening a graph database.
///
/// The engine's own error is always kept as the `source`, unchanged. Variants
/// only record which step refused and for which path.
#[derive(Debug)]
pub enum OpenError {
    /// The engine could not open (or create) the database at `path`.
    Database { path: String, source: lbug::Error },

    /// The database opened, but the engine refused a connection to it.
    Connection { path: String, source: lbug::Error },
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database { path, source } => {
                write!(f, "Failed to open database at {path}: {source}")
            }
            Self::Connection { path, source } => {
                write!(f, "Failed to create connection to {path}: {source}")
            }
        }
    }
}

impl std::error::Error for OpenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.engine())
    }
}

impl OpenError {
    /// The path that was passed to the engine.
    pub fn path(&self) -> &str {
        match self {
            Self::Database { path, .. } | Self::Connection { path, .. } => path,
        }
    }

    /// The engine error exactly as it was raised.
    pub fn engine(&self) -> &lbug::Error {
        match self {
            Self::Database { source, .. } | Self::Connection { source, .. } => source,
        }
    }

    pub fn into_engine(self) -> lbug::Error {
        match self {
            Self::Database { source, .. } | Self::Connection { source, .. } => source,
        }
    }

    /// Whether the failure happened before a database handle existed.
    pub fn is_database_error(&self) -> bool {
        matches!(self, Self::Database { .. })
    }
}
