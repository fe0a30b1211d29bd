use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::OpenError;

/// Path the engine treats as a non-persistent, in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Whether a database is opened for reading only or for reading and writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

impl AccessMode {
    pub fn is_read_only(self) -> bool {
        self == Self::ReadOnly
    }
}

impl From<bool> for AccessMode {
    fn from(read_only: bool) -> Self {
        if read_only {
            Self::ReadOnly
        } else {
            Self::ReadWrite
        }
    }
}

impl From<AccessMode> for bool {
    fn from(mode: AccessMode) -> Self {
        mode.is_read_only()
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "read-only"),
            Self::ReadWrite => write!(f, "read-write"),
        }
    }
}

/// Engine settings applied when opening a database.
///
/// Unset limits keep the engine's own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    pub mode: AccessMode,
    /// Buffer pool size in megabytes.
    pub buffer_pool_mb: Option<u64>,
    pub max_threads: Option<u64>,
}

impl OpenOptions {
    pub fn new(read_only: bool) -> Self {
        Self {
            mode: AccessMode::from(read_only),
            buffer_pool_mb: None,
            max_threads: None,
        }
    }

    pub fn buffer_pool_mb(mut self, mb: u64) -> Self {
        self.buffer_pool_mb = Some(mb);
        self
    }

    pub fn max_threads(mut self, threads: u64) -> Self {
        self.max_threads = Some(threads);
        self
    }

    /// Buffer pool size in bytes, saturating at `u64::MAX`.
    pub fn buffer_pool_bytes(&self) -> Option<u64> {
        self.buffer_pool_mb.map(|mb| mb.saturating_mul(1024 * 1024))
    }

    fn system_config(&self) -> lbug::SystemConfig {
        let mut config = lbug::SystemConfig::default().read_only(self.mode.is_read_only());
        if let Some(bytes) = self.buffer_pool_bytes() {
            config = config.buffer_pool_size(bytes);
        }
        if let Some(threads) = self.max_threads {
            config = config.max_num_threads(threads);
        }
        config
    }
}

/// An opened LadybugDB database together with the right to connect to it.
///
/// Connections borrow the database, so they can never outlive it. Dropping
/// this value releases the database and any locks the engine holds on the path.
pub struct GraphConnection {
    db: lbug::Database,
    path: PathBuf,
    mode: AccessMode,
}

impl GraphConnection {
    /// Create a connection bound to this database.
    pub fn connect(&self) -> Result<lbug::Connection<'_>, OpenError> {
        lbug::Connection::new(&self.db).map_err(|source| OpenError::Connection {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// The storage location as it was passed to the engine.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn access_mode(&self) -> AccessMode {
        self.mode
    }

    /// Whether the engine treats this path as non-persistent (`:memory:` or empty).
    pub fn is_in_memory(&self) -> bool {
        let raw = self.path.as_os_str();
        raw.is_empty() || raw == IN_MEMORY_PATH
    }

    /// Release the database. Same as dropping it.
    pub fn close(self) {
        debug!(path = %self.path.display(), "Closing graph database");
    }
}

impl std::fmt::Debug for GraphConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConnection")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Open (or, in read-write mode, create) the database at `path` and connect to it.
///
/// The path is handed to the engine as is. Every failure is the engine's,
/// carried unchanged as the error's source.
pub fn open(path: impl AsRef<Path>, read_only: bool) -> Result<GraphConnection, OpenError> {
    open_with_config(path, OpenOptions::new(read_only))
}

/// Open a non-persistent database that lives only as long as the returned value.
pub fn open_in_memory() -> Result<GraphConnection, OpenError> {
    open_with_config(IN_MEMORY_PATH, OpenOptions::new(false))
}

/// Open the database at `path` with explicit engine settings.
pub fn open_with_config(
    path: impl AsRef<Path>,
    options: OpenOptions,
) -> Result<GraphConnection, OpenError> {
    let path = path.as_ref();
    debug!(path = %path.display(), mode = %options.mode, "Opening graph database");

    let db = lbug::Database::new(path, options.system_config()).map_err(|source| {
        warn!(path = %path.display(), error = %source, "Engine refused to open database");
        OpenError::Database {
            path: path.display().to_string(),
            source,
        }
    })?;

    let handle = GraphConnection {
        db,
        path: path.to_path_buf(),
        mode: options.mode,
    };

    // A database the engine will not connect to is not handed out.
    if let Err(e) = handle.connect() {
        warn!(path = %path.display(), error = %e.engine(), "Engine refused connection");
        return Err(e);
    }

    info!(path = %path.display(), mode = %options.mode, "Opened graph database");
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_mode_from_flag() {
        assert_eq!(AccessMode::from(true), AccessMode::ReadOnly);
        assert_eq!(AccessMode::from(false), AccessMode::ReadWrite);
        assert!(bool::from(AccessMode::ReadOnly));
        assert!(!bool::from(AccessMode::ReadWrite));
        assert_eq!(AccessMode::ReadOnly.to_string(), "read-only");
    }

    #[test]
    fn options_default_to_engine_limits() {
        let opts = OpenOptions::new(true);
        assert_eq!(opts.mode, AccessMode::ReadOnly);
        assert_eq!(opts.buffer_pool_mb, None);
        assert_eq!(opts.max_threads, None);

        let opts = OpenOptions::new(false).buffer_pool_mb(256).max_threads(2);
        assert_eq!(opts.buffer_pool_mb, Some(256));
        assert_eq!(opts.max_threads, Some(2));
    }

    #[test]
    fn buffer_pool_size_saturates() {
        let opts = OpenOptions::new(false).buffer_pool_mb(u64::MAX);
        assert_eq!(opts.buffer_pool_bytes(), Some(u64::MAX));
        let _ = opts.system_config();

        let opts = OpenOptions::new(false).buffer_pool_mb(64);
        assert_eq!(opts.buffer_pool_bytes(), Some(64 * 1024 * 1024));
        assert_eq!(OpenOptions::new(false).buffer_pool_bytes(), None);
    }

    #[test]
    fn empty_path_opens_in_memory() {
        let graph = open("", false).unwrap();
        assert!(graph.is_in_memory());
        graph.connect().unwrap();
    }

    #[test]
    fn open_creates_database_read_write() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("db");
        let graph = open(&db_path, false).unwrap();
        assert_eq!(graph.path(), db_path.as_path());
        assert_eq!(graph.access_mode(), AccessMode::ReadWrite);
        assert!(!graph.is_in_memory());
        assert!(db_path.exists());
        graph.connect().unwrap();
    }

    #[test]
    fn read_only_open_of_missing_database_fails() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("absent");
        let err = open(&db_path, true).unwrap_err();
        assert!(err.is_database_error());
        assert_eq!(err.path(), db_path.display().to_string());
    }

    #[test]
    fn in_memory_database_accepts_writes() {
        let graph = open_in_memory().unwrap();
        assert!(graph.is_in_memory());
        assert_eq!(graph.access_mode(), AccessMode::ReadWrite);
        let conn = graph.connect().unwrap();
        conn.query("CREATE NODE TABLE Person(name STRING, PRIMARY KEY(name))")
            .unwrap();
        conn.query("CREATE (:Person {name: 'Ada'})").unwrap();
        let mut result = conn.query("MATCH (p:Person) RETURN p.name").unwrap();
        assert!(result.next().is_some());
        assert!(result.next().is_none());
    }

    #[test]
    fn engine_limits_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let opts = OpenOptions::new(false).buffer_pool_mb(64).max_threads(1);
        let graph = open_with_config(dir.path().join("db"), opts).unwrap();
        graph.connect().unwrap();
    }
}
