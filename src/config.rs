use clap::Parser;
use std::path::PathBuf;

use crate::backend::OpenOptions;

#[derive(Parser, Debug)]
#[command(
    name = "graph-connect",
    about = "Open an embedded graph database and report whether the engine accepts it"
)]
pub struct Config {
    /// Path to the graph database. Created if it doesn't exist (read-write only).
    /// Ignored when --in-memory is given.
    #[arg(env = "GRAPH_CONNECT_PATH", required_unless_present = "in_memory")]
    pub path: Option<PathBuf>,

    /// Open the database read-only. Fails if no database exists at the path.
    #[arg(long, env = "GRAPH_CONNECT_READ_ONLY")]
    pub read_only: bool,

    /// Open a non-persistent in-memory database instead of a path.
    #[arg(long, conflicts_with = "read_only")]
    pub in_memory: bool,

    /// Engine buffer pool size in megabytes. Engine default if unset.
    #[arg(
        long,
        env = "GRAPH_CONNECT_BUFFER_POOL_MB",
        value_parser = clap::value_parser!(u64).range(1..=u64::MAX >> 20)
    )]
    pub buffer_pool_mb: Option<u64>,

    /// Maximum engine worker threads. Engine default if unset.
    #[arg(long, env = "GRAPH_CONNECT_MAX_THREADS")]
    pub max_threads: Option<u64>,
}

impl Config {
    /// Engine settings described by these flags.
    pub fn open_options(&self) -> OpenOptions {
        let mut opts = OpenOptions::new(self.read_only);
        if let Some(mb) = self.buffer_pool_mb {
            opts = opts.buffer_pool_mb(mb);
        }
        if let Some(threads) = self.max_threads {
            opts = opts.max_threads(threads);
        }
        opts
    }
}
