pub mod backend;
pub mod config;
pub mod error;

pub use backend::{
    open, open_in_memory, open_with_config, AccessMode, GraphConnection, OpenOptions,
};
pub use error::OpenError;
