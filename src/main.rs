use clap::Parser;
use std::path::PathBuf;

use graph_connect::backend::IN_MEMORY_PATH;
use graph_connect::config::Config;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graph_connect=info".into()),
        )
        .init();

    let config = Config::parse();

    let path = match config.path {
        Some(ref path) if !config.in_memory => path.clone(),
        _ => PathBuf::from(IN_MEMORY_PATH),
    };
    let opened = graph_connect::open_with_config(&path, config.open_options());

    match opened {
        Ok(graph) => graph.close(),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
