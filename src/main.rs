use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voxelpath::server::{serve, ServerConfig};

/// Voxel pathfinding playground server.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[clap(long, default_value = "8080")]
    port: u16,

    /// Directory with the static frontend; omit to serve the API only
    #[clap(long)]
    frontend: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    serve(ServerConfig {
        port: args.port,
        frontend_dir: args.frontend,
    })
}
