//! MCP server exposing the GlobalData AI Hub tools

use clap::Parser;
use gd_sources::cli::{ServeArgs, Unit, serve};

#[derive(Parser, Debug)]
#[command(name = "aihub-server")]
#[command(about = "GlobalData AI Hub tools over MCP", long_about = None)]
struct Args {
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    serve(Unit::AiHub, args.serve).await
}
