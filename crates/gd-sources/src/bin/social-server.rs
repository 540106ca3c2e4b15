//! MCP server exposing the GlobalData social-media analytics tools

use clap::Parser;
use gd_sources::cli::{ServeArgs, Unit, serve};

#[derive(Parser, Debug)]
#[command(name = "social-server")]
#[command(about = "GlobalData social-media analytics tools over MCP", long_about = None)]
struct Args {
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    serve(Unit::SocialMedia, args.serve).await
}
