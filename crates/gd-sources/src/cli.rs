//! Command-line entry shared by the two server binaries

use clap::Parser;
use gd_mcp::McpServer;
use gd_tools::ToolRegistry;
use gd_utils::{ServerSettings, Transport};
use std::path::PathBuf;
use tracing::info;

use crate::config::SourceConfig;
use crate::context::SourceContext;
use crate::error::Result;
use crate::tools::{ai_hub_registry, social_media_registry};

/// Options accepted by both servers
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind the HTTP transport to
    #[arg(long, env = "GLOBALDATA_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the HTTP transport (defaults to the unit's port)
    #[arg(short, long, env = "GLOBALDATA_PORT")]
    pub port: Option<u16>,

    /// Transport to serve on: http or stdio
    #[arg(short, long, env = "GLOBALDATA_TRANSPORT", default_value = "http")]
    pub transport: Transport,

    /// JSON config file; environment variables override its values
    #[arg(short, long, env = "GLOBALDATA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// One deployable server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// AI Hub question answering
    AiHub,
    /// Social-media analytics
    SocialMedia,
}

impl Unit {
    /// Server name announced to MCP clients
    pub fn server_name(self) -> &'static str {
        match self {
            Self::AiHub => "GetAIHubApi",
            Self::SocialMedia => "web-search",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Self::AiHub => 1111,
            Self::SocialMedia => 10000,
        }
    }

    /// Build this unit's tools from the loaded configuration
    pub fn registry(self, config: &SourceConfig) -> Result<ToolRegistry> {
        Ok(match self {
            Self::AiHub => ai_hub_registry(&SourceContext::ai_hub(config)?),
            Self::SocialMedia => social_media_registry(&SourceContext::social_media(config)?),
        })
    }

    /// Server settings from command-line options
    pub fn settings(self, args: &ServeArgs) -> ServerSettings {
        ServerSettings::new(self.server_name(), env!("CARGO_PKG_VERSION"), self.default_port())
            .with_host(args.host.clone())
            .with_port(args.port.unwrap_or(self.default_port()))
            .with_transport(args.transport)
    }
}

/// Load configuration, register tools and serve until shutdown
pub async fn serve(unit: Unit, args: ServeArgs) -> anyhow::Result<()> {
    gd_utils::init_tracing();

    let config = SourceConfig::load(args.config.as_deref())?;
    let registry = unit.registry(&config)?;
    let settings = unit.settings(&args);

    info!(
        "Starting {} with {} tools over {}",
        settings.name,
        registry.len(),
        settings.transport
    );

    McpServer::new(&settings, registry).run(&settings).await?;
    Ok(())
}
