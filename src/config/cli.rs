use crate::config::toml_config::TomlConfig;
use crate::config::{ConfigOverrides, SiteConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "tmj-site")]
#[command(about = "Marketing site for Staten Island TMJ")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "TMJ_SITE_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "TMJ_SITE_PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "SUPABASE_URL", help = "Base URL of the hosted data service")]
    pub service_url: Option<String>,

    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            service_url: self.service_url.clone(),
            api_key: self.api_key.clone(),
        }
    }

    pub fn load(&self) -> Result<SiteConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        SiteConfig::resolve(file, self.overrides())
    }
}
