#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::page::SiteContent;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::net::SocketAddr;
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TESTIMONIALS_COLLECTION: &str = "testimonials";
pub const DEFAULT_CONSULTATION_COLLECTION: &str = "consultation_requests";

/// Values supplied on the command line or through the environment.
/// They win over anything read from the TOML file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub service_url: Option<String>,
    pub api_key: Option<String>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub host: String,
    pub port: u16,
    pub service_url: String,
    pub api_key: String,
    pub testimonials_collection: String,
    pub consultation_collection: String,
    pub content: SiteContent,
}

impl SiteConfig {
    /// 合併預設值、TOML 檔案與命令列參數
    pub fn resolve(file: TomlConfig, overrides: ConfigOverrides) -> Result<Self> {
        let server = file.server.unwrap_or_default();
        let data = file.data_service.unwrap_or_default();

        let service_url = overrides.service_url.or(data.url);
        let api_key = overrides.api_key.or(data.api_key);
        let service_url = validation::validate_required_field("data_service.url", &service_url)?;
        let api_key = validation::validate_required_field("data_service.api_key", &api_key)?;

        let mut content = SiteContent::default();
        if let Some(site) = file.site {
            content.apply(site);
        }

        let config = Self {
            host: overrides
                .host
                .or(server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(server.port).unwrap_or(DEFAULT_PORT),
            service_url: service_url.trim_end_matches('/').to_string(),
            api_key: api_key.clone(),
            testimonials_collection: data
                .testimonials_collection
                .unwrap_or_else(|| DEFAULT_TESTIMONIALS_COLLECTION.to_string()),
            consultation_collection: data
                .consultation_collection
                .unwrap_or_else(|| DEFAULT_CONSULTATION_COLLECTION.to_string()),
            content,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| crate::utils::error::SiteError::InvalidConfigValueError {
                field: "server.host".to_string(),
                value: self.host.clone(),
                reason: format!("Invalid bind address: {}", e),
            })
    }
}

impl ConfigProvider for SiteConfig {
    fn service_url(&self) -> &str {
        &self.service_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn testimonials_collection(&self) -> &str {
        &self.testimonials_collection
    }

    fn consultation_collection(&self) -> &str {
        &self.consultation_collection
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_substituted("data_service.url", &self.service_url)?;
        validation::validate_url("data_service.url", &self.service_url)?;
        validation::validate_substituted("data_service.api_key", &self.api_key)?;
        validation::validate_non_empty_string("data_service.api_key", &self.api_key)?;
        validation::validate_non_empty_string(
            "data_service.testimonials_collection",
            &self.testimonials_collection,
        )?;
        validation::validate_non_empty_string(
            "data_service.consultation_collection",
            &self.consultation_collection,
        )?;
        validation::validate_positive_number("server.port", self.port as usize, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::{DataServiceConfig, ServerConfig, SiteContentConfig};
    use crate::utils::error::SiteError;

    fn file_with_service() -> TomlConfig {
        TomlConfig {
            server: Some(ServerConfig {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080),
            }),
            data_service: Some(DataServiceConfig {
                url: Some("https://abc.supabase.co/".to_string()),
                api_key: Some("file-key".to_string()),
                ..Default::default()
            }),
            site: None,
        }
    }

    #[test]
    fn test_resolve_uses_defaults_for_collections() {
        let config = SiteConfig::resolve(file_with_service(), ConfigOverrides::default()).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.service_url, "https://abc.supabase.co");
        assert_eq!(config.testimonials_collection, "testimonials");
        assert_eq!(config.consultation_collection, "consultation_requests");
        assert_eq!(config.content.brand, "Staten Island TMJ");
    }

    #[test]
    fn test_overrides_win_over_file() {
        let overrides = ConfigOverrides {
            port: Some(9000),
            api_key: Some("cli-key".to_string()),
            ..Default::default()
        };
        let config = SiteConfig::resolve(file_with_service(), overrides).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.api_key, "cli-key");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_missing_service_url_is_rejected() {
        let overrides = ConfigOverrides {
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        let err = SiteConfig::resolve(TomlConfig::default(), overrides).unwrap_err();
        assert!(matches!(err, SiteError::MissingConfigError { ref field } if field == "data_service.url"));
    }

    #[test]
    fn test_unresolved_placeholder_is_rejected() {
        let overrides = ConfigOverrides {
            service_url: Some("https://abc.supabase.co".to_string()),
            api_key: Some("${SUPABASE_ANON_KEY}".to_string()),
            ..Default::default()
        };
        assert!(SiteConfig::resolve(TomlConfig::default(), overrides).is_err());
    }

    #[test]
    fn test_unresolved_url_placeholder_is_named() {
        let overrides = ConfigOverrides {
            service_url: Some("${SUPABASE_URL}".to_string()),
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        let err = SiteConfig::resolve(TomlConfig::default(), overrides).unwrap_err();
        match err {
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                assert_eq!(field, "data_service.url");
                assert!(reason.contains("placeholder"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_site_copy_overrides() {
        let mut file = file_with_service();
        file.site = Some(SiteContentConfig {
            brand: Some("Jaw Clinic".to_string()),
            ..Default::default()
        });
        let config = SiteConfig::resolve(file, ConfigOverrides::default()).unwrap();

        assert_eq!(config.content.brand, "Jaw Clinic");
        assert_eq!(config.content.treatments.len(), 3);
    }

    #[test]
    fn test_bind_addr() {
        let config = SiteConfig::resolve(file_with_service(), ConfigOverrides::default()).unwrap();
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }
}
