use std::env;

use thiserror::Error;

use crate::models::media::CdnConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmsBackend {
    Sanity,
    Memory,
}

#[derive(Debug, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub token: String,
    pub database_id: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub public_base_url: String,
    pub cms_backend: CmsBackend,
    pub sanity: SanityConfig,
    pub jwt_secret: String,
    pub admin_full_password_hash: String,
    pub admin_local_password_hash: String,
    pub notion: Option<NotionConfig>,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn init() -> Result<Self, ConfigError> {
        let cms_backend = match optional("CMS_BACKEND").as_deref() {
            None | Some("sanity") => CmsBackend::Sanity,
            Some("memory") => CmsBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "CMS_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let project_id = match cms_backend {
            CmsBackend::Sanity => required("SANITY_PROJECT_ID")?,
            CmsBackend::Memory => optional("SANITY_PROJECT_ID").unwrap_or_else(|| "local".to_string()),
        };

        let port = match optional("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => 3000,
        };

        let notion = match (optional("NOTION_TOKEN"), optional("NOTION_DATABASE_ID")) {
            (Some(token), Some(database_id)) => Some(NotionConfig { token, database_id }),
            _ => None,
        };

        Ok(Config {
            host: optional("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            public_base_url: optional("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            cms_backend,
            sanity: SanityConfig {
                project_id,
                dataset: optional("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
                api_version: optional("SANITY_API_VERSION")
                    .unwrap_or_else(|| "2024-01-01".to_string()),
                token: optional("SANITY_TOKEN"),
            },
            jwt_secret: required("JWT_SECRET")?,
            admin_full_password_hash: required("ADMIN_FULL_PASSWORD_HASH")?,
            admin_local_password_hash: required("ADMIN_LOCAL_PASSWORD_HASH")?,
            notion,
        })
    }

    pub fn cdn(&self) -> CdnConfig {
        CdnConfig {
            project_id: self.sanity.project_id.clone(),
            dataset: self.sanity.dataset.clone(),
        }
    }
}
