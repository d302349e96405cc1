use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub bootstrap: BootstrapConfig,
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub max_request_size_bytes: usize,
    pub upstream_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub bcrypt_cost: u32,
}

/// Administrator seeded by setup when the users table is empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub admin_name: String,
    pub admin_email: Option<String>,
    #[serde(skip_serializing)]
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    pub meeting_link_base: String,
    pub certificate_link: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Profile defaults first, specific env vars win
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(v) = env::var("DISPATCH_API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }
        if let Ok(v) = env::var("API_UPSTREAM_TIMEOUT_SECS") {
            self.api.upstream_timeout_secs = v.parse().unwrap_or(self.api.upstream_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }

        // Bootstrap administrator
        if let Ok(v) = env::var("ADMIN_NAME") {
            self.bootstrap.admin_name = v;
        }
        if let Ok(v) = env::var("ADMIN_EMAIL") {
            self.bootstrap.admin_email = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            self.bootstrap.admin_password = Some(v);
        }

        // Dispatch links
        if let Ok(v) = env::var("DISPATCH_MEETING_LINK_BASE") {
            self.dispatch.meeting_link_base = v;
        }
        if let Ok(v) = env::var("DISPATCH_CERTIFICATE_LINK") {
            self.dispatch.certificate_link = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 5,
            },
            api: ApiConfig {
                port: 3000,
                max_request_size_bytes: 1024 * 1024, // 1MB
                upstream_timeout_secs: 15,
            },
            security: SecurityConfig {
                jwt_secret: "development-secret-change-me".to_string(),
                jwt_expiry_hours: 8,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
            bootstrap: BootstrapConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
            },
            api: ApiConfig {
                port: 3000,
                max_request_size_bytes: 1024 * 1024,
                upstream_timeout_secs: 15,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 8,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
            bootstrap: BootstrapConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                port: 3000,
                max_request_size_bytes: 512 * 1024,
                upstream_timeout_secs: 10,
            },
            security: SecurityConfig {
                // Must come from JWT_SECRET
                jwt_secret: String::new(),
                jwt_expiry_hours: 8,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
            bootstrap: BootstrapConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_name: "Administrador".to_string(),
            admin_email: None,
            admin_password: None,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            meeting_link_base: "https://ar.syngularid.com.br/videoconferencia".to_string(),
            certificate_link: "https://mp.syngularid.com.br/protocol/emissao".to_string(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_profile_has_usable_secret() {
        let config = AppConfig::development();
        assert!(!config.security.jwt_secret.is_empty());
        assert_eq!(config.security.jwt_expiry_hours, 8);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn production_profile_requires_secret_from_env() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.security.jwt_expiry_hours, 8);
    }

    #[test]
    fn dispatch_links_default_to_gateway_hosts() {
        let dispatch = DispatchConfig::default();
        assert!(dispatch.meeting_link_base.ends_with("/videoconferencia"));
        assert!(dispatch.certificate_link.ends_with("/protocol/emissao"));
    }
}
