use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use spaces_core::AppError;
use spaces_infrastructure::KibanaClientConfig;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub kibana: KibanaClientConfig,
    pub server_base_path: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub read_only: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kibana_url = lookup("KIBANA_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation("KIBANA_URL is required".to_owned()))?;
        let base_url = Url::parse(&kibana_url)
            .map_err(|error| AppError::Validation(format!("invalid KIBANA_URL: {error}")))?;

        let timeout_seconds = match lookup("ROLES_API_TIMEOUT_SECONDS") {
            Some(value) => value.parse::<u64>().map_err(|error| {
                AppError::Validation(format!("invalid ROLES_API_TIMEOUT_SECONDS: {error}"))
            })?,
            None => 15,
        };

        let kibana = KibanaClientConfig {
            base_url,
            username: lookup("KIBANA_USERNAME").filter(|value| !value.is_empty()),
            password: lookup("KIBANA_PASSWORD"),
            timeout: Duration::from_secs(timeout_seconds),
        };

        let server_base_path = lookup("SERVER_BASE_PATH").unwrap_or_default();
        if !server_base_path.is_empty() && !server_base_path.starts_with('/') {
            return Err(AppError::Validation(
                "SERVER_BASE_PATH must start with a /".to_owned(),
            ));
        }

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = lookup("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let read_only = lookup("SPACES_READ_ONLY")
            .unwrap_or_else(|| "false".to_owned())
            .eq_ignore_ascii_case("true");

        Ok(Self {
            kibana,
            server_base_path,
            frontend_url,
            api_host,
            api_port,
            read_only,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use spaces_core::AppError;

    use super::ApiConfig;

    fn load(values: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = values
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_kibana_url_is_set() {
        let config = load(&[("KIBANA_URL", "http://localhost:5601")])
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_port, 3001);
        assert_eq!(config.server_base_path, "");
        assert_eq!(config.kibana.timeout, Duration::from_secs(15));
        assert!(config.kibana.username.is_none());
        assert!(!config.read_only);
        assert!(config.socket_address().is_ok());
    }

    #[test]
    fn missing_or_invalid_values_are_rejected() {
        assert!(matches!(load(&[]), Err(AppError::Validation(_))));
        assert!(matches!(
            load(&[("KIBANA_URL", "not a url")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[
                ("KIBANA_URL", "http://localhost:5601"),
                ("SERVER_BASE_PATH", "kbn"),
            ]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[
                ("KIBANA_URL", "http://localhost:5601"),
                ("ROLES_API_TIMEOUT_SECONDS", "soon"),
            ]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn read_only_and_credentials_are_read() {
        let config = load(&[
            ("KIBANA_URL", "http://localhost:5601"),
            ("KIBANA_USERNAME", "elastic"),
            ("KIBANA_PASSWORD", "changeme"),
            ("SPACES_READ_ONLY", "TRUE"),
            ("SERVER_BASE_PATH", "/kbn"),
        ])
        .unwrap_or_else(|_| unreachable!());

        assert!(config.read_only);
        assert_eq!(config.kibana.username.as_deref(), Some("elastic"));
        assert_eq!(config.server_base_path, "/kbn");
    }
}
