use std::env;

/// Where the prediction endpoint lives unless `PREDICT_URL` says otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// Environment variable overriding [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_VAR: &str = "PREDICT_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Reads the endpoint from `PREDICT_URL`, falling back to the default when it is unset
    /// or blank.
    pub fn from_env() -> Self {
        Self::from_var(env::var(ENDPOINT_VAR).ok())
    }

    fn from_var(value: Option<String>) -> Self {
        match value {
            Some(endpoint) if !endpoint.trim().is_empty() => Self::new(endpoint.trim()),
            _ => Self::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_falls_back_to_default() {
        assert_eq!(ClientConfig::from_var(None).endpoint, DEFAULT_ENDPOINT);
        assert_eq!(
            ClientConfig::from_var(Some("  ".into())).endpoint,
            DEFAULT_ENDPOINT
        );
    }

    #[test]
    fn test_endpoint_override() {
        let config = ClientConfig::from_var(Some("http://10.0.0.2:8080/predict ".into()));
        assert_eq!(config.endpoint, "http://10.0.0.2:8080/predict");
    }
}
