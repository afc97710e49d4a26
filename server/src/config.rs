use anyhow::{Context, Result};

use crate::codegen::DEFAULT_CODE_LENGTH;

/// Longest short code the service will generate.
const MAX_CODE_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public base URL used when generating short links, e.g. "https://go.example.com"
    /// Must NOT have a trailing slash.
    pub base_url: String,

    /// Number of characters in each generated short code
    pub code_length: usize,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = var("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let base_url = var("BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();

        let code_length = match var("SHORT_CODE_LENGTH") {
            Some(raw) => raw
                .parse::<usize>()
                .context("SHORT_CODE_LENGTH must be a positive integer")?,
            None => DEFAULT_CODE_LENGTH,
        };
        if code_length == 0 || code_length > MAX_CODE_LENGTH {
            anyhow::bail!("SHORT_CODE_LENGTH must be between 1 and {MAX_CODE_LENGTH}");
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            base_url,
            code_length,
        })
    }

    /// Address the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Fully-qualified link for a short code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
