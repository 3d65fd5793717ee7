//! Runtime configuration, read from the environment.

use crate::{http::ConnectionBuilder, ConfigError, Connection};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Url,
};
use std::{ffi::OsString, time::Duration};

const URL_VAR: &str = "GRAPHQL_URL";
const HEADER_PREFIX: &str = "GRAPHQL_HEADER_";
const TIMEOUT_VAR: &str = "GRAPHQL_TIMEOUT_SECS";

/// Where to send the query and what to send along with it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Url of the graphql endpoint.
    pub api_url: Url,
    /// Extra headers sent with the request. Empty unless configured.
    pub headers: HeaderMap,
    /// Request timeout. `None` waits for as long as the endpoint takes.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load a `.env` file if one exists, then read the process environment.
    ///
    /// Unrelated variables are ignored, even when they are not valid unicode.
    ///
    /// # Errors
    /// See [`Config::from_vars`]. Also fails if one of the `GRAPHQL_*` variables is not
    /// valid unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_vars(config_vars(std::env::vars_os())?)
    }

    /// Build the config from `(name, value)` pairs.
    ///
    /// `GRAPHQL_URL` is required. Each `GRAPHQL_HEADER_<NAME>` becomes a header named
    /// `<name>` with underscores turned into dashes. `GRAPHQL_TIMEOUT_SECS` sets a timeout.
    ///
    /// # Errors
    /// Fails if the url is missing or invalid, or a header or timeout value is malformed.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut api_url = None;
        let mut headers = HeaderMap::new();
        let mut timeout = None;

        for (key, value) in vars {
            let key = key.as_ref();
            if key == URL_VAR {
                api_url = Some(parse_url(value.into())?);
            } else if key == TIMEOUT_VAR {
                timeout = Some(parse_timeout(value.into())?);
            } else if let Some(name) = key.strip_prefix(HEADER_PREFIX) {
                let (name, value) = parse_header(name, value.into())?;
                headers.insert(name, value);
            }
        }

        Ok(Config {
            api_url: api_url.ok_or(ConfigError::MissingUrl(URL_VAR))?,
            headers,
            timeout,
        })
    }

    /// A [`ConnectionBuilder`] carrying these settings.
    pub fn connection_builder(&self) -> ConnectionBuilder {
        let builder = Connection::builder(self.api_url.as_str())
            .headers(self.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }
}

fn is_config_var(key: &str) -> bool {
    key == URL_VAR || key == TIMEOUT_VAR || key.starts_with(HEADER_PREFIX)
}

fn config_vars<I>(vars: I) -> Result<Vec<(String, String)>, ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            is_config_var(&key).then_some((key, value))
        })
        .map(|(key, value)| match value.into_string() {
            Ok(value) => Ok((key, value)),
            Err(_) => Err(ConfigError::NotUnicode(key)),
        })
        .collect()
}

fn parse_url(value: String) -> Result<Url, ConfigError> {
    let url = Url::parse(&value).map_err(|err| ConfigError::InvalidUrl {
        url: value.clone(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidUrl {
            url: value,
            reason: format!("unsupported scheme {scheme}"),
        }),
    }
}

fn parse_timeout(value: String) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidTimeout(value))
}

fn parse_header(name: &str, value: String) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let header_name = name.to_ascii_lowercase().replace('_', "-");
    let invalid = || ConfigError::InvalidHeader(header_name.clone());
    if header_name.is_empty() {
        return Err(invalid());
    }
    let parsed_name = HeaderName::from_bytes(header_name.as_bytes()).map_err(|_| invalid())?;
    let parsed_value = HeaderValue::from_str(&value).map_err(|_| invalid())?;
    Ok((parsed_name, parsed_value))
}
