//! Connection over http using reqwest.
//!
//! You will usually pretty much immediately turn the connection into a Client.
//! E.g.
//! ```rust,no_run
//! use authors_report::http::Connection;
//! # fn main() -> Result<(), authors_report::ConnectionError> {
//! let client = Connection::new("http://localhost:4000/graphql")?.into_client();
//! # Ok(())
//! # }
//! ```

use crate::{Client, ConnectionError, HttpConnectionError, QueryConn, QueryError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug)]
struct Config {
    user_agent: String,
    timeout: Option<Duration>,
    api_url: String,
    headers: HeaderMap,
}

impl Config {
    fn new(api_url: String) -> Self {
        Config {
            user_agent: format!("authors-report / {}", env!("CARGO_PKG_VERSION")),
            timeout: None,
            api_url,
            headers: HeaderMap::new(),
        }
    }
}

/// Body of a failed response. Only the errors matter, `data` may not match the query.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Option<Vec<graphql_client::Error>>,
}

/// Configure and build an http [`Connection`].
///
/// ## Usage:
/// ```rust,no_run
/// # use authors_report::http::Connection;
/// # fn main() -> Result<(), authors_report::ConnectionError> {
/// let connection = Connection::builder("https://example.com/graphql")
///     .user_agent("My App / 0.1.0")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConnectionBuilder {
    config: Config,
}

impl ConnectionBuilder {
    /// Build the http connection from the set options.
    ///
    /// # Errors
    /// This function errors if the TLS backend cannot be initialized, or the resolver cannot
    /// load the system configuration.
    pub fn build(self) -> Result<Connection, ConnectionError> {
        let mut http = reqwest::Client::builder()
            .user_agent(self.config.user_agent)
            .default_headers(self.config.headers);
        if let Some(timeout) = self.config.timeout {
            http = http.timeout(timeout);
        }

        Ok(Connection {
            http: http.build().map_err(anyhow::Error::from)?,
            api_url: self.config.api_url,
        })
    }

    /// Set the user agent the http client will identify itself as.
    ///
    /// This defaults to `authors-report / x.x.x` where `x.x.x` is the version of this package.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = value.into();
        self
    }

    /// Set the timeout for requests made to the endpoint.
    ///
    /// There is no timeout by default.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.config.timeout = Some(value);
        self
    }

    /// Add a header sent with every request. Setting the same name twice keeps the last value.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.config.headers.insert(name, value);
        self
    }

    /// Add several headers at once, see [`ConnectionBuilder::header`].
    pub fn headers(mut self, headers: impl IntoIterator<Item = (HeaderName, HeaderValue)>) -> Self {
        for (name, value) in headers {
            self.config.headers.insert(name, value);
        }
        self
    }
}

/// Connect to a graphql endpoint over http(s).
#[derive(Debug)]
pub struct Connection {
    http: reqwest::Client,
    api_url: String,
}

impl Connection {
    /// Create a [`ConnectionBuilder`] for the endpoint at `api_url`, to configure various options.
    pub fn builder(api_url: impl Into<String>) -> ConnectionBuilder {
        ConnectionBuilder {
            config: Config::new(api_url.into()),
        }
    }

    /// Create a connection to `api_url` with the default options.
    ///
    /// # Errors
    /// See [`ConnectionBuilder::build`]
    pub fn new(api_url: impl Into<String>) -> Result<Self, ConnectionError> {
        Self::builder(api_url).build()
    }

    /// Url of the graphql endpoint this connection posts to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Create a client with reference to this connection
    pub fn as_client(&self) -> Client<&Self> {
        Client::new(self)
    }

    /// Convert this connection into a client
    pub fn into_client(self) -> Client<Self> {
        Client::new(self)
    }

    async fn request<Q>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, HttpConnectionError>
    where
        Q: graphql_client::GraphQLQuery,
    {
        let body = Q::build_query(variables);
        tracing::debug!(
            operation = body.operation_name,
            api_url = %self.api_url,
            "sending query"
        );

        let res = self
            .http
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ConnectionError::from(anyhow::Error::from(err)))?;

        let status = res.status();
        if !status.is_success() {
            // A rejected query can still carry graphql errors in the body.
            let body = res.bytes().await.unwrap_or_default();
            return Err(match serde_json::from_slice::<ErrorBody>(&body) {
                Ok(ErrorBody { errors: Some(errs) }) if !errs.is_empty() => {
                    tracing::debug!(%status, count = errs.len(), "query rejected with errors");
                    QueryError::GraphqlErrors(errs).into()
                }
                _ => ConnectionError::BadStatus(status.as_u16()).into(),
            });
        }

        let res: graphql_client::Response<Q::ResponseData> = res
            .json()
            .await
            .map_err(|err| ConnectionError::from(anyhow::Error::from(err)))?;

        if let Some(errs) = res.errors {
            if !errs.is_empty() {
                tracing::debug!(count = errs.len(), "query returned errors");
                return Err(QueryError::GraphqlErrors(errs).into());
            }
        }

        let data = res.data.ok_or(QueryError::NoData)?;
        tracing::trace!("query succeeded");
        Ok(data)
    }
}

#[async_trait]
impl QueryConn for Connection {
    type Error = HttpConnectionError;

    async fn query<Q>(&self, variables: Q::Variables) -> Result<Q::ResponseData, Self::Error>
    where
        Q: graphql_client::GraphQLQuery,
        Q::Variables: Send + Sync,
    {
        self.request::<Q>(variables).await
    }
}
