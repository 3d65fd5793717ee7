/// Errors returned by the GraphQL endpoint itself, after a successful round-trip.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// A list of errors returned by graphql.
    /// This is guaranteed to always have at least one error.
    #[error("Graphql error(s): {0:?}")]
    GraphqlErrors(Vec<graphql_client::Error>),

    /// The graphql response contained no errors, but null data.
    #[error("Missing response data")]
    NoData,
}

/// Errors that occur while reaching the endpoint or reading its response.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// A request returned a bad status code.
    #[error("{0} response from api")]
    BadStatus(u16),

    /// The request could not be sent, or the response body could not be decoded.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Errors that can occur when querying over http.
#[derive(Debug, thiserror::Error)]
pub enum HttpConnectionError {
    /// The endpoint could not be reached or returned an unusable response.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The endpoint answered with a graphql level error.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Invalid or missing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `GRAPHQL_URL` was not set.
    #[error("missing {0} env var")]
    MissingUrl(&'static str),

    /// The endpoint url did not parse, or is not http(s).
    #[error("invalid endpoint url {url:?}: {reason}")]
    InvalidUrl {
        /// The offending value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A `GRAPHQL_HEADER_*` variable could not be turned into an http header.
    #[error("invalid header {0:?}")]
    InvalidHeader(String),

    /// One of the `GRAPHQL_*` variables held bytes that are not valid unicode.
    #[error("{0} is not valid unicode")]
    NotUnicode(String),

    /// `GRAPHQL_TIMEOUT_SECS` was not a whole number of seconds.
    #[error("invalid timeout {0:?}")]
    InvalidTimeout(String),
}

/// Any error that stops a report run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// See [`ConfigError`]
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// See [`ConnectionError`]
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// See [`QueryError`]
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl From<HttpConnectionError> for Error {
    fn from(err: HttpConnectionError) -> Self {
        match err {
            HttpConnectionError::Connection(err) => Self::Connection(err),
            HttpConnectionError::Query(err) => Self::Query(err),
        }
    }
}

impl Error {
    /// Process exit code for this error. Each kind gets its own non-zero code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Connection(_) => 3,
            Self::Query(_) => 4,
            Self::Output(_) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_keep_their_kind() {
        let err: Error = HttpConnectionError::from(ConnectionError::BadStatus(502)).into();
        assert!(matches!(err, Error::Connection(ConnectionError::BadStatus(502))));
        assert_eq!(err.exit_code(), 3);

        let err: Error = HttpConnectionError::from(QueryError::NoData).into();
        assert!(matches!(err, Error::Query(QueryError::NoData)));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn exit_codes_are_distinct_and_non_zero() {
        let codes = [
            Error::from(ConfigError::MissingUrl("GRAPHQL_URL")).exit_code(),
            Error::from(ConnectionError::BadStatus(500)).exit_code(),
            Error::from(QueryError::NoData).exit_code(),
            Error::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe)).exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
