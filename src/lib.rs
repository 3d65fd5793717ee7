//! Fetch every author, with their posts, from a GraphQL endpoint and print them as a
//! plain text report.
//!
//! ```rust,no_run
//! use authors_report::{fetch_authors_with_posts, http::Connection, print_report};
//!
//! # async fn run() -> Result<(), authors_report::Error> {
//! let client = Connection::new("http://localhost:4000/graphql")?.into_client();
//! let authors = fetch_authors_with_posts(&client).await?;
//! print_report(&authors, &mut std::io::stdout().lock())?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate async_trait;

mod client;
mod config;
mod conn;
mod error;
pub mod report;

pub use client::Client;
pub use config::Config;
pub use conn::{
    http::{self, Connection},
    QueryConn,
};
pub use error::{ConfigError, ConnectionError, Error, HttpConnectionError, QueryError};
pub use report::{fetch_authors_with_posts, print_report, Author, AuthorsQuery, Post};
