//! The authors report: one fixed query, printed as plain text.

use crate::{Client, QueryConn};
use graphql_client::GraphQLQuery;
use std::io::{self, Write};

/// Every author with the id and name, plus title and content of each of their posts.
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/schema.graphql",
    query_path = "graphql/authors.graphql",
    response_derives = "Debug, Clone, PartialEq"
)]
pub struct AuthorsQuery;

/// An author as returned by the endpoint.
pub type Author = authors_query::AuthorsQueryAuthors;

/// A post belonging to an [`Author`].
pub type Post = authors_query::AuthorsQueryAuthorsPosts;

/// Run [`AuthorsQuery`] and hand back the authors exactly as the endpoint ordered them.
///
/// # Errors
/// Whatever the connection reports, see [`QueryConn::query`].
pub async fn fetch_authors_with_posts<T>(client: &Client<T>) -> Result<Vec<Author>, T::Error>
where
    T: QueryConn,
{
    let data = client
        .query::<AuthorsQuery>(authors_query::Variables)
        .await?;
    tracing::debug!(authors = data.authors.len(), "fetched authors");
    Ok(data.authors)
}

/// Write each author's name, followed by the title and content of each of their posts,
/// one value per line. A null value is written as an empty line.
///
/// # Errors
/// Fails if writing to `out` fails.
pub fn print_report<W: Write>(authors: &[Author], out: &mut W) -> io::Result<()> {
    for author in authors {
        writeln!(out, "{}", author.name.as_deref().unwrap_or_default())?;
        for post in &author.posts {
            writeln!(out, "{}", post.title.as_deref().unwrap_or_default())?;
            writeln!(out, "{}", post.content.as_deref().unwrap_or_default())?;
        }
    }
    out.flush()
}
