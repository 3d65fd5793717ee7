use graphql_client::GraphQLQuery;

pub mod http;

/// Connections that implement this support graphql queries.
#[async_trait]
pub trait QueryConn {
    /// Error type representing any errors that can occurr when querying
    type Error;

    /// Send a graphql query over this connection.
    ///
    /// # Errors
    /// This function may error if there was a problem with the underlying connection such as
    /// a dns resolution error or a bad status code, or if the api returned an error
    /// or the api response failed to decode.
    async fn query<Q>(&self, variables: Q::Variables) -> Result<Q::ResponseData, Self::Error>
    where
        Q: GraphQLQuery,
        Q::Variables: Send + Sync;
}

#[async_trait]
impl<T> QueryConn for &T
where
    T: QueryConn + Send + Sync + ?Sized,
{
    type Error = T::Error;

    async fn query<Q>(&self, variables: Q::Variables) -> Result<Q::ResponseData, Self::Error>
    where
        Q: GraphQLQuery,
        Q::Variables: Send + Sync,
    {
        (**self).query::<Q>(variables).await
    }
}
