use crate::client::{
    Client, Error, GraphqlError, Pagination, Response, Result, MEDIA_TYPE_HAWKGIRL_PREVIEW,
};
use reqwest::header;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Struct to represent a request to a GraphQL server
#[derive(Debug, Serialize)]
pub struct Query<V> {
    /// The values for the variables. They must match those declared in the provided query.
    pub variables: V,
    /// The GraphQL query
    pub query: &'static str,
    /// The GraphQL operation name
    #[serde(rename = "operationName")]
    pub operation_name: &'static str,
}

impl<V> Query<V> {
    pub fn new(operation_name: &'static str, query: &'static str, variables: V) -> Self {
        Self {
            variables,
            query,
            operation_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

impl<T> GraphqlResponse<T> {
    fn into_result(self) -> Result<T> {
        match (self.data, self.errors) {
            (_, Some(errors)) if !errors.is_empty() => Err(Error::GraphqlError(errors)),
            (Some(data), _) => Ok(data),
            // GraphQL endpoints should always return something
            (None, _) => Err("graphql response contained neither data nor errors".into()),
        }
    }
}

/// `GraphqlClient` handles communication with the GitHub's GraphQL API.
///
/// GitHub API docs: https://docs.github.com/en/graphql
pub struct GraphqlClient<'a> {
    inner: &'a Client,
}

impl<'a> GraphqlClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }

    /// Perform a Query against GitHub's GraphQL Endpoint
    pub async fn query<Q: Serialize, R: DeserializeOwned>(&self, query: &Q) -> Result<Response<R>> {
        let response = self
            .inner
            .client
            .post(&self.inner.graphql_url)
            .header(header::ACCEPT, MEDIA_TYPE_HAWKGIRL_PREVIEW)
            .json(query)
            .send()
            .await?;
        let (_, response) = self
            .inner
            .json::<GraphqlResponse<R>>(response)
            .await?
            .into_parts();

        Ok(Response::new(Pagination::default(), response.into_result()?))
    }
}
