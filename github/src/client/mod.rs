use log::debug;
use reqwest::{header, Client as ReqwestClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;

mod error;
mod graphql;
mod orgs;
mod pagination;
mod repos;

pub use error::{Error, GithubClientError, GraphqlError, GraphqlErrorLocation, Result};
pub use graphql::{GraphqlClient, Query};
pub use orgs::{ListOutsideCollaboratorsOptions, OrgClient};
pub use pagination::{Pagination, PaginationOptions};
pub use repos::RepositoryClient;

// Constants
const DEFAULT_HOSTNAME: &str = "github.com";
const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const HEADER_LINK: &str = "Link";

const MEDIA_TYPE_V3: &str = "application/vnd.github+json";

// The hawkgirl preview exposes repository collaborator permissions over GraphQL
// on older Enterprise Server releases.
const MEDIA_TYPE_HAWKGIRL_PREVIEW: &str = "application/vnd.github.hawkgirl-preview+json";

/// Computes the REST and GraphQL endpoints for a Github host.
///
/// * `github.com` uses the public API at `api.github.com`
/// * `*.ghe.com` (Enterprise Cloud with data residency) uses `api.<host>`
/// * anything else is treated as an Enterprise Server install serving the API
///   under `/api/v3/` and `/api/graphql`
pub fn endpoints_for_host(hostname: &str) -> (String, String) {
    let host = hostname.trim().trim_end_matches('/').to_ascii_lowercase();

    if host.is_empty() || host == DEFAULT_HOSTNAME || host == "api.github.com" {
        (DEFAULT_BASE_URL.to_owned(), DEFAULT_GRAPHQL_URL.to_owned())
    } else if host.ends_with(".ghe.com") {
        (
            format!("https://api.{}/", host),
            format!("https://api.{}/graphql", host),
        )
    } else {
        (
            format!("https://{}/api/v3/", host),
            format!("https://{}/api/graphql", host),
        )
    }
}

#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    graphql_url: Option<String>,
    user_agent: Option<String>,
    github_api_token: Option<String>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            graphql_url: None,
            user_agent: None,
            github_api_token: None,
        }
    }

    /// Point the client at the REST and GraphQL endpoints of `hostname`.
    pub fn hostname(mut self, hostname: &str) -> Self {
        let (base_url, graphql_url) = endpoints_for_host(hostname);
        self.base_url = Some(base_url);
        self.graphql_url = Some(graphql_url);
        self
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn graphql_url<S: Into<String>>(mut self, graphql_url: S) -> Self {
        self.graphql_url = Some(graphql_url.into());
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn github_api_token<S: Into<String>>(mut self, github_api_token: S) -> Self {
        self.github_api_token = Some(github_api_token.into());
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let graphql_url = self
            .graphql_url
            .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_owned());
        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_owned());

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(MEDIA_TYPE_V3));

        if let Some(token) = self.github_api_token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = header::HeaderValue::from_str(&format!("token {}", token))
                .map_err(|_| Error::from("api token contains invalid header characters"))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = ReqwestClient::builder()
            .user_agent(&user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Client {
            base_url,
            graphql_url,
            user_agent,
            client,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The value returned by every endpoint along with the pagination details
/// parsed from the response headers.
#[derive(Debug)]
pub struct Response<T> {
    pagination: Pagination,
    inner: T,
}

impl<T> Response<T> {
    pub fn new(pagination: Pagination, inner: T) -> Self {
        Self { pagination, inner }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn into_parts(self) -> (Pagination, T) {
        (self.pagination, self.inner)
    }
}

#[derive(Debug)]
pub struct Client {
    /// Base URL to use for REST requests. Defaults to the public GitHub API,
    /// but can be overridden for use with GitHub Enterprise. Always
    /// terminated with a trailing slash.
    base_url: String,

    /// Full URL of the GraphQL endpoint
    graphql_url: String,

    /// User agent string sent when communicating with GitHub APIs
    #[allow(unused)]
    user_agent: String,

    /// Client used to make http requests
    client: ReqwestClient,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    fn put(&self, url: &str) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    fn delete(&self, url: &str) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, url);
        self.client.request(method, &url)
    }

    // Fails with the status code and, when Github sent one, its error payload.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        debug!("Github Response: {:#?}", response);

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let payload = response.text().await?;
        match serde_json::from_str::<GithubClientError>(&payload) {
            Ok(error) => Err(Error::Status(status, Some(error))),
            Err(_) => {
                debug!("Unrecognized error payload: {}", payload);
                Err(Error::Status(status, None))
            }
        }
    }

    // Process a response received from Github, deserializing the json payload.
    async fn json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<Response<T>> {
        let pagination = Pagination::from_headers(response.headers());
        let response = self.check_response(response).await?;
        let payload = response.text().await?;

        Ok(Response::new(pagination, serde_json::from_str(&payload)?))
    }

    // Process a response which is expected to have no meaningful body.
    async fn empty(&self, response: reqwest::Response) -> Result<Response<()>> {
        let pagination = Pagination::from_headers(response.headers());
        self.check_response(response).await?;

        Ok(Response::new(pagination, ()))
    }

    pub fn orgs(&self) -> OrgClient {
        OrgClient::new(self)
    }

    pub fn repos(&self) -> RepositoryClient {
        RepositoryClient::new(self)
    }

    pub fn graphql(&self) -> GraphqlClient {
        GraphqlClient::new(self)
    }
}
