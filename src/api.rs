use crate::{
    graphql::{self, RepositoryPermissionsData},
    model::{OutsideCollaborator, RepositoryPermissionsPage},
    Error, Result,
};
use async_trait::async_trait;
use github::{
    client::{ListOutsideCollaboratorsOptions, Pagination, PaginationOptions, Response},
    Client,
};
use log::debug;
use std::future::Future;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const PER_PAGE: usize = 100;

/// The calls the commands make against the hosting service. Every method
/// issues its requests sequentially and never retries.
#[async_trait]
pub trait CollaboratorApi {
    /// All outside collaborators of `org`, following REST pagination.
    async fn outside_collaborators(&self, org: &str) -> Result<Vec<OutsideCollaborator>>;

    /// One page of `org`'s repositories with the permission `username` holds on
    /// each. A `None` cursor requests the first page.
    async fn repository_permissions_page(
        &self,
        org: &str,
        username: &str,
        cursor: Option<&str>,
    ) -> Result<RepositoryPermissionsPage>;

    /// Grants `permission` on `org/repo`, updating it if the user already has access.
    async fn add_collaborator(
        &self,
        org: &str,
        repo: &str,
        username: &str,
        permission: &str,
    ) -> Result<()>;

    async fn remove_collaborator(&self, org: &str, repo: &str, username: &str) -> Result<()>;
}

/// Requests numbered REST pages starting at 1, following each response's
/// `next` link, and concatenates the items in page order.
///
/// Fails when a `next` link does not move forward or more than `max_pages`
/// pages would be needed.
async fn collect_pages<T, F, Fut>(label: &str, max_pages: usize, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<(Pagination, Vec<T>)>>,
{
    let mut items = Vec::new();
    let mut page = 1;
    let mut fetched = 0;

    loop {
        let (pagination, batch) = fetch(page).await?;
        items.extend(batch);
        fetched += 1;

        match pagination.next_page {
            None => break,
            Some(next) if next <= page => {
                return Err(format!("{} did not advance past page {}", label, page).into());
            }
            Some(_) if fetched >= max_pages => {
                return Err(format!("{} exceeded {} pages", label, max_pages).into());
            }
            Some(next) => page = next,
        }
    }

    Ok(items)
}

#[derive(Debug)]
pub struct GithubApi {
    client: Client,
    max_pages: usize,
}

impl GithubApi {
    pub fn new(hostname: &str, token: Option<&str>, max_pages: usize) -> Result<Self> {
        let mut builder = Client::builder().hostname(hostname).user_agent(USER_AGENT);
        if let Some(token) = token {
            builder = builder.github_api_token(token);
        }
        let client = builder.build()?;
        debug!(
            "using rest endpoint {} and graphql endpoint {}",
            client.base_url(),
            client.graphql_url()
        );

        Ok(Self { client, max_pages })
    }
}

#[async_trait]
impl CollaboratorApi for GithubApi {
    async fn outside_collaborators(&self, org: &str) -> Result<Vec<OutsideCollaborator>> {
        let client = &self.client;
        let label = format!("outside collaborator listing for {}", org);

        collect_pages(&label, self.max_pages, move |page| async move {
            let options = ListOutsideCollaboratorsOptions {
                pagination_options: PaginationOptions {
                    page: Some(page),
                    per_page: Some(PER_PAGE),
                },
            };

            debug!("Reading outside collaborators of {} (page {})", org, page);
            client
                .orgs()
                .list_outside_collaborators(org, &options)
                .await
                .map(Response::into_parts)
                .map_err(Error::from)
        })
        .await
    }

    async fn repository_permissions_page(
        &self,
        org: &str,
        username: &str,
        cursor: Option<&str>,
    ) -> Result<RepositoryPermissionsPage> {
        let q = graphql::repository_permissions(org, username, cursor);
        let data: RepositoryPermissionsData = self.client.graphql().query(&q).await?.into_inner();

        Ok(data.into())
    }

    async fn add_collaborator(
        &self,
        org: &str,
        repo: &str,
        username: &str,
        permission: &str,
    ) -> Result<()> {
        self.client
            .repos()
            .add_collaborator(org, repo, username, Some(permission))
            .await?;

        Ok(())
    }

    async fn remove_collaborator(&self, org: &str, repo: &str, username: &str) -> Result<()> {
        self.client
            .repos()
            .remove_collaborator(org, repo, username)
            .await?;

        Ok(())
    }
}
