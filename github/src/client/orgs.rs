use crate::{
    client::{Client, PaginationOptions, Response, Result},
    User,
};
use serde::Serialize;

#[derive(Debug, Default, Clone, Serialize)]
pub struct ListOutsideCollaboratorsOptions {
    #[serde(flatten)]
    pub pagination_options: PaginationOptions,
}

/// `OrgClient` handles communication with the organization related methods of the GitHub API.
///
/// GitHub API docs: https://docs.github.com/en/rest/orgs
pub struct OrgClient<'a> {
    inner: &'a Client,
}

impl<'a> OrgClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }

    /// List outside collaborators for an organization
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/orgs/outside-collaborators#list-outside-collaborators-for-an-organization
    pub async fn list_outside_collaborators(
        &self,
        org: &str,
        options: &ListOutsideCollaboratorsOptions,
    ) -> Result<Response<Vec<User>>> {
        let url = format!("orgs/{}/outside_collaborators", org);
        let response = self.inner.get(&url).query(options).send().await?;

        self.inner.json(response).await
    }
}
