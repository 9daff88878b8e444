use super::RepositoryClient;
use crate::client::{Response, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct AddCollaboratorRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    permission: Option<&'a str>,
}

// Implementation from the collaborators endpoint
// https://docs.github.com/en/rest/collaborators/collaborators
impl RepositoryClient<'_> {
    /// Add a user as a collaborator, or update the permission of an existing one.
    ///
    /// The permission may be one of `pull`, `triage`, `push`, `maintain`, `admin`
    /// or the name of a custom repository role. `None` lets Github apply its
    /// default of `push`.
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/collaborators/collaborators#add-a-repository-collaborator
    pub async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        user: &str,
        permission: Option<&str>,
    ) -> Result<Response<()>> {
        let request = AddCollaboratorRequest { permission };
        let url = format!("repos/{}/{}/collaborators/{}", owner, repo, user);
        let response = self.inner.put(&url).json(&request).send().await?;

        self.inner.empty(response).await
    }

    /// Remove a collaborator
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/collaborators/collaborators#remove-a-repository-collaborator
    pub async fn remove_collaborator(
        &self,
        owner: &str,
        repo: &str,
        user: &str,
    ) -> Result<Response<()>> {
        let url = format!("repos/{}/{}/collaborators/{}", owner, repo, user);
        let response = self.inner.delete(&url).send().await?;

        self.inner.empty(response).await
    }
}
