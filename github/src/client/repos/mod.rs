use crate::client::Client;

mod collaborators;

/// `RepositoryClient` handles communication with the Repository related methods of the GitHub API.
///
/// GitHub API docs: https://docs.github.com/en/rest/repos
pub struct RepositoryClient<'a> {
    inner: &'a Client,
}

impl<'a> RepositoryClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }
}
