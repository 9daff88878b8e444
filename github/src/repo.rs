use serde::Deserialize;
use std::fmt;

// GitHub API docs: https://docs.github.com/en/graphql/reference/enums#repositoryvisibility

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryVisibility {
    Public,
    Private,
    Internal,
}

impl RepositoryVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryVisibility::Public => "PUBLIC",
            RepositoryVisibility::Private => "PRIVATE",
            RepositoryVisibility::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for RepositoryVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access levels a collaborator can hold on a repository, ordered from least
/// to most privileged.
///
/// GitHub API docs: https://docs.github.com/en/graphql/reference/enums#repositorypermission
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryPermission {
    Read,
    Triage,
    Write,
    Maintain,
    Admin,
}

impl RepositoryPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryPermission::Read => "READ",
            RepositoryPermission::Triage => "TRIAGE",
            RepositoryPermission::Write => "WRITE",
            RepositoryPermission::Maintain => "MAINTAIN",
            RepositoryPermission::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for RepositoryPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
