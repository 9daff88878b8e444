//! In-memory `CollaboratorApi` recording every call it receives.

use crate::{
    api::CollaboratorApi,
    model::{
        CollaboratorConnection, CollaboratorEdge, CollaboratorLogin, OutsideCollaborator,
        PageInfo, RepositoryPermissionRecord, RepositoryPermissionsPage,
    },
    Error, Result,
};
use async_trait::async_trait;
use github::{RepositoryPermission, RepositoryVisibility, UserType};
use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    OutsideCollaborators(String),
    Page {
        org: String,
        username: String,
        cursor: Option<String>,
    },
    Add {
        org: String,
        repo: String,
        username: String,
        permission: String,
    },
    Remove {
        org: String,
        repo: String,
        username: String,
    },
}

#[derive(Default)]
pub struct FakeApi {
    collaborators: Option<Vec<OutsideCollaborator>>,
    // (username, cursor) -> page, `None` answers with an error
    pages: HashMap<(String, Option<String>), Option<RepositoryPermissionsPage>>,
    failing_repos: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collaborators(mut self, logins: &[&str]) -> Self {
        self.collaborators = Some(logins.iter().map(|login| user(login)).collect());
        self
    }

    pub fn with_page(
        mut self,
        username: &str,
        cursor: Option<&str>,
        page: RepositoryPermissionsPage,
    ) -> Self {
        self.pages.insert(
            (username.to_owned(), cursor.map(str::to_owned)),
            Some(page),
        );
        self
    }

    pub fn with_failing_page(mut self, username: &str, cursor: Option<&str>) -> Self {
        self.pages
            .insert((username.to_owned(), cursor.map(str::to_owned)), None);
        self
    }

    pub fn with_failing_repo(mut self, repo: &str) -> Self {
        self.failing_repos.insert(repo.to_owned());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn page_calls(&self) -> Vec<(String, Option<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Page {
                    username, cursor, ..
                } => Some((username, cursor)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fail(&self, message: String) -> Error {
        Error::Github(github::client::Error::from(message))
    }
}

#[async_trait]
impl CollaboratorApi for FakeApi {
    async fn outside_collaborators(&self, org: &str) -> Result<Vec<OutsideCollaborator>> {
        self.record(Call::OutsideCollaborators(org.to_owned()));
        self.collaborators
            .clone()
            .ok_or_else(|| self.fail(format!("no such organization {}", org)))
    }

    async fn repository_permissions_page(
        &self,
        org: &str,
        username: &str,
        cursor: Option<&str>,
    ) -> Result<RepositoryPermissionsPage> {
        self.record(Call::Page {
            org: org.to_owned(),
            username: username.to_owned(),
            cursor: cursor.map(str::to_owned),
        });

        match self
            .pages
            .get(&(username.to_owned(), cursor.map(str::to_owned)))
        {
            Some(Some(page)) => Ok(page.clone()),
            _ => Err(self.fail(format!("no page for {} at {:?}", username, cursor))),
        }
    }

    async fn add_collaborator(
        &self,
        org: &str,
        repo: &str,
        username: &str,
        permission: &str,
    ) -> Result<()> {
        self.record(Call::Add {
            org: org.to_owned(),
            repo: repo.to_owned(),
            username: username.to_owned(),
            permission: permission.to_owned(),
        });

        if self.failing_repos.contains(repo) {
            Err(self.fail(format!("cannot add {} to {}", username, repo)))
        } else {
            Ok(())
        }
    }

    async fn remove_collaborator(&self, org: &str, repo: &str, username: &str) -> Result<()> {
        self.record(Call::Remove {
            org: org.to_owned(),
            repo: repo.to_owned(),
            username: username.to_owned(),
        });

        if self.failing_repos.contains(repo) {
            Err(self.fail(format!("cannot remove {} from {}", username, repo)))
        } else {
            Ok(())
        }
    }
}

pub fn user(login: &str) -> OutsideCollaborator {
    OutsideCollaborator {
        login: login.to_owned(),
        id: login.len() as u64,
        user_type: UserType::User,
        site_admin: false,
        html_url: None,
    }
}

/// A repository where `access` lists the permission edge returned for the
/// queried user, if any.
pub fn repo(
    name: &str,
    id: u64,
    access: Option<(&str, RepositoryPermission)>,
) -> RepositoryPermissionRecord {
    RepositoryPermissionRecord {
        database_id: Some(id),
        name: name.to_owned(),
        visibility: RepositoryVisibility::Private,
        collaborators: Some(CollaboratorConnection {
            edges: access
                .into_iter()
                .map(|(login, permission)| CollaboratorEdge {
                    permission,
                    node: CollaboratorLogin {
                        login: login.to_owned(),
                    },
                })
                .collect(),
        }),
    }
}

pub fn page(
    repositories: Vec<RepositoryPermissionRecord>,
    end_cursor: Option<&str>,
    has_next_page: bool,
) -> RepositoryPermissionsPage {
    RepositoryPermissionsPage {
        repositories,
        page_info: PageInfo {
            end_cursor: end_cursor.map(str::to_owned),
            has_next_page,
        },
    }
}
