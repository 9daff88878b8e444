//! GraphQL queries for Github's v4 GraphQL API
//!
//! [Github's v4 API Explorer](https://docs.github.com/en/graphql/overview/explorer)
//! [Github's v4 API Docs](https://docs.github.com/en/graphql)

use crate::model::{PageInfo, RepositoryPermissionRecord, RepositoryPermissionsPage};
use github::client::Query;
use serde::{Deserialize, Serialize};

const REPOSITORY_PERMISSIONS_QUERY: &str = include_str!("repository_permissions.graphql");

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPermissionsVariables<'a> {
    pub owner: &'a str,
    pub user: &'a str,
    pub end_cursor: Option<&'a str>,
}

/// Builds the query listing an organization's repositories along with the
/// permission `user` holds on each of them.
pub fn repository_permissions<'a>(
    owner: &'a str,
    user: &'a str,
    end_cursor: Option<&'a str>,
) -> Query<RepositoryPermissionsVariables<'a>> {
    Query::new(
        "getOrganizationRepoPermissions",
        REPOSITORY_PERMISSIONS_QUERY,
        RepositoryPermissionsVariables {
            owner,
            user,
            end_cursor,
        },
    )
}

#[derive(Debug, Deserialize)]
pub struct RepositoryPermissionsData {
    organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
struct Organization {
    repositories: RepositoryConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryConnection {
    #[serde(default)]
    nodes: Vec<Option<RepositoryPermissionRecord>>,
    page_info: PageInfo,
}

impl From<RepositoryPermissionsData> for RepositoryPermissionsPage {
    fn from(data: RepositoryPermissionsData) -> Self {
        let repositories = match data.organization {
            Some(organization) => organization.repositories,
            None => {
                return Self {
                    repositories: Vec::new(),
                    page_info: PageInfo {
                        end_cursor: None,
                        has_next_page: false,
                    },
                }
            }
        };

        Self {
            repositories: repositories.nodes.into_iter().flatten().collect(),
            page_info: repositories.page_info,
        }
    }
}
