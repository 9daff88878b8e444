//! Records exchanged between the API adapter, the CSV layer and the commands.

use github::{RepositoryPermission, RepositoryVisibility};
use serde::Deserialize;

/// A user with access to some of an organization's repositories without being
/// a member of it.
pub type OutsideCollaborator = github::User;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CollaboratorLogin {
    pub login: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CollaboratorEdge {
    pub permission: RepositoryPermission,
    pub node: CollaboratorLogin,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CollaboratorConnection {
    #[serde(default)]
    pub edges: Vec<CollaboratorEdge>,
}

/// A repository together with the permission edges matching one collaborator.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPermissionRecord {
    pub database_id: Option<u64>,
    pub name: String,
    pub visibility: RepositoryVisibility,
    // `null` when the viewer may not list the repository's collaborators
    #[serde(default)]
    pub collaborators: Option<CollaboratorConnection>,
}

impl RepositoryPermissionRecord {
    pub fn collaborator_edges(&self) -> &[CollaboratorEdge] {
        self.collaborators
            .as_ref()
            .map(|c| c.edges.as_slice())
            .unwrap_or_default()
    }

    /// The access level `username` holds on the repository, if any.
    ///
    /// The collaborator search matches logins by prefix, so edges belonging to
    /// other users are skipped.
    pub fn permission_for(&self, username: &str) -> Option<RepositoryPermission> {
        self.collaborator_edges()
            .iter()
            .find(|edge| edge.node.login == username)
            .map(|edge| edge.permission)
    }
}

/// One page of an organization's repositories.
#[derive(Clone, Debug, PartialEq)]
pub struct RepositoryPermissionsPage {
    pub repositories: Vec<RepositoryPermissionRecord>,
    pub page_info: PageInfo,
}

/// A single row of an add or remove input file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollaboratorAssignment {
    pub repository: String,
    pub username: String,
    /// Only present for additions
    pub permission: Option<String>,
}

/// A row of the access report.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub repository_name: String,
    pub repository_id: Option<u64>,
    pub visibility: RepositoryVisibility,
    pub username: String,
    pub access_level: RepositoryPermission,
}

impl ReportRow {
    /// Builds the row for `username`, or `None` when the repository carries no
    /// permission edge for them.
    pub fn from_record(record: &RepositoryPermissionRecord, username: &str) -> Option<Self> {
        let access_level = record.permission_for(username)?;

        Some(Self {
            repository_name: record.name.clone(),
            repository_id: record.database_id,
            visibility: record.visibility,
            username: username.to_owned(),
            access_level,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{ReportRow, RepositoryPermissionRecord};
    use github::{RepositoryPermission, RepositoryVisibility};

    #[test]
    fn record_with_edge() {
        const NODE_JSON: &str = r#"
            {
                "databaseId": 1296269,
                "name": "octo-repo",
                "visibility": "PRIVATE",
                "collaborators": {
                    "edges": [
                        { "permission": "MAINTAIN", "node": { "login": "alice" } }
                    ]
                }
            }
        "#;

        let record: RepositoryPermissionRecord = serde_json::from_str(NODE_JSON).unwrap();
        assert_eq!(
            record.permission_for("alice"),
            Some(RepositoryPermission::Maintain)
        );

        let row = ReportRow::from_record(&record, "alice").unwrap();
        assert_eq!(row.repository_name, "octo-repo");
        assert_eq!(row.repository_id, Some(1296269));
        assert_eq!(row.visibility, RepositoryVisibility::Private);
        assert_eq!(row.username, "alice");
        assert_eq!(row.access_level, RepositoryPermission::Maintain);
    }

    #[test]
    fn record_without_access() {
        const NODES_JSON: &str = r#"
            [
                {
                    "databaseId": 1,
                    "name": "empty-edges",
                    "visibility": "PUBLIC",
                    "collaborators": { "edges": [] }
                },
                {
                    "databaseId": null,
                    "name": "hidden",
                    "visibility": "INTERNAL",
                    "collaborators": null
                }
            ]
        "#;

        let records: Vec<RepositoryPermissionRecord> = serde_json::from_str(NODES_JSON).unwrap();
        for record in &records {
            assert!(record.collaborator_edges().is_empty());
            assert_eq!(ReportRow::from_record(record, "alice"), None);
        }
    }

    #[test]
    fn edge_for_another_login_is_ignored() {
        const NODE_JSON: &str = r#"
            {
                "databaseId": 42,
                "name": "ops",
                "visibility": "PRIVATE",
                "collaborators": {
                    "edges": [
                        { "permission": "ADMIN", "node": { "login": "bobby" } }
                    ]
                }
            }
        "#;

        let record: RepositoryPermissionRecord = serde_json::from_str(NODE_JSON).unwrap();
        assert_eq!(record.permission_for("bob"), None);
        assert_eq!(ReportRow::from_record(&record, "bob"), None);
        assert_eq!(
            record.permission_for("bobby"),
            Some(RepositoryPermission::Admin)
        );
    }
}
