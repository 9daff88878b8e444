use crate::{
    api::CollaboratorApi,
    commands::{ClientOptions, Summary},
    import::read_assignments,
    model::CollaboratorAssignment,
    Result,
};
use log::{debug, error, info};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct AssignOptions {
    /// Organization owning the repositories
    pub organization: String,

    #[structopt(short, long, parse(from_os_str))]
    /// Path and Name of CSV file listing the repository assignments
    pub from_file: PathBuf,

    #[structopt(flatten)]
    pub client: ClientOptions,
}

/// Grants each `RepositoryName,Username,Permission` row of the input file.
pub async fn run_add(options: &AssignOptions) -> Result<Summary> {
    let config = options.client.config()?;
    let api = options.client.connect(&config)?;
    let assignments = read_assignments(&options.from_file, true)?;
    info!(
        "Adding {} repository assignments in {}",
        assignments.len(),
        options.organization
    );

    Ok(add_collaborators(&api, &options.organization, &assignments).await)
}

/// Revokes each `RepositoryName,Username` row of the input file.
pub async fn run_remove(options: &AssignOptions) -> Result<Summary> {
    let config = options.client.config()?;
    let api = options.client.connect(&config)?;
    let assignments = read_assignments(&options.from_file, false)?;
    info!(
        "Removing {} repository assignments in {}",
        assignments.len(),
        options.organization
    );

    Ok(remove_collaborators(&api, &options.organization, &assignments).await)
}

/// Issues one add call per assignment, in order. A failed row is logged and
/// counted; the remaining rows are still attempted.
pub async fn add_collaborators<A>(
    api: &A,
    org: &str,
    assignments: &[CollaboratorAssignment],
) -> Summary
where
    A: CollaboratorApi + ?Sized,
{
    let mut summary = Summary::default();

    for assignment in assignments {
        summary.attempted += 1;

        let permission = match assignment.permission.as_deref() {
            Some(permission) => permission,
            None => {
                error!(
                    "No permission given for user {} and repo {}",
                    assignment.username, assignment.repository
                );
                summary.failed += 1;
                continue;
            }
        };

        debug!(
            "Creating repository assignment for {} on {} with permission {}",
            assignment.username, assignment.repository, permission
        );
        if let Err(e) = api
            .add_collaborator(org, &assignment.repository, &assignment.username, permission)
            .await
        {
            error!(
                "Error arose creating permission for user {} and repo {}: {}",
                assignment.username, assignment.repository, e
            );
            summary.failed += 1;
        }
    }

    summary
}

/// Issues one remove call per assignment, in order, continuing past failures.
pub async fn remove_collaborators<A>(
    api: &A,
    org: &str,
    assignments: &[CollaboratorAssignment],
) -> Summary
where
    A: CollaboratorApi + ?Sized,
{
    let mut summary = Summary::default();

    for assignment in assignments {
        summary.attempted += 1;

        debug!(
            "Removing repository assignment for {} on {}",
            assignment.username, assignment.repository
        );
        if let Err(e) = api
            .remove_collaborator(org, &assignment.repository, &assignment.username)
            .await
        {
            error!(
                "Error arose removing permission for user {} and repo {}: {}",
                assignment.username, assignment.repository, e
            );
            summary.failed += 1;
        }
    }

    summary
}
