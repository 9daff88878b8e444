use crate::{
    api::CollaboratorApi,
    commands::{ClientOptions, Summary},
    model::{ReportRow, RepositoryPermissionRecord},
    report::{default_report_path, ReportWriter},
    Error, Result,
};
use log::{debug, error, info, warn};
use std::{borrow::Cow, collections::HashSet, io::Write, path::PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct ListOptions {
    /// Organization whose outside collaborators are reported
    pub organization: String,

    #[structopt(short, long, parse(from_os_str))]
    /// Name of file to write CSV list to (default "RepoCollaboratorsReport-<timestamp>.csv")
    pub output_file: Option<PathBuf>,

    #[structopt(short, long)]
    /// Username of single repo collaborator to generate report for
    pub username: Option<String>,

    #[structopt(flatten)]
    pub client: ClientOptions,
}

pub async fn run_list(options: &ListOptions) -> Result<Summary> {
    let config = options.client.config()?;
    let api = options.client.connect(&config)?;

    let path = options
        .output_file
        .clone()
        .unwrap_or_else(default_report_path);
    let mut report = ReportWriter::create(&path)?;
    info!("Writing report to {}", path.display());

    let summary = list_collaborators(
        &api,
        &options.organization,
        options.username.as_deref(),
        config.max_pages(),
        &mut report,
    )
    .await?;
    report.finish()?;

    Ok(summary)
}

/// Repositories gathered for one collaborator. `error` holds the failure that
/// cut the walk short, in which case `repositories` is whatever arrived first.
#[derive(Debug)]
pub struct CollectedRepositories {
    pub repositories: Vec<RepositoryPermissionRecord>,
    pub pages: usize,
    pub error: Option<Error>,
}

/// Walks every page of `org`'s repositories for `username`, starting from the
/// first page, until the service reports no further pages.
///
/// The walk gives up after `max_pages` pages, or as soon as a page asks for
/// more results without a fresh cursor.
pub async fn collect_repository_permissions<A>(
    api: &A,
    org: &str,
    username: &str,
    max_pages: usize,
) -> CollectedRepositories
where
    A: CollaboratorApi + ?Sized,
{
    let mut collected = CollectedRepositories {
        repositories: Vec::new(),
        pages: 0,
        error: None,
    };
    let mut cursor: Option<String> = None;
    let mut seen_cursors = HashSet::new();

    let stop = |reason: Cow<'static, str>| Error::Pagination {
        username: username.to_owned(),
        reason,
    };

    loop {
        let page = match api
            .repository_permissions_page(org, username, cursor.as_deref())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                collected.error = Some(e);
                break;
            }
        };
        collected.pages += 1;
        collected.repositories.extend(page.repositories);

        if !page.page_info.has_next_page {
            break;
        }

        let next = match page.page_info.end_cursor {
            Some(next) => next,
            None => {
                collected.error = Some(stop("a page claimed more results without a cursor".into()));
                break;
            }
        };
        if !seen_cursors.insert(next.clone()) {
            collected.error = Some(stop(format!("cursor `{}` was returned twice", next).into()));
            break;
        }
        if collected.pages >= max_pages {
            collected.error = Some(stop(format!("reached the limit of {} pages", max_pages).into()));
            break;
        }

        cursor = Some(next);
    }

    collected
}

/// Writes one report row per repository on which an outside collaborator of
/// `org` holds access. `username` restricts the report to that collaborator.
///
/// Rows are grouped by collaborator, in the order the service lists them, then
/// by repository in page order. A collaborator whose repositories cannot all be
/// fetched is reported with what was gathered and counted as failed.
pub async fn list_collaborators<A, W>(
    api: &A,
    org: &str,
    username: Option<&str>,
    max_pages: usize,
    report: &mut ReportWriter<W>,
) -> Result<Summary>
where
    A: CollaboratorApi + ?Sized,
    W: Write,
{
    report.write_header()?;

    debug!("Gathering repositories and access for {}", org);
    let mut collaborators = api.outside_collaborators(org).await?;
    debug!("{} has {} outside collaborators", org, collaborators.len());

    if let Some(username) = username {
        debug!(
            "Checking if username {} is in list of repository collaborators",
            username
        );
        collaborators.retain(|c| c.login == username);
        if collaborators.is_empty() {
            warn!("{} is not an outside collaborator of {}", username, org);
        }
    }

    let mut summary = Summary::default();
    for collaborator in &collaborators {
        let login = collaborator.login.as_str();
        summary.attempted += 1;

        debug!("Gathering repositories for username {}", login);
        let collected = collect_repository_permissions(api, org, login, max_pages).await;
        let mut failed = false;

        if let Some(e) = &collected.error {
            error!(
                "Error raised in gathering repositories and permissions for {}: {}",
                login, e
            );
            failed = true;
        }

        for row in collected
            .repositories
            .iter()
            .filter_map(|record| ReportRow::from_record(record, login))
        {
            match report.write_row(&row) {
                Ok(()) => summary.written += 1,
                Err(e) => {
                    error!(
                        "Error raised in writing output for {} on {}: {}",
                        login, row.repository_name, e
                    );
                    failed = true;
                }
            }
        }

        if failed {
            summary.failed += 1;
        }
    }

    Ok(summary)
}
