//! Reading collaborator assignments from CSV input files.
//!
//! Files always start with a header row, `RepositoryName,Username,Permission`
//! for additions and `RepositoryName,Username` for removals. Columns are
//! mapped by position; the header's contents are not inspected.

use crate::{model::CollaboratorAssignment, Error, Result};
use csv::StringRecord;
use log::debug;
use std::{fs::File, io::Read, path::Path};

const ASSIGNMENT_COLUMNS: usize = 2;
const ASSIGNMENT_WITH_PERMISSION_COLUMNS: usize = 3;

/// Reads every row of the CSV file at `path`, including the header.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<StringRecord>> {
    let path = path.as_ref();
    debug!("Opening up file {}", path.display());
    let file = File::open(path).map_err(|e| Error::file(path, e))?;

    read_rows_from(file)
}

pub fn read_rows_from<R: Read>(reader: R) -> Result<Vec<StringRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    debug!("Read {} lines from csv input", rows.len());
    Ok(rows)
}

/// Converts raw CSV rows into assignments, skipping the leading header row.
///
/// Every data row must provide a repository and a username, plus a permission
/// when `include_permission` is set. Extra columns are ignored.
pub fn parse_assignments(
    rows: &[StringRecord],
    include_permission: bool,
) -> Result<Vec<CollaboratorAssignment>> {
    let (_header, rows) = rows.split_first().ok_or(Error::MissingHeader)?;
    let expected = if include_permission {
        ASSIGNMENT_WITH_PERMISSION_COLUMNS
    } else {
        ASSIGNMENT_COLUMNS
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            if row.len() < expected {
                let line = row
                    .position()
                    .map(|p| p.line() as usize)
                    // header is line 1
                    .unwrap_or(index + 2);
                return Err(Error::MalformedRow {
                    line,
                    expected,
                    found: row.len(),
                });
            }

            Ok(CollaboratorAssignment {
                repository: row[0].to_owned(),
                username: row[1].to_owned(),
                permission: if include_permission {
                    Some(row[2].to_owned())
                } else {
                    None
                },
            })
        })
        .collect()
}

pub fn read_assignments<P: AsRef<Path>>(
    path: P,
    include_permission: bool,
) -> Result<Vec<CollaboratorAssignment>> {
    parse_assignments(&read_rows(path)?, include_permission)
}
