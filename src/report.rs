//! Writing the collaborator access report.

use crate::{model::ReportRow, Error, Result};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

pub const REPORT_HEADER: [&str; 5] = [
    "RepositoryName",
    "RepositoryID",
    "Visibility",
    "Username",
    "AccessLevel",
];

/// `RepoCollaboratorsReport-<timestamp>.csv` in the working directory
pub fn default_report_path() -> PathBuf {
    let now = chrono::Local::now();
    PathBuf::from(format!(
        "RepoCollaboratorsReport-{}.csv",
        now.format("%Y%m%d%H%M%S")
    ))
}

pub struct ReportWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl ReportWriter<File> {
    /// Creates the report file, truncating anything already at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::file(path, e))?;
        Ok(Self::new(file))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: csv::Writer::from_writer(writer),
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.inner.write_record(&REPORT_HEADER)?;
        Ok(())
    }

    pub fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        let repository_id = row
            .repository_id
            .map(|id| id.to_string())
            .unwrap_or_default();

        self.inner.write_record(&[
            row.repository_name.as_str(),
            repository_id.as_str(),
            row.visibility.as_str(),
            row.username.as_str(),
            row.access_level.as_str(),
        ])?;
        Ok(())
    }

    /// Flushes buffered rows and hands back the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

#[cfg(test)]
mod test {
    use super::{default_report_path, ReportWriter, REPORT_HEADER};
    use crate::model::ReportRow;
    use github::{RepositoryPermission, RepositoryVisibility};

    fn row(name: &str, username: &str) -> ReportRow {
        ReportRow {
            repository_name: name.to_owned(),
            repository_id: Some(1296269),
            visibility: RepositoryVisibility::Internal,
            username: username.to_owned(),
            access_level: RepositoryPermission::Triage,
        }
    }

    #[test]
    fn header_and_rows() {
        let mut writer = ReportWriter::new(Vec::new());
        writer.write_header().unwrap();
        writer.write_row(&row("octo-repo", "alice")).unwrap();
        writer
            .write_row(&ReportRow {
                repository_id: None,
                ..row("docs", "bob")
            })
            .unwrap();

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "RepositoryName,RepositoryID,Visibility,Username,AccessLevel\n\
             octo-repo,1296269,INTERNAL,alice,TRIAGE\n\
             docs,,INTERNAL,bob,TRIAGE\n"
        );
    }

    #[test]
    fn rows_survive_reparsing() {
        let names = ["plain", "with,comma", "with \"quotes\"", "dotted.name_1-x"];

        let mut writer = ReportWriter::new(Vec::new());
        writer.write_header().unwrap();
        for name in &names {
            writer.write_row(&row(name, "octo-cat")).unwrap();
        }
        let output = writer.finish().unwrap();

        let mut reader = csv::Reader::from_reader(output.as_slice());
        assert_eq!(reader.headers().unwrap(), &REPORT_HEADER[..]);

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(records.len(), names.len());
        for (record, name) in records.iter().zip(&names) {
            assert_eq!(
                record,
                &vec![*name, "1296269", "INTERNAL", "octo-cat", "TRIAGE"][..]
            );
        }
    }

    #[test]
    fn default_path_embeds_timestamp() {
        let path = default_report_path();
        let name = path.to_str().unwrap();

        assert!(name.starts_with("RepoCollaboratorsReport-"));
        assert!(name.ends_with(".csv"));
        let stamp = &name["RepoCollaboratorsReport-".len()..name.len() - ".csv".len()];
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn create_truncates_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "stale content that is much longer than the report\n").unwrap();

        let mut writer = ReportWriter::create(file.path()).unwrap();
        writer.write_header().unwrap();
        writer.finish().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            contents,
            "RepositoryName,RepositoryID,Visibility,Username,AccessLevel\n"
        );
    }
}
