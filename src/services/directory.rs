use crate::models::{AccommodationType, EmployerRecord, UnknownLabel};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the employer directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to open employer directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed employer directory: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("row {row}: {source}")]
    UnknownAccommodation {
        row: usize,
        #[source]
        source: UnknownLabel,
    },
}

/// Supplier of employer records
pub trait EmployerSource: Send + Sync {
    fn employers(&self) -> &[EmployerRecord];

    fn len(&self) -> usize {
        self.employers().len()
    }

    fn is_empty(&self) -> bool {
        self.employers().is_empty()
    }
}

/// Employer directory read once from a CSV file.
///
/// Expected columns: `name`, `company_size`, `industry`, `remote_policy`,
/// `available_accommodations`.
#[derive(Debug, Clone, Default)]
pub struct CsvEmployerDirectory {
    employers: Vec<EmployerRecord>,
}

impl CsvEmployerDirectory {
    /// Load the directory from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Parse the directory from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut employers = Vec::new();

        for (index, record) in csv_reader.deserialize::<EmployerRow>().enumerate() {
            let row = index + 1;
            let record = record?;

            if record.name.is_empty() {
                return Err(DirectoryError::InvalidRecord {
                    row,
                    reason: "employer name is empty".to_string(),
                });
            }

            let available_accommodations = parse_accommodations(&record.available_accommodations)
                .map_err(|source| DirectoryError::UnknownAccommodation { row, source })?;

            employers.push(EmployerRecord {
                name: record.name,
                company_size: record.company_size,
                industry: record.industry,
                remote_policy: record.remote_policy,
                available_accommodations,
            });
        }

        Ok(Self { employers })
    }

    pub fn from_records(employers: Vec<EmployerRecord>) -> Self {
        Self { employers }
    }
}

impl EmployerSource for CsvEmployerDirectory {
    fn employers(&self) -> &[EmployerRecord] {
        &self.employers
    }
}

#[derive(Debug, Deserialize)]
struct EmployerRow {
    name: String,
    company_size: String,
    industry: String,
    remote_policy: String,
    #[serde(default)]
    available_accommodations: String,
}

/// Parse a list-like accommodations cell.
///
/// Accepts `[...]` list syntax or a bare list, separated by `,` or `;`, with
/// optionally quoted items. An empty cell is the empty set.
pub fn parse_accommodations(cell: &str) -> Result<BTreeSet<AccommodationType>, UnknownLabel> {
    let trimmed = cell.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split(&[',', ';'][..])
        .map(|item| item.trim().trim_matches(|c: char| c == '\'' || c == '"').trim())
        .filter(|item| !item.is_empty())
        .map(str::parse::<AccommodationType>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
name,company_size,industry,remote_policy,available_accommodations
Acme Labs,large,tech,hybrid,\"['remote work', 'flexible schedule']\"
Northwind Care,medium,healthcare,in-office,interpreter services; assistive technology
Quiet Co,small,tech,fully remote,
";

    #[test]
    fn test_load_from_reader() {
        let directory = CsvEmployerDirectory::from_reader(SAMPLE.as_bytes()).unwrap();
        let employers = directory.employers();

        assert_eq!(directory.len(), 3);
        assert_eq!(employers[0].name, "Acme Labs");
        assert!(employers[0].provides(AccommodationType::RemoteWork));
        assert!(employers[0].provides(AccommodationType::FlexibleSchedule));
        assert_eq!(employers[0].available_accommodations.len(), 2);
        assert_eq!(employers[1].industry, "healthcare");
        assert!(employers[1].provides(AccommodationType::InterpreterServices));
        assert!(employers[2].available_accommodations.is_empty());
    }

    #[test]
    fn test_parse_accommodation_cells() {
        assert!(parse_accommodations("").unwrap().is_empty());
        assert!(parse_accommodations("[]").unwrap().is_empty());
        assert_eq!(
            parse_accommodations("[\"noise reduction\"]").unwrap(),
            [AccommodationType::NoiseReduction].into_iter().collect::<BTreeSet<_>>()
        );
        assert_eq!(parse_accommodations("remote work, remote work").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_accommodation_names_the_row() {
        let data = "\
name,company_size,industry,remote_policy,available_accommodations
Good,small,tech,hybrid,remote work
Bad,small,tech,hybrid,free snacks
";

        let err = CsvEmployerDirectory::from_reader(data.as_bytes()).unwrap_err();
        match err {
            DirectoryError::UnknownAccommodation { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source.value, "free snacks");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let data = "\
name,company_size,industry,remote_policy,available_accommodations
,small,tech,hybrid,
";

        let err = CsvEmployerDirectory::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn test_missing_column_rejected() {
        let data = "name,company_size,industry\nAcme,large,tech\n";

        let err = CsvEmployerDirectory::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DirectoryError::Csv(_)));
    }

    #[test]
    fn test_header_only_is_empty_directory() {
        let data = "name,company_size,industry,remote_policy,available_accommodations\n";

        let directory = CsvEmployerDirectory::from_reader(data.as_bytes()).unwrap();
        assert!(directory.is_empty());
    }
}
