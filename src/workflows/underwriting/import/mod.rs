//! Partner feed import: CSV rows of submitted applications.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::underwriting::applications::CreditCardApplication;

use parser::FeedRow;

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Field {
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read application feed: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid application feed data: {}", err),
            BatchImportError::Field { column, value } => {
                write!(f, "could not parse feed column '{}' from '{}'", column, value)
            }
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
            BatchImportError::Field { .. } => None,
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct BatchApplicationImporter;

impl BatchApplicationImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<CreditCardApplication>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<CreditCardApplication>, BatchImportError> {
        parser::parse_rows(reader)?
            .into_iter()
            .map(application_from_row)
            .collect()
    }
}

fn application_from_row(row: FeedRow) -> Result<CreditCardApplication, BatchImportError> {
    let age = match row.age {
        Some(raw) => raw.parse::<u8>().map_err(|_| BatchImportError::Field {
            column: "Age",
            value: raw,
        })?,
        None => 0,
    };

    let gross_annual_income = match row.gross_annual_income {
        Some(raw) => raw.parse::<u32>().map_err(|_| BatchImportError::Field {
            column: "Gross Annual Income",
            value: raw,
        })?,
        None => 0,
    };

    Ok(CreditCardApplication {
        gross_annual_income,
        age,
        frequent_flyer_number: row.frequent_flyer_number,
        last_name: row.last_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Last Name,Age,Gross Annual Income,Frequent Flyer Number\n";

    #[test]
    fn imports_complete_rows() {
        let feed = format!("{HEADER}Jones,42,35000,FF-1001\n");

        let applications =
            BatchApplicationImporter::from_reader(Cursor::new(feed)).expect("feed parses");

        assert_eq!(applications.len(), 1);
        assert_eq!(applications[0].last_name.as_deref(), Some("Jones"));
        assert_eq!(applications[0].age, 42);
        assert_eq!(applications[0].gross_annual_income, 35_000);
        assert_eq!(
            applications[0].frequent_flyer_number.as_deref(),
            Some("FF-1001")
        );
    }

    #[test]
    fn blank_cells_fall_back_to_defaults() {
        let feed = format!("{HEADER},,,\n");

        let applications =
            BatchApplicationImporter::from_reader(Cursor::new(feed)).expect("feed parses");

        assert_eq!(applications.len(), 1);
        assert_eq!(applications[0], CreditCardApplication::default());
    }

    #[test]
    fn rejects_unparseable_numeric_fields() {
        let feed = format!("{HEADER}Jones,not-a-number,35000,\n");

        match BatchApplicationImporter::from_reader(Cursor::new(feed)) {
            Err(BatchImportError::Field { column: "Age", value }) => {
                assert_eq!(value, "not-a-number");
            }
            other => panic!("expected field error, got {other:?}"),
        }
    }
}
