use std::collections::HashSet;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::*;
use tracing::debug;

use crate::error::IngestError;
use crate::schema::TEXT_COLUMNS;

pub const ACCEPTED_EXTENSION: &str = "csv";

/// One uploaded dataset: rows in file order, one column per CSV header.
#[derive(Debug, Clone)]
pub struct RawRecordSet {
    df: DataFrame,
}

impl RawRecordSet {
    pub fn from_frame(df: DataFrame) -> Self {
        Self { df }
    }

    /// Parses CSV text. Columns whose non-empty cells all parse as numbers
    /// become `Float64`; everything else stays text, as do the label columns.
    /// Empty cells are null. A repeated header gets a `.N` suffix.
    pub fn from_csv_bytes(content: &[u8]) -> Result<Self, IngestError> {
        if content.iter().all(u8::is_ascii_whitespace) {
            return Err(IngestError::EmptyFile);
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(content);

        let headers = unique_headers(reader.headers()?.iter());
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

        for record in reader.records() {
            let record = record?;
            for (column, value) in cells.iter_mut().zip(record.iter()) {
                column.push(if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                });
            }
        }

        let columns: Vec<Column> = headers
            .iter()
            .zip(cells)
            .map(|(name, values)| build_column(name, values))
            .collect();

        let df = DataFrame::new(columns)?;
        debug!(rows = df.height(), columns = df.width(), "parsed uploaded CSV");
        Ok(Self { df })
    }

    /// Uploads are constrained by file extension before parsing.
    pub fn from_upload(file_name: &str, content: &[u8]) -> Result<Self, IngestError> {
        if !has_accepted_extension(file_name) {
            return Err(IngestError::UnsupportedExtension(file_name.to_string()));
        }
        Self::from_csv_bytes(content)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }
}

pub fn has_accepted_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
}

/// Renames repeated headers to `name.1`, `name.2`, ... skipping names already taken.
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let raw: Vec<&str> = raw.collect();
    let mut taken: HashSet<String> = raw.iter().map(|name| name.to_string()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    raw.iter()
        .map(|&name| {
            if seen.insert(name) {
                return name.to_string();
            }
            let renamed = (1..)
                .map(|n| format!("{name}.{n}"))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_else(|| name.to_string());
            taken.insert(renamed.clone());
            renamed
        })
        .collect()
}

fn build_column(name: &str, values: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = if TEXT_COLUMNS.contains(&name) {
        None
    } else {
        values
            .iter()
            .map(|cell| match cell {
                Some(text) => text.trim().parse::<f64>().ok().map(Some),
                None => Some(None),
            })
            .collect()
    };

    match parsed {
        Some(numbers) => Series::new(name.into(), numbers).into(),
        None => {
            let text: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
            Series::new(name.into(), text).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_numeric_and_text_columns() {
        let csv = b"athlete_name,time,flag\nA,0.0,\nA,0.5,1\n";
        let raw = RawRecordSet::from_csv_bytes(csv).unwrap();

        let df = raw.frame();
        assert_eq!(raw.height(), 2);
        assert_eq!(df.column("athlete_name").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("time").unwrap().dtype(), &DataType::Float64);

        let flag = df.column("flag").unwrap().f64().unwrap();
        assert_eq!(flag.get(0), None);
        assert_eq!(flag.get(1), Some(1.0));
    }

    #[test]
    fn header_only_file_has_zero_rows() {
        let raw = RawRecordSet::from_csv_bytes(b"time,handedness\n").unwrap();
        assert_eq!(raw.height(), 0);
        assert_eq!(raw.frame().width(), 2);
    }

    #[test]
    fn rejects_blank_upload() {
        assert!(matches!(
            RawRecordSet::from_csv_bytes(b"  \n"),
            Err(IngestError::EmptyFile)
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = RawRecordSet::from_csv_bytes(b"a,b\n1,2\n3\n");
        assert!(matches!(result, Err(IngestError::Csv(_))));
    }

    #[test]
    fn label_columns_keep_numeric_looking_text() {
        let csv = b"athlete_name,handedness,time\n007,1e3,0.5\n";
        let raw = RawRecordSet::from_csv_bytes(csv).unwrap();

        let df = raw.frame();
        let name = df.column("athlete_name").unwrap().str().unwrap();
        assert_eq!(name.get(0), Some("007"));
        let handedness = df.column("handedness").unwrap().str().unwrap();
        assert_eq!(handedness.get(0), Some("1e3"));
        assert_eq!(df.column("time").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn repeated_headers_are_suffixed() {
        let csv = b"time,time,time.1,time\n1,2,3,4\n";
        let raw = RawRecordSet::from_csv_bytes(csv).unwrap();

        let names: Vec<&str> = raw
            .frame()
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["time", "time.2", "time.1", "time.3"]);

        let first = raw.frame().column("time").unwrap().f64().unwrap();
        assert_eq!(first.get(0), Some(1.0));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_accepted_extension("session.csv"));
        assert!(has_accepted_extension("SESSION.CSV"));
        assert!(!has_accepted_extension("session.xlsx"));
        assert!(!has_accepted_extension("csv"));
    }
}
