// src/data_input/series_table.rs

use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{PlotError, Result};

/// Column-oriented numeric data read from a CSV file.
///
/// The header row supplies one label per column. Lines starting with `#`
/// are comments, as written by most trajectory-analysis tools.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesTable {
    pub labels: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl SeriesTable {
    /// Reads a CSV file. With `index_column`, the first column (frame or
    /// time) is dropped.
    pub fn from_path(path: &Path, index_column: bool) -> Result<Self> {
        let file = File::open(path).map_err(|e| PlotError::io(path, e))?;
        let table = Self::from_reader(BufReader::new(file), index_column)?;
        debug!(
            "Read {} columns x {} rows from '{}'",
            table.columns.len(),
            table.columns.first().map_or(0, Vec::len),
            path.display()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, index_column: bool) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let skip = usize::from(index_column);
        let labels: Vec<String> = headers.iter().skip(skip).map(str::to_string).collect();
        if labels.is_empty() {
            return Err(PlotError::Config("CSV input has no data columns".to_string()));
        }

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); labels.len()];
        let mut skipped_rows = 0usize;
        // A row is kept or dropped as a whole so every column stays aligned
        // with the frame index.
        'rows: for (row_index, result) in reader.records().enumerate() {
            let record = result?;
            let mut row = Vec::with_capacity(labels.len());
            for (col, field) in record.iter().skip(skip).enumerate().take(labels.len()) {
                match field.parse::<f64>() {
                    Ok(value) => row.push(value),
                    Err(_) => {
                        warn!(
                            "Skipping row {}: unparseable value '{field}' in column '{}'",
                            row_index + 1,
                            labels[col]
                        );
                        skipped_rows += 1;
                        continue 'rows;
                    }
                }
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        if skipped_rows > 0 {
            debug!("Dropped {skipped_rows} incomplete row(s)");
        }

        Ok(Self { labels, columns })
    }

    /// Keeps only the named columns, in the order given.
    pub fn select(self, names: &[String]) -> Result<Self> {
        let mut labels = Vec::with_capacity(names.len());
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let idx = self
                .labels
                .iter()
                .position(|l| l == name)
                .ok_or_else(|| {
                    PlotError::Config(format!("column '{name}' not found in CSV header"))
                })?;
            labels.push(self.labels[idx].clone());
            columns.push(self.columns[idx].clone());
        }
        Ok(Self { labels, columns })
    }
}
