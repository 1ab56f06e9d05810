//! The item x date quantity matrix and its CSV form

use crate::calendar::DateLabel;
use crate::{LedgerError, Result};
use chrono::Weekday;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Quantities for one item, aligned with the matrix columns
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRow {
    pub item: String,
    pub quantities: Vec<f64>,
}

/// Items as rows, labelled calendar days as columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuantityMatrix {
    columns: Vec<DateLabel>,
    rows: Vec<MatrixRow>,
}

impl QuantityMatrix {
    /// Create a matrix, checking every row has one cell per column
    pub fn new(columns: Vec<DateLabel>, rows: Vec<MatrixRow>) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|r| r.quantities.len() != columns.len()) {
            return Err(LedgerError::InvalidMatrix(format!(
                "row '{}' has {} cells for {} columns",
                bad.item,
                bad.quantities.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Assemble a matrix whose rows are already sized to the columns
    pub(crate) fn from_parts(columns: Vec<DateLabel>, rows: Vec<MatrixRow>) -> Self {
        debug_assert!(rows.iter().all(|r| r.quantities.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[DateLabel] {
        &self.columns
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn row(&self, item: &str) -> Option<&MatrixRow> {
        self.rows.iter().find(|r| r.item == item)
    }

    pub fn column_index(&self, label: &DateLabel) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Cell value for an item and column label
    pub fn value(&self, item: &str, label: &DateLabel) -> Option<f64> {
        let column = self.column_index(label)?;
        self.row(item).map(|r| r.quantities[column])
    }

    /// Column indices belonging to one weekday, in matrix order
    pub fn columns_for(&self, weekday: Weekday) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, label)| label.weekday == weekday)
            .map(|(i, _)| i)
            .collect()
    }

    /// Write as CSV with an `Item` header followed by the column labels
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push("Item".to_string());
        header.extend(self.columns.iter().map(|c| c.to_string()));
        csv_writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(row.quantities.len() + 1);
            record.push(row.item.clone());
            record.extend(row.quantities.iter().map(|q| q.to_string()));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the CSV to a file, creating parent directories
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.write_csv(File::create(path)?)?;
        info!(
            path = %path.display(),
            items = self.rows.len(),
            dates = self.columns.len(),
            "saved quantity matrix"
        );
        Ok(())
    }

    /// Read a matrix CSV
    ///
    /// Header cells that are not `M/D - WeekdayName` labels are skipped along
    /// with their column. Non-numeric quantity cells fail the read.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut columns = Vec::new();
        let mut positions = Vec::new();
        for (position, header) in headers.iter().enumerate().skip(1) {
            match header.parse::<DateLabel>() {
                Ok(label) => {
                    columns.push(label);
                    positions.push(position);
                }
                Err(_) => debug!(header, "skipping non-date column"),
            }
        }

        let mut rows = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = index + 2;
            let item = record.get(0).unwrap_or_default().to_string();

            let mut quantities = Vec::with_capacity(positions.len());
            for &position in &positions {
                let cell = record.get(position).unwrap_or_default().trim();
                let quantity = cell
                    .parse::<f64>()
                    .ok()
                    .filter(|q| q.is_finite())
                    .ok_or_else(|| LedgerError::MalformedInput {
                        row,
                        field: "quantity",
                        value: cell.to_string(),
                        reason: format!("column '{}' is not a number", &headers[position]),
                    })?;
                quantities.push(quantity);
            }
            rows.push(MatrixRow { item, quantities });
        }

        Self::new(columns, rows)
    }

    /// Read a matrix CSV from a file
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let matrix = Self::read_csv(File::open(path)?)?;
        info!(
            path = %path.display(),
            items = matrix.rows.len(),
            dates = matrix.columns.len(),
            "loaded quantity matrix"
        );
        Ok(matrix)
    }
}
