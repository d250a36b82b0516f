use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde_json::Value;

use crate::config::ExportConfig;
use crate::error::Error;
use super::tramite::{Tramite, FIXED_FIELDS};

// Flat tabular form of the fetched tramites: header names plus one row of
// values per tramite, in fetch order
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

pub struct ReportExporter {
    nested_fields: Vec<String>,
}

impl ReportExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            nested_fields: config.nested_fields.clone(),
        }
    }

    // Writes the tramites to an xlsx workbook at `output_path`. Fails soft:
    // an empty input only prints a notice, and a write failure is logged
    // without aborting the run
    pub fn export(&self, tramites: &[Tramite], output_path: &Path) {
        if tramites.is_empty() {
            println!("No tramites to export. Spreadsheet not generated.");
            return;
        }

        let table = self.build_table(tramites);
        match write_workbook(&table, output_path) {
            Ok(()) => println!(
                "Export complete: {} rows written to '{}'",
                table.rows.len(),
                output_path.display()
            ),
            Err(err) => eprintln!(
                "Error writing spreadsheet '{}': {}",
                output_path.display(),
                err
            ),
        }
    }

    // Builds the flat table: fixed fields first, then the configured nested
    // fields resolved against each tramite's flattened `datos`. Missing
    // values become null cells
    pub fn build_table(&self, tramites: &[Tramite]) -> ReportTable {
        let mut columns: Vec<String> =
            FIXED_FIELDS.iter().map(|field| field.to_string()).collect();
        columns.extend(self.nested_fields.iter().cloned());

        let mut rows = Vec::with_capacity(tramites.len());
        for tramite in tramites {
            let flattened = tramite.flatten_datos();
            let mut row = Vec::with_capacity(columns.len());

            for field in FIXED_FIELDS {
                row.push(tramite.field(field).cloned().unwrap_or(Value::Null));
            }
            for field in &self.nested_fields {
                row.push(flattened.get(field).cloned().unwrap_or(Value::Null));
            }

            rows.push(row);
        }

        ReportTable { columns, rows }
    }
}

fn write_workbook(table: &ReportTable, output_path: &Path) -> Result<(), Error> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, name.as_str(), &header_format)?;
    }

    let progress_bar = ProgressBar::new(table.rows.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for (row_index, row) in table.rows.iter().enumerate() {
        for (col_index, value) in row.iter().enumerate() {
            write_cell(worksheet, (row_index + 1) as u32, col_index as u16, value)?;
        }
        progress_bar.inc(1);
    }
    progress_bar.finish_with_message("Rows written");

    workbook.save(output_path)?;
    Ok(())
}

// Writes one JSON value into a cell with its natural spreadsheet type;
// nulls stay blank, containers become compact JSON text
fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<(), Error> {
    match value {
        Value::Null => {}
        Value::Bool(flag) => {
            worksheet.write(row, col, *flag)?;
        }
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                worksheet.write(row, col, int)?;
            } else if let Some(float) = number.as_f64() {
                worksheet.write(row, col, float)?;
            } else {
                worksheet.write(row, col, number.to_string())?;
            }
        }
        Value::String(text) => {
            worksheet.write(row, col, text.as_str())?;
        }
        other => {
            worksheet.write(row, col, other.to_string())?;
        }
    }
    Ok(())
}
