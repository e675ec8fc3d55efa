//! Host protocol on stdout: marker lines around a DSInfo block and a CSV data
//! block.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::flatten::Table;
use crate::params::{Mode, RequestDescriptor};

pub const BEGIN_DS_INFO: &str = "beginDSInfo";
pub const END_DS_INFO: &str = "endDSInfo";
pub const BEGIN_DATA: &str = "beginData";
pub const END_DATA: &str = "endData";

pub struct HostWriter<W: Write> {
    out: W,
}

impl<W: Write> HostWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Echoes the stored parameters back to the host. Values are written in
    /// their escaped form.
    pub fn write_ds_info(&mut self, descriptor: &RequestDescriptor) -> Result<()> {
        let lines = [
            BEGIN_DS_INFO.to_string(),
            format!("URI;{};true;", descriptor.uri),
            format!("TYPE;{};true;", descriptor.method),
            format!("HEADER;{};true;", descriptor.header),
            format!("USERNAME;{};true", descriptor.username),
            format!("PASSWORD;{};true", descriptor.password),
            format!("BODY;{};true", descriptor.body),
            "csv_first_row_has_column_names;true;true".to_string(),
            END_DS_INFO.to_string(),
        ];
        for line in lines {
            writeln!(self.out, "{line}").context("writing DSInfo block")?;
        }
        Ok(())
    }

    /// Writes the table as a data block, keeping at most `limit` rows.
    /// Returns the number of rows written. A table without columns has no
    /// CSV to write, so only the markers are emitted.
    pub fn write_data_block(&mut self, table: &Table, limit: Option<usize>) -> Result<usize> {
        if table.header.is_empty() {
            debug!(total = table.rows.len(), "no columns, writing empty data block");
            self.write_block(&[], &[])?;
            return Ok(0);
        }
        let rows = limit.map_or(table.rows.len(), |max| max.min(table.rows.len()));
        self.write_block(&table.header, &table.rows[..rows])?;
        debug!(rows, total = table.rows.len(), "wrote data block");
        Ok(rows)
    }

    /// Replaces the data with the raw invocation arguments.
    pub fn write_params_block(&mut self, params: &str, mode: Mode) -> Result<()> {
        let header = vec!["params".to_string(), "mode".to_string()];
        let row = vec![params.to_string(), mode.code().to_string()];
        self.write_block(&header, &[row])
    }

    fn write_block(&mut self, header: &[String], rows: &[Vec<String>]) -> Result<()> {
        writeln!(self.out, "{BEGIN_DATA}").context("writing data block")?;
        {
            let mut csv_out = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(&mut self.out);
            if !header.is_empty() {
                csv_out.write_record(header).context("writing CSV header")?;
                for row in rows {
                    csv_out.write_record(row).context("writing CSV row")?;
                }
            }
            csv_out.flush().context("flushing CSV output")?;
        }
        writeln!(self.out, "{END_DATA}").context("writing data block")?;
        self.out.flush().context("flushing output")?;
        Ok(())
    }
}
