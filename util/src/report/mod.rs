//! Rendering a timer's laps as a text table or a one-line JSON document.

use std::io;
use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use crate::ext::duration::DurationExt;
use crate::timer::Lap;
use crate::timer::Timer;

use table::Table;

mod table;


const HEADER: &str = "--- Performance Measurement Results ---";
const FOOTER: &str = "---------------------------------------";
const COLUMN_PADDING: usize = 3;
const ELAPSED_WIDTH: usize = 15;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct LapRecord<'a> {
    file: &'a str,
    line: u32,
    message: &'a str,
    duration: String,
}

impl<'a> From<&'a Lap> for LapRecord<'a> {
    fn from(lap: &'a Lap) -> Self {
        LapRecord {
            file: lap.location().file(),
            line: lap.location().line(),
            message: lap.message(),
            duration: lap.duration().canonical_fmt(),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    laps: Vec<LapRecord<'a>>,
}

impl<'a> Report<'a> {
    fn new(laps: &'a [Lap]) -> Self {
        Report {
            laps: laps.iter().map(LapRecord::from).collect(),
        }
    }
}

pub fn write_table<W: Write>(laps: &[Lap], out: &mut W) -> io::Result<()> {
    let mut table = Table::new(COLUMN_PADDING);
    table.row(vec!["Elapsed", "Location", "Message"]);
    table.row(vec!["-------", "--------", "-------"]);
    for lap in laps {
        table.row(vec![
            format!("{:<width$}", lap.duration().canonical_fmt(), width = ELAPSED_WIDTH),
            lap.location().to_string(),
            lap.message().to_string(),
        ]);
    }

    writeln!(out, "{}", HEADER)?;
    table.write_to(out)?;
    writeln!(out, "{}", FOOTER)?;
    out.flush()
}

pub fn to_json(laps: &[Lap]) -> Result<String, ReportError> {
    Ok(serde_json::to_string(&Report::new(laps))?)
}

/// Writes `value` as one JSON line to `out`. If it can't be serialized the
/// failure goes to `diag` instead and nothing reaches `out`.
pub fn emit_json<T, W, E>(value: &T, out: &mut W, diag: &mut E) -> io::Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
    E: Write,
{
    match serde_json::to_string(value).map_err(ReportError::from) {
        Ok(line) => writeln!(out, "{}", line),
        Err(e) => {
            log::error!("failed to serialize report: {}", e);
            writeln!(diag, "Failed to marshal JSON: {}", e)
        }
    }
}

pub fn write_json<W: Write, E: Write>(laps: &[Lap], out: &mut W, diag: &mut E) -> io::Result<()> {
    emit_json(&Report::new(laps), out, diag)
}

impl Timer {
    /// Prints the laps as an aligned table on stdout. Write errors are dropped.
    pub fn print(&self) {
        let stdout = io::stdout();
        let _ = self.write_table(&mut stdout.lock());
    }

    /// Prints the laps as a single JSON line on stdout, or a diagnostic on
    /// stderr if they can't be serialized. Write errors are dropped.
    pub fn print_json(&self) {
        let stdout = io::stdout();
        let stderr = io::stderr();
        let _ = self.write_json(&mut stdout.lock(), &mut stderr.lock());
    }

    pub fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_table(self.laps(), out)
    }

    pub fn write_json<W: Write, E: Write>(&self, out: &mut W, diag: &mut E) -> io::Result<()> {
        write_json(self.laps(), out, diag)
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        to_json(self.laps())
    }
}
