//! Sinks that record solve results.
//!
//! Text format, appended per board:
//! - the board's canonical code
//! - the board rendered as a triangle, then a blank line
//! - either `no solution found.`, or `solution found. colors = N`, one
//!   `[(r, c)(r, c)(r, c)]` line per move (start, jumped, end) and
//!   `End of this one.`
//!
//! JSON-lines format: one object per board with `code`, `side`, `colors`,
//! `solved` and `moves`.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::board::{format_board, Board};
use crate::moves::Move;

/// Receives the outcome of each solved board.
pub trait ReportSink {
    fn record(&mut self, board: &Board, solution: Option<&[Move]>) -> io::Result<()>;

    /// Called once after the last board.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Human-readable report.
pub struct TextReport<W: Write> {
    writer: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextReport<BufWriter<File>> {
    /// Opens `path` for appending, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn record(&mut self, board: &Board, solution: Option<&[Move]>) -> io::Result<()> {
        writeln!(self.writer, "{}", board.code())?;
        write!(self.writer, "{}", format_board(board))?;
        writeln!(self.writer)?;

        let Some(moves) = solution else {
            writeln!(self.writer, "no solution found.")?;
            return Ok(());
        };

        writeln!(self.writer, "solution found. colors = {}", board.colors())?;
        for mv in moves {
            writeln!(self.writer, "{mv}")?;
        }
        writeln!(self.writer, "End of this one.")?;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[derive(Serialize)]
struct ReportEntry<'a> {
    code: String,
    side: usize,
    colors: u8,
    solved: bool,
    moves: Option<&'a [Move]>,
}

/// Machine-readable report, one JSON object per line.
pub struct JsonLinesReport<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesReport<BufWriter<File>> {
    /// Opens `path` for appending, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportSink for JsonLinesReport<W> {
    fn record(&mut self, board: &Board, solution: Option<&[Move]>) -> io::Result<()> {
        let entry = ReportEntry {
            code: board.code(),
            side: board.side(),
            colors: board.colors(),
            solved: solution.is_some(),
            moves: solution,
        };
        serde_json::to_writer(&mut self.writer, &entry)?;
        writeln!(self.writer)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Forwards every record to several sinks.
impl ReportSink for Vec<Box<dyn ReportSink>> {
    fn record(&mut self, board: &Board, solution: Option<&[Move]>) -> io::Result<()> {
        for sink in self.iter_mut() {
            sink.record(board, solution)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        for sink in self.iter_mut() {
            sink.finish()?;
        }
        Ok(())
    }
}
