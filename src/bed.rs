//! BED ingestion and emission.
//!
//! Ingestion turns raw text into validated [`Line`]s: header capture, column
//! count checks across every input, coordinate parsing and strand/feature
//! extraction. Emission writes headers followed by tab-joined lines.

use crate::interval::{Line, CHR_IDX, START_IDX, STOP_IDX};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors raised anywhere in the crate.
#[derive(Error, Debug)]
pub enum BedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid BED format: {0}")]
    InvalidFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("unknown sorting type {0}")]
    UnknownSortType(String),

    #[error("unknown padding type {0}")]
    UnknownPaddingPolicy(String),

    #[error("chromosome {chrom} not in fasta index file {index}")]
    ChromNotInIndex { chrom: String, index: String },

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BedError>;

/// Minimum number of columns in a BED line.
pub const MIN_COLUMNS: usize = STOP_IDX + 1;

/// Accepted values of a configured strand column.
pub const STRAND_VALUES: &[&str] = &[".", "+", "-", "+1", "-1", "1"];

/// Zero-based positions of the optional grouping columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnSpec {
    pub strand: Option<usize>,
    pub feat: Option<usize>,
}

fn is_header(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}

/// A BED reader yielding validated lines.
///
/// Header lines are collected only until the first data line; afterwards
/// they are parsed like any other line.
pub struct BedReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
    columns: ColumnSpec,
    expected_cols: Option<usize>,
    in_header: bool,
    header: Vec<String>,
}

impl BedReader<File> {
    /// Open a BED file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P, columns: ColumnSpec) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file, columns))
    }
}

impl<R: Read> BedReader<R> {
    /// Create a new BED reader from any readable source.
    pub fn new(reader: R, columns: ColumnSpec) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(1024),
            columns,
            expected_cols: None,
            in_header: true,
            header: Vec::new(),
        }
    }

    /// Carry state over from earlier inputs so several files read as one:
    /// the column count to enforce, and whether headers are still accepted.
    pub fn continuing(mut self, expected_cols: Option<usize>, in_header: bool) -> Self {
        self.expected_cols = expected_cols;
        self.in_header = in_header;
        self
    }

    /// Header lines seen so far, draining them from the reader.
    pub fn take_header(&mut self) -> Vec<String> {
        std::mem::take(&mut self.header)
    }

    /// Read the next data line.
    pub fn read_line(&mut self) -> Result<Option<Line>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let text = self.buffer.trim_end_matches(['\n', '\r']);
            if text.is_empty() {
                continue;
            }
            if self.in_header && is_header(text) {
                self.header.push(text.to_string());
                continue;
            }
            self.in_header = false;

            let text = text.to_string();
            return self.parse_line(&text).map(Some);
        }
    }

    fn parse_line(&mut self, text: &str) -> Result<Line> {
        let full: Vec<String> = text.split('\t').map(str::to_string).collect();

        let expected = match self.expected_cols {
            Some(n) => n,
            None => {
                if full.len() < MIN_COLUMNS {
                    return Err(self.error(format!(
                        "less than {} columns: {}",
                        MIN_COLUMNS, text
                    )));
                }
                self.expected_cols = Some(full.len());
                full.len()
            }
        };
        if full.len() != expected {
            return Err(self.error(format!(
                "expected {} columns got {}: {}",
                expected,
                full.len(),
                text
            )));
        }

        let start = self.parse_position(&full[START_IDX], "start")?;
        let stop = self.parse_position(&full[STOP_IDX], "stop")?;
        if start > stop {
            return Err(self.error(format!("start is greater than stop: {} > {}", start, stop)));
        }
        if start == stop {
            log::warn!(
                "start and stop is equal on line {}: {} == {}",
                self.line_number,
                start,
                stop
            );
        }

        let mut line = Line::new(full[CHR_IDX].clone(), start, stop, full);

        if let Some(idx) = self.columns.strand {
            let strand = self.column(&line, idx, "strand")?;
            if !STRAND_VALUES.contains(&strand.as_str()) {
                return Err(self.error(format!("unexpected strand format: {}", strand)));
            }
            line.strand = strand;
        }
        if let Some(idx) = self.columns.feat {
            line.feat = self.column(&line, idx, "feature")?;
        }

        Ok(line)
    }

    fn column(&self, line: &Line, idx: usize, what: &str) -> Result<String> {
        line.full.get(idx).cloned().ok_or_else(|| {
            BedError::InvalidFormat(format!(
                "given {} column, {}, is outside bed file (nr columns={})",
                what,
                idx + 1,
                line.full.len()
            ))
        })
    }

    fn parse_position(&self, s: &str, field_name: &str) -> Result<i64> {
        s.parse()
            .map_err(|_| self.error(format!("non-int {} position: '{}'", field_name, s)))
    }

    fn error(&self, message: String) -> BedError {
        BedError::Parse {
            line: self.line_number,
            message,
        }
    }
}

/// Everything read from one or more BED inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BedFile {
    pub header: Vec<String>,
    pub lines: Vec<Line>,
}

impl BedFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the contents of another input, enforcing the column count of
    /// lines already read.
    pub fn read_from<R: Read>(&mut self, reader: R, columns: ColumnSpec) -> Result<()> {
        let expected = self.lines.first().map(|l| l.full.len());
        let mut reader =
            BedReader::new(reader, columns).continuing(expected, self.lines.is_empty());
        while let Some(line) = reader.read_line()? {
            self.lines.push(line);
        }
        self.header.extend(reader.take_header());
        Ok(())
    }

    /// Open and append a BED file.
    pub fn read_path<P: AsRef<Path>>(&mut self, path: P, columns: ColumnSpec) -> Result<()> {
        let file = File::open(path)?;
        self.read_from(file, columns)
    }

    /// Write headers and lines.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_bed(writer, &self.header, &self.lines)
    }
}

/// Parse BED content from a string (useful for testing).
pub fn parse_bed(content: &str, columns: ColumnSpec) -> Result<BedFile> {
    let mut bed = BedFile::new();
    bed.read_from(content.as_bytes(), columns)?;
    Ok(bed)
}

/// Write header lines, then every line's columns tab-joined.
pub fn write_bed<W: Write>(writer: &mut W, header: &[String], lines: &[Line]) -> io::Result<()> {
    for h in header {
        writeln!(writer, "{}", h)?;
    }
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
