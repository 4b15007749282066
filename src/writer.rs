//! Document writers
//!
//! Serialize the collector's final sequence. The pipeline only knows the
//! `DocumentWriter` trait; format details live here.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::{OutputFormat, STDIO_PATH};
use crate::entry::LogEntry;

pub trait DocumentWriter {
    fn write_document(&mut self, entries: &[LogEntry]) -> Result<()>;
}

/// Pretty-printed JSON array, two-space indent, ending in a newline
pub struct JsonDocumentWriter<W: Write> {
    output: W,
}

impl<W: Write> JsonDocumentWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> DocumentWriter for JsonDocumentWriter<W> {
    fn write_document(&mut self, entries: &[LogEntry]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.output, entries)
            .context("Failed to serialize results")?;
        self.output.write_all(b"\n")?;
        self.output.flush()?;
        Ok(())
    }
}

/// One compact JSON object per line
pub struct JsonlDocumentWriter<W: Write> {
    output: W,
}

impl<W: Write> JsonlDocumentWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> DocumentWriter for JsonlDocumentWriter<W> {
    fn write_document(&mut self, entries: &[LogEntry]) -> Result<()> {
        for entry in entries {
            serde_json::to_writer(&mut self.output, entry)
                .context("Failed to serialize results")?;
            self.output.write_all(b"\n")?;
        }
        self.output.flush()?;
        Ok(())
    }
}

/// Build a writer for `path`, where "-" means stdout
pub fn create_writer(format: OutputFormat, path: &Path) -> Result<Box<dyn DocumentWriter>> {
    let output: Box<dyn Write> = if path.as_os_str() == STDIO_PATH {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Box::new(BufWriter::new(file))
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonDocumentWriter::new(output)),
        OutputFormat::Jsonl => Box::new(JsonlDocumentWriter::new(output)),
    })
}

/// Create the writer, write the document and attach the path to any failure
pub fn write_entries(format: OutputFormat, path: &Path, entries: &[LogEntry]) -> Result<()> {
    let mut writer = create_writer(format, path)?;
    writer
        .write_document(entries)
        .with_context(|| format!("Failed to write output: {}", path.display()))
}
