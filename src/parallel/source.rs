//! Line source thread
//!
//! Reads the input strictly in order and feeds the bounded input queue.

use crossbeam_channel::Sender;
use std::io::BufRead;

use super::types::{SequencedLine, SourceReport};

/// Read lines from `reader` and send them to the workers.
///
/// `send` blocks while the queue is full, which is what bounds memory use.
/// The sender is owned here and dropped on return, closing the input queue
/// exactly once. A read error stops production; lines already queued are
/// still processed downstream. Bytes that are not valid UTF-8 are replaced
/// with U+FFFD rather than ending the read.
pub(crate) fn line_source<R: BufRead>(
    mut reader: R,
    line_sender: Sender<SequencedLine>,
) -> SourceReport {
    let mut report = SourceReport::default();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(strip_line_ending(&buffer)).into_owned();
                let line = SequencedLine {
                    seq: report.lines_read as u64,
                    text,
                };
                if line_sender.send(line).is_err() {
                    // Every worker is gone; nobody is left to read
                    tracing::warn!(
                        lines_read = report.lines_read,
                        "input queue disconnected early"
                    );
                    break;
                }
                report.lines_read += 1;
            }
            Err(e) => {
                tracing::error!(
                    lines_read = report.lines_read,
                    error = %e,
                    "read failed, stopping line source"
                );
                report.error = Some(e);
                break;
            }
        }
    }

    tracing::debug!(lines_read = report.lines_read, "line source exhausted, closing input queue");
    report
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
