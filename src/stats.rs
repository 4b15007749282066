use std::time::{Duration, Instant};

/// Statistics collected during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingStats {
    pub lines_read: usize,
    pub lines_matched: usize,
    pub lines_unmatched: usize,
    pub duplicates: usize,
    pub entries_output: usize,
    pub workers: usize,
    pub processing_time: Duration,
}

/// Per-worker counters, returned when the worker thread exits
#[derive(Debug, Clone, Default)]
pub struct WorkerStats {
    pub worker_id: usize,
    pub lines_classified: usize,
    pub lines_matched: usize,
}

impl ProcessingStats {
    pub fn finish(&mut self, started: Instant) {
        self.processing_time = started.elapsed();
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Lines processed: {} total, {} matched, {} unmatched; Entries: {} output, {} duplicates",
            self.lines_read,
            self.lines_matched,
            self.lines_unmatched,
            self.entries_output,
            self.duplicates
        );

        output.push_str(&format!(", {} workers", self.workers));

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.lines_read > 0 {
            let lines_per_sec = (self.lines_read as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} lines/s)", lines_per_sec));
        }

        output
    }
}
