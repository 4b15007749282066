//! Collector for parallel processing
//!
//! Drains the output queue on a single thread, deduplicates by original line
//! and builds the final sequence. The dedup set and the final sequence live
//! only here, so they need no locking.

use crossbeam_channel::Receiver;
use std::collections::{BTreeMap, HashSet};

use crate::config::OutputOrder;
use crate::entry::LogEntry;
use crate::stats::ProcessingStats;

use super::types::Classified;

pub struct Collector {
    order: OutputOrder,
    seen: HashSet<String>,
    entries: Vec<LogEntry>,
    stats: ProcessingStats,
}

impl Collector {
    pub fn new(order: OutputOrder) -> Self {
        Self {
            order,
            seen: HashSet::new(),
            entries: Vec::new(),
            stats: ProcessingStats::default(),
        }
    }

    /// Drain `receiver` until every sender is gone, then hand back the
    /// final sequence and the collector's counters
    pub fn collect(mut self, receiver: Receiver<Classified>) -> (Vec<LogEntry>, ProcessingStats) {
        match self.order {
            OutputOrder::Arrival => self.collect_arrival(receiver),
            OutputOrder::Input => self.collect_input_order(receiver),
        }

        self.stats.entries_output = self.entries.len();
        tracing::debug!(
            entries = self.entries.len(),
            duplicates = self.stats.duplicates,
            "collector drained output queue"
        );
        (self.entries, self.stats)
    }

    /// Unordered collection - entries appear in arrival order
    fn collect_arrival(&mut self, receiver: Receiver<Classified>) {
        while let Ok(classified) = receiver.recv() {
            self.accept(classified.entry);
        }
    }

    /// Ordered collection - results are held back until every earlier line
    /// has arrived, so the output follows the input
    fn collect_input_order(&mut self, receiver: Receiver<Classified>) {
        let mut pending: BTreeMap<u64, Option<LogEntry>> = BTreeMap::new();
        let mut next_expected = 0u64;

        while let Ok(classified) = receiver.recv() {
            pending.insert(classified.seq, classified.entry);

            while let Some(entry) = pending.remove(&next_expected) {
                self.accept(entry);
                next_expected += 1;
            }
        }

        // Gaps only remain if a worker died mid-run; release what we have
        if !pending.is_empty() {
            tracing::warn!(
                remaining = pending.len(),
                next_expected,
                "output queue closed with gaps in sequence"
            );
        }
        for (_, entry) in std::mem::take(&mut pending) {
            self.accept(entry);
        }
    }

    fn accept(&mut self, entry: Option<LogEntry>) {
        let Some(entry) = entry else {
            self.stats.lines_unmatched += 1;
            return;
        };

        self.stats.lines_matched += 1;
        // insert() reports whether the value was new: check and record in one step
        if self.seen.insert(entry.original.clone()) {
            self.entries.push(entry);
        } else {
            self.stats.duplicates += 1;
        }
    }
}
