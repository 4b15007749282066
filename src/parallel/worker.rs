//! Worker thread for parallel processing
//!
//! Each worker pulls lines from the shared input queue, classifies them and
//! pushes one result per line to the shared output queue.

use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;

use crate::classifier::Classifier;
use crate::stats::WorkerStats;

use super::types::{Classified, SequencedLine};

/// Worker thread: runs until the input queue is closed and drained
pub(crate) fn worker_thread(
    worker_id: usize,
    line_receiver: Receiver<SequencedLine>,
    result_sender: Sender<Classified>,
    classifier: Arc<Classifier>,
) -> WorkerStats {
    let mut stats = WorkerStats {
        worker_id,
        ..Default::default()
    };

    tracing::trace!(worker_id, "worker started");

    // recv() only fails once every sender is dropped and the queue is empty
    while let Ok(line) = line_receiver.recv() {
        let entry = classifier.entry_for(&line.text);
        stats.lines_classified += 1;
        if entry.is_some() {
            stats.lines_matched += 1;
        }

        if result_sender
            .send(Classified {
                seq: line.seq,
                entry,
            })
            .is_err()
        {
            tracing::warn!(worker_id, "output queue disconnected, worker stopping");
            break;
        }
    }

    tracing::trace!(
        worker_id,
        lines_classified = stats.lines_classified,
        lines_matched = stats.lines_matched,
        "worker finished"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn classifier() -> Arc<Classifier> {
        Arc::new(Classifier::new(&["ERROR", "WARNING"]).unwrap())
    }

    fn line(seq: u64, text: &str) -> SequencedLine {
        SequencedLine {
            seq,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_one_result_per_line() {
        let (line_tx, line_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();

        line_tx.send(line(0, "ERROR: a")).unwrap();
        line_tx.send(line(1, "nothing")).unwrap();
        line_tx.send(line(2, "WARNING: b")).unwrap();
        drop(line_tx);

        let stats = worker_thread(7, line_rx, result_tx, classifier());
        assert_eq!(stats.worker_id, 7);
        assert_eq!(stats.lines_classified, 3);
        assert_eq!(stats.lines_matched, 2);

        let results: Vec<Classified> = result_rx.iter().collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].seq, 0);
        assert_eq!(
            results[0].entry.as_ref().and_then(|e| e.pattern.as_deref()),
            Some("ERROR")
        );
        assert!(results[1].entry.is_none());
        assert_eq!(results[2].seq, 2);
    }

    #[test]
    fn test_terminates_on_closed_empty_queue() {
        let (line_tx, line_rx) = unbounded::<SequencedLine>();
        let (result_tx, result_rx) = unbounded();
        drop(line_tx);

        let stats = worker_thread(0, line_rx, result_tx, classifier());
        assert_eq!(stats.lines_classified, 0);
        assert!(result_rx.recv().is_err());
    }

    #[test]
    fn test_stops_when_output_disconnected() {
        let (line_tx, line_rx) = unbounded();
        let (result_tx, result_rx) = unbounded::<Classified>();
        drop(result_rx);

        line_tx.send(line(0, "ERROR")).unwrap();
        line_tx.send(line(1, "ERROR")).unwrap();

        let stats = worker_thread(0, line_rx, result_tx, classifier());
        assert_eq!(stats.lines_classified, 1);
    }
}
