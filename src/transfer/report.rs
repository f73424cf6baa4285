use serde::{Deserialize, Serialize};

use crate::models::PlaylistRef;

/// Per-track result of a transfer. Exactly one per source item, in source
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransferOutcome {
    /// The track was resolved and appended to the destination playlist.
    Added { destination_id: String },
    /// The source entry had no underlying media reference; no search was
    /// attempted.
    SkippedEmpty,
    /// Search failed or returned nothing. Recovered, the transfer continued.
    SearchFailed { reason: String },
    /// A match was found but appending it failed. Recovered as well.
    AddFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReport {
    pub destination_playlist: PlaylistRef,
    pub outcomes: Vec<TransferOutcome>,
    /// False when the transfer was cancelled before every source item was
    /// processed; `outcomes` then covers only the items processed so far.
    pub complete: bool,
}

impl TransferReport {
    pub fn added(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TransferOutcome::Added { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TransferOutcome::SkippedEmpty))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    TransferOutcome::SearchFailed { .. } | TransferOutcome::AddFailed { .. }
                )
            })
            .count()
    }
}
