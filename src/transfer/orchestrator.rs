use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::catalog::{DestinationCatalog, SourceCatalog};
use crate::error::{AppError, Result};
use crate::models::Track;
use crate::transfer::report::{TransferOutcome, TransferReport};

// Fixed container policy for the destination playlist.
const PLAYLIST_TITLE: &str = "Spotify Import";
const PLAYLIST_DESCRIPTION: &str = "Imported from Spotify";

/// Query text sent to destination search: track title then primary artist,
/// joined by a single space, no further normalization. The top search result
/// is taken as-is, so the match quality is whatever the destination's own
/// ranking delivers.
pub fn search_query(track: &Track) -> String {
    format!("{} {}", track.title, track.primary_artist)
}

/// Copies one source playlist into a newly created destination playlist.
///
/// Failures while validating sessions, fetching the source tracks or
/// creating the destination playlist abort the whole transfer; nothing is
/// created unless the source listing succeeded. Failures on individual
/// tracks are recovered: they become an outcome in the report and the loop
/// moves on.
pub struct TransferOrchestrator<S, D> {
    source: S,
    destination: D,
}

impl<S: SourceCatalog, D: DestinationCatalog> TransferOrchestrator<S, D> {
    pub fn new(source: S, destination: D) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Runs a full transfer of `source_playlist_id`. Cancellation is checked
    /// at the top of every per-track iteration; a cancelled transfer returns
    /// the partial report with `complete == false`.
    ///
    /// Every invocation creates a fresh destination playlist, so running the
    /// same transfer twice produces two playlists.
    pub async fn transfer(
        &self,
        source_playlist_id: &str,
        cancel: &CancellationToken,
    ) -> Result<TransferReport> {
        if !self.source.is_authenticated() {
            return Err(AppError::AuthRequired {
                platform: self.source.platform(),
            });
        }
        if !self.destination.is_authenticated() {
            return Err(AppError::AuthRequired {
                platform: self.destination.platform(),
            });
        }

        let items = self.source.list_tracks(source_playlist_id).await?;

        let destination_playlist = self
            .destination
            .create_playlist(PLAYLIST_TITLE, PLAYLIST_DESCRIPTION)
            .await?;

        info!(
            "Transferring {} items into destination playlist {}",
            items.len(),
            destination_playlist.id
        );

        let mut outcomes = Vec::with_capacity(items.len());
        let mut complete = true;

        // Sequential on purpose: append order must equal source order.
        for item in &items {
            if cancel.is_cancelled() {
                warn!(
                    "Transfer cancelled after {} of {} items",
                    outcomes.len(),
                    items.len()
                );
                complete = false;
                break;
            }

            let Some(track) = &item.track else {
                debug!("Skipping entry without a media reference");
                outcomes.push(TransferOutcome::SkippedEmpty);
                continue;
            };

            let query = search_query(track);

            let resolved = match self.destination.search_best_match(&query).await {
                Ok(Some(resolved)) => resolved,
                Ok(None) => {
                    warn!("No match found for: {}", query);
                    outcomes.push(TransferOutcome::SearchFailed {
                        reason: "no search result".to_string(),
                    });
                    continue;
                }
                Err(e) => {
                    warn!("Search failed for {}: {}", query, e);
                    outcomes.push(TransferOutcome::SearchFailed {
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            match self
                .destination
                .append_item(&destination_playlist.id, &resolved.destination_id)
                .await
            {
                Ok(()) => outcomes.push(TransferOutcome::Added {
                    destination_id: resolved.destination_id,
                }),
                Err(e) => {
                    warn!("Failed to append {}: {}", resolved.destination_id, e);
                    outcomes.push(TransferOutcome::AddFailed {
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(TransferReport {
            destination_playlist,
            outcomes,
            complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use super::*;
    use crate::error::Platform;
    use crate::models::{PlaylistItem, PlaylistRef, ResolvedItem};

    struct FakeSource {
        authenticated: bool,
        items: Vec<PlaylistItem>,
        fail_listing: bool,
    }

    impl FakeSource {
        fn with_items(items: Vec<PlaylistItem>) -> Self {
            Self {
                authenticated: true,
                items,
                fail_listing: false,
            }
        }
    }

    impl SourceCatalog for &FakeSource {
        fn platform(&self) -> Platform {
            Platform::Spotify
        }

        fn is_authenticated(&self) -> bool {
            self.authenticated
        }

        async fn list_playlists(&self) -> Result<Vec<PlaylistRef>> {
            Ok(Vec::new())
        }

        async fn list_tracks(&self, _playlist_id: &str) -> Result<Vec<PlaylistItem>> {
            if self.fail_listing {
                return Err(AppError::upstream(Platform::Spotify, "listing unavailable"));
            }
            Ok(self.items.clone())
        }
    }

    #[derive(Default)]
    struct FakeDestination {
        unauthenticated: bool,
        matches: HashMap<String, String>,
        search_errors: HashSet<String>,
        append_errors: HashSet<String>,
        created: Mutex<Vec<String>>,
        searches: Mutex<Vec<String>>,
        appends: Mutex<Vec<(String, String)>>,
        cancel_after_search: Mutex<Option<CancellationToken>>,
    }

    impl FakeDestination {
        fn with_match(mut self, query: &str, video_id: &str) -> Self {
            self.matches
                .insert(query.to_string(), video_id.to_string());
            self
        }

        fn with_search_error(mut self, query: &str) -> Self {
            self.search_errors.insert(query.to_string());
            self
        }

        fn with_append_error(mut self, video_id: &str) -> Self {
            self.append_errors.insert(video_id.to_string());
            self
        }

        fn created_count(&self) -> usize {
            self.created.lock().unwrap().len()
        }

        fn search_count(&self) -> usize {
            self.searches.lock().unwrap().len()
        }

        fn append_count(&self) -> usize {
            self.appends.lock().unwrap().len()
        }
    }

    impl DestinationCatalog for &FakeDestination {
        fn platform(&self) -> Platform {
            Platform::YouTube
        }

        fn is_authenticated(&self) -> bool {
            !self.unauthenticated
        }

        async fn create_playlist(&self, title: &str, _description: &str) -> Result<PlaylistRef> {
            let mut created = self.created.lock().unwrap();
            let id = format!("yt-pl-{}", created.len() + 1);
            created.push(id.clone());
            Ok(PlaylistRef {
                id,
                title: title.to_string(),
                item_count: 0,
            })
        }

        async fn search_best_match(&self, query: &str) -> Result<Option<ResolvedItem>> {
            self.searches.lock().unwrap().push(query.to_string());
            if let Some(token) = self.cancel_after_search.lock().unwrap().take() {
                token.cancel();
            }
            if self.search_errors.contains(query) {
                return Err(AppError::upstream(Platform::YouTube, "search unavailable"));
            }
            Ok(self.matches.get(query).map(|id| ResolvedItem {
                destination_id: id.clone(),
                matched_query: query.to_string(),
            }))
        }

        async fn append_item(&self, playlist_id: &str, destination_id: &str) -> Result<()> {
            self.appends
                .lock()
                .unwrap()
                .push((playlist_id.to_string(), destination_id.to_string()));
            if self.append_errors.contains(destination_id) {
                return Err(AppError::upstream(Platform::YouTube, "append rejected"));
            }
            Ok(())
        }
    }

    #[test]
    fn query_is_title_then_primary_artist() {
        let track = Track::mock("Don't Stop Me Now", "Queen");
        assert_eq!(search_query(&track), "Don't Stop Me Now Queen");
    }

    #[tokio::test]
    async fn one_outcome_per_item_in_source_order() {
        let source = FakeSource::with_items(vec![
            PlaylistItem::mock("A", "x"),
            PlaylistItem::mock("B", "y"),
            PlaylistItem::empty(),
            PlaylistItem::mock("C", "z"),
            PlaylistItem::mock("D", "w"),
        ]);
        let destination = FakeDestination::default()
            .with_match("A x", "v1")
            .with_match("C z", "v3")
            .with_match("D w", "v4");

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let report = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 5);
        assert!(report.complete);
        assert_eq!(
            report.outcomes,
            vec![
                TransferOutcome::Added {
                    destination_id: "v1".to_string()
                },
                TransferOutcome::SearchFailed {
                    reason: "no search result".to_string()
                },
                TransferOutcome::SkippedEmpty,
                TransferOutcome::Added {
                    destination_id: "v3".to_string()
                },
                TransferOutcome::Added {
                    destination_id: "v4".to_string()
                },
            ]
        );
        // The empty slot never reaches search.
        assert_eq!(destination.search_count(), 4);
    }

    #[tokio::test]
    async fn empty_entry_is_skipped_without_search() {
        let source = FakeSource::with_items(vec![PlaylistItem::empty()]);
        let destination = FakeDestination::default();

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let report = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.outcomes, vec![TransferOutcome::SkippedEmpty]);
        assert_eq!(destination.search_count(), 0);
        assert_eq!(destination.append_count(), 0);
    }

    #[tokio::test]
    async fn missing_search_result_never_appends() {
        let source = FakeSource::with_items(vec![PlaylistItem::mock("A", "x")]);
        let destination = FakeDestination::default();

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let report = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap();

        assert!(matches!(
            report.outcomes[0],
            TransferOutcome::SearchFailed { .. }
        ));
        assert_eq!(destination.append_count(), 0);
    }

    #[tokio::test]
    async fn search_error_is_recovered() {
        let source = FakeSource::with_items(vec![
            PlaylistItem::mock("A", "x"),
            PlaylistItem::mock("B", "y"),
        ]);
        let destination = FakeDestination::default()
            .with_search_error("A x")
            .with_match("B y", "v2");

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let report = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap();

        assert!(matches!(
            report.outcomes[0],
            TransferOutcome::SearchFailed { .. }
        ));
        assert_eq!(
            report.outcomes[1],
            TransferOutcome::Added {
                destination_id: "v2".to_string()
            }
        );
    }

    #[tokio::test]
    async fn append_failure_is_recovered() {
        let source = FakeSource::with_items(vec![
            PlaylistItem::mock("A", "x"),
            PlaylistItem::mock("B", "y"),
        ]);
        let destination = FakeDestination::default()
            .with_match("A x", "v1")
            .with_match("B y", "v2")
            .with_append_error("v1");

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let report = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap();

        assert!(matches!(
            report.outcomes[0],
            TransferOutcome::AddFailed { .. }
        ));
        assert_eq!(
            report.outcomes[1],
            TransferOutcome::Added {
                destination_id: "v2".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unauthenticated_source_fails_before_create() {
        let mut source = FakeSource::with_items(vec![PlaylistItem::mock("A", "x")]);
        source.authenticated = false;
        let destination = FakeDestination::default();

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let err = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::AuthRequired {
                platform: Platform::Spotify
            }
        ));
        assert_eq!(destination.created_count(), 0);
    }

    #[tokio::test]
    async fn unauthenticated_destination_fails_before_create() {
        let source = FakeSource::with_items(vec![PlaylistItem::mock("A", "x")]);
        let destination = FakeDestination {
            unauthenticated: true,
            ..Default::default()
        };

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let err = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::AuthRequired {
                platform: Platform::YouTube
            }
        ));
        assert_eq!(destination.created_count(), 0);
    }

    #[tokio::test]
    async fn track_listing_failure_creates_no_playlist() {
        let mut source = FakeSource::with_items(Vec::new());
        source.fail_listing = true;
        let destination = FakeDestination::default();

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let err = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upstream { .. }));
        assert_eq!(destination.created_count(), 0);
    }

    // Not a bug: each invocation creates its own destination playlist.
    #[tokio::test]
    async fn repeated_transfers_create_distinct_playlists() {
        let source = FakeSource::with_items(vec![PlaylistItem::mock("A", "x")]);
        let destination = FakeDestination::default().with_match("A x", "v1");

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let first = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap();
        let second = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap();

        assert_ne!(first.destination_playlist.id, second.destination_playlist.id);
        assert_eq!(destination.created_count(), 2);
    }

    #[tokio::test]
    async fn already_cancelled_transfer_reports_no_outcomes() {
        let source = FakeSource::with_items(vec![
            PlaylistItem::mock("A", "x"),
            PlaylistItem::mock("B", "y"),
        ]);
        let destination = FakeDestination::default().with_match("A x", "v1");

        let cancel = CancellationToken::new();
        cancel.cancel();

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let report = orchestrator.transfer("pl", &cancel).await.unwrap();

        // Cancellation is only observed inside the loop, so the playlist
        // itself already exists.
        assert!(!report.complete);
        assert!(report.outcomes.is_empty());
        assert_eq!(destination.created_count(), 1);
        assert_eq!(destination.search_count(), 0);
    }

    #[tokio::test]
    async fn mid_loop_cancellation_returns_partial_report() {
        let source = FakeSource::with_items(vec![
            PlaylistItem::mock("A", "x"),
            PlaylistItem::mock("B", "y"),
            PlaylistItem::mock("C", "z"),
        ]);
        let destination = FakeDestination::default()
            .with_match("A x", "v1")
            .with_match("B y", "v2");

        let cancel = CancellationToken::new();
        *destination.cancel_after_search.lock().unwrap() = Some(cancel.clone());

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let report = orchestrator.transfer("pl", &cancel).await.unwrap();

        assert!(!report.complete);
        assert_eq!(
            report.outcomes,
            vec![TransferOutcome::Added {
                destination_id: "v1".to_string()
            }]
        );
        assert_eq!(destination.search_count(), 1);
    }

    #[tokio::test]
    async fn mixed_three_track_playlist() {
        let source = FakeSource::with_items(vec![
            PlaylistItem::mock("A", "x"),
            PlaylistItem::mock("B", "y"),
            PlaylistItem::empty(),
        ]);
        let destination = FakeDestination::default().with_match("A x", "d1");

        let orchestrator = TransferOrchestrator::new(&source, &destination);
        let report = orchestrator
            .transfer("pl", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            report.outcomes,
            vec![
                TransferOutcome::Added {
                    destination_id: "d1".to_string()
                },
                TransferOutcome::SearchFailed {
                    reason: "no search result".to_string()
                },
                TransferOutcome::SkippedEmpty,
            ]
        );
        assert_eq!(destination.append_count(), 1);
    }
}
