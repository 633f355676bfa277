//! Recommendation engine
//!
//! Owns the user's preference set and strategy, and re-scores the catalog on
//! every change. Each change issues a new sequence number and spawns an
//! analysis task; a task publishes its result only if no newer change has been
//! issued in the meantime, so the latest request always wins.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};

use crate::{
    error::{AppError, AppResult},
    models::{Item, PreferenceSet, Strategy, SyntheticPeer, TagId},
    services::{catalog::Catalog, recommender::Recommender},
};

/// Whether an analysis for the latest request is still outstanding
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    Idle,
    Analyzing,
}

/// A published set of recommendations and the inputs that produced it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendations {
    pub sequence: u64,
    pub strategy: Strategy,
    pub preferences: PreferenceSet,
    pub items: Vec<Item>,
}

/// Point-in-time view of the engine state
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EngineSnapshot {
    pub status: EngineStatus,
    pub strategy: Strategy,
    pub preferences: PreferenceSet,
    /// Latest sequence number handed out
    pub issued: u64,
    /// Sequence number of the result currently published
    pub published: u64,
    /// Results dropped because a newer request superseded them
    pub discarded: u64,
}

/// Outcome of a preference toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub sequence: u64,
    /// Whether the tag is selected after the toggle
    pub selected: bool,
}

/// Inputs captured when a change is issued
struct AnalysisRequest {
    sequence: u64,
    strategy: Strategy,
    preferences: PreferenceSet,
}

/// Mutable state, guarded by a single lock
struct EngineState {
    preferences: PreferenceSet,
    strategy: Strategy,
    status: EngineStatus,
    issued: u64,
    discarded: u64,
}

impl EngineState {
    fn issue(&mut self) -> AnalysisRequest {
        self.issued += 1;
        self.status = EngineStatus::Analyzing;
        AnalysisRequest {
            sequence: self.issued,
            strategy: self.strategy,
            preferences: self.preferences.clone(),
        }
    }
}

struct Shared {
    catalog: Catalog,
    peers: Arc<[SyntheticPeer]>,
    analysis_delay: Duration,
    state: RwLock<EngineState>,
    updates: watch::Sender<Recommendations>,
}

impl Shared {
    fn score(&self, strategy: Strategy, preferences: &PreferenceSet) -> Vec<Item> {
        Recommender::new(self.catalog.items(), &self.peers)
            .recommend(strategy, preferences)
            .into_iter()
            .cloned()
            .collect()
    }

    async fn analyze(self: Arc<Self>, request: AnalysisRequest) {
        if !self.analysis_delay.is_zero() {
            tokio::time::sleep(self.analysis_delay).await;
        }

        let items = self.score(request.strategy, &request.preferences);

        let mut state = self.state.write().await;
        if request.sequence != state.issued {
            state.discarded += 1;
            tracing::debug!(
                sequence = request.sequence,
                latest = state.issued,
                "Discarding stale recommendations"
            );
            return;
        }

        state.status = EngineStatus::Idle;
        tracing::info!(
            sequence = request.sequence,
            strategy = %request.strategy,
            preferences = ?request.preferences.as_slice(),
            results = items.len(),
            "Recommendations updated"
        );
        self.updates.send_replace(Recommendations {
            sequence: request.sequence,
            strategy: request.strategy,
            preferences: request.preferences,
            items,
        });
    }
}

/// Single-writer recommendation state machine
///
/// Cheap to clone; all clones drive the same engine.
#[derive(Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

impl Engine {
    /// Creates an engine and publishes the initial, preference-free result
    pub fn new(catalog: Catalog, peers: Arc<[SyntheticPeer]>, analysis_delay: Duration) -> Self {
        let strategy = Strategy::default();
        let preferences = PreferenceSet::new();
        let items: Vec<Item> = Recommender::new(catalog.items(), &peers)
            .recommend(strategy, &preferences)
            .into_iter()
            .cloned()
            .collect();

        let (updates, _) = watch::channel(Recommendations {
            sequence: 0,
            strategy,
            preferences: preferences.clone(),
            items,
        });

        Self {
            shared: Arc::new(Shared {
                catalog,
                peers,
                analysis_delay,
                state: RwLock::new(EngineState {
                    preferences,
                    strategy,
                    status: EngineStatus::Idle,
                    issued: 0,
                    discarded: 0,
                }),
                updates,
            }),
        }
    }

    /// Adds the tag if absent, removes it if present, and re-scores
    pub async fn toggle_preference(&self, tag: TagId) -> ToggleOutcome {
        let (request, selected) = {
            let mut state = self.shared.state.write().await;
            let selected = state.preferences.toggle(tag);
            let request = state.issue();
            tracing::info!(tag, selected, sequence = request.sequence, "Preferences changed");
            (request, selected)
        };

        let sequence = request.sequence;
        self.spawn_analysis(request);
        ToggleOutcome { sequence, selected }
    }

    /// Switches strategy and re-scores.
    ///
    /// Selecting the active strategy is not a change: nothing is issued and
    /// the latest issued sequence is returned.
    pub async fn select_strategy(&self, strategy: Strategy) -> u64 {
        let request = {
            let mut state = self.shared.state.write().await;
            if state.strategy == strategy {
                return state.issued;
            }
            state.strategy = strategy;
            let request = state.issue();
            tracing::info!(%strategy, sequence = request.sequence, "Strategy changed");
            request
        };

        let sequence = request.sequence;
        self.spawn_analysis(request);
        sequence
    }

    fn spawn_analysis(&self, request: AnalysisRequest) {
        let shared = self.shared.clone();
        tokio::spawn(shared.analyze(request));
    }

    /// The most recently published recommendations
    pub fn current(&self) -> Recommendations {
        self.shared.updates.borrow().clone()
    }

    /// Receiver notified whenever a new result is published
    pub fn subscribe(&self) -> watch::Receiver<Recommendations> {
        self.shared.updates.subscribe()
    }

    /// Waits until a result at or after `sequence` is published.
    ///
    /// A superseded request resolves with the newer result.
    pub async fn wait_for(&self, sequence: u64) -> AppResult<Recommendations> {
        let mut updates = self.subscribe();
        let published = updates
            .wait_for(|recommendations| recommendations.sequence >= sequence)
            .await
            .map_err(|e| AppError::Internal(format!("Recommendation channel closed: {}", e)))?;
        Ok(published.clone())
    }

    pub async fn preferences(&self) -> PreferenceSet {
        self.shared.state.read().await.preferences.clone()
    }

    pub async fn strategy(&self) -> Strategy {
        self.shared.state.read().await.strategy
    }

    pub async fn snapshot(&self) -> EngineSnapshot {
        let state = self.shared.state.read().await;
        EngineSnapshot {
            status: state.status,
            strategy: state.strategy,
            preferences: state.preferences.clone(),
            issued: state.issued,
            published: self.shared.updates.borrow().sequence,
            discarded: state.discarded,
        }
    }
}
