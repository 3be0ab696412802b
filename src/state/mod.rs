//! Shared in-memory state: the match clock, live score documents, and the
//! broadcast hubs feeding the display surfaces.

pub mod score;
mod sse;
pub mod timer;

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock, mpsc};
use utoipa::ToSchema;

use crate::{config::AppConfig, dao::match_store::MatchStore, error::ServiceError};

pub use self::sse::SseHub;
use self::{
    score::{ScoreSheet, TeamSide},
    sse::SseState,
    timer::{MatchTimer, SequencedCommand, TimerCommand},
};

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Capacity of the operator command queue feeding the timer engine.
const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Identity of the match currently on the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchInfo {
    /// Event-local match number.
    pub match_number: u32,
    /// Display name of the red alliance team.
    pub red_team: String,
    /// Display name of the blue alliance team.
    pub blue_team: String,
}

impl Default for MatchInfo {
    fn default() -> Self {
        Self {
            match_number: 1,
            red_team: "Red".to_string(),
            blue_team: "Blue".to_string(),
        }
    }
}

/// Central application state storing the live match documents, the broadcast
/// hubs, and the storage handle.
pub struct AppState {
    match_store: RwLock<Option<Arc<dyn MatchStore>>>,
    sse: SseState,
    timer: Mutex<MatchTimer>,
    commands: mpsc::Sender<SequencedCommand>,
    command_seq: Mutex<u64>,
    scores: DashMap<TeamSide, ScoreSheet>,
    match_info: RwLock<MatchInfo>,
    overlay_revealed: RwLock<bool>,
    season: String,
}

impl AppState {
    /// Construct the shared state from the loaded configuration, wrapped in an
    /// [`Arc`] so it can be cloned cheaply. The receiving half of the command
    /// queue is handed back so the caller can give it to the timer engine.
    ///
    /// The application starts in degraded mode until a storage backend is
    /// installed.
    pub fn new(config: &AppConfig) -> (SharedState, mpsc::Receiver<SequencedCommand>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);

        let scores = DashMap::new();
        scores.insert(TeamSide::Red, ScoreSheet::default());
        scores.insert(TeamSide::Blue, ScoreSheet::default());

        let state = Arc::new(Self {
            match_store: RwLock::new(None),
            sse: SseState::new(16, 16),
            timer: Mutex::new(MatchTimer::new(config.timer_settings())),
            commands: command_tx,
            command_seq: Mutex::new(0),
            scores,
            match_info: RwLock::new(MatchInfo::default()),
            overlay_revealed: RwLock::new(false),
            season: config.season().to_string(),
        });

        (state, command_rx)
    }

    /// Obtain a handle to the current match store, if one is installed.
    pub async fn match_store(&self) -> Option<Arc<dyn MatchStore>> {
        let guard = self.match_store.read().await;
        guard.as_ref().cloned()
    }

    /// Install a new match store implementation and leave degraded mode.
    pub async fn install_match_store(&self, store: Arc<dyn MatchStore>) {
        let mut guard = self.match_store.write().await;
        *guard = Some(store);
    }

    /// Obtain the current match store or fail when running degraded.
    pub async fn require_match_store(&self) -> Result<Arc<dyn MatchStore>, ServiceError> {
        self.match_store().await.ok_or(ServiceError::Degraded)
    }

    /// Remove the current match store and enter degraded mode.
    pub async fn clear_match_store(&self) {
        let mut guard = self.match_store.write().await;
        guard.take();
    }

    /// Whether the application currently runs without a storage backend.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.match_store.read().await;
        guard.is_none()
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        self.sse.public()
    }

    /// Broadcast hub used for the operator SSE stream.
    pub fn operator_sse(&self) -> &SseHub {
        self.sse.operator().hub()
    }

    /// Token guard that ensures a single operator SSE subscriber at a time.
    pub fn operator_token(&self) -> &Mutex<Option<String>> {
        self.sse.operator().token()
    }

    /// The shared match clock. Routes read snapshots through this lock; only
    /// the timer engine mutates it.
    pub fn timer(&self) -> &Mutex<MatchTimer> {
        &self.timer
    }

    /// Stamp `command` with the next sequence number and queue it for the
    /// match engine, returning the assigned number.
    ///
    /// Stamping and insertion happen under one lock, so commands reach the
    /// engine in stamp order even when issued concurrently.
    pub async fn enqueue_command(&self, command: TimerCommand) -> Result<u64, ServiceError> {
        let mut seq = self.command_seq.lock().await;
        *seq += 1;
        self.commands
            .send(SequencedCommand {
                seq: *seq,
                command,
            })
            .await
            .map_err(|_| ServiceError::EngineUnavailable)?;
        Ok(*seq)
    }

    /// Live score sheets keyed by alliance side.
    pub fn scores(&self) -> &DashMap<TeamSide, ScoreSheet> {
        &self.scores
    }

    /// Identity of the match currently on the field.
    pub fn match_info(&self) -> &RwLock<MatchInfo> {
        &self.match_info
    }

    /// Whether the stream overlay currently reveals the final scores.
    pub fn overlay_revealed(&self) -> &RwLock<bool> {
        &self.overlay_revealed
    }

    /// Name of the season ruleset the server is running with.
    pub fn season(&self) -> &str {
        &self.season
    }
}

#[cfg(test)]
mod tests {
    use futures::future::BoxFuture;
    use uuid::Uuid;

    use super::*;
    use crate::dao::{
        models::{MatchRecordEntity, MatchSummaryEntity},
        storage::StorageResult,
    };

    struct NullStore;

    impl MatchStore for NullStore {
        fn save_match(&self, _record: MatchRecordEntity) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }

        fn find_match(
            &self,
            _id: Uuid,
        ) -> BoxFuture<'static, StorageResult<Option<MatchRecordEntity>>> {
            Box::pin(async { Ok(None) })
        }

        fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchSummaryEntity>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn store_slot_drives_degraded_mode() {
        let (state, _commands) = AppState::new(&AppConfig::default());

        assert!(state.is_degraded().await);

        state.install_match_store(Arc::new(NullStore)).await;
        assert!(!state.is_degraded().await);
        assert!(state.require_match_store().await.is_ok());

        state.clear_match_store().await;
        assert!(state.is_degraded().await);
        assert!(state.require_match_store().await.is_err());
    }

    #[tokio::test]
    async fn concurrent_commands_reach_the_engine_in_stamp_order() {
        let (state, mut commands) = AppState::new(&AppConfig::default());

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let state = state.clone();
            tasks.push(tokio::spawn(async move {
                state
                    .enqueue_command(TimerCommand::Pause)
                    .await
                    .expect("engine queue open")
            }));
        }
        for task in tasks {
            task.await.expect("issuing task");
        }

        // Stamps are consecutive from 1 and must arrive in stamp order, so
        // the engine never discards a concurrently issued command as stale.
        for expected in 1..=16u64 {
            let received = commands.recv().await.expect("queued command");
            assert_eq!(received.seq, expected);
        }
    }
}
