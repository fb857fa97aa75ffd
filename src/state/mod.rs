use crate::broadcast::spawn_round_ticker;
use crate::config::GameConfig;
use crate::game::{GameResult, Match, MatchEvent};
use crate::phrases::PhraseBook;
use crate::protocol::{ServerMessage, PROTOCOL_VERSION};
use crate::types::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub game: Arc<RwLock<Match>>,
    /// Broadcast channel for sending match events to every connected screen
    pub broadcast: broadcast::Sender<ServerMessage>,
    /// Tick task of the running round, if any
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    /// Origin of the millisecond clock handed to the match
    epoch: Instant,
}

impl AppState {
    pub fn new(game: Match) -> Self {
        let (tx, _rx) = broadcast::channel(256);
        Self {
            game: Arc::new(RwLock::new(game)),
            broadcast: tx,
            ticker: Arc::new(Mutex::new(None)),
            epoch: Instant::now(),
        }
    }

    /// Build state for a fresh match
    pub fn from_config(config: GameConfig, book: PhraseBook) -> GameResult<Self> {
        Ok(Self::new(Match::new(config, Arc::new(book))?))
    }

    /// Milliseconds since this state was created
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Broadcast a message to all screens
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // Ignore send errors (no screens connected is fine)
        let _ = self.broadcast.send(msg);
    }

    fn publish(&self, events: Vec<MatchEvent>) {
        for event in events {
            self.broadcast_to_all(event.into());
        }
    }

    pub async fn view(&self) -> MatchView {
        self.game.read().await.view()
    }

    pub async fn tick_interval(&self) -> Duration {
        self.game.read().await.config().round.tick_interval
    }

    /// Greeting for a newly connected screen
    pub async fn welcome(&self) -> ServerMessage {
        let game = self.game.read().await;
        ServerMessage::Welcome {
            protocol: PROTOCOL_VERSION.to_string(),
            view: game.view(),
            categories: game.phrase_book().playable_categories(),
            valid_commands: game.valid_commands(),
            win_score: game.config().win_score,
            server_now: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub async fn select_category(&self, category: Category) -> GameResult<()> {
        let mut events: Vec<MatchEvent> = Vec::new();
        let mut game = self.game.write().await;
        game.select_category(category, &mut events)?;
        self.publish(events);
        Ok(())
    }

    /// Start a round and the ticker that drives it
    pub async fn start_round(self: &Arc<Self>) -> GameResult<()> {
        {
            let mut events: Vec<MatchEvent> = Vec::new();
            let mut game = self.game.write().await;
            game.start_round(self.now_ms(), &mut events)?;
            self.publish(events);
        }

        let handle = spawn_round_ticker(self.clone());
        if let Some(previous) = self.ticker.lock().await.replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    pub async fn got_it(&self) -> GameResult<()> {
        let mut events: Vec<MatchEvent> = Vec::new();
        let mut game = self.game.write().await;
        game.got_it(&mut events)?;
        self.publish(events);
        Ok(())
    }

    pub async fn skip_word(&self) -> GameResult<()> {
        let mut events: Vec<MatchEvent> = Vec::new();
        let mut game = self.game.write().await;
        game.skip_word(&mut events)?;
        self.publish(events);
        Ok(())
    }

    /// Stop any running round and start over
    pub async fn reset(&self) {
        self.stop_ticker().await;

        let mut events: Vec<MatchEvent> = Vec::new();
        let mut game = self.game.write().await;
        game.reset(&mut events);
        self.publish(events);
    }

    /// Advance the match clock to `now_ms`. Returns whether a round is still running.
    pub async fn tick_at(&self, now_ms: u64) -> bool {
        let mut events: Vec<MatchEvent> = Vec::new();
        let mut game = self.game.write().await;
        let running = game.tick(now_ms, &mut events);
        self.publish(events);
        running
    }

    /// Abort the tick task. Safe to call when none is running.
    pub async fn stop_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }
}
