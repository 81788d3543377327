//! # Session Driver
//!
//! The thin async scheduler around a [`TurnMachine`].
//!
//! The machine itself never waits. The driver sleeps through each timed
//! phase, calls [`TurnMachine::advance`], and handles the side effects the
//! machine asks for: narration requests are spawned as tasks whose text is
//! folded into the combat log whenever it arrives, and a defeated player's
//! run goes to the leaderboard.

use crate::game::{GameEvent, InputOutcome, LeaderboardStore, NarrationRequest, TurnMachine};
use crate::input::{InputHandler, PlayerInput};
use crate::lldm::{narrate_with_fallback, Narrator};
use crate::utils::{RandomSource, SeededRng};
use crate::ReckoningResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs a [`TurnMachine`] in real time.
pub struct SessionDriver<R: RandomSource = SeededRng> {
    machine: TurnMachine<R>,
    input: InputHandler,
    narrator: Arc<dyn Narrator>,
    leaderboard: Box<dyn LeaderboardStore>,
    narration_timeout: Duration,
    narration_tx: mpsc::UnboundedSender<String>,
    narration_rx: mpsc::UnboundedReceiver<String>,
    pending_narration: usize,
}

impl<R: RandomSource> SessionDriver<R> {
    /// Wraps a machine. The narration timeout comes from its timing rules.
    pub fn new(
        machine: TurnMachine<R>,
        narrator: Arc<dyn Narrator>,
        leaderboard: Box<dyn LeaderboardStore>,
    ) -> Self {
        let (narration_tx, narration_rx) = mpsc::unbounded_channel();
        let narration_timeout = machine.rules().timing.narration_timeout();
        Self {
            machine,
            input: InputHandler::new(),
            narrator,
            leaderboard,
            narration_timeout,
            narration_tx,
            narration_rx,
            pending_narration: 0,
        }
    }

    pub fn machine(&self) -> &TurnMachine<R> {
        &self.machine
    }

    pub fn leaderboard(&self) -> &dyn LeaderboardStore {
        self.leaderboard.as_ref()
    }

    /// Narration requests still in flight.
    pub fn pending_narration(&self) -> usize {
        self.pending_narration
    }

    /// Applies one input, then plays out every timed phase that follows it.
    ///
    /// Returns once the machine is waiting for input again.
    pub async fn submit(&mut self, input: PlayerInput) -> ReckoningResult<InputOutcome> {
        let outcome = self.input.dispatch(&mut self.machine, input)?;
        self.flush_events();
        self.run_scheduled().await?;
        Ok(outcome)
    }

    /// Sleeps through and advances timed phases until one needs input.
    pub async fn run_scheduled(&mut self) -> ReckoningResult<()> {
        while let Some(delay) = self.machine.scheduled_delay() {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.machine.advance()?;
            self.flush_events();
            self.collect_narration();
        }
        Ok(())
    }

    /// Appends any narration that has arrived to the combat log. Returns the
    /// number of lines applied.
    pub fn collect_narration(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(text) = self.narration_rx.try_recv() {
            self.apply_narration(text);
            applied += 1;
        }
        applied
    }

    /// Waits for every outstanding narration request. Each one is bounded by
    /// the narration timeout, so this always returns.
    pub async fn wait_for_narration(&mut self) {
        while self.pending_narration > 0 {
            match self.narration_rx.recv().await {
                Some(text) => self.apply_narration(text),
                None => break,
            }
        }
    }

    fn apply_narration(&mut self, text: String) {
        self.pending_narration = self.pending_narration.saturating_sub(1);
        self.machine.record_narration(text);
    }

    fn flush_events(&mut self) {
        for event in self.machine.drain_events() {
            match event {
                GameEvent::NarrationRequested(request) => self.spawn_narration(request),
                GameEvent::PlayerDefeated { floor, score } => {
                    let entry = self.machine.session().leaderboard_entry();
                    match self.leaderboard.record(entry) {
                        Ok(()) => log::info!(
                            "Recorded run ending on floor {} with score {}",
                            floor,
                            score
                        ),
                        Err(err) => log::warn!("Failed to record leaderboard entry: {}", err),
                    }
                }
                _ => {}
            }
        }
    }

    fn spawn_narration(&mut self, request: NarrationRequest) {
        let narrator = Arc::clone(&self.narrator);
        let tx = self.narration_tx.clone();
        let timeout = self.narration_timeout;
        self.pending_narration += 1;

        tokio::spawn(async move {
            let text = narrate_with_fallback(narrator.as_ref(), &request, timeout).await;
            // The driver may already be gone; the line is simply dropped.
            let _ = tx.send(text);
        });
    }
}
