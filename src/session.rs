//! Fixed-rate game driver
//!
//! Owns the running `GameState` plus the spawn queue, and turns wall-clock
//! time into an ordered stream of actions: due spawns first, then the tick.
//! Every state the reducer produces is handed to the observer, since the
//! resolved lists only live for one reduction.

use std::sync::Arc;

use crate::consts::MAX_SUBSTEPS;
use crate::schedule::Schedule;
use crate::settings::Tuning;
use crate::sim::note::KeyId;
use crate::sim::queue::SpawnQueue;
use crate::sim::state::GameState;
use crate::sim::tick::{Action, reduce};

/// A running game
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    queue: SpawnQueue,
    /// Ticks since start or last reset
    elapsed_ticks: u64,
    /// Unconsumed wall-clock time
    accumulator_ms: f64,
}

impl Session {
    pub fn new(schedule: Schedule, tuning: Tuning) -> Self {
        let notes: Arc<[_]> = schedule.into_notes().into();
        let queue = SpawnQueue::new(&notes, &tuning);
        Self {
            state: GameState::new(notes, tuning),
            queue,
            elapsed_ticks: 0,
            accumulator_ms: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn is_ended(&self) -> bool {
        self.state.ended
    }

    /// Notes whose spawn time has not yet arrived
    pub fn pending_spawns(&self) -> usize {
        self.queue.remaining()
    }

    fn apply(&mut self, action: &Action, observe: &mut impl FnMut(&Action, &GameState)) {
        self.state = reduce(&self.state, action);
        observe(action, &self.state);
    }

    /// Run one tick: release due spawns, then advance
    ///
    /// Does nothing once the song has ended.
    pub fn tick_with(&mut self, mut observe: impl FnMut(&Action, &GameState)) {
        if self.state.ended {
            return;
        }
        self.elapsed_ticks += 1;

        let notes = Arc::clone(&self.state.pending_notes);
        let elapsed_ms = self.state.tuning.ticks_to_ms(self.elapsed_ticks);
        for action in self.queue.due(&notes, elapsed_ms) {
            self.apply(&action, &mut observe);
        }

        let tick = Action::Tick {
            elapsed: self.elapsed_ticks,
        };
        self.apply(&tick, &mut observe);
    }

    /// Run one tick and return the resulting state
    pub fn tick(&mut self) -> &GameState {
        self.tick_with(|_, _| {});
        &self.state
    }

    /// Judge a key press against the current state
    pub fn press(&mut self, key: KeyId) -> &GameState {
        self.state = reduce(&self.state, &Action::KeyPress(key));
        &self.state
    }

    /// Restart the song; pending spawns rewind with it
    pub fn reset(&mut self) -> &GameState {
        self.state = reduce(&self.state, &Action::Reset);
        self.queue.reset();
        self.elapsed_ticks = 0;
        self.accumulator_ms = 0.0;
        &self.state
    }

    /// Consume wall-clock time in whole ticks, capped at `MAX_SUBSTEPS` per call
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt_ms: f64, mut observe: impl FnMut(&Action, &GameState)) -> u32 {
        let tick_ms = f64::from(self.state.tuning.tick_rate_ms);
        self.accumulator_ms += dt_ms.max(0.0);

        let mut substeps = 0;
        while self.accumulator_ms >= tick_ms && substeps < MAX_SUBSTEPS {
            self.tick_with(&mut observe);
            self.accumulator_ms -= tick_ms;
            substeps += 1;
        }

        // Drop time we could not catch up on rather than spiralling
        if substeps == MAX_SUBSTEPS && self.accumulator_ms >= tick_ms {
            log::warn!("Dropping {:.1}ms of backlog", self.accumulator_ms);
            self.accumulator_ms = 0.0;
        }

        substeps
    }
}
