//! Game state and core simulation types
//!
//! Every reduction produces a fresh `GameState`; entities are plain values
//! held in ordered vectors and joined by `EntityId`.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ledger::Ledger;
use super::note::{NoteColor, NoteSpec};
use crate::settings::Tuning;

/// Identity of a spawned entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    /// Unique id, issued from a monotonically increasing sequence
    pub id: String,
    /// Tick count at spawn
    pub spawn_tick: u64,
}

/// A falling marker the player has to hit on the judgement line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortEntity {
    pub id: EntityId,
    pub lane: u8,
    pub color: NoteColor,
    pub note: NoteSpec,
    /// Viewport position; `pos.y` grows as the marker falls
    pub pos: Vec2,
    pub radius: f32,
}

impl ShortEntity {
    /// Whether the player still has to hit this marker
    pub fn awaiting_hit(&self) -> bool {
        self.note.is_player_note
    }
}

/// The tail that trails a long note's marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainEntity {
    pub id: EntityId,
    pub lane: u8,
    pub color: NoteColor,
    pub note: NoteSpec,
    /// Top edge of the tail; the leading edge sits at `pos.y + length`
    pub pos: Vec2,
    pub length: f32,
    pub width: f32,
    /// Set once the tail starts shrinking into the judgement line
    pub played: bool,
}

impl SustainEntity {
    /// Bottom edge of the tail
    pub fn leading_edge(&self) -> f32 {
        self.pos.y + self.length
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Tick count reported by the most recent tick
    pub elapsed_ticks: u64,
    /// Live markers (spawn order)
    pub short_entities: Vec<ShortEntity>,
    /// Live tails (spawn order)
    pub sustain_entities: Vec<SustainEntity>,
    /// The song schedule, shared between every snapshot
    pub pending_notes: Arc<[NoteSpec]>,
    /// Markers resolved during the last reduction (hit or auto-played)
    pub resolved_short: Vec<ShortEntity>,
    /// Tails resolved during the last reduction
    pub resolved_sustain: Vec<SustainEntity>,
    /// Player markers that left the live set unhit during the last reduction
    pub missed_short: Vec<ShortEntity>,
    /// Markers that have left the live set since the last reset
    pub resolved_count: usize,
    /// Score, streak and multiplier
    pub ledger: Ledger,
    /// Every scheduled note has been resolved
    pub ended: bool,
    pub tuning: Tuning,
    /// Next entity sequence number
    next_object_seq: u64,
}

impl GameState {
    /// Create the initial state for a schedule
    pub fn new(notes: impl Into<Arc<[NoteSpec]>>, tuning: Tuning) -> Self {
        let pending_notes = notes.into();
        log::info!("New game with {} scheduled notes", pending_notes.len());
        let ended = pending_notes.is_empty();
        Self {
            elapsed_ticks: 0,
            short_entities: Vec::new(),
            sustain_entities: Vec::new(),
            pending_notes,
            resolved_short: Vec::new(),
            resolved_sustain: Vec::new(),
            missed_short: Vec::new(),
            resolved_count: 0,
            ledger: Ledger::default(),
            ended,
            tuning,
            next_object_seq: 0,
        }
    }

    /// Sequence number the next spawned entity will receive
    pub fn next_object_seq(&self) -> u64 {
        self.next_object_seq
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let seq = self.next_object_seq;
        self.next_object_seq += 1;
        EntityId {
            id: seq.to_string(),
            spawn_tick: self.elapsed_ticks,
        }
    }

    /// Total notes in the schedule
    pub fn total_notes(&self) -> usize {
        self.pending_notes.len()
    }

    /// Drop the previous reduction's output lists
    pub fn clear_transient(&mut self) {
        self.resolved_short.clear();
        self.resolved_sustain.clear();
        self.missed_short.clear();
    }

    /// Record markers leaving the live set; `ended` latches once all are in
    pub fn record_resolved(&mut self, count: usize) {
        self.resolved_count += count;
        if !self.ended && self.resolved_count >= self.total_notes() {
            self.ended = true;
            log::info!(
                "Song finished: score {} (high {})",
                self.ledger.score,
                self.ledger.high_score
            );
        }
    }

    /// Fresh state for a restart: keeps schedule, tuning, high score and the
    /// id sequence
    pub fn restarted(&self) -> Self {
        let mut state = Self::new(Arc::clone(&self.pending_notes), self.tuning);
        state.ledger.high_score = self.ledger.high_score;
        state.next_object_seq = self.next_object_seq;
        state
    }
}
