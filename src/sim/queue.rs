//! Spawn scheduling
//!
//! Notes are ordered by start time once; each tick pops whatever has come due
//! by advancing a cursor. Restarting is a cursor rewind, so no spawn from a
//! previous run can leak into the next one.

use super::note::NoteSpec;
use super::tick::Action;
use crate::settings::Tuning;

/// Sorted queue of pending spawn times
#[derive(Debug, Clone)]
pub struct SpawnQueue {
    /// `(start_ms, schedule index)`, sorted by time then schedule order
    order: Vec<(u64, usize)>,
    cursor: usize,
    long_note_secs: f32,
}

impl SpawnQueue {
    pub fn new(notes: &[NoteSpec], tuning: &Tuning) -> Self {
        let mut order: Vec<(u64, usize)> = notes
            .iter()
            .enumerate()
            .map(|(index, note)| (note.start_ms(), index))
            .collect();
        order.sort_unstable();
        Self {
            order,
            cursor: 0,
            long_note_secs: tuning.long_note_secs,
        }
    }

    /// Spawn actions for every note starting at or before `elapsed_ms`
    ///
    /// Each note yields its marker, followed by its tail when it is long.
    pub fn due(&mut self, notes: &[NoteSpec], elapsed_ms: u64) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Some(&(start_ms, index)) = self.order.get(self.cursor) {
            if start_ms > elapsed_ms {
                break;
            }
            self.cursor += 1;
            let Some(note) = notes.get(index) else {
                continue;
            };
            actions.push(Action::SpawnShort(note.clone()));
            if note.is_long(self.long_note_secs) {
                actions.push(Action::SpawnSustain(note.clone()));
            }
        }
        actions
    }

    /// Notes not yet spawned
    pub fn remaining(&self) -> usize {
        self.order.len() - self.cursor
    }

    /// Start time of the next pending note
    pub fn next_due_ms(&self) -> Option<u64> {
        self.order.get(self.cursor).map(|&(start_ms, _)| start_ms)
    }

    /// Rewind to the start of the song
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
