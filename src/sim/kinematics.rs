//! Per-tick movement
//!
//! All tick-based motion comes through these two functions. No bounds
//! checks here; leaving the live set is the judge's call.

use super::state::{ShortEntity, SustainEntity};
use crate::settings::Tuning;

/// Tails shorter than this snap to zero
const SLIVER: f32 = 1.0;

/// Move a marker down by one step
pub fn advance_short(entity: &ShortEntity, tuning: &Tuning) -> ShortEntity {
    let mut next = entity.clone();
    next.pos.y += tuning.step_size;
    next
}

/// Move a tail down by one step, shrinking it once its leading edge has
/// reached the judgement line
pub fn advance_sustain(tail: &SustainEntity, tuning: &Tuning) -> SustainEntity {
    let mut next = tail.clone();
    if tail.pos.y >= tuning.judgement_line - tail.length {
        let length = (tail.length - tuning.step_size).max(0.0);
        next.length = if length <= SLIVER { 0.0 } else { length };
        next.played = true;
    }
    next.pos.y += tuning.step_size;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::note::NoteSpec;
    use crate::sim::spawn::{spawn_short, spawn_sustain};
    use crate::sim::state::EntityId;

    fn id() -> EntityId {
        EntityId {
            id: "0".into(),
            spawn_tick: 0,
        }
    }

    #[test]
    fn test_short_falls_one_step_unbounded() {
        let tuning = Tuning::default();
        let note = NoteSpec::new(true, "piano", 80, 0, 0.0, 0.2).unwrap();
        let mut marker = spawn_short(&note, id(), &tuning);
        marker.pos.y = 1000.0;
        let moved = advance_short(&marker, &tuning);
        assert_eq!(moved.pos.y, 1002.0);
        assert_eq!(moved.pos.x, marker.pos.x);
        assert_eq!(marker.pos.y, 1000.0);
    }

    #[test]
    fn test_tail_keeps_length_above_line() {
        let tuning = Tuning::default();
        let note = NoteSpec::new(true, "piano", 80, 0, 0.0, 1.5).unwrap();
        let tail = spawn_sustain(&note, id(), &tuning);
        let moved = advance_sustain(&tail, &tuning);
        assert_eq!(moved.length, 30.0);
        assert_eq!(moved.pos.y, -28.0);
        assert!(!moved.played);
    }

    #[test]
    fn test_tail_shrinks_at_line_and_keeps_edge() {
        let tuning = Tuning::default();
        let note = NoteSpec::new(true, "piano", 80, 0, 0.0, 1.5).unwrap();
        let mut tail = spawn_sustain(&note, id(), &tuning);
        tail.pos.y = 320.0;
        let moved = advance_sustain(&tail, &tuning);
        assert!(moved.played);
        assert_eq!(moved.length, 28.0);
        assert_eq!(moved.leading_edge(), 350.0);
    }

    #[test]
    fn test_tail_sliver_snaps_to_zero() {
        let tuning = Tuning::default();
        let note = NoteSpec::new(true, "piano", 80, 0, 0.0, 1.5).unwrap();
        let mut tail = spawn_sustain(&note, id(), &tuning);
        tail.pos.y = 347.0;
        tail.length = 3.0;
        let moved = advance_sustain(&tail, &tuning);
        assert_eq!(moved.length, 0.0);

        let again = advance_sustain(&moved, &tuning);
        assert_eq!(again.length, 0.0);
    }
}
