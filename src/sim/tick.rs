//! The state reducer
//!
//! Every event the game reacts to is an [`Action`]; [`reduce`] folds one
//! action over a state and returns the next state. No clock, no RNG: time only
//! arrives through `Action::Tick`.

use serde::{Deserialize, Serialize};

use super::collision::{judge_shorts, judge_sustains};
use super::input::judge_press;
use super::note::{KeyId, NoteSpec};
use super::spawn::{spawn_short, spawn_sustain};
use super::state::GameState;

/// Everything that can happen to a running game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Fixed-rate time step; `elapsed` counts ticks since game start
    Tick { elapsed: u64 },
    /// Player pressed a lane key
    KeyPress(KeyId),
    /// A note's start time arrived: spawn its marker
    SpawnShort(NoteSpec),
    /// A long note's start time arrived: spawn its tail
    SpawnSustain(NoteSpec),
    /// Restart from the top, keeping schedule and high score
    Reset,
}

/// Apply one action, producing the next state
///
/// The previous reduction's resolved/missed lists are dropped first, so they
/// always describe this action only.
pub fn reduce(state: &GameState, action: &Action) -> GameState {
    if let Action::Reset = action {
        log::info!("Reset (high score {})", state.ledger.high_score);
        return state.restarted();
    }

    let mut next = state.clone();
    next.clear_transient();

    match action {
        Action::Tick { elapsed } => tick(&mut next, *elapsed),
        Action::KeyPress(key) => press(&mut next, *key),
        Action::SpawnShort(note) => {
            let id = next.next_entity_id();
            log::debug!("Spawn marker {} in lane {}", id.id, note.lane);
            let marker = spawn_short(note, id, &next.tuning);
            next.short_entities.push(marker);
        }
        Action::SpawnSustain(note) => {
            if !note.is_long(next.tuning.long_note_secs) {
                log::warn!(
                    "Tail requested for {:.2}s note at {:.2}s",
                    note.duration_secs(),
                    note.start_secs
                );
            }
            let id = next.next_entity_id();
            log::debug!("Spawn tail {} in lane {}", id.id, note.lane);
            let tail = spawn_sustain(note, id, &next.tuning);
            next.sustain_entities.push(tail);
        }
        Action::Reset => {}
    }

    next
}

/// Advance every entity one step and retire the ones past the line
fn tick(state: &mut GameState, elapsed: u64) {
    let tuning = state.tuning;
    state.elapsed_ticks = elapsed;

    let shorts = judge_shorts(&state.short_entities, &tuning);
    let tails = judge_sustains(&state.sustain_entities, &tuning);

    let exited = shorts.exited();
    let misses = shorts.missed.len() as u32;
    if misses > 0 {
        log::debug!("Tick {}: {} missed", elapsed, misses);
    }

    state.short_entities = shorts.live;
    state.resolved_short = shorts.resolved;
    state.missed_short = shorts.missed;
    state.sustain_entities = tails.live;
    state.resolved_sustain = tails.resolved;

    state.ledger = state.ledger.settle(0, misses, &tuning);
    state.record_resolved(exited);
}

/// Score every aligned marker in the pressed lane
fn press(state: &mut GameState, key: KeyId) {
    let judgement = judge_press(&state.short_entities, key, &state.tuning);
    if judgement.hits.is_empty() {
        return;
    }

    let hits = judgement.hits.len();
    log::debug!("{} hit x{}", key.code(), hits);

    state.short_entities = judgement.live;
    state.resolved_short = judgement.hits;
    state.ledger = state.ledger.settle(hits as u32, 0, &state.tuning);
    state.record_resolved(hits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;

    fn player_note(pitch: i32, start: f32, end: f32) -> NoteSpec {
        NoteSpec::new(true, "piano", 100, pitch, start, end).unwrap()
    }

    fn run_ticks(mut state: GameState, from: u64, count: u64) -> GameState {
        for elapsed in from..from + count {
            state = reduce(&state, &Action::Tick { elapsed });
        }
        state
    }

    #[test]
    fn test_hit_on_the_line() {
        let note = player_note(0, 2.0, 2.3);
        let state = GameState::new(vec![note.clone()], Tuning::default());
        let state = reduce(&state, &Action::SpawnShort(note));
        let state = run_ticks(state, 1, 170);
        assert_eq!(state.short_entities[0].pos.y, 340.0);

        let state = reduce(&state, &Action::KeyPress(KeyId::H));
        assert_eq!(state.ledger.score, 1);
        assert!(state.short_entities.is_empty());
        assert_eq!(state.resolved_short.len(), 1);
        assert!(!state.resolved_short[0].note.is_player_note);
        assert!(state.ended);
    }

    #[test]
    fn test_unhit_marker_is_missed() {
        let note = player_note(0, 2.0, 2.3);
        let mut state = GameState::new(vec![note.clone()], Tuning::default());
        state.ledger.multiplier = 1.6;
        let state = reduce(&state, &Action::SpawnShort(note));

        // 175 steps reach the line, one more tick expires it
        let state = run_ticks(state, 1, 175);
        assert_eq!(state.short_entities[0].pos.y, 350.0);
        assert_eq!(state.ledger.multiplier, 1.6);

        let state = reduce(&state, &Action::Tick { elapsed: 176 });
        assert!(state.short_entities.is_empty());
        assert_eq!(state.missed_short.len(), 1);
        assert!(state.resolved_short.is_empty());
        assert_eq!(state.ledger.multiplier, 1.0);
        assert_eq!(state.ledger.score, 0);
        assert!(state.ended);
    }

    #[test]
    fn test_transient_lists_last_one_reduction() {
        let note = player_note(1, 0.0, 0.1);
        let state = GameState::new(vec![note.clone()], Tuning::default());
        let state = run_ticks(reduce(&state, &Action::SpawnShort(note)), 1, 172);
        let state = reduce(&state, &Action::KeyPress(KeyId::J));
        assert_eq!(state.resolved_short.len(), 1);

        let state = reduce(&state, &Action::Tick { elapsed: 173 });
        assert!(state.resolved_short.is_empty());
        assert_eq!(state.ledger.score, 1);
    }

    #[test]
    fn test_ten_hits_raise_multiplier() {
        let note = player_note(0, 0.0, 0.1);
        let notes = vec![note.clone(); 11];
        let mut state = GameState::new(notes, Tuning::default());
        let mut elapsed = 0;
        for hit in 1..=10u32 {
            state = reduce(&state, &Action::SpawnShort(note.clone()));
            state = run_ticks(state, elapsed + 1, 174);
            elapsed += 174;
            state = reduce(&state, &Action::KeyPress(KeyId::H));
            assert_eq!(state.ledger.score, u64::from(hit));
            if hit < 10 {
                assert_eq!(state.ledger.streak, hit);
                assert_eq!(state.ledger.multiplier, 1.0);
            }
        }
        assert_eq!(state.ledger.multiplier, 1.2);
        assert_eq!(state.ledger.streak, 0);
        assert!(!state.ended);
    }

    #[test]
    fn test_mispress_changes_nothing() {
        let note = player_note(0, 0.0, 0.1);
        let state = GameState::new(vec![note.clone()], Tuning::default());
        let state = reduce(&state, &Action::SpawnShort(note));
        let pressed = reduce(&state, &Action::KeyPress(KeyId::J));
        assert_eq!(pressed, state);
    }

    #[test]
    fn test_spawns_issue_one_id_each() {
        let note = player_note(2, 0.0, 1.5);
        let state = GameState::new(vec![note.clone()], Tuning::default());
        let state = reduce(&state, &Action::SpawnShort(note.clone()));
        let state = reduce(&state, &Action::SpawnSustain(note));
        assert_eq!(state.next_object_seq(), 2);
        assert_eq!(state.short_entities[0].id.id, "0");
        assert_eq!(state.sustain_entities[0].id.id, "1");
    }

    #[test]
    fn test_long_note_tail_shrinks_to_zero_before_removal() {
        let note = player_note(2, 0.0, 1.5);
        let state = GameState::new(vec![note.clone()], Tuning::default());
        let state = reduce(&state, &Action::SpawnShort(note.clone()));
        let mut state = reduce(&state, &Action::SpawnSustain(note));

        let mut removed_at = None;
        for elapsed in 1..400 {
            let before = state.sustain_entities.first().cloned();
            state = reduce(&state, &Action::Tick { elapsed });
            if let Some(tail) = state.sustain_entities.first() {
                if tail.length < 30.0 {
                    assert!(tail.played);
                    assert!(tail.leading_edge() >= 349.0);
                }
            } else if let Some(before) = before {
                assert_eq!(state.resolved_sustain.len(), 1);
                assert_eq!(state.resolved_sustain[0].length, 0.0);
                assert!(before.played);
                removed_at = Some(elapsed);
                break;
            }
        }
        assert!(removed_at.is_some());
    }

    #[test]
    fn test_reset_clears_run_but_keeps_best() {
        let note = player_note(0, 0.0, 0.1);
        let state = GameState::new(vec![note.clone()], Tuning::default());
        let state = run_ticks(reduce(&state, &Action::SpawnShort(note)), 1, 172);
        let state = reduce(&state, &Action::KeyPress(KeyId::H));
        assert!(state.ended);

        let state = reduce(&state, &Action::Reset);
        assert_eq!(state.ledger.score, 0);
        assert_eq!(state.ledger.high_score, 1);
        assert_eq!(state.ledger.multiplier, 1.0);
        assert_eq!(state.ledger.streak, 0);
        assert!(state.short_entities.is_empty());
        assert!(state.sustain_entities.is_empty());
        assert!(!state.ended);
        assert_eq!(state.next_object_seq(), 1);
    }

    #[test]
    fn test_determinism() {
        let notes = vec![player_note(0, 0.0, 0.1), player_note(3, 0.0, 1.4)];
        let state = GameState::new(notes.clone(), Tuning::default());
        let actions = [
            Action::SpawnShort(notes[0].clone()),
            Action::SpawnShort(notes[1].clone()),
            Action::SpawnSustain(notes[1].clone()),
            Action::Tick { elapsed: 1 },
            Action::KeyPress(KeyId::L),
            Action::Tick { elapsed: 2 },
        ];

        let mut a = state.clone();
        let mut b = state;
        for action in &actions {
            a = reduce(&a, action);
            b = reduce(&b, action);
            assert_eq!(a, b);
        }
    }
}
