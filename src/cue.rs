//! Sound cues for the audio collaborator
//!
//! The simulation never plays anything. After each reduction the caller asks
//! for the cues that reduction produced and hands them to whatever sampler it
//! owns; every cue carries what is needed to trigger a MIDI-style note.

use serde::{Deserialize, Serialize};

use crate::sim::note::NoteSpec;
use crate::sim::state::GameState;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A note to sound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteCue {
    /// Sampler to trigger
    pub instrument: String,
    /// MIDI pitch
    pub pitch: i32,
    /// Scientific pitch name, e.g. `C4`
    pub note_name: String,
    pub frequency_hz: f32,
    pub duration_secs: f32,
    /// Velocity scaled to 0.0 - 1.0
    pub gain: f32,
}

impl NoteCue {
    pub fn from_note(note: &NoteSpec) -> Self {
        Self {
            instrument: note.instrument.clone(),
            pitch: note.pitch,
            note_name: midi_note_name(note.pitch),
            frequency_hz: midi_to_frequency(note.pitch),
            duration_secs: note.duration_secs(),
            gain: f32::from(note.velocity) / 127.0,
        }
    }
}

/// Cue types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cue {
    /// A marker was hit or reached the line as accompaniment
    Note(NoteCue),
    /// An accompaniment tail finished; player tails are never sounded
    Sustain(NoteCue),
    /// A player marker went past unhit
    Miss { lane: u8, note: NoteCue },
}

impl Cue {
    pub fn note(&self) -> &NoteCue {
        match self {
            Cue::Note(cue) | Cue::Sustain(cue) => cue,
            Cue::Miss { note, .. } => note,
        }
    }
}

/// Cues produced by the reduction that led to `state`
pub fn cues_for(state: &GameState) -> Vec<Cue> {
    let notes = state
        .resolved_short
        .iter()
        .map(|e| Cue::Note(NoteCue::from_note(&e.note)));
    let tails = state
        .resolved_sustain
        .iter()
        .filter(|t| !t.note.is_player_note)
        .map(|t| Cue::Sustain(NoteCue::from_note(&t.note)));
    let misses = state.missed_short.iter().map(|e| Cue::Miss {
        lane: e.lane,
        note: NoteCue::from_note(&e.note),
    });
    notes.chain(tails).chain(misses).collect()
}

/// Equal-temperament frequency, A4 (MIDI 69) = 440 Hz
pub fn midi_to_frequency(pitch: i32) -> f32 {
    440.0 * 2f32.powf((pitch - 69) as f32 / 12.0)
}

/// Scientific pitch name, MIDI 60 = `C4`
pub fn midi_note_name(pitch: i32) -> String {
    let name = NOTE_NAMES[pitch.rem_euclid(12) as usize];
    let octave = pitch.div_euclid(12) - 1;
    format!("{}{}", name, octave)
}

/// Output volume controls applied on top of cue gain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueVolume {
    /// Master volume (0.0 - 1.0)
    pub master: f32,
    /// Note volume (0.0 - 1.0)
    pub notes: f32,
    pub muted: bool,
}

impl Default for CueVolume {
    fn default() -> Self {
        Self {
            master: 0.8,
            notes: 1.0,
            muted: false,
        }
    }
}

impl CueVolume {
    /// Final gain for a cue
    pub fn gain(&self, cue: &Cue) -> f32 {
        if self.muted {
            return 0.0;
        }
        (cue.note().gain * self.master * self.notes).clamp(0.0, 1.0)
    }
}
