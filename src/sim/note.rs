//! Note definitions and the pitch → lane mapping

use serde::{Deserialize, Serialize};

/// One of the four playable keys, one per lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyId {
    H,
    J,
    K,
    L,
}

impl KeyId {
    pub const ALL: [KeyId; 4] = [KeyId::H, KeyId::J, KeyId::K, KeyId::L];

    /// Keyboard event code (`KeyboardEvent.code` naming)
    pub fn code(&self) -> &'static str {
        match self {
            KeyId::H => "KeyH",
            KeyId::J => "KeyJ",
            KeyId::K => "KeyK",
            KeyId::L => "KeyL",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        KeyId::ALL.into_iter().find(|k| k.code() == code)
    }

    /// Lane index this key plays
    pub fn lane(&self) -> u8 {
        match self {
            KeyId::H => 0,
            KeyId::J => 1,
            KeyId::K => 2,
            KeyId::L => 3,
        }
    }
}

/// Lane color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteColor {
    Green,
    Red,
    Blue,
    Yellow,
}

impl NoteColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteColor::Green => "green",
            NoteColor::Red => "red",
            NoteColor::Blue => "blue",
            NoteColor::Yellow => "yellow",
        }
    }
}

/// Lane assignment derived from a pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneAssignment {
    pub lane: u8,
    pub color: NoteColor,
    pub key: KeyId,
}

const LANE_TABLE: [LaneAssignment; 4] = [
    LaneAssignment { lane: 0, color: NoteColor::Green, key: KeyId::H },
    LaneAssignment { lane: 1, color: NoteColor::Red, key: KeyId::J },
    LaneAssignment { lane: 2, color: NoteColor::Blue, key: KeyId::K },
    LaneAssignment { lane: 3, color: NoteColor::Yellow, key: KeyId::L },
];

/// Map a pitch to its lane via `pitch mod 4`
///
/// Negative pitches leave a negative residue and have no lane.
pub fn assign_lane(pitch: i32) -> Option<LaneAssignment> {
    usize::try_from(pitch % 4)
        .ok()
        .and_then(|index| LANE_TABLE.get(index).copied())
}

/// An immutable schedule entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSpec {
    /// True while the player is expected to hit this note (cleared once scored)
    pub is_player_note: bool,
    pub instrument: String,
    /// MIDI velocity (0-127)
    pub velocity: u8,
    /// MIDI pitch
    pub pitch: i32,
    pub start_secs: f32,
    pub end_secs: f32,
    pub lane: u8,
    pub color: NoteColor,
    pub key: KeyId,
}

impl NoteSpec {
    /// Build a note, deriving lane/color/key from the pitch
    ///
    /// Returns `None` when the pitch has no lane.
    pub fn new(
        is_player_note: bool,
        instrument: impl Into<String>,
        velocity: u8,
        pitch: i32,
        start_secs: f32,
        end_secs: f32,
    ) -> Option<Self> {
        let LaneAssignment { lane, color, key } = assign_lane(pitch)?;
        Some(Self {
            is_player_note,
            instrument: instrument.into(),
            velocity,
            pitch,
            start_secs,
            end_secs,
            lane,
            color,
            key,
        })
    }

    pub fn duration_secs(&self) -> f32 {
        self.end_secs - self.start_secs
    }

    /// Whether this note also spawns a sustain tail
    pub fn is_long(&self, long_note_secs: f32) -> bool {
        self.duration_secs() > long_note_secs
    }

    /// Spawn time in milliseconds after game start
    pub fn start_ms(&self) -> u64 {
        (self.start_secs * 1000.0).round() as u64
    }
}
