//! Entity construction from schedule notes

use glam::Vec2;

use super::note::NoteSpec;
use super::state::{EntityId, ShortEntity, SustainEntity};
use crate::settings::Tuning;

/// Horizontal lane center: 20% steps across the viewport
pub fn lane_x(lane: u8, viewport_width: f32) -> f32 {
    f32::from(lane + 1) * viewport_width / 5.0
}

/// Build the marker for a note, sitting at the top of the viewport
pub fn spawn_short(note: &NoteSpec, id: EntityId, tuning: &Tuning) -> ShortEntity {
    ShortEntity {
        id,
        lane: note.lane,
        color: note.color,
        note: note.clone(),
        pos: Vec2::new(lane_x(note.lane, tuning.viewport_width), 0.0),
        radius: tuning.note_radius,
    }
}

/// Tail length for a note's duration
pub fn sustain_length(note: &NoteSpec, tuning: &Tuning) -> f32 {
    note.duration_secs() * tuning.step_size * tuning.interval_duration
}

/// Build the tail for a long note
///
/// The tail starts fully above the viewport with its leading edge on the
/// marker's spawn height, shifted left by a quarter of its width in percent.
pub fn spawn_sustain(note: &NoteSpec, id: EntityId, tuning: &Tuning) -> SustainEntity {
    let length = sustain_length(note, tuning);
    let offset = tuning.tail_width / 4.0 / 100.0 * tuning.viewport_width;
    SustainEntity {
        id,
        lane: note.lane,
        color: note.color,
        note: note.clone(),
        pos: Vec2::new(lane_x(note.lane, tuning.viewport_width) - offset, -length),
        length,
        width: tuning.tail_width,
        played: false,
    }
}
