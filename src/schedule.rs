//! Song schedule loading
//!
//! The song format is a header line followed by one row per note:
//! `user_played,instrument_name,velocity,pitch,start,end`. A malformed row
//! aborts the load; the simulation never sees a partial schedule.

use std::path::Path;

use crate::error::ScheduleError;
use crate::sim::note::NoteSpec;

const COLUMNS: usize = 6;

/// A validated, ordered note schedule
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schedule {
    notes: Vec<NoteSpec>,
}

impl Schedule {
    /// Parse the tabular song format
    pub fn from_csv_str(csv: &str) -> Result<Self, ScheduleError> {
        let notes = csv
            .trim()
            .lines()
            .enumerate()
            .skip(1)
            .filter(|(_, row)| !row.trim().is_empty())
            .map(|(index, row)| parse_row(index + 1, row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { notes })
    }

    /// Read and parse a song file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let csv = std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schedule = Self::from_csv_str(&csv)?;
        log::info!(
            "Loaded {} notes ({} for the player) from {}",
            schedule.len(),
            schedule.player_notes(),
            path.display()
        );
        Ok(schedule)
    }

    pub fn notes(&self) -> &[NoteSpec] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<NoteSpec> {
        self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes the player is expected to hit
    pub fn player_notes(&self) -> usize {
        self.notes.iter().filter(|n| n.is_player_note).count()
    }

    /// End time of the last note, in seconds
    pub fn duration_secs(&self) -> f32 {
        self.notes.iter().map(|n| n.end_secs).fold(0.0, f32::max)
    }
}

impl From<Vec<NoteSpec>> for Schedule {
    fn from(notes: Vec<NoteSpec>) -> Self {
        Self { notes }
    }
}

fn parse_row(line: usize, row: &str) -> Result<NoteSpec, ScheduleError> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    if fields.len() < COLUMNS {
        return Err(ScheduleError::MissingColumn {
            line,
            found: fields.len(),
        });
    }

    let is_player_note = parse_flag(line, fields[0])?;
    let instrument = fields[1];
    let velocity: u8 = parse_field(line, "velocity", fields[2])?;
    let pitch: i32 = parse_field(line, "pitch", fields[3])?;
    let start: f32 = parse_field(line, "start", fields[4])?;
    let end: f32 = parse_field(line, "end", fields[5])?;

    if !start.is_finite() {
        return Err(ScheduleError::invalid_field(line, "start", fields[4]));
    }
    if !end.is_finite() {
        return Err(ScheduleError::invalid_field(line, "end", fields[5]));
    }
    if start < 0.0 {
        return Err(ScheduleError::NegativeStart { line, start });
    }
    if end < start {
        return Err(ScheduleError::EndBeforeStart { line, start, end });
    }

    NoteSpec::new(is_player_note, instrument, velocity, pitch, start, end)
        .ok_or(ScheduleError::InvalidPitch { line, pitch })
}

fn parse_flag(line: usize, value: &str) -> Result<bool, ScheduleError> {
    match value {
        "True" | "true" => Ok(true),
        "False" | "false" => Ok(false),
        other => Err(ScheduleError::invalid_field(line, "user_played", other)),
    }
}

fn parse_field<T: std::str::FromStr>(
    line: usize,
    column: &'static str,
    value: &str,
) -> Result<T, ScheduleError> {
    value
        .parse()
        .map_err(|_| ScheduleError::invalid_field(line, column, value))
}
