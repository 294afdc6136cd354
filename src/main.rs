//! Beatfall headless runner
//!
//! Plays a song through the simulation with a seeded autoplayer and prints a
//! JSON summary. Useful for checking tuning changes and song files without a
//! view attached.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use beatfall::cue::{Cue, cues_for};
use beatfall::sim::{GameState, KeyId, NoteSpec};
use beatfall::{Schedule, Session, Tuning};

/// Instruments available to generated songs
const INSTRUMENTS: [&str; 7] = [
    "bass-electric",
    "violin",
    "piano",
    "trumpet",
    "saxophone",
    "trombone",
    "flute",
];

#[derive(Debug, Parser)]
#[command(name = "beatfall", about = "Run a song headless with an autoplayer")]
struct Args {
    /// Song file (`user_played,instrument_name,velocity,pitch,start,end`);
    /// a random song is generated when omitted
    song: Option<PathBuf>,

    /// Tuning JSON overriding the defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Seed for the autoplayer and generated songs
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Chance the autoplayer hits each player note (0.0 - 1.0)
    #[arg(long, default_value_t = 0.9)]
    accuracy: f64,

    /// Notes in a generated song
    #[arg(long, default_value_t = 64)]
    notes: usize,

    /// Simulated frame length fed to the fixed-rate driver
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Play the song this many times, resetting in between
    #[arg(long, default_value_t = 1)]
    runs: u32,
}

/// Outcome of one run
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    run: u32,
    notes: usize,
    hits: u64,
    misses: u64,
    note_cues: u64,
    score: u64,
    high_score: u64,
    multiplier: f32,
    ticks: u64,
    ended: bool,
}

/// Presses each player note as it closes on the judgement line, rolling once
/// per note whether the hit lands
struct AutoPlayer {
    rng: Pcg32,
    accuracy: f64,
    judged: HashSet<String>,
}

impl AutoPlayer {
    fn new(seed: u64, accuracy: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
            judged: HashSet::new(),
        }
    }

    /// Keys to press against this state
    fn keys(&mut self, state: &GameState) -> Vec<KeyId> {
        let line = state.tuning.judgement_line;
        let window = state.tuning.tolerance / 2.0;
        let mut keys = Vec::new();
        for entity in &state.short_entities {
            let on_line = entity.pos.y <= line && line - entity.pos.y <= window;
            if !entity.awaiting_hit() || !on_line {
                continue;
            }
            if !self.judged.insert(entity.id.id.clone()) {
                continue;
            }
            if self.rng.random_bool(self.accuracy) && !keys.contains(&entity.note.key) {
                keys.push(entity.note.key);
            }
        }
        keys
    }

    fn reset(&mut self) {
        self.judged.clear();
    }
}

fn generate_song(rng: &mut Pcg32, count: usize) -> Vec<NoteSpec> {
    let mut start = 0.5f32;
    let mut notes = Vec::with_capacity(count);
    while notes.len() < count {
        let pitch = rng.random_range(48..72);
        let duration = if rng.random_bool(0.2) {
            rng.random_range(1.1..2.0)
        } else {
            rng.random_range(0.1..0.6)
        };
        let instrument = INSTRUMENTS[rng.random_range(0..INSTRUMENTS.len())];
        let velocity = rng.random_range(60..=127);
        let player = rng.random_bool(0.8);
        if let Some(note) = NoteSpec::new(player, instrument, velocity, pitch, start, start + duration)
        {
            notes.push(note);
        }
        start += rng.random_range(0.15..0.6);
    }
    notes
}

/// Count the cues one reduction produced
fn tally(state: &GameState, summary: &mut RunSummary) {
    for cue in cues_for(state) {
        match cue {
            Cue::Note(_) | Cue::Sustain(_) => summary.note_cues += 1,
            Cue::Miss { .. } => summary.misses += 1,
        }
    }
}

fn play(session: &mut Session, bot: &mut AutoPlayer, run: u32, frame_ms: f64) -> RunSummary {
    let mut summary = RunSummary {
        run,
        notes: session.state().total_notes(),
        ..Default::default()
    };

    // Travel time plus the song length, with slack for the last tail
    let tuning = session.state().tuning;
    let last_start = session
        .state()
        .pending_notes
        .iter()
        .map(NoteSpec::start_ms)
        .max()
        .unwrap_or(0);
    let max_ticks = last_start / u64::from(tuning.tick_rate_ms) + tuning.ticks_to_line() * 2 + 100;

    while !session.is_ended() && session.elapsed_ticks() < max_ticks {
        let mut presses = Vec::new();
        session.advance(frame_ms, |_, state| {
            tally(state, &mut summary);
            presses.extend(bot.keys(state));
        });
        for key in presses {
            let before = session.state().ledger.score;
            let state = session.press(key);
            summary.hits += state.ledger.score - before;
            tally(state, &mut summary);
        }
    }

    let state = session.state();
    summary.score = state.ledger.score;
    summary.high_score = state.ledger.high_score;
    summary.multiplier = state.ledger.multiplier;
    summary.ticks = session.elapsed_ticks();
    summary.ended = state.ended;
    summary
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).context("loading tuning")?,
        None => Tuning::default(),
    };

    let mut rng = Pcg32::seed_from_u64(args.seed);
    let schedule = match &args.song {
        Some(path) => Schedule::load(path).context("loading song")?,
        None => {
            log::info!("Generating {} note song with seed {}", args.notes, args.seed);
            Schedule::from(generate_song(&mut rng, args.notes))
        }
    };

    let mut session = Session::new(schedule, tuning);
    let mut bot = AutoPlayer::new(args.seed, args.accuracy);

    let mut summaries = Vec::new();
    for run in 1..=args.runs.max(1) {
        if run > 1 {
            session.reset();
            bot.reset();
        }
        let summary = play(&mut session, &mut bot, run, args.frame_ms);
        log::info!(
            "Run {}: score {} / {} notes, x{}",
            run,
            summary.score,
            summary.notes,
            summary.multiplier
        );
        summaries.push(summary);
    }

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
