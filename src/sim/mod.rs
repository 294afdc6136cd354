//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, time arrives through `Action::Tick`
//! - No RNG, no clock
//! - Stable iteration order (spawn order)
//! - No rendering or audio dependencies

pub mod collision;
pub mod input;
pub mod kinematics;
pub mod ledger;
pub mod note;
pub mod queue;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ShortJudgement, SustainJudgement, judge_shorts, judge_sustains};
pub use input::{PressJudgement, is_hittable, judge_press};
pub use kinematics::{advance_short, advance_sustain};
pub use ledger::Ledger;
pub use note::{KeyId, LaneAssignment, NoteColor, NoteSpec, assign_lane};
pub use queue::SpawnQueue;
pub use spawn::{spawn_short, spawn_sustain};
pub use state::{EntityId, GameState, ShortEntity, SustainEntity};
pub use tick::{Action, reduce};
