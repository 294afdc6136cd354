//! Expiry and collision judgement against the judgement line
//!
//! Two thresholds run each tick. Expiry (`y >= line`) is checked before
//! movement and retires anything already sitting on or below the line.
//! Collision is checked after movement: markers strictly past the line
//! (`y > line`), tails once their top edge passes `line + length`. An entity
//! leaves through whichever check fires first and is never judged twice.

use super::kinematics::{advance_short, advance_sustain};
use super::state::{ShortEntity, SustainEntity};
use crate::settings::Tuning;

/// Markers after one tick of judgement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortJudgement {
    /// Still falling, already advanced
    pub live: Vec<ShortEntity>,
    /// Left the live set without needing a hit (scored or auto-played)
    pub resolved: Vec<ShortEntity>,
    /// Player markers that left the live set unhit
    pub missed: Vec<ShortEntity>,
}

impl ShortJudgement {
    /// Markers that left the live set this tick
    pub fn exited(&self) -> usize {
        self.resolved.len() + self.missed.len()
    }

    fn retire(&mut self, entity: ShortEntity) {
        if entity.awaiting_hit() {
            self.missed.push(entity);
        } else {
            self.resolved.push(entity);
        }
    }
}

/// Tails after one tick of judgement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SustainJudgement {
    pub live: Vec<SustainEntity>,
    pub resolved: Vec<SustainEntity>,
}

/// Marker is on or below the line (pre-move check)
pub fn short_expired(entity: &ShortEntity, tuning: &Tuning) -> bool {
    entity.pos.y >= tuning.judgement_line
}

/// Marker is strictly past the line (post-move check)
pub fn short_collided(entity: &ShortEntity, tuning: &Tuning) -> bool {
    entity.pos.y > tuning.judgement_line
}

/// Tail top edge is on or below the line (pre-move check)
pub fn sustain_expired(tail: &SustainEntity, tuning: &Tuning) -> bool {
    tail.pos.y >= tuning.judgement_line
}

/// Tail has passed the line by its own length (post-move check)
pub fn sustain_collided(tail: &SustainEntity, tuning: &Tuning) -> bool {
    tail.pos.y >= tuning.judgement_line + tail.length
}

/// Expire, advance and collide every live marker
pub fn judge_shorts(entities: &[ShortEntity], tuning: &Tuning) -> ShortJudgement {
    let mut judgement = ShortJudgement::default();

    let (expired, active): (Vec<&ShortEntity>, Vec<&ShortEntity>) =
        entities.iter().partition(|e| short_expired(e, tuning));
    for entity in expired {
        judgement.retire(entity.clone());
    }

    for entity in active {
        let moved = advance_short(entity, tuning);
        if short_collided(&moved, tuning) {
            judgement.retire(moved);
        } else {
            judgement.live.push(moved);
        }
    }

    judgement
}

/// Expire, advance and collide every live tail
pub fn judge_sustains(tails: &[SustainEntity], tuning: &Tuning) -> SustainJudgement {
    let mut judgement = SustainJudgement::default();

    let (expired, active): (Vec<&SustainEntity>, Vec<&SustainEntity>) =
        tails.iter().partition(|t| sustain_expired(t, tuning));
    judgement.resolved.extend(expired.into_iter().cloned());

    for tail in active {
        let moved = advance_sustain(tail, tuning);
        if sustain_collided(&moved, tuning) {
            judgement.resolved.push(moved);
        } else {
            judgement.live.push(moved);
        }
    }

    judgement
}
