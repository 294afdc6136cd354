//! Key press judgement

use super::note::KeyId;
use super::state::ShortEntity;
use crate::settings::Tuning;

/// Markers after judging one key press
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PressJudgement {
    /// Markers left untouched
    pub live: Vec<ShortEntity>,
    /// Markers scored by this press, flagged as no longer awaiting a hit
    pub hits: Vec<ShortEntity>,
}

/// Whether a press of `key` scores this marker
pub fn is_hittable(entity: &ShortEntity, key: KeyId, tuning: &Tuning) -> bool {
    (entity.pos.y - tuning.judgement_line).abs() <= tuning.tolerance
        && entity.note.key == key
        && entity.awaiting_hit()
}

/// Resolve every aligned marker in the pressed lane at once
///
/// Pressing with nothing aligned changes nothing.
pub fn judge_press(entities: &[ShortEntity], key: KeyId, tuning: &Tuning) -> PressJudgement {
    let mut judgement = PressJudgement::default();
    for entity in entities {
        if is_hittable(entity, key, tuning) {
            let mut hit = entity.clone();
            hit.note.is_player_note = false;
            judgement.hits.push(hit);
        } else {
            judgement.live.push(entity.clone());
        }
    }
    judgement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::note::NoteSpec;
    use crate::sim::spawn::spawn_short;
    use crate::sim::state::EntityId;

    fn marker(n: u32, pitch: i32, y: f32, player: bool) -> ShortEntity {
        let note = NoteSpec::new(player, "piano", 80, pitch, 0.0, 0.2).unwrap();
        let id = EntityId {
            id: n.to_string(),
            spawn_tick: 0,
        };
        let mut entity = spawn_short(&note, id, &Tuning::default());
        entity.pos.y = y;
        entity
    }

    #[test]
    fn test_tolerance_edges_are_inclusive() {
        let tuning = Tuning::default();
        assert!(is_hittable(&marker(0, 0, 330.0, true), KeyId::H, &tuning));
        assert!(is_hittable(&marker(0, 0, 370.0, true), KeyId::H, &tuning));
        assert!(!is_hittable(&marker(0, 0, 329.0, true), KeyId::H, &tuning));
    }

    #[test]
    fn test_wrong_key_or_auto_note_never_hits() {
        let tuning = Tuning::default();
        assert!(!is_hittable(&marker(0, 0, 350.0, true), KeyId::J, &tuning));
        assert!(!is_hittable(&marker(0, 0, 350.0, false), KeyId::H, &tuning));
    }

    #[test]
    fn test_chord_resolves_together() {
        let tuning = Tuning::default();
        let entities = vec![
            marker(0, 0, 340.0, true),
            marker(1, 4, 346.0, true),
            marker(2, 1, 346.0, true),
            marker(3, 0, 200.0, true),
        ];
        let judgement = judge_press(&entities, KeyId::H, &tuning);
        let hit_ids: Vec<&str> = judgement.hits.iter().map(|e| e.id.id.as_str()).collect();
        assert_eq!(hit_ids, vec!["0", "1"]);
        assert!(judgement.hits.iter().all(|e| !e.note.is_player_note));
        assert_eq!(judgement.live.len(), 2);
        assert!(judgement.live.iter().all(|e| e.note.is_player_note));
    }

    #[test]
    fn test_press_with_nothing_aligned_is_noop() {
        let tuning = Tuning::default();
        let entities = vec![marker(0, 0, 10.0, true)];
        let judgement = judge_press(&entities, KeyId::H, &tuning);
        assert!(judgement.hits.is_empty());
        assert_eq!(judgement.live, entities);
    }
}
