//! Single left-to-right pass turning one hand's notes into swings.

use super::avoidance::insert_avoidance_swings;
use super::dots::{dot_angle, dot_stack_angle};
use super::grouping::{group_notes, order_arrow_stack, order_dot_stack};
use super::player::PlayerOffset;
use crate::config::SliceMapConfig;
use crate::geometry::angle_for;
use crate::models::{Bomb, CutDirection, Hand, Note, Obstacle, Parity, ResetType, Swing};
use crate::parity::{ParityContext, ParityDecision};
use crate::timing::{beats_to_seconds, swing_ebpm};

/// Inputs shared by every transition of one build.
pub(crate) struct SwingBuilder<'a> {
    pub bpm: f32,
    pub hand: Hand,
    /// Sorted by beat.
    pub bombs: &'a [Bomb],
    /// Sorted by beat.
    pub obstacles: &'a [Obstacle],
    pub config: &'a SliceMapConfig,
}

impl SwingBuilder<'_> {
    /// Builds the swing sequence for beat-sorted notes of `self.hand`.
    pub fn build(&self, notes: &[Note]) -> Vec<Swing> {
        let groups = group_notes(notes, self.bpm, self.hand, self.config.slider_precision_ms);
        let mut swings: Vec<Swing> = Vec::with_capacity(groups.len());
        let mut offset = PlayerOffset::new();

        for mut group in groups {
            let swing = match swings.last_mut() {
                None => self.first_swing(group),
                Some(last) => {
                    if group.len() > 1 {
                        if group.iter().all(Note::is_dot) {
                            order_dot_stack(
                                &mut group,
                                last,
                                self.hand,
                                self.config.parity.angle_interval,
                            );
                        } else {
                            order_arrow_stack(&mut group, Some((last.end.x, last.end.y)));
                        }
                    }
                    let swing = Swing::from_notes(group, self.config.swing_tail_beats);
                    close_previous(last, swing.start_beat);
                    self.next_swing(last, swing, &mut offset)
                }
            };
            swings.push(swing);
        }

        insert_avoidance_swings(swings)
    }

    fn first_swing(&self, mut notes: Vec<Note>) -> Swing {
        if notes.len() > 1 && notes.iter().any(|n| !n.is_dot()) {
            order_arrow_stack(&mut notes, None);
        }
        let mut swing = Swing::from_notes(notes, self.config.swing_tail_beats);
        if swing.leading_arrow().is_some_and(|n| n.direction.is_upward()) {
            swing.parity = Parity::Backhand;
        }
        self.apply_arrow_angles(&mut swing, false);
        swing
    }

    fn next_swing(&self, last: &Swing, mut swing: Swing, offset: &mut PlayerOffset) -> Swing {
        let last_beat = last.latest_note_beat().unwrap_or(last.start_beat);
        let swing_last_beat = swing.latest_note_beat().unwrap_or(swing.start_beat);

        swing.ebpm = swing_ebpm(self.bpm, swing.start_beat - last_beat);
        swing.is_inverted = last
            .notes
            .iter()
            .any(|a| swing.notes.iter().any(|b| is_inverted(a, b)));

        let walls = self
            .obstacles
            .iter()
            .filter(|w| w.beat > last_beat && w.beat < swing_last_beat);
        let (x_offset, y_offset) =
            offset.update(walls, swing_last_beat, self.bpm, self.config.undodge_seconds);
        swing.player_x_offset = x_offset;
        swing.player_y_offset = y_offset;

        // Provisional dot angles, assuming the hand alternates.
        if swing.all_dots() {
            let angle = self.dot_swing_angle(last, &swing, last.parity.opposite());
            swing.set_angles(angle, angle);
        }

        let bombs = bombs_between(self.bombs, last_beat, swing_last_beat);
        let ctx = ParityContext {
            hand: self.hand,
            last,
            candidate: &swing,
            bombs,
            player_x_offset: x_offset,
            seconds_since_last: beats_to_seconds(self.bpm, swing.start_beat - last_beat),
            config: &self.config.parity,
        };
        let decision = self.config.parity.strategy.decide(&ctx);
        self.apply_decision(last, &mut swing, decision);

        if swing.is_reset() {
            swing.ebpm *= 2.0;
        }
        log::debug!(
            "SLICEMAP: {:?} swing at beat {:.3}: {:?}, reset {:?}, {} bombs",
            self.hand,
            swing.start_beat,
            swing.parity,
            swing.reset,
            bombs.len()
        );
        swing
    }

    fn apply_decision(&self, last: &Swing, swing: &mut Swing, decision: ParityDecision) {
        let mut parity = decision.parity;
        let mut reset = decision.reset;
        if reset.is_reset() {
            parity = last.parity;
        } else if parity == last.parity {
            reset = ResetType::Normal;
        }
        swing.parity = parity;
        swing.reset = reset;

        if swing.all_dots() {
            let angle = self.dot_swing_angle(last, swing, parity);
            swing.set_angles(angle, angle);
        } else {
            self.apply_arrow_angles(swing, decision.upside_down);
        }

        if let Some(angle) = decision.angle {
            swing.set_angles(angle, angle);
        }
    }

    /// Start and end angles from the first and last arrows. Upside-down
    /// continuations of arrow-only swings mirror the sign.
    fn apply_arrow_angles(&self, swing: &mut Swing, upside_down: bool) {
        let (Some(lead), Some(trail)) = (swing.leading_arrow(), swing.trailing_arrow()) else {
            return;
        };
        let mut start = angle_for(lead.direction, swing.parity, self.hand);
        let mut end = angle_for(trail.direction, swing.parity, self.hand);
        if upside_down && !swing.notes.iter().any(Note::is_dot) {
            start = -start;
            end = -end;
        }
        swing.set_angles(start, end);
    }

    fn dot_swing_angle(&self, last: &Swing, swing: &Swing, parity: Parity) -> f32 {
        match swing.notes.as_slice() {
            [dot] => dot_angle(last, dot, parity, self.hand),
            notes => dot_stack_angle(last, notes, parity, self.hand),
        }
    }
}

/// Ends `last` no later than halfway to the next swing.
fn close_previous(last: &mut Swing, next_start: f32) {
    if let Some(latest) = last.latest_note_beat() {
        let halfway = latest + (next_start - latest) / 2.0;
        last.end_beat = last.end_beat.min(halfway).max(latest);
    }
}

/// Bombs strictly between two beats. `bombs` must be sorted by beat.
fn bombs_between(bombs: &[Bomb], from: f32, to: f32) -> &[Bomb] {
    let start = bombs.partition_point(|b| b.beat <= from);
    let end = bombs.partition_point(|b| b.beat < to).max(start);
    &bombs[start..end]
}

/// Whether `next` lies in the direction `last` was cut, so the blade has to
/// come back against its own path.
pub fn is_inverted(last: &Note, next: &Note) -> bool {
    let (dx, dy) = (next.x - last.x, next.y - last.y);
    match last.direction {
        CutDirection::Up => dy > 0,
        CutDirection::Down => dy < 0,
        CutDirection::Left => dx < 0,
        CutDirection::Right => dx > 0,
        CutDirection::UpLeft => dx < 0 && dy > 0,
        CutDirection::UpRight => dx > 0 && dy > 0,
        CutDirection::DownLeft => dx < 0 && dy < 0,
        CutDirection::DownRight => dx > 0 && dy < 0,
        CutDirection::Any => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ObstacleHeight, SwingKind};
    use crate::parity::ParityStrategy;

    fn note(beat: f32, x: i32, y: i32, d: CutDirection) -> Note {
        Note::new(beat, x, y, Hand::Right, d)
    }

    fn build(notes: &[Note], bombs: &[Bomb], config: &SliceMapConfig) -> Vec<Swing> {
        build_with_walls(notes, bombs, &[], config)
    }

    fn build_with_walls(
        notes: &[Note],
        bombs: &[Bomb],
        obstacles: &[Obstacle],
        config: &SliceMapConfig,
    ) -> Vec<Swing> {
        SwingBuilder {
            bpm: 120.0,
            hand: Hand::Right,
            bombs,
            obstacles,
            config,
        }
        .build(notes)
    }

    #[test]
    fn test_inversion_follows_cut_direction() {
        let down = note(0.0, 1, 1, CutDirection::Down);
        assert!(is_inverted(&down, &note(1.0, 1, 0, CutDirection::Up)));
        assert!(!is_inverted(&down, &note(1.0, 1, 2, CutDirection::Up)));
        let up_right = note(0.0, 1, 1, CutDirection::UpRight);
        assert!(is_inverted(&up_right, &note(1.0, 2, 2, CutDirection::Down)));
        assert!(!is_inverted(&up_right, &note(1.0, 2, 1, CutDirection::Down)));
        assert!(!is_inverted(&note(0.0, 1, 1, CutDirection::Any), &down));
    }

    #[test]
    fn test_bombs_between_is_exclusive() {
        let bombs = [
            Bomb::new(1.0, 0, 0),
            Bomb::new(1.5, 0, 0),
            Bomb::new(2.0, 0, 0),
        ];
        assert_eq!(bombs_between(&bombs, 1.0, 2.0), &bombs[1..2]);
        assert!(bombs_between(&bombs, 2.0, 1.0).is_empty());
    }

    #[test]
    fn test_first_up_swing_is_backhand() {
        let config = SliceMapConfig::default();
        let swings = build(
            &[note(0.0, 1, 0, CutDirection::Up), note(1.0, 1, 0, CutDirection::Down)],
            &[],
            &config,
        );
        assert_eq!(swings.len(), 2);
        assert_eq!(swings[0].parity, Parity::Backhand);
        assert_eq!(swings[1].parity, Parity::Forehand);
        assert_eq!(swings[1].reset, ResetType::None);
        assert_eq!(swings[1].ebpm, 60.0);
    }

    #[test]
    fn test_swing_windows_do_not_overlap() {
        let config = SliceMapConfig::default();
        let notes = [
            note(0.0, 1, 0, CutDirection::Down),
            note(0.125, 1, 0, CutDirection::Up),
            note(0.25, 1, 0, CutDirection::Down),
        ];
        let swings = build(&notes, &[], &config);
        assert_eq!(swings.len(), 3);
        for pair in swings.windows(2) {
            assert!(pair[0].end_beat <= pair[1].start_beat);
            assert!(pair[0].start_beat <= pair[0].end_beat);
        }
    }

    #[test]
    fn test_bomb_reset_inserts_avoidance() {
        let config = SliceMapConfig::default();
        let swings = build(
            &[note(0.0, 1, 2, CutDirection::Down), note(2.0, 1, 2, CutDirection::Down)],
            &[Bomb::new(1.0, 1, 0)],
            &config,
        );
        assert_eq!(swings.len(), 3);
        assert_eq!(swings[1].kind, SwingKind::Avoidance);
        assert_eq!(swings[1].parity, Parity::Backhand);
        assert_eq!(swings[2].reset, ResetType::Bomb);
        assert_eq!(swings[2].parity, Parity::Forehand);
        // Reset swings double their effective BPM.
        assert_eq!(swings[2].ebpm, 60.0);
    }

    #[test]
    fn test_dot_stream_gets_alternating_angles() {
        let config = SliceMapConfig::default().with_strategy(ParityStrategy::GridAvoidance);
        let notes = [
            note(0.0, 1, 0, CutDirection::Any),
            note(1.0, 1, 2, CutDirection::Any),
            note(2.0, 1, 0, CutDirection::Any),
        ];
        let swings = build(&notes, &[], &config);
        let parities: Vec<Parity> = swings.iter().map(|s| s.parity).collect();
        assert_eq!(
            parities,
            vec![Parity::Forehand, Parity::Backhand, Parity::Forehand]
        );
        assert_eq!(swings[1].start.angle, 0.0);
        assert!(swings.iter().all(|s| !s.is_reset()));
    }

    #[test]
    fn test_dot_stack_reads_exit_with_configured_interval() {
        let notes = [
            note(0.0, 0, 2, CutDirection::DownRight),
            note(1.0, 0, 0, CutDirection::Any),
            note(1.0, 2, 0, CutDirection::Any),
        ];
        let first_dot = |config: &SliceMapConfig| {
            let swings = build(&notes, &[], config);
            swings
                .iter()
                .find(|s| s.kind == SwingKind::Cut && s.notes.len() == 2)
                .map(|s| (s.start.x, s.start.y))
        };

        // 45° exit: the pair is played along the diagonal, right to left.
        assert_eq!(first_dot(&SliceMapConfig::default()), Some((2, 0)));

        // Snapped to 0° the exit is straight down, perpendicular to the pair.
        let mut coarse = SliceMapConfig::default();
        coarse.parity.angle_interval = 90.0;
        assert_eq!(first_dot(&coarse), Some((0, 0)));
    }

    #[test]
    fn test_mixed_window_starts_at_its_arrow() {
        let config = SliceMapConfig::default();
        let notes = [
            note(0.0, 1, 0, CutDirection::Any),
            note(0.0, 1, 2, CutDirection::Down),
            note(1.0, 1, 0, CutDirection::Up),
            note(1.0, 1, 2, CutDirection::Any),
        ];
        let swings = build(&notes, &[], &config);
        assert_eq!(swings.len(), 2);
        assert_eq!((swings[0].start.x, swings[0].start.y), (1, 2));
        assert_eq!((swings[0].end.x, swings[0].end.y), (1, 0));
        assert_eq!((swings[1].start.x, swings[1].start.y), (1, 0));
        assert_eq!((swings[1].end.x, swings[1].end.y), (1, 2));
        assert_eq!(swings[1].parity, Parity::Backhand);
    }

    #[test]
    fn test_upside_down_continuation_mirrors_angles() {
        let config = SliceMapConfig::default();
        let notes = [
            note(0.0, 1, 1, CutDirection::UpLeft),
            note(1.0, 1, 1, CutDirection::Up),
        ];
        let swings = build(&notes, &[], &config);
        assert_eq!(swings.len(), 2);
        assert_eq!(swings[0].parity, Parity::Backhand);
        assert_eq!(swings[0].end.angle, 45.0);
        // A forehand up cut is -180°; continuing the rotation makes it +180°.
        assert_eq!(swings[1].parity, Parity::Forehand);
        assert_eq!(swings[1].reset, ResetType::None);
        assert_eq!(swings[1].start.angle, 180.0);
        assert_eq!(swings[1].end.angle, 180.0);
    }

    #[test]
    fn test_dodge_wall_shifts_bombs_into_the_path() {
        let config = SliceMapConfig::default();
        let notes = [
            note(0.0, 0, 2, CutDirection::Down),
            note(2.0, 0, 2, CutDirection::Down),
        ];
        let bombs = [Bomb::new(1.0, 2, 0)];

        let clear = build(&notes, &bombs, &config);
        assert_eq!(clear.len(), 2);
        assert_eq!(clear[1].reset, ResetType::None);
        assert_eq!(clear[1].parity, Parity::Backhand);

        // A wall in column 1 moves the player right, so the bomb drawn in
        // column 2 ends up under the hand.
        let walls = [Obstacle::new(1.5, 1, 1, 1.0, ObstacleHeight::Full)];
        let dodged = build_with_walls(&notes, &bombs, &walls, &config);
        assert_eq!(dodged.len(), 3);
        assert_eq!(dodged[1].kind, SwingKind::Avoidance);
        assert_eq!(dodged[2].reset, ResetType::Bomb);
        assert_eq!(dodged[2].parity, Parity::Forehand);
        assert_eq!(dodged[2].player_x_offset, 1);
    }

    #[test]
    fn test_avoidance_swing_moves_along_reset_angle() {
        let config = SliceMapConfig::default().with_strategy(ParityStrategy::GridAvoidance);
        let notes = [
            note(0.0, 1, 1, CutDirection::DownLeft),
            note(1.0, 1, 1, CutDirection::DownLeft),
        ];
        let swings = build(&notes, &[], &config);
        assert_eq!(swings.len(), 3);
        assert_eq!(swings[2].reset, ResetType::Normal);
        let avoidance = &swings[1];
        assert_eq!(avoidance.kind, SwingKind::Avoidance);
        assert_eq!(avoidance.start.angle, -45.0);
        assert_eq!((avoidance.start.x, avoidance.start.y), (1, 1));
        assert_eq!((avoidance.end.x, avoidance.end.y), (2, 2));
    }
}
