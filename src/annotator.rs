// src/annotator.rs
//
// Frame-State Annotator: derives the three per-contestant booleans
// (inside_arena, is_held, is_spinning) for one frame. Flags are independent
// per contestant; nothing here mutates state across frames.

use crate::arena::Arena;
use crate::bbox::is_overlapping;
use crate::motion::MagnitudeField;
use crate::tracks::FrameTrack;
use crate::types::{BBox, ContestantStatus, MotionConfig, TrackId};
use std::collections::HashMap;

pub struct FrameAnnotator {
    arena: Arena,
    spin_threshold: f32,
    sample_half_window: usize,
}

impl FrameAnnotator {
    pub fn new(arena: Arena, motion: &MotionConfig) -> Self {
        Self {
            arena,
            spin_threshold: motion.spin_threshold,
            sample_half_window: motion.sample_half_window,
        }
    }

    /// Annotate every contestant tracked in one frame.
    ///
    /// `motion` is the magnitude field between the previous and current
    /// frames; None on the first frame of the video, which forces
    /// `is_spinning` to false. A missing hand or launcher detection makes the
    /// held test trivially false.
    pub fn annotate(
        &self,
        contestants: &FrameTrack,
        hand: Option<&BBox>,
        launcher: Option<&BBox>,
        motion: Option<&MagnitudeField>,
    ) -> HashMap<TrackId, ContestantStatus> {
        contestants
            .iter()
            .map(|(&id, detection)| {
                let bbox = detection.bbox;
                let position = bbox.center();

                let inside_arena = self.arena.contains(position);
                let is_held = is_overlapping(Some(&bbox), hand)
                    || is_overlapping(Some(&bbox), launcher);
                let is_spinning = match motion {
                    Some(field) => {
                        field.mean_around(position, self.sample_half_window)
                            > self.spin_threshold
                    }
                    None => false,
                };

                let status = ContestantStatus {
                    bbox,
                    position,
                    team: None,
                    inside_arena,
                    is_held,
                    is_spinning,
                };
                (id, status)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Detection;

    fn annotator() -> FrameAnnotator {
        let arena = Arena::new(vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
        FrameAnnotator::new(arena, &MotionConfig::default())
    }

    fn contestant(id: TrackId, bbox: BBox) -> FrameTrack {
        let mut frame = FrameTrack::new();
        frame.insert(id, Detection { bbox, color: None });
        frame
    }

    fn spinning_field() -> MagnitudeField {
        MagnitudeField::from_raw(100, 100, vec![3.0; 100 * 100])
    }

    #[test]
    fn test_first_frame_is_never_spinning() {
        let track = contestant(1, BBox::new(40.0, 40.0, 60.0, 60.0));
        let statuses = annotator().annotate(&track, None, None, None);
        assert!(!statuses[&1].is_spinning);
        assert!(statuses[&1].inside_arena);
    }

    #[test]
    fn test_spinning_above_threshold() {
        let track = contestant(1, BBox::new(40.0, 40.0, 60.0, 60.0));
        let field = spinning_field();
        let statuses = annotator().annotate(&track, None, None, Some(&field));
        assert!(statuses[&1].is_spinning);

        let still = MagnitudeField::from_raw(100, 100, vec![0.2; 100 * 100]);
        let statuses = annotator().annotate(&track, None, None, Some(&still));
        assert!(!statuses[&1].is_spinning);
    }

    #[test]
    fn test_held_when_overlapping_hand_or_launcher() {
        let track = contestant(1, BBox::new(40.0, 40.0, 60.0, 60.0));
        let hand = BBox::new(50.0, 50.0, 70.0, 70.0);
        let far = BBox::new(90.0, 90.0, 99.0, 99.0);

        let statuses = annotator().annotate(&track, Some(&hand), None, None);
        assert!(statuses[&1].is_held);

        let statuses = annotator().annotate(&track, None, Some(&hand), None);
        assert!(statuses[&1].is_held);

        let statuses = annotator().annotate(&track, Some(&far), Some(&far), None);
        assert!(!statuses[&1].is_held);
    }

    #[test]
    fn test_missing_hand_and_launcher_is_not_held() {
        let track = contestant(1, BBox::new(40.0, 40.0, 60.0, 60.0));
        let statuses = annotator().annotate(&track, None, None, None);
        assert!(!statuses[&1].is_held);
    }

    #[test]
    fn test_outside_arena() {
        let track = contestant(1, BBox::new(190.0, 190.0, 210.0, 210.0));
        let statuses = annotator().annotate(&track, None, None, None);
        assert!(!statuses[&1].inside_arena);
    }

    #[test]
    fn test_engaged_requires_all_three_flags() {
        let track = contestant(1, BBox::new(40.0, 40.0, 60.0, 60.0));
        let field = spinning_field();
        let hand = BBox::new(50.0, 50.0, 70.0, 70.0);

        let mut statuses = annotator().annotate(&track, None, None, Some(&field));
        let status = statuses.get_mut(&1).unwrap();
        status.team = Some(crate::types::Team::One);
        assert!(status.is_engaged());

        let statuses = annotator().annotate(&track, Some(&hand), None, Some(&field));
        assert!(!statuses[&1].is_engaged());
    }
}
