// src/tracks.rs
//
// Data model for the detector+tracker export. The external stage produces,
// per object category, one map of track-ID -> detection per video frame.

use crate::types::{BBox, Detection, Rgb, TrackId};
use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Hand and launcher detections carry a fixed track ID: at most one of each
/// is ever present in a frame.
pub const SOLO_TRACK_ID: TrackId = 1;

pub type FrameTrack = HashMap<TrackId, Detection>;

/// Per-frame tracking data for the whole video, one entry per frame in order.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackSet {
    pub contestants: Vec<FrameTrack>,
    #[serde(default)]
    pub hands: Vec<FrameTrack>,
    #[serde(default)]
    pub launchers: Vec<FrameTrack>,
    /// The two fitted team color centroids from the external clustering stage.
    #[serde(default)]
    pub team_centroids: Option<[Rgb; 2]>,
}

impl TrackSet {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading track export {}", path.display()))?;
        let tracks: TrackSet = serde_json::from_str(&contents)
            .with_context(|| format!("parsing track export {}", path.display()))?;
        tracks.validate()?;
        Ok(tracks)
    }

    /// Hand/launcher sequences may be omitted entirely (no such detections in
    /// the video) but when present must cover every frame.
    pub fn validate(&self) -> Result<()> {
        let frames = self.contestants.len();
        ensure!(
            self.hands.is_empty() || self.hands.len() == frames,
            "hand track has {} frames, expected {}",
            self.hands.len(),
            frames
        );
        ensure!(
            self.launchers.is_empty() || self.launchers.len() == frames,
            "launcher track has {} frames, expected {}",
            self.launchers.len(),
            frames
        );
        Ok(())
    }

    pub fn num_frames(&self) -> usize {
        self.contestants.len()
    }

    pub fn contestants_at(&self, frame_num: usize) -> Option<&FrameTrack> {
        self.contestants.get(frame_num)
    }

    pub fn hand_bbox(&self, frame_num: usize) -> Option<&BBox> {
        self.hands
            .get(frame_num)
            .and_then(|frame| frame.get(&SOLO_TRACK_ID))
            .map(|detection| &detection.bbox)
    }

    pub fn launcher_bbox(&self, frame_num: usize) -> Option<&BBox> {
        self.launchers
            .get(frame_num)
            .and_then(|frame| frame.get(&SOLO_TRACK_ID))
            .map(|detection| &detection.bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track_export() {
        let json = r#"{
            "contestants": [
                {"3": {"bbox": {"x1": 10.0, "y1": 10.0, "x2": 20.0, "y2": 20.0},
                       "color": [200.0, 30.0, 30.0]}}
            ],
            "hands": [
                {"1": {"bbox": {"x1": 0.0, "y1": 0.0, "x2": 5.0, "y2": 5.0}}}
            ],
            "team_centroids": [[200.0, 30.0, 30.0], [30.0, 30.0, 200.0]]
        }"#;

        let tracks: TrackSet = serde_json::from_str(json).unwrap();
        tracks.validate().unwrap();

        assert_eq!(tracks.num_frames(), 1);
        assert_eq!(tracks.contestants_at(0).unwrap().len(), 1);
        assert!(tracks.hand_bbox(0).is_some());
        assert!(tracks.launcher_bbox(0).is_none());
        assert!(tracks.team_centroids.is_some());
    }

    #[test]
    fn test_validate_rejects_frame_count_mismatch() {
        let json = r#"{
            "contestants": [{}, {}],
            "hands": [{}]
        }"#;
        let tracks: TrackSet = serde_json::from_str(json).unwrap();
        assert!(tracks.validate().is_err());
    }

    #[test]
    fn test_missing_frame_yields_no_bbox() {
        let tracks = TrackSet {
            contestants: vec![HashMap::new()],
            hands: vec![],
            launchers: vec![],
            team_centroids: None,
        };
        assert!(tracks.hand_bbox(0).is_none());
        assert!(tracks.hand_bbox(99).is_none());
    }
}
