// src/team.rs
//
// Team assignment. The two-cluster color model is fitted externally on a
// reference frame; the core only needs the nearest-centroid lookup plus a
// per-track cache so a contestant keeps its team for the whole video.

use crate::types::{Detection, Rgb, Team, TrackId};
use std::collections::HashMap;
use tracing::debug;

/// Seam to the external color model: maps a dominant crop color onto one of
/// the two fitted team clusters.
pub trait TeamClassifier {
    fn team_for_color(&self, color: &Rgb) -> Team;
}

/// Nearest-centroid lookup over the two team colors produced by the external
/// clustering stage.
#[derive(Debug, Clone)]
pub struct CentroidClassifier {
    centroids: [Rgb; 2],
}

impl CentroidClassifier {
    pub fn new(centroids: [Rgb; 2]) -> Self {
        Self { centroids }
    }
}

impl TeamClassifier for CentroidClassifier {
    fn team_for_color(&self, color: &Rgb) -> Team {
        let d1 = distance_sq(color, &self.centroids[0]);
        let d2 = distance_sq(color, &self.centroids[1]);
        if d1 <= d2 {
            Team::One
        } else {
            Team::Two
        }
    }
}

fn distance_sq(a: &Rgb, b: &Rgb) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// Caches team labels per tracker ID: the first classification wins and is
/// reused for every later frame of that contestant.
pub struct TeamAssigner<C> {
    classifier: C,
    assigned: HashMap<TrackId, Team>,
}

impl<C: TeamClassifier> TeamAssigner<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            assigned: HashMap::new(),
        }
    }

    /// Team for a tracked contestant. Returns None (and caches nothing) when
    /// the upstream stage produced no color for an unseen contestant.
    pub fn team_for(&mut self, id: TrackId, detection: &Detection) -> Option<Team> {
        if let Some(&team) = self.assigned.get(&id) {
            return Some(team);
        }

        let color = detection.color?;
        let team = self.classifier.team_for_color(&color);
        debug!("🎨 contestant {} assigned to team {}", id, team.code());
        self.assigned.insert(id, team);
        Some(team)
    }

    pub fn assignments(&self) -> &HashMap<TrackId, Team> {
        &self.assigned
    }
}
