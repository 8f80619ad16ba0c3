// src/battle.rs
//
// Battle state machine. Consumes annotated contestant states in strict frame
// order and carries the single mutable session state: start/end time, per-team
// engaged time, winner, collision count. Frame index is the only time axis.

use crate::types::{BBox, ContestantStatus, Phase, Team, TrackId};
use std::collections::HashMap;
use tracing::{debug, info};

/// Bbox + frame index of the winning contestant on a late frame where it was
/// still engaged. Illustrative capture for downstream rendering only.
#[derive(Debug, Clone, Copy)]
pub struct WinnerSnapshot {
    pub bbox: BBox,
    pub frame_num: usize,
}

/// Everything the report and renderer need about one processed frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameVerdict {
    pub frame_num: usize,
    pub phase: Phase,
    /// Cumulative battle time in seconds (end - start so far)
    pub battle_time: f64,
    /// Per-team engaged time in seconds, indexed by Team::index()
    pub team_times: [f64; 2],
    pub collision: bool,
    pub total_collisions: u64,
}

/// Single-session battle state, created once per video and mutated once per
/// frame. No other component writes to it.
pub struct BattleSession {
    fps: f64,
    start_time: Option<f64>,
    end_time: Option<f64>,
    battle_time: f64,
    team_times: [f64; 2],
    winner: Option<Team>,
    winner_snapshot: Option<WinnerSnapshot>,
    total_collisions: u64,
}

impl BattleSession {
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            start_time: None,
            end_time: None,
            battle_time: 0.0,
            team_times: [0.0, 0.0],
            winner: None,
            winner_snapshot: None,
            total_collisions: 0,
        }
    }

    /// Process one frame. Must be called with strictly increasing frame
    /// numbers; every transition below depends on the history accumulated so
    /// far.
    pub fn observe_frame(
        &mut self,
        frame_num: usize,
        statuses: &HashMap<TrackId, ContestantStatus>,
    ) -> FrameVerdict {
        let now = frame_num as f64 / self.fps;

        // Engaged teams this frame. Duplicates by team are kept: the phase
        // logic works on a count, not a set.
        let mut engaged: Vec<Team> = Vec::new();
        for status in statuses.values() {
            if !status.is_engaged() {
                continue;
            }
            let Some(team) = status.team else {
                // Unclassified contestants cannot score engagement
                continue;
            };
            engaged.push(team);

            // Engaged time is an absolute overwrite relative to battle start,
            // not an accumulated sum of engaged intervals (see the re-entry
            // test below for the exact semantics).
            if let Some(start) = self.start_time {
                self.team_times[team.index()] = now - start;
            }

            // After declaration, keep refreshing the snapshot while the
            // winner is still observed engaged; the last frame wins.
            if self.winner == Some(team) {
                self.winner_snapshot = Some(WinnerSnapshot {
                    bbox: status.bbox,
                    frame_num,
                });
            }
        }

        let phase = if self.winner.is_some() {
            // Terminal: a declared winner is never cleared, so the machine
            // reports CONCLUDED even if engagement patterns vary afterwards
            Phase::Concluded
        } else if engaged.len() >= 2 {
            match self.start_time {
                None => {
                    self.start_time = Some(now);
                    info!("⚔️  Battle started at frame {} ({:.2}s)", frame_num, now);
                }
                Some(start) => {
                    self.end_time = Some(now);
                    self.battle_time = now - start;
                }
            }
            Phase::Ongoing
        } else if engaged.len() == 1 && self.start_time.is_some() {
            let team = engaged[0];
            self.winner = Some(team);
            info!(
                "🏆 Team {} declared winner at frame {} ({:.2}s)",
                team.code(),
                frame_num,
                now
            );
            Phase::Concluded
        } else {
            Phase::Waiting
        };

        // Collision accounting: only when exactly two contestants are tracked
        // this frame. Continuous contact counts once per frame.
        let collision = if statuses.len() == 2 {
            let boxes: Vec<&BBox> = statuses.values().map(|status| &status.bbox).collect();
            boxes[0].overlaps(boxes[1])
        } else {
            false
        };
        if collision {
            self.total_collisions += 1;
            debug!(
                "💥 Collision at frame {} (total {})",
                frame_num, self.total_collisions
            );
        }

        FrameVerdict {
            frame_num,
            phase,
            battle_time: self.battle_time,
            team_times: self.team_times,
            collision,
            total_collisions: self.total_collisions,
        }
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<f64> {
        self.end_time
    }

    pub fn battle_time(&self) -> f64 {
        self.battle_time
    }

    pub fn team_time(&self, team: Team) -> f64 {
        self.team_times[team.index()]
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn winner_snapshot(&self) -> Option<&WinnerSnapshot> {
        self.winner_snapshot.as_ref()
    }

    pub fn total_collisions(&self) -> u64 {
        self.total_collisions
    }
}
