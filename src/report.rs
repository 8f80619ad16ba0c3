// src/report.rs
//
// Report Builder: collects per-frame verdicts, writes the frame-indexed
// battle log and the single-row results summary as CSV, and produces the
// summary record for downstream consumers.

use crate::battle::{BattleSession, FrameVerdict};
use crate::types::Team;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Final single-row summary of the whole battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleSummary {
    pub battle_time: f64,
    /// Winning team code (1 or 2); None when no battle ever concluded
    pub winner: Option<u8>,
    pub beyblade1_time: f64,
    pub beyblade2_time: f64,
    /// Absolute margin between the two teams' elapsed times
    pub remaining_time: f64,
    pub total_collision: u64,
}

/// One row of the frame-indexed audit log.
#[derive(Debug, Clone, Serialize)]
struct LogRow {
    frame_num: usize,
    battle_status: u8,
    collision: bool,
}

#[derive(Default)]
pub struct BattleReport {
    verdicts: Vec<FrameVerdict>,
}

impl BattleReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, verdict: FrameVerdict) {
        self.verdicts.push(verdict);
    }

    pub fn verdicts(&self) -> &[FrameVerdict] {
        &self.verdicts
    }

    pub fn summary(&self, session: &BattleSession) -> BattleSummary {
        let beyblade1_time = round2(session.team_time(Team::One));
        let beyblade2_time = round2(session.team_time(Team::Two));
        BattleSummary {
            battle_time: round2(session.battle_time()),
            winner: session.winner().map(|team| team.code()),
            beyblade1_time,
            beyblade2_time,
            remaining_time: round2((beyblade1_time - beyblade2_time).abs()),
            total_collision: session.total_collisions(),
        }
    }

    /// Frame-indexed event log: frame number, phase code, collision flag.
    pub fn write_battle_log(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating battle log {}", path.display()))?;
        for verdict in &self.verdicts {
            writer.serialize(LogRow {
                frame_num: verdict.frame_num,
                battle_status: verdict.phase.code(),
                collision: verdict.collision,
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Single-row results CSV mirroring the summary record.
    pub fn write_summary(&self, summary: &BattleSummary, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating results file {}", path.display()))?;
        writer.serialize(summary)?;
        writer.flush()?;
        Ok(())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
