// src/main.rs

mod annotator;
mod arena;
mod battle;
mod bbox;
mod config;
mod motion;
mod report;
mod team;
mod tracks;
mod types;

use annotator::FrameAnnotator;
use anyhow::{Context, Result};
use arena::Arena;
use battle::BattleSession;
use motion::{FlowProvider, MagnitudeField, PrecomputedFlow};
use report::BattleReport;
use std::fs;
use std::path::Path;
use team::{CentroidClassifier, TeamAssigner};
use tracing::{info, warn};
use tracks::TrackSet;
use types::{Config, Team};

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let config = Config::load(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(config.logging.level.as_str())
        .init();

    info!("🌀 Beyblade Battle Analyzer starting");
    info!("✓ Configuration loaded from {}", config_path);

    let tracks = TrackSet::load(&config.video.tracks_path)?;
    info!(
        "✓ Track export loaded: {} frames at {:.0} fps",
        tracks.num_frames(),
        config.video.fps
    );

    let flow = PrecomputedFlow::load(&config.video.flow_path)?;
    info!("✓ Flow export loaded");

    let centroids = tracks
        .team_centroids
        .context("track export carries no team centroids; run the color clustering stage first")?;
    let mut assigner = TeamAssigner::new(CentroidClassifier::new(centroids));

    let annotator = FrameAnnotator::new(Arena::from_config(&config.arena), &config.motion);
    let mut session = BattleSession::new(config.video.fps);
    let mut report = BattleReport::new();

    // Strictly sequential: frame N's annotation and state update complete
    // before frame N+1 is touched
    for frame_num in 0..tracks.num_frames() {
        let Some(contestants) = tracks.contestants_at(frame_num) else {
            continue;
        };

        let magnitude = flow.flow_into(frame_num).map(MagnitudeField::from_flow);
        let mut statuses = annotator.annotate(
            contestants,
            tracks.hand_bbox(frame_num),
            tracks.launcher_bbox(frame_num),
            magnitude.as_ref(),
        );

        for (id, status) in statuses.iter_mut() {
            if let Some(detection) = contestants.get(id) {
                status.team = assigner.team_for(*id, detection);
            }
        }

        let verdict = session.observe_frame(frame_num, &statuses);
        report.record(verdict);
    }

    let summary = report.summary(&session);

    fs::create_dir_all(&config.output.dir)
        .with_context(|| format!("creating output directory {}", config.output.dir))?;
    let output_dir = Path::new(&config.output.dir);
    report.write_battle_log(output_dir.join("battle_log.csv"))?;
    report.write_summary(&summary, output_dir.join("battle_results.csv"))?;

    info!("\n========================================");
    info!("✓ Processed {} frames", report.verdicts().len());
    match summary.winner {
        Some(winner) => {
            info!("🏆 Winner: Beyblade {}", winner);
            info!("⚔️  Battle time: {:.2} s", summary.battle_time);
        }
        None => warn!("🕰️  No battle detected in this video"),
    }
    if let (Some(start), Some(end)) = (session.start_time(), session.end_time()) {
        info!("  ⏱️  Battle window: {:.2}s → {:.2}s", start, end);
    }
    info!(
        "  Beyblade 1 time: {:.2} s | Beyblade 2 time: {:.2} s (margin {:.2} s)",
        summary.beyblade1_time, summary.beyblade2_time, summary.remaining_time
    );
    info!("  💥 Total collisions: {}", summary.total_collision);
    if let Some(snapshot) = session.winner_snapshot() {
        info!(
            "  📸 Winner snapshot: frame {} bbox ({:.0},{:.0},{:.0},{:.0})",
            snapshot.frame_num,
            snapshot.bbox.x1,
            snapshot.bbox.y1,
            snapshot.bbox.x2,
            snapshot.bbox.y2
        );
    }
    let assigned = assigner.assignments();
    info!(
        "  🎨 Contestants classified: {} (team 1: {}, team 2: {})",
        assigned.len(),
        assigned.values().filter(|t| **t == Team::One).count(),
        assigned.values().filter(|t| **t == Team::Two).count()
    );
    info!("✓ Reports written to {}", config.output.dir);

    Ok(())
}
