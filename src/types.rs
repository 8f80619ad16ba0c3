// src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub vertices: Vec<(f32, f32)>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        // Battle polygon measured on the 1920x1080 reference footage
        Self {
            vertices: vec![
                (779.0, 0.0),
                (175.0, 400.0),
                (245.0, 1080.0),
                (1750.0, 1080.0),
                (1820.0, 400.0),
                (1250.0, 0.0),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    pub fps: f64,
    pub tracks_path: String,
    pub flow_path: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fps: 30.0,
            tracks_path: "input/tracks.json".to_string(),
            flow_path: "input/flow.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Mean flow magnitude above which a contestant counts as spinning
    pub spin_threshold: f32,
    /// Half-size of the sampling window around the contestant center (5 => 10x10)
    pub sample_half_window: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spin_threshold: 1.0,
            sample_half_window: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "beybattle=info".to_string(),
        }
    }
}

/// Stable track identifier assigned by the external tracker.
pub type TrackId = u32;

/// Dominant color of a contestant crop, as reported by the color model.
pub type Rgb = [f32; 3];

/// Axis-aligned bounding box in frame-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Persistent two-team label derived from color clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub fn code(&self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Team::One => 0,
            Team::Two => 1,
        }
    }
}

/// Battle phase derived per frame from engagement counts and session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Waiting,
    Ongoing,
    Concluded,
}

impl Phase {
    /// Wire code for logs and downstream renderers: WAITING=0, ONGOING=1, CONCLUDED=2.
    pub fn code(&self) -> u8 {
        match self {
            Phase::Waiting => 0,
            Phase::Ongoing => 1,
            Phase::Concluded => 2,
        }
    }
}

/// One tracked detection in one frame, as exported by the detector+tracker stage.
#[derive(Debug, Clone, Deserialize)]
pub struct Detection {
    pub bbox: BBox,
    /// Dominant crop color from the external color model; absent when the
    /// upstream stage could not produce one.
    #[serde(default)]
    pub color: Option<Rgb>,
}

/// Fully annotated per-frame contestant state consumed by the battle engine.
#[derive(Debug, Clone)]
pub struct ContestantStatus {
    pub bbox: BBox,
    pub position: (f32, f32),
    pub team: Option<Team>,
    pub inside_arena: bool,
    pub is_held: bool,
    pub is_spinning: bool,
}

impl ContestantStatus {
    /// Inside the arena, not held by a hand or launcher, and spinning.
    pub fn is_engaged(&self) -> bool {
        self.inside_arena && !self.is_held && self.is_spinning
    }
}
