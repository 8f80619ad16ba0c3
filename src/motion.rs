// src/motion.rs
//
// Optical-flow interpretation. Flow computation itself is external: the core
// receives a per-pixel displacement field between consecutive grayscale
// frames, derives a scalar magnitude field, and samples a small window around
// a contestant's center to decide rotating / not rotating.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Per-pixel 2D displacement between two consecutive grayscale frames,
/// row-major, as exported by the external flow stage.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowField {
    pub width: usize,
    pub height: usize,
    pub dx: Vec<f32>,
    pub dy: Vec<f32>,
}

/// Scalar magnitude of a displacement field.
#[derive(Debug, Clone)]
pub struct MagnitudeField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl MagnitudeField {
    pub fn from_flow(flow: &FlowField) -> Self {
        let data = flow
            .dx
            .iter()
            .zip(flow.dy.iter())
            .map(|(dx, dy)| (dx * dx + dy * dy).sqrt())
            .collect();
        Self {
            width: flow.width,
            height: flow.height,
            data,
        }
    }

    #[cfg(test)]
    pub fn from_raw(width: usize, height: usize, data: Vec<f32>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Mean magnitude in a square window of `2 * half_window` pixels centered
    /// on `position`, clipped to frame bounds. An empty window (position far
    /// outside the frame, or an inconsistent field) yields 0.0.
    pub fn mean_around(&self, position: (f32, f32), half_window: usize) -> f32 {
        if !position.0.is_finite() || !position.1.is_finite() {
            return 0.0;
        }
        if self.data.len() != self.width * self.height {
            return 0.0;
        }

        let half = half_window as i64;
        let cx = position.0 as i64;
        let cy = position.1 as i64;

        let x_min = (cx - half).clamp(0, self.width as i64) as usize;
        let x_max = (cx + half).clamp(0, self.width as i64) as usize;
        let y_min = (cy - half).clamp(0, self.height as i64) as usize;
        let y_max = (cy + half).clamp(0, self.height as i64) as usize;

        if x_min >= x_max || y_min >= y_max {
            return 0.0;
        }

        let mut sum = 0.0f64;
        for y in y_min..y_max {
            let row = &self.data[y * self.width + x_min..y * self.width + x_max];
            sum += row.iter().map(|&v| v as f64).sum::<f64>();
        }
        let count = (x_max - x_min) * (y_max - y_min);
        (sum / count as f64) as f32
    }
}

/// Source of displacement fields, one per consecutive frame pair.
pub trait FlowProvider {
    /// Field between frame `frame_num - 1` and `frame_num`. None for the
    /// first frame of the video (no prior frame to diff against).
    fn flow_into(&self, frame_num: usize) -> Option<&FlowField>;
}

/// File-backed provider over a flow export produced by the external stage.
#[derive(Debug, Clone)]
pub struct PrecomputedFlow {
    fields: Vec<Option<FlowField>>,
}

impl PrecomputedFlow {
    pub fn new(fields: Vec<Option<FlowField>>) -> Result<Self> {
        for (frame_num, field) in fields.iter().enumerate() {
            if let Some(field) = field {
                let pixels = field.width * field.height;
                ensure!(
                    field.dx.len() == pixels && field.dy.len() == pixels,
                    "flow field for frame {} has {}x{} = {} pixels but {}/{} components",
                    frame_num,
                    field.width,
                    field.height,
                    pixels,
                    field.dx.len(),
                    field.dy.len()
                );
            }
        }
        Ok(Self { fields })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading flow export {}", path.display()))?;
        let fields: Vec<Option<FlowField>> = serde_json::from_str(&contents)
            .with_context(|| format!("parsing flow export {}", path.display()))?;
        Self::new(fields)
    }
}

impl FlowProvider for PrecomputedFlow {
    fn flow_into(&self, frame_num: usize) -> Option<&FlowField> {
        // Frame 0 never has a predecessor, whatever the export claims
        if frame_num == 0 {
            return None;
        }
        self.fields.get(frame_num).and_then(|field| field.as_ref())
    }
}
