// src/bbox.rs

use crate::types::BBox;

impl BBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Center point, used for arena containment and motion sampling.
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// A box is usable only if it has finite coordinates and positive area.
    /// Degenerate boxes fail every geometric test instead of raising.
    pub fn is_valid(&self) -> bool {
        self.x1.is_finite()
            && self.y1.is_finite()
            && self.x2.is_finite()
            && self.y2.is_finite()
            && self.x2 > self.x1
            && self.y2 > self.y1
    }

    /// Non-zero-area intersection test. Edge-to-edge contact (zero
    /// intersection area) does not count as overlap.
    pub fn overlaps(&self, other: &BBox) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }

        let width = (self.x2.min(other.x2) - self.x1.max(other.x1)).max(0.0);
        let height = (self.y2.min(other.y2) - self.y1.max(other.y1)).max(0.0);
        width * height > 0.0
    }
}

/// Overlap test lifted to optional boxes: a missing detection on either side
/// means no overlap is possible.
pub fn is_overlapping(a: Option<&BBox>, b: Option<&BBox>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_of_bbox() {
        let bbox = BBox::new(10.0, 20.0, 30.0, 60.0);
        assert_eq!(bbox.center(), (20.0, 40.0));
    }

    #[test]
    fn test_overlapping_boxes() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, 5.0, 15.0, 15.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_boxes_do_not_overlap() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(20.0, 20.0, 30.0, 30.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        // Boxes sharing an edge intersect with zero area
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_malformed_boxes_fail_closed() {
        let good = BBox::new(0.0, 0.0, 10.0, 10.0);
        let inverted = BBox::new(10.0, 10.0, 0.0, 0.0);
        let nan = BBox::new(f32::NAN, 0.0, 10.0, 10.0);

        assert!(!inverted.is_valid());
        assert!(!nan.is_valid());
        assert!(!good.overlaps(&inverted));
        assert!(!good.overlaps(&nan));
    }

    #[test]
    fn test_missing_detection_means_no_overlap() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(!is_overlapping(Some(&a), None));
        assert!(!is_overlapping(None, Some(&a)));
        assert!(!is_overlapping(None, None));
    }
}
