//! Line segment messages from the lane marking detector

use serde::{Deserialize, Serialize};

/// 2D point in the robot frame (x forward, y left), meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product
    pub fn dot(&self, other: &Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

/// Color class of a detected segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentColor {
    /// Off-white marking on the left side of the lane
    LeftMarking,
    /// Black marking on the right side of the lane
    RightMarking,
    Other,
}

impl SegmentColor {
    /// RGBA the detector paints the left (off-white) marking with
    pub const LEFT_RGBA: [u8; 4] = [131, 121, 108, 255];
    /// RGBA the detector paints the right (black) marking with
    pub const RIGHT_RGBA: [u8; 4] = [38, 37, 46, 255];

    /// Classify a raw detector color
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        if rgba == Self::LEFT_RGBA {
            SegmentColor::LeftMarking
        } else if rgba == Self::RIGHT_RGBA {
            SegmentColor::RightMarking
        } else {
            SegmentColor::Other
        }
    }

    /// True for the two lane marking classes
    pub fn is_marking(&self) -> bool {
        matches!(self, SegmentColor::LeftMarking | SegmentColor::RightMarking)
    }
}

/// Detected line segment, produced fresh every camera frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point2,
    pub p2: Point2,
    pub color: SegmentColor,
}

impl Segment {
    pub fn new(p1: Point2, p2: Point2, color: SegmentColor) -> Self {
        Self { p1, p2, color }
    }

    /// Convenience constructor from raw coordinates
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64, color: SegmentColor) -> Self {
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2), color)
    }

    /// Segment midpoint
    pub fn centroid(&self) -> Point2 {
        Point2::new((self.p1.x + self.p2.x) / 2.0, (self.p1.y + self.p2.y) / 2.0)
    }

    /// Distance from the robot origin to the midpoint
    pub fn range(&self) -> f64 {
        self.centroid().norm()
    }

    /// Mirror about the robot's longitudinal (x) axis
    pub fn reflected(&self) -> Self {
        Self::from_coords(self.p1.x, -self.p1.y, self.p2.x, -self.p2.y, self.color)
    }
}
