//! Capacity envelopes for crane/boom configurations
//!
//! # Chart coordinates
//!
//! Envelopes live in a 2D mass–height plane:
//! - **X-axis**: hook load in **TONNES**
//! - **Y-axis**: lift (hub) height in **METRES**
//!
//! Public APIs accept UOM types and convert at the boundary with
//! `types::conversion`.
//!
//! The region is the five-vertex polygon
//! `(0,0) → (0,Hmax) → (Cmin,Hmax) → (Cmax,Hmin) → (Cmax,0)`
//! traced clockwise. Its boundary never increases left to right, so it is
//! convex and closed under moving a point down or left.

use crate::types::*;
use serde::Serialize;

/// One row of a configuration's load chart
#[derive(Debug, Clone, Copy)]
pub struct LoadChartPoint {
    /// Maximum hook load at this height
    pub capacity: Mass,
    /// Lift height the capacity applies to
    pub height: Length,
}

impl LoadChartPoint {
    pub fn new(capacity: Mass, height: Length) -> Self {
        Self { capacity, height }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("No load chart points available")]
    NoData,

    #[error("Load chart point {capacity} at {height} is negative or not finite")]
    InvalidPoint {
        capacity: DisplayMass,
        height: DisplayLength,
    },

    #[error(
        "Load chart collapses to a zero-area envelope \
         (max capacity {max_capacity}, max height {max_height})"
    )]
    Degenerate {
        max_capacity: DisplayMass,
        max_height: DisplayLength,
    },
}

/// Feasible mass–height region of a crane/boom configuration
#[derive(Debug, Clone, Serialize)]
pub struct CapacityEnvelope {
    vertices: [na::Point2<f64>; 5],
}

impl CapacityEnvelope {
    /// Build the envelope from load chart rows
    ///
    /// Validated here rather than at query time: a zero-area region would make
    /// every containment test meaningless.
    pub fn from_chart(points: &[LoadChartPoint]) -> Result<Self, EnvelopeError> {
        if points.is_empty() {
            return Err(EnvelopeError::NoData);
        }

        let mut min_capacity = f64::INFINITY;
        let mut max_capacity = f64::NEG_INFINITY;
        let mut min_height = f64::INFINITY;
        let mut max_height = f64::NEG_INFINITY;

        for point in points {
            let c = to_chart_mass(point.capacity);
            let h = to_chart_height(point.height);
            if !c.is_finite() || !h.is_finite() || c < 0.0 || h < 0.0 {
                return Err(EnvelopeError::InvalidPoint {
                    capacity: DisplayMass(point.capacity),
                    height: DisplayLength(point.height),
                });
            }
            min_capacity = min_capacity.min(c);
            max_capacity = max_capacity.max(c);
            min_height = min_height.min(h);
            max_height = max_height.max(h);
        }

        let envelope = Self {
            vertices: [
                na::Point2::new(0.0, 0.0),
                na::Point2::new(0.0, max_height),
                na::Point2::new(min_capacity, max_height),
                na::Point2::new(max_capacity, min_height),
                na::Point2::new(max_capacity, 0.0),
            ],
        };

        if envelope.area() <= f64::EPSILON {
            return Err(EnvelopeError::Degenerate {
                max_capacity: DisplayMass(from_chart_mass(max_capacity)),
                max_height: DisplayLength(from_chart_height(max_height)),
            });
        }

        Ok(envelope)
    }

    /// Polygon vertices in chart coordinates, clockwise from the origin
    pub fn vertices(&self) -> &[na::Point2<f64>; 5] {
        &self.vertices
    }

    /// Enclosed area in tonne·metres (shoelace formula)
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let twice_signed: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice_signed.abs() / 2.0
    }

    /// Largest charted capacity
    pub fn max_capacity(&self) -> Mass {
        point_mass(&self.vertices[3])
    }

    /// Largest charted lift height
    pub fn max_height(&self) -> Length {
        point_height(&self.vertices[1])
    }

    /// True when (mass, height) lies strictly inside the envelope
    ///
    /// Points on the boundary are not liftable. Zero-length edges (repeated
    /// vertices when Cmin == Cmax or Hmin == 0) carry no half-plane and are
    /// skipped.
    pub fn contains(&self, mass: Mass, height: Length) -> bool {
        let p = chart_point(mass, height);
        if !p.x.is_finite() || !p.y.is_finite() {
            return false;
        }

        let n = self.vertices.len();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let edge = b - a;
            if edge.norm() <= f64::EPSILON {
                return true;
            }
            // Clockwise polygon: interior is on the right of every edge
            edge.perp(&(p - a)) < 0.0
        })
    }
}
