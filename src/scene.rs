#![warn(missing_docs)]
//! Geometry of the side-view schematic of a tilted filter.
//!
//! The schematic shows a horizontal filter plate, the (dashed) surface normal through a pivot
//! point, the incident beam hitting the pivot under the angle of incidence, an arc spanning the
//! angle between normal and beam and a label with the angle value.
//!
//! All coordinates are pixel coordinates of the drawing surface with the origin in the upper
//! left corner and the y axis pointing downwards. Angles of the arc follow the same convention:
//! `0` points along +x, positive angles turn clockwise on screen and `-π/2` points straight up.
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

/// Fixed layout constants of the schematic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    /// width of the drawing surface in pixels
    pub width: u32,
    /// height of the drawing surface in pixels
    pub height: u32,
    /// the point where the beam hits the plate
    pub pivot: Point2<f64>,
    /// left end of the filter plate
    pub plate_start: Point2<f64>,
    /// right end of the filter plate
    pub plate_end: Point2<f64>,
    /// length of the drawn surface normal
    pub normal_length: f64,
    /// length of the incident beam
    pub beam_length: f64,
    /// radius of the angle arc
    pub arc_radius: f64,
    /// distance between arc and label position
    pub label_distance: f64,
    /// shift of the text anchor relative to the label position
    pub label_shift: Vector2<f64>,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            pivot: Point2::new(200.0, 120.0),
            plate_start: Point2::new(40.0, 120.0),
            plate_end: Point2::new(360.0, 120.0),
            normal_length: 70.0,
            beam_length: 90.0,
            arc_radius: 28.0,
            label_distance: 10.0,
            label_shift: Vector2::new(-10.0, 5.0),
        }
    }
}

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// start point
    pub start: Point2<f64>,
    /// end point
    pub end: Point2<f64>,
}

impl Segment {
    /// Returns the length of this [`Segment`].
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Turning direction of an arc as seen on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    /// increasing angle (y axis pointing down)
    Clockwise,
    /// decreasing angle
    CounterClockwise,
}

/// A circular arc around a center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    /// center of the arc
    pub center: Point2<f64>,
    /// radius of the arc
    pub radius: f64,
    /// start angle in radians
    pub start_angle: f64,
    /// end angle in radians
    pub end_angle: f64,
    /// direction in which the arc runs from `start_angle` to `end_angle`
    pub direction: ArcDirection,
}

impl ArcSpan {
    /// Returns the signed angular sweep (`end_angle - start_angle`) in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
    /// Returns the point on the arc at the given angle.
    #[must_use]
    pub fn point_at(&self, angle: f64) -> Point2<f64> {
        let (sin, cos) = angle.sin_cos();
        self.center + Vector2::new(cos, sin) * self.radius
    }
    /// Approximate the arc by a polyline with `segments` segments.
    ///
    /// A zero sweep yields a single point.
    #[must_use]
    pub fn to_polyline(&self, segments: usize) -> Vec<Point2<f64>> {
        #[allow(clippy::cast_precision_loss)]
        let steps = segments.max(1) as f64;
        if self.sweep() == 0.0 {
            return vec![self.point_at(self.start_angle)];
        }
        (0..=segments.max(1))
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / steps;
                self.point_at(self.sweep().mul_add(t, self.start_angle))
            })
            .collect()
    }
}

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// point on the bisector of the arc, just outside the arc
    pub position: Point2<f64>,
    /// anchor point of the text (left end of the baseline)
    pub anchor: Point2<f64>,
    /// the text
    pub text: String,
}

/// All primitives needed to draw one frame of the schematic.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGeometry {
    /// the filter plate
    pub plate: Segment,
    /// the surface normal through the pivot
    pub normal: Segment,
    /// the incident beam, ending at the pivot
    pub beam: Segment,
    /// arc between normal and beam
    pub arc: ArcSpan,
    /// angle label
    pub label: Label,
}

/// Format an angle in degrees the way it is shown to the user.
///
/// The value is rounded to one decimal place and trailing zeros are dropped (`20°`, `12.5°`).
#[must_use]
pub fn format_degrees(aoi: Angle) -> String {
    let rounded = (aoi.get::<degree>() * 10.0).round() / 10.0;
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}°")
}

/// Compute the geometry of the schematic for the given angle of incidence.
///
/// The beam starts at `pivot - L·(sinθ, cosθ)` and ends at the pivot. The arc starts at the
/// normal (`-π/2`) and ends at `-π/2 + θ`, running clockwise for positive and counter-clockwise
/// for negative angles. The label sits on the bisector of the arc at `arc_radius +
/// label_distance` from the pivot.
#[must_use]
pub fn build_scene_geometry(aoi: Angle, layout: &SceneLayout) -> SceneGeometry {
    let theta = aoi.get::<radian>();
    let (sin, cos) = theta.sin_cos();
    let pivot = layout.pivot;

    let beam = Segment {
        start: pivot - Vector2::new(sin, cos) * layout.beam_length,
        end: pivot,
    };
    let normal = Segment {
        start: pivot,
        end: pivot - Vector2::new(0.0, layout.normal_length),
    };
    let arc = ArcSpan {
        center: pivot,
        radius: layout.arc_radius,
        start_angle: -FRAC_PI_2,
        end_angle: -FRAC_PI_2 + theta,
        direction: if theta < 0.0 {
            ArcDirection::CounterClockwise
        } else {
            ArcDirection::Clockwise
        },
    };
    let label_angle = -FRAC_PI_2 + theta / 2.0;
    let (label_sin, label_cos) = label_angle.sin_cos();
    let position =
        pivot + Vector2::new(label_cos, label_sin) * (layout.arc_radius + layout.label_distance);
    let label = Label {
        position,
        anchor: position + layout.label_shift,
        text: format_degrees(aoi),
    };
    SceneGeometry {
        plate: Segment {
            start: layout.plate_start,
            end: layout.plate_end,
        },
        normal,
        beam,
        arc,
        label,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::degree;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normal_incidence() {
        let layout = SceneLayout::default();
        let geo = build_scene_geometry(degree!(0.0), &layout);
        assert_eq!(geo.beam.start.x, 200.0);
        assert_abs_diff_eq!(geo.beam.start.y, 30.0, epsilon = 1e-9);
        assert_eq!(geo.beam.end, layout.pivot);
        assert_eq!(geo.arc.sweep(), 0.0);
        assert_eq!(geo.arc.direction, ArcDirection::Clockwise);
        assert_abs_diff_eq!(geo.label.position.x, 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(geo.label.position.y, 120.0 - 38.0, epsilon = 1e-9);
        assert_abs_diff_eq!(geo.label.anchor.x, 190.0, epsilon = 1e-9);
        assert_abs_diff_eq!(geo.label.anchor.y, 87.0, epsilon = 1e-9);
        assert_eq!(geo.label.text, "0°");
    }
    #[test]
    fn positive_angle() {
        let layout = SceneLayout::default();
        let geo = build_scene_geometry(degree!(30.0), &layout);
        assert_abs_diff_eq!(geo.beam.start.x, 200.0 - 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            geo.beam.start.y,
            120.0 - 90.0 * 30.0_f64.to_radians().cos(),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(geo.beam.length(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(geo.arc.sweep(), 30.0_f64.to_radians(), epsilon = 1e-12);
        assert_eq!(geo.arc.direction, ArcDirection::Clockwise);
        // arc end points towards +x
        assert!(geo.arc.point_at(geo.arc.end_angle).x > layout.pivot.x);
        assert_eq!(geo.label.text, "30°");
    }
    #[test]
    fn negative_angle() {
        let layout = SceneLayout::default();
        let geo = build_scene_geometry(degree!(-15.0), &layout);
        assert!(geo.beam.start.x > layout.pivot.x);
        assert!(geo.arc.sweep() < 0.0);
        assert_eq!(geo.arc.direction, ArcDirection::CounterClockwise);
        assert!(geo.arc.point_at(geo.arc.end_angle).x < layout.pivot.x);
        assert_eq!(geo.label.text, "-15°");
    }
    #[test]
    fn label_on_bisector() {
        let layout = SceneLayout::default();
        let geo = build_scene_geometry(degree!(40.0), &layout);
        let radial = geo.label.position - layout.pivot;
        assert_abs_diff_eq!(radial.norm(), 38.0, epsilon = 1e-9);
        let angle = radial.y.atan2(radial.x);
        assert_abs_diff_eq!(angle, -FRAC_PI_2 + 20.0_f64.to_radians(), epsilon = 1e-12);
    }
    #[test]
    fn fixed_elements() {
        let layout = SceneLayout::default();
        let geo = build_scene_geometry(degree!(10.0), &layout);
        assert_eq!(geo.plate.start, Point2::new(40.0, 120.0));
        assert_eq!(geo.plate.end, Point2::new(360.0, 120.0));
        assert_eq!(geo.normal.start, layout.pivot);
        assert_eq!(geo.normal.end, Point2::new(200.0, 50.0));
    }
    #[test]
    fn polyline() {
        let layout = SceneLayout::default();
        let geo = build_scene_geometry(degree!(60.0), &layout);
        let pts = geo.arc.to_polyline(12);
        assert_eq!(pts.len(), 13);
        for p in &pts {
            assert_abs_diff_eq!((p - layout.pivot).norm(), 28.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(pts[0].x, 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[0].y, 92.0, epsilon = 1e-9);
        let zero = build_scene_geometry(degree!(0.0), &layout);
        assert_eq!(zero.arc.to_polyline(12).len(), 1);
    }
    #[test]
    fn degree_format() {
        assert_eq!(format_degrees(degree!(20.0)), "20°");
        assert_eq!(format_degrees(degree!(12.5)), "12.5°");
        assert_eq!(format_degrees(degree!(-0.01)), "0°");
        assert_eq!(format_degrees(degree!(7.26)), "7.3°");
    }
}
