//! Polygon geometry
//!
//! A polygon is an ordered ring of vertices (counter-clockwise by convention)
//! plus the kinematic state that moves it: a velocity and a rotation rate.
//! All transforms mutate the vertices in place.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{cross, rotate_about};

/// RGB fill color (components in 0..=1)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A simple closed polygon with its own velocity and spin
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<DVec2>,
    velocity: DVec2,
    /// Radians per second applied by `move_by`
    rotation_speed: f64,
    /// Accumulated orientation (radians) from `set_orientation`
    orientation: f64,
    color: Color,
}

impl Polygon {
    pub fn new(points: Vec<DVec2>, velocity: DVec2, rotation_speed: f64, color: Color) -> Self {
        Self {
            points,
            velocity,
            rotation_speed,
            orientation: 0.0,
            color,
        }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    pub fn set_rotation_speed(&mut self, rotation_speed: f64) {
        self.rotation_speed = rotation_speed;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Signed shoelace sum (positive for counter-clockwise rings)
    fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let sum: f64 = (0..n)
            .map(|i| cross(self.points[i], self.points[(i + 1) % n]))
            .sum();
        sum / 2.0
    }

    /// Enclosed area. Degenerate rings (< 3 points) have zero area.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid
    ///
    /// Panics on rings with fewer than 3 points or zero area, where the
    /// centroid is undefined.
    pub fn centroid(&self) -> DVec2 {
        let n = self.points.len();
        assert!(n >= 3, "centroid of a polygon with {n} points");
        let area = self.signed_area();
        assert!(area != 0.0, "centroid of a zero-area polygon");

        let mut sum = DVec2::ZERO;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += (a + b) * cross(a, b);
        }
        sum / (6.0 * area)
    }

    /// Alias of `centroid`, the point all placement is relative to
    #[inline]
    pub fn center(&self) -> DVec2 {
        self.centroid()
    }

    pub fn translate(&mut self, translation: DVec2) {
        for p in &mut self.points {
            *p += translation;
        }
    }

    /// Rotate every vertex by `angle` radians about `pivot`
    pub fn rotate(&mut self, angle: f64, pivot: DVec2) {
        for p in &mut self.points {
            *p = rotate_about(*p, angle, pivot);
        }
    }

    /// Move so the centroid lands on `center`
    pub fn set_center(&mut self, center: DVec2) {
        let current = self.centroid();
        self.translate(center - current);
    }

    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    /// Rotate about the centroid so the accumulated orientation becomes `angle`
    pub fn set_orientation(&mut self, angle: f64) {
        let pivot = self.centroid();
        self.rotate(angle - self.orientation, pivot);
        self.orientation = angle;
    }

    /// Advance by the polygon's own velocity and rotation rate
    pub fn move_by(&mut self, dt: f64) {
        self.translate(self.velocity * dt);
        let angle = self.rotation_speed * dt;
        if angle != 0.0 {
            let pivot = self.centroid();
            self.rotate(angle, pivot);
            self.orientation += angle;
        }
    }
}

/// Counter-clockwise ellipse outline around `center`
pub fn ellipse(center: DVec2, radius_x: f64, radius_y: f64, points: usize) -> Vec<DVec2> {
    (0..points)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / points as f64;
            center + DVec2::new(radius_x * angle.cos(), radius_y * angle.sin())
        })
        .collect()
}
