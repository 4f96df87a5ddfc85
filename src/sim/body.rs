//! Rigid bodies
//!
//! A body wraps a polygon with mass and the force/impulse accumulators that
//! the scene integrates once per physics step. Removal is two-phase: a body
//! is only flagged here; the scene's sweep drops it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::character::CharacterKind;
use super::polygon::{Color, Polygon};

/// Stable handle to a body owned by a `Scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// A physically simulated polygon
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    polygon: Polygon,
    mass: f64,
    force: DVec2,
    impulse: DVec2,
    removed: bool,
    /// Which kind of gameplay entity owns this body, if any
    tag: Option<CharacterKind>,
}

impl Body {
    /// Create a body from a vertex ring. Mass must be positive and finite.
    ///
    /// The id is a placeholder until the body is added to a scene.
    pub fn new(shape: Vec<DVec2>, mass: f64, color: Color) -> Self {
        assert!(
            mass.is_finite() && mass > 0.0,
            "body mass must be positive and finite, got {mass}"
        );
        Self {
            id: BodyId(0),
            polygon: Polygon::new(shape, DVec2::ZERO, 0.0, color),
            mass,
            force: DVec2::ZERO,
            impulse: DVec2::ZERO,
            removed: false,
            tag: None,
        }
    }

    /// Create a body tagged with the kind of entity that owns it
    pub fn with_tag(shape: Vec<DVec2>, mass: f64, color: Color, tag: CharacterKind) -> Self {
        let mut body = Self::new(shape, mass, color);
        body.tag = Some(tag);
        body
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: BodyId) {
        self.id = id;
    }

    pub fn tag(&self) -> Option<CharacterKind> {
        self.tag
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn vertices(&self) -> &[DVec2] {
        self.polygon.points()
    }

    /// Owned copy of the vertex ring
    pub fn shape(&self) -> Vec<DVec2> {
        self.polygon.points().to_vec()
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn centroid(&self) -> DVec2 {
        self.polygon.centroid()
    }

    pub fn set_centroid(&mut self, centroid: DVec2) {
        self.polygon.set_center(centroid);
    }

    pub fn translate(&mut self, translation: DVec2) {
        self.polygon.translate(translation);
    }

    pub fn velocity(&self) -> DVec2 {
        self.polygon.velocity()
    }

    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.polygon.set_velocity(velocity);
    }

    pub fn rotation(&self) -> f64 {
        self.polygon.orientation()
    }

    pub fn set_rotation(&mut self, angle: f64) {
        self.polygon.set_orientation(angle);
    }

    pub fn color(&self) -> Color {
        self.polygon.color()
    }

    pub fn set_color(&mut self, color: Color) {
        self.polygon.set_color(color);
    }

    pub fn force(&self) -> DVec2 {
        self.force
    }

    pub fn impulse(&self) -> DVec2 {
        self.impulse
    }

    pub fn add_force(&mut self, force: DVec2) {
        self.force += force;
    }

    pub fn add_impulse(&mut self, impulse: DVec2) {
        self.impulse += impulse;
    }

    /// Zero both accumulators
    pub fn clear_accumulators(&mut self) {
        self.force = DVec2::ZERO;
        self.impulse = DVec2::ZERO;
    }

    /// Flag for removal; the scene drops the body on its next sweep
    pub fn mark_removed(&mut self) {
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Integrate one step using the average of old and new velocity
    pub fn tick(&mut self, dt: f64) {
        let acceleration = self.force / self.mass;
        let old_velocity = self.velocity();
        let new_velocity = old_velocity + acceleration * dt + self.impulse / self.mass;

        self.translate((old_velocity + new_velocity) * (dt / 2.0));
        self.set_velocity(new_velocity);
        self.clear_accumulators();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::polygon::ellipse;

    fn unit_body(mass: f64) -> Body {
        let shape = vec![
            DVec2::new(-0.5, -0.5),
            DVec2::new(0.5, -0.5),
            DVec2::new(0.5, 0.5),
            DVec2::new(-0.5, 0.5),
        ];
        Body::new(shape, mass, Color::default())
    }

    #[test]
    fn test_free_motion_is_exact() {
        let mut body = unit_body(3.0);
        body.set_velocity(DVec2::new(4.0, -2.5));
        let before = body.shape();
        let dt = 0.016;
        body.tick(dt);
        for (old, new) in before.iter().zip(body.vertices()) {
            assert_eq!(*new, *old + DVec2::new(4.0, -2.5) * dt);
        }
        assert_eq!(body.velocity(), DVec2::new(4.0, -2.5));
    }

    #[test]
    fn test_constant_force_uses_average_velocity() {
        let mut body = unit_body(2.0);
        body.add_force(DVec2::new(0.0, -4.0)); // a = -2
        body.tick(1.0);
        // v: 0 -> -2, displacement = avg(0, -2) * 1 = -1
        assert!((body.velocity() - DVec2::new(0.0, -2.0)).length() < 1e-12);
        assert!((body.centroid() - DVec2::new(0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_impulse_changes_velocity_once() {
        let mut body = unit_body(2.0);
        body.add_impulse(DVec2::new(6.0, 0.0));
        body.tick(0.5);
        assert!((body.velocity() - DVec2::new(3.0, 0.0)).length() < 1e-12);
        // Accumulators are spent after the step
        body.tick(0.5);
        assert!((body.velocity() - DVec2::new(3.0, 0.0)).length() < 1e-12);
        assert_eq!(body.force(), DVec2::ZERO);
        assert_eq!(body.impulse(), DVec2::ZERO);
    }

    #[test]
    fn test_clearing_twice_stays_zero() {
        let mut body = unit_body(1.0);
        body.add_force(DVec2::new(1.0, 2.0));
        body.add_impulse(DVec2::new(-3.0, 4.0));
        body.clear_accumulators();
        body.clear_accumulators();
        assert_eq!(body.force(), DVec2::ZERO);
        assert_eq!(body.impulse(), DVec2::ZERO);
    }

    #[test]
    fn test_mark_removed_only_flags() {
        let mut body = unit_body(1.0);
        assert!(!body.is_removed());
        body.mark_removed();
        assert!(body.is_removed());
        assert_eq!(body.vertices().len(), 4);
    }

    #[test]
    fn test_set_centroid_moves_shape() {
        let mut body = Body::with_tag(
            ellipse(DVec2::ZERO, 30.0, 30.0, 20),
            1.0,
            Color::default(),
            CharacterKind::Enemy,
        );
        body.set_centroid(DVec2::new(250.0, 450.0));
        assert!((body.centroid() - DVec2::new(250.0, 450.0)).length() < 1e-9);
        assert_eq!(body.tag(), Some(CharacterKind::Enemy));
    }

    #[test]
    #[should_panic(expected = "body mass must be positive")]
    fn test_zero_mass_rejected() {
        unit_body(0.0);
    }
}
