//! Force generators
//!
//! A generator is bound to a subset of scene bodies and runs once per physics
//! step, before integration. Collision responses and gravity are generators.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId};
use super::collision::find_collision;

/// A recurring force rule applied to the bodies it is bound to
pub trait ForceGenerator {
    /// `targets` are the bound ids, in binding order. Every target is
    /// guaranteed to still be in `bodies`.
    fn apply(&mut self, bodies: &mut [Body], targets: &[BodyId]);
}

impl<F> ForceGenerator for F
where
    F: FnMut(&mut [Body], &[BodyId]),
{
    fn apply(&mut self, bodies: &mut [Body], targets: &[BodyId]) {
        self(bodies, targets)
    }
}

/// Position of `id` in an id-ordered body slice
pub fn find_index(bodies: &[Body], id: BodyId) -> Option<usize> {
    bodies.binary_search_by_key(&id, Body::id).ok()
}

/// Borrow two distinct bodies mutably
pub fn pair_mut(bodies: &mut [Body], a: BodyId, b: BodyId) -> Option<(&mut Body, &mut Body)> {
    let ia = find_index(bodies, a)?;
    let ib = find_index(bodies, b)?;
    if ia == ib {
        return None;
    }
    if ia < ib {
        let (lo, hi) = bodies.split_at_mut(ib);
        Some((&mut lo[ia], &mut hi[0]))
    } else {
        let (lo, hi) = bodies.split_at_mut(ia);
        Some((&mut hi[0], &mut lo[ib]))
    }
}

/// How a pair of bodies reacts once they touch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionResponse {
    /// Both bodies are marked removed
    Destructive,
    /// Impulse exchange along the contact normal. 0 sticks, 1 is fully elastic.
    Physics { elasticity: f64 },
}

/// Exchange momentum along `axis` (unit, pointing from `a` toward `b`)
///
/// Does nothing when the bodies are already separating along the axis.
pub fn apply_impulse_response(a: &mut Body, b: &mut Body, axis: DVec2, elasticity: f64) {
    let closing = b.velocity().dot(axis) - a.velocity().dot(axis);
    if closing >= 0.0 {
        return;
    }
    let reduced_mass = a.mass() * b.mass() / (a.mass() + b.mass());
    let j = reduced_mass * (1.0 + elasticity) * closing;
    a.add_impulse(axis * j);
    b.add_impulse(axis * -j);
}

/// Pull `body` down while its centroid is above `floor`; land it otherwise
///
/// Landing only happens while the body is not moving up: vertical velocity
/// becomes exactly zero and both accumulators are cleared.
pub fn apply_gravity(body: &mut Body, gravity: f64, floor: f64) {
    if body.centroid().y > floor {
        body.add_force(DVec2::new(0.0, -gravity * body.mass()));
    } else if body.velocity().y <= 0.0 {
        body.clear_accumulators();
        let v = body.velocity();
        body.set_velocity(DVec2::new(v.x, 0.0));
    }
}

/// Runs a `CollisionResponse` on the rising edge of contact between two bodies
#[derive(Debug, Clone)]
pub struct CollisionForce {
    response: CollisionResponse,
    colliding: bool,
}

impl CollisionForce {
    pub fn new(response: CollisionResponse) -> Self {
        Self {
            response,
            colliding: false,
        }
    }
}

impl ForceGenerator for CollisionForce {
    fn apply(&mut self, bodies: &mut [Body], targets: &[BodyId]) {
        let [a, b] = targets else {
            return;
        };
        let Some((a, b)) = pair_mut(bodies, *a, *b) else {
            return;
        };

        let info = find_collision(a.polygon(), b.polygon());
        if info.collided && !self.colliding {
            match self.response {
                CollisionResponse::Destructive => {
                    a.mark_removed();
                    b.mark_removed();
                }
                CollisionResponse::Physics { elasticity } => {
                    apply_impulse_response(a, b, info.axis, elasticity);
                }
            }
        }
        self.colliding = info.collided;
    }
}

/// Constant downward acceleration toward a floor for every bound body
#[derive(Debug, Clone, Copy)]
pub struct Gravity {
    pub acceleration: f64,
    pub floor: f64,
}

impl ForceGenerator for Gravity {
    fn apply(&mut self, bodies: &mut [Body], targets: &[BodyId]) {
        for &id in targets {
            if let Some(i) = find_index(bodies, id) {
                apply_gravity(&mut bodies[i], self.acceleration, self.floor);
            }
        }
    }
}
