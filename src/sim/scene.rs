//! Scene: body ownership and the physics step
//!
//! Bodies are kept in insertion order, which is also id order, so positional
//! access stays stable for the lifetime of the scene as long as earlier bodies
//! are never removed. Removal is deferred: `mark_removed` flags, `tick` sweeps.

use std::fmt;
use std::ops::{Index, IndexMut};

use super::body::{Body, BodyId};
use super::forces::{CollisionForce, CollisionResponse, ForceGenerator, find_index};

/// A generator tied to the bodies it acts on
struct Binding {
    generator: Box<dyn ForceGenerator>,
    targets: Vec<BodyId>,
}

/// Owner of all bodies and force bindings
pub struct Scene {
    bodies: Vec<Body>,
    bindings: Vec<Binding>,
    next_id: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("bodies", &self.bodies)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            bindings: Vec::new(),
            next_id: 0,
        }
    }

    /// Take ownership of `body` and return its handle
    pub fn add_body(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.set_id(id);
        self.bodies.push(body);
        id
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// All bodies, removed-but-not-swept ones included
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Positional access in insertion order
    pub fn body_at(&self, index: usize) -> &Body {
        &self.bodies[index]
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        find_index(&self.bodies, id).map(|i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        find_index(&self.bodies, id).map(|i| &mut self.bodies[i])
    }

    pub fn contains(&self, id: BodyId) -> bool {
        find_index(&self.bodies, id).is_some()
    }

    /// Flag a body for the next sweep. Unknown ids are ignored.
    pub fn mark_removed(&mut self, id: BodyId) {
        if let Some(body) = self.get_mut(id) {
            body.mark_removed();
        }
    }

    /// Bind a generator to `targets`; it runs every step until one of them is swept
    pub fn add_force(&mut self, generator: impl ForceGenerator + 'static, targets: Vec<BodyId>) {
        self.bindings.push(Binding {
            generator: Box::new(generator),
            targets,
        });
    }

    /// Bind a rising-edge collision response between two bodies
    pub fn add_collision(&mut self, a: BodyId, b: BodyId, response: CollisionResponse) {
        self.add_force(CollisionForce::new(response), vec![a, b]);
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Advance physics by `dt`
    ///
    /// Order: run generators, sweep removed bodies together with every
    /// binding that references one, then integrate what is left.
    pub fn tick(&mut self, dt: f64) {
        for binding in &mut self.bindings {
            binding.generator.apply(&mut self.bodies, &binding.targets);
        }

        self.sweep();

        for body in &mut self.bodies {
            body.tick(dt);
        }
    }

    fn sweep(&mut self) {
        if !self.bodies.iter().any(Body::is_removed) {
            return;
        }

        let before = (self.bodies.len(), self.bindings.len());
        let bodies = &self.bodies;
        self.bindings.retain(|binding| {
            binding
                .targets
                .iter()
                .all(|&id| find_index(bodies, id).is_some_and(|i| !bodies[i].is_removed()))
        });
        self.bodies.retain(|body| !body.is_removed());

        log::debug!(
            "swept {} bodies and {} bindings",
            before.0 - self.bodies.len(),
            before.1 - self.bindings.len()
        );
    }
}

impl Index<BodyId> for Scene {
    type Output = Body;

    fn index(&self, id: BodyId) -> &Body {
        match self.get(id) {
            Some(body) => body,
            None => panic!("body {} is not in the scene", id.0),
        }
    }
}

impl IndexMut<BodyId> for Scene {
    fn index_mut(&mut self, id: BodyId) -> &mut Body {
        match self.get_mut(id) {
            Some(body) => body,
            None => panic!("body {} is not in the scene", id.0),
        }
    }
}
