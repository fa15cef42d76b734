// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Mesh topology descriptions
//!
//! A [`Topology`] is the caller-facing description a [`World`](crate::World)
//! is built from: particle initial states, spring connectivity, and the
//! global fields. It carries no solver state and performs no validation of
//! its own; validation happens once, when the world is constructed.
//!
//! The [`chain`](Topology::chain) and [`grid`](Topology::grid) builders
//! cover the two mesh shapes used by the demos and tests: a rope of
//! consecutive particles and a rectangular cloth lattice.

use crate::math::Vec3;

/// Initial state of one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    /// Initial position
    pub position: Vec3,
    /// Mass in kilograms, must be positive and finite
    pub mass: f64,
    /// Whether the particle is an immovable anchor
    pub pinned: bool,
}

/// Connectivity and coefficients of one spring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Index of the first endpoint
    pub a: usize,
    /// Index of the second endpoint
    pub b: usize,
    /// Spring constant, must be positive and finite
    pub stiffness: f64,
    /// Rest length, must be non-negative and finite
    pub rest_length: f64,
    /// Damping coefficient, must be non-negative and finite
    pub damping: f64,
}

/// A complete world description
///
/// Fields are public so callers can tweak a built topology before handing
/// it to [`World::new`](crate::World::new); nothing here is interpreted
/// until then.
///
/// # Examples
///
/// ```
/// use spring_mesh::{Topology, Vec3};
///
/// let mut topo = Topology::chain(3, Vec3::zero(), 0.05, 0.05, 10_000.0, 0.2)
///     .with_gravity(Vec3::new(0.0, 9.81, 0.0))
///     .with_air_drag(0.02);
/// topo.pin(0);
/// assert_eq!(topo.particles.len(), 3);
/// assert_eq!(topo.springs.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    /// Particle initial states
    pub particles: Vec<ParticleSpec>,
    /// Spring connectivity
    pub springs: Vec<SpringSpec>,
    /// Uniform gravitational field applied to every particle
    pub gravity: Vec3,
    /// Air drag coefficient opposing velocity, must be non-negative
    pub air_drag: f64,
}

impl Topology {
    /// An empty topology with no fields applied
    pub fn new() -> Self {
        Topology {
            particles: Vec::new(),
            springs: Vec::new(),
            gravity: Vec3::zero(),
            air_drag: 0.0,
        }
    }

    /// Set the gravitational field
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the air drag coefficient
    pub fn with_air_drag(mut self, air_drag: f64) -> Self {
        self.air_drag = air_drag;
        self
    }

    /// Append a free particle, returning its arena index
    pub fn add_particle(&mut self, position: Vec3, mass: f64) -> usize {
        self.particles.push(ParticleSpec {
            position,
            mass,
            pinned: false,
        });
        self.particles.len() - 1
    }

    /// Mark an existing particle as pinned
    ///
    /// # Panics
    ///
    /// Panics if `index` does not name an existing particle.
    pub fn pin(&mut self, index: usize) {
        self.particles[index].pinned = true;
    }

    /// Connect two particles with a spring
    pub fn connect(&mut self, a: usize, b: usize, stiffness: f64, rest_length: f64, damping: f64) {
        self.springs.push(SpringSpec {
            a,
            b,
            stiffness,
            rest_length,
            damping,
        });
    }

    /// A rope: `n` particles spaced along +x, consecutive pairs connected
    ///
    /// Every spring's rest length equals `spacing`, so the chain starts in
    /// equilibrium with respect to its elastic forces.
    pub fn chain(
        n: usize,
        origin: Vec3,
        spacing: f64,
        mass: f64,
        stiffness: f64,
        damping: f64,
    ) -> Self {
        let mut topo = Topology::new();
        for i in 0..n {
            let position = origin + Vec3::new(i as f64 * spacing, 0.0, 0.0);
            topo.add_particle(position, mass);
        }
        for i in 1..n {
            topo.connect(i - 1, i, stiffness, spacing, damping);
        }
        topo
    }

    /// A cloth lattice: `nx` by `ny` particles with row and column springs
    ///
    /// Particles are laid out row-major in the x/y plane; each particle is
    /// connected to its left and upper neighbor. Diagonal shear springs are
    /// not generated.
    pub fn grid(
        nx: usize,
        ny: usize,
        origin: Vec3,
        spacing: f64,
        mass: f64,
        stiffness: f64,
        damping: f64,
    ) -> Self {
        let mut topo = Topology::new();
        for y in 0..ny {
            for x in 0..nx {
                let position =
                    origin + Vec3::new(x as f64 * spacing, y as f64 * spacing, 0.0);
                topo.add_particle(position, mass);
            }
        }
        for y in 0..ny {
            for x in 1..nx {
                topo.connect(y * nx + (x - 1), y * nx + x, stiffness, spacing, damping);
            }
        }
        for y in 1..ny {
            for x in 0..nx {
                topo.connect((y - 1) * nx + x, y * nx + x, stiffness, spacing, damping);
            }
        }
        topo
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_particle_returns_indices_in_order() {
        let mut topo = Topology::new();
        assert_eq!(topo.add_particle(Vec3::zero(), 1.0), 0);
        assert_eq!(topo.add_particle(Vec3::new(1.0, 0.0, 0.0), 1.0), 1);
    }

    #[test]
    fn test_chain_layout() {
        let topo = Topology::chain(4, Vec3::new(3.0, 1.0, 0.0), 0.05, 0.05, 10_000.0, 0.2);
        assert_eq!(topo.particles.len(), 4);
        assert_eq!(topo.springs.len(), 3);

        let p = topo.particles[2].position;
        assert!((p.x - 3.1).abs() < 1e-12);
        assert_eq!(p.y, 1.0);

        for spring in &topo.springs {
            assert_eq!(spring.b, spring.a + 1);
            assert_eq!(spring.rest_length, 0.05);
        }
    }

    #[test]
    fn test_chain_of_one_has_no_springs() {
        let topo = Topology::chain(1, Vec3::zero(), 0.05, 0.05, 10_000.0, 0.2);
        assert_eq!(topo.particles.len(), 1);
        assert!(topo.springs.is_empty());
    }

    #[test]
    fn test_grid_spring_count() {
        // nx*(nx-1) horizontal per row plus the same vertically.
        let topo = Topology::grid(3, 4, Vec3::zero(), 0.05, 0.05, 10_000.0, 0.2);
        assert_eq!(topo.particles.len(), 12);
        assert_eq!(topo.springs.len(), 4 * 2 + 3 * 3);
    }

    #[test]
    fn test_grid_row_major_layout() {
        let topo = Topology::grid(3, 2, Vec3::zero(), 1.0, 0.05, 10_000.0, 0.2);
        let p = topo.particles[4].position; // x = 1, y = 1
        assert_eq!(p, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_pin_marks_particle() {
        let mut topo = Topology::chain(3, Vec3::zero(), 0.05, 0.05, 10_000.0, 0.2);
        topo.pin(0);
        assert!(topo.particles[0].pinned);
        assert!(!topo.particles[1].pinned);
    }

    #[test]
    fn test_with_fields() {
        let topo = Topology::new()
            .with_gravity(Vec3::new(0.0, 9.81, 0.0))
            .with_air_drag(0.02);
        assert_eq!(topo.gravity, Vec3::new(0.0, 9.81, 0.0));
        assert_eq!(topo.air_drag, 0.02);
    }
}
