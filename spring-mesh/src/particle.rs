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
//! Point masses
//!
//! A particle is a point mass with position and velocity, advanced by
//! semi-implicit Euler integration. Pinned particles act as fixed anchors:
//! forces are still accumulated against them so that attached springs behave
//! normally, but integration leaves their state untouched.

use crate::math::Vec3;

/// A point mass with position and velocity
///
/// Positions and velocities are mutated only by [`Particle::integrate`],
/// which the solver calls once per sub-step after all forces for that
/// sub-step have been reduced into a single net force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    mass: f64,
    position: Vec3,
    velocity: Vec3,
    pinned: bool,
}

impl Particle {
    /// Create a free particle at `position` with zero initial velocity
    ///
    /// # Panics
    ///
    /// Panics if `mass` is not positive and finite. The mass is used as an
    /// unchecked divisor during integration, so invalid values must never
    /// reach a constructed particle. For fallible validation use
    /// [`World::new`](crate::World::new), which rejects bad topologies with
    /// a typed error instead.
    pub fn new(position: Vec3, mass: f64) -> Self {
        assert!(
            mass > 0.0 && mass.is_finite(),
            "Particle mass must be positive and finite"
        );
        Particle {
            mass,
            position,
            velocity: Vec3::zero(),
            pinned: false,
        }
    }

    /// Create a pinned particle, an immovable anchor
    ///
    /// # Panics
    ///
    /// Panics if `mass` is not positive and finite. Pinned particles keep a
    /// real mass because springs and global fields still read it.
    pub fn pinned(position: Vec3, mass: f64) -> Self {
        let mut particle = Particle::new(position, mass);
        particle.pinned = true;
        particle
    }

    /// The particle's mass in kilograms
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Whether this particle is excluded from integration
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Force contribution of the global fields on this particle
    ///
    /// Gravity scales with mass; air drag opposes the current velocity.
    pub fn body_force(&self, gravity: Vec3, air_drag: f64) -> Vec3 {
        gravity.scale(self.mass) + self.velocity.scale(-air_drag)
    }

    /// Advance velocity and position by one sub-step of semi-implicit Euler
    ///
    /// The velocity is updated first and the position update uses the new
    /// velocity. This ordering is what keeps stiff springs stable and must
    /// not be swapped for explicit Euler.
    ///
    /// Pinned particles return immediately: the net force is discarded and
    /// neither velocity nor position changes.
    pub fn integrate(&mut self, net_force: Vec3, dt: f64) {
        if self.pinned {
            return;
        }
        self.velocity += net_force.scale(1.0 / self.mass).scale(dt);
        self.position += self.velocity.scale(dt);
    }
}
