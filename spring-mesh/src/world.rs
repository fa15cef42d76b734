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
//! World construction and stepping
//!
//! The world owns the particle arena and the spring collection and is the
//! single entry point for advancing the simulation. All contract checking
//! happens here, once, when a [`Topology`] is turned into a `World`; the
//! per-step hot path runs against validated state and re-checks nothing.

use crate::error::WorldError;
use crate::math::Vec3;
use crate::particle::Particle;
use crate::solver::{self, ForceSlots};
use crate::spring::Spring;
use crate::topology::Topology;

/// The simulation state: particles, springs, and global fields
///
/// Collections are structurally frozen while a step is in flight; a world
/// is only ever mutated through [`World::step`], and reads are only valid
/// between steps.
///
/// # Examples
///
/// ```
/// use spring_mesh::{Topology, Vec3, World};
///
/// let mut topo = Topology::chain(3, Vec3::zero(), 0.05, 0.05, 10_000.0, 0.2)
///     .with_gravity(Vec3::new(0.0, 9.81, 0.0))
///     .with_air_drag(0.02);
/// topo.pin(0);
///
/// let mut world = World::new(topo).unwrap();
/// world.step(1.0 / 60.0, 10, Some(4)).unwrap();
///
/// let positions = world.positions();
/// assert_eq!(positions.len(), 3);
/// ```
#[derive(Debug)]
pub struct World {
    particles: Vec<Particle>,
    springs: Vec<Spring>,
    gravity: Vec3,
    air_drag: f64,
    slots: ForceSlots,
}

impl World {
    /// Build a world from a topology, validating every contract
    ///
    /// Fails closed on the first violation: non-positive or non-finite
    /// masses, spring endpoints out of range or self-referential, bad
    /// spring coefficients, or a negative drag coefficient. A world that
    /// constructs successfully never re-validates during stepping.
    pub fn new(topology: Topology) -> Result<World, WorldError> {
        if !(topology.air_drag >= 0.0 && topology.air_drag.is_finite()) {
            return Err(WorldError::InvalidAirDrag {
                air_drag: topology.air_drag,
            });
        }

        let mut particles = Vec::with_capacity(topology.particles.len());
        for (index, spec) in topology.particles.iter().enumerate() {
            if !(spec.mass > 0.0 && spec.mass.is_finite()) {
                return Err(WorldError::InvalidMass {
                    index,
                    mass: spec.mass,
                });
            }
            particles.push(if spec.pinned {
                Particle::pinned(spec.position, spec.mass)
            } else {
                Particle::new(spec.position, spec.mass)
            });
        }

        let mut springs = Vec::with_capacity(topology.springs.len());
        for (index, spec) in topology.springs.iter().enumerate() {
            for endpoint in [spec.a, spec.b] {
                if endpoint >= particles.len() {
                    return Err(WorldError::EndpointOutOfRange {
                        index,
                        endpoint,
                        particle_count: particles.len(),
                    });
                }
            }
            if spec.a == spec.b {
                return Err(WorldError::SelfReferentialSpring {
                    index,
                    endpoint: spec.a,
                });
            }
            if !(spec.stiffness > 0.0 && spec.stiffness.is_finite()) {
                return Err(WorldError::InvalidStiffness {
                    index,
                    stiffness: spec.stiffness,
                });
            }
            if !(spec.rest_length >= 0.0 && spec.rest_length.is_finite()) {
                return Err(WorldError::InvalidRestLength {
                    index,
                    rest_length: spec.rest_length,
                });
            }
            if !(spec.damping >= 0.0 && spec.damping.is_finite()) {
                return Err(WorldError::InvalidDamping {
                    index,
                    damping: spec.damping,
                });
            }
            springs.push(Spring::new(
                spec.a,
                spec.b,
                spec.stiffness,
                spec.rest_length,
                spec.damping,
            ));
        }

        log::debug!(
            "built world: {} particles, {} springs",
            particles.len(),
            springs.len()
        );

        Ok(World {
            particles,
            springs,
            gravity: topology.gravity,
            air_drag: topology.air_drag,
            slots: ForceSlots::new(),
        })
    }

    /// Advance the simulation by `dt` seconds in `sub_steps` equal ticks
    ///
    /// Blocks until every tick has completed; there is no cancellation and
    /// no partial result. `workers` requests a pool size (`None` selects
    /// the hardware parallelism); the effective size is capped at
    /// [`MAX_WORKERS`](crate::MAX_WORKERS). Fails only on a contract
    /// violation at the call boundary and leaves the world untouched in
    /// that case.
    pub fn step(
        &mut self,
        dt: f64,
        sub_steps: usize,
        workers: Option<usize>,
    ) -> Result<(), WorldError> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(WorldError::InvalidTimestep { dt });
        }
        if sub_steps == 0 {
            return Err(WorldError::ZeroSubSteps);
        }
        if workers == Some(0) {
            return Err(WorldError::ZeroWorkers);
        }

        let workers = solver::resolve_workers(workers);
        let sub_dt = dt / sub_steps as f64;
        self.slots.ensure(workers, self.particles.len());

        log::trace!(
            "step: {sub_steps} sub-steps of {sub_dt}s across {workers} workers"
        );

        for _ in 0..sub_steps {
            solver::step_once(
                &mut self.particles,
                &self.springs,
                self.gravity,
                self.air_drag,
                &mut self.slots,
                workers,
                sub_dt,
            );
        }
        Ok(())
    }

    /// Snapshot of every particle position, in arena order
    ///
    /// Only meaningful between [`World::step`] calls; the borrow checker
    /// already prevents reading while a step is in flight.
    pub fn positions(&self) -> Vec<Vec3> {
        self.particles.iter().map(|p| p.position()).collect()
    }

    /// Read-only access to the particle arena
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Read-only access to the spring collection
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Number of particles in the arena
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Number of springs in the mesh
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// The uniform gravitational field
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// The air drag coefficient
    pub fn air_drag(&self) -> f64 {
        self.air_drag
    }
}
