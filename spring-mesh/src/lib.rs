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
//! # Spring Mesh
//!
//! A solver for meshes of point masses connected by damped springs,
//! stepped in parallel across a bounded worker pool with two barrier-
//! synchronized phases per sub-step.
//!
//! ## Features
//!
//! - **Damped Hookean springs**: pairwise elastic plus damping forces with
//!   exact action/reaction pairing
//! - **Semi-implicit Euler**: velocity-first integration that stays stable
//!   for stiff springs when combined with sub-stepping
//! - **Lock-free force accumulation**: one accumulator lane per worker, so
//!   concurrent spring evaluation never contends on a particle
//! - **Deterministic partitioning**: reproducible chunk assignment, with a
//!   sequential fallback that produces identical results
//! - **Parallelization**: optional Rayon integration behind the `parallel`
//!   feature (enabled by default)
//!
//! ## Example
//!
//! ```rust
//! use spring_mesh::{Topology, Vec3, World};
//!
//! // A short rope under gravity, anchored at one end.
//! let mut topo = Topology::chain(10, Vec3::new(3.0, 1.0, 0.0), 0.05, 0.05, 10_000.0, 0.2)
//!     .with_gravity(Vec3::new(0.0, 9.81, 0.0))
//!     .with_air_drag(0.02);
//! topo.pin(0);
//!
//! let mut world = World::new(topo).unwrap();
//!
//! // One 60 FPS frame, split into 10 sub-steps for stability.
//! world.step(1.0 / 60.0, 10, None).unwrap();
//!
//! let positions = world.positions();
//! assert_eq!(positions[0], Vec3::new(3.0, 1.0, 0.0)); // anchor unmoved
//! ```

#![warn(missing_docs)]

/// 3-component vector math
pub mod math;

/// Point masses with semi-implicit Euler integration
pub mod particle;

/// Damped Hookean springs
pub mod spring;

/// Mesh topology descriptions and builders
pub mod topology;

/// World construction and stepping
pub mod world;

/// Two-phase parallel solve step
pub mod solver;

/// Contract-violation errors
pub mod error;

pub use error::WorldError;
pub use math::Vec3;
pub use particle::Particle;
pub use solver::{resolve_workers, MAX_WORKERS};
pub use spring::Spring;
pub use topology::{ParticleSpec, SpringSpec, Topology};
pub use world::World;
