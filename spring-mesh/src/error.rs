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
//! Contract-violation errors
//!
//! Every error in this crate is a construction-time or call-boundary
//! contract violation. There are no transient or retryable failures: the
//! solver itself is pure computation and either refuses to start or runs a
//! step to completion. Degenerate spring geometry (coincident endpoints) is
//! deliberately not represented here; it is handled silently by the force
//! law.

use std::error::Error;
use std::fmt;

/// A rejected world construction or step invocation
///
/// Returned by [`World::new`](crate::World::new) and
/// [`World::step`](crate::World::step). Construction fails closed: the
/// first violation found aborts the build and no world is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// A particle's mass was zero, negative, or non-finite
    InvalidMass {
        /// Index of the offending particle in the topology
        index: usize,
        /// The rejected mass value
        mass: f64,
    },
    /// A spring referenced a particle index outside the arena
    EndpointOutOfRange {
        /// Index of the offending spring in the topology
        index: usize,
        /// The out-of-range endpoint
        endpoint: usize,
        /// Number of particles in the arena
        particle_count: usize,
    },
    /// A spring referenced the same particle at both ends
    SelfReferentialSpring {
        /// Index of the offending spring in the topology
        index: usize,
        /// The repeated endpoint
        endpoint: usize,
    },
    /// A spring's stiffness was zero, negative, or non-finite
    InvalidStiffness {
        /// Index of the offending spring in the topology
        index: usize,
        /// The rejected stiffness value
        stiffness: f64,
    },
    /// A spring's rest length was negative or non-finite
    InvalidRestLength {
        /// Index of the offending spring in the topology
        index: usize,
        /// The rejected rest length
        rest_length: f64,
    },
    /// A spring's damping coefficient was negative or non-finite
    InvalidDamping {
        /// Index of the offending spring in the topology
        index: usize,
        /// The rejected damping value
        damping: f64,
    },
    /// The world's air drag coefficient was negative or non-finite
    InvalidAirDrag {
        /// The rejected drag value
        air_drag: f64,
    },
    /// A step was requested with an explicit worker count of zero
    ZeroWorkers,
    /// A step was requested with zero sub-steps
    ZeroSubSteps,
    /// A step was requested with a non-positive or non-finite timestep
    InvalidTimestep {
        /// The rejected timestep
        dt: f64,
    },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::InvalidMass { index, mass } => {
                write!(
                    f,
                    "particle {index}: mass {mass} must be positive and finite"
                )
            }
            WorldError::EndpointOutOfRange {
                index,
                endpoint,
                particle_count,
            } => {
                write!(
                    f,
                    "spring {index}: endpoint {endpoint} out of range for {particle_count} particles"
                )
            }
            WorldError::SelfReferentialSpring { index, endpoint } => {
                write!(
                    f,
                    "spring {index}: both endpoints reference particle {endpoint}"
                )
            }
            WorldError::InvalidStiffness { index, stiffness } => {
                write!(
                    f,
                    "spring {index}: stiffness {stiffness} must be positive and finite"
                )
            }
            WorldError::InvalidRestLength { index, rest_length } => {
                write!(
                    f,
                    "spring {index}: rest length {rest_length} must be non-negative and finite"
                )
            }
            WorldError::InvalidDamping { index, damping } => {
                write!(
                    f,
                    "spring {index}: damping {damping} must be non-negative and finite"
                )
            }
            WorldError::InvalidAirDrag { air_drag } => {
                write!(f, "air drag {air_drag} must be non-negative and finite")
            }
            WorldError::ZeroWorkers => write!(f, "worker count must be at least 1"),
            WorldError::ZeroSubSteps => write!(f, "sub-step count must be at least 1"),
            WorldError::InvalidTimestep { dt } => {
                write!(f, "timestep {dt} must be positive and finite")
            }
        }
    }
}

impl Error for WorldError {}
