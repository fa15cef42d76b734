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
//! Two-phase parallel solve step
//!
//! Each sub-step runs two internally data-parallel phases separated by a
//! barrier:
//!
//! 1. **Spring phase**: springs are partitioned into contiguous chunks, one
//!    per worker. Each worker evaluates its chunk sequentially and writes
//!    endpoint forces into its own accumulator lane.
//! 2. **Integration phase**: particles are partitioned the same way. Each
//!    worker adds the global field forces into its own lane, reduces every
//!    lane's cell for the particle into a net force (zeroing the cells),
//!    and integrates.
//!
//! Workers never write outside their own lane during the spring phase and
//! never touch another worker's particle range during integration, so no
//! locking is needed anywhere. Phase order is strict: integration reads
//! lanes only after every spring worker has been joined.
//!
//! The chunk partition is a pure function of `(items, workers)`, so a run
//! is reproducible: with a fixed worker count, results are bit-identical
//! across runs and across the parallel and sequential execution paths.

use crate::math::Vec3;
use crate::particle::Particle;
use crate::spring::Spring;

use std::num::NonZeroUsize;
use std::ops::Range;

/// Hard ceiling on the worker pool size
///
/// Requests beyond this are clamped; each worker costs one accumulator lane
/// per particle, so an oversized pool wastes memory and reduction work long
/// before it wins any parallelism.
pub const MAX_WORKERS: usize = 64;

/// Resolve a requested worker count to the effective pool size
///
/// `None` selects the available hardware parallelism. The result is always
/// in `1..=MAX_WORKERS`.
pub fn resolve_workers(requested: Option<usize>) -> usize {
    let requested = requested.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    });
    requested.clamp(1, MAX_WORKERS)
}

/// Chunk size for splitting `items` across `workers`, `ceil(items / workers)`
///
/// Never returns zero, so it can be fed to the slice chunking methods even
/// for an empty collection.
///
/// # Panics
///
/// Panics if `workers` is zero.
pub fn chunk_len(items: usize, workers: usize) -> usize {
    assert!(workers > 0, "worker count must be at least 1");
    ((items + workers - 1) / workers).max(1)
}

/// The index range owned by `worker` when `items` are split across `workers`
///
/// Ranges of successive workers are contiguous and disjoint and their union
/// is exactly `0..items`; workers past the end own an empty range.
///
/// # Panics
///
/// Panics if `workers` is zero.
pub fn chunk_range(items: usize, workers: usize, worker: usize) -> Range<usize> {
    let chunk = chunk_len(items, workers);
    let start = (worker * chunk).min(items);
    let end = (start + chunk).min(items);
    start..end
}

/// Per-worker force accumulator lanes
///
/// One lane per worker, one `Vec3` cell per particle. Cell `(w, p)` is
/// written only by worker `w`, which makes concurrent spring evaluation
/// race-free without locks: two workers touching the same particle write
/// to different lanes. Cells are zeroed as part of the reduction, so lanes
/// are all-zero whenever no step is in flight.
#[derive(Debug, Default)]
pub(crate) struct ForceSlots {
    lanes: Vec<Vec<Vec3>>,
}

impl ForceSlots {
    pub(crate) fn new() -> Self {
        ForceSlots { lanes: Vec::new() }
    }

    /// Resize to `workers` lanes of `particle_count` cells each
    ///
    /// Only called between steps; new cells start at zero.
    pub(crate) fn ensure(&mut self, workers: usize, particle_count: usize) {
        self.lanes.truncate(workers);
        while self.lanes.len() < workers {
            self.lanes.push(vec![Vec3::zero(); particle_count]);
        }
        for lane in &mut self.lanes {
            lane.resize(particle_count, Vec3::zero());
        }
    }

    pub(crate) fn lanes_mut(&mut self) -> &mut [Vec<Vec3>] {
        &mut self.lanes
    }
}

/// Run one solve sub-step: spring phase, barrier, integration phase, barrier
///
/// `slots` must already be sized to `workers` lanes of `particles.len()`
/// cells. On return all lanes are zero again and every free particle has
/// been advanced by `dt`.
pub(crate) fn step_once(
    particles: &mut [Particle],
    springs: &[Spring],
    gravity: Vec3,
    air_drag: f64,
    slots: &mut ForceSlots,
    workers: usize,
    dt: f64,
) {
    let lanes = slots.lanes_mut();
    debug_assert_eq!(lanes.len(), workers);

    // Spring phase: worker i evaluates spring chunk i against lane i.
    // Particle state is shared read-only here.
    {
        let shared: &[Particle] = &*particles;
        let chunk = chunk_len(springs.len(), workers);

        #[cfg(feature = "parallel")]
        rayon::scope(|s| {
            for (lane, springs_chunk) in lanes.iter_mut().zip(springs.chunks(chunk)) {
                s.spawn(move |_| {
                    for spring in springs_chunk {
                        spring.solve(shared, lane);
                    }
                });
            }
        });

        #[cfg(not(feature = "parallel"))]
        for (lane, springs_chunk) in lanes.iter_mut().zip(springs.chunks(chunk)) {
            for spring in springs_chunk {
                spring.solve(shared, lane);
            }
        }
    }
    // Joining the scope is the barrier: no integration below starts until
    // every spring worker has finished writing.

    // Integration phase: worker i owns particle chunk i. Each lane is split
    // at the same chunk boundaries so a worker holds the cells of all lanes
    // for exactly its own particles.
    {
        let chunk = chunk_len(particles.len(), workers);
        let mut per_worker: Vec<Vec<&mut [Vec3]>> =
            (0..workers).map(|_| Vec::with_capacity(workers)).collect();
        for lane in lanes.iter_mut() {
            for (worker, cells) in lane.chunks_mut(chunk).enumerate() {
                per_worker[worker].push(cells);
            }
        }

        #[cfg(feature = "parallel")]
        rayon::scope(|s| {
            for (worker, (bodies, mut cells_by_lane)) in particles
                .chunks_mut(chunk)
                .zip(per_worker.into_iter())
                .enumerate()
            {
                s.spawn(move |_| {
                    integrate_chunk(worker, bodies, &mut cells_by_lane, gravity, air_drag, dt);
                });
            }
        });

        #[cfg(not(feature = "parallel"))]
        for (worker, (bodies, mut cells_by_lane)) in particles
            .chunks_mut(chunk)
            .zip(per_worker.into_iter())
            .enumerate()
        {
            integrate_chunk(worker, bodies, &mut cells_by_lane, gravity, air_drag, dt);
        }
    }
}

/// Integrate one worker's particle chunk
///
/// `cells_by_lane[w][k]` is lane `w`'s accumulator for the chunk's `k`-th
/// particle. The worker first adds the global field forces into its own
/// lane, then folds all lanes into the net force, zeroing each cell exactly
/// once. Reduction and reset run for pinned particles too; only the final
/// integration is skipped for them, inside [`Particle::integrate`].
fn integrate_chunk(
    worker: usize,
    bodies: &mut [Particle],
    cells_by_lane: &mut [&mut [Vec3]],
    gravity: Vec3,
    air_drag: f64,
    dt: f64,
) {
    for (k, particle) in bodies.iter_mut().enumerate() {
        cells_by_lane[worker][k] += particle.body_force(gravity, air_drag);

        let mut net = Vec3::zero();
        for cells in cells_by_lane.iter_mut() {
            net += cells[k];
            cells[k] = Vec3::zero();
        }

        particle.integrate(net, dt);
    }
}
