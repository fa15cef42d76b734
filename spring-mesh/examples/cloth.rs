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
//! A hanging cloth
//!
//! A 50 by 50 lattice of particles with row and column springs, pinned
//! along its top edge. Demonstrates that the solver scales past toy sizes:
//! 2,500 particles and 4,900 springs per sub-step.

use spring_mesh::{Topology, Vec3, World};

const N: usize = 50;
const FPS: f64 = 60.0;
const SUB_STEPS: usize = 10;

fn main() {
    env_logger::init();

    let mut topo = Topology::grid(N, N, Vec3::new(3.0, 1.0, 0.0), 0.05, 0.05, 10_000.0, 0.2)
        .with_gravity(Vec3::new(0.0, 9.81, 0.0))
        .with_air_drag(0.02);
    for x in 0..N {
        topo.pin(x);
    }

    let mut world = World::new(topo).expect("valid grid topology");
    println!(
        "cloth: {} particles, {} springs",
        world.particle_count(),
        world.spring_count()
    );

    for frame in 0..60 {
        world
            .step(1.0 / FPS, SUB_STEPS, None)
            .expect("step on valid world");

        if frame % 20 == 19 {
            let positions = world.positions();
            let corner = positions[N * N - 1];
            println!(
                "t = {:.1}s  bottom corner = ({:.3}, {:.3}, {:.3})",
                (frame + 1) as f64 / FPS,
                corner.x,
                corner.y,
                corner.z
            );
        }
    }
}
