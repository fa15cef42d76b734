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
//! A hanging rope
//!
//! 100 particles chained by stiff damped springs, anchored at the first
//! particle and left to sag under gravity. Runs two simulated seconds at
//! 60 FPS with 10 sub-steps per frame and prints where the rope ends up.
//! Rendering is someone else's job; this demo only reads positions.

use spring_mesh::{Topology, Vec3, World};

const FPS: f64 = 60.0;
const SUB_STEPS: usize = 10;

fn main() {
    env_logger::init();

    let mut topo = Topology::chain(100, Vec3::new(3.0, 1.0, 0.0), 0.05, 0.05, 10_000.0, 0.2)
        .with_gravity(Vec3::new(0.0, 9.81, 0.0))
        .with_air_drag(0.02);
    topo.pin(0);

    let mut world = World::new(topo).expect("valid chain topology");
    println!(
        "rope: {} particles, {} springs",
        world.particle_count(),
        world.spring_count()
    );

    for frame in 0..120 {
        world
            .step(1.0 / FPS, SUB_STEPS, None)
            .expect("step on valid world");

        if frame % 30 == 29 {
            let positions = world.positions();
            let tip = positions[positions.len() - 1];
            println!(
                "t = {:.1}s  anchor = ({:.3}, {:.3})  tip = ({:.3}, {:.3})",
                (frame + 1) as f64 / FPS,
                positions[0].x,
                positions[0].y,
                tip.x,
                tip.y
            );
        }
    }
}
