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
//! Integration tests for the solver's physical guarantees

use spring_mesh::solver::chunk_range;
use spring_mesh::{Topology, Vec3, World};

#[test]
fn test_spring_impulses_cancel_for_equal_masses() {
    // A stretched pair with no global fields: the spring applies exact
    // negations to its endpoints, so with equal masses the velocities stay
    // exact negations of each other, bit for bit, tick after tick.
    let mut topo = Topology::new();
    topo.add_particle(Vec3::zero(), 0.5);
    topo.add_particle(Vec3::new(2.0, 0.0, 0.0), 0.5);
    topo.connect(0, 1, 50.0, 1.0, 0.1);

    let mut world = World::new(topo).unwrap();
    world.step(0.5, 100, Some(2)).unwrap();

    let a = world.particles()[0];
    let b = world.particles()[1];
    assert_eq!(a.velocity(), -b.velocity());
    assert!(a.velocity().length() > 0.0);

    // Positions accumulate rounding independently, so symmetry about the
    // midpoint is only approximate.
    let mid = (a.position().x + b.position().x) / 2.0;
    assert!((mid - 1.0).abs() < 1e-9);
}

#[test]
fn test_rest_length_equilibrium_is_stationary() {
    // Spacing of 1.0 makes the length computation exact, so the elastic
    // term is exactly zero and nothing ever moves.
    let topo = Topology::chain(5, Vec3::zero(), 1.0, 0.1, 10_000.0, 0.2);
    let mut world = World::new(topo).unwrap();
    let before = world.positions();

    world.step(1.0 / 60.0, 50, Some(4)).unwrap();

    assert_eq!(world.positions(), before);
    for particle in world.particles() {
        assert_eq!(particle.velocity(), Vec3::zero());
    }
}

#[test]
fn test_pinned_particle_never_moves() {
    let mut topo = Topology::chain(4, Vec3::new(3.0, 1.0, 0.0), 0.05, 0.05, 10_000.0, 0.2)
        .with_gravity(Vec3::new(0.0, 9.81, 0.0))
        .with_air_drag(0.02);
    topo.pin(0);

    let mut world = World::new(topo).unwrap();
    for _ in 0..20 {
        world.step(1.0 / 60.0, 10, Some(3)).unwrap();
    }

    let anchor = world.particles()[0];
    assert_eq!(anchor.position(), Vec3::new(3.0, 1.0, 0.0));
    assert_eq!(anchor.velocity(), Vec3::zero());

    // The rest of the chain has sagged away from the anchor.
    assert!(world.particles()[3].position().y > 1.0);
}

#[test]
fn test_partition_is_total_and_disjoint() {
    for items in [0usize, 1, 5, 64, 1000, 1001] {
        for workers in [1usize, 2, 7, 16, 64] {
            let mut owner = vec![None; items];
            for worker in 0..workers {
                for index in chunk_range(items, workers, worker) {
                    assert!(owner[index].is_none(), "index {index} owned twice");
                    owner[index] = Some(worker);
                }
            }
            assert!(
                owner.iter().all(|o| o.is_some()),
                "gap in partition for items={items} workers={workers}"
            );
        }
    }
}

#[test]
fn test_hanging_chain_scenario() {
    // Three 50 g particles chained by stiff damped springs, anchored at the
    // first, pulled by gravity along +y, with light air drag. Ten sub-steps
    // of 1/600 s must leave the anchor in place and the free particles
    // displaced toward +y with non-zero velocity.
    let mut topo = Topology::chain(3, Vec3::new(3.0, 1.0, 0.0), 0.05, 0.05, 10_000.0, 0.2)
        .with_gravity(Vec3::new(0.0, 9.81, 0.0))
        .with_air_drag(0.02);
    topo.pin(0);

    let mut world = World::new(topo).unwrap();
    world.step(10.0 / 600.0, 10, Some(2)).unwrap();

    let anchor = world.particles()[0];
    assert_eq!(anchor.position(), Vec3::new(3.0, 1.0, 0.0));
    assert_eq!(anchor.velocity(), Vec3::zero());

    for particle in &world.particles()[1..] {
        assert!(particle.position().y > 1.0, "free particle did not sag");
        assert!(particle.velocity().length() > 0.0);
    }
}

#[test]
fn test_drag_limits_free_fall_speed() {
    let gravity = Vec3::new(0.0, 9.81, 0.0);

    let mut free_topo = Topology::new().with_gravity(gravity);
    free_topo.add_particle(Vec3::zero(), 1.0);
    let mut damped_topo = Topology::new().with_gravity(gravity).with_air_drag(0.5);
    damped_topo.add_particle(Vec3::zero(), 1.0);

    let mut free = World::new(free_topo).unwrap();
    let mut damped = World::new(damped_topo).unwrap();
    for _ in 0..120 {
        free.step(1.0 / 60.0, 4, Some(1)).unwrap();
        damped.step(1.0 / 60.0, 4, Some(1)).unwrap();
    }

    let free_speed = free.particles()[0].velocity().length();
    let damped_speed = damped.particles()[0].velocity().length();
    assert!(damped_speed < free_speed);
    assert!(damped_speed > 0.0);
}
