// Host-side tests for particle field layouts.

use std::collections::HashSet;

use tubefield_core::constants::{GRID_EXTENT, PARTICLE_COUNT};
use tubefield_core::*;

fn radius(p: glam::Vec3) -> f32 {
    (p.x * p.x + p.z * p.z).sqrt()
}

fn key(x: f32, z: f32) -> (i64, i64) {
    ((x * 1e4).round() as i64, (z * 1e4).round() as i64)
}

#[test]
fn grid_starts_flat_and_symmetric() {
    let cases = [
        (16usize, 4.0f32),
        (2_500, 16.0),
        (1, 2.0),
        (49, 7.5),
        (2, 1.0),
        (3, 1.0),
        (10, 3.0),
        (17, 5.0),
        (12_000, 16.0),
        (PARTICLE_COUNT, GRID_EXTENT),
    ];
    for (count, extent) in cases {
        let field = ParticleField::initialize(count, &Layout::Grid { extent }).unwrap();
        assert_eq!(field.len(), count);
        let mut sum_x = 0.0f64;
        let mut sum_z = 0.0f64;
        let mut cells = HashSet::new();
        for p in field.positions() {
            assert_eq!(p.y, 0.0);
            assert!(p.x.abs() <= extent / 2.0 && p.z.abs() <= extent / 2.0);
            sum_x += p.x as f64;
            sum_z += p.z as f64;
            assert!(cells.insert(key(p.x, p.z)), "two particles at ({}, {})", p.x, p.z);
        }
        assert!(sum_x.abs() < 1e-2, "x not centered for count {count}: {sum_x}");
        assert!(sum_z.abs() < 1e-2, "z not centered for count {count}: {sum_z}");
        let unmirrored = field
            .positions()
            .iter()
            .filter(|p| !cells.contains(&key(-p.x, -p.z)))
            .count();
        assert_eq!(unmirrored, 0, "count {count} has points without a mirror");
    }
}

#[test]
fn default_grid_fills_the_whole_lattice() {
    let side = grid_side(PARTICLE_COUNT);
    assert_eq!(side * side, PARTICLE_COUNT);
    let field = ParticleField::initialize(PARTICLE_COUNT, &Layout::Grid { extent: GRID_EXTENT })
        .unwrap();
    let last = field.positions()[PARTICLE_COUNT - 1];
    let half = GRID_EXTENT / 2.0 - GRID_EXTENT / side as f32 / 2.0;
    assert!((last.x - half).abs() < 1e-4 && (last.z - half).abs() < 1e-4);
}

#[test]
fn odd_grid_count_keeps_a_particle_at_the_origin() {
    let field = ParticleField::initialize(17, &Layout::Grid { extent: 5.0 }).unwrap();
    assert_eq!(field.positions()[8], glam::Vec3::ZERO);
}

#[test]
fn grid_uses_ceil_sqrt_side_and_extent_spacing() {
    assert_eq!(grid_side(12_000), 110);
    assert_eq!(grid_side(100), 10);
    assert_eq!(grid_side(101), 11);
    let field = ParticleField::initialize(12_000, &Layout::Grid { extent: 16.0 }).unwrap();
    let p0 = field.positions()[0];
    let p1 = field.positions()[1];
    assert!((p1.x - p0.x - 16.0 / 110.0).abs() < 1e-5);
    assert_eq!(p0.z, p1.z);
    let row1 = field.positions()[110];
    assert!((row1.z - p0.z - 16.0 / 110.0).abs() < 1e-5);
}

#[test]
fn spiral_runs_from_outer_edge_to_center() {
    let count = 2_000;
    let r = 8.0;
    let field = ParticleField::initialize(
        count,
        &Layout::Spiral {
            loops: 12.0,
            max_radius: r,
        },
    )
    .unwrap();
    let positions = field.positions();
    assert!((radius(positions[0]) - r).abs() < 1e-4);
    assert!(radius(positions[count - 1]) < 0.01);
    for pair in positions.windows(2) {
        assert!(
            radius(pair[1]) <= radius(pair[0]) + 1e-5,
            "radius increased along the spiral"
        );
    }
    assert!(positions.iter().all(|p| p.y == 0.0));
}

#[test]
fn layouts_are_deterministic() {
    for layout in [
        Layout::Grid { extent: 16.0 },
        Layout::Spiral {
            loops: 5.0,
            max_radius: 3.0,
        },
    ] {
        let a = ParticleField::initialize(777, &layout).unwrap();
        let b = ParticleField::initialize(777, &layout).unwrap();
        assert_eq!(a.positions(), b.positions());
    }
}

#[test]
fn apply_heights_only_touches_y() {
    let mut field = ParticleField::initialize(64, &Layout::Grid { extent: 8.0 }).unwrap();
    let before: Vec<_> = field.positions().to_vec();
    field.apply_heights(|x, z| x + z);
    for (b, a) in before.iter().zip(field.positions()) {
        assert_eq!(a.x, b.x);
        assert_eq!(a.z, b.z);
        assert_eq!(a.y, b.x + b.z);
    }
}

#[test]
fn degenerate_fields_are_rejected() {
    assert!(matches!(
        ParticleField::initialize(0, &Layout::Grid { extent: 1.0 }),
        Err(VizError::InvalidConfig(_))
    ));
    assert!(ParticleField::initialize(10, &Layout::Grid { extent: 0.0 }).is_err());
    assert!(ParticleField::initialize(
        10,
        &Layout::Spiral {
            loops: 0.0,
            max_radius: 1.0
        }
    )
    .is_err());
}
