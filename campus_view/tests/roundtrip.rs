// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the screen/map round-trip law.
//!
//! For any valid pose and view size, converting a point to the other space
//! and back must return the original point within 1e-4 units.

use campus_view::{Pose, PoseLimits, SpaceMapper};
use kurbo::{Point, Size, Vec2};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-4;

fn pose_strategy() -> impl Strategy<Value = Pose> {
    (
        -5_000.0..5_000.0_f64,
        -5_000.0..5_000.0_f64,
        0.05..50.0_f64,
        -3.2..3.2_f64,
    )
        .prop_map(|(tx, ty, scale, rotation)| {
            let limits = PoseLimits::new(0.05, 50.0, -3.2, 3.2);
            Pose::new(Vec2::new(tx, ty), scale, rotation, limits)
        })
}

fn mapper_strategy() -> impl Strategy<Value = SpaceMapper> {
    (
        10.0..4_000.0_f64,
        10.0..4_000.0_f64,
        10.0..3_000.0_f64,
        10.0..3_000.0_f64,
    )
        .prop_map(|(nw, nh, vw, vh)| {
            let mut mapper = SpaceMapper::new(Size::new(nw, nh));
            mapper.set_view_size(Size::new(vw, vh));
            mapper
        })
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-2_000.0..2_000.0_f64, -2_000.0..2_000.0_f64).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn map_to_screen_then_back(
        pose in pose_strategy(),
        mapper in mapper_strategy(),
        p in point_strategy(),
    ) {
        let screen = mapper.map_to_screen(&pose, p).unwrap();
        let back = mapper.screen_to_map(&pose, screen).unwrap();
        prop_assert!(
            (back - p).hypot() < TOLERANCE,
            "map {:?} -> screen {:?} -> map {:?}",
            p, screen, back
        );
    }

    #[test]
    fn screen_to_map_then_back(
        pose in pose_strategy(),
        mapper in mapper_strategy(),
        p in point_strategy(),
    ) {
        let map = mapper.screen_to_map(&pose, p).unwrap();
        let back = mapper.map_to_screen(&pose, map).unwrap();
        // Screen error is map error magnified by the total scale, so compare in
        // map units.
        let total_scale = pose.scale() * mapper.display_scale();
        prop_assert!(
            (back - p).hypot() / total_scale < TOLERANCE,
            "screen {:?} -> map {:?} -> screen {:?}",
            p, map, back
        );
    }

    #[test]
    fn scale_never_overshoots(start in 3.0..30.0_f64, delta in -100.0..100.0_f64) {
        let limits = PoseLimits::new(3.0, 30.0, 0.0, 0.0);
        let mut pose = Pose::new(Vec2::ZERO, start, 0.0, limits);
        pose.update_scale(delta);
        prop_assert!(pose.scale() >= 3.0 && pose.scale() <= 30.0);
        if start + delta >= 30.0 {
            prop_assert_eq!(pose.scale(), 30.0);
        }
    }
}

#[test]
fn resize_between_conversions_is_observed() {
    let pose = Pose::default();
    let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
    mapper.set_view_size(Size::new(1000.0, 700.0));
    let p = Point::new(250.0, 100.0);
    let at_full = mapper.map_to_screen(&pose, p).unwrap();

    mapper.set_view_size(Size::new(500.0, 350.0));
    let at_half = mapper.map_to_screen(&pose, p).unwrap();
    assert!((at_half.x - at_full.x / 2.0).abs() < 1e-9);
    assert!((mapper.screen_to_map(&pose, at_half).unwrap() - p).hypot() < 1e-9);
}
