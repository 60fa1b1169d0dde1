use std::f64::consts::PI;

use proptest::prelude::*;
use quench_analysis::{PlaneClass, SymmetryPlaneSet};

#[test]
fn thresholds_follow_the_narrowed_cone() {
    let n2 = SymmetryPlaneSet::new(2, 0.0).unwrap();
    assert!((n2.in_plane_threshold() - PI / 6.0).abs() < 1e-12);
    let n3 = SymmetryPlaneSet::new(3, 0.0).unwrap();
    assert!((n3.in_plane_threshold() - PI / 9.0).abs() < 1e-12);
    let n4 = SymmetryPlaneSet::new(4, 0.0).unwrap();
    assert!((n4.in_plane_threshold() - PI / 12.0).abs() < 1e-12);
}

#[test]
fn second_order_scenario() {
    let plane = SymmetryPlaneSet::new(2, 0.0).unwrap();
    assert!(plane.is_in_plane(PI / 8.0));
    assert!(!plane.is_in_plane(PI / 2.0));
    assert_eq!(plane.classify(PI / 2.0), PlaneClass::OutOfPlane);
    assert_eq!(plane.classify(PI / 4.0), PlaneClass::Neither);
}

#[test]
fn the_reference_angle_is_always_in_plane() {
    for (order, psi) in [(2u32, 0.0), (2, -2.0), (3, 1.3), (4, -3.0), (5, 0.7)] {
        let plane = SymmetryPlaneSet::new(order, psi).unwrap();
        assert!(plane.is_in_plane(psi), "order {order}, psi {psi}");
    }
}

#[test]
fn opposite_azimuth_is_a_second_order_self_image() {
    let plane = SymmetryPlaneSet::new(2, 0.7).unwrap();
    assert!(plane.min_distance(0.7 + PI) < 1e-12);
    assert!(plane.is_in_plane(0.7 + PI));
}

#[test]
fn cone_boundary_is_strict() {
    let plane = SymmetryPlaneSet::new(2, 0.0).unwrap();
    let threshold = plane.in_plane_threshold();
    assert!(plane.is_in_plane(threshold - 1e-9));
    assert!(!plane.is_in_plane(threshold + 1e-9));
}

#[test]
fn out_of_plane_reference_rotates_by_pi_over_n() {
    let plane = SymmetryPlaneSet::new(4, 0.5).unwrap();
    let rotated = plane.out_of_plane_reference();
    assert_eq!(rotated.order(), 4);
    assert!((rotated.angle() - (0.5 + PI / 4.0)).abs() < 1e-12);
}

#[test]
fn orders_below_two_are_rejected() {
    assert!(SymmetryPlaneSet::new(1, 0.0).is_err());
    assert!(SymmetryPlaneSet::new(0, 0.0).is_err());
    assert!(SymmetryPlaneSet::new(2, f64::NAN).is_err());
}

proptest! {
    #[test]
    fn classification_is_image_invariant(
        psi in -PI..PI,
        phi in 0.0..(2.0 * PI),
        order in 2u32..6,
        k in 0u32..6,
    ) {
        let k = k % order;
        let base = SymmetryPlaneSet::new(order, psi).unwrap();
        let image_angle = psi + 2.0 * PI * k as f64 / order as f64;
        let image = SymmetryPlaneSet::new(order, image_angle).unwrap();
        prop_assert!((base.min_distance(phi) - image.min_distance(phi)).abs() < 1e-9);
        prop_assert_eq!(base.classify(phi), image.classify(phi));
    }

    #[test]
    fn distances_stay_within_a_sector(
        psi in -PI..PI,
        phi in 0.0..(2.0 * PI),
        order in 2u32..6,
    ) {
        let plane = SymmetryPlaneSet::new(order, psi).unwrap();
        let max = PI / order as f64;
        prop_assert!(plane.min_distance(phi) <= max + 1e-9);
    }
}
