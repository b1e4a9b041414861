//! Scenario tests for containment and merging across the public API

use rust3d_geometry::{
    contains_object, crossing_parity, merge_aabbs, merge_capsules, merge_spheres, Aabb, Capsule,
    Polygon2, Sphere,
};
use rust3d_math::{MathError, Vec2, Vec3};

fn square() -> Polygon2 {
    Polygon2::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(4.0, 0.0),
        Vec2::new(4.0, 4.0),
        Vec2::new(0.0, 4.0),
    ])
    .expect("square has four vertices")
}

// ==================== Polygon Tests ====================

#[test]
fn test_square_interior_point() {
    let poly = square();
    assert!(contains_object(&poly, &Vec2::new(2.0, 2.0)));
    assert!(crossing_parity(&poly, Vec2::new(2.0, 2.0)));
}

#[test]
fn test_square_exterior_point() {
    let poly = square();
    assert!(!contains_object(&poly, &Vec2::new(5.0, 5.0)));
    assert!(!crossing_parity(&poly, Vec2::new(5.0, 5.0)));
}

#[test]
fn test_square_edge_point_depends_on_convention() {
    let poly = square();
    let on_edge = Vec2::new(4.0, 2.0);
    assert!(!crossing_parity(&poly, on_edge), "parity test is half-open");
    assert!(contains_object(&poly, &on_edge), "containment is closed");
}

#[test]
fn test_degenerate_polygon_is_rejected() {
    let err = Polygon2::new(vec![Vec2::ZERO, Vec2::X]).unwrap_err();
    assert_eq!(err, MathError::TooFewVertices(2));
}

// ==================== Merge Tests ====================

#[test]
fn test_merge_identical_spheres() {
    let s = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 1.5);
    assert_eq!(merge_spheres(&s, &s), s);
}

#[test]
fn test_merged_sphere_contains_inputs() {
    let a = Sphere::new(Vec3::new(-3.0, 1.0, 0.0), 1.0);
    let b = Sphere::new(Vec3::new(2.0, -1.0, 4.0), 2.0);
    let m = merge_spheres(&a, &b);
    let grown = Sphere::new(m.center, m.radius + 0.0001);
    assert!(contains_object(&grown, &a));
    assert!(contains_object(&grown, &b));
}

#[test]
fn test_merged_capsule_contains_inputs() {
    let a = Capsule::from_endpoints(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0), 1.0);
    let b = Capsule::from_endpoints(Vec3::new(1.0, 3.0, 0.0), Vec3::new(1.0, 3.0, 5.0), 0.5);
    let m = merge_capsules(&a, &b);

    let grown = Capsule::new(m.segment, m.radius + 0.001);
    assert!(contains_object(&grown, &a));
    assert!(contains_object(&grown, &b));
}

#[test]
fn test_merged_aabb_contains_inputs() {
    let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let b = Aabb::new(Vec3::splat(3.0), Vec3::splat(4.0));
    let m = merge_aabbs(&a, &b);
    assert!(contains_object(&m, &a));
    assert!(contains_object(&m, &b));
    assert!(contains_object(&m, &Vec3::splat(2.0)));
}
