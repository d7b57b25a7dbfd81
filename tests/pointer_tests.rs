// Host-side tests for pointer to NDC mapping and picking rays.

use farmbot_core::{Camera, ViewportRect};
use glam::{Vec2, Vec3};

fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn centre_of_canvas_maps_to_origin() {
    let vp = ViewportRect::new(0.0, 0.0, 800.0, 600.0);
    assert!(close(vp.map(400.0, 300.0), Vec2::ZERO));
}

#[test]
fn corners_map_to_unit_square_with_y_up() {
    let vp = ViewportRect::new(0.0, 0.0, 800.0, 600.0);
    assert!(close(vp.map(0.0, 0.0), Vec2::new(-1.0, 1.0)));
    assert!(close(vp.map(800.0, 600.0), Vec2::new(1.0, -1.0)));
    assert!(close(vp.map(800.0, 0.0), Vec2::new(1.0, 1.0)));
}

#[test]
fn offset_canvas_subtracts_its_origin() {
    let vp = ViewportRect::new(100.0, 50.0, 200.0, 100.0);
    assert!(close(vp.map(200.0, 100.0), Vec2::ZERO));
    assert!(close(vp.map(150.0, 75.0), Vec2::new(-0.5, 0.5)));
}

#[test]
fn to_screen_inverts_map() {
    let vp = ViewportRect::new(12.0, 34.0, 640.0, 480.0);
    let p = Vec2::new(321.0, 123.0);
    let back = vp.to_screen(vp.map(p.x, p.y));
    assert!((back - p).length() < 1e-3);
}

#[test]
fn zero_sized_viewport_is_rejected() {
    let vp = ViewportRect::new(0.0, 0.0, 0.0, 0.0);
    assert!(!vp.map(10.0, 10.0).is_finite());
    assert!(vp.ndc_checked(10.0, 10.0).is_none());
    assert!(vp.ndc_checked(0.0, 0.0).is_none());
}

#[test]
fn pointer_outside_canvas_is_rejected() {
    let vp = ViewportRect::new(0.0, 0.0, 800.0, 600.0);
    assert!(vp.ndc_checked(-1.0, 300.0).is_none());
    assert!(vp.ndc_checked(400.0, 601.0).is_none());
    assert!(vp.ndc_checked(800.0, 600.0).is_some());
}

#[test]
fn non_finite_pointer_is_rejected() {
    let vp = ViewportRect::new(0.0, 0.0, 800.0, 600.0);
    assert!(vp.ndc_checked(f32::NAN, 10.0).is_none());
    assert!(vp.ndc_checked(10.0, f32::INFINITY).is_none());
}

#[test]
fn picking_ray_starts_at_eye_and_is_normalized() {
    let mut cam = Camera::new(40.0, Vec3::new(0.0, -100.0, 165.0), Vec3::new(0.0, -13.0, 0.0));
    cam.aspect = 800.0 / 600.0;
    let ray = cam.picking_ray(Vec2::new(0.3, -0.2));
    assert_eq!(ray.origin, cam.eye);
    assert!((ray.direction.length() - 1.0).abs() < 1e-5);
}

#[test]
fn picking_ray_passes_through_projected_point() {
    let mut cam = Camera::new(40.0, Vec3::new(0.0, -100.0, 165.0), Vec3::new(0.0, -13.0, 0.0));
    cam.aspect = 4.0 / 3.0;
    let world = Vec3::new(60.0, 20.0, 2.6);
    let ndc = cam.project(world).unwrap();
    let ray = cam.picking_ray(ndc);
    let t = (world - ray.origin).dot(ray.direction);
    let closest = ray.at(t);
    assert!((closest - world).length() < 0.05);
}
