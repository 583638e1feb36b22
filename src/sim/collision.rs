//! Disk-disk contact detection and response
//!
//! Velocities are split along the center-to-center normal and its tangent.
//! Only the normal components exchange momentum (frictionless contact), using
//! the one-dimensional restitution formula.

use glam::Vec2;

use super::state::Body;

/// What a single contact resolution did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResolution {
    /// Unit normal from A's center toward B's center
    pub normal: Vec2,
    /// Penetration depth before separation
    pub overlap: f32,
    /// Normal velocity components before resolution (A, B)
    pub normal_before: (f32, f32),
    /// Normal velocity components after resolution (A, B)
    pub normal_after: (f32, f32),
}

impl ContactResolution {
    /// Magnitude of the change in B's normal velocity
    pub fn target_delta_normal(&self) -> f32 {
        (self.normal_after.1 - self.normal_before.1).abs()
    }
}

/// Disks touch when center distance is at most the sum of radii
pub fn bodies_touching(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}

/// Post-contact normal velocities for masses `m1`, `m2` and restitution `e`
///
/// `e = 1` is perfectly elastic, `e = 0` leaves both moving together.
#[inline]
pub fn normal_velocities(m1: f32, m2: f32, v1n: f32, v2n: f32, e: f32) -> (f32, f32) {
    let total = m1 + m2;
    let v1 = ((m1 - e * m2) * v1n + (1.0 + e) * m2 * v2n) / total;
    let v2 = ((m2 - e * m1) * v2n + (1.0 + e) * m1 * v1n) / total;
    (v1, v2)
}

/// Resolve a contact between two disks in place
///
/// Updates both velocities and pushes the disks apart by half the overlap
/// each. Returns `None` without touching anything when the centers coincide,
/// since the contact normal is undefined.
pub fn resolve_contact(a: &mut Body, b: &mut Body, restitution: f32) -> Option<ContactResolution> {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance == 0.0 {
        return None;
    }

    let normal = delta / distance;
    let tangent = normal.perp();

    let v1n = a.vel.dot(normal);
    let v1t = a.vel.dot(tangent);
    let v2n = b.vel.dot(normal);
    let v2t = b.vel.dot(tangent);

    let (v1n_new, v2n_new) = normal_velocities(a.mass, b.mass, v1n, v2n, restitution);

    a.vel = normal * v1n_new + tangent * v1t;
    b.vel = normal * v2n_new + tangent * v2t;

    // Separate along the normal; may leave a disk past a cushion until next tick
    let overlap = (a.radius + b.radius) - distance;
    let separation = normal * (overlap / 2.0);
    a.pos -= separation;
    b.pos += separation;

    Some(ContactResolution {
        normal,
        overlap,
        normal_before: (v1n, v2n),
        normal_after: (v1n_new, v2n_new),
    })
}

/// Impact force estimate F = m·Δv / (2·dt)
#[inline]
pub fn impact_force(mass: f32, delta_normal: f32, dt: f32) -> f32 {
    mass * delta_normal / (2.0 * dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mps_to_table_speed;
    use crate::sim::state::BodyTag;
    use proptest::prelude::*;

    fn body(tag: BodyTag, x: f32, y: f32, mass: f32) -> Body {
        Body::new(tag, Vec2::new(x, y), mass)
    }

    #[test]
    fn test_touching_threshold() {
        let a = body(BodyTag::Cue, 100.0, 200.0, 0.1);
        let mut b = body(BodyTag::Target, 130.0, 200.0, 0.1);
        // Radii are 15 each, so exactly touching counts
        assert!(bodies_touching(&a, &b));

        b.pos.x = 130.5;
        assert!(!bodies_touching(&a, &b));
    }

    #[test]
    fn test_equal_mass_elastic_swaps_velocity() {
        let mut a = body(BodyTag::Cue, 100.0, 200.0, 0.17);
        let mut b = body(BodyTag::Target, 133.0, 200.0, 0.17);
        let launch = mps_to_table_speed(2.0);
        a.vel = Vec2::new(launch, 0.0);

        let contact = resolve_contact(&mut a, &mut b, 1.0).expect("contact");

        assert!(a.vel.x.abs() < 1e-6);
        assert!((b.vel.x - launch).abs() < 1e-6);
        assert!(a.vel.y.abs() < 1e-6 && b.vel.y.abs() < 1e-6);
        assert!((contact.normal_after.0 - contact.normal_before.1).abs() < 1e-6);
        assert!((contact.normal_after.1 - contact.normal_before.0).abs() < 1e-6);
    }

    #[test]
    fn test_perfectly_inelastic_moves_together() {
        let (v1, v2) = normal_velocities(0.2, 0.5, 4.0, -1.0, 0.0);
        assert!((v1 - v2).abs() < 1e-6);
        // (0.2·4 - 0.5·1) / 0.7
        assert!((v1 - 0.3 / 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_separation_removes_overlap() {
        let mut a = body(BodyTag::Cue, 100.0, 200.0, 0.17);
        let mut b = body(BodyTag::Target, 120.0, 210.0, 0.3);
        let sum = a.radius + b.radius;

        let contact = resolve_contact(&mut a, &mut b, 0.5).expect("contact");
        assert!(contact.overlap > 0.0);
        assert!((a.pos.distance(b.pos) - sum).abs() < 1e-3);
    }

    #[test]
    fn test_tangential_component_preserved() {
        // Glancing contact along a 45° normal
        let mut a = body(BodyTag::Cue, 100.0, 100.0, 0.2);
        let mut b = body(BodyTag::Target, 120.0, 120.0, 0.2);
        a.vel = Vec2::new(3.0, 0.0);

        let contact = resolve_contact(&mut a, &mut b, 1.0).expect("contact");
        let tangent = contact.normal.perp();
        assert!((a.vel.dot(tangent) - Vec2::new(3.0, 0.0).dot(tangent)).abs() < 1e-5);
        assert!(b.vel.dot(tangent).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let mut a = body(BodyTag::Cue, 200.0, 200.0, 0.17);
        let mut b = body(BodyTag::Target, 200.0, 200.0, 0.17);
        a.vel = Vec2::new(1.0, 0.0);

        assert!(bodies_touching(&a, &b));
        assert!(resolve_contact(&mut a, &mut b, 1.0).is_none());
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
        assert_eq!(b.vel, Vec2::ZERO);
    }

    #[test]
    fn test_impact_force() {
        // 0.17 kg, Δv of 2 units over a 1/60 s window
        let f = impact_force(0.17, 2.0, 1.0 / 60.0);
        assert!((f - 10.2).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_normal_momentum_conserved(
            m1 in 0.05f32..2.0,
            m2 in 0.05f32..2.0,
            v1n in -20.0f32..20.0,
            v2n in -20.0f32..20.0,
            e in 0.0f32..=1.0,
        ) {
            let (v1, v2) = normal_velocities(m1, m2, v1n, v2n, e);
            let before = m1 * v1n + m2 * v2n;
            let after = m1 * v1 + m2 * v2;
            let scale = 1.0 + (m1 + m2) * 20.0;
            prop_assert!((before - after).abs() <= 1e-5 * scale);
        }

        #[test]
        fn prop_elastic_conserves_normal_energy(
            m1 in 0.05f32..2.0,
            m2 in 0.05f32..2.0,
            v1n in -20.0f32..20.0,
            v2n in -20.0f32..20.0,
        ) {
            let (v1, v2) = normal_velocities(m1, m2, v1n, v2n, 1.0);
            let before = 0.5 * m1 * v1n * v1n + 0.5 * m2 * v2n * v2n;
            let after = 0.5 * m1 * v1 * v1 + 0.5 * m2 * v2 * v2;
            prop_assert!((before - after).abs() <= 1e-3 * (1.0 + before));
        }

        #[test]
        fn prop_inelastic_equalizes_normal_velocity(
            m1 in 0.05f32..2.0,
            m2 in 0.05f32..2.0,
            v1n in -20.0f32..20.0,
            v2n in -20.0f32..20.0,
        ) {
            let (v1, v2) = normal_velocities(m1, m2, v1n, v2n, 0.0);
            prop_assert!((v1 - v2).abs() <= 1e-4 * (1.0 + v1n.abs() + v2n.abs()));
        }

        #[test]
        fn prop_resolution_conserves_vector_momentum(
            angle in 0.0f32..std::f32::consts::TAU,
            gap in 1.0f32..30.0,
            m1 in 0.1f32..1.0,
            m2 in 0.1f32..1.0,
            vx1 in -10.0f32..10.0,
            vy1 in -10.0f32..10.0,
            vx2 in -10.0f32..10.0,
            vy2 in -10.0f32..10.0,
            e in 0.0f32..=1.0,
        ) {
            let mut a = body(BodyTag::Cue, 350.0, 200.0, m1);
            let offset = Vec2::new(angle.cos(), angle.sin()) * gap;
            let mut b = body(BodyTag::Target, 350.0 + offset.x, 200.0 + offset.y, m2);
            a.vel = Vec2::new(vx1, vy1);
            b.vel = Vec2::new(vx2, vy2);

            let before = a.vel * a.mass + b.vel * b.mass;
            prop_assert!(resolve_contact(&mut a, &mut b, e).is_some());
            let after = a.vel * a.mass + b.vel * b.mass;

            prop_assert!((before - after).length() < 1e-3);
        }
    }
}
