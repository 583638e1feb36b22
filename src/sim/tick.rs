//! Fixed timestep collision table tick
//!
//! One call advances the table by one display frame.

use super::collision::{bodies_touching, impact_force, resolve_contact};
use super::state::{RunOutcome, SimulationState};
use crate::consts::*;

/// Advance the collision table by one fixed timestep
///
/// Velocities are stored per tick, so positions advance by the raw velocity;
/// `dt` only scales the impact force estimate. Returns the outcome on the
/// tick the run ends on its own.
pub fn step(state: &mut SimulationState, dt: f32) -> Option<RunOutcome> {
    if !state.is_running {
        return None;
    }

    state.time_ticks += 1;

    let bounds = state.bounds;
    for body in [&mut state.a, &mut state.b] {
        body.integrate();
        body.vel *= TABLE_FRICTION;
        body.settle(REST_SPEED);
        let hits = bounds.contain(&mut body.pos, &mut body.vel, body.radius, WALL_RESTITUTION);
        if hits.any() {
            log::debug!(
                "{:?} hit cushion at tick {} ({:?})",
                body.tag,
                state.time_ticks,
                hits
            );
        }
    }

    // Resolved on every overlapping tick, not just the first
    if bodies_touching(&state.a, &state.b) {
        if let Some(contact) = resolve_contact(&mut state.a, &mut state.b, state.restitution) {
            if !state.has_collided {
                state.has_collided = true;
                state.collision_tick = Some(state.time_ticks);
                let force = impact_force(state.b.mass, contact.target_delta_normal(), dt);
                state.impact_force = Some(force);
                log::debug!(
                    "First contact at tick {} (overlap {:.2}, impact force {:.1} N)",
                    state.time_ticks,
                    contact.overlap,
                    force
                );
            }
        }
    }

    if state.a.is_at_rest() && state.b.is_at_rest() {
        state.is_running = false;
        let outcome = if state.has_collided {
            RunOutcome::Completed
        } else {
            RunOutcome::StoppedWithoutCollision
        };
        state.outcome = Some(outcome);
        log::info!("Collision run ended after {} ticks: {:?}", state.time_ticks, outcome);
        return Some(outcome);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CUE_START, RunStatus, TARGET_START};
    use glam::Vec2;
    use proptest::prelude::*;

    fn run_to_rest(state: &mut SimulationState, max_ticks: u32) -> Option<RunOutcome> {
        for _ in 0..max_ticks {
            if let Some(outcome) = step(state, SIM_DT) {
                return Some(outcome);
            }
        }
        None
    }

    #[test]
    fn test_step_while_paused_is_noop() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        state.a.vel = Vec2::new(5.0, 0.0);
        let before = state.clone();

        for _ in 0..5 {
            assert_eq!(step(&mut state, SIM_DT), None);
        }

        assert!(!state.is_running);
        assert_eq!(state.a, before.a);
        assert_eq!(state.b, before.b);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_step_integrates_then_applies_friction() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        state.launch(2.0);
        let v0 = state.a.vel.x;

        step(&mut state, SIM_DT);

        assert!((state.a.pos.x - (CUE_START.x + v0)).abs() < 1e-4);
        assert!((state.a.vel.x - v0 * TABLE_FRICTION).abs() < 1e-6);
        assert_eq!(state.b.pos, TARGET_START);
        assert!(state.is_running);
    }

    #[test]
    fn test_slow_launch_stops_without_collision() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        state.launch(2.0);

        let outcome = run_to_rest(&mut state, 1000);
        assert_eq!(outcome, Some(RunOutcome::StoppedWithoutCollision));
        assert!(!state.is_running);
        assert!(!state.has_collided);
        assert_eq!(state.impact_force, None);
        assert_eq!(
            state.status(),
            RunStatus::Finished(RunOutcome::StoppedWithoutCollision)
        );
    }

    #[test]
    fn test_fast_launch_completes_with_collision() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        state.launch(15.0);

        let outcome = run_to_rest(&mut state, 5000);
        assert_eq!(outcome, Some(RunOutcome::Completed));
        assert!(state.has_collided);
        assert!(state.collision_tick.is_some());
        assert!(state.impact_force.is_some_and(|f| f > 0.0));
        assert_eq!(state.snapshot().total_momentum, 0.0);
    }

    #[test]
    fn test_first_contact_recorded_once() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        // One tick away from contact with the cue disk closing in
        state.a.pos = Vec2::new(570.0, 200.0);
        state.launch(6.0);

        step(&mut state, SIM_DT);
        assert!(state.has_collided);
        let tick = state.collision_tick;
        let force = state.impact_force;
        assert_eq!(tick, Some(1));

        // Drive them back together; the latch must not move
        state.a.pos = Vec2::new(state.b.pos.x - 10.0, 200.0);
        state.a.vel = Vec2::new(3.0, 0.0);
        step(&mut state, SIM_DT);
        assert_eq!(state.collision_tick, tick);
        assert_eq!(state.impact_force, force);
    }

    #[test]
    fn test_impact_force_uses_target_normal_change() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        state.a.pos = Vec2::new(TARGET_START.x - 30.0, 200.0);
        state.launch(6.0);
        let v_after_friction = state.a.vel.x * TABLE_FRICTION;

        step(&mut state, SIM_DT);

        // Equal masses, elastic: B picks up all of A's normal velocity
        let expected = 0.17 * v_after_friction / (2.0 * SIM_DT);
        let force = state.impact_force.expect("impact force");
        assert!((force - expected).abs() < 1e-3);
    }

    #[test]
    fn test_rest_is_idempotent() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        state.launch(2.0);
        run_to_rest(&mut state, 1000);
        let resting = state.snapshot();
        let ticks = state.time_ticks;

        for _ in 0..10 {
            assert_eq!(step(&mut state, SIM_DT), None);
        }
        assert_eq!(state.snapshot(), resting);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_zero_speed_launch_stops_on_first_tick() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        state.launch(0.0);
        assert!(state.is_running);

        assert_eq!(
            step(&mut state, SIM_DT),
            Some(RunOutcome::StoppedWithoutCollision)
        );
        assert!(!state.is_running);
        assert_eq!(state.a.pos, CUE_START);
    }

    #[test]
    fn test_coincident_bodies_do_not_panic() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        state.b.pos = state.a.pos;
        state.is_running = true;

        assert_eq!(
            step(&mut state, SIM_DT),
            Some(RunOutcome::StoppedWithoutCollision)
        );
        assert!(!state.has_collided);
        assert_eq!(state.a.pos, state.b.pos);
    }

    #[test]
    fn test_wall_bounce_reverses_and_damps() {
        let mut state = SimulationState::new(0.17, 0.17, 1.0);
        state.b.pos = Vec2::new(600.0, 60.0);
        state.a.pos = Vec2::new(680.0, 300.0);
        state.launch(12.0);
        let v0 = state.a.vel.x;

        step(&mut state, SIM_DT);

        let r = state.a.radius;
        assert!((state.a.pos.x - (700.0 - r)).abs() < 1e-4);
        assert!((state.a.vel.x + v0 * TABLE_FRICTION * WALL_RESTITUTION).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_cushion_containment(
            vx in -200.0f32..200.0,
            vy in -3.0f32..3.0,
            x in 100.0f32..600.0,
            y in 150.0f32..250.0,
        ) {
            let mut state = SimulationState::new(0.3, 0.17, 1.0);
            // Park the target along the bottom cushion, out of the cue disk's lane
            state.b.pos = Vec2::new(350.0, 380.0);
            state.a.pos = Vec2::new(x, y);
            state.a.vel = Vec2::new(vx, vy);
            state.is_running = true;

            step(&mut state, SIM_DT);

            let r = state.a.radius;
            prop_assert!(!state.has_collided);
            prop_assert!(state.a.pos.x >= r && state.a.pos.x <= 700.0 - r);
            prop_assert!(state.a.pos.y >= r && state.a.pos.y <= 400.0 - r);
        }
    }
}
