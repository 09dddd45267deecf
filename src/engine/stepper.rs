//! Scene stepper: advances kinematic objects by one display frame.
//!
//! Objects never interact with each other, so each one is stepped in
//! isolation. The stepper reads a collection and returns a new one; the
//! caller's collection is never touched.

use super::scene::{Kinematics, SceneObject};

/// Any frame delta above this is treated as a lag spike and skipped.
pub const LAG_SPIKE_SECONDS: f64 = 0.1;
/// Gravitational acceleration before scene scaling.
pub const GRAVITY: f64 = 9.8;
/// Scene-unit scaling applied to gravity. Authored scenes depend on it.
pub const SCENE_UNIT_SCALE: f64 = 10.0;
/// Floor height in percentage-of-viewport units.
pub const FLOOR_Y: f64 = 90.0;
/// Vertical velocity factor applied on floor contact.
pub const BOUNCE: f64 = -0.4;

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advanced(Vec<SceneObject>),
    /// `dt` exceeded `LAG_SPIKE_SECONDS`; nothing moved this tick.
    Skipped,
}

pub struct Stepper;

impl Stepper {
    /// Step every object by `dt` seconds. `clock_ms` is the session clock in
    /// milliseconds and drives scripted motion.
    pub fn step(objects: &[SceneObject], dt: f64, clock_ms: f64) -> StepOutcome {
        if dt > LAG_SPIKE_SECONDS {
            return StepOutcome::Skipped;
        }
        // Negative or NaN deltas leave every object as it was, script terms included.
        if !dt.is_finite() || dt < 0.0 {
            return StepOutcome::Advanced(objects.to_vec());
        }

        StepOutcome::Advanced(
            objects
                .iter()
                .map(|obj| Self::step_object(obj, dt, clock_ms))
                .collect(),
        )
    }

    fn step_object(obj: &SceneObject, dt: f64, clock_ms: f64) -> SceneObject {
        let Some(Kinematics { mut vx, mut vy, mut vr }) = obj.runtime else {
            return obj.clone();
        };
        let mut x = obj.position.x;
        let mut y = obj.position.y;
        let mut rotation = obj.rotation;

        let dynamic = obj.components.rigidbody.as_ref().filter(|rb| rb.is_dynamic);

        if let Some(rb) = dynamic {
            vy += GRAVITY * rb.gravity_scale * dt * SCENE_UNIT_SCALE;
        }

        if obj.components.is_scripted() {
            vr += (clock_ms / 500.0).sin() * 2.0;
            vx += (clock_ms / 1000.0).cos() * 0.5;
        }

        x += vx * dt;
        y += vy * dt;
        rotation += vr * dt;

        if dynamic.is_some() && y > FLOOR_Y {
            y = FLOOR_Y;
            vy *= BOUNCE;
        }

        let mut next = obj.clone();
        next.position.x = x;
        next.position.y = y;
        next.rotation = rotation;
        next.runtime = Some(Kinematics { vx, vy, vr });
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::components::{Components, Rigidbody, Script};
    use crate::engine::scene::{ObjectId, ObjectKind};
    use crate::types::Vec2;

    fn dynamic_box(y: f64, vy: f64) -> SceneObject {
        SceneObject {
            id: ObjectId::from("box"),
            name: "Box_1".into(),
            kind: ObjectKind::Box,
            position: Vec2::new(50.0, y),
            rotation: 0.0,
            scale: Vec2::ONE,
            z_index: 0,
            color: "#3b82f6".into(),
            locked: false,
            components: Components {
                rigidbody: Some(Rigidbody::default()),
                ..Default::default()
            },
            runtime: Some(Kinematics { vx: 0.0, vy, vr: 0.0 }),
        }
    }

    fn advanced(outcome: StepOutcome) -> Vec<SceneObject> {
        match outcome {
            StepOutcome::Advanced(objects) => objects,
            StepOutcome::Skipped => panic!("step was skipped"),
        }
    }

    #[test]
    fn test_static_objects_pass_through() {
        let mut obj = dynamic_box(10.0, 0.0);
        obj.runtime = None;
        let out = advanced(Stepper::step(&[obj.clone()], 0.05, 1234.0));
        assert_eq!(out, vec![obj]);
    }

    #[test]
    fn test_lag_spike_skips_everything() {
        let objects = vec![dynamic_box(10.0, 3.0), dynamic_box(20.0, -1.0)];
        let outcome = Stepper::step(&objects, 0.11, 0.0);
        assert_eq!(outcome, StepOutcome::Skipped);
    }

    #[test]
    fn test_gravity_accumulation() {
        let out = advanced(Stepper::step(&[dynamic_box(10.0, 0.0)], 0.1, 0.0));
        let vy = out[0].runtime.unwrap().vy;
        assert!((vy - 9.8).abs() < 1e-9);
        assert!((out[0].position.y - (10.0 + 0.98)).abs() < 1e-9);
    }

    #[test]
    fn test_gravity_scale_applies() {
        let mut obj = dynamic_box(10.0, 0.0);
        obj.components.rigidbody = Some(Rigidbody {
            gravity_scale: 0.5,
            ..Default::default()
        });
        let out = advanced(Stepper::step(&[obj], 0.1, 0.0));
        assert!((out[0].runtime.unwrap().vy - 4.9).abs() < 1e-9);
    }

    #[test]
    fn test_floor_clamp() {
        // dt = 1 is above the lag guard, so drive the integrator directly.
        let out = Stepper::step_object(&dynamic_box(89.0, 50.0), 1.0, 0.0);
        assert_eq!(out.position.y, FLOOR_Y);
        // 50 + 98 gravity before the bounce.
        assert!((out.runtime.unwrap().vy - (148.0 * BOUNCE)).abs() < 1e-9);

        let mut weightless = dynamic_box(89.0, 50.0);
        weightless.components.rigidbody = Some(Rigidbody {
            gravity_scale: 0.0,
            ..Default::default()
        });
        let out = Stepper::step_object(&weightless, 1.0, 0.0);
        assert_eq!(out.position.y, 90.0);
        assert_eq!(out.runtime.unwrap().vy, -20.0);
    }

    #[test]
    fn test_kinematic_body_ignores_floor_and_gravity() {
        let mut obj = dynamic_box(89.0, 50.0);
        obj.components.rigidbody = Some(Rigidbody {
            is_dynamic: false,
            ..Default::default()
        });
        let out = advanced(Stepper::step(&[obj], 0.1, 0.0));
        assert!((out[0].position.y - 94.0).abs() < 1e-9);
        assert_eq!(out[0].runtime.unwrap().vy, 50.0);
    }

    #[test]
    fn test_scripted_motion_uses_clock() {
        let mut obj = dynamic_box(10.0, 0.0);
        obj.components.rigidbody = None;
        obj.components.script = Some(Script::default());

        let clock_ms = 785.0;
        let out = advanced(Stepper::step(&[obj], 0.0, clock_ms));
        let k = out[0].runtime.unwrap();
        assert!((k.vr - (clock_ms / 500.0).sin() * 2.0).abs() < 1e-12);
        assert!((k.vx - (clock_ms / 1000.0).cos() * 0.5).abs() < 1e-12);
        // dt = 0: velocities change, positions do not.
        assert_eq!(out[0].position, Vec2::new(50.0, 10.0));
    }

    #[test]
    fn test_invalid_dt_leaves_objects_untouched() {
        let mut scripted = dynamic_box(10.0, 0.0);
        scripted.components.rigidbody = None;
        scripted.components.script = Some(Script::default());
        let objects = vec![dynamic_box(10.0, 5.0), scripted];

        for dt in [-0.05, f64::NAN, f64::NEG_INFINITY] {
            let out = advanced(Stepper::step(&objects, dt, 300.0));
            assert_eq!(out, objects, "dt = {dt}");
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let objects = vec![dynamic_box(10.0, 0.0)];
        let before = objects.clone();
        let _ = Stepper::step(&objects, 0.05, 100.0);
        assert_eq!(objects, before);
    }
}
