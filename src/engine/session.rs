//! Simulation session: the bracket around a run of the stepper.
//!
//! Starting a session snapshots the scene by value and gives every object
//! zero kinematic state. Stopping discards everything the stepper did and
//! puts the snapshot back. Start and stop share one entry point, `toggle`.

use log::{debug, info};

use super::scene::{Kinematics, Scene};
use super::stepper::{StepOutcome, Stepper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Stopped,
}

/// Result of a single `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No session is running.
    Idle,
    Stepped,
    /// Frame delta was a lag spike; state was left alone.
    Skipped,
}

#[derive(Debug, Default)]
pub struct SimulationSession {
    snapshot: Option<Scene>,
    started_ms: f64,
    prev_ms: f64,
    steps: u64,
    skipped: u64,
}

impl SimulationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.is_active() {
            SessionState::Running
        } else {
            SessionState::Stopped
        }
    }

    /// Frames stepped and frames skipped in the current (or last) session.
    pub fn counters(&self) -> (u64, u64) {
        (self.steps, self.skipped)
    }

    /// Start a session if none is running, otherwise stop the running one.
    /// `now_ms` is a monotonic timestamp in milliseconds.
    pub fn toggle(&mut self, scene: &mut Scene, now_ms: f64) -> SessionState {
        if self.is_active() {
            self.stop(scene);
        } else {
            self.start(scene, now_ms);
        }
        self.state()
    }

    fn start(&mut self, scene: &mut Scene, now_ms: f64) {
        self.snapshot = Some(scene.clone());
        for obj in &mut scene.objects {
            obj.runtime = Some(Kinematics::default());
        }
        self.started_ms = now_ms;
        self.prev_ms = now_ms;
        self.steps = 0;
        self.skipped = 0;
        info!("simulation started with {} objects", scene.len());
    }

    fn stop(&mut self, scene: &mut Scene) {
        if let Some(snapshot) = self.snapshot.take() {
            *scene = snapshot;
            info!(
                "simulation stopped after {} steps ({} skipped), scene restored",
                self.steps, self.skipped
            );
        }
    }

    /// Stop without caring which way the toggle would go. Used before saving
    /// and when leaving the workspace.
    pub fn ensure_stopped(&mut self, scene: &mut Scene) {
        if self.is_active() {
            self.stop(scene);
        }
    }

    /// Advance the running session to `now_ms`.
    ///
    /// The previous-frame marker always moves to `now_ms`, so a skipped lag
    /// spike is not carried into the next frame's delta.
    pub fn tick(&mut self, scene: &mut Scene, now_ms: f64) -> Tick {
        if !self.is_active() {
            return Tick::Idle;
        }

        let dt = (now_ms - self.prev_ms) / 1000.0;
        self.prev_ms = now_ms;
        let clock_ms = now_ms - self.started_ms;

        match Stepper::step(&scene.objects, dt, clock_ms) {
            StepOutcome::Advanced(objects) => {
                scene.objects = objects;
                self.steps += 1;
                Tick::Stepped
            }
            StepOutcome::Skipped => {
                self.skipped += 1;
                debug!("lag spike of {dt:.3}s, frame skipped");
                Tick::Skipped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::components::{Components, Rigidbody};
    use crate::engine::scene::{ObjectId, ObjectKind, SceneObject};
    use crate::types::Vec2;

    fn scene() -> Scene {
        Scene::new(vec![
            SceneObject {
                id: ObjectId::from("a"),
                name: "Box_1".into(),
                kind: ObjectKind::Box,
                position: Vec2::new(50.0, 50.0),
                rotation: 15.0,
                scale: Vec2::ONE,
                z_index: 0,
                color: "#3b82f6".into(),
                locked: false,
                components: Components {
                    rigidbody: Some(Rigidbody::default()),
                    ..Default::default()
                },
                runtime: None,
            },
            SceneObject {
                id: ObjectId::from("b"),
                name: "Text_2".into(),
                kind: ObjectKind::Text,
                position: Vec2::new(20.0, 10.0),
                rotation: 0.0,
                scale: Vec2::ONE,
                z_index: 1,
                color: "#3b82f6".into(),
                locked: false,
                components: Components::default(),
                runtime: None,
            },
        ])
    }

    #[test]
    fn test_start_then_stop_restores_exactly() {
        let original = scene();
        let mut live = original.clone();
        let mut session = SimulationSession::new();

        assert_eq!(session.toggle(&mut live, 0.0), SessionState::Running);
        assert!(live.objects.iter().all(|o| o.runtime == Some(Kinematics::default())));

        assert_eq!(session.toggle(&mut live, 0.0), SessionState::Stopped);
        assert_eq!(live, original);
    }

    #[test]
    fn test_stop_discards_drift() {
        let original = scene();
        let mut live = original.clone();
        let mut session = SimulationSession::new();

        session.toggle(&mut live, 1000.0);
        for frame in 1..=30 {
            session.tick(&mut live, 1000.0 + frame as f64 * 16.0);
        }
        assert!(live.objects[0].position.y > 50.0);

        session.toggle(&mut live, 1500.0);
        assert_eq!(live, original);
        assert!(!session.is_active());
    }

    #[test]
    fn test_tick_when_idle() {
        let mut live = scene();
        let mut session = SimulationSession::new();
        assert_eq!(session.tick(&mut live, 16.0), Tick::Idle);
        assert_eq!(live, scene());
    }

    #[test]
    fn test_lag_spike_does_not_carry_over() {
        let mut live = scene();
        let mut session = SimulationSession::new();
        session.toggle(&mut live, 0.0);

        let before = live.clone();
        assert_eq!(session.tick(&mut live, 500.0), Tick::Skipped);
        assert_eq!(live, before);

        // Next delta is measured from the skipped frame, not from 0.
        assert_eq!(session.tick(&mut live, 516.0), Tick::Stepped);
        assert_eq!(session.counters(), (1, 1));
    }

    #[test]
    fn test_ensure_stopped() {
        let original = scene();
        let mut live = original.clone();
        let mut session = SimulationSession::new();

        session.ensure_stopped(&mut live);
        assert_eq!(live, original);

        session.toggle(&mut live, 0.0);
        session.tick(&mut live, 16.0);
        session.ensure_stopped(&mut live);
        assert_eq!(live, original);
    }
}
