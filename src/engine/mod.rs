//! Engine: the scene model and its preview simulation.
//!
//! Holds authored scene data, the repository that edits it, and the
//! stepper/session pair that animates it while a preview runs.
//! It never deals with terminals, key events, or files.

pub mod components;
pub mod defaults;
pub mod repository;
pub mod scene;
pub mod session;
pub mod stepper;

pub use repository::ObjectRepository;
pub use scene::{ObjectId, ObjectKind, Scene, SceneObject};
pub use session::{SessionState, SimulationSession, Tick};
pub use stepper::{StepOutcome, Stepper};
