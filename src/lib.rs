pub mod assets;
pub mod build;
pub mod docs;
pub mod editor;
pub mod engine;
pub mod logging;
pub mod project;
pub mod renderer;
pub mod types;
