use std::process;

use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;

use forge_studio::{
    editor::{config::config_dir, Editor},
    engine::{SceneObject, SimulationSession},
    logging::{init_logging, LoggingConfig},
    project::Project,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const EDIT_USAGE: &str = "forge-studio edit [project.json]";
const SIMULATE_USAGE: &str = "forge-studio simulate <project.json> <seconds> [fps]";
const NEW_USAGE: &str = "forge-studio new <name> <dir>";

const DEFAULT_FPS: f64 = 60.0;

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        None => edit(None),
        Some("edit") => edit(args.next().as_deref()),
        Some("simulate") => {
            init_logging(LoggingConfig::default());
            let path = args.next().context(SIMULATE_USAGE)?;
            let seconds: f64 = args
                .next()
                .context(SIMULATE_USAGE)?
                .parse()
                .context("seconds must be a number")?;
            let fps: f64 = match args.next() {
                Some(fps) => fps.parse().context("fps must be a number")?,
                None => DEFAULT_FPS,
            };
            simulate(&path, seconds, fps)
        }
        Some("new") => {
            init_logging(LoggingConfig::default());
            let name = args.next().context(NEW_USAGE)?;
            let dir = args.next().context(NEW_USAGE)?;
            new_project(&name, &dir)
        }
        _ => bail!(
            "Forge Studio: terminal editor for hyper-casual game scenes\n\nUsage:\n  {EDIT_USAGE}\n  {SIMULATE_USAGE}\n  {NEW_USAGE}"
        ),
    }
}

fn edit(path: Option<&str>) -> Result<()> {
    // The alternate screen owns stderr; log to a file instead.
    init_logging(LoggingConfig {
        env_filter: None,
        file: Some(config_dir().join("forge.log")),
    });
    let mut editor = Editor::open(path)?;
    editor.run()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinalPosition<'a> {
    id: &'a str,
    name: &'a str,
    x: f64,
    y: f64,
    rotation: f64,
}

impl<'a> From<&'a SceneObject> for FinalPosition<'a> {
    fn from(obj: &'a SceneObject) -> Self {
        FinalPosition {
            id: &obj.id.0,
            name: &obj.name,
            x: obj.position.x,
            y: obj.position.y,
            rotation: obj.rotation,
        }
    }
}

/// Run a session headless on a fixed timestep and print where every object
/// ended up. The scene file is left untouched.
fn simulate(path: &str, seconds: f64, fps: f64) -> Result<()> {
    let frames = frame_count(seconds, fps)?;
    let project = Project::open(path)?;
    let mut scene = project.scene;
    let mut session = SimulationSession::new();

    let frame_ms = 1000.0 / fps;
    session.toggle(&mut scene, 0.0);
    for frame in 1..=frames {
        session.tick(&mut scene, frame as f64 * frame_ms);
    }
    let (steps, skipped) = session.counters();
    info!("simulated {frames} frames ({steps} stepped, {skipped} skipped)");

    let positions: Vec<FinalPosition> = scene.objects.iter().map(FinalPosition::from).collect();
    println!("{}", serde_json::to_string_pretty(&positions)?);
    Ok(())
}

/// Number of fixed-timestep frames covering `seconds` at `fps`.
fn frame_count(seconds: f64, fps: f64) -> Result<u64> {
    if !seconds.is_finite() || seconds < 0.0 || !fps.is_finite() || fps <= 0.0 {
        bail!("seconds must be a finite number >= 0 and fps a finite number > 0");
    }
    Ok((seconds * fps).round() as u64)
}

fn new_project(name: &str, dir: &str) -> Result<()> {
    let path = Project::file_in(dir, name);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    let project = Project::new(name, &path);
    project.save()?;
    eprintln!("Created {name} at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(2.0, 60.0).unwrap(), 120);
        assert_eq!(frame_count(0.0, 30.0).unwrap(), 0);
        assert_eq!(frame_count(0.51, 10.0).unwrap(), 5);
    }

    #[test]
    fn test_frame_count_rejects_unbounded_runs() {
        for (seconds, fps) in [
            (f64::INFINITY, 60.0),
            (f64::NAN, 60.0),
            (-1.0, 60.0),
            (1.0, 0.0),
            (1.0, f64::INFINITY),
            (1.0, f64::NAN),
        ] {
            assert!(frame_count(seconds, fps).is_err(), "{seconds} s at {fps} fps");
        }
    }
}
