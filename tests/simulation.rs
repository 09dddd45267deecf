use forge_studio::engine::repository::IdGenerator;
use forge_studio::engine::stepper::{BOUNCE, FLOOR_Y, GRAVITY, SCENE_UNIT_SCALE};
use forge_studio::engine::{ObjectKind, ObjectRepository, Scene, SimulationSession, Tick};
use forge_studio::project::{Project, PROJECT_FILE};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn repo_with(kinds: &[ObjectKind]) -> ObjectRepository {
    let mut repo = ObjectRepository::with_ids(Scene::default(), IdGenerator::with_seed(1));
    for kind in kinds {
        repo.add(kind);
    }
    repo
}

#[test]
fn test_box_falls_to_floor_and_bounces() {
    let mut repo = repo_with(&[ObjectKind::Box]);
    let scene = repo.scene_mut();
    let mut session = SimulationSession::new();
    session.toggle(scene, 0.0);

    let dt = FRAME_MS / 1000.0;
    let mut bounced = false;
    for frame in 1..=600 {
        let before = scene.objects[0].clone();
        assert_eq!(session.tick(scene, frame as f64 * FRAME_MS), Tick::Stepped);
        let after = &scene.objects[0];

        assert!(after.position.y <= FLOOR_Y, "frame {frame}: y = {}", after.position.y);

        let was_falling = before.position.y < FLOOR_Y;
        if !bounced && was_falling && after.position.y == FLOOR_Y {
            let vy_before = before.runtime.unwrap().vy;
            let vy_pre_clamp = vy_before + GRAVITY * dt * SCENE_UNIT_SCALE;
            let vy_after = after.runtime.unwrap().vy;
            assert!(vy_pre_clamp > 0.0);
            assert!(vy_after < 0.0);
            assert!((vy_after - vy_pre_clamp * BOUNCE).abs() < 1e-9);
            bounced = true;
        }
    }
    assert!(bounced, "box never reached the floor");
    // Unscripted bodies never drift sideways.
    assert_eq!(scene.objects[0].position.x, 50.0);
}

#[test]
fn test_stop_restores_authored_scene() {
    let mut repo = repo_with(&[ObjectKind::Box, ObjectKind::Circle, ObjectKind::Text]);
    let authored = repo.scene().clone();
    let mut session = SimulationSession::new();

    session.toggle(repo.scene_mut(), 1000.0);
    for frame in 1..=120 {
        session.tick(repo.scene_mut(), 1000.0 + frame as f64 * FRAME_MS);
    }
    assert_ne!(repo.scene(), &authored);

    session.toggle(repo.scene_mut(), 5000.0);
    assert_eq!(repo.scene(), &authored);
    assert!(repo.scene().objects.iter().all(|o| o.runtime.is_none()));
}

#[test]
fn test_lights_and_text_stay_put() {
    let mut repo = repo_with(&[ObjectKind::PointLight, ObjectKind::Text]);
    let authored = repo.scene().clone();
    let mut session = SimulationSession::new();
    session.toggle(repo.scene_mut(), 0.0);
    for frame in 1..=60 {
        session.tick(repo.scene_mut(), frame as f64 * FRAME_MS);
    }
    for (now, then) in repo.scene().objects.iter().zip(&authored.objects) {
        assert_eq!(now.position, then.position);
        assert_eq!(now.rotation, then.rotation);
    }
}

#[test]
fn test_duplicate_scenario() {
    let mut repo = repo_with(&[ObjectKind::Box]);
    let original = repo.selected().unwrap().clone();

    let copy_id = repo.duplicate(&original.id).unwrap();
    let copy = repo.scene().get(&copy_id).unwrap();

    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, format!("{}_Copy", original.name));
    assert_eq!(copy.position.x, original.position.x + 5.0);
    assert_eq!(copy.position.y, original.position.y);
    assert_eq!(copy.kind, original.kind);
    assert_eq!(copy.components, original.components);
    assert_eq!(copy.scale, original.scale);
    assert_eq!(repo.selected_id(), Some(&copy_id));
}

#[test]
fn test_saved_project_has_no_runtime_state() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Runner").join(PROJECT_FILE);

    let mut repo = repo_with(&[ObjectKind::Box]);
    let mut session = SimulationSession::new();
    session.toggle(repo.scene_mut(), 0.0);
    session.tick(repo.scene_mut(), FRAME_MS);
    session.ensure_stopped(repo.scene_mut());

    let mut project = Project::new("Runner", &path);
    project.scene = repo.into_scene();
    project.save()?;

    let json = std::fs::read_to_string(&path)?;
    assert!(!json.contains("runtime"));
    let loaded = Project::open(&path)?;
    assert_eq!(loaded.scene, project.scene);
    Ok(())
}
