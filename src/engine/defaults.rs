use crate::types::Vec2;

use super::components::*;
use super::scene::{ObjectId, ObjectKind, SceneObject};

/// Where new objects appear, in viewport percent.
pub const SPAWN_POSITION: Vec2 = Vec2::new(50.0, 50.0);

/// Build a freshly added object of `kind`. `index` is the number of objects
/// already in the scene; it picks the name suffix and the z-index.
pub fn create_default(kind: &ObjectKind, id: ObjectId, index: usize) -> SceneObject {
    SceneObject {
        id,
        name: format!("{}_{}", kind.name(), index + 1),
        kind: kind.clone(),
        position: SPAWN_POSITION,
        rotation: 0.0,
        scale: Vec2::ONE,
        z_index: index as i32,
        color: kind.category().default_color().to_string(),
        locked: false,
        components: default_components(kind),
        runtime: None,
    }
}

fn default_components(kind: &ObjectKind) -> Components {
    let mut components = Components::default();
    match kind {
        ObjectKind::Box => {
            components.collider = Some(Collider::square(ColliderShape::Box));
            components.rigidbody = Some(Rigidbody::default());
        }
        ObjectKind::Circle => {
            components.collider = Some(Collider::square(ColliderShape::Circle));
            components.rigidbody = Some(Rigidbody::default());
        }
        ObjectKind::Text => {
            components.text = Some(Text {
                content: "New Text".into(),
                font_size: 24.0,
            });
        }
        ObjectKind::PointLight | ObjectKind::SpotLight => {
            components.light = Some(Light {
                intensity: 1.0,
                range: 100.0,
                light_type: if *kind == ObjectKind::SpotLight {
                    LightType::Spot
                } else {
                    LightType::Point
                },
            });
        }
        ObjectKind::AudioPlaceholder => {
            components.audio = Some(Audio {
                clip: "ambient.wav".into(),
                volume: 0.5,
                play_on_awake: true,
            });
        }
        ObjectKind::EmptyItem | ObjectKind::SpritePlaceholder | ObjectKind::Other(_) => {}
    }
    components
}

/// Script attached by the inspector's "Add Native Component".
pub fn default_script() -> Script {
    Script {
        source: "/scripts/world_controller.js".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_and_circle_are_dynamic() {
        for (kind, shape) in [
            (ObjectKind::Box, ColliderShape::Box),
            (ObjectKind::Circle, ColliderShape::Circle),
        ] {
            let obj = create_default(&kind, ObjectId::from("x"), 0);
            assert!(obj.components.is_dynamic());
            let collider = obj.components.collider.unwrap();
            assert_eq!(collider.shape, shape);
            assert_eq!((collider.width, collider.height), (64.0, 64.0));
        }
    }

    #[test]
    fn test_naming_colors_and_z() {
        let light = create_default(&ObjectKind::SpotLight, ObjectId::from("l"), 3);
        assert_eq!(light.name, "Spot Light_4");
        assert_eq!(light.z_index, 3);
        assert_eq!(light.color, "#fef08a");
        assert_eq!(light.components.light.unwrap().light_type, LightType::Spot);

        let text = create_default(&ObjectKind::Text, ObjectId::from("t"), 0);
        assert_eq!(text.color, "#3b82f6");
        assert_eq!(text.position, SPAWN_POSITION);
        assert_eq!(text.components.text.unwrap().content, "New Text");
        assert!(text.components.rigidbody.is_none());
    }

    #[test]
    fn test_placeholders_carry_no_physics() {
        let sprite = create_default(&ObjectKind::SpritePlaceholder, ObjectId::from("s"), 0);
        assert!(sprite.components.labels().is_empty());

        let audio = create_default(&ObjectKind::AudioPlaceholder, ObjectId::from("a"), 0);
        assert_eq!(audio.components.audio.unwrap().clip, "ambient.wav");
    }
}
