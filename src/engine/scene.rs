//! Scene data: the authored objects of a project.
//!
//! The scene is a flat collection keyed by id. Draw order is derived from
//! `z_index`; there is no parent/child graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Vec2;

use super::components::Components;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        ObjectId(s.to_string())
    }
}

/// Menu grouping of an object type. Decides the default color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    TwoD,
    Light,
}

impl Category {
    pub fn default_color(self) -> &'static str {
        match self {
            Category::Light => "#fef08a",
            Category::TwoD => "#3b82f6",
        }
    }
}

/// Object type. Unrecognized names survive a load as `Other` and render as
/// a generic placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    Text,
    EmptyItem,
    Box,
    Circle,
    SpritePlaceholder,
    PointLight,
    SpotLight,
    AudioPlaceholder,
    Other(String),
}

impl ObjectKind {
    /// Types offered by the hierarchy's add menu, grouped the way the menu
    /// shows them.
    pub fn menu() -> Vec<(&'static str, Vec<ObjectKind>)> {
        vec![
            (
                "2D Objects",
                vec![
                    ObjectKind::Text,
                    ObjectKind::EmptyItem,
                    ObjectKind::Box,
                    ObjectKind::Circle,
                    ObjectKind::SpritePlaceholder,
                ],
            ),
            ("Lighting", vec![ObjectKind::PointLight, ObjectKind::SpotLight]),
            ("Audio", vec![ObjectKind::AudioPlaceholder]),
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            ObjectKind::Text => "Text",
            ObjectKind::EmptyItem => "Empty Item",
            ObjectKind::Box => "Box",
            ObjectKind::Circle => "Circle",
            ObjectKind::SpritePlaceholder => "Sprite Placeholder",
            ObjectKind::PointLight => "Point Light",
            ObjectKind::SpotLight => "Spot Light",
            ObjectKind::AudioPlaceholder => "Audio Placeholder",
            ObjectKind::Other(name) => name,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            ObjectKind::PointLight | ObjectKind::SpotLight => Category::Light,
            _ => Category::TwoD,
        }
    }

    /// All addable kinds in menu order.
    pub fn menu_items() -> Vec<ObjectKind> {
        Self::menu().into_iter().flat_map(|(_, kinds)| kinds).collect()
    }
}

impl From<String> for ObjectKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Text" => ObjectKind::Text,
            "Empty Item" => ObjectKind::EmptyItem,
            "Box" => ObjectKind::Box,
            "Circle" => ObjectKind::Circle,
            "Sprite Placeholder" => ObjectKind::SpritePlaceholder,
            "Point Light" => ObjectKind::PointLight,
            "Spot Light" => ObjectKind::SpotLight,
            "Audio Placeholder" => ObjectKind::AudioPlaceholder,
            _ => ObjectKind::Other(name),
        }
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        kind.name().to_string()
    }
}

/// Velocities carried by an object while a simulation session runs.
/// Scene units per second and degrees per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub vx: f64,
    pub vy: f64,
    pub vr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub position: Vec2,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale: Vec2,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
    #[serde(default)]
    pub components: Components,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Kinematics>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn default_scale() -> Vec2 {
    Vec2::ONE
}

fn default_color() -> String {
    Category::TwoD.default_color().to_string()
}

impl SceneObject {
    /// Glyph shown in the viewport: text objects show their content's first
    /// character, lights a star, everything else its type initial.
    pub fn glyph(&self) -> char {
        if let Some(text) = &self.components.text {
            if let Some(c) = text.content.chars().next() {
                return c;
            }
        }
        if self.components.light.is_some() {
            return '*';
        }
        self.kind.name().chars().next().unwrap_or('?')
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Scene { objects }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| &o.id == id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Objects in hierarchy order: highest `z_index` first. Ties keep
    /// insertion order.
    pub fn by_z_desc(&self) -> Vec<&SceneObject> {
        let mut sorted: Vec<&SceneObject> = self.objects.iter().collect();
        sorted.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        sorted
    }

    /// Drop every object's kinematic state.
    pub fn clear_runtime(&mut self) {
        for obj in &mut self.objects {
            obj.runtime = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(id: &str, kind: ObjectKind, z: i32) -> SceneObject {
        SceneObject {
            id: ObjectId::from(id),
            name: id.to_string(),
            kind,
            position: Vec2::new(50.0, 50.0),
            rotation: 0.0,
            scale: Vec2::ONE,
            z_index: z,
            color: default_color(),
            locked: false,
            components: Components::default(),
            runtime: None,
        }
    }

    #[test]
    fn test_unknown_kind_survives_load() {
        let json = r#"{"id":"a","name":"Thing","type":"Particle Emitter","position":{"x":1,"y":2}}"#;
        let obj: SceneObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.kind, ObjectKind::Other("Particle Emitter".into()));
        assert_eq!(obj.glyph(), 'P');
        assert_eq!(obj.scale, Vec2::ONE);
        assert!(obj.runtime.is_none());

        let back = serde_json::to_value(&obj).unwrap();
        assert_eq!(back["type"], "Particle Emitter");
    }

    #[test]
    fn test_category_colors() {
        assert_eq!(ObjectKind::SpotLight.category().default_color(), "#fef08a");
        for kind in [ObjectKind::Box, ObjectKind::Text, ObjectKind::Other("Widget".into())] {
            assert_eq!(kind.category(), Category::TwoD);
        }
        assert_eq!(Category::TwoD.default_color(), "#3b82f6");
    }

    #[test]
    fn test_hierarchy_order() {
        let scene = Scene::new(vec![
            object("low", ObjectKind::Box, 0),
            object("high", ObjectKind::Circle, 2),
            object("mid", ObjectKind::Text, 1),
        ]);
        let names: Vec<&str> = scene.by_z_desc().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_glyphs() {
        let mut text = object("t", ObjectKind::Text, 0);
        text.components.text = Some(super::super::components::Text {
            content: "Hello".into(),
            font_size: 24.0,
        });
        assert_eq!(text.glyph(), 'H');

        let mut light = object("l", ObjectKind::PointLight, 0);
        light.components.light = Some(super::super::components::Light {
            intensity: 1.0,
            range: 100.0,
            light_type: Default::default(),
        });
        assert_eq!(light.glyph(), '*');

        assert_eq!(object("b", ObjectKind::Box, 0).glyph(), 'B');
    }
}
