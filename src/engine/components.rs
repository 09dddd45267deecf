//! Sparse per-object capability records.
//!
//! Every capability is an independent optional field. An absent record is
//! an absent capability, never an error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rigidbody: Option<Rigidbody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collider: Option<Collider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animator: Option<Animator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<Light>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Text>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<Ui>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
}

impl Components {
    /// True when the object carries a rigidbody with `is_dynamic` set.
    pub fn is_dynamic(&self) -> bool {
        self.rigidbody.as_ref().is_some_and(|rb| rb.is_dynamic)
    }

    pub fn is_scripted(&self) -> bool {
        self.script.is_some()
    }

    /// Display labels of the attached capabilities, in inspector order.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.rigidbody.is_some() {
            labels.push("Rigidbody 2D");
        }
        if self.collider.is_some() {
            labels.push("Collider");
        }
        if self.animator.is_some() {
            labels.push("Animator");
        }
        if self.audio.is_some() {
            labels.push("Audio Source");
        }
        if self.light.is_some() {
            labels.push("Light");
        }
        if self.text.is_some() {
            labels.push("Text");
        }
        if self.ui.is_some() {
            labels.push("UI");
        }
        if self.script.is_some() {
            labels.push("Script");
        }
        labels
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rigidbody {
    pub mass: f64,
    pub gravity_scale: f64,
    pub is_dynamic: bool,
}

impl Default for Rigidbody {
    fn default() -> Self {
        Rigidbody {
            mass: 1.0,
            gravity_scale: 1.0,
            is_dynamic: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderShape {
    #[default]
    Box,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collider {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub is_trigger: bool,
    #[serde(default)]
    pub shape: ColliderShape,
}

impl Collider {
    pub fn square(shape: ColliderShape) -> Self {
        Collider {
            width: 64.0,
            height: 64.0,
            is_trigger: false,
            shape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animator {
    pub current_clip: String,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audio {
    pub clip: String,
    pub volume: f64,
    pub play_on_awake: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightType {
    #[default]
    Point,
    Spot,
    Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub intensity: f64,
    pub range: f64,
    #[serde(rename = "type", default)]
    pub light_type: LightType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub content: String,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ui {
    pub interaction_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_requires_flag() {
        let mut c = Components::default();
        assert!(!c.is_dynamic());

        c.rigidbody = Some(Rigidbody {
            is_dynamic: false,
            ..Default::default()
        });
        assert!(!c.is_dynamic());

        c.rigidbody = Some(Rigidbody::default());
        assert!(c.is_dynamic());
    }

    #[test]
    fn test_missing_components_deserialize_as_absent() {
        let c: Components = serde_json::from_str(r#"{"text":{"content":"hi","fontSize":12}}"#)
            .unwrap();
        assert!(c.rigidbody.is_none());
        assert!(c.script.is_none());
        assert_eq!(c.text.as_ref().map(|t| t.content.as_str()), Some("hi"));
        assert_eq!(c.labels(), vec!["Text"]);
    }
}
