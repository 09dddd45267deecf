//! Static architecture notes shown in the Architecture tab.

pub struct ArchitectureModule {
    pub name: &'static str,
    pub description: &'static str,
    pub classes: &'static [&'static str],
    pub snippet: &'static str,
}

pub const TITLE: &str = "Native C++ Software Architecture";

pub const INTRO: &str = "HyperCasual Forge is built on a high-performance, modular C++ core \
designed specifically for mobile workloads. Below is the blueprint for the engine modules \
and internal API.";

pub const MODULES: &[ArchitectureModule] = &[
    ArchitectureModule {
        name: "Core ECS & SceneObject",
        description: "The base Entity-Component-System foundation. SceneObject manages a \
collection of modular components.",
        classes: &["Component", "SceneObject", "Scene", "EntityManager"],
        snippet: "// SceneObject.h
class Component;
class SceneObject {
public:
    uint32_t id;
    std::string name;

    template<typename T, typename... Args>
    T& AddComponent(Args&&... args) {
        auto comp = std::make_unique<T>(std::forward<Args>(args)...);
        comp->owner = this;
        m_Components.push_back(std::move(comp));
        return static_cast<T&>(*m_Components.back());
    }

    void Update(float dt) {
        for(auto& comp : m_Components) comp->OnUpdate(dt);
    }

private:
    std::vector<std::unique_ptr<Component>> m_Components;
};",
    },
    ArchitectureModule {
        name: "Transform & Physics (Box2D)",
        description: "Handles spatial data and integrates with Box2D for rigid-body dynamics \
and collision detection.",
        classes: &["TransformComponent", "Rigidbody2D", "BoxCollider2D", "PhysicsWorld"],
        snippet: "// PhysicsComponents.h
struct TransformComponent : public Component {
    Vector2 position;
    float rotation;
    Vector2 scale = {1, 1};
};

class Rigidbody2D : public Component {
public:
    float mass = 1.0f;
    float gravityScale = 1.0f;
    bool isFixedRotation = false;

    void ApplyForce(Vector2 force);
private:
    b2Body* m_RuntimeBody; // Box2D Integration
};",
    },
    ArchitectureModule {
        name: "Rendering & Animation",
        description: "Manages sprite drawing, vertex color tinting, and keyframe-based sprite \
animations.",
        classes: &["SpriteRenderer", "Animator", "AnimationClip", "RenderQueue"],
        snippet: "// GraphicsComponents.h
class SpriteRenderer : public Component {
public:
    Texture* sprite;
    Color tint = {1, 1, 1, 1};
    int zOrder = 0;

    void OnRender(Renderer& renderer) override {
        renderer.Draw(sprite, owner->transform, tint, zOrder);
    }
};

class Animator : public Component {
public:
    void Play(std::string clipName);
    void Update(float dt);
private:
    std::map<std::string, AnimationClip> m_Clips;
    float m_CurrentFrameTime;
};",
    },
    ArchitectureModule {
        name: "Scripting & Behavior (V8/Lua)",
        description: "Bridges native C++ events to high-level scripts. Supports hot-reloading \
and event hooks.",
        classes: &["ScriptComponent", "Behavior", "EventSystem", "ScriptRegistry"],
        snippet: "// Scripting.h
class ScriptComponent : public Component {
public:
    std::string scriptPath;

    void OnUpdate(float dt) override {
        // Execute JS hook: onUpdate(dt)
        ScriptEngine::Execute(m_InstanceId, \"onUpdate\", dt);
    }

    void OnCollision(Entity* other) {
        ScriptEngine::Execute(m_InstanceId, \"onCollision\", other->id);
    }
private:
    uint32_t m_InstanceId;
};",
    },
];

/// Mobile integration strategy: (heading, body).
pub const INTEGRATION: &[(&str, &str)] = &[
    (
        "Rendering",
        "Uses Vulkan on Android and Metal on iOS via a thin abstraction layer (similar to \
bgfx). Optimized for fill-rate and batching simple hyper-casual geometry.",
    ),
    (
        "Physics",
        "Integrated Box2D for 2D logic or Bullet for simple 3D collisions. Fixed-step \
simulation decoupled from rendering for frame-pacing stability.",
    ),
    (
        "Input",
        "Unified touch event queue processing tap, swipe, and drag gestures directly piped \
to the JavaScript scripting engine.",
    ),
];

/// Recommended source layout: (directory, note).
pub const FOLDERS: &[(&str, &str)] = &[
    ("/src", ""),
    ("  /editor", "ImGui Workspace"),
    ("  /runtime", "Game Engine Core"),
    ("  /renderer", ""),
    ("  /scripting", ""),
    ("  /exporter", "Build Systems"),
    ("/third_party", ""),
    ("  /v8", "JS Engine"),
    ("  /imgui", "UI Framework"),
    ("  /box2d", "Physics"),
    ("  /assimp", "Asset Loading"),
];

/// Script shown in the Scripting tab.
pub const SAMPLE_SCRIPT_PATH: &str = "/scripts/world_controller.js";
pub const SAMPLE_SCRIPT: &str = "// Logic Engine Hooked...

class Main extends Forge.Entity {
  onUpdate(dt) {
    this.rotate(5 * dt);
    if (Forge.Input.isPressed('space')) {
      this.jump();
    }
  }
}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Heading,
    Body,
    Code,
    Blank,
}

/// Flatten the document into display lines, wrapping prose at `width`.
/// Code is never wrapped; the viewer clips it.
pub fn lines(width: usize) -> Vec<(LineKind, String)> {
    let width = width.max(20);
    let mut out = Vec::new();
    let blank = |out: &mut Vec<(LineKind, String)>| out.push((LineKind::Blank, String::new()));

    out.push((LineKind::Title, TITLE.to_string()));
    out.extend(wrap(INTRO, width).into_iter().map(|l| (LineKind::Body, l)));
    blank(&mut out);

    for module in MODULES {
        out.push((LineKind::Heading, module.name.to_string()));
        out.extend(wrap(module.description, width).into_iter().map(|l| (LineKind::Body, l)));
        let classes = format!("Key classes: {}", module.classes.join(", "));
        out.extend(wrap(&classes, width).into_iter().map(|l| (LineKind::Body, l)));
        for line in module.snippet.lines() {
            out.push((LineKind::Code, format!("  {line}")));
        }
        blank(&mut out);
    }

    out.push((LineKind::Heading, "Mobile Engine Integration Strategy".to_string()));
    for (heading, body) in INTEGRATION {
        out.push((LineKind::Body, format!("{heading}:")));
        out.extend(wrap(body, width.saturating_sub(2)).into_iter().map(|l| (LineKind::Body, format!("  {l}"))));
    }
    blank(&mut out);

    out.push((LineKind::Heading, "Project Folder Organization".to_string()));
    for (dir, note) in FOLDERS {
        let line = if note.is_empty() {
            dir.to_string()
        } else {
            format!("{dir:<14}// {note}")
        };
        out.push((LineKind::Code, line));
    }
    out
}

/// Greedy word wrap.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a bb ccc dddd", 6), vec!["a bb", "ccc", "dddd"]);
        assert_eq!(wrap("", 10), Vec::<String>::new());
        assert_eq!(wrap("unbreakableword", 4), vec!["unbreakableword"]);
    }

    #[test]
    fn test_document_lists_every_module() {
        let lines = lines(60);
        let headings: Vec<&str> = lines
            .iter()
            .filter(|(kind, _)| *kind == LineKind::Heading)
            .map(|(_, text)| text.as_str())
            .collect();
        for module in MODULES {
            assert!(headings.contains(&module.name));
        }
        assert!(lines.iter().any(|(_, l)| l.contains("b2Body* m_RuntimeBody")));
        assert!(
            lines
                .iter()
                .filter(|(kind, _)| *kind == LineKind::Body)
                .all(|(_, l)| l.chars().count() <= 60)
        );
    }
}
