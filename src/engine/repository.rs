//! Object repository: the authoring side of the scene.
//!
//! Owns the live scene and the current selection. Every edit that creates,
//! removes or copies an object goes through here so ids stay unique.

use std::time::{SystemTime, UNIX_EPOCH};

use log::info;

use super::defaults::{create_default, default_script};
use super::scene::{ObjectId, ObjectKind, Scene, SceneObject};

/// Offset applied to `position.x` of a duplicated object.
pub const DUPLICATE_OFFSET_X: f64 = 5.0;

const ID_LEN: u32 = 9;
const ID_SPACE: u64 = 36u64.pow(ID_LEN);
/// Odd multiplier so consecutive counters land far apart in the id space.
const ID_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15 % ID_SPACE | 1;

/// Produces short base-36 ids. Sequence is deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    state: u64,
}

impl IdGenerator {
    pub fn with_seed(seed: u64) -> Self {
        IdGenerator {
            state: seed % ID_SPACE,
        }
    }

    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::with_seed(seed)
    }

    pub fn next_id(&mut self) -> ObjectId {
        self.state = (self.state + ID_STRIDE) % ID_SPACE;
        ObjectId(to_base36(self.state))
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = vec![b'0'; ID_LEN as usize];
    for slot in out.iter_mut().rev() {
        *slot = DIGITS[(n % 36) as usize];
        n /= 36;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[derive(Debug)]
pub struct ObjectRepository {
    scene: Scene,
    selected: Option<ObjectId>,
    ids: IdGenerator,
}

impl ObjectRepository {
    pub fn new(scene: Scene) -> Self {
        Self::with_ids(scene, IdGenerator::from_clock())
    }

    pub fn with_ids(scene: Scene, ids: IdGenerator) -> Self {
        ObjectRepository {
            scene,
            selected: None,
            ids,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for the simulation session. Selection is
    /// re-validated on the next `selected()` call.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }

    fn fresh_id(&mut self) -> ObjectId {
        loop {
            let id = self.ids.next_id();
            if !self.scene.contains(&id) {
                return id;
            }
        }
    }

    /// Add a default object of `kind` and select it.
    pub fn add(&mut self, kind: &ObjectKind) -> ObjectId {
        let id = self.fresh_id();
        let obj = create_default(kind, id.clone(), self.scene.len());
        info!("added {} ({})", obj.name, obj.id);
        self.scene.objects.push(obj);
        self.selected = Some(id.clone());
        id
    }

    pub fn remove(&mut self, id: &ObjectId) -> Option<SceneObject> {
        let index = self.scene.objects.iter().position(|o| &o.id == id)?;
        let removed = self.scene.objects.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        info!("removed {} ({})", removed.name, removed.id);
        Some(removed)
    }

    pub fn remove_selected(&mut self) -> Option<SceneObject> {
        let id = self.selected.clone()?;
        self.remove(&id)
    }

    /// Copy `id` under a new id, shifted right, and select the copy.
    pub fn duplicate(&mut self, id: &ObjectId) -> Option<ObjectId> {
        let original = self.scene.get(id)?.clone();
        let new_id = self.fresh_id();
        let mut copy = original;
        copy.id = new_id.clone();
        copy.name = format!("{}_Copy", copy.name);
        copy.position.x += DUPLICATE_OFFSET_X;
        info!("duplicated {id} as {} ({new_id})", copy.name);
        self.scene.objects.push(copy);
        self.selected = Some(new_id.clone());
        Some(new_id)
    }

    pub fn duplicate_selected(&mut self) -> Option<ObjectId> {
        let id = self.selected.clone()?;
        self.duplicate(&id)
    }

    /// Select `id`, or clear the selection with `None`. Unknown ids clear it.
    pub fn select(&mut self, id: Option<ObjectId>) {
        self.selected = id.filter(|id| self.scene.contains(id));
    }

    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.selected.as_ref().filter(|id| self.scene.contains(id))
    }

    pub fn selected(&self) -> Option<&SceneObject> {
        self.selected.as_ref().and_then(|id| self.scene.get(id))
    }

    /// Objects in hierarchy order (z-index descending).
    pub fn hierarchy(&self) -> Vec<&SceneObject> {
        self.scene.by_z_desc()
    }

    /// Move the selection `delta` rows through the hierarchy, wrapping.
    pub fn select_relative(&mut self, delta: isize) {
        let order: Vec<ObjectId> = self.hierarchy().iter().map(|o| o.id.clone()).collect();
        if order.is_empty() {
            self.selected = None;
            return;
        }
        let len = order.len() as isize;
        let next = match self.selected_id().and_then(|id| order.iter().position(|o| o == id)) {
            Some(current) => (current as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.selected = Some(order[next as usize].clone());
    }

    /// Flip `is_dynamic` on the object's rigidbody. Returns the new value,
    /// or `None` when the object has no rigidbody.
    pub fn toggle_dynamic(&mut self, id: &ObjectId) -> Option<bool> {
        let rb = self.scene.get_mut(id)?.components.rigidbody.as_mut()?;
        rb.is_dynamic = !rb.is_dynamic;
        Some(rb.is_dynamic)
    }

    /// Attach the default script component. Returns false when the object
    /// is unknown or already scripted.
    pub fn attach_script(&mut self, id: &ObjectId) -> bool {
        match self.scene.get_mut(id) {
            Some(obj) if obj.components.script.is_none() => {
                obj.components.script = Some(default_script());
                info!("attached script to {}", obj.name);
                true
            }
            _ => false,
        }
    }

    pub fn toggle_lock(&mut self, id: &ObjectId) -> Option<bool> {
        let obj = self.scene.get_mut(id)?;
        obj.locked = !obj.locked;
        Some(obj.locked)
    }

    fn unlocked_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.scene.get_mut(id).filter(|o| !o.locked)
    }

    /// Move by `(dx, dy)` viewport percent. Locked objects do not move.
    pub fn translate(&mut self, id: &ObjectId, dx: f64, dy: f64) -> bool {
        match self.unlocked_mut(id) {
            Some(obj) => {
                obj.position.x += dx;
                obj.position.y += dy;
                true
            }
            None => false,
        }
    }

    pub fn rotate(&mut self, id: &ObjectId, degrees: f64) -> bool {
        match self.unlocked_mut(id) {
            Some(obj) => {
                obj.rotation += degrees;
                true
            }
            None => false,
        }
    }

    /// Add `delta` to both scale axes, never going below zero.
    pub fn scale_by(&mut self, id: &ObjectId, delta: f64) -> bool {
        match self.unlocked_mut(id) {
            Some(obj) => {
                obj.scale.x = (obj.scale.x + delta).max(0.0);
                obj.scale.y = (obj.scale.y + delta).max(0.0);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec2;

    fn repo() -> ObjectRepository {
        ObjectRepository::with_ids(Scene::default(), IdGenerator::with_seed(42))
    }

    #[test]
    fn test_ids_are_unique_and_opaque() {
        let mut ids = IdGenerator::with_seed(7);
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.0.len(), 9);
        assert!(a.0.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_add_selects_and_names() {
        let mut repo = repo();
        let first = repo.add(&ObjectKind::Box);
        let second = repo.add(&ObjectKind::Circle);
        assert_ne!(first, second);
        assert_eq!(repo.selected_id(), Some(&second));

        let names: Vec<&str> = repo.scene().objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Box_1", "Circle_2"]);
        assert_eq!(repo.hierarchy()[0].id, second);
    }

    #[test]
    fn test_duplicate_offsets_copy() {
        let mut repo = repo();
        let id = repo.add(&ObjectKind::Box);
        let copy_id = repo.duplicate(&id).unwrap();
        assert_ne!(copy_id, id);
        assert_eq!(repo.selected_id(), Some(&copy_id));

        let original = repo.scene().get(&id).unwrap().clone();
        let copy = repo.scene().get(&copy_id).unwrap().clone();
        assert_eq!(copy.position.x, original.position.x + DUPLICATE_OFFSET_X);
        assert_eq!(copy.name, "Box_1_Copy");

        let mut normalized = copy.clone();
        normalized.id = original.id.clone();
        normalized.name = original.name.clone();
        normalized.position = original.position;
        assert_eq!(normalized, original);
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut repo = repo();
        repo.add(&ObjectKind::Text);
        let removed = repo.remove_selected().unwrap();
        assert_eq!(removed.name, "Text_1");
        assert!(repo.scene().is_empty());
        assert!(repo.selected().is_none());
        assert!(repo.remove_selected().is_none());
        assert!(repo.duplicate_selected().is_none());
    }

    #[test]
    fn test_select_relative_wraps() {
        let mut repo = repo();
        let a = repo.add(&ObjectKind::Box);
        let b = repo.add(&ObjectKind::Box);
        repo.select(None);

        repo.select_relative(1);
        assert_eq!(repo.selected_id(), Some(&b));
        repo.select_relative(1);
        assert_eq!(repo.selected_id(), Some(&a));
        repo.select_relative(1);
        assert_eq!(repo.selected_id(), Some(&b));
        repo.select_relative(-1);
        assert_eq!(repo.selected_id(), Some(&a));
    }

    #[test]
    fn test_inspector_edits() {
        let mut repo = repo();
        let id = repo.add(&ObjectKind::Box);
        assert_eq!(repo.toggle_dynamic(&id), Some(false));
        assert_eq!(repo.toggle_dynamic(&id), Some(true));

        let text = repo.add(&ObjectKind::Text);
        assert_eq!(repo.toggle_dynamic(&text), None);
        assert!(repo.attach_script(&text));
        assert!(!repo.attach_script(&text));
    }

    #[test]
    fn test_locked_objects_ignore_transforms() {
        let mut repo = repo();
        let id = repo.add(&ObjectKind::Circle);
        assert!(repo.translate(&id, 2.0, -3.0));
        assert_eq!(repo.scene().get(&id).unwrap().position, Vec2::new(52.0, 47.0));

        repo.toggle_lock(&id);
        assert!(!repo.translate(&id, 2.0, 0.0));
        assert!(!repo.rotate(&id, 15.0));
        assert!(!repo.scale_by(&id, 0.1));
        assert_eq!(repo.scene().get(&id).unwrap().position, Vec2::new(52.0, 47.0));
    }

    #[test]
    fn test_scale_never_negative() {
        let mut repo = repo();
        let id = repo.add(&ObjectKind::Box);
        repo.scale_by(&id, -5.0);
        assert_eq!(repo.scene().get(&id).unwrap().scale, Vec2::new(0.0, 0.0));
    }
}
