#![forbid(unsafe_code)]

//! Stage: the arena of visual nodes and the single write surface.
//!
//! Controllers never touch the host's real render tree. They allocate
//! [`NodeId`] handles here, and every animated property (scale, clip,
//! text, color, pin offset) is written through the [`Stage`]. The host
//! reads the node state back each frame and applies it however it
//! renders.
//!
//! Properties are `Option`s: `None` is the *neutral* state — no override
//! in effect, the host's static styling applies. Teardown clears
//! overrides back to neutral rather than writing sentinel values.
//!
//! # Invariants
//!
//! 1. Handles are only produced by [`Stage::alloc`]; a released handle is
//!    never written through again by the controller that released it.
//! 2. Writes through a stale or foreign handle are dropped (checked
//!    no-op), never a panic: page variants may omit whole sections.
//!
//! # Failure Modes
//!
//! - Double release: the second release is a no-op.

/// Handle to one visual node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

use vitrine_core::tween::ClipShape;

/// Animated state of one visual node. `None` means no override (neutral).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualNode {
    /// Uniform scale override.
    pub scale: Option<f32>,
    /// Clip shape override.
    pub clip: Option<ClipShape>,
    /// Text content override.
    pub text: Option<String>,
    /// Text color override.
    pub color: Option<String>,
    /// Image asset reference.
    pub image: Option<String>,
    /// Screen-fix offset while pinned: how far past the pin start the
    /// scroll has travelled. `None` = not pinned.
    pub pin_offset: Option<f32>,
}

/// Arena of visual nodes with a free list.
#[derive(Debug, Default)]
pub struct Stage {
    nodes: Vec<Option<VisualNode>>,
    free: Vec<u32>,
}

impl Stage {
    /// Create an empty stage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node in its neutral state.
    pub fn alloc(&mut self) -> NodeId {
        if let Some(slot) = self.free.pop() {
            self.nodes[slot as usize] = Some(VisualNode::default());
            NodeId(slot)
        } else {
            self.nodes.push(Some(VisualNode::default()));
            NodeId((self.nodes.len() - 1) as u32)
        }
    }

    /// Release a node. Further writes through the handle are dropped.
    pub fn release(&mut self, id: NodeId) {
        let slot = id.0 as usize;
        if slot < self.nodes.len() && self.nodes[slot].is_some() {
            self.nodes[slot] = None;
            self.free.push(id.0);
        }
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether no nodes are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a node's state.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut VisualNode> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /// Force-set the scale override.
    pub fn set_scale(&mut self, id: NodeId, scale: f32) {
        if let Some(node) = self.node_mut(id) {
            node.scale = Some(scale);
        }
    }

    /// Clear the scale override back to neutral.
    pub fn clear_scale(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.scale = None;
        }
    }

    /// Current scale override.
    #[must_use]
    pub fn scale(&self, id: NodeId) -> Option<f32> {
        self.node(id).and_then(|n| n.scale)
    }

    /// Force-set the clip shape.
    pub fn set_clip(&mut self, id: NodeId, clip: ClipShape) {
        if let Some(node) = self.node_mut(id) {
            node.clip = Some(clip);
        }
    }

    /// Clear the clip override back to neutral.
    pub fn clear_clip(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.clip = None;
        }
    }

    /// Current clip override.
    #[must_use]
    pub fn clip(&self, id: NodeId) -> Option<ClipShape> {
        self.node(id).and_then(|n| n.clip)
    }

    /// Set the text content.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = Some(text.into());
        }
    }

    /// Current text content.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.text.as_deref())
    }

    /// Set the text color.
    pub fn set_color(&mut self, id: NodeId, color: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.color = Some(color.into());
        }
    }

    /// Clear the color override.
    pub fn clear_color(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.color = None;
        }
    }

    /// Current text color.
    #[must_use]
    pub fn color(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.color.as_deref())
    }

    /// Set the image asset reference.
    pub fn set_image(&mut self, id: NodeId, image: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.image = Some(image.into());
        }
    }

    /// Current image asset reference.
    #[must_use]
    pub fn image(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.image.as_deref())
    }

    /// Pin the node at the viewport top, `offset` past the pin start.
    pub fn set_pin_offset(&mut self, id: NodeId, offset: f32) {
        if let Some(node) = self.node_mut(id) {
            node.pin_offset = Some(offset);
        }
    }

    /// Unpin the node.
    pub fn clear_pin_offset(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.pin_offset = None;
        }
    }

    /// Current pin offset.
    #[must_use]
    pub fn pin_offset(&self, id: NodeId) -> Option<f32> {
        self.node(id).and_then(|n| n.pin_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_starts_neutral() {
        let mut stage = Stage::new();
        let id = stage.alloc();
        assert_eq!(stage.node(id), Some(&VisualNode::default()));
        assert_eq!(stage.scale(id), None);
    }

    #[test]
    fn writes_round_trip() {
        let mut stage = Stage::new();
        let id = stage.alloc();

        stage.set_scale(id, 0.5);
        stage.set_clip(id, ClipShape::OPEN);
        stage.set_text(id, "Samuel Godin");
        stage.set_color(id, "tone-500");
        stage.set_pin_offset(id, 120.0);

        assert_eq!(stage.scale(id), Some(0.5));
        assert_eq!(stage.clip(id), Some(ClipShape::OPEN));
        assert_eq!(stage.text(id), Some("Samuel Godin"));
        assert_eq!(stage.color(id), Some("tone-500"));
        assert_eq!(stage.pin_offset(id), Some(120.0));
    }

    #[test]
    fn clear_returns_to_neutral() {
        let mut stage = Stage::new();
        let id = stage.alloc();
        stage.set_scale(id, 1.0);
        stage.clear_scale(id);
        assert_eq!(stage.scale(id), None);
    }

    #[test]
    fn released_handles_drop_writes() {
        let mut stage = Stage::new();
        let id = stage.alloc();
        stage.release(id);

        stage.set_scale(id, 1.0);
        assert_eq!(stage.node(id), None);
        assert!(stage.is_empty());
    }

    #[test]
    fn double_release_is_noop() {
        let mut stage = Stage::new();
        let id = stage.alloc();
        stage.release(id);
        stage.release(id);
        // The free list holds the slot once; two allocs yield distinct slots.
        let a = stage.alloc();
        let b = stage.alloc();
        assert_ne!(a, b);
        assert_eq!(stage.len(), 2);
    }

    #[test]
    fn slots_are_reused() {
        let mut stage = Stage::new();
        let a = stage.alloc();
        stage.release(a);
        let b = stage.alloc();
        assert_eq!(a, b);
        assert_eq!(stage.len(), 1);
    }
}
