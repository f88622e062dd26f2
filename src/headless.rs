//! Browser-free backend: an in-memory DOM, a virtual clock and an outbound
//! recorder.
//!
//! [`MemoryDom`] models just enough of the document for the bindings: an
//! element tree rooted at `<body>`, attributes, classes, inline styles,
//! bounding rects and recorded Web Animations whose `finished` callbacks the
//! caller fires explicitly (or never, to simulate a missing API). Paired with
//! [`ManualScheduler`], timers advance only when told to, so effect lifetimes
//! can be asserted step by step.

#[cfg(test)]
#[path = "headless_test.rs"]
mod headless_test;

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;

use crate::binding::{Env, Outbound};
use crate::dom::{Dom, DomError, Keyframe, OnFinish, Rect, Timing, Viewport};
use crate::schedule::{Scheduler, Task};

/// Delay a frame callback waits on the virtual clock.
pub const FRAME_MS: u64 = 16;

/// Handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    rect: Rect,
    reflows: usize,
}

/// A Web Animation started through [`Dom::animate`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAnimation {
    pub node: NodeId,
    pub keyframes: Vec<Keyframe>,
    pub timing: Timing,
}

/// In-memory document.
pub struct MemoryDom {
    nodes: Vec<NodeData>,
    body: NodeId,
    viewport: Viewport,
    animations: Vec<RecordedAnimation>,
    pending_finish: Vec<OnFinish<MemoryDom>>,
    animation_supported: bool,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// An empty document with a 1024x768 viewport.
    #[must_use]
    pub fn new() -> Self {
        let body = NodeData { tag: "body".to_owned(), ..NodeData::default() };
        Self {
            nodes: vec![body],
            body: NodeId(0),
            viewport: Viewport { width: 1024.0, height: 768.0 },
            animations: Vec::new(),
            pending_finish: Vec::new(),
            animation_supported: true,
        }
    }

    #[must_use]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create an element with `classes` and append it under `parent`.
    pub fn insert(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let id = self.alloc(tag);
        for class in classes {
            self.add_class(&id, class);
        }
        self.append(&parent, &id);
        id
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.rect = rect;
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport { width, height };
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.attrs.remove(name);
        }
    }

    /// Make [`Dom::animate`] fail as if the Web Animations API were missing.
    pub fn set_animation_supported(&mut self, supported: bool) {
        self.animation_supported = supported;
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|data| data.tag.as_str())
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|data| data.parent)
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.get(node.0).map(|data| data.children.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn style(&self, node: NodeId, prop: &str) -> Option<&str> {
        self.nodes.get(node.0).and_then(|data| data.styles.get(prop)).map(String::as_str)
    }

    /// How many times layout was forced on `node`.
    #[must_use]
    pub fn reflows(&self, node: NodeId) -> usize {
        self.nodes.get(node.0).map_or(0, |data| data.reflows)
    }

    /// Attached nodes carrying `class`, anywhere in the document.
    #[must_use]
    pub fn count_class(&self, class: &str) -> usize {
        self.find_all(&self.body, class).len()
    }

    #[must_use]
    pub fn animations(&self) -> &[RecordedAnimation] {
        &self.animations
    }

    /// Fire every outstanding `finished` callback, in start order.
    pub fn finish_animations(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_finish);
        let count = pending.len();
        for on_finish in pending {
            on_finish(self);
        }
        count
    }

    fn alloc(&mut self, tag: &str) -> NodeId {
        self.nodes.push(NodeData { tag: tag.to_owned(), ..NodeData::default() });
        NodeId(self.nodes.len() - 1)
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(data) = self.nodes.get_mut(parent.0) {
            data.children.retain(|child| *child != node);
        }
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.parent = None;
        }
    }

    fn copy_subtree(&mut self, node: NodeId) -> NodeId {
        let mut data = self.nodes.get(node.0).cloned().unwrap_or_default();
        let children = std::mem::take(&mut data.children);
        data.parent = None;
        data.reflows = 0;
        self.nodes.push(data);
        let copy = NodeId(self.nodes.len() - 1);
        for child in children {
            let child_copy = self.copy_subtree(child);
            self.append(&copy, &child_copy);
        }
        copy
    }

    fn collect(&self, node: NodeId, class: &str, out: &mut Vec<NodeId>) {
        for child in self.children(node) {
            if self.has_class(&child, class) {
                out.push(child);
            }
            self.collect(child, class, out);
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn attr(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.get(node.0).and_then(|data| data.attrs.get(name)).cloned()
    }

    fn set_attr(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn find_all(&self, root: &NodeId, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect(*root, class, &mut out);
        out
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(node.0)
            && !data.classes.iter().any(|existing| existing == class)
        {
            data.classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.classes.retain(|existing| existing != class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.get(node.0).is_some_and(|data| data.classes.iter().any(|existing| existing == class))
    }

    fn set_style(&mut self, node: &NodeId, prop: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.styles.insert(prop.to_owned(), value.to_owned());
        }
    }

    fn remove_style(&mut self, node: &NodeId, prop: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.styles.remove(prop);
        }
    }

    fn reflow(&mut self, node: &NodeId) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.reflows += 1;
        }
    }

    fn rect(&self, node: &NodeId) -> Rect {
        self.nodes.get(node.0).map(|data| data.rect).unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn create(&mut self, tag: &str) -> Result<NodeId, DomError> {
        Ok(self.alloc(tag))
    }

    fn clone_deep(&mut self, node: &NodeId) -> Result<NodeId, DomError> {
        if node.0 >= self.nodes.len() {
            return Err(DomError::Detached);
        }
        Ok(self.copy_subtree(*node))
    }

    fn append(&mut self, parent: &NodeId, child: &NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() || parent == child {
            return;
        }
        self.detach(*child);
        self.nodes[parent.0].children.push(*child);
        self.nodes[child.0].parent = Some(*parent);
    }

    fn append_to_body(&mut self, child: &NodeId) {
        let body = self.body;
        self.append(&body, child);
    }

    fn remove(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn animate(
        &mut self,
        node: &NodeId,
        keyframes: &[Keyframe],
        timing: Timing,
        on_finish: OnFinish<Self>,
    ) -> Result<(), DomError> {
        if !self.animation_supported {
            return Err(DomError::AnimationUnsupported);
        }
        self.animations.push(RecordedAnimation { node: *node, keyframes: keyframes.to_vec(), timing });
        self.pending_finish.push(on_finish);
        Ok(())
    }
}

struct Pending<D: Dom> {
    due_ms: u64,
    seq: u64,
    task: Task<D>,
}

/// Scheduler driven by an explicit virtual clock.
pub struct ManualScheduler<D: Dom> {
    now_ms: u64,
    seq: u64,
    queue: Vec<Pending<D>>,
}

impl<D: Dom> Default for ManualScheduler<D> {
    fn default() -> Self {
        Self { now_ms: 0, seq: 0, queue: Vec::new() }
    }
}

impl<D: Dom> ManualScheduler<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Tasks not yet run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Move the clock forward by `ms`, running due tasks in deadline order.
    /// Returns how many tasks ran.
    pub fn advance(&mut self, ms: u64, dom: &mut D) -> usize {
        let target = self.now_ms.saturating_add(ms);
        let mut ran = 0;
        while let Some(index) = self.next_due(target) {
            let pending = self.queue.swap_remove(index);
            self.now_ms = self.now_ms.max(pending.due_ms);
            pending.task.run(dom);
            ran += 1;
        }
        self.now_ms = target;
        ran
    }

    fn next_due(&self, target: u64) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due_ms <= target)
            .min_by_key(|(_, pending)| (pending.due_ms, pending.seq))
            .map(|(index, _)| index)
    }

    fn push(&mut self, delay_ms: u64, task: Task<D>) {
        self.seq += 1;
        self.queue.push(Pending { due_ms: self.now_ms.saturating_add(delay_ms), seq: self.seq, task });
    }
}

impl<D: Dom> Scheduler<D> for ManualScheduler<D> {
    fn after(&mut self, delay_ms: u32, task: Task<D>) {
        self.push(u64::from(delay_ms), task);
    }

    fn next_frame(&mut self, task: Task<D>) {
        self.push(FRAME_MS, task);
    }
}

/// Outbound sink that keeps every pushed event.
#[derive(Debug, Default)]
pub struct RecordingOutbound {
    pub events: Vec<(String, Value)>,
}

impl RecordingOutbound {
    /// Payloads pushed under `event`, in order.
    #[must_use]
    pub fn payloads(&self, event: &str) -> Vec<&Value> {
        self.events.iter().filter(|(name, _)| name == event).map(|(_, payload)| payload).collect()
    }
}

impl Outbound for RecordingOutbound {
    fn push_event(&mut self, event: &str, payload: Value) {
        self.events.push((event.to_owned(), payload));
    }
}

/// A complete headless host: document, clock, outbound sink and seeded RNG.
pub struct Stage {
    pub dom: MemoryDom,
    pub timers: ManualScheduler<MemoryDom>,
    pub outbound: RecordingOutbound,
    pub rng: StdRng,
}

impl Stage {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            dom: MemoryDom::new(),
            timers: ManualScheduler::new(),
            outbound: RecordingOutbound::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn env(&mut self) -> Env<'_, MemoryDom> {
        Env { dom: &mut self.dom, timers: &mut self.timers, outbound: &mut self.outbound, rng: &mut self.rng }
    }

    /// Advance the virtual clock by `ms`; returns how many tasks ran.
    pub fn advance(&mut self, ms: u64) -> usize {
        self.timers.advance(ms, &mut self.dom)
    }
}
