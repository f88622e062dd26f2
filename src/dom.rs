//! DOM capability used by every binding.
//!
//! Bindings never name a concrete DOM. They read the server's authoritative
//! state (attributes, child cards) and write presentational state (classes,
//! inline styles, transient nodes) through [`Dom`]. The browser backend maps
//! each call onto `web-sys`; [`crate::headless::MemoryDom`] keeps a tree in
//! memory for tests.
//!
//! Mutating calls are infallible: a write to a node the remote renderer
//! already removed is a silent no-op. Only node creation, cloning and the Web
//! Animations call report failure, because callers choose a fallback.

use std::fmt;

/// Callback run when a Web Animation reports `finished`.
pub type OnFinish<D> = Box<dyn FnOnce(&mut D)>;

/// Axis-aligned box in viewport (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Inner size of the browser window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// One stop of a Web Animations keyframe list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Keyframe {
    /// Explicit progress offset in `0.0..=1.0`; evenly spaced when `None`.
    pub offset: Option<f64>,
    pub props: Vec<(&'static str, String)>,
}

impl Keyframe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, prop: &'static str, value: impl Into<String>) -> Self {
        self.props.push((prop, value.into()));
        self
    }

    #[must_use]
    pub fn at(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Value of `prop` in this keyframe, if set.
    #[must_use]
    pub fn get(&self, prop: &str) -> Option<&str> {
        self.props.iter().find(|(name, _)| *name == prop).map(|(_, value)| value.as_str())
    }
}

/// Timing options for [`Dom::animate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub duration_ms: f64,
    pub easing: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Web Animations API unavailable")]
    AnimationUnsupported,

    #[error("node is no longer in the document")]
    Detached,

    #[error("DOM call failed: {0}")]
    Js(String),
}

/// The DOM operations bindings are allowed to perform.
pub trait Dom: Sized + 'static {
    /// Handle to an element. Two handles compare equal iff they name the same element.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Descendants of `root` carrying `class`, in document order.
    fn find_all(&self, root: &Self::Node, class: &str) -> Vec<Self::Node>;

    fn find_first(&self, root: &Self::Node, class: &str) -> Option<Self::Node> {
        self.find_all(root, class).into_iter().next()
    }

    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_classes(&mut self, node: &Self::Node, classes: &[&str]) {
        for class in classes {
            self.add_class(node, class);
        }
    }

    fn remove_classes(&mut self, node: &Self::Node, classes: &[&str]) {
        for class in classes {
            self.remove_class(node, class);
        }
    }

    fn set_style(&mut self, node: &Self::Node, prop: &str, value: &str);
    fn remove_style(&mut self, node: &Self::Node, prop: &str);

    /// Force a synchronous layout so a re-added CSS animation restarts.
    fn reflow(&mut self, node: &Self::Node);

    fn rect(&self, node: &Self::Node) -> Rect;
    fn viewport(&self) -> Viewport;

    fn create(&mut self, tag: &str) -> Result<Self::Node, DomError>;
    fn clone_deep(&mut self, node: &Self::Node) -> Result<Self::Node, DomError>;
    fn append(&mut self, parent: &Self::Node, child: &Self::Node);
    fn append_to_body(&mut self, child: &Self::Node);

    /// Detach `node` from the document. Already-detached nodes are ignored.
    fn remove(&mut self, node: &Self::Node);
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Start a Web Animation on `node`; `on_finish` runs when it completes.
    fn animate(
        &mut self,
        node: &Self::Node,
        keyframes: &[Keyframe],
        timing: Timing,
        on_finish: OnFinish<Self>,
    ) -> Result<(), DomError>;
}
