//! Places tenant CSS/JS into a document and takes it out again.
//!
//! The [`Document`] trait is the only seam through which tenant code reaches
//! the page. Each kind of node lives under one well-known id, so applying the
//! same code twice replaces instead of accumulating.

use ehub_domain::constants::{CUSTOM_CSS_ID, CUSTOM_JS_ID};
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Style,
    Script,
}

impl NodeKind {
    /// Well-known element id for this kind of tenant node.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Style => CUSTOM_CSS_ID,
            Self::Script => CUSTOM_JS_ID,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedNode {
    pub kind: NodeKind,
    pub id: &'static str,
    pub text: Arc<str>,
}

impl InjectedNode {
    #[must_use]
    pub fn new(kind: NodeKind, text: impl Into<Arc<str>>) -> Self {
        Self { kind, id: kind.id(), text: text.into() }
    }
}

/// Mutable view of the live document's head.
pub trait Document: Send + Sync + fmt::Debug {
    /// Inserts `node`, replacing any node of the same kind and id.
    fn upsert(&self, node: InjectedNode);

    /// Returns whether a node was removed.
    fn remove(&self, kind: NodeKind, id: &'static str) -> bool;

    fn get(&self, kind: NodeKind, id: &'static str) -> Option<InjectedNode>;
}

/// What one [`CustomCodeInjector::apply`] call inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionHandle {
    generation: u64,
    style: Option<Arc<str>>,
    script: Option<Arc<str>>,
}

impl InjectionHandle {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn has_style(&self) -> bool {
        self.style.is_some()
    }

    #[must_use]
    pub const fn has_script(&self) -> bool {
        self.script.is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.style.is_none() && self.script.is_none()
    }

    fn nodes(&self) -> impl Iterator<Item = (NodeKind, &Arc<str>)> {
        [(NodeKind::Style, self.style.as_ref()), (NodeKind::Script, self.script.as_ref())]
            .into_iter()
            .filter_map(|(kind, text)| text.map(|text| (kind, text)))
    }
}

/// Sole writer of tenant style/script nodes.
///
/// At most one injection is live at a time: [`apply`](Self::apply) releases
/// the previous one before inserting anything.
#[derive(Debug)]
pub struct CustomCodeInjector {
    document: Arc<dyn Document>,
    current: Mutex<Option<InjectionHandle>>,
    generation: AtomicU64,
}

impl CustomCodeInjector {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self { document, current: Mutex::new(None), generation: AtomicU64::new(0) }
    }

    #[must_use]
    pub fn document(&self) -> &Arc<dyn Document> {
        &self.document
    }

    /// Handle of the live injection, if any.
    #[must_use]
    pub fn current(&self) -> Option<InjectionHandle> {
        self.current.lock().clone()
    }

    /// Injects `css` as a style node and `js` as a script node.
    ///
    /// Blank text creates no node. The code is inserted verbatim; errors inside
    /// it surface in the document, never here.
    pub fn apply(&self, css: Option<&str>, js: Option<&str>) -> InjectionHandle {
        let mut current = self.current.lock();
        if let Some(previous) = current.take() {
            self.remove_nodes(&previous);
        }

        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let handle = InjectionHandle {
            generation,
            style: self.insert(NodeKind::Style, css),
            script: self.insert(NodeKind::Script, js),
        };

        debug!(
            generation,
            style = handle.has_style(),
            script = handle.has_script(),
            "Custom code applied"
        );
        *current = Some(handle.clone());
        handle
    }

    /// Removes the nodes `handle` inserted, if they are still the live ones.
    ///
    /// Returns `false` for a stale handle, which leaves the document untouched.
    pub fn release(&self, handle: &InjectionHandle) -> bool {
        let mut current = self.current.lock();
        if current.as_ref().is_none_or(|live| live.generation != handle.generation) {
            debug!(generation = handle.generation, "Ignoring stale injection handle");
            return false;
        }

        self.remove_nodes(handle);
        *current = None;
        debug!(generation = handle.generation, "Custom code released");
        true
    }

    /// Releases whatever is live. Returns whether anything was.
    pub fn release_current(&self) -> bool {
        let Some(live) = self.current.lock().take() else {
            return false;
        };
        self.remove_nodes(&live);
        debug!(generation = live.generation, "Custom code released");
        true
    }

    fn insert(&self, kind: NodeKind, text: Option<&str>) -> Option<Arc<str>> {
        let text: Arc<str> = Arc::from(text.filter(|t| !t.trim().is_empty())?);
        self.document.upsert(InjectedNode { kind, id: kind.id(), text: Arc::clone(&text) });
        Some(text)
    }

    fn remove_nodes(&self, handle: &InjectionHandle) {
        for (kind, text) in handle.nodes() {
            let ours = self
                .document
                .get(kind, kind.id())
                .is_some_and(|node| Arc::ptr_eq(&node.text, text));
            if ours {
                self.document.remove(kind, kind.id());
            }
        }
    }
}

impl Drop for CustomCodeInjector {
    fn drop(&mut self) {
        self.release_current();
    }
}

/// In-memory [`Document`] for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: RwLock<FxHashMap<(NodeKind, &'static str), InjectedNode>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every node, styles first.
    #[must_use]
    pub fn nodes(&self) -> Vec<InjectedNode> {
        let mut nodes: Vec<_> = self.nodes.read().values().cloned().collect();
        nodes.sort_by_key(|node| (node.kind, node.id));
        nodes
    }

    #[must_use]
    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.read().keys().filter(|(k, _)| *k == kind).count()
    }

    /// Whether any node's text contains `needle`.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.nodes.read().values().any(|node| node.text.contains(needle))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

impl Document for MemoryDocument {
    fn upsert(&self, node: InjectedNode) {
        self.nodes.write().insert((node.kind, node.id), node);
    }

    fn remove(&self, kind: NodeKind, id: &'static str) -> bool {
        self.nodes.write().remove(&(kind, id)).is_some()
    }

    fn get(&self, kind: NodeKind, id: &'static str) -> Option<InjectedNode> {
        self.nodes.read().get(&(kind, id)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn injector() -> (Arc<MemoryDocument>, CustomCodeInjector) {
        let document = Arc::new(MemoryDocument::new());
        let injector = CustomCodeInjector::new(document.clone());
        (document, injector)
    }

    #[test]
    fn nodes_use_well_known_ids() {
        let (document, injector) = injector();
        injector.apply(Some(".custom-hero {}"), Some("window.x = 1;"));

        let nodes = document.nodes();
        assert_eq!(nodes.len(), 2);
        assert_eq!((nodes[0].kind, nodes[0].id), (NodeKind::Style, "tenant-custom-css"));
        assert_eq!((nodes[1].kind, nodes[1].id), (NodeKind::Script, "tenant-custom-js"));
    }

    #[test]
    fn blank_code_creates_no_node() {
        let (document, injector) = injector();
        let handle = injector.apply(Some("  \n"), None);
        assert!(handle.is_empty());
        assert!(document.is_empty());
    }

    #[test]
    fn switching_tenants_leaves_no_trace_of_the_previous_one() {
        let (document, injector) = injector();
        injector.apply(Some(".tenant-a { color: red }"), Some("window.a = 1;"));
        injector.apply(Some(".tenant-b { color: blue }"), None);

        assert!(!document.contains_text("tenant-a"));
        assert!(!document.contains_text("window.a"));
        assert!(document.contains_text("tenant-b"));
        assert_eq!(document.count(NodeKind::Script), 0);
    }

    #[test]
    fn stale_handle_never_removes_newer_injection() {
        let (document, injector) = injector();
        let first = injector.apply(Some(".a {}"), Some("a()"));
        let second = injector.apply(Some(".a {}"), Some("a()"));

        assert!(!injector.release(&first));
        assert_eq!(document.len(), 2);

        assert!(injector.release(&second));
        assert!(document.is_empty());
        assert!(injector.current().is_none());
    }

    #[test]
    fn release_current_is_idempotent() {
        let (document, injector) = injector();
        injector.apply(None, Some("a()"));
        assert!(injector.release_current());
        assert!(!injector.release_current());
        assert!(document.is_empty());
    }

    #[test]
    fn dropping_the_injector_cleans_up() {
        let (document, injector) = injector();
        injector.apply(Some(".a {}"), Some("a()"));
        drop(injector);
        assert!(document.is_empty());
    }

    proptest! {
        #[test]
        fn repeated_apply_keeps_one_node_per_kind(
            css in proptest::option::of(".{0,40}"),
            js in proptest::option::of(".{0,40}"),
            times in 1usize..5,
        ) {
            let (document, injector) = injector();
            for _ in 0..times {
                injector.apply(css.as_deref(), js.as_deref());
            }
            let expected = |text: &Option<String>| usize::from(text.as_deref().is_some_and(|t| !t.trim().is_empty()));
            prop_assert_eq!(document.count(NodeKind::Style), expected(&css));
            prop_assert_eq!(document.count(NodeKind::Script), expected(&js));
        }
    }
}
