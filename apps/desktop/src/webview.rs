use ehub::features::tenancy::injector::{Document, InjectedNode, MemoryDocument, NodeKind};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// [`Document`] backed by the webview's DOM.
///
/// Mutations are queued as JavaScript snippets and evaluated by the UI task
/// that owns the webview; a mirror answers reads without a round trip.
#[derive(Debug)]
pub struct WebviewDocument {
    mirror: MemoryDocument,
    commands: UnboundedSender<String>,
}

impl WebviewDocument {
    /// Returns the document and the queue of scripts to evaluate, in order.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (commands, rx) = unbounded_channel();
        (Self { mirror: MemoryDocument::new(), commands }, rx)
    }

    fn send(&self, script: String) {
        if self.commands.send(script).is_err() {
            tracing::debug!("Webview gone, dropping DOM update");
        }
    }
}

impl Document for WebviewDocument {
    fn upsert(&self, node: InjectedNode) {
        self.send(upsert_script(&node));
        self.mirror.upsert(node);
    }

    fn remove(&self, kind: NodeKind, id: &'static str) -> bool {
        self.send(remove_script(id));
        self.mirror.remove(kind, id)
    }

    fn get(&self, kind: NodeKind, id: &'static str) -> Option<InjectedNode> {
        self.mirror.get(kind, id)
    }
}

/// A script element only runs when inserted, so the node is always recreated.
fn upsert_script(node: &InjectedNode) -> String {
    format!(
        "(() => {{ document.getElementById({id})?.remove(); \
         const el = document.createElement({tag}); el.id = {id}; el.textContent = {text}; \
         document.head.appendChild(el); }})();",
        id = js_string(node.id),
        tag = js_string(node.kind.tag()),
        text = js_string(&node.text),
    )
}

fn remove_script(id: &str) -> String {
    format!("document.getElementById({})?.remove();", js_string(id))
}

fn js_string(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}
