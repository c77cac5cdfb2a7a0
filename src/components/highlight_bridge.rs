//! Selection and highlight-click bridge.
//!
//! A script installed through `document::eval` watches the page for text
//! selections inside messages and clicks on highlight spans, and reports
//! both back to Rust.

use dioxus::prelude::*;
use serde::Deserialize;

/// Messages carry `data-message-root="<message id>"`; highlight spans carry
/// `data-word` and `data-message-id`.
const BRIDGE_JS: &str = r#"
const previous = window.__teachtellBridge;
if (previous) {
  document.removeEventListener('mouseup', previous.onMouseUp);
  document.removeEventListener('click', previous.onClick, true);
}

const messageRoot = (node) => {
  const el = node && (node.nodeType === 1 ? node : node.parentElement);
  return el ? el.closest('[data-message-root]') : null;
};

const onMouseUp = () => {
  const selection = window.getSelection();
  if (!selection || selection.isCollapsed) return;
  const root = messageRoot(selection.anchorNode);
  if (!root || root !== messageRoot(selection.focusNode)) return;
  const text = selection.toString();
  if (!text.trim()) return;
  selection.removeAllRanges();
  dioxus.send({ kind: 'select', messageId: root.dataset.messageRoot, text: text });
};

const onClick = (event) => {
  const span = event.target.closest ? event.target.closest('.highlight') : null;
  if (!span) return;
  event.preventDefault();
  event.stopPropagation();
  const root = messageRoot(span);
  dioxus.send({
    kind: 'explain',
    messageId: span.dataset.messageId,
    word: span.dataset.word,
    context: root ? root.innerText : '',
  });
};

document.addEventListener('mouseup', onMouseUp);
document.addEventListener('click', onClick, true);
window.__teachtellBridge = { onMouseUp, onClick };
"#;

/// Something the user did to a message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BridgeEvent {
    /// Text was selected inside a message
    Select {
        #[serde(rename = "messageId")]
        message_id: String,
        text: String,
    },
    /// A highlight span was clicked
    Explain {
        #[serde(rename = "messageId")]
        message_id: String,
        word: String,
        #[serde(default)]
        context: String,
    },
}

/// Install the bridge for the lifetime of the calling component.
pub fn use_highlight_bridge(mut on_event: impl FnMut(BridgeEvent) + 'static) {
    use_hook(move || {
        spawn(async move {
            let mut eval = document::eval(BRIDGE_JS);
            loop {
                match eval.recv::<BridgeEvent>().await {
                    Ok(event) => {
                        tracing::debug!(?event, "Highlight bridge event");
                        on_event(event);
                    }
                    Err(e) => {
                        tracing::warn!("Highlight bridge closed: {:?}", e);
                        break;
                    }
                }
            }
        })
    });
}
