//! Cross-frame navigation messages
//!
//! Each iframe runs its own navigation manager. When the cursor enters an
//! iframe the parent posts `enterIframe` to the child and goes dormant; when
//! the child runs off its end it posts `exitIframe` back. Payloads are JSON.

use std::collections::HashMap;

use fos_dom::NodeId;
use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::walker::WalkerKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameCommand {
    EnterIframe,
    ExitIframe,
}

/// Navigation state handed between frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMessage {
    pub command: FrameCommand,
    /// Parent-assigned iframe id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub reversed: bool,
    pub granularity: WalkerKind,
}

impl FrameMessage {
    pub fn enter(id: u32, reversed: bool, granularity: WalkerKind) -> Self {
        Self { command: FrameCommand::EnterIframe, id: Some(id), reversed, granularity }
    }

    pub fn exit(id: u32, reversed: bool, granularity: WalkerKind) -> Self {
        Self { command: FrameCommand::ExitIframe, id: Some(id), reversed, granularity }
    }

    pub fn to_json(&self) -> Result<String, NavError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(payload: &str) -> Result<Self, NavError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Message the host must deliver to another frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// For the document that embeds this one
    ToParent(String),
    /// For the document inside one of our iframes
    ToChild { iframe: NodeId, payload: String },
}

/// Stable small ids for the iframes of a document
#[derive(Debug, Clone, Default)]
pub struct IframeRegistry {
    ids: HashMap<NodeId, u32>,
    nodes: HashMap<u32, NodeId>,
    next_id: u32,
}

impl IframeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for an iframe, assigning one on first sight
    pub fn id_for(&mut self, iframe: NodeId) -> u32 {
        if let Some(&id) = self.ids.get(&iframe) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(iframe, id);
        self.nodes.insert(id, iframe);
        id
    }

    pub fn node_for(&self, id: u32) -> Option<NodeId> {
        self.nodes.get(&id).copied()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.nodes.clear();
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::Document;

    #[test]
    fn test_message_wire_format() {
        let msg = FrameMessage::enter(3, true, WalkerKind::Sentence);
        let json = msg.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["command"], "enterIframe");
        assert_eq!(value["id"], 3);
        assert_eq!(value["reversed"], true);
        assert_eq!(value["granularity"], "sentence");
        assert_eq!(FrameMessage::from_json(&json).unwrap(), msg);
    }

    #[test]
    fn test_message_without_id() {
        let msg = FrameMessage::from_json(r#"{"command":"exitIframe","reversed":false,"granularity":"group"}"#).unwrap();
        assert_eq!(msg.command, FrameCommand::ExitIframe);
        assert_eq!(msg.id, None);
    }

    #[test]
    fn test_malformed_message() {
        assert!(matches!(FrameMessage::from_json("{not json"), Err(NavError::MalformedMessage(_))));
        assert!(FrameMessage::from_json(r#"{"command":"jump","reversed":false,"granularity":"group"}"#).is_err());
    }

    #[test]
    fn test_registry_reuses_ids() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = doc.append_element(body, "iframe").unwrap();
        let b = doc.append_element(body, "iframe").unwrap();
        let mut registry = IframeRegistry::new();
        assert_eq!(registry.id_for(a), 0);
        assert_eq!(registry.id_for(b), 1);
        assert_eq!(registry.id_for(a), 0);
        assert_eq!(registry.node_for(1), Some(b));
        assert_eq!(registry.node_for(7), None);
    }
}
