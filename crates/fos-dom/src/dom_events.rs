//! DOM Events
//!
//! Mutation and activation events recorded by `Document` for the host to
//! drain. Nothing is dispatched synchronously.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEventType {
    NodeInserted,
    NodeRemoved,
    AttrModified,
    CharacterDataModified,
    /// Default action of an element was triggered
    Click,
}

/// DOM event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    pub related_node: Option<NodeId>,
    pub attr_name: Option<String>,
    pub prev_value: Option<String>,
    pub new_value: Option<String>,
}

impl DomEvent {
    fn bare(event_type: DomEventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            related_node: None,
            attr_name: None,
            prev_value: None,
            new_value: None,
        }
    }

    /// Create node inserted event
    pub fn node_inserted(target: NodeId, parent: NodeId) -> Self {
        Self { related_node: Some(parent), ..Self::bare(DomEventType::NodeInserted, target) }
    }

    /// Create node removed event
    pub fn node_removed(target: NodeId, parent: NodeId) -> Self {
        Self { related_node: Some(parent), ..Self::bare(DomEventType::NodeRemoved, target) }
    }

    /// Create attribute modified event
    pub fn attr_modified(target: NodeId, name: &str, old_value: Option<&str>, new_value: Option<&str>) -> Self {
        Self {
            attr_name: Some(name.to_string()),
            prev_value: old_value.map(str::to_string),
            new_value: new_value.map(str::to_string),
            ..Self::bare(DomEventType::AttrModified, target)
        }
    }

    /// Create character data modified event
    pub fn character_data_modified(target: NodeId, old_value: &str, new_value: &str) -> Self {
        Self {
            prev_value: Some(old_value.to_string()),
            new_value: Some(new_value.to_string()),
            ..Self::bare(DomEventType::CharacterDataModified, target)
        }
    }

    /// Create click event
    pub fn click(target: NodeId) -> Self {
        Self::bare(DomEventType::Click, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_modified_event() {
        let event = DomEvent::attr_modified(NodeId(4), "checked", None, Some(""));
        assert_eq!(event.event_type, DomEventType::AttrModified);
        assert_eq!(event.attr_name.as_deref(), Some("checked"));
        assert_eq!(event.prev_value, None);
    }
}
