//! Tool system for the board.

use crate::shapes::NodeKind;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Note,
    Shape,
    Text,
    Connector,
}

impl ToolKind {
    /// Node kind placed by this tool, if it is a placement tool.
    pub fn placement_kind(self) -> Option<NodeKind> {
        match self {
            ToolKind::Note => Some(NodeKind::Note),
            ToolKind::Shape => Some(NodeKind::Shape),
            ToolKind::Text => Some(NodeKind::Text),
            ToolKind::Select | ToolKind::Pan | ToolKind::Connector => None,
        }
    }

    /// Whether resize handles are hit-tested while this tool is active.
    pub fn uses_handles(self) -> bool {
        self != ToolKind::Connector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool() {
        assert_eq!(ToolKind::default(), ToolKind::Select);
    }

    #[test]
    fn test_placement_kind() {
        assert_eq!(ToolKind::Note.placement_kind(), Some(NodeKind::Note));
        assert_eq!(ToolKind::Shape.placement_kind(), Some(NodeKind::Shape));
        assert_eq!(ToolKind::Text.placement_kind(), Some(NodeKind::Text));
        assert_eq!(ToolKind::Select.placement_kind(), None);
        assert_eq!(ToolKind::Connector.placement_kind(), None);
    }
}
