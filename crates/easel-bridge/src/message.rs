use crate::props::Props;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the diffing process assigns to every virtual node, text
/// included. Tags are never reused while the node they name is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub u64);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One structural change notification from the diffing process.
///
/// On the wire each message is `{"type": "...", "options": {...}}` with a
/// camelCase type name, e.g.
/// `{"type":"appendChild","options":{"parent":1,"child":2}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "camelCase")]
pub enum BridgeMessage {
    CreateInstance {
        tag: Tag,
        #[serde(rename = "type")]
        node_type: String,
        props: Props,
    },
    CreateTextInstance {
        tag: Tag,
        text: String,
    },
    CommitUpdate {
        tag: Tag,
        #[serde(rename = "type")]
        node_type: String,
        props: Props,
    },
    CommitTextUpdate {
        tag: Tag,
        text: String,
    },
    AppendChild {
        parent: Tag,
        child: Tag,
    },
    InsertBefore {
        parent: Tag,
        child: Tag,
        #[serde(rename = "beforeChild")]
        before_child: Tag,
    },
    RemoveChild {
        child: Tag,
    },
}

impl BridgeMessage {
    /// Tag of the node the message is primarily about.
    pub fn subject(&self) -> Tag {
        match self {
            BridgeMessage::CreateInstance { tag, .. }
            | BridgeMessage::CreateTextInstance { tag, .. }
            | BridgeMessage::CommitUpdate { tag, .. }
            | BridgeMessage::CommitTextUpdate { tag, .. } => *tag,
            BridgeMessage::AppendChild { child, .. }
            | BridgeMessage::InsertBefore { child, .. }
            | BridgeMessage::RemoveChild { child } => *child,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_instance_wire_shape() {
        let raw = r#"{"type":"createInstance","options":{"tag":3,"type":"rectangle","props":{"width":80,"name":"box"}}}"#;
        let msg: BridgeMessage = serde_json::from_str(raw).unwrap();
        match &msg {
            BridgeMessage::CreateInstance { tag, node_type, props } => {
                assert_eq!(*tag, Tag(3));
                assert_eq!(node_type, "rectangle");
                assert_eq!(props.number("width"), Some(80.0));
                assert_eq!(props.string("name"), Some("box"));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_structure_message_wire_shapes() {
        let append: BridgeMessage =
            serde_json::from_str(r#"{"type":"appendChild","options":{"parent":1,"child":2}}"#)
                .unwrap();
        assert_eq!(append, BridgeMessage::AppendChild { parent: Tag(1), child: Tag(2) });

        let insert: BridgeMessage = serde_json::from_str(
            r#"{"type":"insertBefore","options":{"parent":1,"child":4,"beforeChild":2}}"#,
        )
        .unwrap();
        assert_eq!(
            insert,
            BridgeMessage::InsertBefore { parent: Tag(1), child: Tag(4), before_child: Tag(2) }
        );

        let remove: BridgeMessage =
            serde_json::from_str(r#"{"type":"removeChild","options":{"child":2}}"#).unwrap();
        assert_eq!(remove, BridgeMessage::RemoveChild { child: Tag(2) });
    }

    #[test]
    fn test_text_messages_round_trip() {
        let msg = BridgeMessage::CommitTextUpdate { tag: Tag(7), text: "hello".into() };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"type": "commitTextUpdate", "options": {"tag": 7, "text": "hello"}}));
        let back: BridgeMessage = serde_json::from_value(value).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_unknown_message_type_is_an_error() {
        let raw = r#"{"type":"hidePage","options":{"tag":1}}"#;
        assert!(serde_json::from_str::<BridgeMessage>(raw).is_err());
    }

    #[test]
    fn test_subject_tags() {
        let msg = BridgeMessage::RemoveChild { child: Tag(9) };
        assert_eq!(msg.subject(), Tag(9));
        let msg = BridgeMessage::CreateTextInstance { tag: Tag(2), text: String::new() };
        assert_eq!(msg.subject(), Tag(2));
    }
}
