//! The stream a small declarative app produces on first mount: a page
//! holding a vertical auto-layout card with three rows and a caption.

use easel_bridge::{BridgeMessage, Props, Tag};
use serde_json::{json, Value};

fn create(tag: u64, node_type: &str, props: Value) -> BridgeMessage {
    BridgeMessage::CreateInstance {
        tag: Tag(tag),
        node_type: node_type.into(),
        props: Props::from_value(props),
    }
}

fn append(parent: u64, child: u64) -> BridgeMessage {
    BridgeMessage::AppendChild { parent: Tag(parent), child: Tag(child) }
}

pub fn stream() -> Vec<BridgeMessage> {
    vec![
        create(1, "page", json!({"name": "New page", "isCurrent": true})),
        create(
            2,
            "frame",
            json!({
                "name": "card",
                "width": 200,
                "backgroundColor": "#ffffff",
                "layoutMode": "VERTICAL",
                "horizontalPadding": 20,
                "verticalPadding": 20,
                "itemSpacing": 10,
            }),
        ),
        append(1, 2),
        create(
            3,
            "frame",
            json!({"height": 100, "backgroundColor": "#ffaa97", "layoutAlign": "STRETCH"}),
        ),
        append(2, 3),
        create(
            4,
            "frame",
            json!({"width": 100, "height": 100, "backgroundColor": "#97ffb1", "layoutAlign": "MAX"}),
        ),
        append(2, 4),
        create(
            5,
            "frame",
            json!({"width": 100, "height": 50, "backgroundColor": "#97f3ff", "layoutAlign": "MIN"}),
        ),
        append(2, 5),
        create(6, "text", json!({"name": "caption", "fontSize": 16})),
        append(2, 6),
        BridgeMessage::CreateTextInstance { tag: Tag(7), text: "three rows".into() },
        append(6, 7),
    ]
}
