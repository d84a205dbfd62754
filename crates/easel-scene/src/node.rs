use crate::color::Rgba;
use smartstring::{LazyCompact, SmartString};
use std::collections::HashMap;

type Str = SmartString<LazyCompact>;

/// Handle into a [`Document`](crate::Document). Ids are never reused, so a
/// stale handle keeps pointing at the (removed) node it was minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The node types a document distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Page,
    Frame,
    Group,
    BooleanOperation,
    Component,
    Instance,
    Rectangle,
    Ellipse,
    Line,
    Polygon,
    Star,
    Vector,
    Text,
    Slice,
}

impl NodeKind {
    /// Wire-style identifier, e.g. `BOOLEAN_OPERATION`.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "DOCUMENT",
            NodeKind::Page => "PAGE",
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::BooleanOperation => "BOOLEAN_OPERATION",
            NodeKind::Component => "COMPONENT",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Line => "LINE",
            NodeKind::Polygon => "POLYGON",
            NodeKind::Star => "STAR",
            NodeKind::Vector => "VECTOR",
            NodeKind::Text => "TEXT",
            NodeKind::Slice => "SLICE",
        }
    }

    /// Name a freshly created node starts out with.
    pub fn default_name(self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Page => "Page",
            NodeKind::Frame => "Frame",
            NodeKind::Group => "Group",
            NodeKind::BooleanOperation => "Boolean operation",
            NodeKind::Component => "Component",
            NodeKind::Instance => "Instance",
            NodeKind::Rectangle => "Rectangle",
            NodeKind::Ellipse => "Ellipse",
            NodeKind::Line => "Line",
            NodeKind::Polygon => "Polygon",
            NodeKind::Star => "Star",
            NodeKind::Vector => "Vector",
            NodeKind::Text => "Text",
            NodeKind::Slice => "Slice",
        }
    }

    /// Whether the host lets nodes of this kind hold children.
    pub fn accepts_children(self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Page
                | NodeKind::Frame
                | NodeKind::Group
                | NodeKind::BooleanOperation
                | NodeKind::Component
                | NodeKind::Instance
        )
    }
}

/// Auto-layout direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::None => "NONE",
            LayoutMode::Horizontal => "HORIZONTAL",
            LayoutMode::Vertical => "VERTICAL",
        }
    }

    pub fn parse(input: &str) -> Option<LayoutMode> {
        match input {
            "NONE" => Some(LayoutMode::None),
            "HORIZONTAL" => Some(LayoutMode::Horizontal),
            "VERTICAL" => Some(LayoutMode::Vertical),
            _ => None,
        }
    }
}

/// A single node in the document graph. Structure (parent, children,
/// removal) lives on the [`Document`](crate::Document); everything here is
/// node-local state.
#[derive(Debug, Clone)]
pub struct SceneNode {
    kind: NodeKind,
    pub name: Str,
    pub visible: bool,
    pub locked: bool,
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<Rgba>,
    pub layout_mode: LayoutMode,
    pub item_spacing: f32,
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
    pub layout_align: Option<Str>,
    pub font_size: f32,
    pub text_align: Str,
    pub(crate) characters: String,
    pub(crate) plugin_data: HashMap<Str, Str>,
    pub(crate) removed: bool,
}

impl SceneNode {
    pub fn new(kind: NodeKind) -> Self {
        SceneNode {
            kind,
            name: kind.default_name().into(),
            visible: true,
            locked: false,
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            fill: None,
            layout_mode: LayoutMode::None,
            item_spacing: 0.0,
            horizontal_padding: 0.0,
            vertical_padding: 0.0,
            layout_align: None,
            font_size: 12.0,
            text_align: "LEFT".into(),
            characters: String::new(),
            plugin_data: HashMap::new(),
            removed: false,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// True once the node has been detached by a remove. Removed nodes stay
    /// addressable but reject further mutation.
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Text content. Only ever non-empty for [`NodeKind::Text`] nodes.
    pub fn characters(&self) -> &str {
        &self.characters
    }

    pub fn plugin_data(&self, key: &str) -> Option<&str> {
        self.plugin_data.get(key).map(|v| v.as_str())
    }
}
