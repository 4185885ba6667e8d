use std::sync::Arc;

use serde::{Deserialize, Deserializer};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct WorkspaceId(pub u64);

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct WindowId(pub u64);

/// Position of a tile in the scrolling layout. Ordered by column first, then row.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "(usize, usize)")]
pub struct LayoutPos {
    pub column: usize,
    pub row: usize,
}
impl From<(usize, usize)> for LayoutPos {
    fn from((column, row): (usize, usize)) -> Self {
        Self { column, row }
    }
}

/// Application identity of a window. A window that reports no app id is
/// [`AppId::Unknown`] rather than an empty string.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "Option<serde_json::Value>")]
pub enum AppId {
    Known(Arc<str>),
    /// An id that is present but is not a string.
    NonString,
    #[default]
    Unknown,
}
impl From<Option<serde_json::Value>> for AppId {
    fn from(value: Option<serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::String(id)) => Self::Known(id.into()),
            None | Some(serde_json::Value::Null) => Self::Unknown,
            Some(_) => Self::NonString,
        }
    }
}
impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self::Known(value.into())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Workspace {
    pub id: WorkspaceId,
    #[serde(rename = "idx")]
    pub index: u8,
    #[serde(default)]
    pub output: Option<Arc<str>>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_focused: bool,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub active_window_id: Option<WindowId>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Window {
    pub id: WindowId,
    #[serde(default)]
    pub workspace_id: Option<WorkspaceId>,
    #[serde(default)]
    pub app_id: AppId,
    #[serde(default)]
    pub is_focused: bool,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub is_floating: bool,
    /// `None` for floating windows.
    #[serde(default, rename = "layout", deserialize_with = "layout_position")]
    pub layout_pos: Option<LayoutPos>,
}

/// The part of niri's window layout record we care about.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct WireLayout {
    #[serde(default)]
    pos_in_scrolling_layout: Option<LayoutPos>,
}
impl WireLayout {
    pub(crate) fn into_pos(self) -> Option<LayoutPos> {
        self.pos_in_scrolling_layout
    }
}

fn layout_position<'de, D: Deserializer<'de>>(de: D) -> Result<Option<LayoutPos>, D::Error> {
    Ok(Option::<WireLayout>::deserialize(de)?.and_then(WireLayout::into_pos))
}
