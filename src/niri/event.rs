use serde::{Deserialize, Deserializer};

use crate::data::{LayoutPos, Window, WindowId, WireLayout, Workspace, WorkspaceId};

/// Top-level keys of the niri events this block reacts to.
pub const EVENT_NAMES: [&str; 10] = [
    "WorkspacesChanged",
    "WorkspaceActivated",
    "WorkspaceActiveWindowChanged",
    "WorkspaceUrgencyChanged",
    "WindowsChanged",
    "WindowOpenedOrChanged",
    "WindowUrgencyChanged",
    "WindowFocusChanged",
    "WindowLayoutsChanged",
    "WindowClosed",
];

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum Event {
    #[serde(rename = "WorkspacesChanged")]
    WorkspacesReplaced { workspaces: Vec<Workspace> },
    WorkspaceActivated { id: WorkspaceId, focused: bool },
    WorkspaceActiveWindowChanged {
        workspace_id: WorkspaceId,
        active_window_id: Option<WindowId>,
    },
    WorkspaceUrgencyChanged { id: WorkspaceId, urgent: bool },
    #[serde(rename = "WindowsChanged")]
    WindowsReplaced { windows: Vec<Window> },
    WindowOpenedOrChanged { window: Window },
    WindowUrgencyChanged { id: WindowId, urgent: bool },
    /// `None` means no window has focus anymore.
    WindowFocusChanged { id: Option<WindowId> },
    #[serde(rename = "WindowLayoutsChanged")]
    WindowLayoutChanged {
        #[serde(deserialize_with = "layout_changes")]
        changes: Vec<(WindowId, Option<LayoutPos>)>,
    },
    WindowClosed { id: WindowId },
}

fn layout_changes<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<Vec<(WindowId, Option<LayoutPos>)>, D::Error> {
    let changes = Vec::<(WindowId, WireLayout)>::deserialize(de)?;
    Ok(changes
        .into_iter()
        .map(|(id, layout)| (id, layout.into_pos()))
        .collect())
}

#[derive(Debug)]
pub struct DecodeError(serde_json::Error);
impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to decode niri event: {}", self.0)
    }
}
impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self(err)
    }
}

/// Decodes one line of `niri msg --json event-stream`.
///
/// Returns `Ok(None)` for blank lines and for well-formed objects that are not one of
/// [`EVENT_NAMES`]. Lines that are not JSON objects, or whose payload does not match the
/// event's shape, are errors.
pub fn decode(line: &str) -> Result<Option<Event>, DecodeError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let envelope: serde_json::Map<String, serde_json::Value> = serde_json::from_str(line)?;
    let mut keys = envelope.keys();
    match (keys.next(), keys.next()) {
        (Some(name), None) if EVENT_NAMES.contains(&name.as_str()) => {}
        _ => return Ok(None),
    }

    Ok(Some(serde_json::from_value(serde_json::Value::Object(
        envelope,
    ))?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AppId;

    #[test]
    fn decodes_workspace_activation() {
        let ev = decode(r#"{"WorkspaceActivated":{"id":5,"focused":true}}"#).unwrap();
        assert_eq!(
            ev,
            Some(Event::WorkspaceActivated {
                id: WorkspaceId(5),
                focused: true
            })
        );
    }

    #[test]
    fn decodes_workspaces_changed_snapshot() {
        let ev = decode(
            r#"{"WorkspacesChanged":{"workspaces":[
                {"id":1,"idx":1,"name":null,"output":"DP-1","is_urgent":false,
                 "is_active":true,"is_focused":true,"active_window_id":10},
                {"id":2,"idx":2,"name":null,"output":"DP-1","is_urgent":false,
                 "is_active":false,"is_focused":false,"active_window_id":null}]}}"#,
        )
        .unwrap();
        let Some(Event::WorkspacesReplaced { workspaces }) = ev else {
            panic!("unexpected event {ev:?}");
        };
        assert_eq!(workspaces.len(), 2);
        assert_eq!(workspaces[0].active_window_id, Some(WindowId(10)));
        assert_eq!(workspaces[1].output.as_deref(), Some("DP-1"));
    }

    #[test]
    fn decodes_window_opened() {
        let ev = decode(
            r#"{"WindowOpenedOrChanged":{"window":{"id":10,"title":"x","app_id":"firefox",
                "pid":1,"workspace_id":1,"is_focused":true,"is_floating":false,
                "is_urgent":false,"layout":{"pos_in_scrolling_layout":[1,1]}}}}"#,
        )
        .unwrap();
        let Some(Event::WindowOpenedOrChanged { window }) = ev else {
            panic!("unexpected event {ev:?}");
        };
        assert_eq!(window.app_id, AppId::from("firefox"));
        assert!(window.is_focused);
    }

    #[test]
    fn decodes_layout_batch() {
        let ev = decode(
            r#"{"WindowLayoutsChanged":{"changes":[
                [10,{"pos_in_scrolling_layout":[2,1],"tile_size":[100.0,100.0]}],
                [11,{"pos_in_scrolling_layout":null}]]}}"#,
        )
        .unwrap();
        assert_eq!(
            ev,
            Some(Event::WindowLayoutChanged {
                changes: vec![
                    (WindowId(10), Some(LayoutPos { column: 2, row: 1 })),
                    (WindowId(11), None),
                ]
            })
        );
    }

    #[test]
    fn decodes_focus_cleared() {
        let ev = decode(r#"{"WindowFocusChanged":{"id":null}}"#).unwrap();
        assert_eq!(ev, Some(Event::WindowFocusChanged { id: None }));
    }

    #[test]
    fn ignores_unrelated_events() {
        assert_eq!(
            decode(r#"{"KeyboardLayoutSwitched":{"idx":0}}"#).unwrap(),
            None
        );
        assert_eq!(decode(r#"{"Ok":"Handled"}"#).unwrap(), None);
        assert_eq!(decode("   ").unwrap(), None);
        assert_eq!(
            decode(r#"{"WindowClosed":{"id":1},"WindowFocusChanged":{"id":1}}"#).unwrap(),
            None
        );
    }

    #[test]
    fn malformed_lines_are_errors() {
        assert!(decode("{\"WindowClosed\":").is_err());
        assert!(decode("[1,2,3]").is_err());
        assert!(decode(r#"{"WindowClosed":{"id":"ten"}}"#).is_err());
    }
}
