use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::data::{LayoutPos, Window, WindowId, Workspace, WorkspaceId};
use crate::icons::{self, IconKey};
use crate::niri::state::State;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct View {
    pub outputs: Vec<OutputView>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputView {
    pub name: Arc<str>,
    /// Sorted by workspace index. Inactive empty workspaces are left out.
    pub workspaces: Vec<(u8, WorkspaceView)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkspaceView {
    UrgentInactive { icon: &'static str },
    PresentInactive { icon: &'static str },
    ActiveEmpty { icon: &'static str },
    /// The active workspace's tiled windows, in layout order.
    Expanded(Vec<WindowView>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowView {
    pub id: WindowId,
    pub icon: &'static str,
    pub style: WindowStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowStyle {
    ActiveFocused,
    Urgent,
    Normal,
}

/// Where a tiled window sits within its workspace. Windows that have not been given a
/// scrolling-layout position yet sort after every placed window, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Tiled(LayoutPos),
    Unplaced(usize),
}

pub fn project(state: &State) -> View {
    let mut tiled: HashMap<WorkspaceId, BTreeMap<Slot, &Window>> = HashMap::new();
    for (seq, win) in state.windows().iter().enumerate() {
        if win.is_floating {
            continue;
        }
        let Some(ws_id) = win.workspace_id else {
            continue;
        };
        let slot = win.layout_pos.map_or(Slot::Unplaced(seq), Slot::Tiled);
        // A position collision keeps the window that arrived last.
        tiled.entry(ws_id).or_default().insert(slot, win);
    }

    let mut outputs: Vec<(Arc<str>, BTreeMap<u8, Option<WorkspaceView>>)> = Vec::new();
    for ws in state.workspaces() {
        let Some(output) = &ws.output else {
            log::trace!("Workspace {:?} has no output", ws.id);
            continue;
        };
        let at = match outputs.iter().position(|(name, _)| name == output) {
            Some(at) => at,
            None => {
                outputs.push((output.clone(), BTreeMap::new()));
                outputs.len() - 1
            }
        };
        outputs[at]
            .1
            .insert(ws.index, workspace_view(ws, tiled.get(&ws.id)));
    }

    View {
        outputs: outputs
            .into_iter()
            .map(|(name, by_index)| OutputView {
                name,
                workspaces: by_index
                    .into_iter()
                    .filter_map(|(index, view)| Some((index, view?)))
                    .collect(),
            })
            .collect(),
    }
}

fn workspace_view(
    ws: &Workspace,
    windows: Option<&BTreeMap<Slot, &Window>>,
) -> Option<WorkspaceView> {
    let icon = icons::lookup(IconKey::Workspace(ws.index));
    let windows = windows.filter(|windows| !windows.is_empty());
    match (ws.is_active, windows) {
        (false, _) if ws.is_urgent => Some(WorkspaceView::UrgentInactive { icon }),
        (false, Some(_)) => Some(WorkspaceView::PresentInactive { icon }),
        (false, None) => None,
        (true, None) => Some(WorkspaceView::ActiveEmpty { icon }),
        (true, Some(windows)) => Some(WorkspaceView::Expanded(
            windows.values().map(|win| window_view(ws, win)).collect(),
        )),
    }
}

fn window_view(ws: &Workspace, win: &Window) -> WindowView {
    let style = if ws.active_window_id == Some(win.id) {
        WindowStyle::ActiveFocused
    } else if win.is_urgent {
        WindowStyle::Urgent
    } else {
        WindowStyle::Normal
    };
    WindowView {
        id: win.id,
        icon: icons::lookup(IconKey::App(&win.app_id)),
        style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AppId;
    use crate::niri::event::Event;
    use crate::niri::state::tests::{window, workspace};

    fn single_output(workspaces: Vec<Workspace>, windows: Vec<Window>) -> State {
        let mut state = State::new();
        state.apply(Event::WorkspacesReplaced { workspaces });
        state.apply(Event::WindowsReplaced { windows });
        state
    }

    #[test]
    fn empty_active_workspace() {
        let state = single_output(vec![workspace(1, "DP-1", 1, true)], vec![]);
        assert_eq!(
            project(&state),
            View {
                outputs: vec![OutputView {
                    name: "DP-1".into(),
                    workspaces: vec![(
                        1,
                        WorkspaceView::ActiveEmpty {
                            icon: icons::lookup(IconKey::Workspace(1))
                        }
                    )],
                }]
            }
        );
    }

    #[test]
    fn window_lifecycle_on_active_workspace() {
        let mut state = single_output(vec![workspace(1, "DP-1", 1, true)], vec![]);
        let firefox = icons::lookup(IconKey::App(&AppId::from("firefox")));

        state.apply(Event::WindowOpenedOrChanged {
            window: window(10, 1, (0, 0), "firefox"),
        });
        let expected = |style| {
            vec![(
                1,
                WorkspaceView::Expanded(vec![WindowView {
                    id: WindowId(10),
                    icon: firefox,
                    style,
                }]),
            )]
        };
        assert_eq!(
            project(&state).outputs[0].workspaces,
            expected(WindowStyle::Normal)
        );

        state.apply(Event::WorkspaceActiveWindowChanged {
            workspace_id: WorkspaceId(1),
            active_window_id: Some(WindowId(10)),
        });
        assert_eq!(
            project(&state).outputs[0].workspaces,
            expected(WindowStyle::ActiveFocused)
        );

        state.apply(Event::WindowClosed { id: WindowId(10) });
        assert!(matches!(
            project(&state).outputs[0].workspaces[..],
            [(1, WorkspaceView::ActiveEmpty { .. })]
        ));
    }

    #[test]
    fn inactive_workspaces_are_badged_or_skipped() {
        let mut urgent = workspace(3, "DP-1", 3, false);
        urgent.is_urgent = true;
        let state = single_output(
            vec![
                workspace(4, "DP-1", 4, false),
                urgent,
                workspace(2, "DP-1", 2, false),
                workspace(1, "DP-1", 1, true),
            ],
            vec![window(20, 2, (1, 1), "foot")],
        );

        let indices: Vec<_> = project(&state).outputs[0]
            .workspaces
            .iter()
            .map(|(index, view)| match view {
                WorkspaceView::UrgentInactive { .. } => (*index, "urgent"),
                WorkspaceView::PresentInactive { .. } => (*index, "present"),
                WorkspaceView::ActiveEmpty { .. } => (*index, "active-empty"),
                WorkspaceView::Expanded(_) => (*index, "expanded"),
            })
            .collect();
        assert_eq!(
            indices,
            vec![(1, "active-empty"), (2, "present"), (3, "urgent")]
        );
    }

    #[test]
    fn windows_sorted_by_column_then_row_and_floating_excluded() {
        let mut floating = window(14, 1, (0, 0), "mpv");
        floating.is_floating = true;
        floating.layout_pos = None;
        let mut urgent = window(13, 1, (1, 2), "lf");
        urgent.is_urgent = true;
        let mut unplaced = window(15, 1, (0, 0), "Code");
        unplaced.layout_pos = None;

        let mut active = workspace(1, "DP-1", 1, true);
        active.active_window_id = Some(WindowId(12));
        let state = single_output(
            vec![active],
            vec![
                unplaced,
                window(11, 1, (2, 1), "foot"),
                urgent,
                floating,
                window(12, 1, (1, 1), "firefox"),
            ],
        );

        let view = project(&state);
        let [(1, WorkspaceView::Expanded(windows))] = &view.outputs[0].workspaces[..] else {
            panic!("unexpected view {view:?}");
        };
        let order: Vec<_> = windows.iter().map(|w| (w.id.0, w.style)).collect();
        assert_eq!(
            order,
            vec![
                (12, WindowStyle::ActiveFocused),
                (13, WindowStyle::Urgent),
                (11, WindowStyle::Normal),
                (15, WindowStyle::Normal),
            ]
        );
    }

    #[test]
    fn only_floating_windows_count_as_empty() {
        let mut floating = window(14, 2, (0, 0), "mpv");
        floating.is_floating = true;
        let state = single_output(
            vec![workspace(1, "DP-1", 1, true), workspace(2, "DP-1", 2, false)],
            vec![floating],
        );
        assert!(matches!(
            project(&state).outputs[0].workspaces[..],
            [(1, WorkspaceView::ActiveEmpty { .. })]
        ));
    }

    #[test]
    fn outputs_keep_arrival_order() {
        let state = single_output(
            vec![
                workspace(5, "HDMI-A-1", 2, true),
                workspace(1, "DP-1", 1, true),
                workspace(6, "HDMI-A-1", 1, false),
            ],
            vec![],
        );
        let names: Vec<_> = project(&state)
            .outputs
            .iter()
            .map(|out| out.name.to_string())
            .collect();
        assert_eq!(names, vec!["HDMI-A-1", "DP-1"]);
    }

    #[test]
    fn position_collision_keeps_later_window() {
        let state = single_output(
            vec![workspace(1, "DP-1", 1, true)],
            vec![window(10, 1, (1, 1), "foot"), window(11, 1, (1, 1), "mpv")],
        );
        let view = project(&state);
        let [(1, WorkspaceView::Expanded(windows))] = &view.outputs[0].workspaces[..] else {
            panic!("unexpected view {view:?}");
        };
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].id, WindowId(11));
    }

    #[test]
    fn projection_is_deterministic() {
        let mut state = single_output(
            vec![
                workspace(1, "DP-1", 1, true),
                workspace(2, "DP-1", 2, false),
                workspace(3, "eDP-1", 1, true),
            ],
            vec![
                window(10, 1, (1, 1), "foot"),
                window(11, 2, (1, 1), "firefox"),
                window(12, 3, (2, 1), "mpv"),
                window(13, 3, (1, 1), "Obsidian"),
            ],
        );
        state.apply(Event::WorkspaceUrgencyChanged {
            id: WorkspaceId(2),
            urgent: true,
        });
        assert_eq!(project(&state), project(&state));
    }
}
