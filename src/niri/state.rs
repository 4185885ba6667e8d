use std::collections::HashMap;

use crate::data::{Window, WindowId, Workspace, WorkspaceId};
use crate::niri::event::Event;

/// The block's model of niri's workspaces and windows.
///
/// Both collections keep arrival order: outputs are listed in the order their first
/// workspace appears, and a window that is upserted moves to the back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    workspaces: Vec<Workspace>,
    windows: Vec<Window>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    fn workspace_mut(&mut self, id: WorkspaceId) -> Option<&mut Workspace> {
        let found = self.workspaces.iter_mut().find(|ws| ws.id == id);
        if found.is_none() {
            log::debug!("Event references unknown workspace {id:?}");
        }
        found
    }
    fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        let found = self.windows.iter_mut().find(|win| win.id == id);
        if found.is_none() {
            log::debug!("Event references unknown window {id:?}");
        }
        found
    }

    /// Applies a single event. Events that reference entities missing from the model
    /// leave it unchanged.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::WorkspacesReplaced { workspaces } => self.workspaces = workspaces,
            Event::WorkspaceActivated { id, focused } => {
                let Some(output) = self.workspace_mut(id).map(|ws| ws.output.clone()) else {
                    return;
                };
                for ws in &mut self.workspaces {
                    if ws.id == id {
                        ws.is_active = true;
                        ws.is_focused = focused;
                        continue;
                    }
                    if ws.output == output {
                        ws.is_active = false;
                    }
                    if focused {
                        ws.is_focused = false;
                    }
                }
            }
            Event::WorkspaceActiveWindowChanged {
                workspace_id,
                active_window_id,
            } => {
                if let Some(ws) = self.workspace_mut(workspace_id) {
                    ws.active_window_id = active_window_id;
                }
            }
            Event::WorkspaceUrgencyChanged { id, urgent } => {
                if let Some(ws) = self.workspace_mut(id) {
                    ws.is_urgent = urgent;
                }
            }
            Event::WindowsReplaced { windows } => self.windows = windows,
            Event::WindowOpenedOrChanged { window } => {
                self.windows.retain(|win| win.id != window.id);
                if window.is_focused {
                    for win in &mut self.windows {
                        win.is_focused = false;
                    }
                }
                self.windows.push(window);
            }
            Event::WindowUrgencyChanged { id, urgent } => {
                if let Some(win) = self.window_mut(id) {
                    win.is_urgent = urgent;
                }
            }
            Event::WindowFocusChanged { id } => {
                for win in &mut self.windows {
                    win.is_focused = Some(win.id) == id;
                }
            }
            Event::WindowLayoutChanged { changes } => {
                let changes: HashMap<_, _> = changes.into_iter().collect();
                for win in &mut self.windows {
                    if let Some(&pos) = changes.get(&win.id) {
                        win.layout_pos = pos;
                    }
                }
            }
            Event::WindowClosed { id } => {
                match self.windows.iter().position(|win| win.id == id) {
                    Some(idx) => {
                        self.windows.remove(idx);
                    }
                    None => log::debug!("Ignoring close of unknown window {id:?}"),
                }
            }
        }
    }
}

#[cfg(test)]
impl State {
    pub(crate) fn workspace(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|ws| ws.id == id)
    }
    pub(crate) fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|win| win.id == id)
    }
}
