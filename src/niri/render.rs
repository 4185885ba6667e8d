use crate::markup::Markup;
use crate::niri::view::{View, WindowStyle, WorkspaceView};

/// Turns a projected [`View`] into one line of panel output.
pub trait Render {
    fn render(&self, view: &View) -> String;
}

/// Color and font indices of the pbar palette used by the windows block.
pub struct PanelRenderer {
    pub font: u8,
    pub urgent_fg: u8,
    pub present_fg: u8,
    pub normal_fg: u8,
    pub focused_bg: u8,
}
impl Default for PanelRenderer {
    fn default() -> Self {
        Self {
            font: 1,
            urgent_fg: 8,
            present_fg: 7,
            normal_fg: 1,
            focused_bg: 4,
        }
    }
}

fn padded(icon: &str) -> String {
    format!("  {icon}  ")
}

impl Render for PanelRenderer {
    fn render(&self, view: &View) -> String {
        let mut m = Markup::new();
        m.font(self.font, |m| {
            for output in &view.outputs {
                m.output(&output.name, |m| {
                    for (_, ws) in &output.workspaces {
                        match ws {
                            WorkspaceView::UrgentInactive { icon } => {
                                m.fg(self.urgent_fg, |m| m.text(&padded(icon)));
                            }
                            WorkspaceView::PresentInactive { icon } => {
                                m.fg(self.present_fg, |m| m.text(&padded(icon)));
                            }
                            WorkspaceView::ActiveEmpty { icon } => {
                                m.fg(self.normal_fg, |m| m.text(&padded(icon)));
                            }
                            WorkspaceView::Expanded(windows) => {
                                for win in windows {
                                    let text = padded(win.icon);
                                    match win.style {
                                        WindowStyle::ActiveFocused => m.fg(self.normal_fg, |m| {
                                            m.bg(self.focused_bg, |m| m.text(&text))
                                        }),
                                        WindowStyle::Urgent => {
                                            m.fg(self.urgent_fg, |m| m.text(&text))
                                        }
                                        WindowStyle::Normal => {
                                            m.fg(self.normal_fg, |m| m.text(&text))
                                        }
                                    };
                                }
                            }
                        }
                    }
                    m
                });
            }
            m
        });
        m.into_string()
    }
}
