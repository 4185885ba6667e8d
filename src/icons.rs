use crate::data::AppId;

/// Nerd Font "window-stack" glyphs for workspace indices 1 to 9.
const WORKSPACE_ICONS: [&str; 9] = [
    "\u{f0f0f}",
    "\u{f0f10}",
    "\u{f0f11}",
    "\u{f0f12}",
    "\u{f0f13}",
    "\u{f0f14}",
    "\u{f0f15}",
    "\u{f0f16}",
    "\u{f0f17}",
];

const APP_ICONS: &[(&str, &str)] = &[
    ("microsoft-edge", "\u{f282}"),
    ("firefox", "\u{f269}"),
    ("chromium", "\u{f268}"),
    ("Code", "\u{e8da}"),
    ("mpv", "\u{f144}"),
    ("foot", "\u{f489}"),
    ("footclient", "\u{f489}"),
    ("Obsidian", "\u{f48a}"),
    ("lf", "\u{f115}"),
    ("btop++", "\u{f463}"),
    ("VirtualBox Manager", "\u{f037a}"),
    ("VirtualBox Machine", "\u{f0379}"),
];

pub const WORKSPACE_FALLBACK: &str = "\u{f0f18}";
pub const APP_FALLBACK: &str = "\u{f420}";

#[derive(Clone, Copy, Debug)]
pub enum IconKey<'a> {
    Workspace(u8),
    App(&'a AppId),
}

pub fn lookup(key: IconKey<'_>) -> &'static str {
    match key {
        IconKey::Workspace(index) => usize::from(index)
            .checked_sub(1)
            .and_then(|i| WORKSPACE_ICONS.get(i))
            .copied()
            .unwrap_or(WORKSPACE_FALLBACK),
        IconKey::App(AppId::Known(id)) => APP_ICONS
            .iter()
            .find(|(app, _)| *app == &**id)
            .map_or(APP_FALLBACK, |&(_, icon)| icon),
        IconKey::App(AppId::Unknown) => APP_FALLBACK,
        IconKey::App(AppId::NonString) => WORKSPACE_FALLBACK,
    }
}
