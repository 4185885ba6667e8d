//! Builder for the pbar/pipebar line format.
//!
//! Text between a pair of `\x1f` is an escape: `F<n>` sets the foreground color index,
//! a bare `F` restores the previous one, and likewise for `B` (background), `T` (font),
//! `O` (output) and `1`..`7` (click and scroll actions). [`Markup`] only exposes scoped
//! setters, so every escape it emits is matched by its restore.

const SEP: char = '\x1f';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    ScrollDown,
    ScrollUp,
}
impl Button {
    fn tag(self) -> char {
        match self {
            Self::Left => '1',
            Self::Right => '3',
            Self::ScrollDown => '4',
            Self::ScrollUp => '5',
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        push_sanitized(&mut self.buf, text);
        self
    }

    pub fn bg(&mut self, color: u8, f: impl FnOnce(&mut Self) -> &mut Self) -> &mut Self {
        self.scoped('B', &color.to_string(), f)
    }
    pub fn fg(&mut self, color: u8, f: impl FnOnce(&mut Self) -> &mut Self) -> &mut Self {
        self.scoped('F', &color.to_string(), f)
    }
    pub fn font(&mut self, font: u8, f: impl FnOnce(&mut Self) -> &mut Self) -> &mut Self {
        self.scoped('T', &font.to_string(), f)
    }
    pub fn output(&mut self, name: &str, f: impl FnOnce(&mut Self) -> &mut Self) -> &mut Self {
        self.scoped('O', name, f)
    }
    pub fn action(
        &mut self,
        button: Button,
        command: &str,
        f: impl FnOnce(&mut Self) -> &mut Self,
    ) -> &mut Self {
        self.scoped(button.tag(), command, f)
    }

    fn scoped(
        &mut self,
        tag: char,
        value: &str,
        f: impl FnOnce(&mut Self) -> &mut Self,
    ) -> &mut Self {
        self.escape(tag, value);
        f(self);
        self.escape(tag, "");
        self
    }

    fn escape(&mut self, tag: char, value: &str) {
        self.buf.push(SEP);
        self.buf.push(tag);
        push_sanitized(&mut self.buf, value);
        self.buf.push(SEP);
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
impl Markup {
    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }
}

/// Separators and line breaks would corrupt the escape pairing or end the line early.
fn push_sanitized(buf: &mut String, text: &str) {
    buf.extend(text.chars().filter(|&c| c != SEP && c != '\n' && c != '\r'));
}
