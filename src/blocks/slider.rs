use super::{BLOCK_FONT, badge, clickable_chars, value};
use crate::markup::{Button, Markup};

/// Percentages set by clicking the characters of a slider's value, left to right.
pub const PRESETS: [u8; 5] = [20, 40, 60, 80, 100];
pub const STEP: &str = "5%";

/// A percentage block with scroll-to-adjust and click-to-set actions, shared by the
/// volume and brightness blocks. Every action already includes the panel refresh.
pub struct Slider {
    pub badge_bg: u8,
    pub icon: &'static str,
    pub icon_click: Option<String>,
    pub refresh: String,
    pub step_down: String,
    pub step_up: String,
    /// One action per entry of [`PRESETS`].
    pub presets: Vec<String>,
    pub percent: u32,
}

impl Slider {
    /// Five characters wide, so each of them maps onto one preset.
    fn value_text(&self) -> String {
        format!("{:>3}% ", self.percent)
    }

    pub fn render(&self) -> String {
        let icon = format!(" {} ", self.icon);
        let text = self.value_text();

        let mut m = Markup::new();
        m.font(BLOCK_FONT, |m| {
            m.text(" ");
            badge(m, self.badge_bg, |m| match &self.icon_click {
                Some(click) => m.action(Button::Left, click, |m| {
                    m.action(Button::Right, &self.refresh, |m| m.text(&icon))
                }),
                None => m.action(Button::Right, &self.refresh, |m| m.text(&icon)),
            });
            value(m, |m| {
                m.action(Button::ScrollDown, &self.step_down, |m| {
                    m.action(Button::ScrollUp, &self.step_up, |m| {
                        clickable_chars(m, &text, &self.presets)
                    })
                })
            });
            m.text(" ")
        });
        m.into_string()
    }
}
