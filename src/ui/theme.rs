use ratatui::style::Color;

use crate::app::Theme;

const ACCENT: Color = Color::Rgb(0x4a, 0x90, 0xe2);

/// Colours used to draw one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub panel: Color,
    pub border: Color,
    pub accent: Color,
    pub on_accent: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(0xf5, 0xf5, 0xf5),
                text: Color::Rgb(0x33, 0x33, 0x33),
                panel: Color::Rgb(0xff, 0xff, 0xff),
                border: Color::Rgb(0xe0, 0xe0, 0xe0),
                accent: ACCENT,
                on_accent: Color::Rgb(0xff, 0xff, 0xff),
            },
            Theme::Dark => Self {
                background: Color::Rgb(0x1e, 0x1e, 0x1e),
                text: Color::Rgb(0xff, 0xff, 0xff),
                panel: Color::Rgb(0x2d, 0x2d, 0x2d),
                border: Color::Rgb(0x3d, 0x3d, 0x3d),
                accent: ACCENT,
                on_accent: Color::Rgb(0xff, 0xff, 0xff),
            },
        }
    }
}
