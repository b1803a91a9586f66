//! Theme-aware terminal colors

use owo_colors::{OwoColorize, Rgb};

use crate::activity::ActivityType;
use crate::data::TrendDirection;
use crate::theme::ResolvedTheme;

/// What a piece of text is, for coloring purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Heading,
    Text,
    Muted,
    Primary,
    Grid,
    Success,
    Warning,
    Danger,
    Info,
}

impl From<ActivityType> for Role {
    fn from(kind: ActivityType) -> Self {
        match kind {
            ActivityType::Success => Role::Success,
            ActivityType::Warning => Role::Warning,
            ActivityType::Danger => Role::Danger,
            ActivityType::Info => Role::Info,
        }
    }
}

impl From<TrendDirection> for Role {
    fn from(direction: TrendDirection) -> Self {
        match direction {
            TrendDirection::Up => Role::Success,
            TrendDirection::Down => Role::Danger,
            TrendDirection::Neutral => Role::Muted,
        }
    }
}

/// Colors for one resolved theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    theme: ResolvedTheme,
    enabled: bool,
}

impl Palette {
    pub fn new(theme: ResolvedTheme, enabled: bool) -> Self {
        Self { theme, enabled }
    }

    /// RGB value for a role (Tailwind 600 shades on light, 400 shades on dark)
    pub fn rgb(&self, role: Role) -> Rgb {
        let dark = self.theme.is_dark();
        match role {
            Role::Heading if dark => Rgb(0xf9, 0xfa, 0xfb),
            Role::Heading => Rgb(0x11, 0x18, 0x27),
            Role::Text if dark => Rgb(0xd1, 0xd5, 0xdb),
            Role::Text => Rgb(0x37, 0x41, 0x51),
            Role::Muted if dark => Rgb(0x9c, 0xa3, 0xaf),
            Role::Muted => Rgb(0x6b, 0x72, 0x80),
            Role::Primary if dark => Rgb(0x60, 0xa5, 0xfa),
            Role::Primary => Rgb(0x3b, 0x82, 0xf6),
            Role::Grid if dark => Rgb(0x37, 0x41, 0x51),
            Role::Grid => Rgb(0xe5, 0xe7, 0xeb),
            Role::Success if dark => Rgb(0x34, 0xd3, 0x99),
            Role::Success => Rgb(0x05, 0x96, 0x69),
            Role::Warning if dark => Rgb(0xfb, 0xbf, 0x24),
            Role::Warning => Rgb(0xd9, 0x77, 0x06),
            Role::Danger if dark => Rgb(0xf8, 0x71, 0x71),
            Role::Danger => Rgb(0xdc, 0x26, 0x26),
            Role::Info if dark => Rgb(0x60, 0xa5, 0xfa),
            Role::Info => Rgb(0x25, 0x63, 0xeb),
        }
    }

    /// Color `text` for `role`; plain text when colors are off
    pub fn paint(&self, text: &str, role: Role) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match role {
            Role::Heading => text.color(self.rgb(role)).bold().to_string(),
            _ => text.color(self.rgb(role)).to_string(),
        }
    }
}
