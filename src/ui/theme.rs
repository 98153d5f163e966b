use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub danger: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        bg: Color::Rgb(0xf5, 0xf0, 0xe6),
        fg: Color::Rgb(0x33, 0x33, 0x33),
        accent: Color::Rgb(0xd9, 0xa7, 0x6a),
        muted: Color::Gray,
        danger: Color::Red,
    };

    pub const DARK: Theme = Theme {
        bg: Color::Rgb(0x2c, 0x2c, 0x2c),
        fg: Color::Rgb(0xf9, 0xd6, 0x7a),
        accent: Color::Rgb(0xfc, 0xa3, 0x11),
        muted: Color::DarkGray,
        danger: Color::LightRed,
    };

    pub fn for_mode(dark: bool) -> Theme {
        if dark {
            Theme::DARK
        } else {
            Theme::LIGHT
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn hint(&self) -> Style {
        self.base().fg(self.muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
