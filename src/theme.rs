use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    /// Dark theme (default)
    #[default]
    Mocha,
    /// Light theme
    Latte,
}

/// Styling configuration for modal directives.
///
/// Passed explicitly into view construction rather than looked up from a
/// global, so hosts decide where theming lives. Trimmed to the colors modal
/// presentation actually uses.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Modal titles and headers
    pub accent_title: Color,
    /// Errors, destructive actions
    pub accent_error: Color,
    /// Warnings, cautionary actions
    pub accent_warning: Color,
    /// Confirm/primary actions
    pub accent_success: Color,
    /// Main content
    pub text_primary: Color,
    /// Secondary content, hints
    pub text_secondary: Color,
    /// Panel borders
    pub border_primary: Color,
    /// Main background
    pub bg_base: Color,
    /// Modals, floating elements
    pub bg_elevated: Color,
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    fn mocha() -> Self {
        Self {
            // From Catppuccin Mocha
            accent_title: Color::Rgb(0xcb, 0xa6, 0xf7),   // mauve
            accent_error: Color::Rgb(0xf3, 0x8b, 0xa8),   // red
            accent_warning: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            accent_success: Color::Rgb(0xa6, 0xe3, 0xa1), // green
            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),   // text
            text_secondary: Color::Rgb(0xba, 0xc2, 0xde), // subtext1
            border_primary: Color::Rgb(0x7f, 0x84, 0x9c), // overlay1
            bg_base: Color::Rgb(0x1e, 0x1e, 0x2e),        // base
            bg_elevated: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
        }
    }

    fn latte() -> Self {
        Self {
            // From Catppuccin Latte
            accent_title: Color::Rgb(0x88, 0x39, 0xef),   // mauve
            accent_error: Color::Rgb(0xd2, 0x0f, 0x39),   // red
            accent_warning: Color::Rgb(0xdf, 0x8e, 0x1d), // yellow
            accent_success: Color::Rgb(0x40, 0xa0, 0x2b), // green
            text_primary: Color::Rgb(0x4c, 0x4f, 0x69),   // text
            text_secondary: Color::Rgb(0x5c, 0x5f, 0x77), // subtext1
            border_primary: Color::Rgb(0x8c, 0x8f, 0xa1), // overlay1
            bg_base: Color::Rgb(0xef, 0xf1, 0xf5),        // base
            bg_elevated: Color::Rgb(0xbc, 0xc0, 0xcc),    // surface1
        }
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.accent_error)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.accent_success)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent_title)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}
