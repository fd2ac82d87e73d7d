use clap::ValueEnum;
use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Letter tile color
    pub tile: Color,
    /// Cursor cell background
    pub cursor_bg: Color,
    /// Selected (first-picked) cell background
    pub selected_bg: Color,
    /// Background of every cell once the grid is solved
    pub solved_bg: Color,
    /// Error/out-of-turns color
    pub error: Color,
    /// Warning color (last turn)
    pub warning: Color,
    /// Success color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 90, g: 95, b: 115 },
            tile: Color::Rgb { r: 255, g: 255, b: 255 },
            cursor_bg: Color::Rgb { r: 45, g: 50, b: 70 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            solved_bg: Color::Rgb { r: 40, g: 110, b: 60 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            warning: Color::Rgb { r: 255, g: 200, b: 80 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 150, g: 150, b: 170 },
            tile: Color::Rgb { r: 0, g: 0, b: 0 },
            cursor_bg: Color::Rgb { r: 225, g: 228, b: 240 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            solved_bg: Color::Rgb { r: 179, g: 217, b: 179 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            warning: Color::Rgb { r: 200, g: 120, b: 20 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            tile: Color::Yellow,
            cursor_bg: Color::DarkBlue,
            selected_bg: Color::Blue,
            solved_bg: Color::DarkGreen,
            error: Color::Red,
            warning: Color::Yellow,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}

/// Selectable theme names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl ThemeName {
    /// The theme after this one when cycling
    pub fn next(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::HighContrast,
            ThemeName::HighContrast => ThemeName::Dark,
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Dark => write!(f, "Dark"),
            ThemeName::Light => write!(f, "Light"),
            ThemeName::HighContrast => write!(f, "High contrast"),
        }
    }
}
