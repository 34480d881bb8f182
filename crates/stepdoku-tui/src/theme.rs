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
    /// Block border color (thicker separators)
    pub box_border: Color,
    /// Given (puzzle) cell color
    pub given: Color,
    /// Solver-placed value color
    pub filled: Color,
    /// Accepted trial highlight
    pub success: Color,
    /// Rejected trial highlight
    pub error: Color,
    /// Status/info text color
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
    /// Look up a theme by CLI name
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 18, g: 20, b: 28 },
            fg: Color::Rgb { r: 225, g: 228, b: 238 },
            border: Color::Rgb { r: 72, g: 78, b: 94 },
            box_border: Color::Rgb { r: 125, g: 135, b: 165 },
            given: Color::Rgb { r: 250, g: 250, b: 255 },
            filled: Color::Rgb { r: 95, g: 175, b: 250 },
            success: Color::Rgb { r: 85, g: 230, b: 125 },
            error: Color::Rgb { r: 240, g: 95, b: 95 },
            info: Color::Rgb { r: 155, g: 160, b: 180 },
            key: Color::Rgb { r: 250, g: 205, b: 95 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 250, g: 250, b: 253 },
            fg: Color::Rgb { r: 28, g: 28, b: 38 },
            border: Color::Rgb { r: 185, g: 185, b: 198 },
            box_border: Color::Rgb { r: 55, g: 55, b: 75 },
            given: Color::Rgb { r: 10, g: 10, b: 10 },
            filled: Color::Rgb { r: 25, g: 95, b: 195 },
            success: Color::Rgb { r: 35, g: 150, b: 55 },
            error: Color::Rgb { r: 210, g: 45, b: 45 },
            info: Color::Rgb { r: 95, g: 95, b: 115 },
            key: Color::Rgb { r: 190, g: 115, b: 25 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            box_border: Color::White,
            given: Color::Yellow,
            filled: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lookup() {
        assert!(Theme::named("dark").is_some());
        assert!(Theme::named("light").is_some());
        assert!(Theme::named("high-contrast").is_some());
        assert!(Theme::named("sepia").is_none());
    }
}
