use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub error: Color,
    pub positive: Color,
    pub negative: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(70, 80, 90),
            error: Color::Rgb(200, 80, 80),
            positive: Color::Rgb(110, 190, 110),
            negative: Color::Rgb(210, 110, 90),
        }
    }
}

impl Theme {
    /// Palette used when the low-vision preference is on.
    pub fn high_contrast() -> Self {
        Self {
            text: Color::White,
            dim: Color::White,
            accent: Color::Yellow,
            border: Color::White,
            error: Color::LightRed,
            positive: Color::LightGreen,
            negative: Color::LightRed,
        }
    }

    pub fn for_low_vision(low_vision: bool) -> Self {
        if low_vision {
            Self::high_contrast()
        } else {
            Self::default()
        }
    }
}
