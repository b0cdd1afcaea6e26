use ratatui::style::Color;

pub struct ThemeColors {
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

/// Light card on a dark terminal, with the feed's sage-green accent for
/// liked and interactive elements
pub fn card_theme() -> ThemeColors {
    ThemeColors {
        primary: Color::Rgb(126, 182, 152), // Sage green
        accent: Color::Rgb(126, 182, 152),
        text: Color::Rgb(220, 220, 220),
        text_dim: Color::Rgb(140, 140, 140),
        background: Color::Rgb(20, 20, 25),
        border: Color::Rgb(90, 90, 100),
        success: Color::Rgb(34, 197, 94),
        warning: Color::Rgb(255, 200, 100),
        error: Color::Rgb(239, 68, 68),
    }
}
