use ratatui::style::{Color, Modifier, Style};

/// Deep-blue theme.
///
/// - white text on a navy background
/// - sky-blue accents for focus and results
/// - red reserved for errors
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(12, 27, 66);
    pub const FG: Color = Color::Rgb(235, 240, 255);
    pub const FG_DIM: Color = Color::Rgb(150, 170, 215);
    pub const FG_MUTED: Color = Color::Rgb(90, 110, 160);

    pub const ACCENT_SKY: Color = Color::Rgb(96, 190, 255);
    pub const ACCENT_RED: Color = Color::Rgb(255, 90, 90);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::FG_DIM).bg(Self::BG)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// The focused input and the predicted value.
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT_SKY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }
}
