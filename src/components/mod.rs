pub mod card_grid;
pub mod detail_panel;
pub mod favorites_bar;
pub mod search_bar;
pub mod stats_panel;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card_grid::{CardGrid, CardGridProps};
pub use detail_panel::{DetailPanel, DetailPanelProps};
pub use favorites_bar::{FavoritesBar, FavoritesBarProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use stats_panel::{StatsPanel, StatsPanelProps};

use crate::state::Status;

pub const BG_BASE: Color = Color::Rgb(14, 16, 24);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 38);
pub const TEXT_MAIN: Color = Color::Rgb(230, 236, 240);
pub const TEXT_DIM: Color = Color::Rgb(150, 162, 176);
pub const ACCENT_PORTAL: Color = Color::Rgb(151, 206, 76);
pub const ACCENT_GOLD: Color = Color::Rgb(240, 196, 80);

pub const STAR_ON: &str = "\u{2605}";
pub const STAR_OFF: &str = "\u{2606}";
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// The one place a status is turned into a colour.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Alive => Color::Rgb(85, 204, 68),
        Status::Dead => Color::Rgb(214, 61, 46),
        Status::Unknown => Color::Rgb(158, 158, 158),
    }
}

pub fn status_badge(status: Status) -> Span<'static> {
    Span::styled(
        format!("\u{25cf} {}", status.label()),
        Style::default()
            .fg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

pub fn star(is_favorite: bool) -> Span<'static> {
    if is_favorite {
        Span::styled(STAR_ON, Style::default().fg(ACCENT_GOLD))
    } else {
        Span::styled(STAR_OFF, Style::default().fg(TEXT_DIM))
    }
}

pub fn focus_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(ACCENT_PORTAL)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

pub fn spinner(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('\u{2026}');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_its_own_colour() {
        let colors: Vec<_> = Status::ALL.iter().map(|s| status_color(*s)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Rick Sanchez", 20), "Rick Sanchez");
        assert_eq!(truncate("Abradolf Lincler", 8), "Abradol\u{2026}");
        assert_eq!(truncate("Rick", 0), "");
    }
}
