use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::{focus_border, truncate, Component, ACCENT_GOLD, BG_PANEL, STAR_ON, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::Character;

const BADGE_NAME_WIDTH: usize = 18;
const BADGE_GAP: &str = "  ";

/// One badge per favorite that is present in the loaded list.
#[derive(Default)]
pub struct FavoritesBar;

pub struct FavoritesBarProps<'a> {
    pub favorites: &'a [&'a Character],
    /// All stored favorites, loaded or not.
    pub total: usize,
    pub selected: usize,
    pub is_focused: bool,
}

fn badge_label(character: &Character) -> String {
    format!("{STAR_ON} {}", truncate(&character.name, BADGE_NAME_WIDTH))
}

/// First badge to draw so that `selected` fits inside `width` columns.
fn first_visible(labels: &[String], selected: usize, width: usize) -> usize {
    let mut used = 0;
    let mut first = selected;
    for index in (0..=selected).rev() {
        used += labels[index].chars().count() + BADGE_GAP.len();
        if used > width && index < selected {
            break;
        }
        first = index;
    }
    first
}

impl Component<Action> for FavoritesBar {
    type Props<'a> = FavoritesBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let selected_id = props
            .favorites
            .get(props.selected.min(props.favorites.len().saturating_sub(1)))
            .map(|c| c.id);

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::FavoriteMove(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::FavoriteMove(1)),
                KeyCode::Enter => selected_id.map(Action::DetailOpen),
                KeyCode::Char('x') | KeyCode::Delete => selected_id.map(Action::FavoriteToggle),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("FAVORITES ({})", props.total))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if props.favorites.is_empty() {
            let hint = if props.total == 0 {
                "No favorites yet. Press f on a card to add one.".to_string()
            } else {
                format!("{} saved, none in the current list.", props.total)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(hint, Style::default().fg(TEXT_DIM))),
                inner,
            );
            return;
        }

        let labels: Vec<String> = props.favorites.iter().map(|c| badge_label(c)).collect();
        let selected = props.selected.min(labels.len() - 1);
        let first = first_visible(&labels, selected, inner.width as usize);

        let mut spans = Vec::new();
        for (index, label) in labels.into_iter().enumerate().skip(first) {
            let style = if props.is_focused && index == selected {
                Style::default()
                    .fg(BG_PANEL)
                    .bg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(ACCENT_GOLD)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(BADGE_GAP));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn character(id: u32, name: &str) -> Character {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "status": "Alive",
            "species": "Human",
            "gender": "Male",
            "origin": { "name": "Earth", "url": "" },
            "location": { "name": "Earth", "url": "" },
            "image": "",
            "created": "2017-11-04T18:48:46.250Z"
        }))
        .unwrap()
    }

    #[test]
    fn x_removes_selected_favorite() {
        let rick = character(1, "Rick Sanchez");
        let morty = character(2, "Morty Smith");
        let favorites = [&rick, &morty];
        let mut bar = FavoritesBar;

        let actions: Vec<_> = bar
            .handle_event(
                &EventKind::Key(key("x")),
                FavoritesBarProps {
                    favorites: &favorites,
                    total: 2,
                    selected: 1,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::FavoriteToggle(2));
    }

    #[test]
    fn renders_loaded_badges_and_total() {
        let rick = character(1, "Rick Sanchez");
        let favorites = [&rick];
        let mut render = RenderHarness::new(60, 3);
        let mut bar = FavoritesBar;

        let output = render.render_to_string_plain(|frame| {
            let props = FavoritesBarProps {
                favorites: &favorites,
                total: 4,
                selected: 0,
                is_focused: false,
            };
            bar.render(frame, frame.area(), props);
        });

        assert!(output.contains("FAVORITES (4)"));
        assert!(output.contains("\u{2605} Rick Sanchez"));
    }

    #[test]
    fn window_keeps_selected_badge_visible() {
        let labels: Vec<String> = (0..10).map(|i| format!("badge-{i}")).collect();
        assert_eq!(first_visible(&labels, 0, 20), 0);
        // each badge is 7 + 2 columns wide
        assert_eq!(first_visible(&labels, 9, 20), 8);
    }
}
