use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::{
    focus_border, spinner, star, status_badge, status_color, truncate, Component, ACCENT_PORTAL,
    BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::favorites::Favorites;
use crate::state::{grid_columns_for, Character, CARD_HEIGHT, CARD_WIDTH};

/// Responsive grid of character cards. Keeps its own scroll offset so the
/// selected card stays in view.
#[derive(Default)]
pub struct CardGrid {
    scroll_row: usize,
}

pub struct CardGridProps<'a> {
    pub characters: &'a [Character],
    pub favorites: &'a Favorites,
    pub selected: usize,
    pub loading: bool,
    pub no_results: bool,
    pub tick: u64,
    pub is_focused: bool,
}

impl CardGrid {
    pub fn new() -> Self {
        Self::default()
    }

    fn follow_selection(&mut self, selected_row: usize, visible_rows: usize) {
        if selected_row < self.scroll_row {
            self.scroll_row = selected_row;
        } else if selected_row >= self.scroll_row + visible_rows {
            self.scroll_row = selected_row + 1 - visible_rows;
        }
    }
}

impl Component<Action> for CardGrid {
    type Props<'a> = CardGridProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let selected_id = props.characters.get(props.selected).map(|c| c.id);

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::GridMove(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::GridMove(1)),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::GridMoveRow(-1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::GridMoveRow(1)),
                KeyCode::PageUp => Some(Action::GridPage(-1)),
                KeyCode::PageDown => Some(Action::GridPage(1)),
                KeyCode::Home => Some(Action::GridJumpTop),
                KeyCode::End => Some(Action::GridJumpBottom),
                KeyCode::Enter => selected_id.map(Action::DetailOpen),
                KeyCode::Char('f') => selected_id.map(Action::FavoriteToggle),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => {
                let step = delta.signum() as i16;
                (step != 0).then_some(Action::GridMoveRow(step))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let title = if props.characters.is_empty() {
            "CHARACTERS".to_string()
        } else {
            format!("CHARACTERS ({})", props.characters.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if props.characters.is_empty() {
            let message = if props.no_results {
                "No characters found.".to_string()
            } else if props.loading {
                format!("{} Loading characters...", spinner(props.tick))
            } else {
                String::new()
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM));
            frame.render_widget(paragraph, inner);
            return;
        }

        let columns = grid_columns_for(inner.width);
        let visible_rows = ((inner.height / CARD_HEIGHT) as usize).max(1);
        let selected = props.selected.min(props.characters.len() - 1);
        self.follow_selection(selected / columns, visible_rows);

        let first = self.scroll_row * columns;
        let visible = props
            .characters
            .iter()
            .enumerate()
            .skip(first)
            .take(columns * visible_rows);
        for (index, character) in visible {
            let slot = index - first;
            let card_area = Rect {
                x: inner.x + (slot % columns) as u16 * CARD_WIDTH,
                y: inner.y + (slot / columns) as u16 * CARD_HEIGHT,
                width: CARD_WIDTH.min(inner.width),
                height: CARD_HEIGHT,
            }
            .intersection(inner);
            render_card(
                frame,
                card_area,
                character,
                props.favorites.contains(character.id),
                props.is_focused && index == selected,
            );
        }

        let shown_rows = props.characters.len().div_ceil(columns);
        if props.loading && self.scroll_row + visible_rows >= shown_rows {
            let footer = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1.min(inner.height),
                ..inner
            };
            let line = Line::from(Span::styled(
                format!("{} Loading more...", spinner(props.tick)),
                Style::default().fg(TEXT_DIM),
            ))
            .right_aligned();
            frame.render_widget(Paragraph::new(line), footer);
        }
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    character: &Character,
    is_favorite: bool,
    is_selected: bool,
) {
    let border = if is_selected {
        Style::default()
            .fg(ACCENT_PORTAL)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(status_color(character.status))
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let tag = format!("#{}", character.id);
    let gap = width.saturating_sub(tag.chars().count() + 1);
    let name_style = if is_selected {
        Style::default()
            .fg(ACCENT_PORTAL)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD)
    };

    let text = Text::from(vec![
        Line::from(vec![
            Span::styled(tag, Style::default().fg(TEXT_DIM)),
            Span::raw(" ".repeat(gap)),
            star(is_favorite),
        ]),
        Line::from(Span::styled(truncate(&character.name, width), name_style)),
        Line::from(Span::styled(
            truncate(&character.species, width),
            Style::default().fg(TEXT_MAIN),
        )),
        Line::from(Span::styled(
            truncate(&character.gender, width),
            Style::default().fg(TEXT_DIM),
        )),
        Line::from(status_badge(character.status)),
    ]);
    frame.render_widget(Paragraph::new(text), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn character(id: u32, name: &str, status: &str) -> Character {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "status": status,
            "species": "Human",
            "type": "",
            "gender": "Female",
            "origin": { "name": "Earth", "url": "" },
            "location": { "name": "Earth", "url": "" },
            "image": "",
            "episode": [],
            "created": "2017-11-04T18:48:46.250Z"
        }))
        .unwrap()
    }

    fn props<'a>(characters: &'a [Character], favorites: &'a Favorites) -> CardGridProps<'a> {
        CardGridProps {
            characters,
            favorites,
            selected: 0,
            loading: false,
            no_results: false,
            tick: 0,
            is_focused: true,
        }
    }

    #[test]
    fn enter_opens_selected_card() {
        let characters = vec![character(1, "Rick Sanchez", "Alive"), character(2, "Morty Smith", "Alive")];
        let favorites = Favorites::default();
        let mut grid = CardGrid::new();

        let actions: Vec<_> = grid
            .handle_event(
                &EventKind::Key(crossterm::event::KeyEvent::new(
                    KeyCode::Enter,
                    crossterm::event::KeyModifiers::NONE,
                )),
                CardGridProps {
                    selected: 1,
                    ..props(&characters, &favorites)
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::DetailOpen(2));
    }

    #[test]
    fn f_toggles_without_opening() {
        let characters = vec![character(7, "Summer Smith", "Alive")];
        let favorites = Favorites::default();
        let mut grid = CardGrid::new();

        let actions: Vec<_> = grid
            .handle_event(&EventKind::Key(key("f")), props(&characters, &favorites))
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::FavoriteToggle(7));
    }

    #[test]
    fn keys_on_empty_grid_only_move() {
        let favorites = Favorites::default();
        let mut grid = CardGrid::new();

        let actions: Vec<_> = grid
            .handle_event(&EventKind::Key(key("f")), props(&[], &favorites))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn renders_cards_with_badges_and_stars() {
        let characters = vec![
            character(1, "Rick Sanchez", "Alive"),
            character(2, "Birdperson", "Dead"),
            character(3, "Mr. Meeseeks", "unknown"),
        ];
        let favorites: Favorites = [2].into_iter().collect();
        let mut render = RenderHarness::new(90, 20);
        let mut grid = CardGrid::new();

        let output = render.render_to_string_plain(|frame| {
            grid.render(frame, frame.area(), props(&characters, &favorites));
        });

        assert!(output.contains("CHARACTERS (3)"));
        assert!(output.contains("Rick Sanchez"));
        assert!(output.contains("#2"));
        assert!(output.contains("Alive"));
        assert!(output.contains("Dead"));
        assert!(output.contains("unknown"));
        assert_eq!(output.matches('\u{2605}').count(), 1);
    }

    #[test]
    fn empty_state_after_no_results() {
        let favorites = Favorites::default();
        let mut render = RenderHarness::new(60, 12);
        let mut grid = CardGrid::new();

        let output = render.render_to_string_plain(|frame| {
            let props = CardGridProps {
                no_results: true,
                ..props(&[], &favorites)
            };
            grid.render(frame, frame.area(), props);
        });

        assert!(output.contains("No characters found."));
    }

    #[test]
    fn scroll_follows_selection() {
        let mut grid = CardGrid::new();
        grid.follow_selection(5, 2);
        assert_eq!(grid.scroll_row, 4);
        grid.follow_selection(1, 2);
        assert_eq!(grid.scroll_row, 1);
    }
}
