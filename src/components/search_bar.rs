use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{focus_border, Component, ACCENT_GOLD, ACCENT_PORTAL, BG_PANEL, STAR_ON, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::{Gender, Status};

const PLACEHOLDER: &str = "Search by name...";
const FILTERS_WIDTH: u16 = 52;

/// Header row: name search field, status and gender selectors, favorite count.
pub struct SearchBar {
    input: TextInput,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub status: Option<Status>,
    pub gender: Option<Gender>,
    pub favorites_count: usize,
    pub is_focused: bool,
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_style() -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: Some(TEXT_MAIN),
            },
            placeholder_style: None,
            cursor_style: None,
        }
    }
}

fn selector_label<T: Copy>(value: Option<T>, label: fn(T) -> &'static str) -> &'static str {
    value.map(label).unwrap_or("Any")
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if key.code == KeyCode::Esc {
            return vec![Action::SearchBlur];
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: Self::input_style(),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("RICKDEX")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::horizontal([
            Constraint::Min(10),
            Constraint::Length(FILTERS_WIDTH.min(inner.width / 2)),
        ])
        .split(inner);

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: Self::input_style(),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        let key_style = Style::default()
            .fg(ACCENT_PORTAL)
            .add_modifier(Modifier::BOLD);
        let filters = Line::from(vec![
            Span::styled("Status ", Style::default().fg(TEXT_DIM)),
            Span::styled(selector_label(props.status, Status::label), key_style),
            Span::raw("  "),
            Span::styled("Gender ", Style::default().fg(TEXT_DIM)),
            Span::styled(selector_label(props.gender, Gender::label), key_style),
            Span::raw("  "),
            Span::styled(
                format!("{STAR_ON} {}", props.favorites_count),
                Style::default().fg(ACCENT_GOLD),
            ),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(filters), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn props(query: &str, is_focused: bool) -> SearchBarProps<'_> {
        SearchBarProps {
            query,
            status: Some(Status::Dead),
            gender: None,
            favorites_count: 3,
            is_focused,
            on_change: Action::SearchInput,
            on_submit: Action::SearchSubmit,
        }
    }

    #[test]
    fn typing_reports_new_value() {
        let mut bar = SearchBar::new();
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("r")), props("", true))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInput("r".into()));
    }

    #[test]
    fn escape_leaves_the_field() {
        let mut bar = SearchBar::new();
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), props("rick", true))
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::SearchBlur);
    }

    #[test]
    fn unfocused_ignores_keys() {
        let mut bar = SearchBar::new();
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("r")), props("", false))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn renders_selectors_and_count() {
        let mut render = RenderHarness::new(110, 3);
        let mut bar = SearchBar::new();
        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), props("", false));
        });

        assert!(output.contains("Search by name..."));
        assert!(output.contains("Status Dead"));
        assert!(output.contains("Gender Any"));
        assert!(output.contains("\u{2605} 3"));
    }
}
