use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::DataResource;

use super::{
    spinner, star, status_badge, Component, ACCENT_PORTAL, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{Character, DetailView, Enrichment, EpisodeInfo, PlaceInfo};

#[derive(Default)]
pub struct DetailPanel;

pub struct DetailPanelProps<'a> {
    pub detail: &'a DetailView,
    pub is_favorite: bool,
    pub tick: u64,
}

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("DETAIL")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM));

        let text = match &props.detail.character {
            Some(character) => detail_text(character, props.is_favorite, &props.detail.enrichment, props.tick),
            None => Text::from(Span::styled(
                "Select a character and press Enter to see the details.",
                Style::default().fg(TEXT_DIM),
            )),
        };
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

fn label(name: &str) -> Span<'static> {
    Span::styled(format!("{name}: "), Style::default().fg(TEXT_DIM))
}

fn field(name: &str, value: &str) -> Line<'static> {
    Line::from(vec![label(name), Span::raw(value.to_string())])
}

fn sub_field(name: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{name}: "), Style::default().fg(TEXT_DIM)),
        Span::raw(value.to_string()),
    ])
}

fn place_lines(lines: &mut Vec<Line<'static>>, info: Option<&PlaceInfo>, with_dimension: bool) {
    let Some(info) = info else {
        return;
    };
    if let Some(kind) = info.kind() {
        lines.push(sub_field("Type", kind));
    }
    if with_dimension {
        if let Some(dimension) = info.dimension() {
            lines.push(sub_field("Dimension", dimension));
        }
    }
}

fn episode_lines(lines: &mut Vec<Line<'static>>, episode: &EpisodeInfo) {
    lines.push(field("First episode", &episode.name));
    lines.push(sub_field(
        "Aired",
        &format!("{} - {}", episode.code, episode.air_date),
    ));
}

pub fn detail_text(
    character: &Character,
    is_favorite: bool,
    enrichment: &DataResource<Enrichment>,
    tick: u64,
) -> Text<'static> {
    let loaded = enrichment.data();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                character.name.clone(),
                Style::default()
                    .fg(ACCENT_PORTAL)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            star(is_favorite),
        ]),
        Line::from(Span::styled(
            character.image.clone(),
            Style::default().fg(TEXT_DIM),
        )),
        Line::default(),
        Line::from(vec![label("Status"), status_badge(character.status)]),
        field("Species", &character.species),
        field("Gender", &character.gender),
    ];
    if let Some(kind) = character.kind() {
        lines.push(field("Type", kind));
    }

    lines.push(field("Origin", &character.origin.name));
    place_lines(&mut lines, loaded.and_then(|e| e.origin.as_ref()), true);
    lines.push(field("Location", &character.location.name));
    place_lines(&mut lines, loaded.and_then(|e| e.location.as_ref()), false);

    if let Some(episode) = loaded.and_then(|e| e.first_episode.as_ref()) {
        episode_lines(&mut lines, episode);
    }
    lines.push(field("Created", &character.created_label()));

    match enrichment {
        DataResource::Loading => {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("{} Loading details...", spinner(tick)),
                Style::default().fg(TEXT_DIM),
            )));
        }
        DataResource::Failed(_) => {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Could not load extra details.",
                Style::default().fg(TEXT_DIM),
            )));
        }
        DataResource::Empty | DataResource::Loaded(_) => {}
    }

    Text::from(lines)
}
