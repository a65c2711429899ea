use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{truncate, Component, ACCENT_GOLD, ACCENT_PORTAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::stats::{StatBar, StatsSnapshot};

const LABEL_WIDTH: usize = 16;
const EMPTY_LABEL: &str = "No type";

#[derive(Default)]
pub struct StatsPanel;

pub struct StatsPanelProps<'a> {
    pub stats: &'a StatsSnapshot,
}

impl Component<Action> for StatsPanel {
    type Props<'a> = StatsPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
        render_table(frame, chunks[0], "SPECIES", &props.stats.top_species(), ACCENT_PORTAL);
        render_table(frame, chunks[1], "TYPES", &props.stats.top_types(), ACCENT_GOLD);
    }
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    bars: &[StatBar],
    color: ratatui::style::Color,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if bars.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No data yet.", Style::default().fg(TEXT_DIM))),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let lines: Vec<Line> = bars
        .iter()
        .map(|bar| {
            let figures = format!(" {} ({})", bar.count, bar.percent_label());
            let bar_width = width.saturating_sub(LABEL_WIDTH + 1 + figures.len());
            stat_line(bar, bar_width, figures, color)
        })
        .collect();
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

fn stat_line(bar: &StatBar, bar_width: usize, figures: String, color: ratatui::style::Color) -> Line<'static> {
    let label = if bar.label.trim().is_empty() {
        EMPTY_LABEL
    } else {
        bar.label.as_str()
    };
    let filled = ((bar.percent / 100.0) * bar_width as f64).round() as usize;
    Line::from(vec![
        Span::raw(format!("{:<width$} ", truncate(label, LABEL_WIDTH), width = LABEL_WIDTH)),
        Span::styled("\u{2588}".repeat(filled.min(bar_width)), Style::default().fg(color)),
        Span::styled(figures, Style::default().fg(TEXT_DIM)),
    ])
}
