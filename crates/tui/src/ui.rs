use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};
use raythink_core::Mode;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg_page)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let line = match app.indicator.mode() {
        Mode::Running => running_line(app),
        Mode::Interrupted => Line::from(Span::styled(
            app.container.text_content(),
            Style::default().fg(app.theme.danger).bold(),
        )),
    };
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        chunks[1],
    );

    let footer = Line::from(Span::styled(
        "  q quit",
        Style::default().fg(app.theme.text_tertiary),
    ));
    frame.render_widget(Paragraph::new(footer), chunks[3]);
}

fn running_line(app: &App) -> Line<'static> {
    let slot = |id: &str| {
        app.container
            .query(id)
            .map(|el| el.text_content())
            .unwrap_or_default()
    };

    Line::from(vec![
        Span::styled(
            "Thinking",
            Style::default().fg(app.theme.text_primary).bold(),
        ),
        Span::styled(slot("dots"), Style::default().fg(app.theme.accent)),
        Span::styled(" (", Style::default().fg(app.theme.text_tertiary)),
        Span::styled(slot("timer"), Style::default().fg(app.theme.text_secondary)),
        Span::styled("s · ", Style::default().fg(app.theme.text_tertiary)),
        Span::styled(slot("tokens"), Style::default().fg(app.theme.text_secondary)),
        Span::styled(
            " tokens · esc to interrupt)",
            Style::default().fg(app.theme.text_tertiary),
        ),
    ])
}
