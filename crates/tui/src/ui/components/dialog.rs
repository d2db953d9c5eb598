use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::{components::centered_box, theme::Theme};

const DIALOG_WIDTH: u16 = 56;
const DIALOG_HEIGHT: u16 = 5;

/// Yes/no question drawn over the whole screen.
pub fn render_confirm(frame: &mut Frame<'_>, area: Rect, question: &str, theme: &Theme) {
    render_modal(frame, area, " confirmar ", question, theme.accent, theme);
}

/// Blocking notification; the caller dismisses it on the next key.
pub fn render_alert(frame: &mut Frame<'_>, area: Rect, message: &str, theme: &Theme) {
    render_modal(frame, area, " aviso ", message, theme.error, theme);
}

fn render_modal(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    message: &str,
    color: ratatui::style::Color,
    theme: &Theme,
) {
    let popup = centered_box(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Line::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));

    let body = Paragraph::new(message.to_string())
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(body, popup);
}
