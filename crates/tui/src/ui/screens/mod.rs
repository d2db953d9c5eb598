pub mod expenses;
pub mod records;
pub mod statement;
pub mod welcome;

use ratatui::{
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders},
};

use crate::{
    app::{AppState, Focus},
    ui::theme::Theme,
};

/// Rounded panel; the accent border marks where the keyboard goes.
fn panel(title: &str, state: &AppState, theme: &Theme) -> Block<'static> {
    let border = if state.focus == Focus::Content {
        theme.accent
    } else {
        theme.border
    };
    Block::default()
        .title(Line::styled(
            format!(" {title} "),
            Style::default().fg(theme.accent),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
}

/// Cursor for a table, or none while the menu owns the keyboard.
fn selection(state: &AppState, selected: usize, len: usize) -> Option<usize> {
    (state.focus == Focus::Content && len > 0).then(|| selected.min(len - 1))
}
