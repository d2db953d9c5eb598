use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Focus},
    ui::theme::Theme,
};

/// Sidebar with the entries the current role may open.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Menu;
    let block = Block::default()
        .title(" menu ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { theme.accent } else { theme.border }));

    let visible = state.gate.visible_menu();
    if visible.is_empty() {
        let message = Paragraph::new(vec![
            Line::from("Sem acesso."),
            Line::from("Informe um token."),
        ])
        .style(Style::default().fg(theme.dim))
        .block(block);
        frame.render_widget(message, area);
        return;
    }

    let items = visible
        .iter()
        .map(|item| {
            let style = if state.route == Some(item.route) {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::styled(item.label, style))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(state.menu_selected));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
