use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{app::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut lines = vec![Line::styled(
        "Controle financeiro",
        Style::default().fg(theme.accent),
    )];
    lines.push(Line::from(""));

    if state.gate.is_authenticated() {
        lines.push(Line::styled(
            format!("Olá, {}.", state.gate.username()),
            Style::default().fg(theme.text),
        ));
        lines.push(Line::styled(
            "Escolha uma opção no menu e pressione Enter.",
            Style::default().fg(theme.dim),
        ));
    } else {
        lines.push(Line::styled(
            "Nenhuma sessão ativa.",
            Style::default().fg(theme.text),
        ));
        lines.push(Line::styled(
            "Inicie com --token ou defina CARTEIRA_TOKEN.",
            Style::default().fg(theme.dim),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
