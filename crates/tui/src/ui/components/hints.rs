use engine::Route;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, Focus},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Hints for whatever currently owns the keyboard.
pub fn hints_for(state: &AppState) -> Vec<KeyHint> {
    if state.alert.is_some() {
        return vec![KeyHint::new("Enter", "fechar")];
    }
    if state.expenses.form.is_some() {
        return vec![
            KeyHint::new("Tab/↑↓", "campo"),
            KeyHint::new("Enter", "salvar"),
            KeyHint::new("Esc", "cancelar"),
        ];
    }
    if state.expenses.confirm_delete.is_some() {
        return vec![KeyHint::new("s", "excluir"), KeyHint::new("n", "cancelar")];
    }

    let mut hints = vec![KeyHint::new("↑↓", "selecionar")];
    match state.focus {
        Focus::Menu => hints.push(KeyHint::new("Enter", "abrir")),
        Focus::Content => {
            hints.push(KeyHint::new("Tab", "menu"));
            hints.push(KeyHint::new("r", "recarregar"));
            match state.route {
                Some(Route::Expenses) => {
                    hints.push(KeyHint::new("n", "nova"));
                    hints.push(KeyHint::new("e", "editar"));
                    hints.push(KeyHint::new("d", "excluir"));
                    hints.push(KeyHint::new("s", "resumo"));
                }
                Some(Route::Statement) => hints.push(KeyHint::new("s", "resumo")),
                _ => {}
            }
        }
    }
    hints.extend([
        KeyHint::new("+/-", "zoom"),
        KeyHint::new("l", "baixa visão"),
        KeyHint::new("o", "sair"),
        KeyHint::new("q", "fechar"),
    ]);
    hints
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(theme.dim),
        ));
    }

    spans
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(hints_to_spans(&hints_for(state), theme));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use crate::local_state::Preferences;

    use super::*;

    fn keys(hints: &[KeyHint]) -> Vec<&'static str> {
        hints.iter().map(|hint| hint.key).collect()
    }

    #[test]
    fn alert_only_offers_dismiss() {
        let mut state = AppState::new(None, Preferences::default(), String::new());
        state.alert = Some("falhou".to_string());

        assert_eq!(keys(&hints_for(&state)), ["Enter"]);
    }

    #[test]
    fn menu_focus_offers_open() {
        let state = AppState::new(None, Preferences::default(), String::new());

        let hints = keys(&hints_for(&state));

        assert!(hints.contains(&"Enter"));
        assert!(!hints.contains(&"d"));
    }

    #[test]
    fn open_form_only_offers_form_keys() {
        let mut state = AppState::new(None, Preferences::default(), String::new());
        state.expenses.form = Some(crate::app::ExpenseForm::blank());

        assert_eq!(keys(&hints_for(&state)), ["Tab/↑↓", "Enter", "Esc"]);
    }
}
