pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::Route;

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

const MENU_WIDTH: u16 = 16;

/// Scales a column width by the zoom preference.
pub fn scaled(width: u16, zoom: f64) -> u16 {
    (f64::from(width) * zoom).round() as u16
}

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::for_low_vision(state.prefs.low_vision);
    let area = frame.area();

    // Info bar, body, key hints
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(scaled(MENU_WIDTH, state.prefs.font_size_multiplier)),
            Constraint::Min(0),
        ])
        .split(layout[1]);

    components::menu::render(frame, body[0], state, &theme);
    render_content(frame, body[1], state, &theme);
    components::hints::render(frame, layout[2], state, &theme);

    if let Some(form) = &state.expenses.form {
        components::form::render_expense_form(frame, area, form, &theme);
    }
    if let Some(id) = state.expenses.confirm_delete {
        components::dialog::render_confirm(
            frame,
            area,
            &format!("Tem certeza que deseja excluir o registro {id}? (s/n)"),
            &theme,
        );
    }
    if let Some(message) = &state.alert {
        components::dialog::render_alert(frame, area, message, &theme);
    }
}

fn render_content(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    match state.route {
        None => screens::welcome::render(frame, area, state, theme),
        Some(Route::Statement) => screens::statement::render(frame, area, state, theme),
        Some(Route::Expenses) => screens::expenses::render(frame, area, state, theme),
        Some(Route::Incomes) => screens::records::render_incomes(frame, area, state, theme),
        Some(Route::Categories) => {
            screens::records::render_categories(frame, area, state, theme)
        }
        Some(Route::Users) => screens::records::render_users(frame, area, state, theme),
    }
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = if state.gate.is_authenticated() {
        format!("{} ({})", state.gate.username(), state.gate.role())
    } else {
        "sem sessão".to_string()
    };
    let low_vision = if state.prefs.low_vision { "On" } else { "Off" };

    let line = Line::from(vec![
        Span::styled(" carteira ", Style::default().fg(theme.accent)),
        Span::styled("│ ", Style::default().fg(theme.border)),
        Span::styled(user, Style::default().fg(theme.text)),
        Span::styled(" │ ", Style::default().fg(theme.border)),
        Span::styled(state.base_url.as_str(), Style::default().fg(theme.dim)),
        Span::styled(" │ ", Style::default().fg(theme.border)),
        Span::styled(
            format!(
                "zoom {:.1}x  baixa visão {low_vision}",
                state.prefs.font_size_multiplier
            ),
            Style::default().fg(theme.dim),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
