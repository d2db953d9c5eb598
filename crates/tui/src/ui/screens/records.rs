//! Plain listings for receitas, categorias and usuários.
use engine::Money;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
};

use crate::{
    app::{AppState, RecordList},
    ui::{components::money::styled_entry, scaled, theme::Theme},
};

use super::{panel, selection};

pub fn render_incomes(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let zoom = state.prefs.font_size_multiplier;
    let rows = state.incomes.items.iter().map(|income| {
        Row::new(vec![
            Cell::from(income.id.to_string()),
            Cell::from(
                income
                    .entry_date
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            Cell::from(
                income
                    .category
                    .as_ref()
                    .map(|c| c.description.clone())
                    .unwrap_or_default(),
            ),
            Cell::from(
                income
                    .user
                    .as_ref()
                    .map(|u| u.name.clone())
                    .unwrap_or_default(),
            ),
            Cell::from(styled_entry(
                Money::from_wire(income.value_minor),
                engine::Direction::Credit,
                theme,
            )),
        ])
    });

    render_table(
        frame,
        area,
        state,
        theme,
        "receitas",
        &state.incomes,
        ["Id", "Entrada", "Categoria", "Usuário", "Valor"].to_vec(),
        rows,
        vec![
            Constraint::Length(scaled(5, zoom)),
            Constraint::Length(scaled(10, zoom)),
            Constraint::Min(12),
            Constraint::Length(scaled(10, zoom)),
            Constraint::Length(scaled(14, zoom)),
        ],
    );
}

pub fn render_categories(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let zoom = state.prefs.font_size_multiplier;
    let rows = state.categories.items.iter().map(|category| {
        Row::new(vec![
            Cell::from(category.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::from(category.description.clone()),
            Cell::from(category.kind.clone()),
        ])
    });

    render_table(
        frame,
        area,
        state,
        theme,
        "categorias",
        &state.categories,
        ["Id", "Descrição", "Tipo"].to_vec(),
        rows,
        vec![
            Constraint::Length(scaled(5, zoom)),
            Constraint::Min(16),
            Constraint::Length(scaled(12, zoom)),
        ],
    );
}

pub fn render_users(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let zoom = state.prefs.font_size_multiplier;
    let rows = state.users.items.iter().map(|user| {
        Row::new(vec![
            Cell::from(user.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::from(user.name.clone()),
        ])
    });

    render_table(
        frame,
        area,
        state,
        theme,
        "usuários",
        &state.users,
        ["Id", "Nome"].to_vec(),
        rows,
        vec![Constraint::Length(scaled(5, zoom)), Constraint::Min(16)],
    );
}

fn render_table<'a, T>(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    theme: &Theme,
    title: &str,
    list: &RecordList<T>,
    header: Vec<&'a str>,
    rows: impl Iterator<Item = Row<'a>>,
    widths: Vec<Constraint>,
) {
    let header =
        Row::new(header).style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));
    let rows = rows.map(|row| row.style(Style::default().fg(theme.text)));
    let title = format!("{title} ({})", list.items.len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&title, state, theme))
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state =
        TableState::default().with_selected(selection(state, list.selected, list.items.len()));
    frame.render_stateful_widget(table, area, &mut table_state);
}
