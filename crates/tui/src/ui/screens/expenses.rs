use api_types::{WireDate, expense::Expense};
use engine::Money;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::AppState,
    ui::{components::money::styled_entry, scaled, theme::Theme},
};

use super::{panel, selection};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary_height = if state.expenses.show_summary { 3 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(summary_height)])
        .split(area);

    render_list(frame, layout[0], state, theme);
    if state.expenses.show_summary {
        render_summary(frame, layout[1], state, theme);
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let list = &state.expenses.list;
    let zoom = state.prefs.font_size_multiplier;

    let header = Row::new([
        "Id",
        "Pagamento",
        "Vencimento",
        "Descrição",
        "Categoria",
        "Usuário",
        "Valor",
    ])
    .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));

    let rows = list.items.iter().map(|expense| {
        Row::new(vec![
            Cell::from(expense.id.to_string()),
            Cell::from(date_cell(expense.payment_date.as_ref())),
            Cell::from(date_cell(expense.due_date.as_ref())),
            Cell::from(expense.description.clone().unwrap_or_default()),
            Cell::from(
                expense
                    .category
                    .as_ref()
                    .map(|c| c.description.clone())
                    .unwrap_or_default(),
            ),
            Cell::from(
                expense
                    .user
                    .as_ref()
                    .map(|u| u.name.clone())
                    .unwrap_or_default(),
            ),
            Cell::from(styled_entry(
                Money::from_wire(expense.value_minor),
                engine::Direction::Debit,
                theme,
            )),
        ])
        .style(Style::default().fg(theme.text))
    });

    let widths = [
        Constraint::Length(scaled(5, zoom)),
        Constraint::Length(scaled(10, zoom)),
        Constraint::Length(scaled(10, zoom)),
        Constraint::Min(12),
        Constraint::Length(scaled(14, zoom)),
        Constraint::Length(scaled(10, zoom)),
        Constraint::Length(scaled(14, zoom)),
    ];

    let title = format!("despesas ({})", list.items.len());
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

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = &state.expenses.list.items;
    let line = Line::from(vec![
        Span::styled("Registros ", Style::default().fg(theme.dim)),
        Span::styled(items.len().to_string(), Style::default().fg(theme.text)),
        Span::styled("   Total ", Style::default().fg(theme.dim)),
        styled_entry(total(items), engine::Direction::Debit, theme),
    ]);
    frame.render_widget(Paragraph::new(line).block(panel("resumo", state, theme)), area);
}

fn date_cell(date: Option<&WireDate>) -> String {
    date.map(ToString::to_string).unwrap_or_default()
}

/// Sum of the listed amounts; missing amounts count as zero.
fn total(items: &[Expense]) -> Money {
    items
        .iter()
        .map(|expense| Money::from_wire(expense.value_minor))
        .sum()
}
