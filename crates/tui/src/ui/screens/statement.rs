use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use engine::Transaction;

use crate::{
    app::AppState,
    ui::{
        components::money::{styled_amount, styled_entry},
        scaled,
        theme::Theme,
    },
};

use super::{panel, selection};

/// Dimension rows shown per column of the summary.
const SUMMARY_ROWS: u16 = 6;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary_height = if state.statement.show_summary {
        SUMMARY_ROWS + 4
    } else {
        0
    };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(summary_height),
        ])
        .split(area);

    render_totals(frame, layout[0], state, theme);
    render_ledger(frame, layout[1], state, theme);
    if state.statement.show_summary {
        render_summary(frame, layout[2], state, theme);
    }
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let totals = state.statement.statement.totals();
    let line = Line::from(vec![
        Span::styled("Receitas ", Style::default().fg(theme.dim)),
        styled_entry(totals.total_incomes, engine::Direction::Credit, theme),
        Span::styled("   Despesas ", Style::default().fg(theme.dim)),
        styled_entry(totals.total_expenses, engine::Direction::Debit, theme),
        Span::styled("   Saldo ", Style::default().fg(theme.dim)),
        styled_amount(totals.balance, theme),
    ]);
    frame.render_widget(Paragraph::new(line).block(panel("extrato", state, theme)), area);
}

fn render_ledger(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let ledger = state.statement.statement.ledger();
    let zoom = state.prefs.font_size_multiplier;

    let header = Row::new(LEDGER_HEADER)
        .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));

    let rows = ledger.iter().map(|tx| {
        let mut cells: Vec<Cell> = ledger_text(tx).into_iter().map(Cell::from).collect();
        cells.push(Cell::from(styled_entry(tx.value, tx.direction, theme)));
        Row::new(cells).style(Style::default().fg(theme.text))
    });

    let widths = [
        Constraint::Length(scaled(10, zoom)),
        Constraint::Length(scaled(8, zoom)),
        Constraint::Length(scaled(8, zoom)),
        Constraint::Min(12),
        Constraint::Length(scaled(14, zoom)),
        Constraint::Length(scaled(10, zoom)),
        Constraint::Length(scaled(14, zoom)),
    ];

    let title = format!("lançamentos ({})", ledger.len());
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
        TableState::default().with_selected(selection(state, state.statement.selected, ledger.len()));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// `Tipo` is the ledger side (Crédito/Débito); `Operação` is what produced
/// the row (Receita/Despesa).
const LEDGER_HEADER: [&str; 7] = [
    "Data",
    "Tipo",
    "Operação",
    "Descrição",
    "Categoria",
    "Usuário",
    "Valor",
];

/// Text columns of a ledger row, in [`LEDGER_HEADER`] order; the styled
/// amount comes last.
fn ledger_text(tx: &Transaction) -> [String; 6] {
    [
        tx.date.clone(),
        tx.direction.label().to_string(),
        tx.operation_kind.label().to_string(),
        tx.detailed_description.clone(),
        tx.category.clone().unwrap_or_default(),
        tx.user.clone().unwrap_or_default(),
    ]
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let statement = &state.statement.statement;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(area);

    let counts = vec![
        count_line("Despesas", statement.expense_count(), theme),
        count_line("Receitas", statement.income_count(), theme),
        count_line("Categorias", statement.category_count(), theme),
        count_line("Usuários", statement.user_count(), theme),
    ];
    frame.render_widget(
        Paragraph::new(counts).block(panel("resumo", state, theme)),
        columns[0],
    );

    let breakdown = statement.breakdown();
    frame.render_widget(
        Paragraph::new(dimension_lines(&breakdown.by_category, theme))
            .block(panel("por categoria", state, theme)),
        columns[1],
    );
    frame.render_widget(
        Paragraph::new(dimension_lines(&breakdown.by_user, theme))
            .block(panel("por usuário", state, theme)),
        columns[2],
    );
}

fn count_line(label: &'static str, count: usize, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(theme.dim)),
        Span::styled(count.to_string(), Style::default().fg(theme.text)),
    ])
}

fn dimension_lines(
    sums: &std::collections::BTreeMap<String, engine::Money>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    if sums.is_empty() {
        return vec![Line::styled("sem dados", Style::default().fg(theme.dim))];
    }
    sums.iter()
        .map(|(name, sum)| {
            Line::from(vec![
                Span::styled(format!("{name:<16}"), Style::default().fg(theme.text)),
                styled_amount(*sum, theme),
            ])
        })
        .collect()
}
