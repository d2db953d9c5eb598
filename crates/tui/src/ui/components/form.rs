use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{ExpenseForm, FormField},
    ui::{components::centered_box, theme::Theme},
};

const LABEL_WIDTH: usize = 12;

/// Create/edit dialog for one expense, drawn over the whole screen.
pub fn render_expense_form(frame: &mut Frame<'_>, area: Rect, form: &ExpenseForm, theme: &Theme) {
    let width = 52;
    let height = FormField::ALL.len() as u16 + 4;
    let card_area = centered_box(width, height, area);

    frame.render_widget(Clear, card_area);

    let title = match form.id() {
        Some(id) => format!(" editar despesa {id} "),
        None => " nova despesa ".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(theme.accent)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FormField::ALL.len() as u16),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let fields = FormField::ALL
        .iter()
        .map(|field| field_line(form, *field, theme))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(fields), rows[0]);

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(Line::styled(error.clone(), Style::default().fg(theme.error))),
            rows[2],
        );
    }
}

fn field_line(form: &ExpenseForm, field: FormField, theme: &Theme) -> Line<'static> {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let cursor = if focused { "▏" } else { "" };

    Line::from(vec![
        Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
        Span::styled(
            format!("{}{cursor}", form.field(field)),
            Style::default().fg(theme.text),
        ),
    ])
}
