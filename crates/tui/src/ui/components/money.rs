use engine::{Direction, Money};
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Amount colored by sign: credits green, debits red, zero dimmed.
#[must_use]
pub fn styled_amount(amount: Money, theme: &Theme) -> Span<'static> {
    let color = if amount.is_zero() {
        theme.dim
    } else if amount.is_negative() {
        theme.negative
    } else {
        theme.positive
    };
    Span::styled(amount.to_string(), Style::default().fg(color))
}

/// Unsigned ledger amount colored by the side of the ledger it sits on.
#[must_use]
pub fn styled_entry(amount: Money, direction: Direction, theme: &Theme) -> Span<'static> {
    let color = match direction {
        Direction::Credit => theme.positive,
        Direction::Debit => theme.negative,
    };
    Span::styled(amount.to_string(), Style::default().fg(color))
}
