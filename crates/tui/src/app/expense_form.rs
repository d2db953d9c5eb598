//! Draft of an expense being created or edited.
use api_types::{WireDate, amount, expense::Expense};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Value,
    PaymentDate,
    DueDate,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        Self::Description,
        Self::Value,
        Self::PaymentDate,
        Self::DueDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Description => "Descrição",
            Self::Value => "Valor (R$)",
            Self::PaymentDate => "Pagamento",
            Self::DueDate => "Vencimento",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Description => Self::Value,
            Self::Value => Self::PaymentDate,
            Self::PaymentDate => Self::DueDate,
            Self::DueDate => Self::Description,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Description => Self::DueDate,
            Self::Value => Self::Description,
            Self::PaymentDate => Self::Value,
            Self::DueDate => Self::PaymentDate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    /// Record being edited, `None` for a new one. Category and user are not
    /// editable here and go back to the API unchanged.
    pub base: Option<Expense>,
    pub description: String,
    pub value: String,
    pub payment_date: String,
    pub due_date: String,
    pub focus: FormField,
    /// Validation message shown under the fields.
    pub error: Option<String>,
}

impl ExpenseForm {
    pub fn blank() -> Self {
        Self {
            base: None,
            description: String::new(),
            value: String::new(),
            payment_date: String::new(),
            due_date: String::new(),
            focus: FormField::Description,
            error: None,
        }
    }

    pub fn edit(expense: Expense) -> Self {
        let text = |date: &Option<WireDate>| date.as_ref().map(ToString::to_string).unwrap_or_default();
        Self {
            description: expense.description.clone().unwrap_or_default(),
            value: expense.value_minor.map(format_amount).unwrap_or_default(),
            payment_date: text(&expense.payment_date),
            due_date: text(&expense.due_date),
            base: Some(expense),
            focus: FormField::Description,
            error: None,
        }
    }

    /// Id of the record being edited.
    pub fn id(&self) -> Option<i64> {
        self.base.as_ref().map(|expense| expense.id)
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Description => &self.description,
            FormField::Value => &self.value,
            FormField::PaymentDate => &self.payment_date,
            FormField::DueDate => &self.due_date,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Description => &mut self.description,
            FormField::Value => &mut self.value,
            FormField::PaymentDate => &mut self.payment_date,
            FormField::DueDate => &mut self.due_date,
        }
    }

    pub fn push(&mut self, ch: char) {
        self.field_mut().push(ch);
        self.error = None;
    }

    pub fn pop(&mut self) {
        self.field_mut().pop();
        self.error = None;
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Builds the record to send, or the message explaining what is wrong.
    pub fn to_expense(&self) -> Result<Expense, String> {
        let value_minor = parse_amount(&self.value)
            .ok_or_else(|| "Valor inválido: use números como 1.234,56.".to_string())?;
        let payment_date = parse_date(&self.payment_date, FormField::PaymentDate)?;
        let due_date = parse_date(&self.due_date, FormField::DueDate)?;
        let description = Some(self.description.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Ok(Expense {
            value_minor: Some(value_minor),
            payment_date,
            due_date,
            description,
            ..self.base.clone().unwrap_or_default()
        })
    }
}

/// `1234,56` style text for an amount in cents.
fn format_amount(minor: i64) -> String {
    format!("{},{:02}", minor / 100, (minor % 100).abs())
}

/// Accepts `1234.56`, `1234,56` and `1.234,56`. Negative amounts are rejected.
fn parse_amount(text: &str) -> Option<i64> {
    let text = text.trim();
    let normalized = if text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    };
    let value: f64 = normalized.parse().ok()?;
    (value.is_finite() && value >= 0.0).then(|| amount::to_minor(value))
}

fn parse_date(text: &str, field: FormField) -> Result<Option<WireDate>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match WireDate::parse(text) {
        date @ WireDate::Day(_) => Ok(Some(date)),
        WireDate::Raw(_) => Err(format!("{}: use o formato AAAA-MM-DD.", field.label())),
    }
}

#[cfg(test)]
mod tests {
    use api_types::category::Category;

    use super::*;

    fn typed(form: &mut ExpenseForm, text: &str) {
        text.chars().for_each(|ch| form.push(ch));
    }

    #[test]
    fn amounts_accept_both_decimal_separators() {
        assert_eq!(parse_amount("1.234,56"), Some(123_456));
        assert_eq!(parse_amount("1234.56"), Some(123_456));
        assert_eq!(parse_amount(" 25,5 "), Some(2_550));
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn blank_form_builds_a_new_expense() {
        let mut form = ExpenseForm::blank();
        typed(&mut form, "internet");
        form.next_field();
        typed(&mut form, "99,90");
        form.next_field();
        typed(&mut form, "2024-05-10");

        let expense = form.to_expense().unwrap();

        assert_eq!(form.id(), None);
        assert_eq!(expense.description.as_deref(), Some("internet"));
        assert_eq!(expense.value_minor, Some(9_990));
        assert_eq!(
            expense.payment_date.map(|d| d.to_string()).as_deref(),
            Some("2024-05-10")
        );
        assert_eq!(expense.due_date, None);
    }

    #[test]
    fn edit_keeps_fields_the_form_does_not_show() {
        let original = Expense {
            id: 8,
            value_minor: Some(150_000),
            payment_date: Some(WireDate::parse("2024-03-05")),
            description: Some("aluguel".to_string()),
            category: Some(Category {
                id: Some(1),
                description: "Moradia".to_string(),
                kind: "FIXA".to_string(),
            }),
            ..Expense::default()
        };

        let mut form = ExpenseForm::edit(original.clone());
        assert_eq!(form.value, "1500,00");
        assert_eq!(form.payment_date, "2024-03-05");

        form.focus = FormField::Value;
        form.pop();
        form.pop();
        typed(&mut form, "50");
        let expense = form.to_expense().unwrap();

        assert_eq!(form.id(), Some(8));
        assert_eq!(expense.id, 8);
        assert_eq!(expense.value_minor, Some(150_050));
        assert_eq!(expense.category, original.category);
    }

    #[test]
    fn invalid_input_is_reported_not_sent() {
        let mut form = ExpenseForm::blank();
        form.focus = FormField::Value;
        typed(&mut form, "10");
        form.focus = FormField::DueDate;
        typed(&mut form, "31/12/2024");

        let err = form.to_expense().unwrap_err();

        assert!(err.starts_with("Vencimento"));
    }

    #[test]
    fn focus_cycles_through_every_field() {
        let mut form = ExpenseForm::blank();
        for expected in FormField::ALL.iter().cycle().skip(1).take(4) {
            form.next_field();
            assert_eq!(form.focus, *expected);
        }
        form.prev_field();
        assert_eq!(form.focus, FormField::DueDate);
    }
}
