//! View state of the shell.
//!
//! Everything here is synchronous: key handling returns the remote
//! [`Request`]s to launch, and each finished request comes back as a
//! [`FetchEvent`] applied through [`AppState::apply`]. The event loop is the
//! only caller, so there is exactly one writer.
use api_types::{category::Category, expense::Expense, income::Income, user::User};
use engine::{RoleGate, Route, Statement};

use crate::{client::ClientError, local_state::Preferences};

use super::expense_form::ExpenseForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Expenses,
    Incomes,
    Categories,
    Users,
}

impl Collection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Expenses => "despesas",
            Self::Incomes => "receitas",
            Self::Categories => "categorias",
            Self::Users => "usuários",
        }
    }
}

/// Remote work the event loop must start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List { view: Route, collection: Collection },
    DeleteExpense { id: i64 },
    /// Fresh copy of one expense before editing it.
    FetchExpense { id: i64 },
    /// Create when `id` is `None`, update otherwise.
    SaveExpense { id: Option<i64>, expense: Expense },
}

/// Outcome of one remote call.
#[derive(Debug)]
pub enum Fetched {
    Expenses(Result<Vec<Expense>, ClientError>),
    Incomes(Result<Vec<Income>, ClientError>),
    Categories(Result<Vec<Category>, ClientError>),
    Users(Result<Vec<User>, ClientError>),
    ExpenseDeleted {
        id: i64,
        result: Result<(), ClientError>,
    },
    ExpenseLoaded(Result<Expense, ClientError>),
    ExpenseSaved {
        id: Option<i64>,
        result: Result<Expense, ClientError>,
    },
}

/// A completion message, tagged with the view that asked for it.
#[derive(Debug)]
pub struct FetchEvent {
    pub view: Route,
    pub fetched: Fetched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Content,
}

/// Selectable list of fetched records.
#[derive(Debug)]
pub struct RecordList<T> {
    pub items: Vec<T>,
    pub selected: usize,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
        }
    }
}

impl<T> RecordList<T> {
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Default)]
pub struct StatementState {
    pub statement: Statement,
    pub show_summary: bool,
    pub selected: usize,
}

#[derive(Debug, Default)]
pub struct ExpensesState {
    pub list: RecordList<Expense>,
    /// Expense awaiting a yes/no answer before deletion.
    pub confirm_delete: Option<i64>,
    pub show_summary: bool,
    /// Open create/edit form; it owns the keyboard while shown.
    pub form: Option<ExpenseForm>,
}

#[derive(Debug)]
pub struct AppState {
    pub gate: RoleGate,
    pub token: Option<String>,
    pub route: Option<Route>,
    pub focus: Focus,
    pub menu_selected: usize,
    pub statement: StatementState,
    pub expenses: ExpensesState,
    pub incomes: RecordList<Income>,
    pub categories: RecordList<Category>,
    pub users: RecordList<User>,
    pub prefs: Preferences,
    /// Blocking notification; keys only dismiss it while it is shown.
    pub alert: Option<String>,
    pub base_url: String,
}

impl AppState {
    pub fn new(token: Option<String>, prefs: Preferences, base_url: String) -> Self {
        let mut state = Self {
            gate: RoleGate::default(),
            token,
            route: None,
            focus: Focus::Menu,
            menu_selected: 0,
            statement: StatementState::default(),
            expenses: ExpensesState::default(),
            incomes: RecordList::default(),
            categories: RecordList::default(),
            users: RecordList::default(),
            prefs,
            alert: None,
            base_url,
        };
        state.refresh_menu();
        state
    }

    /// Re-derives role, username and visible menu from the stored token.
    pub fn refresh_menu(&mut self) {
        self.gate.recompute(self.token.as_deref());
        let len = self.gate.visible_menu().len();
        self.menu_selected = self.menu_selected.min(len.saturating_sub(1));
    }

    /// Opens `route` and returns the fetches its view needs.
    ///
    /// Every completed navigation recomputes the menu. Routes the current
    /// role cannot see are refused.
    pub fn navigate(&mut self, route: Route) -> Vec<Request> {
        if !self.gate.can_open(route) {
            return Vec::new();
        }
        self.route = Some(route);
        self.focus = Focus::Content;
        self.expenses.form = None;
        self.refresh_menu();
        tracing::info!("navigated to {}", route.path());
        self.load_requests()
    }

    pub fn open_selected_menu_item(&mut self) -> Vec<Request> {
        match self.gate.visible_menu().get(self.menu_selected) {
            Some(item) => {
                let route = item.route;
                self.navigate(route)
            }
            None => Vec::new(),
        }
    }

    /// Fetches backing the current view; used on open and on manual reload.
    pub fn load_requests(&self) -> Vec<Request> {
        let Some(view) = self.route else {
            return Vec::new();
        };
        let list = |collection| Request::List { view, collection };
        match view {
            Route::Statement => vec![
                list(Collection::Expenses),
                list(Collection::Incomes),
                list(Collection::Categories),
                list(Collection::Users),
            ],
            Route::Expenses => vec![list(Collection::Expenses)],
            Route::Incomes => vec![list(Collection::Incomes)],
            Route::Categories => vec![list(Collection::Categories)],
            Route::Users => vec![list(Collection::Users)],
        }
    }

    /// Clears the session and recomputes the menu right away.
    pub fn logout(&mut self) {
        self.token = None;
        self.route = None;
        self.focus = Focus::Menu;
        self.expenses.confirm_delete = None;
        self.expenses.form = None;
        self.refresh_menu();
        tracing::info!("session cleared");
    }

    pub fn request_delete_selected(&mut self) {
        if self.route != Some(Route::Expenses) {
            return;
        }
        self.expenses.confirm_delete = self.expenses.list.selected_item().map(|e| e.id);
    }

    pub fn open_new_expense(&mut self) {
        if self.route == Some(Route::Expenses) {
            self.expenses.form = Some(ExpenseForm::blank());
        }
    }

    /// Edits start from the API's current copy of the selected expense.
    pub fn request_edit_selected(&self) -> Option<Request> {
        if self.route != Some(Route::Expenses) {
            return None;
        }
        let id = self.expenses.list.selected_item()?.id;
        Some(Request::FetchExpense { id })
    }

    /// Validates the open form; invalid input stays in the form with a
    /// message and nothing is sent.
    pub fn submit_form(&mut self) -> Option<Request> {
        let form = self.expenses.form.as_mut()?;
        match form.to_expense() {
            Ok(expense) => Some(Request::SaveExpense {
                id: form.id(),
                expense,
            }),
            Err(message) => {
                form.error = Some(message);
                None
            }
        }
    }

    pub fn cancel_form(&mut self) {
        self.expenses.form = None;
    }

    /// Answers the pending confirmation. Declining is a no-op.
    pub fn confirm_delete(&mut self, accepted: bool) -> Option<Request> {
        let id = self.expenses.confirm_delete.take()?;
        accepted.then_some(Request::DeleteExpense { id })
    }

    pub fn toggle_summary(&mut self) {
        match self.route {
            Some(Route::Statement) => {
                self.statement.show_summary = !self.statement.show_summary;
            }
            Some(Route::Expenses) => {
                self.expenses.show_summary = !self.expenses.show_summary;
            }
            _ => {}
        }
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Menu => {
                let len = self.gate.visible_menu().len();
                if len > 0 {
                    self.menu_selected = (self.menu_selected + 1).min(len - 1);
                }
            }
            Focus::Content => match self.route {
                Some(Route::Statement) => {
                    let len = self.statement.statement.ledger().len();
                    if len > 0 {
                        self.statement.selected = (self.statement.selected + 1).min(len - 1);
                    }
                }
                Some(Route::Expenses) => self.expenses.list.select_next(),
                Some(Route::Incomes) => self.incomes.select_next(),
                Some(Route::Categories) => self.categories.select_next(),
                Some(Route::Users) => self.users.select_next(),
                None => {}
            },
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Menu => self.menu_selected = self.menu_selected.saturating_sub(1),
            Focus::Content => match self.route {
                Some(Route::Statement) => {
                    self.statement.selected = self.statement.selected.saturating_sub(1);
                }
                Some(Route::Expenses) => self.expenses.list.select_prev(),
                Some(Route::Incomes) => self.incomes.select_prev(),
                Some(Route::Categories) => self.categories.select_prev(),
                Some(Route::Users) => self.users.select_prev(),
                None => {}
            },
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Menu if self.route.is_some() => Focus::Content,
            _ => Focus::Menu,
        };
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Applies one completed request and returns follow-up work.
    ///
    /// Failures keep the last known collection and raise an alert, except the
    /// summary counters, which are only logged.
    pub fn apply(&mut self, event: FetchEvent) -> Vec<Request> {
        let FetchEvent { view, fetched } = event;
        match fetched {
            Fetched::Expenses(Ok(expenses)) => {
                tracing::info!("loaded {} despesas for {}", expenses.len(), view.path());
                match view {
                    Route::Statement => self.statement.statement.set_expenses(expenses),
                    _ => self.expenses.list.replace(expenses),
                }
                self.clamp_statement_selection();
            }
            Fetched::Incomes(Ok(incomes)) => {
                tracing::info!("loaded {} receitas for {}", incomes.len(), view.path());
                match view {
                    Route::Statement => self.statement.statement.set_incomes(incomes),
                    _ => self.incomes.replace(incomes),
                }
                self.clamp_statement_selection();
            }
            Fetched::Categories(Ok(categories)) => match view {
                Route::Statement => self
                    .statement
                    .statement
                    .set_category_count(categories.len()),
                _ => self.categories.replace(categories),
            },
            Fetched::Users(Ok(users)) => match view {
                Route::Statement => self.statement.statement.set_user_count(users.len()),
                _ => self.users.replace(users),
            },
            Fetched::Expenses(Err(err)) => self.fetch_failed(view, Collection::Expenses, &err),
            Fetched::Incomes(Err(err)) => self.fetch_failed(view, Collection::Incomes, &err),
            Fetched::Categories(Err(err)) => {
                self.fetch_failed(view, Collection::Categories, &err)
            }
            Fetched::Users(Err(err)) => self.fetch_failed(view, Collection::Users, &err),
            Fetched::ExpenseDeleted { id, result: Ok(()) } => {
                tracing::info!("despesa {id} deleted, reloading list");
                return vec![Request::List {
                    view: Route::Expenses,
                    collection: Collection::Expenses,
                }];
            }
            Fetched::ExpenseDeleted {
                id,
                result: Err(err),
            } => {
                tracing::warn!("failed to delete despesa {id}: {err}");
                self.alert = Some(format!(
                    "Erro ao excluir o registro. Tente novamente. ({})",
                    message_for_error(&err)
                ));
            }
            Fetched::ExpenseLoaded(Ok(expense)) => {
                if self.route == Some(Route::Expenses) {
                    self.expenses.form = Some(ExpenseForm::edit(expense));
                }
            }
            Fetched::ExpenseLoaded(Err(err)) => {
                tracing::warn!("failed to load despesa for editing: {err}");
                self.alert = Some(format!(
                    "Erro ao carregar o registro: {}",
                    message_for_error(&err)
                ));
            }
            Fetched::ExpenseSaved { id, result: Ok(saved) } => {
                match id {
                    Some(id) => tracing::info!("despesa {id} updated"),
                    None => tracing::info!("despesa {} created", saved.id),
                }
                self.expenses.form = None;
                return vec![Request::List {
                    view: Route::Expenses,
                    collection: Collection::Expenses,
                }];
            }
            Fetched::ExpenseSaved {
                id,
                result: Err(err),
            } => {
                tracing::warn!("failed to save despesa {id:?}: {err}");
                self.alert = Some(format!(
                    "Erro ao salvar o registro. Tente novamente. ({})",
                    message_for_error(&err)
                ));
            }
        }
        Vec::new()
    }

    fn fetch_failed(&mut self, view: Route, collection: Collection, err: &ClientError) {
        tracing::warn!(
            "failed to load {} for {}: {err}",
            collection.label(),
            view.path()
        );
        let counter_only = view == Route::Statement
            && matches!(collection, Collection::Categories | Collection::Users);
        if !counter_only {
            self.alert = Some(format!(
                "Erro ao carregar {}: {}",
                collection.label(),
                message_for_error(err)
            ));
        }
    }

    fn clamp_statement_selection(&mut self) {
        let len = self.statement.statement.ledger().len();
        self.statement.selected = self.statement.selected.min(len.saturating_sub(1));
    }
}

pub fn message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized | ClientError::Forbidden => {
            "sessão inválida ou sem permissão.".to_string()
        }
        ClientError::NotFound => "recurso não encontrado.".to_string(),
        ClientError::Conflict(message) => format!("conflito: {message}"),
        ClientError::Validation(message) => format!("erro de validação: {message}"),
        ClientError::Server(message) => format!("erro no servidor: {message}"),
        ClientError::Transport(err) => format!("servidor inacessível: {err}"),
    }
}
