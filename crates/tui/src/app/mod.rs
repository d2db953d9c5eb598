mod expense_form;
mod state;

use std::time::Duration;

use api_types::expense::Expense;
use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    local_state::Preferences,
    ui::{self, keymap::AppAction},
};

pub use expense_form::{ExpenseForm, FormField};
pub use state::{AppState, Collection, FetchEvent, Fetched, Focus, RecordList, Request};

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: AppState,
    events_tx: mpsc::UnboundedSender<FetchEvent>,
    events_rx: mpsc::UnboundedReceiver<FetchEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url, config.token.clone())?;
        let prefs = match Preferences::load(&config.state_path) {
            Ok(prefs) => prefs,
            Err(err) => {
                tracing::warn!("ignoring unreadable preferences: {err}");
                Preferences::default()
            }
        };
        let state = AppState::new(config.token.clone(), prefs, config.base_url.clone());
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            client,
            state,
            events_tx,
            events_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            self.drain_fetches();

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }

            // Give spawned fetches a chance to run between frames.
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Applies every completion that arrived since the last frame, in arrival
    /// order.
    fn drain_fetches(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            let follow_up = self.state.apply(event);
            self.launch(follow_up);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.state.alert.is_some() {
            let action = ui::keymap::map_key(key);
            if matches!(
                action,
                AppAction::Submit | AppAction::Cancel | AppAction::Input(_)
            ) {
                self.state.dismiss_alert();
            }
            return;
        }

        let action = ui::keymap::map_key(key);

        if self.state.expenses.form.is_some() {
            self.handle_form_key(key);
            return;
        }

        if self.state.expenses.confirm_delete.is_some() {
            let accepted = matches!(action, AppAction::Input('y' | 'Y' | 's' | 'S'));
            if let Some(request) = self.state.confirm_delete(accepted) {
                self.launch(vec![request]);
            }
            return;
        }

        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::Cancel | AppAction::NextField => self.state.toggle_focus(),
            AppAction::Submit => {
                if self.state.focus == Focus::Menu {
                    let requests = self.state.open_selected_menu_item();
                    self.launch(requests);
                }
            }
            AppAction::Up => self.state.select_prev(),
            AppAction::Down => self.state.select_next(),
            AppAction::Input(ch) => self.handle_input(ch),
            AppAction::Backspace | AppAction::None => {}
        }
    }

    /// Every printable key types into the focused field.
    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.expenses.form.as_mut() else {
            return;
        };
        match ui::keymap::map_text_key(key) {
            AppAction::Quit => self.should_quit = true,
            AppAction::Cancel => self.state.cancel_form(),
            AppAction::NextField | AppAction::Down => form.next_field(),
            AppAction::Up => form.prev_field(),
            AppAction::Backspace => form.pop(),
            AppAction::Input(ch) => form.push(ch),
            AppAction::Submit => {
                if let Some(request) = self.state.submit_form() {
                    self.launch(vec![request]);
                }
            }
            AppAction::None => {}
        }
    }

    fn handle_input(&mut self, ch: char) {
        match ch {
            'r' | 'R' => {
                let requests = self.state.load_requests();
                self.launch(requests);
            }
            'd' | 'D' => self.state.request_delete_selected(),
            'n' | 'N' => self.state.open_new_expense(),
            'e' | 'E' => {
                if let Some(request) = self.state.request_edit_selected() {
                    self.launch(vec![request]);
                }
            }
            's' | 'S' => self.state.toggle_summary(),
            'o' | 'O' => {
                self.state.logout();
                self.client.set_token(None);
            }
            '+' => {
                if self.state.prefs.zoom_in() {
                    self.save_preferences();
                }
            }
            '-' => {
                if self.state.prefs.zoom_out() {
                    self.save_preferences();
                }
            }
            'l' | 'L' => {
                self.state.prefs.toggle_low_vision();
                self.save_preferences();
            }
            _ => {}
        }
    }

    fn save_preferences(&mut self) {
        if let Err(err) = self.state.prefs.save(&self.config.state_path) {
            tracing::warn!("failed to save preferences: {err}");
            self.state.alert = Some(format!("Erro ao salvar preferências: {err}"));
        }
    }

    /// Starts each request as its own task. Completions come back through the
    /// channel in whatever order the API answers.
    fn launch(&self, requests: Vec<Request>) {
        for request in requests {
            let client = self.client.clone();
            let tx = self.events_tx.clone();
            tokio::spawn(async move {
                let event = perform(&client, request).await;
                if let Err(unsent) = tx.send(event) {
                    tracing::debug!("event loop gone, dropping {:?}", unsent.0.fetched);
                }
            });
        }
    }
}

async fn perform(client: &Client, request: Request) -> FetchEvent {
    match request {
        Request::List { view, collection } => {
            let fetched = match collection {
                Collection::Expenses => Fetched::Expenses(client.expenses_list().await),
                Collection::Incomes => Fetched::Incomes(client.incomes_list().await),
                Collection::Categories => Fetched::Categories(client.categories_list().await),
                Collection::Users => Fetched::Users(client.users_list().await),
            };
            FetchEvent { view, fetched }
        }
        Request::FetchExpense { id } => FetchEvent {
            view: engine::Route::Expenses,
            fetched: Fetched::ExpenseLoaded(client.get::<Expense>(id).await),
        },
        Request::SaveExpense { id, expense } => {
            let result = match id {
                Some(id) => client.update(id, &expense).await,
                None => client.create(&expense).await,
            };
            FetchEvent {
                view: engine::Route::Expenses,
                fetched: Fetched::ExpenseSaved { id, result },
            }
        }
        Request::DeleteExpense { id } => FetchEvent {
            view: engine::Route::Expenses,
            fetched: Fetched::ExpenseDeleted {
                id,
                result: client.expense_delete(id).await,
            },
        },
    }
}
