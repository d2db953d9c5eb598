//! Domain core of the finance client.
//!
//! - [`statement`] turns fetched expenses and incomes into a single ledger
//!   plus totals and per-category / per-user balances.
//! - [`session`] and [`menu`] derive the current role from the session token
//!   and decide which navigation entries are visible.
//!
//! Nothing here performs I/O; the front-end feeds it whatever the remote API
//! returned.
pub use error::EngineError;
pub use menu::{MENU, MenuItem, RoleGate, Route, compute_visible_menu};
pub use money::Money;
pub use session::Session;
pub use statement::{
    Breakdown, Direction, OperationKind, Statement, Totals, Transaction, aggregate_by_dimension,
    aggregate_totals, reconcile,
};

mod error;
pub mod menu;
mod money;
pub mod session;
pub mod statement;
