//! Role gated navigation menu.
//!
//! The menu is a declarative table: every entry lists, explicitly, each role
//! allowed to see it. Role names match exactly (case-sensitive) and there is
//! no hierarchy between them.
use crate::session::{self, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Categories,
    Expenses,
    Incomes,
    Users,
    Statement,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Categories => "/tipos",
            Self::Expenses => "/despesas",
            Self::Incomes => "/receitas",
            Self::Users => "/usuarios",
            Self::Statement => "/extrato",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
    pub roles: &'static [&'static str],
}

impl MenuItem {
    pub fn allows(&self, role: &str) -> bool {
        self.roles.iter().any(|allowed| *allowed == role)
    }
}

pub const MENU: &[MenuItem] = &[
    MenuItem {
        label: "Categorias",
        route: Route::Categories,
        roles: &["NIVEL1", "NIVEL2", "NIVEL3"],
    },
    MenuItem {
        label: "Despesas",
        route: Route::Expenses,
        roles: &["NIVEL1", "NIVEL2"],
    },
    MenuItem {
        label: "Receitas",
        route: Route::Incomes,
        roles: &["NIVEL1", "NIVEL2", "NIVEL3"],
    },
    MenuItem {
        label: "Usuarios",
        route: Route::Users,
        roles: &["NIVEL1", "NIVEL2", "NIVEL3"],
    },
    MenuItem {
        label: "Extrato",
        route: Route::Statement,
        roles: &["NIVEL1", "NIVEL2", "NIVEL3"],
    },
];

/// Items of `definition` visible to `role`, in definition order.
pub fn compute_visible_menu(role: &str, definition: &[MenuItem]) -> Vec<MenuItem> {
    definition
        .iter()
        .filter(|item| item.allows(role))
        .copied()
        .collect()
}

/// Menu visibility state of the shell.
///
/// Starts unauthenticated. Only [`RoleGate::recompute`] moves it: the host
/// calls it once at start and after every completed navigation. Clearing the
/// stored token does nothing until the next recompute.
#[derive(Clone, Debug)]
pub struct RoleGate {
    definition: Vec<MenuItem>,
    session: Option<Session>,
    visible: Vec<MenuItem>,
}

impl RoleGate {
    pub fn new(definition: &[MenuItem]) -> Self {
        Self {
            definition: definition.to_vec(),
            session: None,
            visible: Vec::new(),
        }
    }

    pub fn recompute(&mut self, token: Option<&str>) {
        self.session = session::decode(token);
        self.visible = match &self.session {
            Some(session) => compute_visible_menu(&session.role, &self.definition),
            None => Vec::new(),
        };
        tracing::debug!(
            role = self.role(),
            items = self.visible.len(),
            "menu recomputed"
        );
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Current role without the namespace prefix, empty when logged out.
    pub fn role(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.role.as_str())
    }

    pub fn username(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.username.as_str())
    }

    pub fn visible_menu(&self) -> &[MenuItem] {
        &self.visible
    }

    pub fn can_open(&self, route: Route) -> bool {
        self.visible.iter().any(|item| item.route == route)
    }
}

impl Default for RoleGate {
    fn default() -> Self {
        Self::new(MENU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::token_with;

    fn labels(items: &[MenuItem]) -> Vec<&'static str> {
        items.iter().map(|item| item.label).collect()
    }

    #[test]
    fn empty_role_sees_nothing() {
        assert!(compute_visible_menu("", MENU).is_empty());
    }

    #[test]
    fn role_match_is_exact() {
        let definition = [
            MenuItem {
                label: "Shared",
                route: Route::Categories,
                roles: &["NIVEL1", "NIVEL2"],
            },
            MenuItem {
                label: "Restricted",
                route: Route::Users,
                roles: &["NIVEL3"],
            },
        ];

        assert_eq!(labels(&compute_visible_menu("NIVEL2", &definition)), ["Shared"]);
        assert!(compute_visible_menu("nivel2", &definition).is_empty());
        assert!(compute_visible_menu("NIVEL", &definition).is_empty());
    }

    #[test]
    fn static_menu_hides_expenses_from_level_three() {
        assert_eq!(
            labels(&compute_visible_menu("NIVEL3", MENU)),
            ["Categorias", "Receitas", "Usuarios", "Extrato"]
        );
        assert_eq!(
            labels(&compute_visible_menu("NIVEL1", MENU)),
            ["Categorias", "Despesas", "Receitas", "Usuarios", "Extrato"]
        );
    }

    #[test]
    fn gate_starts_unauthenticated() {
        let gate = RoleGate::default();
        assert!(!gate.is_authenticated());
        assert_eq!(gate.role(), "");
        assert_eq!(gate.username(), "");
        assert!(gate.visible_menu().is_empty());
    }

    #[test]
    fn recompute_moves_between_states() {
        let mut gate = RoleGate::default();
        let token = token_with(r#"{"sub":"maria","roles":"ROLE_NIVEL2"}"#);

        gate.recompute(Some(&token));
        assert!(gate.is_authenticated());
        assert_eq!(gate.role(), "NIVEL2");
        assert_eq!(gate.username(), "maria");
        assert!(gate.can_open(Route::Expenses));
        assert_eq!(gate.visible_menu().len(), 5);

        gate.recompute(None);
        assert!(!gate.is_authenticated());
        assert_eq!(gate.role(), "");
        assert!(gate.visible_menu().is_empty());
        assert!(!gate.can_open(Route::Statement));
    }

    #[test]
    fn unreadable_token_resets_state() {
        let mut gate = RoleGate::default();
        gate.recompute(Some(&token_with(r#"{"sub":"ana","roles":"ROLE_NIVEL1"}"#)));

        gate.recompute(Some("garbage"));

        assert!(!gate.is_authenticated());
        assert!(gate.visible_menu().is_empty());
    }

    #[test]
    fn routes_keep_their_paths() {
        let paths: Vec<&str> = MENU.iter().map(|item| item.route.path()).collect();
        assert_eq!(
            paths,
            ["/tipos", "/despesas", "/receitas", "/usuarios", "/extrato"]
        );
    }
}
