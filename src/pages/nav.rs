//! Navigation bar state

use super::guard::Page;

/// Links in the site navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    Login,
    Register,
    Dashboard,
    Logout,
}

impl NavLink {
    pub const ALL: [NavLink; 4] = [
        NavLink::Login,
        NavLink::Register,
        NavLink::Dashboard,
        NavLink::Logout,
    ];

    /// Element id in the page markup
    pub fn element_id(&self) -> &'static str {
        match self {
            NavLink::Login => "nav-login",
            NavLink::Register => "nav-register",
            NavLink::Dashboard => "nav-dashboard",
            NavLink::Logout => "nav-logout",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NavLink::Login => "Login",
            NavLink::Register => "Register",
            NavLink::Dashboard => "Dashboard",
            NavLink::Logout => "Logout",
        }
    }

    /// Link target; logout is an action, not a page
    pub fn href(&self) -> &'static str {
        match self {
            NavLink::Login => Page::Login.path(),
            NavLink::Register => "/login/#register",
            NavLink::Dashboard => Page::Dashboard.path(),
            NavLink::Logout => "#",
        }
    }
}

/// Which nav links are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub logged_in: bool,
}

impl NavState {
    pub fn for_session(logged_in: bool) -> Self {
        Self { logged_in }
    }

    pub fn is_visible(&self, link: NavLink) -> bool {
        match link {
            NavLink::Login | NavLink::Register => !self.logged_in,
            NavLink::Dashboard | NavLink::Logout => self.logged_in,
        }
    }

    pub fn visible_links(&self) -> Vec<NavLink> {
        NavLink::ALL
            .into_iter()
            .filter(|l| self.is_visible(*l))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_out_links() {
        let nav = NavState::for_session(false);
        assert_eq!(nav.visible_links(), vec![NavLink::Login, NavLink::Register]);
    }

    #[test]
    fn test_logged_in_links() {
        let nav = NavState::for_session(true);
        assert_eq!(nav.visible_links(), vec![NavLink::Dashboard, NavLink::Logout]);
        assert!(!nav.is_visible(NavLink::Login));
    }
}
