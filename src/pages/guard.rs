//! Page access guard

use std::time::Duration;

/// The three pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Landing,
    Login,
    Dashboard,
}

/// Who may view a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone
    Public,
    /// Only visitors without a session
    GuestOnly,
    /// Only visitors with a session
    Protected,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Landing, Page::Login, Page::Dashboard];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Landing => "/",
            Page::Login => "/login/",
            Page::Dashboard => "/dashboard/",
        }
    }

    /// Resolve a request path; the trailing slash is optional
    pub fn from_path(path: &str) -> Option<Page> {
        match path.trim_end_matches('/') {
            "" => Some(Page::Landing),
            "/login" => Some(Page::Login),
            "/dashboard" => Some(Page::Dashboard),
            _ => None,
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Page::Landing => Access::Public,
            Page::Login => Access::GuestOnly,
            Page::Dashboard => Access::Protected,
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of the load-time check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Page),
}

/// Decide whether `page` may render for a visitor in the given login state
///
/// Presence of an access token is all that counts; its validity is never
/// checked here.
pub fn guard(page: Page, logged_in: bool) -> GuardDecision {
    match (page.access(), logged_in) {
        (Access::Protected, false) => GuardDecision::Redirect(Page::Login),
        (Access::GuestOnly, true) => GuardDecision::Redirect(Page::Dashboard),
        _ => GuardDecision::Render,
    }
}

/// A pending navigation, optionally delayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: Page,
    pub after: Duration,
}

impl Redirect {
    pub fn now(to: Page) -> Self {
        Self {
            to,
            after: Duration::ZERO,
        }
    }

    pub fn after(to: Page, millis: u64) -> Self {
        Self {
            to,
            after: Duration::from_millis(millis),
        }
    }
}

/// Carries out redirects: a browser location change, a CLI message, a test log
pub trait Navigator {
    fn navigate(&self, redirect: Redirect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_page_needs_token() {
        assert_eq!(
            guard(Page::Dashboard, false),
            GuardDecision::Redirect(Page::Login)
        );
        assert_eq!(guard(Page::Dashboard, true), GuardDecision::Render);
    }

    #[test]
    fn test_login_page_bounces_logged_in_visitors() {
        assert_eq!(
            guard(Page::Login, true),
            GuardDecision::Redirect(Page::Dashboard)
        );
        assert_eq!(guard(Page::Login, false), GuardDecision::Render);
    }

    #[test]
    fn test_token_never_redirects_to_login() {
        for page in Page::ALL {
            assert_ne!(guard(page, true), GuardDecision::Redirect(Page::Login));
        }
    }

    #[test]
    fn test_missing_token_never_renders_protected_content() {
        for page in Page::ALL {
            if page.access() == Access::Protected {
                assert_eq!(guard(page, false), GuardDecision::Redirect(Page::Login));
            }
        }
    }

    #[test]
    fn test_navigator_receives_redirect() {
        use std::cell::RefCell;

        #[derive(Default)]
        struct Recorder(RefCell<Vec<Redirect>>);

        impl Navigator for Recorder {
            fn navigate(&self, redirect: Redirect) {
                self.0.borrow_mut().push(redirect);
            }
        }

        let nav = Recorder::default();
        if let GuardDecision::Redirect(to) = guard(Page::Dashboard, false) {
            nav.navigate(Redirect::now(to));
        }
        assert_eq!(nav.0.borrow().as_slice(), &[Redirect::now(Page::Login)]);
    }

    #[test]
    fn test_paths_roundtrip() {
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
        assert_eq!(Page::from_path("/dashboard"), Some(Page::Dashboard));
        assert_eq!(Page::from_path("/admin/"), None);
    }
}
