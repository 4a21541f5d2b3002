//! Login page: tab switching and submit-button state

/// Label shown on a submit button while its request is in flight
pub const LOADING_LABEL: &str = "Please wait…";

/// The two forms on the login page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

impl AuthTab {
    /// Tab name as used in `data-tab` / `data-switch` attributes
    pub fn name(&self) -> &'static str {
        match self {
            AuthTab::Login => "login",
            AuthTab::Register => "register",
        }
    }

    /// Inverse of [`AuthTab::name`]
    pub fn from_name(name: &str) -> Option<AuthTab> {
        match name {
            "login" => Some(AuthTab::Login),
            "register" => Some(AuthTab::Register),
            _ => None,
        }
    }

    /// Initial tab for a URL fragment: `#register` deep-links to registration
    pub fn from_hash(hash: &str) -> AuthTab {
        hash.strip_prefix('#')
            .and_then(AuthTab::from_name)
            .unwrap_or_default()
    }

    /// Id of the panel holding this tab's form
    pub fn panel_id(&self) -> &'static str {
        match self {
            AuthTab::Login => "tab-login",
            AuthTab::Register => "tab-register",
        }
    }
}

/// Submit button that disables itself while a request runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    label: String,
    loading: bool,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            loading: false,
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn disabled(&self) -> bool {
        self.loading
    }

    /// Current text: the loading label while busy, the original otherwise
    pub fn text(&self) -> &str {
        if self.loading {
            LOADING_LABEL
        } else {
            &self.label
        }
    }
}
