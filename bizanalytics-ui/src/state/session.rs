//! Browser Session State
//!
//! The core [`Session`] persisted in `window.localStorage`, the backend
//! client, and a navigator that changes `window.location`.

use std::rc::Rc;

use bizanalytics::auth::AuthFlows;
use bizanalytics::client::ApiClient;
use bizanalytics::pages::{GuardDecision, Navigator, Page, Redirect};
use bizanalytics::session::{KeyValueStore, Session, StoreError, StoreResult};
use leptos::*;

use crate::api::{get_api_base, GlooTransport};

/// `window.localStorage` as a key-value store
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> StoreResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StoreError::Unavailable("localStorage".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        // Throws when the quota is exceeded or storage is disabled
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

/// Context provided to every page
#[derive(Clone)]
pub struct AppContext {
    pub session: Rc<Session<LocalStore>>,
    pub client: Rc<ApiClient<GlooTransport>>,
    /// Mirrors whether an access token is stored
    pub logged_in: RwSignal<bool>,
}

/// Provide the app context to the component tree
pub fn provide_app_context() {
    let session = Session::new(LocalStore);
    let logged_in = create_rw_signal(session.is_logged_in());

    provide_context(AppContext {
        session: Rc::new(session),
        client: Rc::new(ApiClient::new(get_api_base(), GlooTransport)),
        logged_in,
    });
}

impl AppContext {
    pub fn flows(&self) -> AuthFlows<'_, LocalStore, GlooTransport> {
        AuthFlows::new(&self.session, &self.client)
    }

    /// Re-read the login state after a flow touched the session
    pub fn sync(&self) {
        self.logged_in.set(self.session.is_logged_in());
    }

    /// Run the page guard; `false` means a redirect is under way
    pub fn enter(&self, page: Page) -> bool {
        match bizanalytics::pages::guard(page, self.session.is_logged_in()) {
            GuardDecision::Render => true,
            GuardDecision::Redirect(to) => {
                BrowserNavigator.navigate(Redirect::now(to));
                false
            }
        }
    }

    /// Sign out and go to the login page
    pub fn logout(&self) {
        let ctx = self.clone();
        spawn_local(async move {
            let redirect = ctx.flows().logout().await;
            ctx.sync();
            BrowserNavigator.navigate(redirect);
        });
    }
}

/// Full-page navigation through `window.location`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    fn go(path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(path) {
            web_sys::console::warn_1(&format!("Navigation to {} failed: {:?}", path, e).into());
        }
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, redirect: Redirect) {
        let path = redirect.to.path();
        if redirect.after.is_zero() {
            Self::go(path);
        } else {
            let millis = u32::try_from(redirect.after.as_millis()).unwrap_or(u32::MAX);
            gloo_timers::callback::Timeout::new(millis, move || Self::go(path)).forget();
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_store_backs_a_session() {
        let session = Session::new(LocalStore);
        session.clear().unwrap();
        assert!(!session.is_logged_in());

        session.set("a", Some("r")).unwrap();
        assert!(session.is_logged_in());
        assert_eq!(LocalStore.get("biz_access").as_deref(), Some("a"));

        session.clear().unwrap();
        assert_eq!(session.refresh_token(), None);
    }
}
