//! Zellij plugin integration.
//!
//! This module is the thin layer between the Bookshelf library and the Zellij
//! plugin system. It implements `ZellijPlugin`, translates Zellij events into
//! library events, and runs the library's actions against the host API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` (catalog fetch) and `RunCommands`
//!    (opening links); the catalog load starts once they are granted
//! 3. **Update**: Map keys and web responses to library events
//! 4. **Render**: Report width changes, then call the library render function
//!
//! # Event Mapping
//!
//! - `WebRequestResult` → `Event::CatalogResponse`, routed by the source tag
//!   stored in the request context
//! - `PermissionRequestResult(Denied)` → `Event::PermissionsDenied`
//! - `Key` → see keybindings
//!
//! # Keybindings
//!
//! Browsing:
//! - `/`: Focus search
//! - `Tab`/`Shift+Tab`: Next/previous category, `0`: All
//! - `h`/`Left`/`PageUp`: Previous page
//! - `l`/`Right`/`PageDown`: Next page
//! - `j`/`Down`, `k`/`Up`: Move card cursor
//! - `Enter`/`Space`: Toggle details
//! - `o`: Open purchase link, `d`: Open detail page
//! - `Ctrl+u`/`Esc`: Clear search
//! - `q`: Close plugin
//!
//! Searching:
//! - printable keys: Edit query
//! - `Backspace`: Delete last character, `Ctrl+u`: Clear
//! - `Enter`/`Esc`: Back to browsing

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookshelf::catalog::{CatalogSource, FetchRequest, SOURCE_CONTEXT_KEY};
use bookshelf::{handle_event, Action, AppState, Config, Event, InputMode};

/// Plugin state wrapper, registered with Zellij from the crate root.
pub struct State {
    /// Core application state from library layer.
    app: AppState,

    /// Width seen by the last render, used to emit `Event::Resize`.
    last_cols: Option<usize>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookshelf::initialize(&Config::default()),
            last_cols: None,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: fetch the catalog
    /// - `RunCommands`: open links with the host's `xdg-open`
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookshelf::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = bookshelf::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_response(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - loading catalog");
                    Event::LoadCatalog
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - catalog cannot be loaded");
                    Event::PermissionsDenied
                }
            },
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                if exit_code != Some(0) {
                    tracing::warn!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(&stderr),
                        "failed to open link"
                    );
                }
                return false;
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    /// Renders the plugin UI.
    ///
    /// Zellij has no resize event, so a changed width is fed to the library as
    /// `Event::Resize` before drawing.
    fn render(&mut self, rows: usize, cols: usize) {
        if self.last_cols != Some(cols) {
            self.last_cols = Some(cols);
            self.dispatch(&Event::Resize { cols });
        }
        bookshelf::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        if ctrl && key.bare_key == BareKey::Char('u') {
            return Some(Event::ClearSearch);
        }
        if ctrl {
            return None;
        }

        match self.app.input_mode {
            InputMode::Search => Some(match key.bare_key {
                BareKey::Esc | BareKey::Enter => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Browse => Some(match key.bare_key {
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevCategory,
                BareKey::Tab => Event::NextCategory,
                BareKey::Char('0') => {
                    Event::SelectCategory(bookshelf::catalog::ALL_CATEGORY.to_string())
                }
                BareKey::Char('h') | BareKey::Left | BareKey::PageUp => Event::PrevPage,
                BareKey::Char('l') | BareKey::Right | BareKey::PageDown => Event::NextPage,
                BareKey::Char('j') | BareKey::Down => Event::CursorDown,
                BareKey::Char('k') | BareKey::Up => Event::CursorUp,
                BareKey::Enter | BareKey::Char(' ') => Event::ToggleDetails,
                BareKey::Char('o') => Event::OpenPurchase,
                BareKey::Char('d') => Event::OpenDetail,
                BareKey::Esc => Event::ClearSearch,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Maps a web request result to a catalog response, if it is one of ours.
    fn map_web_response(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(source) = context
            .get(SOURCE_CONTEXT_KEY)
            .and_then(|tag| CatalogSource::from_tag(tag))
        else {
            tracing::debug!(status, "ignoring web response without catalog source tag");
            return None;
        };

        tracing::debug!(source = %source, status, body_len = body.len(), "catalog response");
        Some(Event::CatalogResponse {
            source,
            status,
            body,
        })
    }

    fn fetch_catalog(request: &FetchRequest) {
        let mut context = BTreeMap::new();
        context.insert(
            SOURCE_CONTEXT_KEY.to_string(),
            request.source.as_str().to_string(),
        );
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        web_request(&request.url, HttpVerb::Get, headers, vec![], context);
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchCatalog(request) => {
                tracing::debug!(source = %request.source, url = %request.url, "fetching catalog");
                Self::fetch_catalog(request);
            }
            Action::OpenUrl { url } => {
                tracing::debug!(url = %url, "opening url");
                run_command(&["xdg-open", url.as_str()], BTreeMap::new());
            }
        }
    }
}
