use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use agrofind_core::error::AgrofindError;
use agrofind_core::model::{
    Category, HealthState, SearchOutcome, SearchRequest, SelectedFile, UploadState,
    ALL_CATEGORIES, NO_FILE_SELECTED,
};
use agrofind_core::session::SessionGate;

use super::event::{AsyncAction, AsyncResult};

/// Which screen is currently displayed. Everything past `Login` requires an
/// authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Search,
    Upload,
}

/// Input mode within the search screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Query,
}

/// Category filter options for search, cycled with `f`.
pub const CATEGORY_FILTERS: &[Option<Category>] =
    &[None, Some(Category::Anuncio), Some(Category::Organico)];

/// Central application state.
pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub should_quit: bool,

    gate: SessionGate,
    pub health: HealthState,

    // -- Search state --
    pub query_input: String,
    pub query_cursor: usize,
    pub current_query: Option<String>,
    pub filter_index: usize, // index into CATEGORY_FILTERS
    pub outcome: SearchOutcome,
    pub selected: usize,
    search_seq: u64,

    // -- Upload state --
    pub upload: UploadState,
    pub upload_category_index: usize, // index into ALL_CATEGORIES
    pub path_input: String,
    pub upload_field: usize, // 0 = path, 1 = category

    // -- Error toast --
    pub error_message: Option<String>,
    pub error_timer: u8, // ticks remaining
}

impl App {
    pub fn new(gate: SessionGate, default_category: Category) -> Self {
        let screen = if gate.is_authenticated() {
            Screen::Search
        } else {
            Screen::Login
        };
        let upload_category_index = ALL_CATEGORIES
            .iter()
            .position(|c| *c == default_category)
            .unwrap_or(0);
        Self {
            screen,
            input_mode: InputMode::Normal,
            should_quit: false,

            gate,
            health: HealthState::Checking,

            query_input: String::new(),
            query_cursor: 0,
            current_query: None,
            filter_index: 0,
            outcome: SearchOutcome::Idle,
            selected: 0,
            search_seq: 0,

            upload: UploadState::Empty,
            upload_category_index,
            path_input: String::new(),
            upload_field: 0,

            error_message: None,
            error_timer: 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    /// Action to dispatch right after startup: the once-per-session health
    /// probe, but only when the persisted session is already authenticated.
    pub fn initial_action(&self) -> Option<AsyncAction> {
        if self.gate.is_authenticated() {
            Some(AsyncAction::CheckHealth)
        } else {
            None
        }
    }

    /// Process an async result from the worker.
    pub fn handle_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Health(state) => {
                self.health = state;
            }
            AsyncResult::SearchDone { seq, response } => {
                if seq != self.search_seq {
                    tracing::debug!(seq, latest = self.search_seq, "discarding stale search response");
                    return;
                }
                self.outcome = SearchOutcome::Success {
                    results: response.results,
                    processing_time_ms: response.processing_time_ms,
                };
                self.selected = 0;
            }
            AsyncResult::SearchFailed { seq, message } => {
                if seq != self.search_seq {
                    tracing::debug!(seq, latest = self.search_seq, "discarding stale search error");
                    return;
                }
                self.outcome = SearchOutcome::Failure { message };
            }
            AsyncResult::UploadDone { message } => {
                if !self.upload.is_uploading() {
                    return;
                }
                self.upload = UploadState::Succeeded { message };
                self.path_input.clear();
            }
            AsyncResult::UploadFailed { message } => {
                if !self.upload.is_uploading() {
                    return;
                }
                // The selection is cleared on failure as well: a fresh
                // selection is required before retrying.
                self.upload = UploadState::Failed { message };
                self.path_input.clear();
            }
        }
    }

    /// Handle a key event. Returns an optional async action to dispatch.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match (&self.screen, &self.input_mode) {
            (Screen::Login, _) => self.handle_login(key),
            (Screen::Search, InputMode::Normal) => self.handle_search_normal(key),
            (Screen::Search, InputMode::Query) => self.handle_search_query(key),
            (Screen::Upload, _) => self.handle_upload(key),
        }
    }

    fn handle_login(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Enter => {
                if let Err(e) = self.gate.login() {
                    self.toast(e.to_string());
                    return None;
                }
                self.health = HealthState::Checking;
                self.screen = Screen::Search;
                Some(AsyncAction::CheckHealth)
            }
            _ => None,
        }
    }

    fn handle_search_normal(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Query;
                self.query_cursor = self.query_input.len();
                None
            }
            KeyCode::Char('f') => {
                self.filter_index = (self.filter_index + 1) % CATEGORY_FILTERS.len();
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('u') | KeyCode::Tab => {
                self.screen = Screen::Upload;
                self.upload_field = 0;
                None
            }
            KeyCode::Char('o') => {
                self.logout();
                None
            }
            KeyCode::Esc => {
                // Clear the finished search, back to the empty state
                if self.current_query.is_some() {
                    self.current_query = None;
                    self.outcome = SearchOutcome::Idle;
                    self.selected = 0;
                }
                None
            }
            _ => None,
        }
    }

    fn handle_search_query(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.submit_search()
            }
            // The cursor is a byte offset; all movement steps by whole chars
            // so accented input never lands mid-boundary.
            KeyCode::Backspace => {
                if let Some(c) = self.query_input[..self.query_cursor].chars().next_back() {
                    self.query_cursor -= c.len_utf8();
                    self.query_input.remove(self.query_cursor);
                }
                None
            }
            KeyCode::Left => {
                if let Some(c) = self.query_input[..self.query_cursor].chars().next_back() {
                    self.query_cursor -= c.len_utf8();
                }
                None
            }
            KeyCode::Right => {
                if let Some(c) = self.query_input[self.query_cursor..].chars().next() {
                    self.query_cursor += c.len_utf8();
                }
                None
            }
            KeyCode::Char(c) => {
                self.query_input.insert(self.query_cursor, c);
                self.query_cursor += c.len_utf8();
                None
            }
            _ => None,
        }
    }

    /// Submit the current query. Transitions to `Loading` synchronously,
    /// before the request is even queued; the previous outcome is replaced
    /// whole. Empty queries and unauthenticated sessions never submit.
    fn submit_search(&mut self) -> Option<AsyncAction> {
        let text = self.query_input.trim();
        if text.is_empty() || !self.gate.is_authenticated() {
            return None;
        }
        self.search_seq += 1;
        self.current_query = Some(text.to_string());
        self.outcome = SearchOutcome::Loading;
        self.selected = 0;
        Some(AsyncAction::Search {
            seq: self.search_seq,
            request: SearchRequest::new(text, self.category_filter()),
        })
    }

    fn handle_upload(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Search;
                None
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.start_upload()
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.upload_field = (self.upload_field + 1) % 2;
                None
            }
            KeyCode::Up | KeyCode::Down if self.upload_field == 1 => {
                self.cycle_upload_category();
                None
            }
            KeyCode::Enter => {
                if self.upload_field == 1 {
                    self.cycle_upload_category();
                } else {
                    self.select_file();
                }
                None
            }
            KeyCode::Char(c) if self.upload_field == 0 => {
                self.path_input.push(c);
                None
            }
            KeyCode::Backspace if self.upload_field == 0 => {
                self.path_input.pop();
                None
            }
            _ => None,
        }
    }

    /// Validate the typed path. A non-PDF declared type fails here, locally,
    /// and the file is not stored.
    fn select_file(&mut self) {
        if self.upload.is_uploading() {
            return;
        }
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        match SelectedFile::select(&path) {
            Ok(file) => self.upload = UploadState::Selected { file },
            Err(AgrofindError::InvalidInput(message)) => {
                self.upload = UploadState::Failed { message };
            }
            Err(other) => {
                self.upload = UploadState::Failed {
                    message: other.to_string(),
                };
            }
        }
    }

    /// Category choice is frozen while an upload is in flight.
    fn cycle_upload_category(&mut self) {
        if self.upload.is_uploading() {
            return;
        }
        self.upload_category_index = (self.upload_category_index + 1) % ALL_CATEGORIES.len();
    }

    fn start_upload(&mut self) -> Option<AsyncAction> {
        if !self.gate.is_authenticated() {
            return None;
        }
        match &self.upload {
            UploadState::Selected { file } => {
                let file = file.clone();
                let category = ALL_CATEGORIES[self.upload_category_index];
                self.upload = UploadState::Uploading { file: file.clone() };
                Some(AsyncAction::Upload { file, category })
            }
            UploadState::Uploading { .. } => None,
            _ => {
                self.upload = UploadState::Failed {
                    message: NO_FILE_SELECTED.to_string(),
                };
                None
            }
        }
    }

    /// End the session: the persisted flag is removed and all stale search
    /// state is discarded, whatever it was.
    fn logout(&mut self) {
        if let Err(e) = self.gate.logout() {
            self.toast(e.to_string());
        }
        self.outcome = SearchOutcome::Idle;
        self.current_query = None;
        self.query_input.clear();
        self.query_cursor = 0;
        self.selected = 0;
        self.upload = UploadState::Empty;
        self.path_input.clear();
        self.health = HealthState::Checking;
        self.input_mode = InputMode::Normal;
        self.screen = Screen::Login;
    }

    pub fn category_filter(&self) -> Option<Category> {
        CATEGORY_FILTERS[self.filter_index]
    }

    pub fn upload_category(&self) -> Category {
        ALL_CATEGORIES[self.upload_category_index]
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.outcome.results().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let new = (self.selected as i32 + delta).clamp(0, len as i32 - 1);
        self.selected = new as usize;
    }

    fn toast(&mut self, message: String) {
        self.error_message = Some(message);
        self.error_timer = 100; // ~5s at 50ms tick
    }

    /// Tick the error timer down.
    pub fn tick_error(&mut self) {
        if self.error_timer > 0 {
            self.error_timer -= 1;
            if self.error_timer == 0 {
                self.error_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrofind_core::model::{SearchResponse, SearchResult};
    use agrofind_core::session::{MemorySessionStore, SessionStore};
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> App {
        App::new(
            SessionGate::new(Box::new(MemorySessionStore::default())),
            Category::Anuncio,
        )
    }

    fn authenticated_app() -> App {
        let store = MemorySessionStore::default();
        store.set(true).unwrap();
        App::new(SessionGate::new(Box::new(store)), Category::Anuncio)
    }

    fn result(id: &str, score: f32) -> SearchResult {
        SearchResult {
            document_id: id.to_string(),
            filename: format!("{id}.pdf"),
            category: "organico".to_string(),
            chunk_text: "tendências do etanol em 2025".to_string(),
            similarity_score: score,
            upload_date: "2025-03-05".to_string(),
            page_number: Some(1),
            gcs_url: format!("gs://docs/{id}.pdf"),
        }
    }

    fn response(ids: &[&str]) -> SearchResponse {
        SearchResponse {
            query: "etanol".to_string(),
            results: ids.iter().map(|id| result(id, 0.8)).collect(),
            total_results: ids.len(),
            processing_time_ms: 42.0,
        }
    }

    /// Submit a query through the real key path; returns the dispatched action.
    fn submit(app: &mut App, text: &str) -> Option<AsyncAction> {
        app.handle_key(key(KeyCode::Char('/')));
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter))
    }

    fn temp_pdf(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("agrofind-app-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        path
    }

    #[test]
    fn test_unauthenticated_starts_on_login() {
        let app = app();
        assert_eq!(app.screen, Screen::Login);
        assert!(app.initial_action().is_none());
    }

    #[test]
    fn test_persisted_session_skips_login_and_checks_health() {
        let app = authenticated_app();
        assert_eq!(app.screen, Screen::Search);
        assert!(matches!(
            app.initial_action(),
            Some(AsyncAction::CheckHealth)
        ));
        assert_eq!(app.health, HealthState::Checking);
    }

    #[test]
    fn test_login_dispatches_health_check() {
        let mut app = app();
        let action = app.handle_key(key(KeyCode::Enter));
        assert!(matches!(action, Some(AsyncAction::CheckHealth)));
        assert_eq!(app.screen, Screen::Search);
        assert!(app.is_authenticated());
    }

    #[test]
    fn test_health_result_applies() {
        let mut app = authenticated_app();
        app.handle_result(AsyncResult::Health(HealthState::Healthy));
        assert_eq!(app.health, HealthState::Healthy);
        app.handle_result(AsyncResult::Health(HealthState::Unhealthy));
        assert_eq!(app.health, HealthState::Unhealthy);
    }

    #[test]
    fn test_submit_transitions_to_loading_synchronously() {
        let mut app = authenticated_app();
        let action = submit(&mut app, "etanol 2025");
        // Loading holds before any response arrives
        assert!(app.outcome.is_loading());
        assert_eq!(app.current_query.as_deref(), Some("etanol 2025"));
        match action {
            Some(AsyncAction::Search { seq, request }) => {
                assert_eq!(seq, 1);
                assert_eq!(request.query, "etanol 2025");
                assert_eq!(request.top_k, Some(10));
            }
            other => panic!("expected search action, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_replaces_prior_failure() {
        let mut app = authenticated_app();
        submit(&mut app, "milho");
        app.handle_result(AsyncResult::SearchFailed {
            seq: 1,
            message: "erro".into(),
        });
        assert!(app.outcome.error().is_some());

        submit(&mut app, "milho");
        // A fresh submission wipes the failure immediately
        assert!(app.outcome.is_loading());
        assert!(app.outcome.error().is_none());
    }

    #[test]
    fn test_empty_query_never_submits() {
        let mut app = authenticated_app();
        let action = submit(&mut app, "   ");
        assert!(action.is_none());
        assert_eq!(app.outcome, SearchOutcome::Idle);
        assert!(app.current_query.is_none());
    }

    #[test]
    fn test_query_editing_with_accented_chars() {
        let mut app = authenticated_app();
        app.handle_key(key(KeyCode::Char('/')));
        for c in "ração".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.query_input, "ração");

        // Backspace removes one char, not one byte
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.query_input, "raç");

        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.query_input, "ranç");
    }

    #[test]
    fn test_search_success_preserves_service_order() {
        let mut app = authenticated_app();
        submit(&mut app, "soja");
        app.handle_result(AsyncResult::SearchDone {
            seq: 1,
            response: response(&["c", "a", "b"]),
        });
        let ids: Vec<_> = app
            .outcome
            .results()
            .iter()
            .map(|r| r.document_id.as_str())
            .collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut app = authenticated_app();
        submit(&mut app, "primeira");
        submit(&mut app, "segunda"); // seq is now 2

        // The first request resolves late; it must not win
        app.handle_result(AsyncResult::SearchDone {
            seq: 1,
            response: response(&["stale"]),
        });
        assert!(app.outcome.is_loading());

        app.handle_result(AsyncResult::SearchDone {
            seq: 2,
            response: response(&["fresh"]),
        });
        assert_eq!(app.outcome.results()[0].document_id, "fresh");
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut app = authenticated_app();
        submit(&mut app, "primeira");
        submit(&mut app, "segunda");

        app.handle_result(AsyncResult::SearchFailed {
            seq: 1,
            message: "stale error".into(),
        });
        assert!(app.outcome.is_loading());
    }

    #[test]
    fn test_search_failure_clears_results() {
        let mut app = authenticated_app();
        submit(&mut app, "soja");
        app.handle_result(AsyncResult::SearchDone {
            seq: 1,
            response: response(&["a"]),
        });
        assert_eq!(app.outcome.results().len(), 1);

        submit(&mut app, "soja");
        app.handle_result(AsyncResult::SearchFailed {
            seq: 2,
            message: "Erro ao realizar busca. Tente novamente.".into(),
        });
        assert!(app.outcome.results().is_empty());
        assert_eq!(
            app.outcome.error(),
            Some("Erro ao realizar busca. Tente novamente.")
        );
    }

    #[test]
    fn test_logout_resets_search_state() {
        let mut app = authenticated_app();
        submit(&mut app, "soja");
        app.handle_result(AsyncResult::SearchDone {
            seq: 1,
            response: response(&["a", "b"]),
        });

        app.handle_key(key(KeyCode::Char('o')));
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.is_authenticated());
        assert_eq!(app.outcome, SearchOutcome::Idle);
        assert!(app.current_query.is_none());
        assert!(app.query_input.is_empty());
    }

    #[test]
    fn test_selection_navigation() {
        let mut app = authenticated_app();
        submit(&mut app, "soja");
        app.handle_result(AsyncResult::SearchDone {
            seq: 1,
            response: response(&["a", "b", "c"]),
        });

        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected, 2);
        // Clamped at the end
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected, 2);
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_filter_cycling() {
        let mut app = authenticated_app();
        assert_eq!(app.category_filter(), None);
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.category_filter(), Some(Category::Anuncio));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.category_filter(), Some(Category::Organico));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.category_filter(), None);
    }

    #[test]
    fn test_search_round_trip_with_category() {
        let mut app = authenticated_app();
        // Cycle the filter to Orgânico
        app.handle_key(key(KeyCode::Char('f')));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.category_filter(), Some(Category::Organico));

        let action = submit(&mut app, "etanol 2025");
        let request = match action {
            Some(AsyncAction::Search { request, .. }) => request,
            other => panic!("expected search action, got {other:?}"),
        };
        assert_eq!(request.category, Some(Category::Organico));
        assert_eq!(request.top_k, Some(10));

        app.handle_result(AsyncResult::SearchDone {
            seq: 1,
            response: SearchResponse {
                query: "etanol 2025".into(),
                results: vec![result("doc-1", 0.82)],
                total_results: 1,
                processing_time_ms: 87.0,
            },
        });

        let results = app.outcome.results();
        assert_eq!(results.len(), 1);
        let hit = &results[0];
        assert_eq!(
            agrofind_core::present::relevance_tier(hit.similarity_score),
            agrofind_core::present::RelevanceTier::High
        );
        assert_eq!(
            agrofind_core::present::category_badge(&hit.category).label,
            "Orgânico"
        );
    }

    #[test]
    fn test_esc_clears_finished_search() {
        let mut app = authenticated_app();
        submit(&mut app, "soja");
        app.handle_result(AsyncResult::SearchDone {
            seq: 1,
            response: response(&["a"]),
        });

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.outcome, SearchOutcome::Idle);
        assert!(app.current_query.is_none());
    }

    #[test]
    fn test_upload_screen_navigation() {
        let mut app = authenticated_app();
        app.handle_key(key(KeyCode::Char('u')));
        assert_eq!(app.screen, Screen::Upload);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Search);
    }

    #[test]
    fn test_select_non_pdf_fails_without_network() {
        let mut app = authenticated_app();
        app.handle_key(key(KeyCode::Char('u')));
        for c in "/tmp/notas.txt".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let action = app.handle_key(key(KeyCode::Enter));
        assert!(action.is_none());
        match &app.upload {
            UploadState::Failed { message } => {
                assert_eq!(message, "Por favor, selecione um arquivo PDF válido");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_upload_lifecycle() {
        let path = temp_pdf("safra.pdf");
        let mut app = authenticated_app();
        app.handle_key(key(KeyCode::Char('u')));
        for c in path.to_str().unwrap().chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.upload, UploadState::Selected { .. }));

        let action = app.handle_key(ctrl('s'));
        assert!(matches!(action, Some(AsyncAction::Upload { .. })));
        assert!(app.upload.is_uploading());

        // A second Ctrl+S while in flight does nothing
        assert!(app.handle_key(ctrl('s')).is_none());

        app.handle_result(AsyncResult::UploadDone {
            message: "✅ safra.pdf enviado e indexado com sucesso!".into(),
        });
        assert!(matches!(app.upload, UploadState::Succeeded { .. }));
        // Selection cleared: a new file is required
        assert!(app.path_input.is_empty());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_upload_failure_clears_selection() {
        let path = temp_pdf("falha.pdf");
        let mut app = authenticated_app();
        app.handle_key(key(KeyCode::Char('u')));
        for c in path.to_str().unwrap().chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(ctrl('s'));

        app.handle_result(AsyncResult::UploadFailed {
            message: "Erro ao fazer upload: HTTP error: timeout".into(),
        });
        match &app.upload {
            UploadState::Failed { message } => assert!(message.contains("timeout")),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(app.path_input.is_empty());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_upload_without_selection_fails() {
        let mut app = authenticated_app();
        app.handle_key(key(KeyCode::Char('u')));
        let action = app.handle_key(ctrl('s'));
        assert!(action.is_none());
        match &app.upload {
            UploadState::Failed { message } => {
                assert_eq!(message, "Selecione um arquivo primeiro");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_category_frozen_while_uploading() {
        let path = temp_pdf("cat.pdf");
        let mut app = authenticated_app();
        app.handle_key(key(KeyCode::Char('u')));
        for c in path.to_str().unwrap().chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        // Before upload the category cycles normally
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.upload_category(), Category::Organico);

        app.handle_key(ctrl('s'));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.upload_category(), Category::Organico);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_stale_upload_result_ignored_after_logout() {
        let path = temp_pdf("late.pdf");
        let mut app = authenticated_app();
        app.handle_key(key(KeyCode::Char('u')));
        for c in path.to_str().unwrap().chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(ctrl('s'));

        app.handle_key(key(KeyCode::Esc)); // back to search
        app.handle_key(key(KeyCode::Char('o'))); // logout resets upload state

        app.handle_result(AsyncResult::UploadDone {
            message: "tarde demais".into(),
        });
        assert_eq!(app.upload, UploadState::Empty);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = app();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);

        let mut app = authenticated_app();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_error_toast_timer() {
        let mut app = authenticated_app();
        app.toast("algo falhou".into());
        assert!(app.error_message.is_some());

        for _ in 0..99 {
            app.tick_error();
        }
        assert!(app.error_message.is_some());
        app.tick_error();
        assert!(app.error_message.is_none());
    }
}
