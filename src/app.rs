// src/app.rs

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::{ScrollbarState, TableState};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::core::accounts::AccountStore;
use crate::core::export::export_report;
use crate::core::history::{cycle, HistoryQuery};
use crate::core::knowledge_base;
use crate::core::models::{AnalysisFinding, ScoreBand, SecurityAnalysis};
use crate::core::scanner::url_validator::normalize_url;
use crate::core::scanner::StageProgress;
use crate::error::ValidationError;

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Scanning,
    Finished,
    History,
    SignIn,
}

/// Work the event loop must start on behalf of the app.
#[derive(Debug, PartialEq, Eq)]
pub enum AppCommand {
    StartScan(String),
}

/// Messages sent back from a running analysis.
#[derive(Debug)]
pub enum ScanEvent {
    Progress(StageProgress),
    Completed(SecurityAnalysis),
    Failed(ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
    Name,
}

/// The sign-in / register popup.
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub name: String,
    pub focus: AuthField,
    pub error: Option<String>,
}

impl AuthForm {
    fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            email: String::new(),
            password: String::new(),
            name: String::new(),
            focus: AuthField::Email,
            error: None,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
            AuthField::Name => &mut self.name,
        }
    }

    fn next_field(&mut self) {
        self.focus = match (self.focus, self.mode) {
            (AuthField::Email, _) => AuthField::Password,
            (AuthField::Password, AuthMode::Register) => AuthField::Name,
            _ => AuthField::Email,
        };
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::Register,
            AuthMode::Register => AuthMode::SignIn,
        };
        if self.focus == AuthField::Name {
            self.focus = AuthField::Email;
        }
        self.error = None;
    }
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub score: u8,
    pub band: Option<ScoreBand>,
    pub critical_issues: usize,
    pub warning_issues: usize,
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    previous_state: AppState,
    pub input: String,
    pub config: Config,
    pub store: AccountStore,
    pub current: Option<SecurityAnalysis>,
    pub findings: Vec<AnalysisFinding>,
    pub summary: ScanSummary,
    pub progress: Option<StageProgress>,
    pub notice: Option<String>,
    pub scroll_offset: usize,
    pub report_scroll_state: ScrollbarState,
    pub export_status: ExportStatus,
    pub history_query: HistoryQuery,
    pub history_state: TableState,
    pub auth: AuthForm,
    pub scans_started: u64,
}

impl App {
    pub fn new(config: Config, store: AccountStore) -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            previous_state: AppState::Idle,
            input: String::new(),
            config,
            store,
            current: None,
            findings: Vec::new(),
            summary: ScanSummary::default(),
            progress: None,
            notice: None,
            scroll_offset: 0,
            report_scroll_state: ScrollbarState::default(),
            export_status: ExportStatus::Idle,
            history_query: HistoryQuery::default(),
            history_state: TableState::default(),
            auth: AuthForm::new(),
            scans_started: 0,
        }
    }

    /// Routes one key press. Returns a command when a scan must be started.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return None;
        }
        self.notice = None;
        match self.state {
            AppState::Idle => return self.handle_idle_key(key.code),
            AppState::Scanning => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.quit();
                }
            }
            AppState::Finished => self.handle_finished_key(key.code),
            AppState::History => self.handle_history_key(key.code),
            AppState::SignIn => self.handle_auth_key(key.code),
        }
        None
    }

    fn handle_idle_key(&mut self, key_code: KeyCode) -> Option<AppCommand> {
        match key_code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => return self.submit_url(),
            KeyCode::Tab => self.open_history(),
            KeyCode::F(2) => self.open_auth(),
            KeyCode::F(3) => self.logout(),
            _ => {}
        }
        None
    }

    fn handle_finished_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('n') => self.reset(),
            KeyCode::Char('e') => self.export_current(),
            KeyCode::Char('h') | KeyCode::Tab => self.open_history(),
            KeyCode::F(2) => self.open_auth(),
            KeyCode::F(3) => self.logout(),
            KeyCode::Up => self.scroll_up(),
            KeyCode::Down => self.scroll_down(),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Esc => self.state = self.resting_state(),
            KeyCode::Char(c) => {
                self.history_query.search.push(c);
                self.history_state.select(Some(0));
            }
            KeyCode::Backspace => {
                self.history_query.search.pop();
                self.history_state.select(Some(0));
            }
            KeyCode::Left | KeyCode::Right => {
                self.history_query.status = cycle(self.history_query.status);
                self.history_state.select(Some(0));
            }
            KeyCode::Tab => self.history_query.sort = cycle(self.history_query.sort),
            KeyCode::Up => self.history_state.select_previous(),
            KeyCode::Down => self.history_state.select_next(),
            KeyCode::Enter => self.open_selected_history_entry(),
            _ => {}
        }
    }

    fn handle_auth_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Esc => self.state = self.previous_state,
            KeyCode::Tab => self.auth.next_field(),
            KeyCode::BackTab => self.auth.toggle_mode(),
            KeyCode::Char(c) => self.auth.focused_mut().push(c),
            KeyCode::Backspace => {
                self.auth.focused_mut().pop();
            }
            KeyCode::Enter => self.submit_auth(),
            _ => {}
        }
    }

    /// Validates the input and asks for a scan. Invalid input never leaves `Idle`.
    fn submit_url(&mut self) -> Option<AppCommand> {
        if self.input.trim().is_empty() {
            return None;
        }
        match normalize_url(&self.input) {
            Ok(url) => {
                self.state = AppState::Scanning;
                self.progress = None;
                self.notice = None;
                self.scans_started += 1;
                Some(AppCommand::StartScan(url.to_string()))
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    /// Applies a message from the running analysis.
    pub fn apply_scan_event(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Progress(progress) => self.progress = Some(progress),
            ScanEvent::Completed(analysis) => {
                if self.store.is_signed_in() {
                    if let Err(e) = self.store.record_scan(analysis.clone()) {
                        error!(error = %e, "Failed to record scan in history.");
                        self.notice = Some(format!("Scan not saved: {e}"));
                    }
                }
                self.show_analysis(analysis);
            }
            ScanEvent::Failed(e) => {
                warn!(error = %e, "Analysis rejected.");
                self.notice = Some(e.to_string());
                self.progress = None;
                self.state = AppState::Idle;
            }
        }
    }

    fn show_analysis(&mut self, analysis: SecurityAnalysis) {
        self.current = Some(analysis);
        self.state = AppState::Finished;
        self.scroll_offset = 0;
        self.report_scroll_state = ScrollbarState::default();
        self.export_status = ExportStatus::Idle;
        self.update_summary();
    }

    pub fn update_summary(&mut self) {
        if let Some(analysis) = &self.current {
            self.findings = knowledge_base::findings_for(analysis, Utc::now());
            let (critical_issues, warning_issues) = knowledge_base::severity_counts(&self.findings);
            self.summary = ScanSummary {
                score: analysis.safety_score,
                band: Some(analysis.score_band()),
                critical_issues,
                warning_issues,
            };
        }
    }

    /// History entries matching the current query, in display order.
    pub fn history_view(&self) -> Vec<&SecurityAnalysis> {
        match self.store.active_account() {
            Some(account) => self.history_query.apply(&account.scan_history),
            None => Vec::new(),
        }
    }

    fn open_history(&mut self) {
        if !self.store.is_signed_in() {
            self.notice = Some("Sign in (F2) to view scan history".to_string());
            return;
        }
        self.history_state.select(Some(0));
        self.state = AppState::History;
    }

    fn open_selected_history_entry(&mut self) {
        let selected = self
            .history_state
            .selected()
            .and_then(|index| self.history_view().get(index).map(|scan| (*scan).clone()));
        if let Some(analysis) = selected {
            self.show_analysis(analysis);
        }
    }

    fn open_auth(&mut self) {
        if self.store.is_signed_in() {
            self.notice = Some("Already signed in; press F3 to sign out".to_string());
            return;
        }
        self.auth = AuthForm::new();
        self.previous_state = self.state;
        self.state = AppState::SignIn;
    }

    fn submit_auth(&mut self) {
        let result = match self.auth.mode {
            AuthMode::SignIn => self.store.login(&self.auth.email, &self.auth.password),
            AuthMode::Register => self.store.register(&self.auth.email, &self.auth.password, &self.auth.name),
        };
        match result {
            Ok(account) => {
                info!(email = %account.email, "Session started.");
                self.notice = Some(format!("Signed in as {}", account.display_name));
                self.auth = AuthForm::new();
                self.state = self.previous_state;
            }
            Err(e) => self.auth.error = Some(e.to_string()),
        }
    }

    fn logout(&mut self) {
        if !self.store.is_signed_in() {
            return;
        }
        match self.store.logout() {
            Ok(()) => self.notice = Some("Signed out".to_string()),
            Err(e) => self.notice = Some(format!("Sign-out failed: {e}")),
        }
    }

    fn export_current(&mut self) {
        let Some(analysis) = &self.current else { return };
        self.export_status = match export_report(analysis, &self.config.export_dir, Utc::now()) {
            Ok(path) => ExportStatus::Success(path.display().to_string()),
            Err(e) => {
                error!(error = %e, "Report export failed.");
                ExportStatus::Error(e.to_string())
            }
        };
    }

    // The state to return to when leaving an overlay view.
    fn resting_state(&self) -> AppState {
        if self.current.is_some() { AppState::Finished } else { AppState::Idle }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.current = None;
        self.findings.clear();
        self.summary = ScanSummary::default();
        self.progress = None;
        self.scroll_offset = 0;
        self.report_scroll_state = ScrollbarState::default();
        self.export_status = ExportStatus::Idle;
    }
}
