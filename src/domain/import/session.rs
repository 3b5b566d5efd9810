use super::progress::ProgressEvent;
use crate::domain::errors::AppError;
use serde_json::{Map, Value};

/// Identifier distinguishing the current import attempt from superseded ones.
/// Bumped on every file selection; async results carry the token they were
/// started under and are discarded when it no longer matches.
pub type SessionToken = u64;

/// Spreadsheet extensions the importer accepts
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".xlsx", ".xls"];

pub const ERR_NO_FILE: &str = "Select a spreadsheet file first";
pub const ERR_BAD_EXTENSION: &str = "Only .xlsx and .xls files are supported";
pub const ERR_NO_SHEET: &str = "Select a sheet first";

/// Preview row as delivered by the server: column name -> cell value,
/// in source order
pub type PreviewRow = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Idle,
    FileSelected,
    SheetsLoading,
    SheetsReady,
    PreviewLoading,
    PreviewReady,
    Uploading,
    Completed,
    Failed,
}

/// Terminal import response
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub message: String,
    pub imported: u64,
}

/// Events produced by the discovery/preview calls and by the two concurrent
/// progress sources (upload transport and push channel)
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SheetsDiscovered(Vec<String>),
    SheetDiscoveryFailed(String),
    PreviewLoaded(Vec<PreviewRow>),
    PreviewFailed(String),
    TransportProgress { loaded: u64, total: Option<u64> },
    UploadCompleted(ImportOutcome),
    UploadFailed(String),
    Processing(ProgressEvent),
}

/// What applying an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// The event carried a superseded token and was ignored
    pub stale: bool,
    /// This application crossed the completion threshold for the first time
    pub refresh: bool,
}

impl Applied {
    fn ignored() -> Self {
        Self {
            stale: true,
            refresh: false,
        }
    }

    fn accepted(refresh: bool) -> Self {
        Self {
            stale: false,
            refresh,
        }
    }
}

/// State machine coordinating file selection, sheet discovery, preview and
/// the upload with its two progress feeds. Pure data: all I/O happens in the
/// drivers, which funnel results back in through [`ImportSession::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSession {
    token: SessionToken,
    stage: ImportStage,
    file_name: Option<String>,
    sheet: Option<String>,
    sheets: Vec<String>,
    preview: Vec<PreviewRow>,
    columns: Vec<String>,
    upload_progress: u8,
    processing_target: f64,
    step: String,
    outcome: Option<ImportOutcome>,
    error: Option<String>,
    refresh_emitted: bool,
}

impl Default for ImportSession {
    fn default() -> Self {
        Self {
            token: 0,
            stage: ImportStage::Idle,
            file_name: None,
            sheet: None,
            sheets: Vec::new(),
            preview: Vec::new(),
            columns: Vec::new(),
            upload_progress: 0,
            processing_target: 0.0,
            step: String::new(),
            outcome: None,
            error: None,
            refresh_emitted: false,
        }
    }
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    pub fn sheets(&self) -> &[String] {
        &self.sheets
    }

    pub fn preview(&self) -> &[PreviewRow] {
        &self.preview
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn upload_progress(&self) -> u8 {
        self.upload_progress
    }

    pub fn processing_target(&self) -> f64 {
        self.processing_target
    }

    pub fn step(&self) -> &str {
        &self.step
    }

    pub fn outcome(&self) -> Option<&ImportOutcome> {
        self.outcome.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_uploading(&self) -> bool {
        self.stage == ImportStage::Uploading
    }

    pub fn succeeded(&self) -> bool {
        self.stage == ImportStage::Completed
    }

    pub fn can_upload(&self) -> bool {
        self.file_name.is_some() && self.sheet.is_some()
    }

    /// Start a fresh attempt around `file_name`. Every call supersedes the
    /// previous attempt (token bump), so late callbacks from an earlier upload
    /// can no longer touch this session. Rejects non-spreadsheet extensions,
    /// leaving the session Idle with no file.
    pub fn select_file(&mut self, file_name: &str) -> Result<SessionToken, AppError> {
        self.token += 1;
        self.clear_fields();
        if !has_accepted_extension(file_name) {
            self.stage = ImportStage::Idle;
            self.error = Some(ERR_BAD_EXTENSION.to_string());
            return Err(AppError::ValidationError(ERR_BAD_EXTENSION.to_string()));
        }
        self.file_name = Some(file_name.to_string());
        self.stage = ImportStage::FileSelected;
        Ok(self.token)
    }

    /// The picker was closed without a file. Supersedes the previous attempt
    /// like any other selection, ending Idle with the no-file error.
    pub fn clear_file(&mut self) -> SessionToken {
        self.token += 1;
        self.clear_fields();
        self.stage = ImportStage::Idle;
        self.error = Some(ERR_NO_FILE.to_string());
        self.token
    }

    /// Move into sheet discovery; requires a selected file
    pub fn begin_sheet_discovery(&mut self) -> Result<SessionToken, AppError> {
        if self.file_name.is_none() {
            self.error = Some(ERR_NO_FILE.to_string());
            return Err(AppError::ValidationError(ERR_NO_FILE.to_string()));
        }
        self.stage = ImportStage::SheetsLoading;
        Ok(self.token)
    }

    /// Pure field update, no stage change. An empty name clears the choice.
    pub fn select_sheet(&mut self, name: &str) {
        self.sheet = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }

    /// Fails fast without any network call when file or sheet is missing
    pub fn begin_preview(&mut self) -> Result<SessionToken, AppError> {
        self.require_file_and_sheet()?;
        self.error = None;
        self.stage = ImportStage::PreviewLoading;
        Ok(self.token)
    }

    /// Fails fast without any network call when file or sheet is missing.
    /// Clears both progress feeds and the refresh latch for the new upload.
    pub fn begin_upload(&mut self) -> Result<SessionToken, AppError> {
        self.require_file_and_sheet()?;
        self.upload_progress = 0;
        self.processing_target = 0.0;
        self.step.clear();
        self.outcome = None;
        self.error = None;
        self.refresh_emitted = false;
        self.stage = ImportStage::Uploading;
        Ok(self.token)
    }

    /// Apply an async result. Events from a superseded attempt are ignored;
    /// accepted events may report that the refresh threshold was crossed.
    /// Events are tolerated in any interleaving: transport progress, push
    /// events and the terminal response may arrive in any order.
    pub fn apply(&mut self, token: SessionToken, event: SessionEvent) -> Applied {
        if token != self.token {
            return Applied::ignored();
        }
        match event {
            SessionEvent::SheetsDiscovered(sheets) => {
                self.sheets = sheets;
                self.error = None;
                self.stage = ImportStage::SheetsReady;
                Applied::accepted(false)
            }
            SessionEvent::SheetDiscoveryFailed(message) => {
                // The selected file survives so the user can retry discovery
                self.error = Some(message);
                self.stage = ImportStage::Failed;
                Applied::accepted(false)
            }
            SessionEvent::PreviewLoaded(rows) => {
                self.columns = rows
                    .first()
                    .map(|row| row.keys().cloned().collect())
                    .unwrap_or_default();
                self.preview = rows;
                self.error = None;
                self.stage = ImportStage::PreviewReady;
                Applied::accepted(false)
            }
            SessionEvent::PreviewFailed(message) => {
                self.error = Some(message);
                self.stage = if self.preview.is_empty() {
                    ImportStage::SheetsReady
                } else {
                    ImportStage::PreviewReady
                };
                Applied::accepted(false)
            }
            SessionEvent::TransportProgress { loaded, total } => {
                if let Some(total) = total {
                    // Monotonic within one upload
                    self.upload_progress = self.upload_progress.max(transport_percent(loaded, total));
                }
                Applied::accepted(false)
            }
            SessionEvent::UploadCompleted(outcome) => {
                self.upload_progress = 100;
                self.outcome = Some(outcome);
                self.error = None;
                self.stage = ImportStage::Completed;
                Applied::accepted(self.mark_completed())
            }
            SessionEvent::UploadFailed(message) => {
                // Progress fields keep their last value so the user sees where it stalled
                self.error = Some(message);
                self.stage = ImportStage::Failed;
                Applied::accepted(false)
            }
            SessionEvent::Processing(event) => {
                if let Some(step) = &event.step {
                    self.step = step.clone();
                }
                if let Some(progress) = event.progress {
                    self.processing_target = progress;
                }
                let refresh = event.is_terminal() && self.mark_completed();
                Applied::accepted(refresh)
            }
        }
    }

    /// Guard shared by preview and upload; records the message so the view
    /// can show why nothing happened
    fn require_file_and_sheet(&mut self) -> Result<(), AppError> {
        let missing = if self.file_name.is_none() {
            Some(ERR_NO_FILE)
        } else if self.sheet.is_none() {
            Some(ERR_NO_SHEET)
        } else {
            None
        };
        if let Some(message) = missing {
            self.error = Some(message.to_string());
            return Err(AppError::ValidationError(message.to_string()));
        }
        Ok(())
    }

    /// First completion signal wins, whether it came from the terminal upload
    /// response or from a push-channel event
    fn mark_completed(&mut self) -> bool {
        if self.refresh_emitted {
            return false;
        }
        self.refresh_emitted = true;
        true
    }

    fn clear_fields(&mut self) {
        self.file_name = None;
        self.sheet = None;
        self.sheets.clear();
        self.preview.clear();
        self.columns.clear();
        self.upload_progress = 0;
        self.processing_target = 0.0;
        self.step.clear();
        self.outcome = None;
        self.error = None;
        self.refresh_emitted = false;
    }
}

pub fn has_accepted_extension(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Integer transport percentage, `round(loaded * 100 / total)` capped at 100
pub fn transport_percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (loaded as f64 * 100.0 / total as f64).round();
    percent.min(100.0) as u8
}
