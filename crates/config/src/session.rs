use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The persisted document/sheet selection.
///
/// Invariant: a sheet selection is meaningless without a document.
/// Loading enforces it by discarding an orphaned sheet, so a session
/// read from disk is always coherent no matter what was written there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub document: Option<String>,
    pub sheet: Option<String>,
}

impl Session {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rowhook")
            .join("session.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        let mut session: Session = fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        if session.document.is_none() {
            session.sheet = None;
        }
        session
    }

    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Selecting a document drops any sheet chosen under the previous
    /// one.
    pub fn select_document(&mut self, document: &str) {
        self.document = Some(document.to_string());
        self.sheet = None;
    }

    /// Sheet selection requires a document; without one this is a
    /// no-op so the invariant can't be broken from outside.
    pub fn select_sheet(&mut self, sheet: &str) {
        if self.document.is_some() {
            self.sheet = Some(sheet.to_string());
        }
    }

    /// "Back" one level: out of the sheet, keeping the document.
    pub fn clear_sheet(&mut self) {
        self.sheet = None;
    }

    /// "Back" to the start: clearing the document clears the sheet too.
    pub fn clear(&mut self) {
        self.document = None;
        self.sheet = None;
    }

    /// Both halves of the selection, when a sheet is active.
    pub fn selected(&self) -> Option<(&str, &str)> {
        match (&self.document, &self.sheet) {
            (Some(doc), Some(sheet)) => Some((doc, sheet)),
            _ => None,
        }
    }
}
