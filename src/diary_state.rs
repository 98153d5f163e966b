use crate::diary_entry::DiaryEntry;
use crate::error::{DiaryError, DiaryResult};
use crate::storage::{load_json_or_default, save_json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One user's diary, mirrored to `data_<username>.json` after every change.
///
/// Entries are addressed by their position in the list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DiaryState {
    entries: Vec<DiaryEntry>,
    #[serde(skip)]
    path: PathBuf,
}

pub fn data_file(data_dir: &Path, username: &str) -> PathBuf {
    data_dir.join(format!("data_{username}.json"))
}

impl DiaryState {
    pub fn load_for(data_dir: &Path, username: &str) -> DiaryResult<Self> {
        let path = data_file(data_dir, username);
        let mut state: DiaryState = load_json_or_default(&path)?;
        debug!(path = %path.display(), entries = state.entries.len(), "diary loaded");
        state.path = path;
        Ok(state)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> DiaryResult<&DiaryEntry> {
        self.entries.get(index).ok_or(DiaryError::NoSuchEntry(index))
    }

    fn entry_mut(&mut self, index: usize) -> DiaryResult<&mut DiaryEntry> {
        self.entries
            .get_mut(index)
            .ok_or(DiaryError::NoSuchEntry(index))
    }

    /// Appends an unlocked entry and returns its position.
    pub fn add_entry(&mut self, title: &str, content: &str, date: NaiveDate) -> DiaryResult<usize> {
        let entry = DiaryEntry::new(title.to_string(), content.trim().to_string(), date);
        self.entries.push(entry);
        self.save_to_file()?;
        let index = self.entries.len() - 1;
        info!(index, %date, "entry added");
        Ok(index)
    }

    pub fn update_entry(&mut self, index: usize, title: &str, content: &str) -> DiaryResult<()> {
        let entry = self.entry_mut(index)?;
        if entry.locked {
            return Err(DiaryError::EntryLocked(entry.title.clone()));
        }
        entry.title = title.to_string();
        entry.content = content.trim().to_string();
        self.save_to_file()?;
        info!(index, "entry updated");
        Ok(())
    }

    pub fn delete_entry(&mut self, index: usize) -> DiaryResult<DiaryEntry> {
        if index >= self.entries.len() {
            return Err(DiaryError::NoSuchEntry(index));
        }
        let removed = self.entries.remove(index);
        self.save_to_file()?;
        info!(index, "entry deleted");
        Ok(removed)
    }

    pub fn lock_entry(&mut self, index: usize) -> DiaryResult<()> {
        self.entry_mut(index)?.locked = true;
        self.save_to_file()?;
        info!(index, "entry locked");
        Ok(())
    }

    /// Clears the lock only if `verify` accepts `password`.
    pub fn unlock_entry<F>(&mut self, index: usize, password: &str, verify: F) -> DiaryResult<()>
    where
        F: FnOnce(&str) -> DiaryResult<bool>,
    {
        let entry = self.entry_mut(index)?;
        if !entry.locked {
            return Ok(());
        }
        if !verify(password)? {
            warn!(index, "unlock refused: wrong password");
            return Err(DiaryError::InvalidPassword);
        }
        entry.locked = false;
        self.save_to_file()?;
        info!(index, "entry unlocked");
        Ok(())
    }

    /// Entries whose title, content, or date contains `query`, ignoring
    /// case, paired with their position in the full list. A blank query
    /// returns every entry.
    pub fn search_entries(&self, query: &str) -> Vec<(usize, &DiaryEntry)> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| needle.is_empty() || e.matches(&needle))
            .collect()
    }

    pub fn save_to_file(&self) -> DiaryResult<()> {
        save_json(&self.path, self)
    }
}
