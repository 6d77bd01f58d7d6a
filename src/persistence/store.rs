//! File-backed deck store.
//!
//! One JSON document per deck under a data directory. Writes go through a
//! temp file plus rename so an interrupted save leaves the prior bytes
//! intact; loads run format migration, leaving stored bytes untouched.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use super::{migrate_stored_deck, now_millis, SavedDeck};

/// Save/load/delete/list of deck documents in a directory.
#[derive(Debug)]
pub struct DeckStore {
    dir: PathBuf,
    seq: AtomicU64,
}

/// Ids double as file names, so only a conservative character set is
/// accepted.
fn valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl DeckStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first save, so construction cannot fail.
    pub fn new(dir: PathBuf) -> Self {
        DeckStore {
            dir,
            seq: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn next_id(&self) -> String {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        format!("deck-{}-{}", now_millis(), seq)
    }

    /// Create or overwrite a deck document by id, assigning a fresh id when
    /// the deck has none. Returns the id the deck was stored under.
    pub fn save(&self, deck: &mut SavedDeck) -> io::Result<String> {
        if deck.id.is_empty() {
            deck.id = self.next_id();
        }
        if !valid_id(&deck.id) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid deck id '{}'", deck.id),
            ));
        }
        fs::create_dir_all(&self.dir)?;

        let bytes = serde_json::to_vec_pretty(deck)?;
        let tmp_path = self.dir.join(format!("{}.json.tmp", deck.id));
        {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(&bytes)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, self.path_for(&deck.id))?;
        Ok(deck.id.clone())
    }

    /// Load a deck by id, migrating legacy documents on read. `Ok(None)`
    /// when the id is unknown; `Err` when the document exists but cannot be
    /// interpreted.
    pub fn load(&self, id: &str) -> Result<Option<SavedDeck>, String> {
        if !valid_id(id) {
            return Ok(None);
        }
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let mut contents = String::new();
        File::open(&path)
            .and_then(|mut f| f.read_to_string(&mut contents))
            .map_err(|e| format!("failed to read deck '{id}': {e}"))?;
        let value: Value = serde_json::from_str(&contents)
            .map_err(|e| format!("deck '{id}' is not valid JSON: {e}"))?;
        migrate_stored_deck(&value, id).map(Some)
    }

    /// Remove a deck document. Returns whether anything was deleted.
    pub fn delete(&self, id: &str) -> bool {
        if !valid_id(id) {
            return false;
        }
        fs::remove_file(self.path_for(id)).is_ok()
    }

    /// All readable deck documents, newest first. Unreadable entries are
    /// logged and skipped rather than failing the whole listing.
    pub fn list(&self) -> Vec<SavedDeck> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        let mut decks = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "json") != Some(true) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.load(id) {
                Ok(Some(deck)) => decks.push(deck),
                Ok(None) => {}
                Err(e) => log::warn!("skipping unreadable deck document: {e}"),
            }
        }
        decks.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        decks
    }
}
