use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Backing storage for the high-score table
pub trait ScoreStore {
    /// Read the stored list
    fn load(&self) -> Result<Vec<u32>>;

    /// Replace the stored list
    fn save(&mut self, scores: &[u32]) -> Result<()>;
}

/// Load scores, treating any failure as an empty table
pub fn load_or_default(store: &dyn ScoreStore) -> Vec<u32> {
    match store.load() {
        Ok(scores) => scores,
        Err(err) => {
            warn!("Ignoring unreadable high scores: {:#}", err);
            Vec::new()
        }
    }
}

/// High scores kept as a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Vec<u32>> {
        if !self.path.exists() {
            debug!("No high score file at {:?}", self.path);
            return Ok(Vec::new());
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high scores from {:?}", self.path))?;
        let scores: Vec<u32> = serde_json::from_str(&json)
            .with_context(|| format!("Malformed high scores in {:?}", self.path))?;

        Ok(scores)
    }

    fn save(&mut self, scores: &[u32]) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string(scores).context("Failed to serialize high scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high scores to {:?}", self.path))?;

        Ok(())
    }
}

/// Scores held in memory only.
///
/// Clones share the same list, so a test can keep a handle and inspect
/// what a match persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: Arc<Mutex<Vec<u32>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: Vec<u32>) -> Self {
        Self {
            scores: Arc::new(Mutex::new(scores)),
            saves: Arc::default(),
        }
    }

    /// Current stored list
    pub fn scores(&self) -> Vec<u32> {
        self.scores.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or_default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Vec<u32>> {
        Ok(self.scores())
    }

    fn save(&mut self, scores: &[u32]) -> Result<()> {
        let mut stored = self
            .scores
            .lock()
            .map_err(|_| anyhow::anyhow!("score store lock poisoned"))?;
        *stored = scores.to_vec();

        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("highscores.json"));

        assert_eq!(store.load().unwrap(), Vec::<u32>::new());
        assert!(load_or_default(&store).is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("highscores.json");
        let mut store = JsonFileStore::new(&path);

        store.save(&[120, 50, 10]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[120,50,10]");
        assert_eq!(store.load().unwrap(), vec![120, 50, 10]);

        // Each save overwrites the whole file
        store.save(&[30]).unwrap();
        assert_eq!(store.load().unwrap(), vec![30]);
    }

    #[test]
    fn test_malformed_file_recovers_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscores.json");
        let store = JsonFileStore::new(&path);

        for garbage in ["not json", "{\"scores\": [1]}", "[10, -5]", "[1.5]", ""] {
            std::fs::write(&path, garbage).unwrap();
            assert!(store.load().is_err(), "accepted {garbage:?}");
            assert!(load_or_default(&store).is_empty());
        }
    }

    #[test]
    fn test_memory_store_shares_state() {
        let store = MemoryStore::with_scores(vec![40]);
        let mut writer = store.clone();

        assert_eq!(writer.load().unwrap(), vec![40]);
        writer.save(&[90, 40]).unwrap();

        assert_eq!(store.scores(), vec![90, 40]);
        assert_eq!(store.save_count(), 1);
    }
}
