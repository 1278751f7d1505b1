use std::sync::Arc;

use wortmeister_types::WordEntry;

use crate::storage::{KeyValueStorage, StorageError};

pub const HISTORY_KEY: &str = "german_history";
pub const XP_KEY: &str = "german_xp";

/// Maximum number of saved words
pub const HISTORY_LIMIT: usize = 50;
/// Points granted per successful analysis
pub const XP_PER_ANALYSIS: u64 = 10;

/// Recency-ordered, word-unique list of analyzed entries.
///
/// Sole owner of the `german_history` key: every mutation writes through.
pub struct HistoryStore {
    storage: Arc<dyn KeyValueStorage>,
    entries: Vec<WordEntry>,
}

impl HistoryStore {
    /// Load persisted history. Unreadable data starts an empty history.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StorageError> {
        let entries = match storage.get(HISTORY_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<WordEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(HISTORY_LIMIT);
                    entries
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable history: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        tracing::debug!("Loaded {} history entries", entries.len());
        Ok(Self { storage, entries })
    }

    pub fn get(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put `entry` at the front, dropping any entry with the same word and
    /// anything beyond the limit
    pub fn append(&mut self, entry: WordEntry) -> Result<(), StorageError> {
        self.entries.retain(|existing| existing.word != entry.word);
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
        self.persist()
    }

    /// Delete the entry for `word`. Returns false when nothing matched.
    pub fn remove(&mut self, word: &str) -> Result<bool, StorageError> {
        let before = self.entries.len();
        self.entries.retain(|existing| existing.word != word);

        if self.entries.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Entries whose word or translation contains `filter`, ignoring case
    pub fn search(&self, filter: &str) -> Vec<&WordEntry> {
        filter_entries(&self.entries, filter)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.entries)?;
        self.storage.set(HISTORY_KEY, &raw)
    }
}

/// Case-insensitive match on word or translation, order preserved
pub fn filter_entries<'a>(entries: &'a [WordEntry], filter: &str) -> Vec<&'a WordEntry> {
    let needle = filter.trim().to_lowercase();

    entries
        .iter()
        .filter(|entry| {
            needle.is_empty()
                || entry.word.to_lowercase().contains(&needle)
                || entry.translation.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Experience points counter, sole owner of the `german_xp` key
pub struct ExperienceStore {
    storage: Arc<dyn KeyValueStorage>,
    points: u64,
}

impl ExperienceStore {
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StorageError> {
        let points = match storage.get(XP_KEY)? {
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                tracing::warn!("Resetting unreadable XP value {:?}: {}", raw, e);
                0
            }),
            None => 0,
        };

        Ok(Self { storage, points })
    }

    pub fn get(&self) -> u64 {
        self.points
    }

    /// Add points and persist. Returns the new total.
    pub fn add(&mut self, points: u64) -> Result<u64, StorageError> {
        self.points = self.points.saturating_add(points);
        self.storage.set(XP_KEY, &self.points.to_string())?;
        Ok(self.points)
    }
}

/// History and score together, as mutated by a successful analysis
pub struct LearnerStore {
    pub history: HistoryStore,
    pub experience: ExperienceStore,
}

impl LearnerStore {
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, StorageError> {
        Ok(Self {
            history: HistoryStore::load(storage.clone())?,
            experience: ExperienceStore::load(storage)?,
        })
    }

    /// Save the entry and grant the analysis reward. Returns the new XP total.
    ///
    /// Both updates always apply in memory; the first failed write is
    /// reported.
    pub fn record_analysis(&mut self, entry: WordEntry) -> Result<u64, StorageError> {
        let saved = self.history.append(entry);
        let points = self.experience.add(XP_PER_ANALYSIS);
        saved?;
        points
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::MemoryStorage;

    fn entry(word: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            translation: format!("{word}-en"),
            ..Default::default()
        }
    }

    fn words(store: &HistoryStore) -> Vec<&str> {
        store.get().iter().map(|e| e.word.as_str()).collect()
    }

    fn storage() -> Arc<dyn KeyValueStorage> {
        Arc::new(MemoryStorage::new())
    }

    /// Rejects writes to one key
    struct FailingKey(&'static str, MemoryStorage);

    impl KeyValueStorage for FailingKey {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.1.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.0 {
                return Err(StorageError::InvalidKey(key.to_string()));
            }
            self.1.set(key, value)
        }
    }

    #[test]
    fn test_append_is_most_recent_first() {
        let mut store = HistoryStore::load(storage()).unwrap();
        store.append(entry("Haus")).unwrap();
        store.append(entry("Baum")).unwrap();

        assert_eq!(words(&store), vec!["Baum", "Haus"]);
    }

    #[test]
    fn test_append_existing_word_moves_to_front() {
        let mut store = HistoryStore::load(storage()).unwrap();
        store.append(entry("Haus")).unwrap();
        store.append(entry("Baum")).unwrap();

        let mut updated = entry("Haus");
        updated.translation = "home".to_string();
        store.append(updated).unwrap();

        assert_eq!(words(&store), vec!["Haus", "Baum"]);
        assert_eq!(store.get()[0].translation, "home");
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut store = HistoryStore::load(storage()).unwrap();
        store.append(entry("Haus")).unwrap();
        store.append(entry("haus")).unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_51st_word_evicts_oldest() {
        let mut store = HistoryStore::load(storage()).unwrap();
        for i in 0..HISTORY_LIMIT {
            store.append(entry(&format!("Wort{i}"))).unwrap();
        }
        assert_eq!(store.len(), HISTORY_LIMIT);

        store.append(entry("Neu")).unwrap();

        assert_eq!(store.len(), HISTORY_LIMIT);
        assert_eq!(store.get()[0].word, "Neu");
        assert!(!store.get().iter().any(|e| e.word == "Wort0"));
        assert_eq!(store.get()[HISTORY_LIMIT - 1].word, "Wort1");
    }

    #[test]
    fn test_remove() {
        let storage = storage();
        let mut store = HistoryStore::load(storage.clone()).unwrap();
        store.append(entry("Haus")).unwrap();
        store.append(entry("Baum")).unwrap();

        assert!(store.remove("Haus").unwrap());
        assert!(!store.remove("Haus").unwrap());
        assert_eq!(words(&store), vec!["Baum"]);

        let reloaded = HistoryStore::load(storage).unwrap();
        assert_eq!(words(&reloaded), vec!["Baum"]);
    }

    #[test]
    fn test_history_survives_reload() {
        let storage = storage();
        {
            let mut store = HistoryStore::load(storage.clone()).unwrap();
            store.append(entry("Haus")).unwrap();
            store.append(entry("Maus")).unwrap();
        }

        let reloaded = HistoryStore::load(storage.clone()).unwrap();
        assert_eq!(words(&reloaded), vec!["Maus", "Haus"]);

        let raw = storage.get(HISTORY_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"partOfSpeech\""));
    }

    #[test]
    fn test_corrupt_history_loads_empty() {
        let storage = storage();
        storage.set(HISTORY_KEY, "not json").unwrap();

        let store = HistoryStore::load(storage).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_oversized_history_is_truncated_on_load() {
        let storage = storage();
        let entries: Vec<WordEntry> = (0..60).map(|i| entry(&format!("W{i}"))).collect();
        storage
            .set(HISTORY_KEY, &serde_json::to_string(&entries).unwrap())
            .unwrap();

        let store = HistoryStore::load(storage).unwrap();
        assert_eq!(store.len(), HISTORY_LIMIT);
        assert_eq!(store.get()[0].word, "W0");
    }

    #[test]
    fn test_search_matches_word_or_translation() {
        let mut store = HistoryStore::load(storage()).unwrap();
        store.append(entry("Haus")).unwrap();
        store.append(entry("Baum")).unwrap();
        store.append(entry("Hund")).unwrap();

        let found: Vec<&str> = store.search("h").iter().map(|e| e.word.as_str()).collect();
        assert_eq!(found, vec!["Hund", "Haus"]);

        let found: Vec<&str> = store.search("BAUM-EN").iter().map(|e| e.word.as_str()).collect();
        assert_eq!(found, vec!["Baum"]);

        assert_eq!(store.search("").len(), 3);
    }

    #[test]
    fn test_experience_persists() {
        let storage = storage();
        let mut xp = ExperienceStore::load(storage.clone()).unwrap();
        assert_eq!(xp.get(), 0);
        assert_eq!(xp.add(XP_PER_ANALYSIS).unwrap(), 10);
        assert_eq!(xp.add(XP_PER_ANALYSIS).unwrap(), 20);

        assert_eq!(storage.get(XP_KEY).unwrap().as_deref(), Some("20"));
        assert_eq!(ExperienceStore::load(storage).unwrap().get(), 20);
    }

    #[test]
    fn test_unreadable_experience_loads_zero() {
        let storage = storage();
        storage.set(XP_KEY, "NaN").unwrap();
        assert_eq!(ExperienceStore::load(storage).unwrap().get(), 0);
    }

    #[test]
    fn test_record_analysis() {
        let mut learner = LearnerStore::load(storage()).unwrap();

        assert_eq!(learner.record_analysis(entry("Haus")).unwrap(), 10);
        assert_eq!(learner.record_analysis(entry("Haus")).unwrap(), 20);
        assert_eq!(learner.history.len(), 1);
    }

    #[test]
    fn test_failed_history_write_still_grants_xp() {
        let mut learner =
            LearnerStore::load(Arc::new(FailingKey(HISTORY_KEY, MemoryStorage::new()))).unwrap();

        assert!(learner.record_analysis(entry("Haus")).is_err());
        assert_eq!(learner.history.len(), 1);
        assert_eq!(learner.experience.get(), XP_PER_ANALYSIS);
    }
}
