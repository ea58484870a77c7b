//! Process-wide registry of named dictionaries.
//!
//! Dictionaries are immutable once registered and handed out as `Arc`s, so a
//! lookup never holds the lock while segmenting. A name can be registered only
//! once; later loads under the same name are rejected.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};

static GLOBAL: Lazy<DictionaryRegistry> = Lazy::new(DictionaryRegistry::new);

/// Map from dictionary name to dictionary
#[derive(Debug, Default)]
pub struct DictionaryRegistry {
    dicts: RwLock<HashMap<String, Arc<Dictionary>>>,
}

impl DictionaryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        DictionaryRegistry::default()
    }

    /// The registry shared by the whole process
    pub fn global() -> &'static DictionaryRegistry {
        &GLOBAL
    }

    /// Read `path` and register it under `name`.
    ///
    /// The file is read without holding the lock; the name is checked again
    /// when inserting, so two concurrent loads of one name register only one.
    pub fn try_load<P: AsRef<Path>>(&self, path: P, name: &str) -> Result<Arc<Dictionary>> {
        if self.contains(name) {
            return Err(Error::DictionaryExists(name.to_string()));
        }
        let dict = Dictionary::from_file(path)?;
        self.insert(name, dict)
    }

    /// Register an already built dictionary, unless the name is taken
    pub fn insert(&self, name: &str, dict: Dictionary) -> Result<Arc<Dictionary>> {
        let mut dicts = self.dicts.write();
        if dicts.contains_key(name) {
            return Err(Error::DictionaryExists(name.to_string()));
        }
        let dict = Arc::new(dict);
        dicts.insert(name.to_string(), Arc::clone(&dict));
        Ok(dict)
    }

    /// Load a dictionary file and report the outcome as a status message
    pub fn load<P: AsRef<Path>>(&self, path: P, name: &str) -> (String, bool) {
        let path = path.as_ref();
        match self.try_load(path, name) {
            Ok(dict) => {
                log::info!(
                    "loaded dictionary {name} from {} ({} words)",
                    path.display(),
                    dict.len()
                );
                (
                    format!(
                        "Successful: file {} has been successfully loaded to dictionary named {name}.",
                        path.display()
                    ),
                    true,
                )
            }
            Err(Error::DictionaryExists(_)) => {
                log::warn!("dictionary {name} is already registered");
                (
                    format!("Failed: dictionary name {name} already exists, please use another name."),
                    false,
                )
            }
            Err(e) => {
                log::warn!("failed to load dictionary {name}: {e}");
                (
                    format!(
                        "Failed: file {} has not been loaded to dictionary named {name} (error: {e}).",
                        path.display()
                    ),
                    false,
                )
            }
        }
    }

    /// Look up a dictionary by name
    pub fn get(&self, name: &str) -> Result<Arc<Dictionary>> {
        self.dicts
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::DictionaryNotFound(name.to_string()))
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.dicts.read().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.dicts.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::thread;

    fn word_file(words: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{words}").unwrap();
        file
    }

    #[test]
    fn test_load_and_get() {
        let registry = DictionaryRegistry::new();
        let file = word_file("ไข่\nคน\n");

        let (msg, ok) = registry.load(file.path(), "eggs");
        assert!(ok);
        assert!(msg.starts_with("Successful:"));
        assert!(msg.ends_with("dictionary named eggs."));

        let dict = registry.get("eggs").unwrap();
        assert!(dict.contains("ไข่"));
        assert_eq!(registry.names(), vec!["eggs".to_string()]);
    }

    #[test]
    fn test_duplicate_name_does_not_override() {
        let registry = DictionaryRegistry::new();
        let first = word_file("หนึ่ง\n");
        let second = word_file("สอง\n");

        assert!(registry.load(first.path(), "numbers").1);
        let (msg, ok) = registry.load(second.path(), "numbers");
        assert!(!ok);
        assert_eq!(
            msg,
            "Failed: dictionary name numbers already exists, please use another name."
        );

        let dict = registry.get("numbers").unwrap();
        assert!(dict.contains("หนึ่ง"));
        assert!(!dict.contains("สอง"));
    }

    #[test]
    fn test_missing_file() {
        let registry = DictionaryRegistry::new();
        let (msg, ok) = registry.load("/nonexistent/thongna.txt", "missing");
        assert!(!ok);
        assert!(msg.starts_with("Failed: file /nonexistent/thongna.txt has not been loaded"));
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn test_unknown_name() {
        let registry = DictionaryRegistry::new();
        assert!(matches!(
            registry.get("nope"),
            Err(Error::DictionaryNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_concurrent_inserts_register_once() {
        let registry = Arc::new(DictionaryRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let dict = Dictionary::from_words([format!("คำ{i}")]);
                    registry.insert("shared", dict).is_ok()
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(registry.get("shared").unwrap().len(), 1);
    }
}
