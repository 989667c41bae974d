use std::cell::{Cell, RefCell};

use crate::errors::CoreError;
use crate::models::record::InvestmentRecord;

use super::format;
use super::traits::{LoadOutcome, RecordStore};

/// Keeps the serialized data file in memory.
///
/// Goes through the same JSON encode/decode as [`super::manager::JsonFileStore`],
/// and can be told to fail saves, which makes it handy in tests and for
/// embedding without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: RefCell<Option<String>>,
    fail_saves: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing data file contents.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(json.into())),
            fail_saves: Cell::new(false),
        }
    }

    /// Current serialized contents, `None` if nothing was ever stored.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Make subsequent saves fail with an I/O error until reset.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl RecordStore for MemoryStore {
    fn describe(&self) -> String {
        "in-memory store".to_string()
    }

    fn load(&self) -> Result<LoadOutcome, CoreError> {
        match self.contents.borrow().as_deref() {
            None => Ok(LoadOutcome::default()),
            Some(data) => format::decode(data),
        }
    }

    fn save(&self, records: &[InvestmentRecord]) -> Result<(), CoreError> {
        if self.fail_saves.get() {
            return Err(CoreError::PersistenceIO("simulated write failure".into()));
        }
        let json = format::encode(records, false)?;
        *self.contents.borrow_mut() = Some(json);
        Ok(())
    }
}
