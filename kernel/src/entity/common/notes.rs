use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Notes(String);

impl Notes {
    pub fn new(notes: impl Into<String>) -> Self {
        Self(notes.into())
    }

    /// Blank notes are treated as absent.
    pub fn from_optional(notes: Option<String>) -> Option<Self> {
        notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty())
            .map(Self)
    }
}
