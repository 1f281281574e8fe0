pub mod json_backend;

use std::path::Path;

use crate::{errors::RosterError, roster::Roster};

pub type Result<T> = std::result::Result<T, RosterError>;

/// Abstraction over persistence backends capable of storing roster snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, roster: &Roster, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Roster>;
    fn list(&self) -> Result<Vec<String>>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to the JSON codec when not overridden.
    fn save_to_path(&self, roster: &Roster, path: &Path) -> Result<()> {
        json_backend::save_roster_to_path(roster, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Roster> {
        json_backend::load_roster_from_path(path)
    }
}

pub use json_backend::JsonStorage;
