pub mod settings_loader;

pub use settings_loader::{SettingsLoader, LIST_DELIMITER, PATTERN_DELIMITER};
