//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod paths;
pub mod settings;
pub mod storage;

pub use paths::{ensure_log_dir, get_log_dir, get_settings_path};
pub use settings::{
    ensure_settings_file, ensure_settings_file_at, load_settings, load_settings_at, load_settings_from,
    SettingsError,
};
pub use storage::{LocalStorage, MemoryStorage, StorageService};
