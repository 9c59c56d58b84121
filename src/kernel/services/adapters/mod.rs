//! Service adapters: OS specific implementations (filesystem, directories).

pub mod app_dir;
pub mod settings;

pub use app_dir::{ensure_log_dir, get_log_dir};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
