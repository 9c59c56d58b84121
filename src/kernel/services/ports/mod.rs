//! Service ports: data contracts shared by the kernel and adapters.

pub mod settings;

pub use settings::JumpSettings;
