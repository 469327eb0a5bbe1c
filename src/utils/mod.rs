//! Cross-platform utilities
//!
//! - [`fs`] - async directory creation, atomic writes, create-only writes
//! - [`platform`] - home directory, `~`/`$VAR` expansion, `PATH` lookup

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, write_new_file};
pub use platform::{expand_path, find_program, get_home_dir};
