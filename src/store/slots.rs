//! Fixed filesystem slots managed by the store.
//!
//! # Layout
//! ```text
//! <home>/.zshrc                     shell init slot
//! <home>/.zsh_cfg/zsh_config.json   structured config slot
//! <slot>.backup                     previous contents of the slot
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the shell init slot, directly under the home directory.
pub const SHELL_INIT_FILE: &str = ".zshrc";

/// Directory under the home directory holding the structured config slot.
pub const CONFIG_DIR: &str = ".zsh_cfg";

/// File name of the structured config slot inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "zsh_config.json";

/// Identifies which slot an operation touched, so multi-slot failures can
/// report the failing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    ShellInit,
    Config,
}

impl Slot {
    /// Path of this slot under the given home directory.
    pub fn path(&self, home: &Path) -> PathBuf {
        match self {
            Slot::ShellInit => home.join(SHELL_INIT_FILE),
            Slot::Config => home.join(CONFIG_DIR).join(CONFIG_FILE),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::ShellInit => write!(f, "{}", SHELL_INIT_FILE),
            Slot::Config => write!(f, "{}", CONFIG_FILE),
        }
    }
}

/// Directory that must exist before the config slot can be written.
pub fn config_dir(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR)
}
