//! Environment isolation utilities for testing
//!
//! Config lookup reads `WARP_CONFIG` and the platform config/data
//! directories, so tests touching them must not see the developer's setup.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: [&str; 4] = ["HOME", "XDG_CONFIG_HOME", "XDG_DATA_HOME", "WARP_CONFIG"];

/// Run a test with an isolated home directory
///
/// While `f` runs:
/// 1. `HOME` points to a fresh temp dir (passed to `f`)
/// 2. `XDG_CONFIG_HOME` / `XDG_DATA_HOME` point to `.config` / `.local/share` inside it
/// 3. `WARP_CONFIG` is unset
///
/// The previous values are restored afterwards. Calls are serialized through
/// [`ENV_LOCK`], which recovers from poisoning.
///
/// # Examples
///
/// ```no_run
/// use warp_testkit::with_isolated_warp_env;
///
/// with_isolated_warp_env(|home| {
///     std::fs::create_dir_all(home.join(".config/warp")).unwrap();
/// });
/// ```
pub fn with_isolated_warp_env<F, R>(f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = ENV_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let original: Vec<(&str, Option<String>)> = ISOLATED_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    let fake_home = TempDir::new().expect("Failed to create fake HOME");
    let home = PathBuf::from(fake_home.path());
    let config_home = home.join(".config");
    let data_home = home.join(".local").join("share");
    std::fs::create_dir_all(&config_home).expect("Failed to create fake config dir");
    std::fs::create_dir_all(&data_home).expect("Failed to create fake data dir");

    // SAFETY: We hold ENV_LOCK, so no other test modifies the environment concurrently.
    unsafe {
        std::env::set_var("HOME", &home);
        std::env::set_var("XDG_CONFIG_HOME", &config_home);
        std::env::set_var("XDG_DATA_HOME", &data_home);
        std::env::remove_var("WARP_CONFIG");
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&home)));

    // SAFETY: We still hold ENV_LOCK.
    unsafe {
        for (name, value) in original {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    drop(fake_home);

    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
