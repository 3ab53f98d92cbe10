//! Shared helpers for CLI integration tests

use assert_cmd::cargo_bin;
use std::path::Path;
use std::process::Command;

/// `warp` command with HOME and the XDG dirs inside `home`
///
/// Keeps the developer's config and templates out of the tests without
/// touching the test process environment.
pub fn warp(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("warp"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env_remove("WARP_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}
