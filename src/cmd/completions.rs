//! Completions command implementation
//!
//! Handles the `gates-diff completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

const BIN_NAME: &str = "gates-diff";

/// Generate shell completion scripts for `cmd` on stdout
///
/// # Examples
///
/// ```bash
/// # Bash
/// gates-diff completions bash > /etc/bash_completion.d/gates-diff
///
/// # Zsh
/// gates-diff completions zsh > ~/.zfunc/_gates-diff
///
/// # Fish
/// gates-diff completions fish > ~/.config/fish/completions/gates-diff.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

/// Generate shell completion scripts into `out`
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    generate(shell, cmd, BIN_NAME, out);
}
