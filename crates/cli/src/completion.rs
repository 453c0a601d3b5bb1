//! Shell completion generation

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

use crate::Cli;

const BIN_NAME: &str = "trailbrake";

/// Write a completion script for `shell` to stdout.
pub fn generate_completion(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());
}

/// Where to install the script, printed to stderr so stdout stays pipeable.
pub fn print_completion_instructions(shell: Shell) {
    match shell {
        Shell::Bash => {
            eprintln!("# Add to ~/.bashrc:");
            eprintln!("#   eval \"$({BIN_NAME} completion bash)\"");
        }
        Shell::Zsh => {
            eprintln!("# Save into a directory on your fpath:");
            eprintln!("#   {BIN_NAME} completion zsh > ~/.zsh/completions/_{BIN_NAME}");
        }
        Shell::Fish => {
            eprintln!("#   {BIN_NAME} completion fish > ~/.config/fish/completions/{BIN_NAME}.fish");
        }
        Shell::PowerShell => {
            eprintln!("# Add to your PowerShell profile:");
            eprintln!("#   Invoke-Expression (& {BIN_NAME} completion powershell | Out-String)");
        }
        _ => {
            eprintln!("# See your shell's documentation for installing completions.");
        }
    }
}
