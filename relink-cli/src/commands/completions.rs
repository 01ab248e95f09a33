//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "relink";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# Generating {} completion script", self.shell);
                eprintln!("# Install with:");
                eprintln!("#   {hint}");
                eprintln!();
            }
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

/// Where the script for `shell` usually goes.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some("relink completions bash > ~/.local/share/bash-completion/completions/relink"),
        Shell::Zsh => Some("relink completions zsh > ~/.zsh/completions/_relink"),
        Shell::Fish => Some("relink completions fish > ~/.config/fish/completions/relink.fish"),
        Shell::PowerShell => Some("relink completions powershell >> $PROFILE"),
        _ => None,
    }
}
