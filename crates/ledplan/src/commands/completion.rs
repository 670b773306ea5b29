use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, Shell};

pub fn run(shell: Shell) {
    let mut cmd = Cli::command();
    let mut out = std::io::stdout();
    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, "ledplan", &mut out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, "ledplan", &mut out),
        Shell::Fish => generate(shells::Fish, &mut cmd, "ledplan", &mut out),
        Shell::Powershell => generate(shells::PowerShell, &mut cmd, "ledplan", &mut out),
    }
}
