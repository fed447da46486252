//! `cmaker completions <shell>`: print a completion script to stdout.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::shells;

use crate::{
    cli::{Cli, CompletionsArgs, Shell},
    error::CliResult,
};

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    write_script(args.shell, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Generate the script for `shell` under the command's own name, so the
/// script keeps working if the binary is renamed in `Cli`.
fn write_script(shell: Shell, out: &mut dyn Write) -> io::Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_owned();

    match shell {
        Shell::Bash => clap_complete::generate(shells::Bash, &mut cmd, name, out),
        Shell::Zsh => clap_complete::generate(shells::Zsh, &mut cmd, name, out),
        Shell::Fish => clap_complete::generate(shells::Fish, &mut cmd, name, out),
        Shell::PowerShell => clap_complete::generate(shells::PowerShell, &mut cmd, name, out),
        Shell::Elvish => clap_complete::generate(shells::Elvish, &mut cmd, name, out),
    }
    Ok(())
}
