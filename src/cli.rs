// src/cli.rs

//! Interactive menu surface.
//!
//! The tool takes no flags or arguments; everything is selected through a
//! numbered menu on stdin. The readers/writers are generic so tests can
//! drive the menu with in-memory buffers.

use std::io::{BufRead, Write};

use anyhow::anyhow;

use crate::errors::Result;

/// One of the six menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Launch the node and restart it whenever it exits.
    Supervise,
    /// Launch the node once and propagate its exit code.
    RunOnce,
    /// Wipe the install directory and reinstall from scratch.
    FreshInstall,
    /// Edit the launch config record.
    UpdateConfig,
    /// Fetch and run the maintainer's fix-up script.
    SelfHeal,
    /// Delete the credential files.
    DeleteCredentials,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Supervise),
            "2" => Some(MenuChoice::RunOnce),
            "3" => Some(MenuChoice::FreshInstall),
            "4" => Some(MenuChoice::UpdateConfig),
            "5" => Some(MenuChoice::SelfHeal),
            "6" => Some(MenuChoice::DeleteCredentials),
            _ => None,
        }
    }
}

/// Print the menu and read a choice, re-prompting on invalid input.
pub fn read_choice<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<MenuChoice> {
    loop {
        writeln!(output)?;
        writeln!(output, "swarmherd — training node launcher")?;
        writeln!(output, "  1) Start node (auto-restart)")?;
        writeln!(output, "  2) Start node (single run)")?;
        writeln!(output, "  3) Fresh install (wipes the node directory)")?;
        writeln!(output, "  4) Update launch configuration")?;
        writeln!(output, "  5) Run remote fix-up")?;
        writeln!(output, "  6) Delete credential files")?;
        write!(output, "Select [1-6]: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(anyhow!("stdin closed before a menu choice was made").into());
        }
        match MenuChoice::parse(&line) {
            Some(choice) => return Ok(choice),
            None => writeln!(output, "invalid choice: {}", line.trim())?,
        }
    }
}

/// Ask the user to confirm a destructive operation by typing `yes`.
pub fn confirm_destructive<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    what: &str,
) -> Result<bool> {
    write!(output, "{what} — type 'yes' to continue: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("yes"))
}
