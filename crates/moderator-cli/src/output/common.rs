// SPDX-License-Identifier: Apache-2.0

//! Common UX helpers for consistent display across commands.

use std::io::{self, Write};

use console::{StyledObject, style};
use moderator_core::Action;

/// Styles an action: red for close, yellow for skip, green for none.
pub fn styled_action(action: Action) -> StyledObject<&'static str> {
    let label = action.as_str();
    match action {
        Action::Close => style(label).red().bold(),
        Action::Skip => style(label).yellow(),
        Action::None => style(label).green(),
    }
}

/// Writes a titled bullet list, or `empty_msg` when there are no items.
///
/// # Errors
/// Returns error if write operation fails.
pub fn write_list<W: Write + ?Sized>(
    w: &mut W,
    title: &str,
    items: &[String],
    empty_msg: &str,
) -> io::Result<()> {
    writeln!(w, "  {}", style(title).cyan().bold())?;
    if items.is_empty() {
        writeln!(w, "    {}", style(empty_msg).dim())?;
    } else {
        for item in items {
            writeln!(w, "    {} {item}", style("-").dim())?;
        }
    }
    Ok(())
}

/// Writes `text` indented by four spaces, dimmed.
///
/// # Errors
/// Returns error if write operation fails.
pub fn write_indented<W: Write + ?Sized>(w: &mut W, text: &str) -> io::Result<()> {
    for line in text.lines() {
        if line.is_empty() {
            writeln!(w)?;
        } else {
            writeln!(w, "    {}", style(line).dim())?;
        }
    }
    Ok(())
}

/// Display dry-run message to a writer.
///
/// # Errors
/// Returns error if write operation fails.
pub fn show_dry_run_message<W: Write + ?Sized>(w: &mut W, message: &str) -> io::Result<()> {
    writeln!(w, "{}", style(message).yellow())
}
