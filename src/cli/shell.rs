//! Interactive session.
//!
//! Each input line is one user action, parsed with a multicall clap parser and
//! run to completion before the next line is read. The ledger lives exactly as
//! long as the shell does.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

use super::render::{write_items, write_ledger, write_summary};
use crate::application::CalculatorSession;
use crate::domain::{ItemField, ListKind};

/// Line that ends a paste.
pub const PASTE_TERMINATOR: &str = ".";

/// `set <list> <id> <field>`; whatever follows is the raw value.
const SET_PREFIX_WORDS: usize = 4;

#[derive(Parser)]
#[command(multicall = true, disable_help_subcommand = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Add a blank expense: add <yearly|monthly>
    Add { list: ListKind },

    /// Change an expense: set <list> <id> <description|amount> <value...>
    Set {
        list: ListKind,
        #[arg(allow_hyphen_values = true)]
        id: String,
        field: ItemField,
    },

    /// Remove an expense: remove <list> <id>
    #[command(alias = "rm")]
    Remove {
        list: ListKind,
        #[arg(allow_hyphen_values = true)]
        id: String,
    },

    /// Set expected annual revenue: revenue <amount>
    Revenue {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Show both lists and the summary
    Show,

    /// Show the summary only
    Totals,

    /// Import a JSON file: import <path>
    Import { path: PathBuf },

    /// Import pasted JSON, ended by a line containing only '.'
    Paste,

    /// Copy the data as JSON to the clipboard
    Copy,

    /// Print the data as JSON, or write it to a file: export [path]
    Export { path: Option<PathBuf> },

    /// Start over with an empty calculation
    Reset,

    /// List commands
    Help,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Run an interactive session until `quit` or end of input.
pub async fn run_shell<R, W>(session: &mut CalculatorSession, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "costcalc shell. Type 'help' for commands, 'quit' to leave.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let (words, value) = match split_line(&line) {
            Ok(split) => split,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };
        if words.is_empty() {
            continue;
        }

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e)?;
                continue;
            }
        };

        if let Flow::Quit = execute(session, command, value, &mut lines, out).await? {
            break;
        }
    }
    Ok(())
}

async fn execute<R, W>(
    session: &mut CalculatorSession,
    command: ShellCommand,
    value: &str,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<Flow>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match command {
        ShellCommand::Add { list } => {
            let item = session.add_item(list);
            writeln!(out, "Added {} expense {}", list, item.id)?;
        }

        ShellCommand::Set { list, id, field } => {
            match session.update_item(list, &id, field, value) {
                Ok(()) => {
                    writeln!(out, "Updated {} of {} expense {}", field, list, id)?;
                    write_items(out, session.ledger(), list, session.currency())?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            }
        }

        ShellCommand::Remove { list, id } => match session.remove_item(list, &id) {
            Ok(_) => writeln!(out, "Removed {} expense {}", list, id)?,
            Err(e) => writeln!(out, "{}", e)?,
        },

        ShellCommand::Revenue { value } => {
            let revenue = session.set_revenue(&value);
            writeln!(out, "Revenue set to {}", session.currency().format(revenue))?;
        }

        ShellCommand::Show => {
            write_ledger(out, session.ledger(), &session.summary(), session.currency())?;
        }

        ShellCommand::Totals => write_summary(out, &session.summary())?,

        ShellCommand::Import { path } => {
            let note = session.import_file_notify(&path).await;
            writeln!(out, "{}", note)?;
        }

        ShellCommand::Paste => {
            writeln!(
                out,
                "Paste JSON, then finish with a line containing only '{}'.",
                PASTE_TERMINATOR
            )?;
            out.flush()?;
            let text = read_paste(lines).await?;
            if text.trim().is_empty() {
                writeln!(out, "Paste cancelled")?;
            } else {
                let note = session.import_text_notify(&text);
                writeln!(out, "{}", note)?;
            }
        }

        ShellCommand::Copy => {
            let note = session.copy_to_clipboard_notify().await;
            writeln!(out, "{}", note)?;
        }

        ShellCommand::Export { path } => match session.export_json() {
            Ok(json) => match path {
                Some(path) => match tokio::fs::write(&path, format!("{}\n", json)).await {
                    Ok(()) => writeln!(out, "Exported to {}", path.display())?,
                    Err(e) => writeln!(out, "Failed to write {}: {}", path.display(), e)?,
                },
                None => writeln!(out, "{}", json)?,
            },
            Err(e) => writeln!(out, "{}", e)?,
        },

        ShellCommand::Reset => {
            session.reset();
            writeln!(out, "Started a new calculation")?;
        }

        ShellCommand::Help => write_help(out)?,

        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Split off the next word. Single or double quotes group text containing spaces.
fn next_word(input: &str) -> Result<Option<(String, &str)>, String> {
    let input = input.trim_start();
    if input.is_empty() {
        return Ok(None);
    }

    let mut word = String::new();
    let mut quote = None;
    for (i, c) in input.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => word.push(c),
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c.is_whitespace() => return Ok(Some((word, &input[i..]))),
            None => word.push(c),
        }
    }

    match quote {
        Some(q) => Err(format!("unterminated {} quote", q)),
        None => Ok(Some((word, ""))),
    }
}

/// Words for the command parser, plus the untouched text after `set <list> <id> <field>`.
fn split_line(line: &str) -> Result<(Vec<String>, &str), String> {
    let mut words = Vec::new();
    let mut rest = line;
    while let Some((word, remainder)) = next_word(rest)? {
        words.push(word);
        rest = remainder;
        if words.len() == SET_PREFIX_WORDS && words[0] == "set" {
            return Ok((words, rest.trim()));
        }
    }
    Ok((words, ""))
}

async fn read_paste<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>) -> Result<String> {
    let mut text = String::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == PASTE_TERMINATOR {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    debug!(bytes = text.len(), "read pasted text");
    Ok(text)
}

fn write_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    for sub in ShellLine::command().get_subcommands() {
        let about = sub.get_about().map(|a| a.to_string()).unwrap_or_default();
        writeln!(out, "  {:<10} {}", sub.get_name(), about)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_keeps_set_value_raw() {
        let (words, value) = split_line("set yearly 1 description -- Peter's  Büro ").unwrap();
        assert_eq!(words, ["set", "yearly", "1", "description"]);
        assert_eq!(value, "-- Peter's  Büro");
    }

    #[test]
    fn test_split_line_quoted_words() {
        let (words, value) = split_line("remove monthly \"a b\"").unwrap();
        assert_eq!(words, ["remove", "monthly", "a b"]);
        assert_eq!(value, "");

        let (words, _) = split_line("set yearly 'x y' amount 5").unwrap();
        assert_eq!(words[2], "x y");
    }

    #[test]
    fn test_split_line_unterminated_quote() {
        assert!(split_line("remove yearly \"a b").is_err());
        assert_eq!(split_line("   ").unwrap().0.len(), 0);
    }
}
