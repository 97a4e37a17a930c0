//! The interactive command loop.

use crate::command::{self, Command, HELP};
use crate::tasks::TaskRepo;
use crate::types::TaskView;
use colored::Colorize;
use eyre::Result;
use log::{debug, info};
use std::io::{BufRead, Write};
use std::path::Path;

enum Flow {
    Continue,
    Exit,
}

/// Run the loop until `exit` or end of input.
///
/// Parse and execution failures are reported on `output` and the loop
/// continues; only I/O failures on the streams themselves end it early.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    repo: &TaskRepo<'_>,
    export_path: &Path,
) -> Result<()> {
    writeln!(output, "Task manager ready. Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "{} {}", "✗".red(), e)?;
                continue;
            }
        };

        debug!("Dispatching {:?}", command);
        match dispatch(command, &mut output, repo, export_path)? {
            Flow::Continue => {}
            Flow::Exit => break,
        }
    }

    Ok(())
}

fn dispatch<W: Write>(
    command: Command,
    output: &mut W,
    repo: &TaskRepo<'_>,
    export_path: &Path,
) -> Result<Flow> {
    match command {
        Command::Add(input) => match repo.add(&input) {
            Ok(id) => {
                info!("Added task {}", id);
                writeln!(output, "{} Added task {}", "✓".green(), id)?;
            }
            Err(e) => report(output, &e)?,
        },

        Command::Update { id, input } => match repo.update(id, &input) {
            Ok(0) => writeln!(output, "{}", format!("No task with id {}", id).dimmed())?,
            Ok(_) => {
                info!("Updated task {}", id);
                writeln!(output, "{} Updated task {}", "✓".green(), id)?;
            }
            Err(e) => report(output, &e)?,
        },

        Command::Delete { id } => match repo.remove(id) {
            Ok(0) => writeln!(output, "{}", format!("No task with id {}", id).dimmed())?,
            Ok(_) => {
                info!("Deleted task {}", id);
                writeln!(output, "{} Deleted task {}", "✓".green(), id)?;
            }
            Err(e) => report(output, &e)?,
        },

        Command::List => match repo.list() {
            Ok(views) => {
                if views.is_empty() {
                    writeln!(output, "{}", "No tasks".dimmed())?;
                } else {
                    write!(output, "{}", render_table(&views))?;
                }
                // listing also refreshes the export file
                match repo.export_json(export_path) {
                    Ok(count) => debug!("Exported {} task(s) to {}", count, export_path.display()),
                    Err(e) => report(output, &e)?,
                }
            }
            Err(e) => report(output, &e)?,
        },

        Command::Export => match repo.export_json(export_path) {
            Ok(count) => {
                info!("Exported {} task(s) to {}", count, export_path.display());
                writeln!(
                    output,
                    "{} Exported {} task(s) to {}",
                    "✓".green(),
                    count,
                    export_path.display()
                )?;
            }
            Err(e) => report(output, &e)?,
        },

        Command::Help => writeln!(output, "{}", HELP)?,

        Command::Exit => return Ok(Flow::Exit),
    }

    Ok(Flow::Continue)
}

fn report<W: Write>(output: &mut W, err: &eyre::Report) -> Result<()> {
    writeln!(output, "{} {}", "✗".red(), err)?;
    Ok(())
}

/// Render the listing as a fixed-width text table.
fn render_table(views: &[TaskView]) -> String {
    const HEADERS: [&str; 7] = [
        "id",
        "title",
        "description",
        "due date",
        "status",
        "priority",
        "category",
    ];

    let rows: Vec<[String; 7]> = views
        .iter()
        .map(|v| {
            [
                v.id.to_string(),
                v.title.clone(),
                v.description.clone().unwrap_or_default(),
                v.due_date.map(|d| d.to_string()).unwrap_or_default(),
                v.status.clone(),
                v.priority.clone(),
                v.category.clone(),
            ]
        })
        .collect();

    let mut widths: [usize; 7] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        for _ in cell.chars().count()..*width {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
