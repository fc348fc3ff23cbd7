// Terminal rendering of the dashboard

use crate::context::TaskContext;
use crate::filter::FilterCriterion;
use crate::models::Task;
use colored::Colorize;
use eyre::Result;
use std::io::Write;
use tracing::error;

pub const TITLE: &str = "TaskZen Dashboard";
pub const EMPTY_MESSAGE: &str = "No tasks found.";
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please refresh.";

/// Filter bar with the active criterion highlighted
pub fn render_filters<W: Write>(active: FilterCriterion, out: &mut W) -> Result<()> {
    let buttons: Vec<String> = FilterCriterion::ALL
        .iter()
        .map(|criterion| {
            if *criterion == active {
                criterion.label().bold().underline().to_string()
            } else {
                criterion.label().to_string()
            }
        })
        .collect();
    writeln!(out, "{}", buttons.join(" "))?;
    Ok(())
}

/// One line per task, completed ones struck through
pub fn render_tasks<W: Write>(tasks: &[Task], out: &mut W) -> Result<()> {
    if tasks.is_empty() {
        writeln!(out, "{}", EMPTY_MESSAGE)?;
        return Ok(());
    }

    for task in tasks {
        let line = format!("✅ {}", task.title);
        if task.completed {
            writeln!(out, "{}", line.strikethrough())?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

pub fn render_dashboard<W: Write>(ctx: &TaskContext, out: &mut W) -> Result<()> {
    writeln!(out, "{}", TITLE.bold())?;
    render_filters(ctx.filter().criterion(), out)?;
    render_tasks(&ctx.visible_tasks(), out)?;
    Ok(())
}

/// Visible tasks as a JSON array
pub fn render_json<W: Write>(ctx: &TaskContext, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &*ctx.visible_tasks())?;
    writeln!(out)?;
    Ok(())
}

/// Catches render failures and substitutes a fallback message
///
/// Output of a failed render is discarded, never partially written. Once a
/// failure has been caught the boundary keeps showing the fallback.
#[derive(Debug, Default)]
pub struct ErrorBoundary {
    tripped: bool,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_error(&self) -> bool {
        self.tripped
    }

    pub fn render<W, F>(&mut self, out: &mut W, render: F) -> Result<()>
    where
        W: Write,
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        if !self.tripped {
            let mut buf = Vec::new();
            match render(&mut buf) {
                Ok(()) => {
                    out.write_all(&buf)?;
                    return Ok(());
                }
                Err(e) => {
                    error!(error = ?e, "Error caught in ErrorBoundary");
                    self.tripped = true;
                }
            }
        }

        writeln!(out, "{}", FALLBACK_MESSAGE)?;
        Ok(())
    }
}
