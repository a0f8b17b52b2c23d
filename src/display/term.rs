//! Terminal preview publisher
//!
//! Draws a frame to stdout with crossterm styling so a page can be checked
//! without the physical panel attached. Formats to a `String` first and
//! prints it in one piece.

use std::fmt::Write;

use anyhow::Result;
use async_trait::async_trait;
use crossterm::style::Stylize;

use super::{Color, DisplayPublisher, RenderedLine};

/// Publishes frames as a boxed grid on stdout.
#[derive(Debug, Default)]
pub struct TerminalPublisher;

impl TerminalPublisher {
    pub fn new() -> Self {
        Self
    }
}

/// Style one row of panel text for the terminal.
fn styled(text: &str, color: Color) -> String {
    match color {
        Color::Cyan => format!("{}", text.cyan()),
        Color::Green => format!("{}", text.green()),
        Color::Yellow => format!("{}", text.yellow()),
        Color::Amber => format!("{}", text.dark_yellow()),
        Color::Red => format!("{}", text.red()),
        Color::Magenta => format!("{}", text.magenta()),
        Color::White => text.to_string(),
    }
}

fn frame_to_string(lines: &[RenderedLine]) -> String {
    let width = lines.first().map_or(0, |line| line.text.chars().count());
    let mut out = String::new();
    let _ = writeln!(out, "╭{}╮", "─".repeat(width));
    for line in lines {
        let _ = writeln!(out, "│{}│", styled(&line.text, line.color));
    }
    let _ = writeln!(out, "╰{}╯", "─".repeat(width));
    out
}

#[async_trait]
impl DisplayPublisher for TerminalPublisher {
    async fn publish_full_display(&self, lines: &[RenderedLine]) -> Result<()> {
        print!("{}", frame_to_string(lines));
        Ok(())
    }

    async fn publish_line(&self, row: usize, text: &str, color: Color) -> Result<()> {
        println!("{:>2} │{}│", row, styled(text, color));
        Ok(())
    }
}
