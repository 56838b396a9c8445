use colored::*;
use std::io::{self, IsTerminal, Write};

use super::highlight::JsonHighlighter;
use crate::render::{notice_is_logged, DeprecationNotice};
use crate::templates::PayloadTemplate;

/// Print the payload to stdout. Highlighting only applies on a terminal so
/// piped output stays valid JSON.
pub fn display_payload(payload: &str, highlight: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    if highlight && stdout.is_terminal() {
        writeln!(stdout, "{}", JsonHighlighter::new().highlight(payload))?;
    } else {
        writeln!(stdout, "{}", payload)?;
    }
    stdout.flush()
}

/// Print the deprecation advisory unless the log already carries it.
pub fn display_notice(notice: &DeprecationNotice) {
    if notice_is_logged() {
        return;
    }
    eprintln!("{} {}", "Warning:".yellow(), notice);
}

pub fn display_templates(templates: &[&PayloadTemplate]) {
    for template in templates {
        let shapes: Vec<String> = template.tool_shapes.iter().map(|s| s.to_string()).collect();
        let layout = match template.indent {
            Some(width) => format!("pretty/{}", width),
            None => "compact".to_string(),
        };
        println!(
            "{}  {}",
            template.name.cyan(),
            format!("[tools: {}; layout: {}]", shapes.join(", "), layout).dimmed()
        );
        println!("    {}", template.description);
    }
}

pub fn display_error(error: &dyn std::fmt::Display) {
    eprintln!("{} {}", "Error:".red(), error);
}
