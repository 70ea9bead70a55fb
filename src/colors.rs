use std::io::{self, IsTerminal};

use crate::status::Status;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";

/// ANSI escapes for terminal output; every escape is empty when disabled.
#[derive(Clone, Copy)]
pub struct Colors {
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn pick(&self, code: &'static str) -> &'static str {
        if self.enabled {
            code
        } else {
            ""
        }
    }

    pub fn status(&self, status: Status) -> &'static str {
        self.pick(match status {
            Status::Success => GREEN,
            Status::Info => CYAN,
            Status::Error => RED,
        })
    }

    pub fn heading(&self) -> &'static str {
        self.pick(BOLD)
    }

    pub fn reset(&self) -> &'static str {
        self.pick(RESET)
    }
}

pub fn should_use_colors(force_color: bool, no_color: bool) -> bool {
    // Priority: --no-color > --color > NO_COLOR env > TTY detection
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    io::stdout().is_terminal()
}
