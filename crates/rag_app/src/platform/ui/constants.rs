pub const BOLD: &str = "\x1b[1m";
pub const BOLD_YELLOW: &str = "\x1b[1;33m";
pub const RED: &str = "\x1b[31m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

/// Plain-text stand-in for highlighting when stdout is not a terminal.
pub const HIGHLIGHT_MARKER: &str = "*";
