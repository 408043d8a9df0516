//! Progress indicators
//!
//! Bars draw to stderr and hide themselves when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for a known number of output files
pub fn file_progress(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len} files")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);
    pb
}

/// Print a line above the bar without breaking its rendering
pub fn println(pb: &ProgressBar, message: impl AsRef<str>) {
    if pb.is_hidden() {
        println!("{}", message.as_ref());
    } else {
        pb.println(message);
    }
}

/// Finish a progress bar with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Finish a progress bar with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.abandon_with_message(format!("✗ {}", message));
}
