//! Progress display for the batch of workshop items.

use crate::progress::StyleOptions;
use indicatif::ProgressBar;

/// Owns the per-item progress bar of one batch run.
pub struct ProgressDisplay {
    main: ProgressBar,
    clear: bool,
}

impl ProgressDisplay {
    /// Create a bar counting `total_items` identifiers.
    pub fn new(style_options: &StyleOptions, total_items: usize) -> Self {
        let main = style_options
            .main()
            .clone()
            .to_progress_bar(total_items as u64);
        main.tick();

        Self {
            main,
            clear: style_options.main().clear,
        }
    }

    /// Show the identifier being processed.
    pub fn set_current(&self, identifier: &str) {
        self.main.set_message(identifier.to_string());
    }

    /// Count one more processed identifier.
    pub fn increment(&self) {
        self.main.inc(1);
    }

    /// Number of identifiers processed so far.
    pub fn position(&self) -> u64 {
        self.main.position()
    }

    pub fn finish(self) {
        if self.clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish_with_message("done");
        }
    }
}
