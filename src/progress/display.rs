//! Progress bar display management and coordination.
//!
//! ```rust
//! use imagedl::progress::{ProgressDisplay, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::hidden());
//! display.add_pending(3);
//!
//! let batch = display.create_batch_progress(0, 3);
//! batch.inc(1);
//! display.increment_main();
//! display.finish_batch(batch);
//! display.finish();
//! ```

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

/// Coordinates the overall URL bar and one bar per in-flight batch.
///
/// The total number of URLs is not known up front, so the main bar grows as
/// batches are accepted by workers.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: MultiProgress,
    /// The main progress bar for overall progress.
    main: ProgressBar,
    /// Style options for progress bars.
    style_options: StyleOptions,
}

impl ProgressDisplay {
    pub fn new(style_options: StyleOptions) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };

        let main = multi.add(style_options.main().clone().to_progress_bar(0));
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// Get the main progress bar.
    pub fn main(&self) -> &ProgressBar {
        &self.main
    }

    /// Accounts for `count` more URLs in the main bar.
    pub fn add_pending(&self, count: usize) {
        self.main.inc_length(count as u64);
    }

    /// Create a bar for a batch of `size` URLs taken by `worker`.
    pub fn create_batch_progress(&self, worker: usize, size: usize) -> ProgressBar {
        let pb = self
            .multi
            .add(self.style_options.child().clone().to_progress_bar(size as u64));
        pb.set_prefix(format!("worker {}", worker));
        pb
    }

    /// Increment the main progress bar by one.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Finish the main bar, clearing or keeping it based on configuration.
    pub fn finish(&self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }

    /// Finish a batch progress bar based on configuration.
    pub fn finish_batch(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
        self.multi.remove(&pb);
    }
}
