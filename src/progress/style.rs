//! Progress bar styling and configuration options.
//!
//! The main bar counts URLs across the whole run; child bars follow the
//! batch each worker is currently processing.
//!
//! # Examples
//!
//! ```rust
//! use imagedl::progress::{ProgressBarOpts, StyleOptions};
//!
//! let style_options = StyleOptions::new(
//!     ProgressBarOpts::new(
//!         Some("[{bar:40.cyan/blue}] {pos}/{len} {msg}".to_string()),
//!         Some(ProgressBarOpts::CHARS_FINE.to_string()),
//!         true,
//!         false,
//!     ),
//!     ProgressBarOpts::with_batch_style(),
//! );
//! assert!(style_options.is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

/// Bars shown while a run is in progress.
///
/// The URL counter stays on screen after the run; worker bars vanish as soon
/// as their batch is done.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub(crate) main: ProgressBarOpts,
    pub(crate) child: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            main: ProgressBarOpts {
                template: Some(ProgressBarOpts::TEMPLATE_BAR_WITH_POSITION.into()),
                progress_chars: Some(ProgressBarOpts::CHARS_FINE.into()),
                enabled: true,
                clear: false,
            },
            child: ProgressBarOpts::with_batch_style(),
        }
    }
}

impl StyleOptions {
    /// Create new [`StyleOptions`].
    pub fn new(main: ProgressBarOpts, child: ProgressBarOpts) -> Self {
        Self { main, child }
    }

    /// Style options with every bar hidden.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
    }

    /// Whether any bar will be drawn at all.
    pub fn is_enabled(&self) -> bool {
        self.main.enabled || self.child.enabled
    }

    /// Options of the URL counter.
    pub fn main(&self) -> &ProgressBarOpts {
        &self.main
    }

    /// Options of the worker bars.
    pub fn child(&self) -> &ProgressBarOpts {
        &self.child
    }
}

/// Look and lifetime of a single bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// indicatif template; `None` keeps indicatif's default bar.
    template: Option<String>,
    /// At least three characters: done, current, remaining.
    progress_chars: Option<String>,
    pub(crate) enabled: bool,
    /// Remove the bar from the screen when it finishes.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Template representing the bar and its position.
    ///
    ///`███████████████████████████████████████ 11/12 (99%) eta 00:00:02`
    pub const TEMPLATE_BAR_WITH_POSITION: &'static str =
        "{bar:40.blue} {pos:>}/{len} ({percent}%) eta {eta_precise:.blue}";
    /// Template for a worker's current batch.
    ///
    /// `worker 3 ━━━━━━━━━━━━━━━━━━━━╾─────────────────── 12/25`
    pub const TEMPLATE_BATCH: &'static str = "{prefix:>10.dim} {bar:40.green/black} {pos:>}/{len}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Build the indicatif style. An unparsable template falls back to the
    /// default bar.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            style = match style.clone().template(&template) {
                Ok(templated) => templated,
                Err(e) => {
                    warn!("Ignoring invalid progress template {:?}: {}", template, e);
                    style
                }
            };
        }
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Build a bar of `len` steps, hidden when disabled.
    pub fn to_progress_bar(self, len: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let style = self.to_progress_style();
        ProgressBar::new(len).with_style(style)
    }

    /// Worker bar: prefixed with the worker id, cleared when its batch ends.
    pub fn with_batch_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_BATCH.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: true,
        }
    }

    /// A bar that is never drawn.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}
