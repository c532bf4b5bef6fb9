use indicatif::{ProgressBar, ProgressStyle};

/// Receives one `advance` per finished host.
///
/// The runner drives a sink from its own consumer task, so a slow sink never
/// holds up the probes.
pub trait ProgressSink: Send + 'static {
    fn advance(&mut self);

    /// Called once after the last `advance` of a run.
    fn finish(&mut self) {}
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&mut self) {}
}

impl ProgressSink for ProgressBar {
    fn advance(&mut self) {
        self.inc(1);
    }

    fn finish(&mut self) {
        self.finish_and_clear();
    }
}

/// Count bar for `len` hosts: `checking sites [#####     ] 7/23`.
pub fn site_bar(len: u64, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(message);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
