//! Stage progress bar for a single prediction run

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::pipeline::Stage;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows which pipeline stage is running
pub struct StageProgress {
    bar: ProgressBar,
    started: u64,
}

impl Default for StageProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl StageProgress {
    /// Create a bar sized to every pipeline stage
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(Stage::ALL.len() as u64))
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_length(Stage::ALL.len() as u64);
        bar.set_style(STAGE_STYLE.clone());
        Self { bar, started: 0 }
    }

    /// Record that `stage` has begun; earlier stages count as complete
    pub fn start(&mut self, stage: Stage) {
        self.bar.set_position(self.started);
        self.bar.set_message(stage.to_string());
        self.started += 1;
    }

    /// Number of stages started so far
    pub const fn stages_started(&self) -> u64 {
        self.started
    }

    /// Mark every stage complete and clear the bar
    pub fn finish(&self) {
        self.bar.set_position(Stage::ALL.len() as u64);
        self.bar.finish_and_clear();
    }
}
