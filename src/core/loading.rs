/// Progress of the mount tasks shown by the loading overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingTracker {
    completed: u32,
    total: u32,
}

impl LoadingTracker {
    pub fn new(total: u32) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    /// Mark one task done. Extra completions are ignored.
    pub fn complete_one(&mut self) {
        self.completed = (self.completed + 1).min(self.total);
    }

    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        (self.completed as f32 / self.total as f32 * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }

    pub fn label(&self) -> String {
        format!("Loading {:.0}%", self.percent())
    }

    /// CSS width for the progress bar fill.
    pub fn bar_width(&self) -> String {
        format!("{:.0}%", self.percent())
    }
}
