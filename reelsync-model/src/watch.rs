/// Watch progress percentage
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchProgress(f32);

impl WatchProgress {
    /// Create a new watch progress, clamping between 0.0 and 1.0
    pub fn new(progress: f32) -> Self {
        WatchProgress(progress.clamp(0.0, 1.0))
    }

    pub fn from_position(position: f64, duration: f64) -> Self {
        if duration > 0.0 {
            WatchProgress::new((position / duration) as f32)
        } else {
            WatchProgress(0.0)
        }
    }

    /// Get the progress as a percentage (0.0 to 1.0)
    pub fn as_percentage(&self) -> f32 {
        self.0
    }

    /// Check if this item is considered completed (>95%)
    pub fn is_completed(&self) -> bool {
        self.0 > 0.95
    }

    /// Check if this item has been started
    pub fn is_started(&self) -> bool {
        self.0 > 0.0
    }
}
