use winit::dpi::LogicalSize;

/// Window configuration for the studio.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Wait for vertical blank on swap, when the platform allows it.
    pub vsync: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "lantern studio".to_string(),
            initial_size: LogicalSize::new(960.0, 640.0),
            vsync: true,
        }
    }
}
