/// Application configuration

/// Window creation parameters
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
    /// Wait for vertical sync on swap
    pub vsync: bool,
    /// Show the window (hidden windows are used by GPU tests)
    pub visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "OpenGL".to_string(),
            vsync: true,
            visible: true,
        }
    }
}

/// GL Primer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Window parameters
    pub window: WindowConfig,
    /// Requested context version (major, minor), core profile
    pub gl_version: (u8, u8),
    /// Drain and log pending GL errors after every frame
    pub check_errors: bool,
    /// Route driver debug messages to the logger when the context supports it
    pub debug_output: bool,
    /// Color the framebuffer is cleared to every frame (RGBA)
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            gl_version: (3, 3),
            check_errors: cfg!(debug_assertions),
            debug_output: cfg!(debug_assertions),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
