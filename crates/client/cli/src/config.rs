//! Viewer configuration read from the environment.
use std::env;

/// Startup settings for the terminal viewer.
///
/// Command-line flags take precedence; these only supply defaults.
#[derive(Clone, Debug, Default)]
pub struct ViewerConfig {
    /// Log session name. A timestamped name is generated when unset.
    pub session_id: Option<String>,
    pub dash_attack: bool,
    pub sample_obstacles: bool,
    pub ui: UiConfig,
}

impl ViewerConfig {
    /// Construct viewer configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TARGET_VIEWER_SESSION_ID` - Log session name
    /// - `TARGET_VIEWER_DASH` - Start with the dash-attack option (default: false)
    /// - `TARGET_VIEWER_SAMPLE_OBSTACLES` - Start with the sample obstacles (default: false)
    /// - `TARGET_VIEWER_CODE_PANEL_WIDTH` - Width of the rule text panel (default: 44)
    pub fn from_env() -> Self {
        let mut config = Self {
            session_id: env::var("TARGET_VIEWER_SESSION_ID")
                .ok()
                .filter(|id| !id.trim().is_empty()),
            ..Self::default()
        };

        if let Some(dash) = read_env::<bool>("TARGET_VIEWER_DASH") {
            config.dash_attack = dash;
        }
        if let Some(sample) = read_env::<bool>("TARGET_VIEWER_SAMPLE_OBSTACLES") {
            config.sample_obstacles = sample;
        }
        if let Some(width) = read_env::<u16>("TARGET_VIEWER_CODE_PANEL_WIDTH") {
            config.ui.code_panel_width = width.max(UiConfig::MIN_CODE_PANEL_WIDTH);
        }

        config
    }
}

/// Layout settings.
#[derive(Clone, Debug)]
pub struct UiConfig {
    /// Width of the rule text panel in columns (including borders).
    pub code_panel_width: u16,
}

impl UiConfig {
    pub const MIN_CODE_PANEL_WIDTH: u16 = 20;
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            code_panel_width: 44,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
