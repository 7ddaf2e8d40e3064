// Page wiring and GPU tuning constants for the web front-end.

// Element ids expected in the host page
pub const FORM_ID: &str = "visualize-form";
pub const URL_INPUT_ID: &str = "video-url";
pub const PRESET_SELECT_ID: &str = "preset";
pub const ERROR_BANNER_ID: &str = "error";
pub const PLAY_BUTTON_ID: &str = "play";
pub const PAUSE_BUTTON_ID: &str = "pause";
pub const RESTART_BUTTON_ID: &str = "restart";
pub const VIZ_CONTAINER_ID: &str = "viz-container";
pub const PLAYER_CONTAINER_ID: &str = "player";

// Player widget
pub const PLAYER_API_URL: &str = "https://www.youtube.com/iframe_api";
pub const PLAYER_API_SCRIPT_ID: &str = "youtube-iframe-api";
pub const PLAYER_API_POLL_MS: i32 = 50;
pub const PLAYER_API_MAX_POLLS: u32 = 200; // ~10 s before giving up
pub const PLAYER_WIDTH: &str = "100%";
pub const PLAYER_HEIGHT: &str = "100%";

// Particle sprites (world units / 0..1)
pub const POINT_SIZE: f32 = 0.04;
pub const POINT_OPACITY: f32 = 0.7;

// Surface clear color
pub const CLEAR_RGB: [f64; 3] = [0.0, 0.0, 0.0];

// Frame-rate summary cadence
pub const FPS_LOG_INTERVAL_SEC: f64 = 5.0;
