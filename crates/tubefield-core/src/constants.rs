// Shared animation/layout tuning constants used by the web frontend and tests.

// Field layout
pub const PARTICLE_COUNT: usize = 12_100; // 110 x 110, a full grid
pub const GRID_EXTENT: f32 = 16.0; // world-space width of the square grid
pub const SPIRAL_LOOPS: f32 = 12.0;
pub const SPIRAL_MAX_RADIUS: f32 = 8.0;

// Pseudo-spectrum
pub const SPECTRUM_LEN: usize = 128;
pub const SPECTRUM_INTERVAL_MS: u32 = 16; // spectrum cadence, decoupled from frames

// Render clock
pub const RENDER_STEP_SEC: f64 = 0.016; // nominal per-frame advance

// Analytic wave
pub const VOLATILITY: f32 = 2.5;
pub const NOISE_TABLE_LEN: usize = 50;
pub const NOISE_REFRESH_PROBABILITY: f64 = 0.1; // per frame

// Radial wave
pub const RADIAL_SPEED: f32 = 1.5;

// Spectrum-driven variants
pub const SPECTRUM_GAIN: f32 = 3.0;
pub const GRID_RIPPLE: f32 = 0.3;
pub const SPIRAL_RIPPLE: f32 = 0.1;

// Color
pub const BASE_HUE: f32 = 0.5; // cyan
pub const HUE_STEP: f32 = 0.1;
pub const SPECTRUM_HUE_SPAN: f32 = 0.35;
pub const SATURATION: f32 = 0.8;
pub const BASE_LIGHTNESS: f32 = 0.4;
pub const LIGHTNESS_SWING: f32 = 0.2;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const FIXED_EYE: [f32; 3] = [0.0, 3.0, 12.0];
pub const FIELD_SWAY: f32 = 0.2; // max field yaw (radians) for the fixed rig
pub const ORBIT_RADIUS: f32 = 10.0;
pub const ORBIT_HEIGHT: f32 = 4.0;
pub const ORBIT_RATE: f64 = 0.002; // radians per tick while playing
pub const ORBIT_LEAD: f64 = 0.3; // look-ahead angle along the spiral

// Playback widget volume range
pub const MAX_WIDGET_VOLUME: f64 = 100.0;
