pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod height;
pub mod look;
pub mod playback;
pub mod render_loop;
pub mod schedule;
pub mod session;
pub mod spectrum;
pub mod state;
pub mod video;

pub use config::*;
pub use error::VizError;
pub use field::*;
pub use height::*;
pub use look::*;
pub use playback::*;
pub use render_loop::*;
pub use schedule::*;
pub use session::*;
pub use spectrum::*;
pub use state::*;
pub use video::*;

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
