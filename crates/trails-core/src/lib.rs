pub mod camera;
pub mod constants;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod projector;
pub mod record;
pub mod resolver;
pub mod scene;
pub mod scheduler;
pub mod session;

pub use camera::*;
pub use constants::*;
pub use engine::*;
pub use error::*;
pub use geometry::*;
pub use projector::*;
pub use record::*;
pub use resolver::*;
pub use scene::*;
pub use scheduler::*;
pub use session::*;
