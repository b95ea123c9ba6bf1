pub mod body;
pub mod boundary;
pub mod c_api;
pub mod collision;
pub mod config;
pub mod decay;
pub mod diagnostics;
pub mod error;
pub mod gesture;
pub mod gravity;
pub mod scenario;
pub mod simulation;
pub mod utils;

pub use body::{Body, BodySpec, TrailColor};
pub use boundary::{BoundaryPolicy, Playfield};
pub use config::{CollisionMode, SimConfig};
pub use error::{Result, SimError};
pub use gesture::DragGesture;
pub use scenario::Scenario;
pub use simulation::{step, Simulation, StepReport};
pub use ultraviolet::DVec2;
