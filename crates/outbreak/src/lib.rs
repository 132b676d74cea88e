//! Epidemic propagation and timeline playback engine.
//!
//! Everything here runs synchronously inside a host's per-frame callback. Onset days
//! are fixed once when a [`Session`] is built; after that every frame is a pure
//! function of the playback cursor and the wall clock.

pub mod config;
pub mod dataset;
pub mod driver;
pub mod entity;
pub mod error;
pub mod intensity;
pub mod onset;
pub mod playback;
pub mod session;
pub mod timeline;
pub mod viewport;

pub use config::*;
pub use driver::*;
pub use entity::*;
pub use error::*;
pub use intensity::*;
pub use onset::*;
pub use playback::*;
pub use session::*;
pub use timeline::*;
pub use viewport::*;
