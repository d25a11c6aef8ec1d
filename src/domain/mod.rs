//! Records exchanged with the upstream services. The gateway reads and
//! forwards these shapes; it does not own their lifecycle.

pub mod data_source;
pub mod event;
pub mod ml;
pub mod resource;

pub use data_source::*;
pub use event::*;
pub use ml::*;
pub use resource::*;
