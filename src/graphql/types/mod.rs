pub mod data_source;
pub mod inputs;

pub use data_source::*;
pub use inputs::*;
