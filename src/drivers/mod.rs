// src/drivers/mod.rs
pub mod buffer;
pub mod error;
pub mod plot;
pub mod serial;
pub mod source;
pub use buffer::{Series, ViewWindow};
pub use error::StripchartError;
pub use plot::{save_snapshot, PlotStyle};
pub use serial::{available_port_names, default_port_name, write_port_listing, SerialSettings};
pub use source::{SampleSource, SimulatedSource};
#[cfg(test)]
pub use source::{LineSource, ManualSource};
