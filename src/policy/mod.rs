//! Assembly policy definitions.

pub mod v1;
pub mod window;

pub use v1::{AssemblyPolicy, ScanMode, PolicyError};
pub use window::AcceptanceWindow;
