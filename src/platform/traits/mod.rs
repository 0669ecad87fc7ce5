// ABOUTME: Capability traits for the systems a deploy talks to.
// ABOUTME: Defines ImageOps, RegistryOps and FunctionOps plus their shared types.

mod function;
mod image;
mod registry;
mod shared_types;

pub use function::{FunctionError, FunctionOps};
pub use image::{ImageError, ImageOps};
pub use registry::{RegistryError, RegistryOps};
pub use shared_types::*;
