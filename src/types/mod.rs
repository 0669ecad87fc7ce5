// ABOUTME: Validated domain types shared by config, platform and deploy.
// ABOUTME: Function names, version tags and image references.

mod function_name;
mod image_ref;
mod version_tag;

pub use function_name::{FunctionName, FunctionNameError};
pub use image_ref::{ImageRef, normalize_registry};
pub use version_tag::{VersionTag, VersionTagError};
