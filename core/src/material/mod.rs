//! Shape materials.
//!
//! - [`SgMaterial`] - ambient/diffuse/specular surface description whose
//!   `Default` value is the format's implicit material

mod types;

pub use types::SgMaterial;
