pub mod align;
pub mod rotation;
pub mod transform;
