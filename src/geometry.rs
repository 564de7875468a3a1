pub mod curve;
pub mod fit;
