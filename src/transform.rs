pub mod affine;
pub mod curve;
