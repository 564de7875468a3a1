pub mod composite;
pub mod frame;
pub mod path;
pub mod pipeline;
pub mod raster;
