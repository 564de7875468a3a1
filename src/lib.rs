//! Eyeframe renders custom eyewear frame designs into PNG previews.
//!
//! A design stores the left half of the frame front as fixed-point point curves. Rendering turns
//! those curves into pixels in a fixed order:
//!
//! 1. **Place**: convert to millimeters, scale by the output density, mirror the left half about
//!    the symmetry axis, and translate both halves by one shared [`Placement`].
//! 2. **Fit**: smooth every point curve into cubic Bezier segments ([`fit_beziers`]).
//! 3. **Rasterize**: fill and stroke the outline with the material color and record the lens
//!    holes (`vello_cpu`).
//! 4. **Composite**: substitute the material texture into the fill region, then clear the lenses.
//! 5. **Encode / publish**: PNG bytes, optionally written atomically to a [`RenderStore`].
//!
//! The render stages are separate types ([`FilledFrame`] through [`ResolvedFrame`]) so they can
//! only run in order. Texture failures never fail a render; they fall back to the flat fill.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod encode;
mod foundation;
mod geometry;
mod model;
mod render;

/// Curve scaling, mirroring and canvas placement.
pub mod transform;

pub use assets::decode::decode_texture;
pub use assets::texture::{FsTextureLoader, TextureLoader, normalize_rel_path};
pub use config::{ENV_PIXELS_PER_MM, ENV_STATIC_FILES, KeyingMode, RenderConfig, StoreConfig};
pub use encode::png::encode_png;
pub use encode::store::RenderStore;
pub use foundation::core::{
    Affine, BezPath, Canvas, CubicBez, Line, MAX_CANVAS_EDGE, Point, Rgba8, Vec2,
};
pub use foundation::error::{EyeframeError, EyeframeResult};
pub use geometry::curve::{Curve, FixedPoint, MIN_CLOSED_POINTS, MIN_OPEN_POINTS};
pub use geometry::fit::{FitOptions, fit_beziers, reverse_run};
pub use model::{DesignRecord, Front, MaterialAppearance, MaterialRecord, Temple};
pub use render::composite::{Region, RegionMask};
pub use render::frame::{CarvedFrame, FilledFrame, FrameStyle, ResolvedFrame, TexturedFrame};
pub use render::path::{closed_runs_path, outline_path};
pub use render::pipeline::{
    CancelToken, FrameGeometry, RenderJob, RenderMetadata, RenderResult, layout_front, render,
    render_and_publish, render_many,
};
pub use transform::curve::{MirroredPair, Placement};
