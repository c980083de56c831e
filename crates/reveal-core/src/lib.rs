//! Pointer-driven reveal and ripple effects for a shaded mesh.
//!
//! Platform-agnostic: everything here runs on the host without a GPU. The
//! front-end feeds pointer samples and frame deltas into [`FrameLoop`] and
//! uploads the packed uniform blocks the surfaces expose.

pub mod assets;
pub mod bvh;
pub mod camera;
pub mod config;
pub mod constants;
pub mod frame;
pub mod intersect;
pub mod mesh;
pub mod pointer;
pub mod ray;
pub mod reveal;
pub mod ring;
pub mod surface;
pub mod uniforms;

pub static REVEAL_WGSL: &str = include_str!("../shaders/reveal.wgsl");
pub static RIPPLE_WGSL: &str = include_str!("../shaders/ripple.wgsl");

pub use camera::Camera;
pub use config::{SceneConfig, SceneVariant};
pub use frame::{FrameLoop, HoverEdge, LoadedSurface, PointerSample, Presenter, SlotId};
pub use intersect::{query, IntersectionResult, SurfaceGeometry};
pub use mesh::{Mesh, Vertex};
pub use pointer::PointerTracker;
pub use reveal::{RevealAnimationController, RevealState, SettleMode};
pub use ring::{RingAnimationController, RingState};
pub use surface::{Surface, SurfaceAnimation};
pub use uniforms::{RevealUniforms, RippleUniforms, TextureHandle, UniformSet, UniformValue};
