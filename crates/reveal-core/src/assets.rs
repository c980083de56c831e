//! Model and texture decoding.
//!
//! Only the first primitive of the first mesh in a glTF file is used; node
//! transforms are ignored so the geometry stays centred as authored. Strips
//! and fans are unrolled into triangle lists.

use crate::mesh::Mesh;
use glam::{Vec2, Vec3};
use gltf::mesh::Mode;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load glTF {path}: {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },
    #[error("{0} contains no mesh primitive")]
    NoPrimitive(PathBuf),
    #[error("mesh primitive in {0} has no positions")]
    NoPositions(PathBuf),
    #[error("mesh primitive in {path} is drawn as {mode:?}, not triangles")]
    UnsupportedMode { path: PathBuf, mode: Mode },
    #[error("mesh primitive in {0} has no complete triangles")]
    NoTriangles(PathBuf),
    #[error("failed to decode texture {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA8 image ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// 1x1 texture of a single colour.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    pub fn from_image(img: image::DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        }
    }
}

pub fn load_mesh(path: &Path) -> Result<Mesh, AssetError> {
    let (document, buffers, _images) = gltf::import(path).map_err(|source| AssetError::Gltf {
        path: path.to_path_buf(),
        source,
    })?;
    let primitive = document
        .meshes()
        .next()
        .and_then(|m| m.primitives().next())
        .ok_or_else(|| AssetError::NoPrimitive(path.to_path_buf()))?;
    let mode = primitive.mode();
    if !matches!(mode, Mode::Triangles | Mode::TriangleStrip | Mode::TriangleFan) {
        return Err(AssetError::UnsupportedMode {
            path: path.to_path_buf(),
            mode,
        });
    }
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

    let positions: Vec<Vec3> = reader
        .read_positions()
        .ok_or_else(|| AssetError::NoPositions(path.to_path_buf()))?
        .map(Vec3::from)
        .collect();
    let normals = reader
        .read_normals()
        .map(|it| it.map(Vec3::from).collect::<Vec<_>>());
    let uvs = reader
        .read_tex_coords(0)
        .map(|tc| tc.into_f32().map(Vec2::from).collect::<Vec<_>>());
    let indices = reader
        .read_indices()
        .map(|ix| ix.into_u32().collect::<Vec<_>>());
    let indices = match mode {
        Mode::Triangles => indices,
        _ => {
            let order = indices.unwrap_or_else(|| (0..positions.len() as u32).collect());
            Some(triangle_list(mode, &order))
        }
    };

    let mesh = Mesh::new(positions, normals, uvs, indices);
    if mesh.triangle_count() == 0 {
        return Err(AssetError::NoTriangles(path.to_path_buf()));
    }
    log::info!(
        "[assets] {}: {} vertices, {} triangles",
        path.display(),
        mesh.positions.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Unroll a strip or fan index order into a plain triangle list. Strips
/// alternate winding so every triangle keeps the first one's facing. Any
/// other mode is returned as is.
pub fn triangle_list(mode: Mode, order: &[u32]) -> Vec<u32> {
    let count = order.len().saturating_sub(2);
    match mode {
        Mode::TriangleStrip => (0..count)
            .flat_map(|i| {
                if i % 2 == 0 {
                    [order[i], order[i + 1], order[i + 2]]
                } else {
                    [order[i + 1], order[i], order[i + 2]]
                }
            })
            .collect(),
        Mode::TriangleFan => (0..count)
            .flat_map(|i| [order[0], order[i + 1], order[i + 2]])
            .collect(),
        _ => order.to_vec(),
    }
}

pub fn load_texture(path: &Path) -> Result<TextureImage, AssetError> {
    let img = image::open(path).map_err(|source| AssetError::Texture {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TextureImage::from_image(img))
}

pub fn decode_texture(bytes: &[u8]) -> Result<TextureImage, image::ImageError> {
    image::load_from_memory(bytes).map(TextureImage::from_image)
}
