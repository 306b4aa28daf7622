use std::cell::RefCell;
use std::path::{Path, PathBuf};

use futures::channel::oneshot;
use glam::{Mat4, Vec3};
use log::debug;

use crate::error::LoadError;
use crate::model::{Asset, AssetMesh, Material};

pub type LoadResult = Result<Asset, LoadError>;

/// Fetches and parses an asset somewhere else, answering exactly once.
pub trait AssetTransport {
    fn fetch(&self, url: &str) -> oneshot::Receiver<LoadResult>;
}

/// Reads `.glb` files from disk on a worker thread
#[derive(Clone, Debug, Default)]
pub struct FileTransport {
    pub root: Option<PathBuf>,
}

impl FileTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let path = url.strip_prefix("file://").unwrap_or(url);
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl AssetTransport for FileTransport {
    fn fetch(&self, url: &str) -> oneshot::Receiver<LoadResult> {
        let (sender, receiver) = oneshot::channel();
        let source = url.to_string();
        let path = self.resolve(url);
        let spawned = std::thread::Builder::new()
            .name("asset-load".into())
            .spawn(move || {
                // Nobody listening any more is fine.
                let _ = sender.send(read_asset(&source, &path));
            });
        if let Err(error) = spawned {
            debug!("Could not start asset thread: {error}");
        }
        receiver
    }
}

/// Reads the whole file, reporting how far it got before parsing.
pub fn read_asset(source: &str, path: &Path) -> LoadResult {
    let bytes = std::fs::read(path)
        .map_err(|error| LoadError::Transport(format!("{}: {error}", path.display())))?;
    debug!("Loading {source}: 100% of {} bytes", bytes.len());
    parse_glb(source, &bytes)
}

/// Hands out receivers and resolves them only when told to
#[derive(Default)]
pub struct ManualTransport {
    pending: RefCell<Vec<(String, oneshot::Sender<LoadResult>)>>,
}

impl ManualTransport {
    pub fn requested(&self) -> Vec<String> {
        self.pending.borrow().iter().map(|(url, _)| url.clone()).collect()
    }

    /// Answers the oldest outstanding fetch, returning false if there is none.
    pub fn resolve(&self, result: LoadResult) -> bool {
        let mut pending = self.pending.borrow_mut();
        if pending.is_empty() {
            return false;
        }
        let (_, sender) = pending.remove(0);
        sender.send(result).is_ok()
    }

    /// Drops every outstanding sender without answering
    pub fn abandon(&self) {
        self.pending.borrow_mut().clear();
    }
}

impl AssetTransport for ManualTransport {
    fn fetch(&self, url: &str) -> oneshot::Receiver<LoadResult> {
        let (sender, receiver) = oneshot::channel();
        self.pending.borrow_mut().push((url.to_string(), sender));
        receiver
    }
}

pub fn parse_glb(source: &str, bytes: &[u8]) -> LoadResult {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|error| LoadError::Parse(error.to_string()))?;
    let mut meshes = Vec::new();
    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                collect_node(&node, Mat4::IDENTITY, &buffers, &mut meshes);
            }
        }
        None => {
            for mesh in document.meshes() {
                collect_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut meshes);
            }
        }
    }
    if meshes.is_empty() {
        return Err(LoadError::Parse(format!("{source} has no geometry")));
    }
    Ok(Asset {
        source: source.to_string(),
        meshes,
    })
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    meshes: &mut Vec<AssetMesh>,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        collect_mesh(&mesh, transform, buffers, meshes);
    }
    for child in node.children() {
        collect_node(&child, transform, buffers, meshes);
    }
}

fn collect_mesh(
    mesh: &gltf::Mesh,
    transform: Mat4,
    buffers: &[gltf::buffer::Data],
    meshes: &mut Vec<AssetMesh>,
) {
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let positions: Vec<Vec3> = reader
            .read_positions()
            .map(|iter| {
                iter.map(|p| transform.transform_point3(Vec3::from(p)))
                    .collect()
            })
            .unwrap_or_default();
        if positions.is_empty() {
            continue;
        }
        let indices: Vec<u32> = reader
            .read_indices()
            .map(|iter| iter.into_u32().collect())
            .unwrap_or_else(|| (0..positions.len() as u32).collect());
        let pbr = primitive.material().pbr_metallic_roughness();
        let [r, g, b, a] = pbr.base_color_factor();
        let material = Material::new(hex_color(r, g, b), pbr.metallic_factor(), pbr.roughness_factor())
            .with_opacity(a);
        meshes.push(AssetMesh {
            name: mesh.name().map(str::to_string),
            positions,
            indices,
            material,
        });
    }
}

fn hex_color(r: f32, g: f32, b: f32) -> u32 {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}
