//! The one 3D object on stage and how it gets there.
//!
//! A [`ModelStage`] starts with a placeholder built on the spot and swaps in a
//! loaded [`Asset`] at most once. The object lives in a single slot, so the
//! swap can never leave the stage empty or doubly occupied. Pose and spin
//! belong to the stage, not to the object, so they survive the swap.

use futures::channel::oneshot;
use glam::{Mat4, Quat, Vec3};
use log::{info, warn};

use crate::camera::Camera;
use crate::error::LoadError;
use crate::framing::{frame, Frame, FramingConfig};
use crate::geometry::{Aabb, Primitive};
use crate::loader::{AssetTransport, LoadResult};
use crate::units::Radians;
use crate::viewport::ViewportClass;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
}

impl Material {
    pub fn new(color: u32, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            metalness,
            roughness,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Finish given to every mesh of a loaded asset
pub const ASSET_METALNESS: f32 = 0.5;
pub const ASSET_ROUGHNESS: f32 = 0.9;

#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub primitive: Primitive,
    pub material: Material,
    pub offset: Vec3,
}

impl Part {
    pub fn bounds(&self) -> Aabb {
        self.primitive
            .bounds()
            .transformed(Mat4::from_translation(self.offset))
    }
}

/// Stand-in shown before the asset arrives, or instead of it
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    pub parts: Vec<Part>,
}

/// A body with a wider cap on top, roughly the silhouette of the product.
pub fn create_placeholder() -> Placeholder {
    let body = Part {
        primitive: Primitive::cylinder(0.5, 2.5, 32),
        material: Material::new(0x667eea, 0.3, 0.4).with_opacity(0.8),
        offset: Vec3::ZERO,
    };
    let cap = Part {
        primitive: Primitive::cylinder(0.55, 0.4, 32),
        material: Material::new(0x764ba2, 0.6, 0.3),
        offset: Vec3::new(0.0, 1.45, 0.0),
    };
    Placeholder {
        parts: vec![body, cap],
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssetMesh {
    pub name: Option<String>,
    /// Positions already carried through the node hierarchy
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub material: Material,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Asset {
    pub source: String,
    pub meshes: Vec<AssetMesh>,
}

impl Asset {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.meshes.iter().flat_map(|mesh| mesh.positions.iter().copied()))
    }

    pub fn apply_finish(&mut self, metalness: f32, roughness: f32) {
        for mesh in &mut self.meshes {
            mesh.material.metalness = metalness;
            mesh.material.roughness = roughness;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneObject {
    Placeholder(Placeholder),
    Asset(Asset),
}

impl SceneObject {
    pub fn bounds(&self) -> Aabb {
        match self {
            SceneObject::Placeholder(placeholder) => placeholder
                .parts
                .iter()
                .fold(Aabb::empty(), |bounds, part| bounds.union(&part.bounds())),
            SceneObject::Asset(asset) => asset.bounds(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, SceneObject::Placeholder(_))
    }
}

/// Placement of the active object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Tilt about Z, set by framing
    pub tilt: Radians,
    /// Accumulated turning about the object's own Y axis
    pub spin: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            tilt: Radians(0.0),
            spin: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_z(self.tilt.0) * self.spin
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }

    /// Turns about the local Y axis, like `rotateOnAxis`.
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.spin = (self.spin * Quat::from_rotation_y(angle)).normalize();
    }

    pub fn spin_angle(&self) -> f32 {
        let (axis, angle) = self.spin.to_axis_angle();
        if axis.y < 0.0 {
            -angle
        } else {
            angle
        }
    }
}

enum LoadState {
    NotRequested,
    Pending(oneshot::Receiver<LoadResult>),
    Loaded,
    Failed,
}

/// What came of a load when it settled
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Swapped,
    KeptPlaceholder(LoadError),
}

pub struct ModelStage {
    active: SceneObject,
    bounds: Aabb,
    pose: Pose,
    load: LoadState,
}

impl Default for ModelStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelStage {
    pub fn new() -> Self {
        let active = SceneObject::Placeholder(create_placeholder());
        let bounds = active.bounds();
        Self {
            active,
            bounds,
            pose: Pose::default(),
            load: LoadState::NotRequested,
        }
    }

    pub fn active(&self) -> &SceneObject {
        &self.active
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn bounding_size(&self) -> Vec3 {
        self.bounds.size()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Pending(_))
    }

    pub fn load_failed(&self) -> bool {
        matches!(self.load, LoadState::Failed)
    }

    /// Places the object and the camera for the current bounds.
    pub fn frame(&mut self, class: ViewportClass, config: &FramingConfig, camera: &mut Camera) -> Frame {
        let frame = frame(&self.bounds, class, config);
        self.pose.position = frame.object_position;
        self.pose.tilt = frame.tilt;
        camera.place(frame.camera_position, frame.look_at);
        frame
    }

    pub fn rotate(&mut self, delta: f32) {
        self.pose.rotate_local_y(delta);
    }

    /// One shot: later requests are ignored whatever became of the first.
    pub fn request_asset_load(&mut self, url: &str, transport: &dyn AssetTransport) -> bool {
        if !matches!(self.load, LoadState::NotRequested) {
            warn!("Asset load already requested, ignoring {url}");
            return false;
        }
        info!("Loading asset {url}");
        self.load = LoadState::Pending(transport.fetch(url));
        true
    }

    /// Takes the load result if it has arrived, swapping the asset in on success.
    pub fn settle_load(&mut self) -> Option<LoadOutcome> {
        let LoadState::Pending(receiver) = &mut self.load else {
            return None;
        };
        let result = match receiver.try_recv() {
            Ok(None) => return None,
            Ok(Some(result)) => result,
            Err(oneshot::Canceled) => Err(LoadError::Abandoned),
        };
        match result {
            Ok(asset) => {
                self.load = LoadState::Loaded;
                self.swap_in(asset);
                Some(LoadOutcome::Swapped)
            }
            Err(error) => {
                self.load = LoadState::Failed;
                warn!("Error loading asset: {error}");
                info!("Using placeholder model instead");
                Some(LoadOutcome::KeptPlaceholder(error))
            }
        }
    }

    fn swap_in(&mut self, mut asset: Asset) {
        asset.apply_finish(ASSET_METALNESS, ASSET_ROUGHNESS);
        info!(
            "Asset {} loaded with {} meshes",
            asset.source,
            asset.meshes.len()
        );
        let replacement = SceneObject::Asset(asset);
        self.bounds = replacement.bounds();
        self.active = replacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Lens;
    use crate::loader::ManualTransport;
    use crate::viewport::Viewport;
    use glam::vec3;
    use std::f32::consts::PI;

    fn cube_asset() -> Asset {
        Asset {
            source: "cube.glb".into(),
            meshes: vec![AssetMesh {
                name: None,
                positions: vec![vec3(-1.0, 0.0, -1.0), vec3(1.0, 4.0, 1.0)],
                indices: vec![],
                material: Material::new(0xffffff, 0.0, 1.0),
            }],
        }
    }

    #[test]
    fn test_placeholder_bounds() {
        let stage = ModelStage::new();
        assert!(stage.active().is_placeholder());
        let bounds = stage.bounds();
        assert!((bounds.min - vec3(-0.55, -1.25, -0.55)).length() < 1e-6);
        assert!((bounds.max - vec3(0.55, 1.65, 0.55)).length() < 1e-6);
    }

    #[test]
    fn test_placeholder_deterministic() {
        assert_eq!(create_placeholder(), create_placeholder());
        assert!(create_placeholder().parts[0].material.is_transparent());
    }

    #[test]
    fn test_swap_replaces_and_refinishes() {
        let transport = ManualTransport::default();
        let mut stage = ModelStage::new();
        assert!(stage.request_asset_load("cube.glb", &transport));
        assert!(stage.is_loading());
        assert_eq!(stage.settle_load(), None);
        assert!(transport.resolve(Ok(cube_asset())));
        assert_eq!(stage.settle_load(), Some(LoadOutcome::Swapped));
        let SceneObject::Asset(asset) = stage.active() else {
            panic!("asset should be active");
        };
        assert_eq!(asset.meshes[0].material.metalness, ASSET_METALNESS);
        assert_eq!(asset.meshes[0].material.roughness, ASSET_ROUGHNESS);
        assert_eq!(stage.bounding_size(), vec3(2.0, 4.0, 2.0));
        assert_eq!(stage.settle_load(), None);
    }

    #[test]
    fn test_failure_keeps_placeholder() {
        let transport = ManualTransport::default();
        let mut stage = ModelStage::new();
        stage.request_asset_load("missing.glb", &transport);
        transport.resolve(Err(LoadError::Transport("404".into())));
        assert!(matches!(stage.settle_load(), Some(LoadOutcome::KeptPlaceholder(_))));
        assert!(stage.active().is_placeholder());
        assert!(stage.load_failed());
        assert!(!stage.request_asset_load("missing.glb", &transport));
    }

    #[test]
    fn test_dropped_sender_is_failure() {
        let transport = ManualTransport::default();
        let mut stage = ModelStage::new();
        stage.request_asset_load("gone.glb", &transport);
        drop(transport);
        assert_eq!(
            stage.settle_load(),
            Some(LoadOutcome::KeptPlaceholder(LoadError::Abandoned))
        );
    }

    #[test]
    fn test_spin_survives_swap() {
        let transport = ManualTransport::default();
        let mut stage = ModelStage::new();
        stage.request_asset_load("cube.glb", &transport);
        stage.rotate(PI / 3.0);
        assert!(transport.resolve(Ok(cube_asset())));
        stage.settle_load();
        assert!((stage.pose().spin_angle() - PI / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_frame_moves_camera() {
        let mut stage = ModelStage::new();
        let mut camera = Camera::new(Lens::default(), Viewport::new(1200.0, 800.0));
        let frame = stage.frame(ViewportClass::Desktop, &FramingConfig::default(), &mut camera);
        assert_eq!(camera.position, frame.camera_position);
        assert_eq!(stage.pose().position, frame.object_position);
        assert_eq!(stage.pose().tilt, frame.tilt);
    }
}
