use glam::{Mat4, Vec3};
use instant::Instant;
use log::debug;

use crate::camera::Camera;
use crate::model::{Pose, SceneObject};
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient {
        color: u32,
        intensity: f32,
    },
    Directional {
        color: u32,
        intensity: f32,
        position: Vec3,
        shadow: Option<Shadow>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub bias: f32,
    pub map_size: u32,
}

/// Soft ambient fill, a shadow-casting key light and a dim back light.
pub fn studio_lighting() -> Vec<Light> {
    vec![
        Light::Ambient {
            color: 0xffffff,
            intensity: 0.7,
        },
        Light::Directional {
            color: 0xffffff,
            intensity: 1.0,
            position: Vec3::new(1.0, 2.0, 3.0),
            shadow: Some(Shadow {
                bias: -0.001,
                map_size: 1024,
            }),
        },
        Light::Directional {
            color: 0xffffff,
            intensity: 0.5,
            position: Vec3::new(-2.0, 0.0, -2.0),
            shadow: None,
        },
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneMapping {
    None,
    AcesFilmic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    pub antialias: bool,
    /// Transparent so the page shows through
    pub clear_color: [f32; 4],
    pub max_pixel_ratio: f32,
    pub soft_shadows: bool,
    pub srgb_output: bool,
    pub tone_mapping: ToneMapping,
    pub exposure: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            antialias: true,
            clear_color: [0.0; 4],
            max_pixel_ratio: 2.0,
            soft_shadows: true,
            srgb_output: true,
            tone_mapping: ToneMapping::AcesFilmic,
            exposure: 1.0,
        }
    }
}

/// What a renderer gets to see for one frame
pub struct SceneView<'a> {
    /// The only object on stage
    pub object: &'a SceneObject,
    pub pose: &'a Pose,
    pub lights: &'a [Light],
    pub settings: &'a RenderSettings,
}

impl SceneView<'_> {
    pub fn object_count(&self) -> usize {
        1
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.pose.matrix()
    }
}

pub trait Renderer {
    fn resize(&mut self, viewport: Viewport);

    fn render(&mut self, scene: &SceneView, camera: &Camera);
}

/// What a headless renderer noticed about one frame
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRecord {
    pub placeholder: bool,
    pub objects: usize,
    pub mvp: Mat4,
}

/// Draws nothing, but keeps count and remembers what it was shown
pub struct HeadlessRenderer {
    pub viewport: Option<Viewport>,
    pub frames: Vec<FrameRecord>,
    keep_frames: bool,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl HeadlessRenderer {
    pub fn new(keep_frames: bool) -> Self {
        Self {
            viewport: None,
            frames: Vec::new(),
            keep_frames,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Renderer for HeadlessRenderer {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn render(&mut self, scene: &SceneView, camera: &Camera) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_calculation).as_secs_f64();
        if elapsed >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / elapsed;
            debug!("{:.1} frames per second", self.fps);
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
        let record = FrameRecord {
            placeholder: scene.object.is_placeholder(),
            objects: scene.object_count(),
            mvp: camera.mvp_matrix() * scene.model_matrix(),
        };
        if self.keep_frames {
            self.frames.push(record);
        } else {
            self.frames.clear();
            self.frames.push(record);
        }
    }
}
