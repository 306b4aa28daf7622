use log::{debug, info};

use crate::camera::Camera;
use crate::channel::{ChannelValues, TooltipState};
use crate::config::ShowcaseConfig;
use crate::error::ShowcaseError;
use crate::framing::Frame;
use crate::loader::AssetTransport;
use crate::model::{LoadOutcome, ModelStage};
use crate::render::{studio_lighting, Light, RenderSettings, Renderer, SceneView};
use crate::rotation::RotationAccumulator;
use crate::scroll::Progress;
use crate::tween::{Property, Tween, TweenEngine};
use crate::units::{Percent, Radians};
use crate::viewport::{Viewport, ViewportClass, ViewportOracle};
use crate::ShowcaseEvent;

const TOOLTIP_SHOWN: Percent = Percent(0.0);
const TOOLTIP_TUCKED: Percent = Percent(125.0);
const HEADER_CHARS_SHOWN: Percent = Percent(0.0);
const HEADER_CHARS_TUCKED: Percent = Percent(100.0);
const DIVIDER_ORIGIN: &str = "left center";

/// Everything the presentation owns, driven from one thread by scroll, resize
/// and frame events.
pub struct Showcase {
    config: ShowcaseConfig,
    viewport: Viewport,
    camera: Camera,
    stage: ModelStage,
    rotation: RotationAccumulator,
    lights: Vec<Light>,
    settings: RenderSettings,
    tooltip_states: Vec<Option<TooltipState>>,
    header_revealed: Option<bool>,
    last_values: Option<ChannelValues>,
}

impl Showcase {
    /// Fails only when there is nothing to render into.
    pub fn mount(config: ShowcaseConfig, oracle: &dyn ViewportOracle) -> Result<Self, ShowcaseError> {
        config.validate()?;
        let viewport = oracle
            .current()
            .filter(|viewport| !viewport.is_empty())
            .ok_or_else(|| ShowcaseError::MissingMountTarget(config.targets.mount.clone()))?;
        let mut camera = Camera::new(config.lens, viewport);
        let mut stage = ModelStage::new();
        let class = viewport.class(config.mobile_breakpoint);
        stage.frame(class, &config.framing, &mut camera);
        info!(
            "Mounted {}x{} ({class}) with placeholder",
            viewport.width, viewport.height
        );
        Ok(Self {
            tooltip_states: vec![None; config.channels.tooltips.len()],
            rotation: RotationAccumulator::new(config.rotation_epsilon),
            config,
            viewport,
            camera,
            stage,
            lights: studio_lighting(),
            settings: RenderSettings::default(),
            header_revealed: None,
            last_values: None,
        })
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn stage(&self) -> &ModelStage {
        &self.stage
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.viewport.class(self.config.mobile_breakpoint)
    }

    pub fn applied_rotation(&self) -> Radians {
        self.rotation.applied()
    }

    pub fn last_values(&self) -> Option<&ChannelValues> {
        self.last_values.as_ref()
    }

    pub fn load_asset(&mut self, transport: &dyn AssetTransport) -> bool {
        let url = self.config.asset_url.clone();
        self.stage.request_asset_load(&url, transport)
    }

    pub fn handle(
        &mut self,
        event: ShowcaseEvent,
        tweens: &mut dyn TweenEngine,
        renderer: &mut dyn Renderer,
    ) {
        match event {
            ShowcaseEvent::Scroll(progress) => {
                self.scroll(progress, tweens);
            }
            ShowcaseEvent::Resize { width, height } => {
                self.resize(Viewport::new(width, height), renderer);
            }
            ShowcaseEvent::SectionEntered => self.section_entered(tweens),
            ShowcaseEvent::SectionLeftBack => self.section_left_back(tweens),
            ShowcaseEvent::Frame => {
                self.frame(renderer);
            }
        }
    }

    /// Applies one progress sample to every channel and to the model spin.
    pub fn scroll(&mut self, progress: impl Into<Progress>, tweens: &mut dyn TweenEngine) -> &ChannelValues {
        let values = self.config.channels.map(progress.into());
        let targets = &self.config.targets;
        tweens.to(Tween::set(&targets.header, Property::XPercent(values.header_offset)));
        tweens.to(Tween::set(&targets.mask, Property::ClipCircle(values.mask_radius)));
        tweens.to(Tween::set(
            &targets.secondary_header,
            Property::XPercent(values.secondary_header_offset),
        ));
        tweens.to(
            Tween::set(&targets.divider, Property::ScaleX(values.divider_scale))
                .with_origin(DIVIDER_ORIGIN),
        );
        let tooltips = self.config.channels.tooltips.iter().zip(&values.tooltips);
        for ((tooltip, &state), previous) in tooltips.zip(self.tooltip_states.iter_mut()) {
            if *previous == Some(state) {
                continue;
            }
            *previous = Some(state);
            let y = match state {
                TooltipState::Revealed => TOOLTIP_SHOWN,
                TooltipState::Hidden => TOOLTIP_TUCKED,
            };
            debug!("Tooltip at {} now {state}", tooltip.trigger);
            tweens.to(Tween::animate(
                &tooltip.elements,
                Property::YPercent(y),
                self.config.tooltip_timing,
            ));
        }
        if let Some(delta) = self.rotation.update(values.rotation) {
            self.stage.rotate(delta);
        }
        self.last_values.insert(values)
    }

    pub fn section_entered(&mut self, tweens: &mut dyn TweenEngine) {
        self.reveal_header(true, tweens);
    }

    pub fn section_left_back(&mut self, tweens: &mut dyn TweenEngine) {
        self.reveal_header(false, tweens);
    }

    fn reveal_header(&mut self, revealed: bool, tweens: &mut dyn TweenEngine) {
        if self.header_revealed == Some(revealed) {
            return;
        }
        self.header_revealed = Some(revealed);
        let y = if revealed {
            HEADER_CHARS_SHOWN
        } else {
            HEADER_CHARS_TUCKED
        };
        tweens.to(Tween::animate(
            std::slice::from_ref(&self.config.targets.header_chars),
            Property::YPercent(y),
            self.config.header_reveal_timing,
        ));
    }

    /// A collapsed viewport is remembered but otherwise waits for a real size.
    pub fn resize(&mut self, viewport: Viewport, renderer: &mut dyn Renderer) {
        self.viewport = viewport;
        if !self.camera.set_viewport(viewport) {
            debug!("Skipping projection for empty viewport {viewport:?}");
            return;
        }
        renderer.resize(viewport);
        let frame = self.reframe();
        debug!(
            "Resized to {}x{} ({}), camera at {}",
            viewport.width,
            viewport.height,
            self.viewport_class(),
            frame.camera_position
        );
    }

    pub fn refresh_viewport(&mut self, oracle: &dyn ViewportOracle, renderer: &mut dyn Renderer) {
        if let Some(viewport) = oracle.current() {
            self.resize(viewport, renderer);
        }
    }

    /// One tick of the render loop: settle any load, then paint.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> Option<LoadOutcome> {
        let outcome = self.stage.settle_load();
        // A collapsed viewport leaves framing to the next real resize.
        if outcome == Some(LoadOutcome::Swapped) && !self.viewport.is_empty() {
            self.reframe();
        }
        let view = SceneView {
            object: self.stage.active(),
            pose: self.stage.pose(),
            lights: &self.lights,
            settings: &self.settings,
        };
        renderer.render(&view, &self.camera);
        outcome
    }

    fn reframe(&mut self) -> Frame {
        let class = self.viewport_class();
        self.stage.frame(class, &self.config.framing, &mut self.camera)
    }
}
