/// Drives a mounted showcase the way a page would: scroll, resize and frame events in order

use glam::vec3;

use scroll_showcase::channel::{TooltipState, MAX_ROTATION};
use scroll_showcase::error::LoadError;
use scroll_showcase::loader::ManualTransport;
use scroll_showcase::model::{Asset, AssetMesh, LoadOutcome, Material};
use scroll_showcase::render::HeadlessRenderer;
use scroll_showcase::scroll::PinnedRegion;
use scroll_showcase::tween::{Property, TweenRecorder};
use scroll_showcase::units::{Percent, Radians};
use scroll_showcase::viewport::{FixedViewport, ViewportClass};
use scroll_showcase::{Showcase, ShowcaseConfig, ShowcaseEvent};

fn mounted(width: f32) -> Showcase {
    Showcase::mount(ShowcaseConfig::default(), &FixedViewport::window(width, 800.0))
        .expect("window has a size")
}

fn box_asset() -> Asset {
    Asset {
        source: "shaker.glb".into(),
        meshes: vec![AssetMesh {
            name: Some("body".into()),
            positions: vec![vec3(-0.4, -1.0, -0.4), vec3(0.4, 1.5, 0.4)],
            indices: vec![0, 1, 0],
            material: Material::new(0xcccccc, 0.0, 1.0),
        }],
    }
}

#[test]
fn test_top_of_section() {
    let mut showcase = mounted(1200.0);
    let mut tweens = TweenRecorder::default();
    let values = showcase.scroll(0.0, &mut tweens).clone();
    assert_eq!(values.header_offset, Percent(0.0));
    assert_eq!(values.mask_radius, Percent(0.0));
    assert_eq!(values.secondary_header_offset, Percent(100.0));
    assert_eq!(values.divider_scale, 0.0);
    assert_eq!(values.rotation, Radians(0.0));
    assert!(values.tooltips.iter().all(|state| *state == TooltipState::Hidden));
    assert_eq!(
        tweens.last_for(".header-2").map(|tween| tween.properties.clone()),
        Some(vec![Property::XPercent(Percent(100.0))])
    );
}

#[test]
fn test_bottom_of_section() {
    let mut showcase = mounted(1200.0);
    let mut tweens = TweenRecorder::default();
    let values = showcase.scroll(1.0, &mut tweens).clone();
    assert_eq!(values.header_offset, Percent(-100.0));
    assert_eq!(values.mask_radius, Percent(100.0));
    assert_eq!(values.secondary_header_offset, Percent(-200.0));
    assert_eq!(values.divider_scale, 1.0);
    assert_eq!(values.rotation, Radians(MAX_ROTATION));
    assert!(values.tooltips.iter().all(|state| *state == TooltipState::Revealed));
    assert_eq!(showcase.applied_rotation(), Radians(MAX_ROTATION));
}

#[test]
fn test_scroll_events_clamp() {
    let mut showcase = mounted(1200.0);
    let mut tweens = TweenRecorder::default();
    let mut renderer = HeadlessRenderer::default();
    showcase.handle(ShowcaseEvent::Scroll(4.0), &mut tweens, &mut renderer);
    let values = showcase.last_values().expect("scrolled");
    assert_eq!(values.progress.value(), 1.0);
    showcase.handle(ShowcaseEvent::Scroll(-3.0), &mut tweens, &mut renderer);
    assert_eq!(showcase.applied_rotation(), Radians(0.0));
}

#[test]
fn test_rejected_load_keeps_placeholder() {
    let mut showcase = mounted(1200.0);
    let transport = ManualTransport::default();
    let mut renderer = HeadlessRenderer::default();
    assert!(showcase.load_asset(&transport));
    showcase.frame(&mut renderer);
    assert!(transport.resolve(Err(LoadError::Transport("404 Not Found".into()))));
    assert_eq!(
        showcase.frame(&mut renderer),
        Some(LoadOutcome::KeptPlaceholder(LoadError::Transport(
            "404 Not Found".into()
        )))
    );
    assert!(showcase.stage().active().is_placeholder());
    assert!(showcase.stage().load_failed());
    assert!(!showcase.load_asset(&transport));
    assert!(transport.requested().is_empty());
    assert_eq!(renderer.frames.len(), 2);
}

#[test]
fn test_going_mobile_drops_tilt_and_offset() {
    let mut showcase = mounted(1200.0);
    let mut tweens = TweenRecorder::default();
    let mut renderer = HeadlessRenderer::default();
    let desktop = *showcase.stage().pose();
    assert!(desktop.tilt.0 > 0.0);
    assert!(desktop.position.x > 0.0);

    showcase.handle(
        ShowcaseEvent::Resize {
            width: 800.0,
            height: 800.0,
        },
        &mut tweens,
        &mut renderer,
    );
    showcase.handle(ShowcaseEvent::Frame, &mut tweens, &mut renderer);
    assert_eq!(showcase.viewport_class(), ViewportClass::Mobile);
    let mobile = *showcase.stage().pose();
    assert_eq!(mobile.tilt, Radians(0.0));
    let center = showcase.stage().bounds().center();
    assert!((mobile.position.x + center.x).abs() < 1e-6);
    assert_eq!(showcase.camera().position.x, 0.0);
    assert_eq!(showcase.camera().aspect(), 1.0);
}

#[test]
fn test_swap_mid_scroll_never_leaves_stage_empty() {
    let mut showcase = mounted(1200.0);
    let transport = ManualTransport::default();
    let mut tweens = TweenRecorder::default();
    let mut renderer = HeadlessRenderer::default();
    let region = PinnedRegion::new(0.0, 800.0);
    showcase.load_asset(&transport);

    let steps = 20;
    for step in 0..=steps {
        if step == steps / 2 {
            assert!(transport.resolve(Ok(box_asset())));
        }
        let progress = region.progress_at(region.length * step as f32 / steps as f32);
        showcase.handle(ShowcaseEvent::Scroll(progress.value()), &mut tweens, &mut renderer);
        showcase.handle(ShowcaseEvent::Frame, &mut tweens, &mut renderer);
    }

    assert_eq!(renderer.frames.len(), steps + 1);
    assert!(renderer.frames.iter().all(|frame| frame.objects == 1));
    let swapped_at = renderer
        .frames
        .iter()
        .position(|frame| !frame.placeholder)
        .expect("asset arrived");
    assert_eq!(swapped_at, steps / 2);
    assert!(renderer.frames[swapped_at..].iter().all(|frame| !frame.placeholder));

    // The asset picks up the spin the placeholder had, and the rest of the scroll
    assert_eq!(showcase.applied_rotation(), Radians(MAX_ROTATION));
    assert!(showcase.stage().pose().spin_angle().abs() < 1e-3);
    assert_eq!(showcase.stage().bounding_size(), vec3(0.8, 2.5, 0.8));
}

#[test]
fn test_scrolling_back_unwinds_rotation() {
    let mut showcase = mounted(1200.0);
    let mut tweens = TweenRecorder::default();
    for step in (0..=50).chain((0..=50).rev()) {
        showcase.scroll(step as f32 / 50.0, &mut tweens);
    }
    assert_eq!(showcase.applied_rotation(), Radians(0.0));
    assert!(showcase.stage().pose().spin_angle().abs() < 1e-3);
}
