//! Renderer surface used by the scene controllers
//!
//! Controllers only need four things from an engine: a canvas to size, a
//! `render(scene, camera)` call, and a prefilter for environment maps.
//! [`HeadlessRenderer`] implements that surface without a GPU and keeps a
//! record of what it was asked to draw.

use crate::gfx::{
    camera::PerspectiveCamera,
    color::Color,
    resources::environment::{EnvironmentPrefilter, MipChainPrefilter},
    scene::{Scene, SceneStatistics},
};

use super::canvas::Canvas;

pub trait Renderer {
    fn canvas(&self) -> &Canvas;

    fn canvas_mut(&mut self) -> &mut Canvas;

    /// Resizes the backing store (drawing buffer) in physical pixels
    fn set_size(&mut self, width: u32, height: u32);

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera);

    fn create_prefilter(&self) -> Box<dyn EnvironmentPrefilter>;

    fn info(&self) -> &RenderInfo;
}

/// What one `render` call saw
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub index: u64,
    pub statistics: SceneStatistics,
    pub width: u32,
    pub height: u32,
    pub aspect: f32,
    pub background: Option<Color>,
    pub has_environment: bool,
}

/// Running counters kept by a renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderInfo {
    pub frames: u64,
    pub resizes: u64,
    pub last_frame: Option<FrameRecord>,
}

/// Brings the drawing buffer in line with the canvas layout size
///
/// Runs every frame, so the common case is a single size comparison. On a
/// mismatch the buffer is resized and the camera aspect follows. Returns
/// whether a resize happened.
pub fn resize_to_display_size(renderer: &mut dyn Renderer, camera: &mut PerspectiveCamera) -> bool {
    let canvas = renderer.canvas();
    if !canvas.needs_resize() {
        return false;
    }
    let (width, height) = canvas.display_size();
    log::debug!(
        "canvas resize {}x{} -> {}x{}",
        canvas.width,
        canvas.height,
        width,
        height
    );
    renderer.set_size(width, height);
    camera.resize_projection(width, height);
    true
}

/// Renderer that draws nothing and records every frame
pub struct HeadlessRenderer {
    canvas: Canvas,
    info: RenderInfo,
}

impl HeadlessRenderer {
    pub fn new(client_width: f32, client_height: f32, pixel_ratio: f32) -> Self {
        Self {
            canvas: Canvas::new(client_width, client_height, pixel_ratio),
            info: RenderInfo::default(),
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.width = width;
        self.canvas.height = height;
        self.info.resizes += 1;
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.info.frames += 1;
        self.info.last_frame = Some(FrameRecord {
            index: self.info.frames,
            statistics: scene.get_statistics(),
            width: self.canvas.width,
            height: self.canvas.height,
            aspect: camera.aspect,
            background: scene.background,
            has_environment: scene.environment.is_some(),
        });
    }

    fn create_prefilter(&self) -> Box<dyn EnvironmentPrefilter> {
        Box::new(MipChainPrefilter::default())
    }

    fn info(&self) -> &RenderInfo {
        &self.info
    }
}
