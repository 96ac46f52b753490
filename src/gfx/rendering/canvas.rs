/// Drawing surface bound to a page element
///
/// `client_*` is the laid-out size in CSS pixels; `width`/`height` is the
/// backing store the renderer draws into. They drift apart whenever the
/// layout changes or the device pixel ratio does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub client_width: f32,
    pub client_height: f32,
    pub pixel_ratio: f32,
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Creates a canvas whose backing store already matches its layout size
    pub fn new(client_width: f32, client_height: f32, pixel_ratio: f32) -> Self {
        let mut canvas = Self {
            client_width,
            client_height,
            pixel_ratio,
            width: 0,
            height: 0,
        };
        let (width, height) = canvas.display_size();
        canvas.width = width;
        canvas.height = height;
        canvas
    }

    /// Backing-store size implied by the current layout
    pub fn display_size(&self) -> (u32, u32) {
        let ratio = if self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 };
        (
            (self.client_width.max(0.0) * ratio).round() as u32,
            (self.client_height.max(0.0) * ratio).round() as u32,
        )
    }

    pub fn needs_resize(&self) -> bool {
        self.display_size() != (self.width, self.height)
    }

    /// Layout change; the backing store is left for the next frame to fix
    pub fn set_client_size(&mut self, client_width: f32, client_height: f32) {
        self.client_width = client_width;
        self.client_height = client_height;
    }

    pub fn aspect(&self) -> f32 {
        if self.client_height > 0.0 {
            self.client_width / self.client_height
        } else {
            1.0
        }
    }
}
