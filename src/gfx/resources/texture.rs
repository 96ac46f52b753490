//! Texture handles and sampling configuration
//!
//! A [`Texture`] pairs a shared pixel source with the [`Sampling`] settings of
//! one particular use. The source may still be loading when the texture is
//! created; its image is filled in place once decoding finishes, and every
//! texture sharing that source sees it immediately.
//!
//! Sampling is per handle: the same decoded image can be sampled
//! with mirrored UVs by one consumer and plain UVs by another.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

impl Wrap {
    fn apply(self, coord: f32) -> f32 {
        match self {
            Wrap::ClampToEdge => coord.clamp(0.0, 1.0),
            Wrap::Repeat => coord.rem_euclid(1.0),
            Wrap::MirroredRepeat => {
                let t = coord.rem_euclid(2.0);
                if t > 1.0 {
                    2.0 - t
                } else {
                    t
                }
            }
        }
    }
}

/// How texel values should be interpreted by the shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    Linear,
}

/// Per-use sampling settings
///
/// Defaults match what a freshly created engine texture carries: vertical
/// flip on, clamped edges, identity repeat/offset, linear color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub flip_y: bool,
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    pub repeat: [f32; 2],
    pub offset: [f32; 2],
    pub color_space: ColorSpace,
}

impl Default for Sampling {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Sampling {
    pub const DEFAULT: Sampling = Sampling {
        flip_y: true,
        wrap_s: Wrap::ClampToEdge,
        wrap_t: Wrap::ClampToEdge,
        repeat: [1.0, 1.0],
        offset: [0.0, 0.0],
        color_space: ColorSpace::Linear,
    };

    /// Color map authored for glTF-style UVs (origin at the top-left)
    pub const fn color_map() -> Self {
        Sampling {
            flip_y: false,
            color_space: ColorSpace::Srgb,
            ..Self::DEFAULT
        }
    }

    /// Variant color map as sampled by the floating keycaps
    pub const fn keycap() -> Self {
        Self::color_map()
    }

    /// Variant color map as sampled by the keyboard body, whose UVs are
    /// mirrored on both axes
    pub const fn mirrored() -> Self {
        Sampling {
            flip_y: false,
            wrap_s: Wrap::Repeat,
            wrap_t: Wrap::Repeat,
            repeat: [-1.0, -1.0],
            offset: [1.0, 1.0],
            color_space: ColorSpace::Srgb,
        }
    }

    /// Maps a mesh UV to the wrapped texture-space coordinate
    pub fn transform(&self, uv: [f32; 2]) -> [f32; 2] {
        [
            self.wrap_s.apply(uv[0] * self.repeat[0] + self.offset[0]),
            self.wrap_t.apply(uv[1] * self.repeat[1] + self.offset[1]),
        ]
    }
}

/// Decoded RGBA8 pixels, rows stored top to bottom
#[derive(Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl fmt::Debug for TextureImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl TextureImage {
    /// Wraps raw RGBA data, rejecting buffers whose length does not match
    /// `width * height * 4`
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || rgba.len() != (width * height * 4) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }

    /// Single-color image, handy for placeholders
    pub fn solid(width: u32, height: u32, texel: [u8; 4]) -> Self {
        let rgba = texel
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }
}

struct TextureSource {
    label: String,
    image: RefCell<Option<TextureImage>>,
}

/// Shared texture handle
///
/// Cloning is cheap and keeps the same pixel source and sampling.
#[derive(Clone)]
pub struct Texture {
    source: Rc<TextureSource>,
    pub sampling: Sampling,
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("label", &self.source.label)
            .field("ready", &self.is_ready())
            .field("sampling", &self.sampling)
            .finish()
    }
}

impl Texture {
    /// Creates a texture whose pixels arrive later through [`Texture::fill`]
    pub fn pending(label: impl Into<String>) -> Self {
        Self {
            source: Rc::new(TextureSource {
                label: label.into(),
                image: RefCell::new(None),
            }),
            sampling: Sampling::default(),
        }
    }

    pub fn from_image(label: impl Into<String>, image: TextureImage) -> Self {
        let texture = Self::pending(label);
        texture.fill(image);
        texture
    }

    /// Same pixel source, different sampling
    pub fn with_sampling(&self, sampling: Sampling) -> Self {
        Self {
            source: Rc::clone(&self.source),
            sampling,
        }
    }

    /// Stores decoded pixels, visible to every handle sharing this source
    pub fn fill(&self, image: TextureImage) {
        *self.source.image.borrow_mut() = Some(image);
    }

    pub fn is_ready(&self) -> bool {
        self.source.image.borrow().is_some()
    }

    pub fn label(&self) -> &str {
        &self.source.label
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.source
            .image
            .borrow()
            .as_ref()
            .map(|image| (image.width, image.height))
    }

    /// True when both handles point at the same pixel source
    pub fn same_source(&self, other: &Texture) -> bool {
        Rc::ptr_eq(&self.source, &other.source)
    }

    /// Nearest-texel lookup honouring repeat, offset, wrap and flip
    ///
    /// Returns `None` while the source is still loading.
    pub fn sample(&self, uv: [f32; 2]) -> Option<[u8; 4]> {
        let image = self.source.image.borrow();
        let image = image.as_ref()?;

        let [u, v] = self.sampling.transform(uv);
        let row = if self.sampling.flip_y { 1.0 - v } else { v };

        let x = texel_index(u, image.width);
        let y = texel_index(row, image.height);
        Some(image.texel(x, y))
    }
}

fn texel_index(coord: f32, size: u32) -> u32 {
    ((coord * size as f32).floor() as i64).clamp(0, size as i64 - 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 image: red, green on the top row; blue, white on the bottom row
    fn quadrants() -> TextureImage {
        TextureImage::from_rgba(
            2,
            2,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 255, 255, 255,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rgba_rejects_bad_length() {
        assert!(TextureImage::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(TextureImage::from_rgba(0, 2, vec![]).is_none());
    }

    #[test]
    fn test_pending_texture_fills_every_handle() {
        let texture = Texture::pending("late");
        let mirrored = texture.with_sampling(Sampling::mirrored());
        assert!(!mirrored.is_ready());
        assert_eq!(mirrored.sample([0.5, 0.5]), None);

        texture.fill(TextureImage::solid(1, 1, [9, 9, 9, 255]));
        assert!(mirrored.is_ready());
        assert!(mirrored.same_source(&texture));
        assert_eq!(mirrored.dimensions(), Some((1, 1)));
    }

    #[test]
    fn test_flip_y_selects_row_origin() {
        let flipped = Texture::from_image("q", quadrants());
        let unflipped = flipped.with_sampling(Sampling::color_map());

        // v = 0 is the bottom row when flipped, the top row otherwise
        assert_eq!(flipped.sample([0.1, 0.1]), Some([0, 0, 255, 255]));
        assert_eq!(unflipped.sample([0.1, 0.1]), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_mirrored_sampling_inverts_both_axes() {
        let plain = Texture::from_image("q", quadrants()).with_sampling(Sampling::color_map());
        let mirrored = plain.with_sampling(Sampling::mirrored());

        assert_eq!(mirrored.sample([0.1, 0.1]), plain.sample([0.9, 0.9]));
        assert_eq!(mirrored.sample([0.9, 0.1]), plain.sample([0.1, 0.9]));
        assert_eq!(mirrored.sample([0.1, 0.1]), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_wrap_modes() {
        assert_eq!(Wrap::ClampToEdge.apply(1.4), 1.0);
        assert!((Wrap::Repeat.apply(1.25) - 0.25).abs() < 1e-6);
        assert!((Wrap::Repeat.apply(-0.25) - 0.75).abs() < 1e-6);
        assert!((Wrap::MirroredRepeat.apply(1.25) - 0.75).abs() < 1e-6);
    }
}
