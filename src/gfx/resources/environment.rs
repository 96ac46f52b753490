//! Image-based lighting resources
//!
//! An equirectangular HDR panorama is turned into a prefiltered
//! [`EnvironmentMap`]: a chain of progressively blurred, downsampled levels
//! that the renderer samples for ambient light and glossy reflections.

use std::fmt;

/// Decoded equirectangular HDR panorama (linear RGB)
#[derive(Clone, PartialEq)]
pub struct HdrImage {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<[f32; 3]>,
}

impl fmt::Debug for HdrImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HdrImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl HdrImage {
    pub fn new(width: u32, height: u32, texels: Vec<[f32; 3]>) -> Option<Self> {
        if width == 0 || height == 0 || texels.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            texels,
        })
    }

    /// Releases the raw panorama once its prefiltered form is retained
    pub fn dispose(self) {
        log::trace!("released {}x{} HDR source", self.width, self.height);
    }
}

/// One level of the prefiltered chain
#[derive(Debug, Clone, PartialEq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<[f32; 3]>,
}

/// Prefiltered environment used for ambient lighting and reflections
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    pub levels: Vec<MipLevel>,
}

impl EnvironmentMap {
    /// Average radiance of the whole panorama (the coarsest level)
    pub fn irradiance(&self) -> [f32; 3] {
        self.levels
            .last()
            .and_then(|level| level.texels.first().copied())
            .unwrap_or([0.0; 3])
    }
}

/// Engine step that converts a panorama into an [`EnvironmentMap`]
///
/// Implementations may hold intermediate resources between calls; they are
/// released by [`EnvironmentPrefilter::dispose`].
pub trait EnvironmentPrefilter {
    fn from_equirectangular(&mut self, hdr: &HdrImage) -> EnvironmentMap;

    fn dispose(self: Box<Self>);
}

/// CPU prefilter producing a 2x2 box-filtered mip chain
pub struct MipChainPrefilter {
    max_levels: usize,
    passes: u32,
}

impl MipChainPrefilter {
    pub fn new(max_levels: usize) -> Self {
        Self {
            max_levels: max_levels.max(1),
            passes: 0,
        }
    }
}

impl Default for MipChainPrefilter {
    fn default() -> Self {
        Self::new(8)
    }
}

impl EnvironmentPrefilter for MipChainPrefilter {
    fn from_equirectangular(&mut self, hdr: &HdrImage) -> EnvironmentMap {
        let mut levels = vec![MipLevel {
            width: hdr.width,
            height: hdr.height,
            texels: hdr.texels.clone(),
        }];

        while levels.len() < self.max_levels {
            let Some(previous) = levels.last() else {
                break;
            };
            if previous.width == 1 && previous.height == 1 {
                break;
            }
            let next = downsample(previous);
            levels.push(next);
        }

        self.passes += 1;
        EnvironmentMap { levels }
    }

    fn dispose(self: Box<Self>) {
        log::trace!("prefilter disposed after {} pass(es)", self.passes);
    }
}

fn downsample(level: &MipLevel) -> MipLevel {
    let width = (level.width / 2).max(1);
    let height = (level.height / 2).max(1);
    let mut texels = Vec::with_capacity((width * height) as usize);

    for y in 0..height {
        for x in 0..width {
            let mut sum = [0.0f32; 3];
            let mut count = 0.0;
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                let sx = (x * 2 + dx).min(level.width - 1);
                let sy = (y * 2 + dy).min(level.height - 1);
                let texel = level.texels[(sy * level.width + sx) as usize];
                sum[0] += texel[0];
                sum[1] += texel[1];
                sum[2] += texel[2];
                count += 1.0;
            }
            texels.push([sum[0] / count, sum[1] / count, sum[2] / count]);
        }
    }

    MipLevel {
        width,
        height,
        texels,
    }
}
