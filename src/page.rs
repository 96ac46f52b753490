//! Page surface
//!
//! The showcase lives inside a document: sections with a layout position, a
//! scrolling viewport, and one swatch button per variant in the configurator.

use crate::assets::{join_asset_url, variants::VariantDescriptor};

/// Layout box of a page element in document coordinates (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f32,
    pub height: f32,
}

impl ElementRect {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    pub fn scrolled_to(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y.max(0.0);
        self
    }
}

/// Variant picker button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchButton {
    pub variant_id: &'static str,
    pub variant_name: &'static str,
    pub thumbnail_url: String,
}

impl SwatchButton {
    pub fn from_variant(variant: &VariantDescriptor, asset_root: &str) -> Self {
        Self {
            variant_id: variant.id,
            variant_name: variant.display_name,
            thumbnail_url: join_asset_url(asset_root, variant.thumbnail_url),
        }
    }

    pub fn data_attributes(&self) -> [(&'static str, &'static str); 2] {
        [
            ("data-variant-id", self.variant_id),
            ("data-variant-name", self.variant_name),
        ]
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<button class="swatch" data-variant-id="{}" data-variant-name="{}" style="background-image: url('{}')" aria-label="{}"></button>"#,
            self.variant_id, self.variant_name, self.thumbnail_url, self.variant_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::variants::find_variant;

    #[test]
    fn test_swatch_carries_variant_identity() {
        let kick = find_variant("kick").unwrap();
        let button = SwatchButton::from_variant(kick, "assets/");

        assert_eq!(button.data_attributes()[0], ("data-variant-id", "kick"));
        assert_eq!(button.data_attributes()[1].1, kick.display_name);
        assert!(button.thumbnail_url.starts_with("assets/"));

        let html = button.to_html();
        assert!(html.contains(r#"data-variant-id="kick""#));
        assert!(html.contains(&format!(r#"data-variant-name="{}""#, kick.display_name)));
    }

    #[test]
    fn test_viewport_scroll_never_negative() {
        let viewport = Viewport::new(1280.0, 720.0).scrolled_to(-40.0);
        assert_eq!(viewport.scroll_y, 0.0);
        assert_eq!(ElementRect::new(100.0, 50.0).bottom(), 150.0);
    }
}
