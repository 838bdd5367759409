//! Canvas sizing
//!
//! The canvas fills the viewport minus the page header, the container padding
//! and a small margin.

use glam::Vec2;

/// Height reserved for the page header (px)
pub const HEADER_HEIGHT: f32 = 80.0;
/// Padding around the game container, per side (px)
pub const CONTAINER_PADDING: f32 = 16.0;
/// Extra breathing room (px)
pub const MARGIN: f32 = 20.0;

/// Canvas size for a viewport, never smaller than `min_side` on either axis
pub fn canvas_size(inner_width: f32, inner_height: f32, min_side: f32) -> Vec2 {
    let width = inner_width - 2.0 * CONTAINER_PADDING - MARGIN;
    let height = inner_height - HEADER_HEIGHT - 2.0 * CONTAINER_PADDING - MARGIN;
    Vec2::new(width, height).max(Vec2::splat(min_side)).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_viewport() {
        assert_eq!(canvas_size(1280.0, 800.0, 60.0), Vec2::new(1228.0, 668.0));
    }

    #[test]
    fn test_tiny_viewport_is_floored() {
        assert_eq!(canvas_size(50.0, 100.0, 60.0), Vec2::new(60.0, 60.0));
    }

    #[test]
    fn test_fractional_viewport_rounds_down() {
        assert_eq!(canvas_size(1000.7, 700.2, 60.0), Vec2::new(948.0, 568.0));
    }
}
