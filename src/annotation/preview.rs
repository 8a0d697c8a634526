use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use super::BoundingBox;

/// Outline color of committed boxes
pub const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Draw every box as a red outline on a copy of the image.
///
/// Both corners are inclusive, so a zero-area box still shows as one pixel.
pub fn render_boxes(img: &DynamicImage, boxes: &[BoundingBox]) -> RgbImage {
    let mut canvas = img.to_rgb8();
    for bbox in boxes {
        let rect = Rect::at(bbox.left(), bbox.top()).of_size(bbox.width() + 1, bbox.height() + 1);
        draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR);
    }
    canvas
}

/// Render the boxes and save them, format chosen from the extension of `output`
pub fn save_preview(img: &DynamicImage, boxes: &[BoundingBox], output: &Path) -> Result<()> {
    render_boxes(img, boxes)
        .save(output)
        .with_context(|| format!("Failed to save preview: {}", output.display()))?;
    tracing::info!(path = %output.display(), "saved annotation preview");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([255, 255, 255])))
    }

    #[test]
    fn test_outline_is_drawn_on_edges_only() {
        let img = white(20, 20);
        let out = render_boxes(&img, &[BoundingBox::new(15, 12, 5, 2)]);

        assert_eq!(*out.get_pixel(5, 2), BOX_COLOR);
        assert_eq!(*out.get_pixel(15, 12), BOX_COLOR);
        assert_eq!(*out.get_pixel(10, 2), BOX_COLOR);
        assert_eq!(*out.get_pixel(10, 7), Rgb([255, 255, 255]));
        assert_eq!(*out.get_pixel(0, 0), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_zero_area_box_marks_one_pixel() {
        let img = white(8, 8);
        let out = render_boxes(&img, &[BoundingBox::anchored_at(3, 4)]);
        assert_eq!(*out.get_pixel(3, 4), BOX_COLOR);
        assert_eq!(*out.get_pixel(4, 4), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_boxes_outside_image_are_clipped() {
        let img = white(10, 10);
        let out = render_boxes(&img, &[BoundingBox::new(-5, -5, 30, 30)]);
        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(*out.get_pixel(5, 5), Rgb([255, 255, 255]));
    }
}
