use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

/// Filter used when bringing both images to the common width
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Narrower of the two widths
pub fn common_width(first: &DynamicImage, second: &DynamicImage) -> u32 {
    first.width().min(second.width())
}

/// Height after scaling `width x height` to `target_width`, aspect preserved
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (target_width as f64 / width as f64) * height as f64;
    (scaled.round() as u32).max(1)
}

/// Resize to `target_width` keeping the aspect ratio. Borrowed when the width
/// already matches.
pub fn resize_to_width(img: &DynamicImage, target_width: u32) -> Cow<'_, DynamicImage> {
    if img.width() == target_width {
        return Cow::Borrowed(img);
    }
    let height = scaled_height(img.width(), img.height(), target_width);
    Cow::Owned(img.resize_exact(target_width, height, RESIZE_FILTER))
}

/// The two crops that make up a fused image
#[derive(Debug, Clone)]
pub struct Halves {
    /// Lower half of the first image, from its vertical midpoint down
    pub lower: RgbImage,
    /// Upper half of the second image, down to its vertical midpoint
    pub upper: RgbImage,
    /// Height of the first image after resizing; the fused canvas height
    pub canvas_height: u32,
}

impl Halves {
    pub fn width(&self) -> u32 {
        self.lower.width()
    }

    /// Paste the lower half at the top and the upper half from the canvas
    /// midpoint down. Whatever overflows the canvas is clipped; whatever the
    /// upper half does not reach stays black.
    pub fn compose(&self) -> RgbImage {
        let mut canvas = RgbImage::new(self.width(), self.canvas_height);
        imageops::replace(&mut canvas, &self.lower, 0, 0);
        imageops::replace(&mut canvas, &self.upper, 0, (self.canvas_height / 2) as i64);
        canvas
    }
}

/// Resize both images to the common width and cut out the halves
pub fn split_halves(first: &DynamicImage, second: &DynamicImage) -> Halves {
    let width = common_width(first, second);
    let first = resize_to_width(first, width);
    let second = resize_to_width(second, width);

    let first_height = first.height();
    let mid = first_height / 2;
    let lower = first.crop_imm(0, mid, width, first_height - mid).to_rgb8();
    let upper = second.crop_imm(0, 0, width, second.height() / 2).to_rgb8();

    Halves {
        lower,
        upper,
        canvas_height: first_height,
    }
}

/// Join the lower half of `first` to the upper half of `second`
pub fn fuse_images(first: &DynamicImage, second: &DynamicImage) -> RgbImage {
    split_halves(first, second).compose()
}
