use crate::color::{BackgroundColor, ColorParseError};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SCALE_FACTOR: f64 = 0.8;
pub const DEFAULT_BACKGROUND: BackgroundColor = BackgroundColor::rgb(0xEF, 0x14, 0x03);

#[derive(Error, Debug)]
pub enum IconError {
    #[error("{} not found", path.display())]
    MissingInput { path: PathBuf },

    #[error("scale factor must be a positive number, got {0}")]
    InvalidScaleFactor(f64),

    #[error("scaling {width}x{height} by {scale_factor} leaves no pixels")]
    EmptyContent {
        width: u32,
        height: u32,
        scale_factor: f64,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid background color: {0}")]
    InvalidColor(#[from] ColorParseError),
}

impl IconError {
    /// Anything other than a missing input is a processing failure.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, IconError::MissingInput { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ResizeRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub scale_factor: f64,
    pub background: BackgroundColor,
}

impl ResizeRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            scale_factor: DEFAULT_SCALE_FACTOR,
            background: DEFAULT_BACKGROUND,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_background(mut self, background: BackgroundColor) -> Self {
        self.background = background;
        self
    }
}

/// A file written by one of the resize operations.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizedIcon {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Shrinks the input by `scale_factor` and centers it on a canvas of the
/// input's original size filled with the background color.
///
/// Status is logged on every path; the caller decides what to do with the
/// returned error.
pub fn resize_icon(request: &ResizeRequest) -> Result<ResizedIcon, IconError> {
    let result = pad_and_save(request);
    match &result {
        Ok(icon) => println!(
            "✅ Successfully resized {} to {} ({}x{})",
            request.input.display(),
            icon.output.display(),
            icon.width,
            icon.height
        ),
        Err(e) => eprintln!("{}", failure_message(e)),
    }
    result
}

/// Resizes the input straight to `width`x`height` with no padding.
pub fn resize_exact(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
) -> Result<ResizedIcon, IconError> {
    let result = scale_and_save(input, output, width, height);
    match &result {
        Ok(icon) => println!("✅ Successfully created {}", icon.output.display()),
        Err(e) => eprintln!("{}", failure_message(e)),
    }
    result
}

pub fn failure_message(error: &IconError) -> String {
    if error.is_missing_input() {
        format!("❌ Error: {}", error)
    } else {
        format!("❌ Failed to process image: {}", error)
    }
}

fn pad_and_save(request: &ResizeRequest) -> Result<ResizedIcon, IconError> {
    ensure_exists(&request.input)?;

    let scale_factor = request.scale_factor;
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(IconError::InvalidScaleFactor(scale_factor));
    }

    let img = image::open(&request.input)?;
    let (width, height) = (img.width(), img.height());
    let (new_width, new_height) = scaled_dimensions(width, height, scale_factor);
    if new_width == 0 || new_height == 0 {
        return Err(IconError::EmptyContent {
            width,
            height,
            scale_factor,
        });
    }
    log::debug!(
        "Scaling {} from {}x{} to {}x{}",
        request.input.display(),
        width,
        height,
        new_width,
        new_height
    );

    let resized = resize_lanczos(&img, new_width, new_height);
    drop(img);

    let canvas = compose_on_canvas(&resized, width, height, request.background);
    canvas.save(&request.output)?;

    Ok(ResizedIcon {
        output: request.output.clone(),
        width,
        height,
    })
}

fn scale_and_save(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
) -> Result<ResizedIcon, IconError> {
    ensure_exists(input)?;

    if width == 0 || height == 0 {
        return Err(IconError::EmptyContent {
            width,
            height,
            scale_factor: 0.0,
        });
    }

    let img = image::open(input)?;
    let resized = resize_lanczos(&img, width, height);
    resized.save(output)?;

    Ok(ResizedIcon {
        output: output.to_path_buf(),
        width,
        height,
    })
}

fn ensure_exists(path: &Path) -> Result<(), IconError> {
    if path.exists() {
        Ok(())
    } else {
        Err(IconError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}

/// Lanczos3 resize. Images with alpha are resampled premultiplied so the
/// color of fully transparent pixels does not bleed into soft edges.
fn resize_lanczos(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if !img.color().has_alpha() {
        return img.resize_exact(width, height, FilterType::Lanczos3);
    }

    let mut premultiplied = img.to_rgba32f();
    for pixel in premultiplied.pixels_mut() {
        let alpha = pixel[3];
        for c in 0..3 {
            pixel[c] *= alpha;
        }
    }

    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let straight = RgbaImage::from_fn(width, height, |x, y| {
        let p = resized.get_pixel(x, y);
        let alpha = p[3];
        if alpha <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([
            to_u8(p[0] / alpha),
            to_u8(p[1] / alpha),
            to_u8(p[2] / alpha),
            to_u8(alpha),
        ])
    });

    DynamicImage::ImageRgba8(straight)
}

/// Places `foreground` in the middle of a `width`x`height` canvas.
///
/// A foreground with an alpha channel is blended so transparent pixels keep
/// the background; an opaque one overwrites the pixels it covers.
pub fn compose_on_canvas(
    foreground: &DynamicImage,
    width: u32,
    height: u32,
    background: BackgroundColor,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, background.pixel());

    let x_offset = centering_offset(width, foreground.width());
    let y_offset = centering_offset(height, foreground.height());

    if foreground.color().has_alpha() {
        paste_with_alpha(&mut canvas, &foreground.to_rgba8(), x_offset, y_offset);
    } else {
        imageops::replace(&mut canvas, foreground, x_offset as i64, y_offset as i64);
    }

    canvas
}

/// Pastes `foreground` with its own alpha as the mask. Every channel,
/// alpha included, is mixed as `fg * m + bg * (255 - m)`.
fn paste_with_alpha(canvas: &mut RgbaImage, foreground: &RgbaImage, x_offset: u32, y_offset: u32) {
    for (x, y, fg) in foreground.enumerate_pixels() {
        let (cx, cy) = (x + x_offset, y + y_offset);
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }

        let mask = u32::from(fg[3]);
        let bg = canvas.get_pixel_mut(cx, cy);
        for c in 0..4 {
            let mixed = u32::from(fg[c]) * mask + u32::from(bg[c]) * (255 - mask);
            bg[c] = ((mixed + 127) / 255) as u8;
        }
    }
}

/// `floor(dim * scale_factor)` for each dimension.
pub fn scaled_dimensions(width: u32, height: u32, scale_factor: f64) -> (u32, u32) {
    let scale = |dim: u32| (f64::from(dim) * scale_factor).floor() as u32;
    (scale(width), scale(height))
}

/// Odd leftovers bias one pixel toward the top-left.
pub fn centering_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}
