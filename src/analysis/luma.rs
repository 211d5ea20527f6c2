//! Per-frame luminance statistics used by quality assessment
//!
//! Filters use reflect-101 borders (`gfedcb|abcdefgh|gfedcba`) so results line
//! up with the usual OpenCV defaults for the same apertures.

use image::GrayImage;

/// Laplacian variance that maps to full sharpness
const SHARPNESS_SCALE: f64 = 10_000.0;
/// Luminance standard deviation that maps to full contrast
const CONTRAST_SCALE: f64 = 128.0;
const MAX_LUMA: f64 = 255.0;
/// Separable 5-tap Gaussian kernel (sigma derived from the aperture)
const GAUSSIAN_5: [f64; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Raw quality measurements of one frame, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    pub sharpness: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub noise: f64,
}

impl FrameMetrics {
    /// Measure a frame; `None` for an empty raster.
    ///
    /// Works directly on the 8-bit raster: besides the frame itself only five
    /// rows of horizontal blur are held in memory.
    pub fn measure(frame: &GrayImage) -> Option<Self> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return None;
        }
        let (width, height) = (width as usize, height as usize);
        let pixels = frame.as_raw();

        let luma = luma_moments(pixels);
        let laplacian = laplacian_moments(pixels, width, height);
        let residual = blur_residual(pixels, width, height) / pixels.len() as f64;

        Some(Self {
            sharpness: (laplacian.variance() / SHARPNESS_SCALE).min(1.0),
            brightness: luma.mean() / MAX_LUMA,
            contrast: (luma.variance().sqrt() / CONTRAST_SCALE).min(1.0),
            noise: (residual / MAX_LUMA).min(1.0),
        })
    }

    /// Arithmetic mean of each metric; `None` when no frames were measured
    pub fn average(samples: &[FrameMetrics]) -> Option<FrameMetrics> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let sum = samples.iter().fold([0.0; 4], |acc, m| {
            [
                acc[0] + m.sharpness,
                acc[1] + m.brightness,
                acc[2] + m.contrast,
                acc[3] + m.noise,
            ]
        });

        Some(FrameMetrics {
            sharpness: sum[0] / n,
            brightness: sum[1] / n,
            contrast: sum[2] / n,
            noise: sum[3] / n,
        })
    }
}

/// Exact running sums of integer samples
#[derive(Debug, Default, Clone, Copy)]
struct Moments {
    count: i128,
    sum: i128,
    sum_sq: i128,
}

impl Moments {
    fn push(&mut self, value: i64) {
        let value = i128::from(value);
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }

    /// Population variance
    fn variance(&self) -> f64 {
        let numerator = self.count * self.sum_sq - self.sum * self.sum;
        numerator as f64 / (self.count * self.count) as f64
    }
}

fn luma_moments(pixels: &[u8]) -> Moments {
    let mut moments = Moments::default();
    for &value in pixels {
        moments.push(i64::from(value));
    }
    moments
}

/// Mirror an out-of-range index back into `0..len` without repeating the edge sample
fn reflect_101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = index;
    while i < 0 || i > last {
        if i < 0 {
            i = -i;
        }
        if i > last {
            i = 2 * last - i;
        }
    }
    i as usize
}

/// Moments of the 4-neighbour discrete Laplacian
fn laplacian_moments(pixels: &[u8], width: usize, height: usize) -> Moments {
    let at = |x: isize, y: isize| {
        i32::from(pixels[reflect_101(y, height) * width + reflect_101(x, width)])
    };

    let mut moments = Moments::default();
    for y in 0..height as isize {
        for x in 0..width as isize {
            let value = at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1) - 4 * at(x, y);
            moments.push(i64::from(value));
        }
    }
    moments
}

/// Horizontally blurred rows, five at a time.
///
/// Row `r` lives in slot `r % 5`. The vertical taps of any output row cover at
/// most five consecutive source rows, so they never share a slot.
struct BlurRows {
    rows: Vec<Vec<f64>>,
    loaded: [Option<usize>; 5],
}

impl BlurRows {
    fn new(width: usize) -> Self {
        Self {
            rows: vec![vec![0.0; width]; 5],
            loaded: [None; 5],
        }
    }

    fn load(&mut self, pixels: &[u8], width: usize, row: usize) {
        let slot = row % 5;
        if self.loaded[slot] == Some(row) {
            return;
        }
        let source = &pixels[row * width..(row + 1) * width];
        for (x, out) in self.rows[slot].iter_mut().enumerate() {
            *out = GAUSSIAN_5
                .iter()
                .enumerate()
                .map(|(k, w)| w * f64::from(source[reflect_101(x as isize + k as isize - 2, width)]))
                .sum();
        }
        self.loaded[slot] = Some(row);
    }

    fn row(&self, row: usize) -> &[f64] {
        &self.rows[row % 5]
    }
}

/// Sum of absolute differences between the frame and its separable 5x5
/// Gaussian blur, with the blur rounded back to 8-bit levels
fn blur_residual(pixels: &[u8], width: usize, height: usize) -> f64 {
    let mut rows = BlurRows::new(width);
    let mut total = 0.0;

    for y in 0..height {
        let taps: [usize; 5] =
            std::array::from_fn(|k| reflect_101(y as isize + k as isize - 2, height));
        for &row in &taps {
            rows.load(pixels, width, row);
        }

        let original = &pixels[y * width..(y + 1) * width];
        for (x, &value) in original.iter().enumerate() {
            let smooth: f64 = GAUSSIAN_5
                .iter()
                .zip(&taps)
                .map(|(w, &row)| w * rows.row(row)[x])
                .sum();
            total += (f64::from(value) - smooth.round().clamp(0.0, MAX_LUMA)).abs();
        }
    }
    total
}
