//! Soft glow for the CPU surface.
//!
//! Glow sources are drawn into their own premultiplied layer, blurred with a separable Gaussian
//! and laid under the sharp layer, standing in for a canvas `shadowBlur`.

use crate::foundation::error::{ChipflowError, ChipflowResult};

/// Kernel radius in pixels for the glow layer.
pub const GLOW_RADIUS_PX: u32 = 6;
/// Gaussian sigma matching a canvas `shadowBlur` of roughly 6.
pub const GLOW_SIGMA: f32 = 3.0;

/// Separable Gaussian blur over premultiplied RGBA8, edge pixels clamped.
pub fn blur_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ChipflowResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ChipflowError::render("glow buffer size overflow"))?;
    if src.len() != expected {
        return Err(ChipflowError::render(
            "glow layer length does not match width*height*4",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected];
    let mut out = vec![0u8; expected];

    let (w, h) = (width as usize, height as usize);
    convolve(src, &mut tmp, w, h, &kernel, Axis::X);
    convolve(&tmp, &mut out, w, h, &kernel, Axis::Y);
    Ok(out)
}

/// Normalised Gaussian weights in Q16, summing to exactly `1 << 16`.
fn kernel_q16(radius: u32, sigma: f32) -> ChipflowResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ChipflowError::validation("glow sigma must be > 0"));
    }

    let r = radius as i64;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let raw: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();

    let mut weights: Vec<u32> = raw
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Push rounding error into the centre tap.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + (65536 - acc)).clamp(0, 65536) as u32;
    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn convolve(src: &[u8], dst: &mut [u8], w: usize, h: usize, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as isize;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as isize - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x as isize + d).clamp(0, w as isize - 1) as usize, y),
                    Axis::Y => (x, (y as isize + d).clamp(0, h as isize - 1) as usize),
                };
                let idx = (sy * w + sx) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = (y * w + x) * 4;
            for c in 0..4 {
                dst[out + c] = (((acc[c] + 32768) >> 16).min(255)) as u8;
            }
        }
    }
}

/// Source-over of premultiplied `src` onto premultiplied `dst`, in place.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> ChipflowResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ChipflowError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - sa;
        for c in 0..4 {
            let v = u16::from(s[c]) + mul_div255(u16::from(d[c]), inv);
            d[c] = v.min(255) as u8;
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/render/glow.rs"]
mod tests;
