use pb_core::{BorderMode, Image, ImageView, sample_bilinear_f32};

use crate::config::Downsample;

/// Destination length for a scaled axis: round-half-to-even, never below 1.
pub fn scaled_dim(len: usize, ratio: f32) -> usize {
    let scaled = (len as f64 * f64::from(ratio)).round_ties_even();
    (scaled as usize).max(1)
}

pub fn scaled_shape(shape: (usize, usize), ratio: f32) -> (usize, usize) {
    (scaled_dim(shape.0, ratio), scaled_dim(shape.1, ratio))
}

/// Bilinear resize with pixel-center alignment.
///
/// Destination pixel `x` samples source coordinate
/// `(x + 0.5) * src_w / dst_w - 0.5`; coordinates outside the image clamp to
/// the edge.
pub fn resize_bilinear_f32(src: &ImageView<'_, f32>, dst_w: usize, dst_h: usize) -> Image<f32> {
    if src.is_empty() {
        return Image::new_fill(dst_w, dst_h, 0.0);
    }
    if src.shape() == (dst_w, dst_h) {
        return pb_core::to_f32(src);
    }

    let scale_x = src.width() as f32 / dst_w as f32;
    let scale_y = src.height() as f32 / dst_h as f32;
    let border = BorderMode::Clamp;

    Image::from_fn(dst_w, dst_h, |x, y| {
        let sx = (x as f32 + 0.5) * scale_x - 0.5;
        let sy = (y as f32 + 0.5) * scale_y - 0.5;
        sample_bilinear_f32(src, sx, sy, &border)
    })
}

/// Box-coverage resize for shrinking.
///
/// Every destination pixel is the coverage-weighted mean of the source
/// pixels its footprint overlaps. Falls back to [`resize_bilinear_f32`] when
/// either axis grows.
pub fn resize_area_f32(src: &ImageView<'_, f32>, dst_w: usize, dst_h: usize) -> Image<f32> {
    let (src_w, src_h) = src.shape();
    if src.is_empty() || dst_w > src_w || dst_h > src_h {
        return resize_bilinear_f32(src, dst_w, dst_h);
    }
    if src_w == 2 * dst_w && src_h == 2 * dst_h {
        return downsample2x2_mean_f32(src);
    }

    let wx = area_taps(src_w, dst_w);
    let wy = area_taps(src_h, dst_h);

    let mut horiz = Image::new_fill(dst_w, src_h, 0.0f32);
    if dst_w > 0 {
        for (y, out_row) in horiz.data_mut().chunks_exact_mut(dst_w).enumerate() {
            let row = src.row(y);
            for (out, taps) in out_row.iter_mut().zip(wx.iter()) {
                *out = taps.iter().map(|&(j, w)| row[j] * w).sum();
            }
        }
    }

    Image::from_fn(dst_w, dst_h, |x, y| {
        wy[y]
            .iter()
            .map(|&(j, w)| horiz.data()[j * dst_w + x] * w)
            .sum()
    })
}

/// Shrinks `src` to `(dst_w, dst_h)` with the chosen interpolation.
pub fn downsample_f32(
    src: &ImageView<'_, f32>,
    dst_w: usize,
    dst_h: usize,
    mode: Downsample,
) -> Image<f32> {
    match mode {
        Downsample::Bilinear => resize_bilinear_f32(src, dst_w, dst_h),
        Downsample::Area => resize_area_f32(src, dst_w, dst_h),
    }
}

/// Source `(index, weight)` pairs for each destination sample along one axis.
fn area_taps(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|i| {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src_len as f64);
            let mut taps = Vec::new();
            let mut j = start.floor() as usize;
            while j < src_len && (j as f64) < end {
                let overlap = end.min(j as f64 + 1.0) - start.max(j as f64);
                if overlap > 1e-9 {
                    taps.push((j, (overlap / scale) as f32));
                }
                j += 1;
            }
            taps
        })
        .collect()
}

/// 2x2 mean downsample; output is `(src.width() / 2, src.height() / 2)` and an
/// odd last row/column is dropped.
pub fn downsample2x2_mean_f32(src: &ImageView<'_, f32>) -> Image<f32> {
    let (dst_w, dst_h) = (src.width() / 2, src.height() / 2);
    let mut dst = Image::new_fill(dst_w, dst_h, 0.0f32);
    if dst_w == 0 || dst_h == 0 {
        return dst;
    }

    if src.width().is_multiple_of(2)
        && src.height().is_multiple_of(2)
        && let Some(src_contig) = src.as_contiguous_slice()
    {
        downsample_f32_contiguous_even(src_contig, src.width(), dst.data_mut(), dst_w, dst_h);
        return dst;
    }

    downsample_f32_fallback(src, dst.data_mut(), dst_w, dst_h);
    dst
}

fn downsample_f32_contiguous_even(
    src: &[f32],
    src_w: usize,
    dst: &mut [f32],
    dst_w: usize,
    dst_h: usize,
) {
    let src_ptr = src.as_ptr();
    let dst_ptr = dst.as_mut_ptr();
    // SAFETY:
    // - `src` is contiguous with `src.len() == src_w * (dst_h * 2)`.
    // - `dst` has exactly `dst_w * dst_h` elements.
    // - Loops only access in-range addresses derived from these lengths.
    unsafe {
        for y in 0..dst_h {
            let src_row0 = src_ptr.add((2 * y) * src_w);
            let src_row1 = src_ptr.add((2 * y + 1) * src_w);
            let dst_row = dst_ptr.add(y * dst_w);
            for x in 0..dst_w {
                let sx = 2 * x;
                let sum = *src_row0.add(sx)
                    + *src_row0.add(sx + 1)
                    + *src_row1.add(sx)
                    + *src_row1.add(sx + 1);
                *dst_row.add(x) = sum * 0.25;
            }
        }
    }
}

fn downsample_f32_fallback(src: &ImageView<'_, f32>, dst: &mut [f32], dst_w: usize, dst_h: usize) {
    for (y, dst_row) in dst.chunks_exact_mut(dst_w).take(dst_h).enumerate() {
        let src_row0 = src.row(2 * y);
        let src_row1 = src.row(2 * y + 1);
        for (x, out) in dst_row.iter_mut().enumerate() {
            let sx = 2 * x;
            *out = (src_row0[sx] + src_row0[sx + 1] + src_row1[sx] + src_row1[sx + 1]) * 0.25;
        }
    }
}
