use pb_core::{BorderMode, map_index};

/// 1D convolution `out[i] = sum_k signal[i + radius - k] * kernel[k]`.
///
/// Taps that fall outside the signal are resolved with `border`.
pub fn convolve_f32(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    out: &mut [f32],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    let n = signal.len();
    if n == 0 {
        return;
    }

    let interior_start = radius.min(n);
    let interior_end = n.saturating_sub(radius).max(interior_start);

    for (i, out_i) in out.iter_mut().enumerate().take(interior_start) {
        *out_i = convolve_at_border(signal, kernel, radius, border, i);
    }
    convolve_interior(signal, kernel, radius, interior_start, interior_end, out);
    for (i, out_i) in out.iter_mut().enumerate().skip(interior_end) {
        *out_i = convolve_at_border(signal, kernel, radius, border, i);
    }
}

fn convolve_interior(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    start: usize,
    end: usize,
    out: &mut [f32],
) {
    if start >= end {
        return;
    }

    let s_ptr = signal.as_ptr();
    let k_ptr = kernel.as_ptr();
    let klen = kernel.len();

    // SAFETY:
    // - `i` in `[radius, n-radius)` guarantees full kernel footprint in bounds.
    // - `base = i-radius`, `base + (klen-1) = i+radius <= n-1`.
    // - Pointers derive from valid slices and are only offset within bounds.
    unsafe {
        for (i, out_i) in out.iter_mut().enumerate().take(end).skip(start) {
            let base = i - radius;
            let mut acc = 0.0f32;
            for k in 0..klen {
                acc += *s_ptr.add(base + k) * *k_ptr.add(klen - 1 - k);
            }
            *out_i = acc;
        }
    }
}

fn convolve_at_border(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    i: usize,
) -> f32 {
    let n = signal.len();
    let mut acc = 0.0f32;
    for (k, &kv) in kernel.iter().enumerate() {
        let idx = i as isize + radius as isize - k as isize;
        let v = match (map_index(idx, n, border), border) {
            (Some(j), _) => signal[j],
            (None, BorderMode::Constant(c)) => *c,
            (None, _) => unreachable!("non-constant borders map every index"),
        };
        acc += v * kv;
    }
    acc
}
