use crate::border::{BorderMode, map_index};
use crate::image::ImageView;

/// Floor-based 2x2 bilinear interpolation at pixel-center coordinates.
///
/// Panics on an empty image unless `border` is `Constant`.
pub fn sample_bilinear_f32<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: f32,
    y: f32,
    border: &BorderMode<f32>,
) -> f32 {
    if img.is_empty() {
        if let BorderMode::Constant(v) = border {
            return *v;
        }
        panic!("cannot sample an empty image with non-constant border");
    }

    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;
    let dx = x - x0 as f32;
    let dy = y - y0 as f32;

    let p00 = sample_at_f32(img, x0, y0, border);
    let p10 = sample_at_f32(img, x0 + 1, y0, border);
    let p01 = sample_at_f32(img, x0, y0 + 1, border);
    let p11 = sample_at_f32(img, x0 + 1, y0 + 1, border);

    let top = p00 * (1.0 - dx) + p10 * dx;
    let bottom = p01 * (1.0 - dx) + p11 * dx;
    top * (1.0 - dy) + bottom * dy
}

#[inline]
fn sample_at_f32<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: isize,
    y: isize,
    border: &BorderMode<f32>,
) -> f32 {
    match (
        map_index(x, img.width(), border),
        map_index(y, img.height(), border),
    ) {
        // SAFETY: `map_index` only returns indices in `[0, len)`.
        (Some(xi), Some(yi)) => unsafe { (*img.get_unchecked(xi, yi)).into() },
        _ => match border {
            BorderMode::Constant(c) => *c,
            _ => unreachable!("non-constant borders map every index of a non-empty axis"),
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::border::BorderMode;
    use crate::image::Image;
    use crate::sample::sample_bilinear_f32;

    #[test]
    fn bilinear_on_2x2_center_and_border_modes() {
        let img = Image::from_vec(2, 2, vec![0u8, 10, 20, 30]).expect("valid image");
        let view = img.as_view();

        let center = sample_bilinear_f32(&view, 0.5, 0.5, &BorderMode::Clamp);
        assert!((center - 15.0).abs() < 1e-6);

        let neg_clamp = sample_bilinear_f32(&view, -0.25, -0.25, &BorderMode::Clamp);
        assert!((neg_clamp - 0.0).abs() < 1e-6);

        let neg_constant = sample_bilinear_f32(&view, -0.25, -0.25, &BorderMode::Constant(100.0));
        // p00/p10/p01 are constant(100), p11 is image(0) -> 43.75
        assert!((neg_constant - 43.75).abs() < 1e-6);
    }

    #[test]
    fn integer_coordinates_hit_samples_exactly() {
        let img = Image::from_fn(4, 3, |x, y| (x * 7 + y * 13) as f32);
        let view = img.as_view();
        for y in 0..3 {
            for x in 0..4 {
                let v = sample_bilinear_f32(&view, x as f32, y as f32, &BorderMode::Reflect101);
                assert_eq!(v, (x * 7 + y * 13) as f32);
            }
        }
    }

    #[test]
    fn empty_image_with_constant_border_returns_fill() {
        let img = Image::<f32>::new_fill(0, 0, 0.0);
        let v = sample_bilinear_f32(&img.as_view(), 1.0, 1.0, &BorderMode::Constant(7.0));
        assert_eq!(v, 7.0);
    }
}
