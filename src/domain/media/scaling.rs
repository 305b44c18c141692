// SPDX-License-Identifier: MPL-2.0
//! Aspect-preserving downscale-to-fit.
//!
//! Media that fits the container is shown at native size. Anything larger is
//! shrunk in two passes: first the width is clamped to the container and the
//! height follows the native aspect ratio, then, if the height still
//! overflows, the height is clamped and the width recomputed from the native
//! ratio. Both bounds hold after the second pass.

use super::Dimensions;

/// Computes the render size of `native` inside `container`.
///
/// Never upscales. Returns `native` unchanged when the container is empty
/// (nothing laid out yet) or when native already fits. Results are at least
/// one pixel on each side.
#[must_use]
pub fn fit_within(native: Dimensions, container: Dimensions) -> Dimensions {
    if native.is_empty() || container.is_empty() {
        return native;
    }
    if native.width <= container.width && native.height <= container.height {
        return native;
    }

    let native_w = f64::from(native.width);
    let native_h = f64::from(native.height);

    let mut width = native.width;
    let mut height = native.height;

    if width > container.width {
        width = container.width;
        height = scaled(native_h, f64::from(container.width), native_w);
    }

    if height > container.height {
        height = container.height;
        width = scaled(native_w, f64::from(container.height), native_h).min(container.width);
    }

    Dimensions::new(width.max(1), height.max(1))
}

/// `value * numerator / denominator`, rounded to the nearest pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled(value: f64, numerator: f64, denominator: f64) -> u32 {
    (value * numerator / denominator).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(d: Dimensions) -> f64 {
        f64::from(d.width) / f64::from(d.height)
    }

    #[test]
    fn fitting_media_keeps_native_size() {
        let native = Dimensions::new(320, 200);
        assert_eq!(fit_within(native, Dimensions::new(800, 600)), native);
        assert_eq!(fit_within(native, Dimensions::new(320, 200)), native);
    }

    #[test]
    fn wide_media_is_width_bound() {
        let target = fit_within(Dimensions::new(1920, 1080), Dimensions::new(600, 400));
        assert!(target.width <= 600);
        assert!(target.height <= 400);
        assert!((ratio(target) - 1920.0 / 1080.0).abs() < 0.01);
        assert_eq!(target.width, 600);
    }

    #[test]
    fn tall_media_is_height_bound() {
        let target = fit_within(Dimensions::new(1000, 3000), Dimensions::new(800, 600));
        assert_eq!(target.height, 600);
        assert_eq!(target.width, 200);
    }

    #[test]
    fn overflow_on_both_sides_respects_both_bounds() {
        // Width pass alone would leave the height at 750.
        let target = fit_within(Dimensions::new(2000, 1500), Dimensions::new(1000, 500));
        assert_eq!(target, Dimensions::new(667, 500));
    }

    #[test]
    fn only_height_overflowing() {
        let target = fit_within(Dimensions::new(500, 900), Dimensions::new(800, 600));
        assert_eq!(target, Dimensions::new(333, 600));
    }

    #[test]
    fn extreme_ratio_never_collapses_to_zero() {
        let target = fit_within(Dimensions::new(10_000, 1), Dimensions::new(100, 100));
        assert_eq!(target, Dimensions::new(100, 1));
    }

    #[test]
    fn empty_container_leaves_native() {
        let native = Dimensions::new(1920, 1080);
        assert_eq!(fit_within(native, Dimensions::default()), native);
    }
}
