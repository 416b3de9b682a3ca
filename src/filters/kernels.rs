//! Convolution helpers shared by the neighbourhood filters.
//!
//! All sampling is clamp-to-edge.

use crate::frame::{Frame, Plane};

/// Kernel radius `ceil(3 * sigma)`, at most `limit`.
///
/// Zero for non-positive or NaN sigma.
pub fn kernel_radius(sigma: f32, limit: u32) -> u32 {
    if sigma.is_nan() || sigma <= 0.0 {
        return 0;
    }
    let radius = (3.0 * sigma).ceil();
    if radius >= limit as f32 {
        limit
    } else {
        radius as u32
    }
}

/// Normalized 1D gaussian kernel with radius `ceil(3 * sigma)`.
///
/// The radius never exceeds `max_radius`; sampling is clamp-to-edge, so taps
/// further out than the image extent only repeat the border.
pub fn gaussian_kernel(sigma: f32, max_radius: u32) -> Vec<f32> {
    let radius = kernel_radius(sigma, max_radius) as i64;
    if radius == 0 {
        return vec![1.0];
    }
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| {
            let s = i as f32;
            (-(s * s) / two_sigma_sq).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|w| *w /= sum);
    kernel
}

/// Separable gaussian blur of a single-channel plane.
pub fn blur_plane(plane: &Plane, sigma: f32) -> Plane {
    let kernel = gaussian_kernel(sigma, plane.width.max(plane.height));
    if kernel.len() == 1 {
        return plane.clone();
    }
    let radius = (kernel.len() / 2) as i64;

    let horizontal = Plane::from_fn(plane.width, plane.height, |x, y| {
        kernel
            .iter()
            .enumerate()
            .map(|(i, w)| w * plane.get(x as i64 + i as i64 - radius, y as i64))
            .sum()
    });
    Plane::from_fn(plane.width, plane.height, |x, y| {
        kernel
            .iter()
            .enumerate()
            .map(|(i, w)| w * horizontal.get(x as i64, y as i64 + i as i64 - radius))
            .sum()
    })
}

/// Separable gaussian blur of every channel of a frame, alpha included.
pub fn blur_frame(frame: &Frame, sigma: f32) -> Frame {
    let kernel = gaussian_kernel(sigma, frame.width().max(frame.height()));
    if kernel.len() == 1 {
        return frame.clone();
    }
    let radius = (kernel.len() / 2) as i64;

    let convolve = |sample: &dyn Fn(i64) -> [f32; 4]| {
        let mut acc = [0.0f32; 4];
        for (i, w) in kernel.iter().enumerate() {
            let p = sample(i as i64 - radius);
            for c in 0..4 {
                acc[c] += w * p[c];
            }
        }
        acc
    };

    let horizontal =
        frame.map_pixels(|x, y, _| convolve(&|d: i64| frame.get_clamped(x as i64 + d, y as i64)));
    horizontal.map_pixels(|x, y, _| convolve(&|d: i64| horizontal.get_clamped(x as i64, y as i64 + d)))
}

/// 3x3 Sobel gradient `(gx, gy)` at a position.
pub fn sobel_at(plane: &Plane, x: i64, y: i64) -> (f32, f32) {
    let p = |dx: i64, dy: i64| plane.get(x + dx, y + dy);

    let gx = -p(-1, -1) - 2.0 * p(-1, 0) - p(-1, 1) + p(1, -1) + 2.0 * p(1, 0) + p(1, 1);
    let gy = -p(-1, -1) - 2.0 * p(0, -1) - p(1, -1) + p(-1, 1) + 2.0 * p(0, 1) + p(1, 1);
    (gx, gy)
}

/// Sobel gradient planes of a luminance plane.
pub fn sobel_planes(plane: &Plane) -> (Plane, Plane) {
    let mut gx = Plane::new(plane.width, plane.height);
    let mut gy = Plane::new(plane.width, plane.height);
    for y in 0..plane.height {
        for x in 0..plane.width {
            let (dx, dy) = sobel_at(plane, x as i64, y as i64);
            gx.set(x, y, dx);
            gy.set(x, y, dy);
        }
    }
    (gx, gy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_kernel_normalized() {
        for sigma in [0.5, 1.0, 2.0, 4.75] {
            let kernel = gaussian_kernel(sigma, 64);
            let sum: f32 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            assert_eq!(kernel.len(), 2 * (3.0 * sigma).ceil() as usize + 1);
            // Symmetric, peak in the middle
            let mid = kernel.len() / 2;
            assert_eq!(kernel[0], kernel[kernel.len() - 1]);
            assert!(kernel.iter().all(|&w| w <= kernel[mid]));
        }
        assert_eq!(gaussian_kernel(0.0, 64), vec![1.0]);
        assert_eq!(gaussian_kernel(f32::NAN, 64), vec![1.0]);
    }

    #[test]
    fn test_kernel_radius_is_capped() {
        assert_eq!(kernel_radius(2.0, 100), 6);
        assert_eq!(kernel_radius(20_000.0, 4), 4);
        assert_eq!(kernel_radius(f32::INFINITY, 8), 8);
        assert_eq!(kernel_radius(-1.0, 8), 0);

        let kernel = gaussian_kernel(20_000.0, 4);
        assert_eq!(kernel.len(), 9);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(kernel.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_huge_sigma_blur_on_tiny_plane() {
        let plane = Plane::from_fn(4, 4, |x, _| x as f32 / 3.0);
        let blurred = blur_plane(&plane, 20_000.0);
        assert_eq!(blurred.data.len(), 16);
        assert!(blurred.data.iter().all(|v| v.is_finite() && (0.0..=1.0).contains(v)));

        let frame = Frame::new(4, 4, [0.25, 0.5, 0.75, 1.0]);
        let blurred = blur_frame(&frame, 20_000.0);
        assert_eq!((blurred.width(), blurred.height()), (4, 4));
        assert!(blurred
            .pixels()
            .iter()
            .all(|p| (p[0] - 0.25).abs() < 1e-5 && (p[3] - 1.0).abs() < 1e-5));
    }

    #[test]
    fn test_blur_constant_plane_is_unchanged() {
        let plane = Plane::from_fn(9, 7, |_, _| 0.4);
        let blurred = blur_plane(&plane, 1.5);
        assert!(blurred.data.iter().all(|v| (v - 0.4).abs() < 1e-5));
    }

    #[test]
    fn test_sobel_on_ramp() {
        let plane = Plane::from_fn(8, 8, |x, _| x as f32 * 0.1);
        let (gx, gy) = sobel_at(&plane, 4, 4);
        assert!((gx - 0.8).abs() < 1e-5);
        assert!(gy.abs() < 1e-6);
    }
}
