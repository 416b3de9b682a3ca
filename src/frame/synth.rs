//! Synthetic image generation for testing.
//!
//! Generates test images like gradients, checkerboards, and noise
//! for unit and integration tests.

use super::Frame;

/// Generate a frame of a single colour.
pub fn generate_solid(width: u32, height: u32, rgba: [f32; 4]) -> Frame {
    Frame::new(width, height, rgba)
}

/// Generate a left-to-right grey ramp from 0.0 to 1.0.
pub fn generate_horizontal_gradient(width: u32, height: u32) -> Frame {
    let denom = (width.max(2) - 1) as f32;
    Frame::new(width, height, [0.0; 4]).map_pixels(|x, _, _| {
        let v = x as f32 / denom;
        [v, v, v, 1.0]
    })
}

/// Generate a top-to-bottom grey ramp from 0.0 to 1.0.
pub fn generate_vertical_gradient(width: u32, height: u32) -> Frame {
    let denom = (height.max(2) - 1) as f32;
    Frame::new(width, height, [0.0; 4]).map_pixels(|_, y, _| {
        let v = y as f32 / denom;
        [v, v, v, 1.0]
    })
}

/// Generate a black/white checkerboard with square cells.
pub fn generate_checkerboard(width: u32, height: u32, cell: u32) -> Frame {
    let cell = cell.max(1);
    Frame::new(width, height, [0.0; 4]).map_pixels(|x, y, _| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            [1.0, 1.0, 1.0, 1.0]
        } else {
            [0.0, 0.0, 0.0, 1.0]
        }
    })
}

/// Generate vertical colour bars (white, yellow, cyan, green, magenta, red, blue, black).
pub fn generate_color_bars(width: u32, height: u32) -> Frame {
    const BARS: [[f32; 3]; 8] = [
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 1.0],
        [0.0, 1.0, 0.0],
        [1.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 0.0],
    ];
    Frame::new(width, height, [0.0; 4]).map_pixels(|x, _, _| {
        let idx = ((x as usize * BARS.len()) / width as usize).min(BARS.len() - 1);
        let [r, g, b] = BARS[idx];
        [r, g, b, 1.0]
    })
}

/// Generate RGB noise.
///
/// Uses a simple linear congruential generator for reproducibility.
pub fn generate_noise(width: u32, height: u32, seed: u64) -> Frame {
    let mut state = seed;
    let a: u64 = 6364136223846793005;
    let c: u64 = 1442695040888963407;
    let mut next = move || {
        state = state.wrapping_mul(a).wrapping_add(c);
        (state >> 40) as f32 / (1u64 << 24) as f32
    };

    Frame::new(width, height, [0.0; 4]).map_pixels(|_, _, _| [next(), next(), next(), 1.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let frame = generate_horizontal_gradient(11, 2);
        assert_eq!(frame.get(0, 1)[0], 0.0);
        assert_eq!(frame.get(10, 1)[0], 1.0);
        assert!((frame.get(5, 0)[1] - 0.5).abs() < 1e-6);

        let frame = generate_vertical_gradient(2, 5);
        assert_eq!(frame.get(0, 4)[2], 1.0);
    }

    #[test]
    fn test_checkerboard_cells() {
        let frame = generate_checkerboard(8, 8, 2);
        assert_eq!(frame.get(0, 0)[0], 1.0);
        assert_eq!(frame.get(2, 0)[0], 0.0);
        assert_eq!(frame.get(2, 2)[0], 1.0);
    }

    #[test]
    fn test_noise_is_reproducible() {
        let a = generate_noise(16, 16, 42);
        let b = generate_noise(16, 16, 42);
        let c = generate_noise(16, 16, 7);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.pixels().iter().all(|p| p[..3].iter().all(|v| (0.0..1.0).contains(v))));
    }
}
