//! Flow-based extended difference of gaussians (XDoG).
//!
//! Implements a line-drawing stylisation in four passes:
//! 1. Build the structure tensor of luminance and diffuse it to get a smooth
//!    edge tangent flow
//! 2. Evaluate a sharpened DoG along the gradient direction
//! 3. Smooth the response along the tangent flow (line integral convolution)
//! 4. Apply the soft tanh threshold

use super::kernels::{kernel_radius, sobel_planes};
use super::{Filter, FilterParams, FilterType, XdogParams};
use crate::frame::{Frame, Plane};

/// Per-pixel unit gradient and tangent directions.
pub struct FlowField {
    width: u32,
    height: u32,
    gradient: Vec<[f32; 2]>,
    tangent: Vec<[f32; 2]>,
}

impl FlowField {
    /// Derive the flow from the diffused structure tensor of `lum`.
    pub fn from_luminance(lum: &Plane, iterations: u32) -> Self {
        let (gx, gy) = sobel_planes(lum);
        let mut e = product(&gx, &gx);
        let mut f = product(&gx, &gy);
        let mut g = product(&gy, &gy);
        for _ in 0..iterations {
            e = box3(&e);
            f = box3(&f);
            g = box3(&g);
        }

        let len = lum.data.len();
        let mut gradient = Vec::with_capacity(len);
        let mut tangent = Vec::with_capacity(len);
        for i in 0..len {
            let (e, f, g) = (e.data[i], f.data[i], g.data[i]);
            let lambda1 = 0.5 * (e + g + ((e - g) * (e - g) + 4.0 * f * f).sqrt());

            // Major eigenvector points across edges
            let mut v = [f, lambda1 - e];
            if v[0] * v[0] + v[1] * v[1] < 1e-12 {
                v = [lambda1 - g, f];
            }
            let n = (v[0] * v[0] + v[1] * v[1]).sqrt();
            let grad = if n > 1e-6 {
                [v[0] / n, v[1] / n]
            } else {
                [1.0, 0.0]
            };
            gradient.push(grad);
            tangent.push([-grad[1], grad[0]]);
        }

        Self {
            width: lum.width,
            height: lum.height,
            gradient,
            tangent,
        }
    }

    fn index(&self, x: f32, y: f32) -> usize {
        let cx = (x.round() as i64).clamp(0, self.width as i64 - 1) as usize;
        let cy = (y.round() as i64).clamp(0, self.height as i64 - 1) as usize;
        cy * self.width as usize + cx
    }

    pub fn gradient_at(&self, x: f32, y: f32) -> [f32; 2] {
        self.gradient[self.index(x, y)]
    }

    pub fn tangent_at(&self, x: f32, y: f32) -> [f32; 2] {
        self.tangent[self.index(x, y)]
    }
}

fn product(a: &Plane, b: &Plane) -> Plane {
    Plane {
        width: a.width,
        height: a.height,
        data: a.data.iter().zip(&b.data).map(|(x, y)| x * y).collect(),
    }
}

fn box3(plane: &Plane) -> Plane {
    Plane::from_fn(plane.width, plane.height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let mut sum = 0.0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                sum += plane.get(x + dx, y + dy);
            }
        }
        sum / 9.0
    })
}

fn gauss(s: f32, sigma: f32) -> f32 {
    (-(s * s) / (2.0 * sigma * sigma)).exp()
}

/// Sharpened DoG `(1 + p) * G(sigma) - p * G(k * sigma)` sampled along the gradient.
fn gradient_dog(lum: &Plane, flow: &FlowField, params: &XdogParams) -> Plane {
    let sigma_c = params.sigma.max(0.1);
    let sigma_s = sigma_c * params.k.max(1.0);
    let radius = kernel_radius(sigma_s, lum.width.max(lum.height)) as i64;

    Plane::from_fn(lum.width, lum.height, |x, y| {
        let (px, py) = (x as f32, y as f32);
        let [gx, gy] = flow.gradient_at(px, py);
        let (mut sum_c, mut w_c, mut sum_s, mut w_s) = (0.0, 0.0, 0.0, 0.0);
        for i in -radius..=radius {
            let s = i as f32;
            let v = lum.sample_bilinear(px + s * gx, py + s * gy);
            let wc = gauss(s, sigma_c);
            let ws = gauss(s, sigma_s);
            sum_c += wc * v;
            w_c += wc;
            sum_s += ws * v;
            w_s += ws;
        }
        (1.0 + params.p) * (sum_c / w_c) - params.p * (sum_s / w_s)
    })
}

/// Line integral convolution of `response` along the tangent flow.
fn flow_smooth(response: &Plane, flow: &FlowField, sigma: f32) -> Plane {
    let steps = kernel_radius(sigma, response.width.max(response.height)) as i64;
    if steps == 0 {
        return response.clone();
    }

    Plane::from_fn(response.width, response.height, |x, y| {
        let mut sum = response.get(x as i64, y as i64);
        let mut weight = 1.0;

        for sign in [1.0f32, -1.0] {
            let (mut px, mut py) = (x as f32, y as f32);
            let start = flow.tangent_at(px, py);
            let mut dir = [start[0] * sign, start[1] * sign];
            for i in 1..=steps {
                px += dir[0];
                py += dir[1];
                if px < -0.5
                    || py < -0.5
                    || px > response.width as f32 - 0.5
                    || py > response.height as f32 - 0.5
                {
                    break;
                }
                let w = gauss(i as f32, sigma);
                sum += w * response.sample_bilinear(px, py);
                weight += w;

                // Keep walking the same way along the flow
                let t = flow.tangent_at(px, py);
                dir = if t[0] * dir[0] + t[1] * dir[1] < 0.0 {
                    [-t[0], -t[1]]
                } else {
                    t
                };
            }
        }
        sum / weight
    })
}

/// Soft threshold: 1 above `epsilon`, tanh falloff below.
#[inline]
pub fn soft_threshold(u: f32, epsilon: f32, phi: f32) -> f32 {
    if u >= epsilon {
        1.0
    } else {
        1.0 + (phi * (u - epsilon)).tanh()
    }
}

pub struct XdogFilter;

impl Filter for XdogFilter {
    fn apply(&self, frame: &Frame, params: &FilterParams) -> Frame {
        let defaults = XdogParams::default();
        let p = match params {
            FilterParams::Xdog(p) => p,
            _ => &defaults,
        };

        let lum = frame.luminance_plane();
        let flow = FlowField::from_luminance(&lum, p.tensor_iterations);
        let response = gradient_dog(&lum, &flow, p);
        let mut smoothed = flow_smooth(&response, &flow, p.flow_sigma);

        if p.threshold {
            smoothed
                .data
                .iter_mut()
                .for_each(|u| *u = soft_threshold(*u, p.epsilon, p.phi));
        }
        frame.with_gray(&smoothed)
    }

    fn filter_type(&self) -> FilterType {
        FilterType::Xdog
    }
}
