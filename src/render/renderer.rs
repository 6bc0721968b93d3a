//! CPU color buffer with a scanline triangle fill.
//!
//! Uses the flat-top/flat-bottom decomposition:
//! 1. Sort vertices by Y coordinate
//! 2. Split the triangle into flat-top and/or flat-bottom halves
//! 3. Rasterize each scanline from left to right

use super::PolygonFill;
use crate::colors;
use crate::math::vec2::Vec2;

pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.color_buffer = vec![colors::BACKGROUND; (width * height) as usize];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = (y as u32 * self.width + x as u32) as usize;
            self.color_buffer[index] = color;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.color_buffer[(y * self.width + x) as usize]
    }

    /// The color buffer as ARGB8888 bytes for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: the buffer is a contiguous Vec<u32>; reinterpreting it as
        // 4x as many bytes stays within the same allocation.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    fn fill_scanline(&mut self, y: i32, x_left: i32, x_right: i32, color: u32) {
        for x in x_left..=x_right {
            self.set_pixel(x, y, color);
        }
    }

    fn sort_vertices(v0: &mut Vec2, v1: &mut Vec2, v2: &mut Vec2) {
        if v1.y < v0.y {
            std::mem::swap(v0, v1);
        }
        if v2.y < v1.y {
            std::mem::swap(v1, v2);
        }
        if v1.y < v0.y {
            std::mem::swap(v0, v1);
        }
    }

    /// Midpoint where the triangle splits into two flat halves. Assumes
    /// the points are sorted by Y already.
    fn find_triangle_split_point(v0: Vec2, v1: Vec2, v2: Vec2) -> Vec2 {
        let x_slope = (v2.x - v0.x) / (v2.y - v0.y);
        Vec2::new(v0.x + x_slope * (v1.y - v0.y), v1.y)
    }

    fn fill_flat_bottom_triangle(&mut self, v0: Vec2, v1: Vec2, v2: Vec2, color: u32) {
        let inv_slope_1 = (v1.x - v0.x) / (v1.y - v0.y);
        let inv_slope_2 = (v2.x - v0.x) / (v2.y - v0.y);

        let y_start = v0.y.ceil() as i32;
        let y_end = v1.y.floor() as i32;

        for y in y_start..=y_end {
            let dy = y as f32 - v0.y;
            let x1 = v0.x + inv_slope_1 * dy;
            let x2 = v0.x + inv_slope_2 * dy;
            // Don't assume which is left/right - use min/max
            self.fill_scanline(y, x1.min(x2).ceil() as i32, x1.max(x2).floor() as i32, color);
        }
    }

    fn fill_flat_top_triangle(&mut self, v0: Vec2, v1: Vec2, v2: Vec2, color: u32) {
        let inv_slope_1 = (v2.x - v0.x) / (v2.y - v0.y);
        let inv_slope_2 = (v2.x - v1.x) / (v2.y - v1.y);

        let y_start = v0.y.ceil() as i32;
        let y_end = v2.y.floor() as i32;

        for y in y_start..=y_end {
            let dy = y as f32 - v0.y;
            let x1 = v0.x + inv_slope_1 * dy;
            let x2 = v1.x + inv_slope_2 * dy;
            self.fill_scanline(y, x1.min(x2).ceil() as i32, x1.max(x2).floor() as i32, color);
        }
    }
}

impl PolygonFill for Renderer {
    fn fill_triangle(&mut self, points: [Vec2; 3], color: u32) {
        let [mut v0, mut v1, mut v2] = points;
        Self::sort_vertices(&mut v0, &mut v1, &mut v2);

        // Flat-bottom triangle (bottom two vertices share a y)
        if (v1.y - v2.y).abs() < f32::EPSILON {
            self.fill_flat_bottom_triangle(v0, v1, v2, color);
            return;
        }

        // Flat-top triangle (top two vertices share a y)
        if (v0.y - v1.y).abs() < f32::EPSILON {
            self.fill_flat_top_triangle(v0, v1, v2, color);
            return;
        }

        // General case: split into flat-bottom and flat-top halves
        let split_point = Self::find_triangle_split_point(v0, v1, v2);
        self.fill_flat_bottom_triangle(v0, v1, split_point, color);
        self.fill_flat_top_triangle(v1, split_point, v2, color);
    }
}
