//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// 0xRRGGBB to an opaque RGBA color
    pub const fn hex(rgb: u32) -> [f32; 4] {
        with_alpha(rgb, 1.0)
    }

    /// 0xRRGGBB to RGBA with the given alpha
    pub const fn with_alpha(rgb: u32, alpha: f32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            alpha,
        ]
    }

    pub const SKY: [f32; 4] = hex(0xcfe8f5);
    pub const GROUND: [f32; 4] = hex(0x58733d);
    pub const SHADOW: [f32; 4] = with_alpha(0x222222, 0.35);
    pub const BOOST_PAD_USED: [f32; 4] = hex(0x9be6ff);
    pub const BOLT: [f32; 4] = hex(0xffffff);
    pub const BARREL: [f32; 4] = hex(0x444444);
    pub const CANNON_BASE: [f32; 4] = hex(0x3b2520);
    pub const OUTLINE: [f32; 4] = hex(0x222222);
    pub const FACE: [f32; 4] = hex(0xffe8b4);
    pub const EYES: [f32; 4] = hex(0x222222);
    pub const SMILE: [f32; 4] = hex(0xb84a0a);
    pub const LIMBS: [f32; 4] = hex(0x612b07);
}

#[cfg(test)]
mod tests {
    use super::colors::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(hex(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x0000ff), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(SHADOW[3], 0.35);
        assert!((GROUND[0] - 0x58 as f32 / 255.0).abs() < 1e-6);
    }
}
