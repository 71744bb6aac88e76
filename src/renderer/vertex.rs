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
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const FIELD: [f32; 4] = [0.09, 0.14, 0.11, 1.0];
    pub const FACE: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const FACE_DEAD: [f32; 4] = [0.75, 0.7, 0.55, 1.0];
    pub const FACE_OUTLINE: [f32; 4] = [0.55, 0.38, 0.05, 1.0];
    pub const FEATURES: [f32; 4] = [0.15, 0.08, 0.02, 1.0];
    pub const MOSQUITO_BODY: [f32; 4] = [0.22, 0.2, 0.18, 1.0];
    pub const MOSQUITO_WING: [f32; 4] = [0.8, 0.85, 0.95, 0.45];
    pub const PROBOSCIS: [f32; 4] = [0.1, 0.08, 0.06, 1.0];
    pub const BLOOD: [f32; 3] = [0.75, 0.03, 0.05];
}
