use std::ffi::c_void;

use thiserror::Error;

use gl::types::GLuint;

/// Uploads an immutable, interleaved vertex list and describes its layout.
///
/// Attribute slots are assigned in declaration order; offsets accumulate from
/// the start of a vertex record and the stride is the sum of all components.
pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Stride of one vertex record, in floats.
    pub fn stride_floats(&self) -> usize {
        self.attributes.iter().map(|a| a.components()).sum()
    }

    pub fn build(self) -> Result<Geometry, GeometryError> {
        let stride = self.stride_floats();

        if stride == 0 {
            return Err(GeometryError::NoAttributes);
        }

        if self.data.len() % stride != 0 {
            return Err(GeometryError::InvalidDataLength {
                len: self.data.len(),
                stride,
            });
        }

        let mut vao: GLuint = 0;
        let mut vbo: GLuint = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.data.len() * std::mem::size_of::<f32>()) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (slot, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    slot as u32,
                    attr.components() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (stride * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                gl::EnableVertexAttribArray(slot as u32);

                offset += attr.components();
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        Ok(Geometry {
            vao,
            vbo,
            vertices: self.data.len() / stride,
            stride,
        })
    }
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("no vertex attributes declared")]
    NoAttributes,
    #[error("data length {len} is not a multiple of the vertex stride ({stride} floats)")]
    InvalidDataLength { len: usize, stride: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn components(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

/// Write-once vertex geometry. No dynamic updates, no index buffer.
pub struct Geometry {
    vao: GLuint,
    vbo: GLuint,
    vertices: usize,
    stride: usize,
}

impl Geometry {
    pub fn vao(&self) -> GLuint {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    pub fn stride_floats(&self) -> usize {
        self.stride
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_sums_attribute_components() {
        let builder = GeometryBuilder::new(&[])
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3);

        assert_eq!(builder.stride_floats(), 6);

        let builder = GeometryBuilder::new(&[])
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Float);

        assert_eq!(builder.stride_floats(), 3);
    }

    #[test]
    fn mismatched_data_length_is_rejected() {
        // 7 floats cannot hold whole vec3 records. Rejected before any GL call.
        let data = [0.0; 7];
        let result = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec3)
            .build();

        assert!(matches!(
            result,
            Err(GeometryError::InvalidDataLength { len: 7, stride: 3 })
        ));
    }

    #[test]
    fn empty_layout_is_rejected() {
        let data = [0.0; 3];
        let result = GeometryBuilder::new(&data).build();

        assert!(matches!(result, Err(GeometryError::NoAttributes)));
    }
}
