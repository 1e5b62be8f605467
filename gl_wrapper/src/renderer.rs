use crate::geometry::Geometry;
use crate::program::Program;

/// Issues per-frame GL commands. Tracks the bound program to skip redundant
/// `UseProgram` calls.
pub struct FrameRenderer {
    current_program: u32,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    pub fn bind_program(&mut self, program: &Program) {
        if self.current_program != program.id() {
            program.bind();
            self.current_program = program.id();
        }
    }

    /// Clears the color target. Must run before any draw call of the frame.
    pub fn clear(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        self.draw_range(geometry, program, 0, geometry.vertices());
    }

    /// Draws a triangle-list over `count` vertices starting at `first`.
    /// Disjoint ranges of one buffer may be drawn in separate calls.
    pub fn draw_range(&mut self, geometry: &Geometry, program: &Program, first: usize, count: usize) {
        debug_assert!(first + count <= geometry.vertices());

        self.bind_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawArrays(gl::TRIANGLES, first as i32, count as i32);
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}
