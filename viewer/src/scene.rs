use gl_wrapper::geometry::VertexAttribute;

use crate::intensity::{time_to_intensity, DEFAULT_BASE};

#[rustfmt::skip]
const TWO_TRIANGLES: [f32; 18] = [
     0.1, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.3,  0.5, 0.0,

    -0.1, -0.5, 0.0,
    -0.5, -0.5, 0.0,
    -0.3,  0.5, 0.0,
];

#[rustfmt::skip]
const COLORED_TRIANGLE: [f32; 18] = [
    // position         // color
     0.0,  0.5, 0.0,    1.0, 0.0, 0.0,
     0.5, -0.5, 0.0,    0.0, 1.0, 0.0,
    -0.5, -0.5, 0.0,    0.0, 0.0, 1.0,
];

#[derive(Debug, Copy, Clone)]
pub enum Scene {
    /// Two disjoint triangles in one buffer, pulsing red over time.
    TwoTriangles,
    /// One triangle with interpolated per-vertex colors, static.
    ColoredTriangle,
}

impl Scene {
    pub fn config(self) -> SceneConfig {
        match self {
            Scene::TwoTriangles => SceneConfig {
                title: "Two triangles",
                clear_color: [0.0745, 0.3098, 0.1451],
                vertex_src: include_str!("gl_shaders/pos.glsl"),
                fragment_src: include_str!("gl_shaders/pulse.glsl"),
                vertices: &TWO_TRIANGLES,
                attributes: &[VertexAttribute::Vec3],
                draw_calls: &[DrawCall { first: 0, count: 3 }, DrawCall { first: 3, count: 3 }],
                animated_uniform: Some("time"),
            },
            Scene::ColoredTriangle => SceneConfig {
                title: "Colored triangle",
                clear_color: [0.1, 0.1, 0.1],
                vertex_src: include_str!("gl_shaders/pos_color.glsl"),
                fragment_src: include_str!("gl_shaders/vertex_color.glsl"),
                vertices: &COLORED_TRIANGLE,
                attributes: &[VertexAttribute::Vec3, VertexAttribute::Vec3],
                draw_calls: &[DrawCall { first: 0, count: 3 }],
                animated_uniform: None,
            },
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub first: usize,
    pub count: usize,
}

/// Everything the render loop needs to show one scene. Both scenes run
/// through the same loop; only this description differs.
#[derive(Copy, Clone)]
pub struct SceneConfig {
    pub title: &'static str,
    pub clear_color: [f32; 3],
    pub vertex_src: &'static str,
    pub fragment_src: &'static str,
    pub vertices: &'static [f32],
    pub attributes: &'static [VertexAttribute],
    pub draw_calls: &'static [DrawCall],
    pub animated_uniform: Option<&'static str>,
}

impl SceneConfig {
    /// Per-frame uniform value for the elapsed wall-clock time, or `None`
    /// when the scene has no animated uniform.
    pub fn uniform_value(&self, elapsed: f32) -> Option<f32> {
        self.animated_uniform
            .map(|_| time_to_intensity(elapsed, DEFAULT_BASE))
    }

    pub fn stride_floats(&self) -> usize {
        self.attributes.iter().map(|a| a.components()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_triangles_split_the_buffer_into_disjoint_ranges() {
        let config = Scene::TwoTriangles.config();

        assert_eq!(config.stride_floats(), 3);
        assert_eq!(config.vertices.len() / config.stride_floats(), 6);
        assert_eq!(
            config.draw_calls,
            &[DrawCall { first: 0, count: 3 }, DrawCall { first: 3, count: 3 }]
        );

        // Ranges are disjoint and cover the whole buffer.
        let covered: usize = config.draw_calls.iter().map(|c| c.count).sum();
        assert_eq!(covered, 6);
        assert_eq!(config.draw_calls[0].first + config.draw_calls[0].count, config.draw_calls[1].first);
    }

    #[test]
    fn colored_triangle_interleaves_position_and_color() {
        let config = Scene::ColoredTriangle.config();

        assert_eq!(config.stride_floats(), 6);
        assert_eq!(config.vertices.len() / config.stride_floats(), 3);
        assert_eq!(config.draw_calls, &[DrawCall { first: 0, count: 3 }]);
        assert!(config.uniform_value(1.23).is_none());
    }

    #[test]
    fn vertex_data_fills_whole_records() {
        for scene in [Scene::TwoTriangles, Scene::ColoredTriangle] {
            let config = scene.config();
            assert_eq!(config.vertices.len() % config.stride_floats(), 0);
        }
    }

    #[test]
    fn animated_uniform_follows_the_intensity_curve() {
        let config = Scene::TwoTriangles.config();

        assert_eq!(config.uniform_value(0.0), Some(0.0));

        let half = config.uniform_value(0.5).unwrap();
        assert!((half - (10.0_f32.sqrt() - 1.0) / 9.0).abs() < 1e-6);
        assert!((half - 0.2403).abs() < 1e-4);
    }
}
