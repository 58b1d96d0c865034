use glam::Vec3;
use storewalk_scene::SceneGraph;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Full view direction, including pitch.
    pub forward: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(450.0, 30.0, -290.0),
            forward: Vec3::NEG_X,
            fov_degrees: 70.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene from the given view.
    fn render(&self, scene: &SceneGraph, view: &RenderView) -> Self::Output;
}

/// Text renderer for headless use: CLI output, logging, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &SceneGraph, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene '{}' ({} instances, {} lights) ===\n",
            scene.name,
            scene.len(),
            scene.lights.len()
        ));
        out.push_str(&format!(
            "Eye: ({:.1}, {:.1}, {:.1}) forward=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.forward.x,
            view.forward.y,
            view.forward.z,
            view.fov_degrees
        ));

        for instance in scene.instances() {
            let p = instance.transform.position;
            out.push_str(&format!(
                "  {:<28} pos=({:.1}, {:.1}, {:.1})\n",
                instance.name, p.x, p.y, p.z
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storewalk_scene::SceneConfig;

    #[test]
    fn debug_renderer_lists_scene_content() {
        let scene = SceneGraph::assemble(&SceneConfig::retail_store());
        let output = DebugTextRenderer::new().render(&scene, &RenderView::default());

        assert!(output.contains("retail_store"));
        assert!(output.contains("floor"));
        assert!(output.contains("Eye: (450.0, 30.0, -290.0)"));
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 70.0);
    }
}
