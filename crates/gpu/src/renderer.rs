use foundation::color::{BLACK, Color};
use foundation::math::Mat4;
use geometry::Topology;
use scene::{RenderState, Scene, ShaderId, UniformValue};

/// Depth range for the fill pass of a wireframe-styled mesh. Pushing the
/// fill slightly deeper lets the line pass win the depth test along
/// shared edges without polygon-offset support.
pub const WIREFRAME_FILL_DEPTH_RANGE: [f32; 2] = [0.01, 1.0];
pub const FULL_DEPTH_RANGE: [f32; 2] = [0.0, 1.0];

/// Frame-start clear values: colour, depth and stencil every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearSpec {
    pub color: Color,
    pub depth: f32,
    pub stencil: i32,
}

impl Default for ClearSpec {
    fn default() -> Self {
        Self {
            color: BLACK,
            depth: 1.0,
            stencil: 0,
        }
    }
}

/// Which of a mesh's index buffers a pass draws from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PassGeometry {
    /// The mesh's own index buffer, drawn as triangles.
    Fill(Topology),
    /// The derived wireframe index buffer, drawn as lines.
    Wireframe,
}

/// One backend draw call, fully resolved on the CPU side.
///
/// `mesh_index` keys the backend's vertex/index buffer cache; everything
/// else is carried by value so the pass can be executed without looking
/// back into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPass {
    pub mesh_index: usize,
    pub geometry: PassGeometry,
    pub shader: ShaderId,
    pub object_to_clip: Mat4,
    pub color: Color,
    pub uniforms: Vec<(String, UniformValue)>,
    pub depth_range: [f32; 2],
    pub state: RenderState,
}

/// Screen placement for one floating label, in CSS pixels from the
/// canvas top-left. `None` while the label is hidden (behind the camera
/// or facing away).
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub label_index: usize,
    pub screen: Option<[f32; 2]>,
}

/// Everything a backend needs to paint one frame, in submission order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FramePlan {
    pub passes: Vec<DrawPass>,
    pub labels: Vec<LabelPlacement>,
}

/// Walks the scene in mesh order and emits the ordered pass list plus
/// label placements for a viewport of `width` x `height` pixels.
///
/// Mesh order is paint order. A wireframe-styled mesh contributes two
/// passes back to back, fill first.
pub fn plan_frame(scene: &Scene, width: f32, height: f32) -> FramePlan {
    let view = scene.camera.view();
    let view_proj = scene.camera.projection().mul(view);

    let mut plan = FramePlan::default();

    for (mesh_index, mesh) in scene.meshes().iter().enumerate() {
        let object_to_clip = view_proj.mul(mesh.object_to_world());
        let uniforms = mesh.uniforms().to_vec();

        let fill_depth = if mesh.style.has_wireframe() {
            WIREFRAME_FILL_DEPTH_RANGE
        } else {
            FULL_DEPTH_RANGE
        };

        plan.passes.push(DrawPass {
            mesh_index,
            geometry: PassGeometry::Fill(mesh.geometry.topology),
            shader: mesh.shader,
            object_to_clip,
            color: mesh.fill_color,
            uniforms: uniforms.clone(),
            depth_range: fill_depth,
            state: mesh.state,
        });

        if mesh.wireframe_indices.is_some() {
            plan.passes.push(DrawPass {
                mesh_index,
                geometry: PassGeometry::Wireframe,
                shader: mesh.shader,
                object_to_clip,
                color: mesh.outline_color,
                uniforms,
                depth_range: FULL_DEPTH_RANGE,
                state: mesh.state,
            });
        }
    }

    for (label_index, label) in scene.labels().iter().enumerate() {
        let mut screen = None;

        let visible = match label.facing {
            // Camera space looks down -z; a normal with positive z
            // points back at the camera.
            Some(normal) => view.transform_dir(normal).z > 0.0,
            None => true,
        };

        if visible {
            let clip = view_proj.transform(label.position);
            if clip.w > 0.0 {
                let ndc_x = clip.x / clip.w;
                let ndc_y = clip.y / clip.w;
                screen = Some([
                    (ndc_x * 0.5 + 0.5) * width,
                    (0.5 - ndc_y * 0.5) * height,
                ]);
            }
        }

        plan.labels.push(LabelPlacement {
            label_index,
            screen,
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::{FULL_DEPTH_RANGE, PassGeometry, WIREFRAME_FILL_DEPTH_RANGE, plan_frame};
    use foundation::color::{Color, WHITE};
    use foundation::math::Vec3;
    use scene::{DrawStyle, Scene};

    const RED: Color = [1.0, 0.2, 0.2];

    fn scene() -> Scene {
        let mut s = Scene::new(1.0);
        s.camera.update_matrices();
        s
    }

    #[test]
    fn solid_mesh_emits_one_pass() {
        let mut s = scene();
        s.add_sphere_mesh(Vec3::ZERO, 1.0, 1, WHITE).expect("sphere");
        let plan = plan_frame(&s, 800.0, 600.0);
        assert_eq!(plan.passes.len(), 1);
        assert_eq!(plan.passes[0].depth_range, FULL_DEPTH_RANGE);
        assert_eq!(plan.passes[0].color, WHITE);
    }

    #[test]
    fn wireframe_mesh_emits_fill_then_lines() {
        let mut s = scene();
        let geometry = geometry::shapes::octahedron();
        s.add_mesh(DrawStyle::WireframeTris, geometry, None, None, WHITE, RED);
        let plan = plan_frame(&s, 800.0, 600.0);
        assert_eq!(plan.passes.len(), 2);
        assert!(matches!(plan.passes[0].geometry, PassGeometry::Fill(_)));
        assert_eq!(plan.passes[0].depth_range, WIREFRAME_FILL_DEPTH_RANGE);
        assert_eq!(plan.passes[1].geometry, PassGeometry::Wireframe);
        assert_eq!(plan.passes[1].depth_range, FULL_DEPTH_RANGE);
        assert_eq!(plan.passes[1].color, RED);
    }

    #[test]
    fn origin_label_lands_at_screen_centre() {
        let mut s = scene();
        s.add_floating_text("origin", Vec3::ZERO, None);
        let plan = plan_frame(&s, 800.0, 600.0);
        let screen = plan.labels[0].screen.expect("visible");
        assert!((screen[0] - 400.0).abs() < 1e-2);
        assert!((screen[1] - 300.0).abs() < 1e-2);
    }

    #[test]
    fn label_behind_camera_is_hidden() {
        let mut s = scene();
        // Camera sits at z = 3 looking down -z.
        s.add_floating_text("behind", Vec3::new(0.0, 0.0, 10.0), None);
        let plan = plan_frame(&s, 800.0, 600.0);
        assert!(plan.labels[0].screen.is_none());
    }

    #[test]
    fn facing_normal_culls_the_label() {
        let mut s = scene();
        s.add_floating_text("front", Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 1.0)));
        s.add_floating_text("back", Vec3::ZERO, Some(Vec3::new(0.0, 0.0, -1.0)));
        let plan = plan_frame(&s, 800.0, 600.0);
        assert!(plan.labels[0].screen.is_some());
        assert!(plan.labels[1].screen.is_none());
    }

    #[test]
    fn whole_scene_plans_without_panicking() {
        let mut s = scene();
        s.add_sphere_mesh(Vec3::new(0.5, 0.0, 0.0), 0.5, 2, WHITE)
            .expect("sphere");
        s.add_line_mesh(
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 0.0),
            0.02,
            Some(0.06),
            Some(0.1),
            RED,
        );
        s.add_circle_line_mesh(Vec3::ZERO, 32, 1.0, 0.05, WHITE);
        s.add_measure(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            0.4,
            "2.0",
            Vec3::ZERO,
            WHITE,
        );
        let plan = plan_frame(&s, 1280.0, 720.0);
        assert_eq!(plan.passes.len(), s.meshes().len());
        assert_eq!(plan.labels.len(), 1);
    }
}
