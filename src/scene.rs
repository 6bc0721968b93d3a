//! Scene state and the per-frame transform/cull/light/sort pipeline.
//!
//! A [`Scene`] owns the camera, a set of named meshes and a set of named
//! lights. Each frame it flattens every mesh into one triangle list, culls
//! backfaces against the world-space camera position, transforms survivors
//! into view space, projects them, lights them from the world-space
//! geometry, and depth-sorts the result for the painter's algorithm.

use std::collections::HashMap;

use crate::colors;
use crate::light::Light;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;
use crate::render::PolygonFill;

/// Projection and viewport parameters, fixed at scene construction.
#[derive(Debug, Clone, Copy)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    /// Field of view in radians.
    pub fov: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fov: std::f32::consts::FRAC_PI_2,
            z_near: 0.1,
            z_far: 8000.0,
        }
    }
}

/// A lit, projected triangle ready for the 2D fill primitive.
///
/// Points keep their NDC x/y (in [-1, 1]) and the raw projected z used for
/// depth ordering; the viewport mapping happens in [`Scene::draw`].
#[derive(Clone, Debug)]
pub struct ScreenTriangle {
    pub points: [Vec4; 3],
    pub color: u32,
    pub avg_depth: f32,
}

pub struct Scene {
    config: SceneConfig,
    projection: Mat4,
    camera: Vec4,
    camera_direction: Vec4,
    up: Vec4,
    meshes: Vec<Mesh>,
    mesh_names: HashMap<String, usize>,
    lights: Vec<Light>,
    light_names: HashMap<String, usize>,
}

impl Scene {
    /// Creates an empty scene with the camera at the origin looking down +z.
    pub fn new(config: SceneConfig) -> Self {
        let aspect_ratio = config.height as f32 / config.width as f32;
        let projection = Mat4::projection(config.z_near, config.z_far, config.fov, aspect_ratio);

        Self {
            config,
            projection,
            camera: Vec4::point(0.0, 0.0, 0.0),
            camera_direction: Vec4::point(0.0, 0.0, 1.0),
            up: Vec4::point(0.0, 1.0, 0.0),
            meshes: Vec::new(),
            mesh_names: HashMap::new(),
            lights: Vec::new(),
            light_names: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // ============ Meshes & Lights ============

    /// Adds a mesh under `name`, replacing any mesh already so named.
    /// There is no removal; scenes only grow.
    pub fn add_mesh(&mut self, name: impl Into<String>, mesh: Mesh) {
        let name = name.into();
        log::info!("adding mesh '{name}' ({} triangles)", mesh.triangles().len());
        match self.mesh_names.get(&name) {
            Some(&i) => self.meshes[i] = mesh,
            None => {
                self.mesh_names.insert(name, self.meshes.len());
                self.meshes.push(mesh);
            }
        }
    }

    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.mesh_names.get(name).map(|&i| &self.meshes[i])
    }

    pub fn mesh_mut(&mut self, name: &str) -> Option<&mut Mesh> {
        self.mesh_names
            .get(name)
            .copied()
            .map(move |i| &mut self.meshes[i])
    }

    /// Adds a light under `name`, replacing any light already so named.
    pub fn add_light(&mut self, name: impl Into<String>, light: Light) {
        let name = name.into();
        log::info!("adding light '{name}' (brightness {})", light.brightness());
        match self.light_names.get(&name) {
            Some(&i) => self.lights[i] = light,
            None => {
                self.light_names.insert(name, self.lights.len());
                self.lights.push(light);
            }
        }
    }

    pub fn light(&self, name: &str) -> Option<&Light> {
        self.light_names.get(name).map(|&i| &self.lights[i])
    }

    // ============ Camera ============

    pub fn camera_position(&self) -> Vec4 {
        self.camera
    }

    pub fn camera_direction(&self) -> Vec4 {
        self.camera_direction
    }

    /// Adds deltas to the camera position.
    pub fn move_camera(&mut self, dx: f32, dy: f32, dz: f32) {
        self.camera.x += dx;
        self.camera.y += dy;
        self.camera.z += dz;
    }

    /// Rotates the view direction around the X axis about the current
    /// camera position, then renormalizes.
    ///
    /// Repeated small rotations accumulate floating-point drift; that is a
    /// known property of this camera model, kept as-is.
    pub fn rotate_camera_x(&mut self, angle: f32) {
        self.camera_direction =
            (self.camera_direction * Mat4::rotation_x_about(angle, self.camera)).normalize();
    }

    /// Rotates the view direction around the Y axis about the camera.
    pub fn rotate_camera_y(&mut self, angle: f32) {
        self.camera_direction =
            (self.camera_direction * Mat4::rotation_y_about(angle, self.camera)).normalize();
    }

    /// Rotates the view direction around the Z axis about the camera.
    pub fn rotate_camera_z(&mut self, angle: f32) {
        self.camera_direction =
            (self.camera_direction * Mat4::rotation_z_about(angle, self.camera)).normalize();
    }

    // ============ Frame pipeline ============

    /// Runs one frame's transform/cull/light/sort pipeline and returns the
    /// lit triangles in back-to-front draw order.
    pub fn build_frame(&self) -> Vec<ScreenTriangle> {
        let target = Vec4::point(
            self.camera.x + self.camera_direction.x,
            self.camera.y + self.camera_direction.y,
            self.camera.z + self.camera_direction.z,
        );
        let view = Mat4::point_at(self.camera, target, self.up).rigid_inverse();

        // Mesh identity is discarded here: one flat list, one global sort.
        let mut frame = Vec::new();
        for tri in self.meshes.iter().flat_map(|m| m.triangles()) {
            let Some(normal) = tri.normal() else {
                log::debug!("skipping degenerate triangle at {:?}", tri.p[0]);
                continue;
            };

            // Visible iff the face is oriented toward the camera.
            if normal.dot(tri.p[0] - self.camera) >= 0.0 {
                continue;
            }

            let projected = tri.transformed(view).projected(self.projection);

            // Lighting samples the world-space triangle (the same copy the
            // cull test used) so brightness is independent of camera
            // orientation. Negative contributions may cancel positive ones
            // before the final clamp.
            let lum: f32 = self.lights.iter().map(|l| l.luminosity(tri)).sum();
            let color = colors::grayscale(lum.clamp(0.0, 1.0));

            let avg_depth =
                (projected.p[0].z + projected.p[1].z + projected.p[2].z) / 3.0;
            frame.push(ScreenTriangle {
                points: projected.p,
                color,
                avg_depth,
            });
        }

        // Painter's algorithm: farthest first. The sort is stable, so
        // triangles at equal depth keep their insertion order.
        frame.sort_by(|a, b| b.avg_depth.total_cmp(&a.avg_depth));
        frame
    }

    /// Builds the frame and hands each triangle, in draw order, to the fill
    /// primitive with its points mapped to pixel coordinates.
    pub fn draw(&self, fill: &mut impl PolygonFill) {
        for tri in self.build_frame() {
            let points = tri.points.map(|p| self.to_screen(p));
            fill.fill_triangle(points, tri.color);
        }
    }

    /// Maps an NDC point to pixel coordinates (y grows downward).
    pub fn to_screen(&self, p: Vec4) -> Vec2 {
        Vec2::new(
            (p.x + 1.0) * 0.5 * self.config.width as f32,
            (1.0 - p.y) * 0.5 * self.config.height as f32,
        )
    }
}
