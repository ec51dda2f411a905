//! Indexed triangle meshes.
//!
//! Meshes are plain vertex and index buffers plus a [`Material`]. They come
//! from the procedural builders here or from OBJ/MTL files through `tobj`.

use std::path::Path;
use std::sync::Arc;

use crate::error::LoadError;
use crate::material::Material;
use crate::math::{Vec2, Vec3};
use crate::texture::Texture;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Texture coordinate with (0,0) at the top-left of the image.
    pub uv: Vec2,
}

impl Vertex {
    pub const fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Every three consecutive indices form one counter-clockwise triangle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub material: Material,
}

impl Mesh {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        material: Material,
    ) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
            material,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertices of triangle `index`, or `None` if any index is out of range.
    #[inline]
    pub fn triangle(&self, index: usize) -> Option<[&Vertex; 3]> {
        let i = self.indices.get(index * 3..index * 3 + 3)?;
        Some([
            self.vertices.get(i[0] as usize)?,
            self.vertices.get(i[1] as usize)?,
            self.vertices.get(i[2] as usize)?,
        ])
    }

    /// A `width` x `height` rectangle in the XY plane facing +Z.
    pub fn quad(width: f32, height: f32, material: Material) -> Self {
        let mut mesh = Self::new("quad", Vec::new(), Vec::new(), material);
        mesh.push_face(
            Vec3::ZERO,
            Vec3::RIGHT * (width * 0.5),
            Vec3::UP * (height * 0.5),
            Vec3::new(0.0, 0.0, 1.0),
        );
        mesh
    }

    /// An axis-aligned cube of edge `size` centered on the origin, with
    /// per-face normals and the full texture on every face.
    pub fn cube(size: f32, material: Material) -> Self {
        let h = size * 0.5;
        let x = Vec3::RIGHT;
        let y = Vec3::UP;
        let z = Vec3::new(0.0, 0.0, 1.0);

        let mut mesh = Self::new("cube", Vec::new(), Vec::new(), material);
        // (normal, right, up) with right x up = normal
        for (normal, right, up) in [
            (z, x, y),
            (-z, -x, y),
            (x, -z, y),
            (-x, z, y),
            (y, x, -z),
            (-y, x, z),
        ] {
            mesh.push_face(normal * h, right * h, up * h, normal);
        }
        mesh
    }

    fn push_face(&mut self, center: Vec3, half_right: Vec3, half_up: Vec3, normal: Vec3) {
        let base = self.vertices.len() as u32;
        let corners = [
            (center - half_right + half_up, Vec2::new(0.0, 0.0)),
            (center + half_right + half_up, Vec2::new(1.0, 0.0)),
            (center + half_right - half_up, Vec2::new(1.0, 1.0)),
            (center - half_right - half_up, Vec2::new(0.0, 1.0)),
        ];
        self.vertices
            .extend(corners.iter().map(|&(p, uv)| Vertex::new(p, normal, uv)));
        self.indices
            .extend([base, base + 3, base + 2, base, base + 2, base + 1]);
    }

    /// Replace every normal with the normalized sum of adjacent face normals.
    pub fn recompute_normals(&mut self) {
        let mut sums = vec![Vec3::ZERO; self.vertices.len()];
        for face in self.indices.chunks_exact(3) {
            let [a, b, c] = [face[0] as usize, face[1] as usize, face[2] as usize];
            if a >= sums.len() || b >= sums.len() || c >= sums.len() {
                continue;
            }
            let p = [
                self.vertices[a].position,
                self.vertices[b].position,
                self.vertices[c].position,
            ];
            let n = (p[1] - p[0]).cross(p[2] - p[0]);
            sums[a] += n;
            sums[b] += n;
            sums[c] += n;
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            let n = sum.normalize_or_zero();
            vertex.normal = if n == Vec3::ZERO { Vec3::UP } else { n };
        }
    }

    /// Load every object in an OBJ file, with materials from its MTL library.
    ///
    /// Texture paths are resolved relative to the OBJ file. A texture that
    /// fails to load is logged and left empty, so it samples as white.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>, LoadError> {
        let path = path.as_ref();
        let (models, materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        let materials: Vec<Material> = match materials {
            Ok(materials) => materials
                .iter()
                .map(|m| material_from_mtl(m, base_dir))
                .collect(),
            Err(e) => {
                log::warn!("{}: no usable material library ({})", path.display(), e);
                Vec::new()
            }
        };

        let meshes: Vec<Mesh> = models
            .into_iter()
            .map(|model| {
                let mesh = model.mesh;
                let count = mesh.positions.len() / 3;
                let has_normals = mesh.normals.len() >= count * 3;
                let has_uvs = mesh.texcoords.len() >= count * 2;

                let vertices = (0..count)
                    .map(|i| {
                        let position = Vec3::new(
                            mesh.positions[i * 3],
                            mesh.positions[i * 3 + 1],
                            mesh.positions[i * 3 + 2],
                        );
                        let normal = if has_normals {
                            Vec3::new(
                                mesh.normals[i * 3],
                                mesh.normals[i * 3 + 1],
                                mesh.normals[i * 3 + 2],
                            )
                        } else {
                            Vec3::ZERO
                        };
                        // OBJ puts v=0 at the bottom of the image.
                        let uv = if has_uvs {
                            Vec2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
                        } else {
                            Vec2::ZERO
                        };
                        Vertex::new(position, normal, uv)
                    })
                    .collect();

                let material = mesh
                    .material_id
                    .and_then(|id| materials.get(id))
                    .cloned()
                    .unwrap_or_default();

                let mut out = Mesh::new(model.name, vertices, mesh.indices, material);
                if !has_normals {
                    out.recompute_normals();
                }
                out
            })
            .collect();

        log::info!("loaded {} mesh(es) from {}", meshes.len(), path.display());
        Ok(meshes)
    }
}

fn material_from_mtl(mtl: &tobj::Material, base_dir: &Path) -> Material {
    let defaults = Material::default();
    let color = |c: Option<[f32; 3]>, fallback: Vec3| c.map_or(fallback, |[r, g, b]| Vec3::new(r, g, b));
    Material {
        name: mtl.name.clone(),
        ambient: color(mtl.ambient, defaults.ambient),
        diffuse: color(mtl.diffuse, defaults.diffuse),
        specular: color(mtl.specular, defaults.specular),
        shininess: mtl.shininess.unwrap_or(defaults.shininess),
        texture: load_map(base_dir, mtl.diffuse_texture.as_deref()),
        normal_map: load_map(base_dir, mtl.normal_texture.as_deref()),
        specular_map: load_map(base_dir, mtl.specular_texture.as_deref()),
        alpha_map: load_map(base_dir, mtl.dissolve_texture.as_deref()),
        filter: None,
    }
}

fn load_map(base_dir: &Path, file: Option<&str>) -> Option<Arc<Texture>> {
    let file = file?;
    let path = base_dir.join(file);
    match Texture::from_file(&path) {
        Ok(texture) => Some(Arc::new(texture)),
        Err(e) => {
            log::warn!("texture {} not loaded: {}", path.display(), e);
            None
        }
    }
}
