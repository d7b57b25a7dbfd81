use farmbot_core::Shape;
use glam::{Mat4, Vec3};

// Tessellation of the round primitives
const CYLINDER_SEGMENTS: u32 = 32;
const SPHERE_STACKS: u32 = 12;
const SPHERE_SLICES: u32 = 18;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// Slot of each primitive's unit mesh in the renderer's mesh table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Box = 0,
    Cylinder = 1,
    Sphere = 2,
    Plane = 3,
}

pub const MESH_KINDS: [MeshKind; 4] = [
    MeshKind::Box,
    MeshKind::Cylinder,
    MeshKind::Sphere,
    MeshKind::Plane,
];

impl MeshKind {
    pub fn of(shape: &Shape) -> Self {
        match shape {
            Shape::Box { .. } => MeshKind::Box,
            Shape::Cylinder { .. } => MeshKind::Cylinder,
            Shape::Sphere { .. } => MeshKind::Sphere,
            Shape::Plane { .. } => MeshKind::Plane,
        }
    }

    pub fn build(self) -> MeshData {
        match self {
            MeshKind::Box => unit_box(),
            MeshKind::Cylinder => unit_cylinder(CYLINDER_SEGMENTS),
            MeshKind::Sphere => unit_sphere(SPHERE_STACKS, SPHERE_SLICES),
            MeshKind::Plane => unit_plane(),
        }
    }
}

/// Scale that turns the unit mesh of `shape` into the shape itself.
pub fn shape_scale(shape: &Shape) -> Vec3 {
    match *shape {
        Shape::Box { size } => size,
        Shape::Cylinder { radius, height } => Vec3::new(radius, height, radius),
        Shape::Sphere { radius } => Vec3::splat(radius),
        Shape::Plane { width, height } => Vec3::new(width, height, 1.0),
    }
}

/// Model matrix for a drawable: node world transform times primitive scale.
pub fn instance_model(world: Mat4, shape: &Shape) -> Mat4 {
    world * Mat4::from_scale(shape_scale(shape))
}

/// Group a sequence of instance kinds into runs of equal kind, numbering
/// instances from `first`. Order is kept, so sorted draws stay sorted.
pub fn kind_runs(
    kinds: impl IntoIterator<Item = MeshKind>,
    first: u32,
) -> Vec<(MeshKind, std::ops::Range<u32>)> {
    let mut runs: Vec<(MeshKind, std::ops::Range<u32>)> = Vec::new();
    let mut i = first;
    for kind in kinds {
        match runs.last_mut() {
            Some((k, range)) if *k == kind => range.end = i + 1,
            _ => runs.push((kind, i..i + 1)),
        }
        i += 1;
    }
    runs
}

impl MeshData {
    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.vertices.len() as u16;
        for c in corners {
            self.vertices.push(Vertex {
                position: c.to_array(),
                normal: normal.to_array(),
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Unit cube centred on the origin.
pub fn unit_box() -> MeshData {
    let mut m = MeshData::default();
    let h = 0.5;
    let faces = [
        (Vec3::X, Vec3::Y),
        (Vec3::NEG_X, Vec3::Y),
        (Vec3::Y, Vec3::Z),
        (Vec3::NEG_Y, Vec3::Z),
        (Vec3::Z, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y),
    ];
    for (n, up) in faces {
        // right x up == n keeps every face counter-clockwise from outside
        let right = up.cross(n);
        let c = n * h;
        let u = up * h;
        let r = right * h;
        m.push_quad([c - r - u, c + r - u, c + r + u, c - r + u], n);
    }
    m
}

/// Radius 1, height 1, axis +Y, capped.
pub fn unit_cylinder(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut m = MeshData::default();
    let h = 0.5;
    let ring = |i: u32| {
        let a = i as f32 / segments as f32 * std::f32::consts::TAU;
        Vec3::new(a.cos(), 0.0, a.sin())
    };
    for i in 0..segments {
        let (a, b) = (ring(i), ring(i + 1));
        let base = m.vertices.len() as u16;
        for (p, y) in [(a, -h), (b, -h), (b, h), (a, h)] {
            m.vertices.push(Vertex {
                position: [p.x, y, p.z],
                normal: p.to_array(),
            });
        }
        m.indices
            .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }
    for (y, n) in [(h, Vec3::Y), (-h, Vec3::NEG_Y)] {
        let center = m.vertices.len() as u16;
        m.vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: n.to_array(),
        });
        for i in 0..=segments {
            let p = ring(i);
            m.vertices.push(Vertex {
                position: [p.x, y, p.z],
                normal: n.to_array(),
            });
        }
        for i in 0..segments as u16 {
            let (a, b) = (center + 1 + i, center + 2 + i);
            if n.y > 0.0 {
                m.indices.extend_from_slice(&[center, b, a]);
            } else {
                m.indices.extend_from_slice(&[center, a, b]);
            }
        }
    }
    m
}

/// UV sphere of radius 1.
pub fn unit_sphere(stacks: u32, slices: u32) -> MeshData {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let mut m = MeshData::default();
    for i in 0..=stacks {
        let phi = i as f32 / stacks as f32 * std::f32::consts::PI;
        for j in 0..=slices {
            let theta = j as f32 / slices as f32 * std::f32::consts::TAU;
            let p = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            m.vertices.push(Vertex {
                position: p.to_array(),
                normal: p.to_array(),
            });
        }
    }
    let row = slices + 1;
    for i in 0..stacks {
        for j in 0..slices {
            let a = (i * row + j) as u16;
            let b = a + row as u16;
            m.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    m
}

/// Unit square in XY facing +Z. Drawn without culling, so both sides show.
pub fn unit_plane() -> MeshData {
    let mut m = MeshData::default();
    m.push_quad(
        [
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ],
        Vec3::Z,
    );
    m
}
