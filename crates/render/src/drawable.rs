use glam::{Mat4, Vec3};
use voxscene_common::{Material, Rgba};

/// Geometry a drawable instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Unit cube spanning `[0,1] x [0,1] x [-1,0]`.
    Cube,
    /// Unit-radius sphere centred on the origin.
    Sphere,
}

/// A transform, material and color ready for the render backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub mesh: MeshKind,
    pub transform: Mat4,
    pub material: Material,
    /// Used when `material` is [`Material::Flat`].
    pub color: Rgba,
}

pub const RAINDROP_SCALE: Vec3 = Vec3::new(0.05, 0.2, 0.05);
pub const RAINDROP_COLOR: Rgba = Rgba::new(0.6, 0.6, 1.0, 0.5);

/// The closed set of shapes the scene is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Cube {
        transform: Mat4,
        material: Material,
        color: Rgba,
    },
    Sphere {
        transform: Mat4,
        material: Material,
        color: Rgba,
    },
    /// Thin translucent streak at a particle position.
    Raindrop { position: Vec3 },
}

impl Primitive {
    pub fn to_drawable(&self) -> Drawable {
        match *self {
            Primitive::Cube {
                transform,
                material,
                color,
            } => Drawable {
                mesh: MeshKind::Cube,
                transform,
                material,
                color,
            },
            Primitive::Sphere {
                transform,
                material,
                color,
            } => Drawable {
                mesh: MeshKind::Sphere,
                transform,
                material,
                color,
            },
            Primitive::Raindrop { position } => Drawable {
                mesh: MeshKind::Cube,
                transform: Mat4::from_translation(position) * Mat4::from_scale(RAINDROP_SCALE),
                material: Material::Flat,
                color: RAINDROP_COLOR,
            },
        }
    }
}
