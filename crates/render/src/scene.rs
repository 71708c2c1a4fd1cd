//! Reference scene content: light markers, fixed props and block styling.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};
use voxscene_common::{Material, Rgba};
use voxscene_kernel::{BlockPos, Lighting};

use crate::drawable::Primitive;

pub const LIGHT_MARKER_COLOR: Rgba = Rgba::new(2.0, 2.0, 0.0, 1.0);
pub const SPOT_MARKER_COLOR: Rgba = Rgba::new(0.94, 0.2, 1.0, 1.0);
pub const GROUND_COLOR: Rgba = Rgba::new(0.5, 0.7, 0.2, 1.0);

/// Blocks below this layer use the ground material.
pub const GROUND_LAYERS: u8 = 2;

/// Number of primitives emitted before the blocks.
pub const FIXED_PRIMITIVES: usize = 8;

fn yaw_180() -> Mat4 {
    Mat4::from_rotation_y(PI)
}

fn cube(transform: Mat4, material: Material, color: Rgba) -> Primitive {
    Primitive::Cube {
        transform,
        material,
        color,
    }
}

fn textured(transform: Mat4, material: Material) -> Primitive {
    cube(transform, material, Rgba::WHITE)
}

/// Light markers first, then sky, sun, ground and the decorative props.
///
/// Markers use a negative scale so their faces stay visible from outside
/// while the light sits inside the cube.
pub fn fixed_primitives(lighting: &Lighting) -> [Primitive; FIXED_PRIMITIVES] {
    [
        cube(
            Mat4::from_translation(lighting.point.position) * Mat4::from_scale(Vec3::splat(-0.1)),
            Material::Flat,
            LIGHT_MARKER_COLOR,
        ),
        cube(
            Mat4::from_translation(lighting.spot.position) * Mat4::from_scale(Vec3::splat(-0.2)),
            Material::Flat,
            SPOT_MARKER_COLOR,
        ),
        textured(
            Mat4::from_scale(Vec3::new(38.0, 10.0, 38.0))
                * Mat4::from_translation(Vec3::new(-0.05, -0.001, 0.25)),
            Material::SKY,
        ),
        textured(
            Mat4::from_scale(Vec3::splat(2.0))
                * Mat4::from_translation(Vec3::new(0.05, 3.995, -14.25))
                * yaw_180(),
            Material::SUN,
        ),
        // Zero height: the cube collapses to a quad.
        cube(
            Mat4::from_translation(Vec3::new(-1.92, -0.001, 9.5))
                * Mat4::from_scale(Vec3::new(38.0, 0.0, 38.0)),
            Material::Flat,
            GROUND_COLOR,
        ),
        textured(
            Mat4::from_scale(Vec3::splat(0.5))
                * Mat4::from_translation(Vec3::new(7.5, 2.0, 8.5))
                * yaw_180(),
            Material::EGG,
        ),
        textured(
            Mat4::from_translation(Vec3::new(4.0, 1.5, 4.0)) * yaw_180(),
            Material::JOCKEY,
        ),
        Primitive::Sphere {
            transform: Mat4::from_translation(Vec3::new(3.8, 4.0, 3.0))
                * Mat4::from_scale(Vec3::splat(0.5)),
            material: Material::Flat,
            color: Rgba::WHITE,
        },
    ]
}

pub fn block_material(y: u8) -> Material {
    if y < GROUND_LAYERS {
        Material::DIRT
    } else {
        Material::CHICKEN
    }
}

/// Unit block at its world position with a half-turn yaw.
pub fn block_primitive(block: BlockPos) -> Primitive {
    textured(
        Mat4::from_translation(block.world_position()) * yaw_180(),
        block_material(block.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxscene_common::CellCoord;

    fn transform_of(p: &Primitive) -> Mat4 {
        p.to_drawable().transform
    }

    #[test]
    fn markers_follow_the_lights() {
        let mut lighting = Lighting::default();
        lighting.point.position = Vec3::new(1.0, 2.0, 3.0);
        let fixed = fixed_primitives(&lighting);
        let marker = transform_of(&fixed[0]);
        assert_eq!(marker.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        // Negative scale mirrors the cube through the light position.
        let corner = marker.transform_point3(Vec3::new(1.0, 1.0, -1.0));
        assert!((corner - Vec3::new(0.9, 1.9, 3.1)).length() < 1e-6);
        assert_eq!(fixed[0].to_drawable().color, LIGHT_MARKER_COLOR);

        let spot = transform_of(&fixed[1]);
        assert_eq!(spot.transform_point3(Vec3::ZERO), lighting.spot.position);
    }

    #[test]
    fn fixed_materials_in_order() {
        let fixed = fixed_primitives(&Lighting::default());
        let materials: Vec<Material> = fixed.iter().map(|p| p.to_drawable().material).collect();
        assert_eq!(
            materials,
            vec![
                Material::Flat,
                Material::Flat,
                Material::SKY,
                Material::SUN,
                Material::Flat,
                Material::EGG,
                Material::JOCKEY,
                Material::Flat,
            ]
        );
        assert!(matches!(fixed[7], Primitive::Sphere { .. }));
    }

    #[test]
    fn ground_is_flat_at_floor_level() {
        let fixed = fixed_primitives(&Lighting::default());
        let ground = transform_of(&fixed[4]);
        let a = ground.transform_point3(Vec3::new(0.0, 0.0, 0.0));
        let b = ground.transform_point3(Vec3::new(1.0, 1.0, -1.0));
        assert_eq!(a.y, b.y);
        assert!((a.y + 0.001).abs() < 1e-6);
        assert!((b.x - a.x - 38.0).abs() < 1e-4);
        assert!((a.z - b.z - 38.0).abs() < 1e-4);
    }

    #[test]
    fn sky_encloses_the_grid() {
        let fixed = fixed_primitives(&Lighting::default());
        let sky = transform_of(&fixed[2]);
        let lo = sky.transform_point3(Vec3::new(0.0, 0.0, -1.0));
        let hi = sky.transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!(lo.x <= 0.0 && hi.x >= 32.0);
        assert!(lo.z <= -25.0 && hi.z >= 7.0);
        assert!(hi.y >= 9.9);
    }

    fn assert_maps(t: Mat4, from: Vec3, to: Vec3) {
        let got = t.transform_point3(from);
        assert!((got - to).length() < 1e-4, "{from} -> {got}, expected {to}");
    }

    #[test]
    fn sun_is_scaled_after_translation() {
        let sun = transform_of(&fixed_primitives(&Lighting::default())[3]);
        assert_maps(sun, Vec3::ZERO, Vec3::new(0.1, 7.99, -28.5));
        assert_maps(sun, Vec3::new(1.0, 1.0, -1.0), Vec3::new(-1.9, 9.99, -26.5));
    }

    #[test]
    fn egg_is_scaled_after_translation() {
        let egg = transform_of(&fixed_primitives(&Lighting::default())[5]);
        assert_maps(egg, Vec3::ZERO, Vec3::new(3.75, 1.0, 4.25));
        assert_maps(egg, Vec3::new(1.0, 1.0, -1.0), Vec3::new(3.25, 1.5, 4.75));
    }

    #[test]
    fn jockey_turns_about_its_own_corner() {
        let jockey = transform_of(&fixed_primitives(&Lighting::default())[6]);
        assert_maps(jockey, Vec3::ZERO, Vec3::new(4.0, 1.5, 4.0));
        assert_maps(jockey, Vec3::new(1.0, 1.0, -1.0), Vec3::new(3.0, 2.5, 5.0));
    }

    #[test]
    fn sphere_is_half_size_at_its_anchor() {
        let sphere = transform_of(&fixed_primitives(&Lighting::default())[7]);
        assert_maps(sphere, Vec3::ZERO, Vec3::new(3.8, 4.0, 3.0));
        assert_maps(sphere, Vec3::X, Vec3::new(4.3, 4.0, 3.0));
    }

    #[test]
    fn blocks_switch_material_at_layer_two() {
        assert_eq!(block_material(0), Material::DIRT);
        assert_eq!(block_material(1), Material::DIRT);
        assert_eq!(block_material(2), Material::CHICKEN);
        assert_eq!(block_material(9), Material::CHICKEN);
    }

    #[test]
    fn block_is_turned_half_way_about_its_corner() {
        let block = BlockPos {
            cell: CellCoord::new(3, 5),
            y: 2,
        };
        let t = transform_of(&block_primitive(block));
        assert_eq!(t.transform_point3(Vec3::ZERO), Vec3::new(3.0, 2.0, -20.0));
        let far = t.transform_point3(Vec3::new(1.0, 1.0, -1.0));
        assert!((far - Vec3::new(2.0, 3.0, -19.0)).length() < 1e-5);
    }
}
