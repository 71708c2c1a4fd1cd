use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        uv,
    }
}

/// Unit cube spanning `[0,1] x [0,1] x [-1,0]`, one quad per face with its own
/// normal and a full `[0,1]` UV square.
pub fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    #[rustfmt::skip]
    let vertices = vec![
        // front (z = 0)
        v([0.0, 0.0,  0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
        v([1.0, 0.0,  0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
        v([1.0, 1.0,  0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
        v([0.0, 1.0,  0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
        // back (z = -1)
        v([1.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0]),
        v([0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [1.0, 0.0]),
        v([0.0, 1.0, -1.0], [0.0, 0.0, -1.0], [1.0, 1.0]),
        v([1.0, 1.0, -1.0], [0.0, 0.0, -1.0], [0.0, 1.0]),
        // right (x = 1)
        v([1.0, 0.0,  0.0], [1.0, 0.0, 0.0], [0.0, 0.0]),
        v([1.0, 0.0, -1.0], [1.0, 0.0, 0.0], [1.0, 0.0]),
        v([1.0, 1.0, -1.0], [1.0, 0.0, 0.0], [1.0, 1.0]),
        v([1.0, 1.0,  0.0], [1.0, 0.0, 0.0], [0.0, 1.0]),
        // left (x = 0)
        v([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 0.0]),
        v([0.0, 0.0,  0.0], [-1.0, 0.0, 0.0], [1.0, 0.0]),
        v([0.0, 1.0,  0.0], [-1.0, 0.0, 0.0], [1.0, 1.0]),
        v([0.0, 1.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0]),
        // top (y = 1)
        v([0.0, 1.0,  0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
        v([1.0, 1.0,  0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
        v([1.0, 1.0, -1.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
        v([0.0, 1.0, -1.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
        // bottom (y = 0)
        v([0.0, 0.0, -1.0], [0.0, -1.0, 0.0], [0.0, 0.0]),
        v([1.0, 0.0, -1.0], [0.0, -1.0, 0.0], [1.0, 0.0]),
        v([1.0, 0.0,  0.0], [0.0, -1.0, 0.0], [1.0, 1.0]),
        v([0.0, 0.0,  0.0], [0.0, -1.0, 0.0], [0.0, 1.0]),
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,
        4,5,6, 6,7,4,
        8,9,10, 10,11,8,
        12,13,14, 14,15,12,
        16,17,18, 18,19,16,
        20,21,22, 22,23,20,
    ];
    (vertices, indices)
}

/// Upper bound on sphere stacks and slices: `(255 + 1)^2` vertices still fit
/// 16-bit indices.
pub const MAX_SPHERE_DIVISIONS: u16 = 255;

/// Unit-radius UV sphere centred on the origin.
///
/// `stacks` rings from pole to pole, `slices` segments around the Y axis.
/// Both are clamped to `[2, 255]` and `[3, 255]`.
/// Normals equal positions; UVs wrap once around.
pub fn sphere_mesh(stacks: u16, slices: u16) -> (Vec<Vertex>, Vec<u16>) {
    let stacks = stacks.clamp(2, MAX_SPHERE_DIVISIONS);
    let slices = slices.clamp(3, MAX_SPHERE_DIVISIONS);
    let mut vertices = Vec::with_capacity(usize::from(stacks + 1) * usize::from(slices + 1));
    for i in 0..=stacks {
        let t = f32::from(i) / f32::from(stacks);
        let phi = t * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for j in 0..=slices {
            let s = f32::from(j) / f32::from(slices);
            let theta = s * std::f32::consts::TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let p = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            vertices.push(v(p, p, [s, 1.0 - t]));
        }
    }

    let row = slices + 1;
    let mut indices = Vec::with_capacity(usize::from(stacks) * usize::from(slices) * 6);
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = a + row;
            indices.extend_from_slice(&[a, a + 1, b, b, a + 1, b + 1]);
        }
    }
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(n: [f32; 3]) -> f32 {
        (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt()
    }

    #[test]
    fn cube_spans_unit_box_behind_origin() {
        let (verts, indices) = cube_mesh();
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
        for vert in &verts {
            let [x, y, z] = vert.position;
            assert!((0.0..=1.0).contains(&x));
            assert!((0.0..=1.0).contains(&y));
            assert!((-1.0..=0.0).contains(&z));
            assert_eq!(len(vert.normal), 1.0);
            assert!(vert.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
        assert!(indices.iter().all(|&i| (i as usize) < verts.len()));
    }

    #[test]
    fn cube_normals_point_outward() {
        let (verts, _) = cube_mesh();
        let center = [0.5, 0.5, -0.5];
        for vert in &verts {
            let d: f32 = (0..3).map(|k| (vert.position[k] - center[k]) * vert.normal[k]).sum();
            assert!(d > 0.0, "{vert:?}");
        }
    }

    #[test]
    fn sphere_is_unit_radius() {
        let (verts, indices) = sphere_mesh(8, 12);
        assert_eq!(verts.len(), 9 * 13);
        assert_eq!(indices.len(), 8 * 12 * 6);
        for vert in &verts {
            assert!((len(vert.position) - 1.0).abs() < 1e-5);
        }
        assert!(indices.iter().all(|&i| (i as usize) < verts.len()));
    }

    #[test]
    fn sphere_clamps_degenerate_resolution() {
        let (verts, _) = sphere_mesh(0, 0);
        assert_eq!(verts.len(), 3 * 4);
    }

    #[test]
    fn sphere_resolution_stays_within_u16_indices() {
        let (verts, indices) = sphere_mesh(u16::MAX, u16::MAX);
        let side = usize::from(MAX_SPHERE_DIVISIONS) + 1;
        assert_eq!(verts.len(), side * side);
        assert!(verts.len() <= usize::from(u16::MAX) + 1);
        let max = indices.iter().copied().max().unwrap();
        assert_eq!(usize::from(max), verts.len() - 1);
    }
}
