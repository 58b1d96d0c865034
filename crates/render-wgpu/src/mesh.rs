use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Unit cube vertices and indices.
pub(crate) fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0] },
        // -Z face
        Vertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0] },
        // +X face
        Vertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0] },
        // -X face
        Vertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0] },
        // +Y face
        Vertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0] },
        // -Y face
        Vertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    (vertices, indices)
}

/// Unit cone: apex at y=1, unit-radius base on the y=0 plane.
///
/// Flat-shaded sides (duplicated rim vertices per segment) so the mountain
/// backdrop keeps the faceted look of the original cones.
pub(crate) fn cone_mesh(segments: u16) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let step = std::f32::consts::TAU / segments as f32;
    for i in 0..segments {
        let a0 = i as f32 * step;
        let a1 = (i + 1) as f32 * step;
        let r0 = [a0.cos(), 0.0, a0.sin()];
        let r1 = [a1.cos(), 0.0, a1.sin()];

        // Side face normal: average rim direction tilted up by the slope.
        let mid = (a0 + a1) * 0.5;
        let n = [mid.cos() * 0.707, 0.707, mid.sin() * 0.707];

        let base = vertices.len() as u16;
        vertices.push(Vertex { position: [0.0, 1.0, 0.0], normal: n });
        vertices.push(Vertex { position: r0, normal: n });
        vertices.push(Vertex { position: r1, normal: n });
        indices.extend_from_slice(&[base, base + 2, base + 1]);

        // Base triangle fan
        let base = vertices.len() as u16;
        let down = [0.0, -1.0, 0.0];
        vertices.push(Vertex { position: [0.0, 0.0, 0.0], normal: down });
        vertices.push(Vertex { position: r0, normal: down });
        vertices.push(Vertex { position: r1, normal: down });
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_indices() {
        let (verts, idx) = cube_mesh();
        assert_eq!(verts.len(), 24);
        assert_eq!(idx.len(), 36);
    }

    #[test]
    fn cone_index_count_scales_with_segments() {
        let (verts, idx) = cone_mesh(8);
        assert_eq!(idx.len(), 8 * 6);
        assert_eq!(verts.len(), 8 * 6);
        assert!(idx.iter().all(|&i| (i as usize) < verts.len()));
    }
}
