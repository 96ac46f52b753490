/// Indexed triangle geometry
///
/// Geometry is immutable once built and shared by reference between clones
/// of a node hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Builds geometry from flat attribute arrays as produced by OBJ loaders
    ///
    /// Missing or mismatched normals are regenerated from the faces; missing
    /// UVs default to the origin.
    pub fn from_flat(positions: &[f32], normals: &[f32], uvs: &[f32], indices: Vec<u32>) -> Self {
        let normals = if !normals.is_empty() && normals.len() == positions.len() {
            normals.to_vec()
        } else {
            calculate_face_normals(positions, &indices)
        };

        let vertex_count = positions.len() / 3;
        let uvs = if uvs.len() == vertex_count * 2 {
            uvs.chunks_exact(2).map(|uv| [uv[0], uv[1]]).collect()
        } else {
            vec![[0.0, 0.0]; vertex_count]
        };

        Self {
            positions: positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect(),
            normals: normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect(),
            uvs,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Averages face normals onto shared vertices
pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let mut normals = vec![0.0; vertex_count * 3];
    let mut counts = vec![0u32; vertex_count];

    let vertex = |i: usize| [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]];

    for triangle in indices.chunks_exact(3) {
        let (i0, i1, i2) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
            continue;
        }

        let (v0, v1, v2) = (vertex(i0), vertex(i1), vertex(i2));
        let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

        let face_normal = [
            edge1[1] * edge2[2] - edge1[2] * edge2[1],
            edge1[2] * edge2[0] - edge1[0] * edge2[2],
            edge1[0] * edge2[1] - edge1[1] * edge2[0],
        ];

        for &vertex_idx in &[i0, i1, i2] {
            normals[vertex_idx * 3] += face_normal[0];
            normals[vertex_idx * 3 + 1] += face_normal[1];
            normals[vertex_idx * 3 + 2] += face_normal[2];
            counts[vertex_idx] += 1;
        }
    }

    for i in 0..vertex_count {
        if counts[i] == 0 {
            continue;
        }
        let n = &mut normals[i * 3..i * 3 + 3];
        let length = (n[0].powi(2) + n[1].powi(2) + n[2].powi(2)).sqrt();
        if length > 0.0 {
            n.iter_mut().for_each(|c| *c /= length);
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normals_generated_when_missing() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let geometry = Geometry::from_flat(&positions, &[], &[], vec![0, 1, 2]);

        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.triangle_count(), 1);
        for normal in &geometry.normals {
            assert!((normal[2] - 1.0).abs() < 1e-6);
        }
        assert_eq!(geometry.uvs, vec![[0.0, 0.0]; 3]);
    }

    #[test]
    fn test_out_of_range_indices_are_skipped() {
        let normals = calculate_face_normals(&[0.0; 9], &[0, 1, 7]);
        assert_eq!(normals, vec![0.0; 9]);
    }
}
