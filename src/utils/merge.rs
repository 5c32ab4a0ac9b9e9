//! Post-processing for formats that store private copies of vertices per face.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::mesh::Face;

/// Coordinates equal once rounded to this many decimals are merged.
pub const DEFAULT_MERGE_DECIMALS: i32 = 8;

/// Collapses vertices whose coordinates coincide once rounded to `decimals` decimals.
///
/// Returns the deduplicated vertices in order of first occurrence, and `remap` such that
/// `remap[old_index] == new_index`. Merged vertices keep the coordinates of their first
/// occurrence. Running this again on its own output changes nothing.
pub fn merge_duplicates(vertices: &[Point3<f64>], decimals: i32) -> (Vec<Point3<f64>>, Vec<usize>) {
    let scale = 10f64.powi(decimals);
    let mut seen: HashMap<[i64; 3], usize> = HashMap::with_capacity(vertices.len());
    let mut merged = Vec::with_capacity(vertices.len());
    let mut remap = Vec::with_capacity(vertices.len());

    for p in vertices {
        let key = [
            (p.x * scale).round() as i64,
            (p.y * scale).round() as i64,
            (p.z * scale).round() as i64,
        ];
        let new_index = *seen.entry(key).or_insert_with(|| {
            merged.push(*p);
            merged.len() - 1
        });
        remap.push(new_index);
    }
    (merged, remap)
}

/// Rewrites face indices through a remap table produced by [`merge_duplicates`].
pub fn remap_faces(faces: &mut [Face], remap: &[usize]) {
    for face in faces.iter_mut() {
        for index in face.iter_mut() {
            *index = remap[*index];
        }
    }
}

/// Maps on-disk ids to their one-based position in `ids`. If an id repeats, the last
/// occurrence wins.
pub fn renumber(ids: &[usize]) -> HashMap<usize, usize> {
    ids.iter()
        .enumerate()
        .map(|(position, &id)| (id, position + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1e-12),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_merge_keeps_first_occurrence_order() {
        let (merged, remap) = merge_duplicates(&soup(), DEFAULT_MERGE_DECIMALS);
        assert_eq!(merged.len(), 4);
        assert_eq!(remap, vec![0, 1, 2, 1, 3, 2]);
        assert_eq!(merged[3], Point3::new(1.0, 1.0, 1e-12));
    }

    #[test]
    fn test_merge_near_duplicates() {
        let vertices = vec![Point3::new(0.5, 0.5, 0.0), Point3::new(0.5 + 1e-11, 0.5, -1e-11)];
        let (merged, remap) = merge_duplicates(&vertices, DEFAULT_MERGE_DECIMALS);
        assert_eq!(merged.len(), 1);
        assert_eq!(remap, vec![0, 0]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let (once, _) = merge_duplicates(&soup(), DEFAULT_MERGE_DECIMALS);
        let (twice, remap) = merge_duplicates(&once, DEFAULT_MERGE_DECIMALS);
        assert_eq!(once, twice);
        assert_eq!(remap, (0..once.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_remap_faces() {
        let (_, remap) = merge_duplicates(&soup(), DEFAULT_MERGE_DECIMALS);
        let mut faces = vec![[0, 1, 2, 0], [3, 4, 5, 3]];
        remap_faces(&mut faces, &remap);
        assert_eq!(faces, vec![[0, 1, 2, 0], [1, 3, 2, 1]]);
    }

    #[test]
    fn test_renumber() {
        let map = renumber(&[10, 4, 7]);
        assert_eq!(map[&10], 1);
        assert_eq!(map[&4], 2);
        assert_eq!(map[&7], 3);
        assert!(map.get(&1).is_none());
    }
}
