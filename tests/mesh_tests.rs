// Host-side tests for GLB loading and ray/mesh intersection.

use glam::Vec3;
use head_core::*;

// Pack a JSON document and binary chunk into a GLB container.
fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = bin.to_vec();
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    let mut total = 12 + 8 + json.len();
    if !bin.is_empty() {
        total += 8 + bin.len();
    }
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    if !bin.is_empty() {
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&bin);
    }
    out
}

fn one_triangle_glb() -> Vec<u8> {
    let mut bin = Vec::new();
    for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in v {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u32, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    let json = r#"{
        "asset": { "version": "2.0" },
        "buffers": [ { "byteLength": 48 } ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 12 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
            { "bufferView": 1, "componentType": 5125, "count": 3, "type": "SCALAR" }
        ],
        "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 }, "indices": 1 } ] } ],
        "nodes": [ { "mesh": 0, "translation": [0.0, 0.0, 2.0] } ],
        "scenes": [ { "nodes": [0] } ],
        "scene": 0
    }"#;
    glb(json, &bin)
}

#[test]
fn loads_embedded_triangle_with_node_transform() {
    let mesh = TriMesh::from_glb(&one_triangle_glb()).unwrap();
    assert_eq!(mesh.positions.len(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert!(mesh.positions.iter().all(|p| (p.z - 2.0).abs() < 1e-6));
    // Normals are computed when the file has none.
    assert!(mesh.normals.iter().all(|n| n.z.abs() > 0.99));
}

#[test]
fn file_without_meshes_is_rejected() {
    let bytes = glb(r#"{ "asset": { "version": "2.0" } }"#, &[]);
    assert!(matches!(TriMesh::from_glb(&bytes), Err(SceneError::NoMesh)));
}

#[test]
fn garbage_is_a_gltf_error() {
    assert!(matches!(
        TriMesh::from_glb(b"definitely not a model"),
        Err(SceneError::Gltf(_))
    ));
}

#[test]
fn nearest_hit_wins() {
    let quad = |z: f32| {
        [
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
        ]
    };
    let mut positions = quad(0.0).to_vec();
    positions.extend(quad(0.5));
    let mesh = TriMesh::new(positions, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    let ray = Ray::new(Vec3::new(0.1, -0.3, 3.0), Vec3::NEG_Z);
    let hit = mesh.intersect(&ray).unwrap();
    assert!((hit.t - 2.5).abs() < 1e-4);
    assert!((hit.point.z - 0.5).abs() < 1e-4);
    assert!(hit.triangle >= 2);
}

#[test]
fn ray_past_the_mesh_misses() {
    let mesh = TriMesh::uv_sphere(1.0, 12);
    let ray = Ray::new(Vec3::new(3.0, 3.0, 3.0), Vec3::X);
    assert!(mesh.intersect(&ray).is_none());
    let toward = Ray::new(Vec3::new(0.05, 0.13, 5.0), Vec3::NEG_Z);
    let hit = mesh.intersect(&toward).unwrap();
    assert!((hit.point.length() - 1.0).abs() < 0.05);
}
