//! End-to-end meshing through the public facade.

use imagevox::geom::{image_mesher, rect};
use imagevox::img::{Image, ImageCube};

fn gray(width: i32, height: i32, value: u8) -> Image {
    Image::from_raw(width, height, 1, vec![value; (width * height) as usize])
}

#[test]
fn full_intensity_image_meshes_to_closed_box() {
    // 4x4 pixels at 255, facade depth = min(4, 4) = 4: a closed 4x4x4 box
    // of six merged quads.
    let mesh = image_mesher::mesh_image(&gray(4, 4, 255), 1.0);

    assert_eq!(mesh.vertices.len(), 36);
    assert_eq!(mesh.indices.len(), 36);
    assert_eq!(mesh.triangle_count(), 12);

    // All positions stay inside the box extents.
    for v in &mesh.vertices {
        for k in 0..3 {
            assert!(v.position[k] >= 0.0 && v.position[k] <= 4.0);
        }
    }
}

#[test]
fn black_image_meshes_to_nothing() {
    let mesh = image_mesher::mesh_image(&gray(8, 8, 0), 1.0);
    assert!(mesh.is_empty());
}

#[test]
fn solid_cube_meshes_to_closed_box() {
    let cube = ImageCube::from_sides(std::array::from_fn(|_| gray(6, 6, 255)));
    cube.validate().unwrap();

    let mesh = image_mesher::mesh_cube(&cube, &rect::unit_rect_cube(), 1.0);
    assert_eq!(mesh.vertices.len(), 36);
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn facade_is_idempotent() {
    let mut data = vec![0u8; 36];
    for (i, p) in data.iter_mut().enumerate() {
        *p = (40 + i * 13 % 200) as u8;
    }
    let image = Image::from_raw(6, 6, 1, data);

    let a = image_mesher::mesh_image(&image, 1.0);
    let b = image_mesher::mesh_image(&image, 1.0);
    assert_eq!(a, b);
}

#[test]
fn uv_cube_places_face_uvs_inside_atlas_rects() {
    let uv_cube: rect::RectCube<f32> = std::array::from_fn(|i| {
        rect::Rect::new(i as f32 * 0.1, 0.2, 0.1, 0.1)
    });
    let cube = ImageCube::from_sides(std::array::from_fn(|_| gray(4, 4, 255)));
    let mesh = image_mesher::mesh_cube(&cube, &uv_cube, 1.0);

    for v in &mesh.vertices {
        assert!(v.uv[0] >= 0.0 && v.uv[0] <= 0.7);
        assert!(v.uv[1] >= 0.2 && v.uv[1] <= 0.3 + 1e-6);
    }
}
