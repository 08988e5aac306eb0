use crate::data_structure::Vertex;

// allowed mismatch between the sub-areas and the whole, relative to its area
const AREA_TOLERANCE: f32 = 1e-6;

pub fn get_normal(vertices: [Vertex; 3]) -> Vertex {
  ((vertices[1] - vertices[0]).cross(&(vertices[2] - vertices[0]))).normalize()
}

/// Angle at `apex` of the triangle `apex`, `p`, `q`, in radians.
pub fn interior_angle(apex: Vertex, p: Vertex, q: Vertex) -> f32 {
  (p - apex).angle(&(q - apex))
}

fn signed_area(a: Vertex, b: Vertex, c: Vertex, normal: &Vertex) -> f32 {
  0.5 * (b - a).cross(&(c - a)).dot(normal)
}

/// Whether `point` projects onto the inside of `triangle` (edges included).
///
/// Degenerate triangles contain nothing.
pub fn point_in_triangle(triangle: [Vertex; 3], point: Vertex) -> bool {
  let [a, b, c] = triangle;
  let cross = (b - a).cross(&(c - a));
  let area = 0.5 * cross.norm();
  if area == 0.0 {
    return false;
  }
  let normal = cross / (2.0 * area);

  let sub_areas = [
    signed_area(point, b, c, &normal),
    signed_area(a, point, c, &normal),
    signed_area(a, b, point, &normal),
  ];

  let tolerance = AREA_TOLERANCE * area.max(1.0);
  sub_areas.iter().all(|&sub| sub >= -tolerance)
    && (sub_areas.iter().sum::<f32>() - area).abs() <= tolerance
}
