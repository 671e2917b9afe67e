use log::{debug, warn};
use nalgebra::Vector2;
use opencv::core::{
    add, bitwise_and, bitwise_not, no_array, Mat, MatTraitConst, Point, Point2f, Rect, Scalar,
    Size, Vec6f, Vector, BORDER_CONSTANT, CV_8UC1, CV_8UC3,
};
use opencv::imgproc::{
    bounding_rect, convex_hull, cvt_color, fill_convex_poly, get_affine_transform, line,
    polylines, threshold, warp_affine, Subdiv2D, COLOR_BGR2GRAY, INTER_LINEAR, LINE_8,
    THRESH_BINARY_INV,
};
use opencv::photo::seamless_clone;
use opencv::prelude::*;

use crate::config::config::SwapConfig;
use crate::error::{Error, Result};
use crate::utils::coordinate::{LandmarkSet, TriangleIndices};
use crate::utils::utils::{clip_rect, rect_center};

/// Geometric core of the face swap: hull construction, Delaunay
/// triangulation with landmark index mapping, per-triangle affine
/// warping, mask compositing and seamless blending.
pub struct SwapHelper {
    match_tolerance: f32,
    min_triangle_area: f32,
    clone_mode: i32,
}

impl SwapHelper {
    /// new initializes the helper from the swap tunables.
    pub fn new(config: SwapConfig) -> Self {
        SwapHelper {
            match_tolerance: config.match_tolerance,
            min_triangle_area: config.min_triangle_area,
            clone_mode: config.clone_mode.to_opencv(),
        }
    }

    /// convex_hull computes the counter-clockwise hull polygon of a
    /// landmark set.
    pub fn convex_hull(&self, landmarks: &LandmarkSet) -> Result<Vector<Point>> {
        let points = landmarks.to_point_vector();
        let mut hull: Vector<Point> = Vector::new();
        convex_hull(&points, &mut hull, false, true)?;
        Ok(hull)
    }

    /// triangulate runs a Delaunay decomposition of the landmark points
    /// over the hull bounding rectangle and maps every triangle vertex
    /// back to its landmark index.
    ///
    /// The returned order is the subdivision output order; it is also
    /// the painting order used by [`SwapHelper::warp_triangles`], which
    /// makes the tie-break at shared triangle edges reproducible.
    ///
    /// # Arguments
    /// * `rect` - bounding rectangle of the hull over `landmarks`
    /// * `landmarks` - the point set to triangulate
    ///
    /// # Returns
    /// * `Result<Vec<TriangleIndices>>`
    pub fn triangulate(&self, rect: Rect, landmarks: &LandmarkSet) -> Result<Vec<TriangleIndices>> {
        let mut subdiv = Subdiv2D::new(rect)?;
        for point in landmarks.to_point2f_vector() {
            subdiv.insert(point)?;
        }
        let mut raw: Vector<Vec6f> = Vector::new();
        subdiv.get_triangle_list(&mut raw)?;

        let mut triangles = Vec::with_capacity(raw.len());
        for (t_idx, t) in raw.iter().enumerate() {
            let vertices = [
                Point2f::new(t[0], t[1]),
                Point2f::new(t[2], t[3]),
                Point2f::new(t[4], t[5]),
            ];
            // The subdivision pads its plane with virtual corner
            // vertices far outside the seeded rectangle.
            if !vertices.iter().all(|v| rect.contains(round_point(*v))) {
                continue;
            }
            match self.map_triangle(t_idx, &vertices, landmarks) {
                Ok(indices) => triangles.push(indices),
                Err(err @ Error::LandmarkIndexMismatch { .. }) => {
                    warn!("triangulation: dropping triangle: {err}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(triangles)
    }

    fn map_triangle(
        &self,
        triangle: usize,
        vertices: &[Point2f; 3],
        landmarks: &LandmarkSet,
    ) -> Result<TriangleIndices> {
        let mut indices = [0usize; 3];
        for (slot, vertex) in vertices.iter().enumerate() {
            indices[slot] = self.match_landmark(triangle, *vertex, landmarks)?;
        }
        Ok(TriangleIndices(indices))
    }

    /// match_landmark maps one triangulated vertex back to a landmark
    /// index: exact integer match first, nearest landmark within the
    /// configured tolerance second. Anything farther is an error, never
    /// a silent fallback.
    fn match_landmark(
        &self,
        triangle: usize,
        vertex: Point2f,
        landmarks: &LandmarkSet,
    ) -> Result<usize> {
        let rounded = round_point(vertex);
        let mut nearest = 0usize;
        let mut nearest_dist = f32::MAX;
        for (idx, point) in landmarks.points().iter().enumerate() {
            if *point == rounded {
                return Ok(idx);
            }
            let dx = point.x as f32 - vertex.x;
            let dy = point.y as f32 - vertex.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < nearest_dist {
                nearest_dist = dist;
                nearest = idx;
            }
        }
        if nearest_dist <= self.match_tolerance {
            debug!(
                "triangulation: triangle {triangle} vertex ({}, {}) matched landmark {nearest} at {nearest_dist:.2} px",
                rounded.x, rounded.y
            );
            return Ok(nearest);
        }
        Err(Error::LandmarkIndexMismatch {
            triangle,
            x: rounded.x,
            y: rounded.y,
            nearest_dist,
        })
    }

    /// warp_triangles warps every source triangle onto its target
    /// geometry and accumulates the patches into a zeroed buffer the
    /// size of the target image. Degenerate triangles are logged and
    /// skipped without touching the buffer.
    pub fn warp_triangles(
        &self,
        face: &Mat,
        target_size: Size,
        src_landmarks: &LandmarkSet,
        dst_landmarks: &LandmarkSet,
        triangles: &[TriangleIndices],
    ) -> Result<Mat> {
        let mut accumulation = Mat::new_rows_cols_with_default(
            target_size.height,
            target_size.width,
            CV_8UC3,
            Scalar::all(0.0),
        )?;
        for (index, triangle) in triangles.iter().enumerate() {
            match self.warp_triangle(face, src_landmarks, dst_landmarks, *triangle, index, &mut accumulation)
            {
                Ok(()) => {}
                Err(err @ Error::DegenerateTriangle { .. }) => {
                    warn!("warp: skipping triangle: {err}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(accumulation)
    }

    fn warp_triangle(
        &self,
        face: &Mat,
        src_landmarks: &LandmarkSet,
        dst_landmarks: &LandmarkSet,
        triangle: TriangleIndices,
        index: usize,
        accumulation: &mut Mat,
    ) -> Result<()> {
        let out_of_range = || Error::DegenerateTriangle {
            index,
            reason: "landmark index out of range".to_string(),
        };
        let src = triangle.lookup(src_landmarks).ok_or_else(out_of_range)?;
        let dst = triangle.lookup(dst_landmarks).ok_or_else(out_of_range)?;

        if twice_area(&src) < self.min_triangle_area {
            return Err(Error::DegenerateTriangle {
                index,
                reason: "collinear source vertices".to_string(),
            });
        }
        if twice_area(&dst) < self.min_triangle_area {
            return Err(Error::DegenerateTriangle {
                index,
                reason: "collinear target vertices".to_string(),
            });
        }

        let face_size = face.size()?;
        let accumulation_size = accumulation.size()?;
        let src_rect = clip_rect(
            bounding_rect(&point_vector(&src))?,
            face_size.width,
            face_size.height,
        );
        let dst_rect = clip_rect(
            bounding_rect(&point_vector(&dst))?,
            accumulation_size.width,
            accumulation_size.height,
        );
        if src_rect.width <= 0 || src_rect.height <= 0 || dst_rect.width <= 0 || dst_rect.height <= 0
        {
            return Err(Error::DegenerateTriangle {
                index,
                reason: "bounding box outside the image".to_string(),
            });
        }

        // Crop-local coordinates for the masks and the affine solve.
        let src_local = local_points(&src, src_rect);
        let dst_local = local_points(&dst, dst_rect);

        let cropped = Mat::roi(face, src_rect)?.try_clone()?;
        let src_mask = triangle_mask(src_rect.size(), &to_int_points(&src_local))?;
        let dst_mask = triangle_mask(dst_rect.size(), &to_int_points(&dst_local))?;

        let mut masked_source = Mat::default();
        bitwise_and(&cropped, &cropped, &mut masked_source, &src_mask)?;

        // An affine map is fully determined by the 3 correspondences.
        let transform = get_affine_transform(&src_local, &dst_local)?;
        let mut warped = Mat::default();
        warp_affine(
            &masked_source,
            &mut warped,
            &transform,
            dst_rect.size(),
            INTER_LINEAR,
            BORDER_CONSTANT,
            Scalar::all(0.0),
        )?;
        let mut shaped = Mat::default();
        bitwise_and(&warped, &warped, &mut shaped, &dst_mask)?;

        // Pixels already painted by an earlier triangle stay untouched;
        // the subdivision output order is the tie-break at shared edges.
        let region = Mat::roi(accumulation, dst_rect)?.try_clone()?;
        let mut region_gray = Mat::default();
        cvt_color(&region, &mut region_gray, COLOR_BGR2GRAY, 0)?;
        let mut unpainted = Mat::default();
        threshold(&region_gray, &mut unpainted, 1.0, 255.0, THRESH_BINARY_INV)?;
        let mut patch = Mat::default();
        bitwise_and(&shaped, &shaped, &mut patch, &unpainted)?;

        let mut merged = Mat::default();
        add(&region, &patch, &mut merged, &no_array(), -1)?;
        let mut target = Mat::roi_mut(accumulation, dst_rect)?;
        merged.copy_to(&mut target)?;
        Ok(())
    }

    /// composite erases the hull region of the target image and pastes
    /// the accumulated warped triangles in its place. Returns the merged
    /// image together with the filled hull mask.
    pub fn composite(
        &self,
        body: &Mat,
        accumulation: &Mat,
        hull: &Vector<Point>,
    ) -> Result<(Mat, Mat)> {
        let size = body.size()?;
        let mut head_mask =
            Mat::new_rows_cols_with_default(size.height, size.width, CV_8UC1, Scalar::all(0.0))?;
        fill_convex_poly(&mut head_mask, hull, Scalar::all(255.0), LINE_8, 0)?;

        let mut background_mask = Mat::default();
        bitwise_not(&head_mask, &mut background_mask, &no_array())?;
        let mut faceless_body = Mat::default();
        bitwise_and(body, body, &mut faceless_body, &background_mask)?;
        let mut merged = Mat::default();
        add(&faceless_body, accumulation, &mut merged, &no_array(), -1)?;
        Ok((merged, head_mask))
    }

    /// blend hands the composited patch to the gradient-domain
    /// seamless-clone primitive, centered on the hull bounding-box
    /// center.
    pub fn blend(&self, composited: &Mat, body: &Mat, head_mask: &Mat, center: Point) -> Result<Mat> {
        let mut blended = Mat::default();
        seamless_clone(composited, body, head_mask, center, &mut blended, self.clone_mode)?;
        Ok(blended)
    }

    /// swap_faces runs hull construction, triangulation, warping,
    /// compositing and blending for a pair of already-extracted
    /// landmark sets.
    ///
    /// # Arguments
    /// * `face` - image providing the face content
    /// * `body` - image providing the body and head position
    /// * `src_landmarks` - landmarks of the face image
    /// * `dst_landmarks` - landmarks of the body image
    ///
    /// # Returns
    /// * `Result<Mat>` - the blended output image
    pub fn swap_faces(
        &self,
        face: &Mat,
        body: &Mat,
        src_landmarks: &LandmarkSet,
        dst_landmarks: &LandmarkSet,
    ) -> Result<Mat> {
        let src_hull = self.convex_hull(src_landmarks)?;
        let src_rect = bounding_rect(&src_hull)?;
        let triangles = self.triangulate(src_rect, src_landmarks)?;
        debug!("source face triangulated into {} triangles", triangles.len());

        let accumulation =
            self.warp_triangles(face, body.size()?, src_landmarks, dst_landmarks, &triangles)?;

        let dst_hull = self.convex_hull(dst_landmarks)?;
        let (composited, head_mask) = self.composite(body, &accumulation, &dst_hull)?;
        let center = rect_center(bounding_rect(&dst_hull)?);
        self.blend(&composited, body, &head_mask, center)
    }

    /// draw_mesh renders the hull outline and the triangle edges over a
    /// copy of the image.
    pub fn draw_mesh(
        &self,
        img: &Mat,
        landmarks: &LandmarkSet,
        triangles: &[TriangleIndices],
    ) -> Result<Mat> {
        let white = Scalar::new(255.0, 255.0, 255.0, 0.0);
        let mut canvas = img.try_clone()?;

        let mut outline: Vector<Vector<Point>> = Vector::new();
        outline.push(self.convex_hull(landmarks)?);
        polylines(&mut canvas, &outline, true, white, 2, LINE_8, 0)?;

        for triangle in triangles {
            if let Some([a, b, c]) = triangle.lookup(landmarks) {
                line(&mut canvas, a, b, white, 1, LINE_8, 0)?;
                line(&mut canvas, b, c, white, 1, LINE_8, 0)?;
                line(&mut canvas, c, a, white, 1, LINE_8, 0)?;
            }
        }
        Ok(canvas)
    }
}

/// select_largest_face returns the detection with the largest area
/// after clamping each box to the image bounds.
pub fn select_largest_face(faces: &Vector<Rect>, width: i32, height: i32) -> Option<(Rect, usize)> {
    let mut best: Option<(Rect, usize, i64)> = None;
    for (idx, face) in faces.iter().enumerate() {
        let clipped = clip_rect(face, width, height);
        let area = clipped.width as i64 * clipped.height as i64;
        if best.as_ref().map_or(true, |(_, _, largest)| area > *largest) {
            best = Some((face, idx, area));
        }
    }
    best.map(|(face, idx, _)| (face, idx))
}

/// select_center_face returns the detection whose center is closest to
/// `center`, defaulting to the image center.
pub fn select_center_face(
    faces: &Vector<Rect>,
    img_size: Size,
    center: Option<Point>,
) -> Option<(Rect, usize)> {
    let target = center.unwrap_or_else(|| Point::new(img_size.width / 2, img_size.height / 2));
    let mut best: Option<(Rect, usize, i64)> = None;
    for (idx, face) in faces.iter().enumerate() {
        let face_center = rect_center(face);
        let dx = (face_center.x - target.x) as i64;
        let dy = (face_center.y - target.y) as i64;
        let dist = dx * dx + dy * dy;
        if best.as_ref().map_or(true, |(_, _, closest)| dist < *closest) {
            best = Some((face, idx, dist));
        }
    }
    best.map(|(face, idx, _)| (face, idx))
}

fn round_point(p: Point2f) -> Point {
    Point::new(p.x.round() as i32, p.y.round() as i32)
}

/// Twice the triangle area via the 2D cross product; near zero means
/// the vertices are collinear and the affine solve is ill-defined.
fn twice_area(vertices: &[Point; 3]) -> f32 {
    let a = Vector2::new(vertices[0].x as f32, vertices[0].y as f32);
    let b = Vector2::new(vertices[1].x as f32, vertices[1].y as f32);
    let c = Vector2::new(vertices[2].x as f32, vertices[2].y as f32);
    let ab = b - a;
    let ac = c - a;
    let cross_product = ab.x * ac.y - ab.y * ac.x;
    cross_product.abs()
}

fn point_vector(vertices: &[Point; 3]) -> Vector<Point> {
    vertices.iter().copied().collect()
}

fn local_points(vertices: &[Point; 3], rect: Rect) -> Vector<Point2f> {
    vertices
        .iter()
        .map(|p| Point2f::new((p.x - rect.x) as f32, (p.y - rect.y) as f32))
        .collect()
}

fn to_int_points(local: &Vector<Point2f>) -> Vector<Point> {
    local
        .iter()
        .map(|p| Point::new(p.x.round() as i32, p.y.round() as i32))
        .collect()
}

fn triangle_mask(size: Size, local: &Vector<Point>) -> Result<Mat> {
    let mut mask =
        Mat::new_rows_cols_with_default(size.height, size.width, CV_8UC1, Scalar::all(0.0))?;
    fill_convex_poly(&mut mask, local, Scalar::all(255.0), LINE_8, 0)?;
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use opencv::core::{absdiff, sum_elems, Vec3b};
    use opencv::imgproc::{contour_area, point_polygon_test};

    use super::*;
    use crate::utils::coordinate::LANDMARK_COUNT;

    fn helper() -> SwapHelper {
        SwapHelper::new(SwapConfig::new())
    }

    /// 68 points on a 10-wide grid, the last row holds 8.
    fn grid_landmarks(x0: i32, y0: i32, step_x: i32, step_y: i32) -> LandmarkSet {
        let points = (0..LANDMARK_COUNT as i32)
            .map(|i| Point::new(x0 + (i % 10) * step_x, y0 + (i / 10) * step_y))
            .collect();
        LandmarkSet::from_points(points).unwrap()
    }

    fn gradient_image(rows: i32, cols: i32) -> Mat {
        let mut img =
            Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::all(0.0)).unwrap();
        for y in 0..rows {
            for x in 0..cols {
                let pixel = img.at_2d_mut::<Vec3b>(y, x).unwrap();
                *pixel = Vec3b::from([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
            }
        }
        img
    }

    fn flat_image(rows: i32, cols: i32, value: f64) -> Mat {
        Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::all(value)).unwrap()
    }

    fn abs_sum(a: &Mat, b: &Mat) -> f64 {
        let mut diff = Mat::default();
        absdiff(a, b, &mut diff).unwrap();
        let total = sum_elems(&diff).unwrap();
        total[0] + total[1] + total[2] + total[3]
    }

    #[test]
    fn test_hull_contains_every_landmark() {
        let landmarks = grid_landmarks(60, 60, 12, 14);
        let hull = helper().convex_hull(&landmarks).unwrap();
        assert!(hull.len() >= 3);
        for point in landmarks.points() {
            let inside = point_polygon_test(
                &hull,
                Point2f::new(point.x as f32, point.y as f32),
                false,
            )
            .unwrap();
            assert!(inside >= 0.0, "landmark {point:?} outside the hull");
        }
    }

    #[test]
    fn test_triangulation_tiles_the_hull() {
        let landmarks = grid_landmarks(60, 60, 12, 14);
        let helper = helper();
        let hull = helper.convex_hull(&landmarks).unwrap();
        let rect = bounding_rect(&hull).unwrap();

        let triangles = helper.triangulate(rect, &landmarks).unwrap();
        assert!(!triangles.is_empty());
        for triangle in &triangles {
            assert!(triangle.0.iter().all(|&idx| idx < LANDMARK_COUNT));
        }

        let triangle_area_sum: f64 = triangles
            .iter()
            .map(|t| twice_area(&t.lookup(&landmarks).unwrap()) as f64 / 2.0)
            .sum();
        let hull_area = contour_area(&hull, false).unwrap();
        assert_relative_eq!(triangle_area_sum, hull_area, epsilon = 1e-3);
    }

    #[test]
    fn test_topology_reuse_across_landmark_sets() {
        let source = grid_landmarks(60, 60, 12, 14);
        let target = grid_landmarks(120, 100, 15, 16);
        let helper = helper();
        let rect = bounding_rect(&helper.convex_hull(&source).unwrap()).unwrap();

        let triangles = helper.triangulate(rect, &source).unwrap();
        let resolved: Vec<_> = triangles
            .iter()
            .filter_map(|t| t.lookup(&target))
            .collect();
        assert_eq!(resolved.len(), triangles.len());
    }

    #[test]
    fn test_affine_solve_reproduces_target_vertices() {
        let src: Vector<Point2f> = vec![
            Point2f::new(10.0, 10.0),
            Point2f::new(60.0, 15.0),
            Point2f::new(30.0, 70.0),
        ]
        .into_iter()
        .collect();
        let dst: Vector<Point2f> = vec![
            Point2f::new(20.0, 25.0),
            Point2f::new(90.0, 30.0),
            Point2f::new(40.0, 100.0),
        ]
        .into_iter()
        .collect();

        let m = get_affine_transform(&src, &dst).unwrap();
        for i in 0..3 {
            let s = src.get(i).unwrap();
            let expected = dst.get(i).unwrap();
            let x = m.at_2d::<f64>(0, 0).unwrap() * s.x as f64
                + m.at_2d::<f64>(0, 1).unwrap() * s.y as f64
                + m.at_2d::<f64>(0, 2).unwrap();
            let y = m.at_2d::<f64>(1, 0).unwrap() * s.x as f64
                + m.at_2d::<f64>(1, 1).unwrap() * s.y as f64
                + m.at_2d::<f64>(1, 2).unwrap();
            assert_relative_eq!(x, expected.x as f64, epsilon = 1e-4);
            assert_relative_eq!(y, expected.y as f64, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_degenerate_triangle_is_skipped() {
        let source = grid_landmarks(60, 60, 12, 14);
        let target = grid_landmarks(120, 100, 15, 16);
        let face = gradient_image(260, 260);

        // Landmarks 0, 1, 2 sit on one grid row, collinear in both sets.
        let degenerate = [TriangleIndices([0, 1, 2])];
        let accumulation = helper()
            .warp_triangles(&face, Size::new(400, 400), &source, &target, &degenerate)
            .unwrap();

        let total = sum_elems(&accumulation).unwrap();
        assert_eq!(total[0] + total[1] + total[2], 0.0);
    }

    #[test]
    fn test_warp_paints_inside_target_triangle() {
        let source = grid_landmarks(60, 60, 12, 14);
        let target = grid_landmarks(120, 100, 15, 16);
        let face = gradient_image(260, 260);

        // Landmarks 0, 5 and 45 span a genuinely two-dimensional triangle.
        let triangles = [TriangleIndices([0, 5, 45])];
        let accumulation = helper()
            .warp_triangles(&face, Size::new(400, 400), &source, &target, &triangles)
            .unwrap();

        let total = sum_elems(&accumulation).unwrap();
        assert!(total[0] + total[1] + total[2] > 0.0);
    }

    #[test]
    fn test_swap_faces_end_to_end() {
        let source = grid_landmarks(60, 60, 12, 14);
        let target = grid_landmarks(120, 100, 15, 16);
        let face = gradient_image(260, 260);
        let body = flat_image(400, 400, 90.0);
        let helper = helper();

        let result = helper.swap_faces(&face, &body, &source, &target).unwrap();
        assert_eq!(result.size().unwrap(), body.size().unwrap());

        // Something changed inside the head region.
        assert!(abs_sum(&result, &body) > 0.0);

        // Pixels outside the (slightly inflated) hull bounding box are
        // untouched by warping and blending alike.
        let hull = helper.convex_hull(&target).unwrap();
        let rect = bounding_rect(&hull).unwrap();
        let inflated = clip_rect(
            Rect::new(rect.x - 2, rect.y - 2, rect.width + 4, rect.height + 4),
            400,
            400,
        );
        let mut result_outside = result.try_clone().unwrap();
        let mut body_outside = body.try_clone().unwrap();
        Mat::roi_mut(&mut result_outside, inflated)
            .unwrap()
            .set_to(&Scalar::all(0.0), &no_array())
            .unwrap();
        Mat::roi_mut(&mut body_outside, inflated)
            .unwrap()
            .set_to(&Scalar::all(0.0), &no_array())
            .unwrap();
        assert_eq!(abs_sum(&result_outside, &body_outside), 0.0);
    }

    #[test]
    fn test_swap_faces_is_deterministic() {
        let source = grid_landmarks(60, 60, 12, 14);
        let target = grid_landmarks(120, 100, 15, 16);
        let face = gradient_image(260, 260);
        let body = flat_image(400, 400, 90.0);
        let helper = helper();

        let first = helper.swap_faces(&face, &body, &source, &target).unwrap();
        let second = helper.swap_faces(&face, &body, &source, &target).unwrap();
        assert_eq!(abs_sum(&first, &second), 0.0);
    }

    #[test]
    fn test_select_largest_face() {
        let faces: Vector<Rect> = vec![
            Rect::new(10, 10, 40, 40),
            Rect::new(100, 100, 80, 80),
            Rect::new(200, 200, 20, 20),
        ]
        .into_iter()
        .collect();
        let (face, idx) = select_largest_face(&faces, 640, 480).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(face, Rect::new(100, 100, 80, 80));
    }

    #[test]
    fn test_select_center_face() {
        let faces: Vector<Rect> = vec![
            Rect::new(0, 0, 40, 40),
            Rect::new(300, 220, 40, 40),
        ]
        .into_iter()
        .collect();
        let (_, idx) = select_center_face(&faces, Size::new(640, 480), None).unwrap();
        assert_eq!(idx, 1);

        let (_, idx) =
            select_center_face(&faces, Size::new(640, 480), Some(Point::new(10, 10))).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_draw_mesh_marks_edges() {
        let landmarks = grid_landmarks(60, 60, 12, 14);
        let helper = helper();
        let rect = bounding_rect(&helper.convex_hull(&landmarks).unwrap()).unwrap();
        let triangles = helper.triangulate(rect, &landmarks).unwrap();

        let img = flat_image(260, 260, 0.0);
        let overlay = helper.draw_mesh(&img, &landmarks, &triangles).unwrap();
        assert!(abs_sum(&overlay, &img) > 0.0);
    }
}
