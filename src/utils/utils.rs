use opencv::core::{Point, Rect};

/// clip_rect intersects a rectangle with the bounds of a
/// `width` x `height` image. The result may be empty.
pub fn clip_rect(rect: Rect, width: i32, height: i32) -> Rect {
    let x = rect.x.clamp(0, width);
    let y = rect.y.clamp(0, height);
    let right = (rect.x + rect.width).clamp(0, width);
    let bottom = (rect.y + rect.height).clamp(0, height);
    Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
}

/// rect_center returns the integer center of a rectangle.
pub fn rect_center(rect: Rect) -> Point {
    Point::new(rect.x + rect.width / 2, rect.y + rect.height / 2)
}
