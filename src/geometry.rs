/// Axis-aligned rectangles in playfield pixels (y grows downward).

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// True when the two boxes overlap on both axes.  Shared edges count.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.x > b.right() || a.right() < b.x || a.y > b.bottom() || a.bottom() < b.y)
}
