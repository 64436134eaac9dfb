/// A position in surface units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds bounds of the given size centered on `center`.
    pub fn centered(center: Point, width: f32, height: f32) -> Self {
        Self::new(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open containment, matching how pointer hits are tested against cells.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// The `index`-th row of height `row_height`, counted from the top.
    pub fn row(&self, index: usize, row_height: f32) -> Self {
        Self::new(
            self.x,
            self.y + index as f32 * row_height,
            self.width,
            row_height,
        )
    }
}
