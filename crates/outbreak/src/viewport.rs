/// Projection parameters owned by the host view. Resizing touches nothing else.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        *self = Self::new(width, height);
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}
