pub trait HasSize {
    /// Drawable extent in physical pixels.
    fn size(&self) -> Size;
}

/// Pixel extent. Physical or logical depending on where it comes from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Logical extent of a physical size at the given scale factor.
    pub fn to_logical(&self, scale_factor: f64) -> Size {
        winit::dpi::PhysicalSize::new(self.width, self.height)
            .to_logical::<u32>(scale_factor)
            .into()
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Size {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl From<winit::dpi::LogicalSize<u32>> for Size {
    fn from(size: winit::dpi::LogicalSize<u32>) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

/// Pointer location in logical pixels, origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[cfg(test)]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<winit::dpi::LogicalPosition<f64>> for Position {
    fn from(position: winit::dpi::LogicalPosition<f64>) -> Self {
        Self {
            x: position.x,
            y: position.y,
        }
    }
}

impl HasSize for winit::window::Window {
    fn size(&self) -> Size {
        self.inner_size().into()
    }
}

pub trait Window: HasSize + raw_window_handle::HasRawWindowHandle {}

impl Window for winit::window::Window {}
