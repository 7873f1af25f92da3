use log::trace;

/// A 24 bit color, blue in the high byte and red in the low one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const RED: Color = Color(0x0000FF);
    pub const BLUE: Color = Color(0xFF0000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const MAROON: Color = Color(0x2E1CB0);
    pub const ORANGE: Color = Color(0x1A67C0);

    /// A shade of grey, zero being black.
    pub const fn grey(level: u8) -> Self {
        let l = level as u32;
        Color(l << 16 | l << 8 | l)
    }
}

/// An axis aligned rectangle in pixels, from its top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Something that can draw filled rectangles and text.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws `text` with its top left corner at `(x, y)`.
    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color);
    }

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        (**self).draw_text(x, y, text, color);
    }
}

/// A canvas that turns every draw call into a trace record.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCanvas;

impl Canvas for LogCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Rect { x, y, w, h } = rect;
        trace!(x = x, y = y, w = w, h = h, color = color.0; "fill_rect");
    }

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        trace!(x = x, y = y, color = color.0; "draw_text {text:?}");
    }
}
