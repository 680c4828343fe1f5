use crate::consts;
use ratatui::layout::{Rect, Size};

/// Return the area of `buffer_area` in which the program draws: a
/// [`DISPLAY_SIZE`][consts::DISPLAY_SIZE] rectangle in the middle of the
/// terminal, shrunk if the terminal is smaller.
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a rectangle of the given size centered in `area`.  If `size` is
/// larger than `area` in either dimension, that dimension is clamped to
/// `area`'s.  Odd leftover space goes after the rectangle.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x.saturating_add((area.width - width) / 2),
        y: area.y.saturating_add((area.height - height) / 2),
        width,
        height,
    }
}
