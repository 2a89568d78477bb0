//! Line, shape and circle rasterization on top of [`Panel`] points.

use itertools::Itertools;

use super::{MatrixDriver, Panel};

impl<D: MatrixDriver, F> Panel<'_, D, F> {
    /// Horizontal line on row `y` from `x1` to `x2`, both inclusive, in either order.
    pub fn draw_hline(&mut self, y: u16, x1: u16, x2: u16, state: bool) -> bool {
        let (from, to) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        self.batch(|panel| {
            (from..=to).fold(true, |all, x| panel.write_point(x, y, state) & all)
        })
    }

    /// Vertical line on column `x` from `y1` to `y2`, both inclusive, in either order.
    pub fn draw_vline(&mut self, x: u16, y1: u16, y2: u16, state: bool) -> bool {
        let (from, to) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        self.batch(|panel| {
            (from..=to).fold(true, |all, y| panel.write_point(x, y, state) & all)
        })
    }

    /// Straight line between two points, both endpoints included.
    ///
    /// `draw_line(a, b)` and `draw_line(b, a)` light exactly the same LEDs.
    pub fn draw_line(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, state: bool) -> bool {
        trace!("Panel::draw_line: ({},{}) to ({},{})", x1, y1, x2, y2);
        self.batch(|panel| {
            panel.bresenham(
                i32::from(x1),
                i32::from(y1),
                i32::from(x2),
                i32::from(y2),
                state,
            )
        })
    }

    /// Outline of the rectangle with opposite corners `(x1, y1)` and `(x2, y2)`.
    pub fn draw_rectangle(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, state: bool) -> bool {
        self.batch(|panel| {
            let bottom = panel.draw_hline(y1, x1, x2, state);
            let top = panel.draw_hline(y2, x1, x2, state);
            let left = panel.draw_vline(x1, y1, y2, state);
            let right = panel.draw_vline(x2, y1, y2, state);
            bottom & top & left & right
        })
    }

    /// Outline of a triangle.
    #[expect(clippy::too_many_arguments, reason = "three vertices plus the state")]
    pub fn draw_triangle(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        x3: u16,
        y3: u16,
        state: bool,
    ) -> bool {
        self.draw_polygon(&[(x1, y1), (x2, y2), (x3, y3)], state)
    }

    /// Outline of a quadrilateral, edges joining the vertices in the order given.
    #[expect(clippy::too_many_arguments, reason = "four vertices plus the state")]
    pub fn draw_quadrilateral(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        x3: u16,
        y3: u16,
        x4: u16,
        y4: u16,
        state: bool,
    ) -> bool {
        self.draw_polygon(&[(x1, y1), (x2, y2), (x3, y3), (x4, y4)], state)
    }

    /// Closed outline through `vertices`, the last vertex joined back to the first.
    ///
    /// A single vertex draws one point; no vertices draws nothing and returns `true`.
    pub fn draw_polygon(&mut self, vertices: &[(u16, u16)], state: bool) -> bool {
        match vertices {
            [] => true,
            [(x, y)] => self.set_point(*x, *y, state),
            _ => self.batch(|panel| {
                vertices
                    .iter()
                    .copied()
                    .circular_tuple_windows::<((u16, u16), (u16, u16))>()
                    .fold(true, |all, ((x1, y1), (x2, y2))| {
                        panel.draw_line(x1, y1, x2, y2, state) & all
                    })
            }),
        }
    }

    /// Circle of radius `r` around `(xc, yc)`. A radius of 0 lights the centre only.
    ///
    /// Parts of the circle left of or below the origin are clipped and make the
    /// result `false`.
    pub fn draw_circle(&mut self, xc: u16, yc: u16, r: u16, state: bool) -> bool {
        trace!("Panel::draw_circle: ({},{}) r={}", xc, yc, r);
        let (xc, yc, r) = (i32::from(xc), i32::from(yc), i32::from(r));
        self.batch(|panel| {
            let (mut x, mut y) = (0, r);
            let mut decision = 3 - 2 * r;
            let mut all = panel.draw_circle_points(xc, yc, x, y, state);
            while x < y {
                if decision <= 0 {
                    decision += 4 * x + 6;
                } else {
                    decision += 4 * (x - y) + 10;
                    y -= 1;
                }
                x += 1;
                all &= panel.draw_circle_points(xc, yc, x, y, state);
            }
            all
        })
    }

    /// Turn off every LED in the window with corners `(x1, y1)` and `(x2, y2)`.
    pub fn clear_window(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) -> bool {
        let (from, to) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        debug!("Panel::clear_window: x {}..={}", from, to);
        self.batch(|panel| {
            (from..=to).fold(true, |all, x| panel.draw_vline(x, y1, y2, false) & all)
        })
    }

    fn bresenham(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, state: bool) -> bool {
        let ((mut x, mut y), (x_end, y_end)) = if x1 <= x2 {
            ((x1, y1), (x2, y2))
        } else {
            ((x2, y2), (x1, y1))
        };
        let dx = x_end - x;
        let dy = (y_end - y).abs();
        let y_step = if y < y_end { 1 } else { -1 };
        let mut error = (if dx > dy { dx } else { -dy }) / 2;
        let mut all = true;
        loop {
            all &= self.plot(x, y, state);
            if x == x_end && y == y_end {
                return all;
            }
            let previous = error;
            if previous > -dx {
                error -= dy;
                x += 1;
            }
            if previous < dy {
                error += dx;
                y += y_step;
            }
        }
    }

    // Plots the eight reflections of one octant point.
    fn draw_circle_points(&mut self, xc: i32, yc: i32, x: i32, y: i32, state: bool) -> bool {
        [
            (xc + x, yc + y),
            (xc - x, yc + y),
            (xc + x, yc - y),
            (xc - x, yc - y),
            (xc + y, yc + x),
            (xc - y, yc + x),
            (xc + y, yc - x),
            (xc - y, yc - x),
        ]
        .into_iter()
        .fold(true, |all, (px, py)| self.plot(px, py, state) & all)
    }
}
