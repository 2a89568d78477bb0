#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for lines, shapes and circles.

use std::collections::BTreeSet;

use matrix_panel::{MatrixBuffer, MatrixDriver, Panel, PanelConfig, Result};

type Points = BTreeSet<(u16, u16)>;

fn panel(x_devices: u8, y_devices: u8) -> Result<Panel<'static, MatrixBuffer<16>>> {
    let mut panel = Panel::new(
        MatrixBuffer::<16>::new(),
        PanelConfig::new(x_devices, y_devices),
    )?;
    panel.begin();
    Ok(panel)
}

fn lit<D: MatrixDriver, F>(panel: &Panel<'_, D, F>) -> Points {
    (0..=panel.y_max())
        .flat_map(|y| (0..=panel.x_max()).map(move |x| (x, y)))
        .filter(|&(x, y)| panel.point(x, y))
        .collect()
}

fn points(list: &[(u16, u16)]) -> Points {
    list.iter().copied().collect()
}

fn line_points(x1: u16, y1: u16, x2: u16, y2: u16) -> Result<Points> {
    let mut panel = panel(4, 4)?;
    assert!(panel.draw_line(x1, y1, x2, y2, true));
    Ok(lit(&panel))
}

#[test]
fn hline_argument_order_does_not_matter() -> Result<()> {
    let mut forward = panel(2, 1)?;
    let mut backward = panel(2, 1)?;
    assert!(forward.draw_hline(3, 2, 5, true));
    assert!(backward.draw_hline(3, 5, 2, true));
    assert_eq!(lit(&forward), points(&[(2, 3), (3, 3), (4, 3), (5, 3)]));
    assert_eq!(lit(&forward), lit(&backward));
    Ok(())
}

#[test]
fn vline_is_inclusive_in_either_order() -> Result<()> {
    let mut panel = panel(2, 1)?;
    assert!(panel.draw_vline(9, 6, 1, true));
    assert_eq!(lit(&panel), (1..=6).map(|y| (9, y)).collect::<Points>());
    Ok(())
}

#[test]
fn hline_partly_off_panel_draws_the_rest() -> Result<()> {
    let mut panel = panel(2, 1)?;
    assert!(!panel.draw_hline(0, 12, 20, true));
    assert_eq!(lit(&panel), (12..=15).map(|x| (x, 0)).collect::<Points>());
    Ok(())
}

#[test]
fn shallow_line_matches_bresenham() -> Result<()> {
    assert_eq!(
        line_points(0, 0, 4, 2)?,
        points(&[(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)])
    );
    Ok(())
}

#[test]
fn steep_and_descending_lines() -> Result<()> {
    assert_eq!(
        line_points(0, 0, 2, 4)?,
        points(&[(0, 0), (0, 1), (1, 2), (1, 3), (2, 4)])
    );
    assert_eq!(
        line_points(0, 3, 3, 0)?,
        points(&[(0, 3), (1, 2), (2, 1), (3, 0)])
    );
    Ok(())
}

#[test]
fn line_includes_both_endpoints() -> Result<()> {
    for (x1, y1, x2, y2) in [(0, 0, 31, 31), (3, 17, 25, 2), (5, 5, 5, 20), (30, 1, 2, 9)] {
        let drawn = line_points(x1, y1, x2, y2)?;
        assert!(drawn.contains(&(x1, y1)), "({x1},{y1}) missing");
        assert!(drawn.contains(&(x2, y2)), "({x2},{y2}) missing");
    }
    Ok(())
}

#[test]
fn line_is_symmetric() -> Result<()> {
    let cases = [
        (0, 0, 7, 3),
        (2, 29, 19, 4),
        (11, 11, 11, 0),
        (0, 9, 31, 9),
        (4, 1, 9, 30),
    ];
    for (x1, y1, x2, y2) in cases {
        assert_eq!(line_points(x1, y1, x2, y2)?, line_points(x2, y2, x1, y1)?);
    }
    Ok(())
}

#[test]
fn single_point_line() -> Result<()> {
    assert_eq!(line_points(6, 6, 6, 6)?, points(&[(6, 6)]));
    Ok(())
}

#[test]
fn rectangle_outline_is_closed() -> Result<()> {
    let mut panel = panel(2, 2)?;
    assert!(panel.draw_rectangle(9, 2, 3, 12, true));
    let drawn = lit(&panel);
    for x in 3..=9 {
        assert!(drawn.contains(&(x, 2)) && drawn.contains(&(x, 12)));
    }
    for y in 2..=12 {
        assert!(drawn.contains(&(3, y)) && drawn.contains(&(9, y)));
    }
    assert_eq!(drawn.len(), 2 * 7 + 2 * 9);
    assert!(!drawn.contains(&(5, 5)));
    Ok(())
}

#[test]
fn rectangle_partly_off_panel_is_reported() -> Result<()> {
    let mut panel = panel(2, 1)?;
    assert!(!panel.draw_rectangle(10, 2, 20, 5, true));
    let drawn = lit(&panel);
    assert!(drawn.contains(&(10, 2)));
    assert!(drawn.contains(&(15, 5)));
    assert!(drawn.contains(&(10, 5)));
    Ok(())
}

#[test]
fn triangle_is_three_lines() -> Result<()> {
    let mut triangle = panel(4, 4)?;
    assert!(triangle.draw_triangle(1, 1, 20, 4, 8, 25, true));

    let mut lines = panel(4, 4)?;
    lines.draw_line(1, 1, 20, 4, true);
    lines.draw_line(20, 4, 8, 25, true);
    lines.draw_line(8, 25, 1, 1, true);
    assert_eq!(lit(&triangle), lit(&lines));
    Ok(())
}

#[test]
fn quadrilateral_is_four_lines() -> Result<()> {
    let mut quad = panel(4, 4)?;
    let flushes = quad.driver().flush_count();
    assert!(quad.draw_quadrilateral(2, 2, 28, 5, 25, 29, 4, 20, true));
    assert_eq!(quad.driver().flush_count(), flushes + 1);

    let mut lines = panel(4, 4)?;
    lines.draw_line(2, 2, 28, 5, true);
    lines.draw_line(28, 5, 25, 29, true);
    lines.draw_line(25, 29, 4, 20, true);
    lines.draw_line(4, 20, 2, 2, true);
    assert_eq!(lit(&quad), lit(&lines));
    Ok(())
}

#[test]
fn polygon_edge_cases() -> Result<()> {
    let mut panel = panel(2, 1)?;
    assert!(panel.draw_polygon(&[], true));
    assert!(lit(&panel).is_empty());
    assert!(panel.draw_polygon(&[(4, 4)], true));
    assert_eq!(lit(&panel), points(&[(4, 4)]));
    assert!(!panel.draw_polygon(&[(0, 0), (20, 0), (0, 7)], true));
    Ok(())
}

#[test]
fn zero_radius_circle_is_one_point() -> Result<()> {
    let mut panel = panel(2, 2)?;
    assert!(panel.draw_circle(10, 10, 0, true));
    assert_eq!(lit(&panel), points(&[(10, 10)]));
    Ok(())
}

#[test]
fn circle_has_octant_symmetry() -> Result<()> {
    let mut panel = panel(2, 2)?;
    assert!(panel.draw_circle(8, 8, 5, true));
    let drawn = lit(&panel);
    assert!(drawn.contains(&(13, 8)) && drawn.contains(&(3, 8)));
    assert!(drawn.contains(&(8, 13)) && drawn.contains(&(8, 3)));
    assert!(!drawn.contains(&(8, 8)));
    for &(x, y) in &drawn {
        let (dx, dy) = (i32::from(x) - 8, i32::from(y) - 8);
        for (rx, ry) in [(-dx, dy), (dx, -dy), (dy, dx), (-dy, -dx)] {
            let reflected = (
                u16::try_from(8 + rx).expect("reflection stays on the panel"),
                u16::try_from(8 + ry).expect("reflection stays on the panel"),
            );
            assert!(drawn.contains(&reflected), "{reflected:?} missing");
        }
    }
    Ok(())
}

#[test]
fn circle_clipped_at_origin_reports_false() -> Result<()> {
    let mut panel = panel(2, 2)?;
    assert!(!panel.draw_circle(1, 1, 3, true));
    let drawn = lit(&panel);
    assert!(drawn.contains(&(4, 1)));
    assert!(drawn.contains(&(1, 4)));
    Ok(())
}

#[test]
fn clear_window_after_rectangle_leaves_window_dark() -> Result<()> {
    let mut panel = panel(2, 2)?;
    assert!(panel.draw_rectangle(0, 0, 7, 7, true));
    assert!(panel.draw_rectangle(0, 0, 15, 15, true));
    assert!(panel.clear_window(0, 0, 7, 7));
    for x in 0..=7 {
        for y in 0..=7 {
            assert!(!panel.point(x, y), "({x},{y}) still lit");
        }
    }
    assert!(panel.point(15, 15));
    assert!(panel.point(8, 0));
    assert!(panel.point(0, 8));
    Ok(())
}

#[test]
fn drawing_off_erases() -> Result<()> {
    let mut panel = panel(2, 1)?;
    panel.draw_hline(4, 0, 15, true);
    assert!(panel.draw_line(3, 4, 12, 4, false));
    assert_eq!(
        lit(&panel),
        points(&[(0, 4), (1, 4), (2, 4), (13, 4), (14, 4), (15, 4)])
    );
    Ok(())
}
