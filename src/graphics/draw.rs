use super::{blend::Mixer, Argb, P2};

// Rasterizers over a raw row-major buffer. Everything clips against
// `cwidth` x `cheight`; shapes may lie partly or fully off canvas.

pub fn set_pixel_xy_by(canvas: &mut [Argb], cwidth: usize, cheight: usize, p: P2, c: Argb, b: Mixer) {
    if p.x < 0 || p.y < 0 || p.x as usize >= cwidth || p.y as usize >= cheight {
        return;
    }

    let i = p.y as usize * cwidth + p.x as usize;

    if let Some(px) = canvas.get_mut(i) {
        *px = b(*px, c);
    }
}

/// Horizontal run from `xs` to `xe`, both inclusive.
pub fn draw_span_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    y: i32,
    xs: i32,
    xe: i32,
    c: Argb,
    b: Mixer,
) {
    if y < 0 || y as usize >= cheight || cwidth == 0 {
        return;
    }

    let xs = xs.max(0);
    let xe = xe.min(cwidth as i32 - 1);

    if xs > xe {
        return;
    }

    let row = y as usize * cwidth;

    if let Some(run) = canvas.get_mut(row + xs as usize..=row + xe as usize) {
        for p in run {
            *p = b(*p, c);
        }
    }
}

/// Filled rectangle with its top-left corner at `ps`.
pub fn draw_rect_wh_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    ps: P2,
    w: usize,
    h: usize,
    c: Argb,
    b: Mixer,
) {
    if w == 0 {
        return;
    }

    let xe = ps.x.saturating_add(w as i32 - 1);

    for y in ps.y..ps.y.saturating_add(h as i32) {
        draw_span_by(canvas, cwidth, cheight, y, ps.x, xe, c, b);
    }
}

// Midpoint circle (Jesko's variant), filled with one span per octant pair.
// Every row is written exactly once so translucent colors blend evenly.
pub fn draw_circle_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    center: P2,
    radius: i32,
    c: Argb,
    b: Mixer,
) {
    if radius < 0 {
        return;
    }

    let mut t1 = radius / 16;
    let mut t2;
    let mut x = radius;
    let mut y = 0;

    // Half-width of the run on each row offset, widest wins.
    let mut runs = vec![-1i32; radius as usize + 1];

    loop {
        runs[y as usize] = runs[y as usize].max(x);
        runs[x as usize] = runs[x as usize].max(y);

        y += 1;
        t1 += y;
        t2 = t1 - x;

        if t2 >= 0 {
            t1 = t2;
            x -= 1;
        }

        if x < y {
            break;
        }
    }

    for (dy, &half) in runs.iter().enumerate() {
        if half < 0 {
            continue;
        }

        let dy = dy as i32;
        let (xs, xe) = (center.x - half, center.x + half);

        draw_span_by(canvas, cwidth, cheight, center.y + dy, xs, xe, c, b);

        if dy != 0 {
            draw_span_by(canvas, cwidth, cheight, center.y - dy, xs, xe, c, b);
        }
    }
}

/// Filled triangle. A pixel is covered when its center lies inside
/// or on an edge, whatever the winding of `pa`, `pb`, `pc`.
pub fn draw_triangle_by(
    canvas: &mut [Argb],
    cwidth: usize,
    cheight: usize,
    pa: P2,
    pb: P2,
    pc: P2,
    c: Argb,
    b: Mixer,
) {
    let edge = |p: P2, q: P2, x: i64, y: i64| -> i64 {
        let (px, py, qx, qy) = (p.x as i64, p.y as i64, q.x as i64, q.y as i64);
        (qx - px) * (y - py) - (qy - py) * (x - px)
    };

    let area = edge(pa, pb, pc.x as i64, pc.y as i64);

    if area == 0 {
        return;
    }

    let xs = pa.x.min(pb.x).min(pc.x).max(0);
    let xe = pa.x.max(pb.x).max(pc.x).min(cwidth as i32 - 1);
    let ys = pa.y.min(pb.y).min(pc.y).max(0);
    let ye = pa.y.max(pb.y).max(pc.y).min(cheight as i32 - 1);

    for y in ys..=ye {
        for x in xs..=xe {
            let (x, y) = (x as i64, y as i64);

            let w0 = edge(pb, pc, x, y);
            let w1 = edge(pc, pa, x, y);
            let w2 = edge(pa, pb, x, y);

            let inside = if area > 0 {
                w0 >= 0 && w1 >= 0 && w2 >= 0
            } else {
                w0 <= 0 && w1 <= 0 && w2 <= 0
            };

            if inside {
                set_pixel_xy_by(canvas, cwidth, cheight, P2::new(x as i32, y as i32), c, b);
            }
        }
    }
}
