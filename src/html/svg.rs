//! Inline SVG drawing of chart figures.
//!
//! Every chart is drawn into a fixed viewBox and scaled by CSS. Text and
//! axes use `currentColor` so they follow the page's text colour; series
//! colours come from [`PALETTE`], with the theme's primary colour (when
//! there is a theme) taking the first slot.

use std::f64::consts::PI;

use super::escape;
use crate::dataset::Value;
use crate::render::chart::{Figure, Mark, Polygon, Series, Slice};
use crate::render::format;

/// Qualitative series colours.
pub const PALETTE: &[&str] = &[
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

const GRID_COLOR: &str = "rgba(128, 128, 128, 0.35)";
const TRACK_COLOR: &str = "rgba(128, 128, 128, 0.25)";

// Cartesian geometry
const XY_WIDTH: f64 = 640.0;
const XY_HEIGHT: f64 = 360.0;
const XY_LEFT: f64 = 64.0;
const XY_RIGHT: f64 = 16.0;
const XY_TOP: f64 = 28.0;
const XY_BOTTOM: f64 = 44.0;
const Y_TICK_TARGET: usize = 5;
const MAX_X_LABELS: usize = 10;
const MAX_LABEL_CHARS: usize = 14;
const BAR_GROUP_FILL: f64 = 0.8;
const AREA_OPACITY: f64 = 0.3;

// Donut geometry
const DONUT_WIDTH: f64 = 560.0;
const DONUT_HEIGHT: f64 = 340.0;
const DONUT_RADIUS: f64 = 150.0;
const LEGEND_ROWS: usize = 12;

// Funnel geometry
const FUNNEL_WIDTH: f64 = 640.0;
const FUNNEL_LABEL_W: f64 = 160.0;
const FUNNEL_ROW_H: f64 = 44.0;
const FUNNEL_GAP: f64 = 6.0;

// Gauge geometry
const GAUGE_WIDTH: f64 = 320.0;
const GAUGE_HEIGHT: f64 = 200.0;
const GAUGE_RADIUS: f64 = 120.0;
const GAUGE_STROKE: f64 = 26.0;

// Radar geometry
const RADAR_SIZE: f64 = 440.0;
const RADAR_RADIUS: f64 = 150.0;

/// Draw a figure as an `<svg>` element.
pub fn chart(figure: &Figure, accent: Option<&str>) -> String {
    match figure {
        Figure::Cartesian { mark, x, series, .. } => cartesian(*mark, x, series, accent),
        Figure::Donut { hole, slices } => donut(*hole, slices, accent),
        Figure::Funnel { stages } => funnel(stages, accent),
        Figure::Gauge { value, min, max } => gauge(*value, *min, *max, accent),
        Figure::Radar {
            categories,
            polygons,
        } => radar(categories, polygons, accent),
    }
}

fn color<'a>(i: usize, accent: Option<&'a str>) -> &'a str {
    match (i, accent) {
        (0, Some(accent)) => accent,
        _ => PALETTE[i % PALETTE.len()],
    }
}

fn open(width: f64, height: f64) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" role=\"img\" \
         font-family=\"inherit\" font-size=\"12\" fill=\"currentColor\">",
        width, height
    )
}

fn text(x: f64, y: f64, anchor: &str, content: &str) -> String {
    format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"{}\">{}</text>",
        x,
        y,
        anchor,
        escape(content)
    )
}

fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('\u{2026}');
        out
    }
}

fn legend_entry(x: f64, y: f64, swatch: &str, label: &str) -> String {
    format!(
        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"10\" height=\"10\" fill=\"{}\"/>{}",
        x,
        y - 9.0,
        swatch,
        text(x + 14.0, y, "start", label)
    )
}

fn no_data(width: f64, height: f64) -> String {
    let mut out = open(width, height);
    out.push_str(&text(width / 2.0, height / 2.0, "middle", "No data"));
    out.push_str("</svg>");
    out
}

// ============================================================================
// NICE TICK GENERATION
// ============================================================================

fn nice_step(rough: f64) -> f64 {
    let exponent = rough.abs().log10().floor();
    let fraction = rough / 10.0f64.powf(exponent);
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * 10.0f64.powf(exponent)
}

/// Round-numbered ticks covering `[min, max]`.
fn nice_ticks(min: f64, max: f64, target_count: usize) -> Vec<f64> {
    if (max - min).abs() < 1e-10 {
        return vec![min];
    }

    let step = nice_step((max - min) / target_count as f64);
    let tick_min = (min / step).floor() * step;
    let tick_max = (max / step).ceil() * step;

    let mut ticks = Vec::new();
    let mut v = tick_min;
    while v <= tick_max + step * 0.01 {
        // Snap accumulated error so labels stay round.
        ticks.push((v / step).round() * step);
        v += step;
    }
    ticks
}

// ============================================================================
// CARTESIAN
// ============================================================================

/// Horizontal centre of each row. An all-timestamp axis is scaled by time;
/// anything else gets one evenly spaced band per row.
fn x_positions(x: &[Value], band: f64, plot_w: f64) -> Vec<f64> {
    let by_index = || {
        (0..x.len())
            .map(|i| XY_LEFT + band * (i as f64 + 0.5))
            .collect()
    };

    let times: Option<Vec<i64>> = x
        .iter()
        .map(|v| match v {
            Value::Timestamp(t) => Some(t.and_utc().timestamp_millis()),
            _ => None,
        })
        .collect();
    let Some(times) = times else {
        return by_index();
    };
    let (min, max) = times
        .iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), &t| (lo.min(t), hi.max(t)));
    if max <= min {
        return by_index();
    }

    let span = (max - min) as f64;
    times
        .iter()
        .map(|&t| XY_LEFT + band / 2.0 + (plot_w - band) * ((t - min) as f64 / span))
        .collect()
}

/// Split a series into runs of consecutive present values.
fn segments(values: &[Option<f64>]) -> Vec<Vec<(usize, f64)>> {
    let mut out: Vec<Vec<(usize, f64)>> = Vec::new();
    let mut current = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(v) if v.is_finite() => current.push((i, *v)),
            _ => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn cartesian(mark: Mark, x: &[Value], series: &[Series], accent: Option<&str>) -> String {
    let n = x.len();
    if n == 0 {
        return no_data(XY_WIDTH, XY_HEIGHT);
    }

    // Always include zero so bars and areas have a baseline.
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.values.iter().flatten().copied())
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let mut ticks = nice_ticks(lo, hi, Y_TICK_TARGET);
    if ticks.len() < 2 {
        // Flat data: give it a unit range above its level.
        ticks = nice_ticks(lo, lo + lo.abs().max(1.0), Y_TICK_TARGET);
    }
    let (y_lo, y_hi) = match (ticks.first(), ticks.last()) {
        (Some(&a), Some(&b)) if b > a => (a, b),
        _ => (lo, lo + lo.abs().max(1.0)),
    };

    let plot_w = XY_WIDTH - XY_LEFT - XY_RIGHT;
    let plot_h = XY_HEIGHT - XY_TOP - XY_BOTTOM;
    let band = plot_w / n as f64;
    let xs = x_positions(x, band, plot_w);
    let y_of = |v: f64| XY_TOP + plot_h * (1.0 - (v - y_lo) / (y_hi - y_lo));
    let x_of = |i: usize| xs[i];
    let baseline = y_of(0.0f64.clamp(y_lo, y_hi));

    let mut out = open(XY_WIDTH, XY_HEIGHT);

    // Grid and y labels
    for &t in &ticks {
        let y = y_of(t);
        out.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-dasharray=\"3 5\"/>",
            XY_LEFT,
            y,
            XY_WIDTH - XY_RIGHT,
            y,
            GRID_COLOR
        ));
        out.push_str(&text(XY_LEFT - 8.0, y + 4.0, "end", &format::tick(t)));
    }

    // Axes
    out.push_str(&format!(
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"currentColor\"/>",
        XY_LEFT,
        baseline,
        XY_WIDTH - XY_RIGHT,
        baseline
    ));

    // X labels, thinned to at most MAX_X_LABELS
    let step = n.div_ceil(MAX_X_LABELS).max(1);
    for (i, v) in x.iter().enumerate().step_by(step) {
        out.push_str(&text(
            x_of(i),
            XY_HEIGHT - XY_BOTTOM + 18.0,
            "middle",
            &truncate(&v.to_string(), MAX_LABEL_CHARS),
        ));
    }

    match mark {
        Mark::Bar => {
            let group = band * BAR_GROUP_FILL;
            let bar_w = group / series.len().max(1) as f64;
            for (si, s) in series.iter().enumerate() {
                let fill = color(si, accent);
                for (i, v) in s.values.iter().enumerate() {
                    let Some(v) = v.filter(|v| v.is_finite()) else {
                        continue;
                    };
                    let x0 = x_of(i) - group / 2.0 + bar_w * si as f64;
                    let y = y_of(v);
                    out.push_str(&format!(
                        "<rect class=\"tb-bar\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>",
                        x0,
                        y.min(baseline),
                        bar_w,
                        (baseline - y).abs(),
                        fill
                    ));
                }
            }
        }
        Mark::Line | Mark::Area => {
            for (si, s) in series.iter().enumerate() {
                let stroke = color(si, accent);
                for run in segments(&s.values) {
                    let points: Vec<String> = run
                        .iter()
                        .map(|&(i, v)| format!("{:.1},{:.1}", x_of(i), y_of(v)))
                        .collect();
                    if mark == Mark::Area {
                        let (first, last) = (run[0].0, run[run.len() - 1].0);
                        out.push_str(&format!(
                            "<polygon class=\"tb-area\" points=\"{:.1},{:.1} {} {:.1},{:.1}\" fill=\"{}\" fill-opacity=\"{}\"/>",
                            x_of(first),
                            baseline,
                            points.join(" "),
                            x_of(last),
                            baseline,
                            stroke,
                            AREA_OPACITY
                        ));
                    }
                    if run.len() == 1 {
                        let (i, v) = run[0];
                        out.push_str(&format!(
                            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{}\"/>",
                            x_of(i),
                            y_of(v),
                            stroke
                        ));
                    } else {
                        out.push_str(&format!(
                            "<polyline class=\"tb-line\" points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2.5\"/>",
                            points.join(" "),
                            stroke
                        ));
                    }
                }
            }
        }
    }

    if series.len() > 1 {
        for (si, s) in series.iter().enumerate() {
            out.push_str(&legend_entry(
                XY_LEFT + 130.0 * si as f64,
                16.0,
                color(si, accent),
                &truncate(&s.name, MAX_LABEL_CHARS),
            ));
        }
    }

    out.push_str("</svg>");
    out
}

// ============================================================================
// DONUT
// ============================================================================

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

/// Ring segment between two angles (radians, clockwise from +x).
fn annular_sector(cx: f64, cy: f64, r_out: f64, r_in: f64, a0: f64, a1: f64) -> String {
    let large = if a1 - a0 > PI { 1 } else { 0 };
    let (x0, y0) = polar(cx, cy, r_out, a0);
    let (x1, y1) = polar(cx, cy, r_out, a1);
    let (x2, y2) = polar(cx, cy, r_in, a1);
    let (x3, y3) = polar(cx, cy, r_in, a0);
    format!(
        "M{:.2} {:.2} A{:.2} {:.2} 0 {} 1 {:.2} {:.2} L{:.2} {:.2} A{:.2} {:.2} 0 {} 0 {:.2} {:.2} Z",
        x0, y0, r_out, r_out, large, x1, y1, x2, y2, r_in, r_in, large, x3, y3
    )
}

fn donut(hole: f64, slices: &[Slice], accent: Option<&str>) -> String {
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
    if !(total > 0.0) {
        return no_data(DONUT_WIDTH, DONUT_HEIGHT);
    }

    let (cx, cy) = (DONUT_RADIUS + 20.0, DONUT_HEIGHT / 2.0);
    let r_in = DONUT_RADIUS * hole;
    let mut out = open(DONUT_WIDTH, DONUT_HEIGHT);

    let mut angle = -PI / 2.0;
    for (i, slice) in slices.iter().enumerate() {
        let value = slice.value.max(0.0);
        if value == 0.0 {
            continue;
        }
        let fill = color(i, accent);
        let fraction = value / total;
        if fraction > 0.999_999 {
            // A full ring cannot be drawn as a single arc.
            out.push_str(&format!(
                "<circle class=\"tb-slice\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.1}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.1}\"/>",
                cx,
                cy,
                (DONUT_RADIUS + r_in) / 2.0,
                fill,
                DONUT_RADIUS - r_in
            ));
        } else {
            let end = angle + fraction * 2.0 * PI;
            out.push_str(&format!(
                "<path class=\"tb-slice\" d=\"{}\" fill=\"{}\"/>",
                annular_sector(cx, cy, DONUT_RADIUS, r_in, angle, end),
                fill
            ));
            angle = end;
        }
    }

    let legend_x = cx + DONUT_RADIUS + 40.0;
    for (i, slice) in slices.iter().take(LEGEND_ROWS).enumerate() {
        let label = format!(
            "{} ({:.1}%)",
            truncate(&slice.label, MAX_LABEL_CHARS),
            slice.value.max(0.0) / total * 100.0
        );
        out.push_str(&legend_entry(legend_x, 40.0 + 22.0 * i as f64, color(i, accent), &label));
    }
    if slices.len() > LEGEND_ROWS {
        out.push_str(&text(
            legend_x,
            40.0 + 22.0 * LEGEND_ROWS as f64,
            "start",
            &format!("+{} more", slices.len() - LEGEND_ROWS),
        ));
    }

    out.push_str("</svg>");
    out
}

// ============================================================================
// FUNNEL
// ============================================================================

fn funnel(stages: &[Slice], accent: Option<&str>) -> String {
    let max = stages.iter().map(|s| s.value).fold(0.0f64, f64::max);
    if stages.is_empty() || !(max > 0.0) {
        return no_data(FUNNEL_WIDTH, 120.0);
    }

    let height = 16.0 + stages.len() as f64 * (FUNNEL_ROW_H + FUNNEL_GAP);
    let bar_area = FUNNEL_WIDTH - FUNNEL_LABEL_W - 16.0;
    let center = FUNNEL_LABEL_W + bar_area / 2.0;
    let first = stages[0].value;
    let fill = color(0, accent);

    let mut out = open(FUNNEL_WIDTH, height);
    for (i, stage) in stages.iter().enumerate() {
        let y = 8.0 + i as f64 * (FUNNEL_ROW_H + FUNNEL_GAP);
        let w = (bar_area * stage.value.max(0.0) / max).max(2.0);
        out.push_str(&format!(
            "<rect class=\"tb-stage\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>",
            center - w / 2.0,
            y,
            w,
            FUNNEL_ROW_H,
            fill
        ));
        out.push_str(&text(
            FUNNEL_LABEL_W - 10.0,
            y + FUNNEL_ROW_H / 2.0 + 4.0,
            "end",
            &truncate(&stage.label, 22),
        ));
        let share = if first > 0.0 {
            format!(" ({:.1}%)", stage.value / first * 100.0)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"#FFFFFF\" font-weight=\"600\">{}{}</text>",
            center,
            y + FUNNEL_ROW_H / 2.0 + 4.0,
            format::grouped(stage.value),
            share
        ));
    }
    out.push_str("</svg>");
    out
}

// ============================================================================
// GAUGE
// ============================================================================

fn gauge(value: f64, min: f64, max: f64, accent: Option<&str>) -> String {
    let (cx, cy) = (GAUGE_WIDTH / 2.0, GAUGE_HEIGHT - 36.0);
    let fraction = ((value - min) / (max - min)).clamp(0.0, 1.0);

    let mut out = open(GAUGE_WIDTH, GAUGE_HEIGHT);
    out.push_str(&format!(
        "<path d=\"M{:.1} {:.1} A{r:.1} {r:.1} 0 0 1 {:.1} {:.1}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        cx - GAUGE_RADIUS,
        cy,
        cx + GAUGE_RADIUS,
        cy,
        TRACK_COLOR,
        GAUGE_STROKE,
        r = GAUGE_RADIUS
    ));
    if fraction > 0.0 {
        // Sweep from the left end over the top.
        let theta = PI * (1.0 - fraction);
        let (ex, ey) = (cx + GAUGE_RADIUS * theta.cos(), cy - GAUGE_RADIUS * theta.sin());
        out.push_str(&format!(
            "<path class=\"tb-gauge-value\" d=\"M{:.1} {:.1} A{r:.1} {r:.1} 0 0 1 {:.2} {:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            cx - GAUGE_RADIUS,
            cy,
            ex,
            ey,
            color(0, accent),
            GAUGE_STROKE,
            r = GAUGE_RADIUS
        ));
    }
    out.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"36\" font-weight=\"600\">{}</text>",
        cx,
        cy - 12.0,
        format::grouped(value)
    ));
    out.push_str(&text(cx - GAUGE_RADIUS, cy + 24.0, "middle", &format::tick(min)));
    out.push_str(&text(cx + GAUGE_RADIUS, cy + 24.0, "middle", &format::tick(max)));
    out.push_str("</svg>");
    out
}

// ============================================================================
// RADAR
// ============================================================================

fn radar(categories: &[String], polygons: &[Polygon], accent: Option<&str>) -> String {
    let n = categories.len();
    if n == 0 || polygons.is_empty() {
        return no_data(RADAR_SIZE, RADAR_SIZE);
    }

    let c = RADAR_SIZE / 2.0;
    let max = polygons
        .iter()
        .flat_map(|p| p.r.iter().copied())
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    let ticks: Vec<f64> = if max > 0.0 {
        nice_ticks(0.0, max, 4).into_iter().filter(|t| *t > 0.0).collect()
    } else {
        vec![1.0]
    };
    let scale = ticks.last().copied().unwrap_or(1.0);
    let angle = |i: usize| -PI / 2.0 + 2.0 * PI * i as f64 / n as f64;
    let point = |i: usize, r: f64| polar(c, c, RADAR_RADIUS * (r.max(0.0) / scale), angle(i));

    let mut out = open(RADAR_SIZE, RADAR_SIZE);

    // Grid rings
    for &t in &ticks {
        let ring: Vec<String> = (0..n)
            .map(|i| {
                let (x, y) = point(i, t);
                format!("{:.1},{:.1}", x, y)
            })
            .collect();
        out.push_str(&format!(
            "<polygon points=\"{}\" fill=\"none\" stroke=\"{}\"/>",
            ring.join(" "),
            GRID_COLOR
        ));
        let (_, y) = point(0, t);
        out.push_str(&text(c + 4.0, y - 2.0, "start", &format::tick(t)));
    }

    // Spokes and axis labels
    for (i, category) in categories.iter().enumerate() {
        let (x, y) = polar(c, c, RADAR_RADIUS, angle(i));
        out.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\"/>",
            c, c, x, y, GRID_COLOR
        ));
        let (lx, ly) = polar(c, c, RADAR_RADIUS + 18.0, angle(i));
        let cos = angle(i).cos();
        let anchor = if cos > 0.2 {
            "start"
        } else if cos < -0.2 {
            "end"
        } else {
            "middle"
        };
        out.push_str(&text(lx, ly + 4.0, anchor, &truncate(category, MAX_LABEL_CHARS)));
    }

    for (pi, polygon) in polygons.iter().enumerate() {
        let stroke = color(pi, accent);
        // The closing vertex is implied by <polygon>.
        let points: Vec<String> = polygon
            .r
            .iter()
            .take(n)
            .enumerate()
            .map(|(i, &r)| {
                let (x, y) = point(i, r);
                format!("{:.1},{:.1}", x, y)
            })
            .collect();
        out.push_str(&format!(
            "<polygon class=\"tb-radar\" points=\"{}\" fill=\"{}\" fill-opacity=\"0.25\" stroke=\"{}\" stroke-width=\"2\"/>",
            points.join(" "),
            stroke,
            stroke
        ));
        if pi < LEGEND_ROWS {
            out.push_str(&legend_entry(
                8.0,
                16.0 + 18.0 * pi as f64,
                stroke,
                &truncate(&polygon.name, MAX_LABEL_CHARS),
            ));
        }
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, values: &[Option<f64>]) -> Series {
        Series {
            name: name.into(),
            values: values.to_vec(),
        }
    }

    fn labels(n: usize) -> Vec<Value> {
        (0..n).map(|i| Value::Text(format!("L{}", i))).collect()
    }

    #[test]
    fn test_nice_ticks_negative_range() {
        let ticks = nice_ticks(-16.0, -11.0, 4);
        assert!(ticks.len() >= 2);
        assert!(*ticks.first().unwrap() <= -16.0);
        assert!(*ticks.last().unwrap() >= -11.0);
        for t in &ticks {
            assert!((t - t.round()).abs() < 1e-9, "Tick {} not round", t);
        }
    }

    #[test]
    fn test_nice_ticks_positive_range() {
        let ticks = nice_ticks(0.0, 100.0, 4);
        assert!(*ticks.first().unwrap() <= 0.0);
        assert!(*ticks.last().unwrap() >= 100.0);
    }

    #[test]
    fn test_nice_ticks_equal_values() {
        assert_eq!(nice_ticks(5.0, 5.0, 4), vec![5.0]);
    }

    #[test]
    fn test_segments_split_on_gaps() {
        let runs = segments(&[Some(1.0), None, Some(2.0), Some(3.0), None]);
        assert_eq!(runs, vec![vec![(0, 1.0)], vec![(2, 2.0), (3, 3.0)]]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 14), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd\u{2026}");
    }

    #[test]
    fn test_bar_draws_one_rect_per_value() {
        let svg = cartesian(
            Mark::Bar,
            &labels(3),
            &[series("a", &[Some(1.0), Some(2.0), None]), series("b", &[Some(3.0), Some(-1.0), Some(2.0)])],
            None,
        );
        assert_eq!(svg.matches("class=\"tb-bar\"").count(), 5);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_line_and_area_marks() {
        let s = [series("a", &[Some(1.0), Some(2.0), Some(4.0)])];
        let line = cartesian(Mark::Line, &labels(3), &s, Some("#123456"));
        assert_eq!(line.matches("tb-line").count(), 1);
        assert!(line.contains("stroke=\"#123456\""));
        assert!(!line.contains("tb-area"));

        let area = cartesian(Mark::Area, &labels(3), &s, None);
        assert_eq!(area.matches("tb-area").count(), 1);
    }

    #[test]
    fn test_tiny_range_has_no_nan() {
        let s = [series("a", &[Some(0.0), Some(5e-11)])];
        for mark in [Mark::Bar, Mark::Line, Mark::Area] {
            let svg = cartesian(mark, &labels(2), &s, None);
            assert!(!svg.contains("NaN"), "{:?}", mark);
            assert!(!svg.contains("inf"), "{:?}", mark);
        }

        let flat = cartesian(Mark::Line, &labels(3), &[series("a", &[Some(2.0); 3])], None);
        assert!(!flat.contains("NaN"));
    }

    #[test]
    fn test_timestamps_are_placed_by_time() {
        let day = |d: u32| {
            Value::Timestamp(
                chrono::NaiveDate::from_ymd_opt(2024, 1, d)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            )
        };
        let x = [day(1), day(2), day(31)];
        let band = 100.0;
        let xs = x_positions(&x, band, 600.0);
        assert_eq!(xs[0], XY_LEFT + 50.0);
        assert_eq!(xs[2], XY_LEFT + 550.0);
        // One day out of thirty.
        assert!((xs[1] - (XY_LEFT + 50.0 + 500.0 / 30.0)).abs() < 1e-9);

        // Mixed axes stay evenly spaced.
        let mixed = [day(1), Value::Null, day(31)];
        assert_eq!(
            x_positions(&mixed, band, 600.0),
            vec![XY_LEFT + 50.0, XY_LEFT + 150.0, XY_LEFT + 250.0]
        );
    }

    #[test]
    fn test_empty_cartesian() {
        assert!(cartesian(Mark::Bar, &[], &[], None).contains("No data"));
    }

    #[test]
    fn test_donut_has_hole() {
        let slices = vec![
            Slice { label: "a".into(), value: 1.0 },
            Slice { label: "b".into(), value: 3.0 },
        ];
        let svg = donut(0.5, &slices, None);
        assert_eq!(svg.matches("class=\"tb-slice\"").count(), 2);
        // Inner arcs use half the outer radius.
        assert!(svg.contains("A75.00 75.00"));
        assert!(svg.contains("a (25.0%)"));
    }

    #[test]
    fn test_donut_single_slice_is_a_ring() {
        let slices = vec![Slice { label: "all".into(), value: 5.0 }];
        let svg = donut(0.5, &slices, None);
        assert!(svg.contains("<circle class=\"tb-slice\""));
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_funnel_rows() {
        let stages = vec![
            Slice { label: "Visit".into(), value: 1000.0 },
            Slice { label: "Paid".into(), value: 250.0 },
        ];
        let svg = funnel(&stages, None);
        assert_eq!(svg.matches("tb-stage").count(), 2);
        assert!(svg.contains("1,000 (100.0%)"));
        assert!(svg.contains("250 (25.0%)"));
    }

    #[test]
    fn test_gauge_value_and_bounds() {
        let svg = gauge(42.0, 0.0, 100.0, None);
        assert!(svg.contains(">42</text>"));
        assert!(svg.contains(">100</text>"));
        assert!(svg.contains("tb-gauge-value"));

        let empty = gauge(-5.0, 0.0, 100.0, None);
        assert!(!empty.contains("tb-gauge-value"));
    }

    #[test]
    fn test_radar_one_polygon_per_row() {
        let categories = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let polygons = vec![
            Polygon {
                name: "x".into(),
                theta: vec!["a".into(), "b".into(), "c".into(), "a".into()],
                r: vec![1.0, 2.0, 3.0, 1.0],
            },
            Polygon {
                name: "y".into(),
                theta: vec!["a".into(), "b".into(), "c".into(), "a".into()],
                r: vec![3.0, 2.0, 1.0, 3.0],
            },
        ];
        let svg = radar(&categories, &polygons, None);
        assert_eq!(svg.matches("class=\"tb-radar\"").count(), 2);
    }
}
