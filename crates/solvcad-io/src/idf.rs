//! IDF v3 board-outline import (`spec.md` §6.3): `.HEADER`, `.BOARD_OUTLINE`,
//! and `.DRILLED_HOLES` sections parsed into 2D curve loops plus a solid
//! extruded by the board thickness. Grounded line-for-line on
//! `examples/original_source/src/importidf.cpp`'s `LinkIDF`/`CreateEntity`/
//! `ArcCenter` and built on `solvcad-modeling::builder`'s face/sweep
//! primitives the same way `solvcad-sketch::group` turns a profile into a
//! solid.

use solvcad_modeling::{builder, Face, Point3, Solid, Vector3, Vertex, Wire};

use crate::IdfError;

/// One curve record between two successive outline points (`record_number`
/// 3+ of `.BOARD_OUTLINE`/`.ROUTE_KEEPOUT`). `angle` is the raw IDF angle:
/// 0 is a line, ±360 a closing circle, anything else an arc in degrees
/// (positive counter-clockwise).
#[derive(Clone, Copy, Debug)]
struct Segment {
    p0: (f64, f64),
    p1: (f64, f64),
    angle: f64,
}

/// One closed outline loop: the board perimeter, a cutout, or a keepout.
#[derive(Clone, Debug, Default)]
pub struct IdfLoop {
    segments: Vec<Segment>,
}

/// A drilled hole kept after the `diameter > 1.7mm` / `PIN`/`MTG`-designator
/// filter (`importidf.cpp`'s `isHoleDuplicate`/diameter check).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrilledHole {
    pub center: (f64, f64),
    pub diameter: f64,
}

/// A parsed IDF v3 board: the outline loop(s), any routing keepout loops,
/// drilled holes, thickness, and unit scale. Call [`IdfBoard::to_solid`] to
/// extrude it into a [`Solid`] the way a `Linked` group would.
#[derive(Clone, Debug, Default)]
pub struct IdfBoard {
    pub thickness: f64,
    pub scale: f64,
    pub outline: Vec<IdfLoop>,
    pub keepouts: Vec<IdfLoop>,
    pub holes: Vec<DrilledHole>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Header,
    BoardOutline,
    RouteKeepout,
    DrilledHoles,
    Other,
}

fn split_line(line: &str) -> Vec<String> {
    // `splitString`: space-separated, double-quoted fields kept intact.
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        if in_quotes {
            if c == '"' {
                out.push(std::mem::take(&mut cur));
                in_quotes = false;
            } else {
                cur.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c.is_whitespace() {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
        } else {
            cur.push(c);
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

fn is_hole_duplicate(holes: &[DrilledHole], x: f64, y: f64, radius: f64) -> bool {
    holes.iter().any(|h| h.center.0 == x && h.center.1 == y && h.diameter / 2.0 == radius)
}

/// Parses the `.HEADER`/`.BOARD_OUTLINE`/`.ROUTE_KEEPOUT`/`.DRILLED_HOLES`
/// sections of an IDF v3 board file. Every other section is skipped.
pub fn parse_board(text: &str) -> Result<IdfBoard, IdfError> {
    let mut board = IdfBoard { scale: 1.0, thickness: 10.0, ..IdfBoard::default() };
    let mut section = Section::None;
    let mut record_number = 0u32;
    let mut curve: Option<i64> = None;
    let mut outline_cur: Option<IdfLoop> = None;
    let mut keepout_cur: Option<IdfLoop> = None;
    let mut prev_point = (0.0, 0.0);
    let mut saw_outline = false;

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_end();
        if line.starts_with(".END_") {
            if let Some(l) = outline_cur.take() {
                board.outline.push(l);
            }
            if let Some(l) = keepout_cur.take() {
                board.keepouts.push(l);
            }
            section = Section::None;
            curve = None;
            record_number = 0;
            continue;
        }
        match section {
            Section::None => {
                if line.starts_with(".HEADER") {
                    section = Section::Header;
                    record_number = 1;
                } else if line.starts_with(".BOARD_OUTLINE") {
                    section = Section::BoardOutline;
                    record_number = 1;
                } else if line.starts_with(".ROUTE_KEEPOUT") {
                    section = Section::RouteKeepout;
                    record_number = 1;
                } else if line.starts_with(".DRILLED_HOLES") {
                    section = Section::DrilledHoles;
                    record_number = 1;
                } else if line.starts_with('.') {
                    section = Section::Other;
                }
            }
            Section::Header => {
                if record_number == 3 {
                    if line.contains("MM") {
                        board.scale = 1.0;
                    } else if line.contains("THOU") {
                        board.scale = 0.0254;
                    }
                }
            }
            Section::BoardOutline | Section::RouteKeepout => {
                if record_number == 2 {
                    if section == Section::BoardOutline {
                        board.thickness = line.trim().parse::<f64>().map_err(|_| IdfError::Malformed(line_no, line.to_string()))? * board.scale;
                        saw_outline = true;
                    }
                } else if record_number >= 3 {
                    let values = split_line(line);
                    if values.len() == 4 {
                        let malformed = || IdfError::Malformed(line_no, line.to_string());
                        let c: i64 = values[0].parse().map_err(|_| malformed())?;
                        let x: f64 = values[1].parse().map_err(|_| malformed())?;
                        let y: f64 = values[2].parse().map_err(|_| malformed())?;
                        let angle: f64 = values[3].parse().map_err(|_| malformed())?;
                        let point = (x * board.scale, y * board.scale);

                        let loop_slot = if section == Section::BoardOutline { &mut outline_cur } else { &mut keepout_cur };
                        if curve != Some(c) {
                            if let Some(l) = loop_slot.take() {
                                if section == Section::BoardOutline {
                                    board.outline.push(l);
                                } else {
                                    board.keepouts.push(l);
                                }
                            }
                            curve = Some(c);
                            *loop_slot = Some(IdfLoop::default());
                            prev_point = point;
                        } else {
                            let l = loop_slot.get_or_insert_with(IdfLoop::default);
                            l.segments.push(Segment { p0: prev_point, p1: point, angle });
                            prev_point = point;
                        }
                    }
                }
            }
            Section::DrilledHoles => {
                let values = split_line(line);
                if values.len() >= 6 {
                    let malformed = || IdfError::Malformed(line_no, line.to_string());
                    let d: f64 = values[0].parse().map_err(|_| malformed())?;
                    let x: f64 = values[1].parse().map_err(|_| malformed())?;
                    let y: f64 = values[2].parse().map_err(|_| malformed())?;
                    let designator = &values[5];
                    let duplicate = is_hole_duplicate(&board.holes, x * board.scale, y * board.scale, d * board.scale / 2.0);
                    if (d > 1.7 || designator.starts_with("PIN") || designator.starts_with("MTG")) && !duplicate {
                        board.holes.push(DrilledHole { center: (x * board.scale, y * board.scale), diameter: d * board.scale });
                    }
                }
            }
            Section::Other => {}
        }
        record_number += 1;
    }
    if let Some(l) = outline_cur.take() {
        board.outline.push(l);
    }
    if let Some(l) = keepout_cur.take() {
        board.keepouts.push(l);
    }
    if !saw_outline || board.outline.is_empty() {
        return Err(IdfError::EmptyOutline);
    }
    Ok(board)
}

/// `ArcCenter`: locates the center of an arc spanning `p0`→`p1` through
/// `angle` degrees. A 180° arc has no unique perpendicular offset direction,
/// so its center sits exactly on the chord midpoint.
fn arc_center(p0: (f64, f64), p1: (f64, f64), angle: f64) -> (f64, f64) {
    let m = ((p0.0 + p1.0) / 2.0, (p0.1 + p1.1) / 2.0);
    let perp_raw = (p1.1 - p0.1, p0.0 - p1.0);
    let perp_len = (perp_raw.0 * perp_raw.0 + perp_raw.1 * perp_raw.1).sqrt();
    let perp = (perp_raw.0 / perp_len, perp_raw.1 / perp_len);
    let dist = if (angle - 180.0).abs() > f64::EPSILON {
        let half = (p1.0 - m.0, p1.1 - m.1);
        let half_len = (half.0 * half.0 + half.1 * half.1).sqrt();
        half_len / (0.5 * angle * std::f64::consts::PI / 180.0).tan()
    } else {
        0.0
    };
    (m.0 - perp.0 * dist, m.1 - perp.1 * dist)
}

/// Builds a closed [`Wire`] at height `z` from a loop's line/arc/circle
/// segments, mirroring `CreateEntity`'s line/circle/arc dispatch on the raw
/// IDF angle.
fn wire_at_z(idf_loop: &IdfLoop, z: f64) -> Option<Wire> {
    if idf_loop.segments.is_empty() {
        return None;
    }
    let at = |p: (f64, f64)| Point3::new(p.0, p.1, z);
    let first_point = idf_loop.segments[0].p0;
    let mut vertices: Vec<Vertex> = Vec::with_capacity(idf_loop.segments.len());
    vertices.push(builder::vertex(at(first_point)));
    for seg in &idf_loop.segments {
        // IDF loops close by repeating the first point as the final vertex;
        // reuse the same `Vertex` so the wire is topologically closed.
        let closes_loop = (seg.p1.0 - first_point.0).abs() < 1e-9 && (seg.p1.1 - first_point.1).abs() < 1e-9;
        if closes_loop {
            vertices.push(vertices[0].clone());
        } else {
            vertices.push(builder::vertex(at(seg.p1)));
        }
    }

    let mut edges = Vec::with_capacity(idf_loop.segments.len());
    for (i, seg) in idf_loop.segments.iter().enumerate() {
        let v0 = &vertices[i];
        let v1 = &vertices[i + 1];
        if seg.angle.abs() < 0.1 {
            edges.push(builder::line(v0, v1));
        } else if seg.angle.abs() == 360.0 {
            // A closing circle is centered at `p0`, passing through `p1`;
            // sweep the single remaining boundary vertex through a full turn.
            return Some(builder::rsweep(v0, at(seg.p0), Vector3::new(0.0, 0.0, 1.0)));
        } else {
            let (mut a, mut b, mut angle) = (seg.p0, seg.p1, seg.angle);
            if angle < 0.0 {
                std::mem::swap(&mut a, &mut b);
                angle = angle.abs();
            }
            let center = arc_center(a, b, angle);
            let theta = 0.5 * angle * std::f64::consts::PI / 180.0;
            let r = ((a.0 - center.0).powi(2) + (a.1 - center.1).powi(2)).sqrt();
            let mid_angle = {
                let start = (a.1 - center.1).atan2(a.0 - center.0);
                start + theta
            };
            let transit = Point3::new(center.0 + r * mid_angle.cos(), center.1 + r * mid_angle.sin(), z);
            edges.push(builder::circle_arc(v0, v1, transit));
        }
    }
    Some(Wire::from(edges))
}

fn hole_wire(hole: &DrilledHole, z: f64) -> Wire {
    let center = Point3::new(hole.center.0, hole.center.1, z);
    let boundary = builder::vertex(Point3::new(hole.center.0 + hole.diameter / 2.0, hole.center.1, z));
    builder::rsweep(&boundary, center, Vector3::new(0.0, 0.0, 1.0))
}

impl IdfBoard {
    /// Extrudes the board outline (minus drilled-hole cutouts) from `z=0` to
    /// `z=thickness`, the way `LinkIDF` builds top/bottom entities at
    /// `board_thickness` and a `Linked` group sweeps them into one shell.
    pub fn to_solid(&self) -> Option<Solid> {
        let mut wires: Vec<Wire> = self.outline.iter().filter_map(|l| wire_at_z(l, 0.0)).collect();
        if wires.is_empty() {
            return None;
        }
        for hole in &self.holes {
            wires.push(hole_wire(hole, 0.0));
        }
        let face: Face = builder::try_attach_plane(&wires)?;
        Some(builder::tsweep(&face, Vector3::new(0.0, 0.0, self.thickness)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle_board() -> &'static str {
        ".HEADER\n\
         IDF ONLY BOARD 3.0 \"test\" 1.0\n\
         test 1.0 MM\n\
         .END_HEADER\n\
         .BOARD_OUTLINE MM\n\
         1.6\n\
         1 0 0 0\n\
         1 10 0 0\n\
         1 10 10 0\n\
         1 0 10 0\n\
         1 0 0 0\n\
         .END_BOARD_OUTLINE\n\
         .DRILLED_HOLES MM\n\
         2.0 5 5 PTH BOTTOM PIN\n\
         .END_DRILLED_HOLES\n"
    }

    #[test]
    fn parses_rectangle_outline_and_thickness() {
        let board = parse_board(rectangle_board()).unwrap();
        assert_eq!(board.thickness, 1.6);
        assert_eq!(board.outline.len(), 1);
        assert_eq!(board.outline[0].segments.len(), 4);
        assert_eq!(board.holes.len(), 1);
        assert_eq!(board.holes[0].center, (5.0, 5.0));
    }

    #[test]
    fn thou_units_are_scaled_to_mm() {
        let text = rectangle_board().replace("1.0 MM", "1.0 THOU");
        let board = parse_board(&text).unwrap();
        assert!((board.thickness - 1.6 * 0.0254).abs() < 1e-9);
    }

    #[test]
    fn small_hole_without_pin_designator_is_dropped() {
        let text = rectangle_board().replace("2.0 5 5 PTH BOTTOM PIN", "0.5 5 5 PTH BOTTOM VIA");
        let board = parse_board(&text).unwrap();
        assert!(board.holes.is_empty());
    }

    #[test]
    fn missing_outline_is_rejected() {
        let err = parse_board(".HEADER\ntest\n.END_HEADER\n");
        assert!(err.is_err());
    }

    #[test]
    fn to_solid_builds_an_extruded_rectangle() {
        let board = parse_board(rectangle_board()).unwrap();
        let solid = board.to_solid().unwrap();
        assert_eq!(solid.boundaries().len(), 1);
    }
}
