use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::{Bounds, Distance, Line, Pt2D, EPSILON_DIST, EPSILON_OFFSET};

/// A closed loop of points. The last point connects back to the first; it isn't repeated.
#[derive(PartialEq, Serialize, Deserialize, Clone, Debug)]
pub struct Polygon {
    points: Vec<Pt2D>,
}

impl Polygon {
    pub fn new(points: Vec<Pt2D>) -> Result<Polygon> {
        if points.len() < 3 {
            bail!("A polygon needs at least 3 points, not {}", points.len());
        }
        Ok(Polygon { points })
    }

    /// Use only when the caller guarantees at least 3 points.
    pub fn must_new(points: Vec<Pt2D>) -> Polygon {
        assert!(points.len() >= 3, "Polygon with {} points", points.len());
        Polygon { points }
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.points
    }

    pub fn into_points(self) -> Vec<Pt2D> {
        self.points
    }

    /// `segments[i]` goes from `points[i]` to `points[i + 1]`, wrapping around at the end, so
    /// there are exactly as many segments as points.
    pub fn segments(&self) -> Vec<Line> {
        let n = self.points.len();
        (0..n)
            .map(|i| Line::new(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    pub fn get_bounds(&self) -> Bounds {
        Bounds::from(&self.points)
    }

    pub fn center(&self) -> Pt2D {
        let n = self.points.len() as f64;
        let (x, y) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(x, y), pt| (x + pt.x(), y + pt.y()));
        Pt2D::new(x / n, y / n)
    }

    /// Does the polygon contain the point? Points on the boundary count as inside.
    ///
    /// Uses the even-odd rule with a horizontal ray heading right from `pt`. An edge only counts
    /// when its endpoints are on opposite sides of the ray, with an endpoint exactly on the ray
    /// treated as below it. A ray grazing a vertex then crosses both edges there or neither.
    pub fn contains_pt(&self, pt: Pt2D) -> bool {
        let segments = self.segments();
        if segments.iter().any(|l| l.dist_to_pt(pt) <= EPSILON_DIST) {
            return true;
        }

        let hits = segments
            .iter()
            .filter(|l| {
                let (a, b) = (l.pt1(), l.pt2());
                if (a.y() > pt.y()) == (b.y() > pt.y()) {
                    return false;
                }
                let x = a.x() + (pt.y() - a.y()) / (b.y() - a.y()) * (b.x() - a.x());
                x > pt.x()
            })
            .count();
        hits % 2 == 1
    }

    /// Is the segment inside, judging by its midpoint?
    pub fn contains_line(&self, line: &Line) -> bool {
        self.contains_pt(line.midpoint())
    }

    /// The distance from the boundary to the point.
    pub fn dist_to_pt(&self, pt: Pt2D) -> Distance {
        self.segments()
            .into_iter()
            .map(|l| l.dist_to_pt(pt))
            .min_by(Distance::total_cmp)
            .unwrap_or(Distance::ZERO)
    }

    /// The smallest distance from any of this polygon's points to the other's boundary.
    pub fn dist_to_polygon(&self, other: &Polygon) -> Distance {
        self.points
            .iter()
            .map(|pt| other.dist_to_pt(*pt))
            .min_by(Distance::total_cmp)
            .unwrap_or(Distance::ZERO)
    }

    /// Do the boundaries of the two polygons touch or cross anywhere?
    pub fn intersects_polygon(&self, other: &Polygon) -> bool {
        let theirs = other.segments();
        self.segments()
            .iter()
            .any(|l1| theirs.iter().any(|l2| l1.intersects(l2)))
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Polygon {
        Polygon {
            points: self.points.iter().map(|pt| pt.offset(dx, dy)).collect(),
        }
    }

    /// Merges overlapping polygons, returning the segments forming the outer boundary of the
    /// result. The segments aren't reassembled into loops.
    ///
    /// First every boundary segment gets cut wherever it crosses the boundary of a different
    /// polygon. Then a cut piece survives only if its midpoint isn't inside any of the other
    /// polygons. This is only sound for roughly convex shapes like envelopes.
    pub fn union(polygons: &[Polygon]) -> Vec<Line> {
        let mut result = Vec::new();
        for (idx, boundary) in split_at_crossings(polygons).into_iter().enumerate() {
            for line in boundary {
                let covered = polygons
                    .iter()
                    .enumerate()
                    .any(|(other_idx, other)| other_idx != idx && other.contains_line(&line));
                if !covered {
                    result.push(line);
                }
            }
        }
        result
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Polygon::must_new(vec![")?;
        for pt in &self.points {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}

/// For every pair of polygons, finds where their boundary segments cross. Returns each polygon's
/// boundary with segments cut at those points, in the original order.
///
/// Crossings are always found between the original, uncut segments, and the cut points for each
/// segment are collected separately and applied at the end. Cutting a segment doesn't move it,
/// so the pieces cross exactly the same things the whole segment did.
fn split_at_crossings(polygons: &[Polygon]) -> Vec<Vec<Line>> {
    let originals: Vec<Vec<Line>> = polygons.iter().map(|p| p.segments()).collect();
    // Per polygon, per segment: (offset along the segment, cut point)
    let mut cuts: Vec<Vec<Vec<(f64, Pt2D)>>> = originals
        .iter()
        .map(|segments| vec![Vec::new(); segments.len()])
        .collect();

    for i in 0..originals.len() {
        for j in (i + 1)..originals.len() {
            for (idx1, l1) in originals[i].iter().enumerate() {
                for (idx2, l2) in originals[j].iter().enumerate() {
                    if let Some(crossing) = l1.crossing(l2) {
                        // Meeting at an existing vertex doesn't need a cut
                        if !strictly_inside(crossing.offset)
                            || !strictly_inside(crossing.other_offset)
                        {
                            continue;
                        }
                        cuts[i][idx1].push((crossing.offset, crossing.pt));
                        cuts[j][idx2].push((crossing.other_offset, crossing.pt));
                    }
                }
            }
        }
    }

    originals
        .into_iter()
        .zip(cuts)
        .map(|(segments, cuts)| {
            segments
                .into_iter()
                .zip(cuts)
                .flat_map(|(line, cuts)| cut_line(line, cuts))
                .collect()
        })
        .collect()
}

fn strictly_inside(offset: f64) -> bool {
    offset > EPSILON_OFFSET && offset < 1.0 - EPSILON_OFFSET
}

fn cut_line(line: Line, mut cuts: Vec<(f64, Pt2D)>) -> Vec<Line> {
    if cuts.is_empty() {
        return vec![line];
    }
    cuts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut pieces = Vec::new();
    let mut last = line.pt1();
    for (_, pt) in cuts {
        // Several polygons may cross at the same spot
        if pt != last {
            pieces.push(Line::new(last, pt));
            last = pt;
        }
    }
    if last != line.pt2() {
        pieces.push(Line::new(last, line.pt2()));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::must_new(vec![
            Pt2D::new(x, y),
            Pt2D::new(x + size, y),
            Pt2D::new(x + size, y + size),
            Pt2D::new(x, y + size),
        ])
    }

    fn total_length(lines: &[Line]) -> f64 {
        lines.iter().map(|l| l.length().inner_meters()).sum()
    }

    #[test]
    fn too_few_points() {
        assert!(Polygon::new(vec![Pt2D::new(0.0, 0.0), Pt2D::new(1.0, 0.0)]).is_err());
    }

    #[test]
    fn segments_form_a_loop() {
        let p = square(0.0, 0.0, 10.0);
        let segments = p.segments();
        assert_eq!(segments.len(), p.points().len());
        for pair in segments.windows(2) {
            assert_eq!(pair[0].pt2(), pair[1].pt1());
        }
        assert_eq!(segments[3].pt2(), segments[0].pt1());
    }

    #[test]
    fn containment() {
        let p = square(0.0, 0.0, 10.0);
        assert!(p.contains_pt(Pt2D::new(5.0, 5.0)));
        assert!(p.contains_pt(Pt2D::new(0.5, 9.5)));
        assert!(!p.contains_pt(Pt2D::new(15.0, 5.0)));
        assert!(!p.contains_pt(Pt2D::new(-1.0, -1.0)));
        assert!(!p.contains_pt(Pt2D::new(5.0, -0.5)));
        // The boundary counts
        assert!(p.contains_pt(Pt2D::new(10.0, 5.0)));
        assert!(p.contains_pt(Pt2D::new(0.0, 0.0)));

        // Works far from the origin too
        let far = square(-5000.0, -7000.0, 10.0);
        assert!(far.contains_pt(Pt2D::new(-4995.0, -6995.0)));
        assert!(!far.contains_pt(Pt2D::new(5.0, 5.0)));
    }

    #[test]
    fn containment_past_a_vertex() {
        let diamond = Polygon::must_new(vec![
            Pt2D::new(10.0, 0.0),
            Pt2D::new(20.0, 10.0),
            Pt2D::new(10.0, 20.0),
            Pt2D::new(0.0, 10.0),
        ]);
        // Level with a vertex, on either side of the diamond
        assert!(!diamond.contains_pt(Pt2D::new(-5.0, 0.0)));
        assert!(!diamond.contains_pt(Pt2D::new(-5.0, 20.0)));
        assert!(!diamond.contains_pt(Pt2D::new(30.2, 20.0)));
        assert!(!diamond.contains_pt(Pt2D::new(-5.0, 10.0)));
        assert!(!diamond.contains_pt(Pt2D::new(25.0, 10.0)));
        assert!(diamond.contains_pt(Pt2D::new(5.0, 10.0)));
        assert!(diamond.contains_pt(Pt2D::new(10.0, 1.0)));
        assert!(diamond.contains_pt(Pt2D::new(10.0, 19.0)));

        // A concave notch whose tip lines up with points inside and outside
        let notched = Polygon::must_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(20.0, 0.0),
            Pt2D::new(20.0, 20.0),
            Pt2D::new(10.0, 10.0),
            Pt2D::new(0.0, 20.0),
        ]);
        assert!(notched.contains_pt(Pt2D::new(5.0, 10.0)));
        assert!(notched.contains_pt(Pt2D::new(15.0, 10.0)));
        assert!(!notched.contains_pt(Pt2D::new(10.0, 15.0)));
        assert!(!notched.contains_pt(Pt2D::new(-5.0, 10.0)));
        assert!(!notched.contains_pt(Pt2D::new(25.0, 10.0)));
    }

    #[test]
    fn distances() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(20.0, 0.0, 10.0);
        assert_eq!(a.dist_to_pt(Pt2D::new(5.0, 13.0)), Distance::meters(3.0));
        assert_eq!(a.dist_to_polygon(&b), Distance::meters(10.0));
        assert!(!a.intersects_polygon(&b));
        assert!(a.intersects_polygon(&square(5.0, 5.0, 10.0)));
    }

    #[test]
    fn union_of_one() {
        let p = square(0.0, 0.0, 10.0);
        assert_eq!(Polygon::union(&[p.clone()]), p.segments());
    }

    #[test]
    fn union_of_disjoint() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(20.0, 0.0, 10.0);
        let result = Polygon::union(&[a.clone(), b.clone()]);
        let mut expected = a.segments();
        expected.extend(b.segments());
        assert_eq!(result, expected);
        for l in &result[0..4] {
            assert!(!b.contains_pt(l.midpoint()));
        }
        for l in &result[4..] {
            assert!(!a.contains_pt(l.midpoint()));
        }
    }

    #[test]
    fn union_of_identical() {
        let p = square(0.0, 0.0, 10.0);
        assert!(Polygon::union(&[p.clone(), p]).is_empty());
    }

    #[test]
    fn union_of_overlapping() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let result = Polygon::union(&[a.clone(), b.clone()]);

        // Each square loses the 10 units of its boundary that're inside the other
        assert_eq!(result.len(), 8);
        assert!((total_length(&result) - 60.0).abs() < 1e-9);
        assert!(result.contains(&Line::new(Pt2D::new(10.0, 0.0), Pt2D::new(10.0, 5.0))));
        assert!(result.contains(&Line::new(Pt2D::new(10.0, 5.0), Pt2D::new(15.0, 5.0))));
        assert!(!result.contains(&Line::new(Pt2D::new(10.0, 5.0), Pt2D::new(10.0, 10.0))));
        for l in &result {
            let mid = l.midpoint();
            // Every surviving piece is on the outer boundary: on one square, outside the other
            assert!(
                (a.dist_to_pt(mid) <= EPSILON_DIST && !b.contains_pt(mid))
                    || (b.dist_to_pt(mid) <= EPSILON_DIST && !a.contains_pt(mid))
            );
        }
    }

    #[test]
    fn union_splits_one_segment_many_times() {
        // A long thin bar crossed by three small squares
        let bar = Polygon::must_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(100.0, 0.0),
            Pt2D::new(100.0, 10.0),
            Pt2D::new(0.0, 10.0),
        ]);
        let mut polygons = vec![bar];
        for x in [10.0, 40.0, 70.0] {
            polygons.push(square(x, -5.0, 10.0));
        }
        let result = Polygon::union(&polygons);

        // The bar's bottom edge gets cut into 7 pieces, 3 of which are covered
        let bottom: Vec<&Line> = result
            .iter()
            .filter(|l| l.pt1().y() == 0.0 && l.pt2().y() == 0.0)
            .collect();
        assert_eq!(bottom.len(), 4);
        // Perimeter of the bar, plus what each square adds: 2 vertical stubs of 5 and a bottom
        // of 10, minus the 10 of bar edge it covers.
        assert!((total_length(&result) - (220.0 + 3.0 * 10.0)).abs() < 1e-9);
    }
}
