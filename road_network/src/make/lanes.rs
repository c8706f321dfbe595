use geom::{lerp_2d, Envelope, Line};

use crate::{Divider, DividerStyle, Lane, RoadID, RoadSpec, DEFAULT_SPEED_LIMIT};

/// Cuts the road's flat envelope into lanes. Lanes are numbered from the left edge of the road;
/// the first `left_lanes` of them run backwards, from the end of the segment to the start.
pub fn make_lanes(road: RoadID, segment: Line, spec: &RoadSpec) -> (Vec<Lane>, Vec<Divider>) {
    let total = spec.total_lanes();
    if total == 0 {
        return (Vec::new(), Vec::new());
    }
    let envelope = Envelope::new(segment, spec.width(), 0).into_polygon();
    let pts = envelope.points();
    if pts.len() != 4 {
        return (Vec::new(), Vec::new());
    }
    // pts[1] -> pts[2] is the left side of the road, pts[0] -> pts[3] the right.
    let across = |t: f64| Line::new(lerp_2d(pts[1], pts[0], t), lerp_2d(pts[2], pts[3], t));

    let n = total as f64;
    let mut lanes = Vec::new();
    for i in 0..total {
        let t = (i as f64 + 1.0) / n - 1.0 / (2.0 * n);
        let forwards = across(t);
        let line = if i < spec.left_lanes {
            forwards.reversed()
        } else {
            forwards
        };
        let is_rightmost = if spec.oneway {
            i == total - 1
        } else {
            i == 0 || i == total - 1
        };
        lanes.push(Lane {
            road,
            index: i,
            line,
            width: spec.lane_width,
            is_leftmost: i == spec.left_lanes,
            is_rightmost,
            speed_limit: DEFAULT_SPEED_LIMIT,
            elevation: spec.elevation,
        });
    }

    let dividers = (1..total)
        .map(|k| Divider {
            line: across(k as f64 / n),
            style: if k == spec.left_lanes {
                DividerStyle::Solid
            } else {
                DividerStyle::Dashed
            },
        })
        .collect();

    (lanes, dividers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_LANE_WIDTH;
    use geom::Pt2D;

    fn approx(actual: Pt2D, x: f64, y: f64) -> bool {
        (actual.x() - x).abs() < 1e-9 && (actual.y() - y).abs() < 1e-9
    }

    fn segment() -> Line {
        Line::new(Pt2D::new(0.0, 0.0), Pt2D::new(400.0, 0.0))
    }

    #[test]
    fn two_way_road() {
        let (lanes, dividers) = make_lanes(RoadID(3), segment(), &RoadSpec::new(1, 1, false));
        assert_eq!(lanes.len(), 2);

        // The left lane runs backwards, above the centerline
        assert!(approx(lanes[0].line.pt1(), 400.0, -25.0));
        assert!(approx(lanes[0].line.pt2(), 0.0, -25.0));
        assert!(!lanes[0].is_leftmost);
        assert!(lanes[0].is_rightmost);

        assert!(approx(lanes[1].line.pt1(), 0.0, 25.0));
        assert!(approx(lanes[1].line.pt2(), 400.0, 25.0));
        assert!(lanes[1].is_leftmost);
        assert!(lanes[1].is_rightmost);

        for lane in &lanes {
            assert_eq!(lane.road, RoadID(3));
            assert_eq!(lane.width, DEFAULT_LANE_WIDTH);
            assert_eq!(lane.speed_limit, DEFAULT_SPEED_LIMIT);
        }

        // Edges land on the centerline and the outer border of the road
        let center = lanes[1].left_edge().unwrap();
        assert!(approx(center.pt1(), 0.0, 0.0));
        assert!(lanes[0].left_edge().is_none());
        let outer = lanes[1].right_edge();
        assert!(approx(outer.pt2(), 400.0, 50.0));
        let outer = lanes[0].right_edge();
        assert!(approx(outer.pt1(), 400.0, -50.0));

        assert_eq!(dividers.len(), 1);
        assert_eq!(dividers[0].style, DividerStyle::Solid);
        assert!(approx(dividers[0].line.pt1(), 0.0, 0.0));
        assert!(approx(dividers[0].line.pt2(), 400.0, 0.0));
    }

    #[test]
    fn wide_road() {
        let (lanes, dividers) = make_lanes(RoadID(0), segment(), &RoadSpec::new(2, 3, false));
        assert_eq!(lanes.len(), 5);
        let leftmost: Vec<usize> = lanes
            .iter()
            .filter(|l| l.is_leftmost)
            .map(|l| l.index)
            .collect();
        assert_eq!(leftmost, vec![2]);
        let rightmost: Vec<usize> = lanes
            .iter()
            .filter(|l| l.is_rightmost)
            .map(|l| l.index)
            .collect();
        assert_eq!(rightmost, vec![0, 4]);

        // Lane centers are evenly spaced across the 250-wide road
        let ys: Vec<f64> = lanes.iter().map(|l| l.line.midpoint().y()).collect();
        for (y, expected) in ys.iter().zip(vec![-100.0, -50.0, 0.0, 50.0, 100.0]) {
            assert!((y - expected).abs() < 1e-9);
        }
        // Backwards lanes
        assert!(lanes[0].line.pt1().x() > lanes[0].line.pt2().x());
        assert!(lanes[2].line.pt1().x() < lanes[2].line.pt2().x());

        let styles: Vec<DividerStyle> = dividers.iter().map(|d| d.style).collect();
        assert_eq!(
            styles,
            vec![
                DividerStyle::Dashed,
                DividerStyle::Solid,
                DividerStyle::Dashed,
                DividerStyle::Dashed
            ]
        );
    }

    #[test]
    fn oneway_road() {
        let (lanes, dividers) = make_lanes(RoadID(0), segment(), &RoadSpec::new(0, 3, true));
        assert_eq!(lanes.len(), 3);
        assert!(lanes[0].is_leftmost);
        assert!(!lanes[0].is_rightmost);
        assert!(lanes[2].is_rightmost);
        assert!(lanes.iter().all(|l| l.line.pt1().x() < l.line.pt2().x()));
        assert!(dividers.iter().all(|d| d.style == DividerStyle::Dashed));
    }

    #[test]
    fn no_lanes() {
        let (lanes, dividers) = make_lanes(RoadID(0), segment(), &RoadSpec::new(0, 0, false));
        assert!(lanes.is_empty());
        assert!(dividers.is_empty());
    }
}
