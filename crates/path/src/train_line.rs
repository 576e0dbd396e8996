use crate::geom::{
    polar, unit_vector, Address, CoordinateTransform, Distance, Line, Street, ViewPoint, ViewSpace,
};
use crate::{ArcFlags, DrawCommand, DrawError, LineDrawing, LineStyle, Primitive};

use log::{debug, trace};

/// A cursor drawing one transit line.
///
/// The cursor tracks the current location as a street address and the current heading in
/// view space (degrees, 0 pointing right, positive clockwise). The heading is unknown until
/// the first straight segment is drawn: turns and station intersections are rejected before
/// that.
///
/// Every operation either succeeds or leaves the cursor exactly as it was.
#[derive(Clone, Debug)]
pub struct TrainLine {
    transform: CoordinateTransform,
    style: LineStyle,
    loc: Address,
    angle: Option<f64>,
    drawing: LineDrawing,
}

impl TrainLine {
    /// Creates a cursor at `start`, without a heading.
    pub fn new(transform: CoordinateTransform, start: Address, style: LineStyle) -> Self {
        TrainLine {
            transform,
            style,
            loc: start,
            angle: None,
            drawing: LineDrawing::default(),
        }
    }

    #[inline]
    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    #[inline]
    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// The address the line currently ends at.
    #[inline]
    pub fn location(&self) -> Address {
        self.loc
    }

    /// The current direction of travel in degrees, if any segment was drawn.
    ///
    /// The value is not wrapped: four quarter turns to the right add up to 360.
    #[inline]
    pub fn heading(&self) -> Option<f64> {
        self.angle
    }

    #[inline]
    pub fn is_headed(&self) -> bool {
        self.angle.is_some()
    }

    pub fn segments(&self) -> &[DrawCommand] {
        &self.drawing.segments
    }

    pub fn stations(&self) -> &[DrawCommand] {
        &self.drawing.stations
    }

    /// Consumes the cursor and returns everything it drew.
    pub fn finish(self) -> LineDrawing {
        self.drawing
    }

    /// Adds a straight segment from the current location to `to`.
    pub fn draw_to_address(&mut self, to: Address) -> Result<(), DrawError> {
        self.line_to("draw_to_address", to)
    }

    /// Adds a straight segment to a location `blocks` away from the current one.
    pub fn draw_relative(&mut self, blocks: Distance) -> Result<(), DrawError> {
        self.line_to("draw_relative", self.loc + blocks)
    }

    /// Turns by `degrees` using the style's default radius.
    ///
    /// See [`TrainLine::draw_turn_with_radius`].
    pub fn draw_turn(&mut self, degrees: f64) -> Result<(), DrawError> {
        self.draw_turn_with_radius(degrees, self.style.default_turn_radius)
    }

    /// Adds a circular arc continuing tangentially from the current heading.
    ///
    /// Positive `degrees` turn clockwise (to the right of the direction of travel), negative
    /// `degrees` counter-clockwise. The radius is in blocks. A single turn must be smaller
    /// than 180 degrees, larger turns are drawn as several calls.
    pub fn draw_turn_with_radius(&mut self, degrees: f64, radius: f64) -> Result<(), DrawError> {
        const OP: &str = "draw_turn";

        let angle = self.angle.ok_or(DrawError::InvalidState { operation: OP })?;
        if !degrees.is_finite() || degrees == 0.0 {
            return Err(DrawError::invalid_argument(
                OP,
                format!("the turn angle must be finite and non-zero, got {degrees}"),
            ));
        }
        if degrees.abs() >= 180.0 {
            return Err(DrawError::invalid_argument(
                OP,
                format!("a single turn must be smaller than 180 degrees, got {degrees}"),
            ));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(DrawError::invalid_argument(
                OP,
                format!("the radius must be positive, got {radius}"),
            ));
        }
        check_style(OP, "stroke thickness", self.style.stroke_thickness)?;

        let view_radius = self.transform.scale_value(radius);
        let begin = self.transform.address_to_view(self.loc);

        // The center of the arc is a quarter turn away from the heading, on the side
        // the line is turning to.
        let (center_angle, sweep) = if degrees > 0.0 {
            (angle + 90.0, true)
        } else {
            (angle - 90.0, false)
        };
        let center = polar(begin, view_radius, center_angle);
        let end = polar(center, view_radius, center_angle + 180.0 + degrees);
        nan_check(end);

        self.push_segment(Primitive::Arc {
            from: begin,
            to: end,
            radius: view_radius,
            x_rotation: 0.0,
            flags: ArcFlags {
                large_arc: false,
                sweep,
            },
        });

        // Accumulate the requested amount rather than measuring it back from the endpoint.
        self.angle = Some(angle + degrees);
        self.loc = self.transform.view_to_address(end);
        trace!("turned {degrees} to heading {:?} at {:?}", self.angle, self.loc);

        Ok(())
    }

    /// Adds a station marker at `at`. The location and heading are left unchanged.
    pub fn draw_station_abs(&mut self, at: Address) -> Result<(), DrawError> {
        if !(at.x.is_finite() && at.y.is_finite()) {
            return Err(DrawError::invalid_argument(
                "draw_station",
                format!("station address {at:?} is not finite"),
            ));
        }
        check_style("draw_station", "station radius", self.style.station_radius)?;
        check_style("draw_station", "station thickness", self.style.station_thickness)?;

        let center = self.transform.address_to_view(at);
        let primitive = Primitive::Station {
            center,
            radius: self.style.station_radius,
        };
        debug!(
            "station at {:?}: circle {:.6},{:.6} r={}",
            at, center.x, center.y, self.style.station_radius
        );
        self.drawing.stations.push(DrawCommand {
            primitive,
            stroke: self.style.station_stroke(),
        });

        Ok(())
    }

    /// Adds a station marker `offset` blocks away from the current location.
    pub fn draw_station(&mut self, offset: Distance) -> Result<(), DrawError> {
        self.draw_station_abs(self.loc + offset)
    }

    /// Adds a station where the current track, extended along the heading, crosses `street`.
    ///
    /// Returns the address of the station. Its fixed coordinate is exactly the street's.
    pub fn draw_station_intersection(&mut self, street: Street) -> Result<Address, DrawError> {
        const OP: &str = "draw_station_intersection";

        let reference = street.reference_line().ok_or_else(|| {
            DrawError::invalid_argument(
                OP,
                format!(
                    "a street needs exactly one finite coordinate, got east {:?} and north {:?}",
                    street.east, street.north
                ),
            )
        })?;
        let angle = self.angle.ok_or(DrawError::InvalidState { operation: OP })?;

        // Headings live in view space, flip them into address space.
        let direction = self
            .transform
            .view_to_distance(unit_vector::<ViewSpace>(angle));
        let track = Line {
            point: self.loc,
            vector: direction,
        };

        let at = reference.intersect(&track).ok_or_else(|| {
            DrawError::degenerate(
                OP,
                format!("heading {angle} runs parallel to {reference:?}"),
            )
        })?;
        self.draw_station_abs(at)?;

        Ok(at)
    }

    fn line_to(&mut self, operation: &'static str, to: Address) -> Result<(), DrawError> {
        if !(to.x.is_finite() && to.y.is_finite()) {
            return Err(DrawError::invalid_argument(
                operation,
                format!("target address {to:?} is not finite"),
            ));
        }
        check_style(operation, "stroke thickness", self.style.stroke_thickness)?;

        let begin = self.transform.address_to_view(self.loc);
        let end = self.transform.address_to_view(to);
        let delta = end - begin;
        if delta.x == 0.0 && delta.y == 0.0 {
            return Err(DrawError::invalid_argument(
                operation,
                format!("the segment from {:?} to {to:?} has no length", self.loc),
            ));
        }

        self.push_segment(Primitive::Line { from: begin, to: end });
        self.angle = Some(delta.y.atan2(delta.x).to_degrees());
        self.loc = to;
        trace!("heading {:?} at {:?}", self.angle, self.loc);

        Ok(())
    }

    fn push_segment(&mut self, primitive: Primitive) {
        match primitive {
            Primitive::Line { from, to } => {
                debug!("M {:.6},{:.6} L {:.6},{:.6}", from.x, from.y, to.x, to.y);
            }
            Primitive::Arc {
                from,
                to,
                radius,
                x_rotation,
                flags,
            } => {
                debug!(
                    "M {:.6},{:.6} A {:.6},{:.6} {:.6} {},{} {:.6},{:.6}",
                    from.x,
                    from.y,
                    radius,
                    radius,
                    x_rotation,
                    flags.large_arc as u8,
                    flags.sweep as u8,
                    to.x,
                    to.y
                );
            }
            Primitive::Station { .. } => {}
        }

        self.drawing.segments.push(DrawCommand {
            primitive,
            stroke: self.style.line_stroke(),
        });
    }
}

fn check_style(operation: &'static str, name: &str, value: f64) -> Result<(), DrawError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }

    Err(DrawError::invalid_argument(
        operation,
        format!("the {name} of the line style must be positive, got {value}"),
    ))
}

#[inline]
fn nan_check(p: ViewPoint) {
    debug_assert!(p.x.is_finite());
    debug_assert!(p.y.is_finite());
}

#[cfg(test)]
use crate::geom::{address, distance, MapBounds};

#[cfg(test)]
fn chicago() -> CoordinateTransform {
    CoordinateTransform::new(&MapBounds::CHICAGO).unwrap()
}

#[cfg(test)]
fn fuzzy_eq(a: f64, b: f64, epsilon: f64) -> bool {
    f64::abs(a - b) <= epsilon
}

#[cfg(test)]
fn fuzzy_eq_address(a: Address, b: Address, epsilon: f64) -> bool {
    fuzzy_eq(a.x, b.x, epsilon) && fuzzy_eq(a.y, b.y, epsilon)
}

#[test]
fn turn_requires_heading() {
    let mut line = TrainLine::new(chicago(), address(0.0, 0.0), LineStyle::default());

    let err = line.draw_turn(45.0).unwrap_err();
    assert_eq!(
        err,
        DrawError::InvalidState {
            operation: "draw_turn"
        }
    );
    assert_eq!(line.location(), address(0.0, 0.0));
    assert_eq!(line.heading(), None);
    assert!(line.segments().is_empty());

    assert!(line
        .draw_station_intersection(Street::east(100.0))
        .unwrap_err()
        .is_invalid_state());
    assert!(line.stations().is_empty());
}

#[test]
fn intersection_requires_one_coordinate() {
    let mut line = TrainLine::new(chicago(), address(0.0, 0.0), LineStyle::default());
    line.draw_relative(distance(100.0, 50.0)).unwrap();
    let heading = line.heading();

    for street in &[Street::new(None, None), Street::new(Some(5.0), Some(10.0))] {
        let err = line.draw_station_intersection(*street).unwrap_err();
        assert!(err.is_invalid_argument(), "{err:?}");
    }

    assert_eq!(line.heading(), heading);
    assert_eq!(line.location(), address(100.0, 50.0));
    assert!(line.stations().is_empty());
}

#[test]
fn straight_segment_headings() {
    let start = address(-1000.0, 1000.0);
    let cases = [
        (distance(500.0, 0.0), 0.0),
        (distance(0.0, -500.0), 90.0),
        (distance(-500.0, 0.0), 180.0),
        // North is up, which is a counter-clockwise quarter turn from the x axis.
        (distance(0.0, 500.0), -90.0),
        (distance(300.0, -300.0), 45.0),
    ];

    for &(blocks, expected) in &cases {
        let mut line = TrainLine::new(chicago(), start, LineStyle::default());
        assert!(!line.is_headed());
        line.draw_relative(blocks).unwrap();
        assert!(line.is_headed());
        assert!(fuzzy_eq(line.heading().unwrap(), expected, 1e-9));
        assert_eq!(line.location(), start + blocks);
    }
}

#[test]
fn relative_and_absolute_segments_agree() {
    let transform = chicago();
    let mut a = TrainLine::new(transform, address(-200.0, 200.0), LineStyle::default());
    let mut b = TrainLine::new(transform, address(-200.0, 200.0), LineStyle::default());

    a.draw_relative(distance(2500.0, -300.0)).unwrap();
    b.draw_to_address(address(2300.0, -100.0)).unwrap();

    assert_eq!(a.location(), b.location());
    assert_eq!(a.heading(), b.heading());
    assert_eq!(a.segments(), b.segments());

    match a.segments()[0].primitive {
        Primitive::Line { from, to } => {
            assert_eq!(from, transform.address_to_view(address(-200.0, 200.0)));
            assert_eq!(to, transform.address_to_view(address(2300.0, -100.0)));
        }
        ref other => panic!("unexpected primitive {other:?}"),
    }
}

#[test]
fn rejected_segments() {
    let mut line = TrainLine::new(chicago(), address(10.0, 10.0), LineStyle::default());

    assert!(line
        .draw_to_address(address(10.0, 10.0))
        .unwrap_err()
        .is_invalid_argument());
    assert!(line
        .draw_relative(distance(f64::NAN, 0.0))
        .unwrap_err()
        .is_invalid_argument());
    assert!(line
        .draw_to_address(address(f64::INFINITY, 0.0))
        .unwrap_err()
        .is_invalid_argument());

    assert!(!line.is_headed());
    assert_eq!(line.location(), address(10.0, 10.0));
    assert!(line.segments().is_empty());
}

#[test]
fn green_line_turn() {
    let transform = chicago();
    let mut line = TrainLine::new(transform, address(-7200.0, 400.0), LineStyle::default());
    line.draw_to_address(address(-4800.0, 400.0)).unwrap();
    let initial_heading = line.heading().unwrap();
    assert_eq!(initial_heading, 0.0);

    line.draw_turn_with_radius(90.0, 200.0).unwrap();

    assert_eq!(line.heading(), Some(initial_heading + 90.0));

    // Heading east, the center is 200 blocks south of the start of the turn and the
    // end is 200 blocks east of the center.
    let begin = transform.address_to_view(address(-4800.0, 400.0));
    let r = transform.scale_value(200.0);
    let center = polar(begin, r, 90.0);
    let end = polar(center, r, 90.0 + 180.0 + 90.0);
    let expected = transform.view_to_address(end);

    assert!(fuzzy_eq_address(line.location(), expected, 1e-9));
    assert!(fuzzy_eq_address(line.location(), address(-4600.0, 200.0), 1e-6));

    assert_eq!(line.segments().len(), 2);
    match line.segments()[1].primitive {
        Primitive::Arc {
            from,
            to,
            radius,
            x_rotation,
            flags,
        } => {
            assert_eq!(from, begin);
            assert_eq!(to, end);
            assert!(fuzzy_eq(radius, r, 1e-12));
            assert_eq!(x_rotation, 0.0);
            assert_eq!(
                flags,
                ArcFlags {
                    large_arc: false,
                    sweep: true
                }
            );
        }
        ref other => panic!("unexpected primitive {other:?}"),
    }
}

#[test]
fn opposite_turns_restore_heading() {
    let radius = 200.0;
    let start = address(-200.0, 400.0);
    let mut line = TrainLine::new(chicago(), start, LineStyle::default());
    line.draw_relative(distance(2700.0, 0.0)).unwrap();
    let heading = line.heading().unwrap();
    let before = line.location();

    line.draw_turn_with_radius(90.0, radius).unwrap();
    line.draw_turn_with_radius(-90.0, radius).unwrap();

    assert_eq!(line.heading().unwrap(), heading);
    // Right then left: an S bend shifting the line two radii south and two radii east.
    let displacement = line.location() - before;
    assert!(fuzzy_eq(displacement.x, 2.0 * radius, 1e-6));
    assert!(fuzzy_eq(displacement.y, -2.0 * radius, 1e-6));
}

#[test]
fn sweep_flags() {
    let mut degrees = -179.0;
    while degrees < 180.0 {
        if degrees != 0.0 {
            let mut line = TrainLine::new(chicago(), address(0.0, 0.0), LineStyle::default());
            line.draw_relative(distance(0.0, 1000.0)).unwrap();
            line.draw_turn(degrees).unwrap();

            match line.segments()[1].primitive {
                Primitive::Arc { flags, .. } => {
                    assert_eq!(flags.sweep, degrees > 0.0, "{degrees}");
                    assert!(!flags.large_arc);
                }
                ref other => panic!("unexpected primitive {other:?}"),
            }
        }
        degrees += 7.0;
    }
}

#[test]
fn full_circle_of_quarter_turns() {
    let mut line = TrainLine::new(chicago(), address(0.0, 0.0), LineStyle::default());
    line.draw_relative(distance(1000.0, 0.0)).unwrap();
    let start = line.location();

    for _ in 0..4 {
        line.draw_turn(90.0).unwrap();
    }
    // Headings are not wrapped.
    assert_eq!(line.heading(), Some(360.0));
    assert!(fuzzy_eq_address(line.location(), start, 1e-6));

    for _ in 0..8 {
        line.draw_turn(-90.0).unwrap();
    }
    assert_eq!(line.heading(), Some(-360.0));
    assert!(fuzzy_eq_address(line.location(), start, 1e-6));
}

#[test]
fn rejected_turns() {
    let mut line = TrainLine::new(chicago(), address(0.0, 0.0), LineStyle::default());
    line.draw_relative(distance(1000.0, 0.0)).unwrap();

    let rejected = [
        (180.0, 200.0),
        (-180.0, 200.0),
        (270.0, 200.0),
        (0.0, 200.0),
        (f64::NAN, 200.0),
        (45.0, 0.0),
        (45.0, -10.0),
        (45.0, f64::INFINITY),
    ];
    for &(degrees, radius) in &rejected {
        let err = line.draw_turn_with_radius(degrees, radius).unwrap_err();
        assert!(err.is_invalid_argument(), "{degrees} {radius}: {err:?}");
    }

    assert_eq!(line.heading(), Some(0.0));
    assert_eq!(line.location(), address(1000.0, 0.0));
    assert_eq!(line.segments().len(), 1);

    line.draw_turn(179.0).unwrap();
    assert_eq!(line.heading(), Some(179.0));
}

#[test]
fn station_intersection_lies_on_street() {
    let transform = chicago();
    let headings = [
        distance(1000.0, 0.0),
        distance(1000.0, 300.0),
        distance(-700.0, 1200.0),
        distance(-1.0, -2.0),
        distance(500.0, -499.0),
    ];

    for &blocks in &headings {
        let mut line = TrainLine::new(transform, address(-200.0, 200.0), LineStyle::default());
        line.draw_relative(blocks).unwrap();
        let loc = line.location();
        let heading = line.heading();

        let at = line.draw_station_intersection(Street::east(-1600.0)).unwrap();
        assert_eq!(at.x, -1600.0);
        // On the track: the offset is parallel to the direction of travel.
        let offset = at - loc;
        assert!(fuzzy_eq(offset.cross(blocks) / blocks.length(), 0.0, 1e-6));

        if blocks.y != 0.0 {
            let at = line.draw_station_intersection(Street::north(-1200.0)).unwrap();
            assert_eq!(at.y, -1200.0);
            let offset = at - loc;
            assert!(fuzzy_eq(offset.cross(blocks) / blocks.length(), 0.0, 1e-6));
        }

        // Stations never move the cursor.
        assert_eq!(line.location(), loc);
        assert_eq!(line.heading(), heading);
    }
}

#[test]
fn station_intersection_after_turn() {
    let transform = chicago();
    let mut line = TrainLine::new(transform, address(-200.0, 200.0), LineStyle::default());
    line.draw_relative(distance(-2000.0, 0.0)).unwrap();
    line.draw_turn(-90.0).unwrap();
    // Heading south along 2400 W.
    let at = line.draw_station_intersection(Street::north(-1200.0)).unwrap();
    assert_eq!(at.y, -1200.0);
    assert!(fuzzy_eq(at.x, -2400.0, 1e-6));

    match line.stations()[0].primitive {
        Primitive::Station { center, radius } => {
            assert_eq!(center, transform.address_to_view(at));
            assert_eq!(radius, LineStyle::DEFAULT.station_radius);
        }
        ref other => panic!("unexpected primitive {other:?}"),
    }
}

#[test]
fn station_intersection_parallel_street() {
    let mut line = TrainLine::new(chicago(), address(0.0, 0.0), LineStyle::default());
    line.draw_relative(distance(0.0, 1200.0)).unwrap();

    let err = line
        .draw_station_intersection(Street::east(-800.0))
        .unwrap_err();
    assert!(err.is_degenerate_geometry(), "{err:?}");
    assert!(line.stations().is_empty());

    line.draw_relative(distance(800.0, 0.0)).unwrap();
    let err = line
        .draw_station_intersection(Street::north(400.0))
        .unwrap_err();
    assert!(err.is_degenerate_geometry(), "{err:?}");
    assert!(line.stations().is_empty());
}

#[test]
fn stations_use_station_stroke() {
    let style = LineStyle::with_color(crate::style::palette::PINK);
    let mut line = TrainLine::new(chicago(), address(-200.0, 200.0), style);

    // Stations don't need a heading.
    line.draw_station(distance(0.0, 0.0)).unwrap();
    line.draw_station_abs(address(-400.0, 200.0)).unwrap();
    assert!(line
        .draw_station_abs(address(f64::NAN, 0.0))
        .unwrap_err()
        .is_invalid_argument());
    line.draw_relative(distance(-2000.0, 0.0)).unwrap();

    assert_eq!(line.location(), address(-2200.0, 200.0));
    assert_eq!(line.stations().len(), 2);
    for cmd in line.stations() {
        assert_eq!(cmd.stroke, style.station_stroke());
    }
    for cmd in line.segments() {
        assert_eq!(cmd.stroke, style.line_stroke());
    }

    let drawing = line.finish();
    assert_eq!(drawing.iter().count(), 3);
    assert!(drawing.iter().next().unwrap().primitive.is_segment());
}

#[test]
fn pink_line() {
    let mut line = TrainLine::new(chicago(), address(-200.0, 200.0), LineStyle::default());
    line.draw_relative(distance(-2000.0, 0.0)).unwrap();
    line.draw_turn(-90.0).unwrap();
    line.draw_relative(distance(0.0, -2400.0)).unwrap();
    line.draw_turn(90.0).unwrap();
    line.draw_relative(distance(-3700.0, 0.0)).unwrap();

    assert!(fuzzy_eq_address(line.location(), address(-6300.0, -2600.0), 1e-6));
    assert!(fuzzy_eq(line.heading().unwrap(), 180.0, 1e-9));
    assert_eq!(line.segments().len(), 5);
}

#[test]
fn invalid_styles() {
    let transform = chicago();
    let start = address(-200.0, 200.0);

    let style = LineStyle {
        station_radius: -8.0,
        ..LineStyle::DEFAULT
    };
    let mut line = TrainLine::new(transform, start, style);
    assert_eq!(line.style().station_radius, -8.0);
    assert_eq!(line.transform().scale(), transform.scale());
    line.draw_relative(distance(-2000.0, 0.0)).unwrap();
    assert!(line
        .draw_station_abs(start)
        .unwrap_err()
        .is_invalid_argument());
    assert!(line
        .draw_station_intersection(Street::east(-1600.0))
        .unwrap_err()
        .is_invalid_argument());
    assert!(line.stations().is_empty());

    let style = LineStyle {
        station_thickness: f64::NAN,
        ..LineStyle::DEFAULT
    };
    let mut line = TrainLine::new(transform, start, style);
    assert!(line
        .draw_station(distance(0.0, 0.0))
        .unwrap_err()
        .is_invalid_argument());

    let style = LineStyle {
        stroke_thickness: 0.0,
        ..LineStyle::DEFAULT
    };
    let mut line = TrainLine::new(transform, start, style);
    assert!(line
        .draw_relative(distance(100.0, 0.0))
        .unwrap_err()
        .is_invalid_argument());
    assert!(!line.is_headed());
    assert_eq!(line.location(), start);
    assert!(line.segments().is_empty());
}

#[test]
fn lines_are_independent() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TrainLine>();

    let transform = chicago();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let mut line =
                    TrainLine::new(transform, address(i as f64 * 100.0, 0.0), LineStyle::default());
                line.draw_relative(distance(0.0, -1000.0)).unwrap();
                line.draw_turn(90.0).unwrap();
                line.location()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let loc = handle.join().unwrap();
        assert!(fuzzy_eq_address(
            loc,
            address(i as f64 * 100.0 - 200.0, -1200.0),
            1e-6
        ));
    }
}
