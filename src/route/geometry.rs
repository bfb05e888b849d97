use geo::{Bearing, Coord, Destination, Distance, Haversine, LineString, Point};
use itertools::Itertools;

/// Joins consecutive shapes which share their boundary coordinate.
pub fn join_shapes<'a>(shapes: impl IntoIterator<Item = &'a LineString<f64>>) -> LineString<f64> {
    let mut joined: Vec<Coord<f64>> = vec![];

    for shape in shapes {
        let mut coordinates = shape.0.iter().copied();
        if let (Some(last), Some(first)) = (joined.last(), shape.0.first()) {
            if last == first {
                coordinates.next();
            }
        }
        joined.extend(coordinates);
    }

    LineString::new(joined)
}

/// The coordinate `distance` metres along the polyline from its start.
///
/// Distances beyond the end of the line resolve to its last coordinate.
pub fn coordinate_along(coordinates: &[Coord<f64>], distance: f64) -> Option<Coord<f64>> {
    let first = *coordinates.first()?;
    if distance <= 0.0 {
        return Some(first);
    }

    let mut remaining = distance;
    for (a, b) in coordinates.iter().tuple_windows() {
        let (a, b) = (Point::from(*a), Point::from(*b));
        let length = Haversine.distance(a, b);

        if remaining <= length {
            let bearing = Haversine.bearing(a, b);
            return Some(Haversine.destination(a, bearing, remaining).into());
        }

        remaining -= length;
    }

    coordinates.last().copied()
}

/// The part of `coordinates` within `before` metres ahead of, and `after`
/// metres past, the coordinate at `index`.
pub fn slice_around(coordinates: &[Coord<f64>], index: usize, before: f64, after: f64) -> Vec<Coord<f64>> {
    if index >= coordinates.len() {
        return vec![];
    }

    let backwards = coordinates[..=index].iter().rev().copied().collect::<Vec<_>>();
    let forwards = &coordinates[index..];

    let mut sliced = walk(&backwards, before);
    sliced.reverse();
    sliced.extend(walk(forwards, after).into_iter().skip(1));

    sliced
}

/// Coordinates from the start of the line up to `distance` metres along it,
/// ending on the interpolated coordinate.
fn walk(coordinates: &[Coord<f64>], distance: f64) -> Vec<Coord<f64>> {
    let Some(first) = coordinates.first() else {
        return vec![];
    };

    let mut walked = vec![*first];
    let mut remaining = distance;

    for (a, b) in coordinates.iter().tuple_windows() {
        let length = Haversine.distance(Point::from(*a), Point::from(*b));

        if remaining <= length {
            if remaining > 0.0 {
                let bearing = Haversine.bearing(Point::from(*a), Point::from(*b));
                walked.push(Haversine.destination(Point::from(*a), bearing, remaining).into());
            }
            return walked;
        }

        remaining -= length;
        walked.push(*b);
    }

    walked
}
