extern crate groundtrack;

use groundtrack::cosmic::convert_batch;
use groundtrack::propagators::BatchPropagator;
use groundtrack::time_grid::{CalendarDate, TimeGrid};
use groundtrack::tle::SatelliteSet;

#[test]
fn iss_ground_track_bounds() {
    let set = SatelliteSet::from_lines(&crate::ISS_TLE).unwrap();
    let grid = TimeGrid::for_day(CalendarDate::new(2023, 6, 1).unwrap());
    let batch = BatchPropagator::default().propagate(&set, &grid);

    let coords = convert_batch(batch.positions());
    assert_eq!(coords.len(), batch.len());

    for c in &coords {
        assert!(c.is_finite());
        assert!(c.longitude_deg >= -180.0 && c.longitude_deg <= 180.0);
        // Latitude is bounded by the inclination
        assert!(c.latitude_deg.abs() < 52.0, "{c}");
        assert!(c.altitude_km > 380.0 && c.altitude_km < 460.0, "{c}");
    }

    let max_lat = coords
        .iter()
        .map(|c| c.latitude_deg)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(max_lat > 50.0, "max latitude {max_lat}");
}
