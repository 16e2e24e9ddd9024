extern crate groundtrack;

use groundtrack::io::{read_lines, ConfigRepr};
use groundtrack::pipeline::{run, run_from_file, run_from_lines, GroundTrackConfig};
use groundtrack::region::LatLon;
use groundtrack::time_grid::{CalendarDate, MINUTES_PER_DAY};
use groundtrack::tle::SatelliteSet;
use groundtrack::GroundTrackError;
use rstest::*;

fn config(region: Vec<LatLon>, worker_count: usize) -> GroundTrackConfig {
    GroundTrackConfig::builder()
        .date(CalendarDate::new(2023, 6, 1).unwrap())
        .region(region)
        .worker_count(worker_count)
        .build()
}

#[fixture]
fn whole_globe() -> Vec<LatLon> {
    vec![
        LatLon::new(-90.0, -180.0),
        LatLon::new(-90.0, 180.0),
        LatLon::new(90.0, 180.0),
        LatLon::new(90.0, -180.0),
    ]
}

#[fixture]
fn south_pole_box() -> Vec<LatLon> {
    vec![
        LatLon::new(-89.0, -180.0),
        LatLon::new(-89.0, 180.0),
        LatLon::new(-85.0, 180.0),
        LatLon::new(-85.0, -180.0),
    ]
}

#[fixture]
fn northern_cap() -> Vec<LatLon> {
    vec![
        LatLon::new(75.0, -180.0),
        LatLon::new(75.0, 180.0),
        LatLon::new(89.0, 180.0),
        LatLon::new(89.0, -180.0),
    ]
}

#[rstest]
fn whole_globe_keeps_the_day(whole_globe: Vec<LatLon>) {
    let _ = pretty_env_logger::try_init();

    let report = run_from_lines(&config(whole_globe, 4), &crate::ISS_TLE).unwrap();
    assert_eq!(report.num_satellites, 1);
    assert!(report.diagnostics.is_clean());
    // Only samples exactly on the antimeridian could be dropped
    assert!(report.samples.len() <= MINUTES_PER_DAY);
    assert!(report.samples.len() > MINUTES_PER_DAY - 10);

    for pair in report.samples.windows(2) {
        assert!(pair[0].index < pair[1].index);
    }
    for sample in &report.samples {
        assert!(sample.longitude_deg() > -180.0 && sample.longitude_deg() < 180.0);
        assert!(sample.latitude_deg() > -90.0 && sample.latitude_deg() < 90.0);
        assert!(sample.altitude_km() > 380.0 && sample.altitude_km() < 460.0);
    }

    let out = format!("{report}");
    assert!(out.starts_with("Completed in"));
    assert!(out.contains("ISS (ZARYA)"));
}

#[rstest]
fn south_pole_box_is_empty(south_pole_box: Vec<LatLon>) {
    let report = run_from_lines(&config(south_pole_box, 2), &crate::ISS_TLE).unwrap();
    assert!(report.is_empty());
    assert!(format!("{report}").ends_with("No data found"));
}

#[rstest]
fn only_the_polar_satellite_reaches_the_cap(northern_cap: Vec<LatLon>) {
    let path = crate::test_data_path("tests/two_sats.tle");
    let report = run_from_file(&config(northern_cap, 3), path).unwrap();
    assert_eq!(report.num_satellites, 2);
    assert!(!report.is_empty());
    for sample in &report.samples {
        assert_eq!(report.satellite_of(sample), 1);
        assert!(sample.index >= MINUTES_PER_DAY);
        assert!(sample.latitude_deg() > 75.0);
    }
}

#[rstest]
fn independent_of_worker_count(whole_globe: Vec<LatLon>) {
    let lines = read_lines(crate::test_data_path("tests/two_sats.tle")).unwrap();
    let satellites = SatelliteSet::from_lines(&lines).unwrap();

    let reference = run(&config(whole_globe.clone(), 1), &satellites).unwrap();
    assert_eq!(reference.num_satellites, 2);

    for workers in [1, 2, 5, 16] {
        let report = run(&config(whole_globe.clone(), workers), &satellites).unwrap();
        assert_eq!(report.samples, reference.samples, "{workers} workers");
    }
}

#[test]
fn yaml_config() {
    let cfg = GroundTrackConfig::load(crate::test_data_path("groundtrack.yaml")).unwrap();
    assert_eq!(cfg.date, CalendarDate::new(2023, 6, 1).unwrap());
    assert_eq!(cfg.region.len(), 4);
    assert_eq!(cfg.worker_count, 4);

    let report = run_from_file(&cfg, crate::test_data_path("tests/iss.tle")).unwrap();
    assert!(!report.is_empty());
    assert!(report.elapsed > groundtrack::time::Duration::ZERO);
}

#[rstest]
fn fatal_errors(whole_globe: Vec<LatLon>) {
    assert!(matches!(
        run_from_file(&config(whole_globe.clone(), 2), "/no/such/file.tle"),
        Err(GroundTrackError::InputOutput { .. })
    ));

    let lines = [crate::ISS_TLE[0], crate::ISS_TLE[1], "2 garbage"];
    assert!(matches!(
        run_from_lines(&config(whole_globe, 2), &lines),
        Err(GroundTrackError::SatelliteSet { .. })
    ));

    assert!(matches!(
        run_from_lines(&config(vec![LatLon::new(0.0, 0.0)], 2), &crate::ISS_TLE),
        Err(GroundTrackError::Region { .. })
    ));
}

#[rstest]
fn propagation_errors_do_not_abort(whole_globe: Vec<LatLon>) {
    use groundtrack::propagators::PropagationErrorKind;

    let lines: Vec<&str> = crate::ISS_TLE
        .iter()
        .chain(crate::HIGH_DRAG_TLE.iter())
        .chain(crate::SUBSURFACE_PERIGEE_TLE.iter())
        .copied()
        .collect();

    let report = run_from_lines(&config(whole_globe, 3), &lines).unwrap();
    assert_eq!(report.num_satellites, 3);
    assert!(!report.diagnostics.is_clean());
    assert!(report.diagnostics.count(PropagationErrorKind::MeanEccentricity) > 0);
    assert!(report.diagnostics.count(PropagationErrorKind::Decayed) > 0);

    // Failed samples are dropped, everything else stays
    assert!(!report.is_empty());
    assert!(report.samples.len() <= 3 * MINUTES_PER_DAY - report.diagnostics.total());
    for sample in &report.samples {
        assert!(sample.coords.is_finite());
        assert!(sample.altitude_km().is_finite());
    }
    // The ISS never fails
    let iss_rows = report
        .samples
        .iter()
        .filter(|s| report.satellite_of(s) == 0)
        .count();
    assert!(iss_rows > MINUTES_PER_DAY - 10);
}
