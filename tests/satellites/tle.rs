extern crate groundtrack;

use groundtrack::io::read_lines;
use groundtrack::tle::{SatelliteSet, TleError, LINES_PER_RECORD};
use rstest::*;

#[fixture]
fn two_sats() -> Vec<String> {
    use crate::test_data_path;
    read_lines(test_data_path("tests/two_sats.tle")).unwrap()
}

#[rstest]
fn load_in_input_order(two_sats: Vec<String>) {
    let set = SatelliteSet::from_lines(&two_sats).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.records()[0].name(), "ISS (ZARYA)");
    assert_eq!(set.records()[0].norad_id(), 25544);
    assert_eq!(set.records()[1].name(), "POLAR SAT");
    assert_eq!(set.records()[1].norad_id(), 33591);
    assert!(set.get(2).is_none());
}

#[rstest]
fn incomplete_records_are_skipped(two_sats: Vec<String>) {
    for len in 0..=two_sats.len() {
        let set = SatelliteSet::from_lines(&two_sats[..len]).unwrap();
        assert_eq!(set.len(), len / LINES_PER_RECORD, "{len} lines");
    }
}

#[test]
fn four_lines_make_one_satellite() {
    let mut lines = crate::ISS_TLE.to_vec();
    lines.push("NEXT SAT");
    let set = SatelliteSet::from_lines(&lines).unwrap();
    assert_eq!(set.len(), 1);
}

#[test]
fn malformed_elements() {
    let lines = [
        crate::ISS_TLE[0],
        crate::ISS_TLE[1],
        "2 25544  this is not a second line of elements at all, really, not at all",
    ];
    match SatelliteSet::from_lines(&lines) {
        Err(TleError::MalformedElements { index, name, .. }) => {
            assert_eq!(index, 0);
            assert_eq!(name, "ISS (ZARYA)");
        }
        other => panic!("expected malformed elements, got {other:?}"),
    }
}
