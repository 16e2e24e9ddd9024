extern crate groundtrack;

use approx::assert_abs_diff_eq;
use groundtrack::propagators::BatchPropagator;
use groundtrack::time::Unit;
use groundtrack::time_grid::{CalendarDate, TimeGrid, MINUTES_PER_DAY};
use groundtrack::tle::SatelliteSet;
use rstest::*;

#[fixture]
fn iss() -> SatelliteSet {
    SatelliteSet::from_lines(&crate::ISS_TLE).unwrap()
}

#[fixture]
fn grid() -> TimeGrid {
    TimeGrid::for_day(CalendarDate::new(2023, 6, 1).unwrap())
}

#[rstest]
fn day_grid(grid: TimeGrid) {
    assert_eq!(grid.len(), MINUTES_PER_DAY);
    let instants: Vec<f64> = grid.iter().map(|(jd, fr)| jd + fr).collect();
    assert!(instants.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(grid.epoch(MINUTES_PER_DAY - 1) - grid.epoch(0), 1439_i64 * Unit::Minute);
    assert_eq!(
        grid.epoch(0),
        CalendarDate::new(2023, 6, 1).unwrap().midnight()
    );
}

#[rstest]
fn iss_over_one_day(iss: SatelliteSet, grid: TimeGrid) {
    let _ = pretty_env_logger::try_init();

    let batch = BatchPropagator::default().propagate(&iss, &grid);
    assert_eq!(batch.num_satellites(), 1);
    assert_eq!(batch.num_instants(), MINUTES_PER_DAY);
    assert_eq!(batch.len(), MINUTES_PER_DAY);
    assert!(batch.diagnostics().is_clean());

    for (i, (pos, vel)) in batch
        .positions()
        .iter()
        .zip(batch.velocities())
        .enumerate()
    {
        assert_eq!(batch.error_code(i), 0);
        let r = pos.norm();
        assert!(r > 6_700.0 && r < 6_850.0, "|r| = {r} km at minute {i}");
        assert_abs_diff_eq!(vel.norm(), 7.66, epsilon = 0.1);
    }
}

#[rstest]
fn matches_single_evaluation_at_epoch(iss: SatelliteSet, grid: TimeGrid) {
    // The TLE epoch is 12:00 UTC, i.e. minute 720 of the day
    let batch = BatchPropagator::default().propagate(&iss, &grid);
    let constants = iss.records()[0].constants().unwrap();
    let prediction = constants
        .propagate(sgp4::MinutesSinceEpoch(0.0))
        .unwrap();

    let at_epoch = batch.positions()[batch.flat_index(0, 720)];
    for k in 0..3 {
        assert_abs_diff_eq!(at_epoch[k], prediction.position[k], epsilon = 1e-2);
    }
}

#[rstest]
fn satellite_major_layout(grid: TimeGrid) {
    let set = SatelliteSet::from_lines(&crate::ISS_TLE.repeat(3)).unwrap();
    let batch = BatchPropagator::default().propagate(&set, &grid);
    assert_eq!(batch.len(), 3 * MINUTES_PER_DAY);
    assert_eq!(batch.split_index(batch.flat_index(2, 17)), (2, 17));
    // Identical satellites yield identical tracks
    for i in 0..MINUTES_PER_DAY {
        assert_eq!(batch.positions()[i], batch.positions()[2 * MINUTES_PER_DAY + i]);
    }
}

#[rstest]
fn decay_radius_flags_samples(iss: SatelliteSet, grid: TimeGrid) {
    use groundtrack::propagators::PropagationErrorKind;

    let propagator = BatchPropagator {
        decay_radius_km: 10_000.0,
    };
    let batch = propagator.propagate(&iss, &grid);
    assert_eq!(
        batch.diagnostics().count(PropagationErrorKind::Decayed),
        MINUTES_PER_DAY
    );
    assert!(batch.positions().iter().all(|p| p.x.is_nan()));
    assert_eq!(batch.error_code(0), 6);
}

#[rstest]
fn sgp4_errors_are_reported_per_sample(grid: TimeGrid) {
    use groundtrack::propagators::{PropagationDiagnostics, PropagationErrorKind};

    let _ = pretty_env_logger::try_init();

    let lines: Vec<&str> = crate::HIGH_DRAG_TLE
        .iter()
        .chain(crate::SUBSURFACE_PERIGEE_TLE.iter())
        .copied()
        .collect();
    let set = SatelliteSet::from_lines(&lines).unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.records().iter().all(|r| r.constants().is_some()));

    let batch = BatchPropagator::default().propagate(&set, &grid);
    let diag = batch.diagnostics();
    assert!(!diag.is_clean());

    // Drag drives the mean eccentricity out of range after epoch
    assert!(diag.count(PropagationErrorKind::MeanEccentricity) > 0);
    assert_eq!(batch.error_code(batch.flat_index(0, 720)), 0);
    // At epoch the second satellite is at its perigee, below the surface
    assert!(diag.count(PropagationErrorKind::Decayed) > 0);
    assert_eq!(batch.error_code(batch.flat_index(1, 720)), 6);

    // Every failed sample is counted once, under its own kind, with non-finite vectors
    let mut tally = PropagationDiagnostics::default();
    for (i, error) in batch.errors().iter().enumerate() {
        match error {
            Some(kind) => {
                tally.record(*kind);
                assert_eq!(batch.error_code(i), kind.code());
                assert!(batch.positions()[i].iter().all(|c| c.is_nan()));
                assert!(batch.velocities()[i].iter().all(|c| c.is_nan()));
            }
            None => {
                assert_eq!(batch.error_code(i), 0);
                assert!(batch.positions()[i].iter().all(|c| c.is_finite()));
            }
        }
    }
    assert_eq!(&tally, diag);
    for kind in [
        PropagationErrorKind::MeanEccentricity,
        PropagationErrorKind::SemiLatusRectum,
        PropagationErrorKind::Decayed,
    ] {
        assert_eq!(tally.count(kind), diag.count(kind), "{kind}");
    }
}
