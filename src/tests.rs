#![allow(clippy::unwrap_used, clippy::panic)]
extern crate std;

use chrono::Datelike;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use proptest::prelude::*;
use proptest::proptest;

use crate::horizon::{ecliptic_to_horizon, horizon_coordinates};
use crate::kepler::{solve_kepler, KeplerSolver};
use crate::math::{wrap, wrap_degrees};
use crate::riseset::{solar_noon_utc, sunrise_utc, sunset_utc};
use crate::time::{
    day_of_week, day_of_year, greenwich_sidereal_time, is_leap_year, julian_centuries_since_j2000, julian_day,
    julian_day_from_julian_centuries, local_sidereal_time, Instant,
};

fn any_naive_datetime() -> impl Strategy<Value = NaiveDateTime> {
    (1900i32..=2100i32, 1u32..=12u32, 1u32..=31u32, 0u32..24u32, 0u32..60u32, 0u32..60u32).prop_filter_map(
        "Create valid datetime",
        |(year, month, day, hour, min, sec)| {
            NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(hour, min, sec))
        },
    )
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..11_000).prop_map(|offset| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Days::new(offset as u64))
}

proptest! {
    #[test]
    fn wrap_is_idempotent_and_in_range(
        value in -1.0e6_f64..1.0e6_f64,
        modulus in prop_oneof![Just(360.0_f64), Just(24.0_f64), Just(7.0_f64)],
    ) {
        let once = wrap(value, modulus);
        prop_assert!((0.0..modulus).contains(&once), "wrap({}, {}) = {}", value, modulus, once);
        prop_assert_eq!(wrap(once, modulus), once);
    }

    #[test]
    fn centuries_round_trip(t in -50.0_f64..50.0_f64) {
        let back = julian_centuries_since_j2000(julian_day_from_julian_centuries(t));
        prop_assert!((back - t).abs() < 1e-9, "{} came back as {}", t, back);
    }

    #[test]
    fn sidereal_time_is_in_range(
        days in -100_000.0_f64..100_000.0_f64,
        longitude in -180.0_f64..=180.0_f64,
    ) {
        let gst = greenwich_sidereal_time(days);
        let lst = local_sidereal_time(days, longitude);
        prop_assert!((0.0..24.0).contains(&gst), "gst {}", gst);
        prop_assert!((0.0..24.0).contains(&lst), "lst {}", lst);
    }

    #[test]
    fn julian_day_agrees_with_chrono_calendar(dt in any_naive_datetime()) {
        let instant = Instant::from(dt);
        let jd = julian_day(&instant);

        prop_assert_eq!(jd.fract(), 0.5);
        prop_assert_eq!(day_of_week(jd), dt.weekday());
        prop_assert_eq!(day_of_year(dt.month(), dt.day(), is_leap_year(dt.year())), dt.ordinal());

        let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let days = (dt.date() - epoch).num_days() as f64;
        prop_assert_eq!(jd - 2_451_544.5, days);

        let fraction = instant.julian_date() - jd;
        prop_assert!((0.0..1.0).contains(&fraction));
    }

    #[test]
    fn circular_orbit_eccentric_anomaly_is_mean_anomaly(m in -720.0_f64..720.0_f64) {
        prop_assert_eq!(solve_kepler(m, 0.0).unwrap(), wrap_degrees(m));
    }

    #[test]
    fn eccentric_anomaly_satisfies_keplers_equation(
        m in 0.0_f64..360.0_f64,
        e in 0.0_f64..0.8_f64,
    ) {
        let big_e = KeplerSolver::default().with_tolerance(1e-9).solve(m, e).unwrap();
        prop_assert!((0.0..360.0).contains(&big_e));
        let residual = big_e - (e * big_e.to_radians().sin()).to_degrees() - m;
        prop_assert!((wrap_degrees(residual + 180.0) - 180.0).abs() < 1e-6, "residual {}", residual);
    }

    #[test]
    fn sunrise_and_sunset_straddle_solar_noon(
        date in any_date(),
        latitude in -60.0_f64..=60.0_f64,
        longitude in -180.0_f64..=180.0_f64,
    ) {
        let instant = Instant::midnight(date.year(), date.month(), date.day()).unwrap();
        let jd = julian_day(&instant);

        let rise = sunrise_utc(jd, latitude, longitude).unwrap();
        let set = sunset_utc(jd, latitude, longitude).unwrap();
        let noon = solar_noon_utc(julian_centuries_since_j2000(jd), longitude);

        prop_assert!(rise < noon && noon < set, "rise {} noon {} set {}", rise, noon, set);
        prop_assert!(((rise + set) / 2.0 - noon).abs() < 2.0);
    }

    #[test]
    fn horizon_direction_is_a_unit_vector(
        x in -10.0_f64..10.0_f64,
        y in -10.0_f64..10.0_f64,
        z in -10.0_f64..10.0_f64,
        lst in 0.0_f64..24.0_f64,
        obliquity in 22.0_f64..25.0_f64,
        latitude in -90.0_f64..=90.0_f64,
    ) {
        prop_assume!(x.abs() + y.abs() + z.abs() > 1e-3);
        let ecliptic = [x, y, z];

        let v: [f64; 3] = ecliptic_to_horizon(&ecliptic, lst, obliquity, latitude);
        let norm = v[0] * v[0] + v[1] * v[1] + v[2] * v[2];
        prop_assert!((norm - 1.0).abs() < 1e-12, "norm {}", norm);

        let h = horizon_coordinates(&ecliptic, lst, obliquity, latitude);
        prop_assert!((0.0..360.0).contains(&h.azimuth));
        prop_assert!((-90.0..=90.0).contains(&h.altitude));
    }
}
