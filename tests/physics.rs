use std::f64::consts::PI;

use astro_dashboard::core::constants::G;
use astro_dashboard::orbits::OrbitError;
use astro_dashboard::orbits::gravity::{escape_velocity, surface_gravity};
use astro_dashboard::orbits::kepler::{PlanetSpec, binary_period, orbital_period, planetary_periods};
use astro_dashboard::orbits::relativity::schwarzschild_radius;
use astro_dashboard::orbits::tidal::roche_limit;
use astro_dashboard::stellar::color::blackbody_color;
use astro_dashboard::stellar::luminosity::stellar_output;
use astro_dashboard::stellar::parallax::{from_distance, from_parallax};

const SUN: f64 = 1.989e30;
const EARTH: f64 = 5.972e24;
const AU: f64 = 1.496e11;

#[test]
fn period_squared_scales_with_axis_cubed() {
    let base = orbital_period(SUN, EARTH, AU).expect("base");
    for factor in [0.5, 2.0, 5.2, 30.0] {
        let scaled = orbital_period(SUN, EARTH, AU * factor).expect("scaled");
        let ratio = scaled.t_squared_s2 / base.t_squared_s2;
        let expected = f64::powi(factor, 3);
        assert!(
            (ratio - expected).abs() <= expected * 1e-12,
            "factor {factor}: ratio {ratio}"
        );
    }
}

#[test]
fn period_squared_matches_closed_form_with_both_masses() {
    let cases = [
        (SUN, EARTH, AU),
        (1e30, 1e30, 1e11),
        (5.0e29, 2.0e30, 3.0e10),
        (EARTH, 7.348e22, 3.844e8),
        (1e3, 1e3, 1.0),
    ];
    for (big_m, m, a) in cases {
        let period = orbital_period(big_m, m, a).expect("period");
        let expected = 4.0 * PI * PI * a.powi(3) / (G * (big_m + m));
        assert!(
            (period.t_squared_s2 - expected).abs() <= expected * 1e-12,
            "M = {big_m}, m = {m}, a = {a}: T² = {} vs {expected}",
            period.t_squared_s2
        );
        assert!((period.seconds * period.seconds - expected).abs() <= expected * 1e-12);
    }

    // Equal masses halve T² relative to a test particle around the same M.
    let equal = orbital_period(1e30, 1e30, 1e11).expect("equal").t_squared_s2;
    let light = orbital_period(1e30, 1e-10, 1e11).expect("light").t_squared_s2;
    assert!((light / equal - 2.0).abs() < 1e-12, "ratio = {}", light / equal);
}

#[test]
fn earth_year_is_about_365_days() {
    let period = orbital_period(SUN, EARTH, AU).expect("earth");
    assert!((period.days - 365.2).abs() < 0.5, "days = {}", period.days);
    assert!((period.years - 1.0).abs() < 2e-3, "years = {}", period.years);
}

#[test]
fn equal_mass_binary_is_slower_than_star_planet_orbit() {
    let binary = binary_period(SUN, 1.5e11).expect("binary");
    let single = orbital_period(SUN, EARTH, 1.5e11).expect("single");
    assert!(binary.seconds > single.seconds);
    assert!((binary.years - 2.0078).abs() < 1e-3, "years = {}", binary.years);
}

#[test]
fn system_keeps_going_past_an_invalid_planet() {
    let planets = [
        PlanetSpec {
            mass_kg: EARTH,
            semi_major_axis_m: AU,
            eccentricity: 0.0167,
        },
        PlanetSpec {
            mass_kg: EARTH,
            semi_major_axis_m: -1.0,
            eccentricity: 0.0,
        },
        PlanetSpec {
            mass_kg: 6.39e23,
            semi_major_axis_m: 2.279e11,
            eccentricity: 0.0934,
        },
    ];
    let system = planetary_periods(SUN, &planets).expect("system");
    assert_eq!(system.valid_count(), 2);
    assert_eq!(system.skipped.len(), 1);
    assert_eq!(system.skipped[0].0, 1);
    assert_eq!(system.periods[1].index, 2);
    assert!((system.periods[1].period.days - 687.0).abs() < 2.0);
}

#[test]
fn system_rejects_counts_outside_two_to_five() {
    let planet = PlanetSpec {
        mass_kg: EARTH,
        semi_major_axis_m: AU,
        eccentricity: 0.0,
    };
    for count in [0, 1, 6] {
        let planets = vec![planet; count];
        assert!(
            matches!(
                planetary_periods(SUN, &planets),
                Err(OrbitError::PlanetCount { .. })
            ),
            "count {count}"
        );
    }
}

#[test]
fn roche_limit_grows_with_primary_mass() {
    let mut previous = 0.0;
    for primary in [1e22, 1e23, EARTH, 1.898e27, SUN] {
        let d = roche_limit(primary, 7.348e22, 1.737e6).expect("roche").meters;
        assert!(d > previous, "primary {primary}: {d} <= {previous}");
        previous = d;
    }
}

#[test]
fn roche_limit_grows_with_satellite_radius() {
    let mut previous = 0.0;
    for radius in [1e5, 1e6, 1.737e6, 1e7] {
        let d = roche_limit(EARTH, 7.348e22, radius).expect("roche").meters;
        assert!(d > previous, "radius {radius}: {d} <= {previous}");
        previous = d;
    }
}

#[test]
fn roche_limit_grows_as_satellite_gets_lighter() {
    let mut previous = 0.0;
    for satellite in [1e24, 7.348e22, 1e21, 1e18, 1e15] {
        let d = roche_limit(EARTH, satellite, 1.737e6).expect("roche").meters;
        assert!(d > previous, "satellite {satellite}: {d} <= {previous}");
        previous = d;
    }
}

#[test]
fn earth_moon_roche_limit() {
    let d = roche_limit(EARTH, 7.348e22, 1.737e6).expect("roche");
    assert!((d.kilometers - 18_358.6).abs() < 1.0, "km = {}", d.kilometers);
}

#[test]
fn schwarzschild_radius_is_linear_in_mass() {
    let one = schwarzschild_radius(SUN).expect("sun").meters;
    let ten = schwarzschild_radius(10.0 * SUN).expect("ten suns").meters;
    assert!((ten / one - 10.0).abs() < 1e-12);
    assert!((one - 2954.0).abs() < 2.0, "rs = {one}");
}

#[test]
fn escape_speed_squared_is_twice_surface_gravity_times_radius() {
    let radius = 6.371e6;
    let v = escape_velocity(EARTH, radius).expect("escape");
    let g = surface_gravity(EARTH, radius).expect("gravity");
    let lhs = v.m_s * v.m_s;
    let rhs = 2.0 * g.m_s2 * radius;
    assert!((lhs - rhs).abs() <= rhs * 1e-12);
    assert!((v.m_s - 11_186.0).abs() < 1.0, "v = {}", v.m_s);
}

#[test]
fn non_positive_and_non_finite_inputs_are_rejected() {
    assert!(orbital_period(0.0, EARTH, AU).is_err());
    assert!(orbital_period(SUN, EARTH, f64::NAN).is_err());
    assert!(escape_velocity(EARTH, 0.0).is_err());
    assert!(surface_gravity(-1.0, 6.371e6).is_err());
    assert!(schwarzschild_radius(f64::INFINITY).is_err());
    assert!(roche_limit(EARTH, 0.0, 1.737e6).is_err());
    assert!(stellar_output(6.96e8, 0.0, AU).is_err());
    assert!(from_parallax(0.0).is_err());
    assert!(from_distance(-4.2).is_err());
    assert!(blackbody_color(0.0).is_err());
}

#[test]
fn hotter_stars_peak_bluer() {
    let sun = stellar_output(6.96e8, 5778.0, AU).expect("sun");
    let vega = stellar_output(1.88e9, 9602.0, AU).expect("vega");
    assert!(vega.peak_wavelength_nm < sun.peak_wavelength_nm);
    assert!((sun.peak_wavelength_nm - 501.5).abs() < 1.0);

    let cool = blackbody_color(3000.0).expect("cool").rgb;
    let hot = blackbody_color(10_000.0).expect("hot").rgb;
    assert!(cool[0] / cool[2].max(1e-9) > hot[0] / hot[2].max(1e-9));
}

#[test]
fn parallax_modes_invert_each_other() {
    let forward = from_parallax(0.7687).expect("parallax");
    let back = from_distance(forward.distance_pc).expect("distance");
    assert!((back.parallax_arcsec - 0.7687).abs() < 1e-12);
    assert!((forward.distance_ly - 4.243).abs() < 1e-3);
}
