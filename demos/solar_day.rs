#![allow(missing_docs, clippy::unwrap_used)]
use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use solar_ephemeris::{GeoCoordinate, Instant, SolarCalculator, SolarEventResult};
use std::time::{SystemTime, UNIX_EPOCH};

const ZONE: Tz = chrono_tz::America::New_York;

fn local(dt: NaiveDateTime) -> String {
    Utc.from_utc_datetime(&dt)
        .with_timezone(&ZONE)
        .format("%H:%M:%S %Z")
        .to_string()
}

fn print_event(calc: &SolarCalculator, label: &str, event: SolarEventResult) -> Result<(), Box<dyn std::error::Error>> {
    match calc.event_datetime(event)? {
        Some(dt) => println!("  {label}: {}", local(dt)),
        None if event == SolarEventResult::AllDay => println!("  {label}: sun stays above (midnight sun)"),
        None => println!("  {label}: sun stays below (polar night)"),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Lakewood, NJ
    let latitude = 40.070_591;
    let longitude: f64 = -74.205_167;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| "System time is before Unix epoch")?
        .as_secs() as i64;
    let now = Utc.timestamp_opt(now, 0).single().ok_or("Invalid timestamp")?;

    let calc = SolarCalculator::new(
        Instant::from(now.naive_utc()),
        GeoCoordinate::new(latitude, longitude)?,
    );

    println!("Solar Ephemeris Example - Lakewood, NJ");
    println!("Location: {:.5}°N, {:.5}°W", latitude, longitude.abs());
    println!("Date: {}", now.with_timezone(&ZONE).format("%B %d, %Y"));
    println!("{:=<60}", "");

    println!("Time:");
    println!("  Julian Date: {:.6}", calc.julian_date());
    println!("  Greenwich sidereal time: {:.4} h", calc.greenwich_sidereal_time());
    println!("  Local sidereal time: {:.4} h", calc.local_sidereal_time());
    println!();

    let state = calc.solar_state();
    println!("Sun:");
    println!("  Apparent longitude: {:.4}°", state.apparent_longitude);
    println!("  Right ascension: {:.4}°", state.right_ascension);
    println!("  Declination: {:.4}°", state.declination);
    println!("  Distance: {:.6} AU", state.radius_vector_au);
    println!("  Equation of time: {:.2} min", state.equation_of_time_minutes);
    println!();

    let position = calc.horizon_position();
    let direction: [f64; 3] = calc.sun_direction();
    println!("Current position (at {} UTC):", now.format("%H:%M:%S"));
    println!("  Azimuth: {:.2}°", position.azimuth);
    println!("  Altitude: {:.2}°", position.altitude);
    println!(
        "  Direction (x east, y up, -z north): [{:.4}, {:.4}, {:.4}]",
        direction[0], direction[1], direction[2]
    );
    println!();

    println!("Events:");
    print_event(&calc, "Astronomical dawn", calc.astronomical_dawn()?)?;
    print_event(&calc, "Nautical dawn", calc.nautical_dawn()?)?;
    print_event(&calc, "Civil dawn", calc.civil_dawn()?)?;
    print_event(&calc, "Sunrise", calc.sunrise()?)?;
    print_event(&calc, "Solar noon", SolarEventResult::Occurs(calc.solar_noon()))?;
    print_event(&calc, "Sunset", calc.sunset()?)?;
    print_event(&calc, "Civil dusk", calc.civil_dusk()?)?;
    print_event(&calc, "Nautical dusk", calc.nautical_dusk()?)?;
    print_event(&calc, "Astronomical dusk", calc.astronomical_dusk()?)?;

    Ok(())
}
