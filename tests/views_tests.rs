mod common;
use common::{open_pool, record, setup_test_db};
use wstation::core::forecast::Forecast;
use wstation::core::retention::Retention;
use wstation::core::sampler::LiveValues;
use wstation::core::views::{Extremes, day_series, month_overview, today_summary};
use wstation::models::{DaySlot, DisplayUnits, PressureUnit, TemperatureUnit};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_day_series_returns_hours_in_order() {
    let db_path = setup_test_db("views_day_series");
    let mut pool = open_pool(&db_path);
    record(&mut pool, 6, 2, 10.0, 1000.0, 50.0);
    record(&mut pool, 7, 2, 11.0, 1001.0, 51.0);
    record(&mut pool, 8, 2, 12.0, 1002.0, 52.0);

    let rows = day_series(&mut pool, DaySlot::TODAY).unwrap();
    let hours: Vec<u32> = rows.iter().map(|r| r.hour).collect();
    assert_eq!(hours, vec![6, 7, 8]);
}

#[test]
fn test_month_overview_one_row_per_day_newest_first() {
    let db_path = setup_test_db("views_month_overview");
    let mut pool = open_pool(&db_path);

    record(&mut pool, 10, 1, 10.0, 1000.0, 50.0);
    record(&mut pool, 11, 1, 14.0, 1000.0, 50.0);
    Retention::shift_days(&mut pool).unwrap();
    record(&mut pool, 10, 2, 20.0, 1000.0, 50.0);

    let days = month_overview(&mut pool).unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].day_of_month, 2);
    assert_eq!(days[1].day_of_month, 1);
    // the last row of day 1 carries the final aggregates
    assert_eq!(days[1].temp_stats.max, 14.0);
    assert_eq!(days[1].temp_stats.avg, 12.0);
}

#[test]
fn test_month_overview_stops_at_first_empty_slot() {
    let db_path = setup_test_db("views_month_gap");
    let mut pool = open_pool(&db_path);

    record(&mut pool, 10, 1, 10.0, 1000.0, 50.0);
    Retention::shift_days(&mut pool).unwrap();
    Retention::shift_days(&mut pool).unwrap();
    record(&mut pool, 10, 3, 10.0, 1000.0, 50.0);

    // slot 2 is empty, so slot 3 is not reached
    let days = month_overview(&mut pool).unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].day_of_month, 3);
}

#[test]
fn test_today_summary_widens_stored_extremes_with_live_values() {
    let db_path = setup_test_db("views_today_widen");
    let mut pool = open_pool(&db_path);
    record(&mut pool, 8, 5, 10.0, 1000.0, 40.0);
    record(&mut pool, 9, 5, 20.0, 1010.0, 60.0);

    let live = LiveValues {
        temperature: Some(25.0),
        pressure: Some(1005.0),
        humidity: Some(35.0),
    };
    let summary = today_summary(&mut pool, &live).unwrap();

    assert_eq!(summary.samples, 2);
    assert_eq!(summary.temperature, Some(Extremes { max: 25.0, min: 10.0 }));
    assert_eq!(summary.pressure, Some(Extremes { max: 1010.0, min: 1000.0 }));
    // a lower live humidity lowers today's minimum
    assert_eq!(summary.humidity, Some(Extremes { max: 60.0, min: 35.0 }));
}

#[test]
fn test_today_summary_without_samples_uses_live_values() {
    let db_path = setup_test_db("views_today_live_only");
    let mut pool = open_pool(&db_path);

    let live = LiveValues {
        temperature: Some(18.0),
        pressure: None,
        humidity: Some(50.0),
    };
    let summary = today_summary(&mut pool, &live).unwrap();

    assert_eq!(summary.samples, 0);
    assert_eq!(summary.temperature, Some(Extremes { max: 18.0, min: 18.0 }));
    assert_eq!(summary.pressure, None);
    assert!(summary.latest.is_none());
}

#[test]
fn test_today_summary_ignores_older_days() {
    let db_path = setup_test_db("views_today_older_days");
    let mut pool = open_pool(&db_path);
    record(&mut pool, 9, 5, 30.0, 1000.0, 40.0);
    Retention::shift_days(&mut pool).unwrap();

    let summary = today_summary(&mut pool, &LiveValues::default()).unwrap();
    assert_eq!(summary.samples, 0);
    assert_eq!(summary.temperature, None);
}

#[test]
fn test_temperature_conversions() {
    assert!(approx(TemperatureUnit::Celsius.convert(21.5), 21.5));
    assert!(approx(TemperatureUnit::Fahrenheit.convert(0.0), 32.0));
    assert!(approx(TemperatureUnit::Fahrenheit.convert(100.0), 212.0));
    assert!(approx(TemperatureUnit::Kelvin.convert(-273.15), 0.0));
}

#[test]
fn test_pressure_conversions() {
    let standard = 1013.25;
    assert!(approx(PressureUnit::Mbar.convert(standard), standard));
    assert!(approx(PressureUnit::Hpa.convert(standard), standard));
    assert!(approx(PressureUnit::Kpa.convert(standard), 101.325));
    assert!((PressureUnit::Atm.convert(standard) - 1.0).abs() < 1e-4);
    assert!((PressureUnit::Mmhg.convert(standard) - 760.0).abs() < 0.01);
    assert!((PressureUnit::Torr.convert(standard) - 760.0).abs() < 0.01);
    assert!((PressureUnit::Psi.convert(standard) - 14.696).abs() < 0.001);
    assert!((PressureUnit::Inhg.convert(standard) - 29.92).abs() < 0.01);
}

#[test]
fn test_display_units_format() {
    let units = DisplayUnits {
        temperature: TemperatureUnit::Fahrenheit,
        pressure: PressureUnit::Inhg,
    };
    assert_eq!(units.fmt_temp(20.0), "68.0 °F");
    assert_eq!(units.fmt_press(1013.25), "29.92 inHg");
    assert_eq!(units.fmt_humid(45.0), "45.0 %");

    let default = DisplayUnits::default();
    assert_eq!(default.fmt_temp(20.04), "20.0 °C");
    assert_eq!(default.fmt_press(1013.27), "1013.3 mbar");
}

#[test]
fn test_forecast_thresholds() {
    assert_eq!(Forecast::from_pressure(994.9, 12), Forecast::Rain);
    assert_eq!(Forecast::from_pressure(995.0, 12), Forecast::Cloudy { night: false });
    assert_eq!(Forecast::from_pressure(1024.9, 12), Forecast::Cloudy { night: false });
    assert_eq!(Forecast::from_pressure(1025.0, 12), Forecast::Clear { night: false });
}

#[test]
fn test_forecast_night_hours() {
    assert_eq!(Forecast::from_pressure(1030.0, 5), Forecast::Clear { night: true });
    assert_eq!(Forecast::from_pressure(1030.0, 6), Forecast::Clear { night: false });
    assert_eq!(Forecast::from_pressure(1030.0, 19), Forecast::Clear { night: false });
    assert_eq!(Forecast::from_pressure(1000.0, 20), Forecast::Cloudy { night: true });
    // rain has no night variant
    assert_eq!(Forecast::from_pressure(980.0, 23), Forecast::Rain);
}
