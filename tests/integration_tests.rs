use chrono::Duration;
use tracker::formulas::{distance_km, mean_speed_kmh, running_calories, walking_calories};
use tracker::{
    format_daily_report, format_training_report, parse_daily_record, parse_training_record,
    AppConfig, BodyParams, ErrorPolicy, FormulaConfig, TrackerError, TrainingReporter,
};

/// Integration tests that exercise complete record-to-report workflows

#[test]
fn test_walking_report_matches_formula_chain() {
    let text = format_training_report("1000,Ходьба,10m", 75.0, 1.75).unwrap();

    let duration = Duration::minutes(10);
    let distance = distance_km(1000, 1.75);
    assert!((distance - 0.7245).abs() < 1e-9);

    let speed = mean_speed_kmh(1000, 1.75, duration);
    let calories = walking_calories(1000, 75.0, 1.75, duration).unwrap();

    let expected = format!(
        "Тип тренировки: Ходьба\nДлительность: {:.2} ч.\nДистанция: {:.2} км.\nСкорость: {:.2} км/ч\nСожгли калорий: {:.2}",
        10.0 / 60.0,
        distance,
        speed,
        calories
    );
    assert_eq!(text, expected);
}

#[test]
fn test_running_report_matches_formula_chain() {
    let text = format_training_report("679,Бег,45m", 75.0, 1.75).unwrap();
    let calories = running_calories(679, 75.0, 1.75, Duration::minutes(45)).unwrap();
    assert!(text.ends_with(&format!("Сожгли калорий: {:.2}", calories)));
}

#[test]
fn test_walking_is_far_below_running_for_same_input() {
    let d = Duration::minutes(45);
    let running = running_calories(679, 75.0, 1.75, d).unwrap();
    let walking = walking_calories(679, 75.0, 1.75, d).unwrap();
    assert!((walking - running * 0.029).abs() < 1e-12);
    assert!(walking < running / 30.0);
}

#[test]
fn test_training_errors_are_distinct() {
    assert!(matches!(
        parse_training_record("a,b"),
        Err(TrackerError::Format { actual: 2, .. })
    ));
    assert!(matches!(
        parse_training_record("x,Бег,45m"),
        Err(TrackerError::Parse { .. })
    ));
    assert!(matches!(
        format_training_report("679,Плавание,45m", 75.0, 1.75),
        Err(TrackerError::UnknownActivity { .. })
    ));
    assert!(matches!(
        format_training_report("679,Бег,45m", 75.0, 0.0),
        Err(TrackerError::Validation { .. })
    ));
}

#[test]
fn test_daily_workflow() {
    let record = parse_daily_record("12000,3h30m").unwrap();
    assert_eq!(record.steps, 12000);
    assert_eq!(record.duration, Duration::minutes(210));

    let text = format_daily_report("12000,3h30m", 75.0, 1.75);
    assert!(text.starts_with("Количество шагов: 12000.\n"));
    assert!(text.contains("Дистанция составила 7.80 км."));

    let calories = walking_calories(12000, 75.0, 1.75, Duration::minutes(210)).unwrap();
    assert!(text.ends_with(&format!("Вы сожгли {:.2} ккал.", calories)));
}

#[test]
fn test_daily_never_raises() {
    for record in ["", "12000", "abc,1h", "-5,1h", "100,0s", "100,1x", "1,2,3"] {
        assert_eq!(format_daily_report(record, 75.0, 1.75), "", "record {:?}", record);
    }
    assert_eq!(format_daily_report("12000,1h", -75.0, 1.75), "");
}

#[test]
fn test_config_drives_reporters() {
    let config = AppConfig::load_from_str(
        r#"
        [formulas]
        walking_label = "Walk"
        running_label = "Run"
        daily_step_length_m = 1.0

        [policy]
        daily = "strict"
        "#,
    )
    .unwrap();

    let training = config.training_reporter();
    let text = training.report("1000,Walk,10m", 75.0, 1.75).unwrap();
    assert!(text.starts_with("Тип тренировки: Walk"));

    let daily = config.daily_reporter();
    assert_eq!(daily.policy(), ErrorPolicy::Strict);
    assert!(daily.report("1000,1h", 75.0, 1.75).unwrap().contains("1.00 км"));
    assert!(daily.report("oops", 75.0, 1.75).is_err());
}

#[test]
fn test_swapped_constants_change_results() {
    let config = FormulaConfig {
        walking_calories_coefficient: 1.0,
        ..FormulaConfig::default()
    };
    let reporter = TrainingReporter::new(config);
    let body = BodyParams::new(75.0, 1.75);

    let walk = reporter.build("1000,Ходьба,10m", body).unwrap();
    let run = reporter.build("1000,Бег,10m", body).unwrap();
    assert!((walk.metrics.calories - run.metrics.calories).abs() < 1e-12);
}
