use super::normalize::Normalizer;
use crate::command::types::NormalizeMode;
use crate::engine::types::Row;
use crate::test_helpers::factories::rows;
use crate::test_helpers::factory::Factory;
use serde_json::json;

fn metric_sum(row: &Row) -> f64 {
    row.number("sales") + row.number("profit")
}

#[test]
fn row_mode_scales_each_row_to_one_hundred() {
    let config = Factory::query_config()
        .with_y(&["sales", "profit"])
        .normalize(NormalizeMode::Row)
        .create();
    let input = rows(vec![
        json!({"month": "Jan", "sales": 30, "profit": 10}),
        json!({"month": "Feb", "sales": 1, "profit": 2}),
    ]);

    let output = Normalizer::new(&config).apply(input);

    assert_eq!(output[0].to_json(), json!({"month": "Jan", "sales": 75, "profit": 25}));
    for row in &output {
        assert!((metric_sum(row) - 100.0).abs() < 1e-6);
    }
}

#[test]
fn row_mode_leaves_zero_rows_unchanged() {
    let config = Factory::query_config()
        .with_y(&["sales", "profit"])
        .normalize(NormalizeMode::Row)
        .create();
    let input = rows(vec![json!({"month": "Jan", "sales": 0, "profit": null})]);

    let output = Normalizer::new(&config).apply(input.clone());

    assert_eq!(output, input);
}

#[test]
fn all_mode_scales_against_the_grand_total() {
    let config = Factory::query_config()
        .with_y(&["sales", "profit"])
        .normalize(NormalizeMode::All)
        .create();
    let input = rows(vec![
        json!({"month": "Jan", "sales": 30, "profit": 10}),
        json!({"month": "Feb", "sales": 50, "profit": 10}),
    ]);

    let output = Normalizer::new(&config).apply(input);

    assert_eq!(output[0].number("sales"), 30.0);
    assert_eq!(output[1].number("sales"), 50.0);
    let total: f64 = output.iter().map(metric_sum).sum();
    assert!((total - 100.0).abs() < 1e-6);
}

#[test]
fn all_mode_with_zero_total_is_identity() {
    let config = Factory::query_config()
        .normalize(NormalizeMode::All)
        .create();
    let input = rows(vec![json!({"month": "Jan", "sales": 0})]);

    assert_eq!(Normalizer::new(&config).apply(input.clone()), input);
}

#[test]
fn none_mode_is_identity() {
    let config = Factory::query_config().create();
    let input = rows(vec![json!({"month": "Jan", "sales": 12.5})]);

    assert_eq!(Normalizer::new(&config).apply(input.clone()), input);
}

#[test]
fn repeated_metric_column_is_normalized_once() {
    let config = Factory::query_config()
        .add_metric("sales", crate::command::types::Aggregation::Avg)
        .add_metric("profit", crate::command::types::Aggregation::Sum)
        .normalize(NormalizeMode::Row)
        .create();
    let input = rows(vec![json!({"month": "Jan", "sales": 10, "profit": 10})]);

    let output = Normalizer::new(&config).apply(input);

    assert_eq!(output[0].number("sales"), 50.0);
    assert!((metric_sum(&output[0]) - 100.0).abs() < 1e-6);
}
