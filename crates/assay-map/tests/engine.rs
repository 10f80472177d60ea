use assay_ingest::{CsvOptions, parse_csv};
use assay_map::{
    MappingContext, SelectionError, UNLABELED_EXPERIMENT, apply_selection, validate_selection,
};
use assay_model::{Cell, MappingSelection, RawTable, TimeUnit};
use assay_transform::TimeKind;

fn table_from_csv(text: &str) -> RawTable {
    parse_csv(text, CsvOptions::default()).expect("parse csv fixture")
}

fn ctx() -> MappingContext {
    MappingContext::new("run1")
}

#[test]
fn groups_rows_into_experiments_in_first_seen_order() {
    let table = table_from_csv("time,value,exp\n0,1,A\n1,2,A\n0,3,B\n");
    let mut selection = MappingSelection::new(0, vec![1]);
    selection.experiment_column = Some(2);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    let experiments = &outcome.dataset.experiments;
    assert_eq!(experiments.len(), 2);
    assert_eq!(experiments[0].name, "A");
    assert_eq!(experiments[1].name, "B");
    assert_eq!(experiments[0].series.len(), 1);
    assert_eq!(experiments[0].series[0].time, vec![0.0, 1.0]);
    assert_eq!(experiments[0].series[0].y, vec![1.0, 2.0]);
    assert_eq!(experiments[1].series[0].time, vec![0.0]);
    assert_eq!(experiments[1].series[0].y, vec![3.0]);
    assert_eq!(outcome.stats.experiment_count, 2);
    assert_eq!(outcome.stats.series_count, 2);
    assert_eq!(outcome.stats.point_count, 3);
    assert!(outcome.row_errors.is_empty());
    assert_eq!(outcome.time_kind, TimeKind::Numeric);
}

#[test]
fn mapping_is_deterministic_up_to_ids() {
    let table = table_from_csv("time,a,b,exp\n0,1,x,E2\n1,2,5,E1\n2,3,6,E2\n");
    let mut selection = MappingSelection::new(0, vec![1, 2]);
    selection.experiment_column = Some(3);

    let first = apply_selection(&table, &selection, &ctx()).expect("first run");
    let second = apply_selection(&table, &selection, &ctx()).expect("second run");

    assert_eq!(first.stats, second.stats);
    assert_eq!(first.row_errors, second.row_errors);
    let names_first: Vec<&str> = first
        .dataset
        .experiments
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    let names_second: Vec<&str> = second
        .dataset
        .experiments
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names_first, names_second);
    assert_eq!(names_first, vec!["E2", "E1"]);
    for (left, right) in first
        .dataset
        .experiments
        .iter()
        .zip(second.dataset.experiments.iter())
    {
        for (ls, rs) in left.series.iter().zip(right.series.iter()) {
            assert_eq!(ls.time, rs.time);
            assert_eq!(ls.y, rs.y);
            assert_eq!(ls.name, rs.name);
        }
    }
}

#[test]
fn unparsable_time_discards_the_whole_row() {
    let table = table_from_csv("time,a,b\nbad,1,2\n0,3,4\n");
    let selection = MappingSelection::new(0, vec![1, 2]);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    // A text value in the time column makes the column invalid, but the
    // numeric row still fails row-by-row only where no time came out.
    assert_eq!(outcome.time_kind, TimeKind::Invalid);
    assert_eq!(outcome.row_errors.count, 2);
    assert_eq!(outcome.stats.point_count, 0);
}

#[test]
fn row_error_indices_are_one_based_and_capped_at_five() {
    let mut text = String::from("time,v\n");
    for _ in 0..7 {
        text.push_str("oops,1\n");
    }
    let table = table_from_csv(&text);
    let selection = MappingSelection::new(0, vec![1]);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    assert_eq!(outcome.row_errors.count, 7);
    assert_eq!(outcome.row_errors.first_rows, vec![1, 2, 3, 4, 5]);
    assert_eq!(outcome.row_errors.overflow(), 2);
}

#[test]
fn bad_value_cells_drop_single_points_only() {
    let table = table_from_csv("time,a,b\n0,1,2\n1,oops,3\n2,4,\n");
    let selection = MappingSelection::new(0, vec![1, 2]);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    assert!(outcome.row_errors.is_empty());
    let series = &outcome.dataset.experiments[0].series;
    let a = series.iter().find(|s| s.meta.value_column == "a").expect("series a");
    let b = series.iter().find(|s| s.meta.value_column == "b").expect("series b");
    assert_eq!(a.time, vec![0.0, 2.0]);
    assert_eq!(a.y, vec![1.0, 4.0]);
    assert_eq!(a.meta.dropped_points, 1);
    assert_eq!(b.time, vec![0.0, 1.0]);
    assert_eq!(b.y, vec![2.0, 3.0]);
    assert_eq!(b.meta.dropped_points, 1);
}

#[test]
fn replicates_split_series_within_a_column() {
    let table = table_from_csv("time,od,rep\n0,1,r1\n0,2,r2\n1,3,r1\n1,4,\n");
    let mut selection = MappingSelection::new(0, vec![1]);
    selection.replicate_column = Some(2);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    let series = &outcome.dataset.experiments[0].series;
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].name, "od (r1)");
    assert_eq!(series[0].meta.replicate.as_deref(), Some("r1"));
    assert_eq!(series[0].time, vec![0.0, 1.0]);
    assert_eq!(series[1].name, "od (r2)");
    // A blank replicate cell is "no replicate", not an empty label.
    assert_eq!(series[2].meta.replicate, None);
    assert_eq!(series[2].name, "od");
}

#[test]
fn blank_experiment_cells_get_the_unlabeled_label() {
    let table = table_from_csv("time,v,exp\n0,1,\n1,2,A\n");
    let mut selection = MappingSelection::new(0, vec![1]);
    selection.experiment_column = Some(2);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    let names: Vec<&str> = outcome
        .dataset
        .experiments
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec![UNLABELED_EXPERIMENT, "A"]);
}

#[test]
fn missing_experiment_column_falls_back_to_dataset_name() {
    let table = table_from_csv("time,v\n0,1\n");
    let selection = MappingSelection::new(0, vec![1]);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    assert_eq!(outcome.dataset.experiments[0].name, "run1");
}

#[test]
fn sheet_name_wins_over_dataset_name_as_fallback_label() {
    let table = RawTable::new(
        vec!["time".to_string(), "v".to_string()],
        vec![vec![Cell::Number(0.0), Cell::Number(1.0)]],
        Some("Plate 1".to_string()),
    );
    let selection = MappingSelection::new(0, vec![1]);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    assert_eq!(outcome.dataset.experiments[0].name, "Plate 1");
}

#[test]
fn metadata_columns_fold_with_disagreements_recorded() {
    let table = table_from_csv(
        "time,v,exp,temp\n0,1,A,37C\n1,2,A,39C\n2,3,A,37C\n0,4,B,25C\n",
    );
    let mut selection = MappingSelection::new(0, vec![1]);
    selection.experiment_column = Some(2);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    let a = &outcome.dataset.experiments[0];
    assert_eq!(a.meta_raw["temp"], "37C");
    let record = &a.meta_consistency["temp"];
    assert!(!record.consistent);
    assert_eq!(record.distinct_values, vec!["37C", "39C"]);

    let b = &outcome.dataset.experiments[1];
    assert_eq!(b.meta_raw["temp"], "25C");
    assert!(b.meta_consistency["temp"].consistent);
}

#[test]
fn incomplete_selections_report_every_blocking_error() {
    let table = table_from_csv("time,v\n0,1\n");
    let selection = MappingSelection::default();

    let errors = apply_selection(&table, &selection, &ctx()).expect_err("must reject");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| *e == SelectionError::MissingTimeColumn));
    assert!(errors.iter().any(|e| *e == SelectionError::NoValueColumns));
}

#[test]
fn out_of_range_columns_are_blocking_errors() {
    let table = table_from_csv("time,v\n0,1\n");
    let mut selection = MappingSelection::new(0, vec![1]);
    selection.experiment_column = Some(9);

    let errors = validate_selection(&table, &selection);
    assert_eq!(
        errors,
        vec![SelectionError::ColumnOutOfRange { index: 9, width: 2 }]
    );
}

#[test]
fn selected_time_unit_scales_numeric_time() {
    let table = table_from_csv("t,v\n1,10\n2,20\n");
    let mut selection = MappingSelection::new(0, vec![1]);
    selection.time_unit = TimeUnit::Minutes;

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    assert_eq!(outcome.dataset.experiments[0].series[0].time, vec![60.0, 120.0]);
}

#[test]
fn datetime_time_column_reports_reference() {
    let table = table_from_csv(
        "stamp,v\n2024-01-15T10:30:45,1\n2024-01-15T10:30:46,2\n2024-01-15T10:30:48.5,3\n",
    );
    let selection = MappingSelection::new(0, vec![1]);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    assert_eq!(outcome.time_kind, TimeKind::Datetime);
    assert!(outcome.time_reference.is_some());
    assert_eq!(
        outcome.dataset.experiments[0].series[0].time,
        vec![0.0, 1.0, 3.5]
    );
}

#[test]
fn outcome_serializes_for_the_ui_boundary() {
    let table = table_from_csv("time,v\nbad,1\n0,2\n");
    let selection = MappingSelection::new(0, vec![1]);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    let json = serde_json::to_value(&outcome).expect("serialize outcome");
    assert_eq!(json["stats"]["pointCount"], 0);
    assert_eq!(json["rowErrors"]["count"], 2);
    assert_eq!(json["rowErrors"]["firstRows"], serde_json::json!([1, 2]));
    assert_eq!(json["timeKind"], "invalid");
}

#[test]
fn excel_serial_like_times_are_flagged_not_rewritten() {
    let table = table_from_csv("t,v\n45123.25,1\n45123.5,2\n");
    let selection = MappingSelection::new(0, vec![1]);

    let outcome = apply_selection(&table, &selection, &ctx()).expect("apply mapping");
    assert_eq!(outcome.serial_suspect_rows, vec![1, 2]);
    assert_eq!(
        outcome.dataset.experiments[0].series[0].time,
        vec![45123.25, 45123.5]
    );
}
