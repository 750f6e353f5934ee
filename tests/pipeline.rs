use std::{env, fs, path::PathBuf};
use tsdeviation::data::{DataProcessor, LoaderError, ProcessOptions};
use tsdeviation::stats::Summary;
use tsdeviation::{
    filter_by_date_range, filter_by_deviation, get_processed, group_by_month_average, summary,
    ParseError,
};

fn write_dataset(name: &str, contents: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("pipeline");
    fs::create_dir_all(&dir).expect("failed to create test directory");
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write dataset");
    path
}

#[test]
fn worked_example_with_missing_rows() {
    let path = write_dataset(
        "worked_example.csv",
        "2021-11-10,10\n2021-11-15,\n,99\n2021-11-20,30\n2021-12-01,50\n",
    );

    let ds = get_processed(&path).expect("failed to process dataset");
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.indices(), vec![0, 1, 2]);
    assert_eq!(ds.values(), vec![10.0, 30.0, 50.0]);

    let std_dev: Vec<f64> = ds.observations.iter().map(|o| o.std_deviation).collect();
    let median_dev: Vec<f64> = ds.observations.iter().map(|o| o.median_deviation).collect();
    assert_eq!(std_dev, vec![20.0, 0.0, 20.0]);
    assert_eq!(median_dev, vec![20.0, 0.0, 20.0]);

    assert_eq!(filter_by_deviation(&ds, 20.0).indices(), vec![0, 2]);

    let months = group_by_month_average(&ds);
    assert_eq!(months.into_iter().collect::<Vec<_>>(), vec![(11, 20.0), (12, 50.0)]);

    assert!(summary(&ds, "Unknown").is_none());
    match summary(&ds, "Value") {
        Some(Summary::Numeric(s)) => assert_eq!(s.count, 3),
        other => panic!("unexpected summary: {other:?}"),
    }

    let err = filter_by_date_range(&ds, "2021-13-40", "2021-12-31").unwrap_err();
    assert!(matches!(err, ParseError::Date { .. }));
}

#[test]
fn complete_file_keeps_labels_and_order() {
    let path = write_dataset(
        "unsorted.csv",
        "2021-12-03,5\n2021-11-01,1\n2021-11-01,3\n2022-01-15,7\n",
    );

    let ds = get_processed(&path).expect("failed to process dataset");
    assert_eq!(ds.indices(), vec![0, 1, 2, 3]);
    assert_eq!(ds.values(), vec![5.0, 1.0, 3.0, 7.0]);
    assert_eq!(ds.centres.mean, 4.0);
    assert_eq!(ds.centres.median, 4.0);

    let window = filter_by_date_range(&ds, "2021-11-01", "2021-12-03").unwrap();
    assert_eq!(window.indices(), vec![0, 1, 2]);
    // Rows keep deviations from the full dataset.
    assert_eq!(window.observations[0].std_deviation, 1.0);

    assert!(filter_by_date_range(&ds, "2022-01-01", "2021-01-01").unwrap().is_empty());
}

#[test]
fn custom_delimiter() {
    let path = write_dataset("semicolon.csv", "2021-11-10;10.5\n2021-11-11;20.5\n");
    let options = ProcessOptions { delimiter: b';' };
    let ds = DataProcessor::get_processed(&path, &options).expect("failed to process dataset");
    assert_eq!(ds.values(), vec![10.5, 20.5]);
}

#[test]
fn malformed_cells_fail_the_load() {
    let path = write_dataset("bad_value.csv", "2021-11-10,10\n2021-11-11,abc\n");
    match get_processed(&path) {
        Err(LoaderError::Parse(ParseError::Value { row, input })) => {
            assert_eq!(row, Some(1));
            assert_eq!(input, "abc");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let path = write_dataset("bad_date.csv", "2021/11/10,10\n");
    assert!(matches!(
        get_processed(&path),
        Err(LoaderError::Parse(ParseError::Date { row: Some(0), .. }))
    ));
}

#[test]
fn extra_columns_are_rejected() {
    let path = write_dataset("three_columns.csv", "2021-11-10,10,x\n");
    assert!(matches!(get_processed(&path), Err(LoaderError::ColumnCount(3))));
}

#[test]
fn missing_file_propagates_io_error() {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("pipeline/does_not_exist.csv");
    assert!(matches!(get_processed(&path), Err(LoaderError::Io(_))));
}
