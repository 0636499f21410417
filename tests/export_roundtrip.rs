use std::path::PathBuf;

use las_data_processing::export::{
    DEFAULT_PLOT_TRACKS, ExportOptions, export_csv_to_path, select_for_plot, to_csv,
    to_delimited_text,
};
use las_data_processing::ingestion::csv::{ingest_csv_from_path, ingest_csv_from_str};
use las_data_processing::ingestion::{IngestionOptions, ingest_from_path};
use las_data_processing::processing::{derive, petrophysics};
use las_data_processing::store::CurveStore;

fn derived_volve() -> CurveStore {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/volve_demo.las");
    let log = ingest_from_path(path, &IngestionOptions::default()).unwrap();
    let (store, errors) = derive(log.store, &petrophysics::standard_specs());
    assert!(errors.is_empty());
    store
}

#[test]
fn csv_has_one_header_and_one_row_per_sample() {
    let store = derived_volve();
    let text = to_csv(&store).unwrap();

    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(
        headers,
        vec!["DEPT", "SW", "BVW", "PHIF", "VSH", "KLOGH", "SWIRR", "PHIE"]
    );

    let records: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), store.len());
    assert_eq!(&records[1][0], "3000.5");
    assert_eq!(&records[1][1], "-999.25");
    assert_eq!(&records[1][7], "-999.25");
}

#[test]
fn csv_round_trips_through_the_csv_reader() {
    let store = derived_volve();
    let text = to_csv(&store).unwrap();
    let back = ingest_csv_from_str(&text, b',', store.null_value()).unwrap();

    assert_eq!(back.index_name(), "DEPT");
    assert_eq!(back.depth(), store.depth());
    assert_eq!(
        back.curve_names().collect::<Vec<_>>(),
        store.curve_names().collect::<Vec<_>>()
    );
    for curve in store.columns() {
        assert_eq!(back.get(&curve.name), Some(curve.values.as_slice()), "{}", curve.name);
    }
}

#[test]
fn semicolon_delimiter_is_honoured() {
    let store = derived_volve();
    let text = to_delimited_text(&store, b';').unwrap();
    assert!(text.starts_with("DEPT;SW;BVW;PHIF;VSH;KLOGH;SWIRR;PHIE\n"));

    let back = ingest_csv_from_str(&text, b';', -999.25).unwrap();
    assert_eq!(back.get("PHIE"), store.get("PHIE"));
}

#[test]
fn export_to_path_with_units() {
    let store = derived_volve();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("volve.csv");

    let opts = ExportOptions {
        include_units: true,
        ..Default::default()
    };
    let rows = export_csv_to_path(&store, &out, &opts).unwrap();
    assert_eq!(rows, 3);

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("DEPT (M),SW (V/V),BVW (V/V),PHIF (V/V),VSH (V/V),KLOGH (MD),SWIRR (V/V),PHIE (V/V)\n"));

    let back = ingest_csv_from_path(&out, -999.25).unwrap();
    assert_eq!(back.index().unit, "M");
    assert_eq!(back.curve("KLOGH").unwrap().unit, "MD");
    assert_eq!(back.get("SWIRR"), store.get("SWIRR"));
}

#[test]
fn plot_selection_uses_default_tracks_and_reports_missing() {
    let store = derived_volve();
    let sel = select_for_plot(&store, &DEFAULT_PLOT_TRACKS);

    assert_eq!(sel.index_name, "DEPT");
    assert_eq!(sel.index_unit, "M");
    let names: Vec<&str> = sel.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["KLOGH", "PHIF", "SW", "VSH"]);
    assert_eq!(sel.missing, vec!["SAND_FLAG".to_string()]);

    let sw = sel.track("SW").unwrap();
    assert_eq!(sw.depth, store.depth());
    assert_eq!(sw.values, vec![0.5, -999.25, 0.3]);
    assert_eq!(
        sw.valid_points().collect::<Vec<_>>(),
        vec![(3000.0, 0.5), (3001.0, 0.3)]
    );
}

#[test]
fn plot_selection_serializes_to_json() {
    let store = derived_volve();
    let sel = select_for_plot(&store, &["PHIE", "NOPE"]);
    let json: serde_json::Value = serde_json::from_str(&sel.to_json().unwrap()).unwrap();

    assert_eq!(json["index_name"], "DEPT");
    assert_eq!(json["missing"][0], "NOPE");
    assert_eq!(json["tracks"][0]["name"], "PHIE");
    assert_eq!(json["tracks"][0]["values"][1], -999.25);
    assert_eq!(json["tracks"][0]["depth"].as_array().unwrap().len(), 3);
}
