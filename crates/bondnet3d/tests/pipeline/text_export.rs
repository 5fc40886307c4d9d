use bondnet3d::params::{ConnectionType, MaterialProperties};
use bondnet3d::catalog::GroupTable;
use bondnet3d::pipeline::{BuildConfig, MemorySnapshotStore, Pipeline};

use crate::common::abc;

#[test]
fn text_export_replaces_the_snapshot() {
    let groups = GroupTable::new()
        .with_group(
            "a",
            MaterialProperties::default().with_connection_type(ConnectionType::FixedAndPoint),
        )
        .with_group("b", MaterialProperties::default());
    let config = BuildConfig::default().with_export_as_text(true);
    let mut store = MemorySnapshotStore::new();
    let output = Pipeline::new().run_with_store(&mut store, &abc(), &groups, &config);

    assert!(output.status.is_success());
    assert!(output.snapshot.is_none());
    assert!(store.json().is_none());

    let text = output.text_export.unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // Two joints of two constraints each.
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["constraint"], 0);
    assert_eq!(lines[0]["kind"], "Fixed");
    assert_eq!(lines[0]["mode"], "Shear");
    assert_eq!(lines[1]["kind"], "Point");
    assert_eq!(lines[3]["joint"], 1);
    assert_eq!(lines[3]["elements"], serde_json::json!([1, 2]));
}
