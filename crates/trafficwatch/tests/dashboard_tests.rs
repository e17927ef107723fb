//! Violation filtering, selection and fixture injection.

mod common;

use std::io::Write;
use std::sync::Arc;

use common::TestHarness;
use tempfile::NamedTempFile;
use trafficwatch::config::load_config_from_str;
use trafficwatch::data::{DataProvider, FixtureProvider};
use trafficwatch::{filter_by_type, ViolationFilter, ViolationType};

#[test]
fn filter_all_returns_every_record_in_order() {
    let provider = FixtureProvider::demo().unwrap();
    let all = filter_by_type(provider.list_violations(), ViolationFilter::All);

    let ids: Vec<u32> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn filter_helmet_returns_the_two_helmet_records() {
    let provider = FixtureProvider::demo().unwrap();
    let filter: ViolationFilter = "helmet".parse().unwrap();
    let helmet = filter_by_type(provider.list_violations(), filter);

    let plates: Vec<&str> = helmet.iter().map(|r| r.plate.as_str()).collect();
    assert_eq!(plates, vec!["MH12AB1234", "UP32GH4567"]);
}

#[test]
fn every_type_filter_is_a_subset_in_order() {
    let provider = FixtureProvider::demo().unwrap();
    let records = provider.list_violations();

    let mut total = 0;
    for t in ViolationType::ALL {
        let subset = filter_by_type(records, ViolationFilter::Type(t));
        assert!(subset.iter().all(|r| r.violation_type == t));
        assert!(subset.windows(2).all(|w| w[0].id < w[1].id));
        total += subset.len();
    }
    assert_eq!(total, records.len());
}

#[test]
fn repeated_selection_keeps_one_overlay() {
    let mut harness = TestHarness::new();
    let record = harness.state.provider().get_violation(5).unwrap().clone();

    harness.state.select_for_detail(Some(&record));
    harness.state.select_for_detail(Some(&record));

    let snapshot = harness.state.snapshot();
    assert_eq!(snapshot.selected.map(|r| r.id), Some(5));
}

#[test]
fn fixture_file_replaces_demo_data() {
    let mut fixture = NamedTempFile::new().unwrap();
    write!(
        fixture,
        r#"{{
            "stats": {{"totalViolations": 1, "pendingSms": 1, "processing": 0}},
            "violations": [{{
                "id": 40, "plate": "KL07XY0001", "type": "speed",
                "location": "Marine Drive, Kochi", "timestamp": "2024-02-01T09:00:00",
                "confidence": 0.8, "fineAmount": 2000, "status": "pending",
                "evidenceRef": "evidence/k1.mp4", "description": "Over the limit"
            }}]
        }}"#
    )
    .unwrap();

    let config = load_config_from_str(&format!(
        r#"{{"dashboard": {{"fixturePath": {}}}}}"#,
        serde_json::to_string(fixture.path()).unwrap()
    ))
    .unwrap();

    let provider =
        FixtureProvider::from_optional_path(config.dashboard.fixture_path.as_deref()).unwrap();
    let provider: Arc<dyn DataProvider> = Arc::new(provider);

    assert_eq!(provider.list_violations().len(), 1);
    assert_eq!(provider.get_stats().total_violations, 1);
    assert!(provider.get_trends().is_empty());
    assert!(provider.get_distribution().is_empty());
    assert_eq!(
        filter_by_type(
            provider.list_violations(),
            ViolationFilter::Type(ViolationType::Speed)
        )
        .len(),
        1
    );
}
