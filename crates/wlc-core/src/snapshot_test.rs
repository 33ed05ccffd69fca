use super::*;
use crate::cashflow::PhaseBreakdown;

fn sample_snapshot() -> AnalysisSnapshot {
    let mut phase_totals = BTreeMap::new();
    for kind in CostKind::ALL {
        phase_totals.insert(
            kind,
            PhaseTotal {
                value: 100.0,
                percent_of_total: 25.0,
            },
        );
    }

    let mut components = BTreeMap::new();
    components.insert(
        ComponentId::new("wall-1"),
        ComponentTotal {
            by_kind: PhaseBreakdown {
                construction: 400.0,
                ..Default::default()
            },
            total: 400.0,
        },
    );

    let mut stakeholders = BTreeMap::new();
    stakeholders.insert(
        "owner".to_string(),
        StakeholderTotal {
            total_cost: 400.0,
            by_kind: PhaseBreakdown {
                construction: 400.0,
                ..Default::default()
            },
            component_count: 1,
            attribution_count: 1,
            responsibility_percent: 100.0,
        },
    );

    AnalysisSnapshot {
        id: Uuid::nil(),
        computed_at: DateTime::parse_from_rfc3339("2026-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc),
        project_lifespan: 50,
        component_count: 1,
        total_nominal_wlc: 400.0,
        total_discounted_wlc: 380.0,
        phase_totals,
        components,
        stakeholders,
    }
}

#[test]
fn test_checksum_is_stable() {
    let snapshot = sample_snapshot();
    assert_eq!(snapshot.checksum().unwrap(), snapshot.checksum().unwrap());
    assert_eq!(snapshot.checksum().unwrap().len(), 64);
}

#[test]
fn test_checksum_changes_with_content() {
    let snapshot = sample_snapshot();
    let mut other = snapshot.clone();
    other.total_nominal_wlc += 1.0;
    assert_ne!(snapshot.checksum().unwrap(), other.checksum().unwrap());
}

#[test]
fn test_save_load_roundtrip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshots/current.json");

    let snapshot = sample_snapshot();
    snapshot.save(&path).unwrap();
    let loaded = AnalysisSnapshot::load(&path).unwrap();

    assert_eq!(loaded, snapshot);
}

#[test]
fn test_load_rejects_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{not json").unwrap();

    assert!(matches!(
        AnalysisSnapshot::load(&path),
        Err(CoreError::SnapshotMalformed { .. })
    ));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        AnalysisSnapshot::load(&dir.path().join("missing.json")),
        Err(CoreError::IoWithPath { .. })
    ));
}

#[test]
fn test_tampered_payload_still_loads() {
    // Integrity mismatch warns but does not fail; the payload is returned.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snap.json");

    let snapshot = sample_snapshot();
    snapshot.save(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let tampered = content.replace("380.0", "999.0");
    assert_ne!(content, tampered);
    std::fs::write(&path, tampered).unwrap();

    let loaded = AnalysisSnapshot::load(&path).unwrap();
    assert_eq!(loaded.total_discounted_wlc, 999.0);
}
