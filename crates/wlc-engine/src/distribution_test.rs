use super::*;

fn component(id: &str, lifespan: Option<u32>) -> Component {
    Component {
        id: ComponentId::new(id),
        classification: None,
        material: None,
        lifespan_years: lifespan,
    }
}

fn component_map(components: Vec<Component>) -> BTreeMap<ComponentId, Component> {
    components.into_iter().map(|c| (c.id.clone(), c)).collect()
}

fn config() -> Config {
    Config::default()
}

/// The reference scenario: N=10, one component with a 5-year lifespan,
/// construction 1000, operation 100/yr, maintenance 200/event, end-of-life 50.
fn reference_inputs() -> (Vec<CostFact>, BTreeMap<ComponentId, Component>, Project) {
    let facts = vec![
        CostFact::new("slab-1", CostKind::Construction, 1000.0),
        CostFact::new("slab-1", CostKind::Operation, 100.0),
        CostFact::new("slab-1", CostKind::Maintenance, 200.0),
        CostFact::new("slab-1", CostKind::EndOfLife, 50.0),
    ];
    let components = component_map(vec![component("slab-1", Some(5))]);
    (facts, components, Project::new(10))
}

#[test]
fn test_reference_scenario_placement() {
    let (facts, components, project) = reference_inputs();
    let result = distribute(&facts, &components, &project, &config()).unwrap();

    assert_eq!(result.cash_flow.len(), 11);

    // Year 0: construction only.
    assert_eq!(result.cash_flow[0].nominal, 1000.0);
    assert_eq!(result.cash_flow[0].breakdown.construction, 1000.0);
    assert_eq!(result.cash_flow[0].breakdown.operation, 0.0);

    // Years 1-9 each carry the annual operation cost.
    for year in 1..=9 {
        assert_eq!(
            result.cash_flow[year].breakdown.operation, 100.0,
            "year {}",
            year
        );
    }

    // One replacement at year 5; the multiple at year 10 is demolition,
    // not a replacement.
    assert_eq!(result.cash_flow[5].breakdown.maintenance, 200.0);
    assert_eq!(result.cash_flow[5].nominal, 300.0);
    assert_eq!(result.cash_flow[10].breakdown.maintenance, 0.0);

    // Final year: end-of-life only.
    assert_eq!(result.cash_flow[10].nominal, 50.0);
    assert_eq!(result.cash_flow[10].breakdown.end_of_life, 50.0);

    // Total nominal = 1000 + 900 + 200 + 50.
    assert!((result.total_nominal_wlc - 2150.0).abs() < 1e-9);
}

#[test]
fn test_reference_scenario_lifecycle_totals() {
    let (facts, components, project) = reference_inputs();
    let result = distribute(&facts, &components, &project, &config()).unwrap();

    let totals = &result.components[&ComponentId::new("slab-1")];
    assert_eq!(totals.by_kind.construction, 1000.0);
    assert_eq!(totals.by_kind.operation, 900.0);
    assert_eq!(totals.by_kind.maintenance, 200.0);
    assert_eq!(totals.by_kind.end_of_life, 50.0);
    assert!((totals.total - 2150.0).abs() < 1e-9);

    assert_eq!(result.phase_totals[&CostKind::Operation].value, 900.0);
    let share = result.phase_totals[&CostKind::Construction].percent_of_total;
    assert!((share - 1000.0 / 2150.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_nothing_created_or_lost() {
    let (facts, components, project) = reference_inputs();
    let result = distribute(&facts, &components, &project, &config()).unwrap();

    let series_sum: f64 = result.cash_flow.iter().map(|y| y.nominal).sum();
    let phase_sum: f64 = result.phase_totals.values().map(|t| t.value).sum();
    assert!((series_sum - phase_sum).abs() < 1e-9);
    assert!((series_sum - result.total_nominal_wlc).abs() < 1e-9);
}

#[test]
fn test_discounting_uses_schedule_with_fallback() {
    let facts = vec![
        CostFact::new("c1", CostKind::Construction, 1000.0),
        CostFact::new("c1", CostKind::EndOfLife, 100.0),
    ];
    let components = component_map(vec![component("c1", None)]);
    let mut project = Project::new(2);
    project.discount_schedule.insert(2, 0.10);

    let result = distribute(&facts, &components, &project, &config()).unwrap();

    // Year 0 is never discounted in effect.
    assert_eq!(result.cash_flow[0].discounted, 1000.0);
    assert_eq!(result.cash_flow[0].discount_rate, 0.03);

    // Year 2 uses the scheduled 10% rate.
    assert_eq!(result.cash_flow[2].discount_rate, 0.10);
    assert!((result.cash_flow[2].discounted - 100.0 / 1.10_f64.powi(2)).abs() < 1e-9);

    let expected_total = 1000.0 + 100.0 / 1.10_f64.powi(2);
    assert!((result.total_discounted_wlc - expected_total).abs() < 1e-9);
}

#[test]
fn test_discounted_total_equals_series_sum() {
    let (facts, components, mut project) = reference_inputs();
    project.discount_schedule.insert(5, 0.08);
    let result = distribute(&facts, &components, &project, &config()).unwrap();

    let series_sum: f64 = result.cash_flow.iter().map(|y| y.discounted).sum();
    assert!((series_sum - result.total_discounted_wlc).abs() < 1e-9);
}

#[test]
fn test_replacement_years_exact_divisibility() {
    // 10-year horizon, 5-year lifespan: the year-10 multiple is excluded.
    assert_eq!(replacement_years(5, 10), vec![5]);
    // Non-divisible: floor(10/3) = 3 events.
    assert_eq!(replacement_years(3, 10), vec![3, 6, 9]);
    // Lifespan at or beyond the horizon: no replacements.
    assert_eq!(replacement_years(10, 10), Vec::<u32>::new());
    assert_eq!(replacement_years(60, 10), Vec::<u32>::new());
}

#[test]
fn test_operation_years() {
    assert_eq!(operation_years(10), 9);
    assert_eq!(operation_years(1), 0);
    assert_eq!(operation_years(0), 0);
}

#[test]
fn test_default_lifespan_applies_when_absent() {
    // 120-year horizon, no recorded lifespan: default of 60 gives one
    // replacement (year 60; year 120 is demolition).
    let facts = vec![CostFact::new("c1", CostKind::Maintenance, 500.0)];
    let components = component_map(vec![component("c1", None)]);
    let project = Project::new(120);

    let result = distribute(&facts, &components, &project, &config()).unwrap();
    assert_eq!(result.cash_flow[60].breakdown.maintenance, 500.0);
    assert_eq!(result.components[&ComponentId::new("c1")].total, 500.0);
}

#[test]
fn test_zero_horizon_degenerates_to_single_year() {
    let facts = vec![
        CostFact::new("c1", CostKind::Construction, 1000.0),
        CostFact::new("c1", CostKind::Operation, 100.0),
        CostFact::new("c1", CostKind::Maintenance, 200.0),
        CostFact::new("c1", CostKind::EndOfLife, 50.0),
    ];
    let components = component_map(vec![component("c1", Some(5))]);
    let project = Project::new(0);

    let result = distribute(&facts, &components, &project, &config()).unwrap();

    assert_eq!(result.cash_flow.len(), 1);
    assert_eq!(result.cash_flow[0].breakdown.construction, 1000.0);
    assert_eq!(result.cash_flow[0].breakdown.end_of_life, 50.0);
    assert_eq!(result.cash_flow[0].breakdown.operation, 0.0);
    assert_eq!(result.cash_flow[0].breakdown.maintenance, 0.0);
    assert_eq!(result.total_nominal_wlc, 1050.0);
}

#[test]
fn test_component_without_facts_contributes_zero() {
    let facts = vec![CostFact::new("c1", CostKind::Construction, 1000.0)];
    let components = component_map(vec![component("c1", None), component("c2", None)]);
    let project = Project::new(10);

    let result = distribute(&facts, &components, &project, &config()).unwrap();
    assert_eq!(result.components[&ComponentId::new("c2")].total, 0.0);
    assert_eq!(result.components.len(), 2);
}

#[test]
fn test_negative_nominal_rejected() {
    let facts = vec![CostFact::new("c1", CostKind::Construction, -1.0)];
    let components = component_map(vec![component("c1", None)]);

    let result = distribute(&facts, &components, &Project::new(10), &config());
    assert!(matches!(
        result,
        Err(EngineError::InvalidNominalValue { .. })
    ));
}

#[test]
fn test_non_finite_nominal_rejected() {
    let facts = vec![CostFact::new("c1", CostKind::Operation, f64::NAN)];
    let components = component_map(vec![component("c1", None)]);

    let result = distribute(&facts, &components, &Project::new(10), &config());
    assert!(matches!(
        result,
        Err(EngineError::InvalidNominalValue { .. })
    ));
}

#[test]
fn test_duplicate_fact_rejected_not_summed() {
    let facts = vec![
        CostFact::new("c1", CostKind::Construction, 1000.0),
        CostFact::new("c1", CostKind::Construction, 500.0),
    ];
    let components = component_map(vec![component("c1", None)]);

    let result = distribute(&facts, &components, &Project::new(10), &config());
    assert!(matches!(result, Err(EngineError::DuplicateFact { .. })));
}

#[test]
fn test_unknown_component_rejected() {
    let facts = vec![CostFact::new("ghost", CostKind::Construction, 1.0)];
    let components = component_map(vec![component("c1", None)]);

    let result = distribute(&facts, &components, &Project::new(10), &config());
    assert!(matches!(result, Err(EngineError::UnknownComponent { .. })));
}

#[test]
fn test_zero_lifespan_rejected() {
    let facts = vec![CostFact::new("c1", CostKind::Maintenance, 100.0)];
    let components = component_map(vec![component("c1", Some(0))]);

    let result = distribute(&facts, &components, &Project::new(10), &config());
    assert!(matches!(result, Err(EngineError::InvalidLifespan { .. })));
}

#[test]
fn test_deterministic_output() {
    let (facts, components, project) = reference_inputs();
    let a = distribute(&facts, &components, &project, &config()).unwrap();
    let b = distribute(&facts, &components, &project, &config()).unwrap();

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_weighted_discount_rate() {
    let facts = vec![
        CostFact::new("c1", CostKind::Construction, 300.0),
        CostFact::new("c1", CostKind::EndOfLife, 100.0),
    ];
    let components = component_map(vec![component("c1", None)]);
    let mut project = Project::new(1);
    project.discount_schedule.insert(1, 0.07);

    let result = distribute(&facts, &components, &project, &config()).unwrap();

    // Year 0 carries 300 at 3%, year 1 carries 100 at 7%.
    let expected = (0.03 * 300.0 + 0.07 * 100.0) / 400.0;
    assert!((result.weighted_discount_rate - expected).abs() < 1e-12);
}
