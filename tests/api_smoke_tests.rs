use dashboard_rs::api::{
    DashboardEngine, DashboardEngineConfig, DashboardSection, ThemeMode, slots,
};
use dashboard_rs::core::PredictionInput;
use dashboard_rs::render::NullBackend;
use dashboard_rs::resolver::DataSourceResolver;

fn all_slots() -> Vec<&'static str> {
    DashboardSection::ALL
        .iter()
        .flat_map(|section| section.slot_ids().iter().copied())
        .collect()
}

#[test]
fn engine_smoke_flow() {
    let backend = NullBackend::with_surfaces(all_slots());
    let resolver = DataSourceResolver::new();
    let mut engine = DashboardEngine::new(backend, resolver, DashboardEngineConfig::new());

    assert_eq!(engine.theme_mode(), ThemeMode::Dark);
    assert!(!engine.is_demo_mode());

    let status = engine.status();
    let status = status.payload.as_status().expect("status payload");
    assert!(status.is_ok());
    assert_eq!(status.model_info.name, "Random Forest Classifier");
    assert!(engine.is_demo_mode());

    let rendered = engine
        .activate_section(DashboardSection::Overview)
        .expect("overview activation");
    assert_eq!(rendered, 4);
    assert_eq!(engine.active_section(), Some(DashboardSection::Overview));

    let rendered = engine
        .activate_section(DashboardSection::Insights)
        .expect("insights activation");
    assert_eq!(rendered, 4);
    assert_eq!(engine.registry().chart_count(), 8);

    let input = PredictionInput {
        income: 80_000.0,
        time_on_website: 25.0,
        previous_purchases: 3.0,
        marketing_engaged: true,
        search_frequency: 8.0,
        device_age: 3.0,
        brand: "iPhone".to_owned(),
        ..PredictionInput::default()
    };
    let prediction = engine.submit_prediction(&input).expect("prediction");
    assert_eq!(prediction.prediction, 1);
    assert!((prediction.probability - 1.0).abs() <= 1e-9);
    assert_eq!(prediction.message, "Likely to purchase");
    assert_eq!(prediction.brand.as_deref(), Some("iPhone"));
    assert!(engine.registry().has_chart(slots::GAUGE));

    let gauge = engine
        .backend()
        .last_config_for(slots::GAUGE)
        .expect("gauge config");
    assert!((gauge.values[0] - 100.0).abs() <= 1e-9);

    let brands = vec!["Samsung".to_owned(), "iPhone".to_owned(), "Vivo".to_owned()];
    let comparison = engine.compare_brands(&input, &brands).expect("comparison");
    assert_eq!(comparison.results.len(), 3);
    assert_eq!(comparison.results[0].brand, "iPhone");
    assert!(engine.registry().has_chart(slots::COMPARISON));

    let toggled = engine.toggle_theme().expect("theme toggle");
    assert_eq!(toggled, ThemeMode::Light);
    assert_eq!(engine.theme_mode(), ThemeMode::Light);

    engine.dispose_all_charts();
    assert_eq!(engine.registry().chart_count(), 0);
    assert_eq!(engine.backend().live_count(), 0);
}

#[test]
fn activation_skips_slots_without_surfaces() {
    let backend = NullBackend::with_surfaces([slots::PURCHASE_DISTRIBUTION]);
    let resolver = DataSourceResolver::new();
    let mut engine = DashboardEngine::new(backend, resolver, DashboardEngineConfig::new());

    let rendered = engine
        .activate_section(DashboardSection::Overview)
        .expect("overview activation");
    assert_eq!(rendered, 1);
    assert!(engine.registry().has_chart(slots::PURCHASE_DISTRIBUTION));
    assert!(!engine.registry().has_chart(slots::AGE_DISTRIBUTION));
}

#[test]
fn prediction_section_needs_a_submission_before_it_renders() {
    let backend = NullBackend::with_surfaces(all_slots());
    let resolver = DataSourceResolver::new();
    let mut engine = DashboardEngine::new(backend, resolver, DashboardEngineConfig::new());

    let rendered = engine
        .activate_section(DashboardSection::Prediction)
        .expect("prediction activation");
    assert_eq!(rendered, 0, "no gauge without a submitted form");

    let input = PredictionInput {
        brand: "Samsung".to_owned(),
        ..PredictionInput::default()
    };
    engine.submit_prediction(&input).expect("prediction");
    let rendered = engine
        .activate_section(DashboardSection::Prediction)
        .expect("second activation");
    assert_eq!(rendered, 1);
}
