use dashboard_rs::api::ChartRegistry;
use dashboard_rs::render::{ChartConfig, ChartKind, Color, NullBackend, RenderOutcome};

fn bar_config(value: f64) -> ChartConfig {
    ChartConfig::new(
        ChartKind::Bar,
        Color::from_rgb8(0xe2, 0xe8, 0xf0),
        Color::rgba(1.0, 1.0, 1.0, 0.1),
    )
    .with_series(
        vec!["yes".to_owned(), "no".to_owned()],
        vec![value, 100.0 - value],
    )
}

#[test]
fn repeated_renders_never_stack_instances() {
    let mut backend = NullBackend::with_surfaces(["slot-a"]);
    let mut registry = ChartRegistry::new();

    for value in [10.0, 20.0, 30.0] {
        let outcome = registry
            .render(&mut backend, "slot-a", bar_config(value))
            .expect("render");
        assert!(matches!(outcome, RenderOutcome::Rendered(_)));
    }

    assert_eq!(registry.chart_count(), 1);
    assert_eq!(backend.live_count_in_slot("slot-a"), 1);
    assert_eq!(backend.created.len(), 3);
    assert_eq!(backend.disposed.len(), 2);
    let latest = backend.last_config_for("slot-a").expect("config");
    assert!((latest.values[0] - 30.0).abs() <= 1e-9);
}

#[test]
fn absent_surface_remembers_config_for_later() {
    let mut backend = NullBackend::default();
    let mut registry = ChartRegistry::new();

    let outcome = registry
        .render(&mut backend, "slot-a", bar_config(42.0))
        .expect("render");
    assert_eq!(outcome, RenderOutcome::SurfaceAbsent);
    assert!(!registry.has_chart("slot-a"));
    assert!(registry.last_config_for("slot-a").is_some());
    assert!(backend.created.is_empty());

    backend.attach_surface("slot-a");
    let rendered = registry
        .refresh_all(&mut backend, |_, config| config)
        .expect("refresh");
    assert_eq!(rendered, 1);
    assert!(registry.has_chart("slot-a"));
}

#[test]
fn refresh_all_applies_the_mapping_to_every_slot() {
    let mut backend = NullBackend::with_surfaces(["slot-a", "slot-b"]);
    let mut registry = ChartRegistry::new();
    registry
        .render(&mut backend, "slot-a", bar_config(10.0))
        .expect("render a");
    registry
        .render(&mut backend, "slot-b", bar_config(20.0))
        .expect("render b");

    let new_text = Color::from_rgb8(0x33, 0x33, 0x33);
    let rendered = registry
        .refresh_all(&mut backend, |_, mut config| {
            config.text_color = new_text;
            config
        })
        .expect("refresh");
    assert_eq!(rendered, 2);
    for slot_id in ["slot-a", "slot-b"] {
        let config = backend.last_config_for(slot_id).expect("config");
        assert_eq!(config.text_color, new_text);
    }
}

#[test]
fn dispose_keeps_the_remembered_config() {
    let mut backend = NullBackend::with_surfaces(["slot-a"]);
    let mut registry = ChartRegistry::new();
    registry
        .render(&mut backend, "slot-a", bar_config(55.0))
        .expect("render");

    assert!(registry.dispose(&mut backend, "slot-a"));
    assert!(!registry.dispose(&mut backend, "slot-a"), "second dispose is a no-op");
    assert!(!registry.has_chart("slot-a"));
    assert_eq!(backend.live_count(), 0);
    assert!(registry.last_config_for("slot-a").is_some());

    let rendered = registry
        .refresh_all(&mut backend, |_, config| config)
        .expect("refresh");
    assert_eq!(rendered, 1, "remembered config restores the chart");
}

#[test]
fn dispose_all_clears_every_live_instance() {
    let mut backend = NullBackend::with_surfaces(["slot-a", "slot-b", "slot-c"]);
    let mut registry = ChartRegistry::new();
    for slot_id in ["slot-a", "slot-b", "slot-c"] {
        registry
            .render(&mut backend, slot_id, bar_config(5.0))
            .expect("render");
    }
    assert_eq!(registry.chart_count(), 3);

    registry.dispose_all(&mut backend);
    assert_eq!(registry.chart_count(), 0);
    assert_eq!(backend.live_count(), 0);
    assert_eq!(backend.disposed.len(), 3);
}
