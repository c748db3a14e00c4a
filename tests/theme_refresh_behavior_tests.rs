use std::cell::RefCell;
use std::rc::Rc;

use dashboard_rs::api::{
    DashboardEngine, DashboardEngineConfig, DashboardSection, ThemeListener, ThemeMode,
    ThemePalette, slots,
};
use dashboard_rs::core::PredictionInput;
use dashboard_rs::render::NullBackend;
use dashboard_rs::resolver::DataSourceResolver;

fn overview_engine() -> DashboardEngine<NullBackend> {
    let backend = NullBackend::with_surfaces(DashboardSection::Overview.slot_ids().iter().copied());
    DashboardEngine::new(
        backend,
        DataSourceResolver::new(),
        DashboardEngineConfig::new(),
    )
}

#[test]
fn switching_theme_rebuilds_every_known_chart() {
    let mut engine = overview_engine();
    engine
        .activate_section(DashboardSection::Overview)
        .expect("activation");
    let created_before = engine.backend().created.len();

    let changed = engine.set_theme(ThemeMode::Light).expect("set theme");
    assert!(changed);
    assert_eq!(engine.backend().created.len(), created_before + 4);

    let light_text = ThemePalette::for_mode(ThemeMode::Light).text;
    for slot_id in DashboardSection::Overview.slot_ids() {
        let config = engine.backend().last_config_for(slot_id).expect("config");
        assert_eq!(config.text_color, light_text, "slot {slot_id}");
    }
}

#[test]
fn setting_the_current_mode_renders_nothing() {
    let mut engine = overview_engine();
    engine
        .activate_section(DashboardSection::Overview)
        .expect("activation");
    let created_before = engine.backend().created.len();

    let changed = engine.set_theme(ThemeMode::Dark).expect("set theme");
    assert!(!changed);
    assert_eq!(engine.backend().created.len(), created_before);
}

#[test]
fn toggling_twice_returns_to_the_initial_mode() {
    let mut engine = overview_engine();
    assert_eq!(engine.toggle_theme().expect("first toggle"), ThemeMode::Light);
    assert_eq!(engine.toggle_theme().expect("second toggle"), ThemeMode::Dark);
    assert_eq!(engine.theme_mode(), ThemeMode::Dark);
}

#[test]
fn initial_theme_comes_from_the_engine_config() {
    let backend = NullBackend::default();
    let config = DashboardEngineConfig::new().with_initial_theme(ThemeMode::Light);
    let engine = DashboardEngine::new(backend, DataSourceResolver::new(), config);
    assert_eq!(engine.theme_mode(), ThemeMode::Light);
}

#[test]
fn gauge_recolors_when_the_theme_flips() {
    let backend = NullBackend::with_surfaces([slots::GAUGE]);
    let mut engine = DashboardEngine::new(
        backend,
        DataSourceResolver::new(),
        DashboardEngineConfig::new(),
    );
    let input = PredictionInput {
        income: 80_000.0,
        time_on_website: 25.0,
        brand: "iPhone".to_owned(),
        ..PredictionInput::default()
    };
    engine.submit_prediction(&input).expect("prediction");
    let dark_accent = engine
        .backend()
        .last_config_for(slots::GAUGE)
        .expect("gauge config")
        .palette[0];

    engine.set_theme(ThemeMode::Light).expect("set theme");
    let light_config = engine
        .backend()
        .last_config_for(slots::GAUGE)
        .expect("gauge config");
    assert_ne!(light_config.palette[0], dark_accent);
    assert!(
        (light_config.values[0]
            - engine
                .last_prediction()
                .and_then(|result| result.payload.as_prediction())
                .expect("cached prediction")
                .probability
                * 100.0)
            .abs()
            <= 1e-9,
        "re-theming must not change the plotted value"
    );
}

struct RecordingListener {
    id: String,
    seen: Rc<RefCell<Vec<ThemeMode>>>,
}

impl ThemeListener for RecordingListener {
    fn id(&self) -> &str {
        &self.id
    }

    fn theme_changed(&mut self, mode: ThemeMode, _palette: &ThemePalette) {
        self.seen.borrow_mut().push(mode);
    }
}

#[test]
fn listeners_hear_engine_driven_transitions() {
    let mut engine = overview_engine();
    let seen = Rc::new(RefCell::new(Vec::new()));
    engine
        .theme_mut()
        .register_listener(Box::new(RecordingListener {
            id: "banner".to_owned(),
            seen: seen.clone(),
        }))
        .expect("register listener");

    engine.set_theme(ThemeMode::Light).expect("to light");
    engine.set_theme(ThemeMode::Light).expect("same mode");
    engine.toggle_theme().expect("back to dark");

    assert_eq!(*seen.borrow(), vec![ThemeMode::Light, ThemeMode::Dark]);
    assert!(engine.theme().has_listener("banner"));
    assert!(engine.theme_mut().unregister_listener("banner"));
}
