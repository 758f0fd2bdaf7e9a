#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for `MapSession` mounting and interaction.

use std::cell::RefCell;
use std::future::Future;

use geo::Coord;
use poimap_core::layer::{ICON_LAYER_ID, LABEL_LAYER_ID, POI_SOURCE_ID};
use poimap_core::style::{BASE_ICON, DUAL_SCRIPT_ICON};
use poimap_core::test_support::{CountingFactory, StubIconLoader, StubPoiSource};
use poimap_core::{
    CameraCommand, ClickEvent, LoadError, MapOptions, MapSession, MapSurface, MountOutcome,
    PoiRecord, StyleDocument, Tier,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct World {
    source: StubPoiSource,
    loader: StubIconLoader,
    factory: CountingFactory,
    session: MapSession<StyleDocument>,
    outcomes: Vec<MountOutcome>,
}

impl World {
    fn surface(&self) -> &StyleDocument {
        self.session.surface().expect("map should be mounted")
    }
}

#[fixture]
fn world() -> RefCell<World> {
    RefCell::new(World {
        source: StubPoiSource::with_records(Vec::new()),
        loader: StubIconLoader::new(),
        factory: CountingFactory::default(),
        session: MapSession::new(MapOptions::default()),
        outcomes: Vec::new(),
    })
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime")
        .block_on(future)
}

fn mount(world: &mut World) {
    let World {
        source,
        loader,
        factory,
        session,
        outcomes,
    } = world;
    let outcome = block_on(session.mount(factory, &*source, &*loader)).expect("mount should run");
    outcomes.push(outcome);
}

#[given("a dataset of colleges spanning the bay")]
fn bay_dataset(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().source = StubPoiSource::with_records(vec![
        PoiRecord {
            tier: Tier::new(0),
            ..PoiRecord::new("Harbour College", Coord { x: 113.9, y: 22.5 })
        },
        PoiRecord::new("Hillside Institute", Coord { x: 114.0, y: 22.6 }),
        PoiRecord {
            tier: Tier::new(2),
            ..PoiRecord::new("Riverside Academy", Coord { x: 114.1, y: 22.7 })
        },
    ]);
}

#[given("a dataset that cannot be fetched")]
fn unreachable_dataset(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().source = StubPoiSource::failing(LoadError::Fetch {
        url: "http://localhost:8080/data/college.json".into(),
        status: None,
        message: "connection refused".into(),
    });
}

#[given("a dataset holding one college without contact details")]
fn sparse_dataset(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().source = StubPoiSource::with_records(vec![PoiRecord::new(
        "Quiet Campus",
        Coord { x: 114.02, y: 22.58 },
    )]);
}

#[when("the map is mounted")]
fn mount_once(#[from(world)] world: &RefCell<World>) {
    mount(&mut world.borrow_mut());
}

#[when("the map is mounted twice")]
fn mount_twice(#[from(world)] world: &RefCell<World>) {
    let mut state = world.borrow_mut();
    mount(&mut state);
    mount(&mut state);
}

#[when("the college icon is clicked")]
fn click_college(#[from(world)] world: &RefCell<World>) {
    let mut state = world.borrow_mut();
    let features = state
        .surface()
        .source_data(POI_SOURCE_ID)
        .map(|data| data.features.clone())
        .unwrap_or_default();
    let response = state
        .session
        .dispatch_click(&ClickEvent::new(ICON_LAYER_ID, features));
    assert!(response.is_some(), "click should be handled");
}

#[then("both symbol layers read from the POI source")]
fn layers_bound(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    let surface = state.surface();
    let ids: Vec<_> = surface.layers.iter().map(|layer| layer.id).collect();
    assert_eq!(ids, [ICON_LAYER_ID, LABEL_LAYER_ID]);
    assert!(surface.layers.iter().all(|layer| layer.source == POI_SOURCE_ID));
    assert_eq!(
        surface.source_data(POI_SOURCE_ID).map(|data| data.len()),
        Some(3)
    );
}

#[then("the camera fits the bay")]
fn camera_fits(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    let [CameraCommand::FitBounds(fit)] = state.surface().camera.as_slice() else {
        panic!("expected a single fit, got {:?}", state.surface().camera);
    };
    assert_eq!(fit.bounds, [[113.9, 22.5], [114.1, 22.7]]);
    assert_eq!(fit.padding, 5);
    assert_eq!(fit.max_zoom, 17.0);
}

#[then("both icons are registered")]
fn icons_registered(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    assert!(state.surface().has_image(BASE_ICON));
    assert!(state.surface().has_image(DUAL_SCRIPT_ICON));
}

#[then("exactly one map surface exists")]
fn one_surface(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    assert_eq!(state.factory.created(), 1);
    assert_eq!(state.outcomes.last(), Some(&MountOutcome::AlreadyMounted));
    assert_eq!(state.surface().layers.len(), 2);
}

#[then("the dataset was fetched once")]
fn fetched_once(#[from(world)] world: &RefCell<World>) {
    assert_eq!(world.borrow().source.calls(), 1);
}

#[then("no symbol layers are declared")]
fn no_layers(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    assert!(state.surface().layers.is_empty());
    assert!(matches!(
        state.outcomes.as_slice(),
        [MountOutcome::Empty(LoadError::Fetch { .. })]
    ));
}

#[then("the camera is left alone")]
fn camera_untouched(#[from(world)] world: &RefCell<World>) {
    assert!(world.borrow().surface().camera.is_empty());
}

#[then("the popup shows a placeholder for every detail")]
fn popup_placeholders(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    let popup = state.surface().popups.first().expect("a popup");
    for label in ["Email", "Phone", "Address", "Guide"] {
        let row = format!("<div><span>{label}: </span>-</div>");
        assert!(popup.html.contains(&row), "missing placeholder for {label}");
    }
    assert!(popup.html.contains("Quiet Campus"));
}

#[then("the camera flies to the college")]
fn camera_flies(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    let Some(CameraCommand::FlyTo(fly)) = state.surface().camera.last() else {
        panic!("expected a flight, got {:?}", state.surface().camera);
    };
    assert_eq!(fly.center, [114.02, 22.58]);
    assert_eq!(fly.zoom, 12.0);
}

#[scenario(path = "tests/features/pipeline.feature", index = 0)]
fn rendering_fits_camera(world: RefCell<World>) {
    let _ = world;
}

#[scenario(path = "tests/features/pipeline.feature", index = 1)]
fn mounting_twice(world: RefCell<World>) {
    let _ = world;
}

#[scenario(path = "tests/features/pipeline.feature", index = 2)]
fn failed_fetch(world: RefCell<World>) {
    let _ = world;
}

#[scenario(path = "tests/features/pipeline.feature", index = 3)]
fn click_without_details(world: RefCell<World>) {
    let _ = world;
}
