//! Behaviour-driven step definitions driving the render CLI scenarios.

use super::helpers::{Workspace, array_len, unreachable_base_url};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct RenderWorld {
    workspace: Workspace,
    cli_args: RefCell<Vec<String>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RenderWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            cli_args: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn push_flag(&self, flag: &str, value: &str) {
        self.cli_args
            .borrow_mut()
            .extend([format!("--{flag}"), value.to_owned()]);
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["poimap".to_owned(), "render".to_owned()];
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv.extend([
            format!("--{ARG_OUTPUT}"),
            self.workspace.output().as_str().to_owned(),
        ]);
        argv
    }

    fn assert_failure_names(&self, expected: &str) {
        match self.result.borrow().as_ref() {
            Some(Err(CliError::MissingSourceFile { field, .. })) => assert_eq!(*field, expected),
            other => panic!("expected MissingSourceFile for {expected}, found {other:?}"),
        }
    }
}

#[fixture]
fn world() -> RenderWorld {
    RenderWorld::new()
}

#[given("a dataset file listing three located colleges")]
fn dataset_file(#[from(world)] world: &RenderWorld) {
    world.workspace.write_dataset();
    world.push_flag(ARG_DATA_FILE, world.workspace.data_file().as_str());
}

#[given("a data file that does not exist")]
fn missing_data_file(#[from(world)] world: &RenderWorld) {
    world.push_flag(ARG_DATA_FILE, world.workspace.data_file().as_str());
}

#[given("a local icon directory")]
fn icon_directory(#[from(world)] world: &RenderWorld) {
    world.workspace.write_icons();
    world.push_flag(ARG_ICON_DIR, world.workspace.icon_dir().as_str());
}

#[given("an icon directory that does not exist")]
fn missing_icon_directory(#[from(world)] world: &RenderWorld) {
    world.push_flag(ARG_ICON_DIR, world.workspace.icon_dir().as_str());
}

#[given("no dataset server is listening")]
fn no_server(#[from(world)] world: &RenderWorld) {
    world.push_flag(ARG_BASE_URL, &unreachable_base_url());
}

#[when("I run the render command writing to a file")]
fn run_render_command(#[from(world)] world: &RenderWorld) {
    let invocation = world.build_command_line();
    let outcome = Cli::try_parse_from(invocation)
        .map_err(CliError::from)
        .and_then(dispatch);
    *world.result.borrow_mut() = Some(outcome);
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &RenderWorld) {
    match world.result.borrow().as_ref() {
        Some(Ok(())) => {}
        other => panic!("expected success, found {other:?}"),
    }
}

#[then("the document declares both symbol layers")]
fn both_layers(#[from(world)] world: &RenderWorld) {
    let document = world.workspace.read_output();
    assert_eq!(array_len(&document, "layers"), 2);
    assert_eq!(array_len(&document, "clickLayers"), 2);
}

#[then("the document fits the camera once")]
fn fits_once(#[from(world)] world: &RenderWorld) {
    let document = world.workspace.read_output();
    assert_eq!(array_len(&document, "camera"), 1);
    assert_eq!(document["camera"][0]["command"], "fitBounds");
}

#[then("the document declares no symbol layers")]
fn no_layers(#[from(world)] world: &RenderWorld) {
    let document = world.workspace.read_output();
    assert_eq!(array_len(&document, "layers"), 0);
    assert_eq!(array_len(&document, "camera"), 0);
}

#[then("the command fails naming data-file")]
fn fails_on_data_file(#[from(world)] world: &RenderWorld) {
    world.assert_failure_names(ARG_DATA_FILE);
}

#[then("the command fails naming icon-dir")]
fn fails_on_icon_dir(#[from(world)] world: &RenderWorld) {
    world.assert_failure_names(ARG_ICON_DIR);
}

macro_rules! register_render_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/render_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RenderWorld) {
            let _ = world;
        }
    };
}

register_render_scenario!(rendering_local_dataset, "Rendering a local dataset to a file");
register_render_scenario!(
    unreachable_server_writes_empty_map,
    "An unreachable server still writes an empty map"
);
register_render_scenario!(rejecting_missing_data_file, "Rejecting a missing data file");
register_render_scenario!(
    rejecting_missing_icon_directory,
    "Rejecting a missing icon directory"
);
