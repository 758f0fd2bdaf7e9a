//! Focused unit tests covering render configuration and document output.

use super::helpers::{Workspace, block_on, unreachable_base_url, write_utf8};
use super::*;
use crate::render::{DataInput, RenderConfig, render_document, write_document};
use poimap_core::CameraCommand;
use poimap_core::layer::POI_SOURCE_ID;
use poimap_core::style::{BASE_ICON, DUAL_SCRIPT_ICON};
use poimap_data::{DEFAULT_BASE_URL, DEFAULT_DATASET};
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn local_config(workspace: &Workspace) -> RenderConfig {
    RenderConfig {
        base_url: unreachable_base_url(),
        input: DataInput::File(workspace.data_file()),
        icon_dir: Some(workspace.icon_dir()),
        access_token: None,
        output: None,
    }
}

#[rstest]
fn converting_without_options_targets_the_default_server() {
    let config = RenderConfig::try_from(RenderArgs::default()).expect("config should build");
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(
        config.input,
        DataInput::Http {
            dataset: DEFAULT_DATASET.to_owned()
        }
    );
    assert!(config.icon_dir.is_none());
    assert!(config.output.is_none());
}

#[rstest]
fn data_file_takes_precedence_over_dataset() {
    let args = RenderArgs {
        dataset: Some("hospital".into()),
        data_file: Some("college.json".into()),
        ..RenderArgs::default()
    };
    let config = RenderConfig::try_from(args).expect("config should build");
    assert_eq!(config.input, DataInput::File("college.json".into()));
}

#[rstest]
fn access_token_reaches_map_options() {
    let args = RenderArgs {
        access_token: Some("pk.test".into()),
        ..RenderArgs::default()
    };
    let config = RenderConfig::try_from(args).expect("config should build");
    assert_eq!(config.map_options().access_token.as_deref(), Some("pk.test"));
}

#[rstest]
fn validate_sources_reports_missing_data_file(workspace: Workspace) {
    let config = local_config(&workspace);
    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_DATA_FILE);
            assert_eq!(path, workspace.data_file());
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_icon_dir_that_is_a_file(workspace: Workspace) {
    workspace.write_dataset();
    write_utf8(&workspace.icon_dir(), b"not a directory");
    let err = local_config(&workspace)
        .validate_sources()
        .expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_ICON_DIR),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_accepts_existing_inputs(workspace: Workspace) {
    workspace.write_dataset();
    workspace.write_icons();
    local_config(&workspace)
        .validate_sources()
        .expect("inputs exist");
}

#[rstest]
fn rendering_local_inputs_builds_the_full_document(workspace: Workspace) {
    workspace.write_dataset();
    workspace.write_icons();

    let document = block_on(render_document(&local_config(&workspace))).expect("render");

    let features = document
        .source_data(POI_SOURCE_ID)
        .expect("source should be bound");
    assert_eq!(features.len(), 3);
    assert_eq!(document.layers.len(), 2);
    assert_eq!(document.images.get(BASE_ICON), Some(&4));
    assert_eq!(document.images.get(DUAL_SCRIPT_ICON), Some(&4));
    match document.camera.as_slice() {
        [CameraCommand::FitBounds(fit)] => {
            assert_eq!(fit.bounds, [[113.9, 22.5], [114.1, 22.7]]);
        }
        other => panic!("expected a single fit, found {other:?}"),
    }
}

#[rstest]
fn missing_icons_still_render_layers(workspace: Workspace) {
    workspace.write_dataset();
    poimap_fs::write_bytes(&workspace.icon_dir().join("unrelated.txt"), b"x")
        .expect("create icon dir");

    let document = block_on(render_document(&local_config(&workspace))).expect("render");

    assert_eq!(document.layers.len(), 2);
    assert!(document.images.is_empty());
}

#[rstest]
fn unreachable_server_renders_an_empty_document(workspace: Workspace) {
    workspace.write_icons();
    let config = RenderConfig {
        input: DataInput::Http {
            dataset: DEFAULT_DATASET.to_owned(),
        },
        ..local_config(&workspace)
    };

    let document = block_on(render_document(&config)).expect("render");

    assert!(document.layers.is_empty());
    assert!(document.camera.is_empty());
    assert!(document.sources.is_empty());
}

#[rstest]
fn written_document_is_pretty_json_with_trailing_newline(workspace: Workspace) {
    workspace.write_dataset();
    workspace.write_icons();
    let document = block_on(render_document(&local_config(&workspace))).expect("render");

    let mut buffer = Vec::new();
    write_document(&mut buffer, &document).expect("write");

    let text = String::from_utf8(buffer).expect("utf-8 output");
    assert!(text.ends_with("}\n"));
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    assert_eq!(value["options"]["container"], "map");
    assert!(value["options"].get("accessToken").is_none());
}

#[rstest]
fn access_token_is_written_for_the_host_page(workspace: Workspace) {
    workspace.write_dataset();
    workspace.write_icons();
    let config = RenderConfig {
        access_token: Some("pk.test".into()),
        ..local_config(&workspace)
    };
    let document = block_on(render_document(&config)).expect("render");

    let mut buffer = Vec::new();
    write_document(&mut buffer, &document).expect("write");

    let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid JSON");
    assert_eq!(value["options"]["accessToken"], "pk.test");
}
