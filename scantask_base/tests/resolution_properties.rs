//! End-to-end resolution of loader-built task trees.

use assert_matches::assert_matches;
use scantask_base::prelude::*;
use scantask_base::resolution::translators::tokens;
use scantask_compiler::loader::TaskLoader;
use serde_json::{json, Value as Json};

const VENDOR: &str = "211a1e90-11e1-11e5-9493-1697f925ec7b";

fn load(document: Json) -> Task {
    TaskLoader::new().load_value(&document).unwrap()
}

fn resolve(document: Json) -> Result<TaskResolution, ResolutionError> {
    TaskResolutionEngine::new(VENDOR).resolve_task(&load(document))
}

/// Configure task with one stream, one flatbed source and one attribute
fn single_attribute(attribute: &str, values: Json) -> Json {
    json!({
        "actions": [{
            "action": "configure",
            "streams": [{
                "sources": [{
                    "source": "flatbed",
                    "pixelFormats": [{
                        "pixelFormat": "rgb24",
                        "attributes": [{ "attribute": attribute, "values": values }]
                    }]
                }]
            }]
        }]
    })
}

const BASELINE: &str = " --source=Flatbed --batch=img%06d.pnm --mode=Color";

#[test]
fn test_missing_or_empty_actions_are_malformed() {
    let mut engine = TaskResolutionEngine::new(VENDOR);

    for document in [json!({}), json!({ "actions": [] })] {
        let task = load(document);
        assert_matches!(
            engine.resolve_task(&task),
            Err(ResolutionError::MalformedInput { .. })
        );
    }
    assert_matches!(engine.resolve(None), Err(ResolutionError::MalformedInput { .. }));
}

#[test]
fn test_foreign_value_is_never_emitted() {
    let resolution = resolve(single_attribute(
        "resolution",
        json!([
            { "value": "600", "vendor": "someone-else" },
            { "value": "300", "vendor": VENDOR }
        ]),
    ))
    .unwrap();

    assert!(resolution.arguments.contains(" --resolution=300"));
    assert!(!resolution.arguments.contains("600"));
    assert_eq!(resolution.resolution, Some(300));
}

#[test]
fn test_fail_policy_reports_value_path() {
    let error = resolve(single_attribute(
        "autocrop",
        json!([{ "value": "sometimes", "exception": "fail" }]),
    ))
    .unwrap_err();

    assert_eq!(
        error.path(),
        "actions[0].streams[0].sources[0].pixelFormats[0].attributes[0].values[0]"
    );
    assert_eq!(error.literal(), Some("sometimes"));
    assert_eq!(error.severity_code(), 1);
}

#[test]
fn test_ignore_policy_leaves_arguments_unchanged() {
    let resolution = resolve(single_attribute(
        "autocrop",
        json!([{ "value": "sometimes", "exception": "ignore" }]),
    ))
    .unwrap();

    assert_eq!(resolution.arguments, BASELINE);
    assert_eq!(
        resolution.task.actions[0].status,
        ActionStatus::SuccessIgnore
    );
    let format = &resolution.task.actions[0].streams[0].sources[0].pixel_formats[0];
    assert!(format.auto_crop.is_none());
}

#[test]
fn test_ignored_candidate_before_valid_one_still_marks_action() {
    let resolution = resolve(single_attribute(
        "autocrop",
        json!([
            { "value": "maybe", "exception": "ignore" },
            { "value": "no" }
        ]),
    ))
    .unwrap();

    assert_eq!(resolution.arguments, format!("{} --autocrop=no", BASELINE));
    assert_eq!(
        resolution.task.actions[0].status,
        ActionStatus::SuccessIgnore
    );

    let format = &resolution.task.actions[0].streams[0].sources[0].pixel_formats[0];
    let auto_crop = format.auto_crop.as_ref().unwrap();
    assert_eq!(auto_crop.values.len(), 1);
    assert_eq!(auto_crop.values[0].literal(), "no");
}

#[test]
fn test_brightness_and_contrast_scaling() {
    for (literal, expected) in [
        ("0", "-100"),
        ("50", "0"),
        ("100", "100"),
        ("dim", "0"),
        ("12.5", "0"),
    ] {
        let brightness =
            resolve(single_attribute("brightness", json!([{ "value": literal }]))).unwrap();
        assert_eq!(
            brightness.arguments,
            format!("{} --brightness={}", BASELINE, expected)
        );

        let contrast =
            resolve(single_attribute("contrast", json!([{ "value": literal }]))).unwrap();
        assert_eq!(
            contrast.arguments,
            format!("{} --contrast={}", BASELINE, expected)
        );
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let document = json!({
        "actions": [{
            "action": "configure",
            "streams": [{
                "sources": [{
                    "source": "feeder",
                    "pixelFormats": [{
                        "pixelFormat": "gray8",
                        "attributes": [
                            { "attribute": "resolution", "values": [{ "value": "200" }, { "value": "300" }] },
                            { "attribute": "brightness", "values": [{ "value": "70" }] },
                            { "attribute": "gamma", "values": [{ "value": "2" }] }
                        ]
                    }, {
                        "pixelFormat": "bw1"
                    }]
                }]
            }]
        }, {
            "action": "scan"
        }]
    });
    let task = load(document);

    let first = TaskResolutionEngine::new(VENDOR).resolve_task(&task).unwrap();
    let second = TaskResolutionEngine::new(VENDOR).resolve_task(&task).unwrap();

    assert_eq!(first.arguments.as_bytes(), second.arguments.as_bytes());
    assert_eq!(first.task, second.task);
}

#[test]
fn test_image_count() {
    let unlimited = resolve(single_attribute("imagecount", json!([{ "value": "0" }]))).unwrap();
    assert_eq!(
        unlimited.arguments,
        format!("{} --batch-count=32767", BASELINE)
    );

    let five = resolve(single_attribute("imagecount", json!([{ "value": "5" }]))).unwrap();
    assert_eq!(five.arguments, format!("{} --batch-count=5", BASELINE));
}

#[test]
fn test_stream_fallback_uses_only_second_stream() {
    let resolution = resolve(json!({
        "actions": [{
            "action": "configure",
            "streams": [{
                "sources": [{
                    "source": "feeder",
                    "exception": "nextStream",
                    "pixelFormats": [{
                        "pixelFormat": "rgb24",
                        "attributes": [{ "attribute": "resolution", "values": [{ "value": "maximum" }] }]
                    }]
                }]
            }, {
                "sources": [{
                    "source": "flatbed",
                    "pixelFormats": [{
                        "pixelFormat": "gray8",
                        "attributes": [{ "attribute": "resolution", "values": [{ "value": "150" }] }]
                    }]
                }]
            }]
        }]
    }))
    .unwrap();

    assert_eq!(
        resolution.arguments,
        " --source=Flatbed --batch=img%06d.pnm --mode=Gray --resolution=150"
    );
    assert!(!resolution.arguments.contains(tokens::SOURCE_ADF));
    assert!(!resolution.arguments.contains(tokens::MODE_COLOR));

    let action = &resolution.task.actions[0];
    assert_eq!(action.status, ActionStatus::Success);
    assert_eq!(action.streams.len(), 1);
    assert_eq!(action.streams[0].sources[0].source, "flatbed");
    assert_eq!(resolution.resolution, Some(150));
}

#[test]
fn test_unknown_source_is_staged_but_not_descended() {
    let resolution = resolve(json!({
        "actions": [{
            "action": "configure",
            "streams": [{
                "sources": [
                    { "source": "camera", "pixelFormats": [{ "pixelFormat": "rgb24" }] },
                    { "source": "any" }
                ]
            }]
        }]
    }))
    .unwrap();

    assert_eq!(
        resolution.arguments,
        " --source=invalid --source=Auto --batch=img%06d.pnm"
    );
    assert_eq!(
        resolution.task.actions[0].status,
        ActionStatus::SuccessIgnore
    );
    assert_eq!(resolution.task.actions[0].streams[0].sources.len(), 1);
}

#[test]
fn test_processor_keeps_last_resolution_per_instance() {
    let task = single_attribute("resolution", json!([{ "value": "600" }])).to_string();

    let mut processor = TaskProcessor::with_config(ProcessorConfig::new(VENDOR));
    assert!(processor.process_str(&task).is_success());
    assert!(processor
        .process_str(r#"{"actions":[{"action":"scan"}]}"#)
        .is_success());

    assert_eq!(processor.engine().last_resolution(), Some(600));
    assert_eq!(TaskProcessor::new().engine().last_resolution(), None);
}
