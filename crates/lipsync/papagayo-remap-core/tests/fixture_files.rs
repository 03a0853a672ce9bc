use papagayo_remap_core::{
    build_plan, load_plan, parse_document, Config, PhonemeSet, RemapError, UnresolvedPolicy,
};
use papagayo_test_fixtures::{configs, papagayo};

fn frames(plan: &papagayo_remap_core::RemapPlan) -> Vec<u32> {
    plan.timeline.keyframes.iter().map(|k| k.frame).collect()
}

fn shapes(plan: &papagayo_remap_core::RemapPlan) -> Vec<i32> {
    plan.timeline.keyframes.iter().map(|k| k.shape).collect()
}

#[test]
fn hello_parses_with_header_and_words_skipped() {
    let doc = parse_document(&papagayo::text("hello").unwrap()).unwrap();
    assert_eq!(doc.header.frame_rate.get(), 24.0);
    assert_eq!(doc.header.total_frames, 48);
    assert_eq!(doc.header.sound_path.as_deref(), Some("sounds/hello.wav"));
    assert_eq!(doc.events.len(), 8);
}

#[test]
fn hello_plan_from_path() {
    let plan = load_plan(papagayo::path("hello").unwrap(), &Config::default()).unwrap();
    assert_eq!(plan.name, "hello");
    assert_eq!(plan.duration_seconds, 2.0);
    assert_eq!(frames(&plan), vec![0, 3, 6, 10, 15, 19, 23, 27]);
    assert_eq!(shapes(&plan), vec![7, 1, 4, 6, 9, 6, 4, 7]);
    assert!(!plan.timeline.needs_frame_zero_fixup);
}

#[test]
fn unordered_file_is_sorted_and_duplicate_frame_is_last_write() {
    let raw = papagayo::text("unordered").unwrap();
    let plan = build_plan("unordered", &raw, &Config::default()).unwrap();
    assert_eq!(frames(&plan), vec![4, 12, 21, 30, 38]);
    // frame 21 has L then etc; etc wins
    assert_eq!(shapes(&plan), vec![6, 1, 2, 6, 7]);
    assert!(plan.timeline.needs_frame_zero_fixup);
}

#[test]
fn unknown_token_file_reports_one_warning() {
    let raw = papagayo::text("unknown-token").unwrap();
    let plan = build_plan("unknown", &raw, &Config::default()).unwrap();
    assert_eq!(plan.timeline.warnings.len(), 1);
    assert_eq!(plan.timeline.warnings[0].frame, 8);
    assert_eq!(plan.timeline.warnings[0].phoneme, "ZZ");
    assert_eq!(shapes(&plan), vec![7, 10, -1, 2, 7]);
    assert_eq!(plan.sound_path, None);
}

#[test]
fn base_set_does_not_know_th() {
    let raw = papagayo::text("unknown-token").unwrap();
    let cfg = Config {
        phoneme_set: PhonemeSet::PrestonBlair,
        ..Config::default()
    };
    let plan = build_plan("unknown", &raw, &cfg).unwrap();
    assert_eq!(plan.timeline.warnings.len(), 2);
    assert_eq!(plan.strip.len(), 10);
}

#[test]
fn custom_set_with_substitute_from_config_fixture() {
    let cfg: Config = configs::load("custom-set").unwrap();
    assert_eq!(cfg.unresolved, UnresolvedPolicy::Substitute("rest".into()));
    let raw = papagayo::text("unknown-token").unwrap();
    let plan = build_plan("unknown", &raw, &cfg).unwrap();
    // TH and ZZ both fall back to rest and merge into frame 0's run
    assert_eq!(frames(&plan), vec![0, 12, 16]);
    assert_eq!(shapes(&plan), vec![0, 1, 0]);
    assert_eq!(plan.timeline.warnings.len(), 2);
}

#[test]
fn strip_rate_config_changes_values_only() {
    let cfg: Config = configs::load("strip-12fps").unwrap();
    let raw = papagayo::text("hello").unwrap();
    let plan = build_plan("hello", &raw, &cfg).unwrap();
    assert_eq!(plan.target_frame_rate.get(), 12.0);
    assert_eq!(plan.timeline.keyframes[1].time_seconds, 3.0 / 24.0);
    assert_eq!(plan.timeline.keyframes[1].value, 1.0 / 12.0);
}

#[test]
fn crlf_file_parses_cleanly() {
    let raw = papagayo::text("crlf").unwrap();
    let plan = build_plan("crlf", &raw, &Config::default()).unwrap();
    assert_eq!(plan.source_frame_rate.get(), 25.0);
    assert_eq!(plan.sound_path.as_deref(), Some("sounds/win.wav"));
    assert_eq!(shapes(&plan), vec![2, 1, 3]);
    assert!(plan.timeline.warnings.is_empty());
}

#[test]
fn missing_header_is_fatal() {
    let err = load_plan(papagayo::path("missing-header").unwrap(), &Config::default())
        .unwrap_err();
    assert!(matches!(err, RemapError::MissingHeader { line: 3, .. }));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_plan("/nonexistent/nowhere.pgo", &Config::default()).unwrap_err();
    assert_eq!(err.category(), "io");
    assert!(err.to_string().contains("nowhere.pgo"));
}

#[test]
fn every_fixture_keeps_adjacent_values_distinct() {
    for key in papagayo::keys() {
        let raw = papagayo::text(&key).unwrap();
        let Ok(plan) = build_plan(&key, &raw, &Config::default()) else {
            continue;
        };
        for pair in plan.timeline.keyframes.windows(2) {
            assert_ne!(pair[0].value, pair[1].value, "fixture {key}");
        }
    }
}
