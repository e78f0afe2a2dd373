//! Concurrency tests for fitcoach.
//!
//! Catalogs are immutable after load, so:
//! - Many threads can match against one shared catalog without locking
//! - Parallel enrich runs over the same input produce identical output

use assert_cmd::Command;
use coach_core::{
    attach_media, default_catalog, CatalogKind, GeneratedPlan, MatchPolicy, PlanItem, WorkoutDay,
    WorkoutPlan,
};
use serde_json::Map;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fitcoach"));
    cmd.env("XDG_CONFIG_HOME", home.path());
    cmd
}

fn plan_with(names: &[&str]) -> GeneratedPlan {
    GeneratedPlan::Workout(WorkoutPlan {
        days: vec![WorkoutDay {
            exercises: names
                .iter()
                .map(|n| PlanItem::named(*n))
                .collect::<Vec<_>>()
                .into(),
            extra: Map::new(),
        }]
        .into(),
        extra: Map::new(),
    })
}

#[test]
fn test_threads_share_default_catalog() {
    let names = Arc::new(vec![
        "Bicep Curl",
        "Lateral Raise",
        "Jump Squats",
        "Moon Walk",
        "Plank Hold",
    ]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let names = Arc::clone(&names);
            thread::spawn(move || {
                let mut plan = plan_with(&names);
                let report = attach_media(
                    &mut plan,
                    default_catalog(CatalogKind::Exercise),
                    &MatchPolicy::default_for(CatalogKind::Exercise),
                );
                let media: Vec<Option<String>> = plan.items().map(|i| i.media.clone()).collect();
                (report.matched, media)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("enrichment thread panicked"))
        .collect();

    for (matched, media) in &results {
        assert_eq!(*matched, 4);
        assert_eq!(media, &results[0].1);
    }
    assert_eq!(results[0].1[3], None);
}

#[test]
fn test_parallel_cli_runs_agree() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let plan_path = home.path().join("plan.json");
    std::fs::write(
        &plan_path,
        r#"{"poses":[{"name":"Tree Pose"},{"name":"Cobra"},{"name":"Floating Lotus"}]}"#,
    )
    .unwrap();

    let home = Arc::new(home);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let home = Arc::clone(&home);
            let plan_path = plan_path.clone();
            thread::spawn(move || {
                cli(&home)
                    .arg("enrich")
                    .arg("yoga")
                    .arg(&plan_path)
                    .assert()
                    .success()
                    .get_output()
                    .stdout
                    .clone()
            })
        })
        .collect();

    let outputs: Vec<Vec<u8>> = handles
        .into_iter()
        .map(|h| h.join().expect("cli thread panicked"))
        .collect();

    for out in &outputs {
        assert_eq!(out, &outputs[0]);
    }

    let plan: serde_json::Value = serde_json::from_slice(&outputs[0]).unwrap();
    assert_eq!(plan["poses"][0]["media"], "/yoga/tree.webp");
}
