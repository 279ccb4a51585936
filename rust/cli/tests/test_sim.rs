use std::fs;
use std::path::PathBuf;

use tilt_cli::run;
use tilt_engine::logger::HandRecord;

fn out_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    if let Some(parent) = p.parent() {
        let _ = fs::create_dir_all(parent);
    }
    p
}

fn sim(extra: &[&str]) -> (i32, String, String) {
    let mut args = vec!["tilt", "sim"];
    args.extend_from_slice(extra);
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

fn simulated(stdout: &str) -> usize {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("Simulated: "))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn records(path: &PathBuf) -> Vec<HandRecord> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn sim_runs_n_hands_and_writes_file() {
    let path = out_path("sim");
    let _ = fs::remove_file(&path);
    let (code, stdout, _) = sim(&[
        "--hands",
        "5",
        "--seed",
        "1",
        "--output",
        path.to_string_lossy().as_ref(),
    ]);
    assert_eq!(code, 0);
    let n = simulated(&stdout);
    assert!(n == 5 || (n > 0 && stdout.contains("Match ended early")), "{}", stdout);
    assert!(stdout.contains("Final stacks"));
    assert!(stdout.contains("Bot tilt"));

    let recs = records(&path);
    assert_eq!(recs.len(), n);
    for (i, rec) in recs.iter().enumerate() {
        assert!(rec.hand_id.ends_with(&format!("-{:06}", i + 1)));
        assert_eq!(rec.net[0] + rec.net[1], 0);
        assert_eq!(rec.seed, Some(1));
        assert!(rec.ts.is_some());
        assert!(!rec.actions.is_empty());
    }
    let _ = fs::remove_file(&path);
}

#[test]
fn same_seed_replays_the_same_match() {
    let a = out_path("sim_a");
    let b = out_path("sim_b");
    for p in [&a, &b] {
        let (code, _, _) = sim(&[
            "--hands",
            "8",
            "--seed",
            "77",
            "--opponent",
            "maniac",
            "--output",
            p.to_string_lossy().as_ref(),
        ]);
        assert_eq!(code, 0);
    }
    let strip = |recs: Vec<HandRecord>| -> Vec<HandRecord> {
        recs.into_iter()
            .map(|r| HandRecord { ts: None, ..r })
            .collect()
    };
    assert_eq!(strip(records(&a)), strip(records(&b)));
    let _ = fs::remove_file(&a);
    let _ = fs::remove_file(&b);
}

#[test]
fn sim_without_output_only_reports() {
    let (code, stdout, _) = sim(&["--hands", "3", "--seed", "9", "--stand-in", "calling_station"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Seed: 9"));
    assert!(stdout.contains("calling_station"));
}

#[test]
fn sim_zero_hands_is_an_error() {
    let (code, _, stderr) = sim(&["--hands", "0"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("hands must be >= 1"));
}

#[test]
fn sim_unknown_preset_is_an_error() {
    let (code, _, stderr) = sim(&["--hands", "1", "--opponent", "shark"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Unknown personality preset: shark"), "{}", stderr);
}
