use std::fs;

use serde_json::Value;
use serial_test::serial;

use tilt_cli::run;

const VARS: [&str; 6] = [
    "TILT_CONFIG",
    "TILT_SEED",
    "TILT_LEVEL",
    "TILT_BUY_IN",
    "TILT_OPPONENT",
    "TILT_STAND_IN",
];

fn clear_env() {
    for v in VARS {
        unsafe {
            std::env::remove_var(v);
        }
    }
}

fn cfg() -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["tilt", "cfg"], &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    clear_env();
    let (code, stdout, stderr) = cfg();
    assert_eq!(code, 0);
    assert!(stderr.is_empty());
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["buy_in"]["value"].as_u64(), Some(1_000));
    assert_eq!(json["buy_in"]["source"].as_str(), Some("default"));
    assert_eq!(json["opponent"]["value"].as_str(), Some("pro"));
    assert_eq!(json["stand_in"]["value"].as_str(), Some("gto"));
    assert!(json["seed"]["value"].is_null());
}

#[test]
#[serial]
fn env_overrides_file_overrides_default() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tilt.toml");
    fs::write(&path, "seed = 456\nopponent = \"maniac\"\nlevel = 2\n").unwrap();
    unsafe {
        std::env::set_var("TILT_CONFIG", &path);
        std::env::set_var("TILT_SEED", "7");
        std::env::set_var("TILT_STAND_IN", "nit");
    }
    let (code, stdout, _) = cfg();
    clear_env();
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["seed"]["value"].as_u64(), Some(7));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["opponent"]["value"].as_str(), Some("maniac"));
    assert_eq!(json["opponent"]["source"].as_str(), Some("file"));
    assert_eq!(json["level"]["value"].as_u64(), Some(2));
    assert_eq!(json["level"]["source"].as_str(), Some("file"));
    assert_eq!(json["stand_in"]["source"].as_str(), Some("env"));
    assert_eq!(json["buy_in"]["source"].as_str(), Some("default"));
}

#[test]
#[serial]
fn invalid_env_value_is_reported() {
    clear_env();
    unsafe {
        std::env::set_var("TILT_LEVEL", "abc");
    }
    let (code, stdout, stderr) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Invalid configuration"));
    // written once, by the command
    assert_eq!(stderr.matches("Error:").count(), 1);
}

#[test]
#[serial]
fn out_of_range_level_is_rejected() {
    clear_env();
    unsafe {
        std::env::set_var("TILT_LEVEL", "11");
    }
    let (code, _, stderr) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(stderr.contains("level must be between 1 and 10"));
}

#[test]
#[serial]
fn sim_uses_configured_opponent() {
    clear_env();
    unsafe {
        std::env::set_var("TILT_OPPONENT", "nobody");
    }
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["tilt", "sim", "--hands", "1"], &mut out, &mut err);
    clear_env();
    assert_eq!(code, 2);
    assert!(String::from_utf8_lossy(&err).contains("nobody"));

    unsafe {
        std::env::set_var("TILT_SEED", "3");
        std::env::set_var("TILT_BUY_IN", "500");
    }
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["tilt", "sim", "--hands", "2"], &mut out, &mut err);
    clear_env();
    assert_eq!(code, 0);
    let stdout = String::from_utf8_lossy(&out);
    assert!(stdout.contains("Seed: 3"));
}
