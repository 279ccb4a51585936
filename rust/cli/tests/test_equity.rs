use tilt_cli::run;

fn equity(extra: &[&str]) -> (i32, String, String) {
    let mut args = vec!["tilt", "equity"];
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

fn reported(stdout: &str) -> f64 {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("Equity: "))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|v| v.parse().ok())
        .unwrap_or(-1.0)
}

#[test]
fn aces_against_kings() {
    let (code, stdout, _) = equity(&["--hero", "AsAh", "--range", "KK", "--trials", "3000", "--seed", "1"]);
    assert_eq!(code, 0);
    let eq = reported(&stdout);
    assert!(eq > 0.74 && eq < 0.89, "AA vs KK = {}", eq);
    assert!(stdout.contains("seed 1"));
    assert!(stdout.contains("(6 combos)"));
}

#[test]
fn same_seed_same_answer() {
    let args = ["--hero", "9c8c", "--board", "Tc7d2h", "--range", "TT+,AQs+", "--trials", "500", "--seed", "4"];
    let (_, a, _) = equity(&args);
    let (_, b, _) = equity(&args);
    assert_eq!(a, b);
}

#[test]
fn random_range_is_the_default() {
    let (code, stdout, _) = equity(&["--hero", "7h2c", "--trials", "500", "--seed", "2"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("(1326 combos)"));
    let eq = reported(&stdout);
    assert!(eq > 0.2 && eq < 0.45, "72o vs random = {}", eq);
}

#[test]
fn bad_input_exits_with_two() {
    let (code, _, stderr) = equity(&["--hero", "AsXx"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Error:"));

    let (code, _, stderr) = equity(&["--hero", "AsKs", "--board", "AsQd2c"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("duplicate"));

    let (code, _, stderr) = equity(&["--hero", "AsKs", "--board", "Qd2c"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("board must have"));

    let (code, _, stderr) = equity(&["--hero", "AsKs", "--range", "AK+s"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("notation"), "{}", stderr);
}
