use std::process::Command;

fn headless(seed: &str) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_idle-tower"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["--headless", "--ticks", "240", "--seed", seed])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch idle-tower");

    assert!(output.status.success(), "headless run should exit cleanly");
    String::from_utf8(output.stdout).expect("summary should be utf-8")
}

#[test]
fn headless_run_prints_a_summary_line() {
    let stdout = headless("17");
    let line = stdout.trim();
    assert!(line.starts_with("ticks=240 "), "unexpected summary: {line}");
    assert!(line.ends_with("game_over=false"), "unexpected summary: {line}");
}

#[test]
fn headless_runs_replay_with_the_same_seed() {
    assert_eq!(headless("99"), headless("99"));
}
