use std::process::{Command, Output};

fn maze_carver(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_maze-carver"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch maze-carver")
}

#[test]
fn headless_run_prints_the_maze_and_a_summary() {
    let output = maze_carver(&["--headless", "--rows", "3", "--cols", "4", "--seed", "7"]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "+---+---+---+---+");
    assert_eq!(lines[6], "+---+---+---+---+");
    assert!(lines[1..6]
        .iter()
        .all(|line| line.len() == 17 && !line.contains('#')));
    assert!(lines[7].starts_with("seed=7 steps="));
    assert!(lines[7].ends_with("visited=12/12"));
}

#[test]
fn headless_output_is_reproducible_from_the_seed() {
    let args = ["--headless", "--rows", "9", "--cols", "13", "--seed", "2024"];
    let first = maze_carver(&args);
    let second = maze_carver(&args);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn zero_dimensions_are_rejected() {
    let output = maze_carver(&["--headless", "--rows", "0", "--cols", "4"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("0x4"), "unexpected stderr: {stderr}");
}

#[test]
fn missing_config_file_is_reported() {
    let output = maze_carver(&[
        "--headless",
        "--config",
        "/nonexistent/maze-carver.toml",
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("maze-carver.toml"));
}
