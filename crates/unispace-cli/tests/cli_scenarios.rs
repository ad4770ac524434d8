use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "unispace-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_unispace<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_unispace");
    Command::new(bin)
        .args(args)
        .output()
        .expect("unispace command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_exit_code(output: &Output, expected: i32) {
    assert_eq!(
        output.status.code(),
        Some(expected),
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_blocks_scenario(path: &Path, checks: Value) {
    let payload = serde_json::json!({
        "schema": 1,
        "space": {
            "name": "blocks",
            "points": ["a", "b", "c", "d"],
            "basis": [
                [
                    ["a", "a"], ["a", "b"], ["a", "c"], ["a", "d"],
                    ["b", "a"], ["b", "b"], ["b", "c"], ["b", "d"],
                    ["c", "a"], ["c", "b"], ["c", "c"], ["c", "d"],
                    ["d", "a"], ["d", "b"], ["d", "c"], ["d", "d"]
                ],
                [
                    ["a", "a"], ["a", "b"], ["b", "a"], ["b", "b"],
                    ["c", "c"], ["c", "d"], ["d", "c"], ["d", "d"]
                ]
            ]
        },
        "filters": {
            "inside": [["a", "b"], ["a"]],
            "straddle": [["b", "c"]]
        },
        "sets": {
            "leftBlock": ["a", "b"],
            "rightBlock": ["c", "d"],
            "justA": ["a"]
        },
        "checks": checks,
    });
    fs::write(path, serde_json::to_vec_pretty(&payload).unwrap())
        .expect("scenario should be written");
}

#[test]
fn cauchy_check_satisfied_json() {
    let dir = TempDirGuard::new("cauchy-ok");
    let scenario = dir.path().join("scenario.json");
    write_blocks_scenario(
        &scenario,
        serde_json::json!([{ "kind": "cauchy", "filter": "inside" }]),
    );

    let output = run_unispace(["cauchy", scenario.to_str().unwrap(), "--json"]);
    assert_success(&output);

    let reports = parse_json_stdout(&output);
    let reports = reports.as_array().expect("reports should be an array");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["check"], "cauchy");
    assert_eq!(reports[0]["verdict"], "satisfied");
    assert!(!reports[0]["witnesses"].as_array().unwrap().is_empty());
}

#[test]
fn refuted_cauchy_exits_one_with_deterministic_witness() {
    let dir = TempDirGuard::new("cauchy-refuted");
    let scenario = dir.path().join("scenario.json");
    write_blocks_scenario(
        &scenario,
        serde_json::json!([{ "kind": "cauchy", "filter": "straddle" }]),
    );

    let output = run_unispace(["cauchy", scenario.to_str().unwrap(), "--json"]);
    assert_exit_code(&output, 1);

    let reports = parse_json_stdout(&output);
    let failure = &reports[0]["failures"][0];
    assert_eq!(failure["class"], "cauchy_failure");
    let witness_id = failure["witnessId"].as_str().expect("witness id");
    assert!(witness_id.starts_with("u1_"), "got witness id {witness_id}");

    // Same scenario, same witness: determinism across runs.
    let again = run_unispace(["cauchy", scenario.to_str().unwrap(), "--json"]);
    let reports_again = parse_json_stdout(&again);
    assert_eq!(reports_again[0]["failures"][0]["witnessId"], witness_id);
}

#[test]
fn complete_family_includes_separated_unions() {
    let dir = TempDirGuard::new("complete");
    let scenario = dir.path().join("scenario.json");
    write_blocks_scenario(
        &scenario,
        serde_json::json!([
            { "kind": "complete", "set": "leftBlock" },
            {
                "kind": "separated_union",
                "left": "leftBlock",
                "right": "rightBlock",
                "separator": 1
            },
            { "kind": "cauchy", "filter": "inside" }
        ]),
    );

    let output = run_unispace(["complete", scenario.to_str().unwrap(), "--json"]);
    assert_success(&output);

    let reports = parse_json_stdout(&output);
    let reports = reports.as_array().unwrap();
    // The cauchy check belongs to a different family.
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r["verdict"] == "satisfied"));
}

#[test]
fn bounded_check_refutes_a_starved_pool() {
    let dir = TempDirGuard::new("bounded");
    let scenario = dir.path().join("scenario.json");
    write_blocks_scenario(
        &scenario,
        serde_json::json!([
            { "kind": "bounded", "set": "rightBlock", "pool": "justA" }
        ]),
    );

    let output = run_unispace(["bounded", scenario.to_str().unwrap(), "--json"]);
    assert_exit_code(&output, 1);

    let reports = parse_json_stdout(&output);
    assert_eq!(reports[0]["failures"][0]["class"], "cover_missing");
}

#[test]
fn compact_check_satisfied_on_a_block() {
    let dir = TempDirGuard::new("compact");
    let scenario = dir.path().join("scenario.json");
    write_blocks_scenario(
        &scenario,
        serde_json::json!([{ "kind": "compact", "set": "leftBlock" }]),
    );

    let output = run_unispace(["compact", scenario.to_str().unwrap(), "--json"]);
    assert_success(&output);
    let reports = parse_json_stdout(&output);
    assert_eq!(reports[0]["verdict"], "satisfied");
}

#[test]
fn run_executes_every_declared_check() {
    let dir = TempDirGuard::new("run-all");
    let scenario = dir.path().join("scenario.json");
    write_blocks_scenario(
        &scenario,
        serde_json::json!([
            { "kind": "cauchy", "filter": "inside" },
            { "kind": "complete", "set": "leftBlock" },
            { "kind": "bounded", "set": "leftBlock" },
            { "kind": "compact", "set": "leftBlock" }
        ]),
    );

    let output = run_unispace(["run", scenario.to_str().unwrap(), "--json"]);
    assert_success(&output);
    let reports = parse_json_stdout(&output);
    assert_eq!(reports.as_array().unwrap().len(), 4);
}

#[test]
fn text_output_names_the_space_and_verdicts() {
    let dir = TempDirGuard::new("text");
    let scenario = dir.path().join("scenario.json");
    write_blocks_scenario(
        &scenario,
        serde_json::json!([{ "kind": "cauchy", "filter": "inside" }]),
    );

    let output = run_unispace(["cauchy", scenario.to_str().unwrap()]);
    assert_success(&output);
    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    assert!(text.contains("unispace cauchy"));
    assert!(text.contains("Space: blocks (4 points, 2 entourages)"));
    assert!(text.contains("[satisfied] cauchy"));
}

#[test]
fn structurally_invalid_scenario_exits_one() {
    let dir = TempDirGuard::new("invalid");
    let scenario = dir.path().join("scenario.json");
    // Basis misses the diagonal at `b`.
    let payload = serde_json::json!({
        "schema": 1,
        "space": {
            "name": "broken",
            "points": ["a", "b"],
            "basis": [[["a", "a"]]]
        },
        "checks": []
    });
    fs::write(&scenario, serde_json::to_vec(&payload).unwrap()).unwrap();

    let output = run_unispace(["run", scenario.to_str().unwrap()]);
    assert_exit_code(&output, 1);
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    assert!(stderr.contains("error:"), "stderr was: {stderr}");
}

#[test]
fn unreadable_scenario_exits_two() {
    let dir = TempDirGuard::new("missing");
    let path = dir.path().join("nope.json");
    let output = run_unispace(["run", path.to_str().unwrap()]);
    assert_exit_code(&output, 2);
}
