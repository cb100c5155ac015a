use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Instant the fixture snapshot was exported at.
const FIXTURE_NOW: &str = "2025-06-02T16:00:00Z";

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn config_path(&self) -> PathBuf {
        self.xdg_config.join("lumo/config.toml")
    }
}

fn snapshot_fixture() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../lumo-core/tests/fixtures/snapshot.json")
        .to_string_lossy()
        .into_owned()
}

fn run_insights(env: &CliTestEnv, extra: &[&str]) -> (Vec<String>, Output) {
    let snapshot = snapshot_fixture();
    let mut args: Vec<String> = vec![
        "--snapshot".to_string(),
        snapshot,
        "--now".to_string(),
        FIXTURE_NOW.to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    run_raw(env, args)
}

fn run_raw(env: &CliTestEnv, args: Vec<String>) -> (Vec<String>, Output) {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("lumo-insights"))
        .args(&args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env("TZ", "UTC")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute lumo-insights: {e}"));

    (args, output)
}

fn assert_success(args: &[String], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "lumo-insights {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

#[test]
fn json_export_reports_rest_and_costs() {
    let env = CliTestEnv::new();

    let (args, output) = run_insights(&env, &["--export", "json"]);
    assert_success(&args, &output);

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["range"], "week");
    assert_eq!(report["rest"]["status"], "heads-up");
    assert_eq!(report["rest"]["continuous_coding_minutes"], 70);
    assert_eq!(report["health"]["latest_work_hour"], 23);
    assert_eq!(report["cost_insights"][3]["label"], "Model Cost Gap");
    assert_eq!(report["weekly"][0]["change_percent"], 50.0);
}

#[test]
fn terminal_and_markdown_output() {
    let env = CliTestEnv::new();

    let (args, output) = run_insights(&env, &[]);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("LUMO INSIGHTS: This Week"));
    assert!(stdout.contains("Status:   Heads Up (1h 10m continuous)"));
    assert!(stdout.contains("Night owl detected"));
    assert!(stdout.contains("VS PREVIOUS WEEK"));

    let (args, output) = run_insights(&env, &["--export", "md", "--range", "today"]);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Lumo Insights: Today"));
    assert!(stdout.contains("## Rest"));
    assert!(stdout.contains("- **Cost per Session:** $0.450"));
}

#[test]
fn export_time_is_the_default_now() {
    let env = CliTestEnv::new();

    let args = vec![
        "--snapshot".to_string(),
        snapshot_fixture(),
        "--export".to_string(),
        "json".to_string(),
    ];
    let (args, output) = run_raw(&env, args);
    assert_success(&args, &output);

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert!(report["generated_at"]
        .as_str()
        .expect("generated_at should be a string")
        .starts_with("2025-06-02T16:00:00"));
    assert_eq!(report["rest"]["status"], "heads-up");
}

#[test]
fn model_tokens_are_listed() {
    let env = CliTestEnv::new();

    let (args, output) = run_insights(&env, &["--export", "md"]);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("## Models"));
    assert!(stdout.contains("| Opus 4.5 | $4.50 | 190.0K |"));

    let (args, output) = run_insights(&env, &[]);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MODELS"));
    assert!(stdout.contains("150.0K tokens"));
}

#[test]
fn help_shows_log_location() {
    let env = CliTestEnv::new();

    let (args, output) = run_raw(&env, vec!["--help".to_string()]);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = env.xdg_state.join("lumo/lumo.log");
    assert!(stdout.contains(&format!("Logs are written to {}", expected.display())));
}

#[test]
fn saved_preferences_apply_to_later_runs() {
    let env = CliTestEnv::new();

    let (args, output) = run_insights(
        &env,
        &["--heads-up", "30", "--break-after", "60", "--save-preferences"],
    );
    assert_success(&args, &output);
    let saved = fs::read_to_string(env.config_path()).expect("config should be written");
    assert!(saved.contains("break_minutes = 60"));

    let (args, output) = run_insights(&env, &["--export", "json"]);
    assert_success(&args, &output);
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["rest"]["status"], "take-a-break");
    assert_eq!(report["rest_preferences"]["heads_up_minutes"], 30);
}

#[test]
fn invalid_arguments_fail() {
    let env = CliTestEnv::new();

    for extra in [
        &["--export", "pdf"][..],
        &["--range", "year"][..],
        &["--break-after", "0"][..],
    ] {
        let (_, output) = run_insights(&env, extra);
        assert!(
            !output.status.success(),
            "expected failure for {:?}",
            extra
        );
    }
}
