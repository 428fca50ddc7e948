//! CLI integration tests for `propanim generate`, `options`, `schema` and
//! `session`.
//!
//! Each test runs the built binary inside a scratch directory with its own
//! XDG config home so no user config leaks in.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const COFFEE_FORM: &str = r#"{
    "dict": "amb@world_human_drinking@coffee@male@idle_a",
    "anim": "idle_c",
    "flags": "49",
    "duration": "-1",
    "props": [
        {"model": "p_amb_coffeecup_01", "bone": "28422", "coords_x": "0.0", "rotation_z": "12.5"}
    ],
    "callback_code": "  print('done')  "
}"#;

const COFFEE_SNIPPET: &str = r#"play_animation(PlayerPedId(), {
    dict = "amb@world_human_drinking@coffee@male@idle_a",
    anim = "idle_c",
    duration = -1,
    props = {
        {
            model = "p_amb_coffeecup_01",
            bone = 28422,
            coords = vector3(0, 0, 0),
            rotation = vector3(0, 0, 12.5)
        }
    },
}, function()
    print('done')
end)"#;

fn command(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_propanim"));
    cmd.current_dir(dir.path()).env("XDG_CONFIG_HOME", dir.path().join("xdg"));
    cmd
}

/// Run propanim with the given arguments and return (stdout, stderr, exit code).
fn run(dir: &TempDir, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut cmd = command(dir);
    cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd.stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() });

    let mut child = cmd.spawn().expect("Failed to execute propanim");
    if let Some(input) = stdin {
        child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    }
    let output: Output = child.wait_with_output().unwrap();
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn write_form(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("form.json");
    std::fs::write(&path, content).unwrap();
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_generate_from_file() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, COFFEE_FORM);

    let (stdout, _, code) = run(&dir, &["generate", path_str(&form)], None);
    assert_eq!(code, 0);
    assert_eq!(stdout, format!("OUTPUT\n{}\n\n[Test Code] [Copy Code]\n", COFFEE_SNIPPET));
}

#[test]
fn test_generate_from_stdin() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run(&dir, &["generate", "-"], Some(COFFEE_FORM));
    assert_eq!(code, 0);
    assert!(stdout.contains(COFFEE_SNIPPET));
}

#[test]
fn test_generate_from_assignments() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run(
        &dir,
        &[
            "generate",
            "--set",
            "dict=missfbi1",
            "--set",
            "anim=ledge_loop",
            "--set",
            "prop_0_model=prop_ld_flow_bottle",
            "--set",
            "prop_0_rot_order=2",
        ],
        None,
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("    dict = \"missfbi1\",\n"));
    assert!(stdout.contains("model = \"prop_ld_flow_bottle\""));
    assert!(stdout.contains("rot_order = 2"));
}

#[test]
fn test_generate_missing_fields_exits_1() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, r#"{"dict": "", "anim": "idle_c"}"#);

    let (stdout, _, code) = run(&dir, &["generate", path_str(&form)], None);
    assert_eq!(code, 1);
    assert_eq!(stdout, "Missing Required Fields\n  - Animation Dictionary (dict)\n");
}

#[test]
fn test_generate_json_result() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, r#"{"anim": "idle_c"}"#);

    let (stdout, _, code) = run(&dir, &["generate", path_str(&form), "--json"], None);
    assert_eq!(code, 1);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["status"], "invalid");
    assert_eq!(value["missing_fields"][0]["id"], "dict");
}

#[test]
fn test_generate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, COFFEE_FORM);
    let out = dir.path().join("snippet.lua");

    let (_, stderr, code) =
        run(&dir, &["generate", path_str(&form), "--output", path_str(&out)], None);
    assert_eq!(code, 0);
    assert!(stderr.contains("Snippet written to"));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), format!("{}\n", COFFEE_SNIPPET));
}

#[test]
fn test_generate_bad_input_exits_2() {
    let dir = TempDir::new().unwrap();

    let (_, stderr, code) = run(&dir, &["generate", "missing.json"], None);
    assert_eq!(code, 2);
    assert!(stderr.starts_with("Error: "));

    let (_, stderr, code) = run(&dir, &["generate", "--set", "dict"], None);
    assert_eq!(code, 2);
    assert!(stderr.contains("expected id=value"));
}

#[test]
fn test_generate_far_prop_override_exits_2() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, COFFEE_FORM);

    let (stdout, stderr, code) =
        run(&dir, &["generate", path_str(&form), "--set", "prop_100000000000_bone=1"], None);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("out of range"));

    // The next index appends a block
    let (stdout, _, code) =
        run(&dir, &["generate", path_str(&form), "--set", "prop_1_model=prop_b"], None);
    assert_eq!(code, 0);
    assert!(stdout.contains("model = \"prop_b\""));
}

#[test]
fn test_options_pretty_and_compact() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, COFFEE_FORM);

    let (stdout, _, code) = run(&dir, &["options", path_str(&form), "--compact"], None);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim_end(),
        r#"{"dict":"amb@world_human_drinking@coffee@male@idle_a","anim":"idle_c","flags":49,"duration":-1,"props":[{"model":"p_amb_coffeecup_01","bone":28422,"coords":{"x":0.0,"y":0.0,"z":0.0},"rotation":{"x":0.0,"y":0.0,"z":12.5}}]}"#
    );

    let (stdout, _, _) = run(&dir, &["options", path_str(&form)], None);
    assert!(stdout.contains("\n  \"flags\": 49,\n"));
}

#[test]
fn test_options_missing_fields_exits_1() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run(&dir, &["options", "--set", "dict=d"], None);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Animation Name (anim)"));
}

#[test]
fn test_config_dialect_and_compact_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("propanim.toml"),
        "[snippet]\nfunction = \"Anim.Play\"\nvector = \"vec3\"\n\n[output]\npretty = false\n",
    )
    .unwrap();
    let form = write_form(&dir, COFFEE_FORM);

    let (stdout, _, code) = run(&dir, &["generate", path_str(&form)], None);
    assert_eq!(code, 0);
    assert!(stdout.contains("Anim.Play(PlayerPedId(), {\n"));
    assert!(stdout.contains("coords = vec3(0, 0, 0)"));

    let (stdout, _, _) = run(&dir, &["options", path_str(&form)], None);
    assert!(stdout.starts_with("{\"dict\":"));
}

#[test]
fn test_invalid_config_exits_2() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[snippet]\nfunction = \"  \"\n").unwrap();

    let (_, stderr, code) =
        run(&dir, &["--config", path_str(&config), "generate", "--set", "dict=d"], None);
    assert_eq!(code, 2);
    assert!(stderr.contains("snippet.function"));
}

#[test]
fn test_schema_text_and_json() {
    let dir = TempDir::new().unwrap();

    let (stdout, _, code) = run(&dir, &["schema"], None);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Animation fields\n"));
    assert!(stdout.contains("Prop fields"));

    let (stdout, _, _) = run(&dir, &["schema", "--json"], None);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["animation"][2]["id"], "flags");
    assert_eq!(value["animation"][2]["type"], "integer");
    assert_eq!(value["prop"].as_array().unwrap().len(), 12);
}

#[test]
fn test_session_bridge() {
    let dir = TempDir::new().unwrap();
    let events = r#"{"action": "rotate", "direction": "left"}
{"action": "open"}
{"action": "generate", "form": {"dict": "d", "anim": "a"}}
{"action": "rotate", "direction": "reset"}
{"action": "escape"}
{"action": "close"}
"#;

    let (stdout, _, code) = run(&dir, &["session"], Some(events));
    assert_eq!(code, 0);
    let lines: Vec<serde_json::Value> =
        stdout.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["view"], "output");
    assert_eq!(lines[1]["direction"], "reset");
    assert_eq!(lines[2]["event"], "close_ui");
}
