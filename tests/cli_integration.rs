//! Integration tests for the `skydo` binary.
//!
//! Each test points skydo at a temp directory through a config file, runs
//! it as a subprocess (feeding the shell a script on stdin where needed),
//! and checks stdout, stderr, and the files left behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Get the path to the built `skydo` binary.
fn skydo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_skydo"))
}

/// Write a config keeping every skydo file under `root`.
fn create_config(root: &Path) -> PathBuf {
    let config = root.join("config.toml");
    fs::write(
        &config,
        format!(
            r#"[paths]
save_file = "{root}/lists.save"
cache_dir = "{root}/cache"

[store]
dir = "{root}/store"

[display]
window = 5
"#,
            root = root.display()
        ),
    )
    .unwrap();
    config
}

/// Run `skydo` with `args` and `stdin`, returning (stdout, stderr, success).
fn run_skydo(root: &Path, args: &[&str], stdin: &str) -> (String, String, bool) {
    let config = root.join("config.toml");
    let mut child = Command::new(skydo_bin())
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("HOME", root)
        .env("XDG_CONFIG_HOME", root)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run skydo");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `skydo` expecting success, return stdout.
fn run_skydo_ok(root: &Path, args: &[&str], stdin: &str) -> String {
    let (stdout, stderr, success) = run_skydo(root, args, stdin);
    if !success {
        panic!(
            "skydo {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Create and save a list named Groceries with three entries.
fn create_groceries(root: &Path) -> String {
    run_skydo_ok(
        root,
        &[],
        "Groceries\nadd milk\nadd eggs\nadd bread\nsave\nquit\n",
    )
}

fn skylink_of(root: &Path, name: &str) -> String {
    run_skydo_ok(root, &["share", name], "").trim().to_string()
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

#[test]
fn test_first_run_creates_and_saves() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());

    let out = create_groceries(tmp.path());
    assert!(out.contains("Welcome to skydo"));
    assert!(out.contains("No lists exist yet. Name your first list: "));
    assert!(out.contains("*> "));
    assert!(out.contains("uploaded 'Groceries': "));
    assert!(!out.contains("Quit with unsaved changes"));

    let skylink = skylink_of(tmp.path(), "Groceries");
    assert_eq!(skylink.len(), 64);

    let save = fs::read_to_string(tmp.path().join("lists.save")).unwrap();
    assert_eq!(save, format!("0\nGroceries\x0c{}", skylink));

    let blob = tmp.path().join("store").join(&skylink[..2]).join(&skylink);
    assert_eq!(fs::read_to_string(blob).unwrap(), "Groceries\nmilk\neggs\nbread");
    assert_eq!(
        fs::read_to_string(tmp.path().join("cache/Groceries")).unwrap(),
        "Groceries\nmilk\neggs\nbread"
    );
}

#[test]
fn test_second_run_reloads_lists() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());
    create_groceries(tmp.path());

    let out = run_skydo_ok(tmp.path(), &[], "move 0 2\nls\nquit\nn\nquit\ny\n");
    assert!(!out.contains("No lists exist yet"));
    assert!(out.contains("0:  milk"));
    assert!(out.contains("0:  eggs\n1:  bread\n2:  milk"));
    assert!(out.contains("Quit with unsaved changes (y/N)? "));

    // Quitting without saving keeps the published copy
    let show = run_skydo_ok(tmp.path(), &["show", "Groceries"], "");
    assert!(show.contains("0:  milk\n1:  eggs\n2:  bread"));
}

#[test]
fn test_shell_errors_do_not_exit() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());
    create_groceries(tmp.path());

    let out = run_skydo_ok(
        tmp.path(),
        &[],
        "delete 7\ninsert 3 jam\nnew Groceries\nadd ok\nquit\ny\n",
    );
    assert!(out.contains("error: cannot delete from position 7 (list has 3 entries)"));
    assert!(out.contains("error: cannot insert at position 3 (list has 3 entries)"));
    assert!(out.contains("error: a list named 'Groceries' already exists"));
    assert!(out.contains("3:  ok"));
}

#[test]
fn test_load_shared_list_from_another_home() {
    let alice = tempfile::TempDir::new().unwrap();
    create_config(alice.path());
    create_groceries(alice.path());
    let skylink = skylink_of(alice.path(), "Groceries");

    // Bob shares Alice's store but has his own save file
    let bob = tempfile::TempDir::new().unwrap();
    fs::write(
        bob.path().join("config.toml"),
        format!(
            "[paths]\nsave_file = \"{bob}/lists.save\"\ncache_dir = \"{bob}/cache\"\n\n[store]\ndir = \"{alice}/store\"\n",
            bob = bob.path().display(),
            alice = alice.path().display()
        ),
    )
    .unwrap();

    let out = run_skydo_ok(
        bob.path(),
        &[],
        &format!("Chores\nload {}\nall\nsave\nquit\n", skylink),
    );
    assert!(out.contains("1:  eggs"));
    assert!(out.contains("-  Groceries"));
    assert!(out.contains("-* Chores"));

    let lists = run_skydo_ok(bob.path(), &["lists"], "");
    assert!(lists.contains("-  Chores"));
    assert!(lists.contains("-  Groceries"));
    assert_eq!(skylink_of(bob.path(), "Groceries"), skylink);
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

#[test]
fn test_lists_without_save_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());
    let out = run_skydo_ok(tmp.path(), &["lists"], "");
    assert!(out.contains("No lists yet"));
}

#[test]
fn test_json_output() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());
    create_groceries(tmp.path());

    let out = run_skydo_ok(tmp.path(), &["lists", "--json"], "");
    let lists: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(lists[0]["name"], "Groceries");
    assert_eq!(lists[0]["saved"], true);
    assert_eq!(lists[0]["entries"], 3);
    assert_eq!(lists[0]["current"], true);

    let out = run_skydo_ok(tmp.path(), &["--json", "show", "Groceries"], "");
    let list: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(list["entries"], serde_json::json!(["milk", "eggs", "bread"]));

    let out = run_skydo_ok(tmp.path(), &["--json", "share", "Groceries"], "");
    let share: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(share["current"], true);
    assert_eq!(share["skylink"].as_str().unwrap().len(), 64);
}

#[test]
fn test_show_unknown_list_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());
    create_groceries(tmp.path());

    let (_, stderr, success) = run_skydo(tmp.path(), &["show", "Nope"], "");
    assert!(!success);
    assert!(stderr.contains("error: no list named 'Nope'"));
}

#[test]
fn test_unpublished_list_has_no_skylink() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());
    fs::write(tmp.path().join("lists.save"), "0\nDraft\x0c").unwrap();

    let out = run_skydo_ok(tmp.path(), &["share", "Draft"], "");
    assert!(out.contains("skylink doesn't exist (try saving first)"));
    let out = run_skydo_ok(tmp.path(), &["show", "Draft"], "");
    assert!(out.contains("(The list is empty)"));
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_save_file_is_backed_up() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());
    fs::write(tmp.path().join("lists.save"), "3\nOnly\x0c").unwrap();

    let (stdout, stderr, success) = run_skydo(tmp.path(), &[], "");
    assert!(success);
    assert!(stdout.contains("No lists exist yet"));
    assert!(stderr.contains("current index 3 but only 1 lists"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("lists.save.bak")).unwrap(),
        "3\nOnly\x0c"
    );
}

#[test]
fn test_queries_report_malformed_save_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());
    fs::write(tmp.path().join("lists.save"), "3\nOnly\x0c").unwrap();

    for args in [&["lists"][..], &["show", "Only"], &["share", "Only"]] {
        let (stdout, stderr, success) = run_skydo(tmp.path(), args, "");
        assert!(!success, "{:?} should fail", args);
        assert!(stdout.is_empty());
        assert!(stderr.contains(
            "error: malformed save file: current index 3 but only 1 lists"
        ));
    }
    assert!(!tmp.path().join("lists.save.bak").exists());
    assert_eq!(
        fs::read_to_string(tmp.path().join("lists.save")).unwrap(),
        "3\nOnly\x0c"
    );
}

#[test]
fn test_missing_blob_aborts_startup() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_config(tmp.path());
    let missing = "ab".repeat(32);
    fs::write(
        tmp.path().join("lists.save"),
        format!("0\nGone\x0c{}", missing),
    )
    .unwrap();

    let (_, stderr, success) = run_skydo(tmp.path(), &[], "quit\n");
    assert!(!success);
    assert!(stderr.contains(&format!("error: could not fetch {}", missing)));
    // The save file is left alone
    assert_eq!(
        fs::read_to_string(tmp.path().join("lists.save")).unwrap(),
        format!("0\nGone\x0c{}", missing)
    );
}
