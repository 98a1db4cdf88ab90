//! Integration tests for the `homepage` binary.

use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::process::Command;

fn homepage_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_homepage"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn temp_out(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("homepage-build-test").join(name);
    // Clean up from previous runs
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn entries(archive_path: &PathBuf) -> Vec<(String, String)> {
    let bytes = fs::read(archive_path).expect("archive should exist");
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = String::new();
            file.read_to_string(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

fn run_build(out: &PathBuf, extra: &[&str]) -> std::process::Output {
    Command::new(homepage_bin())
        .args(["build", fixture("homepage.md").to_str().unwrap(), "--out", out.to_str().unwrap(), "--quiet"])
        .args(extra)
        .output()
        .expect("failed to run homepage build")
}

#[test]
fn build_writes_complete_archive() {
    let out = temp_out("complete");
    let output = run_build(&out, &["--theme", "classic"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let files = entries(&out.join("homepage.zip"));
    let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["index.html", "stylesheet.css", "sourcecode.md"]);

    let index = &files[0].1;
    assert!(index.starts_with("<!DOCTYPE html>"));
    assert!(index.contains("<div class=\"wrapper\">"));
    assert!(index.contains("<h2 id=\"about\">About</h2>"));
    assert!(index.contains("<h2 id=\"about-1\">About</h2>"));
    assert!(index.contains("<a href=\"https://example.org/notes\">"));
    assert!(index.contains("<table>"));
    assert!(index.contains("<math"));
    assert!(index.contains("<del>nothing else</del>"));

    assert!(files[1].1.contains(".wrapper h1 {"));
    assert_eq!(files[2].1, fs::read_to_string(fixture("homepage.md")).unwrap());

    // No leftover temporary file next to the archive.
    let leftovers: Vec<_> = fs::read_dir(&out).unwrap().collect();
    assert_eq!(leftovers.len(), 1);

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn build_without_source_copy() {
    let out = temp_out("no-source");
    let output = run_build(&out, &["--no-source"]);
    assert!(output.status.success());

    let files = entries(&out.join("homepage.zip"));
    let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["index.html", "stylesheet.css"]);

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn unknown_theme_falls_back_to_default() {
    let fallback = temp_out("fallback");
    let default = temp_out("fallback-default");

    assert!(run_build(&fallback, &["--theme", "nonexistent-theme"]).status.success());
    assert!(run_build(&default, &["--theme", "default"]).status.success());

    assert_eq!(
        fs::read(fallback.join("homepage.zip")).unwrap(),
        fs::read(default.join("homepage.zip")).unwrap(),
        "fallback build should match the default theme byte for byte"
    );

    let _ = fs::remove_dir_all(&fallback);
    let _ = fs::remove_dir_all(&default);
}

#[test]
fn repeated_builds_are_identical() {
    let first = temp_out("determinism-1");
    let second = temp_out("determinism-2");

    assert!(run_build(&first, &["--theme", "modern"]).status.success());
    assert!(run_build(&second, &["--theme", "modern"]).status.success());

    assert_eq!(
        fs::read(first.join("homepage.zip")).unwrap(),
        fs::read(second.join("homepage.zip")).unwrap()
    );

    let _ = fs::remove_dir_all(&first);
    let _ = fs::remove_dir_all(&second);
}

#[test]
fn build_uses_theme_recorded_by_new() {
    let work = temp_out("new-then-build");
    fs::create_dir_all(&work).unwrap();

    let created = Command::new(homepage_bin())
        .args(["new", "site/index.md", "--theme", "classic", "--quiet"])
        .current_dir(&work)
        .output()
        .expect("failed to run homepage new");
    assert!(created.status.success(), "{}", String::from_utf8_lossy(&created.stderr));
    assert!(work.join("site/homepage.json").exists());

    let built = Command::new(homepage_bin())
        .args(["build", "site/index.md", "--quiet"])
        .current_dir(&work)
        .output()
        .expect("failed to run homepage build");
    assert!(built.status.success(), "{}", String::from_utf8_lossy(&built.stderr));

    let files = entries(&work.join("site/dist/homepage.zip"));
    assert!(files[0].1.contains("<div class=\"wrapper\">"), "{}", files[0].1);

    let _ = fs::remove_dir_all(&work);
}

#[test]
fn unknown_theme_is_reported_once() {
    let out = temp_out("fallback-warning");
    let output = Command::new(homepage_bin())
        .args(["build", fixture("homepage.md").to_str().unwrap(), "--out", out.to_str().unwrap()])
        .args(["--theme", "nonexistent-theme"])
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run homepage build");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("nonexistent-theme").count(), 1, "{stderr}");

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn render_prints_fragment_with_literal_broken_math() {
    let output = Command::new(homepage_bin())
        .args(["render", fixture("broken-math.md").to_str().unwrap()])
        .output()
        .expect("failed to run homepage render");

    assert!(output.status.success());
    let html = String::from_utf8(output.stdout).unwrap();
    assert!(html.contains("<h1 id=\"broken\">Broken</h1>"), "{html}");
    assert!(html.contains("$5 and never closes."), "{html}");
    assert!(!html.contains("<!DOCTYPE"), "render prints a fragment, not a page");
}

#[test]
fn themes_lists_builtin_ids() {
    let output = Command::new(homepage_bin())
        .arg("themes")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run homepage themes");

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    for id in ["classic", "default", "modern"] {
        assert!(text.contains(id), "missing {id} in {text}");
    }
    assert!(text.contains("(default)"));
}

#[test]
fn css_for_unknown_theme_fails() {
    let output = Command::new(homepage_bin())
        .args(["css", "nope"])
        .output()
        .expect("failed to run homepage css");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown theme 'nope'"));
}

#[test]
fn missing_source_file_fails_without_archive() {
    let out = temp_out("missing-source");
    let output = Command::new(homepage_bin())
        .args(["build", "does-not-exist.md", "--out", out.to_str().unwrap(), "--quiet"])
        .output()
        .expect("failed to run homepage build");

    assert!(!output.status.success());
    assert!(!out.join("homepage.zip").exists());
}
