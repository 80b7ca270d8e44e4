//! Integration tests for the Geoulah CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BOOKS_JSON: &str = r#"{
  "books": [
    {
      "id": "miataisrael",
      "slug": "miataisrael",
      "title": {"he": "מאה ישראל", "fr": "Cent Israël"},
      "author": "Rav Cohen",
      "featured": true,
      "pages": 240,
      "chapters": [
        {"id": "ch1", "slug": "tanakh", "title": {"he": "תנ\"ך", "fr": "Tanakh"}, "contentFile": "content/miataisrael/tanakh.html"},
        {"id": "ch2", "slug": "talmud", "title": {"he": "תלמוד", "fr": "Talmud"}, "contentFile": "content/miataisrael/talmud.html"}
      ]
    },
    {
      "id": "book-2",
      "title": {"he": "ספר שני", "fr": "Deuxième livre"},
      "status": "coming_soon"
    }
  ]
}"#;

const TANAKH_HTML: &str = r#"<html><body><div id="entete">banner</div><div id="contenu"><p>Bereshit</p><img src="img/map.png"><a href="talmud.html">next</a><script>x()</script></div></body></html>"#;

/// Temporary site plus preference directory
struct TestSite {
    site: TempDir,
    state: TempDir,
}

impl TestSite {
    fn new() -> Self {
        let site = TempDir::new().expect("Failed to create temp dir");
        let state = TempDir::new().expect("Failed to create temp dir");
        write(site.path(), "data/books.json", BOOKS_JSON);
        write(site.path(), "content/miataisrael/tanakh.html", TANAKH_HTML);
        Self { site, state }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("geoulah").unwrap();
        cmd.env_remove("RUST_LOG")
            .env_remove("LANG")
            .env_remove("LC_ALL")
            .env_remove("LC_MESSAGES")
            .arg("--site")
            .arg(self.site.path())
            .arg("--state-dir")
            .arg(self.state.path());
        cmd
    }
}

fn write(root: &Path, path: &str, body: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("geoulah").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("read"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("lang"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("geoulah").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("geoulah"));
}

#[test]
fn test_render_help() {
    let mut cmd = Command::cargo_bin("geoulah").unwrap();
    cmd.args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--out"))
        .stdout(predicate::str::contains("--languages"));
}

// ============================================================================
// List / Info
// ============================================================================

#[test]
fn test_list_in_hebrew_by_default() {
    let site = TestSite::new();
    site.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("miataisrael"))
        .stdout(predicate::str::contains("מאה ישראל"))
        .stdout(predicate::str::contains("בקרוב"));
}

#[test]
fn test_list_in_french() {
    let site = TestSite::new();
    site.cmd()
        .args(["--lang", "fr", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cent Israël"))
        .stdout(predicate::str::contains("Deuxième livre"));
}

#[test]
fn test_list_filters_json() {
    let site = TestSite::new();
    let output = site
        .cmd()
        .args(["list", "--status", "coming_soon", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let books: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["slug"], "book-2");

    let output = site
        .cmd()
        .args(["list", "--featured", "--json"])
        .output()
        .unwrap();
    let books: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(books.as_array().unwrap().len(), 1);
    assert_eq!(books[0]["id"], "miataisrael");
}

#[test]
fn test_list_unknown_status() {
    let site = TestSite::new();
    site.cmd()
        .args(["list", "--status", "sold_out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown status"));
}

#[test]
fn test_list_without_book_data() {
    let site = TempDir::new().unwrap();
    let state = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("geoulah").unwrap();
    cmd.arg("--site")
        .arg(site.path())
        .arg("--state-dir")
        .arg(state.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load book data"));
}

#[test]
fn test_info_by_id() {
    let site = TestSite::new();
    site.cmd()
        .args(["--lang", "fr", "info", "miataisrael"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cent Israël"))
        .stdout(predicate::str::contains("Rav Cohen"))
        .stdout(predicate::str::contains("240"))
        .stdout(predicate::str::contains("Table des matières"))
        .stdout(predicate::str::contains("talmud"));
}

#[test]
fn test_info_missing_book() {
    let site = TestSite::new();
    site.cmd()
        .args(["info", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to find book nope"));
}

// ============================================================================
// Read
// ============================================================================

#[test]
fn test_read_normalizes_fragment() {
    let site = TestSite::new();
    site.cmd()
        .args(["read", "miataisrael", "ch1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bereshit"))
        .stdout(predicate::str::contains("content/miataisrael/img/map.png"))
        .stdout(predicate::str::contains("chapter=talmud"))
        .stdout(predicate::str::contains("banner").not())
        .stdout(predicate::str::contains("<script").not());
}

#[test]
fn test_read_raw() {
    let site = TestSite::new();
    site.cmd()
        .args(["read", "miataisrael", "tanakh", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id=\"entete\""))
        .stdout(predicate::str::contains("src=\"img/map.png\""));
}

#[test]
fn test_read_missing_chapter_file() {
    let site = TestSite::new();
    site.cmd()
        .args(["read", "miataisrael", "talmud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("content/miataisrael/talmud.html"));
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn test_render_one_file_per_language() {
    let site = TestSite::new();
    let out = TempDir::new().unwrap();

    site.cmd()
        .args(["render", "book.html?id=miataisrael", "--languages", "he,fr", "--out"])
        .arg(out.path())
        .assert()
        .success();

    let he = fs::read_to_string(out.path().join("book.he.html")).unwrap();
    let fr = fs::read_to_string(out.path().join("book.fr.html")).unwrap();
    assert!(he.contains("<html lang=\"he\" dir=\"rtl\">"));
    assert!(he.contains("מאה ישראל"));
    assert!(fr.contains("<html lang=\"fr\" dir=\"ltr\">"));
    assert!(fr.contains("Cent Israël"));
}

#[test]
fn test_render_to_stdout() {
    let site = TestSite::new();
    site.cmd()
        .args(["render", "chapter.html?book=miataisrael&chapter=tanakh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("Bereshit"));
}

#[test]
fn test_render_missing_book_still_writes_error_page() {
    let site = TestSite::new();
    site.cmd()
        .args(["render", "book.html?id=nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("הספר לא נמצא"));
}

#[test]
fn test_render_invalid_route() {
    let site = TestSite::new();
    site.cmd()
        .args(["render", "purchase.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid route"));
}

// ============================================================================
// Lang
// ============================================================================

#[test]
fn test_lang_store_and_show() {
    let site = TestSite::new();

    site.cmd()
        .args(["lang", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preferred language: fr"));

    site.cmd()
        .arg("lang")
        .assert()
        .success()
        .stdout(predicate::str::contains("Language:    fr"))
        .stdout(predicate::str::contains("Stored:      fr"))
        .stdout(predicate::str::contains("Direction:   ltr"));

    // the stored choice carries over to other commands
    site.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cent Israël"));
}

#[test]
fn test_lang_rejects_unsupported() {
    let site = TestSite::new();
    site.cmd()
        .args(["lang", "de"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language"));
}
