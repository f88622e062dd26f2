//! Hygiene: source-level rules checked at test time.
//!
//! Scans the crate's production sources for patterns that panic in the browser
//! or drop errors without looking at them. Bindings must degrade, never crash
//! the page, so every budget is zero and never grows.

use std::fs;
use std::path::{Path, PathBuf};

/// A production source file and its text.
struct Source {
    path: PathBuf,
    text: String,
}

/// Production `.rs` files under `src/`; `_test.rs` siblings are skipped.
fn sources() -> Vec<Source> {
    let mut out = Vec::new();
    walk(Path::new(env!("CARGO_MANIFEST_DIR")).join("src").as_path(), &mut out);
    out
}

fn walk(dir: &Path, out: &mut Vec<Source>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rust = path.extension().is_some_and(|ext| ext == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if !is_rust || is_test {
            continue;
        }
        if let Ok(text) = fs::read_to_string(&path) {
            out.push(Source { path, text });
        }
    }
}

/// Fail with every offending file when `pattern` appears more than `budget` times.
fn enforce(pattern: &str, budget: usize, why: &str) {
    let files = sources();
    assert!(!files.is_empty(), "no sources found under src/");

    let hits: Vec<(String, usize)> = files
        .iter()
        .map(|file| (file.path.display().to_string(), file.text.lines().filter(|line| line.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect();
    let found: usize = hits.iter().map(|(_, count)| count).sum();
    let listing = hits.iter().map(|(path, count)| format!("  {path}: {count}")).collect::<Vec<_>>().join("\n");

    assert!(found <= budget, "`{pattern}` ({why}): found {found}, budget {budget}\n{listing}");
}

// Panics.

#[test]
fn no_unwrap() {
    enforce(".unwrap()", 0, "panics on None/Err");
}

#[test]
fn no_expect() {
    enforce(".expect(", 0, "panics on None/Err");
}

#[test]
fn no_panic() {
    enforce("panic!(", 0, "aborts the page's wasm instance");
}

#[test]
fn no_unreachable() {
    enforce("unreachable!(", 0, "aborts the page's wasm instance");
}

#[test]
fn no_todo() {
    enforce("todo!(", 0, "unfinished code path");
}

#[test]
fn no_unimplemented() {
    enforce("unimplemented!(", 0, "unfinished code path");
}

// Silent loss.

#[test]
fn no_discarded_results() {
    enforce("let _ =", 0, "drops a result without inspecting it");
}

#[test]
fn no_dot_ok() {
    enforce(".ok()", 0, "turns an error into None without logging it");
}

// Structure.

#[test]
fn no_dead_code_allowances() {
    enforce("#[allow(dead_code)]", 0, "unused code should be deleted");
}
