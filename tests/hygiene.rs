//! Source hygiene for the library and binary.
//!
//! Production files under `src/` (sibling `_test.rs` files are exempt) may not
//! crash the process, swallow errors, or write to the terminal. Terminal output
//! belongs to `main.rs`; library code reports through `tracing`.

use std::fs;
use std::path::{Path, PathBuf};

/// A forbidden pattern and the files allowed to contain it.
struct Rule {
    pattern: &'static str,
    reason: &'static str,
    exempt: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", reason: "panics on None/Err", exempt: &[] },
    Rule { pattern: ".expect(", reason: "panics on None/Err", exempt: &[] },
    Rule { pattern: "panic!(", reason: "crashes the process", exempt: &[] },
    Rule { pattern: "unreachable!(", reason: "crashes the process", exempt: &[] },
    Rule { pattern: "todo!(", reason: "unfinished code", exempt: &[] },
    Rule { pattern: "unimplemented!(", reason: "unfinished code", exempt: &[] },
    Rule { pattern: "let _ =", reason: "discards a result unread", exempt: &[] },
    Rule { pattern: ".ok()", reason: "drops the error", exempt: &[] },
    Rule { pattern: "#[allow(dead_code)]", reason: "hides unused code", exempt: &[] },
    Rule { pattern: "println!(", reason: "library code logs through tracing", exempt: &["main.rs"] },
    Rule { pattern: "eprintln!(", reason: "library code logs through tracing", exempt: &["main.rs"] },
    Rule { pattern: "std::process::exit", reason: "skips destructors and autosave shutdown", exempt: &[] },
];

fn production_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| panic!("read {}: {e}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs")
            && !path.file_name().is_some_and(|n| n.to_string_lossy().ends_with("_test.rs"))
        {
            out.push(path);
        }
    }
}

/// `path:line: text` for every line breaking `rule`.
fn violations(files: &[(PathBuf, String)], rule: &Rule) -> Vec<String> {
    let pattern = rule.pattern;
    files
        .iter()
        .filter(|(path, _)| !path.file_name().is_some_and(|n| rule.exempt.iter().any(|ex| n == *ex)))
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(move |(_, line)| line.contains(pattern))
                .map(move |(n, line)| format!("  {}:{}: {}", path.display(), n + 1, line.trim()))
        })
        .collect()
}

fn load_sources() -> Vec<(PathBuf, String)> {
    let mut paths = Vec::new();
    production_files(Path::new("src"), &mut paths);
    paths.sort();
    paths
        .into_iter()
        .map(|path| {
            let content = fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
            (path, content)
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = load_sources();
    let names: Vec<_> = files.iter().filter_map(|(p, _)| p.file_name()).map(|n| n.to_string_lossy()).collect();
    for expected in ["lib.rs", "main.rs", "store.rs", "persistence.rs"] {
        assert!(names.iter().any(|n| n == expected), "{expected} missing from {names:?}");
    }
    assert!(names.iter().all(|n| !n.ends_with("_test.rs")));
}

#[test]
fn production_sources_follow_every_rule() {
    let files = load_sources();
    let report: Vec<String> = RULES
        .iter()
        .filter_map(|rule| {
            let hits = violations(&files, rule);
            (!hits.is_empty()).then(|| format!("`{}` ({}):\n{}", rule.pattern, rule.reason, hits.join("\n")))
        })
        .collect();
    assert!(report.is_empty(), "hygiene violations:\n{}", report.join("\n"));
}

#[test]
fn terminal_output_stays_in_main() {
    let files = load_sources();
    let printing: Vec<_> = files
        .iter()
        .filter(|(_, content)| content.contains("println!("))
        .filter_map(|(path, _)| path.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    assert_eq!(printing, ["main.rs"]);
}
