//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries hold:
//! the domain stays pure, services talk only to ports, and commands render
//! through `app.renderer()`.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

fn relative(file: &Path) -> String {
    file.strip_prefix(env!("CARGO_MANIFEST_DIR"))
        .unwrap_or(file)
        .display()
        .to_string()
        .replace('\\', "/")
}

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

/// Non-test, non-comment lines of every file under `dir` containing any of
/// `needles`.
fn forbidden_lines(dir: &Path, needles: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(dir) {
        let rel = relative(&file);
        let mut tracker = CfgTestTracker::new();
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            if tracker.process_line(line) {
                continue;
            }
            for needle in needles {
                if line.contains(needle) {
                    violations.push(format!("{rel}:{}: `{needle}`: {line}", i + 1));
                }
            }
        }
    }
    violations
}

// ── Output: no inline JSON branching ──────────────────────────────────────────

#[test]
fn no_inline_json_branching_in_commands() {
    let commands_dir = src_dir().join("commands");

    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&commands_dir) {
        let rel = relative(&file);
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            let lineno = i + 1;
            if line.contains("json: bool") {
                violations.push(format!(
                    "{rel}:{lineno}: found `json: bool` parameter: {line}"
                ));
            }
            let trimmed = line.trim();
            if trimmed.starts_with("if json") || trimmed.starts_with("if !json") {
                violations.push(format!("{rel}:{lineno}: found inline JSON branch: {line}"));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found inline JSON branching in commands/; use app.renderer() instead:\n{}",
        violations.join("\n")
    );
}

// ── Layering ──────────────────────────────────────────────────────────────────

#[test]
fn domain_has_no_io_or_outer_layer_imports() {
    let violations = forbidden_lines(
        &src_dir().join("domain"),
        &[
            "tokio",
            "std::fs",
            "std::net",
            "reqwest",
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
        ],
    );

    assert!(
        violations.is_empty(),
        "Found I/O or outer-layer imports in domain/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn services_depend_only_on_ports_and_domain() {
    let violations = forbidden_lines(
        &src_dir().join("application"),
        &[
            "crate::infra",
            "crate::commands",
            "crate::output",
            "crate::app::",
            "reqwest",
            "std::fs",
        ],
    );

    assert!(
        violations.is_empty(),
        "Found infra/output imports in application/; use port traits instead:\n{}",
        violations.join("\n")
    );
}

#[test]
fn http_client_is_confined_to_the_http_adapter() {
    let violations: Vec<String> = forbidden_lines(&src_dir(), &["reqwest::"])
        .into_iter()
        .filter(|v| !v.starts_with("src/infra/http.rs"))
        .collect();

    assert!(
        violations.is_empty(),
        "Found reqwest usage outside infra/http.rs:\n{}",
        violations.join("\n")
    );
}

#[test]
fn adapters_are_constructed_only_in_app_context() {
    let violations: Vec<String> = forbidden_lines(
        &src_dir(),
        &[
            "HttpConnector::new",
            "AccountFileStore::new",
            "YamlChainRegistry::new",
            "LocalProjectFiles::new",
        ],
    )
    .into_iter()
    .filter(|v| !v.starts_with("src/app.rs") && !v.starts_with("src/infra/"))
    .collect();

    assert!(
        violations.is_empty(),
        "Found adapter construction outside app.rs; commands must go through AppContext:\n{}",
        violations.join("\n")
    );
}
