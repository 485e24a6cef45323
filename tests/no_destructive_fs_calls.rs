// tests/no_destructive_fs_calls.rs
// Fails if code outside the classification executer can delete or move files.
// Candidates are only ever read; the executer is the one place that rewrites
// the destination tree.

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.is_dir() {
                collect_rs_files(&p, files);
            } else if p.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(p);
            }
        }
    }
}

fn is_whitelisted(path: &Path) -> bool {
    let p = path.to_string_lossy();
    p.contains("/classifier/executers.rs") || p.contains("\\classifier\\executers.rs")
}

/// Drops everything from the first `#[cfg(test)]` on; tests may write scratch files freely.
fn runtime_part(content: &str) -> &str {
    match content.find("#[cfg(test)]") {
        Some(idx) => &content[..idx],
        None => content,
    }
}

#[test]
fn no_destructive_fs_calls_in_runtime() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let src_dir = Path::new(manifest_dir).join("src");

    let mut files = Vec::new();
    collect_rs_files(&src_dir, &mut files);
    assert!(!files.is_empty(), "no sources found under {}", src_dir.display());

    let bad_patterns = [
        "remove_dir_all(",
        "remove_file(",
        "fs::rename(",
        "fs_extra::dir::move_dir(",
        "fs_extra::remove_items(",
    ];

    let mut offenders: Vec<(String, String)> = Vec::new();

    for file in files {
        if is_whitelisted(&file) { continue; }
        let content = match fs::read_to_string(&file) {
            Ok(c) => c,
            Err(_) => continue,
        };
        let runtime = runtime_part(&content);

        for pat in &bad_patterns {
            if runtime.contains(pat) {
                offenders.push((file.to_string_lossy().to_string(), pat.to_string()));
            }
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::from("Destructive filesystem calls found in runtime code:\n");
        for (file, pat) in offenders {
            msg.push_str(&format!("  {} contains pattern '{}': route through classifier::executers instead\n", file, pat));
        }
        panic!("{}", msg);
    }
}
