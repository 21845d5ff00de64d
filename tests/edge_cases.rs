//! Edge case and error handling tests for orchard


use harness::{TestRepo, run_orchard, run_orchard_json};
use serde_json::json;

// ============================================================================
// Configuration errors
// ============================================================================

#[test]
fn test_unknown_language_is_config_error() {
    let repo = TestRepo::new();
    repo.add_rust_crate("demo");

    let (stdout, stderr, code) = run_orchard(repo.path(), &["demo", "-l", "cobol"]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("unsupported language"), "stderr: {}", stderr);
}

#[test]
fn test_recognised_language_without_dialect_is_config_error() {
    let repo = TestRepo::new();
    repo.add_file("svc/main.go", "import \"fmt\"\n");

    let (_stdout, stderr, code) = run_orchard(repo.path(), &["svc", "-l", "go"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("unsupported language"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_max_file_size() {
    let repo = TestRepo::new();
    repo.add_rust_crate("demo");

    let (_stdout, stderr, code) =
        run_orchard(repo.path(), &["demo", "--max-file-size", "huge"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("invalid file size"), "stderr: {}", stderr);
}

#[test]
fn test_missing_directory() {
    let repo = TestRepo::new();
    let (_stdout, stderr, code) = run_orchard(repo.path(), &["nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("cannot access 'nope'"), "stderr: {}", stderr);
}

#[test]
fn test_missing_structure_file() {
    let repo = TestRepo::new();
    let (_stdout, _stderr, code) =
        run_orchard(repo.path(), &["--from-structure", "missing.json"]);
    assert_eq!(code, 1);
}

#[test]
fn test_structure_file_not_an_object() {
    let repo = TestRepo::new();
    repo.add_file("bad.json", "[1, 2, 3]");
    let (_stdout, stderr, code) = run_orchard(repo.path(), &["--from-structure", "bad.json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("JSON error"), "stderr: {}", stderr);
}

#[test]
fn test_structure_file_with_malformed_entries() {
    let repo = TestRepo::new();
    repo.add_file(
        "partial.json",
        r#"{"demo": {"lib.rs": ["std::io"], "bogus": 42, "nums.rs": [1, 2]}}"#,
    );
    let value = run_orchard_json(repo.path(), &["--from-structure", "partial.json", "--json"]);
    assert_eq!(value, json!({"demo": {"lib.rs": ["std::io"]}}));
}

// ============================================================================
// Malformed source
// ============================================================================

#[test]
fn test_unbalanced_braces_do_not_abort() {
    let repo = TestRepo::new();
    repo.add_file("k/src/lib.rs", "use a::{b, c}};\nuse d::e;\n");

    let value = run_orchard_json(repo.path(), &["k", "--json"]);
    assert_eq!(value, json!({"k": {"src": {"lib.rs": ["d::e"]}}}));
}

#[test]
fn test_unterminated_group_swallows_rest_of_file() {
    let repo = TestRepo::new();
    repo.add_file("k/src/lib.rs", "use a::b;\nuse c::{\n    d,\nfn main() {}\nuse e::f;\n");

    let value = run_orchard_json(repo.path(), &["k", "--json"]);
    assert_eq!(value["k"]["src"]["lib.rs"], json!(["a::b"]));
}

#[test]
fn test_file_without_imports_still_listed() {
    let repo = TestRepo::new();
    repo.add_file("k/src/main.rs", "fn main() {\n    let users = vec![1];\n}\n");

    let value = run_orchard_json(repo.path(), &["k", "--json"]);
    assert_eq!(value, json!({"k": {"src": {"main.rs": []}}}));
}

#[test]
fn test_empty_and_whitespace_files() {
    let repo = TestRepo::new();
    repo.add_file("k/empty.rs", "");
    repo.add_file("k/blank.rs", "   \n\n\t\n");

    let value = run_orchard_json(repo.path(), &["k", "--json"]);
    assert_eq!(value, json!({"k": {"blank.rs": [], "empty.rs": []}}));
}

#[test]
fn test_invalid_utf8_file_skipped() {
    let repo = TestRepo::new();
    repo.add_file("k/good.rs", "use a::b;\n");
    std::fs::write(repo.path().join("k/binary.rs"), [0xFF, 0xFE, 0x00]).unwrap();

    let value = run_orchard_json(repo.path(), &["k", "--json"]);
    assert_eq!(value, json!({"k": {"good.rs": ["a::b"]}}));
}

// ============================================================================
// Walking
// ============================================================================

#[test]
fn test_empty_directory() {
    let repo = TestRepo::new();
    std::fs::create_dir(repo.path().join("empty")).unwrap();

    let (stdout, _stderr, code) = run_orchard(repo.path(), &["empty"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("0 directories, 0 files, 0 imports"));

    let graph = run_orchard_json(repo.path(), &["empty", "--graph"]);
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 1);
    assert_eq!(graph["links"], json!([]));
}

#[test]
fn test_max_file_size_custom_limit() {
    let repo = TestRepo::new();
    repo.add_file("k/small.rs", "use a::b;\n");
    repo.add_file("k/large.rs", &format!("use c::d;\n{}", "// pad\n".repeat(200)));

    let value = run_orchard_json(repo.path(), &["k", "--json", "--max-file-size", "1K"]);
    assert_eq!(value, json!({"k": {"small.rs": ["a::b"]}}));
}

#[test]
fn test_hidden_files_skipped_unless_all() {
    let repo = TestRepo::new();
    repo.add_file("k/.hidden/secret.rs", "use a::b;\n");
    repo.add_file("k/visible.rs", "use c::d;\n");

    let value = run_orchard_json(repo.path(), &["k", "--json"]);
    assert!(value["k"].get(".hidden").is_none());

    let value = run_orchard_json(repo.path(), &["k", "--json", "-a"]);
    assert_eq!(value["k"][".hidden"]["secret.rs"], json!(["a::b"]));
}

#[test]
fn test_unicode_and_spaces_in_names() {
    let repo = TestRepo::new();
    repo.add_file("k/mödule/my file.rs", "use crate::x;\n");

    let value = run_orchard_json(repo.path(), &["k", "--json"]);
    assert_eq!(value["k"]["mödule"]["my file.rs"], json!(["k::x"]));
}

#[test]
fn test_deep_nesting_super_resolution() {
    let repo = TestRepo::new();
    repo.add_file("k/a/b/c/d/leaf.rs", "use super::sibling;\n");

    let value = run_orchard_json(repo.path(), &["k", "--json"]);
    assert_eq!(
        value["k"]["a"]["b"]["c"]["d"]["leaf.rs"],
        json!(["k::a::b::c::d::sibling"])
    );
}

#[cfg(unix)]
#[test]
fn test_symlink_to_parent_no_infinite_loop() {
    use std::os::unix::fs::symlink;

    let repo = TestRepo::new();
    repo.add_file("k/sub/file.rs", "use a::b;\n");
    symlink("..", repo.path().join("k/sub/parent")).unwrap();

    let value = run_orchard_json(repo.path(), &["k", "--json", "-a"]);
    assert_eq!(value, json!({"k": {"sub": {"file.rs": ["a::b"]}}}));
}

#[test]
fn test_many_files() {
    let repo = TestRepo::new();
    repo.add_many_rust_files("big", 300);

    let (stdout, stderr, code) = run_orchard(repo.path(), &["big", "--stats", "--json"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["files"], 300);
}
