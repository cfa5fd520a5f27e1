use clap::Parser;
use lexlower_core::LowerError;
use std::path::{Path, PathBuf};

use super::args::CliArgs;
use super::driver::{
    EXIT_DIAGNOSTICS, EXIT_SUCCESS, RunResult, collect_input_files, print_results, run,
};
use super::reporter::Reporter;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["lexlower"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).expect("args should parse")
}

fn printed(result: &RunResult) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    print_results(result, &Reporter::new(false), &mut out, &mut err).expect("print");
    (
        String::from_utf8(out).expect("utf-8 stdout"),
        String::from_utf8(err).expect("utf-8 stderr"),
    )
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn collects_js_files_from_directories_in_name_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "src/b.js", "");
    write_file(dir.path(), "src/a.js", "");
    write_file(dir.path(), "src/nested/c.js", "");
    write_file(dir.path(), "src/notes.txt", "");

    let files = collect_input_files(&[PathBuf::from("src")], dir.path()).expect("collect");
    let relative: Vec<_> = files.iter().map(|file| file.relative.clone()).collect();
    assert_eq!(
        relative,
        vec![
            PathBuf::from("a.js"),
            PathBuf::from("b.js"),
            PathBuf::from("nested").join("c.js"),
        ]
    );
}

#[test]
fn explicit_files_are_taken_as_given() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), "lib/script.mjs", "");
    let files = collect_input_files(&[PathBuf::from("lib/script.mjs")], dir.path()).expect("collect");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, path);
    assert_eq!(files[0].relative, PathBuf::from("script.mjs"));
}

#[test]
fn missing_inputs_are_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = collect_input_files(&[PathBuf::from("nope.js")], dir.path()).expect_err("missing");
    assert_eq!(error.to_string(), "file not found: nope.js");
}

// =============================================================================
// Runs
// =============================================================================

#[test]
fn lowers_a_single_file_to_stdout() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "a.js", "let a = 1;\n{ let a = 2; }\n");

    let result = run(&args(&["a.js"]), dir.path()).expect("run");
    assert_eq!(result.exit_code(), EXIT_SUCCESS);
    let (out, err) = printed(&result);
    assert_eq!(out, "var a = 1;\n{ var a$0 = 2; }\n");
    assert!(err.is_empty(), "{err}");
}

#[test]
fn reports_diagnostics_with_file_and_line() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "bad.js", "const a = 1;\na = 2;\n");

    let result = run(&args(&["bad.js"]), dir.path()).expect("run");
    assert_eq!(result.exit_code(), EXIT_DIAGNOSTICS);
    assert_eq!(result.error_count(), 1);
    let (out, err) = printed(&result);
    assert!(out.is_empty(), "{out}");
    assert_eq!(
        err,
        "bad.js:2 - error[1005]: can't assign to const variable a\nFound 1 error in 1 file.\n"
    );
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "lexlower-config.json", r#"{"disallowUnknownReferences": "true"}"#);
    write_file(dir.path(), "a.js", "undeclared();\n");

    let result = run(&args(&["a.js"]), dir.path()).expect("run");
    let Err(LowerError::Diagnostics(diagnostics)) = &result.files[0].outcome else {
        panic!("expected diagnostics");
    };
    assert_eq!(
        diagnostics[0].message_text,
        "reference to unknown global variable undeclared"
    );
}

#[test]
fn stats_replace_the_source() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "a.js", "const a = 1;\nlet b = a;\n{ let b = 2; }\n");

    let result = run(&args(&["--stats", "a.js"]), dir.path()).expect("run");
    let (out, _) = printed(&result);
    assert_eq!(out, "0.50x const/let ratio (1 consts, 2 lets)\nline 3: b => b$0\n");
}

#[test]
fn stats_for_several_files_are_labelled() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "src/a.js", "const a = 1;\n");
    write_file(dir.path(), "src/b.js", "let b = 1;\n");

    let result = run(&args(&["--stats", "src"]), dir.path()).expect("run");
    let (out, _) = printed(&result);
    let a = Path::new("src").join("a.js");
    let b = Path::new("src").join("b.js");
    assert_eq!(
        out,
        format!(
            "{}:\n∞ const/let ratio (1 consts, 0 lets)\n{}:\n0.0x const/let ratio (0 consts, 1 lets)\n",
            a.display(),
            b.display()
        )
    );
}

#[test]
fn several_files_need_an_out_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "a.js", "");
    write_file(dir.path(), "b.js", "");
    let error = run(&args(&["a.js", "b.js"]), dir.path()).expect_err("needs --out-dir");
    assert!(error.to_string().contains("--out-dir"), "{error}");
}

#[test]
fn out_dir_mirrors_the_input_tree() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "src/a.js", "let a = 1;\n");
    write_file(dir.path(), "src/lib/b.js", "const b = 2;\n");
    write_file(dir.path(), "src/lib/broken.js", "const c = 1; c++;\n");

    let result = run(&args(&["--out-dir", "dist", "src"]), dir.path()).expect("run");
    assert_eq!(result.exit_code(), EXIT_DIAGNOSTICS);

    let read = |path: &str| std::fs::read_to_string(dir.path().join(path)).expect("output");
    assert_eq!(read("dist/a.js"), "var a = 1;\n");
    assert_eq!(read("dist/lib/b.js"), "var b = 2;\n");
    assert!(!dir.path().join("dist/lib/broken.js").exists());

    let (out, err) = printed(&result);
    assert!(out.is_empty(), "{out}");
    assert!(err.contains("can't assign to const variable c"), "{err}");
}

#[test]
fn emit_tree_prints_json() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "a.js", "let a = 1;\n");

    let result = run(&args(&["--emit-tree", "a.js"]), dir.path()).expect("run");
    let (out, _) = printed(&result);
    let tree: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(tree["type"], "Program");
    assert_eq!(tree["body"][0]["kind"], "var");
}

#[test]
fn warnings_are_printed_without_failing() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(dir.path(), "a.js", "function f() {\n    let n = 1;\n    return n;\n}\n");

    let result = run(&args(&["--detect-unmodified-lets", "a.js"]), dir.path()).expect("run");
    assert_eq!(result.exit_code(), EXIT_SUCCESS);
    let (out, err) = printed(&result);
    assert_eq!(out, "function f() {\n    var n = 1;\n    return n;\n}\n");
    assert!(err.starts_with("a.js:2 - warning[1009]: n is declared with let"), "{err}");
}
