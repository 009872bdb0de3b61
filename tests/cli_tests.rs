use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_textgram");

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new(text: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("book.txt"), text).unwrap();
        Self { dir }
    }

    fn input(&self) -> String {
        self.dir.path().join("book.txt").to_string_lossy().into_owned()
    }

    fn out(&self) -> String {
        self.dir.path().join("out").to_string_lossy().into_owned()
    }

    fn run(&self, cmd: &str, extra: &[&str]) -> Output {
        let input = self.input();
        let out = self.out();
        let mut args = vec![cmd, "--input", input.as_str(), "--output-dir", out.as_str()];
        args.extend_from_slice(extra);
        Command::new(BIN)
            .args(&args)
            .output()
            .expect("Failed to execute binary")
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(Path::new(&self.out()).join(rel)).unwrap()
    }
}

#[test]
fn test_words_command() {
    let ctx = TestContext::new("the cat sat on the cat mat");
    let output = ctx.run("words", &[]);
    assert!(output.status.success());

    let content = ctx.read("words/words.csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "sequence,count,common_words");
    assert_eq!(lines[1], "cat,2,cat");
    assert_eq!(lines[2], "the,2,the");
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_ngrams_command_writes_default_sizes() {
    let ctx = TestContext::new("Nothing is quite like the sound of rain on a tin roof.");
    let output = ctx.run("ngrams", &[]);
    assert!(output.status.success());

    for n in [2, 3, 4] {
        let content = ctx.read(&format!("ngrams/{}grams.csv", n));
        assert!(content.starts_with("sequence,count,common_words\n"));
    }
}

#[test]
fn test_transitions_command_respects_sizes() {
    let ctx = TestContext::new("running fast");
    let output = ctx.run("transitions", &["--ngram-sizes", "2"]);
    assert!(output.status.success());

    assert_eq!(
        ctx.read("transitions/2grams_transitions.csv"),
        "transition,count,common_words\nng fa,1,running fast\n"
    );
    assert!(!Path::new(&ctx.out())
        .join("transitions/3grams_transitions.csv")
        .exists());
}

#[test]
fn test_keep_apostrophes_flag() {
    let ctx = TestContext::new("Don't dont don't it's");
    let output = ctx.run("transitions", &["--ngram-sizes", "3", "--keep-apostrophes"]);
    assert!(output.status.success());

    assert_eq!(
        ctx.read("transitions/3grams_transitions.csv"),
        "transition,count,common_words\nont don,2,don't dont, dont don't\nont its,1,don't it's\n"
    );
}

#[test]
fn test_config_file_applies_and_flags_override_it() {
    let ctx = TestContext::new("running fast");
    let cfg = ctx.dir.path().join("cfg.json");
    fs::write(&cfg, r#"{"ngram_sizes": "3"}"#).unwrap();
    let cfg = cfg.to_string_lossy().into_owned();
    let transitions = Path::new(&ctx.out()).join("transitions");

    let output = ctx.run("transitions", &["--config", cfg.as_str()]);
    assert!(output.status.success());
    assert!(transitions.join("3grams_transitions.csv").exists());
    assert!(!transitions.join("2grams_transitions.csv").exists());

    fs::remove_dir_all(&transitions).unwrap();

    let output = ctx.run("transitions", &["--config", cfg.as_str(), "--ngram-sizes", "2"]);
    assert!(output.status.success());
    assert!(transitions.join("2grams_transitions.csv").exists());
    assert!(!transitions.join("3grams_transitions.csv").exists());
}

#[test]
fn test_missing_input_fails() {
    let ctx = TestContext::new("");
    let out = ctx.out();
    let output = Command::new(BIN)
        .args(["words", "--input", "does/not/exist.txt", "--output-dir", out.as_str()])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_zero_ngram_size_fails() {
    let ctx = TestContext::new("some words here");
    let output = ctx.run("ngrams", &["--ngram-sizes", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_stdin_input() {
    let ctx = TestContext::new("");
    let out = ctx.out();
    let mut child = Command::new(BIN)
        .args(["words", "--output-dir", out.as_str()])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"echo echo echo")
        .unwrap();
    assert!(child.wait().unwrap().success());
    assert_eq!(
        ctx.read("words/words.csv"),
        "sequence,count,common_words\necho,3,echo\n"
    );
}

#[test]
fn test_inspect_prints_saved_report() {
    let ctx = TestContext::new("the cat sat on the cat mat");
    assert!(ctx.run("words", &[]).status.success());

    let report = Path::new(&ctx.out()).join("words/words.csv");
    let output = Command::new(BIN)
        .args(["inspect", report.to_str().unwrap(), "--top", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(" cat "));
    assert!(stdout.contains(" the "));
    assert!(!stdout.contains(" mat "));
}
