//! Command-line tests for bedfusion.
//!
//! Covers:
//! 1. Default merge + lexicographic sort, headers, multiple inputs
//! 2. Sort types (nat, ccs, fidx)
//! 3. Padding policies and the fasta index
//! 4. Fission, deduplication, strand/feature grouping
//! 5. Configuration file and environment variables
//! 6. Error handling for invalid configuration and malformed input

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

// =============================================================================
// Helper functions
// =============================================================================

fn create_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bedfusion"));
    for var in [
        "CONFIG_FILE",
        "OUTPUT_FILE",
        "FASTA_IDX",
        "STRAND_COL",
        "FEAT_COL",
        "SORT_TYPE",
        "CHR_ORDER",
        "DEDUPLICATE",
        "NO_MERGE",
        "OVERLAP",
        "PADDING",
        "PADDING_TYPE",
        "FIRST_BASE",
        "FISSION",
        "SPLIT_SIZE",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn run_bedfusion(args: &[&str]) -> Output {
    command()
        .args(args)
        .output()
        .expect("Failed to run bedfusion")
}

fn run_bedfusion_with_stdin(args: &[&str], stdin_content: &str) -> Output {
    let mut child = command()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn bedfusion");

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(stdin_content.as_bytes()).unwrap();
    }

    child.wait_with_output().expect("Failed to wait for bedfusion")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap()
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_default_merges_and_sorts_lexicographically() {
    let bed = create_file("chr2\t10\t20\nchr10\t1\t5\nchr1\t15\t30\nchr1\t1\t14\n");

    let output = run_bedfusion(&[path(&bed)]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "chr1\t1\t30\nchr10\t1\t5\nchr2\t10\t20\n");
}

#[test]
fn test_headers_are_kept_and_inputs_joined() {
    let a = create_file("track name=a\n#comment\nchr1\t1\t5\ta\n");
    let b = create_file("chr1\t6\t10\tb\n");

    let output = run_bedfusion(&[path(&a), path(&b)]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "track name=a\n#comment\nchr1\t1\t10\ta,b\n");
}

#[test]
fn test_stdin_input() {
    let output = run_bedfusion_with_stdin(&["-", "--no-merge"], "chr2\t1\t2\nchr1\t1\t2\n");

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "chr1\t1\t2\nchr2\t1\t2\n");
}

#[test]
fn test_output_file() {
    let bed = create_file("chr1\t1\t5\n");
    let out = NamedTempFile::new().unwrap();

    let output = run_bedfusion(&[path(&bed), "-o", path(&out)]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());
    assert_eq!(std::fs::read_to_string(out.path()).unwrap(), "chr1\t1\t5\n");
}

#[test]
fn test_overlap_minus_one_keeps_touching_regions() {
    let bed = create_file("chr1\t1\t5\nchr1\t6\t10\n");

    let touching = run_bedfusion(&[path(&bed)]);
    assert_eq!(stdout(&touching), "chr1\t1\t10\n");

    let strict = run_bedfusion(&[path(&bed), "--overlap", "-1"]);
    assert!(strict.status.success(), "{}", stderr(&strict));
    assert_eq!(stdout(&strict), "chr1\t1\t5\nchr1\t6\t10\n");
}

// =============================================================================
// Sort types
// =============================================================================

#[test]
fn test_natural_sort() {
    let bed = create_file("chr10\t1\t2\nchr2\t1\t2\nchr1\t1\t2\n");

    let output = run_bedfusion(&[path(&bed), "-s", "nat"]);

    assert_eq!(stdout(&output), "chr1\t1\t2\nchr2\t1\t2\nchr10\t1\t2\n");
}

#[test]
fn test_custom_chromosome_sort() {
    let bed = create_file("chr10\t1\t2\nchrX\t1\t2\nchr2\t1\t2\nchrUn\t1\t2\n");

    let custom = run_bedfusion(&[path(&bed), "-s", "ccs", "--chr-order", "chrX,chr10"]);
    assert_eq!(
        stdout(&custom),
        "chrX\t1\t2\nchr10\t1\t2\nchr2\t1\t2\nchrUn\t1\t2\n"
    );

    let human = run_bedfusion(&[path(&bed), "-s", "ccs"]);
    assert_eq!(
        stdout(&human),
        "chr2\t1\t2\nchr10\t1\t2\nchrX\t1\t2\nchrUn\t1\t2\n"
    );
}

#[test]
fn test_fasta_index_sort() {
    let bed = create_file("chr1\t1\t2\nchr2\t1\t2\nchr3\t1\t2\n");
    let fai = create_file("chr3\t100\nchr1\t100\n");

    let output = run_bedfusion(&[path(&bed), "-s", "fidx", "--fasta-idx", path(&fai)]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "chr3\t1\t2\nchr1\t1\t2\nchr2\t1\t2\n");
}

// =============================================================================
// Padding
// =============================================================================

#[test]
fn test_padding_clamps_to_index() {
    let bed = create_file("1\t50\t51\n");
    let fai = create_file("1\t100\t0\t60\t61\n");

    let small = run_bedfusion(&[path(&bed), "--padding", "10", "--fasta-idx", path(&fai)]);
    assert_eq!(stdout(&small), "1\t40\t61\n");

    let large = run_bedfusion(&[path(&bed), "--padding", "1000", "--fasta-idx", path(&fai)]);
    assert_eq!(stdout(&large), "1\t1\t100\n");

    let zero = run_bedfusion(&[
        path(&bed),
        "--padding",
        "1000",
        "--first-base",
        "0",
        "--fasta-idx",
        path(&fai),
    ]);
    assert_eq!(stdout(&zero), "1\t0\t100\n");
}

#[test]
fn test_padding_fail_policy() {
    let bed = create_file("1\t50\t51\n2\t50\t51\n");
    let fai = create_file("1\t100\n");

    let output = run_bedfusion(&[path(&bed), "--padding", "10", "--fasta-idx", path(&fai)]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("chromosome 2"), "{}", err);
    assert!(err.contains(path(&fai)), "{}", err);
}

#[test]
fn test_padding_warn_policy() {
    let bed = create_file("1\t50\t51\n2\t50\t51\n");
    let fai = create_file("1\t100\n");

    let output = run_bedfusion(&[
        path(&bed),
        "--padding",
        "10",
        "--padding-type",
        "warn",
        "--fasta-idx",
        path(&fai),
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1\t40\t61\n2\t50\t51\n");
    let err = stderr(&output);
    assert_eq!(err.matches("chromosomes not in fasta index file").count(), 1, "{}", err);
}

#[test]
fn test_padding_force_policy_without_index() {
    let bed = create_file("1\t50\t51\n");

    let output = run_bedfusion(&[path(&bed), "--padding", "1000", "--padding-type", "force"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1\t1\t1051\n");
    assert!(stderr(&output).contains("padding without bounds"));
}

#[test]
fn test_extreme_padding_and_overlap_do_not_overflow() {
    let bed = create_file("chr1\t1\t5\nchr1\t100\t200\n");

    let padded = run_bedfusion(&[
        path(&bed),
        "--padding",
        "9223372036854775807",
        "--padding-type",
        "force",
    ]);
    assert!(padded.status.success(), "{}", stderr(&padded));
    assert_eq!(stdout(&padded), "chr1\t1\t9223372036854775807\n");

    let merged = run_bedfusion(&[path(&bed), "--overlap", "9223372036854775807"]);
    assert!(merged.status.success(), "{}", stderr(&merged));
    assert_eq!(stdout(&merged), "chr1\t1\t200\n");
}

#[test]
fn test_padding_without_index_is_rejected() {
    let bed = create_file("1\t50\t51\n");

    let output = run_bedfusion(&[path(&bed), "--padding", "10"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("--fasta-idx"));
}

// =============================================================================
// Fission, deduplication and grouping
// =============================================================================

#[test]
fn test_fission() {
    let bed = create_file("1\t1\t100\n");

    let output = run_bedfusion(&[path(&bed), "--fission", "--split-size", "24"]);

    assert_eq!(stdout(&output), "1\t1\t25\n1\t26\t50\n1\t51\t75\n1\t76\t100\n");
}

#[test]
fn test_fission_rejects_zero_split_size() {
    let bed = create_file("1\t1\t100\n");

    let output = run_bedfusion(&[path(&bed), "--fission", "--split-size", "0"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("split size"));
}

#[test]
fn test_deduplicate_without_merge() {
    let bed = create_file("chr1\t1\t5\ta\nchr2\t1\t5\ta\nchr1\t1\t5\ta\n");

    let output = run_bedfusion(&[path(&bed), "--no-merge", "-d"]);

    assert_eq!(stdout(&output), "chr1\t1\t5\ta\nchr2\t1\t5\ta\n");
}

#[test]
fn test_strand_and_feature_grouping() {
    let bed = create_file("1\t1\t10\t+\tA\n1\t5\t15\t-\tA\n1\t8\t12\t+\tA\n1\t5\t15\t+\tB\n");

    let grouped = run_bedfusion(&[path(&bed), "--strand-col", "4", "--feat-col", "5"]);
    assert!(grouped.status.success(), "{}", stderr(&grouped));
    assert_eq!(
        stdout(&grouped),
        "1\t1\t12\t+\tA\n1\t5\t15\t+\tB\n1\t5\t15\t-\tA\n"
    );

    let ungrouped = run_bedfusion(&[path(&bed)]);
    assert_eq!(stdout(&ungrouped), "1\t1\t15\t+,-\tA,B\n");
}

// =============================================================================
// Configuration sources
// =============================================================================

#[test]
fn test_config_file() {
    let bed = create_file("chr10\t1\t2\nchr2\t1\t2\n");
    let config = create_file("sort-type = \"nat\"\n");

    let output = run_bedfusion(&[path(&bed), "--config", path(&config)]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "chr2\t1\t2\nchr10\t1\t2\n");
}

#[test]
fn test_flags_override_config_file_and_file_overrides_env() {
    let bed = create_file("chr10\t1\t2\nchr2\t1\t2\n");
    let config = create_file("sort-type = \"nat\"\n");

    let flag = run_bedfusion(&[path(&bed), "--config", path(&config), "-s", "lex"]);
    assert_eq!(stdout(&flag), "chr10\t1\t2\nchr2\t1\t2\n");

    let env = command()
        .args([path(&bed), "--config", path(&config)])
        .env("SORT_TYPE", "lex")
        .output()
        .unwrap();
    assert_eq!(stdout(&env), "chr2\t1\t2\nchr10\t1\t2\n");
}

#[test]
fn test_environment_variable() {
    let bed = create_file("chr10\t1\t2\nchr2\t1\t2\n");

    let output = command()
        .arg(path(&bed))
        .env("SORT_TYPE", "nat")
        .output()
        .unwrap();

    assert_eq!(stdout(&output), "chr2\t1\t2\nchr10\t1\t2\n");
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn test_unknown_sort_type() {
    let bed = create_file("chr1\t1\t2\n");

    let output = run_bedfusion(&[path(&bed), "-s", "size"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown sorting type size"));
}

#[test]
fn test_unknown_padding_type() {
    let bed = create_file("chr1\t1\t2\n");

    let output = run_bedfusion(&[path(&bed), "--padding-type", "maybe"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown padding type maybe"));
}

#[test]
fn test_strand_column_conflicts() {
    let bed = create_file("chr1\t1\t2\t+\n");

    let low = run_bedfusion(&[path(&bed), "--strand-col", "2"]);
    assert!(!low.status.success());

    let same = run_bedfusion(&[path(&bed), "--strand-col", "4", "--feat-col", "4"]);
    assert!(!same.status.success());
}

#[test]
fn test_malformed_input() {
    let start_after_stop = create_file("chr1\t10\t5\n");
    let output = run_bedfusion(&[path(&start_after_stop)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains(path(&start_after_stop)));

    let mixed = create_file("chr1\t1\t5\nchr1\t1\t5\tx\n");
    let output = run_bedfusion(&[path(&mixed)]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}
