#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn work_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn write_file(dir: &TempDir, name: &str, content: &str) {
    dir.child(name)
        .write_str(content)
        .unwrap_or_else(|e| panic!("Failed to write file {name}: {e}"));
}

pub fn run_tandem_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("tandem").expect("Failed to find tandem binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
