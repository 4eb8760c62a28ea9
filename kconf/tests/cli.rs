use assert_cmd::{Command as AssertCommand, cargo::*};
use predicates::prelude::*;
use std::{
    path::{Path, PathBuf},
    process::Command,
    sync::OnceLock,
};

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

fn setup_logging() {
    LOGGER_INIT.get_or_init(|| {
        env_logger::builder().is_test(true).init();
    });
}

fn demos() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    Path::new(&manifest_dir).parent().unwrap().join("demos")
}

fn kconf() -> AssertCommand {
    setup_logging();
    let bin = cargo_bin!("kconf");
    log::info!("kconf path: {}", bin.display());
    let mut cmd = AssertCommand::from_std(Command::new(bin));
    cmd.current_dir(demos()).arg("--no-color");
    cmd
}

#[test]
fn trace_reports_every_file() {
    kconf()
        .args(["trace", "--base", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init/Kconfig"))
        .stdout(predicate::str::contains("arch/x86/Kconfig"))
        .stdout(predicate::str::contains("Kernel compression mode"))
        .stdout(predicate::str::is_match(r"scripts/Kconfig.include\s+:\s+4 :.*not parsed").unwrap())
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn tree_prints_the_outline() {
    kconf()
        .args(["tree", "-b", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Root()\n  Menu(Linux/x86  Kernel Configuration)\n    Config(CC_VERSION_TEXT)\n",
        ))
        .stdout(predicate::str::contains(
            "      Choice(Kernel compression mode)\n        Config(KERNEL_GZIP)\n",
        ))
        .stdout(predicate::str::contains("      If(EXPERT)\n        MenuConfig(SLAB_TUNING)\n"));
}

#[test]
fn symbols_lists_declarations_in_order() {
    kconf()
        .args(["symbols", "--base", "linux"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "CC_VERSION_TEXT\nLOCALVERSION\nKERNEL_GZIP\nKERNEL_XZ\nSLAB_TUNING\n64BIT\nX86\nDRIVERS_EXAMPLE\n",
        ));
}

#[test]
fn unknown_arch_is_a_missing_file() {
    kconf()
        .args(["tree", "--base", "linux", "--arch", "arm64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("arch/arm64/Kconfig"));
}

#[test]
fn variables_must_be_name_value_pairs() {
    kconf()
        .args(["tree", "--base", "linux", "-D", "SRCARCH"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn common_prints_the_shared_entries() {
    kconf()
        .args(["common", "configs/desktop.config", "configs/server.config"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "CONFIG_64BIT=y\nCONFIG_X86=y\nCONFIG_KERNEL_GZIP=y\nCONFIG_HZ=250\n",
        ));
}

#[test]
fn common_can_be_limited_to_declared_symbols() {
    kconf()
        .args([
            "common",
            "configs/desktop.config",
            "configs/server.config",
            "--declared-in",
            "linux",
        ])
        .assert()
        .success()
        .stdout(predicate::eq("CONFIG_64BIT=y\nCONFIG_X86=y\nCONFIG_KERNEL_GZIP=y\n"));
}
