#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use tempfile::TempDir;

/// Nothing listens on the discard port, so requests fail fast.
pub const UNREACHABLE: &str = "http://127.0.0.1:9/graphql";

/// Isolated HOME plus a database path inside it.
pub struct TestEnv {
    pub home: TempDir,
    pub db: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("temp home");
        let db = home
            .path()
            .join("test_rtasks.sqlite")
            .to_string_lossy()
            .to_string();
        Self { home, db }
    }

    /// `rtasks --db <db> --endpoint <unreachable>` with HOME redirected.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rtasks");
        cmd.env("HOME", self.home.path())
            .args(["--db", &self.db, "--endpoint", UNREACHABLE]);
        cmd
    }

    /// Write `~/.rtasks/rtasks.conf` inside the temp HOME.
    pub fn write_config(&self, yaml: &str) {
        let conf_dir = self.home.path().join(".rtasks");
        std::fs::create_dir_all(&conf_dir).expect("config dir");
        std::fs::write(conf_dir.join("rtasks.conf"), yaml).expect("config file");
    }

    /// Fresh database via `init` in test mode.
    pub fn init(self) -> Self {
        self.cmd().args(["--test", "init"]).assert().success();
        self
    }
}
