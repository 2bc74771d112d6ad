use assert_cmd::Command;
use assert_cmd::assert::Assert;
use assert_fs::TempDir;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct RenderTestHelper<'a> {
    pub work_dir: TempDir,
    name: &'a str,
    counter: AtomicUsize,
}

impl<'a> RenderTestHelper<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            name,
            counter: AtomicUsize::new(0),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("ssrs-render").unwrap();
        cmd.current_dir(self.work_dir.path())
            .env(
                "SSRS_RUN_ID",
                format!(
                    "{}-{}",
                    self.name,
                    self.counter.fetch_add(1, Ordering::Relaxed)
                ),
            )
            .env("SSRS_LOG_DIR", self.work_dir.path().join("logs"))
            // keep a developer's own profile out of the way
            .env("HOME", self.work_dir.path())
            .env("XDG_CONFIG_HOME", self.work_dir.path().join("config"))
            .env_remove("SSRS_SERVER_URL")
            .env_remove("SSRS_TIMEOUT")
            .env_remove("SSRS_CONFIG")
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn run_command(&self, args: &[&str]) -> Assert {
        self.command().args(args).assert()
    }

    pub fn run_against(&self, server_url: &str, args: &[&str]) -> Assert {
        self.command()
            .env("SSRS_SERVER_URL", server_url)
            .args(args)
            .assert()
    }

    pub fn clean_work_dir(self) {
        self.work_dir.close().unwrap();
    }
}
