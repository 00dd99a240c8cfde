//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a sem command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - SEM_TEST_SECRETS pointing at the secret fixture
    /// - git discovery stopped above the project directory
    /// - current directory set to the test project directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sem").expect("failed to find sem binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("SEM_TEST_SECRETS", self.secrets_path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SEM_INPUT");
        cmd.env_remove("SEM_ENDPOINT_URL");
        cmd.env_remove("SEM_LOG");
        if let Some(parent) = self.dir.path().parent() {
            cmd.env("GIT_CEILING_DIRECTORIES", parent);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `sem update` with extra arguments.
    pub fn update(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("update")
            .args(args)
            .output()
            .expect("failed to run sem update")
    }

    /// Shortcut for `sem load` with extra arguments.
    pub fn load(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("load")
            .args(args)
            .output()
            .expect("failed to run sem load")
    }
}
