//! Common test utilities for droidprep integration tests.
//!
//! Provides `TestEnv`: an isolated Android project scaffold in a temp
//! directory, plus helpers to run the droidprep CLI against it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Default descriptor used by most tests
pub const DEFAULT_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<widget id="com.example.app" version="1.2.3">
    <name>Test App</name>
    <platform name="android">
        <icon density="mdpi" src="res/icon/mdpi.png"/>
        <icon density="hdpi" src="res/icon/hdpi.png"/>
    </platform>
</widget>
"#;

/// Result of running a droidprep CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated Android project scaffold for one test
pub struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    /// Scaffold a project with the default descriptor
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CONFIG)
    }

    /// Scaffold a project with a custom descriptor
    pub fn with_config(config: &str) -> Self {
        let env = Self {
            root: TempDir::new().expect("create temp project"),
        };
        env.write("config.xml", config.as_bytes());
        env.write("www/index.html", b"<html><body>app</body></html>");
        env.write("res/icon/mdpi.png", b"mdpi-pixels");
        env.write("res/icon/hdpi.png", b"hdpi-pixels");
        env.write(
            "app/src/main/AndroidManifest.xml",
            br#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <application android:label="@string/app_name">
        <activity android:name=".MainActivity"/>
    </application>
</manifest>
"#,
        );
        env.write(
            "app/src/main/java/com/example/app/MainActivity.java",
            b"package com.example.app;\n\npublic class MainActivity extends CordovaActivity {\n}\n",
        );
        env.write(
            "settings.gradle",
            b"rootProject.name = 'placeholder'\ninclude ':app'\n",
        );
        std::fs::create_dir_all(env.path("app/src/main/res/values")).unwrap();
        env
    }

    /// Project root path
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Path relative to the project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// True when the relative path exists
    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Write a file under the project root, creating parent directories
    pub fn write(&self, relative: &str, content: &[u8]) {
        let path = self.path(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// Read a file under the project root as a string
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("read {relative}: {e}"))
    }

    /// Run the droidprep CLI against this project
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_droidprep"))
            .args(args)
            .arg("--project")
            .arg(self.root.path())
            .output()
            .expect("failed to execute droidprep");

        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
