// src/display.rs

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::error::Result;

/// Shows saved figures to the user after `save`.
pub trait Viewer: Debug {
    fn show(&self, files: &[PathBuf]) -> Result<()>;
}

/// Opens the first saved file with the platform's default viewer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl SystemViewer {
    fn interactive() -> bool {
        if cfg!(target_os = "linux") {
            std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
        } else {
            true
        }
    }

    fn opener(file: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(file);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(file);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(file);
            cmd
        }
    }
}

impl Viewer for SystemViewer {
    fn show(&self, files: &[PathBuf]) -> Result<()> {
        let Some(file) = files.first() else {
            return Ok(());
        };
        if !Self::interactive() {
            info!(path = %file.display(), "no display available, skipping show");
            return Ok(());
        }
        match Self::opener(file).spawn() {
            Ok(child) => {
                info!(path = %file.display(), "opened figure in system viewer");
                reap(child);
            }
            Err(err) => warn!(path = %file.display(), %err, "could not open system viewer"),
        }
        Ok(())
    }
}

/// Waits for `child` on a background thread so the opener does not linger as a zombie.
fn reap(mut child: Child) -> JoinHandle<Option<ExitStatus>> {
    thread::spawn(move || match child.wait() {
        Ok(status) => {
            debug!(%status, "viewer opener exited");
            Some(status)
        }
        Err(err) => {
            warn!(%err, "could not wait for viewer opener");
            None
        }
    })
}

/// Viewer that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoViewer;

impl Viewer for NoViewer {
    fn show(&self, _files: &[PathBuf]) -> Result<()> {
        Ok(())
    }
}
