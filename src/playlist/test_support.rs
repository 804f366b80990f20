// Stub helper scripts for tests

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write an executable `/bin/sh` script standing in for yt-dlp.
pub fn write_stub_helper(dir: &Path, body: &str) -> std::io::Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let script_path = dir.join("yt-dlp-stub");
    {
        let mut file = fs::File::create(&script_path)?;
        file.write_all(b"#!/bin/sh\n")?;
        file.write_all(body.as_bytes())?;
        file.sync_all()?;
    }

    let mut perms = fs::metadata(&script_path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script_path, perms)?;
    Ok(script_path)
}

/// Stub that answers `--version` and otherwise runs `body`.
pub fn write_playlist_stub(dir: &Path, body: &str) -> std::io::Result<PathBuf> {
    let script = format!(
        "if [ \"$1\" = \"--version\" ]; then\n  echo 2024.01.01\n  exit 0\nfi\n{}",
        body
    );
    write_stub_helper(dir, &script)
}
