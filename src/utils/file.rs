//! Pseudo-file access
//!
//! Every metric read goes through [`PseudoFs`] so the sampler is written once
//! and hosts without sysfs access simply report everything as unavailable.

use crate::error::{OverlayError, Result};
use crate::utils::parsing::trim_pseudo_file;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Capability to read kernel pseudo-files as text
pub trait PseudoFs {
    /// Read the whole file at an absolute `path`
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Real sysfs/procfs access, optionally rooted under another directory
#[derive(Debug, Clone, Default)]
pub struct SysFs {
    root: Option<PathBuf>,
}

impl SysFs {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Resolve absolute pseudo-file paths below `root` (a captured tree or a test fixture)
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path.strip_prefix("/").unwrap_or(path)),
            None => path.to_path_buf(),
        }
    }
}

impl PseudoFs for SysFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let resolved = self.resolve(path);
        let bytes = read_all_raw(&resolved)?;
        if !bytes.is_ascii() {
            return Err(OverlayError::Encoding(resolved));
        }
        // ASCII is always valid UTF-8
        String::from_utf8(bytes).map_err(|_| OverlayError::Encoding(resolved))
    }
}

/// File access for platforms where pseudo-files can't be read at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFs;

impl PseudoFs for NoFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Err(OverlayError::Unavailable(path.to_path_buf()))
    }
}

/// Read a pseudo-file and strip leading spaces and trailing CR/LF.
/// Returns an empty string on any failure.
pub fn read_trimmed_file(fs: &dyn PseudoFs, path: &Path) -> String {
    match fs.read_to_string(path) {
        Ok(content) => trim_pseudo_file(&content).to_string(),
        Err(err) => {
            trace!("{} unavailable: {}", path.display(), err);
            String::new()
        }
    }
}

/// Read a whole file with direct syscalls.
/// Pseudo-files report a size of 4096 regardless of content, so read until EOF.
fn read_all_raw(path: &Path) -> Result<Vec<u8>> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| OverlayError::Unavailable(path.to_path_buf()))?;

    unsafe {
        let fd = libc::open(path_cstr.as_ptr(), libc::O_RDONLY | libc::O_CLOEXEC);
        if fd < 0 {
            return Err(OverlayError::from(std::io::Error::last_os_error()));
        }

        let mut content = Vec::with_capacity(64);
        let mut buffer = [0u8; 256];
        loop {
            let bytes_read = libc::read(fd, buffer.as_mut_ptr() as *mut libc::c_void, buffer.len());
            if bytes_read < 0 {
                let err = std::io::Error::last_os_error();
                if err.kind() == std::io::ErrorKind::Interrupted {
                    continue;
                }
                libc::close(fd);
                return Err(OverlayError::from(err));
            }
            if bytes_read == 0 {
                break;
            }
            content.extend_from_slice(&buffer[..bytes_read as usize]);
        }
        libc::close(fd);

        Ok(content)
    }
}
