//! Certificate material for the HTTPS listener
//!
//! Resolves a hostname to a (cert, key) PEM path pair, generating and
//! persisting a self-signed pair when none exists yet.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("certificate generation failed: {0}")]
    Generate(#[from] rcgen::Error),
    #[error("certificate io failed: {0}")]
    Io(#[from] std::io::Error),
}

pub fn ensure_self_signed(hostname: &str, cert_dir: &Path) -> Result<(PathBuf, PathBuf), TlsError> {
    fs::create_dir_all(cert_dir)?;

    let cert_path = cert_dir.join(format!("{hostname}.crt"));
    let key_path = cert_dir.join(format!("{hostname}.key"));

    if cert_path.exists() && key_path.exists() {
        info!(cert = %cert_path.display(), "using existing certificate");
        return Ok((cert_path, key_path));
    }

    info!(hostname = %hostname, "generating self-signed certificate");

    let mut subject_alt_names = vec![hostname.to_string()];
    for extra in ["localhost", "127.0.0.1", "::1"] {
        if extra != hostname {
            subject_alt_names.push(extra.to_string());
        }
    }

    let certified = rcgen::generate_simple_self_signed(subject_alt_names)?;
    fs::write(&cert_path, certified.cert.pem())?;
    fs::write(&key_path, certified.key_pair.serialize_pem())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&key_path, fs::Permissions::from_mode(0o600))?;
    }

    info!(cert = %cert_path.display(), key = %key_path.display(), "certificate written");
    Ok((cert_path, key_path))
}
