//! Secret reference resolver.
//!
//! Token values in `config.toml` can point outside the file:
//!
//! - `pass::path/in/store`: runs `pass show path/in/store`, returns first line
//! - `env::VAR_NAME`: reads `$VAR_NAME` from the environment
//! - anything else: returned as-is (plain text)

use tracing::debug;

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, String> {
    if let Some(path) = value.strip_prefix("pass::") {
        debug!("resolving secret from pass entry {}", path);
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix("env::") {
        debug!("resolving secret from environment variable {}", var);
        resolve_env(var)
    } else {
        Ok(value.to_string())
    }
}

/// Returns true if `value` is a reference rather than a literal.
pub fn is_reference(value: &str) -> bool {
    value.starts_with("pass::") || value.starts_with("env::")
}

/// Runs `pass show <path>` and returns the first line of stdout.
fn resolve_pass(path: &str) -> Result<String, String> {
    let output = std::process::Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "`pass show {}` failed (exit {}): {}",
            path,
            output.status,
            stderr.trim()
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .next()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| format!("`pass show {}` produced no output", path))
}

fn resolve_env(var: &str) -> Result<String, String> {
    std::env::var(var).map_err(|_| format!("environment variable `{}` is not set", var))
}
