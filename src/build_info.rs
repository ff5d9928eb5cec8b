//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `"<version> <date> (<commit>)"`, as printed by `--version`.
pub fn version_string() -> String {
    format!("{} {} ({})", BUILD_VERSION, BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // Should be 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_string_has_all_parts() {
        let version = version_string();
        assert!(version.starts_with(BUILD_VERSION));
        assert!(version.contains(BUILD_DATE));
        assert!(version.ends_with(&format!("({})", BUILD_COMMIT)));
    }
}
