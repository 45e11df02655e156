//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use super::super::BuildMode;
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn source() -> PathBuf {
        "src".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn partials() -> PathBuf {
        "include".into()
    }

    pub fn mode() -> BuildMode {
        BuildMode::default()
    }

    pub mod assets {
        use std::path::PathBuf;

        pub fn libs() -> PathBuf {
            "libs".into()
        }

        pub fn font() -> PathBuf {
            "font".into()
        }
    }
}

// ============================================================================
// [watch] Section Defaults
// ============================================================================

pub mod watch {
    pub fn debounce_ms() -> u64 {
        300
    }

    pub fn cooldown_ms() -> u64 {
        800
    }
}
