//! Reports whether the process runs in a development or production environment. The probe
//! is derived from the debug-build marker, so a release binary is always "Production".

/// Environment the framework was constructed in. Determines which environment-specific
/// configuration file the [assembler](crate::config) loads.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct FrameworkEnvironment {
    is_development: bool,
}

impl FrameworkEnvironment {
    /// Probes the environment from the debug-build marker of the current binary.
    pub fn detect() -> Self {
        Self {
            is_development: cfg!(debug_assertions),
        }
    }

    /// A development environment, regardless of how the binary was built.
    pub fn development() -> Self {
        Self {
            is_development: true,
        }
    }

    /// A production environment, regardless of how the binary was built.
    pub fn production() -> Self {
        Self {
            is_development: false,
        }
    }

    pub fn is_development(&self) -> bool {
        self.is_development
    }

    /// The environment label, `"Development"` or `"Production"`.
    pub fn label(&self) -> &'static str {
        if self.is_development {
            "Development"
        } else {
            "Production"
        }
    }
}

impl Default for FrameworkEnvironment {
    fn default() -> Self {
        Self::detect()
    }
}
