/// Build modes every configuration is combined with
pub const BUILD_MODES: [&str; 2] = ["Debug", "Release"];

/// Configuration used when none is given
pub const DEFAULT_CONFIGURATION: &str = "Any CPU";

/// Configuration name that takes each project's own platform
pub const MIXED_PLATFORMS: &str = "Mixed Platforms";

/// Cross product of build modes and configuration names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMatrix {
    configurations: Vec<String>,
}

impl BuildMatrix {
    pub fn new<I, S>(configurations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut configurations: Vec<String> = configurations
            .into_iter()
            .map(Into::into)
            .filter(|c| !c.trim().is_empty())
            .collect();
        if configurations.is_empty() {
            configurations.push(DEFAULT_CONFIGURATION.to_string());
        }
        Self { configurations }
    }

    pub fn configurations(&self) -> &[String] {
        &self.configurations
    }

    /// `(mode, configuration)` pairs, mode-major
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        BUILD_MODES.iter().flat_map(move |mode| {
            self.configurations
                .iter()
                .map(move |configuration| (*mode, configuration.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        BUILD_MODES.len() * self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}

impl Default for BuildMatrix {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

/// Platform a project builds with under `configuration`
///
/// `Mixed Platforms` defers to the project's own platform; `AnyCPU` is
/// spelled `Any CPU` in solution files.
///
/// A project that declares no platform gets `Any CPU` under `Mixed
/// Platforms` instead of an empty platform, which would leave a
/// `Debug|` mapping the IDE cannot load.
pub fn project_platform(configuration: &str, project_platform: Option<&str>) -> String {
    let platform = if configuration == MIXED_PLATFORMS {
        project_platform.unwrap_or(DEFAULT_CONFIGURATION)
    } else {
        configuration
    };

    if platform == "AnyCPU" {
        DEFAULT_CONFIGURATION.to_string()
    } else {
        platform.to_string()
    }
}
