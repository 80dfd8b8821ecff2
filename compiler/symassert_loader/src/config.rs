//! Load configuration: requested capabilities, build tags and platform.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Information categories requested from a load.
    ///
    /// A load made with a larger mask can answer any request whose mask it
    /// contains; the load cache relies on this ordering.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct LoadMode: u32 {
        /// Package name and canonical path.
        const NAME = 1 << 0;
        /// Source file names.
        const FILES = 1 << 1;
        /// Containing module (path and root directory).
        const MODULE = 1 << 2;
        /// Fully checked declarations and types.
        const TYPES = 1 << 3;
    }
}

impl LoadMode {
    /// Whether a load made with `self` also answers a `requested` load.
    #[inline]
    pub const fn covers(self, requested: Self) -> bool {
        self.contains(requested)
    }
}

impl Default for LoadMode {
    fn default() -> Self {
        Self::NAME
    }
}

/// Set of conditional-compilation tags.
///
/// Stored sorted and de-duplicated, so two sets built from the same tags in
/// any order are equal.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct BuildTags(Vec<String>);

impl BuildTags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<String> = tags
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort_unstable();
        tags.dedup();
        BuildTags(tags)
    }

    /// Parse a `-tags=a,b` build flag.
    pub fn from_flag(flag: &str) -> Option<Self> {
        flag.strip_prefix("-tags=")
            .map(|list| BuildTags::new(list.split(',')))
    }

    /// Render as a `-tags=a,b` build flag, or `None` if empty.
    pub fn to_flag(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(format!("-tags={}", self.0.join(",")))
        }
    }

    #[must_use]
    pub fn union(&self, other: &BuildTags) -> Self {
        BuildTags::new(self.0.iter().chain(other.0.iter()).cloned())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.binary_search_by(|t| t.as_str().cmp(tag)).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for BuildTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        BuildTags::new(iter)
    }
}

impl fmt::Display for BuildTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.join(" "))
    }
}

/// Target operating system and architecture.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Platform {
            os: os.into(),
            arch: arch.into(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Everything the front-end needs to know to load a unit.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct LoadConfig {
    pub mode: LoadMode,
    pub tags: BuildTags,
    pub platform: Option<Platform>,
}

impl LoadConfig {
    pub fn new(mode: LoadMode) -> Self {
        LoadConfig {
            mode,
            ..LoadConfig::default()
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: BuildTags) -> Self {
        self.tags = tags;
        self
    }

    /// Target `platform`. Its OS and architecture also become build tags.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.tags = self
            .tags
            .union(&BuildTags::new([platform.os.as_str(), platform.arch.as_str()]));
        self.platform = Some(platform);
        self
    }

    /// Same configuration with a different capability mask.
    #[must_use]
    pub fn with_mode(&self, mode: LoadMode) -> Self {
        LoadConfig {
            mode,
            ..self.clone()
        }
    }

    /// Same configuration additionally requesting `extra`.
    #[must_use]
    pub fn widened(&self, extra: LoadMode) -> Self {
        self.with_mode(self.mode | extra)
    }
}
