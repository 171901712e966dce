use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Identifier of a project or folder entry in a solution file
///
/// Rendered in the braced, hyphenated, upper-case form the solution format
/// expects, e.g. `{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectGuid(Uuid);

impl ProjectGuid {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an identifier as found in a `ProjectGuid` property.
    ///
    /// Accepts braced and bare forms in any case; surrounding whitespace is
    /// ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let bare = trimmed
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(trimmed);
        Uuid::parse_str(bare).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProjectGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Uuid::encode_buffer();
        write!(f, "{{{}}}", self.0.hyphenated().encode_upper(&mut buf))
    }
}

impl Serialize for ProjectGuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Source of fresh node identifiers
pub trait IdGenerator {
    fn next_id(&mut self) -> ProjectGuid;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> ProjectGuid {
        (**self).next_id()
    }
}

/// Random (v4) identifiers, the default for real runs
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> ProjectGuid {
        ProjectGuid(Uuid::new_v4())
    }
}

/// Counter-based identifiers giving reproducible output
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ProjectGuid {
        self.next += 1;
        ProjectGuid(Uuid::from_u128(self.next))
    }
}
