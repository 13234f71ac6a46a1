//! Location policies and destination routing.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::base::constants::{
    DESIGNER_SUFFIX, INTERMEDIATE_HIDDEN_SUFFIX, INTERMEDIATE_SUFFIX, META_UNIT_SUFFIX,
};
use crate::error::ConfigurationError;
use crate::hir::{EntityHandle, SemanticIndex};

/// Where the completion of an entity is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LocationPolicy {
    /// `X.meta.g.i.cs` in the intermediate directory.
    #[default]
    IntermediateOutput,
    /// `X.meta.g.cs` in the intermediate directory, hidden from editors.
    IntermediateOutputNoIntellisense,
    /// `X.meta.designer.cs` next to the source unit.
    Designer,
}

impl LocationPolicy {
    pub const ALL: [LocationPolicy; 3] = [
        LocationPolicy::IntermediateOutput,
        LocationPolicy::IntermediateOutputNoIntellisense,
        LocationPolicy::Designer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::IntermediateOutput => "IntermediateOutput",
            Self::IntermediateOutputNoIntellisense => "IntermediateOutputNoIntellisense",
            Self::Designer => "Designer",
        }
    }

    /// Replacement for the `.meta.cs` suffix of the unit name.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::IntermediateOutput => INTERMEDIATE_SUFFIX,
            Self::IntermediateOutputNoIntellisense => INTERMEDIATE_HIDDEN_SUFFIX,
            Self::Designer => DESIGNER_SUFFIX,
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, Self::IntermediateOutputNoIntellisense)
    }

    pub fn is_intermediate(self) -> bool {
        !matches!(self, Self::Designer)
    }
}

impl fmt::Display for LocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LocationPolicy {
    type Err = ConfigurationError;

    /// Accepts the bare name as well as member-access forms such as
    /// `MetaLocationKind.Designer`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.rsplit('.').next().unwrap_or(s).trim();
        Self::ALL
            .into_iter()
            .find(|policy| policy.name() == name)
            .ok_or_else(|| ConfigurationError::unknown_policy(s.trim()))
    }
}

/// Maps a unit name and a policy to a destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Router {
    intermediate_dir: PathBuf,
}

impl Router {
    pub fn new(intermediate_dir: impl Into<PathBuf>) -> Self {
        Self {
            intermediate_dir: intermediate_dir.into(),
        }
    }

    pub fn intermediate_dir(&self) -> &Path {
        &self.intermediate_dir
    }

    /// Destination path of the output of `unit_name` under `policy`.
    pub fn destination(
        &self,
        unit_name: &str,
        policy: LocationPolicy,
    ) -> Result<PathBuf, ConfigurationError> {
        let stem = unit_name
            .strip_suffix(META_UNIT_SUFFIX)
            .ok_or_else(|| ConfigurationError::UnexpectedUnitName(unit_name.to_string()))?;
        let file = format!("{stem}{}", policy.suffix());
        Ok(if policy.is_intermediate() {
            self.intermediate_dir.join(file)
        } else {
            PathBuf::from(file)
        })
    }

    /// Destination and editor visibility.
    pub fn route(
        &self,
        unit_name: &str,
        policy: LocationPolicy,
    ) -> Result<(PathBuf, bool), ConfigurationError> {
        Ok((self.destination(unit_name, policy)?, policy.is_visible()))
    }
}

/// The policy an entity declares with `[MetaLocation(...)]`.
///
/// `None` when the entity carries no location attribute; the attribute
/// without arguments selects the default policy.
pub fn declared_location(
    index: &SemanticIndex,
    entity: &EntityHandle,
) -> Result<Option<LocationPolicy>, ConfigurationError> {
    let Some(attribute) = entity.attributes().iter().find(|attribute| {
        attribute
            .resolved
            .is_some_and(|id| index.is_location_attribute(id))
    }) else {
        return Ok(None);
    };
    match attribute.args.first() {
        Some(arg) => arg.parse().map(Some),
        None => Ok(Some(LocationPolicy::default())),
    }
}
