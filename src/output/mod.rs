//! Output: namespace envelopes and destination routing.
//!
//! Every completion leaves the engine wrapped in the namespace of its
//! entity and addressed by a [`LocationPolicy`]:
//!
//! | Policy                             | Destination                      | Visible |
//! |------------------------------------|----------------------------------|---------|
//! | `IntermediateOutput`               | `<obj>/X.meta.g.i.cs`            | yes     |
//! | `IntermediateOutputNoIntellisense` | `<obj>/X.meta.g.cs`              | no      |
//! | `Designer`                         | `X.meta.designer.cs`             | yes     |

mod envelope;
mod location;

use std::path::PathBuf;

pub use envelope::{union_imports, wrap};
pub use location::{LocationPolicy, Router, declared_location};

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Output {
    pub text: String,
    pub destination: PathBuf,
    /// Whether editor tooling should see the file.
    pub visible_to_editor: bool,
}
