//! Export option layers
//!
//! - [`profile`] - Profiles, presets and IFC versions
//! - [`overrides`] - User override files and the default template
//! - [`resolver`] - Merging the layers into [`EffectiveOptions`]
//! - [`value`] - Primitive option values

pub mod overrides;
pub mod profile;
pub mod resolver;
pub mod value;

pub use overrides::{default_template_json, write_default_template, OverrideOptions};
pub use profile::{ExportProfile, IfcVersion, Preset};
pub use resolver::{resolve, EffectiveOptions, Resolution, ResolutionWarning};
pub use value::{OptionMap, OptionValue};
