pub mod errors;
pub mod nodes;
pub mod parameters;

pub use errors::{ClassifyResult, PrepareResult, RaspaError, RaspaErrorCategory, RaspaResult};
pub use nodes::{Code, InputMap, InputNode, ParameterData, SinglefileData, StructureData};
pub use parameters::{
    Block, COMPONENT_KEY, GENERAL_SETTINGS_KEY, HEADER_TAG_KEY, MOLECULE_NAME_KEY, ParameterTree,
    ParameterTreeError, ParameterValue, Scalar, Section, SectionHeader,
};
