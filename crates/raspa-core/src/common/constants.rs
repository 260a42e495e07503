//! File names, link names and directive keys shared by preparation steps.

pub const INPUT_FILE_NAME: &str = "simulation.input";
pub const OUTPUT_FILE_PATTERN: &str = "Output/System*/*dat";
pub const OUTPUT_RETRIEVE_TARGET: &str = ".";
pub const OUTPUT_RETRIEVE_DEPTH: u32 = 0;
pub const DEFAULT_PARSER_NAME: &str = "raspa";
pub const GENERATOR_BANNER: &str = "!!! Generated by raspa-prep !!!";

pub const PARAMETERS_LINK: &str = "parameters";
pub const STRUCTURE_LINK: &str = "structure";
pub const SETTINGS_LINK: &str = "settings";
pub const CODE_LINK: &str = "code";

pub const SETTINGS_CMDLINE: &str = "cmdline";
pub const SETTINGS_ADDITIONAL_RETRIEVE: &str = "additional_retrieve_list";
