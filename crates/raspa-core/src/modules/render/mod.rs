//! Renders a [`ParameterTree`] into RASPA's `simulation.input` grammar.
//!
//! Within every section keys are emitted in lexicographic order:
//!
//! ```text
//! !!! Generated by raspa-prep !!!
//! NumberOfCycles  10
//! SimulationType  MonteCarlo
//! Component 0 MoleculeName methane
//!    CreateNumberOfMolecules  0
//! ```
//!
//! A nested mapping produces a `KEY <tag> MoleculeName <name>` header with its
//! body three columns further in. A list repeats its key once per item at the
//! same indentation. Rendering only reads the tree.

use crate::common::constants::GENERATOR_BANNER;
use crate::domain::{
    Block, COMPONENT_KEY, ParameterData, ParameterTree, ParameterValue, RaspaResult, Section,
};
use crate::modules::traits::InputRenderer;

const INDENT_STEP: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct RaspaInput {
    tree: ParameterTree,
}

impl RaspaInput {
    pub fn new(tree: ParameterTree) -> Self {
        Self { tree }
    }

    pub fn from_parameters(parameters: &ParameterData) -> RaspaResult<Self> {
        Ok(Self::new(ParameterTree::from_parameters(parameters)?))
    }

    pub fn tree(&self) -> &ParameterTree {
        &self.tree
    }
}

impl InputRenderer for RaspaInput {
    fn render_lines(&self) -> Vec<String> {
        let mut output = vec![GENERATOR_BANNER.to_string()];
        render_section(&mut output, &self.tree.general_settings, 0);
        for component in &self.tree.components {
            render_block(&mut output, COMPONENT_KEY, component, 0);
        }
        output
    }
}

/// Renders a `parameters` dictionary in one step.
pub fn render_parameters(parameters: &ParameterData) -> RaspaResult<String> {
    Ok(RaspaInput::from_parameters(parameters)?.render())
}

pub fn render_section(output: &mut Vec<String>, section: &Section, indent: usize) {
    for (key, value) in section.iter() {
        render_entry(output, key, value, indent);
    }
}

fn render_entry(output: &mut Vec<String>, key: &str, value: &ParameterValue, indent: usize) {
    match value {
        ParameterValue::Block(block) => render_block(output, key, block, indent),
        ParameterValue::Repeated(items) => {
            for item in items {
                render_entry(output, key, item, indent);
            }
        }
        ParameterValue::Scalar(scalar) => {
            output.push(format!("{:width$}{}  {}", "", key, scalar, width = indent));
        }
    }
}

// Header lines are never indented; only the body moves in.
fn render_block(output: &mut Vec<String>, key: &str, block: &Block, indent: usize) {
    output.push(block.header.line(key));
    render_section(output, &block.body, indent + INDENT_STEP);
}

#[cfg(test)]
mod tests {
    use super::{RaspaInput, render_parameters, render_section};
    use crate::domain::{
        Block, ParameterData, ParameterTree, ParameterValue, Scalar, Section, SectionHeader,
    };
    use crate::modules::traits::InputRenderer;
    use serde_json::{Value, json};

    fn render(value: Value) -> String {
        let data = ParameterData::from_value(value).expect("parameters should be an object");
        render_parameters(&data).expect("render should succeed")
    }

    #[test]
    fn booleans_use_fortran_literals() {
        let mut output = Vec::new();
        let section = Section::new()
            .with("UseChargesFromCIFFile", true)
            .with("ChargeFromChargeEquilibration", false);
        render_section(&mut output, &section, 0);

        assert_eq!(
            output,
            vec![
                "ChargeFromChargeEquilibration  .false.",
                "UseChargesFromCIFFile  .true.",
            ]
        );
    }

    #[test]
    fn scalars_are_indented_by_depth() {
        let mut output = Vec::new();
        render_section(
            &mut output,
            &Section::new().with("CutOff", 12.0).with("PrintEvery", 1000_i64),
            6,
        );
        assert_eq!(output, vec!["      CutOff  12.0", "      PrintEvery  1000"]);
    }

    #[test]
    fn components_flatten_into_sibling_headers() {
        let text = render(json!({
            "GeneralSettings": { "NumberOfCycles": 10 },
            "Component": [
                { "_": 0, "MoleculeName": "sodium", "CreateNumberOfMolecules": 96 },
                { "_": 1, "MoleculeName": "CO2", "SwapProbability": 1.0 }
            ]
        }));

        assert_eq!(
            text,
            [
                "!!! Generated by raspa-prep !!!",
                "NumberOfCycles  10",
                "Component 0 MoleculeName sodium",
                "   CreateNumberOfMolecules  96",
                "Component 1 MoleculeName CO2",
                "   SwapProbability  1.0",
            ]
            .join("\n")
        );
    }

    #[test]
    fn repeated_scalars_repeat_the_key() {
        let text = render(json!({
            "GeneralSettings": { "FrameworkName": ["LTA4A", "MFI"], "Empty": [] },
            "Component": []
        }));
        assert_eq!(
            text,
            "!!! Generated by raspa-prep !!!\nFrameworkName  LTA4A\nFrameworkName  MFI"
        );
    }

    #[test]
    fn nested_blocks_indent_body_but_not_header() {
        let inner = Block::new(
            SectionHeader::new(Some(Scalar::Integer(2)), None),
            Section::new().with("Depth", 2_i64),
        );
        let outer = Block::new(
            SectionHeader::molecule("argon"),
            Section::new()
                .with("Inner", inner)
                .with("Depth", 1_i64),
        );
        let tree = ParameterTree::new(Section::new(), vec![outer]);

        assert_eq!(
            RaspaInput::new(tree).render_lines(),
            vec![
                "!!! Generated by raspa-prep !!!",
                "Component  MoleculeName argon",
                "   Depth  1",
                "Inner 2 MoleculeName ",
                "      Depth  2",
            ]
        );
    }

    #[test]
    fn rendering_is_repeatable_and_leaves_the_tree_intact() {
        let data = ParameterData::from_value(json!({
            "GeneralSettings": { "B": 2, "A": 1 },
            "Component": { "_": "", "MoleculeName": "methane", "Z": "last", "M": "mid" }
        }))
        .expect("object");
        let input = RaspaInput::from_parameters(&data).expect("tree should build");
        let before = input.tree().clone();

        let first = input.render();
        let second = input.render();
        assert_eq!(first, second);
        assert_eq!(input.tree(), &before);
        assert!(!first.ends_with('\n'));
    }

    #[test]
    fn key_order_of_the_source_does_not_matter() {
        let mut forward = Section::new();
        forward.insert("Alpha", 1_i64);
        forward.insert("beta", "x");
        forward.insert("Gamma", ParameterValue::Repeated(vec![1_i64.into(), 2_i64.into()]));

        let mut backward = Section::new();
        backward.insert("Gamma", ParameterValue::Repeated(vec![1_i64.into(), 2_i64.into()]));
        backward.insert("beta", "x");
        backward.insert("Alpha", 1_i64);

        let render_tree = |section: Section| {
            RaspaInput::new(ParameterTree::new(section, Vec::new())).render()
        };
        let text = render_tree(forward);
        assert_eq!(text, render_tree(backward));
        assert_eq!(
            text,
            "!!! Generated by raspa-prep !!!\nAlpha  1\nGamma  1\nGamma  2\nbeta  x"
        );
    }

    #[test]
    fn missing_sections_fail_instead_of_rendering_empty() {
        let data = ParameterData::from_value(json!({ "GeneralSettings": {} })).expect("object");
        let error = render_parameters(&data).expect_err("Component is mandatory");
        assert_eq!(error.placeholder(), "INPUT.PARAMETER_TREE");
        assert!(error.message().contains("'Component'"));
    }
}
