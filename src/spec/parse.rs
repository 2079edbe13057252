//! Spec file parsing, validation and tree building

use crate::error::{Result, SpecError, SpecResult};
use crate::model::{CommandNode, EntryPoint, SwitchDescriptor, DEFAULT_GROUP};
use crate::spec::types::CommandSpec;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse and validate a spec from a YAML string
pub fn parse_spec(yaml: &str) -> Result<CommandSpec> {
    let spec: CommandSpec = serde_yaml::from_str(yaml)?;
    validate_spec(&spec)?;
    Ok(spec)
}

/// Parse and validate a spec file from a path
pub fn parse_spec_file(path: &Path) -> Result<CommandSpec> {
    let contents = fs::read_to_string(path)?;
    parse_spec(&contents)
}

/// Validate a spec and all of its subcommands
pub fn validate_spec(spec: &CommandSpec) -> SpecResult<()> {
    validate_node(spec)
}

fn validate_node(spec: &CommandSpec) -> SpecResult<()> {
    let mut spellings = HashSet::new();
    for switch in &spec.switches {
        if switch.names.is_empty() {
            return Err(SpecError::UnnamedSwitch);
        }
        for name in &switch.names {
            if !spellings.insert(name.clone()) {
                return Err(SpecError::DuplicateSpelling(name.clone()));
            }
        }
    }

    let entry = &spec.args;
    if entry.defaults > entry.params.len() {
        return Err(SpecError::TooManyDefaults {
            defaults: entry.defaults,
            params: entry.params.len(),
        });
    }
    for param in entry.complete.keys() {
        let known = entry.params.iter().any(|p| p == param)
            || entry.variadic.as_deref() == Some(param.as_str());
        if !known {
            return Err(SpecError::UnknownParameter(param.clone()));
        }
    }

    for child in spec.subcommands.values() {
        validate_node(child)?;
    }
    Ok(())
}

/// Build the command tree a validated spec describes
pub fn build_tree(spec: &CommandSpec) -> CommandNode<()> {
    build_node(&spec.name, spec)
}

fn build_node(name: &str, spec: &CommandSpec) -> CommandNode<()> {
    let mut node = CommandNode::new(name);
    node.description = spec.description.clone();

    for switch_spec in &spec.switches {
        let mut switch = SwitchDescriptor::new(switch_spec.names.clone())
            .with_help(switch_spec.help.clone().unwrap_or_default())
            .with_excludes(switch_spec.excludes.clone())
            .with_group(switch_spec.group.clone().unwrap_or_else(|| DEFAULT_GROUP.to_string()));
        if let Some(argtype) = &switch_spec.argtype {
            switch = switch.with_argtype(argtype.clone());
        }
        if switch_spec.list {
            switch = switch.repeatable();
        }
        if switch_spec.mandatory {
            switch = switch.required();
        }
        if let Some(complete) = &switch_spec.complete {
            switch = switch.with_completion(complete.to_completion());
        }
        node.switches.push(switch);
    }

    let mut entry = EntryPoint::new()
        .with_params(spec.args.params.clone())
        .with_defaults(spec.args.defaults);
    if let Some(variadic) = &spec.args.variadic {
        entry = entry.with_variadic(variadic.clone());
    }
    for (param, complete) in &spec.args.complete {
        entry.completions.insert(param.clone(), complete.to_completion());
    }
    node.entry = entry;

    for (child_name, child_spec) in &spec.subcommands {
        node.subcommands
            .insert(child_name.clone(), build_node(child_name, child_spec));
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZcompError;

    #[test]
    fn test_parse_minimal_spec() {
        let yaml = r#"
name: xin
switches:
  - names: [v, verbose]
    help: Print verbose output
"#;
        let spec = parse_spec(yaml).unwrap();
        assert_eq!(spec.name, "xin");
        assert_eq!(spec.switches.len(), 1);
    }

    #[test]
    fn test_parse_full_spec_builds_tree() {
        let yaml = r#"
name: xin
description: Package tool
switches:
  - names: [p, profile]
    argtype: NAME
    help: Profile name
    complete:
      list:
        default: Default profile
        work: Work profile
args:
  params: [query]
  defaults: 1
subcommands:
  search:
    description: Search packages
    args:
      variadic: terms
      complete:
        terms:
          files:
            glob: "*.pkg"
"#;
        let spec = parse_spec(yaml).unwrap();
        let tree = build_tree(&spec);

        assert_eq!(tree.name, "xin");
        let profile = tree.find_switch("profile").unwrap();
        assert!(profile.completion.is_some());
        assert_eq!(tree.entry.params, vec!["query"]);
        assert_eq!(tree.entry.defaults, 1);

        let search = tree.subcommands.get("search").unwrap();
        assert_eq!(search.entry.variadic.as_deref(), Some("terms"));
        assert!(search.entry.completions.contains_key("terms"));
    }

    #[test]
    fn test_unnamed_switch_is_rejected() {
        let yaml = r#"
name: xin
switches:
  - help: No spellings
"#;
        let result = parse_spec(yaml);
        assert!(matches!(
            result,
            Err(ZcompError::Spec(SpecError::UnnamedSwitch))
        ));
    }

    #[test]
    fn test_duplicate_spelling_is_rejected() {
        let yaml = r#"
name: xin
switches:
  - names: [v, verbose]
  - names: [v]
"#;
        let result = parse_spec(yaml);
        assert!(matches!(
            result,
            Err(ZcompError::Spec(SpecError::DuplicateSpelling(_)))
        ));
    }

    #[test]
    fn test_unknown_completion_parameter_is_rejected() {
        let yaml = r#"
name: xin
args:
  params: [query]
  complete:
    nope:
      dirs: {}
"#;
        let result = parse_spec(yaml);
        assert!(matches!(
            result,
            Err(ZcompError::Spec(SpecError::UnknownParameter(_)))
        ));
    }

    #[test]
    fn test_too_many_defaults_is_rejected() {
        let yaml = r#"
name: xin
args:
  params: [a]
  defaults: 2
"#;
        let result = parse_spec(yaml);
        assert!(matches!(
            result,
            Err(ZcompError::Spec(SpecError::TooManyDefaults { .. }))
        ));
    }

    #[test]
    fn test_subcommand_names_come_from_their_keys() {
        let yaml = r#"
name: xin
subcommands:
  search:
    name: other
    description: Search packages
"#;
        let tree = build_tree(&parse_spec(yaml).unwrap());
        let search = tree.subcommands.get("search").unwrap();
        assert_eq!(search.name, "search");
    }

    #[test]
    fn test_duplicate_spellings_allowed_across_nodes() {
        // Each node has its own switch namespace.
        let yaml = r#"
name: xin
switches:
  - names: [verbose]
subcommands:
  search:
    switches:
      - names: [verbose]
"#;
        assert!(parse_spec(yaml).is_ok());
    }
}
