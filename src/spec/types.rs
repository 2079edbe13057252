//! Spec file data types
//!
//! These structures mirror a zcomp.yml command spec one to one.

use crate::complete::{Completion, ListCompletion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One command node as declared in a spec file.
///
/// The root carries its own `name`; subcommands take theirs from the key
/// they are declared under.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandSpec {
    /// Program name; meaningful at the root only, since subcommands are
    /// named by their key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Description; the first line labels the subcommand selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Switches reachable at this command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub switches: Vec<SwitchSpec>,

    /// Positional arguments of the entry point
    #[serde(default)]
    pub args: EntrySpec,

    /// Nested subcommands keyed by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub subcommands: BTreeMap<String, CommandSpec>,
}

/// A switch declaration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwitchSpec {
    /// Flag spellings without dashes, e.g. `[v, verbose]`
    #[serde(default)]
    pub names: Vec<String>,

    /// Value name when the switch takes an argument
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argtype: Option<String>,

    /// Whether the switch may repeat
    #[serde(default)]
    pub list: bool,

    /// Mutually exclusive switch names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,

    /// Help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Whether the switch is mandatory
    #[serde(default)]
    pub mandatory: bool,

    /// Group name ("Hidden" keeps the switch out of the script)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Completion for the switch's value.
    ///
    /// The singleton-map adapter lets the variant be written as a one-key
    /// mapping (`complete: { list: [...] }`) instead of a YAML tag.
    #[serde(
        default,
        with = "serde_yaml::with::singleton_map_recursive",
        skip_serializing_if = "Option::is_none"
    )]
    pub complete: Option<CompleteSpec>,
}

/// Entry-point declaration: positional and variadic parameters
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EntrySpec {
    /// Ordered positional parameter names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,

    /// How many trailing parameters have defaults (these are optional)
    #[serde(default)]
    pub defaults: usize,

    /// Trailing variadic parameter name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variadic: Option<String>,

    /// Completions keyed by parameter name, each a one-key mapping naming
    /// the descriptor kind
    #[serde(
        default,
        with = "serde_yaml::with::singleton_map_recursive",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub complete: BTreeMap<String, CompleteSpec>,
}

/// A static completion descriptor in spec form
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompleteSpec {
    /// Filesystem paths, optionally glob-filtered
    Files(FilesSpec),

    /// Directories only
    Dirs(DirsSpec),

    /// A fixed value list, bare or with help text
    List(ListSpec),
}

/// `files:` body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilesSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glob: Option<String>,
}

/// `dirs:` body (no options)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirsSpec {}

/// `list:` body - a bare sequence of values or a value-to-help mapping
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ListSpec {
    Values(Vec<String>),
    Pairs(BTreeMap<String, String>),
}

impl CompleteSpec {
    /// The model descriptor this spec stands for
    pub fn to_completion(&self) -> Completion<()> {
        match self {
            CompleteSpec::Files(FilesSpec { glob: None }) => Completion::files(),
            CompleteSpec::Files(FilesSpec { glob: Some(glob) }) => {
                Completion::files_matching(glob.clone())
            }
            CompleteSpec::Dirs(_) => Completion::dirs(),
            CompleteSpec::List(ListSpec::Values(values)) => {
                Completion::list(ListCompletion::from_values(values.clone()))
            }
            CompleteSpec::List(ListSpec::Pairs(pairs)) => {
                Completion::list(ListCompletion::from_pairs(pairs.clone()))
            }
        }
    }
}
