//! Switch descriptors
//!
//! A switch descriptor carries everything the generator needs to describe
//! one flag: its spellings, value type, exclusions, help text and the
//! optionally attached completion descriptor.

use crate::complete::Completion;

/// Group name marking switches that are excluded from the generated script.
///
/// The dynamic-completion switch itself lives in this group, which is what
/// prevents the script from offering to complete the completion machinery.
pub const HIDDEN_GROUP: &str = "Hidden";

/// Default group for switches declared without one
pub const DEFAULT_GROUP: &str = "Switches";

/// A command-line switch as seen by the completion machinery
#[derive(Debug)]
pub struct SwitchDescriptor<C = ()> {
    /// Flag spellings without leading dashes, e.g. `["v", "verbose"]`
    pub names: Vec<String>,

    /// Value name when the switch takes an argument (`None` for flags)
    pub argtype: Option<String>,

    /// Whether the switch may be given more than once
    pub list: bool,

    /// Names of switches this one is mutually exclusive with
    pub excludes: Vec<String>,

    /// Help text shown next to the switch
    pub help: String,

    /// Whether the switch must be supplied
    pub mandatory: bool,

    /// Group name; `HIDDEN_GROUP` keeps the switch out of the script
    pub group: String,

    /// Attached completion descriptor for the switch's value, if any
    pub completion: Option<Completion<C>>,
}

impl<C> SwitchDescriptor<C> {
    /// Create a switch with the given spellings (without dashes)
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SwitchDescriptor {
            names: names.into_iter().map(Into::into).collect(),
            argtype: None,
            list: false,
            excludes: Vec::new(),
            help: String::new(),
            mandatory: false,
            group: DEFAULT_GROUP.to_string(),
            completion: None,
        }
    }

    /// Declare that the switch takes a value with the given value name
    pub fn with_argtype(mut self, argtype: impl Into<String>) -> Self {
        self.argtype = Some(argtype.into());
        self
    }

    /// Set the help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set the group name
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Mark the switch as repeatable
    pub fn repeatable(mut self) -> Self {
        self.list = true;
        self
    }

    /// Mark the switch as mandatory
    pub fn required(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Declare mutual exclusions by switch name (without dashes)
    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a completion descriptor for the switch's value
    pub fn with_completion(mut self, completion: Completion<C>) -> Self {
        self.completion = Some(completion);
        self
    }

    /// The canonical name: the longest spelling, used for dynamic
    /// completion slots and deterministic ordering
    pub fn canonical_name(&self) -> &str {
        self.names
            .iter()
            .max_by_key(|n| n.len())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether `name` (without dashes) is one of this switch's spellings
    pub fn answers_to(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Whether the switch takes a value
    pub fn takes_value(&self) -> bool {
        self.argtype.is_some()
    }

    /// Whether the switch appears in the generated script
    pub fn visible(&self) -> bool {
        self.group != HIDDEN_GROUP
    }

    /// All spellings rendered with their dashes, e.g. `-v`, `--verbose`
    pub fn spellings(&self) -> Vec<String> {
        self.names.iter().map(|n| spell(n)).collect()
    }
}

/// Render one switch name with its dashes
pub fn spell(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{}", name)
    } else {
        format!("--{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spellings() {
        let sw: SwitchDescriptor = SwitchDescriptor::new(["v", "verbose"]);
        assert_eq!(sw.spellings(), vec!["-v", "--verbose"]);
    }

    #[test]
    fn test_canonical_name_prefers_long_spelling() {
        let sw: SwitchDescriptor = SwitchDescriptor::new(["p", "profile"]);
        assert_eq!(sw.canonical_name(), "profile");
    }

    #[test]
    fn test_hidden_group_visibility() {
        let sw: SwitchDescriptor = SwitchDescriptor::new(["zsh-complete"]).with_group(HIDDEN_GROUP);
        assert!(!sw.visible());
        let sw: SwitchDescriptor = SwitchDescriptor::new(["verbose"]);
        assert!(sw.visible());
    }

    #[test]
    fn test_answers_to_any_spelling() {
        let sw: SwitchDescriptor = SwitchDescriptor::new(["f", "file"]).with_argtype("FILE");
        assert!(sw.answers_to("f"));
        assert!(sw.answers_to("file"));
        assert!(!sw.answers_to("files"));
        assert!(sw.takes_value());
    }
}
