//! Command nodes and entry points
//!
//! A command node is one point in the nested command tree: the application
//! root or a subcommand. Nodes own their children; the generator threads
//! the ancestor path down its recursion instead of keeping parent links.

use crate::complete::Completion;
use crate::model::switch::SwitchDescriptor;
use std::collections::BTreeMap;

/// The entry-point signature of a command node: its positional parameters
#[derive(Debug, Default)]
pub struct EntryPoint<C = ()> {
    /// Ordered positional parameter names (receiver excluded)
    pub params: Vec<String>,

    /// How many trailing parameters carry default values (these are optional)
    pub defaults: usize,

    /// Name of the trailing variadic parameter, if any
    pub variadic: Option<String>,

    /// Completion table: parameter name to attached descriptor
    pub completions: BTreeMap<String, Completion<C>>,
}

impl<C> EntryPoint<C> {
    /// An entry point with no parameters
    pub fn new() -> Self {
        EntryPoint {
            params: Vec::new(),
            defaults: 0,
            variadic: None,
            completions: BTreeMap::new(),
        }
    }

    /// Set the ordered positional parameter names
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Set how many trailing parameters have defaults
    pub fn with_defaults(mut self, defaults: usize) -> Self {
        self.defaults = defaults;
        self
    }

    /// Declare a trailing variadic parameter
    pub fn with_variadic(mut self, name: impl Into<String>) -> Self {
        self.variadic = Some(name.into());
        self
    }

    /// Number of parameters that must be supplied
    pub fn mandatory_count(&self) -> usize {
        self.params.len().saturating_sub(self.defaults)
    }

    /// Whether any parameter is optional
    pub fn has_optional(&self) -> bool {
        self.defaults > 0
    }
}

/// One application or subcommand in the command tree
#[derive(Debug)]
pub struct CommandNode<C = ()> {
    /// Program name at the root, subcommand name below it
    pub name: String,

    /// Declared description; its first line labels the subcommand selector
    pub description: Option<String>,

    /// Switches reachable at this node
    pub switches: Vec<SwitchDescriptor<C>>,

    /// Entry-point signature for positional arguments
    pub entry: EntryPoint<C>,

    /// Children keyed by name; sibling names are unique by construction
    pub subcommands: BTreeMap<String, CommandNode<C>>,
}

impl<C> CommandNode<C> {
    /// Create a node with the given name and an empty entry point
    pub fn new(name: impl Into<String>) -> Self {
        CommandNode {
            name: name.into(),
            description: None,
            switches: Vec::new(),
            entry: EntryPoint::new(),
            subcommands: BTreeMap::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a switch
    pub fn with_switch(mut self, switch: SwitchDescriptor<C>) -> Self {
        self.switches.push(switch);
        self
    }

    /// Set the entry point
    pub fn with_entry(mut self, entry: EntryPoint<C>) -> Self {
        self.entry = entry;
        self
    }

    /// Add a subcommand, keyed by its name
    pub fn with_subcommand(mut self, child: CommandNode<C>) -> Self {
        self.subcommands.insert(child.name.clone(), child);
        self
    }

    /// First line of the description, for subcommand selectors
    pub fn short_description(&self) -> &str {
        self.description
            .as_deref()
            .and_then(|d| d.lines().next())
            .unwrap_or("")
    }

    /// Find a switch at this node by one of its spellings
    pub fn find_switch(&self, name: &str) -> Option<&SwitchDescriptor<C>> {
        self.switches.iter().find(|sw| sw.answers_to(name))
    }

    /// Mutable switch lookup, for attaching completions after construction
    pub fn find_switch_mut(&mut self, name: &str) -> Option<&mut SwitchDescriptor<C>> {
        self.switches.iter_mut().find(|sw| sw.answers_to(name))
    }

    /// Find a switch by spelling at this node or in any descendant.
    ///
    /// The dynamic path re-invokes the program with subcommand words
    /// stripped, so switch spellings must resolve across the whole tree.
    pub fn find_switch_in_tree(&self, name: &str) -> Option<&SwitchDescriptor<C>> {
        self.find_switch(name)
            .or_else(|| self.subcommands.values().find_map(|c| c.find_switch_in_tree(name)))
    }
}
