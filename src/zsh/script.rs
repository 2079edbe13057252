//! Static script generation
//!
//! `generate_script` walks the command tree from the root and emits one
//! completion function per node, deterministically ordered, then appends
//! the shared helper functions and the root dispatch line. Unsupported
//! structure (optional or variadic positionals mixed with subcommands)
//! degrades with a warning instead of failing.

use crate::complete::pre_quote;
use crate::model::{spell, CommandNode, EntryPoint, SwitchDescriptor};
use crate::zsh::helpers::HELPER_FUNCTIONS;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Snapshot of the original word list and cursor, taken once at the root.
/// The dynamic hooks need it to rebuild the program invocation later.
const SNAPSHOT: &str = "    if (( ! ${+_zc_words} )); then
        typeset -g -a _zc_words=(\"${words[@]}\")
        typeset -g _zc_current=${CURRENT}
        typeset -g -a _zc_consumed=()
    fi\n";

/// A generated completion script plus any structure warnings
#[derive(Debug)]
pub struct GeneratedScript {
    /// The complete script text
    pub text: String,

    /// Human-readable warnings about unsupported structure, one per line
    pub warnings: Vec<String>,
}

/// Generate the complete completion script for a command tree
pub fn generate_script<C>(root: &CommandNode<C>) -> GeneratedScript {
    let mut generator = Generator {
        text: String::new(),
        warnings: Vec::new(),
    };

    let root_func = format!("_{}", sanitize(&root.name));
    generator.text.push_str(&format!(
        "#compdef {}\n# Completion script for {}.\n",
        root.name, root.name
    ));
    generator.emit_node(root, &root_func, &root.name, true);
    generator.text.push_str(HELPER_FUNCTIONS);
    generator.text.push_str(&format!("\n{} \"$@\"\n", root_func));

    GeneratedScript {
        text: generator.text,
        warnings: generator.warnings,
    }
}

/// Generate and print: script to stdout, warnings to stderr
pub fn write_script<C>(root: &CommandNode<C>) -> io::Result<()> {
    let script = generate_script(root);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(script.text.as_bytes())?;
    out.flush()?;

    for warning in &script.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    Ok(())
}

struct Generator {
    text: String,
    warnings: Vec<String>,
}

impl Generator {
    /// Emit the function for one node, then recurse into its children
    /// (sorted by name, so output is reproducible)
    fn emit_node<C>(&mut self, node: &CommandNode<C>, func: &str, path: &str, is_root: bool) {
        let mut specs = Vec::new();
        self.switch_specs(node, &mut specs);
        self.positional_specs(node, path, &mut specs);

        self.text.push('\n');
        self.text.push_str(&format!("{}() {{\n", func));
        if is_root {
            self.text.push_str(SNAPSHOT);
        }
        self.text.push_str("    local -a _zc_args\n");

        if !node.subcommands.is_empty() {
            let names: Vec<&str> = node.subcommands.keys().map(String::as_str).collect();
            self.text.push_str(&format!(
                "    typeset -g -a {}_subcommands=({})\n",
                func,
                names.join(" ")
            ));
            specs.push(selector_spec(node));
            specs.push(format!("\"*::arguments:__zc_descend {}\"", func));
        }

        if !specs.is_empty() {
            self.text.push_str("    _zc_args+=(\n");
            for spec in &specs {
                self.text.push_str(&format!("        {}\n", spec));
            }
            self.text.push_str("    )\n");
        }
        self.text.push_str("    _arguments -s : \"${_zc_args[@]}\"\n");
        self.text.push_str("}\n");

        for (name, child) in &node.subcommands {
            let child_func = format!("{}_{}", func, sanitize(name));
            let child_path = format!("{} {}", path, name);
            self.emit_node(child, &child_func, &child_path, false);
        }
    }

    /// Visible switches, grouped by group name, sorted within each group
    /// by their name tuple
    fn switch_specs<C>(&mut self, node: &CommandNode<C>, specs: &mut Vec<String>) {
        let mut groups: BTreeMap<&str, Vec<&SwitchDescriptor<C>>> = BTreeMap::new();
        for switch in &node.switches {
            if switch.visible() && !switch.names.is_empty() {
                groups.entry(switch.group.as_str()).or_default().push(switch);
            }
        }

        for (_group, mut switches) in groups {
            switches.sort_by(|a, b| a.names.cmp(&b.names));
            for switch in switches {
                specs.push(switch_spec(switch));
            }
        }
    }

    /// Positional and variadic slots from the entry point
    fn positional_specs<C>(&mut self, node: &CommandNode<C>, path: &str, specs: &mut Vec<String>) {
        let entry = &node.entry;
        let has_subcommands = !node.subcommands.is_empty();

        if entry.has_optional() && has_subcommands {
            self.warnings.push(format!(
                "command '{}' mixes optional positional arguments with subcommands; \
                 completion cannot reliably tell them apart",
                path
            ));
        }

        let mandatory = entry.mandatory_count();
        for (position, param) in entry.params.iter().enumerate() {
            let marker = if position >= mandatory { "::" } else { ":" };
            specs.push(format!(
                "\"{}{}:{}\"",
                marker,
                param,
                slot_action(entry, param)
            ));
        }

        if let Some(variadic) = &entry.variadic {
            if has_subcommands {
                self.warnings.push(format!(
                    "command '{}' mixes a variadic parameter with subcommands; \
                     dropping the variadic slot",
                    path
                ));
            } else {
                // The double-colon form makes zsh report the current word
                // index relative to the positional words, which is how the
                // request decoder counts them.
                specs.push(format!(
                    "\"*::{}:{}\"",
                    variadic,
                    slot_action(entry, variadic)
                ));
            }
        }
    }
}

/// One `_arguments` spec for a switch.
///
/// Multi-spelling switches put the brace alternation outside the quotes so
/// the shell expands it into one spec per spelling, with the exclusion
/// clause suppressing the sibling spellings.
fn switch_spec<C>(switch: &SwitchDescriptor<C>) -> String {
    let spellings = switch.spellings();

    let mut exclusion: Vec<String> = Vec::new();
    if spellings.len() > 1 {
        exclusion.extend(spellings.iter().cloned());
    }
    exclusion.extend(switch.excludes.iter().map(|name| spell(name)));

    let mut head = String::new();
    if !exclusion.is_empty() {
        head.push_str(&format!("({})", exclusion.join(" ")));
    }
    if switch.list {
        head.push('*');
    }

    let mut body = String::new();
    let mut help = pre_quote(&switch.help);
    if switch.mandatory {
        help.push_str(" (mandatory)");
    }
    body.push_str(&format!("[{}]", help));

    if let Some(argtype) = &switch.argtype {
        let action = match &switch.completion {
            Some(completion) => {
                completion.zsh_action(&format!("+{}", switch.canonical_name()))
            }
            None => " ".to_string(),
        };
        body.push_str(&format!(":{}:{}", argtype, pre_quote(&action)));
    }

    if spellings.len() > 1 {
        format!("\"{}\"{{{}}}\"{}\"", head, spellings.join(","), body)
    } else {
        format!("\"{}{}{}\"", head, spellings[0], body)
    }
}

/// The action for a positional slot: the attached descriptor's grammar, or
/// the neutral accept-anything placeholder
fn slot_action<C>(entry: &EntryPoint<C>, param: &str) -> String {
    entry
        .completions
        .get(param)
        .map(|completion| pre_quote(&completion.zsh_action(param)))
        .unwrap_or_else(|| " ".to_string())
}

/// The subcommand selector: `name\:description` choices, children sorted
/// by name
fn selector_spec<C>(node: &CommandNode<C>) -> String {
    let items: Vec<String> = node
        .subcommands
        .values()
        .map(|child| {
            format!(
                "{}\\:\\\"{}\\\"",
                child.name,
                pre_quote(child.short_description())
            )
        })
        .collect();
    format!("\":subcommand:(({}))\"", items.join(" "))
}

/// Map a command name onto a zsh function name fragment
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
