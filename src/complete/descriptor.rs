//! Completion descriptor model
//!
//! A completion descriptor says how one argument slot can be completed.
//! Static descriptors (files, directories, fixed lists) render to a literal
//! zsh action; dynamic descriptors render to a fixed hook that re-invokes
//! the program at completion time, since the shell cannot evaluate program
//! logic while a script is being generated.

use crate::dynamic::PositionalArgs;
use std::fmt;

/// Escape `\` and `"` so the text survives another layer of `".."` quoting.
///
/// Backslash must be escaped first; the routine is total over arbitrary
/// text, so quoting itself has no failure mode.
pub fn pre_quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// The dynamic completion capability: candidates computed while the user
/// is typing, with access to the partially configured command.
pub trait DynamicComplete<C> {
    /// Produce candidates for `prefix`, given the replayed command state
    /// and the positional words typed so far.
    fn complete(&self, command: &C, prefix: &str, args: &PositionalArgs) -> Vec<String>;
}

/// A dynamic completion that forwards to a plain function or closure,
/// passing any extra arguments it was constructed with.
pub struct CallbackCompletion<C> {
    callback: Box<dyn Fn(&C, &str, &PositionalArgs, &[String]) -> Vec<String>>,
    extra: Vec<String>,
}

impl<C> CallbackCompletion<C> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&C, &str, &PositionalArgs, &[String]) -> Vec<String> + 'static,
    {
        CallbackCompletion {
            callback: Box::new(callback),
            extra: Vec::new(),
        }
    }

    /// Extra arguments forwarded verbatim to every callback invocation
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra = extra.into_iter().map(Into::into).collect();
        self
    }
}

impl<C> DynamicComplete<C> for CallbackCompletion<C> {
    fn complete(&self, command: &C, prefix: &str, args: &PositionalArgs) -> Vec<String> {
        (self.callback)(command, prefix, args, &self.extra)
    }
}

/// A static closed set of candidates, with optional per-value help text.
///
/// The two construction modes are mutually exclusive: building from pairs
/// discards any plain values, and an empty list renders an empty,
/// non-suggesting fragment.
#[derive(Debug, Clone, Default)]
pub struct ListCompletion {
    values: Vec<String>,
    pairs: Vec<(String, String)>,
}

impl ListCompletion {
    /// Build from a bare sequence of values
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ListCompletion {
            values: values.into_iter().map(Into::into).collect(),
            pairs: Vec::new(),
        }
    }

    /// Build from ordered value/help pairs
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        ListCompletion {
            values: Vec::new(),
            pairs: pairs.into_iter().map(|(v, h)| (v.into(), h.into())).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.pairs.is_empty()
    }

    fn zsh_action(&self) -> String {
        if !self.values.is_empty() {
            let items: Vec<String> = self
                .values
                .iter()
                .map(|v| format!("\"{}\"", pre_quote(v)))
                .collect();
            format!("({})", items.join(" "))
        } else if !self.pairs.is_empty() {
            let items: Vec<String> = self
                .pairs
                .iter()
                .map(|(v, h)| format!("\"{}\\\\:{}\"", pre_quote(v), pre_quote(h)))
                .collect();
            format!("({})", items.join(" "))
        } else {
            String::new()
        }
    }
}

/// How one argument slot is completed.
///
/// The variant set is closed and matched exhaustively wherever grammar is
/// rendered; only `Dynamic` carries a `complete` operation.
pub enum Completion<C = ()> {
    /// Filesystem paths, optionally filtered by a glob pattern
    File { glob: Option<String> },

    /// Directories only
    Dir,

    /// A static closed set of values
    List(ListCompletion),

    /// Candidates computed at completion time by calling back into the
    /// program
    Dynamic(Box<dyn DynamicComplete<C>>),
}

impl<C> Completion<C> {
    /// Complete filesystem paths
    pub fn files() -> Self {
        Completion::File { glob: None }
    }

    /// Complete filesystem paths matching a glob pattern
    pub fn files_matching(glob: impl Into<String>) -> Self {
        Completion::File {
            glob: Some(glob.into()),
        }
    }

    /// Complete directories
    pub fn dirs() -> Self {
        Completion::Dir
    }

    /// Complete from a fixed list
    pub fn list(list: ListCompletion) -> Self {
        Completion::List(list)
    }

    /// Complete dynamically through the given capability
    pub fn dynamic(dynamic: impl DynamicComplete<C> + 'static) -> Self {
        Completion::Dynamic(Box::new(dynamic))
    }

    /// Complete dynamically through a callback function
    pub fn callback<F>(callback: F) -> Self
    where
        C: 'static,
        F: Fn(&C, &str, &PositionalArgs, &[String]) -> Vec<String> + 'static,
    {
        Completion::Dynamic(Box::new(CallbackCompletion::new(callback)))
    }

    /// The dynamic capability, when this descriptor has one
    pub fn as_dynamic(&self) -> Option<&dyn DynamicComplete<C>> {
        match self {
            Completion::Dynamic(d) => Some(d.as_ref()),
            _ => None,
        }
    }

    /// Render the zsh action fragment for the slot named `slot`.
    ///
    /// `slot` carries the `+` marker when it names a switch argument; only
    /// dynamic descriptors embed it, since the shell must pass it back to
    /// the program.
    pub fn zsh_action(&self, slot: &str) -> String {
        match self {
            Completion::File { glob: None } => "_files".to_string(),
            Completion::File { glob: Some(glob) } => {
                format!("_files -g \"{}\"", pre_quote(glob))
            }
            Completion::Dir => "_path_files -/".to_string(),
            Completion::List(list) => list.zsh_action(),
            Completion::Dynamic(_) => format!("__zc_complete_general {}", slot),
        }
    }
}

impl<C> fmt::Debug for Completion<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::File { glob } => f.debug_struct("File").field("glob", glob).finish(),
            Completion::Dir => write!(f, "Dir"),
            Completion::List(list) => f.debug_tuple("List").field(list).finish(),
            Completion::Dynamic(_) => write!(f, "Dynamic(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_quote_escapes_backslash_first() {
        assert_eq!(pre_quote(r#"a\b"c"#), r#"a\\b\"c"#);
        // Escaping backslash first means the output never contains a bare
        // backslash introduced by quote escaping.
        assert_eq!(pre_quote(r#"\""#), r#"\\\""#);
    }

    #[test]
    fn test_pre_quote_total_over_plain_text() {
        assert_eq!(pre_quote("plain text"), "plain text");
        assert_eq!(pre_quote(""), "");
    }

    #[test]
    fn test_list_from_values_renders_quoted_enumeration() {
        let list = ListCompletion::from_values(["foo", "bar"]);
        assert_eq!(list.zsh_action(), r#"("foo" "bar")"#);
    }

    #[test]
    fn test_list_from_pairs_renders_escaped_help() {
        let list = ListCompletion::from_pairs([("foo", "Help for foo")]);
        assert_eq!(list.zsh_action(), r#"("foo\\:Help for foo")"#);
    }

    #[test]
    fn test_pairs_discard_values() {
        // Constructing from pairs never carries a values list.
        let list = ListCompletion::from_pairs([("a", "b")]);
        assert!(list.values.is_empty());
        assert!(!list.is_empty());
    }

    #[test]
    fn test_empty_list_renders_empty_fragment() {
        let list = ListCompletion::default();
        assert_eq!(list.zsh_action(), "");
        let completion: Completion = Completion::list(list);
        assert_eq!(completion.zsh_action("slot"), "");
    }

    #[test]
    fn test_file_actions() {
        let plain: Completion = Completion::files();
        assert_eq!(plain.zsh_action("src"), "_files");
        let filtered: Completion = Completion::files_matching("*.yml");
        assert_eq!(filtered.zsh_action("src"), r#"_files -g "*.yml""#);
        let dirs: Completion = Completion::dirs();
        assert_eq!(dirs.zsh_action("src"), "_path_files -/");
    }

    #[test]
    fn test_glob_pattern_is_quoted() {
        let filtered: Completion = Completion::files_matching(r#"*"weird".yml"#);
        assert_eq!(filtered.zsh_action("f"), r#"_files -g "*\"weird\".yml""#);
    }

    #[test]
    fn test_dynamic_action_names_the_hook() {
        let completion: Completion = Completion::callback(|_, _, _, _| vec![]);
        assert_eq!(completion.zsh_action("pkg"), "__zc_complete_general pkg");
        assert_eq!(completion.zsh_action("+profile"), "__zc_complete_general +profile");
    }

    #[test]
    fn test_callback_boxes_for_custom_host_types() {
        struct Host {
            tag: String,
        }
        let completion: Completion<Host> = Completion::callback(|host: &Host, prefix, _, _| {
            vec![format!("{}{}", host.tag, prefix)]
        });

        let host = Host {
            tag: "t-".to_string(),
        };
        let args = PositionalArgs::default();
        let dynamic = completion.as_dynamic().unwrap();
        assert_eq!(dynamic.complete(&host, "x", &args), vec!["t-x"]);
    }

    #[test]
    fn test_callback_receives_extra_args() {
        let cb = CallbackCompletion::new(|_cmd: &(), prefix: &str, _args, extra: &[String]| {
            let mut out = vec![prefix.to_string()];
            out.extend(extra.iter().cloned());
            out
        })
        .with_extra(["x", "y"]);

        let args = PositionalArgs::default();
        assert_eq!(cb.complete(&(), "pre", &args), vec!["pre", "x", "y"]);
    }
}
