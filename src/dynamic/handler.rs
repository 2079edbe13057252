//! Replay, target resolution and candidate dispatch
//!
//! Handling is strictly request/response: replay the recorded switch
//! invocations against a fresh command instance, resolve the target slot to
//! its descriptor, print one candidate per line. A target that resolves to
//! nothing yields no output and no error, so a malformed or adversarial
//! invocation can never break the shell session.

use crate::complete::Completion;
use crate::dynamic::request::CompletionRequest;
use crate::error::{CompleteError, Result};
use crate::model::CommandNode;
use std::collections::BTreeMap;
use std::io::Write;

/// Positional words mapped onto the entry point's parameters, as handed to
/// dynamic descriptors
#[derive(Debug, Clone, Default)]
pub struct PositionalArgs {
    /// Named parameters paired with the words supplied for them
    pub named: BTreeMap<String, String>,

    /// Words belonging to the trailing variadic parameter
    pub variadic: Vec<String>,
}

impl PositionalArgs {
    /// Distribute `tail` words over an entry point: named parameters in
    /// declaration order first, the rest to the variadic parameter
    pub fn distribute<C>(node: &CommandNode<C>, tail: &[String]) -> Self {
        let entry = &node.entry;
        let named = entry
            .params
            .iter()
            .zip(tail.iter())
            .map(|(param, word)| (param.clone(), word.clone()))
            .collect();

        let variadic = if entry.variadic.is_some() && tail.len() > entry.params.len() {
            tail[entry.params.len()..].to_vec()
        } else {
            Vec::new()
        };

        PositionalArgs { named, variadic }
    }
}

/// Hook for replaying already-typed switches against the command instance.
///
/// Replay runs before any descriptor is consulted so that completion
/// callbacks see whatever state those switches set as a side effect. A
/// failing switch surfaces exactly as it would on a real invocation.
pub trait SwitchReplay {
    fn apply_switch(&mut self, name: &str, value: Option<&str>) -> anyhow::Result<()>;
}

/// Hosts without replayable state
impl SwitchReplay for () {
    fn apply_switch(&mut self, _name: &str, _value: Option<&str>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Answer one completion request, writing candidates to `out`
pub fn handle_request<C, W>(
    command: &mut C,
    node: &CommandNode<C>,
    request: &CompletionRequest,
    out: &mut W,
) -> Result<()>
where
    C: SwitchReplay,
    W: Write,
{
    // Ordered fold over the recorded invocations.
    for invocation in &request.invocations {
        command
            .apply_switch(&invocation.name, invocation.value.as_deref())
            .map_err(|source| CompleteError::Replay {
                switch: invocation.name.clone(),
                source,
            })?;
    }

    let args = PositionalArgs::distribute(node, &request.tail);

    let resolved = if request.targets_switch() {
        resolve_switch_target(node, request)
    } else {
        resolve_positional_target(node, request, &args)
    };

    let Some((descriptor, prefix)) = resolved else {
        return Ok(());
    };

    if let Some(dynamic) = descriptor.as_dynamic() {
        for candidate in dynamic.complete(command, &prefix, &args) {
            writeln!(out, "{}", candidate)?;
        }
    }

    Ok(())
}

/// Look up a `+name` target: the switch's own descriptor, with the prefix
/// taken from the value most recently captured for that switch (repeatable
/// switches use the last value, since there is no way to know which
/// repetition is being edited)
fn resolve_switch_target<'a, C>(
    node: &'a CommandNode<C>,
    request: &CompletionRequest,
) -> Option<(&'a Completion<C>, String)> {
    let switch = node.find_switch_in_tree(request.target_name())?;
    let descriptor = switch.completion.as_ref()?;

    let prefix = request
        .invocations
        .iter()
        .rev()
        .find(|inv| switch.answers_to(&inv.name))
        .and_then(|inv| inv.value.clone())
        .unwrap_or_default();

    Some((descriptor, prefix))
}

/// Look up a positional or variadic target in the entry point's completion
/// table. Inside a variadic run the prefix is the single word at the
/// request index, so each candidate completes independently.
fn resolve_positional_target<'a, C>(
    node: &'a CommandNode<C>,
    request: &CompletionRequest,
    args: &PositionalArgs,
) -> Option<(&'a Completion<C>, String)> {
    let entry = &node.entry;
    let target = request.target_name();
    let descriptor = entry.completions.get(target)?;

    let prefix = if entry.variadic.as_deref() == Some(target) {
        request
            .index
            .checked_sub(1)
            .and_then(|i| request.tail.get(i))
            .cloned()
            .unwrap_or_default()
    } else {
        args.named.get(target).cloned().unwrap_or_default()
    };

    Some((descriptor, prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::request::SwitchInvocation;
    use crate::model::{EntryPoint, SwitchDescriptor};

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_distribute_named_then_variadic() {
        let node: CommandNode = CommandNode::new("xin")
            .with_entry(EntryPoint::new().with_params(["query"]).with_variadic("pkgs"));
        let args = PositionalArgs::distribute(&node, &strings(&["q", "pkg1", "pkg2"]));

        assert_eq!(args.named.get("query").map(String::as_str), Some("q"));
        assert_eq!(args.variadic, vec!["pkg1", "pkg2"]);
    }

    #[test]
    fn test_distribute_short_tail() {
        let node: CommandNode = CommandNode::new("xin")
            .with_entry(EntryPoint::new().with_params(["a", "b"]).with_variadic("rest"));
        let args = PositionalArgs::distribute(&node, &strings(&["only"]));

        assert_eq!(args.named.len(), 1);
        assert!(args.variadic.is_empty());
    }

    #[test]
    fn test_variadic_target_completes_single_word() {
        let mut entry: EntryPoint = EntryPoint::new().with_variadic("pkgs");
        entry.completions.insert(
            "pkgs".to_string(),
            Completion::callback(|_, prefix, _, _| vec![format!("{}-candidate", prefix)]),
        );
        let node = CommandNode::new("xin").with_entry(entry);

        let request = CompletionRequest {
            target: "pkgs".to_string(),
            index: 2,
            invocations: vec![SwitchInvocation {
                name: "profile".to_string(),
                value: Some("default".to_string()),
            }],
            tail: strings(&["pkg1", "pkg2"]),
        };

        let mut out = Vec::new();
        handle_request(&mut (), &node, &request, &mut out).unwrap();
        // The word at index 2 is the prefix, not the whole tail.
        assert_eq!(String::from_utf8(out).unwrap(), "pkg2-candidate\n");
    }

    #[test]
    fn test_switch_target_uses_last_captured_value() {
        let node: CommandNode = CommandNode::new("xin").with_switch(
            SwitchDescriptor::new(["t", "tag"])
                .with_argtype("TAG")
                .repeatable()
                .with_completion(Completion::callback(|_, prefix, _, _| {
                    vec![format!("{}!", prefix)]
                })),
        );

        let request = CompletionRequest {
            target: "+tag".to_string(),
            index: 1,
            invocations: vec![
                SwitchInvocation {
                    name: "tag".to_string(),
                    value: Some("first".to_string()),
                },
                SwitchInvocation {
                    name: "t".to_string(),
                    value: Some("second".to_string()),
                },
            ],
            tail: Vec::new(),
        };

        let mut out = Vec::new();
        handle_request(&mut (), &node, &request, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "second!\n");
    }

    #[test]
    fn test_unknown_target_is_silent() {
        let node: CommandNode = CommandNode::new("xin");
        let request = CompletionRequest {
            target: "nope".to_string(),
            index: 1,
            invocations: Vec::new(),
            tail: Vec::new(),
        };

        let mut out = Vec::new();
        let result = handle_request(&mut (), &node, &request, &mut out);
        assert!(result.is_ok());
        assert!(out.is_empty());

        let request = CompletionRequest {
            target: "+nope".to_string(),
            ..request
        };
        let mut out = Vec::new();
        assert!(handle_request(&mut (), &node, &request, &mut out).is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn test_static_descriptor_yields_no_dynamic_candidates() {
        let mut entry: EntryPoint = EntryPoint::new().with_params(["file"]);
        entry
            .completions
            .insert("file".to_string(), Completion::files());
        let node = CommandNode::new("xin").with_entry(entry);

        let request = CompletionRequest {
            target: "file".to_string(),
            index: 1,
            invocations: Vec::new(),
            tail: Vec::new(),
        };

        let mut out = Vec::new();
        handle_request(&mut (), &node, &request, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_replay_runs_in_order_and_feeds_callbacks() {
        #[derive(Default)]
        struct App {
            profile: Option<String>,
            applied: Vec<String>,
        }

        impl SwitchReplay for App {
            fn apply_switch(&mut self, name: &str, value: Option<&str>) -> anyhow::Result<()> {
                self.applied.push(name.to_string());
                if name == "profile" || name == "p" {
                    self.profile = value.map(str::to_string);
                }
                Ok(())
            }
        }

        let mut entry: EntryPoint<App> = EntryPoint::new().with_variadic("pkgs");
        entry.completions.insert(
            "pkgs".to_string(),
            Completion::callback(|app: &App, prefix, _, _| {
                vec![format!(
                    "{}@{}",
                    prefix,
                    app.profile.as_deref().unwrap_or("none")
                )]
            }),
        );
        let node = CommandNode::new("xin").with_entry(entry);

        let request = CompletionRequest {
            target: "pkgs".to_string(),
            index: 1,
            invocations: vec![
                SwitchInvocation {
                    name: "verbose".to_string(),
                    value: None,
                },
                SwitchInvocation {
                    name: "profile".to_string(),
                    value: Some("work".to_string()),
                },
            ],
            tail: strings(&["pk"]),
        };

        let mut app = App::default();
        let mut out = Vec::new();
        handle_request(&mut app, &node, &request, &mut out).unwrap();

        assert_eq!(app.applied, vec!["verbose", "profile"]);
        assert_eq!(String::from_utf8(out).unwrap(), "pk@work\n");
    }

    #[test]
    fn test_replay_failure_surfaces() {
        struct Strict;
        impl SwitchReplay for Strict {
            fn apply_switch(&mut self, name: &str, _value: Option<&str>) -> anyhow::Result<()> {
                anyhow::bail!("unknown switch {}", name)
            }
        }

        let node: CommandNode<Strict> = CommandNode::new("xin");
        let request = CompletionRequest {
            target: "x".to_string(),
            index: 1,
            invocations: vec![SwitchInvocation {
                name: "bogus".to_string(),
                value: None,
            }],
            tail: Vec::new(),
        };

        let mut out = Vec::new();
        let result = handle_request(&mut Strict, &node, &request, &mut out);
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
