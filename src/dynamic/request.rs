//! Completion request decoding
//!
//! One request per shell callback: the `<target>:<index>` payload of the
//! hidden switch, plus a left-to-right partial parse of the words the shell
//! re-supplied into switch invocations and trailing positional words.

use crate::dynamic::CANDIDATES_SWITCH;
use crate::error::{CompleteError, CompleteResult};
use crate::model::CommandNode;

/// Prefix marking a target name that identifies a switch rather than a
/// positional parameter
pub const SWITCH_MARKER: char = '+';

/// One switch occurrence on the command line being completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchInvocation {
    /// The spelling as typed, without dashes
    pub name: String,

    /// The captured value, for value-taking switches
    pub value: Option<String>,
}

/// A decoded dynamic completion request
#[derive(Debug)]
pub struct CompletionRequest {
    /// Argument being completed; `+name` when it is a switch
    pub target: String,

    /// Current word index, 1-based over the entry point's positional words
    pub index: usize,

    /// Already-supplied switch invocations in original order, the
    /// completion switch itself excluded
    pub invocations: Vec<SwitchInvocation>,

    /// Positional words typed so far
    pub tail: Vec<String>,
}

impl CompletionRequest {
    /// Decode a `<target>:<index>` payload together with pre-parsed
    /// invocations and tail words
    pub fn parse(
        payload: &str,
        invocations: Vec<SwitchInvocation>,
        tail: Vec<String>,
    ) -> CompleteResult<Self> {
        let (target, index) = decode_payload(payload)?;
        Ok(CompletionRequest {
            target,
            index,
            invocations,
            tail,
        })
    }

    /// Whether the target names a switch argument
    pub fn targets_switch(&self) -> bool {
        self.target.starts_with(SWITCH_MARKER)
    }

    /// The target with any switch marker stripped
    pub fn target_name(&self) -> &str {
        self.target.trim_start_matches(SWITCH_MARKER)
    }

    /// Partial-parse `argv` (the words after the program name) against the
    /// command tree and extract the completion request, if one is present.
    ///
    /// Words spelled like switches are resolved against the whole tree,
    /// since the shell strips subcommand words before re-invoking the
    /// program. Value-taking switches capture an `=`-embedded value or the
    /// following word; everything else lands in the tail.
    pub fn from_argv<C>(node: &CommandNode<C>, argv: &[String]) -> CompleteResult<Option<Self>> {
        let mut invocations = Vec::new();
        let mut tail = Vec::new();
        let mut payload: Option<String> = None;

        let mut words = argv.iter();
        while let Some(word) = words.next() {
            if word == "--" {
                tail.extend(words.map(|w| w.to_string()));
                break;
            }

            let Some(body) = switch_body(word) else {
                tail.push(word.clone());
                continue;
            };

            let (name, embedded) = match body.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (body.to_string(), None),
            };

            let takes_value = name == CANDIDATES_SWITCH
                || node
                    .find_switch_in_tree(&name)
                    .map(|sw| sw.takes_value())
                    .unwrap_or(false);

            let value = match embedded {
                Some(value) => Some(value),
                None if takes_value => words.next().cloned(),
                None => None,
            };

            if name == CANDIDATES_SWITCH {
                payload = value;
                continue;
            }

            invocations.push(SwitchInvocation { name, value });
        }

        match payload {
            Some(payload) => Ok(Some(Self::parse(&payload, invocations, tail)?)),
            None => Ok(None),
        }
    }
}

/// The dashless body of a word spelled like a switch, `None` otherwise
fn switch_body(word: &str) -> Option<&str> {
    if let Some(body) = word.strip_prefix("--") {
        if body.is_empty() {
            return None;
        }
        return Some(body);
    }
    if let Some(body) = word.strip_prefix('-') {
        // A lone "-" and negative numbers are positional words.
        if body.is_empty() || body.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        return Some(body);
    }
    None
}

/// Split `<target>:<index>` on the last colon
fn decode_payload(payload: &str) -> CompleteResult<(String, usize)> {
    let malformed = || CompleteError::MalformedRequest(payload.to_string());

    let (target, index) = payload.rsplit_once(':').ok_or_else(malformed)?;
    if target.is_empty() {
        return Err(malformed());
    }
    let index = index.parse::<usize>().map_err(|_| malformed())?;
    Ok((target.to_string(), index))
}
