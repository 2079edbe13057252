//! Dynamic completion protocol
//!
//! The generated script re-invokes the program with a hidden switch when a
//! slot needs candidates the script cannot know. This module decodes that
//! request, replays the switches already typed, resolves which argument is
//! being completed and asks its descriptor for candidates.

pub mod handler;
pub mod request;

// Re-export main types
pub use handler::*;
pub use request::*;

use crate::model::{SwitchDescriptor, HIDDEN_GROUP};

/// Spelling of the visible switch that prints the completion script
pub const SCRIPT_SWITCH: &str = "zsh-completion";

/// Spelling of the hidden switch the shell uses to request candidates
pub const CANDIDATES_SWITCH: &str = "zsh-complete";

/// The visible "print the completion script and exit" switch
pub fn completion_script_switch<C>() -> SwitchDescriptor<C> {
    SwitchDescriptor::new([SCRIPT_SWITCH]).with_help("Print the zsh completion script and exit")
}

/// The hidden switch the generated script invokes for dynamic candidates.
///
/// Lives in `HIDDEN_GROUP` so the script never offers to complete it.
pub fn complete_candidates_switch<C>() -> SwitchDescriptor<C> {
    SwitchDescriptor::new([CANDIDATES_SWITCH])
        .with_argtype("TARGET")
        .with_help("Print completion candidates for <target>:<index> and exit")
        .with_group(HIDDEN_GROUP)
}
