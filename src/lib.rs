//! Zcomp - zsh completion generation for command-line tools
//!
//! Zcomp turns a declared command tree (switches, positional and variadic
//! arguments, nested subcommands) into a self-contained zsh completion
//! script, and implements the callback protocol that lets the running
//! program answer dynamic completion requests from the shell.

// Public modules
pub mod cli;
pub mod complete;
pub mod dynamic;
pub mod error;
pub mod model;
pub mod spec;
pub mod zsh;

// Re-export commonly used types
pub use complete::{
    attach_completion, AttachTarget, Bindings, CallbackCompletion, Completion, DynamicComplete,
    ListCompletion,
};
pub use dynamic::{handle_request, CompletionRequest, PositionalArgs, SwitchInvocation, SwitchReplay};
pub use error::{Result, ZcompError};
pub use model::{CommandNode, EntryPoint, SwitchDescriptor, HIDDEN_GROUP};
pub use zsh::{generate_script, write_script, GeneratedScript};

/// Current version of zcomp
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
