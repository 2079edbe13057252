//! Completion attachment
//!
//! One operation binds completion descriptors to their targets: a switch
//! takes exactly one descriptor, an entry point takes a map from parameter
//! name to descriptor. Anything else is a definition-time usage error.

use crate::complete::Completion;
use crate::error::{AttachError, AttachResult};
use crate::model::{EntryPoint, SwitchDescriptor};

/// What a completion descriptor can be attached to
pub enum AttachTarget<'a, C = ()> {
    /// A declared switch; the descriptor completes its value
    Switch(&'a mut SwitchDescriptor<C>),

    /// A command's entry point; descriptors complete its positional and
    /// variadic parameters by name
    EntryPoint(&'a mut EntryPoint<C>),
}

/// The descriptors supplied to one attachment: bare descriptors and/or
/// name-keyed descriptors
#[derive(Default)]
pub struct Bindings<C = ()> {
    positional: Vec<Completion<C>>,
    named: Vec<(String, Completion<C>)>,
}

impl<C> Bindings<C> {
    pub fn new() -> Self {
        Bindings {
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// A single bare descriptor, the usual shape for switch targets
    pub fn one(completion: Completion<C>) -> Self {
        Bindings::new().and(completion)
    }

    /// Add a bare descriptor
    pub fn and(mut self, completion: Completion<C>) -> Self {
        self.positional.push(completion);
        self
    }

    /// Add a descriptor keyed by parameter name
    pub fn named(mut self, name: impl Into<String>, completion: Completion<C>) -> Self {
        self.named.push((name.into(), completion));
        self
    }
}

/// Attach completion descriptors to a switch or an entry point.
///
/// Switch targets require exactly one descriptor, supplied bare or as a
/// single-entry map. Entry-point targets require a non-empty map from
/// parameter name to descriptor; bare descriptors are rejected because
/// there is no way to tell which parameter they belong to.
pub fn attach_completion<C>(target: AttachTarget<'_, C>, bindings: Bindings<C>) -> AttachResult<()> {
    match target {
        AttachTarget::Switch(switch) => {
            let supplied = bindings.positional.len() + bindings.named.len();
            if supplied == 0 {
                return Err(AttachError::NoDescriptor);
            }
            if supplied > 1 {
                return Err(AttachError::AmbiguousDescriptor(supplied));
            }

            let completion = match bindings.positional.into_iter().next() {
                Some(completion) => completion,
                None => match bindings.named.into_iter().next() {
                    Some((_, completion)) => completion,
                    None => return Err(AttachError::NoDescriptor),
                },
            };
            switch.completion = Some(completion);
            Ok(())
        }
        AttachTarget::EntryPoint(entry) => {
            if !bindings.positional.is_empty() {
                return Err(AttachError::EntryPointNeedsTable);
            }
            if bindings.named.is_empty() {
                return Err(AttachError::EmptyTable);
            }

            for (name, completion) in bindings.named {
                entry.completions.insert(name, completion);
            }
            Ok(())
        }
    }
}
