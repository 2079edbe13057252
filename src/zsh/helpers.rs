//! Fixed helper functions appended to every generated script
//!
//! These are shared, not per-node: array membership, one-level subcommand
//! dispatch, snapshot stripping, and the two runtime hooks that re-invoke
//! the program for dynamic candidates.

/// Helper text appended verbatim after the generated per-node functions.
///
/// The hooks hardcode the hidden switch spelling; `dynamic::CANDIDATES_SWITCH`
/// is the single source of truth and a test keeps the two in sync.
pub const HELPER_FUNCTIONS: &str = r#"
# Array membership test.
__zc_in_array() {
    local needle=$1
    shift
    local item
    for item in "$@"; do
        [[ "$item" == "$needle" ]] && return 0
    done
    return 1
}

# Dispatch to the function generated for the subcommand that has already
# been typed, if it is a valid child. The subcommand word stays in
# words[1], where the child's grammar call expects the command word.
__zc_descend() {
    local parent=$1
    local sub=${words[1]}
    local -a valid
    valid=(${(P)${:-${parent}_subcommands}})
    if ! __zc_in_array "$sub" "${valid[@]}"; then
        return 1
    fi
    _zc_consumed+=("$sub")
    "${parent}_${sub//[^[:alnum:]]/_}"
}

# Rebuild the snapshot taken on entry, truncated at the cursor, with every
# word that resolved to a subcommand removed, so the program can be
# re-invoked with only the words typed ahead of the completion point.
__zc_strip_words() {
    local -a pending out
    pending=("${_zc_consumed[@]}")
    local word
    for word in "${(@)_zc_words[1,${_zc_current}]}"; do
        if (( ${#pending[@]} )) && [[ "$word" == "${pending[1]}" ]]; then
            shift pending
            continue
        fi
        out+=("$word")
    done
    print -r -- "${out[@]}"
}

# Ask the program itself for candidates: re-invoke it with the hidden
# completion switch and feed its output lines to the completion system.
__zc_complete_general() {
    local slot=$1
    local -a invoke candidates
    invoke=(${(z)"$(__zc_strip_words)"})
    candidates=(${(f)"$("${invoke[@]}" --zsh-complete "${slot}:${CURRENT}" 2>/dev/null)"})
    (( ${#candidates[@]} )) && compadd -a candidates
}

# Same callback, but treat the returned candidates as path-like so they
# complete one path component at a time.
__zc_complete_files() {
    local slot=$1
    local -a invoke candidates
    invoke=(${(z)"$(__zc_strip_words)"})
    candidates=(${(f)"$("${invoke[@]}" --zsh-complete "${slot}:${CURRENT}" 2>/dev/null)"})
    (( ${#candidates[@]} )) && _multi_parts / candidates
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::CANDIDATES_SWITCH;

    #[test]
    fn test_hooks_invoke_the_hidden_switch() {
        let spelling = format!("--{}", CANDIDATES_SWITCH);
        assert!(HELPER_FUNCTIONS.contains(&spelling));
    }

    #[test]
    fn test_strip_words_stops_at_the_cursor_snapshot() {
        assert!(HELPER_FUNCTIONS.contains("_zc_words[1,${_zc_current}]"));
    }

    #[test]
    fn test_all_helpers_are_defined() {
        for helper in [
            "__zc_in_array()",
            "__zc_descend()",
            "__zc_strip_words()",
            "__zc_complete_general()",
            "__zc_complete_files()",
        ] {
            assert!(HELPER_FUNCTIONS.contains(helper), "missing {}", helper);
        }
    }
}
