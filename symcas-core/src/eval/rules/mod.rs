//! Implementation of the canonicalization rules.
//!
//! Each rule in this module is a function that takes the operands of the node being constructed,
//! and returns `Some(expr)` with the canonical replacement if the rule applies, or `None` if the
//! rule does not apply. Rules are tried in a fixed order, and the first rule that applies wins.
//!
//! Rules build their results through the canonicalizing constructors, so a rule may trigger
//! further rules on the sub-expressions it creates.

/// Logs that a rule fired. Formatting only happens when `trace` records are enabled.
macro_rules! fired {
    ($rule:literal, $($arg:tt)+) => {
        log::trace!(concat!("rule `", $rule, "`: {}"), format_args!($($arg)+))
    };
}

pub(crate) use fired;

pub mod add;
pub mod function;
pub mod imaginary;
pub mod multiply;
pub mod power;
pub mod root;
