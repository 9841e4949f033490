//! Built-in predicates.
//!
//! Parameterless string checks, the everyday vocabulary of form rules.
//! Each returns a JSON boolean, so rules compare them with `expect: true`
//! or rely on the `false` default.

mod email;
mod text;

use super::PredicateRegistry;

/// Register all built-in predicates with the registry.
pub fn register_builtins(registry: &mut PredicateRegistry) {
    registry.register(email::IsEmail);
    for check in text::TEXT_CHECKS {
        registry.register(check);
    }
}
