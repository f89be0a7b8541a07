//! A tiny leaking string interner.
//!
//! Dynamically-resolved type names (parsed from `.msg`/`.srv` files at
//! runtime) need a `&'static str` to satisfy [`crate::TypeSupport::type_name`],
//! which was designed around code-generated types whose names are compiled-in
//! string literals. Interning leaks each distinct name once and hands back
//! the same `&'static str` on every subsequent call, so the cost is bounded
//! by the number of distinct types a process resolves, not by message count.

use std::collections::HashSet;
use std::sync::OnceLock;
use std::sync::Mutex;

fn table() -> &'static Mutex<HashSet<&'static str>> {
    static TABLE: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Intern `s`, returning a `'static` reference stable for the process lifetime.
pub fn intern(s: &str) -> &'static str {
    let mut table = table().lock().unwrap_or_else(|e| e.into_inner());
    if let Some(existing) = table.get(s) {
        return existing;
    }
    let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
    table.insert(leaked);
    leaked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let a = intern("std_msgs/msg/String");
        let b = intern("std_msgs/msg/String");
        assert_eq!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn distinct_strings_intern_distinctly() {
        let a = intern("pkg_a/msg/A");
        let b = intern("pkg_b/msg/B");
        assert_ne!(a, b);
    }
}
