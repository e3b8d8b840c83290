//! Interface conformance over type descriptors.
//!
//! Both walks are iterative and keep a visited set, so malformed host
//! metadata with cycles terminates instead of recursing forever.

use classpath_api::TypeDescriptor;
use std::collections::{HashSet, VecDeque};
use tracing::trace;

/// Whether `ty` or any of its ancestor classes declares an interface that
/// conforms to `target`.
///
/// Always `false` when `target` is not interface-kind.
pub fn implements_interface<T: TypeDescriptor>(ty: &T, target: &T) -> bool {
    if !target.is_interface() {
        return false;
    }

    let mut visited = HashSet::new();
    let mut current = Some(ty.clone());

    while let Some(class) = current {
        if !visited.insert(class.clone()) {
            trace!("Superclass cycle at {}", class.name());
            return false;
        }

        if class
            .declared_interfaces()
            .iter()
            .any(|iface| is_interface_equal(iface, target))
        {
            return true;
        }

        current = class.superclass();
    }

    false
}

/// Whether interface `a` is `b` or extends `b`, directly or transitively.
pub fn is_interface_equal<T: TypeDescriptor>(a: &T, b: &T) -> bool {
    let mut queue = VecDeque::from([a.clone()]);
    let mut visited = HashSet::new();

    while let Some(iface) = queue.pop_front() {
        if iface == *b {
            return true;
        }
        if !visited.insert(iface.clone()) {
            continue;
        }

        for parent in iface.declared_interfaces() {
            if !visited.contains(&parent) {
                queue.push_back(parent);
            }
        }
        if let Some(parent) = iface.superclass() {
            if !visited.contains(&parent) {
                queue.push_back(parent);
            }
        }
    }

    false
}
