use std::collections::{HashMap, HashSet, VecDeque};

/// Outcome of an authorization check. Returned up the call stack and matched
/// explicitly by the dispatch layer so a 403 can never be remapped by a
/// generic error handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Authorized,
    Forbidden,
}

/// Built-in role/menu edge table as `(role, parent)` pairs. Parent roles
/// imply all descendants: holding ROOT implies every code below it.
pub const DEFAULT_EDGES: &[(&str, &str)] = &[
    ("SYS", "ROOT"),
    ("USER", "SYS"),
    ("SYS:USER", "SYS"),
    ("SYS:ROLE", "SYS"),
    ("SYS:MENU", "SYS"),
    ("SYS:AUDIT", "SYS"),
];

/// Static parent-implies-descendant tree over role/menu codes.
///
/// Built once at startup and read-only afterwards, so it needs no
/// synchronization. Only the implication query is exposed; the adjacency map
/// itself stays private.
pub struct RoleHierarchy {
    children: HashMap<String, Vec<String>>,
}

impl RoleHierarchy {
    /// Compile a `(role, parent)` edge table into the adjacency map.
    pub fn from_edges(edges: &[(&str, &str)]) -> Self {
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for (role, parent) in edges {
            children
                .entry((*parent).to_string())
                .or_default()
                .push((*role).to_string());
        }
        Self { children }
    }

    pub fn builtin() -> Self {
        Self::from_edges(DEFAULT_EDGES)
    }

    /// True if any held code equals `required` or is an ancestor of it.
    pub fn is_authorized(&self, held_codes: &[String], required: &str) -> bool {
        if held_codes.iter().any(|c| c == required) {
            return true;
        }

        // Walk downward from each held code; the tree is small and static.
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = held_codes.iter().map(|c| c.as_str()).collect();
        while let Some(code) = queue.pop_front() {
            if !seen.insert(code) {
                continue;
            }
            if let Some(descendants) = self.children.get(code) {
                for child in descendants {
                    if child == required {
                        return true;
                    }
                    queue.push_back(child);
                }
            }
        }
        false
    }

    pub fn check(&self, held_codes: &[String], required: &str) -> AccessDecision {
        if self.is_authorized(held_codes, required) {
            AccessDecision::Authorized
        } else {
            AccessDecision::Forbidden
        }
    }
}
