//! Node path resolution for callback registration keys.
//!
//! A callback can target a parameter on any node in the graph. The node may
//! be given as an absolute path (`/ns/other_node`), a path relative to the
//! owning node's namespace (`other_node`), or left empty to mean the owning
//! node itself. Resolution happens once, at registration time.

/// Errors that can occur while resolving a node path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeNameError {
    /// Node path ends with a forward slash
    EndsWithSlash,
    /// Node path contains an invalid component
    InvalidComponent(String),
    /// Owning node's namespace is invalid
    InvalidNamespace(String),
}

impl std::fmt::Display for NodeNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndsWithSlash => write!(f, "Node path ends with forward slash"),
            Self::InvalidComponent(s) => write!(f, "Node path contains invalid component: {}", s),
            Self::InvalidNamespace(s) => write!(f, "Invalid namespace: {}", s),
        }
    }
}

impl std::error::Error for NodeNameError {}

/// Components must start with a letter or underscore, followed by
/// alphanumeric or underscores.
fn is_valid_name_component(component: &str) -> bool {
    if component.is_empty() {
        return false;
    }
    let bytes = component.as_bytes();
    if !bytes[0].is_ascii_alphabetic() && bytes[0] != b'_' {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'_')
}

fn validate_path(path: &str) -> Result<(), NodeNameError> {
    if path.ends_with('/') {
        return Err(NodeNameError::EndsWithSlash);
    }
    for part in path.split('/') {
        if part.is_empty() {
            continue; // leading slash creates an empty first component
        }
        if !is_valid_name_component(part) {
            return Err(NodeNameError::InvalidComponent(part.to_string()));
        }
    }
    Ok(())
}

/// The fully-qualified name of a node: `/name` in the root namespace,
/// `namespace/name` otherwise.
pub fn node_fqn(namespace: &str, name: &str) -> String {
    if namespace.is_empty() || namespace == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", namespace, name)
    }
}

/// Resolve a node path against the owning node.
///
/// - Empty path: the owning node's fully-qualified name.
/// - Absolute path (leading '/'): used as-is.
/// - Relative path: qualified against the owning node's namespace.
pub fn resolve_node_path(
    path: &str,
    own_namespace: &str,
    own_name: &str,
) -> Result<String, NodeNameError> {
    if path.is_empty() {
        return Ok(node_fqn(own_namespace, own_name));
    }

    validate_path(path)?;

    if path.starts_with('/') {
        return Ok(path.to_string());
    }

    if !(own_namespace.is_empty() || own_namespace == "/") && !own_namespace.starts_with('/') {
        return Err(NodeNameError::InvalidNamespace(own_namespace.to_string()));
    }
    Ok(node_fqn(own_namespace, path))
}
