//! Resource kinds and the accessor traits used to reach them.
//!
//! An [`Accessor`] lists the rows of one resource kind. Kinds that can be
//! paused also expose the [`Pausable`] capability through
//! [`Accessor::as_pausable`]; kinds that cannot simply return `None`.

pub mod context;
pub mod store;

use std::fmt;
use std::str::FromStr;

pub use context::CallContext;

use crate::error::BrowseError;

/// Group/version/resource triple identifying a resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gvr {
    group: String,
    version: String,
    resource: String,
}

impl Gvr {
    pub fn new(group: &str, version: &str, resource: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            resource: resource.to_string(),
        }
    }

    pub fn deployments() -> Self {
        Self::new("apps", "v1", "deployments")
    }

    pub fn daemonsets() -> Self {
        Self::new("apps", "v1", "daemonsets")
    }

    /// Plural resource noun, e.g. `deployments`.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Gvr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.resource)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.resource)
        }
    }
}

impl FromStr for Gvr {
    type Err = BrowseError;

    /// Accepts `group/version/resource`, `version/resource` (core group)
    /// or one of the short aliases (`dp`, `deploy`, `ds`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [group, version, resource] if !resource.is_empty() => {
                Ok(Gvr::new(group, version, resource))
            }
            [version, resource] if !resource.is_empty() => Ok(Gvr::new("", version, resource)),
            [alias] => match alias.to_ascii_lowercase().as_str() {
                "dp" | "deploy" | "deployment" | "deployments" => Ok(Gvr::deployments()),
                "ds" | "daemonset" | "daemonsets" => Ok(Gvr::daemonsets()),
                "" => Err(BrowseError::Config("empty resource kind".into())),
                other => Ok(Gvr::new("", "v1", other)),
            },
            _ => Err(BrowseError::Config(format!("invalid resource kind '{}'", s))),
        }
    }
}

/// Turn a plural resource noun into its singular form.
pub fn singularize(plural: &str) -> String {
    if let Some(stem) = plural.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    for suffix in ["sses", "xes", "ches", "shes"] {
        if plural.ends_with(suffix) {
            return plural[..plural.len() - 2].to_string();
        }
    }
    match plural.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => plural.to_string(),
    }
}

/// One listed resource: its `namespace/name` path and rendered cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub path: String,
    pub cells: Vec<String>,
}

/// Header plus rows, as produced by an accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn header_index(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|h| h == column)
    }
}

/// Read access to one resource kind.
pub trait Accessor: Send + Sync {
    fn gvr(&self) -> &Gvr;

    /// List resources, optionally restricted to one namespace.
    fn list(&self, ctx: &CallContext, namespace: Option<&str>) -> Result<Table, BrowseError>;

    /// Capability query for pause/resume support.
    fn as_pausable(&self) -> Option<&dyn Pausable> {
        None
    }
}

/// Resources whose rollout can be paused and resumed.
pub trait Pausable {
    fn pause(&self, ctx: &CallContext, path: &str) -> Result<(), BrowseError>;

    fn resume(&self, ctx: &CallContext, path: &str) -> Result<(), BrowseError>;
}

/// Hands out accessors per resource kind.
pub trait AccessorFactory {
    fn accessor_for(&self, gvr: &Gvr) -> Result<Box<dyn Accessor>, BrowseError>;
}

/// Split a `namespace/name` path.
pub fn split_path(path: &str) -> Result<(&str, &str), BrowseError> {
    match path.split_once('/') {
        Some((ns, name)) if !ns.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((ns, name))
        }
        _ => Err(BrowseError::InvalidPath(path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singularize_common_nouns() {
        assert_eq!(singularize("deployments"), "deployment");
        assert_eq!(singularize("daemonsets"), "daemonset");
        assert_eq!(singularize("policies"), "policy");
        assert_eq!(singularize("ingresses"), "ingress");
        assert_eq!(singularize("pod"), "pod");
        assert_eq!(singularize("s"), "s");
    }

    #[test]
    fn gvr_display() {
        assert_eq!(Gvr::deployments().to_string(), "apps/v1/deployments");
        assert_eq!(Gvr::new("", "v1", "pods").to_string(), "v1/pods");
    }

    #[test]
    fn gvr_from_str_forms() {
        assert_eq!("apps/v1/deployments".parse::<Gvr>().unwrap(), Gvr::deployments());
        assert_eq!("dp".parse::<Gvr>().unwrap(), Gvr::deployments());
        assert_eq!("DS".parse::<Gvr>().unwrap(), Gvr::daemonsets());
        assert_eq!("v1/pods".parse::<Gvr>().unwrap(), Gvr::new("", "v1", "pods"));
        assert_eq!("pods".parse::<Gvr>().unwrap(), Gvr::new("", "v1", "pods"));
        assert!("".parse::<Gvr>().is_err());
        assert!("a/b/c/d".parse::<Gvr>().is_err());
    }

    #[test]
    fn split_path_requires_namespace_and_name() {
        assert_eq!(split_path("default/web").unwrap(), ("default", "web"));
        assert!(split_path("web").is_err());
        assert!(split_path("/web").is_err());
        assert!(split_path("default/").is_err());
        assert!(split_path("a/b/c").is_err());
    }

    #[test]
    fn table_header_index() {
        let table = Table {
            header: vec!["NAME".into(), "PAUSED".into()],
            rows: Vec::new(),
        };
        assert_eq!(table.header_index("PAUSED"), Some(1));
        assert_eq!(table.header_index("AGE"), None);
    }
}
