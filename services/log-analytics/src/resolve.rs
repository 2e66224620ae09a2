use crate::SharedKey;
use lawsend_core::{Error, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Debug;

static WORKSPACE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^/subscriptions/[^/]+/resourcegroups/(?P<rg_name>[^/]*)/providers/[^/]+/.+/(?P<name>[^/]*)$",
    )
    .expect("workspace path regex must be valid")
});

/// One workspace as listed by the directory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEntry {
    /// Customer id of the workspace, the id used to send data.
    pub customer_id: String,
    /// ARM resource path, `/subscriptions/.../workspaces/<name>`.
    pub resource_path: String,
}

/// One page of a workspace listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspacePage {
    /// Workspaces in this page.
    pub entries: Vec<WorkspaceEntry>,
    /// Link to the next page, `None` on the last one.
    pub next_link: Option<String>,
}

/// Symbolic name of a workspace, as needed to fetch its shared key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRef {
    /// Workspace name.
    pub name: String,
    /// Resource group holding the workspace.
    pub resource_group: String,
}

/// DirectoryService looks up workspaces and their shared keys.
pub trait DirectoryService: Debug + Send + Sync + 'static {
    /// List the workspaces visible under the subscription.
    ///
    /// `next_link` is `None` for the first page and the value returned by
    /// the previous page afterwards.
    fn list_workspaces(&self, subscription_id: &str, next_link: Option<&str>)
        -> Result<WorkspacePage>;

    /// Fetch the shared key of a workspace.
    fn get_shared_key(&self, subscription_id: &str, workspace: &WorkspaceRef) -> Result<SharedKey>;
}

/// WorkspaceResolver maps a workspace customer id to its name and resource group.
#[derive(Debug)]
pub struct WorkspaceResolver<'a> {
    directory: &'a dyn DirectoryService,
}

impl<'a> WorkspaceResolver<'a> {
    /// Create a resolver on top of a directory service.
    pub fn new(directory: &'a dyn DirectoryService) -> Self {
        Self { directory }
    }

    /// Find the workspace whose customer id is exactly `customer_id`.
    ///
    /// Every page of the listing is visited until a match is found. A next
    /// link that was already followed fails the lookup.
    pub fn resolve(&self, subscription_id: &str, customer_id: &str) -> Result<WorkspaceRef> {
        let mut next_link: Option<String> = None;
        let mut visited = HashSet::new();
        let mut pages = 0;

        loop {
            let page = self
                .directory
                .list_workspaces(subscription_id, next_link.as_deref())?;
            pages += 1;

            if let Some(entry) = page.entries.iter().find(|e| e.customer_id == customer_id) {
                debug!("found workspace {customer_id} at {}", entry.resource_path);
                return parse_resource_path(&entry.resource_path);
            }

            match page.next_link.filter(|v| !v.is_empty()) {
                Some(link) => {
                    if !visited.insert(link.clone()) {
                        return Err(Error::unexpected(format!(
                            "directory returned a repeated next link {link:?} after {pages} page(s)"
                        )));
                    }
                    next_link = Some(link);
                }
                None => break,
            }
        }

        Err(Error::workspace_not_found(format!(
            "workspace with customer ID {customer_id:?} not found in {pages} page(s) of subscription {subscription_id:?}"
        )))
    }
}

/// Extract name and resource group from a workspace resource path.
///
/// Literal segments match case-insensitively, the extracted values keep their case.
pub fn parse_resource_path(path: &str) -> Result<WorkspaceRef> {
    let Some(caps) = WORKSPACE_PATH.captures(path) else {
        return Err(Error::malformed_resource_path(format!(
            "workspace ID {path:?} is not a workspace resource path"
        )));
    };

    let name = caps.name("name").map_or("", |m| m.as_str());
    if name.is_empty() {
        return Err(Error::malformed_resource_path(format!(
            "workspace name not found in workspace ID {path:?}"
        )));
    }
    let resource_group = caps.name("rg_name").map_or("", |m| m.as_str());
    if resource_group.is_empty() {
        return Err(Error::malformed_resource_path(format!(
            "workspace resource group name not found in workspace ID {path:?}"
        )));
    }

    Ok(WorkspaceRef {
        name: name.to_string(),
        resource_group: resource_group.to_string(),
    })
}
