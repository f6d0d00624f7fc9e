//! Top-level resource handles and the host workspace abstraction.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A top-level resource discovered by a workspace resource provider.
///
/// The `resource_type` selects which branch data provider renders the
/// resource's subtree; the `id` is the provider's stable handle for
/// resolving the resource back into its root node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub resource_type: String,
}

impl Resource {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            resource_type: resource_type.into(),
        }
    }
}

/// One folder of the host workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: PathBuf,
}

impl WorkspaceFolder {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Host workspace surface consumed during root enumeration.
pub trait Workspace: Send + Sync {
    fn folders(&self) -> Vec<WorkspaceFolder>;
}

/// Fixed folder list, for hosts that resolve their workspace up front and
/// for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticWorkspace {
    folders: Vec<WorkspaceFolder>,
}

impl StaticWorkspace {
    pub fn new(folders: Vec<WorkspaceFolder>) -> Self {
        Self { folders }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(vec![WorkspaceFolder::new(name, path)])
    }
}

impl Workspace for StaticWorkspace {
    fn folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }
}
