/// Skeleton description does not form a single tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("Joint `{name}` is declared more than once")]
    DuplicateJoint { name: String },

    #[error("Joint `{joint}` refers to unknown parent `{parent}`")]
    UnknownParent { joint: String, parent: String },

    #[error("Skeleton has no root joint")]
    NoRoot,

    #[error("Skeleton has several root joints: `{first}` and `{second}`")]
    MultipleRoots { first: String, second: String },

    #[error("Joint `{name}` is its own ancestor")]
    Cycle { name: String },
}

/// Errors surfaced by figure queries and commands.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown joint `{name}`")]
    UnknownJoint { name: String },

    #[error("Malformed skeleton topology")]
    Topology {
        #[from]
        source: TopologyError,
    },

    #[error("Expected {expected} meshes, got {actual}")]
    MeshCountMismatch { expected: usize, actual: usize },
}
