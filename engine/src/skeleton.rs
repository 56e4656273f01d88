use {
    crate::{
        error::{Error, TopologyError},
        joint::Joint,
    },
    smallvec::SmallVec,
    std::collections::HashMap,
};

/// Joint indices from the root down to some joint.
pub type Chain = SmallVec<[usize; 8]>;

/// Tree-like structure of joints.
///
/// Joints are stored so that every parent precedes its children,
/// index 0 being the root.
#[derive(Clone, Debug)]
pub struct Skeleton {
    joints: Box<[Joint]>,
    names: HashMap<String, usize>,
}

impl Skeleton {
    pub fn builder() -> SkeletonBuilder {
        SkeletonBuilder::new()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn joint(&self, index: usize) -> &Joint {
        &self.joints[index]
    }

    pub fn joint_mut(&mut self, index: usize) -> &mut Joint {
        &mut self.joints[index]
    }

    pub fn index_of(&self, name: &str) -> Result<usize, Error> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownJoint {
                name: name.to_owned(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.joints.iter().map(Joint::name)
    }

    /// Direct children of the joint, in storage order.
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.joints
            .iter()
            .enumerate()
            .skip(index + 1)
            .filter(move |(_, joint)| joint.parent() == Some(index))
            .map(|(child, _)| child)
    }

    /// Path from the root to the joint, both included.
    pub fn chain(&self, index: usize) -> Chain {
        let mut chain = Chain::new();
        let mut next = Some(index);
        while let Some(index) = next {
            chain.push(index);
            next = self.joints[index].parent();
        }
        chain.reverse();
        chain
    }

    /// Returns every joint to its rest pose.
    pub fn reset(&mut self) {
        for joint in self.joints.iter_mut() {
            joint.reset();
        }
    }
}

/// Collects joints with parent names and validates the tree on `build`.
#[derive(Debug, Default)]
pub struct SkeletonBuilder {
    joints: Vec<(Joint, Option<String>)>,
}

impl SkeletonBuilder {
    pub fn new() -> Self {
        SkeletonBuilder { joints: Vec::new() }
    }

    /// Adds the root joint.
    pub fn root(mut self, joint: Joint) -> Self {
        self.joints.push((joint, None));
        self
    }

    /// Adds a joint attached to the joint named `parent`.
    /// Parent may be declared later.
    pub fn child(mut self, parent: &str, joint: Joint) -> Self {
        self.joints.push((joint, Some(parent.to_owned())));
        self
    }

    pub fn build(self) -> Result<Skeleton, TopologyError> {
        let mut declared = HashMap::with_capacity(self.joints.len());
        for (index, (joint, _)) in self.joints.iter().enumerate() {
            if declared.insert(joint.name().to_owned(), index).is_some() {
                return Err(TopologyError::DuplicateJoint {
                    name: joint.name().to_owned(),
                });
            }
        }

        let mut root = None;
        let mut parents = Vec::with_capacity(self.joints.len());
        for (joint, parent) in &self.joints {
            match parent {
                None => match root {
                    None => {
                        root = Some(parents.len());
                        parents.push(None);
                    }
                    Some(first) => {
                        let first: &(Joint, _) = &self.joints[first];
                        return Err(TopologyError::MultipleRoots {
                            first: first.0.name().to_owned(),
                            second: joint.name().to_owned(),
                        });
                    }
                },
                Some(parent) => match declared.get(parent) {
                    Some(&index) => parents.push(Some(index)),
                    None => {
                        return Err(TopologyError::UnknownParent {
                            joint: joint.name().to_owned(),
                            parent: parent.clone(),
                        })
                    }
                },
            }
        }

        let root = root.ok_or(TopologyError::NoRoot)?;

        // Depth-first from the root, siblings in declaration order.
        // Joints never reached hang off a cycle detached from the root.
        let mut order = Vec::with_capacity(self.joints.len());
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            order.push(current);
            let first = stack.len();
            stack.extend(
                parents
                    .iter()
                    .enumerate()
                    .filter(|(_, parent)| **parent == Some(current))
                    .map(|(child, _)| child),
            );
            stack[first..].reverse();
        }

        if order.len() != self.joints.len() {
            let mut reached = vec![false; self.joints.len()];
            for &index in &order {
                reached[index] = true;
            }
            let stray = reached.iter().position(|r| !r).unwrap_or_default();
            return Err(TopologyError::Cycle {
                name: self.joints[stray].0.name().to_owned(),
            });
        }

        let mut remap = vec![0; order.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = new;
        }

        let mut slots: Vec<Option<Joint>> =
            self.joints.into_iter().map(|(joint, _)| Some(joint)).collect();

        let mut joints = Vec::with_capacity(order.len());
        let mut names = HashMap::with_capacity(order.len());
        for &old in &order {
            let mut joint = match slots[old].take() {
                Some(joint) => joint,
                None => unreachable!("Joint visited twice"),
            };
            joint.set_parent(parents[old].map(|parent| remap[parent]));
            names.insert(joint.name().to_owned(), joints.len());
            joints.push(joint);
        }

        tracing::debug!(joints = joints.len(), "Skeleton built");

        Ok(Skeleton {
            joints: joints.into_boxed_slice(),
            names,
        })
    }
}
