//! Forward kinematics for a rigid articulated figure.
//!
//! A [`Figure`] owns a fixed joint tree, applies discrete commands to it
//! and composes world matrices for the rendering collaborator.

pub mod command;
pub mod config;
pub mod error;
pub mod figure;
pub mod humanoid;
pub mod joint;
pub mod math;
pub mod renderer;
pub mod rig;
pub mod skeleton;

pub use {
    self::{
        command::{Command, Controls, InputSnapshot, Motion},
        config::Config,
        error::{Error, TopologyError},
        figure::{Figure, Part},
        joint::{Joint, Limit, LimitOutcome, LimitPolicy},
        math::{Axis, Transform},
        renderer::{Renderable, Shape},
        rig::Rig,
        skeleton::{Skeleton, SkeletonBuilder},
    },
    nalgebra as na,
};
