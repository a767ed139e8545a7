//! Typed properties for the AWS resource types the stack uses.
//!
//! Each struct serializes to the `Properties` block of its resource; the
//! template wraps it with the `Type` taken from [`Resource::RESOURCE_TYPE`].

pub mod autoscaling;
pub mod ec2;
pub mod ecr;
pub mod ecs;
pub mod elasticache;
pub mod elasticsearch;
pub mod elbv2;
pub mod iam;
pub mod logs;
pub mod rds;
pub mod s3;
pub mod sqs;

use serde::Serialize;

use super::LogicalId;

pub trait Resource: Serialize {
    const RESOURCE_TYPE: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeletionPolicy {
    Delete,
    Retain,
    Snapshot,
}

/// Resource attributes that sit next to `Properties`.
#[derive(Debug, Clone, Default)]
pub struct ResourceOptions {
    pub depends_on: Vec<LogicalId>,
    pub deletion_policy: Option<DeletionPolicy>,
}
