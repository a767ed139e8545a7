//! Generates the CloudFormation template for the API infrastructure: VPC
//! security groups, RDS, ElastiCache, S3, SQS, the ECS cluster and its
//! services behind an application load balancer, IAM users and an
//! Elasticsearch domain.

pub mod cloudformation;
pub mod config;
pub mod stack;
pub mod template;
pub mod writer;
