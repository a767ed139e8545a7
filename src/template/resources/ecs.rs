use std::collections::BTreeMap;

use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cluster {}

impl Resource for Cluster {
    const RESOURCE_TYPE: &'static str = "AWS::ECS::Cluster";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskDefinition {
    pub container_definitions: Vec<ContainerDefinition>,
    pub family: Expr,
}

impl Resource for TaskDefinition {
    const RESOURCE_TYPE: &'static str = "AWS::ECS::TaskDefinition";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerDefinition {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,

    pub essential: bool,
    pub image: Expr,
    pub log_configuration: LogConfiguration,
    pub memory_reservation: u32,
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub port_mappings: Vec<PortMapping>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PortMapping {
    pub container_port: u16,
    /// Zero lets ECS pick an ephemeral host port.
    pub host_port: u16,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogConfiguration {
    pub log_driver: String,
    pub options: BTreeMap<String, Expr>,
}

impl LogConfiguration {
    pub fn awslogs(log_group: Expr, stream_prefix: &str) -> Self {
        let mut options = BTreeMap::new();
        options.insert(String::from("awslogs-group"), log_group);
        options.insert(String::from("awslogs-region"), Expr::region());
        options.insert(String::from("awslogs-stream-prefix"), Expr::from(stream_prefix));

        Self {
            log_driver: String::from("awslogs"),
            options,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Service {
    pub cluster: Expr,
    pub deployment_configuration: DeploymentConfiguration,
    pub desired_count: Expr,
    pub launch_type: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub load_balancers: Vec<ServiceLoadBalancer>,

    pub task_definition: Expr,
}

impl Resource for Service {
    const RESOURCE_TYPE: &'static str = "AWS::ECS::Service";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentConfiguration {
    pub maximum_percent: u32,
    pub minimum_healthy_percent: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceLoadBalancer {
    pub container_name: String,
    pub container_port: u16,
    pub target_group_arn: Expr,
}
