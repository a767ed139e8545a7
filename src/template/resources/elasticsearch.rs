use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;
use crate::template::policy::PolicyDocument;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Domain {
    pub access_policies: PolicyDocument,
    pub domain_name: Expr,

    #[serde(rename = "EBSOptions")]
    pub ebs_options: EbsOptions,

    pub elasticsearch_cluster_config: ClusterConfig,
    pub elasticsearch_version: String,

    #[serde(rename = "VPCOptions")]
    pub vpc_options: VpcOptions,
}

impl Resource for Domain {
    const RESOURCE_TYPE: &'static str = "AWS::Elasticsearch::Domain";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterConfig {
    pub instance_count: Expr,
    pub instance_type: Expr,
    pub zone_awareness_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EbsOptions {
    #[serde(rename = "EBSEnabled")]
    pub ebs_enabled: bool,
    pub volume_size: u32,
    pub volume_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcOptions {
    pub security_group_ids: Vec<Expr>,
    pub subnet_ids: Vec<Expr>,
}
