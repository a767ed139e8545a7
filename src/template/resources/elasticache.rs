use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubnetGroup {
    pub description: String,
    pub subnet_ids: Expr,
}

impl Resource for SubnetGroup {
    const RESOURCE_TYPE: &'static str = "AWS::ElastiCache::SubnetGroup";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheCluster {
    pub cache_node_type: Expr,
    pub cache_subnet_group_name: Expr,
    pub engine: String,
    pub engine_version: String,
    pub num_cache_nodes: Expr,
    pub vpc_security_group_ids: Vec<Expr>,
}

impl Resource for CacheCluster {
    const RESOURCE_TYPE: &'static str = "AWS::ElastiCache::CacheCluster";
}
