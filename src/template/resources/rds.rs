use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbSubnetGroup {
    #[serde(rename = "DBSubnetGroupDescription")]
    pub description: String,
    pub subnet_ids: Expr,
}

impl Resource for DbSubnetGroup {
    const RESOURCE_TYPE: &'static str = "AWS::RDS::DBSubnetGroup";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbInstance {
    pub allocated_storage: Expr,
    pub backup_retention_period: u32,

    #[serde(rename = "DBInstanceClass")]
    pub db_instance_class: Expr,

    #[serde(rename = "DBName")]
    pub db_name: Expr,

    #[serde(rename = "DBSubnetGroupName")]
    pub db_subnet_group_name: Expr,

    pub engine: String,
    pub engine_version: String,
    pub master_user_password: Expr,
    pub master_username: Expr,

    #[serde(rename = "MultiAZ")]
    pub multi_az: bool,

    pub publicly_accessible: bool,
    pub storage_encrypted: bool,
    pub storage_type: String,

    #[serde(rename = "VPCSecurityGroups")]
    pub vpc_security_groups: Vec<Expr>,
}

impl Resource for DbInstance {
    const RESOURCE_TYPE: &'static str = "AWS::RDS::DBInstance";
}
