use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScalingGroup {
    pub desired_capacity: Expr,
    pub launch_template: LaunchTemplateSpecification,
    pub max_size: Expr,
    pub min_size: Expr,

    #[serde(rename = "VPCZoneIdentifier")]
    pub vpc_zone_identifier: Expr,
}

impl Resource for AutoScalingGroup {
    const RESOURCE_TYPE: &'static str = "AWS::AutoScaling::AutoScalingGroup";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LaunchTemplateSpecification {
    pub launch_template_id: Expr,
    pub version: Expr,
}
