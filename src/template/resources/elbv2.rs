use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadBalancer {
    pub scheme: String,
    pub security_groups: Vec<Expr>,
    pub subnets: Expr,

    #[serde(rename = "Type")]
    pub kind: String,
}

impl Resource for LoadBalancer {
    const RESOURCE_TYPE: &'static str = "AWS::ElasticLoadBalancingV2::LoadBalancer";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetGroup {
    pub health_check_path: String,
    pub matcher: Matcher,
    pub port: u16,
    pub protocol: String,
    pub vpc_id: Expr,
}

impl Resource for TargetGroup {
    const RESOURCE_TYPE: &'static str = "AWS::ElasticLoadBalancingV2::TargetGroup";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Matcher {
    pub http_code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Listener {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<Certificate>,

    pub default_actions: Vec<Action>,
    pub load_balancer_arn: Expr,
    pub port: u16,
    pub protocol: String,
}

impl Resource for Listener {
    const RESOURCE_TYPE: &'static str = "AWS::ElasticLoadBalancingV2::Listener";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Certificate {
    pub certificate_arn: Expr,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Action {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_config: Option<RedirectConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_group_arn: Option<Expr>,

    #[serde(rename = "Type")]
    pub kind: String,
}

impl Action {
    pub fn forward(target_group_arn: Expr) -> Self {
        Self {
            redirect_config: None,
            target_group_arn: Some(target_group_arn),
            kind: String::from("forward"),
        }
    }

    pub fn redirect_to_https() -> Self {
        Self {
            redirect_config: Some(RedirectConfig {
                port: String::from("443"),
                protocol: String::from("HTTPS"),
                status_code: String::from("HTTP_301"),
            }),
            target_group_arn: None,
            kind: String::from("redirect"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RedirectConfig {
    pub port: String,
    pub protocol: String,
    pub status_code: String,
}
