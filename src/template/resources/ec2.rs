use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroup {
    pub group_description: String,
    pub security_group_ingress: Vec<Ingress>,
    pub vpc_id: Expr,
}

impl Resource for SecurityGroup {
    const RESOURCE_TYPE: &'static str = "AWS::EC2::SecurityGroup";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ingress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub from_port: u16,
    pub ip_protocol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_security_group_id: Option<Expr>,

    pub to_port: u16,
}

impl Ingress {
    pub fn tcp_from_anywhere(port: u16, description: &str) -> Self {
        Self {
            cidr_ip: Some(String::from("0.0.0.0/0")),
            description: Some(description.to_string()),
            from_port: port,
            ip_protocol: String::from("tcp"),
            source_security_group_id: None,
            to_port: port,
        }
    }

    /// TCP from members of another security group; `group_id` is its
    /// `GroupId` attribute.
    pub fn tcp_from_group(from_port: u16, to_port: u16, group_id: Expr, description: &str) -> Self {
        Self {
            cidr_ip: None,
            description: Some(description.to_string()),
            from_port,
            ip_protocol: String::from("tcp"),
            source_security_group_id: Some(group_id),
            to_port,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LaunchTemplate {
    pub launch_template_data: LaunchTemplateData,
    pub launch_template_name: Expr,
}

impl Resource for LaunchTemplate {
    const RESOURCE_TYPE: &'static str = "AWS::EC2::LaunchTemplate";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LaunchTemplateData {
    pub iam_instance_profile: IamInstanceProfile,
    pub image_id: Expr,
    pub instance_type: Expr,
    pub security_group_ids: Vec<Expr>,
    pub user_data: Expr,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IamInstanceProfile {
    pub arn: Expr,
}
