use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;
use crate::template::policy::PolicyDocument;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub user_name: Expr,
    pub policies: Vec<Policy>,
}

impl Resource for User {
    const RESOURCE_TYPE: &'static str = "AWS::IAM::User";
}

/// Inline policy attached to a user or role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Policy {
    pub policy_name: String,
    pub policy_document: PolicyDocument,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Role {
    pub assume_role_policy_document: PolicyDocument,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub managed_policy_arns: Vec<String>,
}

impl Resource for Role {
    const RESOURCE_TYPE: &'static str = "AWS::IAM::Role";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceProfile {
    pub roles: Vec<Expr>,
}

impl Resource for InstanceProfile {
    const RESOURCE_TYPE: &'static str = "AWS::IAM::InstanceProfile";
}
