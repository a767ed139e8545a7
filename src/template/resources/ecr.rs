use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Repository {
    pub repository_name: Expr,
}

impl Resource for Repository {
    const RESOURCE_TYPE: &'static str = "AWS::ECR::Repository";
}
