use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Queue {
    pub queue_name: Expr,
}

impl Resource for Queue {
    const RESOURCE_TYPE: &'static str = "AWS::SQS::Queue";
}
