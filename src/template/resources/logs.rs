use serde::Serialize;

use super::Resource;
use crate::template::expr::Expr;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogGroup {
    pub log_group_name: Expr,
    pub retention_in_days: u32,
}

impl Resource for LogGroup {
    const RESOURCE_TYPE: &'static str = "AWS::Logs::LogGroup";
}
