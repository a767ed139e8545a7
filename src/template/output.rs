use serde::Serialize;

use super::expr::Expr;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub value: Expr,
}

impl Output {
    pub fn new(description: &str, value: Expr) -> Self {
        Self {
            description: Some(description.to_string()),
            value,
        }
    }
}
