//! IAM policy documents, shared by user policies, role trust policies and
//! resource access policies.

use serde::Serialize;

use super::expr::Expr;

pub const VERSION: &str = "2012-10-17";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: &'static str,
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    pub fn new(statement: Vec<Statement>) -> Self {
        Self {
            version: VERSION,
            statement,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// A single value is written as a scalar, several as a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Principal {
    Service {
        #[serde(rename = "Service")]
        service: OneOrMany<String>,
    },
    Aws {
        #[serde(rename = "AWS")]
        aws: OneOrMany<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,

    pub action: OneOrMany<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<OneOrMany<Expr>>,
}

impl Statement {
    pub fn allow<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut actions: Vec<String> = actions
            .into_iter()
            .map(|action| action.to_string())
            .collect();
        let action = if actions.len() == 1 {
            OneOrMany::One(actions.remove(0))
        } else {
            OneOrMany::Many(actions)
        };

        Self {
            effect: Effect::Allow,
            principal: None,
            action,
            resource: None,
        }
    }

    pub fn on_any_resource(mut self) -> Self {
        self.resource = Some(OneOrMany::One(Expr::from("*")));
        self
    }

    pub fn on_resource(mut self, resource: Expr) -> Self {
        self.resource = Some(OneOrMany::One(resource));
        self
    }

    pub fn on_resources(mut self, resources: Vec<Expr>) -> Self {
        self.resource = Some(OneOrMany::Many(resources));
        self
    }

    pub fn for_service(mut self, service: &str) -> Self {
        self.principal = Some(Principal::Service {
            service: OneOrMany::One(service.to_string()),
        });
        self
    }

    pub fn for_anyone(mut self) -> Self {
        self.principal = Some(Principal::Aws {
            aws: OneOrMany::One(Expr::from("*")),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{PolicyDocument, Statement};
    use crate::template::expr::Expr;

    #[test]
    fn single_action_is_written_as_scalar() {
        let document = PolicyDocument::new(vec![
            Statement::allow(["secretsmanager:GetSecretValue"]).on_any_resource(),
        ]);

        assert_eq!(
            json!({
                "Version": "2012-10-17",
                "Statement": [{
                    "Action": "secretsmanager:GetSecretValue",
                    "Effect": "Allow",
                    "Resource": "*"
                }]
            }),
            serde_json::to_value(&document).unwrap()
        );
    }

    #[test]
    fn writes_service_principal_and_resource_list() {
        let statement = Statement::allow(["sts:AssumeRole", "sts:TagSession"])
            .for_service("ec2.amazonaws.com")
            .on_resources(vec![Expr::GetAtt(String::from("Queue"), String::from("Arn"))]);

        assert_eq!(
            json!({
                "Action": ["sts:AssumeRole", "sts:TagSession"],
                "Effect": "Allow",
                "Principal": {"Service": "ec2.amazonaws.com"},
                "Resource": [{"Fn::GetAtt": ["Queue", "Arn"]}]
            }),
            serde_json::to_value(&statement).unwrap()
        );
    }
}
