use super::compute::Compute;
use super::messaging::Queues;
use super::names::Names;
use crate::template::policy::{PolicyDocument, Statement};
use crate::template::resources::iam::{Policy, User};
use crate::template::{Error, Template};

pub fn add(
    template: &mut Template,
    names: &Names,
    compute: &Compute,
    queues: &Queues,
) -> Result<(), Error> {
    template.add_resource(
        "CiUser",
        User {
            user_name: names.ci_user.clone(),
            policies: vec![Policy {
                policy_name: String::from("CiUserPolicy"),
                policy_document: PolicyDocument::new(vec![
                    Statement::allow(["secretsmanager:GetSecretValue"]).on_any_resource(),
                    Statement::allow(["ecr:GetAuthorizationToken"]).on_any_resource(),
                    Statement::allow([
                        "ecr:BatchCheckLayerAvailability",
                        "ecr:CompleteLayerUpload",
                        "ecr:InitiateLayerUpload",
                        "ecr:PutImage",
                        "ecr:UploadLayerPart",
                    ])
                    .on_resource(compute.docker_repository.attribute("Arn")),
                    Statement::allow([
                        "ecs:DescribeServices",
                        "ecs:DescribeTaskDefinition",
                        "ecs:RegisterTaskDefinition",
                        "ecs:UpdateService",
                    ])
                    .on_any_resource(),
                ]),
            }],
        },
    )?;

    template.add_resource(
        "ApiUser",
        User {
            user_name: names.api_user.clone(),
            policies: vec![Policy {
                policy_name: String::from("ApiUserPolicy"),
                policy_document: PolicyDocument::new(vec![
                    Statement::allow(["s3:*"]).on_any_resource(),
                    Statement::allow(["sqs:*"]).on_resources(queues.arns()),
                ]),
            }],
        },
    )?;

    return Ok(());
}
