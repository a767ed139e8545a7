//! The API infrastructure stack.
//!
//! [`build`] assembles the whole template in dependency order: parameters,
//! names, security groups, storage, queues, compute, load balancer,
//! services, IAM users, search and finally outputs.

mod balancer;
mod compute;
mod identity;
mod messaging;
mod names;
mod network;
mod outputs;
mod parameters;
mod search;
mod storage;

use crate::config::Config;
use crate::template::{Error, Template};

use self::names::Names;

pub fn build(config: &Config, uuid: &str) -> Result<Template, Error> {
    let mut template = Template::new(Some(config.description.clone()));

    let parameters = parameters::add(&mut template, uuid, &config.defaults)?;
    let names = Names::new(&parameters, config);

    let security_groups = network::add(&mut template, &parameters)?;
    let storage = storage::add(&mut template, &parameters, &names, &security_groups)?;
    let queues = messaging::add(&mut template, &names)?;
    let compute = compute::add(
        &mut template,
        &parameters,
        &names,
        &security_groups,
        config.log_retention_days,
    )?;
    let load_balancing = balancer::add(&mut template, &parameters, &security_groups)?;
    compute::add_services(&mut template, &parameters, &compute, &load_balancing)?;
    identity::add(&mut template, &names, &compute, &queues)?;
    let search_domain = search::add(&mut template, &parameters, &names, &security_groups)?;

    outputs::add(
        &mut template,
        &names,
        &compute,
        &storage,
        &queues,
        &load_balancing,
        &search_domain,
    )?;

    template.verify()?;
    tracing::debug!(
        parameters = template.parameter_count(),
        resources = template.resource_count(),
        outputs = template.output_count(),
        "built template"
    );

    return Ok(template);
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::build;
    use crate::config::Config;

    const UUID: &str = "0b2d7a4e-5c1f-4f4e-9a55-2f6b1f0c8d11";

    fn template() -> Value {
        build(&Config::default(), UUID).unwrap().to_value().unwrap()
    }

    #[test]
    fn renders_deterministically() {
        let first = build(&Config::default(), UUID).unwrap().to_json().unwrap();
        let second = build(&Config::default(), UUID).unwrap().to_json().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn declares_every_section() {
        let template = build(&Config::default(), UUID).unwrap();

        assert_eq!(18, template.parameter_count());
        assert_eq!(35, template.resource_count());
        assert_eq!(13, template.output_count());
    }

    #[test]
    fn uuid_parameter_defaults_to_the_given_uuid() {
        let template = template();

        assert_eq!(
            json!({
                "Type": "String",
                "Default": UUID,
                "Description": "The unique ID for this stack.",
                "MinLength": 36,
                "MaxLength": 36
            }),
            template["Parameters"]["Uuid"]
        );
    }

    #[test]
    fn sizing_defaults_follow_the_config() {
        let mut config = Config::default();
        config.defaults.api_task_count = 6;
        config.defaults.database_class = String::from("db.r5.large");

        let template = build(&config, UUID).unwrap().to_value().unwrap();
        assert_eq!(json!("6"), template["Parameters"]["ApiTaskCount"]["Default"]);
        assert_eq!(json!("db.r5.large"), template["Parameters"]["DatabaseClass"]["Default"]);
    }

    #[test]
    fn database_password_is_not_echoed() {
        let template = template();

        assert_eq!(json!(true), template["Parameters"]["DatabasePassword"]["NoEcho"]);
    }

    #[test]
    fn api_user_can_only_use_the_three_queues() {
        let template = template();
        let statements = &template["Resources"]["ApiUser"]["Properties"]["Policies"][0]
            ["PolicyDocument"]["Statement"];

        assert_eq!(
            json!({
                "Action": "sqs:*",
                "Effect": "Allow",
                "Resource": [
                    {"Fn::GetAtt": ["DefaultQueue", "Arn"]},
                    {"Fn::GetAtt": ["NotificationsQueue", "Arn"]},
                    {"Fn::GetAtt": ["SearchQueue", "Arn"]}
                ]
            }),
            statements[1]
        );
    }

    #[test]
    fn database_host_is_the_endpoint_address() {
        let template = template();

        assert_eq!(
            json!({
                "Description": "The host of the RDS instance",
                "Value": {"Fn::GetAtt": ["Database", "Endpoint.Address"]}
            }),
            template["Outputs"]["DatabaseHost"]
        );
    }

    #[test]
    fn queue_names_carry_environment_and_uuid() {
        let template = template();

        assert_eq!(
            json!({"Fn::Join": ["-", ["notifications", {"Ref": "Environment"}, {"Ref": "Uuid"}]]}),
            template["Resources"]["NotificationsQueue"]["Properties"]["QueueName"]
        );
        assert_eq!(
            json!({"Ref": "NotificationsQueue"}),
            template["Outputs"]["NotificationsQueue"]["Value"]
        );
    }

    #[test]
    fn database_uses_configured_name_and_is_snapshotted() {
        let mut config = Config::default();
        config.database_name = String::from("connected_kingston");

        let template = build(&config, UUID).unwrap().to_value().unwrap();
        let database = &template["Resources"]["Database"];
        assert_eq!(json!("Snapshot"), database["DeletionPolicy"]);
        assert_eq!(json!("connected_kingston"), database["Properties"]["DBName"]);
        assert_eq!(
            json!([{"Fn::GetAtt": ["DatabaseSecurityGroup", "GroupId"]}]),
            database["Properties"]["VPCSecurityGroups"]
        );
        assert_eq!(json!("connected_kingston"), template["Outputs"]["DatabaseName"]["Value"]);
    }

    #[test]
    fn security_groups_chain_from_the_load_balancer() {
        let template = template();
        let ingress = |id: &str| {
            template["Resources"][id]["Properties"]["SecurityGroupIngress"][0]
                ["SourceSecurityGroupId"]
                .clone()
        };

        assert_eq!(
            json!({"Fn::GetAtt": ["LoadBalancerSecurityGroup", "GroupId"]}),
            ingress("ApiSecurityGroup")
        );
        assert_eq!(
            json!({"Fn::GetAtt": ["ApiSecurityGroup", "GroupId"]}),
            ingress("RedisSecurityGroup")
        );
    }

    #[test]
    fn api_service_waits_for_the_https_listener() {
        let template = template();
        let service = &template["Resources"]["ApiService"];

        assert_eq!(json!(["LoadBalancerHttpsListener"]), service["DependsOn"]);
        assert_eq!(
            json!({"Ref": "ApiTargetGroup"}),
            service["Properties"]["LoadBalancers"][0]["TargetGroupArn"]
        );
    }

    #[test]
    fn scheduler_never_runs_twice() {
        let template = template();

        assert_eq!(
            json!({"MaximumPercent": 100, "MinimumHealthyPercent": 0}),
            template["Resources"]["SchedulerService"]["Properties"]["DeploymentConfiguration"]
        );
    }

    #[test]
    fn log_groups_use_configured_retention() {
        let mut config = Config::default();
        config.log_retention_days = 30;

        let template = build(&config, UUID).unwrap().to_value().unwrap();
        for id in ["ApiLogGroup", "QueueWorkerLogGroup", "SchedulerLogGroup"] {
            assert_eq!(
                json!(30),
                template["Resources"][id]["Properties"]["RetentionInDays"]
            );
        }
    }

    #[test]
    fn service_endpoints_follow_the_partition() {
        let template = template();

        assert_eq!(
            json!({"Fn::Join": ["", [
                {"Ref": "AWS::AccountId"},
                ".dkr.ecr.",
                {"Ref": "AWS::Region"},
                ".",
                {"Ref": "AWS::URLSuffix"},
                "/",
                {"Ref": "DockerRepository"}
            ]]}),
            template["Outputs"]["DockerRepositoryUri"]["Value"]
        );

        let domain_arn = &template["Resources"]["SearchDomain"]["Properties"]["AccessPolicies"]
            ["Statement"][0]["Resource"]["Fn::Join"][1];
        assert_eq!(json!("arn:"), domain_arn[0]);
        assert_eq!(json!({"Ref": "AWS::Partition"}), domain_arn[1]);
        assert_eq!(json!(":es:"), domain_arn[2]);
    }

    #[test]
    fn load_balancer_domain_is_the_dns_name() {
        let template = template();

        assert_eq!(
            json!({"Fn::GetAtt": ["LoadBalancer", "DNSName"]}),
            template["Outputs"]["LoadBalancerDomain"]["Value"]
        );
        assert_eq!(
            json!("AWS::ElasticLoadBalancingV2::LoadBalancer"),
            template["Resources"]["LoadBalancer"]["Type"]
        );
    }
}
