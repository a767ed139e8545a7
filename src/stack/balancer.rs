use super::compute::API_CONTAINER_PORT;
use super::network::SecurityGroups;
use super::parameters::Parameters;
use crate::template::resources::elbv2::{
    Action, Certificate, Listener, LoadBalancer, Matcher, TargetGroup,
};
use crate::template::{Error, LogicalId, Template};

pub struct LoadBalancing {
    pub load_balancer: LogicalId,
    pub api_target_group: LogicalId,
    pub https_listener: LogicalId,
}

pub fn add(
    template: &mut Template,
    parameters: &Parameters,
    security_groups: &SecurityGroups,
) -> Result<LoadBalancing, Error> {
    let load_balancer = template.add_resource(
        "LoadBalancer",
        LoadBalancer {
            scheme: String::from("internet-facing"),
            security_groups: vec![security_groups.load_balancer.attribute("GroupId")],
            subnets: parameters.subnets.reference(),
            kind: String::from("application"),
        },
    )?;

    let api_target_group = template.add_resource(
        "ApiTargetGroup",
        TargetGroup {
            health_check_path: String::from("/"),
            matcher: Matcher {
                http_code: String::from("200-399"),
            },
            port: API_CONTAINER_PORT,
            protocol: String::from("HTTP"),
            vpc_id: parameters.vpc.reference(),
        },
    )?;

    template.add_resource(
        "LoadBalancerHttpListener",
        Listener {
            certificates: Vec::new(),
            default_actions: vec![Action::redirect_to_https()],
            load_balancer_arn: load_balancer.reference(),
            port: 80,
            protocol: String::from("HTTP"),
        },
    )?;

    let https_listener = template.add_resource(
        "LoadBalancerHttpsListener",
        Listener {
            certificates: vec![Certificate {
                certificate_arn: parameters.certificate_arn.reference(),
            }],
            default_actions: vec![Action::forward(api_target_group.reference())],
            load_balancer_arn: load_balancer.reference(),
            port: 443,
            protocol: String::from("HTTPS"),
        },
    )?;

    return Ok(LoadBalancing {
        load_balancer,
        api_target_group,
        https_listener,
    });
}
