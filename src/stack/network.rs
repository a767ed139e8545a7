use super::parameters::Parameters;
use crate::template::resources::ec2::{Ingress, SecurityGroup};
use crate::template::{Error, LogicalId, Template};

const MYSQL_PORT: u16 = 3306;
const REDIS_PORT: u16 = 6379;
const HTTP_PORT: u16 = 80;
const HTTPS_PORT: u16 = 443;

pub struct SecurityGroups {
    pub load_balancer: LogicalId,
    pub api: LogicalId,
    pub database: LogicalId,
    pub redis: LogicalId,
    pub elasticsearch: LogicalId,
}

pub fn add(template: &mut Template, parameters: &Parameters) -> Result<SecurityGroups, Error> {
    let load_balancer = template.add_resource(
        "LoadBalancerSecurityGroup",
        SecurityGroup {
            group_description: String::from("For connecting to the API load balancer"),
            security_group_ingress: vec![
                Ingress::tcp_from_anywhere(HTTP_PORT, "HTTP access from the public"),
                Ingress::tcp_from_anywhere(HTTPS_PORT, "HTTPS access from the public"),
            ],
            vpc_id: parameters.vpc.reference(),
        },
    )?;

    // Containers are mapped to ephemeral host ports, so the whole range is open
    // to the load balancer.
    let api = template.add_resource(
        "ApiSecurityGroup",
        SecurityGroup {
            group_description: String::from("For connecting to the API containers"),
            security_group_ingress: vec![Ingress::tcp_from_group(
                0,
                65535,
                load_balancer.attribute("GroupId"),
                "Access from the load balancer",
            )],
            vpc_id: parameters.vpc.reference(),
        },
    )?;

    let database = template.add_resource(
        "DatabaseSecurityGroup",
        SecurityGroup {
            group_description: String::from("For connecting to the MySQL instance"),
            security_group_ingress: vec![Ingress::tcp_from_group(
                MYSQL_PORT,
                MYSQL_PORT,
                api.attribute("GroupId"),
                "MySQL access from the API containers",
            )],
            vpc_id: parameters.vpc.reference(),
        },
    )?;

    let redis = template.add_resource(
        "RedisSecurityGroup",
        SecurityGroup {
            group_description: String::from("For connecting to the Redis cluster"),
            security_group_ingress: vec![Ingress::tcp_from_group(
                REDIS_PORT,
                REDIS_PORT,
                api.attribute("GroupId"),
                "Redis access from the API containers",
            )],
            vpc_id: parameters.vpc.reference(),
        },
    )?;

    let elasticsearch = template.add_resource(
        "ElasticsearchSecurityGroup",
        SecurityGroup {
            group_description: String::from("For connecting to the Elasticsearch domain"),
            security_group_ingress: vec![Ingress::tcp_from_group(
                HTTPS_PORT,
                HTTPS_PORT,
                api.attribute("GroupId"),
                "Elasticsearch access from the API containers",
            )],
            vpc_id: parameters.vpc.reference(),
        },
    )?;

    return Ok(SecurityGroups {
        load_balancer,
        api,
        database,
        redis,
        elasticsearch,
    });
}
