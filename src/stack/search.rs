use super::names::Names;
use super::network::SecurityGroups;
use super::parameters::Parameters;
use crate::template::expr::Expr;
use crate::template::policy::{PolicyDocument, Statement};
use crate::template::resources::elasticsearch::{ClusterConfig, Domain, EbsOptions, VpcOptions};
use crate::template::{Error, LogicalId, Template};

const ELASTICSEARCH_VERSION: &str = "6.8";

pub fn add(
    template: &mut Template,
    parameters: &Parameters,
    names: &Names,
    security_groups: &SecurityGroups,
) -> Result<LogicalId, Error> {
    // Access is restricted by the security group, so the policy is open.
    let domain_arn = Expr::join(
        "",
        vec![
            Expr::from("arn:"),
            Expr::partition(),
            Expr::from(":es:"),
            Expr::region(),
            Expr::from(":"),
            Expr::account_id(),
            Expr::from(":domain/"),
            names.elasticsearch_domain.clone(),
            Expr::from("/*"),
        ],
    );

    template.add_resource(
        "SearchDomain",
        Domain {
            access_policies: PolicyDocument::new(vec![Statement::allow(["es:*"])
                .for_anyone()
                .on_resource(domain_arn)]),
            domain_name: names.elasticsearch_domain.clone(),
            ebs_options: EbsOptions {
                ebs_enabled: true,
                volume_size: 10,
                volume_type: String::from("gp2"),
            },
            elasticsearch_cluster_config: ClusterConfig {
                instance_count: parameters.elasticsearch_instance_count.reference(),
                instance_type: parameters.elasticsearch_instance_class.reference(),
                zone_awareness_enabled: false,
            },
            elasticsearch_version: String::from(ELASTICSEARCH_VERSION),
            // Without zone awareness the domain lives in exactly one subnet.
            vpc_options: VpcOptions {
                security_group_ids: vec![security_groups.elasticsearch.attribute("GroupId")],
                subnet_ids: vec![Expr::select(0, parameters.subnets.reference())],
            },
        },
    )
}
