//! The ECS cluster, the EC2 capacity it runs on, and the three workloads
//! (API, queue worker, scheduler) as task definitions and services.

use super::balancer::LoadBalancing;
use super::names::Names;
use super::network::SecurityGroups;
use super::parameters::Parameters;
use crate::template::expr::Expr;
use crate::template::policy::{PolicyDocument, Statement};
use crate::template::resources::autoscaling::{AutoScalingGroup, LaunchTemplateSpecification};
use crate::template::resources::ec2::{IamInstanceProfile, LaunchTemplate, LaunchTemplateData};
use crate::template::resources::ecr::Repository;
use crate::template::resources::ecs::{
    Cluster, ContainerDefinition, DeploymentConfiguration, LogConfiguration, PortMapping, Service,
    ServiceLoadBalancer, TaskDefinition,
};
use crate::template::resources::iam::{InstanceProfile, Role};
use crate::template::resources::logs::LogGroup;
use crate::template::resources::ResourceOptions;
use crate::template::{Error, LogicalId, Template};

pub const API_CONTAINER_NAME: &str = "api";
pub const API_CONTAINER_PORT: u16 = 80;

const ECS_INSTANCE_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AmazonEC2ContainerServiceforEC2Role";

pub struct Compute {
    pub cluster: LogicalId,
    pub docker_repository: LogicalId,
    pub api_task_definition: LogicalId,
    pub queue_worker_task_definition: LogicalId,
    pub scheduler_task_definition: LogicalId,
}

/// `<account>.dkr.ecr.<region>.<url suffix>/<repository>`
pub fn repository_uri(repository: &LogicalId) -> Expr {
    Expr::join(
        "",
        vec![
            Expr::account_id(),
            Expr::from(".dkr.ecr."),
            Expr::region(),
            Expr::from("."),
            Expr::url_suffix(),
            Expr::from("/"),
            repository.reference(),
        ],
    )
}

pub fn add(
    template: &mut Template,
    parameters: &Parameters,
    names: &Names,
    security_groups: &SecurityGroups,
    log_retention_days: u32,
) -> Result<Compute, Error> {
    let cluster = template.add_resource("EcsCluster", Cluster::default())?;

    let docker_repository = template.add_resource(
        "DockerRepository",
        Repository {
            repository_name: names.docker_repository.clone(),
        },
    )?;

    let api_log_group = add_log_group(
        template,
        "ApiLogGroup",
        &names.api_log_group,
        log_retention_days,
    )?;
    let queue_worker_log_group = add_log_group(
        template,
        "QueueWorkerLogGroup",
        &names.queue_worker_log_group,
        log_retention_days,
    )?;
    let scheduler_log_group = add_log_group(
        template,
        "SchedulerLogGroup",
        &names.scheduler_log_group,
        log_retention_days,
    )?;

    let instance_role = template.add_resource(
        "EcsInstanceRole",
        Role {
            assume_role_policy_document: PolicyDocument::new(vec![
                Statement::allow(["sts:AssumeRole"]).for_service("ec2.amazonaws.com"),
            ]),
            managed_policy_arns: vec![String::from(ECS_INSTANCE_POLICY_ARN)],
        },
    )?;

    let instance_profile = template.add_resource(
        "EcsInstanceProfile",
        InstanceProfile {
            roles: vec![instance_role.reference()],
        },
    )?;

    // Registers the instance with the cluster on boot.
    let user_data = Expr::base64(Expr::join(
        "",
        vec![
            Expr::from("#!/bin/bash\necho ECS_CLUSTER="),
            cluster.reference(),
            Expr::from(" >> /etc/ecs/ecs.config\n"),
        ],
    ));

    let launch_template = template.add_resource(
        "ApiLaunchTemplate",
        LaunchTemplate {
            launch_template_data: LaunchTemplateData {
                iam_instance_profile: IamInstanceProfile {
                    arn: instance_profile.attribute("Arn"),
                },
                image_id: parameters.ecs_ami.reference(),
                instance_type: parameters.api_instance_class.reference(),
                security_group_ids: vec![security_groups.api.attribute("GroupId")],
                user_data,
            },
            launch_template_name: names.api_launch_template.clone(),
        },
    )?;

    template.add_resource(
        "ApiAutoScalingGroup",
        AutoScalingGroup {
            desired_capacity: parameters.api_instance_count.reference(),
            launch_template: LaunchTemplateSpecification {
                launch_template_id: launch_template.reference(),
                version: launch_template.attribute("LatestVersionNumber"),
            },
            max_size: parameters.api_instance_count.reference(),
            min_size: parameters.api_instance_count.reference(),
            vpc_zone_identifier: parameters.subnets.reference(),
        },
    )?;

    let image = Expr::join("", vec![repository_uri(&docker_repository), Expr::from(":latest")]);

    let api_task_definition = template.add_resource(
        "ApiTaskDefinition",
        TaskDefinition {
            container_definitions: vec![ContainerDefinition {
                command: Vec::new(),
                essential: true,
                image: image.clone(),
                log_configuration: LogConfiguration::awslogs(api_log_group.reference(), "ecs"),
                memory_reservation: 256,
                name: String::from(API_CONTAINER_NAME),
                port_mappings: vec![PortMapping {
                    container_port: API_CONTAINER_PORT,
                    host_port: 0,
                }],
            }],
            family: names.api_task_definition_family.clone(),
        },
    )?;

    let queue_worker_task_definition = template.add_resource(
        "QueueWorkerTaskDefinition",
        TaskDefinition {
            container_definitions: vec![ContainerDefinition {
                command: vec![
                    String::from("php"),
                    String::from("artisan"),
                    String::from("queue:work"),
                    String::from("--tries=1"),
                ],
                essential: true,
                image: image.clone(),
                log_configuration: LogConfiguration::awslogs(
                    queue_worker_log_group.reference(),
                    "ecs",
                ),
                memory_reservation: 256,
                name: String::from("queue-worker"),
                port_mappings: Vec::new(),
            }],
            family: names.queue_worker_task_definition_family.clone(),
        },
    )?;

    let scheduler_task_definition = template.add_resource(
        "SchedulerTaskDefinition",
        TaskDefinition {
            container_definitions: vec![ContainerDefinition {
                command: vec![
                    String::from("sh"),
                    String::from("-c"),
                    String::from("while true; do php artisan schedule:run; sleep 60; done"),
                ],
                essential: true,
                image,
                log_configuration: LogConfiguration::awslogs(
                    scheduler_log_group.reference(),
                    "ecs",
                ),
                memory_reservation: 128,
                name: String::from("scheduler"),
                port_mappings: Vec::new(),
            }],
            family: names.scheduler_task_definition_family.clone(),
        },
    )?;

    return Ok(Compute {
        cluster,
        docker_repository,
        api_task_definition,
        queue_worker_task_definition,
        scheduler_task_definition,
    });
}

/// The services come after the load balancer: the API service registers its
/// containers with the target group, which must already be attached to a
/// listener.
pub fn add_services(
    template: &mut Template,
    parameters: &Parameters,
    compute: &Compute,
    load_balancing: &LoadBalancing,
) -> Result<(), Error> {
    template.add_resource_with(
        "ApiService",
        Service {
            cluster: compute.cluster.reference(),
            deployment_configuration: DeploymentConfiguration {
                maximum_percent: 200,
                minimum_healthy_percent: 100,
            },
            desired_count: parameters.api_task_count.reference(),
            launch_type: String::from("EC2"),
            load_balancers: vec![ServiceLoadBalancer {
                container_name: String::from(API_CONTAINER_NAME),
                container_port: API_CONTAINER_PORT,
                target_group_arn: load_balancing.api_target_group.reference(),
            }],
            task_definition: compute.api_task_definition.reference(),
        },
        ResourceOptions {
            depends_on: vec![load_balancing.https_listener.clone()],
            ..ResourceOptions::default()
        },
    )?;

    template.add_resource(
        "QueueWorkerService",
        Service {
            cluster: compute.cluster.reference(),
            deployment_configuration: DeploymentConfiguration {
                maximum_percent: 200,
                minimum_healthy_percent: 100,
            },
            desired_count: parameters.queue_worker_task_count.reference(),
            launch_type: String::from("EC2"),
            load_balancers: Vec::new(),
            task_definition: compute.queue_worker_task_definition.reference(),
        },
    )?;

    // Never two schedulers at once, even mid-deployment.
    template.add_resource(
        "SchedulerService",
        Service {
            cluster: compute.cluster.reference(),
            deployment_configuration: DeploymentConfiguration {
                maximum_percent: 100,
                minimum_healthy_percent: 0,
            },
            desired_count: parameters.scheduler_task_count.reference(),
            launch_type: String::from("EC2"),
            load_balancers: Vec::new(),
            task_definition: compute.scheduler_task_definition.reference(),
        },
    )?;

    return Ok(());
}

fn add_log_group(
    template: &mut Template,
    id: &str,
    name: &Expr,
    retention_in_days: u32,
) -> Result<LogicalId, Error> {
    template.add_resource(
        id,
        LogGroup {
            log_group_name: name.clone(),
            retention_in_days,
        },
    )
}
