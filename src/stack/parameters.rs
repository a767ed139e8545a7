use crate::config::ParameterDefaults;
use crate::template::parameter::Parameter;
use crate::template::{Error, LogicalId, Template};

const ECS_AMI_SSM_PATH: &str = "/aws/service/ecs/optimized-ami/amazon-linux-2/recommended/image_id";

pub struct Parameters {
    pub uuid: LogicalId,
    pub environment: LogicalId,
    pub certificate_arn: LogicalId,
    pub vpc: LogicalId,
    pub subnets: LogicalId,
    pub database_password: LogicalId,
    pub database_class: LogicalId,
    pub database_allocated_storage: LogicalId,
    pub redis_node_class: LogicalId,
    pub redis_nodes_count: LogicalId,
    pub api_instance_class: LogicalId,
    pub api_instance_count: LogicalId,
    pub api_task_count: LogicalId,
    pub scheduler_task_count: LogicalId,
    pub queue_worker_task_count: LogicalId,
    pub elasticsearch_instance_class: LogicalId,
    pub elasticsearch_instance_count: LogicalId,
    pub ecs_ami: LogicalId,
}

pub fn add(
    template: &mut Template,
    uuid: &str,
    defaults: &ParameterDefaults,
) -> Result<Parameters, Error> {
    let uuid = template.add_parameter(
        "Uuid",
        Parameter::string()
            .default(uuid)
            .description("The unique ID for this stack.")
            .min_length(36)
            .max_length(36),
    )?;

    let environment = template.add_parameter(
        "Environment",
        Parameter::string()
            .description("The environment this stack is for (e.g. production or staging).")
            .min_length(1),
    )?;

    let certificate_arn = template.add_parameter(
        "CertificateArn",
        Parameter::string()
            .description("The ARN for the API load balancer SSL certificate.")
            .min_length(1),
    )?;

    let vpc = template.add_parameter(
        "VpcId",
        Parameter::of_type("AWS::EC2::VPC::Id")
            .description("The Virtual Private Cloud (VPC) to launch the stack in."),
    )?;

    let subnets = template.add_parameter(
        "SubnetIds",
        Parameter::of_type("List<AWS::EC2::Subnet::Id>")
            .description(
                "The list of subnet IDs, for at least two Availability Zones in the region in \
                 your Virtual Private Cloud (VPC).",
            ),
    )?;

    let database_password = template.add_parameter(
        "DatabasePassword",
        Parameter::string()
            .description("The database admin password.")
            .no_echo()
            .min_length(8)
            .max_length(41)
            .constraint_description(
                "The database password must be between 8 and 41 characters long.",
            ),
    )?;

    let database_class = template.add_parameter(
        "DatabaseClass",
        Parameter::string()
            .description("The database instance class.")
            .default(&defaults.database_class)
            .min_length(1),
    )?;

    let database_allocated_storage = template.add_parameter(
        "DatabaseAllocatedStorage",
        Parameter::number()
            .description("The size of the database (GiB).")
            .default(defaults.database_allocated_storage)
            .min_value(5)
            .max_value(16384)
            .constraint_description("Must be between 5 and 16384 GiB."),
    )?;

    let redis_node_class = template.add_parameter(
        "RedisNodeClass",
        Parameter::string()
            .description("The Redis node class.")
            .default(&defaults.redis_node_class)
            .min_length(1),
    )?;

    let redis_nodes_count = template.add_parameter(
        "RedisNodesCount",
        Parameter::number()
            .description("The number of Redis nodes to have in the cluster.")
            .default(defaults.redis_nodes_count)
            .min_value(1),
    )?;

    let api_instance_class = template.add_parameter(
        "ApiInstanceClass",
        Parameter::string()
            .description("The type of EC2 instance for the API servers.")
            .default(&defaults.api_instance_class)
            .min_length(1),
    )?;

    let api_instance_count = template.add_parameter(
        "ApiInstanceCount",
        Parameter::number()
            .description("The number of API EC2 instances to load balance between.")
            .default(defaults.api_instance_count)
            .min_value(1),
    )?;

    let api_task_count = template.add_parameter(
        "ApiTaskCount",
        Parameter::number()
            .description("The number of API containers to run.")
            .default(defaults.api_task_count)
            .min_value(0),
    )?;

    let scheduler_task_count = template.add_parameter(
        "SchedulerTaskCount",
        Parameter::number()
            .description("The number of scheduler containers to run.")
            .default(defaults.scheduler_task_count)
            .min_value(0)
            .max_value(1),
    )?;

    let queue_worker_task_count = template.add_parameter(
        "QueueWorkerTaskCount",
        Parameter::number()
            .description("The number of queue worker containers to run.")
            .default(defaults.queue_worker_task_count)
            .min_value(0),
    )?;

    let elasticsearch_instance_class = template.add_parameter(
        "ElasticsearchInstanceClass",
        Parameter::string()
            .description("The type of instance for the Elasticsearch nodes.")
            .default(&defaults.elasticsearch_instance_class)
            .min_length(1),
    )?;

    let elasticsearch_instance_count = template.add_parameter(
        "ElasticsearchInstanceCount",
        Parameter::number()
            .description("The number of Elasticsearch nodes to run.")
            .default(defaults.elasticsearch_instance_count)
            .min_value(1),
    )?;

    let ecs_ami = template.add_parameter(
        "EcsAmiId",
        Parameter::of_type("AWS::SSM::Parameter::Value<AWS::EC2::Image::Id>")
            .description("The SSM path of the ECS-optimized AMI for the API instances.")
            .default(ECS_AMI_SSM_PATH),
    )?;

    return Ok(Parameters {
        uuid,
        environment,
        certificate_arn,
        vpc,
        subnets,
        database_password,
        database_class,
        database_allocated_storage,
        redis_node_class,
        redis_nodes_count,
        api_instance_class,
        api_instance_count,
        api_task_count,
        scheduler_task_count,
        queue_worker_task_count,
        elasticsearch_instance_class,
        elasticsearch_instance_count,
        ecs_ami,
    });
}
