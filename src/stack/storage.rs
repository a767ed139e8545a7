use super::names::Names;
use super::network::SecurityGroups;
use super::parameters::Parameters;
use crate::template::resources::elasticache::{CacheCluster, SubnetGroup};
use crate::template::resources::rds::{DbInstance, DbSubnetGroup};
use crate::template::resources::s3::{Bucket, BucketEncryption, VersioningConfiguration};
use crate::template::resources::{DeletionPolicy, ResourceOptions};
use crate::template::{Error, LogicalId, Template};

pub struct Storage {
    pub database: LogicalId,
    pub redis: LogicalId,
    pub uploads_bucket: LogicalId,
}

pub fn add(
    template: &mut Template,
    parameters: &Parameters,
    names: &Names,
    security_groups: &SecurityGroups,
) -> Result<Storage, Error> {
    let database_subnet_group = template.add_resource(
        "DatabaseSubnetGroup",
        DbSubnetGroup {
            description: String::from("Subnets available for the RDS instance"),
            subnet_ids: parameters.subnets.reference(),
        },
    )?;

    let database = template.add_resource_with(
        "Database",
        DbInstance {
            allocated_storage: parameters.database_allocated_storage.reference(),
            backup_retention_period: 7,
            db_instance_class: parameters.database_class.reference(),
            db_name: names.database.clone(),
            db_subnet_group_name: database_subnet_group.reference(),
            engine: String::from("MySQL"),
            engine_version: String::from("5.7"),
            master_user_password: parameters.database_password.reference(),
            master_username: names.database_username.clone(),
            multi_az: false,
            publicly_accessible: false,
            storage_encrypted: true,
            storage_type: String::from("gp2"),
            vpc_security_groups: vec![security_groups.database.attribute("GroupId")],
        },
        ResourceOptions {
            deletion_policy: Some(DeletionPolicy::Snapshot),
            ..ResourceOptions::default()
        },
    )?;

    let redis_subnet_group = template.add_resource(
        "RedisSubnetGroup",
        SubnetGroup {
            description: String::from("Subnets available for the Redis cluster"),
            subnet_ids: parameters.subnets.reference(),
        },
    )?;

    let redis = template.add_resource(
        "Redis",
        CacheCluster {
            cache_node_type: parameters.redis_node_class.reference(),
            cache_subnet_group_name: redis_subnet_group.reference(),
            engine: String::from("redis"),
            engine_version: String::from("5.0.6"),
            num_cache_nodes: parameters.redis_nodes_count.reference(),
            vpc_security_group_ids: vec![security_groups.redis.attribute("GroupId")],
        },
    )?;

    let uploads_bucket = template.add_resource(
        "UploadsBucket",
        Bucket {
            access_control: String::from("Private"),
            bucket_encryption: BucketEncryption::aes256(),
            bucket_name: names.uploads_bucket.clone(),
            versioning_configuration: VersioningConfiguration::enabled(),
        },
    )?;

    return Ok(Storage {
        database,
        redis,
        uploads_bucket,
    });
}
