use super::balancer::LoadBalancing;
use super::compute::{repository_uri, Compute};
use super::messaging::Queues;
use super::names::Names;
use super::storage::Storage;
use crate::template::output::Output;
use crate::template::{Error, LogicalId, Template};

pub fn add(
    template: &mut Template,
    names: &Names,
    compute: &Compute,
    storage: &Storage,
    queues: &Queues,
    load_balancing: &LoadBalancing,
    search_domain: &LogicalId,
) -> Result<(), Error> {
    template.add_output(
        "DockerRepositoryUri",
        Output::new(
            "The URI of the Docker repository",
            repository_uri(&compute.docker_repository),
        ),
    )?;

    template.add_output(
        "DatabaseName",
        Output::new("The database name", names.database.clone()),
    )?;
    template.add_output(
        "DatabaseHost",
        Output::new(
            "The host of the RDS instance",
            storage.database.attribute("Endpoint.Address"),
        ),
    )?;
    template.add_output(
        "DatabasePort",
        Output::new(
            "The port of the RDS instance",
            storage.database.attribute("Endpoint.Port"),
        ),
    )?;
    template.add_output(
        "DatabaseUsername",
        Output::new("The username for the database", names.database_username.clone()),
    )?;

    template.add_output(
        "RedisHost",
        Output::new(
            "The host of the Redis instance",
            storage.redis.attribute("RedisEndpoint.Address"),
        ),
    )?;
    template.add_output(
        "RedisPort",
        Output::new(
            "The port of the Redis instance",
            storage.redis.attribute("RedisEndpoint.Port"),
        ),
    )?;

    template.add_output(
        "DefaultQueue",
        Output::new("The URI of the default queue", queues.default.reference()),
    )?;
    template.add_output(
        "NotificationsQueue",
        Output::new(
            "The URI of the notifications queue",
            queues.notifications.reference(),
        ),
    )?;
    template.add_output(
        "SearchQueue",
        Output::new("The URI of the search queue", queues.search.reference()),
    )?;

    template.add_output(
        "UploadsBucketName",
        Output::new("The S3 bucket name", storage.uploads_bucket.reference()),
    )?;

    template.add_output(
        "LoadBalancerDomain",
        Output::new(
            "The domain name of the load balancer",
            load_balancing.load_balancer.attribute("DNSName"),
        ),
    )?;

    template.add_output(
        "ElasticsearchHost",
        Output::new(
            "The host of the Elasticsearch domain",
            search_domain.attribute("DomainEndpoint"),
        ),
    )?;

    return Ok(());
}
