//! Resource names derived from the `Environment` and `Uuid` parameters.
//!
//! Names of globally or account-wide unique things (queues, the bucket, the
//! docker repository) carry the stack UUID, the rest only the environment.

use super::parameters::Parameters;
use crate::config::Config;
use crate::template::expr::Expr;

pub struct Names {
    pub default_queue: Expr,
    pub notifications_queue: Expr,
    pub search_queue: Expr,
    pub uploads_bucket: Expr,
    pub api_launch_template: Expr,
    pub docker_repository: Expr,
    pub api_log_group: Expr,
    pub queue_worker_log_group: Expr,
    pub scheduler_log_group: Expr,
    pub api_task_definition_family: Expr,
    pub queue_worker_task_definition_family: Expr,
    pub scheduler_task_definition_family: Expr,
    pub api_user: Expr,
    pub ci_user: Expr,
    pub database: Expr,
    pub database_username: Expr,
    pub elasticsearch_domain: Expr,
}

impl Names {
    pub fn new(parameters: &Parameters, config: &Config) -> Self {
        let per_environment = |prefix: &str| {
            Expr::join("-", vec![Expr::from(prefix), parameters.environment.reference()])
        };
        let per_stack = |prefix: &str| {
            Expr::join(
                "-",
                vec![
                    Expr::from(prefix),
                    parameters.environment.reference(),
                    parameters.uuid.reference(),
                ],
            )
        };

        Self {
            default_queue: per_stack("default"),
            notifications_queue: per_stack("notifications"),
            search_queue: per_stack("search"),
            uploads_bucket: per_stack("uploads"),
            api_launch_template: per_environment("api-launch-template"),
            docker_repository: per_stack("api"),
            api_log_group: per_environment("api"),
            queue_worker_log_group: per_environment("queue-worker"),
            scheduler_log_group: per_environment("scheduler"),
            api_task_definition_family: per_environment("api"),
            queue_worker_task_definition_family: per_environment("queue-worker"),
            scheduler_task_definition_family: per_environment("scheduler"),
            api_user: per_environment("api"),
            ci_user: per_environment("ci"),
            database: Expr::from(config.database_name.as_str()),
            database_username: Expr::from(config.database_username.as_str()),
            elasticsearch_domain: per_environment("search"),
        }
    }
}
