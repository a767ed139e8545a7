use super::names::Names;
use crate::template::expr::Expr;
use crate::template::resources::sqs::Queue;
use crate::template::{Error, LogicalId, Template};

pub struct Queues {
    pub default: LogicalId,
    pub notifications: LogicalId,
    pub search: LogicalId,
}

impl Queues {
    pub fn arns(&self) -> Vec<Expr> {
        vec![
            self.default.attribute("Arn"),
            self.notifications.attribute("Arn"),
            self.search.attribute("Arn"),
        ]
    }
}

pub fn add(template: &mut Template, names: &Names) -> Result<Queues, Error> {
    let default = template.add_resource(
        "DefaultQueue",
        Queue {
            queue_name: names.default_queue.clone(),
        },
    )?;

    let notifications = template.add_resource(
        "NotificationsQueue",
        Queue {
            queue_name: names.notifications_queue.clone(),
        },
    )?;

    let search = template.add_resource(
        "SearchQueue",
        Queue {
            queue_name: names.search_queue.clone(),
        },
    )?;

    return Ok(Queues {
        default,
        notifications,
        search,
    });
}
