use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use validator::{Validate, ValidationError};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("File {0} not found")]
    FileNotFound(String),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("Validation errors: {0}")]
    ValidationError(String),

    #[error("Unknown error occurred: {0}")]
    Unknown(String),
}

/// Retention periods CloudFormation accepts for `AWS::Logs::LogGroup`.
const LOG_RETENTION_DAYS: [u32; 22] = [
    1, 3, 5, 7, 14, 30, 60, 90, 120, 150, 180, 365, 400, 545, 731, 1096, 1827, 2192, 2557, 2922,
    3288, 3653,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_log_retention"))]
pub struct Config {
    #[validate(length(min = 1, max = 1024))]
    pub description: String,

    #[validate(custom = "validate_database_name")]
    pub database_name: String,

    #[validate(custom = "validate_database_username")]
    pub database_username: String,

    pub log_retention_days: u32,

    #[validate]
    pub defaults: ParameterDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            description: String::from("The AWS CloudFormation template for the API."),
            database_name: String::from("the_leeds_repo"),
            database_username: String::from("the_leeds_repo"),
            log_retention_days: 7,
            defaults: ParameterDefaults::default(),
        }
    }
}

/// Default values of the sizing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ParameterDefaults {
    #[validate(length(min = 1))]
    pub database_class: String,

    #[validate(range(min = 5, max = 16384))]
    pub database_allocated_storage: u32,

    #[validate(length(min = 1))]
    pub redis_node_class: String,

    #[validate(range(min = 1))]
    pub redis_nodes_count: u32,

    #[validate(length(min = 1))]
    pub api_instance_class: String,

    #[validate(range(min = 1))]
    pub api_instance_count: u32,

    #[validate(range(min = 1))]
    pub api_task_count: u32,

    /// More than one scheduler would run every scheduled job twice.
    #[validate(range(min = 1, max = 1))]
    pub scheduler_task_count: u32,

    #[validate(range(min = 1))]
    pub queue_worker_task_count: u32,

    #[validate(length(min = 1))]
    pub elasticsearch_instance_class: String,

    #[validate(range(min = 1))]
    pub elasticsearch_instance_count: u32,
}

impl Default for ParameterDefaults {
    fn default() -> Self {
        Self {
            database_class: String::from("db.t3.micro"),
            database_allocated_storage: 10,
            redis_node_class: String::from("cache.t3.micro"),
            redis_nodes_count: 1,
            api_instance_class: String::from("t3.micro"),
            api_instance_count: 2,
            api_task_count: 2,
            scheduler_task_count: 1,
            queue_worker_task_count: 1,
            elasticsearch_instance_class: String::from("t2.small.elasticsearch"),
            elasticsearch_instance_count: 1,
        }
    }
}

/// Reads the config file when one is given, otherwise falls back to the
/// defaults. Either way the result is validated.
pub fn load(path: Option<&Path>) -> Result<Config, Error> {
    let config = match path {
        Some(path) => return parse(path),
        None => Config::default(),
    };

    match config.validate() {
        Ok(_) => (),
        Err(error) => return Err(Error::ValidationError(error.to_string())),
    }

    return Ok(config);
}

pub fn parse(path: &Path) -> Result<Config, Error> {
    let contents = match fs::read_to_string(path) {
        Ok(raw_contents) => Ok(raw_contents),
        Err(error) => match error.kind() {
            io::ErrorKind::NotFound => Err(Error::FileNotFound(path.display().to_string())),
            _ => Err(Error::Unknown(error.to_string())),
        },
    }?;

    let config: Config = match serde_yaml::from_str(&contents) {
        Ok(data) => Ok(data),
        Err(error) => Err(Error::ParsingError(error.to_string())),
    }?;

    match config.validate() {
        Ok(_) => (),
        Err(error) => return Err(Error::ValidationError(error.to_string())),
    }

    return Ok(config);
}

fn validate_database_name(database_name: &str) -> Result<(), ValidationError> {
    return validate_mysql_identifier(database_name, 64, "database name");
}

fn validate_database_username(database_username: &str) -> Result<(), ValidationError> {
    return validate_mysql_identifier(database_username, 16, "database username");
}

/// RDS MySQL names: a leading letter, then letters, digits and underscores.
fn validate_mysql_identifier(
    value: &str,
    max_length: usize,
    subject: &'static str,
) -> Result<(), ValidationError> {
    let starts_with_letter = match value.chars().next() {
        Some(first) => first.is_ascii_alphabetic(),
        None => false,
    };
    if !starts_with_letter {
        let mut error = ValidationError::new("starts_with_letter");
        error.message = Some(format!("The {} has to start with a letter", subject).into());
        return Err(error);
    }

    if value.len() > max_length {
        let mut error = ValidationError::new("max_length");
        error.message = Some(
            format!("The {} can be at most {} characters long", subject, max_length).into(),
        );
        return Err(error);
    }

    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        let mut error = ValidationError::new("characters");
        error.message = Some(
            format!(
                "The {} can only contain letters, digits and underscores",
                subject
            )
            .into(),
        );
        return Err(error);
    }

    return Ok(());
}

fn validate_log_retention(config: &Config) -> Result<(), ValidationError> {
    if !LOG_RETENTION_DAYS.contains(&config.log_retention_days) {
        return Err(ValidationError::new(
            "The log retention has to be one of the periods CloudWatch Logs supports",
        ));
    }

    return Ok(());
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use super::load;
    use super::parse;
    use super::Config;
    use super::Error;
    use tempfile::tempdir;

    #[test]
    fn file_does_not_exist() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        let result = parse(&file_path);
        assert_eq!(true, result.is_err());
        match result.err().unwrap() {
            Error::FileNotFound(_) => {}
            _ => panic!("Expected `FileNotFound` error"),
        }
    }

    #[test]
    fn file_wrong_format() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "- Not a mapping").unwrap();

        let result = parse(&file_path);
        assert_eq!(true, result.is_err());
        match result.err().unwrap() {
            Error::ParsingError(_) => {}
            _ => panic!("Expected `ParsingError` error"),
        }
    }

    #[test]
    fn invalid_database_name() {
        let mut config = Config::default();
        config.database_name = String::from("1-leeds");
        let config_contents = serde_yaml::to_string(&config).unwrap();

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "{}", config_contents).unwrap();

        let result = parse(&file_path);
        match result.err().unwrap() {
            Error::ValidationError(_) => {}
            _ => panic!("Expected `ValidationError` error"),
        }
    }

    #[test]
    fn invalid_database_username() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "database_username: 1-bad user").unwrap();

        let result = parse(&file_path);
        match result.err().unwrap() {
            Error::ValidationError(_) => {}
            _ => panic!("Expected `ValidationError` error"),
        }
    }

    #[test]
    fn database_username_too_long() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "database_username: seventeen_letters").unwrap();

        let result = parse(&file_path);
        match result.err().unwrap() {
            Error::ValidationError(_) => {}
            _ => panic!("Expected `ValidationError` error"),
        }
    }

    #[test]
    fn unsupported_log_retention() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "log_retention_days: 8").unwrap();

        let result = parse(&file_path);
        match result.err().unwrap() {
            Error::ValidationError(_) => {}
            _ => panic!("Expected `ValidationError` error"),
        }
    }

    #[test]
    fn more_than_one_scheduler() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "defaults:\n  scheduler_task_count: 2").unwrap();

        let result = parse(&file_path);
        match result.err().unwrap() {
            Error::ValidationError(_) => {}
            _ => panic!("Expected `ValidationError` error"),
        }
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            "database_name: connected_kingston\ndefaults:\n  api_task_count: 4"
        )
        .unwrap();

        let config = parse(&file_path).unwrap();
        assert_eq!("connected_kingston", config.database_name);
        assert_eq!(4, config.defaults.api_task_count);
        assert_eq!(2, config.defaults.api_instance_count);
        assert_eq!("the_leeds_repo", config.database_username);
    }

    #[test]
    fn parses_the_config() {
        let config = Config::default();
        let config_contents = serde_yaml::to_string(&config).unwrap();

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");

        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "{}", config_contents).unwrap();

        let result = parse(&file_path);
        assert_eq!(Ok(config), result);
    }

    #[test]
    fn no_file_uses_defaults() {
        assert_eq!(Ok(Config::default()), load(None));
    }
}
