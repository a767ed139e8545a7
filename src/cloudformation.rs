use aws_config::meta::region::RegionProviderChain;
use aws_types::region::Region;

/// Largest `TemplateBody` the ValidateTemplate API accepts.
pub const MAX_TEMPLATE_BODY_BYTES: usize = 51_200;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Service error occurred: {0}.")]
    ServiceError(String),

    #[error("Unknown error occurred: {0}.")]
    UnknownError(String),

    #[error("No AWS region configured")]
    MissingRegion,

    #[error("Template is {0} bytes, CloudFormation accepts at most 51200 bytes inline")]
    TemplateTooLarge(usize),
}

/// Checks rendered templates against the CloudFormation API.
pub struct Validator {
    client: aws_sdk_cloudformation::Client,
}

impl Validator {
    pub async fn new(region: Option<String>) -> Result<Self, Error> {
        let region_provider =
            RegionProviderChain::first_try(region.map(Region::new)).or_default_provider();
        let region = match region_provider.region().await {
            Some(region) => region,
            None => return Err(Error::MissingRegion),
        };
        tracing::debug!(region = %region, "resolved region");

        let sdk_config = aws_config::from_env().region(region).load().await;
        let client = aws_sdk_cloudformation::Client::new(&sdk_config);

        return Ok(Self { client });
    }

    /// Returns the parameter keys CloudFormation recognised in the template.
    pub async fn validate(&self, template_body: &str) -> Result<Vec<String>, Error> {
        check_size(template_body)?;

        let result = self
            .client
            .validate_template()
            .template_body(template_body)
            .send()
            .await;

        let result = match result {
            Ok(data) => data,
            Err(aws_sdk_cloudformation::types::SdkError::ServiceError { err, .. }) => {
                return Err(Error::ServiceError(err.to_string()));
            }
            Err(err) => return Err(Error::UnknownError(err.to_string())),
        };

        let parameter_keys = result
            .parameters()
            .unwrap_or_else(|| &[])
            .iter()
            .filter_map(|parameter| parameter.parameter_key())
            .map(String::from)
            .collect();

        return Ok(parameter_keys);
    }
}

pub fn check_size(template_body: &str) -> Result<(), Error> {
    let size = template_body.len();
    if size > MAX_TEMPLATE_BODY_BYTES {
        return Err(Error::TemplateTooLarge(size));
    }

    return Ok(());
}
