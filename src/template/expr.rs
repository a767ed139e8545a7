use serde::ser::{Serialize, SerializeMap, Serializer};

pub const AWS_REGION: &str = "AWS::Region";
pub const AWS_ACCOUNT_ID: &str = "AWS::AccountId";
pub const AWS_PARTITION: &str = "AWS::Partition";
pub const AWS_URL_SUFFIX: &str = "AWS::URLSuffix";

/// Pseudo parameters CloudFormation resolves without a declaration.
pub const PSEUDO_PARAMETERS: [&str; 8] = [
    "AWS::AccountId",
    "AWS::NotificationARNs",
    "AWS::NoValue",
    "AWS::Partition",
    "AWS::Region",
    "AWS::StackId",
    "AWS::StackName",
    "AWS::URLSuffix",
];

/// A property value: either a literal or an intrinsic function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    String(String),
    Integer(i64),
    Ref(String),
    GetAtt(String, String),
    Join(String, Vec<Expr>),
    Select(usize, Box<Expr>),
    Base64(Box<Expr>),
}

impl Expr {
    pub fn join<I, E>(delimiter: &str, parts: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Expr::Join(
            delimiter.to_string(),
            parts.into_iter().map(Into::into).collect(),
        )
    }

    pub fn select(index: usize, list: Expr) -> Self {
        Expr::Select(index, Box::new(list))
    }

    pub fn base64(value: Expr) -> Self {
        Expr::Base64(Box::new(value))
    }

    pub fn region() -> Self {
        Expr::Ref(AWS_REGION.to_string())
    }

    pub fn account_id() -> Self {
        Expr::Ref(AWS_ACCOUNT_ID.to_string())
    }

    pub fn partition() -> Self {
        Expr::Ref(AWS_PARTITION.to_string())
    }

    pub fn url_suffix() -> Self {
        Expr::Ref(AWS_URL_SUFFIX.to_string())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::String(value.to_string())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::String(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Integer(value)
    }
}

impl From<&Expr> for Expr {
    fn from(value: &Expr) -> Self {
        value.clone()
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expr::String(value) => serializer.serialize_str(value),
            Expr::Integer(value) => serializer.serialize_i64(*value),
            Expr::Ref(target) => intrinsic(serializer, "Ref", target),
            Expr::GetAtt(target, attribute) => {
                intrinsic(serializer, "Fn::GetAtt", &(target, attribute))
            }
            Expr::Join(delimiter, parts) => intrinsic(serializer, "Fn::Join", &(delimiter, parts)),
            // CloudFormation documents the index as a string.
            Expr::Select(index, list) => {
                intrinsic(serializer, "Fn::Select", &(index.to_string(), list))
            }
            Expr::Base64(value) => intrinsic(serializer, "Fn::Base64", value),
        }
    }
}

fn intrinsic<S, T>(serializer: S, name: &str, arguments: &T) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(name, arguments)?;
    map.end()
}
