use serde::Serialize;

pub const STRING: &str = "String";
pub const NUMBER: &str = "Number";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    #[serde(rename = "Type")]
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_echo: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_description: Option<String>,
}

impl Parameter {
    pub fn of_type(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            default: None,
            description: None,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            allowed_values: Vec::new(),
            no_echo: false,
            constraint_description: None,
        }
    }

    pub fn string() -> Self {
        Self::of_type(STRING)
    }

    pub fn number() -> Self {
        Self::of_type(NUMBER)
    }

    pub fn default(mut self, default: impl ToString) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn min_value(mut self, min_value: i64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn max_value(mut self, max_value: i64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.allowed_values = values.into_iter().map(|value| value.to_string()).collect();
        self
    }

    pub fn no_echo(mut self) -> Self {
        self.no_echo = true;
        self
    }

    pub fn constraint_description(mut self, description: &str) -> Self {
        self.constraint_description = Some(description.to_string());
        self
    }

    /// Checks that the constraints fit the parameter type and that the
    /// default, when present, satisfies them.
    pub fn validate(&self) -> Result<(), String> {
        let is_string = self.kind == STRING;
        let is_number = self.kind == NUMBER;

        if !is_string && (self.min_length.is_some() || self.max_length.is_some()) {
            return Err(format!(
                "MinLength/MaxLength are only valid for `String`, not `{}`",
                self.kind
            ));
        }
        if !is_number && (self.min_value.is_some() || self.max_value.is_some()) {
            return Err(format!(
                "MinValue/MaxValue are only valid for `Number`, not `{}`",
                self.kind
            ));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(format!("MinLength {} is greater than MaxLength {}", min, max));
            }
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(format!("MinValue {} is greater than MaxValue {}", min, max));
            }
        }

        let default = match &self.default {
            Some(default) => default,
            None => return Ok(()),
        };

        if !self.allowed_values.is_empty() && !self.allowed_values.contains(default) {
            return Err(format!("default `{}` is not one of the allowed values", default));
        }

        if is_number {
            let value: f64 = default
                .parse()
                .map_err(|_| format!("default `{}` is not a number", default))?;
            if let Some(min) = self.min_value {
                if value < min as f64 {
                    return Err(format!("default {} is below MinValue {}", default, min));
                }
            }
            if let Some(max) = self.max_value {
                if value > max as f64 {
                    return Err(format!("default {} is above MaxValue {}", default, max));
                }
            }
        }

        if is_string {
            let length = default.chars().count();
            if let Some(min) = self.min_length {
                if length < min {
                    return Err(format!("default is shorter than MinLength {}", min));
                }
            }
            if let Some(max) = self.max_length {
                if length > max {
                    return Err(format!("default is longer than MaxLength {}", max));
                }
            }
        }

        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Parameter;

    #[test]
    fn serializes_only_the_set_constraints() {
        let parameter = Parameter::string()
            .description("The environment this stack is for.")
            .min_length(1);

        assert_eq!(
            json!({
                "Type": "String",
                "Description": "The environment this stack is for.",
                "MinLength": 1
            }),
            serde_json::to_value(&parameter).unwrap()
        );
    }

    #[test]
    fn serializes_no_echo_when_set() {
        let parameter = Parameter::string().no_echo();

        assert_eq!(
            json!({"Type": "String", "NoEcho": true}),
            serde_json::to_value(&parameter).unwrap()
        );
    }

    #[test]
    fn rejects_length_constraints_on_numbers() {
        let result = Parameter::number().min_length(1).validate();

        assert_eq!(true, result.is_err());
    }

    #[test]
    fn rejects_value_constraints_on_strings() {
        assert_eq!(true, Parameter::string().min_value(1).validate().is_err());
        assert_eq!(
            true,
            Parameter::of_type("AWS::EC2::VPC::Id")
                .max_value(1)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rejects_non_numeric_number_default() {
        let result = Parameter::number().default("ten").validate();

        assert_eq!(true, result.is_err());
    }

    #[test]
    fn rejects_default_outside_value_bounds() {
        let result = Parameter::number().default(0).min_value(1).validate();

        assert_eq!(true, result.is_err());
    }

    #[test]
    fn rejects_default_outside_length_bounds() {
        let result = Parameter::string()
            .default("too-short")
            .min_length(36)
            .max_length(36)
            .validate();

        assert_eq!(true, result.is_err());
    }

    #[test]
    fn rejects_default_not_in_allowed_values() {
        let result = Parameter::string()
            .default("db.m1.huge")
            .allowed_values(["db.t3.micro", "db.t3.small"])
            .validate();

        assert_eq!(true, result.is_err());
    }

    #[test]
    fn accepts_a_consistent_parameter() {
        let result = Parameter::number()
            .default(2)
            .min_value(1)
            .max_value(10)
            .validate();

        assert_eq!(Ok(()), result);
    }
}
