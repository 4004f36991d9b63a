use super::*;

impl TomletConfig {
    /// Get a value and check it with `validator`; failures point at the config line.
    pub fn get_validated<T, F>(&self, path: &str, validator: F, valid_values: &str) -> Result<T, TomletError>
    where
        T: TryFrom<Value, Error = TomletError>,
        F: FnOnce(&T) -> bool,
    {
        let typed_value: T = self.get(path)?;

        if !validator(&typed_value) {
            let (line, snippet) = helpers::find_config_line(path, &self.raw_content);
            return Err(TomletError::Validation {
                message: format!("Invalid value for `{}`\nExpected: {}", path, valid_values),
                line,
                hint: Some(format!("Valid values are: {}\n  → {}", valid_values, snippet)),
                code: Some(450),
            });
        }

        Ok(typed_value)
    }

    /// Get a string and check it against `allowed_values`, ignoring case.
    pub fn get_string_enum(&self, path: &str, allowed_values: &[&str]) -> Result<String, TomletError> {
        let value: String = self.get(path)?;

        if !allowed_values.iter().any(|v| v.eq_ignore_ascii_case(&value)) {
            let (line, snippet) = helpers::find_config_line(path, &self.raw_content);
            return Err(TomletError::Validation {
                message: format!("Invalid value '{}' for `{}`", value, path),
                line,
                hint: Some(format!("Expected one of: {}\n  → {}", allowed_values.join(", "), snippet)),
                code: Some(451),
            });
        }

        Ok(value)
    }

    /// Whether `path` is written out in the source text (not just reachable).
    pub fn path_exists_in_content(&self, path: &str) -> bool {
        helpers::find_config_line(path, &self.raw_content).0 > 0
    }
}
