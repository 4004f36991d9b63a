use super::*;

impl TomletConfig {
    /// Get a typed value using a dotted path. Numeric segments index arrays.
    ///
    /// Both `snake_case` and `kebab-case` spellings of each segment are tried.
    ///
    /// # Examples
    /// ```
    /// # use tomlet::TomletConfig;
    /// let config = TomletConfig::from_str("[[items]]\nname = \"a\"\n[server]\nport = 8080")?;
    /// let port: u16 = config.get("server.port")?;
    /// let first: String = config.get("items.0.name")?;
    /// assert_eq!((port, first.as_str()), (8080, "a"));
    /// # Ok::<(), tomlet::TomletError>(())
    /// ```
    ///
    /// # Errors
    /// Returns error if path doesn't exist or value can't be converted to type T.
    pub fn get<T>(&self, path: &str) -> Result<T, TomletError>
    where
        T: TryFrom<Value, Error = TomletError>,
    {
        let value = self.get_value_flexible(path)?;
        T::try_from(value).map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content))
    }

    /// Like [`get`](Self::get), but a missing path or a `Null` value yields `None`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, TomletError>
    where
        T: TryFrom<Value, Error = TomletError>,
    {
        match self.get_value_flexible(path) {
            Ok(Value::Null) => Ok(None),
            Ok(value) => T::try_from(value)
                .map(Some)
                .map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content)),
            Err(TomletError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = TomletError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get a raw `Value` by exact path. An empty path returns the whole document.
    pub fn get_value(&self, path: &str) -> Result<Value, TomletError> {
        if path.trim().is_empty() {
            return Ok(Value::Table(self.document.root().clone()));
        }
        self.document
            .lookup(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    /// Tries every snake/kebab spelling of each segment, first match wins.
    fn get_value_flexible(&self, path: &str) -> Result<Value, TomletError> {
        if let Ok(v) = self.get_value(path) {
            return Ok(v);
        }

        fn variants(seg: &str) -> Vec<String> {
            let mut out = vec![seg.to_string(), seg.replace('-', "_"), seg.replace('_', "-")];
            out.sort();
            out.dedup();
            out
        }

        fn dfs(cfg: &TomletConfig, segs: &[&str], i: usize, cur: &mut Vec<String>) -> Option<Value> {
            if i == segs.len() {
                return cfg.get_value(&cur.join(".")).ok();
            }
            for v in variants(segs[i]) {
                cur.push(v);
                if let Some(val) = dfs(cfg, segs, i + 1, cur) {
                    return Some(val);
                }
                cur.pop();
            }
            None
        }

        let segs: Vec<&str> = path.split('.').collect();
        dfs(self, &segs, 0, &mut Vec::new()).ok_or_else(|| not_found(path))
    }

    /// Get all keys of the table at `path`, in source order.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, TomletError> {
        match self.get_value_flexible(path)? {
            Value::Table(table) => Ok(table.keys().cloned().collect()),
            other => Err(TomletError::Type {
                message: format!("Path '{}' is a {}, not a table", path, other.kind()),
                line: helpers::find_config_line(path, &self.raw_content).0,
                hint: Some("Only tables have keys".into()),
                code: Some(306),
            }),
        }
    }

    /// Number of elements of the array at `path`.
    pub fn len_of(&self, path: &str) -> Result<usize, TomletError> {
        match self.get_value_flexible(path)? {
            Value::Array(items) => Ok(items.len()),
            other => Err(TomletError::Type {
                message: format!("Path '{}' is a {}, not an array", path, other.kind()),
                line: helpers::find_config_line(path, &self.raw_content).0,
                hint: Some("Only arrays have a length".into()),
                code: Some(307),
            }),
        }
    }

    pub fn has(&self, path: &str) -> bool {
        self.get_value_flexible(path).is_ok()
    }
}

fn not_found(path: &str) -> TomletError {
    TomletError::NotFound {
        path: path.to_string(),
        hint: Some("Check that the path exists in your config file".into()),
        code: Some(304),
    }
}

/// Attach the source line of `path` to type and validation errors.
fn enhance_error_with_line_info(e: TomletError, path: &str, raw_content: &str) -> TomletError {
    let (line, snippet) = helpers::find_config_line(path, raw_content);
    if line == 0 {
        return e;
    }
    match e {
        TomletError::Type { message, hint, code, .. } => TomletError::Type {
            message: format!("{}\n  → {}", message, snippet),
            line,
            hint,
            code,
        },
        TomletError::Validation { message, hint, code, .. } => TomletError::Validation {
            message: format!("{}\n  → {}", message, snippet),
            line,
            hint,
            code,
        },
        other => other,
    }
}
