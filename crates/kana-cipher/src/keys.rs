// Key parameters: typed schemas per engine and lenient resolution of raw values
//
// Engines never reject key material. A value that is missing, unparseable
// or outside its schema falls back to the documented default (or is clamped)
// and the substitution is logged at debug level.

use hashbrown::HashMap;

use crate::CipherError;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Shape and default of one key parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Integer in `min..=max`. Zero and unparseable values select `default`.
    Number { min: i64, max: i64, default: i64 },
    /// Free text. An empty value selects `default`.
    Text { default: &'static str },
    /// One of a fixed set of options.
    Choice {
        options: &'static [&'static str],
        default: &'static str,
    },
}

/// A named key parameter as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: ParamKind,
}

impl ParamSpec {
    /// Default value rendered as text.
    pub fn default_value(&self) -> String {
        match self.kind {
            ParamKind::Number { default, .. } => default.to_string(),
            ParamKind::Text { default } | ParamKind::Choice { default, .. } => default.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Key set
// ---------------------------------------------------------------------------

/// Raw key values by parameter id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    values: HashMap<String, String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any earlier one.
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), value.into());
    }

    /// Builder form of [`KeySet::insert`].
    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse and insert a `NAME=VALUE` pair. The value may be empty and may
    /// itself contain `=`.
    pub fn insert_pair(&mut self, pair: &str) -> Result<(), CipherError> {
        let (id, value) = parse_pair(pair)?;
        self.insert(id, value);
        Ok(())
    }

    /// Resolve a number parameter.
    pub fn number(&self, spec: &ParamSpec) -> i64 {
        let ParamKind::Number { min, max, default } = spec.kind else {
            return 0;
        };
        let Some(raw) = self.get(spec.id) else {
            return default;
        };
        match raw.trim().parse::<i64>() {
            Ok(0) | Err(_) => {
                tracing::debug!(param = spec.id, raw, default, "unusable number, using default");
                default
            }
            Ok(value) if value < min || value > max => {
                let clamped = value.clamp(min, max);
                tracing::debug!(param = spec.id, value, clamped, "number out of range, clamping");
                clamped
            }
            Ok(value) => value,
        }
    }

    /// Resolve a text parameter.
    pub fn text<'a>(&'a self, spec: &ParamSpec) -> &'a str {
        let ParamKind::Text { default } = spec.kind else {
            return "";
        };
        match self.get(spec.id) {
            Some(raw) if !raw.is_empty() => raw,
            _ => default,
        }
    }

    /// Resolve a choice parameter to one of its options.
    pub fn choice(&self, spec: &ParamSpec) -> &'static str {
        let ParamKind::Choice { options, default } = spec.kind else {
            return "";
        };
        let Some(raw) = self.get(spec.id) else {
            return default;
        };
        let raw = raw.trim();
        match options.iter().copied().find(|&option| option == raw) {
            Some(option) => option,
            None => {
                tracing::debug!(param = spec.id, raw, default, "unknown option, using default");
                default
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Split `NAME=VALUE`. The name is trimmed and must not be empty.
pub fn parse_pair(pair: &str) -> Result<(String, String), CipherError> {
    match pair.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => {
            Ok((id.trim().to_string(), value.to_string()))
        }
        _ => Err(CipherError::MalformedKey(pair.to_string())),
    }
}
