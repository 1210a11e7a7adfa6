use serde_json::{Map, Value};

use super::{MSG_REQUIRED, MSG_SERVER_MANAGED, ValidationErrors};

/// Reads fields out of a submitted form object, recording every problem
/// instead of stopping at the first one.
pub(crate) struct FormReader<'a> {
    input: &'a Map<String, Value>,
    pub(crate) errors: ValidationErrors,
}

impl<'a> FormReader<'a> {
    /// Fails when `input` is not a JSON object.
    pub(crate) fn new(input: &'a Value) -> Result<Self, ValidationErrors> {
        match input.as_object() {
            Some(input) => Ok(Self {
                input,
                errors: ValidationErrors::new(),
            }),
            None => {
                let mut errors = ValidationErrors::new();
                errors.add("", "Expected an object");
                Err(errors)
            }
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.input.get(field).filter(|v| !v.is_null())
    }

    pub(crate) fn reject_server_managed(&mut self, fields: &[&str]) {
        for field in fields {
            if self.input.contains_key(*field) {
                self.errors.add(*field, MSG_SERVER_MANAGED);
            }
        }
    }

    /// A non-blank string of at most `max_len` characters.
    pub(crate) fn required_str(&mut self, field: &str, max_len: usize) -> Option<String> {
        match self.optional_str(field, max_len) {
            Ok(Some(s)) => Some(s),
            Ok(None) => {
                self.errors.add(field, MSG_REQUIRED);
                None
            }
            Err(()) => None,
        }
    }

    /// A string that may be absent, null, or blank. `Err` means an error was
    /// recorded for the field.
    pub(crate) fn optional_str(
        &mut self,
        field: &str,
        max_len: usize,
    ) -> Result<Option<String>, ()> {
        let Some(value) = self.present(field) else {
            return Ok(None);
        };
        let Some(s) = value.as_str() else {
            self.errors.add(field, "Expected a string");
            return Err(());
        };
        if s.trim().is_empty() {
            return Ok(None);
        }
        if s.chars().count() > max_len {
            self.errors.add(field, format!("Must be at most {max_len} characters"));
            return Err(());
        }
        Ok(Some(s.to_string()))
    }

    /// An optional string drawn from a fixed set, parsed with `parse`.
    pub(crate) fn optional_choice<T>(
        &mut self,
        field: &str,
        max_len: usize,
        parse: impl Fn(&str) -> Option<T>,
        accepted: &str,
    ) -> Result<Option<T>, ()> {
        let Some(raw) = self.optional_str(field, max_len)? else {
            return Ok(None);
        };
        match parse(&raw) {
            Some(v) => Ok(Some(v)),
            None => {
                self.errors.add(field, format!("Must be one of: {accepted}"));
                Err(())
            }
        }
    }

    /// An optional integer within `min..=max`.
    pub(crate) fn optional_int(
        &mut self,
        field: &str,
        min: i64,
        max: i64,
    ) -> Result<Option<i64>, ()> {
        let Some(value) = self.present(field) else {
            return Ok(None);
        };
        let Some(n) = value.as_i64() else {
            self.errors.add(field, "Expected an integer");
            return Err(());
        };
        if !(min..=max).contains(&n) {
            self.errors.add(field, format!("Must be between {min} and {max}"));
            return Err(());
        }
        Ok(Some(n))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_non_object_input() {
        let Err(errors) = FormReader::new(&json!([1, 2])) else {
            panic!("expected error");
        };
        assert_eq!(errors.get(""), ["Expected an object"]);
    }

    #[test]
    fn test_string_rules() {
        let input = json!({ "blank": "  ", "long": "abcdef", "num": 3, "ok": "abc" });
        let mut form = FormReader::new(&input).unwrap();

        assert_eq!(form.required_str("ok", 5).as_deref(), Some("abc"));
        assert!(form.required_str("blank", 5).is_none());
        assert!(form.required_str("missing", 5).is_none());
        assert!(form.required_str("long", 5).is_none());
        assert_eq!(form.optional_str("num", 5), Err(()));

        let errors = form.errors;
        assert_eq!(errors.get("blank"), [MSG_REQUIRED]);
        assert_eq!(errors.get("missing"), [MSG_REQUIRED]);
        assert_eq!(errors.get("long"), ["Must be at most 5 characters"]);
        assert_eq!(errors.get("num"), ["Expected a string"]);
        assert!(!errors.contains("ok"));
    }

    #[test]
    fn test_int_rules() {
        let input = json!({ "port": 5432, "big": 70000, "text": "5432", "frac": 1.5 });
        let mut form = FormReader::new(&input).unwrap();

        assert_eq!(form.optional_int("port", 1, 65535), Ok(Some(5432)));
        assert_eq!(form.optional_int("absent", 1, 65535), Ok(None));
        assert_eq!(form.optional_int("big", 1, 65535), Err(()));
        assert_eq!(form.optional_int("text", 1, 65535), Err(()));
        assert_eq!(form.optional_int("frac", 1, 65535), Err(()));
        assert_eq!(form.errors.len(), 3);
    }
}
