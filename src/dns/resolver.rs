use crate::error::Error;
use crate::zone::DomainTable;
use std::borrow::Cow;

/// Look up `name` in `table` by exact match. No wildcard or suffix matching is done; case is only
/// folded when the table was loaded with folding enabled.
///
/// # Errors
///
/// Returns [`Error::DomainNotFound`] when the table has no entry for `name`.
pub fn resolve<'t>(name: &str, table: &'t DomainTable) -> Result<&'t str, Error> {
    let key = if table.folds_case() {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    };
    table
        .get(&key)
        .ok_or_else(|| Error::DomainNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let table = DomainTable::from_entries([("example.com", "1.2.3.4")]);
        assert_eq!(resolve("example.com", &table).unwrap(), "1.2.3.4");

        for miss in ["www.example.com", "com", "example.com.", "Example.com", ""] {
            let err = resolve(miss, &table).unwrap_err();
            assert!(
                matches!(err, Error::DomainNotFound(ref name) if name == miss),
                "{miss:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn folds_case_when_table_does() {
        let table = DomainTable::from_entries([("Example.COM", "1.2.3.4")])
            .normalized(true)
            .unwrap();
        assert_eq!(resolve("EXAMPLE.com", &table).unwrap(), "1.2.3.4");
    }
}
