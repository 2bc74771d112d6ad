use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParameterEntry {
    name: String,
    values: Vec<String>,
}

/// Report parameters as a multi-value name/value collection.
///
/// Names are matched ASCII case-insensitively and keep the spelling they were first added
/// with. Names come out in the order they were first added, and the values of a single name
/// come out in the order they were added, so `Region=West, Year=2024, Region=East` becomes
/// `Region=West&Region=East&Year=2024`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportParameters {
    entries: Vec<ParameterEntry>,
}

impl ReportParameters {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Append `value` to `name`, keeping any values already present.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].values.push(value),
            None => self.entries.push(ParameterEntry {
                name,
                values: vec![value],
            }),
        }
        self
    }

    /// Replace every value of `name` with `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].values = vec![value],
            None => self.entries.push(ParameterEntry {
                name,
                values: vec![value],
            }),
        }
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(name, value);
        self
    }

    pub fn get_values(&self, name: &str) -> Option<&[String]> {
        self.position(name)
            .map(|idx| self.entries[idx].values.as_slice())
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name)
            .map(|idx| self.entries.remove(idx).values)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Every `(name, value)` pair, with multi-value names expanded.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|entry| {
            entry
                .values
                .iter()
                .map(move |value| (entry.name.as_str(), value.as_str()))
        })
    }
}

impl<K, V> FromIterator<(K, V)> for ReportParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = ReportParameters::new();
        for (name, value) in iter {
            params.add(name, value);
        }
        params
    }
}

impl<K, V> Extend<(K, V)> for ReportParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.add(name, value);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ReportParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for ReportParameters {
    fn from(value: BTreeMap<String, String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<BTreeMap<String, Vec<String>>> for ReportParameters {
    fn from(value: BTreeMap<String, Vec<String>>) -> Self {
        value
            .into_iter()
            .flat_map(|(name, values)| values.into_iter().map(move |v| (name.clone(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_names_are_grouped_in_first_seen_order() {
        let params = ReportParameters::from([
            ("Region", "West"),
            ("Year", "2024"),
            ("Region", "East"),
        ]);

        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(
            vec![("Region", "West"), ("Region", "East"), ("Year", "2024")],
            pairs
        );
        assert_eq!(2, params.len());
    }

    #[test]
    fn test_names_are_case_insensitive_and_keep_first_spelling() {
        let mut params = ReportParameters::new();
        params.add("Region", "West").add("REGION", "North");

        assert_eq!(vec!["Region"], params.keys().collect::<Vec<_>>());
        assert_eq!(
            Some(&["West".to_string(), "North".to_string()][..]),
            params.get_values("region")
        );
    }

    #[test]
    fn test_set_replaces_all_values() {
        let mut params = ReportParameters::from([("Region", "West"), ("Region", "East")]);
        params.set("region", "South");

        assert_eq!(
            vec![("Region", "South")],
            params.pairs().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_remove_drops_the_name() {
        let mut params = ReportParameters::new().with("a", "1").with("b", "2");

        assert_eq!(Some(vec!["1".to_string()]), params.remove("A"));
        assert!(params.get_values("a").is_none());
        assert_eq!(1, params.len());
        assert!(params.remove("missing").is_none());
    }

    #[test]
    fn test_from_multi_value_map() {
        let map = BTreeMap::from([(
            "Region".to_string(),
            vec!["West".to_string(), "East".to_string()],
        )]);
        let params = ReportParameters::from(map);

        assert_eq!(
            vec![("Region", "West"), ("Region", "East")],
            params.pairs().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_empty() {
        let params = ReportParameters::default();
        assert!(params.is_empty());
        assert_eq!(0, params.pairs().count());
    }
}
