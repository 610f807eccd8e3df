//! Typed label selector expressions and the query-string builder.
use std::{collections::BTreeMap, fmt, iter::FromIterator};

/// A single selector term.
///
/// Terms combine with logical AND; the grammar has no OR primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    /// `key=value`
    Equal(String, String),
    /// `key!=value`
    NotEqual(String, String),
    /// `key in (v1,v2)` — value order is preserved as given.
    In(String, Vec<String>),
    /// `key notin (v1,v2)`
    NotIn(String, Vec<String>),
    /// `key` — the key exists, any value.
    Exists(String),
    /// `!key` — the key does not exist.
    DoesNotExist(String),
}

/// An ordered conjunction of selector terms.
///
/// The empty selector renders as the empty string and selects everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector(Vec<Expression>);

impl Selector {
    /// The select-all selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term, preserving order.
    pub fn push(&mut self, expr: Expression) {
        self.0.push(expr);
    }

    /// Whether this selector matches everything.
    pub fn selects_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Evaluate the selector against a label map.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.0.iter().all(|expr| expr.matches(labels))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expr) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{expr}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Equal(key, value) => write!(f, "{key}={value}"),
            Expression::NotEqual(key, value) => write!(f, "{key}!={value}"),
            Expression::In(key, values) => write!(f, "{key} in ({})", values.join(",")),
            Expression::NotIn(key, values) => write!(f, "{key} notin ({})", values.join(",")),
            Expression::Exists(key) => write!(f, "{key}"),
            Expression::DoesNotExist(key) => write!(f, "!{key}"),
        }
    }
}

impl Expression {
    fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        match self {
            Expression::Equal(key, value) => labels.get(key) == Some(value),
            Expression::NotEqual(key, value) => labels.get(key) != Some(value),
            Expression::In(key, values) => {
                labels.get(key).is_some_and(|v| values.contains(v))
            }
            Expression::NotIn(key, values) => {
                labels.get(key).is_none_or(|v| !values.contains(v))
            }
            Expression::Exists(key) => labels.contains_key(key),
            Expression::DoesNotExist(key) => !labels.contains_key(key),
        }
    }
}

impl From<Expression> for Selector {
    fn from(expr: Expression) -> Self {
        Self(vec![expr])
    }
}

impl FromIterator<Expression> for Selector {
    fn from_iter<T: IntoIterator<Item = Expression>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<(String, String)> for Selector {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| Expression::Equal(k, v))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[test]
    fn single_equality() {
        let sel = Selector::from(Expression::Equal(s("app"), s("nginx")));
        assert_eq!(sel.to_string(), "app=nginx");
    }

    #[test]
    fn empty_selector_selects_all() {
        let sel = Selector::new();
        assert_eq!(sel.to_string(), "");
        assert!(sel.selects_all());
        assert!(sel.matches(&BTreeMap::new()));
    }

    #[test]
    fn term_and_value_order_preserved() {
        let sel = Selector::from_iter([
            Expression::Exists(s("app")),
            Expression::NotIn(s("env"), vec![s("qa"), s("dev")]),
        ]);
        assert_eq!(sel.to_string(), "app,env notin (qa,dev)");
    }

    #[test]
    fn full_grammar_rendering() {
        let sel = Selector::from_iter([
            Expression::Equal(s("app"), s("blog")),
            Expression::NotEqual(s("tier"), s("cache")),
            Expression::In(s("env"), vec![s("prod"), s("staging")]),
            Expression::DoesNotExist(s("legacy")),
        ]);
        assert_eq!(
            sel.to_string(),
            "app=blog,tier!=cache,env in (prod,staging),!legacy"
        );
    }

    #[test]
    fn equality_selector_from_label_pairs() {
        let sel: Selector = [(s("app"), s("blog")), (s("env"), s("prod"))]
            .into_iter()
            .collect();
        assert_eq!(sel.to_string(), "app=blog,env=prod");
    }

    #[test]
    fn matching_semantics() {
        let labels: BTreeMap<_, _> = [(s("app"), s("blog")), (s("env"), s("prod"))].into();

        assert!(Selector::from(Expression::Equal(s("app"), s("blog"))).matches(&labels));
        assert!(Selector::from(Expression::Exists(s("env"))).matches(&labels));
        assert!(Selector::from(Expression::DoesNotExist(s("legacy"))).matches(&labels));
        assert!(Selector::from(Expression::NotIn(s("env"), vec![s("qa")])).matches(&labels));
        // absent key: notin matches, in does not
        assert!(Selector::from(Expression::NotIn(s("zone"), vec![s("a")])).matches(&labels));
        assert!(!Selector::from(Expression::In(s("zone"), vec![s("a")])).matches(&labels));
        assert!(!Selector::from(Expression::NotEqual(s("app"), s("blog"))).matches(&labels));
    }
}
