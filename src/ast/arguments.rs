use serde::Serialize;

/// A literal argument value.
///
/// `raw` is the exact source spelling and `cooked` is its JSON decoding.
/// The two always agree: the only constructor decodes `raw`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub raw: String,
    pub cooked: serde_json::Value,
}

impl Literal {
    /// Decode `raw` as a JSON value.
    ///
    /// # Examples
    /// ```
    /// use graphql_tag::ast::Literal;
    ///
    /// let lit = Literal::from_raw("[1, 2]").unwrap();
    /// assert_eq!(lit.cooked, serde_json::json!([1, 2]));
    /// assert!(Literal::from_raw("[1,").is_err());
    /// ```
    pub fn from_raw(raw: impl Into<String>) -> Result<Self, serde_json::Error> {
        let raw = raw.into();
        let cooked = serde_json::from_str(&raw)?;
        Ok(Literal { raw, cooked })
    }
}

/// One argument of a call expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Argument {
    /// Number, string, boolean, null, array or object literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// "large"
    /// {"first": 10}
    /// ```
    Literal(Literal),

    /// Named parameter, resolved from the variables mapping
    ///
    /// # Examples
    /// ```text
    /// <size>
    /// ```
    Parameter { name: String },

    /// Index into the values interpolated by the template assembler
    ///
    /// # Examples
    /// ```text
    /// &0
    /// ```
    Positional { index: usize },
}
