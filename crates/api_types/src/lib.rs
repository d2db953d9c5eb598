//! Wire shapes of the remote finance API.
//!
//! The API speaks JSON with Portuguese field names; every model maps them with
//! serde renames so the Rust side reads in English. Unknown fields are
//! ignored.
use serde::{Deserialize, Serialize};

pub use date::WireDate;

/// Collection path segments, relative to the API base URL.
pub mod paths {
    pub const EXPENSES: &str = "expenses";
    pub const INCOMES: &str = "incomes";
    pub const CATEGORIES: &str = "categories";
    pub const USERS: &str = "users";
}

/// A record type exposed by the API as a REST collection.
pub trait Resource {
    /// Collection path, e.g. `expenses`.
    const PATH: &'static str;
    /// Human readable name used in logs and messages.
    const NAME: &'static str;
}

/// Decimal amounts (JSON numbers) held as integer minor units (cents).
///
/// The API never sends more than two fractional digits; anything beyond is
/// rounded half away from zero.
pub mod amount {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn to_minor(value: f64) -> i64 {
        (value * 100.0).round() as i64
    }

    pub fn from_minor(minor: i64) -> f64 {
        minor as f64 / 100.0
    }

    pub mod option {
        use super::*;

        pub fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(minor) => serializer.serialize_some(&from_minor(*minor)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Option::<f64>::deserialize(deserializer)?;
            Ok(value.map(to_minor))
        }
    }
}

/// Calendar dates as the API sends them.
///
/// A date that is not plain `YYYY-MM-DD` must not reject the record, let
/// alone the whole list it arrived in. Datetimes keep their calendar day;
/// anything else is kept verbatim.
pub mod date {
    use std::{convert::Infallible, fmt, str::FromStr};

    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub enum WireDate {
        Day(NaiveDate),
        /// Text that does not start with an ISO calendar date.
        Raw(String),
    }

    impl WireDate {
        pub fn parse(raw: &str) -> Self {
            let trimmed = raw.trim();
            match NaiveDate::parse_and_remainder(trimmed, "%Y-%m-%d") {
                Ok((day, rest)) if rest.is_empty() || rest.starts_with(['T', ' ']) => {
                    Self::Day(day)
                }
                _ => Self::Raw(raw.to_string()),
            }
        }

        /// The calendar day, when the API sent one.
        pub fn day(&self) -> Option<NaiveDate> {
            match self {
                Self::Day(day) => Some(*day),
                Self::Raw(_) => None,
            }
        }
    }

    impl From<NaiveDate> for WireDate {
        fn from(day: NaiveDate) -> Self {
            Self::Day(day)
        }
    }

    impl FromStr for WireDate {
        type Err = Infallible;

        fn from_str(raw: &str) -> Result<Self, Self::Err> {
            Ok(Self::parse(raw))
        }
    }

    impl fmt::Display for WireDate {
        /// ISO `YYYY-MM-DD` for calendar days, the original text otherwise.
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
                Self::Raw(raw) => f.write_str(raw),
            }
        }
    }

    impl Serialize for WireDate {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for WireDate {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            Ok(Self::parse(&raw))
        }
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        #[serde(rename = "descricao", default)]
        pub description: String,
        /// Classification tag (e.g. fixed/variable), owned by the API.
        #[serde(rename = "tipo", default)]
        pub kind: String,
    }

    impl Resource for Category {
        const PATH: &'static str = paths::CATEGORIES;
        const NAME: &'static str = "categoria";
    }
}

pub mod user {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        #[serde(rename = "nome", default)]
        pub name: String,
    }

    impl Resource for User {
        const PATH: &'static str = paths::USERS;
        const NAME: &'static str = "usuario";
    }
}

pub mod expense {
    use super::{category::Category, user::User, *};

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i64,
        /// Amount in minor units; `None` when the API sends `null`.
        #[serde(rename = "valor", default, with = "amount::option")]
        pub value_minor: Option<i64>,
        #[serde(rename = "dataPagamento", default)]
        pub payment_date: Option<WireDate>,
        #[serde(rename = "dataVencimento", default)]
        pub due_date: Option<WireDate>,
        #[serde(rename = "descricao", default)]
        pub description: Option<String>,
        #[serde(rename = "categoria", default)]
        pub category: Option<Category>,
        #[serde(rename = "usuario", default)]
        pub user: Option<User>,
    }

    impl Resource for Expense {
        const PATH: &'static str = paths::EXPENSES;
        const NAME: &'static str = "despesa";
    }
}

pub mod income {
    use super::{category::Category, user::User, *};

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Income {
        pub id: i64,
        /// Amount in minor units; `None` when the API sends `null`.
        #[serde(rename = "valor", default, with = "amount::option")]
        pub value_minor: Option<i64>,
        #[serde(rename = "dataEntrada", default)]
        pub entry_date: Option<WireDate>,
        #[serde(rename = "categoria", default)]
        pub category: Option<Category>,
        #[serde(rename = "usuario", default)]
        pub user: Option<User>,
    }

    impl Resource for Income {
        const PATH: &'static str = paths::INCOMES;
        const NAME: &'static str = "receita";
    }
}

/// Error body returned by the API on failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
