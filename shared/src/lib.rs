use chrono::Datelike;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Calendar month. Addressed by name in the UI and by its 1-12 ordinal on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order; index + 1 is the wire ordinal
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Wire/storage representation (January = 1 ... December = 12)
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Month> {
        let index = ordinal.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Following month, wrapping December to January
    pub fn succ(self) -> Month {
        Self::ALL[self.ordinal() as usize % 12]
    }

    /// Preceding month, wrapping January to December
    pub fn pred(self) -> Month {
        Self::ALL[(self.ordinal() as usize + 10) % 12]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a month: {0:?}")]
pub struct ParseMonthError(pub String);

impl FromStr for Month {
    type Err = ParseMonthError;

    /// Accepts a month name (any case) or its ordinal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<u32>() {
            return Month::from_ordinal(ordinal).ok_or_else(|| ParseMonthError(s.to_string()));
        }
        Month::ALL
            .iter()
            .copied()
            .find(|month| month.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseMonthError(s.to_string()))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.ordinal())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ordinal = u32::deserialize(deserializer)?;
        Month::from_ordinal(ordinal)
            .ok_or_else(|| de::Error::custom(format!("month ordinal out of range: {}", ordinal)))
    }
}

/// Navigation direction between periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// The (month, year) window the ledger displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: Month,
}

impl Period {
    pub fn new(month: Month, year: i32) -> Self {
        Self { year, month }
    }

    /// Build from the wire representation; `None` for an out-of-range month
    pub fn from_ordinal(month: u32, year: i32) -> Option<Self> {
        Month::from_ordinal(month).map(|month| Self::new(month, year))
    }

    /// Period containing today's local date
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        // chrono months are always 1..=12
        let month = Month::from_ordinal(today.month()).unwrap_or(Month::January);
        Self::new(month, today.year())
    }

    /// Following month. Stays put at the last representable year.
    pub fn next(self) -> Self {
        match self.month {
            Month::December => match self.year.checked_add(1) {
                Some(year) => Self::new(Month::January, year),
                None => self,
            },
            month => Self::new(month.succ(), self.year),
        }
    }

    /// Preceding month. Stays put at the first representable year.
    pub fn previous(self) -> Self {
        match self.month {
            Month::January => match self.year.checked_sub(1) {
                Some(year) => Self::new(Month::December, year),
                None => self,
            },
            month => Self::new(month.pred(), self.year),
        }
    }

    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Previous => self.previous(),
            Direction::Next => self.next(),
        }
    }

    /// True when a record attributed to (`month`, `year`) belongs to this period
    pub fn matches(&self, month: u32, year: i32) -> bool {
        self.month.ordinal() == month && self.year == year
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// Opaque, server-assigned expense identifier.
///
/// The server may emit ids as JSON numbers or strings; both are accepted and
/// kept verbatim as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for ExpenseId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ExpenseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ExpenseId(n.to_string()),
            RawId::Text(s) => ExpenseId(s),
        })
    }
}

/// Amounts arrive either as JSON numbers or as decimal strings
mod amount {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    fn parse<E: de::Error>(raw: RawAmount) -> Result<f64, E> {
        match raw {
            RawAmount::Number(n) => Ok(n),
            RawAmount::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid amount: {:?}", s))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        parse(RawAmount::deserialize(deserializer)?)
    }

    pub fn deserialize_optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Option::<RawAmount>::deserialize(deserializer)?
            .map(parse)
            .transpose()
    }
}

/// A persisted expense record as returned by the expenses service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub expense_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "amount::deserialize")]
    pub amount: f64,
    pub currency: String,
    /// Month ordinal (1-12) the expense is attributed to
    pub month: u32,
    pub year: i32,
    /// Server timestamp (RFC 3339), display only
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Expense {
    /// The period this expense is attributed to, if its month is valid
    pub fn period(&self) -> Option<Period> {
        Period::from_ordinal(self.month, self.year)
    }
}

/// Body of `POST /expenses`; the server attributes it to the current period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub expense_type: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
}

/// Body of `POST /expenses/past`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePastExpenseRequest {
    #[serde(flatten)]
    pub expense: CreateExpenseRequest,
    pub month: u32,
    pub year: i32,
}

/// A validated, not yet persisted expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub expense_type: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    /// Explicit past period; `None` means "current period"
    pub backdate: Option<Period>,
}

impl ExpenseDraft {
    /// Period the created expense will be attributed to
    pub fn target_period(&self, today: Period) -> Period {
        self.backdate.unwrap_or(today)
    }

    pub fn to_request(&self) -> CreateExpenseRequest {
        CreateExpenseRequest {
            expense_type: self.expense_type.clone(),
            description: self.description.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
        }
    }

    pub fn to_past_request(&self) -> Option<CreatePastExpenseRequest> {
        self.backdate.map(|period| CreatePastExpenseRequest {
            expense: self.to_request(),
            month: period.month.ordinal(),
            year: period.year,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmountSum {
    #[serde(default, deserialize_with = "amount::deserialize_optional")]
    pub amount: Option<f64>,
}

/// One row of `GET /expenses/groupBy?groupBy=expenseType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTypeTotal {
    pub expense_type: String,
    #[serde(rename = "_sum", default)]
    pub sum: AmountSum,
}

impl ExpenseTypeTotal {
    pub fn total(&self) -> f64 {
        self.sum.amount.unwrap_or(0.0)
    }
}

/// Server-provided vocabularies for the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownField {
    ExpenseType,
    Currency,
}

impl DropdownField {
    pub fn as_query_value(self) -> &'static str {
        match self {
            DropdownField::ExpenseType => "expenseType",
            DropdownField::Currency => "currency",
        }
    }
}
