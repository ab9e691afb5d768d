//! The appointment record and its wire/display representations.
//!
//! The JSON shape matches the REST resource: camelCase keys, `date` as an ISO
//! calendar day, `time` as `HH:mm`, `cost` as a plain number. The store owns
//! `id`; it is omitted from the body until the record has been persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Format used for `date` on the wire.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for `date` in tables and in the search text.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format used for `time`, both on the wire and on screen.
pub const TIME_FORMAT: &str = "%H:%M";

/// Joins column values in the search text so a query never matches across columns.
const SEARCH_SEPARATOR: char = '◬';

/// A single appointment as stored by the backing REST resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::deserialize_id"
    )]
    pub id: Option<u64>,
    #[serde(with = "wire::date")]
    pub date: NaiveDate,
    pub time: String,
    pub customer_name: String,
    pub address: String,
    pub city: String,
    pub cost: f64,
}

impl Appointment {
    /// An appointment that has not been persisted yet.
    pub fn new(
        date: NaiveDate,
        time: impl Into<String>,
        customer_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        cost: f64,
    ) -> Self {
        Appointment {
            id: None,
            date,
            time: time.into(),
            customer_name: customer_name.into(),
            address: address.into(),
            city: city.into(),
            cost,
        }
    }

    /// Whether the store has assigned an id to this record.
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Copy of this record carrying the given id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Copy of this record with the id stripped, as sent on create.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    pub fn display_cost(&self) -> String {
        format!("{:.2}", self.cost)
    }

    /// The text shown for one column of the list.
    pub fn column_text(&self, column: Column) -> String {
        match column {
            Column::Date => self.display_date(),
            Column::Time => self.time.clone(),
            Column::CustomerName => self.customer_name.clone(),
            Column::Address => self.address.clone(),
            Column::City => self.city.clone(),
            Column::Cost => self.display_cost(),
        }
    }

    /// Lowercased concatenation of every visible column, matched by the list filter.
    pub fn search_text(&self) -> String {
        let mut text = String::new();
        for column in Column::ALL {
            text.push_str(&self.column_text(column));
            text.push(SEARCH_SEPARATOR);
        }
        text.to_lowercase()
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}, {} ({})",
            self.display_date(),
            self.time,
            self.customer_name,
            self.address,
            self.city
        )
    }
}

/// Columns of the appointment list, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Time,
    CustomerName,
    Address,
    City,
    Cost,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Date,
        Column::Time,
        Column::CustomerName,
        Column::Address,
        Column::City,
        Column::Cost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Time => "Time",
            Column::CustomerName => "Customer",
            Column::Address => "Address",
            Column::City => "City",
            Column::Cost => "Cost",
        }
    }

    /// Name accepted on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Time => "time",
            Column::CustomerName => "customer",
            Column::Address => "address",
            Column::City => "city",
            Column::Cost => "cost",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if let Some(column) = Column::ALL.into_iter().find(|c| c.key() == name) {
            return Ok(column);
        }

        match name.as_str() {
            "customername" | "customer_name" => Ok(Column::CustomerName),
            other => {
                let keys: Vec<&str> = Column::ALL.iter().map(|c| c.key()).collect();
                Err(format!(
                    "Unknown column '{}'. Expected one of: {}",
                    other,
                    keys.join(", ")
                ))
            }
        }
    }
}

/// Parse a time-of-day as entered by a user or returned by the store.
///
/// Accepts `HH:mm` and `HH:mm:ss`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Normalize a time-of-day to `HH:mm`.
pub fn normalize_time(raw: &str) -> Option<String> {
    parse_time(raw).map(|t| t.format(TIME_FORMAT).to_string())
}

/// Parse a calendar day as stored on the wire.
///
/// Plain `YYYY-MM-DD` is the canonical form. RFC 3339 date-times are also
/// accepted and reduced to the local calendar day they fall on.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    parse_wire_date_in(raw, &Local)
}

/// [`parse_wire_date`], reducing date-times to their calendar day in `tz`.
pub fn parse_wire_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT).ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(tz).date_naive())
    })
}

/// Parse a calendar day as entered by a user: `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, DISPLAY_DATE_FORMAT))
        .ok()
}

mod wire {
    use serde::{Deserialize, Deserializer};

    /// Ids arrive as numbers, but some stores hand them out as numeric strings.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireId {
        Number(u64),
        Text(String),
    }

    pub fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<WireId>::deserialize(deserializer)? {
            None => Ok(None),
            Some(WireId::Number(n)) => Ok(Some(n)),
            Some(WireId::Text(s)) => s
                .parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid appointment id '{}'", s))),
        }
    }

    pub mod date {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        use crate::appointment::{WIRE_DATE_FORMAT, parse_wire_date};

        pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(&date.format(WIRE_DATE_FORMAT))
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            parse_wire_date(&raw)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
        }
    }
}
