//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for customers and addresses.
//!
//! Identifiers only ever come from the fixed column sets below; user input is always bound.

use crate::model::{AddressInput, CustomerInput};
use crate::sql::SqlValue;
use serde::Deserialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, phone_number";
const ADDRESS_COLUMNS: &str = "id, customer_id, address_details, city, state, pin_code";
const COUNTED_CUSTOMER_COLUMNS: &str =
    "c.id, c.first_name, c.last_name, c.phone_number, IFNULL(a.address_count, 0) AS address_count";
/// Customers left-joined with a per-customer address count; customers without addresses keep count 0.
const COUNTED_CUSTOMERS_FROM: &str = "FROM customers c \
     LEFT JOIN (SELECT customer_id, COUNT(*) AS address_count FROM addresses GROUP BY customer_id) a \
     ON a.customer_id = c.id";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new(sql: impl Into<String>) -> Self {
        QueryBuf {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    fn bind(mut self, v: impl Into<SqlValue>) -> Self {
        self.params.push(v.into());
        self
    }
}

/// Columns the customer list may be ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortColumn {
    #[default]
    Id,
    FirstName,
    LastName,
    PhoneNumber,
    AddressCount,
}

impl SortColumn {
    /// Anything outside the allow-list falls back to `Id`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "first_name" => SortColumn::FirstName,
            "last_name" => SortColumn::LastName,
            "phone_number" => SortColumn::PhoneNumber,
            "address_count" => SortColumn::AddressCount,
            _ => SortColumn::Id,
        }
    }

    fn expr(self) -> &'static str {
        match self {
            SortColumn::Id => "c.id",
            SortColumn::FirstName => "c.first_name",
            SortColumn::LastName => "c.last_name",
            SortColumn::PhoneNumber => "c.phone_number",
            SortColumn::AddressCount => "address_count",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Address columns that can be substring-filtered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AddressField {
    City,
    State,
    PinCode,
}

impl AddressField {
    fn column(self) -> &'static str {
        match self {
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::PinCode => "pin_code",
        }
    }
}

/// Raw list-customers query string, exactly as the client sent it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CustomerListParams {
    pub q: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

/// Substring filters on address fields. Blank values are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AddressFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
}

impl AddressFilter {
    pub fn normalized(&self) -> Self {
        AddressFilter {
            city: non_blank(self.city.as_deref()),
            state: non_blank(self.state.as_deref()),
            pin_code: non_blank(self.pin_code.as_deref()),
        }
    }

    fn terms(&self) -> [(AddressField, Option<&str>); 3] {
        [
            (AddressField::City, self.city.as_deref()),
            (AddressField::State, self.state.as_deref()),
            (AddressField::PinCode, self.pin_code.as_deref()),
        ]
    }
}

/// Normalised list-customers request: trimmed filters, allow-listed sort, clamped window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerListQuery {
    pub search: Option<String>,
    pub address: AddressFilter,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl Default for CustomerListQuery {
    fn default() -> Self {
        CustomerListQuery {
            search: None,
            address: AddressFilter::default(),
            sort_by: SortColumn::Id,
            sort_order: SortOrder::Asc,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CustomerListQuery {
    pub fn from_params(p: &CustomerListParams) -> Self {
        let page = parse_positive(p.page.as_deref()).unwrap_or(DEFAULT_PAGE).max(1);
        let page_size = parse_positive(p.page_size.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        CustomerListQuery {
            search: non_blank(p.q.as_deref()),
            address: AddressFilter {
                city: p.city.clone(),
                state: p.state.clone(),
                pin_code: p.pin_code.clone(),
            }
            .normalized(),
            sort_by: p.sort_by.as_deref().map(SortColumn::parse).unwrap_or_default(),
            sort_order: p.sort_order.as_deref().map(SortOrder::parse).unwrap_or_default(),
            page,
            page_size,
        }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }
}

/// Row query and count query for one customer list request. Both carry the same filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerListSql {
    pub data: QueryBuf,
    pub count: QueryBuf,
}

/// Leading integer of a query value (`"5abc"` -> 5), with negatives floored at zero and
/// huge values saturating at `u32::MAX`. Zero and values without leading digits count as absent.
fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let s = raw?.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].parse::<u64>().unwrap_or(u64::MAX);
    if magnitude == 0 {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(u32::try_from(magnitude).unwrap_or(u32::MAX))
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

/// `%term%` with LIKE wildcards in the term escaped, for use with `ESCAPE '\'`.
fn contains_pattern(term: &str) -> SqlValue {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    SqlValue::Text(pattern)
}

fn like(column: &str) -> String {
    format!("{} LIKE ? ESCAPE '\\'", column)
}

/// WHERE fragment plus its params for the customer list. Empty when no filter applies.
fn customer_where(query: &CustomerListQuery) -> (String, Vec<SqlValue>) {
    let mut parts = Vec::new();
    let mut params = Vec::new();

    if let Some(term) = &query.search {
        parts.push(format!(
            "({} OR {} OR {})",
            like("c.first_name"),
            like("c.last_name"),
            like("c.phone_number")
        ));
        let pattern = contains_pattern(term);
        params.extend([pattern.clone(), pattern.clone(), pattern]);
    }

    for (field, term) in query.address.terms() {
        let Some(term) = term else { continue };
        parts.push(format!(
            "EXISTS (SELECT 1 FROM addresses ad WHERE ad.customer_id = c.id AND {})",
            like(&format!("ad.{}", field.column()))
        ));
        params.push(contains_pattern(term));
    }

    let clause = if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    };
    (clause, params)
}

/// Paged customer rows with address counts, and the unpaged total for the same filter.
pub fn customer_list(query: &CustomerListQuery) -> CustomerListSql {
    let (where_clause, params) = customer_where(query);

    let mut order = format!("{} {}", query.sort_by.expr(), query.sort_order.keyword());
    if query.sort_by != SortColumn::Id {
        order.push_str(", c.id ASC");
    }

    let count = QueryBuf {
        sql: format!("SELECT COUNT(*) AS total {}{}", COUNTED_CUSTOMERS_FROM, where_clause),
        params: params.clone(),
    };
    let data = QueryBuf {
        sql: format!(
            "SELECT {} {}{} ORDER BY {} LIMIT ? OFFSET ?",
            COUNTED_CUSTOMER_COLUMNS, COUNTED_CUSTOMERS_FROM, where_clause, order
        ),
        params,
    }
    .bind(i64::from(query.page_size))
    .bind(query.offset());

    CustomerListSql { data, count }
}

/// One customer with its address count.
pub fn select_counted_customer(id: i64) -> QueryBuf {
    QueryBuf::new(format!(
        "SELECT {} {} WHERE c.id = ?",
        COUNTED_CUSTOMER_COLUMNS, COUNTED_CUSTOMERS_FROM
    ))
    .bind(id)
}

pub fn select_customer_id(id: i64) -> QueryBuf {
    QueryBuf::new("SELECT id FROM customers WHERE id = ?").bind(id)
}

/// Id of a customer already holding `phone`, other than `except`.
pub fn select_customer_by_phone(phone: &str, except: Option<i64>) -> QueryBuf {
    match except {
        Some(id) => QueryBuf::new("SELECT id FROM customers WHERE phone_number = ? AND id <> ?")
            .bind(phone)
            .bind(id),
        None => QueryBuf::new("SELECT id FROM customers WHERE phone_number = ?").bind(phone),
    }
}

pub fn insert_customer(input: &CustomerInput) -> QueryBuf {
    QueryBuf::new(format!(
        "INSERT INTO customers (first_name, last_name, phone_number) VALUES (?, ?, ?) RETURNING {}",
        CUSTOMER_COLUMNS
    ))
    .bind(input.first_name.as_str())
    .bind(input.last_name.as_str())
    .bind(input.phone_number.as_str())
}

pub fn update_customer(id: i64, input: &CustomerInput) -> QueryBuf {
    QueryBuf::new(format!(
        "UPDATE customers SET first_name = ?, last_name = ?, phone_number = ? WHERE id = ? RETURNING {}",
        CUSTOMER_COLUMNS
    ))
    .bind(input.first_name.as_str())
    .bind(input.last_name.as_str())
    .bind(input.phone_number.as_str())
    .bind(id)
}

/// Owned addresses go with it through `ON DELETE CASCADE`.
pub fn delete_customer(id: i64) -> QueryBuf {
    QueryBuf::new("DELETE FROM customers WHERE id = ?").bind(id)
}

/// A customer's addresses, newest first. Every given filter must hold for the same row.
pub fn address_list(customer_id: i64, filter: &AddressFilter) -> QueryBuf {
    let mut q = QueryBuf::new("").bind(customer_id);
    let mut where_parts = vec!["customer_id = ?".to_string()];
    for (field, term) in filter.terms() {
        let Some(term) = term else { continue };
        where_parts.push(like(field.column()));
        q.params.push(contains_pattern(term));
    }
    q.sql = format!(
        "SELECT {} FROM addresses WHERE {} ORDER BY id DESC",
        ADDRESS_COLUMNS,
        where_parts.join(" AND ")
    );
    q
}

pub fn select_address(id: i64) -> QueryBuf {
    QueryBuf::new(format!("SELECT {} FROM addresses WHERE id = ?", ADDRESS_COLUMNS)).bind(id)
}

pub fn insert_address(customer_id: i64, input: &AddressInput) -> QueryBuf {
    QueryBuf::new(format!(
        "INSERT INTO addresses (customer_id, address_details, city, state, pin_code) \
         VALUES (?, ?, ?, ?, ?) RETURNING {}",
        ADDRESS_COLUMNS
    ))
    .bind(customer_id)
    .bind(input.address_details.as_str())
    .bind(input.city.as_str())
    .bind(input.state.as_str())
    .bind(input.pin_code.as_str())
}

pub fn update_address(id: i64, input: &AddressInput) -> QueryBuf {
    QueryBuf::new(format!(
        "UPDATE addresses SET address_details = ?, city = ?, state = ?, pin_code = ? \
         WHERE id = ? RETURNING {}",
        ADDRESS_COLUMNS
    ))
    .bind(input.address_details.as_str())
    .bind(input.city.as_str())
    .bind(input.state.as_str())
    .bind(input.pin_code.as_str())
    .bind(id)
}

pub fn delete_address(id: i64) -> QueryBuf {
    QueryBuf::new("DELETE FROM addresses WHERE id = ?").bind(id)
}
