//! PostgREST Query Strings
//!
//! `field=eq.value` filters and `order=field.desc` ordering.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::models::{ListQuery, TaskId};

/// Characters that would break out of a query value
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',')
    .add(b'=')
    .add(b'?')
    .add(b'(')
    .add(b')');

fn eq_filter(field: &str, value: &str) -> String {
    format!("{}=eq.{}", field, utf8_percent_encode(value, QUERY_VALUE))
}

/// Query suffix for listing: optional status filter, always descending order
pub fn list_query_string(query: &ListQuery) -> String {
    let mut params = Vec::with_capacity(2);
    if let Some(status) = query.status {
        params.push(eq_filter("status", status.as_str()));
    }
    params.push(format!("order={}.desc", query.sort.column()));
    format!("?{}", params.join("&"))
}

/// Query suffix selecting one row by id
pub fn id_filter(id: TaskId) -> String {
    format!("?{}", eq_filter("id", &id.to_string()))
}
