//! INSERT/UPDATE statements over whichever todo columns were supplied.
//!
//! Column names come only from [`Column`]; values are always bound. Names and
//! placeholders are emitted from the same ordered list so they stay aligned.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

use crate::domain::todo::{NewTodo, TodoChanges, TodoId};

pub const RETURNING: &str = " RETURNING id, title, due, position, completed, updated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Due,
    Position,
    Completed,
    Updated,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::Due => "due",
            Column::Position => "position",
            Column::Completed => "completed",
            Column::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

/// Neutralises markup in free text before it is stored. `&` is left alone so
/// escaped text survives being sent back unchanged.
pub fn sanitize(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnValues(Vec<(Column, SqlValue)>);

impl ColumnValues {
    pub fn for_insert(input: &NewTodo) -> Self {
        let mut values = Self::default();
        values.push_text(Column::Title, Some(&input.title));
        values.push_text(Column::Due, input.due.as_deref());
        values.push(Column::Position, input.position.map(SqlValue::Integer));
        values.push(Column::Completed, input.completed.map(SqlValue::Boolean));
        values
    }

    /// Supplied fields plus a fresh `updated` stamp.
    pub fn for_update(changes: &TodoChanges, now: DateTime<Utc>) -> Self {
        let mut values = Self::default();
        values.push_text(Column::Title, changes.title.as_deref());
        values.push_text(Column::Due, changes.due.as_deref());
        values.push(Column::Position, changes.position.map(SqlValue::Integer));
        values.push(Column::Completed, changes.completed.map(SqlValue::Boolean));
        values.push(Column::Updated, Some(SqlValue::Timestamp(now)));
        values
    }

    fn push(&mut self, column: Column, value: Option<SqlValue>) {
        if let Some(value) = value {
            self.0.push((column, value));
        }
    }

    fn push_text(&mut self, column: Column, value: Option<&str>) {
        self.push(column, value.map(|v| SqlValue::Text(sanitize(v))));
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.0.iter().map(|(column, _)| *column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn push_value(query: &mut QueryBuilder<'_, Sqlite>, value: SqlValue) {
    match value {
        SqlValue::Text(text) => query.push_bind(text),
        SqlValue::Integer(n) => query.push_bind(n),
        SqlValue::Boolean(b) => query.push_bind(b),
        SqlValue::Timestamp(at) => query.push_bind(at),
    };
}

pub fn insert_statement(values: ColumnValues) -> QueryBuilder<'static, Sqlite> {
    let names: Vec<&str> = values.columns().map(Column::as_str).collect();
    let mut query = QueryBuilder::new("INSERT INTO todos (");
    query.push(names.join(", "));
    query.push(") VALUES (");
    for (i, (_, value)) in values.0.into_iter().enumerate() {
        if i > 0 {
            query.push(", ");
        }
        push_value(&mut query, value);
    }
    query.push(")");
    query.push(RETURNING);
    query
}

pub fn update_statement(id: TodoId, values: ColumnValues) -> QueryBuilder<'static, Sqlite> {
    let mut query = QueryBuilder::new("UPDATE todos SET ");
    for (i, (column, value)) in values.0.into_iter().enumerate() {
        if i > 0 {
            query.push(", ");
        }
        query.push(column.as_str());
        query.push(" = ");
        push_value(&mut query, value);
    }
    query.push(" WHERE id = ");
    query.push_bind(id.0);
    query.push(RETURNING);
    query
}
