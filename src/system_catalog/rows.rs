//! Row values and the pull-based cursor handed back by catalog handlers.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Oid(u32),
    Text(String),
    Int2Vector(Vec<i16>),
    TextArray(Vec<String>),
}

impl Value {
    pub fn text<S: Into<String>>(s: S) -> Self { Value::Text(s.into()) }

    pub fn as_oid(&self) -> Option<u32> {
        match self { Value::Oid(v) => Some(*v), _ => None }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self { Value::Bool(v) => Some(*v), _ => None }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self { Value::Text(s) => Some(s.as_str()), _ => None }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
}

/// PostgreSQL text output forms: int2vector is space separated, arrays use `{a,b}`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", if *b { "t" } else { "f" }),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Oid(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Int2Vector(v) => {
                let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", parts.join(" "))
            }
            Value::TextArray(v) => write!(f, "{{{}}}", v.join(",")),
        }
    }
}

pub type Row = Vec<Value>;

/// Forward-only, single-pass cursor over synthesized rows. Each sequence owns
/// its data; closing drops whatever was not yet pulled.
pub struct RowSequence {
    inner: Option<Box<dyn Iterator<Item = Row> + Send>>,
}

impl RowSequence {
    pub fn new<I>(rows: I) -> Self
    where
        I: Iterator<Item = Row> + Send + 'static,
    {
        Self { inner: Some(Box::new(rows)) }
    }

    pub fn from_rows(rows: Vec<Row>) -> Self { Self::new(rows.into_iter()) }

    pub fn empty() -> Self { Self { inner: None } }

    /// Next row, or `None` once the sequence is exhausted or closed.
    pub fn next_row(&mut self) -> Option<Row> {
        let row = self.inner.as_mut().and_then(|it| it.next());
        if row.is_none() {
            self.inner = None;
        }
        row
    }

    /// Idempotent; safe after exhaustion.
    pub fn close(&mut self) { self.inner = None; }

    pub fn is_closed(&self) -> bool { self.inner.is_none() }
}

impl Iterator for RowSequence {
    type Item = Row;
    fn next(&mut self) -> Option<Row> { self.next_row() }
}

impl fmt::Debug for RowSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSequence").field("closed", &self.is_closed()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_ends_immediately() {
        let mut seq = RowSequence::empty();
        assert!(seq.next_row().is_none());
        assert!(seq.next_row().is_none());
        seq.close();
        seq.close();
    }

    #[test]
    fn yields_in_order_then_ends() {
        let mut seq = RowSequence::from_rows(vec![vec![Value::Int32(1)], vec![Value::Int32(2)]]);
        assert_eq!(seq.next_row(), Some(vec![Value::Int32(1)]));
        assert_eq!(seq.next_row(), Some(vec![Value::Int32(2)]));
        assert_eq!(seq.next_row(), None);
        assert!(seq.is_closed());
        seq.close();
        assert_eq!(seq.next_row(), None);
    }

    #[test]
    fn close_discards_remaining_rows() {
        let mut seq = RowSequence::from_rows(vec![vec![Value::Null]; 3]);
        assert!(seq.next_row().is_some());
        seq.close();
        assert!(seq.next_row().is_none());
        assert_eq!(seq.count(), 0);
    }

    #[test]
    fn lazy_projection_runs_per_pull() {
        let seq = RowSequence::new((0..3u32).map(|i| vec![Value::Oid(i | 0x8000_0000)]));
        let oids: Vec<u32> = seq.map(|r| r[0].as_oid().unwrap()).collect();
        assert_eq!(oids, vec![0x8000_0000, 0x8000_0001, 0x8000_0002]);
    }

    #[test]
    fn text_forms() {
        assert_eq!(Value::Int2Vector(vec![1, 3]).to_string(), "1 3");
        assert_eq!(Value::TextArray(vec!["a".into(), "b".into()]).to_string(), "{a,b}");
        assert_eq!(Value::Bool(true).to_string(), "t");
    }
}
