//! Leaf coercion: enums, nullable wrappers, booleans, integer widths, and
//! timestamps.

mod common;

use common::Ticket;

use rowmap::{
    register_enums, schema, Error, MapLog, Mapper, MemoryRows, Model, Record, Result, Timestamp,
    Type, Value,
};

use std::collections::HashMap;

fn ticket_enums() {
    register_enums(HashMap::from([(
        "TicketStatus".to_string(),
        HashMap::from([
            ("ACTIVE".to_string(), 1),
            ("DELETED".to_string(), 2),
        ]),
    )]));
}

#[test]
fn enum_name_and_nullable_timestamp() {
    ticket_enums();
    let mut rows = MemoryRows::from_names(
        ["id", "status", "deleted_at"],
        vec![vec![Value::I64(1), "ACTIVE".into(), Value::Null]],
    );

    let mut tickets: Vec<Ticket> = vec![];
    Mapper::new().map(&mut rows, &mut tickets).unwrap();

    assert_eq!(
        tickets,
        vec![Ticket {
            id: 1,
            status: 1,
            deleted_at: None,
        }]
    );
}

#[test]
fn enum_integer_codes_pass_through() {
    ticket_enums();
    let mut rows = MemoryRows::from_names(
        ["id", "status", "deleted_at"],
        vec![vec![Value::I64(1), Value::I64(2), Value::Null]],
    );

    let mut tickets: Vec<Ticket> = vec![];
    Mapper::new().map(&mut rows, &mut tickets).unwrap();

    assert_eq!(tickets[0].status, 2);
}

#[test]
fn unknown_enum_name_fails() {
    ticket_enums();
    let mut rows = MemoryRows::from_names(
        ["id", "status", "deleted_at"],
        vec![vec![Value::I64(1), "RETIRED".into(), Value::Null]],
    );

    let mut tickets: Vec<Ticket> = vec![];
    let err = Mapper::new().map(&mut rows, &mut tickets).unwrap_err();

    assert!(matches!(
        err,
        Error::UnknownEnumValue {
            ty: "TicketStatus",
            ..
        }
    ));
    assert!(tickets.is_empty());
}

#[derive(Debug, Default, PartialEq)]
struct Flag {
    id: i64,
    on: bool,
}

impl Model for Flag {
    const NAME: &'static str = "Flag";

    fn schema() -> schema::Model {
        schema::Model {
            name: Self::NAME,
            fields: vec![
                schema::Field::primitive("id", Type::I64),
                schema::Field::primitive("on", Type::Bool),
            ],
        }
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Flag {
            id: record.take(0).to_i64()?,
            on: record.take(1).to_bool()?,
        })
    }
}

#[test]
fn booleans_from_integers_and_text() {
    let mut rows = MemoryRows::from_names(
        ["id", "on"],
        vec![
            vec![Value::I64(1), Value::I64(0)],
            vec![Value::I64(2), Value::I64(3)],
            vec![Value::I64(3), "TRUE".into()],
            vec![Value::I64(4), "false".into()],
        ],
    );

    let mut flags: Vec<Flag> = vec![];
    Mapper::new().map(&mut rows, &mut flags).unwrap();

    let on: Vec<bool> = flags.iter().map(|flag| flag.on).collect();
    assert_eq!(on, [false, true, true, false]);
}

#[test]
fn bad_boolean_text_fails() {
    let mut rows = MemoryRows::from_names(
        ["id", "on"],
        vec![vec![Value::I64(1), "yes".into()]],
    );

    let mut flags: Vec<Flag> = vec![];
    let err = Mapper::new().map(&mut rows, &mut flags).unwrap_err();

    assert!(matches!(err, Error::InvalidBoolean { .. }));
}

#[derive(Debug, Default, PartialEq)]
struct Narrow {
    count: i64,
}

impl Model for Narrow {
    const NAME: &'static str = "Narrow";

    fn schema() -> schema::Model {
        schema::Model {
            name: Self::NAME,
            fields: vec![schema::Field::primitive("count", Type::I32)],
        }
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Narrow {
            count: record.take(0).to_i64()?,
        })
    }
}

#[test]
fn narrowing_that_loses_information_fails() {
    let mut rows = MemoryRows::from_names(["count"], vec![vec![Value::I64(1 << 40)]]);

    let mut narrows: Vec<Narrow> = vec![];
    let err = Mapper::new().map(&mut rows, &mut narrows).unwrap_err();

    assert!(matches!(
        err,
        Error::NumericOverflow {
            value,
            ty: Type::I32,
            ..
        } if value == 1 << 40
    ));
}

#[test]
fn in_range_values_fit_narrow_fields() {
    let mut rows = MemoryRows::from_names(["count"], vec![vec![Value::I64(-40)]]);

    let mut narrows: Vec<Narrow> = vec![];
    Mapper::new().map(&mut rows, &mut narrows).unwrap();

    assert_eq!(narrows[0].count, -40);
}

#[derive(Debug, Default, PartialEq)]
struct Event {
    id: i64,
    at: Timestamp,
}

impl Model for Event {
    const NAME: &'static str = "Event";

    fn schema() -> schema::Model {
        schema::Model {
            name: Self::NAME,
            fields: vec![
                schema::Field::primitive("id", Type::I64),
                schema::Field::primitive("at", Type::Timestamp),
            ],
        }
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Event {
            id: record.take(0).to_i64()?,
            at: record.take(1).to_timestamp()?,
        })
    }
}

#[test]
fn rfc3339_text_with_fractional_seconds_parses() {
    let mut rows = MemoryRows::from_names(
        ["id", "at"],
        vec![vec![Value::I64(1), "2021-01-02T03:04:05.006Z".into()]],
    );

    let mut events: Vec<Event> = vec![];
    Mapper::new().map(&mut rows, &mut events).unwrap();

    assert_eq!(events[0].at, Timestamp::new(1_609_556_645, 6_000_000));
}

#[test]
fn native_timestamps_pass_through() {
    let at = Timestamp::new(42, 7);
    let mut rows = MemoryRows::from_names(["id", "at"], vec![vec![Value::I64(1), at.into()]]);

    let mut events: Vec<Event> = vec![];
    Mapper::new().map(&mut rows, &mut events).unwrap();

    assert_eq!(events[0].at, at);
}

#[test]
fn bad_timestamp_text_fails() {
    let mut rows = MemoryRows::from_names(
        ["id", "at"],
        vec![vec![Value::I64(1), "yesterday".into()]],
    );

    let mut events: Vec<Event> = vec![];
    let err = Mapper::new().map(&mut rows, &mut events).unwrap_err();

    assert!(matches!(err, Error::InvalidTimestamp { .. }));
}

#[test]
fn null_into_non_nullable_keeps_zero_value_and_logs() {
    let mut rows = MemoryRows::from_names(
        ["id", "at"],
        vec![vec![Value::I64(1), Value::Null]],
    );

    let mut events: Vec<Event> = vec![];
    let mut mapper = Mapper::new();
    mapper.map(&mut rows, &mut events).unwrap();

    assert_eq!(events[0].at, Timestamp::default());
    assert!(mapper.logs().contains(&MapLog::NullIntoNonNullable {
        model: "Event",
        field: "at",
    }));
}
