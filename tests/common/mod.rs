//! Destination models and row helpers shared across the integration tests.

#![allow(dead_code)]

use rowmap::{schema, Model, Record, Result, Timestamp, Type, Value};

#[derive(Debug, Default, PartialEq)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub posts: Vec<Post>,
}

#[derive(Debug, Default, PartialEq)]
pub struct Post {
    pub id: i64,
    pub body: String,
}

impl Model for Blog {
    const NAME: &'static str = "Blog";

    fn schema() -> schema::Model {
        schema::Model {
            name: Self::NAME,
            fields: vec![
                schema::Field::primitive("id", Type::I64).column("blog_id"),
                schema::Field::primitive("title", Type::String).column("blog_title"),
                schema::Field::has_many::<Post>("posts"),
            ],
        }
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Blog {
            id: record.take(0).to_i64()?,
            title: record.take(1).to_string()?,
            posts: record.take(2).load_many()?,
        })
    }
}

impl Model for Post {
    const NAME: &'static str = "Post";

    fn schema() -> schema::Model {
        schema::Model {
            name: Self::NAME,
            fields: vec![
                schema::Field::primitive("id", Type::I64).column("post_id"),
                schema::Field::primitive("body", Type::String).column("post_body"),
            ],
        }
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Post {
            id: record.take(0).to_i64()?,
            body: record.take(1).to_string()?,
        })
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub address: Option<Address>,
}

#[derive(Debug, Default, PartialEq)]
pub struct Address {
    pub city: String,
}

impl Model for User {
    const NAME: &'static str = "User";

    fn schema() -> schema::Model {
        schema::Model {
            name: Self::NAME,
            fields: vec![
                schema::Field::primitive("id", Type::I64).column("user_id"),
                schema::Field::primitive("name", Type::String).column("user_name"),
                schema::Field::has_one::<Address>("address"),
            ],
        }
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(User {
            id: record.take(0).to_i64()?,
            name: record.take(1).to_string()?,
            address: record.take(2).load_one()?,
        })
    }
}

impl Model for Address {
    const NAME: &'static str = "Address";

    fn schema() -> schema::Model {
        schema::Model {
            name: Self::NAME,
            fields: vec![schema::Field::primitive("city", Type::String).column("addr_city")],
        }
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Address {
            city: record.take(0).to_string()?,
        })
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Ticket {
    pub id: i64,
    pub status: i64,
    pub deleted_at: Option<Timestamp>,
}

impl Model for Ticket {
    const NAME: &'static str = "Ticket";

    fn schema() -> schema::Model {
        schema::Model {
            name: Self::NAME,
            fields: vec![
                schema::Field::primitive("id", Type::I64),
                schema::Field::primitive("status", Type::Enum("TicketStatus")),
                schema::Field::primitive("deleted_at", Type::Timestamp).nullable(),
            ],
        }
    }

    fn load(mut record: Record) -> Result<Self> {
        Ok(Ticket {
            id: record.take(0).to_i64()?,
            status: record.take(1).to_i64()?,
            deleted_at: record.take(2).to_option_timestamp()?,
        })
    }
}

pub fn blog_row(id: i64, title: &str, post_id: impl Into<Value>, body: impl Into<Value>) -> Vec<Value> {
    vec![id.into(), title.into(), post_id.into(), body.into()]
}
