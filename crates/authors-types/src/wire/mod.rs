//! JSON shapes exchanged over HTTP. Kept apart from the domain types so the
//! persisted record never doubles as a request/response schema.

pub mod author;
